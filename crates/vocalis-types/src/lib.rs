//! # vocalis-types
//!
//! Core type definitions for the vocalis acoustic classifier service.
//!
//! Every other vocalis crate depends on this one. It contains:
//!
//! - **[`prediction`]** -- [`FeatureVector`], [`Label`] and [`PredictionResult`]
//! - **[`config`]** -- Configuration schema (server and artifact paths)
//! - **[`error`]** -- [`FeatureError`]

pub mod config;
pub mod error;
pub mod prediction;

pub use config::Config;
pub use error::FeatureError;
pub use prediction::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector, Label, PredictionResult};
