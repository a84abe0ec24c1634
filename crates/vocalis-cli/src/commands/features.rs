//! `vocalis features` -- print the expected feature order.

use comfy_table::{Table, presets::UTF8_FULL};
use vocalis_types::FEATURE_NAMES;

fn features_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["INDEX", "FEATURE"]);
    for (i, name) in FEATURE_NAMES.iter().enumerate() {
        table.add_row([i.to_string(), (*name).to_string()]);
    }
    table
}

/// Run the `features` command.
pub fn run() {
    println!("{}", features_table());
}
