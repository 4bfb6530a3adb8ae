//! CLI output formatting.
//!
//! Each command has a `format_*` function returning lines (pure, testable)
//! and a `print_*` wrapper that writes them to stdout.
//!
//! ## Check
//!
//! ```text
//! Entries (newest-first)
//! 001 2024-03-01
//! 002 2024-02-15
//!
//! Skipped
//!     notes.md
//!
//! 2 entries in content/daily
//! ```

use crate::entry::EntryOrder;
use crate::repository::Inventory;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn order_label(order: EntryOrder) -> &'static str {
    match order {
        EntryOrder::NewestFirst => "newest-first",
        EntryOrder::Filesystem => "filesystem",
    }
}

/// Format the `check` command's report.
pub fn format_check_output(inventory: &Inventory, order: EntryOrder, dir: &Path) -> Vec<String> {
    let mut lines = vec![format!("Entries ({})", order_label(order))];
    for (i, id) in inventory.entries.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), id));
    }

    if !inventory.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for name in &inventory.skipped {
            lines.push(format!("    {name}"));
        }
    }

    lines.push(String::new());
    let noun = if inventory.entries.len() == 1 {
        "entry"
    } else {
        "entries"
    };
    lines.push(format!(
        "{} {} in {}",
        inventory.entries.len(),
        noun,
        dir.display()
    ));
    lines
}

pub fn print_check_output(inventory: &Inventory, order: EntryOrder, dir: &Path) {
    for line in format_check_output(inventory, order, dir) {
        println!("{line}");
    }
}
