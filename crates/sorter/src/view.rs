//! Plain-text rendering of a sorter snapshot.

use std::fmt::Write;

use sorter_core::SorterSnapshot;

/// Renders the home list and every category column with their counts.
pub fn render(snapshot: &SorterSnapshot) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Items ({})", snapshot.home_len());
    for (position, item) in snapshot.home.iter().enumerate() {
        let _ = write!(out, "  [{position}] #{} {}", item.id, item.display_name);
        if let Some(detail) = &item.detail {
            let _ = write!(out, " ({detail})");
        }
        out.push('\n');
    }
    if snapshot.home.is_empty() {
        out.push_str("  All items have been sorted!\n");
    }

    for bucket in &snapshot.buckets {
        let _ = writeln!(out, "{} ({})", bucket.category, bucket.items.len());
        for item in &bucket.items {
            let _ = writeln!(out, "  #{} {}", item.id, item.display_name);
        }
        if bucket.items.is_empty() {
            let _ = writeln!(out, "  Move items from the list to add them here");
        }
    }
    out
}
