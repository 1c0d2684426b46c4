//! Compact rendering helpers for call reports.
//!
//! Keeps rendered argument lists bounded so a report stays readable even
//! when a spied call receives large payloads.

/// Collapse newlines/extra whitespace and bound length for terminal display.
pub fn compact_line(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let preview: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

/// Join up to `max_items` names, noting how many were left out.
pub fn preview_names(names: &[String], max_items: usize) -> String {
    if names.is_empty() {
        return String::new();
    }
    let shown = names
        .iter()
        .take(max_items)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if names.len() > max_items {
        format!("{} (+{} more)", shown, names.len() - max_items)
    } else {
        shown
    }
}
