//! Number formatting helpers shared by the panels.

/// Format a count for display (e.g., 1234 -> "1.2K", 1234567 -> "1.2M").
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Format an average with one decimal place, switching to K/M suffixes when large.
pub fn format_average(v: f64) -> String {
    if v >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if v >= 10_000.0 {
        format!("{:.1}K", v / 1_000.0)
    } else {
        format!("{:.1}", v)
    }
}

/// Format a percentage with two decimals.
pub fn format_percent(v: f64) -> String {
    format!("{:.2}%", v)
}
