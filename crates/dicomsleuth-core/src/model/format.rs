/// Formatting utilities: human-readable counts and durations.
///
/// Durations are kept as `std::time::Duration` internally. Floating point is
/// only used at the display-formatting boundary.
use std::time::Duration;

/// Format a file count with thousands separators (`12345` → `12,345`).
pub fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let lead = match digits.len() % 3 {
        0 => 3,
        n => n,
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    out.push_str(&digits[..lead]);
    for group in digits.as_bytes()[lead..].chunks(3) {
        out.push(',');
        out.extend(group.iter().map(|&b| b as char));
    }
    out
}

/// Format a duration as seconds with five decimal places, the resolution
/// used in the timing table.
pub fn format_seconds(duration: Duration) -> String {
    format!("{:.5}", duration.as_secs_f64())
}

/// Files per second, or 0.0 for an empty or instantaneous run.
pub fn throughput(files: usize, duration: Duration) -> f64 {
    let secs = duration.as_secs_f64();
    if files == 0 || secs <= 0.0 {
        0.0
    } else {
        files as f64 / secs
    }
}
