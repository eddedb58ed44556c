//! Formatting helpers shared by the calculator, the renderer and the CLI.

/// Format a number of seconds as `H:MM:SS`.
///
/// Hours are not padded and not wrapped; minutes and seconds are always two digits.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

/// Format a decimal with at most `max_decimals` places, stripping trailing zeros
/// and a dangling decimal point.
pub fn format_decimal(value: f64, max_decimals: usize) -> String {
    let fixed = format!("{:.*}", max_decimals, value);
    if !fixed.contains('.') {
        return fixed;
    }
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}
