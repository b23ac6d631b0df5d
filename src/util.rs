/// Formats a second count as `mm:ss`, flooring fractional seconds and
/// clamping negatives to zero.
pub fn format_mm_ss(total_secs: f64) -> String {
    let secs = total_secs.max(0.0).floor() as u64;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
