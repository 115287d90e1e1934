/// Format milliseconds as "HH:MM:SS:CC" (centiseconds), all fields floored.
pub fn format_elapsed(ms: u64) -> String {
    let total_secs = ms / 1000;
    let cs = (ms % 1000) / 10;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{:02}:{:02}:{:02}:{:02}", h, m, s, cs)
}

/// Format milliseconds as "HH:MM:SS", rounding partial seconds up.
///
/// A countdown with 0.3 s left still shows "00:00:01"; "00:00:00" only
/// appears once the deadline has actually passed.
pub fn format_countdown(ms: u64) -> String {
    let total_secs = ms.div_ceil(1000);
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// Format one lap-list row, e.g. "Lap 3  00:01:02:50".
pub fn format_lap(number: usize, elapsed_ms: u64) -> String {
    format!("Lap {:<3} {}", number, format_elapsed(elapsed_ms))
}
