/// `MM:SS` for countdown displays. Minutes are not wrapped at 60.
pub fn format_mmss(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// `MM:SS.t` (tenths of a second) for the stopwatch.
pub fn format_stopwatch(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let tenth = (ms % 1000) / 100;
    format!("{}.{}", format_mmss(total_seconds), tenth)
}
