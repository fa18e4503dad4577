/// Format a lap time in milliseconds as `M:SS.mmm`; a missing time renders as `?`.
pub fn format_lap_time(ms: Option<u64>) -> String {
    // The lap list treats a zero time the same as a missing one.
    let Some(ms) = ms.filter(|&ms| ms > 0) else {
        return "?".to_owned();
    };
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let millis = ms % 1000;
    format!("{minutes}:{seconds:02}.{millis:03}")
}
