/// Greatest index `i` with `times[i] <= time`, clamped to `[0, len - 1]`.
///
/// `times` must be non-decreasing. Runs once per trace per rendered frame, so
/// this is a binary search with the midpoint biased upwards; `lo` only ever
/// moves to an index known to satisfy the predicate.
pub fn frame_for_time(times: &[f64], time: f64) -> usize {
    if times.is_empty() {
        return 0;
    }
    let mut lo = 0usize;
    let mut hi = times.len() - 1;
    while lo < hi {
        let mid = lo + (hi - lo).div_ceil(2);
        if times[mid] <= time {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    lo
}

#[cfg(test)]
#[path = "../../tests/unit/playback/frame.rs"]
mod tests;
