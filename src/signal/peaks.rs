//! Local-maxima detection on a filtered channel.

/// Find the indices of strict local maxima.
///
/// An index `i` is reported iff `series[i]` is strictly greater than both
/// immediate neighbors. Boundary samples are never reported, and plateaus
/// of equal values are not counted; near-flat peaks after heavy smoothing
/// may therefore be under-counted, which is an accepted limitation.
pub fn find_local_maxima(series: &[f64]) -> Vec<usize> {
    if series.len() < 3 {
        return Vec::new();
    }

    let mut maxima = Vec::new();
    for i in 1..series.len() - 1 {
        if series[i] > series[i - 1] && series[i] > series[i + 1] {
            maxima.push(i);
        }
    }
    maxima
}
