use crate::models::{
    CandidatePeak,
    PickedTrace,
};
use crate::utils::stats::{
    mean_and_variance,
    pseudo_median,
};
use tracing::debug;

/// Zeroes every candidate, in every trace, that lies within or overlaps
/// `[left, right]`.
///
/// A candidate is removed when its apex is inside the inclusive window, or
/// when either of its boundaries is strictly inside it. Candidates that only
/// touch the window with a boundary survive.
pub fn suppress_overlapping(picked: &mut [PickedTrace], left: f64, right: f64) {
    for peak in picked.iter_mut().flat_map(|t| t.peaks.iter_mut()) {
        if peak.apex_within(left, right) {
            peak.suppress();
        }
    }

    for peak in picked.iter_mut().flat_map(|t| t.peaks.iter_mut()) {
        if !peak.is_active() {
            continue;
        }
        let inside = |x: f64| x > left && x < right;
        if inside(peak.left) || inside(peak.right) {
            peak.suppress();
        }
    }
}

fn consensus_border(border: f64, votes: &[f64], max_z: f64, side: &str) -> f64 {
    let Some((mean, variance)) = mean_and_variance(votes) else {
        return border;
    };
    let stdev = variance.sqrt();
    let deviation = (border - mean).abs();
    // A zero spread means every vote agrees: only a differing border moves.
    let replace = if stdev > 0.0 {
        deviation / stdev > max_z
    } else {
        deviation > 0.0
    };
    debug!(
        "Recalculating {} border {} (mean {}, stdev {}, {} votes)",
        side,
        border,
        mean,
        stdev,
        votes.len()
    );
    if !replace {
        return border;
    }
    match pseudo_median(votes) {
        Some(median) => {
            debug!("Setting {} border to {}", side, median);
            median
        }
        None => border,
    }
}

/// Consensus boundary from the candidates with apex in `[left, right]`.
///
/// Each trace votes once, with the boundary of its candidate with the
/// largest integrated intensity (suppressed candidates still vote). A side
/// whose current border is more than `max_z` standard deviations away from
/// the mean vote is replaced by the pseudo-median of the votes.
pub fn recalculate_borders(
    picked: &[PickedTrace],
    left: f64,
    right: f64,
    max_z: f64,
) -> (f64, f64) {
    let mut left_votes = Vec::with_capacity(picked.len());
    let mut right_votes = Vec::with_capacity(picked.len());
    for trace in picked.iter() {
        let winner = trace
            .peaks
            .iter()
            .filter(|p| p.apex_within(left, right))
            .fold(None, |best: Option<&CandidatePeak>, p| {
                match best {
                    Some(b) if b.integrated_intensity >= p.integrated_intensity => Some(b),
                    _ => Some(p),
                }
            });
        if let Some(w) = winner {
            left_votes.push(w.left);
            right_votes.push(w.right);
        }
    }

    let new_right = consensus_border(right, &right_votes, max_z, "right");
    let new_left = consensus_border(left, &left_votes, max_z, "left");
    (new_left, new_right)
}
