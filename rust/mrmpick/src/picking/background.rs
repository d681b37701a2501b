use crate::models::Chromatogram;
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BackgroundEstimate {
    /// Background integrated under the peak.
    pub area: f64,
    /// Average noise level at the peak borders.
    pub noise_level: f64,
}

/// Background under a peak from the trace level at its borders.
///
/// The noise level is the mean of the first sample after `left` and the
/// first sample after `right` (the last sample if none follows). The area
/// is that level times the number of samples in `(left, right]`, which
/// assumes a roughly even sampling.
pub fn estimate_background_average(
    chromatogram: &Chromatogram,
    left: f64,
    right: f64,
) -> BackgroundEstimate {
    let positions = &chromatogram.positions;
    let Some(left_idx) = positions.iter().position(|&p| p > left) else {
        warn!(
            "No samples after the left border {}, background not estimated",
            left
        );
        return BackgroundEstimate::default();
    };
    let right_idx = positions[left_idx..]
        .iter()
        .position(|&p| p > right)
        .map(|i| i + left_idx)
        .unwrap_or(positions.len() - 1);

    let noise_level =
        (chromatogram.intensities[left_idx] + chromatogram.intensities[right_idx]) / 2.0;
    let num_points = positions[left_idx..]
        .iter()
        .take_while(|&&p| p <= right)
        .count();
    BackgroundEstimate {
        area: noise_level * num_points as f64,
        noise_level,
    }
}
