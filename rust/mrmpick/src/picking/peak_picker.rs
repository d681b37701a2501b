use super::config::PeakPickerConfig;
use crate::models::{
    CandidatePeak,
    Chromatogram,
};
use crate::utils::rolling_calculators::rolling_noise_estimate;
use crate::utils::smoothing::gauss_smooth;
use tracing::trace;

/// Finds candidate peaks on a single, position sorted trace.
///
/// Every returned candidate must satisfy `left <= position <= right`.
pub trait PeakPicker {
    fn pick(&self, chromatogram: &Chromatogram) -> Vec<CandidatePeak>;
}

impl<F> PeakPicker for F
where
    F: Fn(&Chromatogram) -> Vec<CandidatePeak>,
{
    fn pick(&self, chromatogram: &Chromatogram) -> Vec<CandidatePeak> {
        self(chromatogram)
    }
}

/// Local maxima of the (optionally smoothed) trace that stand out from a
/// rolling median noise level.
#[derive(Debug, Clone, Default)]
pub struct ChromatogramPeakPicker {
    pub config: PeakPickerConfig,
}

impl ChromatogramPeakPicker {
    pub fn new(config: PeakPickerConfig) -> Self {
        Self { config }
    }

    fn smooth(&self, chromatogram: &Chromatogram) -> Vec<f64> {
        if self.config.use_gauss {
            gauss_smooth(
                &chromatogram.positions,
                &chromatogram.intensities,
                self.config.gauss_width,
            )
        } else {
            chromatogram.intensities.clone()
        }
    }

    fn passes_signal_to_noise(&self, signal: f64, noise: f64) -> bool {
        if noise <= 0.0 {
            return signal > 0.0;
        }
        signal / noise >= self.config.signal_to_noise
    }
}

// Walks away from `apex` while the signal keeps going down.
fn walk_down(smoothed: &[f64], apex: usize, towards_left: bool) -> usize {
    let mut i = apex;
    if towards_left {
        while i > 0 && smoothed[i - 1] < smoothed[i] {
            i -= 1;
        }
    } else {
        while i + 1 < smoothed.len() && smoothed[i + 1] < smoothed[i] {
            i += 1;
        }
    }
    i
}

impl PeakPicker for ChromatogramPeakPicker {
    fn pick(&self, chromatogram: &Chromatogram) -> Vec<CandidatePeak> {
        let n = chromatogram.len();
        if n < 3 {
            return Vec::new();
        }
        let smoothed = self.smooth(chromatogram);
        let noise = rolling_noise_estimate(&chromatogram.intensities, self.config.sn_window);

        let mut out = Vec::new();
        for i in 1..(n - 1) {
            let s = smoothed[i];
            // Rising edge strict, falling edge may be flat: the first
            // sample of a plateau is the apex.
            if !(s > smoothed[i - 1] && s >= smoothed[i + 1]) {
                continue;
            }
            if s < self.config.min_apex_intensity || !self.passes_signal_to_noise(s, noise[i]) {
                continue;
            }
            let left = walk_down(&smoothed, i, true);
            let right = walk_down(&smoothed, i, false);
            let apex_intensity = chromatogram.intensities[i];
            if apex_intensity <= 0.0 {
                continue;
            }
            let integrated: f64 = chromatogram.intensities[left..=right].iter().sum();
            trace!(
                "Candidate at {} [{}, {}] intensity {} noise {}",
                chromatogram.positions[i],
                chromatogram.positions[left],
                chromatogram.positions[right],
                apex_intensity,
                noise[i]
            );
            out.push(
                CandidatePeak::new(
                    chromatogram.positions[i],
                    apex_intensity,
                    chromatogram.positions[left],
                    chromatogram.positions[right],
                )
                .with_integrated_intensity(integrated),
            );
        }
        out
    }
}
