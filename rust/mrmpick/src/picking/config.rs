use crate::errors::ConfigError;
use crate::utils::resample::ResamplingMethod;
use serde::{
    Deserialize,
    Serialize,
};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundSubtraction {
    #[default]
    None,
    /// Average of the resampled signal just outside the boundary, scaled by
    /// the number of samples under the peak.
    Original,
    /// Estimation on the smoothed traces. Not implemented, rejected by
    /// [`PickerConfig::validate`].
    Smoothed,
}

impl Display for BackgroundSubtraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BackgroundSubtraction::None => "none",
            BackgroundSubtraction::Original => "original",
            BackgroundSubtraction::Smoothed => "smoothed",
        };
        write!(f, "{}", name)
    }
}

/// Settings of the default single-trace picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakPickerConfig {
    pub use_gauss: bool,
    /// Kernel width, in position units.
    pub gauss_width: f64,
    /// Minimum ratio between the smoothed apex and the local noise.
    pub signal_to_noise: f64,
    /// Number of samples in the rolling noise window.
    pub sn_window: usize,
    pub min_apex_intensity: f64,
}

impl Default for PeakPickerConfig {
    fn default() -> Self {
        Self {
            use_gauss: true,
            gauss_width: 50.0,
            signal_to_noise: 1.0,
            sn_window: 31,
            min_apex_intensity: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub background_subtraction: BackgroundSubtraction,
    /// Re-estimate the seed boundary from the boundaries of the other
    /// traces' candidates.
    pub recalculate_peaks: bool,
    pub recalculate_peaks_max_z: f64,
    pub compute_peak_quality: bool,
    pub min_quality: f64,
    /// Minimum boundary width; non-positive disables the check.
    pub min_peak_width: f64,
    /// Stop once this many seeds have been processed; 0 disables.
    pub stop_after_feature: usize,
    /// Stop once a feature explains less than this fraction of the total XIC.
    pub stop_after_intensity_ratio: f64,
    /// Extra range on each side of the boundary used for quality scoring.
    pub resample_boundary: f64,
    pub use_precursors: bool,
    pub compute_peak_shape_metrics: bool,
    pub resampling: ResamplingMethod,
    pub peak_picker: PeakPickerConfig,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            background_subtraction: BackgroundSubtraction::None,
            recalculate_peaks: false,
            recalculate_peaks_max_z: 1.0,
            compute_peak_quality: false,
            min_quality: -10000.0,
            min_peak_width: -1.0,
            stop_after_feature: 0,
            stop_after_intensity_ratio: 0.0001,
            resample_boundary: 15.0,
            use_precursors: false,
            compute_peak_shape_metrics: false,
            resampling: ResamplingMethod::Interpolate,
            peak_picker: PeakPickerConfig::default(),
        }
    }
}

impl PickerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.background_subtraction == BackgroundSubtraction::Smoothed {
            return Err(ConfigError::NotImplemented {
                option: "background_subtraction",
                value: self.background_subtraction.to_string(),
            });
        }
        if !(self.recalculate_peaks_max_z.is_finite() && self.recalculate_peaks_max_z > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "recalculate_peaks_max_z",
                msg: format!(
                    "expected a positive finite number, got {}",
                    self.recalculate_peaks_max_z
                ),
            });
        }
        if !(self.resample_boundary.is_finite() && self.resample_boundary >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "resample_boundary",
                msg: format!(
                    "expected a non-negative finite number, got {}",
                    self.resample_boundary
                ),
            });
        }
        if !(self.stop_after_intensity_ratio >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "stop_after_intensity_ratio",
                msg: format!("expected a non-negative number, got {}", self.stop_after_intensity_ratio),
            });
        }
        if self.min_quality.is_nan() || self.min_peak_width.is_nan() {
            return Err(ConfigError::InvalidValue {
                field: "min_quality/min_peak_width",
                msg: "NaN thresholds are not allowed".to_string(),
            });
        }
        let pp = &self.peak_picker;
        if !(pp.gauss_width.is_finite() && pp.signal_to_noise.is_finite()) {
            return Err(ConfigError::InvalidValue {
                field: "peak_picker",
                msg: "gauss_width and signal_to_noise must be finite".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PickerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.stop_after_feature, 0);
        assert_eq!(config.min_peak_width, -1.0);
        assert_eq!(config.resample_boundary, 15.0);
    }

    #[test]
    fn test_smoothed_background_rejected() {
        let config = PickerConfig {
            background_subtraction: BackgroundSubtraction::Smoothed,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotImplemented {
                option: "background_subtraction",
                value: "smoothed".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        for config in [
            PickerConfig {
                recalculate_peaks_max_z: 0.0,
                ..Default::default()
            },
            PickerConfig {
                recalculate_peaks_max_z: f64::NAN,
                ..Default::default()
            },
            PickerConfig {
                resample_boundary: -1.0,
                ..Default::default()
            },
            PickerConfig {
                stop_after_intensity_ratio: -0.5,
                ..Default::default()
            },
        ] {
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidValue { .. })),
                "{:?}",
                config
            );
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PickerConfig = serde_json::from_str(
            r#"{"background_subtraction": "original", "recalculate_peaks": true, "resampling": "raster"}"#,
        )
        .unwrap();
        assert_eq!(config.background_subtraction, BackgroundSubtraction::Original);
        assert!(config.recalculate_peaks);
        assert_eq!(config.resampling, ResamplingMethod::Raster);
        assert_eq!(config.recalculate_peaks_max_z, 1.0);
        assert_eq!(config.peak_picker, PeakPickerConfig::default());
    }
}
