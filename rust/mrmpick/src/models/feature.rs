use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HullPoint {
    pub position: f64,
    pub intensity: f64,
}

/// Shape descriptors of one trace within the feature boundary.
///
/// Widths and start/end positions at a given fraction of the apex height
/// are found by linear interpolation between the bracketing samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeakShapeMetrics {
    pub width_at_5: f64,
    pub width_at_10: f64,
    pub width_at_50: f64,
    pub start_position_at_5: f64,
    pub start_position_at_10: f64,
    pub start_position_at_50: f64,
    pub end_position_at_5: f64,
    pub end_position_at_10: f64,
    pub end_position_at_50: f64,
    pub total_width: f64,
    pub tailing_factor: f64,
    pub asymmetry_factor: f64,
    pub baseline_delta_2_height: f64,
    pub slope_of_baseline: f64,
    pub points_across_baseline: usize,
    pub points_across_half_height: usize,
}

/// Per-trace record of a feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubFeature {
    pub native_id: String,
    pub mz: Option<f64>,
    /// Apex of the seed candidate. Unlike [`MrmFeature::apex_position`] it
    /// is not moved when recalculated borders leave it outside.
    pub position: f64,
    /// Summed resampled intensity strictly inside the boundary, after
    /// background subtraction.
    pub intensity: f64,
    /// Trapezoidal area over the inclusive boundary window.
    pub intensity_integral: f64,
    pub apex_intensity: f64,
    pub hull: Vec<HullPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_background_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_background_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_metrics: Option<PeakShapeMetrics>,
}

/// A consensus peak spanning every trace of a transition group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MrmFeature {
    /// Insertion index within the owning group, so only unique together
    /// with `group_id`.
    pub id: u64,
    pub group_id: String,
    pub apex_position: f64,
    pub intensity: f64,
    pub left: f64,
    pub right: f64,
    pub total_xic: f64,
    pub peak_apices_sum: f64,
    #[serde(default)]
    pub quality: Option<f64>,
    #[serde(default)]
    pub outlier: Option<String>,
    pub sub_features: Vec<SubFeature>,
    #[serde(default)]
    pub precursor_sub_features: Vec<SubFeature>,
}

impl MrmFeature {
    /// True when this feature's boundary lies within `other`'s.
    pub fn is_nested_in(&self, other: &MrmFeature) -> bool {
        self.left >= other.left && self.right <= other.right
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn sub_feature(&self, native_id: &str) -> Option<&SubFeature> {
        self.sub_features
            .iter()
            .chain(self.precursor_sub_features.iter())
            .find(|s| s.native_id == native_id)
    }
}
