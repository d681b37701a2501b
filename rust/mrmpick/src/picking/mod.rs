//! Peak picking over whole transition groups.
//!
//! Candidates are picked on every trace independently, then the largest
//! remaining candidate seeds a feature whose boundary is applied to all
//! traces of the group, until no candidates are left.

pub mod background;
pub mod config;
pub mod feature_builder;
pub mod peak_picker;
pub mod quality;
pub mod selection;
pub mod shape_metrics;
pub mod suppression;
pub mod transition_group_picker;

#[cfg(test)]
mod test_data;

pub use config::{
    BackgroundSubtraction,
    PeakPickerConfig,
    PickerConfig,
};
pub use feature_builder::build_feature;
pub use peak_picker::{
    ChromatogramPeakPicker,
    PeakPicker,
};
pub use quality::{
    compute_quality,
    QualityScore,
};
pub use selection::find_largest_peak;
pub use transition_group_picker::TransitionGroupPicker;
