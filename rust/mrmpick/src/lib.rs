pub mod errors;
pub mod models;
pub mod picking;
pub mod utils;

pub use errors::{
    ConfigError,
    DataProcessingError,
    MrmPickError,
    Result,
};
pub use models::{
    CandidatePeak,
    Chromatogram,
    MrmFeature,
    PickedTrace,
    SubFeature,
    TraceRef,
    TransitionGroup,
};
pub use picking::{
    BackgroundSubtraction,
    ChromatogramPeakPicker,
    PeakPicker,
    PickerConfig,
    TransitionGroupPicker,
};
pub use utils::resample::ResamplingMethod;
