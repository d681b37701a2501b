pub mod candidate;
pub mod chromatogram;
pub mod feature;
pub mod transition_group;

pub use candidate::{
    CandidatePeak,
    PickedTrace,
    SeedPeak,
};
pub use chromatogram::Chromatogram;
pub use feature::{
    HullPoint,
    MrmFeature,
    PeakShapeMetrics,
    SubFeature,
};
pub use transition_group::{
    PrecursorTrace,
    TraceRef,
    Transition,
    TransitionGroup,
};
