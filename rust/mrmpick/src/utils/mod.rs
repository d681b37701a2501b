pub mod correlation;
pub mod resample;
pub mod rolling_calculators;
pub mod smoothing;
pub mod stats;
