use super::transition_group::TraceRef;
use serde::Serialize;

/// A peak reported by the single-trace picker.
///
/// `intensity` is the selection weight and is forced to zero once the peak
/// is consumed or suppressed. `apex_intensity` and `integrated_intensity`
/// keep the values reported by the picker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidatePeak {
    pub position: f64,
    pub intensity: f64,
    pub apex_intensity: f64,
    pub integrated_intensity: f64,
    pub left: f64,
    pub right: f64,
}

impl CandidatePeak {
    pub fn new(position: f64, intensity: f64, left: f64, right: f64) -> Self {
        Self {
            position,
            intensity,
            apex_intensity: intensity,
            integrated_intensity: intensity,
            left,
            right,
        }
    }

    pub fn with_integrated_intensity(mut self, integrated_intensity: f64) -> Self {
        self.integrated_intensity = integrated_intensity;
        self
    }

    pub fn is_active(&self) -> bool {
        self.intensity > 0.0
    }

    pub fn suppress(&mut self) {
        self.intensity = 0.0;
    }

    pub fn apex_within(&self, left: f64, right: f64) -> bool {
        self.position >= left && self.position <= right
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

/// The candidate peaks found on one trace of a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickedTrace {
    pub trace: TraceRef,
    pub native_id: String,
    pub peaks: Vec<CandidatePeak>,
}

impl PickedTrace {
    pub fn new(trace: TraceRef, native_id: impl Into<String>, peaks: Vec<CandidatePeak>) -> Self {
        Self {
            trace,
            native_id: native_id.into(),
            peaks,
        }
    }

    pub fn num_active(&self) -> usize {
        self.peaks.iter().filter(|p| p.is_active()).count()
    }
}

/// Location of a seed peak: index into the picked traces, then into the
/// peaks of that trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPeak {
    pub trace_index: usize,
    pub peak_index: usize,
}

pub fn count_active(picked: &[PickedTrace]) -> usize {
    picked.iter().map(|t| t.num_active()).sum()
}
