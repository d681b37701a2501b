use super::chromatogram::Chromatogram;
use super::feature::MrmFeature;
use crate::errors::DataProcessingError;
use serde::{
    Deserialize,
    Serialize,
};

fn default_detecting() -> bool {
    true
}

/// One monitored fragment channel and its recorded trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub native_id: String,
    #[serde(default)]
    pub product_mz: Option<f64>,
    /// Identifying (non-detecting) transitions are carried along but are
    /// never picked and do not contribute to the feature totals.
    #[serde(default = "default_detecting")]
    pub detecting: bool,
    pub chromatogram: Chromatogram,
}

/// A precursor (MS1) trace belonging to the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecursorTrace {
    pub native_id: String,
    #[serde(default)]
    pub precursor_mz: Option<f64>,
    pub chromatogram: Chromatogram,
}

/// Points at one of the traces held by a [`TransitionGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraceRef {
    Transition(usize),
    Precursor(usize),
}

/// All traces monitored for one precursor, processed together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionGroup {
    pub group_id: String,
    pub transitions: Vec<Transition>,
    #[serde(default)]
    pub precursors: Vec<PrecursorTrace>,
    #[serde(default)]
    pub features: Vec<MrmFeature>,
}

impl TransitionGroup {
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            ..Default::default()
        }
    }

    pub fn add_transition(
        &mut self,
        native_id: impl Into<String>,
        product_mz: Option<f64>,
        chromatogram: Chromatogram,
    ) -> &mut Self {
        self.transitions.push(Transition {
            native_id: native_id.into(),
            product_mz,
            detecting: true,
            chromatogram,
        });
        self
    }

    pub fn add_precursor(
        &mut self,
        native_id: impl Into<String>,
        precursor_mz: Option<f64>,
        chromatogram: Chromatogram,
    ) -> &mut Self {
        self.precursors.push(PrecursorTrace {
            native_id: native_id.into(),
            precursor_mz,
            chromatogram,
        });
        self
    }

    pub fn add_feature(&mut self, feature: MrmFeature) {
        self.features.push(feature);
    }

    pub fn chromatogram(&self, trace: TraceRef) -> Option<&Chromatogram> {
        match trace {
            TraceRef::Transition(i) => self.transitions.get(i).map(|t| &t.chromatogram),
            TraceRef::Precursor(i) => self.precursors.get(i).map(|p| &p.chromatogram),
        }
    }

    pub fn native_id(&self, trace: TraceRef) -> Option<&str> {
        match trace {
            TraceRef::Transition(i) => self.transitions.get(i).map(|t| t.native_id.as_str()),
            TraceRef::Precursor(i) => self.precursors.get(i).map(|p| p.native_id.as_str()),
        }
    }

    pub(crate) fn require_chromatogram(
        &self,
        trace: TraceRef,
    ) -> Result<&Chromatogram, DataProcessingError> {
        self.chromatogram(trace)
            .ok_or_else(|| DataProcessingError::IndexOutOfBounds {
                index: match trace {
                    TraceRef::Transition(i) | TraceRef::Precursor(i) => i,
                },
                len: match trace {
                    TraceRef::Transition(_) => self.transitions.len(),
                    TraceRef::Precursor(_) => self.precursors.len(),
                },
                context: format!("trace lookup in group {}", self.group_id),
            })
    }

    pub fn num_traces(&self) -> usize {
        self.transitions.len() + self.precursors.len()
    }

    /// Checks that every trace has as many positions as intensities.
    pub fn check_consistent(&self) -> Result<(), DataProcessingError> {
        for t in self.transitions.iter() {
            t.chromatogram
                .check_consistent()
                .map_err(|e| e.append_to_context(&format!(" in transition {}", t.native_id)))?;
        }
        for p in self.precursors.iter() {
            p.chromatogram
                .check_consistent()
                .map_err(|e| e.append_to_context(&format!(" in precursor {}", p.native_id)))?;
        }
        Ok(())
    }

    /// Sorts every trace by position; a no-op on already sorted traces.
    pub fn sort_chromatograms(&mut self) {
        for t in self.transitions.iter_mut() {
            t.chromatogram.sort_by_position();
        }
        for p in self.precursors.iter_mut() {
            p.chromatogram.sort_by_position();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_lookup() {
        let mut group = TransitionGroup::new("PEPTIDE/2");
        group
            .add_transition(
                "t1",
                Some(500.0),
                Chromatogram::from_pairs(vec![(1.0, 1.0)]),
            )
            .add_precursor(
                "p0",
                Some(400.0),
                Chromatogram::from_pairs(vec![(1.0, 2.0), (2.0, 3.0)]),
            );
        assert_eq!(group.num_traces(), 2);
        assert_eq!(group.native_id(TraceRef::Transition(0)), Some("t1"));
        assert_eq!(group.native_id(TraceRef::Precursor(0)), Some("p0"));
        assert_eq!(
            group.chromatogram(TraceRef::Precursor(0)).map(|c| c.len()),
            Some(2)
        );
        assert!(group.chromatogram(TraceRef::Transition(3)).is_none());
        assert!(group.require_chromatogram(TraceRef::Transition(3)).is_err());
    }

    #[test]
    fn test_detecting_defaults_to_true() {
        let json = r#"{
            "group_id": "g",
            "transitions": [
                {"native_id": "a", "chromatogram": {"positions": [1.0], "intensities": [2.0]}}
            ]
        }"#;
        let group: TransitionGroup = serde_json::from_str(json).unwrap();
        assert!(group.transitions[0].detecting);
        assert!(group.transitions[0].product_mz.is_none());
        assert!(group.precursors.is_empty());
        assert!(group.features.is_empty());
    }

    #[test]
    fn test_check_consistent_names_trace() {
        let mut group = TransitionGroup::new("g");
        group.add_transition(
            "bad",
            None,
            Chromatogram {
                positions: vec![1.0, 2.0],
                intensities: vec![1.0],
            },
        );
        let err = group.check_consistent().unwrap_err();
        assert!(err.to_string().contains("bad"), "{}", err);
    }
}
