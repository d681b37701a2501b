use super::config::PickerConfig;
use super::feature_builder::build_feature;
use super::peak_picker::{
    ChromatogramPeakPicker,
    PeakPicker,
};
use super::selection::find_largest_peak;
use crate::errors::Result;
use crate::models::{
    candidate::count_active,
    CandidatePeak,
    Chromatogram,
    MrmFeature,
    PickedTrace,
    SeedPeak,
    TraceRef,
    TransitionGroup,
};
use tracing::{
    debug,
    warn,
};

/// Greedy peak-group picker over all traces of a transition group.
///
/// Each call is independent: the picker holds no state besides its
/// configuration, so one instance can serve many groups concurrently.
#[derive(Debug, Clone)]
pub struct TransitionGroupPicker<P: PeakPicker = ChromatogramPeakPicker> {
    config: PickerConfig,
    picker: P,
}

impl TransitionGroupPicker<ChromatogramPeakPicker> {
    pub fn new(config: PickerConfig) -> Result<Self> {
        let picker = ChromatogramPeakPicker::new(config.peak_picker.clone());
        Self::with_picker(config, picker)
    }
}

impl<P: PeakPicker> TransitionGroupPicker<P> {
    pub fn with_picker(config: PickerConfig, picker: P) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, picker })
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    fn pick_trace(
        &self,
        trace: TraceRef,
        native_id: &str,
        chrom: &Chromatogram,
    ) -> PickedTrace {
        let peaks: Vec<CandidatePeak> = self
            .picker
            .pick(chrom)
            .into_iter()
            .filter(|p| {
                let valid = p.left <= p.position
                    && p.position <= p.right
                    && p.position.is_finite()
                    && p.intensity.is_finite()
                    && p.integrated_intensity.is_finite();
                if !valid {
                    warn!(
                        "Dropping malformed candidate of {} at {} [{}, {}]",
                        native_id, p.position, p.left, p.right
                    );
                }
                valid
            })
            .collect();
        PickedTrace::new(trace, native_id, peaks)
    }

    /// Runs the single-trace picker on every detecting transition (and the
    /// precursors when enabled).
    pub fn pick_traces(&self, group: &TransitionGroup) -> Vec<PickedTrace> {
        let mut picked = Vec::with_capacity(group.num_traces());
        for (k, transition) in group.transitions.iter().enumerate() {
            if !transition.detecting {
                continue;
            }
            picked.push(self.pick_trace(
                TraceRef::Transition(k),
                &transition.native_id,
                &transition.chromatogram,
            ));
        }
        if self.config.use_precursors {
            for (k, precursor) in group.precursors.iter().enumerate() {
                picked.push(self.pick_trace(
                    TraceRef::Precursor(k),
                    &precursor.native_id,
                    &precursor.chromatogram,
                ));
            }
        }
        picked
    }

    pub fn build_feature(
        &self,
        group: &TransitionGroup,
        picked: &mut [PickedTrace],
        seed: SeedPeak,
    ) -> Result<MrmFeature> {
        build_feature(&self.config, group, picked, seed)
    }

    fn should_stop(&self, processed: usize, feature: &MrmFeature) -> bool {
        if self.config.stop_after_feature > 0 && processed > self.config.stop_after_feature {
            debug!("Stopping after {} seeds", processed);
            return true;
        }
        if feature.intensity > 0.0
            && feature.total_xic > 0.0
            && feature.intensity / feature.total_xic < self.config.stop_after_intensity_ratio
        {
            debug!(
                "Stopping: feature explains {} of the total XIC",
                feature.intensity / feature.total_xic
            );
            return true;
        }
        false
    }

    /// Finds the features of `group` and appends them to `group.features`.
    ///
    /// Traces are sorted by position first. Features whose boundary is
    /// nested in that of an earlier feature are dropped.
    pub fn pick_transition_group(&self, group: &mut TransitionGroup) -> Result<()> {
        group.check_consistent()?;
        group.sort_chromatograms();

        let mut picked = self.pick_traces(group);
        let initial_candidates = count_active(&picked);
        debug!(
            "Group {}: {} candidates over {} traces",
            group.group_id,
            initial_candidates,
            picked.len()
        );

        let mut features: Vec<MrmFeature> = Vec::new();
        let mut processed = 0;
        while let Some(seed) = find_largest_peak(&picked) {
            let feature = self.build_feature(group, &mut picked, seed)?;
            processed += 1;
            let stop = self.should_stop(processed, &feature);
            if feature.intensity > 0.0 {
                features.push(feature);
            }
            if stop {
                break;
            }
        }

        let mut accepted: Vec<MrmFeature> = Vec::with_capacity(features.len());
        for (i, feature) in features.iter().enumerate() {
            if features[..i].iter().any(|other| feature.is_nested_in(other)) {
                debug!(
                    "Dropping feature at {} [{}, {}], nested in an earlier one",
                    feature.apex_position, feature.left, feature.right
                );
                continue;
            }
            accepted.push(feature.clone());
        }

        debug!(
            "Group {}: {} seeds processed, {} features kept",
            group.group_id,
            processed,
            accepted.len()
        );
        for mut feature in accepted {
            feature.id = group.features.len() as u64;
            group.add_feature(feature);
        }
        Ok(())
    }
}
