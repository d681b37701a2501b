use super::background::estimate_background_average;
use super::config::{
    BackgroundSubtraction,
    PickerConfig,
};
use super::quality::compute_quality;
use super::shape_metrics::calculate_peak_shape_metrics;
use super::suppression::{
    recalculate_borders,
    suppress_overlapping,
};
use crate::errors::{
    ConfigError,
    DataProcessingError,
    Result,
};
use crate::models::{
    Chromatogram,
    HullPoint,
    MrmFeature,
    PickedTrace,
    SeedPeak,
    SubFeature,
    TransitionGroup,
};
use crate::utils::resample::{
    prepare_master_grid,
    resample_chromatogram,
};
use tracing::{
    debug,
    warn,
};

/// Integration results of one trace within a boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeakApexStats {
    /// Samples strictly inside `(left, right)`.
    pub hull: Vec<HullPoint>,
    pub intensity_sum: f64,
    /// Trapezoidal area over the samples in `[left, right]`.
    pub intensity_integral: f64,
    pub position_sum: f64,
    /// Intensity of the in-window sample closest to the apex, the later one
    /// on ties. Zero when no sample is inside the window.
    pub apex_intensity: f64,
}

pub fn peak_apex_stats(
    chrom: &Chromatogram,
    left: f64,
    right: f64,
    apex_position: f64,
) -> PeakApexStats {
    let mut out = PeakApexStats::default();
    let mut apex_dist = f64::INFINITY;
    let mut previous: Option<(f64, f64)> = None;
    for (p, x) in chrom.iter() {
        if p >= left && p <= right {
            if let Some((p0, x0)) = previous {
                out.intensity_integral += (p - p0) * (x + x0) / 2.0;
            }
            previous = Some((p, x));
        }
        if p > left && p < right {
            out.hull.push(HullPoint {
                position: p,
                intensity: x,
            });
            let dist = (p - apex_position).abs();
            if dist <= apex_dist {
                out.apex_intensity = x;
                apex_dist = dist;
            }
            out.position_sum += p;
            out.intensity_sum += x;
        }
    }
    out
}

fn rejected_feature(group: &TransitionGroup, apex: f64, left: f64, right: f64) -> MrmFeature {
    MrmFeature {
        id: 0,
        group_id: group.group_id.clone(),
        apex_position: apex,
        intensity: 0.0,
        left,
        right,
        total_xic: 0.0,
        peak_apices_sum: 0.0,
        quality: None,
        outlier: None,
        sub_features: Vec::new(),
        precursor_sub_features: Vec::new(),
    }
}

struct Integration<'a> {
    config: &'a PickerConfig,
    grid: Vec<f64>,
    left: f64,
    right: f64,
    apex: f64,
    /// Apex of the seed candidate itself, before any re-centering.
    seed_apex: f64,
}

impl Integration<'_> {
    fn sub_feature(
        &self,
        chrom: &Chromatogram,
        native_id: &str,
        mz: Option<f64>,
        subtract_background: bool,
    ) -> Result<SubFeature> {
        let resampled =
            resample_chromatogram(chrom, &self.grid, self.left, self.right, self.config.resampling);
        let stats = peak_apex_stats(&resampled, self.left, self.right, self.apex);
        let mut intensity = stats.intensity_sum;
        let mut apex_intensity = stats.apex_intensity;

        let mut area_background_level = None;
        let mut noise_background_level = None;
        if subtract_background {
            let bg = match self.config.background_subtraction {
                BackgroundSubtraction::None => None,
                BackgroundSubtraction::Original => Some(estimate_background_average(
                    &resampled, self.left, self.right,
                )),
                BackgroundSubtraction::Smoothed => {
                    return Err(ConfigError::NotImplemented {
                        option: "background_subtraction",
                        value: BackgroundSubtraction::Smoothed.to_string(),
                    }
                    .into());
                }
            };
            if let Some(bg) = bg {
                intensity -= bg.area;
                apex_intensity -= bg.noise_level;
                if intensity < 0.0 {
                    warn!(
                        "Background {} exceeds the signal of {} in [{}, {}], clamping to zero",
                        bg.area, native_id, self.left, self.right
                    );
                    intensity = 0.0;
                }
                apex_intensity = apex_intensity.max(0.0);
                area_background_level = Some(bg.area);
                noise_background_level = Some(bg.noise_level);
            }
        }

        let shape_metrics = if self.config.compute_peak_shape_metrics {
            Some(calculate_peak_shape_metrics(
                &resampled,
                self.left,
                self.right,
                apex_intensity,
                self.apex,
                noise_background_level.unwrap_or(0.0),
            ))
        } else {
            None
        };

        Ok(SubFeature {
            native_id: native_id.to_string(),
            mz,
            position: self.seed_apex,
            intensity,
            intensity_integral: stats.intensity_integral,
            apex_intensity,
            hull: stats.hull,
            area_background_level,
            noise_background_level,
            shape_metrics,
        })
    }
}

/// Builds the feature seeded by `seed`, consuming it and every candidate it
/// overlaps. A rejected seed yields a feature with zero intensity.
pub fn build_feature(
    config: &PickerConfig,
    group: &TransitionGroup,
    picked: &mut [PickedTrace],
    seed: SeedPeak,
) -> Result<MrmFeature> {
    let num_traces = picked.len();
    let seed_trace = picked
        .get(seed.trace_index)
        .ok_or(DataProcessingError::IndexOutOfBounds {
            index: seed.trace_index,
            len: num_traces,
            context: "seed trace".to_string(),
        })?;
    let seed_peak = *seed_trace
        .peaks
        .get(seed.peak_index)
        .ok_or(DataProcessingError::IndexOutOfBounds {
            index: seed.peak_index,
            len: seed_trace.peaks.len(),
            context: format!("seed peak in trace {}", seed_trace.native_id),
        })?;
    let seed_ref = seed_trace.trace;

    let mut left = seed_peak.left;
    let mut right = seed_peak.right;
    let mut apex = seed_peak.position;
    debug!(
        "Building feature of {} from {} at {} [{}, {}] ({} wide)",
        group.group_id,
        seed_trace.native_id,
        apex,
        left,
        right,
        right - left
    );

    suppress_overlapping(picked, left, right);
    picked[seed.trace_index].peaks[seed.peak_index].suppress();

    if config.recalculate_peaks {
        (left, right) = recalculate_borders(picked, left, right, config.recalculate_peaks_max_z);
        if apex < left || apex > right {
            apex = (left + right) / 2.0;
            debug!("Apex fell outside the new borders, moved to {}", apex);
        }
    }

    if config.min_peak_width > 0.0 && (right - left).abs() < config.min_peak_width {
        debug!(
            "Rejecting seed at {}: width {} below {}",
            apex,
            right - left,
            config.min_peak_width
        );
        return Ok(rejected_feature(group, apex, left, right));
    }

    let mut quality = None;
    let mut outlier = None;
    if config.compute_peak_quality {
        let q = compute_quality(
            group,
            picked,
            seed.trace_index,
            left,
            right,
            config.resample_boundary,
            config.resampling,
        )?;
        if q.score < config.min_quality {
            debug!(
                "Rejecting seed at {}: quality {} below {}",
                apex, q.score, config.min_quality
            );
            return Ok(rejected_feature(group, apex, left, right));
        }
        quality = Some(q.score);
        outlier = q.outlier;
    }

    let reference = group.require_chromatogram(seed_ref)?;
    let integration = Integration {
        config,
        grid: prepare_master_grid(reference, left, right),
        left,
        right,
        apex,
        seed_apex: seed_peak.position,
    };

    let mut total_intensity = 0.0;
    let mut total_xic = 0.0;
    let mut peak_apices_sum = 0.0;
    let mut sub_features = Vec::with_capacity(group.transitions.len());
    for transition in group.transitions.iter() {
        if transition.detecting {
            total_xic += transition.chromatogram.total_intensity();
        }
        let sub = integration.sub_feature(
            &transition.chromatogram,
            &transition.native_id,
            transition.product_mz,
            true,
        )?;
        if transition.detecting {
            total_intensity += sub.intensity;
            peak_apices_sum += sub.apex_intensity;
        }
        sub_features.push(sub);
    }

    let mut precursor_sub_features = Vec::with_capacity(group.precursors.len());
    for precursor in group.precursors.iter() {
        let sub = integration.sub_feature(
            &precursor.chromatogram,
            &precursor.native_id,
            precursor.precursor_mz,
            false,
        )?;
        if config.use_precursors && group.transitions.is_empty() {
            total_intensity += sub.intensity;
        }
        precursor_sub_features.push(sub);
    }

    debug!(
        "Feature at {} [{}, {}]: intensity {}, total xic {}",
        apex, left, right, total_intensity, total_xic
    );
    Ok(MrmFeature {
        id: 0,
        group_id: group.group_id.clone(),
        apex_position: apex,
        intensity: total_intensity,
        left,
        right,
        total_xic,
        peak_apices_sum,
        quality,
        outlier,
        sub_features,
        precursor_sub_features,
    })
}
