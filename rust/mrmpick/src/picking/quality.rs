use crate::errors::{
    DataProcessingError,
    MrmPickError,
    Result,
};
use crate::models::{
    PickedTrace,
    TransitionGroup,
};
use crate::utils::correlation::{
    normalized_cross_correlation,
    xcorr_max_peak,
};
use crate::utils::resample::{
    prepare_master_grid,
    resample_chromatogram,
    ResamplingMethod,
};
use crate::utils::stats::{
    argmax,
    argmin,
    mean,
};
use serde::Serialize;
use tracing::debug;

/// Co-elution consistency of the traces around a boundary; larger is
/// better.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityScore {
    pub score: f64,
    /// Native id of the trace with both the worst shape and the worst
    /// co-elution, if a single trace is both.
    pub outlier: Option<String>,
    pub missing_peaks: usize,
    pub multiple_peaks: usize,
    /// Mean over traces of the mean absolute peak cross-correlation.
    pub mean_shape: f64,
    /// Mean over traces of the mean absolute lag at the correlation peak.
    pub mean_coelution: f64,
}

/// Scores how well the picked traces co-elute within `[left, right]`.
///
/// Every picked trace is resampled onto the seed trace's grid over
/// `[left - margin, right + margin]` and cross-correlated with every other
/// one. `score = mean_shape - (mean_coelution - 1) / 2 - missing / traces`.
pub fn compute_quality(
    group: &TransitionGroup,
    picked: &[PickedTrace],
    seed_trace: usize,
    left: f64,
    right: f64,
    margin: f64,
    method: ResamplingMethod,
) -> Result<QualityScore> {
    if picked.is_empty() {
        return Err(DataProcessingError::ExpectedNonEmptyData {
            context: Some("compute_quality: no picked traces".to_string()),
        }
        .into());
    }
    let seed = picked.get(seed_trace).ok_or(DataProcessingError::IndexOutOfBounds {
        index: seed_trace,
        len: picked.len(),
        context: "compute_quality seed trace".to_string(),
    })?;

    let (outer_left, outer_right) = (left - margin, right + margin);
    let reference = group.require_chromatogram(seed.trace)?;
    let grid = prepare_master_grid(reference, outer_left, outer_right);
    let mut all_ints = Vec::with_capacity(picked.len());
    for trace in picked.iter() {
        let chrom = group.require_chromatogram(trace.trace)?;
        let resampled = resample_chromatogram(chrom, &grid, outer_left, outer_right, method);
        all_ints.push(resampled.intensities);
    }

    let n = all_ints.len();
    let mut mean_shapes = Vec::with_capacity(n);
    let mut mean_coel = Vec::with_capacity(n);
    if n > 1 {
        for k in 0..n {
            let mut shapes = Vec::with_capacity(n - 1);
            let mut coel = Vec::with_capacity(n - 1);
            for i in 0..n {
                if i == k {
                    continue;
                }
                let xcorr = normalized_cross_correlation(
                    &all_ints[k],
                    &all_ints[i],
                    all_ints[i].len() as i32,
                    1,
                )
                .map_err(|e| append_trace_context(e, &trace_pair(picked, k, i)))?;
                let (lag, value) = xcorr_max_peak(&xcorr)?;
                coel.push((lag as f64).abs());
                shapes.push(value.abs());
            }
            mean_shapes.push(mean(&shapes).unwrap_or(0.0));
            mean_coel.push(mean(&coel).unwrap_or(0.0));
        }
    } else {
        mean_shapes.push(1.0);
        mean_coel.push(0.0);
    }

    let outlier = if n > 1 && argmin(&mean_shapes) == argmax(&mean_coel) {
        argmin(&mean_shapes).map(|i| picked[i].native_id.clone())
    } else {
        None
    };

    let mut missing_peaks = 0;
    let mut multiple_peaks = 0;
    for trace in picked.iter() {
        let found = trace
            .peaks
            .iter()
            .filter(|p| p.apex_within(left, right))
            .count();
        match found {
            0 => missing_peaks += 1,
            1 => {}
            _ => multiple_peaks += 1,
        }
    }

    let shape_score = mean(&mean_shapes).unwrap_or(0.0);
    let coel_mean = mean(&mean_coel).unwrap_or(0.0);
    let coel_score = (coel_mean - 1.0) / 2.0;
    let missing_score = missing_peaks as f64 / n as f64;
    let score = shape_score - coel_score - missing_score;
    debug!(
        "Quality {} (shape {} - coelution {} - missing {}), {} missing, {} multiple, outlier {:?}",
        score, shape_score, coel_score, missing_score, missing_peaks, multiple_peaks, outlier
    );

    Ok(QualityScore {
        score,
        outlier,
        missing_peaks,
        multiple_peaks,
        mean_shape: shape_score,
        mean_coelution: coel_mean,
    })
}

fn trace_pair(picked: &[PickedTrace], k: usize, i: usize) -> String {
    format!(" ({} vs {})", picked[k].native_id, picked[i].native_id)
}

fn append_trace_context(e: MrmPickError, context: &str) -> MrmPickError {
    match e {
        MrmPickError::DataProcessingError(x) => x.append_to_context(context).into(),
        other => other,
    }
}
