use crate::models::{
    Chromatogram,
    PeakShapeMetrics,
};

// Position where the signal crosses `threshold` between samples `i` and `j`.
fn crossing(chrom: &Chromatogram, i: usize, j: usize, threshold: f64) -> f64 {
    let (x0, y0) = (chrom.positions[i], chrom.intensities[i]);
    let (x1, y1) = (chrom.positions[j], chrom.intensities[j]);
    if y1 == y0 {
        return x0;
    }
    x0 + (threshold - y0) * (x1 - x0) / (y1 - y0)
}

// Start and end of the region around `apex` that stays at or above
// `threshold`. The walk is not limited to the peak boundary: a peak cut
// above its 5% level still gets its crossings from the samples outside.
// Falls back to the first/last sample when the signal never drops.
fn span_at(chrom: &Chromatogram, apex: usize, threshold: f64) -> (f64, f64) {
    let n = chrom.len();
    let mut start = chrom.positions[0];
    let mut i = apex;
    while i > 0 {
        if chrom.intensities[i - 1] < threshold {
            start = crossing(chrom, i - 1, i, threshold);
            break;
        }
        i -= 1;
    }

    let mut end = chrom.positions[n - 1];
    let mut i = apex;
    while i + 1 < n {
        if chrom.intensities[i + 1] < threshold {
            end = crossing(chrom, i, i + 1, threshold);
            break;
        }
        i += 1;
    }
    (start, end)
}

/// Standard peak shape descriptors of `chrom` within `[left, right]`.
///
/// `peak_height` is the apex intensity the fractions refer to, measured
/// from `avg_noise_level`: the x% level sits at
/// `noise + x% * (peak_height - noise)`. `apex_position` picks the apex
/// sample (the closest one inside the window).
///
/// The baseline runs from the last sample before `left` (the first one in
/// the window if there is none) to the last sample in the window.
/// Degenerate input (fewer than two samples or a non-positive height)
/// yields all zeros.
pub fn calculate_peak_shape_metrics(
    chrom: &Chromatogram,
    left: f64,
    right: f64,
    peak_height: f64,
    apex_position: f64,
    avg_noise_level: f64,
) -> PeakShapeMetrics {
    let mut out = PeakShapeMetrics {
        total_width: right - left,
        ..Default::default()
    };
    let start = chrom.positions.partition_point(|&p| p < left);
    let end = chrom.positions.partition_point(|&p| p <= right);
    if end <= start || end - start < 2 || !(peak_height > 0.0) {
        return out;
    }
    let window = start..end;
    let noise = if avg_noise_level.is_finite() {
        avg_noise_level.clamp(0.0, peak_height)
    } else {
        0.0
    };
    let level = |fraction: f64| noise + fraction * (peak_height - noise);

    let mut apex = start;
    let mut best_dist = f64::INFINITY;
    for i in window.clone() {
        let dist = (chrom.positions[i] - apex_position).abs();
        if dist <= best_dist {
            best_dist = dist;
            apex = i;
        }
    }
    let apex_rt = chrom.positions[apex];

    let (s5, e5) = span_at(chrom, apex, level(0.05));
    let (s10, e10) = span_at(chrom, apex, level(0.10));
    let (s50, e50) = span_at(chrom, apex, level(0.50));
    out.start_position_at_5 = s5;
    out.end_position_at_5 = e5;
    out.start_position_at_10 = s10;
    out.end_position_at_10 = e10;
    out.start_position_at_50 = s50;
    out.end_position_at_50 = e50;
    out.width_at_5 = e5 - s5;
    out.width_at_10 = e10 - s10;
    out.width_at_50 = e50 - s50;

    let a5 = apex_rt - s5;
    if a5 > 0.0 {
        out.tailing_factor = out.width_at_5 / (2.0 * a5);
    }
    let a10 = apex_rt - s10;
    if a10 > 0.0 {
        out.asymmetry_factor = (e10 - apex_rt) / a10;
    }

    let baseline_start = chrom.intensities[start.saturating_sub(1)];
    let baseline_end = chrom.intensities[end - 1];
    out.slope_of_baseline = baseline_end - baseline_start;
    out.baseline_delta_2_height = out.slope_of_baseline.abs() / peak_height;

    out.points_across_baseline = end - start;
    let half = level(0.5);
    out.points_across_half_height = chrom.intensities[window]
        .iter()
        .filter(|&&x| x >= half)
        .count();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picking::test_data::{
        toy_chromatogram,
        TOY_APEX,
        TOY_LEFT,
        TOY_RIGHT,
    };

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn triangle() -> Chromatogram {
        Chromatogram::from_pairs((80..121).map(|i| {
            let x = i as f64;
            (x, (1000.0 - 200.0 * (x - 100.0).abs()).max(0.0))
        }))
    }

    #[test]
    fn test_symmetric_triangle() {
        let m = calculate_peak_shape_metrics(&triangle(), 95.0, 105.0, 1000.0, 100.0, 0.0);
        assert!(close(m.width_at_50, 5.0), "{:?}", m);
        assert!(close(m.width_at_10, 9.0), "{:?}", m);
        assert!(close(m.width_at_5, 9.5), "{:?}", m);
        assert!(close(m.start_position_at_50, 97.5));
        assert!(close(m.end_position_at_50, 102.5));
        assert!(close(m.tailing_factor, 1.0));
        assert!(close(m.asymmetry_factor, 1.0));
        assert_eq!(m.total_width, 10.0);
        assert_eq!(m.points_across_baseline, 11);
        // 98, 99, 100, 101 and 102 are at or above 500.
        assert_eq!(m.points_across_half_height, 5);
        assert_eq!(m.slope_of_baseline, 0.0);
        assert_eq!(m.baseline_delta_2_height, 0.0);
    }

    #[test]
    fn test_crossings_found_outside_the_boundary() {
        // The boundary cuts the triangle at 400, above its 5% and 10% levels.
        let m = calculate_peak_shape_metrics(&triangle(), 97.0, 103.0, 1000.0, 100.0, 0.0);
        assert!(close(m.start_position_at_5, 95.25), "{:?}", m);
        assert!(close(m.end_position_at_5, 104.75), "{:?}", m);
        assert!(close(m.width_at_10, 9.0), "{:?}", m);
        assert_eq!(m.total_width, 6.0);
        assert_eq!(m.points_across_baseline, 7);
        // From 200 at 96, the sample before the boundary, to 400 at 103.
        assert_eq!(m.slope_of_baseline, 200.0);
        assert!(close(m.baseline_delta_2_height, 0.2));
    }

    #[test]
    fn test_levels_measured_from_noise() {
        // Height 1000 over a noise of 200: the 50% level sits at 600.
        let m = calculate_peak_shape_metrics(&triangle(), 95.0, 105.0, 1000.0, 100.0, 200.0);
        assert!(close(m.start_position_at_50, 98.0), "{:?}", m);
        assert!(close(m.end_position_at_50, 102.0), "{:?}", m);
        // 98 and 102 sit exactly at 600.
        assert_eq!(m.points_across_half_height, 5);
        // Invalid noise levels fall back to zero.
        let m = calculate_peak_shape_metrics(&triangle(), 95.0, 105.0, 1000.0, 100.0, f64::NAN);
        assert!(close(m.width_at_50, 5.0), "{:?}", m);
    }

    #[test]
    fn test_tailing_peak() {
        // Steep front, slow tail.
        let chrom = Chromatogram::from_pairs((0..30).map(|i| {
            let x = i as f64;
            let y = if x <= 10.0 {
                (1000.0 - 250.0 * (10.0 - x)).max(0.0)
            } else {
                (1000.0 - 100.0 * (x - 10.0)).max(0.0)
            };
            (x, y)
        }));
        let m = calculate_peak_shape_metrics(&chrom, 6.0, 20.0, 1000.0, 10.0, 0.0);
        assert!(m.tailing_factor > 1.2, "{:?}", m);
        assert!(m.asymmetry_factor > 1.0, "{:?}", m);
    }

    #[test]
    fn test_toy_chromatogram() {
        let chrom = toy_chromatogram();
        let m =
            calculate_peak_shape_metrics(&chrom, TOY_LEFT, TOY_RIGHT, 965356.0, TOY_APEX, 723.5);
        assert_eq!(m.points_across_baseline, 57);
        // 632114, 869730, 962547, 966489, 845055, 558746.
        assert_eq!(m.points_across_half_height, 6);
        assert!(close(m.total_width, 0.540983333));
        // 1258 just before the left border, 3335 at the right one.
        assert_eq!(m.slope_of_baseline, 2077.0);
        assert!(close(m.baseline_delta_2_height, 0.002151537878254));

        assert!(close(m.start_position_at_5, 2.639974097295373), "{:?}", m);
        assert!(close(m.end_position_at_5, 2.7867080285637367), "{:?}", m);
        assert!(close(m.start_position_at_10, 2.645399300135113), "{:?}", m);
        assert!(close(m.end_position_at_10, 2.769539479656836), "{:?}", m);
        assert!(close(m.width_at_50, 0.0646313933918532), "{:?}", m);
        assert!(close(m.tailing_factor, 1.1370157186335816), "{:?}", m);
        assert!(close(m.asymmetry_factor, 1.1004857777577284), "{:?}", m);
    }

    #[test]
    fn test_degenerate() {
        let m = calculate_peak_shape_metrics(&triangle(), 95.0, 105.0, 0.0, 100.0, 0.0);
        assert_eq!(m.width_at_50, 0.0);
        let m = calculate_peak_shape_metrics(&Chromatogram::default(), 1.0, 2.0, 10.0, 1.5, 0.0);
        assert_eq!(m.points_across_baseline, 0);
        assert_eq!(m.total_width, 1.0);
    }
}
