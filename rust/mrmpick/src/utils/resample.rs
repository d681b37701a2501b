use crate::models::Chromatogram;
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResamplingMethod {
    /// Evaluates the source at every grid position by linear interpolation
    /// between the two bracketing samples.
    #[default]
    Interpolate,
    /// Spreads every source sample over its two neighbouring grid positions,
    /// weighted by distance. Preserves the summed intensity.
    Raster,
}

/// Positions of `reference` spanning `[left, right]` plus one extra sample
/// on each side when available.
///
/// All traces of a feature are resampled onto this grid so they can be
/// compared sample by sample.
///
/// # Example
///
/// ```
/// use mrmpick::models::Chromatogram;
/// use mrmpick::utils::resample::prepare_master_grid;
///
/// let reference = Chromatogram::from_pairs((0..10).map(|i| (i as f64, 1.0)));
/// assert_eq!(prepare_master_grid(&reference, 3.5, 6.5), vec![3.0, 4.0, 5.0, 6.0, 7.0]);
/// ```
pub fn prepare_master_grid(reference: &Chromatogram, left: f64, right: f64) -> Vec<f64> {
    let range = reference.window_bounds(left, right);
    reference.positions[range].to_vec()
}

/// Resamples `source` onto `grid`, only looking at the source samples within
/// `[left, right]` (plus one on each side).
///
/// An empty source yields the grid positions with zero intensities.
///
/// # Example
///
/// ```
/// use mrmpick::models::Chromatogram;
/// use mrmpick::utils::resample::{resample_chromatogram, ResamplingMethod};
///
/// let source = Chromatogram::from_pairs(vec![(0.0, 0.0), (2.0, 10.0), (4.0, 0.0)]);
/// let out = resample_chromatogram(&source, &[1.0, 2.0, 3.0], 0.0, 4.0, ResamplingMethod::Interpolate);
/// assert_eq!(out.intensities, vec![5.0, 10.0, 5.0]);
/// ```
pub fn resample_chromatogram(
    source: &Chromatogram,
    grid: &[f64],
    left: f64,
    right: f64,
    method: ResamplingMethod,
) -> Chromatogram {
    let mut out = Chromatogram {
        positions: grid.to_vec(),
        intensities: vec![0.0; grid.len()],
    };
    if source.is_empty() || grid.is_empty() {
        return out;
    }

    let range = source.window_bounds(left, right);
    let positions = &source.positions[range.clone()];
    let intensities = &source.intensities[range];
    match method {
        ResamplingMethod::Interpolate => {
            interpolate_into(positions, intensities, grid, &mut out.intensities)
        }
        ResamplingMethod::Raster => raster_into(positions, intensities, grid, &mut out.intensities),
    }
    out
}

fn interpolate_into(positions: &[f64], intensities: &[f64], grid: &[f64], out: &mut [f64]) {
    let (Some(&first), Some(&last)) = (positions.first(), positions.last()) else {
        return;
    };

    // Both the grid and the source are sorted, so the bracketing index
    // only ever moves forward.
    let mut j = 0;
    for (target, slot) in grid.iter().zip(out.iter_mut()) {
        let x = *target;
        if x < first || x > last {
            *slot = 0.0;
            continue;
        }
        while j + 1 < positions.len() && positions[j + 1] <= x {
            j += 1;
        }
        if positions[j] == x || j + 1 == positions.len() {
            *slot = intensities[j];
            continue;
        }
        let (x0, x1) = (positions[j], positions[j + 1]);
        let (y0, y1) = (intensities[j], intensities[j + 1]);
        let dx = x1 - x0;
        *slot = if dx > 0.0 {
            y0 + (y1 - y0) * (x - x0) / dx
        } else {
            y0
        };
    }
}

fn raster_into(positions: &[f64], intensities: &[f64], grid: &[f64], out: &mut [f64]) {
    let last = grid.len() - 1;
    let mut k = 0;
    for (&p, &intensity) in positions.iter().zip(intensities.iter()) {
        if p <= grid[0] {
            out[0] += intensity;
            continue;
        }
        if p >= grid[last] {
            out[last] += intensity;
            continue;
        }
        while k + 1 < last && grid[k + 1] < p {
            k += 1;
        }
        let (g0, g1) = (grid[k], grid[k + 1]);
        let dx = g1 - g0;
        if dx <= 0.0 {
            out[k] += intensity;
            continue;
        }
        out[k] += intensity * (g1 - p) / dx;
        out[k + 1] += intensity * (p - g0) / dx;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_own_grid_reproduces_intensities() {
        let source = Chromatogram::from_pairs(
            (0..20).map(|i| (1.0 + i as f64 * 0.7, ((i * 37) % 11) as f64 * 3.5)),
        );
        let grid = prepare_master_grid(&source, 4.0, 10.0);
        for method in [ResamplingMethod::Interpolate, ResamplingMethod::Raster] {
            let out = resample_chromatogram(&source, &grid, 4.0, 10.0, method);
            assert_eq!(out.positions, grid);
            let range = source.window_bounds(4.0, 10.0);
            for (a, b) in out.intensities.iter().zip(source.intensities[range].iter()) {
                assert!(close(*a, *b), "{:?}: {} vs {}", method, a, b);
            }
        }
    }

    #[test]
    fn test_outside_source_range_is_zero() {
        let source = Chromatogram::from_pairs(vec![(5.0, 10.0), (6.0, 20.0), (7.0, 30.0)]);
        let grid = vec![3.0, 4.0, 5.5, 6.5, 8.0];
        let out =
            resample_chromatogram(&source, &grid, 5.0, 7.0, ResamplingMethod::Interpolate);
        assert_eq!(out.intensities, vec![0.0, 0.0, 15.0, 25.0, 0.0]);
    }

    #[test]
    fn test_source_restricted_to_window() {
        // The sample at 0.0 is more than one sample away from the window and
        // must not be used for interpolation.
        let source = Chromatogram::from_pairs(vec![
            (0.0, 100.0),
            (1.0, 0.0),
            (2.0, 10.0),
            (3.0, 20.0),
        ]);
        let out = resample_chromatogram(
            &source,
            &[0.5, 2.5],
            2.0,
            3.0,
            ResamplingMethod::Interpolate,
        );
        assert_eq!(out.intensities, vec![0.0, 15.0]);
    }

    #[test]
    fn test_empty_source() {
        let out = resample_chromatogram(
            &Chromatogram::default(),
            &[1.0, 2.0],
            0.0,
            3.0,
            ResamplingMethod::Interpolate,
        );
        assert_eq!(out.positions, vec![1.0, 2.0]);
        assert_eq!(out.intensities, vec![0.0, 0.0]);
    }

    #[test]
    fn test_raster_spreads_and_conserves() {
        let source = Chromatogram::from_pairs(vec![
            (0.5, 4.0),
            (1.25, 8.0),
            (2.0, 2.0),
            (3.5, 6.0),
        ]);
        let grid = vec![1.0, 2.0, 3.0];
        let out = resample_chromatogram(&source, &grid, 0.0, 4.0, ResamplingMethod::Raster);
        // 0.5 is left of the grid, 3.5 right of it, 1.25 splits 3:1.
        assert!(close(out.intensities[0], 4.0 + 6.0));
        assert!(close(out.intensities[1], 2.0 + 2.0));
        assert!(close(out.intensities[2], 6.0));
        assert!(close(out.total_intensity(), source.total_intensity()));
    }
}
