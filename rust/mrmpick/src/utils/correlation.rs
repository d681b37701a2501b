use crate::errors::{
    DataProcessingError,
    Result,
};
use crate::utils::stats::mean_and_variance;

/// Cross-correlation values indexed by lag, in ascending lag order.
pub type XCorrArray = Vec<(i32, f64)>;

/// Centers `values` to zero mean and unit (population) variance.
///
/// A constant series only gets centered, it is divided by one instead of
/// its zero standard deviation.
pub fn standardize(values: &[f64]) -> Vec<f64> {
    let Some((mean, variance)) = mean_and_variance(values) else {
        return Vec::new();
    };
    let mut std = variance.sqrt();
    if std == 0.0 {
        std = 1.0;
    }
    values.iter().map(|x| (x - mean) / std).collect()
}

/// Raw cross-correlation `sum_i a[i] * b[i + lag]` for every lag in
/// `-max_delay..=max_delay` stepping by `lag_step`.
pub fn cross_correlation(a: &[f64], b: &[f64], max_delay: i32, lag_step: i32) -> XCorrArray {
    let n = a.len().min(b.len()) as i64;
    let step = lag_step.max(1) as usize;
    let mut out = Vec::with_capacity(2 * max_delay.max(0) as usize / step + 1);
    for delay in (-max_delay..=max_delay).step_by(step) {
        let delay_64 = delay as i64;
        let start = (-delay_64).max(0);
        let end = (n - delay_64).min(n);
        let mut sxy = 0.0;
        for i in start..end {
            sxy += a[i as usize] * b[(i + delay_64) as usize];
        }
        out.push((delay, sxy));
    }
    out
}

/// Normalized cross-correlation of two equally long series.
///
/// Both series are standardized, cross-correlated and divided by their
/// length, so perfectly co-eluting identical shapes score 1.0 at lag 0.
///
/// # Example
///
/// ```
/// use mrmpick::utils::correlation::{normalized_cross_correlation, xcorr_max_peak};
///
/// let a = vec![0.0, 1.0, 4.0, 1.0, 0.0, 0.0];
/// let b = vec![0.0, 0.0, 1.0, 4.0, 1.0, 0.0];
/// let xcorr = normalized_cross_correlation(&a, &b, 6, 1).unwrap();
/// let (lag, _value) = xcorr_max_peak(&xcorr).unwrap();
/// assert_eq!(lag, 1);
/// ```
pub fn normalized_cross_correlation(
    a: &[f64],
    b: &[f64],
    max_delay: i32,
    lag_step: i32,
) -> Result<XCorrArray> {
    if a.len() != b.len() {
        return Err(DataProcessingError::ExpectedSlicesSameLength {
            expected: a.len(),
            other: b.len(),
            context: "normalized_cross_correlation".to_string(),
        }
        .into());
    }
    if a.is_empty() {
        return Err(DataProcessingError::ExpectedNonEmptyData {
            context: Some("normalized_cross_correlation".to_string()),
        }
        .into());
    }

    let a_std = standardize(a);
    let b_std = standardize(b);
    let n = a.len() as f64;
    let mut out = cross_correlation(&a_std, &b_std, max_delay, lag_step);
    for (_, value) in out.iter_mut() {
        *value /= n;
    }
    Ok(out)
}

/// Lag and value of the maximum correlation; the first one wins on ties.
pub fn xcorr_max_peak(xcorr: &[(i32, f64)]) -> Result<(i32, f64)> {
    let mut iter = xcorr.iter();
    let Some(&first) = iter.next() else {
        return Err(DataProcessingError::ExpectedNonEmptyData {
            context: Some("xcorr_max_peak".to_string()),
        }
        .into());
    };
    Ok(iter.fold(first, |best, &x| if x.1 > best.1 { x } else { best }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_standardize() {
        let out = standardize(&[1.0, 2.0, 3.0, 4.0]);
        let (mean, var) = mean_and_variance(&out).unwrap();
        assert!(close(mean, 0.0));
        assert!(close(var, 1.0));

        // Constant series are centered only.
        assert_eq!(standardize(&[5.0, 5.0, 5.0]), vec![0.0, 0.0, 0.0]);
        assert!(standardize(&[]).is_empty());
    }

    #[test]
    fn test_cross_correlation_lags() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        let xcorr = cross_correlation(&a, &b, 2, 1);
        let lags: Vec<i32> = xcorr.iter().map(|x| x.0).collect();
        assert_eq!(lags, vec![-2, -1, 0, 1, 2]);
        // lag -2: a[2] * b[0]
        assert_eq!(xcorr[0].1, 12.0);
        // lag 0: 4 + 10 + 18
        assert_eq!(xcorr[2].1, 32.0);
        // lag 1: a[0] * b[1] + a[1] * b[2]
        assert_eq!(xcorr[3].1, 17.0);
        // lag 2: a[0] * b[2]
        assert_eq!(xcorr[4].1, 6.0);
    }

    #[test]
    fn test_lag_beyond_length_is_zero() {
        let xcorr = cross_correlation(&[1.0, 1.0], &[1.0, 1.0], 3, 1);
        assert_eq!(xcorr.first(), Some(&(-3, 0.0)));
        assert_eq!(xcorr.last(), Some(&(3, 0.0)));
    }

    #[test]
    fn test_identical_series_peak_at_zero() {
        let a = [0.0, 1.0, 5.0, 9.0, 5.0, 1.0, 0.0];
        let xcorr = normalized_cross_correlation(&a, &a, a.len() as i32, 1).unwrap();
        let (lag, value) = xcorr_max_peak(&xcorr).unwrap();
        assert_eq!(lag, 0);
        assert!(close(value, 1.0), "{}", value);
    }

    #[test]
    fn test_shifted_series() {
        let a = [0.0, 0.0, 1.0, 5.0, 9.0, 5.0, 1.0, 0.0, 0.0, 0.0];
        let b = [0.0, 0.0, 0.0, 0.0, 1.0, 5.0, 9.0, 5.0, 1.0, 0.0];
        let xcorr = normalized_cross_correlation(&a, &b, 10, 1).unwrap();
        assert_eq!(xcorr_max_peak(&xcorr).unwrap().0, 2);
        let xcorr = normalized_cross_correlation(&b, &a, 10, 1).unwrap();
        assert_eq!(xcorr_max_peak(&xcorr).unwrap().0, -2);
    }

    #[test]
    fn test_errors() {
        assert!(normalized_cross_correlation(&[1.0], &[1.0, 2.0], 1, 1).is_err());
        assert!(normalized_cross_correlation(&[], &[], 1, 1).is_err());
        assert!(xcorr_max_peak(&[]).is_err());
    }

    #[test]
    fn test_max_peak_first_wins() {
        let xcorr = vec![(-1, 0.5), (0, 0.9), (1, 0.9)];
        assert_eq!(xcorr_max_peak(&xcorr).unwrap(), (0, 0.9));
    }
}
