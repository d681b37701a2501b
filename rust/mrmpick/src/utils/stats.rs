/// Mean and population variance in two passes.
///
/// Returns `None` for an empty slice.
pub fn mean_and_variance(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    Some((mean, variance))
}

pub fn mean(values: &[f64]) -> Option<f64> {
    mean_and_variance(values).map(|(m, _)| m)
}

/// `sorted[len / 2]`, which is the upper of the two middle values for even
/// lengths.
pub fn pseudo_median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(sorted[sorted.len() / 2])
}

/// Index of the first minimum.
pub fn argmin(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, v) in values.iter().enumerate() {
        match best {
            Some(b) if values[b] <= *v => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Index of the first maximum.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, v) in values.iter().enumerate() {
        match best {
            Some(b) if values[b] >= *v => {}
            _ => best = Some(i),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_variance() {
        assert_eq!(mean_and_variance(&[]), None);
        assert_eq!(mean_and_variance(&[3.0]), Some((3.0, 0.0)));
        let (mean, var) = mean_and_variance(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(mean, 5.0);
        assert_eq!(var, 4.0);
    }

    #[test]
    fn test_pseudo_median_takes_upper() {
        assert_eq!(pseudo_median(&[]), None);
        assert_eq!(pseudo_median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(pseudo_median(&[4.0, 1.0, 3.0, 2.0]), Some(3.0));
    }

    #[test]
    fn test_arg_extrema_first_wins() {
        let values = [3.0, 1.0, 5.0, 1.0, 5.0];
        assert_eq!(argmin(&values), Some(1));
        assert_eq!(argmax(&values), Some(2));
        assert_eq!(argmax(&[]), None);
    }
}
