/// Gaussian smoothing on a possibly irregular grid.
///
/// The kernel has `sigma = width / 8` and is truncated at `±width / 2`
/// (four sigmas). Every output value is the weighted mean of the inputs
/// under the kernel, so a constant trace is left unchanged. A non-positive
/// width returns the input as is.
pub fn gauss_smooth(positions: &[f64], intensities: &[f64], width: f64) -> Vec<f64> {
    if !(width > 0.0) || positions.len() < 2 {
        return intensities.to_vec();
    }
    let sigma = width / 8.0;
    let half_width = width / 2.0;
    let denom = 2.0 * sigma * sigma;

    let mut out = Vec::with_capacity(intensities.len());
    let mut lo = 0;
    for (i, &center) in positions.iter().enumerate() {
        while positions[lo] < center - half_width {
            lo += 1;
        }
        let mut weighted = 0.0;
        let mut total_weight = 0.0;
        for j in lo..positions.len() {
            let dx = positions[j] - center;
            if dx > half_width {
                break;
            }
            let w = (-(dx * dx) / denom).exp();
            weighted += w * intensities[j];
            total_weight += w;
        }
        out.push(if total_weight > 0.0 {
            weighted / total_weight
        } else {
            intensities[i]
        });
    }
    out
}
