use arrayvec::ArrayVec;
use tracing::warn;

pub const MAX_WINDOW_SIZE: usize = 101;

/// Median over the last `window_size` values added.
///
/// Values are kept sorted in a fixed capacity buffer tagged with their
/// insertion index, so dropping the oldest value is a retain.
pub struct RollingMedianCalculator<T: PartialOrd + Copy> {
    window_size: usize,
    data: ArrayVec<(T, usize), MAX_WINDOW_SIZE>,
    index: usize,
}

impl<T: PartialOrd + Copy> RollingMedianCalculator<T> {
    pub fn new(window_size: usize) -> Self {
        let mut window_size_use = window_size.max(1);
        if window_size > MAX_WINDOW_SIZE {
            warn!(
                "Window size {} is larger than max size {}. Clamping to max size.",
                window_size, MAX_WINDOW_SIZE
            );
            window_size_use = MAX_WINDOW_SIZE;
        }
        Self {
            window_size: window_size_use,
            data: ArrayVec::new(),
            index: 0,
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn add(&mut self, value: T) {
        if self.data.len() >= self.window_size {
            let min_index_keep = self.index + 1 - self.window_size;
            self.data.retain(|x| x.1 >= min_index_keep);
        }
        self.insert_in_position((value, self.index));
        self.index += 1;
    }

    // Only the new value can be out of place, one insertion step is enough.
    fn insert_in_position(&mut self, last: (T, usize)) {
        let mut pos = self.data.len();
        while pos > 0 && last.0 < self.data[pos - 1].0 {
            pos -= 1;
        }
        self.data.insert(pos, last);
    }

    /// `None` until the window has been filled once.
    pub fn median(&self) -> Option<T> {
        if self.data.len() < self.window_size {
            None
        } else {
            Some(self.data[self.data.len() / 2].0)
        }
    }
}

/// Centered rolling median; the first and last `window_size / 2` positions
/// (which have no full window) are set to `pad_value`.
pub fn rolling_median_into<T: PartialOrd + Copy>(
    values: &[T],
    window_size: usize,
    pad_value: T,
    out: &mut Vec<T>,
) {
    out.clear();
    out.resize(values.len(), pad_value);
    let mut rolling = RollingMedianCalculator::new(window_size);
    let window_size = rolling.window_size();
    let offset = window_size / 2;
    for (i, value) in values.iter().enumerate() {
        rolling.add(*value);
        if i + 1 >= window_size {
            if let Some(median) = rolling.median() {
                out[i + 1 - window_size + offset] = median;
            }
        }
    }
}

/// Local noise level of a trace as a centered rolling median of its
/// intensities.
///
/// Edges take the nearest full-window median. Traces shorter than the
/// window get their global median everywhere.
pub fn rolling_noise_estimate(values: &[f64], window_size: usize) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let window_size = window_size.clamp(1, MAX_WINDOW_SIZE);
    if values.len() < window_size {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        return vec![sorted[sorted.len() / 2]; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    rolling_median_into(values, window_size, f64::NAN, &mut out);
    let first_valid = out.iter().position(|x| !x.is_nan());
    let last_valid = out.iter().rposition(|x| !x.is_nan());
    if let (Some(first), Some(last)) = (first_valid, last_valid) {
        let (head, tail) = (out[first], out[last]);
        out[..first].iter_mut().for_each(|x| *x = head);
        out[last + 1..].iter_mut().for_each(|x| *x = tail);
    }
    out
}
