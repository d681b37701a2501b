use crate::errors::DataProcessingError;
use serde::{
    Deserialize,
    Serialize,
};
use std::ops::Range;

/// A position-ordered intensity trace for a single transition.
///
/// Positions are usually retention times in seconds, but nothing in this
/// crate depends on the unit as long as all traces of a group share it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chromatogram {
    pub positions: Vec<f64>,
    pub intensities: Vec<f64>,
}

impl Chromatogram {
    pub fn new(positions: Vec<f64>, intensities: Vec<f64>) -> Result<Self, DataProcessingError> {
        let out = Self {
            positions,
            intensities,
        };
        out.check_consistent()?;
        Ok(out)
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (positions, intensities) = pairs.into_iter().unzip();
        Self {
            positions,
            intensities,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn check_consistent(&self) -> Result<(), DataProcessingError> {
        if self.positions.len() != self.intensities.len() {
            return Err(DataProcessingError::ExpectedSlicesSameLength {
                expected: self.positions.len(),
                other: self.intensities.len(),
                context: "chromatogram positions vs intensities".to_string(),
            });
        }
        if let Some(i) = self
            .iter()
            .position(|(p, x)| !(p.is_finite() && x.is_finite()))
        {
            return Err(DataProcessingError::ExpectedFiniteNonNanData {
                context: format!("chromatogram sample {}", i),
            });
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.positions
            .iter()
            .copied()
            .zip(self.intensities.iter().copied())
    }

    pub fn is_sorted(&self) -> bool {
        self.positions.windows(2).all(|w| w[0] <= w[1])
    }

    /// Sorts the samples by position, carrying the intensities along.
    pub fn sort_by_position(&mut self) {
        if self.is_sorted() {
            return;
        }
        let mut indices: Vec<usize> = (0..self.positions.len()).collect();
        indices.sort_by(|&a, &b| self.positions[a].total_cmp(&self.positions[b]));
        self.positions = indices.iter().map(|&i| self.positions[i]).collect();
        self.intensities = indices.iter().map(|&i| self.intensities[i]).collect();
    }

    /// Sum of every intensity in the trace, ignoring any boundary.
    pub fn total_intensity(&self) -> f64 {
        self.intensities.iter().sum()
    }

    /// Index range covering `[left, right]` plus one extra sample on each
    /// side (when available), so that interpolation at the edges of the
    /// window has a bracketing sample.
    ///
    /// Assumes the positions are sorted.
    pub fn window_bounds(&self, left: f64, right: f64) -> Range<usize> {
        let len = self.positions.len();
        let mut begin = self
            .positions
            .iter()
            .position(|&p| p >= left)
            .unwrap_or(len);
        if begin > 0 {
            begin -= 1;
        }

        let mut end = self.positions[begin..]
            .iter()
            .position(|&p| p >= right)
            .map(|x| x + begin)
            .unwrap_or(len);
        if end < len {
            end += 1;
        }
        begin..end
    }

    /// Copy of the samples in `range`.
    pub fn slice(&self, range: Range<usize>) -> Chromatogram {
        Chromatogram {
            positions: self.positions[range.clone()].to_vec(),
            intensities: self.intensities[range].to_vec(),
        }
    }
}
