//! Per-cell histogram storage for one elevation-map computation.
use crate::histogram::{FeatureHistogram, HistogramError, HistogramSpec};

/// One height and one intensity histogram per grid cell, indexed by the
/// flat cell index.
#[derive(Clone, Debug)]
pub struct CellHistograms {
    height: Vec<FeatureHistogram>,
    intensity: Vec<FeatureHistogram>,
}

impl CellHistograms {
    /// Histograms for `cell_count` cells using the standard height and
    /// intensity layouts.
    pub fn new(cell_count: usize) -> Result<Self, HistogramError> {
        Self::with_specs(cell_count, HistogramSpec::HEIGHT, HistogramSpec::INTENSITY)
    }

    pub fn with_specs(
        cell_count: usize,
        height: HistogramSpec,
        intensity: HistogramSpec,
    ) -> Result<Self, HistogramError> {
        Ok(Self {
            height: height.build_many(cell_count)?,
            intensity: intensity.build_many(cell_count)?,
        })
    }

    /// Empty copy with the same layout.
    pub fn cleared_like(&self) -> Self {
        Self {
            height: self.height.iter().map(FeatureHistogram::cleared).collect(),
            intensity: self.intensity.iter().map(FeatureHistogram::cleared).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.height.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height.is_empty()
    }

    #[inline]
    pub fn insert(&mut self, index: usize, height: f32, intensity: f32) {
        self.height[index].add_value(height);
        self.intensity[index].add_value(intensity);
    }

    pub fn height(&self, index: usize) -> &FeatureHistogram {
        &self.height[index]
    }

    pub fn intensity(&self, index: usize) -> &FeatureHistogram {
        &self.intensity[index]
    }

    /// Add all counters of `other` cell by cell.
    pub fn merge(&mut self, other: &CellHistograms) -> Result<(), HistogramError> {
        if self.len() != other.len() {
            return Err(HistogramError::LayoutMismatch);
        }
        for (dst, src) in self.height.iter_mut().zip(&other.height) {
            dst.merge(src)?;
        }
        for (dst, src) in self.intensity.iter_mut().zip(&other.intensity) {
            dst.merge(src)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::CellHistograms;
    use crate::histogram::HistogramSpec;

    #[test]
    fn cells_are_independent() {
        let mut cells = CellHistograms::new(4).unwrap();
        cells.insert(2, 0.3, 100.0);
        assert_eq!(cells.height(2).number_of_elements(), 1);
        assert_eq!(cells.intensity(2).number_of_elements(), 1);
        for idx in [0, 1, 3] {
            assert!(cells.height(idx).is_empty());
            assert!(cells.intensity(idx).is_empty());
        }
    }

    #[test]
    fn merge_matches_single_pass() {
        let mut a = CellHistograms::new(2).unwrap();
        let mut b = a.cleared_like();
        let mut whole = a.cleared_like();
        for (i, h) in [0.1f32, 0.2, 0.3, 0.4].iter().enumerate() {
            whole.insert(i % 2, *h, 50.0);
            if i < 2 {
                a.insert(i % 2, *h, 50.0);
            } else {
                b.insert(i % 2, *h, 50.0);
            }
        }
        a.merge(&b).unwrap();
        for idx in 0..2 {
            assert_eq!(a.height(idx), whole.height(idx));
            assert_eq!(a.intensity(idx), whole.intensity(idx));
        }
        assert!(a.merge(&CellHistograms::new(3).unwrap()).is_err());
    }

    #[test]
    fn cleared_like_keeps_custom_layout() {
        let narrow = HistogramSpec {
            bins: 4,
            min: 0.0,
            max: 2.0,
        };
        let mut cells = CellHistograms::with_specs(3, narrow, HistogramSpec::INTENSITY).unwrap();
        cells.insert(1, 1.2, 10.0);
        let empty = cells.cleared_like();
        assert_eq!(empty.len(), 3);
        for idx in 0..3 {
            assert!(empty.height(idx).is_empty());
            assert_eq!(empty.height(idx).number_of_bins(), 4);
            assert_eq!(empty.height(idx).bin_width(), 0.5);
            assert_eq!(empty.intensity(idx).number_of_bins(), 256);
        }
        assert_eq!(cells.height(1).number_of_elements(), 1);
    }
}
