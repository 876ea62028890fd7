//! Fixed-bin 1D histogram used to estimate per-cell height and intensity.
//!
//! Values are accepted only strictly inside `(threshold_min, threshold_max)`;
//! anything on or beyond a bound is dropped without being counted. The
//! "mean" reported by [`FeatureHistogram::mean_value`] is the lower edge of
//! the most populated bin (a mode), and [`FeatureHistogram::variance`] is a
//! count-weighted spread around that value:
//!
//! ```text
//! variance = Σ_{bins with count > 0} (count · value(bin) − mean)² / n
//! ```
//!
//! which is not a textbook variance. Downstream consumers compare against
//! reference output produced with this exact weighting.
use log::error;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistogramError {
    #[error("histogram threshold max ({max}) must be greater than min ({min})")]
    InvalidThresholds { min: f32, max: f32 },

    #[error("histograms with different layouts cannot be merged")]
    LayoutMismatch,
}

/// Shared configuration for producing many independent histograms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistogramSpec {
    pub bins: usize,
    pub min: f32,
    pub max: f32,
}

impl HistogramSpec {
    /// Heights in `[-0.5, 1.5]` at 0.01 resolution.
    pub const HEIGHT: HistogramSpec = HistogramSpec {
        bins: 200,
        min: -0.5,
        max: 1.5,
    };

    /// Gray levels in `[0, 255]`, 256 bins.
    pub const INTENSITY: HistogramSpec = HistogramSpec {
        bins: 256,
        min: 0.0,
        max: 255.0,
    };

    pub fn build(&self) -> Result<FeatureHistogram, HistogramError> {
        let mut hist = FeatureHistogram::new(self.bins);
        hist.set_thresholds(self.min, self.max)?;
        Ok(hist)
    }

    /// `count` independently owned histograms sharing this configuration.
    pub fn build_many(&self, count: usize) -> Result<Vec<FeatureHistogram>, HistogramError> {
        let prototype = self.build()?;
        Ok(vec![prototype; count])
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeatureHistogram {
    bins: Vec<u32>,
    threshold_min: f32,
    threshold_max: f32,
    bin_width: f32,
    number_of_elements: usize,
}

impl FeatureHistogram {
    /// Zeroed histogram over `[0, number_of_bins)` with unit-width bins.
    pub fn new(number_of_bins: usize) -> Self {
        FeatureHistogram {
            bins: vec![0; number_of_bins],
            threshold_min: 0.0,
            threshold_max: number_of_bins as f32,
            bin_width: 1.0,
            number_of_elements: 0,
        }
    }

    /// Update the acceptance range and recompute the bin width.
    ///
    /// Rejects `min >= max` (and NaN bounds), leaving the previous range in
    /// place.
    pub fn set_thresholds(&mut self, min: f32, max: f32) -> Result<(), HistogramError> {
        if !(min < max) {
            error!(
                "FeatureHistogram::set_thresholds: max ({}) must be greater than min ({})",
                max, min
            );
            return Err(HistogramError::InvalidThresholds { min, max });
        }
        self.threshold_min = min;
        self.threshold_max = max;
        self.bin_width = (max - min) / self.bins.len() as f32;
        Ok(())
    }

    pub fn threshold_min(&self) -> f32 {
        self.threshold_min
    }

    pub fn threshold_max(&self) -> f32 {
        self.threshold_max
    }

    pub fn bin_width(&self) -> f32 {
        self.bin_width
    }

    pub fn number_of_elements(&self) -> usize {
        self.number_of_elements
    }

    pub fn number_of_bins(&self) -> usize {
        self.bins.len()
    }

    pub fn bins(&self) -> &[u32] {
        &self.bins
    }

    pub fn is_empty(&self) -> bool {
        self.number_of_elements == 0
    }

    pub fn add_value(&mut self, value: f32) {
        if !(self.threshold_min < value && value < self.threshold_max) || self.bins.is_empty() {
            return;
        }
        let mut idx = ((value - self.threshold_min) / self.bin_width) as usize;
        // Rounding can land a value just below max on `len`.
        if idx >= self.bins.len() {
            idx = self.bins.len() - 1;
        }
        self.bins[idx] += 1;
        self.number_of_elements += 1;
    }

    /// Lower edge of the first bin holding the highest count.
    ///
    /// An empty histogram reports `threshold_min`; check
    /// [`number_of_elements`](Self::number_of_elements) before trusting it.
    pub fn mean_value(&self) -> f32 {
        self.bin_value(self.argmax())
    }

    /// Count-weighted spread around `mean`, or `-1.0` when empty.
    pub fn variance(&self, mean: f32) -> f32 {
        if self.number_of_elements == 0 {
            return -1.0;
        }
        let mut sum = 0.0f32;
        for (i, &count) in self.bins.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let dif = count as f32 * self.bin_value(i) - mean;
            sum += dif * dif;
        }
        sum / self.number_of_elements as f32
    }

    /// Same layout with every counter reset.
    pub fn cleared(&self) -> Self {
        FeatureHistogram {
            bins: vec![0; self.bins.len()],
            number_of_elements: 0,
            ..*self
        }
    }

    /// Add the counters of `other` into `self`. Both must share bin count
    /// and thresholds.
    pub fn merge(&mut self, other: &FeatureHistogram) -> Result<(), HistogramError> {
        if self.bins.len() != other.bins.len()
            || self.threshold_min != other.threshold_min
            || self.threshold_max != other.threshold_max
        {
            return Err(HistogramError::LayoutMismatch);
        }
        for (dst, &src) in self.bins.iter_mut().zip(&other.bins) {
            *dst += src;
        }
        self.number_of_elements += other.number_of_elements;
        Ok(())
    }

    #[inline]
    fn bin_value(&self, idx: usize) -> f32 {
        self.bin_width * idx as f32 + self.threshold_min
    }

    fn argmax(&self) -> usize {
        let mut best_idx = 0;
        let mut best_val = 0u32;
        for (i, &val) in self.bins.iter().enumerate() {
            if val > best_val {
                best_val = val;
                best_idx = i;
            }
        }
        best_idx
    }
}
