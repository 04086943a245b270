//! Threshold Detector — Multi-Level Hard Decision
//!
//! Maps noisy received amplitudes to the nearest nominal symbol amplitude
//! using a bank of sorted decision thresholds. Generalizes the binary
//! slicer to the multi-level alphabets used by bipolar line codes
//! (AMI, MLT-3).
//!
//! ## Decision regions
//!
//! For `K` thresholds there are `K + 1` region values. `values[i]` applies
//! for `thresholds[i-1] < y <= thresholds[i]`, with virtual `-inf`/`+inf`
//! boundary thresholds. A sample exactly on a threshold belongs to the
//! *lower* region.
//!
//! ## Example
//!
//! ```rust
//! use baselink_core::threshold_detector::ThresholdDetector;
//!
//! // Ternary slicer for bipolar signaling
//! let det = ThresholdDetector::new(vec![-0.5, 0.5], vec![-1.0, 0.0, 1.0]).unwrap();
//! let noisy = vec![-0.9, 0.1, 1.2, -0.4, 0.5];
//! assert_eq!(det.detect(&noisy), vec![-1.0, 0.0, 1.0, 0.0, 0.0]);
//! ```

use crate::types::{SimError, SimResult};
use serde::{Deserialize, Serialize};

/// Multi-level threshold detector (decision device).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdDetector {
    thresholds: Vec<f64>,
    values: Vec<f64>,
}

impl ThresholdDetector {
    /// Create a detector from sorted thresholds and `thresholds.len() + 1`
    /// region values.
    pub fn new(thresholds: Vec<f64>, values: Vec<f64>) -> SimResult<Self> {
        if values.len() != thresholds.len() + 1 {
            return Err(SimError::InvalidThresholds(format!(
                "{} thresholds require {} values, got {}",
                thresholds.len(),
                thresholds.len() + 1,
                values.len()
            )));
        }
        if thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(SimError::InvalidThresholds(
                "thresholds must be strictly increasing".to_string(),
            ));
        }
        Ok(Self { thresholds, values })
    }

    /// Known-valid construction for built-in signaling tables.
    pub(crate) fn from_parts(thresholds: Vec<f64>, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), thresholds.len() + 1);
        Self { thresholds, values }
    }

    /// Decision thresholds.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Region values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Detect a single sample.
    pub fn detect_sample(&self, y: f64) -> f64 {
        // Region index = number of thresholds strictly below y.
        let idx = self.thresholds.iter().take_while(|&&th| th < y).count();
        self.values[idx]
    }

    /// Detect a block of samples.
    pub fn detect(&self, y: &[f64]) -> Vec<f64> {
        y.iter().map(|&s| self.detect_sample(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_regions() {
        let det = ThresholdDetector::new(vec![0.0], vec![-1.0, 1.0]).unwrap();
        assert_eq!(det.detect_sample(-0.3), -1.0);
        assert_eq!(det.detect_sample(0.3), 1.0);
    }

    #[test]
    fn test_boundary_belongs_to_lower_region() {
        let det = ThresholdDetector::new(vec![0.0], vec![-1.0, 1.0]).unwrap();
        // y == threshold maps to the lower region value
        assert_eq!(det.detect_sample(0.0), -1.0);

        let det = ThresholdDetector::new(vec![-0.5, 0.5], vec![-1.0, 0.0, 1.0]).unwrap();
        assert_eq!(det.detect_sample(-0.5), -1.0);
        assert_eq!(det.detect_sample(0.5), 0.0);
    }

    #[test]
    fn test_outputs_are_declared_values() {
        let values = vec![-3.0, -1.0, 1.0, 3.0];
        let det = ThresholdDetector::new(vec![-2.0, 0.0, 2.0], values.clone()).unwrap();
        let inputs: Vec<f64> = (-50..50).map(|i| i as f64 / 10.0).collect();
        for v in det.detect(&inputs) {
            assert!(values.contains(&v));
        }
    }

    #[test]
    fn test_assigned_in_thresholded_order() {
        let det = ThresholdDetector::new(vec![-2.0, 0.0, 2.0], vec![-3.0, -1.0, 1.0, 3.0]).unwrap();
        assert_eq!(det.detect_sample(-5.0), -3.0);
        assert_eq!(det.detect_sample(-1.0), -1.0);
        assert_eq!(det.detect_sample(1.0), 1.0);
        assert_eq!(det.detect_sample(5.0), 3.0);
    }

    #[test]
    fn test_value_count_mismatch_rejected() {
        assert!(ThresholdDetector::new(vec![0.0], vec![1.0]).is_err());
        assert!(ThresholdDetector::new(vec![0.0], vec![-1.0, 0.0, 1.0]).is_err());
    }

    #[test]
    fn test_unsorted_thresholds_rejected() {
        assert!(ThresholdDetector::new(vec![0.5, -0.5], vec![-1.0, 0.0, 1.0]).is_err());
        assert!(ThresholdDetector::new(vec![0.0, 0.0], vec![-1.0, 0.0, 1.0]).is_err());
    }

    #[test]
    fn test_empty_input() {
        let det = ThresholdDetector::new(vec![0.0], vec![0.0, 1.0]).unwrap();
        assert!(det.detect(&[]).is_empty());
    }
}
