//! Timed run results.

use serde::Serialize;

/// Round to three decimals, the harness-wide presentation precision.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Wall-clock timings of one implementation across repetitions.
///
/// Produced by the execution engine; `durations.len() == repetitions`
/// always holds, and `repetitions >= 1`.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    /// Implementation name.
    pub implementation: String,
    /// Per-repetition wall-clock durations in seconds, in run order.
    pub durations: Vec<f64>,
    /// Number of timed repetitions.
    pub repetitions: u32,
}

impl RunResult {
    /// Build a result from recorded durations.
    ///
    /// Panics if `durations` is empty: a timed result without at least
    /// one repetition has no meaningful mean.
    pub fn new(implementation: impl Into<String>, durations: Vec<f64>) -> Self {
        assert!(!durations.is_empty(), "a run result needs at least one duration");
        let repetitions = durations.len() as u32;
        Self {
            implementation: implementation.into(),
            durations,
            repetitions,
        }
    }

    /// Mean duration in seconds, rounded to three decimals.
    pub fn mean(&self) -> f64 {
        let sum: f64 = self.durations.iter().sum();
        round3(sum / self.durations.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_define_repetitions() {
        let result = RunResult::new("rust", vec![0.5, 0.7, 0.6]);
        assert_eq!(result.repetitions, 3);
        assert_eq!(result.durations.len() as u32, result.repetitions);
    }

    #[test]
    #[should_panic(expected = "at least one duration")]
    fn empty_durations_are_rejected() {
        RunResult::new("rust", vec![]);
    }

    #[test]
    fn mean_is_rounded_to_three_decimals() {
        let result = RunResult::new("c", vec![0.1, 0.2, 0.4]);
        assert_eq!(result.mean(), 0.233);

        let single = RunResult::new("c", vec![1.23456]);
        assert_eq!(single.mean(), 1.235);
    }
}
