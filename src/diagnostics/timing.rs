use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Timing entry describing a single pipeline operation or I/O step.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for one run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    /// Run `f`, record its duration under `label` and return its result.
    pub fn time<T>(&mut self, label: impl Into<String>, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.push(label, elapsed_ms(start));
        out
    }
}

#[inline]
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_records_a_stage_and_passes_the_value_through() {
        let mut timing = TimingBreakdown::default();
        let v = timing.time("answer", || 42);
        assert_eq!(v, 42);
        assert_eq!(timing.stages.len(), 1);
        assert_eq!(timing.stages[0].label, "answer");
        assert!(timing.stages[0].elapsed_ms >= 0.0);
    }

    #[test]
    fn serializes_in_camel_case() {
        let mut timing = TimingBreakdown {
            total_ms: 2.5,
            ..TimingBreakdown::default()
        };
        timing.push("decode", 1.0);
        let json = serde_json::to_value(&timing).unwrap();
        assert_eq!(json["totalMs"], 2.5);
        assert_eq!(json["stages"][0]["elapsedMs"], 1.0);
    }
}
