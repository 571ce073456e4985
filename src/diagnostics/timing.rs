use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Pipeline stage a timing entry belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    Normalize,
    Segment,
    Leads,
    Aggregate,
    Models,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Normalize => "normalize",
            Stage::Segment => "segment",
            Stage::Leads => "leads",
            Stage::Aggregate => "aggregate",
            Stage::Models => "models",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub stage: Stage,
    pub elapsed_ms: f64,
}

/// Wall-clock cost of one classification, stage by stage.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn record(&mut self, stage: Stage, elapsed_ms: f64) {
        self.stages.push(StageTiming { stage, elapsed_ms });
    }

    /// Record the time elapsed since `start` and return its value in ms.
    pub fn record_since(&mut self, stage: Stage, start: Instant) -> f64 {
        let ms = elapsed_ms(start);
        self.record(stage, ms);
        ms
    }

    pub fn stage_ms(&self, stage: Stage) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.stage == stage)
            .map(|s| s.elapsed_ms)
    }
}

pub(crate) fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_serialize_in_camel_case() {
        let mut t = TimingBreakdown::default();
        t.record(Stage::Normalize, 1.5);
        t.record(Stage::Models, 0.25);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["stages"][0]["stage"], "normalize");
        assert_eq!(json["stages"][1]["elapsedMs"], 0.25);
        assert_eq!(t.stage_ms(Stage::Models), Some(0.25));
        assert_eq!(t.stage_ms(Stage::Leads), None);
    }
}
