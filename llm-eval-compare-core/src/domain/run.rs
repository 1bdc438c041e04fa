use serde::{Deserialize, Serialize};

use super::ids::EvaluationRunId;

// ===== Evaluation Run =====

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EvaluationRunInfo {
    pub evaluation_run_id: EvaluationRunId,
    pub variant_name: String,
}

impl EvaluationRunInfo {
    pub fn new(
        evaluation_run_id: impl Into<EvaluationRunId>,
        variant_name: impl Into<String>,
    ) -> Self {
        Self {
            evaluation_run_id: evaluation_run_id.into(),
            variant_name: variant_name.into(),
        }
    }
}

// ===== Run Statistics =====

/// Summary of one metric over every datapoint of one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationStatistic {
    pub evaluation_run_id: EvaluationRunId,
    pub metric_name: String,
    pub mean_metric: f64,
    #[serde(default)]
    pub stderr_metric: Option<f64>,
    pub datapoint_count: u64,
}

impl EvaluationStatistic {
    pub fn new(
        evaluation_run_id: impl Into<EvaluationRunId>,
        metric_name: impl Into<String>,
        mean_metric: f64,
        stderr_metric: Option<f64>,
        datapoint_count: u64,
    ) -> Self {
        Self {
            evaluation_run_id: evaluation_run_id.into(),
            metric_name: metric_name.into(),
            mean_metric,
            stderr_metric,
            datapoint_count,
        }
    }
}
