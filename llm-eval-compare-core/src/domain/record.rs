use serde::{Deserialize, Serialize};
use std::fmt;

use super::content::{Input, Output};
use super::ids::{DatapointId, EvaluationRunId};
use crate::error::Result;
use crate::serde_util::{
    deserialize_defaulted_string_or_parsed_json, deserialize_flexible_bool,
    deserialize_non_empty_string, deserialize_optional_string_or_parsed_json,
};

// ===== Evaluation Result Record =====

/// One observation of one metric for one (datapoint, evaluation run) pair.
///
/// Records without a datapoint id or run id deserialize fine; the indexer drops them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EvaluationResultRecord {
    #[serde(default, deserialize_with = "deserialize_non_empty_string")]
    pub datapoint_id: Option<DatapointId>,
    #[serde(default, deserialize_with = "deserialize_non_empty_string")]
    pub evaluation_run_id: Option<EvaluationRunId>,
    #[serde(default, deserialize_with = "deserialize_defaulted_string_or_parsed_json")]
    pub input: Input,
    #[serde(default, deserialize_with = "deserialize_optional_string_or_parsed_json")]
    pub reference_output: Option<Output>,
    #[serde(default, deserialize_with = "deserialize_defaulted_string_or_parsed_json")]
    pub generated_output: Output,
    #[serde(default)]
    pub metric_name: String,
    #[serde(default)]
    pub metric_value: String,
    #[serde(default, deserialize_with = "deserialize_non_empty_string")]
    pub evaluator_inference_id: Option<String>,
    #[serde(default)]
    pub inference_id: String,
    #[serde(default, deserialize_with = "deserialize_flexible_bool")]
    pub is_human_feedback: bool,
}

impl EvaluationResultRecord {
    pub fn new(
        datapoint_id: impl Into<DatapointId>,
        evaluation_run_id: impl Into<EvaluationRunId>,
        metric_name: impl Into<String>,
        metric_value: impl Into<String>,
    ) -> Self {
        Self {
            datapoint_id: Some(datapoint_id.into()),
            evaluation_run_id: Some(evaluation_run_id.into()),
            metric_name: metric_name.into(),
            metric_value: metric_value.into(),
            ..Default::default()
        }
    }

    pub fn with_input(mut self, input: Input) -> Self {
        self.input = input;
        self
    }

    pub fn with_reference_output(mut self, output: Output) -> Self {
        self.reference_output = Some(output);
        self
    }

    pub fn with_generated_output(mut self, output: Output) -> Self {
        self.generated_output = output;
        self
    }

    pub fn with_inference_id(mut self, inference_id: impl Into<String>) -> Self {
        self.inference_id = inference_id.into();
        self
    }

    pub fn with_evaluator_inference_id(mut self, id: impl Into<String>) -> Self {
        self.evaluator_inference_id = Some(id.into());
        self
    }

    pub fn with_human_feedback(mut self, is_human_feedback: bool) -> Self {
        self.is_human_feedback = is_human_feedback;
        self
    }

    /// Both ids present and non-empty.
    pub fn keys(&self) -> Option<(&DatapointId, &EvaluationRunId)> {
        match (&self.datapoint_id, &self.evaluation_run_id) {
            (Some(dp), Some(run)) if !dp.is_empty() && !run.is_empty() => Some((dp, run)),
            _ => None,
        }
    }

    /// Parse records from a JSON array or from newline-delimited JSON objects.
    pub fn parse_many(text: &str) -> Result<Vec<Self>> {
        let trimmed = text.trim_start();
        if trimmed.starts_with('[') {
            return Ok(serde_json::from_str(trimmed)?);
        }
        trimmed
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(Into::into))
            .collect()
    }
}

// ===== Metric Value =====

/// A string-encoded metric value, interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Boolean(bool),
    Float(f64),
    Text(String),
}

impl MetricValue {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed {
            "true" => MetricValue::Boolean(true),
            "false" => MetricValue::Boolean(false),
            _ => trimmed
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(MetricValue::Float)
                .unwrap_or_else(|| MetricValue::Text(raw.to_string())),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            MetricValue::Float(v) => Some(*v),
            MetricValue::Text(_) => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Boolean(b) => write!(f, "{}", b),
            MetricValue::Float(v) => write!(f, "{}", v),
            MetricValue::Text(s) => write!(f, "{}", s),
        }
    }
}
