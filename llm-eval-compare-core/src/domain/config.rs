use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::error::{CoreError, Result};

// ===== Optimization Direction =====

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Optimize {
    #[default]
    Max,
    Min,
}

impl fmt::Display for Optimize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Optimize::Max => write!(f, "max"),
            Optimize::Min => write!(f, "min"),
        }
    }
}

// ===== Metric Configuration =====

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Boolean,
    #[default]
    Float,
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricType::Boolean => write!(f, "boolean"),
            MetricType::Float => write!(f, "float"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MetricConfig {
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    pub optimize: Optimize,
}

impl MetricConfig {
    pub fn new(metric_type: MetricType, optimize: Optimize) -> Self {
        Self {
            metric_type,
            optimize,
        }
    }
}

// ===== Evaluator Configuration =====

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EvaluatorConfig {
    ExactMatch,
    LlmJudge {
        #[serde(default)]
        optimize: Optimize,
        #[serde(default)]
        cutoff: Option<f64>,
        #[serde(default)]
        output_type: MetricType,
    },
}

impl EvaluatorConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            EvaluatorConfig::ExactMatch => "exact_match",
            EvaluatorConfig::LlmJudge { .. } => "llm_judge",
        }
    }

    /// The threshold and direction to check summaries against, if any.
    ///
    /// Only LLM judges with a configured cutoff ever yield one.
    pub fn cutoff(&self) -> Option<(f64, Optimize)> {
        match self {
            EvaluatorConfig::LlmJudge {
                optimize,
                cutoff: Some(cutoff),
                ..
            } => Some((*cutoff, *optimize)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EvaluationConfig {
    #[serde(default)]
    pub function_name: Option<String>,
    #[serde(default)]
    pub evaluators: BTreeMap<String, EvaluatorConfig>,
}

impl EvaluationConfig {
    pub fn evaluator_names(&self) -> Vec<String> {
        self.evaluators.keys().cloned().collect()
    }
}

/// Evaluation and metric definitions, keyed by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigStore {
    #[serde(default)]
    pub evaluations: BTreeMap<String, EvaluationConfig>,
    #[serde(default)]
    pub metrics: BTreeMap<String, MetricConfig>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_evaluator(
        mut self,
        evaluation_name: impl Into<String>,
        evaluator_name: impl Into<String>,
        config: EvaluatorConfig,
    ) -> Self {
        self.evaluations
            .entry(evaluation_name.into())
            .or_default()
            .evaluators
            .insert(evaluator_name.into(), config);
        self
    }

    pub fn with_metric(mut self, metric_name: impl Into<String>, config: MetricConfig) -> Self {
        self.metrics.insert(metric_name.into(), config);
        self
    }

    pub fn evaluation(&self, evaluation_name: &str) -> Option<&EvaluationConfig> {
        self.evaluations.get(evaluation_name)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load from a `.toml` or `.json` file, picked by extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&text),
            Some("json") => Self::from_json_str(&text),
            other => Err(CoreError::Config(format!(
                "Unsupported config format {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }
}
