use llm_eval_compare_core::{
    EvaluationStatistic, MetricConfig, MetricType, MetricValue, SummaryFormatter,
};
use serde::Serialize;

/// Percentages for boolean metrics, two decimals for floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSummaryFormatter;

impl SummaryFormatter for DefaultSummaryFormatter {
    fn format_summary(&self, value: f64, metric_config: &MetricConfig) -> String {
        match metric_config.metric_type {
            MetricType::Boolean => format!("{:.2}%", value * 100.0),
            MetricType::Float => format!("{:.2}", value),
        }
    }
}

/// Display form of one datapoint's metric value.
pub fn format_metric_value(value: &MetricValue) -> String {
    match value {
        MetricValue::Boolean(b) => b.to_string(),
        MetricValue::Float(v) => format!("{:.2}", v),
        MetricValue::Text(s) => s.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedStatistic {
    pub mean: String,
    pub stderr: Option<String>,
    pub count: u64,
}

impl FormattedStatistic {
    pub fn new(
        statistic: &EvaluationStatistic,
        metric_config: &MetricConfig,
        formatter: &dyn SummaryFormatter,
    ) -> Self {
        Self {
            mean: formatter.format_summary(statistic.mean_metric, metric_config),
            stderr: statistic
                .stderr_metric
                .map(|stderr| formatter.format_summary(stderr, metric_config)),
            count: statistic.datapoint_count,
        }
    }
}

impl std::fmt::Display for FormattedStatistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mean)?;
        if let Some(stderr) = &self.stderr {
            write!(f, " ± {}", stderr)?;
        }
        write!(f, " (n={})", self.count)
    }
}
