use crate::domain::{ConfigStore, EvaluatorConfig, MetricConfig};

/// Read access to evaluator and metric definitions.
pub trait ConfigSource {
    fn evaluator_config(
        &self,
        evaluation_name: &str,
        evaluator_name: &str,
    ) -> Option<&EvaluatorConfig>;

    fn metric_config(&self, metric_name: &str) -> Option<&MetricConfig>;
}

impl ConfigSource for ConfigStore {
    fn evaluator_config(
        &self,
        evaluation_name: &str,
        evaluator_name: &str,
    ) -> Option<&EvaluatorConfig> {
        self.evaluations
            .get(evaluation_name)
            .and_then(|evaluation| evaluation.evaluators.get(evaluator_name))
    }

    fn metric_config(&self, metric_name: &str) -> Option<&MetricConfig> {
        self.metrics.get(metric_name)
    }
}

/// Maps an (evaluation, evaluator) pair to the metric name its results are stored under.
pub trait MetricNamer {
    fn metric_name_for(&self, evaluation_name: &str, evaluator_name: &str) -> String;
}

/// `tensorzero::evaluation_name::{evaluation}::evaluator_name::{evaluator}`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMetricNamer;

impl MetricNamer for DefaultMetricNamer {
    fn metric_name_for(&self, evaluation_name: &str, evaluator_name: &str) -> String {
        format!(
            "tensorzero::evaluation_name::{}::evaluator_name::{}",
            evaluation_name, evaluator_name
        )
    }
}

impl<F> MetricNamer for F
where
    F: Fn(&str, &str) -> String,
{
    fn metric_name_for(&self, evaluation_name: &str, evaluator_name: &str) -> String {
        self(evaluation_name, evaluator_name)
    }
}

/// Renders a summary statistic for display.
pub trait SummaryFormatter {
    fn format_summary(&self, value: f64, metric_config: &MetricConfig) -> String;
}

/// Receives the path of an activated row. Fire-and-forget.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn navigate(&self, path: &str) {
        self(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MetricType, Optimize};

    #[test]
    fn test_default_metric_namer() {
        assert_eq!(
            DefaultMetricNamer.metric_name_for("haiku", "exact_match"),
            "tensorzero::evaluation_name::haiku::evaluator_name::exact_match"
        );
    }

    #[test]
    fn test_closure_metric_namer() {
        let namer = |evaluation: &str, evaluator: &str| format!("{}.{}", evaluation, evaluator);
        assert_eq!(namer.metric_name_for("a", "b"), "a.b");
    }

    #[test]
    fn test_closure_navigator() {
        let visited = std::cell::RefCell::new(Vec::new());
        let navigator = |path: &str| visited.borrow_mut().push(path.to_string());
        navigator.navigate("/evaluations/a/b");
        assert_eq!(visited.into_inner(), vec!["/evaluations/a/b".to_string()]);
    }

    #[test]
    fn test_config_store_lookup() {
        let store = ConfigStore::new()
            .with_evaluator("e", "judge", EvaluatorConfig::ExactMatch)
            .with_metric("m", MetricConfig::new(MetricType::Float, Optimize::Min));

        assert!(store.evaluator_config("e", "judge").is_some());
        assert!(store.evaluator_config("e", "missing").is_none());
        assert!(store.evaluator_config("missing", "judge").is_none());
        assert_eq!(store.metric_config("m").map(|m| m.optimize), Some(Optimize::Min));
        assert!(store.metric_config("other").is_none());
    }
}
