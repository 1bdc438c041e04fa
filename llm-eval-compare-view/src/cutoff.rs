use llm_eval_compare_core::{EvaluatorConfig, MetricConfig, MetricValue, Optimize};

/// Whether `mean_metric` lands on the wrong side of `cutoff`.
///
/// Exclusive: a mean equal to the cutoff passes in both directions.
pub fn is_cutoff_failed(mean_metric: f64, optimize: Optimize, cutoff: f64) -> bool {
    match optimize {
        Optimize::Max => mean_metric < cutoff,
        Optimize::Min => mean_metric > cutoff,
    }
}

/// Cutoff check for a run summary. Evaluators without a cutoff never fail.
pub fn is_summary_failed(evaluator: &EvaluatorConfig, mean_metric: f64) -> bool {
    evaluator
        .cutoff()
        .is_some_and(|(cutoff, optimize)| is_cutoff_failed(mean_metric, optimize, cutoff))
}

/// Failure check for a single datapoint's metric value.
///
/// Booleans fail when they point away from the optimization direction.
/// Floats only fail through an evaluator cutoff.
pub fn is_value_failed(
    value: &MetricValue,
    evaluator: &EvaluatorConfig,
    metric: &MetricConfig,
) -> bool {
    match value {
        MetricValue::Boolean(b) => match metric.optimize {
            Optimize::Max => !b,
            Optimize::Min => *b,
        },
        MetricValue::Float(v) => is_summary_failed(evaluator, *v),
        MetricValue::Text(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_eval_compare_core::MetricType;
    use rstest::rstest;

    #[rstest]
    #[case(5.0, Optimize::Max, 5.0, false)]
    #[case(4.9, Optimize::Max, 5.0, true)]
    #[case(5.1, Optimize::Max, 5.0, false)]
    #[case(5.0, Optimize::Min, 5.0, false)]
    #[case(5.1, Optimize::Min, 5.0, true)]
    #[case(4.9, Optimize::Min, 5.0, false)]
    fn test_cutoff_boundary(
        #[case] mean: f64,
        #[case] optimize: Optimize,
        #[case] cutoff: f64,
        #[case] expected: bool,
    ) {
        assert_eq!(is_cutoff_failed(mean, optimize, cutoff), expected);
    }

    #[test]
    fn test_nan_never_fails() {
        assert!(!is_cutoff_failed(f64::NAN, Optimize::Max, 0.5));
        assert!(!is_cutoff_failed(f64::NAN, Optimize::Min, 0.5));
    }

    #[test]
    fn test_summary_requires_llm_judge_cutoff() {
        let exact = EvaluatorConfig::ExactMatch;
        assert!(!is_summary_failed(&exact, 0.0));

        let no_cutoff = EvaluatorConfig::LlmJudge {
            optimize: Optimize::Max,
            cutoff: None,
            output_type: MetricType::Float,
        };
        assert!(!is_summary_failed(&no_cutoff, 0.0));

        let judge = EvaluatorConfig::LlmJudge {
            optimize: Optimize::Max,
            cutoff: Some(0.5),
            output_type: MetricType::Float,
        };
        assert!(is_summary_failed(&judge, 0.4));
        assert!(!is_summary_failed(&judge, 0.6));
    }

    #[test]
    fn test_boolean_values_follow_direction() {
        let exact = EvaluatorConfig::ExactMatch;
        let maximize = MetricConfig::new(MetricType::Boolean, Optimize::Max);
        let minimize = MetricConfig::new(MetricType::Boolean, Optimize::Min);

        assert!(is_value_failed(&MetricValue::Boolean(false), &exact, &maximize));
        assert!(!is_value_failed(&MetricValue::Boolean(true), &exact, &maximize));
        assert!(is_value_failed(&MetricValue::Boolean(true), &exact, &minimize));
    }

    #[test]
    fn test_text_values_never_fail() {
        let metric = MetricConfig::new(MetricType::Float, Optimize::Max);
        let judge = EvaluatorConfig::LlmJudge {
            optimize: Optimize::Max,
            cutoff: Some(1.0),
            output_type: MetricType::Float,
        };
        assert!(!is_value_failed(&MetricValue::Text("n/a".into()), &judge, &metric));
        assert!(is_value_failed(&MetricValue::Float(0.5), &judge, &metric));
    }
}
