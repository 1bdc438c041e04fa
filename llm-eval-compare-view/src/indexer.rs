use llm_eval_compare_core::{
    DatapointId, EvaluationResultRecord, EvaluationRunId, Input, MetricValue, Output,
};
use serde::Serialize;
use std::collections::HashMap;

/// A test case shared by every run being compared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Datapoint {
    pub id: DatapointId,
    pub input: Input,
    pub reference_output: Option<Output>,
}

/// The latest observation of one metric for a (datapoint, run) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricEntry {
    pub value: String,
    pub evaluator_inference_id: Option<String>,
    pub inference_id: String,
    pub is_human_feedback: bool,
}

impl MetricEntry {
    pub fn parsed_value(&self) -> MetricValue {
        MetricValue::parse(&self.value)
    }
}

/// What one run produced for one datapoint, and how it scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    pub generated_output: Output,
    pub metrics: HashMap<String, MetricEntry>,
}

/// Unique datapoints sorted by id, descending, byte-wise.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DatapointIndex(Vec<Datapoint>);

impl DatapointIndex {
    pub fn iter(&self) -> std::slice::Iter<'_, Datapoint> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &DatapointId> {
        self.0.iter().map(|datapoint| &datapoint.id)
    }
}

impl<'a> IntoIterator for &'a DatapointIndex {
    type Item = &'a Datapoint;
    type IntoIter = std::slice::Iter<'a, Datapoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// datapoint id -> run id -> result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultIndex(HashMap<DatapointId, HashMap<EvaluationRunId, RunResult>>);

impl ResultIndex {
    pub fn runs_for(&self, datapoint_id: &str) -> Option<&HashMap<EvaluationRunId, RunResult>> {
        self.0.get(datapoint_id)
    }

    pub fn result(&self, datapoint_id: &str, run_id: &str) -> Option<&RunResult> {
        self.runs_for(datapoint_id)?.get(run_id)
    }

    pub fn metric(
        &self,
        datapoint_id: &str,
        run_id: &str,
        metric_name: &str,
    ) -> Option<&MetricEntry> {
        self.result(datapoint_id, run_id)?.metrics.get(metric_name)
    }

    pub fn contains_datapoint(&self, datapoint_id: &str) -> bool {
        self.0.contains_key(datapoint_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Both lookup structures derived from one record stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonIndex {
    pub datapoints: DatapointIndex,
    pub results: ResultIndex,
}

impl ComparisonIndex {
    /// Index a flat record stream in one pass.
    ///
    /// Records missing either id are skipped. The first record seen for a
    /// datapoint fixes its input and reference output, and the first record
    /// seen for a (datapoint, run) pair fixes the generated output. Metric
    /// entries are last-write-wins per (datapoint, run, metric name).
    pub fn build(records: &[EvaluationResultRecord]) -> Self {
        let mut datapoints: Vec<Datapoint> = Vec::new();
        let mut results: HashMap<DatapointId, HashMap<EvaluationRunId, RunResult>> = HashMap::new();

        for record in records {
            let Some((datapoint_id, run_id)) = record.keys() else {
                continue;
            };

            let runs = results.entry(datapoint_id.clone()).or_insert_with(|| {
                datapoints.push(Datapoint {
                    id: datapoint_id.clone(),
                    input: record.input.clone(),
                    reference_output: record.reference_output.clone(),
                });
                HashMap::new()
            });

            let run_result = runs.entry(run_id.clone()).or_insert_with(|| RunResult {
                generated_output: record.generated_output.clone(),
                metrics: HashMap::new(),
            });

            run_result.metrics.insert(
                record.metric_name.clone(),
                MetricEntry {
                    value: record.metric_value.clone(),
                    evaluator_inference_id: record.evaluator_inference_id.clone(),
                    inference_id: record.inference_id.clone(),
                    is_human_feedback: record.is_human_feedback,
                },
            );
        }

        datapoints.sort_by(|a, b| b.id.cmp(&a.id));

        tracing::debug!(
            records = records.len(),
            datapoints = datapoints.len(),
            "Indexed evaluation results"
        );

        Self {
            datapoints: DatapointIndex(datapoints),
            results: ResultIndex(results),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_eval_compare_core::{ContentBlockOutput, InputContent, InputMessage, Role};
    use pretty_assertions::assert_eq;

    fn input(text: &str) -> Input {
        Input::new(vec![InputMessage::new(Role::User, vec![InputContent::text(text)])])
    }

    #[test]
    fn test_build_empty() {
        let index = ComparisonIndex::build(&[]);
        assert!(index.datapoints.is_empty());
        assert!(index.results.is_empty());
    }

    #[test]
    fn test_first_seen_datapoint_content_wins() {
        let records = vec![
            EvaluationResultRecord::new("d1", "r1", "m", "1").with_input(input("first")),
            EvaluationResultRecord::new("d1", "r2", "m", "1").with_input(input("second")),
        ];
        let index = ComparisonIndex::build(&records);

        assert_eq!(index.datapoints.len(), 1);
        let datapoint = index.datapoints.iter().next().unwrap();
        assert_eq!(datapoint.id.as_str(), "d1");
        assert_eq!(datapoint.input, input("first"));
    }

    #[test]
    fn test_first_seen_generated_output_wins() {
        let records = vec![
            EvaluationResultRecord::new("d1", "r1", "a", "1")
                .with_generated_output(Output::Chat(vec![ContentBlockOutput::text("one")])),
            EvaluationResultRecord::new("d1", "r1", "b", "1")
                .with_generated_output(Output::Chat(vec![ContentBlockOutput::text("two")])),
        ];
        let index = ComparisonIndex::build(&records);
        let result = index.results.result("d1", "r1").unwrap();

        assert_eq!(
            result.generated_output,
            Output::Chat(vec![ContentBlockOutput::text("one")])
        );
        assert_eq!(result.metrics.len(), 2);
    }

    #[test]
    fn test_malformed_records_are_dropped() {
        let mut missing_run = EvaluationResultRecord::new("d2", "r1", "m", "1");
        missing_run.evaluation_run_id = None;
        let mut missing_datapoint = EvaluationResultRecord::new("d3", "r1", "m", "1");
        missing_datapoint.datapoint_id = None;

        let records = vec![
            missing_run,
            missing_datapoint,
            EvaluationResultRecord::new("d1", "r1", "m", "1"),
        ];
        let index = ComparisonIndex::build(&records);

        let ids: Vec<&str> = index.datapoints.ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["d1"]);
        assert!(!index.results.contains_datapoint("d2"));
    }

    #[test]
    fn test_metric_entry_fields() {
        let records = vec![EvaluationResultRecord::new("d1", "r1", "m", "0.5")
            .with_inference_id("inf")
            .with_evaluator_inference_id("judge")
            .with_human_feedback(true)];
        let index = ComparisonIndex::build(&records);
        let entry = index.results.metric("d1", "r1", "m").unwrap();

        assert_eq!(entry.parsed_value(), MetricValue::Float(0.5));
        assert_eq!(entry.inference_id, "inf");
        assert_eq!(entry.evaluator_inference_id.as_deref(), Some("judge"));
        assert!(entry.is_human_feedback);
    }
}
