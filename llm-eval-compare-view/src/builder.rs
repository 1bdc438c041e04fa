//! Side-by-side comparison rows for a set of selected runs.
//!
//! Rows are grouped per datapoint in index order. Within a group, runs follow
//! the selection order. A datapoint none of the selected runs touched
//! produces no group at all.

use llm_eval_compare_core::{
    ConfigSource, DatapointId, EvaluationRunId, EvaluationStatistic, EvaluatorConfig, MetricConfig,
    MetricNamer, MetricType, MetricValue, Navigator, Optimize, Output, SummaryFormatter,
};
use serde::Serialize;
use std::collections::HashMap;

use crate::colors::{ColorSession, RunColor};
use crate::cutoff::{is_summary_failed, is_value_failed};
use crate::formatting::{format_metric_value, FormattedStatistic};
use crate::indexer::{ComparisonIndex, Datapoint, RunResult};
use crate::navigation;
use crate::selection::{RunSelection, RunVariantMap};
use crate::summarizer::{Content, ContentPreview, ContentSummarizer};

// ===== Render Structures =====

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunLegendEntry {
    pub run_id: EvaluationRunId,
    pub variant_name: Option<String>,
    pub color: RunColor,
}

/// One run's summary statistic for an evaluator column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub run_id: EvaluationRunId,
    pub variant_name: Option<String>,
    pub color: RunColor,
    pub mean_metric: f64,
    pub formatted: FormattedStatistic,
    pub failed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatorColumn {
    pub evaluator_name: String,
    pub metric_name: String,
    pub evaluator_kind: &'static str,
    pub metric_type: MetricType,
    pub optimize: Optimize,
    pub cutoff: Option<f64>,
    pub summaries: Vec<RunSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCell {
    pub value: MetricValue,
    pub display: String,
    pub failed: bool,
    pub is_human_feedback: bool,
    pub evaluator_inference_id: Option<String>,
    pub inference_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRow {
    pub run_id: EvaluationRunId,
    pub variant_name: Option<String>,
    pub color: RunColor,
    pub generated_output: ContentPreview,
    /// Aligned with [`ComparisonTable::columns`]; `None` where the run has no value.
    pub metrics: Vec<Option<MetricCell>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatapointGroup {
    pub datapoint_id: DatapointId,
    pub input: ContentPreview,
    pub reference_output: ContentPreview,
    pub rows: Vec<RunRow>,
}

impl DatapointGroup {
    pub fn row_span(&self) -> usize {
        self.rows.len()
    }
}

/// A flattened row. Only the first row of a group carries the group's span.
#[derive(Debug, Clone, Copy)]
pub struct RenderRow<'a> {
    pub group: &'a DatapointGroup,
    pub row: &'a RunRow,
    pub row_span: Option<usize>,
}

impl RenderRow<'_> {
    pub fn is_group_start(&self) -> bool {
        self.row_span.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTable {
    pub evaluation_name: String,
    pub selection: RunSelection,
    pub legend: Vec<RunLegendEntry>,
    pub columns: Vec<EvaluatorColumn>,
    pub groups: Vec<DatapointGroup>,
}

impl ComparisonTable {
    pub fn render_rows(&self) -> impl Iterator<Item = RenderRow<'_>> {
        self.groups.iter().flat_map(|group| {
            group.rows.iter().enumerate().map(move |(i, row)| RenderRow {
                group,
                row,
                row_span: (i == 0).then(|| group.row_span()),
            })
        })
    }

    pub fn row_count(&self) -> usize {
        self.groups.iter().map(DatapointGroup::row_span).sum()
    }

    pub fn group(&self, datapoint_id: &str) -> Option<&DatapointGroup> {
        self.groups
            .iter()
            .find(|group| group.datapoint_id.as_str() == datapoint_id)
    }

    pub fn column(&self, evaluator_name: &str) -> Option<&EvaluatorColumn> {
        self.columns
            .iter()
            .find(|column| column.evaluator_name == evaluator_name)
    }

    /// Navigate to a datapoint's detail view. Unknown datapoints are ignored.
    pub fn activate(&self, datapoint_id: &str, navigator: &dyn Navigator) {
        if let Some(group) = self.group(datapoint_id) {
            navigation::activate(
                &self.evaluation_name,
                group.datapoint_id.as_str(),
                &self.selection,
                navigator,
            );
        }
    }
}

// ===== Builder =====

/// A column whose evaluator and metric configuration both resolved.
struct ResolvedColumn<'c> {
    evaluator_name: &'c str,
    metric_name: String,
    evaluator: &'c EvaluatorConfig,
    metric: &'c MetricConfig,
}

pub struct ComparisonViewBuilder<'a> {
    evaluation_name: &'a str,
    evaluator_names: &'a [String],
    selection: &'a RunSelection,
    variants: Option<&'a RunVariantMap>,
    statistics: &'a [EvaluationStatistic],
    config: &'a dyn ConfigSource,
    namer: &'a dyn MetricNamer,
    formatter: &'a dyn SummaryFormatter,
    summarizer: ContentSummarizer,
}

impl<'a> ComparisonViewBuilder<'a> {
    pub fn new(
        evaluation_name: &'a str,
        selection: &'a RunSelection,
        config: &'a dyn ConfigSource,
        namer: &'a dyn MetricNamer,
        formatter: &'a dyn SummaryFormatter,
    ) -> Self {
        Self {
            evaluation_name,
            evaluator_names: &[],
            selection,
            variants: None,
            statistics: &[],
            config,
            namer,
            formatter,
            summarizer: ContentSummarizer::default(),
        }
    }

    pub fn with_evaluators(mut self, evaluator_names: &'a [String]) -> Self {
        self.evaluator_names = evaluator_names;
        self
    }

    pub fn with_variants(mut self, variants: &'a RunVariantMap) -> Self {
        self.variants = Some(variants);
        self
    }

    pub fn with_statistics(mut self, statistics: &'a [EvaluationStatistic]) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn with_summarizer(mut self, summarizer: ContentSummarizer) -> Self {
        self.summarizer = summarizer;
        self
    }

    pub fn build(&self, index: &ComparisonIndex, colors: &mut ColorSession) -> ComparisonTable {
        // The legend claims colors first so slots follow selection order.
        let legend: Vec<RunLegendEntry> = self
            .selection
            .iter()
            .map(|run_id| RunLegendEntry {
                run_id: run_id.clone(),
                variant_name: self.variant_name(run_id.as_str()),
                color: colors.assign(run_id),
            })
            .collect();

        let resolved = self.resolve_columns();

        let columns = resolved
            .iter()
            .map(|column| self.column(column, colors))
            .collect();

        let groups = index
            .datapoints
            .iter()
            .filter_map(|datapoint| self.group(datapoint, index, &resolved, colors))
            .collect();

        ComparisonTable {
            evaluation_name: self.evaluation_name.to_string(),
            selection: self.selection.clone(),
            legend,
            columns,
            groups,
        }
    }

    fn variant_name(&self, run_id: &str) -> Option<String> {
        self.variants
            .and_then(|variants| variants.variant_name(run_id))
            .map(str::to_string)
    }

    fn resolve_columns(&self) -> Vec<ResolvedColumn<'a>> {
        let config = self.config;
        self.evaluator_names
            .iter()
            .filter_map(|evaluator_name| {
                let Some(evaluator) = config.evaluator_config(self.evaluation_name, evaluator_name)
                else {
                    tracing::warn!(
                        evaluation_name = self.evaluation_name,
                        evaluator_name = evaluator_name.as_str(),
                        "Evaluator config not found, omitting column"
                    );
                    return None;
                };
                let metric_name = self
                    .namer
                    .metric_name_for(self.evaluation_name, evaluator_name);
                let Some(metric) = config.metric_config(&metric_name) else {
                    tracing::warn!(
                        evaluation_name = self.evaluation_name,
                        evaluator_name = evaluator_name.as_str(),
                        metric_name = metric_name.as_str(),
                        "Metric config not found, omitting column"
                    );
                    return None;
                };
                Some(ResolvedColumn {
                    evaluator_name: evaluator_name.as_str(),
                    metric_name,
                    evaluator,
                    metric,
                })
            })
            .collect()
    }

    fn column(&self, column: &ResolvedColumn<'_>, colors: &mut ColorSession) -> EvaluatorColumn {
        let summaries = order_statistics(self.statistics, &column.metric_name, self.selection)
            .into_iter()
            .map(|statistic| RunSummary {
                run_id: statistic.evaluation_run_id.clone(),
                variant_name: self.variant_name(statistic.evaluation_run_id.as_str()),
                color: colors.assign(&statistic.evaluation_run_id),
                mean_metric: statistic.mean_metric,
                formatted: FormattedStatistic::new(statistic, column.metric, self.formatter),
                failed: is_summary_failed(column.evaluator, statistic.mean_metric),
            })
            .collect();

        EvaluatorColumn {
            evaluator_name: column.evaluator_name.to_string(),
            metric_name: column.metric_name.clone(),
            evaluator_kind: column.evaluator.kind(),
            metric_type: column.metric.metric_type,
            optimize: column.metric.optimize,
            cutoff: column.evaluator.cutoff().map(|(cutoff, _)| cutoff),
            summaries,
        }
    }

    fn group(
        &self,
        datapoint: &Datapoint,
        index: &ComparisonIndex,
        columns: &[ResolvedColumn<'_>],
        colors: &mut ColorSession,
    ) -> Option<DatapointGroup> {
        let runs = index.results.runs_for(datapoint.id.as_str())?;

        let rows: Vec<RunRow> = self
            .selection
            .iter()
            .filter_map(|run_id| runs.get(run_id).map(|result| (run_id, result)))
            .map(|(run_id, result)| self.row(run_id, result, columns, colors))
            .collect();

        if rows.is_empty() {
            return None;
        }

        let empty_output = Output::default();
        let reference = datapoint.reference_output.as_ref().unwrap_or(&empty_output);

        Some(DatapointGroup {
            datapoint_id: datapoint.id.clone(),
            input: self.summarizer.preview(Content::Input(&datapoint.input)),
            reference_output: self.summarizer.preview(Content::Output(reference)),
            rows,
        })
    }

    fn row(
        &self,
        run_id: &EvaluationRunId,
        result: &RunResult,
        columns: &[ResolvedColumn<'_>],
        colors: &mut ColorSession,
    ) -> RunRow {
        let metrics = columns
            .iter()
            .map(|column| {
                result.metrics.get(&column.metric_name).map(|entry| {
                    let value = entry.parsed_value();
                    MetricCell {
                        display: format_metric_value(&value),
                        failed: is_value_failed(&value, column.evaluator, column.metric),
                        value,
                        is_human_feedback: entry.is_human_feedback,
                        evaluator_inference_id: entry.evaluator_inference_id.clone(),
                        inference_id: entry.inference_id.clone(),
                    }
                })
            })
            .collect();

        RunRow {
            run_id: run_id.clone(),
            variant_name: self.variant_name(run_id.as_str()),
            color: colors.assign(run_id),
            generated_output: self.summarizer.preview(Content::Output(&result.generated_output)),
            metrics,
        }
    }
}

/// Statistics for `metric_name`, one per selected run, in selection order.
///
/// Runs outside the selection are dropped. If a run has several entries the first one is used.
pub fn order_statistics<'s>(
    statistics: &'s [EvaluationStatistic],
    metric_name: &str,
    selection: &RunSelection,
) -> Vec<&'s EvaluationStatistic> {
    let mut by_run: HashMap<&str, &'s EvaluationStatistic> = HashMap::new();
    for statistic in statistics
        .iter()
        .filter(|statistic| statistic.metric_name == metric_name)
    {
        by_run
            .entry(statistic.evaluation_run_id.as_str())
            .or_insert(statistic);
    }

    selection
        .iter()
        .filter_map(|run_id| by_run.get(run_id.as_str()).copied())
        .collect()
}
