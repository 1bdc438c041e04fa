//! Memoized comparison building.
//!
//! Every cache is keyed on the identity of the shared input it was derived
//! from, never on contents. Callers hand in the same `Arc` to reuse work and
//! a new one to force recomputation.

use llm_eval_compare_core::{
    ConfigSource, DefaultMetricNamer, EvaluationResultRecord, EvaluationRunInfo,
    EvaluationStatistic, MetricNamer, SummaryFormatter,
};
use std::sync::Arc;

use crate::builder::{ComparisonTable, ComparisonViewBuilder};
use crate::colors::ColorAssigner;
use crate::formatting::DefaultSummaryFormatter;
use crate::indexer::ComparisonIndex;
use crate::selection::{RunSelection, RunVariantMap};
use crate::summarizer::ContentSummarizer;

/// Caches one derived value against the identity of one shared input.
#[derive(Debug)]
pub struct IdentityMemo<K: ?Sized, V> {
    entry: Option<(Arc<K>, Arc<V>)>,
}

impl<K: ?Sized, V> Default for IdentityMemo<K, V> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<K: ?Sized, V> IdentityMemo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&mut self, key: &Arc<K>, compute: impl FnOnce(&K) -> V) -> Arc<V> {
        if let Some((cached_key, value)) = &self.entry {
            if Arc::ptr_eq(cached_key, key) {
                return Arc::clone(value);
            }
        }
        let value = Arc::new(compute(&**key));
        self.entry = Some((Arc::clone(key), Arc::clone(&value)));
        value
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}

/// Everything a comparison is derived from, as shared handles.
#[derive(Debug, Clone)]
pub struct ComparisonInputs {
    pub evaluation_name: Arc<str>,
    pub evaluator_names: Arc<[String]>,
    pub records: Arc<[EvaluationResultRecord]>,
    pub runs: Arc<[EvaluationRunInfo]>,
    pub statistics: Arc<[EvaluationStatistic]>,
    pub selection: RunSelection,
}

impl ComparisonInputs {
    pub fn new(
        evaluation_name: impl Into<Arc<str>>,
        records: impl Into<Arc<[EvaluationResultRecord]>>,
        selection: RunSelection,
    ) -> Self {
        Self {
            evaluation_name: evaluation_name.into(),
            evaluator_names: Arc::from(Vec::new()),
            records: records.into(),
            runs: Arc::from(Vec::new()),
            statistics: Arc::from(Vec::new()),
            selection,
        }
    }

    pub fn with_evaluators(mut self, evaluator_names: impl Into<Arc<[String]>>) -> Self {
        self.evaluator_names = evaluator_names.into();
        self
    }

    pub fn with_runs(mut self, runs: impl Into<Arc<[EvaluationRunInfo]>>) -> Self {
        self.runs = runs.into();
        self
    }

    pub fn with_statistics(mut self, statistics: impl Into<Arc<[EvaluationStatistic]>>) -> Self {
        self.statistics = statistics.into();
        self
    }

    pub fn with_selection(mut self, selection: RunSelection) -> Self {
        self.selection = selection;
        self
    }
}

/// Identity of every input a finished table depends on.
struct TableKey {
    evaluation_name: Arc<str>,
    evaluator_names: Arc<[String]>,
    index: Arc<ComparisonIndex>,
    variants: Arc<RunVariantMap>,
    statistics: Arc<[EvaluationStatistic]>,
    selection: RunSelection,
}

impl TableKey {
    fn matches(&self, other: &TableKey) -> bool {
        Arc::ptr_eq(&self.evaluation_name, &other.evaluation_name)
            && Arc::ptr_eq(&self.evaluator_names, &other.evaluator_names)
            && Arc::ptr_eq(&self.index, &other.index)
            && Arc::ptr_eq(&self.variants, &other.variants)
            && Arc::ptr_eq(&self.statistics, &other.statistics)
            && self.selection.same_session(&other.selection)
    }
}

pub struct ComparisonEngine {
    config: Box<dyn ConfigSource>,
    namer: Box<dyn MetricNamer>,
    formatter: Box<dyn SummaryFormatter>,
    summarizer: ContentSummarizer,
    indexes: IdentityMemo<[EvaluationResultRecord], ComparisonIndex>,
    variants: IdentityMemo<[EvaluationRunInfo], RunVariantMap>,
    colors: ColorAssigner,
    table: Option<(TableKey, Arc<ComparisonTable>)>,
}

impl ComparisonEngine {
    pub fn new(config: impl ConfigSource + 'static) -> Self {
        Self {
            config: Box::new(config),
            namer: Box::new(DefaultMetricNamer),
            formatter: Box::new(DefaultSummaryFormatter),
            summarizer: ContentSummarizer::default(),
            indexes: IdentityMemo::new(),
            variants: IdentityMemo::new(),
            colors: ColorAssigner::new(),
            table: None,
        }
    }

    pub fn with_namer(mut self, namer: impl MetricNamer + 'static) -> Self {
        self.namer = Box::new(namer);
        self.table = None;
        self
    }

    pub fn with_formatter(mut self, formatter: impl SummaryFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self.table = None;
        self
    }

    pub fn with_summarizer(mut self, summarizer: ContentSummarizer) -> Self {
        self.summarizer = summarizer;
        self.table = None;
        self
    }

    /// Index a record collection, reusing the last index for the same collection.
    pub fn index(&mut self, records: &Arc<[EvaluationResultRecord]>) -> Arc<ComparisonIndex> {
        self.indexes.get_or_compute(records, ComparisonIndex::build)
    }

    /// Build (or reuse) the comparison table for these inputs.
    pub fn build(&mut self, inputs: &ComparisonInputs) -> Arc<ComparisonTable> {
        let key = TableKey {
            evaluation_name: Arc::clone(&inputs.evaluation_name),
            evaluator_names: Arc::clone(&inputs.evaluator_names),
            index: self.index(&inputs.records),
            variants: self.variants.get_or_compute(&inputs.runs, RunVariantMap::from_runs),
            statistics: Arc::clone(&inputs.statistics),
            selection: inputs.selection.clone(),
        };

        if let Some((cached_key, table)) = &self.table {
            if cached_key.matches(&key) {
                tracing::debug!(evaluation_name = %inputs.evaluation_name, "Comparison cache hit");
                return Arc::clone(table);
            }
        }

        let colors = self.colors.session(&inputs.selection);
        let table = Arc::new(
            ComparisonViewBuilder::new(
                &key.evaluation_name,
                &key.selection,
                self.config.as_ref(),
                self.namer.as_ref(),
                self.formatter.as_ref(),
            )
            .with_evaluators(&key.evaluator_names)
            .with_variants(&key.variants)
            .with_statistics(&key.statistics)
            .with_summarizer(self.summarizer)
            .build(&key.index, colors),
        );

        tracing::debug!(
            evaluation_name = %inputs.evaluation_name,
            groups = table.groups.len(),
            columns = table.columns.len(),
            "Built comparison table"
        );

        self.table = Some((key, Arc::clone(&table)));
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_memo_reuses_same_arc() {
        let mut memo: IdentityMemo<[u32], u32> = IdentityMemo::new();
        let input: Arc<[u32]> = Arc::from(vec![1, 2, 3]);
        let mut calls = 0;

        let first = memo.get_or_compute(&input, |v| {
            calls += 1;
            v.iter().sum()
        });
        let second = memo.get_or_compute(&input, |v| {
            calls += 1;
            v.iter().sum()
        });

        assert_eq!(*first, 6);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_identity_memo_recomputes_for_equal_but_new_arc() {
        let mut memo: IdentityMemo<[u32], u32> = IdentityMemo::new();
        let a: Arc<[u32]> = Arc::from(vec![1, 2]);
        let b: Arc<[u32]> = Arc::from(vec![1, 2]);

        let first = memo.get_or_compute(&a, |v| v.iter().sum());
        let second = memo.get_or_compute(&b, |v| v.iter().sum());
        assert!(!Arc::ptr_eq(&first, &second));

        memo.clear();
        let third = memo.get_or_compute(&b, |v| v.iter().sum());
        assert!(!Arc::ptr_eq(&second, &third));
    }
}
