//! Compare command

use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;
use comfy_table::Cell;
use llm_eval_compare_core::{
    ConfigStore, EvaluationResultRecord, EvaluationRunInfo, EvaluationStatistic, Navigator,
};
use llm_eval_compare_view::{ComparisonEngine, ComparisonInputs, ComparisonTable, RunSelection};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use crate::context::Context;
use crate::output::{metric_cell, new_table, print_field, print_section, run_cell, TableDisplay};

/// Arguments for `compare`
#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Evaluation name
    #[arg(short, long)]
    pub evaluation: String,

    /// Evaluation results (JSON array or newline-delimited JSON)
    #[arg(short, long, value_name = "FILE")]
    pub records: PathBuf,

    /// Run info with variant names (JSON array)
    #[arg(long, value_name = "FILE")]
    pub runs: Option<PathBuf>,

    /// Per-run metric statistics (JSON array)
    #[arg(long, value_name = "FILE")]
    pub statistics: Option<PathBuf>,

    /// Evaluation and metric configuration (.toml or .json)
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Runs to compare, in display order (comma-separated)
    #[arg(long)]
    pub evaluation_run_ids: String,

    /// Evaluators to show as columns (comma-separated, defaults to every configured evaluator)
    #[arg(long)]
    pub evaluators: Option<String>,

    /// Print the detail path for a datapoint instead of the comparison
    #[arg(long, value_name = "DATAPOINT")]
    pub open: Option<String>,
}

/// Prints navigation paths to stdout
pub struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn navigate(&self, path: &str) {
        println!("{}", path);
    }
}

/// Execute the compare command
pub fn execute(ctx: &Context, args: CompareArgs) -> Result<()> {
    let records = load_records(&args.records)?;
    let store = ConfigStore::from_path(&args.config)
        .with_context(|| format!("Failed to load evaluation config from {:?}", args.config))?;

    let evaluator_names = resolve_evaluators(&store, &args.evaluation, args.evaluators.as_deref());
    if evaluator_names.is_empty() {
        ctx.output.warning(&format!(
            "No evaluators configured for evaluation '{}'",
            args.evaluation
        ));
    }

    let runs: Vec<EvaluationRunInfo> = match &args.runs {
        Some(path) => load_json_array(path, "run info")?,
        None => Vec::new(),
    };
    let statistics: Vec<EvaluationStatistic> = match &args.statistics {
        Some(path) => load_json_array(path, "statistics")?,
        None => Vec::new(),
    };

    let selection = RunSelection::parse(&args.evaluation_run_ids);
    if selection.is_empty() {
        ctx.output.warning("No evaluation runs selected");
    }

    tracing::debug!(
        records = records.len(),
        runs = runs.len(),
        statistics = statistics.len(),
        selected = selection.len(),
        "Loaded comparison inputs"
    );

    let inputs = ComparisonInputs::new(args.evaluation.as_str(), records, selection)
        .with_evaluators(evaluator_names)
        .with_runs(runs)
        .with_statistics(statistics);

    let mut engine = ComparisonEngine::new(store).with_summarizer(ctx.summarizer);
    let table = engine.build(&inputs);

    if let Some(datapoint_id) = args.open.as_deref() {
        if table.group(datapoint_id).is_none() {
            anyhow::bail!(
                "Datapoint '{}' has no results for the selected runs",
                datapoint_id
            );
        }
        table.activate(datapoint_id, &StdoutNavigator);
        return Ok(());
    }

    ctx.output.write(&*table)
}

fn resolve_evaluators(
    store: &ConfigStore,
    evaluation: &str,
    requested: Option<&str>,
) -> Vec<String> {
    match requested {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
        None => store
            .evaluation(evaluation)
            .map(|config| config.evaluator_names())
            .unwrap_or_default(),
    }
}

fn load_records(path: &Path) -> Result<Vec<EvaluationResultRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read records from {:?}", path))?;
    EvaluationResultRecord::parse_many(&content)
        .with_context(|| format!("Failed to parse records from {:?}", path))
}

fn load_json_array<T: DeserializeOwned>(path: &Path, what: &str) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} from {:?}", what, path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} from {:?}", what, path))
}

impl TableDisplay for ComparisonTable {
    fn display_table(&self, styled: bool) {
        print_section(&format!("Evaluation: {}", self.evaluation_name));

        let mut legend = new_table(&["Run", "Variant"]);
        for entry in &self.legend {
            legend.add_row(vec![
                run_cell(entry.run_id.as_str(), entry.color, styled),
                Cell::new(entry.variant_name.as_deref().unwrap_or("-")),
            ]);
        }
        println!("{legend}");

        if !self.columns.is_empty() {
            print_section("Evaluators");
            let mut summaries = new_table(&[
                "Evaluator", "Type", "Metric", "Optimize", "Cutoff", "Run", "Summary",
            ]);
            for column in &self.columns {
                let cutoff = column
                    .cutoff
                    .map(|cutoff| cutoff.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let header = vec![
                    Cell::new(&column.evaluator_name),
                    Cell::new(column.evaluator_kind),
                    Cell::new(column.metric_type.to_string()),
                    Cell::new(column.optimize.to_string()),
                    Cell::new(cutoff),
                ];

                if column.summaries.is_empty() {
                    let mut row = header;
                    row.extend([Cell::new("-"), Cell::new("-")]);
                    summaries.add_row(row);
                    continue;
                }

                for (i, summary) in column.summaries.iter().enumerate() {
                    let mut row = if i == 0 {
                        header.clone()
                    } else {
                        vec![Cell::new(""); 5]
                    };
                    row.push(run_cell(summary.run_id.as_str(), summary.color, styled));
                    row.push(metric_cell(&summary.formatted.to_string(), summary.failed, styled));
                    summaries.add_row(row);
                }
            }
            println!("{summaries}");
        }

        print_section("Results");
        if self.groups.is_empty() {
            println!("{}", "No results for the selected runs.".dimmed());
            return;
        }

        let mut headers = vec!["Datapoint", "Input", "Reference Output", "Run", "Generated Output"];
        headers.extend(self.columns.iter().map(|c| c.evaluator_name.as_str()));
        let mut results = new_table(&headers);

        for render_row in self.render_rows() {
            let group = render_row.group;
            let row = render_row.row;
            let mut cells = if render_row.is_group_start() {
                vec![
                    Cell::new(group.datapoint_id.as_str()),
                    Cell::new(&group.input.summary),
                    Cell::new(&group.reference_output.summary),
                ]
            } else {
                vec![Cell::new(""), Cell::new(""), Cell::new("")]
            };
            cells.push(run_cell(row.run_id.as_str(), row.color, styled));
            cells.push(Cell::new(&row.generated_output.summary));
            for metric in &row.metrics {
                cells.push(match metric {
                    Some(metric) if metric.is_human_feedback => {
                        metric_cell(&format!("{} (human)", metric.display), metric.failed, styled)
                    }
                    Some(metric) => metric_cell(&metric.display, metric.failed, styled),
                    None => Cell::new("-"),
                });
            }
            results.add_row(cells);
        }
        println!("{results}");

        println!(
            "\n{} {} datapoint(s), {} row(s)",
            "Total:".bold(),
            self.groups.len().to_string().green(),
            self.row_count()
        );
        print_field("Selection", &self.selection.to_query_value());
    }

    fn display_compact(&self) {
        for render_row in self.render_rows() {
            let metrics: Vec<String> = self
                .columns
                .iter()
                .zip(&render_row.row.metrics)
                .filter_map(|(column, metric)| {
                    metric.as_ref().map(|metric| {
                        let marker = if metric.failed { "!" } else { "" };
                        format!("{}={}{}", column.evaluator_name, metric.display, marker)
                    })
                })
                .collect();
            println!(
                "{}\t{}\t{}\t{}",
                render_row.group.datapoint_id,
                render_row.row.run_id,
                render_row.row.generated_output.summary,
                metrics.join(" ")
            );
        }
    }
}
