//! CLI execution context

use anyhow::Result;
use llm_eval_compare_view::ContentSummarizer;

use crate::cli::Cli;
use crate::config::Settings;
use crate::output::OutputWriter;

/// Execution context for CLI commands
pub struct Context {
    /// Effective settings after layering
    pub settings: Settings,

    /// Output writer
    pub output: OutputWriter,

    /// Content preview settings
    pub summarizer: ContentSummarizer,
}

impl Context {
    /// Create a new context from CLI arguments
    pub fn new(cli: &Cli) -> Result<Self> {
        let settings = Settings::load(cli.settings.as_deref())?;

        let format = cli.format.unwrap_or(settings.output_format);
        let output = OutputWriter::new(format, settings.color && !cli.no_color);
        let summarizer = ContentSummarizer::new(settings.preview_max_length);

        Ok(Self {
            settings,
            output,
            summarizer,
        })
    }
}
