//! Short previews of inputs and outputs for table cells.
//!
//! Only the first message and the first content block are ever inspected.

use llm_eval_compare_core::{ContentBlockOutput, Input, InputContent, Output};
use serde::Serialize;

pub const DEFAULT_MAX_LENGTH: usize = 30;
pub const ELLIPSIS: &str = "...";

pub const EMPTY_INPUT: &str = "Empty input";
pub const EMPTY_OUTPUT: &str = "Empty output";

/// Something to preview, tagged with how to read it.
#[derive(Debug, Clone, Copy)]
pub enum Content<'a> {
    Text(&'a str),
    Input(&'a Input),
    Output(&'a Output),
}

/// A one-line summary plus the full rendering shown on expand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentPreview {
    pub summary: String,
    pub full: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentSummarizer {
    max_length: usize,
}

impl Default for ContentSummarizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LENGTH)
    }
}

impl ContentSummarizer {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn summarize(&self, content: Content<'_>) -> String {
        match content {
            Content::Text(text) => truncate_text(text, self.max_length),
            Content::Input(input) => self.summarize_input(input),
            Content::Output(output) => self.summarize_output(output),
        }
    }

    pub fn preview(&self, content: Content<'_>) -> ContentPreview {
        let summary = self.summarize(content);
        let full = match content {
            Content::Text(text) => text.to_string(),
            Content::Input(input) => {
                serde_json::to_string_pretty(input).unwrap_or_else(|_| summary.clone())
            }
            Content::Output(output) => {
                serde_json::to_string_pretty(output).unwrap_or_else(|_| summary.clone())
            }
        };
        ContentPreview { summary, full }
    }

    fn summarize_input(&self, input: &Input) -> String {
        let Some(message) = input.messages.first() else {
            return EMPTY_INPUT.to_string();
        };
        let Some(block) = message.content.first() else {
            return format!("{} message", message.role);
        };

        match block {
            InputContent::StructuredText { arguments } => {
                truncate_text(&arguments.to_string(), self.max_length)
            }
            InputContent::UnstructuredText { text } => truncate_text(text, self.max_length),
            InputContent::MissingFunctionText { value } | InputContent::RawText { value } => {
                truncate_text(value, self.max_length)
            }
            InputContent::ToolCall { .. }
            | InputContent::ToolResult { .. }
            | InputContent::Thought { .. }
            | InputContent::Other { .. } => {
                format!("{} message ({})", message.role, block.kind())
            }
        }
    }

    fn summarize_output(&self, output: &Output) -> String {
        match output {
            Output::Chat(blocks) => match blocks.first() {
                None => EMPTY_OUTPUT.to_string(),
                Some(ContentBlockOutput::Text { text }) => truncate_text(text, self.max_length),
                Some(block) => format!("{} output", block.kind()),
            },
            Output::Json(json) => match json.raw.as_deref() {
                None | Some("") => EMPTY_OUTPUT.to_string(),
                Some(raw) => truncate_text(raw, self.max_length),
            },
        }
    }
}

/// Cut `text` to `max_length` characters and mark the cut with an ellipsis.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    match text.char_indices().nth(max_length) {
        Some((byte_index, _)) => format!("{}{}", &text[..byte_index], ELLIPSIS),
        None => text.to_string(),
    }
}
