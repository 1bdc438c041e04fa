//! Settings commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::{Settings, ENV_PREFIX};
use crate::context::Context;
use crate::output::{print_field, print_optional_field, print_section, TableDisplay};

/// Settings inspection commands
#[derive(Debug, Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective settings
    Show,

    /// Show where the user settings file is read from
    Path,
}

/// Execute settings commands
pub fn execute(ctx: &Context, cmd: ConfigCommands) -> Result<()> {
    match cmd.command {
        ConfigSubcommand::Show => ctx.output.write(&ctx.settings),
        ConfigSubcommand::Path => {
            match Settings::settings_path() {
                Some(path) => ctx.output.info(&path.display().to_string()),
                None => ctx.output.warning("Could not determine config directory"),
            }
            Ok(())
        }
    }
}

impl TableDisplay for Settings {
    fn display_table(&self, _styled: bool) {
        print_section("Settings");
        print_field("Output Format", &self.output_format.to_string());
        print_field("Color", &self.color.to_string());
        print_field("Preview Max Length", &self.preview_max_length.to_string());
        let path = Settings::settings_path().map(|p| p.display().to_string());
        print_optional_field("Settings File", path.as_deref());
        print_field("Environment Prefix", &format!("{}_", ENV_PREFIX));
    }

    fn display_compact(&self) {
        println!(
            "output_format={}\tcolor={}\tpreview_max_length={}",
            self.output_format, self.color, self.preview_max_length
        );
    }
}
