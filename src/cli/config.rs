//! Configuration management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::common::{print_json, CliContext, CliError, CliResult};
use crate::config::{Config, ThemeMode};
use crate::constants::APP_NAME;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Layout shown at startup
    #[arg(long, value_name = "NAME")]
    default_layout: Option<String>,

    /// TOML file with extra layouts
    #[arg(long, value_name = "FILE")]
    layouts_file: Option<PathBuf>,

    /// Key press sound (on or off)
    #[arg(long, value_name = "on|off")]
    sound: Option<String>,

    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,

    /// Open the help overlay at startup (on or off)
    #[arg(long, value_name = "on|off")]
    help_on_startup: Option<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    path: String,
    default_layout: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    layouts_file: Option<String>,
    sound: bool,
    theme: String,
    show_help_on_startup: bool,
}

impl ConfigOutput {
    fn new(config: &Config, path: &std::path::Path) -> Self {
        Self {
            path: path.display().to_string(),
            default_layout: config.keyboard.default_layout.clone(),
            layouts_file: config
                .keyboard
                .layouts_file
                .as_ref()
                .map(|p| p.display().to_string()),
            sound: config.sound.enabled,
            theme: theme_name(config.ui.theme_mode).to_string(),
            show_help_on_startup: config.ui.show_help_on_startup,
        }
    }
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(ctx),
            ConfigCommand::Set(args) => args.execute(ctx),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let config = ctx.load_config()?;
        let output = ConfigOutput::new(&config, &ctx.config_path()?);

        if self.json {
            return print_json(&output);
        }

        println!("{APP_NAME} Configuration");
        println!("======================");
        println!();
        println!("File:             {}", output.path);
        println!("Default layout:   {}", output.default_layout);
        println!(
            "Layouts file:     {}",
            output.layouts_file.as_deref().unwrap_or("(none)")
        );
        println!("Sound:            {}", on_off(output.sound));
        println!("Theme mode:       {}", output.theme);
        println!("Help on startup:  {}", on_off(output.show_help_on_startup));
        Ok(())
    }
}

impl ConfigSetArgs {
    fn is_empty(&self) -> bool {
        self.default_layout.is_none()
            && self.layouts_file.is_none()
            && self.sound.is_none()
            && self.theme.is_none()
            && self.help_on_startup.is_none()
    }

    /// Execute set command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        if self.is_empty() {
            return Err(CliError::validation(
                "At least one option must be specified: --default-layout, --layouts-file, \
                 --sound, --theme, or --help-on-startup",
            ));
        }

        let path = ctx.config_path()?;
        let mut config = ctx.load_config()?;

        if let Some(file) = &self.layouts_file {
            if !file.is_file() {
                return Err(CliError::validation(format!(
                    "Layouts file does not exist: {}",
                    file.display()
                )));
            }
            config.keyboard.layouts_file = Some(file.clone());
        }

        if let Some(name) = &self.default_layout {
            // Check against the layouts the new config will load
            let layouts = ctx.load_layouts(&config)?;
            if !layouts.contains(name) {
                let known: Vec<_> = layouts.names().collect();
                return Err(CliError::validation(format!(
                    "Unknown layout '{}'. Available layouts: {}",
                    name,
                    known.join(", ")
                )));
            }
            config.keyboard.default_layout.clone_from(name);
        }

        if let Some(value) = &self.sound {
            config.sound.enabled = parse_switch("--sound", value)?;
        }

        if let Some(value) = &self.theme {
            config.ui.theme_mode = parse_theme(value)?;
        }

        if let Some(value) = &self.help_on_startup {
            config.ui.show_help_on_startup = parse_switch("--help-on-startup", value)?;
        }

        config
            .save_to(&path)
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;
        tracing::info!(path = %path.display(), "configuration saved");

        println!("Configuration updated successfully.");
        Ok(())
    }
}

fn parse_theme(value: &str) -> CliResult<ThemeMode> {
    match value.to_lowercase().as_str() {
        "auto" => Ok(ThemeMode::Auto),
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        _ => Err(CliError::validation(
            "Invalid theme mode. Must be 'auto', 'light', or 'dark'",
        )),
    }
}

fn parse_switch(option: &str, value: &str) -> CliResult<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(CliError::validation(format!(
            "Invalid value for {option}: '{value}'. Must be 'on' or 'off'"
        ))),
    }
}

const fn theme_name(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Auto => "auto",
        ThemeMode::Dark => "dark",
        ThemeMode::Light => "light",
    }
}

const fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
