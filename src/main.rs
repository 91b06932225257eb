//! Softkeys - on-screen keyboard for the terminal
//!
//! Runs the keyboard UI, or one of the headless commands when a subcommand
//! is given.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use softkeys::cli::{CliContext, ConfigArgs, LayoutsArgs, ShowArgs, TypeArgs};
use softkeys::constants::{APP_BINARY_NAME, LOG_FILE_NAME};
use softkeys::keyboard::{Silent, TextBuffer, VirtualKeyboard};
use softkeys::{logging, tui};

/// Softkeys - on-screen keyboard for the terminal
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Layout to start on (default from config)
    #[arg(short, long, value_name = "NAME")]
    layout: Option<String>,

    /// Do not play the key press sound
    #[arg(long)]
    mute: bool,

    /// Write the typed text to stdout on exit
    #[arg(long)]
    print: bool,

    /// TOML file with extra layouts (overrides the config)
    #[arg(long, value_name = "FILE", global = true)]
    layouts_file: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log debug messages
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available layouts
    Layouts(LayoutsArgs),
    /// Print the keys of a layout
    Show(ShowArgs),
    /// Press a sequence of keys and print the typed text
    Type(TypeArgs),
    /// Show or change the configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = CliContext {
        config_path: cli.config.clone(),
        layouts_file: cli.layouts_file.clone(),
    };

    let Some(command) = &cli.command else {
        return run_keyboard(&cli, &ctx);
    };

    logging::init_stderr(cli.verbose);

    let result = match command {
        Command::Layouts(args) => args.execute(&ctx),
        Command::Show(args) => args.execute(&ctx),
        Command::Type(args) => args.execute(&ctx),
        Command::Config(args) => args.execute(&ctx),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code().code());
    }

    Ok(())
}

/// Runs the terminal UI until the user quits.
fn run_keyboard(cli: &Cli, ctx: &CliContext) -> Result<()> {
    // Log next to the config file
    let log_path = ctx
        .config_path()
        .map(|path| path.with_file_name(LOG_FILE_NAME))?;
    if let Err(e) = logging::init_file(&log_path, cli.verbose) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let mut config = ctx.load_config()?;
    let layouts = ctx.load_layouts(&config)?;

    let mut keyboard = VirtualKeyboard::new(layouts, TextBuffer::new(), Box::new(Silent));
    if let Some(name) = &cli.layout {
        keyboard.switch_layout(name)?;
    } else if let Err(e) = keyboard.switch_layout(&config.keyboard.default_layout) {
        tracing::warn!("ignoring configured default layout: {e:#}");
    }

    if cli.mute {
        config.sound.enabled = false;
    }

    tracing::info!(
        layout = %keyboard.state().current_layout,
        layouts = keyboard.layouts().len(),
        "starting keyboard"
    );

    let mut app_state = tui::AppState::new(keyboard, config);

    // Initialize TUI
    let mut terminal = tui::setup_terminal()?;

    // Run main TUI loop
    let result = tui::run_tui(&mut app_state, &mut terminal);

    // Restore terminal
    tui::restore_terminal(terminal)?;

    // Check for errors
    result.context("Keyboard UI failed")?;

    if cli.print {
        println!("{}", app_state.keyboard.text());
    }

    Ok(())
}
