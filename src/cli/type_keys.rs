//! `type` command: press keys headlessly and print the result.

use clap::Args;
use serde::Serialize;

use crate::cli::common::{print_json, CliContext, CliError, CliResult};
use crate::keyboard::{Silent, TextBuffer, VirtualKeyboard};
use crate::models::KeyLabel;

/// Prefix of a layout switch directive, e.g. `@numpad`.
const LAYOUT_DIRECTIVE: char = '@';

/// Press a sequence of keys and print the typed text
#[derive(Debug, Clone, Args)]
pub struct TypeArgs {
    /// Key labels to press in order (e.g. a Shift b Space). `@name`
    /// switches to layout `name`; a lone `@` is the character.
    #[arg(value_name = "LABEL", required = true)]
    pub labels: Vec<String>,

    /// Layout to start on (default from config)
    #[arg(short, long, value_name = "NAME")]
    pub layout: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct TypeResult {
    output: String,
    layout: String,
    shift: bool,
    caps: bool,
}

/// One step of the input sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step<'a> {
    Press(KeyLabel),
    SwitchLayout(&'a str),
}

impl<'a> Step<'a> {
    fn parse(text: &'a str) -> Self {
        match text.strip_prefix(LAYOUT_DIRECTIVE) {
            Some(name) if !name.is_empty() => Self::SwitchLayout(name),
            _ => Self::Press(KeyLabel::parse(text)),
        }
    }
}

impl TypeArgs {
    /// Execute the type command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let config = ctx.load_config()?;
        let layouts = ctx.load_layouts(&config)?;

        let mut keyboard = VirtualKeyboard::new(layouts, TextBuffer::new(), Box::new(Silent));
        let start = self
            .layout
            .as_deref()
            .unwrap_or(&config.keyboard.default_layout);
        keyboard
            .switch_layout(start)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        for text in &self.labels {
            match Step::parse(text) {
                Step::Press(label) => {
                    keyboard.press(&label);
                }
                Step::SwitchLayout(name) => keyboard
                    .switch_layout(name)
                    .map_err(|e| CliError::validation(format!("{e:#}")))?,
            }
        }

        let state = keyboard.state().clone();
        let result = TypeResult {
            output: keyboard.into_output().into_string(),
            layout: state.current_layout,
            shift: state.shift,
            caps: state.caps,
        };

        if self.json {
            return print_json(&result);
        }

        println!("Output: {:?}", result.output);
        println!("Layout: {}", result.layout);
        println!("Shift:  {}", on_off(result.shift));
        println!("Caps:   {}", on_off(result.caps));
        Ok(())
    }
}

const fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
