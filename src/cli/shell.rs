//! Interactive shell mode for Remixer
//!
//! Provides a REPL over a single remix session, with command history and
//! tab completion. Each line maps onto one session action.

use anyhow::Result;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Config as EditorConfig, Editor, Helper};

use super::output::{OutputFormat, indent, print_error, print_formatted};
use crate::config::Config;
use crate::generator;
use crate::locale::Locale;
use crate::remix::SessionSnapshot;
use crate::session::{self, RemixOutcome, SessionHandle};
use crate::style::{self, StyleId};

/// Command completer for the shell
struct ShellCompleter {
    commands: Vec<(&'static str, Vec<&'static str>)>,
}

impl ShellCompleter {
    fn new() -> Self {
        Self {
            commands: vec![
                ("input", vec![]),
                ("style", StyleId::ALL.iter().map(|s| s.as_str()).collect()),
                ("remix", vec![]),
                ("status", vec![]),
                ("styles", vec![]),
                ("help", vec![]),
                ("exit", vec![]),
                ("quit", vec![]),
            ],
        }
    }
}

fn pairs<'a>(words: impl Iterator<Item = &'a str>) -> Vec<Pair> {
    words
        .map(|w| Pair {
            display: w.to_string(),
            replacement: w.to_string(),
        })
        .collect()
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        let start = line.rfind(' ').map(|i| i + 1).unwrap_or(0);
        let words: Vec<&str> = line.split_whitespace().collect();

        match (words.as_slice(), line.ends_with(' ')) {
            ([], _) => Ok((0, pairs(self.commands.iter().map(|(cmd, _)| *cmd)))),
            ([prefix], false) => Ok((
                start,
                pairs(
                    self.commands
                        .iter()
                        .map(|(cmd, _)| *cmd)
                        .filter(|cmd| cmd.starts_with(prefix)),
                ),
            )),
            ([cmd], true) | ([cmd, _], false) => {
                let prefix = if words.len() == 2 { words[1] } else { "" };
                let subs = self
                    .commands
                    .iter()
                    .find(|(c, _)| c == cmd)
                    .map(|(_, subs)| subs.as_slice())
                    .unwrap_or_default();
                Ok((
                    start,
                    pairs(subs.iter().copied().filter(|sub| sub.starts_with(prefix))),
                ))
            }
            _ => Ok((pos, vec![])),
        }
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for ShellCompleter {}
impl Validator for ShellCompleter {}
impl Helper for ShellCompleter {}

/// A parsed shell line
#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    Input(String),
    Style(StyleId),
    Remix,
    Status,
    Styles,
    Help,
    Exit,
}

/// Parse one line. `input` keeps the rest of the line verbatim, with `\n`
/// expanded to a newline.
fn parse_command(line: &str) -> Result<ShellCommand> {
    let (cmd, rest) = match line.split_once(' ') {
        Some((cmd, rest)) => (cmd, rest),
        None => (line, ""),
    };

    let command = match cmd {
        "input" => ShellCommand::Input(rest.replace("\\n", "\n")),
        "style" => ShellCommand::Style(rest.parse()?),
        "remix" => ShellCommand::Remix,
        "status" => ShellCommand::Status,
        "styles" => ShellCommand::Styles,
        "help" => ShellCommand::Help,
        "exit" | "quit" => ShellCommand::Exit,
        other => anyhow::bail!("Unknown command '{}'. Type 'help' for a list.", other),
    };
    Ok(command)
}

/// Run a single command in the shell.
/// Returns Ok(true) to continue, Ok(false) to exit gracefully.
async fn run_command(
    command: ShellCommand,
    session: &SessionHandle,
    locale: Locale,
    format: OutputFormat,
) -> Result<bool> {
    match command {
        ShellCommand::Input(text) => session.set_input_text(text),
        ShellCommand::Style(style) => session.set_selected_style(style),
        ShellCommand::Remix => {
            let Some(outcome) = session.remix().await else {
                anyhow::bail!("Session ended unexpectedly");
            };
            let snapshot = outcome.snapshot();
            match outcome {
                RemixOutcome::Completed(_) => print_result(snapshot, format),
                RemixOutcome::Rejected(_) if snapshot.state.input_text.is_empty() => {
                    println!("Nothing to remix. Set text first with 'input <text>'.");
                }
                RemixOutcome::Rejected(_) => println!("A remix is already in progress."),
            }
        }
        ShellCommand::Status => {
            print_formatted(&session.snapshot(), format, |s| status_text(s, locale))
        }
        ShellCommand::Styles => {
            for def in style::registry(locale) {
                println!("  {:<8} {}", def.id, def.label);
            }
        }
        ShellCommand::Help => print_help(),
        ShellCommand::Exit => return Ok(false),
    }
    Ok(true)
}

fn print_result(snapshot: &SessionSnapshot, format: OutputFormat) {
    if format == OutputFormat::Json {
        print_formatted(snapshot, format, |_| String::new());
        return;
    }
    match (&snapshot.state.error_message, &snapshot.state.output_text) {
        (Some(error), _) => print_error(error),
        (None, Some(output)) => println!("{}", output),
        (None, None) => {}
    }
}

fn status_text(snapshot: &SessionSnapshot, locale: Locale) -> String {
    let state = &snapshot.state;
    let mut lines = vec![
        format!("Phase:  {}", snapshot.phase.description()),
        format!(
            "Style:  {} ({})",
            state.selected_style,
            style::label_of(state.selected_style, locale)
        ),
        format!("Input:  {} chars", state.input_text.chars().count()),
    ];
    if let Some(error) = &state.error_message {
        lines.push(format!("Error:  {}", error));
    }
    if let Some(output) = &state.output_text {
        lines.push("Output:".to_string());
        lines.push(indent(output, "  "));
        if snapshot.output_stale {
            lines.push(format!("  ({})", locale.stale_hint()));
        }
    }
    lines.join("\n")
}

fn print_help() {
    println!(
        r#"Remixer Interactive Shell

Commands:
  input <text>     Set the text to remix (use \n for line breaks)
  style <id>       Select a style: tweet, blog, formal, casual
  remix            Remix the current text and print the result
  status           Show the current session state
  styles           List available styles
  help             Show this help
  exit, quit       Exit the shell
"#
    );
}

/// Get the history file path
fn history_path() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("com", "remixer", "Remixer")
        .map(|dirs| dirs.data_dir().join("shell_history"))
}

/// Run the interactive shell
pub async fn run(config: &Config, format: OutputFormat) -> Result<()> {
    let generator = generator::from_config(config)?;
    println!(
        "Remixer Interactive Shell v{} ({} generator)",
        env!("CARGO_PKG_VERSION"),
        generator.name()
    );
    println!("Type 'help' for available commands, 'exit' to quit.\n");

    let locale = config.ui.locale;
    let session = session::spawn(generator, locale);

    let editor_config = EditorConfig::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let mut rl = Editor::with_config(editor_config)?;
    rl.set_helper(Some(ShellCompleter::new()));

    if let Some(path) = history_path() {
        let _ = rl.load_history(&path);
    }

    loop {
        match rl.readline("remixer> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                rl.add_history_entry(line)?;

                let result = match parse_command(line) {
                    Ok(command) => run_command(command, &session, locale, format).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(true) => continue,
                    Ok(false) => break,
                    Err(e) => print_error(&e.to_string()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("exit");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(path) = history_path() {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = rl.save_history(&path);
    }

    Ok(())
}
