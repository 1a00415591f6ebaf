// crates/testify-cli/src/main.rs
// ============================================================================
// Module: Testify CLI Entry Point
// Description: Command dispatcher for running built-in suites and config tooling.
// Purpose: Run suites, print their reports, and map failures to the exit code.
// Dependencies: clap, testify-core, testify-config, serde_json
// ============================================================================

//! ## Overview
//! The `testify` binary runs the built-in suites and writes their reports to
//! stdout (or a file). The process exits with a failure code when any
//! assertion failed or a suite aborted. Status and error lines are
//! [`Message`] values; report bodies come from the core renderers.


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use testify_cli::messages::Message;
use testify_cli::messages::Stream;
use testify_cli::suites::BuiltinSuite;
use testify_config::TestifyConfig;
use testify_config::config_toml_example;
use testify_core::ReportFormat;
use testify_core::ReportOptions;
use testify_core::Tally;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "testify", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run built-in suites and print their reports.
    Run(RunCommand),
    /// List the built-in suites.
    List(ListCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for `run`.
#[derive(Args, Debug)]
struct RunCommand {
    /// Suite to run (repeatable). Defaults to `self-check`.
    #[arg(long = "suite", value_enum, value_name = "SUITE", conflicts_with = "all")]
    suites: Vec<SuiteArg>,
    /// Run every built-in suite.
    #[arg(long, action = ArgAction::SetTrue)]
    all: bool,
    /// Report format (overrides `report.format`).
    #[arg(long, value_enum, value_name = "FORMAT")]
    format: Option<FormatArg>,
    /// Disable ANSI colour in text reports.
    #[arg(long = "no-color", action = ArgAction::SetTrue)]
    no_color: bool,
    /// Write reports to this file instead of stdout.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Path to the config file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for `list`.
#[derive(Args, Debug)]
struct ListCommand {
    /// Emit the suite list as JSON.
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a testify configuration file.
    Validate(ConfigValidateCommand),
    /// Print a canonical example configuration.
    Example,
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Path to the config file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Built-in suite selections.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum SuiteArg {
    /// The framework checking its own verdicts.
    SelfCheck,
    /// Basic assertions with one failing case.
    Basic,
    /// `before_each` fixtures and the data bag.
    DataBag,
}

/// Report format selections.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum FormatArg {
    /// Plain or coloured terminal text.
    Text,
    /// Standalone HTML page.
    Html,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error carrying the rendered message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl From<Message<'_>> for CliError {
    fn from(message: Message<'_>) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&Message::Version {
            version,
        })?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Run(command) => command_run(&command),
        Commands::List(command) => command_list(&command),
        Commands::Config {
            command,
        } => command_config(&command),
    }
}

/// Prints the top-level help text.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| output_error(Stream::Stdout, &err))?;
    let mut stdout = io::stdout();
    writeln!(&mut stdout).map_err(|err| output_error(Stream::Stdout, &err))
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Aggregate result of one `run` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RunOutcome {
    /// Number of suites run.
    suites: usize,
    /// Assertion counters summed over every completed suite.
    totals: Tally,
    /// True when at least one suite aborted.
    aborted: bool,
}

impl RunOutcome {
    /// Maps the outcome to the process exit code.
    const fn exit_code(self) -> ExitCode {
        if self.aborted || self.totals.has_failures() { ExitCode::FAILURE } else { ExitCode::SUCCESS }
    }
}

/// Executes `run`.
fn command_run(command: &RunCommand) -> CliResult<ExitCode> {
    let outcome = execute_run(command)?;
    write_stderr_line(&Message::RunSummary {
        suites: outcome.suites,
        totals: outcome.totals,
    })?;
    Ok(outcome.exit_code())
}

/// Runs the selected suites and writes their reports.
fn execute_run(command: &RunCommand) -> CliResult<RunOutcome> {
    let config = TestifyConfig::load(command.config.as_deref()).map_err(|error| {
        CliError::from(Message::ConfigLoadFailed {
            error: &error,
        })
    })?;
    let options = report_options(&config, command);
    let sink = config.logging.build_sink().map_err(|error| {
        CliError::from(Message::EventSinkFailed {
            error: &error,
        })
    })?;
    let selected = selected_suites(command);

    let stream = if command.output.is_some() { Stream::ReportFile } else { Stream::Stdout };
    let mut out: Box<dyn Write> = match &command.output {
        Some(path) => {
            let file = File::create(path).map_err(|error| {
                CliError::from(Message::ReportFileFailed {
                    path: path.as_path(),
                    error: &error,
                })
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    let mut outcome = RunOutcome {
        suites: selected.len(),
        totals: Tally::default(),
        aborted: false,
    };
    for builtin in &selected {
        let suite = builtin.build().map_err(|error| {
            CliError::from(Message::SuiteBuildFailed {
                suite: *builtin,
                error: &error,
            })
        })?;
        let mut suite = suite
            .with_source_options(config.source_options())
            .with_event_sink(Arc::clone(&sink));
        match suite.run_and_report(&mut out, &options) {
            Ok(report) => {
                outcome.totals.pass += report.totals.pass;
                outcome.totals.fail += report.totals.fail;
            }
            Err(error) => {
                outcome.aborted = true;
                write_stderr_line(&Message::SuiteAborted {
                    suite: *builtin,
                    error: &error,
                })?;
            }
        }
    }
    out.flush().map_err(|err| output_error(stream, &err))?;
    Ok(outcome)
}

/// Resolves the suites to run from flags.
fn selected_suites(command: &RunCommand) -> Vec<BuiltinSuite> {
    if command.all {
        return BuiltinSuite::ALL.to_vec();
    }
    if command.suites.is_empty() {
        return vec![BuiltinSuite::SelfCheck];
    }
    let mut selected: Vec<BuiltinSuite> = Vec::with_capacity(command.suites.len());
    for suite in command.suites.iter().copied().map(BuiltinSuite::from) {
        if !selected.contains(&suite) {
            selected.push(suite);
        }
    }
    selected
}

/// Merges config report settings with flag overrides.
fn report_options(config: &TestifyConfig, command: &RunCommand) -> ReportOptions {
    let mut options = config.report_options();
    if let Some(format) = command.format {
        options.format = format.into();
    }
    if command.no_color {
        options.color = false;
    }
    options
}

// ============================================================================
// SECTION: List Command
// ============================================================================

/// Executes `list`.
fn command_list(command: &ListCommand) -> CliResult<ExitCode> {
    if command.json {
        let entries: Vec<serde_json::Value> = BuiltinSuite::ALL
            .iter()
            .map(|suite| {
                serde_json::json!({
                    "name": suite.name(),
                    "title": suite.title(),
                    "expects_success": suite.expects_success(),
                })
            })
            .collect();
        let rendered = serde_json::to_string_pretty(&entries).map_err(|error| {
            CliError::from(Message::ListSerializeFailed {
                error: &error,
            })
        })?;
        let mut stdout = io::stdout();
        writeln!(&mut stdout, "{rendered}").map_err(|err| output_error(Stream::Stdout, &err))?;
        return Ok(ExitCode::SUCCESS);
    }
    for suite in BuiltinSuite::ALL {
        write_stdout_line(&Message::ListEntry {
            suite,
        })?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: &ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(command),
        ConfigCommand::Example => command_config_example(),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    TestifyConfig::load(command.config.as_deref()).map_err(|error| {
        CliError::from(Message::ConfigLoadFailed {
            error: &error,
        })
    })?;
    write_stdout_line(&Message::ConfigValid)?;
    Ok(ExitCode::SUCCESS)
}

/// Prints the canonical example configuration.
fn command_config_example() -> CliResult<ExitCode> {
    let mut stdout = io::stdout();
    stdout
        .write_all(config_toml_example().as_bytes())
        .map_err(|err| output_error(Stream::Stdout, &err))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Conversions
// ============================================================================

impl From<SuiteArg> for BuiltinSuite {
    fn from(value: SuiteArg) -> Self {
        match value {
            SuiteArg::SelfCheck => Self::SelfCheck,
            SuiteArg::Basic => Self::Basic,
            SuiteArg::DataBag => Self::DataBag,
        }
    }
}

impl From<FormatArg> for ReportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => Self::Text,
            FormatArg::Html => Self::Html,
        }
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a message line to stdout.
fn write_stdout_line(message: &Message<'_>) -> CliResult<()> {
    let mut stdout = io::stdout();
    writeln!(&mut stdout, "{message}").map_err(|err| output_error(Stream::Stdout, &err))
}

/// Writes a message line to stderr.
fn write_stderr_line(message: &Message<'_>) -> CliResult<()> {
    let mut stderr = io::stderr();
    writeln!(&mut stderr, "{message}").map_err(|err| output_error(Stream::Stderr, &err))
}

/// Builds the error for a failed write to `stream`.
fn output_error(stream: Stream, error: &io::Error) -> CliError {
    CliError::from(Message::WriteFailed {
        stream,
        error,
    })
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let mut stderr = io::stderr();
    let _ = writeln!(&mut stderr, "{message}");
    ExitCode::FAILURE
}
