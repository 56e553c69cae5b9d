//! bateman: three-nuclide radioactive decay chain simulator.
//!
//! Evaluates the Bateman equations for a parent, daughter and granddaughter
//! over a log-spaced time grid and renders the relative activities as a
//! terminal chart, CSV or JSON.

mod config;
mod interactive;
mod render;
mod session;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use bateman_core::presets::PRESETS;
use bateman_core::scenario::{CustomInput, Selection};
use bateman_core::types::HalfLife;
use bateman_core::units::TimeUnit;
use bateman_decay::{BatemanEngine, DegeneratePolicy};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::config::{CliConfig, LogFormat};
use crate::render::{OutputFormat, PlotMode};
use crate::session::Session;

/// Bateman equation decay chain simulator.
#[derive(Parser)]
#[command(name = "bateman")]
#[command(version, about = "Nuclear instability and radioactive equilibrium.")]
struct Cli {
    /// Path to a TOML config file (default: <config dir>/bateman/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides the config file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format. Overrides the config file.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the preset decay series.
    List,
    /// Evaluate a preset decay series.
    Run(RunArgs),
    /// Evaluate a custom three-member chain.
    Custom(CustomArgs),
    /// Menu-driven session on stdin and stdout.
    Interactive(ChartArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Preset key (e.g. ra-226) or full display name.
    series: String,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct CustomArgs {
    /// Initial parent activity A₀, relative (0.01 to 1000).
    #[arg(long, default_value_t = 1.0)]
    a0: f64,

    /// Parent half-life value.
    #[arg(long, default_value_t = 1.0)]
    parent: f64,

    /// Parent half-life unit (minutes, hours, days, years).
    #[arg(long, default_value = "minutes")]
    parent_unit: String,

    /// Daughter half-life value.
    #[arg(long, default_value_t = 0.1)]
    daughter: f64,

    /// Daughter half-life unit.
    #[arg(long, default_value = "minutes")]
    daughter_unit: String,

    /// Granddaughter half-life value.
    #[arg(long, default_value_t = 0.01)]
    granddaughter: f64,

    /// Granddaughter half-life unit.
    #[arg(long, default_value = "minutes")]
    granddaughter_unit: String,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct OutputArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Chart)]
    format: OutputFormat,

    /// Plotted members.
    #[arg(long, value_enum, default_value_t = PlotMode::Combined)]
    mode: PlotMode,

    /// Number of time grid points.
    #[arg(long)]
    grid_points: Option<usize>,

    /// Handling of coincident half-lives (limiting-form or reject).
    #[arg(long)]
    degenerate: Option<DegeneratePolicy>,

    #[command(flatten)]
    chart: ChartArgs,
}

#[derive(Args)]
struct ChartArgs {
    /// Chart width in columns.
    #[arg(long)]
    width: Option<usize>,

    /// Chart height in rows.
    #[arg(long)]
    height: Option<usize>,
}

impl ChartArgs {
    fn apply(&self, config: &mut CliConfig) {
        if let Some(width) = self.width {
            config.chart.width = width;
        }
        if let Some(height) = self.height {
            config.chart.height = height;
        }
    }
}

impl OutputArgs {
    fn apply(&self, config: &mut CliConfig) {
        self.chart.apply(config);
        if let Some(points) = self.grid_points {
            config.simulation.grid_points = points;
        }
        if let Some(policy) = self.degenerate {
            config.simulation.degenerate_policy = policy;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    init_logging(&config.log_level, config.log_format)?;

    match cli.command {
        Commands::List => list(),
        Commands::Run(args) => {
            args.output.apply(&mut config);
            run_preset(&config, &args)
        }
        Commands::Custom(args) => {
            args.output.apply(&mut config);
            run_custom(&config, &args)
        }
        Commands::Interactive(args) => {
            args.apply(&mut config);
            let engine = BatemanEngine::with_config(config.simulation.clone());
            let mut session = Session::new();
            interactive::run(
                io::stdin().lock(),
                io::stdout().lock(),
                &engine,
                &config.chart,
                &mut session,
            )
        }
    }
}

/// Print the preset table.
fn list() -> Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{:<8} {:<32} {:<10} STABLE", "KEY", "SERIES", "CLASS")?;
    for series in &PRESETS {
        writeln!(
            out,
            "{:<8} {:<32} {:<10} {}",
            series.key,
            series.name,
            series.equilibrium.as_str(),
            series.stable
        )?;
    }
    Ok(())
}

fn run_preset(config: &CliConfig, args: &RunArgs) -> Result<()> {
    let selection = Selection::preset(&args.series)?;
    evaluate(config, &selection, &Session::new(), &args.output)
}

fn run_custom(config: &CliConfig, args: &CustomArgs) -> Result<()> {
    let custom = CustomInput {
        initial_activity: args.a0,
        half_lives: [
            HalfLife::new(args.parent, parse_unit(&args.parent_unit)?),
            HalfLife::new(args.daughter, parse_unit(&args.daughter_unit)?),
            HalfLife::new(args.granddaughter, parse_unit(&args.granddaughter_unit)?),
        ],
    };
    // Passing the values on the command line counts as confirming them.
    let mut session = Session::new();
    session.confirm_custom();
    evaluate(config, &Selection::Custom(custom), &session, &args.output)
}

fn parse_unit(text: &str) -> Result<TimeUnit> {
    text.parse()
        .with_context(|| format!("invalid half-life unit {text:?}"))
}

fn evaluate(config: &CliConfig, selection: &Selection, session: &Session, output: &OutputArgs) -> Result<()> {
    let engine = BatemanEngine::with_config(config.simulation.clone());
    let (scenario, series) = session
        .evaluate(selection, &engine)
        .context("failed to evaluate decay chain")?;
    info!(
        title = scenario.title(),
        equilibrium = %scenario.equilibrium(),
        grid_points = engine.config().grid_points,
        policy = %engine.config().degenerate_policy,
        "evaluated chain"
    );
    render::render(
        io::stdout().lock(),
        output.format,
        &scenario,
        &series,
        output.mode,
        &config.chart,
    )
}

/// Filter from `RUST_LOG` when set, otherwise from the configured level.
fn log_filter(level: &str) -> Result<tracing_subscriber::EnvFilter> {
    use tracing_subscriber::EnvFilter;

    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).with_context(|| format!("invalid log level {level:?}")),
    }
}

/// Install the global subscriber. Events go to stderr; stdout carries only
/// the rendered output.
fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let layer = fmt::layer().with_writer(io::stderr).with_target(true);
    let layer = match format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
    };
    tracing_subscriber::registry()
        .with(layer)
        .with(log_filter(level)?)
        .try_init()
        .context("failed to install log subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_flags_parse() {
        let cli = Cli::try_parse_from([
            "bateman", "run", "cs-137", "--format", "csv", "--mode", "parent", "--degenerate", "reject",
            "--grid-points", "500",
        ])
        .unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.series, "cs-137");
        assert_eq!(args.output.format, OutputFormat::Csv);
        assert_eq!(args.output.mode, PlotMode::Parent);

        let mut config = CliConfig::default();
        args.output.apply(&mut config);
        assert_eq!(config.simulation.grid_points, 500);
        assert_eq!(config.simulation.degenerate_policy, DegeneratePolicy::Reject);
    }

    #[test]
    fn custom_defaults_match_custom_input() {
        let cli = Cli::try_parse_from(["bateman", "custom"]).unwrap();
        let Commands::Custom(args) = cli.command else {
            panic!("expected custom");
        };
        let defaults = CustomInput::default();
        assert_eq!(args.a0, defaults.initial_activity);
        assert_eq!(args.parent, defaults.half_lives[0].value);
        assert_eq!(args.daughter, defaults.half_lives[1].value);
        assert_eq!(args.granddaughter, defaults.half_lives[2].value);
    }

    #[test]
    fn bad_unit_is_rejected_before_evaluation() {
        assert!(parse_unit("fortnights").is_err());
        assert_eq!(parse_unit("Years").unwrap(), TimeUnit::Years);
    }

    #[test]
    fn log_level_directives_are_validated() {
        assert!(tracing_subscriber::EnvFilter::try_new("bateman_decay=debug,warn").is_ok());
        assert!(tracing_subscriber::EnvFilter::try_new("bateman=loud").is_err());
    }

    #[test]
    fn log_format_flag_parses() {
        let cli = Cli::try_parse_from(["bateman", "--log-format", "json", "list"]).unwrap();
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert!(Cli::try_parse_from(["bateman", "--log-format", "xml", "list"]).is_err());
    }

    #[test]
    fn unknown_policy_fails_to_parse() {
        assert!(Cli::try_parse_from(["bateman", "run", "ra-226", "--degenerate", "ignore"]).is_err());
    }
}
