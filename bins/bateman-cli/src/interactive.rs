//! Menu-driven session over any line reader and writer.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use bateman_core::presets::PRESETS;
use bateman_core::scenario::{CustomInput, Selection};
use bateman_core::traits::ChainEvaluator;
use bateman_core::types::{ChainMember, HalfLife};
use bateman_core::units::TimeUnit;
use tracing::{debug, info};

use crate::config::ChartConfig;
use crate::render::{self, PlotMode};
use crate::session::Session;

/// Run the menu loop until the user quits or input ends.
pub fn run<R: BufRead, W: Write>(
    mut input: R,
    mut out: W,
    evaluator: &dyn ChainEvaluator,
    chart: &ChartConfig,
    session: &mut Session,
) -> Result<()> {
    writeln!(out, "Bateman Equation Decay Simulator")?;
    writeln!(out, "Nuclear instability and radioactive equilibrium")?;

    loop {
        writeln!(out)?;
        writeln!(out, "Choose decay series:")?;
        for (i, series) in PRESETS.iter().enumerate() {
            writeln!(out, "  {}) {}", i + 1, series.name)?;
        }
        writeln!(out, "  {}) Custom", PRESETS.len() + 1)?;
        writeln!(out, "  q) Quit")?;

        let Some(choice) = ask(&mut input, &mut out, "> ")? else {
            break;
        };
        if choice.eq_ignore_ascii_case("q") {
            break;
        }
        let index = match choice.parse::<usize>() {
            Ok(n) if (1..=PRESETS.len() + 1).contains(&n) => n - 1,
            _ => {
                writeln!(out, "Unknown choice: {choice}")?;
                continue;
            }
        };

        let Some(mode) = ask_plot_mode(&mut input, &mut out)? else {
            break;
        };

        let selection = if let Some(series) = PRESETS.get(index) {
            Selection::Preset(series)
        } else {
            if !session.custom_confirmed() {
                let Some(answer) = ask(&mut input, &mut out, "Enter custom decay parameters? [y/N] ")?
                else {
                    break;
                };
                if !answer.eq_ignore_ascii_case("y") {
                    debug!("custom entry declined");
                    continue;
                }
                session.confirm_custom();
            }
            let Some(answers) = ask_custom(&mut input, &mut out)? else {
                break;
            };
            match parse_custom(&answers) {
                Ok(custom) => Selection::Custom(custom),
                Err(e) => {
                    writeln!(out, "Error: {e:#}")?;
                    continue;
                }
            }
        };

        if let Err(e) = show(&mut out, &selection, evaluator, chart, session, mode) {
            writeln!(out, "Error: {e:#}")?;
        }
    }
    Ok(())
}

/// Resolve, evaluate and chart one selection.
fn show<W: Write>(
    out: &mut W,
    selection: &Selection,
    evaluator: &dyn ChainEvaluator,
    chart: &ChartConfig,
    session: &Session,
    mode: PlotMode,
) -> Result<()> {
    let (scenario, series) = session.evaluate(selection, evaluator)?;
    info!(title = scenario.title(), points = series.len(), "evaluated chain");
    writeln!(out)?;
    out.write_all(render::chart(&scenario, &series, mode, chart).as_bytes())?;
    Ok(())
}

/// Print `question` and read one trimmed line; `None` at end of input.
fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<Option<String>> {
    write!(out, "{question}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn ask_plot_mode<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<PlotMode>> {
    loop {
        writeln!(out, "Plot type:")?;
        writeln!(out, "  1) {}", PlotMode::Parent.label())?;
        writeln!(out, "  2) {}", PlotMode::Combined.label())?;
        let Some(answer) = ask(input, out, "> [2] ")? else {
            return Ok(None);
        };
        match answer.as_str() {
            "1" => return Ok(Some(PlotMode::Parent)),
            "" | "2" => return Ok(Some(PlotMode::Combined)),
            other => writeln!(out, "Unknown plot type: {other}")?,
        }
    }
}

/// Prompt for A₀ and a value/unit pair per member; blank answers take the default.
fn ask_custom<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<Vec<String>>> {
    let defaults = CustomInput::default();
    let units = TimeUnit::ALL.map(|u| u.as_str()).join(", ");

    let mut questions = vec![(
        "Initial parent activity A₀ (relative, 0.01 to 1000)".to_string(),
        defaults.initial_activity.to_string(),
    )];
    for member in ChainMember::ALL {
        let half_life = defaults.half_lives[member.index()];
        questions.push((format!("{} half-life", member.title()), half_life.value.to_string()));
        questions.push((format!("{} unit ({units})", member.title()), half_life.unit.to_string()));
    }

    let mut answers = Vec::with_capacity(questions.len());
    for (question, default) in questions {
        let Some(answer) = ask(input, out, &format!("{question} [{default}]: "))? else {
            return Ok(None);
        };
        answers.push(if answer.is_empty() { default } else { answer });
    }
    Ok(Some(answers))
}

fn parse_custom(answers: &[String]) -> Result<CustomInput> {
    let number = |text: &str| -> Result<f64> {
        text.parse()
            .with_context(|| format!("not a number: {text:?}"))
    };

    let mut custom = CustomInput {
        initial_activity: number(&answers[0])?,
        ..CustomInput::default()
    };
    for member in ChainMember::ALL {
        let k = member.index();
        let value = number(&answers[1 + 2 * k])?;
        let unit: TimeUnit = answers[2 + 2 * k].parse()?;
        custom.half_lives[k] = HalfLife::new(value, unit);
    }
    Ok(custom)
}
