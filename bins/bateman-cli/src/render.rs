//! Output renderers: semi-log terminal chart, CSV, JSON.

use std::io::Write;

use anyhow::Result;
use bateman_core::scenario::Scenario;
use bateman_core::types::{ActivityTimeSeries, ChainMember, EquilibriumClass};
use clap::ValueEnum;
use serde::Serialize;

use crate::config::ChartConfig;

/// Chart markers, indexed by chain position.
const MARKERS: [char; 3] = ['*', 'o', '+'];
/// Decades shown below the highest plotted activity.
const MAX_DECADES: f64 = 12.0;
const AXIS_LABEL_WIDTH: usize = 9;
const MIN_WIDTH: usize = 16;
const MIN_HEIGHT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Semi-log text chart.
    #[default]
    Chart,
    /// One row per grid point.
    Csv,
    /// Scenario metadata plus the full series.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlotMode {
    /// Parent activity only.
    Parent,
    /// Parent, daughter and granddaughter.
    #[default]
    Combined,
}

impl PlotMode {
    pub fn members(&self) -> &'static [ChainMember] {
        match self {
            PlotMode::Parent => &ChainMember::ALL[..1],
            PlotMode::Combined => &ChainMember::ALL,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlotMode::Parent => "Parent only",
            PlotMode::Combined => "Combined (Parent + Daughter + Granddaughter)",
        }
    }
}

/// Write `series` to `out` in the requested format.
pub fn render<W: Write>(
    mut out: W,
    format: OutputFormat,
    scenario: &Scenario,
    series: &ActivityTimeSeries,
    mode: PlotMode,
    chart_config: &ChartConfig,
) -> Result<()> {
    match format {
        OutputFormat::Chart => out.write_all(chart(scenario, series, mode, chart_config).as_bytes())?,
        OutputFormat::Csv => write_csv(&mut out, series, mode)?,
        OutputFormat::Json => {
            write_json(&mut out, scenario, series, mode)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Semi-log chart: linear time on x, log10 relative activity on y.
pub fn chart(
    scenario: &Scenario,
    series: &ActivityTimeSeries,
    mode: PlotMode,
    config: &ChartConfig,
) -> String {
    let width = config.width.max(MIN_WIDTH);
    let height = config.height.max(MIN_HEIGHT);
    let members = mode.members();

    let mut lines = vec![scenario.chart_title(), String::new()];

    let (lo, hi) = members
        .iter()
        .flat_map(|m| series.activity(*m))
        .filter(|a| a.is_finite() && **a > 0.0)
        .map(|a| a.log10())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if series.is_empty() || !hi.is_finite() {
        lines.push("(no positive activity to plot)".to_string());
    } else {
        let top = hi.ceil();
        let bottom = lo.floor().max(top - MAX_DECADES).min(top - 1.0);
        let times = series.times();
        let (start, end) = (times[0], times[times.len() - 1]);

        let mut canvas = vec![vec![' '; width]; height];
        for col in 0..width {
            let t = start + (end - start) * (col as f64 + 0.5) / width as f64;
            let i = nearest_index(times, t);
            for member in members {
                let a = series.activity(*member)[i];
                if !(a.is_finite() && a > 0.0) || a.log10() < bottom {
                    continue;
                }
                let frac = (top - a.log10()) / (top - bottom);
                let row = ((frac * (height - 1) as f64).round() as usize).min(height - 1);
                canvas[row][col] = MARKERS[member.index()];
            }
        }

        for (r, row) in canvas.iter().enumerate() {
            let label = if r == 0 || r == height - 1 || r == height / 2 {
                let exponent = top - (top - bottom) * r as f64 / (height - 1) as f64;
                format!("{:.0e}", 10f64.powf(exponent))
            } else {
                String::new()
            };
            lines.push(format!(
                "{label:>w$} |{}",
                row.iter().collect::<String>(),
                w = AXIS_LABEL_WIDTH
            ));
        }
        lines.push(format!("{:>w$} +{}", "", "-".repeat(width), w = AXIS_LABEL_WIDTH));
        let left = format!("{start:.1e}");
        let right = format!("{end:.3e}");
        lines.push(format!(
            "{:>w$}  {left}{right:>pad$}",
            "",
            w = AXIS_LABEL_WIDTH,
            pad = width.saturating_sub(left.len())
        ));
        lines.push(format!(
            "{:>w$}  Time (days) vs Relative Activity (A / A₀), log scale",
            "",
            w = AXIS_LABEL_WIDTH
        ));
    }

    lines.push(String::new());
    for member in members {
        lines.push(format!("  {} {}", MARKERS[member.index()], scenario.label(*member)));
    }
    if mode == PlotMode::Combined {
        if let Some((i, peak)) = series.peak(ChainMember::Daughter) {
            lines.push(format!(
                "  Daughter peak {peak:.4} at t = {:.4e} days",
                series.times()[i]
            ));
        }
    }
    lines.push(scenario.caption());
    lines.push(String::new());
    lines.join("\n")
}

/// Index of the grid point closest to `t`.
fn nearest_index(times: &[f64], t: f64) -> usize {
    let i = times.partition_point(|&x| x < t);
    if i == 0 {
        0
    } else if i == times.len() {
        times.len() - 1
    } else if t - times[i - 1] <= times[i] - t {
        i - 1
    } else {
        i
    }
}

/// `time_days` plus one column per plotted member.
pub fn write_csv<W: Write>(out: W, series: &ActivityTimeSeries, mode: PlotMode) -> Result<(), csv::Error> {
    let members = mode.members();
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["time_days".to_string()];
    header.extend(members.iter().map(ToString::to_string));
    writer.write_record(&header)?;

    for (i, t) in series.times().iter().enumerate() {
        let mut record = Vec::with_capacity(members.len() + 1);
        record.push(t.to_string());
        record.extend(members.iter().map(|m| series.activity(*m)[i].to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct Report<'a> {
    title: &'a str,
    chart_title: String,
    equilibrium: EquilibriumClass,
    stable: &'a str,
    labels: Vec<&'a str>,
    plot_mode: PlotMode,
    series: &'a ActivityTimeSeries,
}

/// Scenario metadata and the full series as pretty-printed JSON.
pub fn write_json<W: Write>(
    out: W,
    scenario: &Scenario,
    series: &ActivityTimeSeries,
    mode: PlotMode,
) -> serde_json::Result<()> {
    let report = Report {
        title: scenario.title(),
        chart_title: scenario.chart_title(),
        equilibrium: scenario.equilibrium(),
        stable: scenario.stable(),
        labels: ChainMember::ALL.iter().map(|m| scenario.label(*m)).collect(),
        plot_mode: mode,
        series,
    };
    serde_json::to_writer_pretty(out, &report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bateman_core::presets::find_preset;
    use bateman_core::traits::ChainEvaluator;
    use bateman_decay::{BatemanEngine, SimulationConfig};

    fn ra226() -> (Scenario, ActivityTimeSeries) {
        let engine = BatemanEngine::with_config(SimulationConfig {
            grid_points: 200,
            ..SimulationConfig::default()
        });
        let scenario = Scenario::from_preset(find_preset("ra-226").unwrap()).unwrap();
        let series = engine.evaluate(scenario.parameters()).unwrap();
        (scenario, series)
    }

    #[test]
    fn nearest_index_picks_closest() {
        let times = [1.0, 2.0, 4.0];
        assert_eq!(nearest_index(&times, 0.0), 0);
        assert_eq!(nearest_index(&times, 1.4), 0);
        assert_eq!(nearest_index(&times, 1.6), 1);
        assert_eq!(nearest_index(&times, 3.5), 2);
        assert_eq!(nearest_index(&times, 9.0), 2);
    }

    #[test]
    fn chart_has_title_legend_and_caption() {
        let (scenario, series) = ra226();
        let text = chart(&scenario, &series, PlotMode::Combined, &ChartConfig::default());
        assert!(text.starts_with("Example 1: Ra-226 (Secular) — Secular Equilibrium"));
        assert!(text.contains("* Ra-226 (T½=1600 years)"));
        assert!(text.contains("o Rn-222 (T½=3.8 days)"));
        assert!(text.contains("+ Po-218 (T½=3.1 minutes)"));
        assert!(text.contains("Daughter peak"));
        assert!(text.contains("Stable end product: Pb-206"));
    }

    #[test]
    fn chart_rows_match_height() {
        let (scenario, series) = ra226();
        let config = ChartConfig { width: 40, height: 10 };
        let text = chart(&scenario, &series, PlotMode::Combined, &config);
        let plot_rows = text.lines().filter(|l| l.contains(" |")).count();
        assert_eq!(plot_rows, 10);
        assert!(text.lines().all(|l| l.chars().count() <= 40 + AXIS_LABEL_WIDTH + 40));
    }

    #[test]
    fn parent_mode_plots_only_parent() {
        let (scenario, series) = ra226();
        let text = chart(&scenario, &series, PlotMode::Parent, &ChartConfig::default());
        assert!(text.contains("* Ra-226"));
        assert!(!text.contains("Rn-222"));
        assert!(!text.contains("Daughter peak"));
        let plot: String = text.lines().filter(|l| l.contains(" |")).collect();
        assert!(!plot.contains('o') && !plot.contains('+'));
    }

    #[test]
    fn csv_has_header_and_one_row_per_point() {
        let (_, series) = ra226();
        let mut buf = Vec::new();
        write_csv(&mut buf, &series, PlotMode::Combined).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("time_days,parent,daughter,granddaughter"));
        assert_eq!(lines.count(), series.len());
    }

    #[test]
    fn csv_parent_mode_has_two_columns() {
        let (_, series) = ra226();
        let mut buf = Vec::new();
        write_csv(&mut buf, &series, PlotMode::Parent).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().next(), Some("time_days,parent"));
        let first: Vec<&str> = text.lines().nth(1).unwrap().split(',').collect();
        assert_eq!(first.len(), 2);
        assert_eq!(first[1].parse::<f64>().unwrap(), 1.0);
    }

    #[test]
    fn json_report_carries_metadata() {
        let (scenario, series) = ra226();
        let mut buf = Vec::new();
        write_json(&mut buf, &scenario, &series, PlotMode::Combined).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["title"], "Example 1: Ra-226 (Secular)");
        assert_eq!(value["equilibrium"], "Secular");
        assert_eq!(value["stable"], "Pb-206");
        assert_eq!(value["plot_mode"], "combined");
        assert_eq!(value["labels"].as_array().unwrap().len(), 3);
        assert_eq!(value["series"]["times"].as_array().unwrap().len(), series.len());
    }

    #[test]
    fn render_dispatches_on_format() {
        let (scenario, series) = ra226();
        let config = ChartConfig::default();
        for (format, needle) in [
            (OutputFormat::Chart, "Stable end product"),
            (OutputFormat::Csv, "time_days"),
            (OutputFormat::Json, "\"chart_title\""),
        ] {
            let mut buf = Vec::new();
            render(&mut buf, format, &scenario, &series, PlotMode::Combined, &config).unwrap();
            assert!(String::from_utf8(buf).unwrap().contains(needle), "{format:?}");
        }
    }
}
