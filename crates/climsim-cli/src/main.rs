//! Command-line front end: derive a dashboard for one scenario selection and
//! print it as a text report or JSON.

mod report;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use climsim_core::{
    Dashboard, DashboardState, EnergyPreset, EnergySector, EnergySource, ScenarioKey,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    /// Headline numbers for the selected year.
    Summary,
    /// Yearly temperature / CO₂ table with the smoothed series.
    Series,
    /// Per-city points and regional averages.
    Map,
    /// Risk, disaster and economic cards.
    Impacts,
    /// Every section.
    All,
}

#[derive(Parser, Debug)]
#[command(name = "climsim", about = "Climate scenario dashboard calculations")]
struct Args {
    /// JSON file with a saved dashboard state; flags below override it.
    #[arg(long)]
    state: Option<PathBuf>,

    /// Scenario: optimistic, moderate or pessimistic.
    #[arg(short, long)]
    scenario: Option<ScenarioKey>,

    /// Selected year (2025-2100, 5-year steps).
    #[arg(short, long)]
    year: Option<i32>,

    /// Energy preset: renewable, mixed or fossil.
    #[arg(short, long)]
    preset: Option<EnergyPreset>,

    /// Rebalancing edit `key=percent`, applied in order. Keys are sources
    /// (solar, wind, hydro, nuclear, fossil) or the renewable sector.
    #[arg(long = "set", value_name = "KEY=PERCENT")]
    edits: Vec<String>,

    /// Trailing window for the smoothed series.
    #[arg(long)]
    window: Option<usize>,

    #[arg(long, value_enum, default_value = "summary")]
    view: View,

    /// Print the full derived view as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Log derivation details (same as RUST_LOG=debug).
    #[arg(short, long)]
    verbose: bool,
}

/// Split `key=value` into its parts.
fn parse_edit(edit: &str) -> Result<(&str, f64)> {
    let Some((key, value)) = edit.split_once('=') else {
        bail!("Edit '{edit}' must have the form key=percent");
    };
    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("Edit '{edit}' has a non-numeric percentage"))?;
    Ok((key.trim(), value))
}

fn apply_edit(state: DashboardState, edit: &str) -> Result<DashboardState> {
    let (key, value) = parse_edit(edit)?;
    let next = match key.parse::<EnergySource>() {
        Ok(source) => state.with_source(source, value)?,
        Err(_) => state.with_sector(key.parse::<EnergySector>()?, value)?,
    };
    Ok(next)
}

fn build_state(args: &Args) -> Result<DashboardState> {
    let mut state = match &args.state {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Cannot read state file {}", path.display()))?;
            DashboardState::from_json(&json)
                .with_context(|| format!("Invalid state file {}", path.display()))?
        }
        None => DashboardState::default(),
    };

    if let Some(scenario) = args.scenario {
        state = state.with_scenario(scenario);
    }
    if let Some(year) = args.year {
        state = state.with_year(year);
    }
    if let Some(preset) = args.preset {
        state = state.with_preset(preset);
    }
    if let Some(window) = args.window {
        state = state.with_smoothing_window(window);
    }
    for edit in &args.edits {
        state = apply_edit(state, edit)?;
    }
    Ok(state)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let state = build_state(&args)?;
    info!("deriving {} {} with mix {:?}", state.scenario, state.year, state.energy_mix);
    let view = Dashboard::new().derive(&state);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let sections: &[View] = match args.view {
        View::All => &[View::Summary, View::Series, View::Map, View::Impacts],
        ref one => std::slice::from_ref(one),
    };
    for section in sections {
        let mut text = String::new();
        match section {
            View::Summary => report::summary(&mut text, &view)?,
            View::Series  => report::series(&mut text, &view)?,
            View::Map     => report::map(&mut text, &view)?,
            View::Impacts => report::impacts(&mut text, &view)?,
            View::All     => unreachable!("expanded above"),
        }
        println!("{text}");
    }

    Ok(())
}
