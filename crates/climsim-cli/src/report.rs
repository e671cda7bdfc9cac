//! Plain-text rendering of a [`DashboardView`].
//!
//! Each section writes into any [`fmt::Write`] sink and propagates its errors.

use std::fmt::{self, Write};

use climsim_core::DashboardView;

fn rule(out: &mut impl Write, title: &str) -> fmt::Result {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(60))
}

pub fn summary(out: &mut impl Write, view: &DashboardView) -> fmt::Result {
    let s = &view.state;
    let mix = s.energy_mix.sectors();
    rule(out, &format!("Scenario {} | {}", s.scenario, s.year))?;
    writeln!(out, "  warming            {:+.2} °C", view.current_temperature)?;
    match view.current_co2 {
        Some(ppm) => writeln!(out, "  CO₂                {ppm:.0} ppm")?,
        None      => writeln!(out, "  CO₂                n/a (year off grid)")?,
    }
    writeln!(out, "  sea-level rise     {:.2} m", view.sea_level_rise_m)?;
    writeln!(
        out,
        "  energy mix         renewable {:.0}% / fossil {:.0}% / nuclear {:.0}%",
        mix.renewable, mix.fossil, mix.nuclear
    )?;
    writeln!(
        out,
        "  carbon intensity   {:.2} ({:?})",
        view.carbon_intensity.value, view.carbon_intensity.band
    )?;
    writeln!(out, "  overall risk       {:?}", view.risk_band)
}

pub fn series(out: &mut impl Write, view: &DashboardView) -> fmt::Result {
    rule(out, &format!("Projection (smoothing window {})", view.smoothed.window))?;
    writeln!(out, "  {:>6} {:>8} {:>8} {:>10} {:>10}", "year", "°C", "ppm", "°C avg", "ppm avg")?;
    for (i, p) in view.series.points().enumerate() {
        writeln!(
            out,
            "  {:>6} {:>8.2} {:>8.0} {:>10.2} {:>10.2}",
            p.year, p.temperature, p.co2, view.smoothed.temperature[i], view.smoothed.co2[i]
        )?;
    }
    Ok(())
}

pub fn map(out: &mut impl Write, view: &DashboardView) -> fmt::Result {
    rule(out, "Regional warming since 2025")?;
    for region in &view.regions {
        writeln!(out, "  {:<22} {:>5.2} °C  {:?}", region.region, region.average_value, region.band())?;
        for city in &region.members {
            writeln!(out, "    {:<20} {:>5.2} ± {:.2} °C", city.label, city.value, city.spread)?;
        }
    }
    Ok(())
}

pub fn impacts(out: &mut impl Write, view: &DashboardView) -> fmt::Result {
    let r = &view.risk_levels;
    let e = &view.economic;
    rule(out, "Risk levels")?;
    writeln!(
        out,
        "  drought {:.0}%  flooding {:.0}%  fires {:.0}%  storms {:.0}%",
        r.drought, r.flooding, r.fires, r.storms
    )?;
    rule(out, "Disaster outlook")?;
    for d in &view.disasters {
        writeln!(
            out,
            "  {:<10} probability {:>3.0}%  severity {:>3.0}%",
            format!("{:?}", d.kind), d.probability, d.severity
        )?;
    }
    rule(out, "Economic & social impact")?;
    for (label, value) in [
        ("economic growth", e.economic_growth),
        ("population affected", e.population_affected),
        ("GDP", e.gdp_impact),
        ("agricultural loss", e.agricultural_loss),
        ("water scarcity", e.water_scarcity),
        ("disaster risk", e.disaster_risk),
    ] {
        writeln!(out, "  {label:<20} {value:>3.0}%")?;
    }
    Ok(())
}
