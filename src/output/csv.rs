use crate::engine::decision::Recommendation;
use crate::engine::DailyReport;
use anyhow::{Context, Result};
use std::path::Path;

/// Full-slate predictions export, one row per evaluated matchup, in
/// report order (descending risk).
pub fn export_predictions(report: &DailyReport, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    writer.write_record([
        "date",
        "away_team",
        "home_team",
        "minimum_total",
        "standard_total",
        "risk_score",
        "decision",
        "confidence_pct",
        "risk_factors",
        "error",
    ])?;

    for r in &report.results {
        let factors = r
            .factors
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        writer.write_record([
            r.matchup.date.to_string(),
            r.matchup.away_team.clone(),
            r.matchup.home_team.clone(),
            opt_num(r.matchup.minimum_total),
            opt_num(r.matchup.standard_total),
            r.risk_score.map(|s| s.to_string()).unwrap_or_default(),
            r.label().to_string(),
            r.decision
                .and_then(|d| d.confidence_pct)
                .map(|c| c.to_string())
                .unwrap_or_default(),
            factors,
            r.error.as_ref().map(|e| e.to_string()).unwrap_or_default(),
        ])?;
    }

    writer.flush().context("failed to flush predictions CSV")?;
    Ok(())
}

/// Betting sheet: YES picks only (optionally MAYBE), formatted for
/// actually placing the bets. Stake sizing: 3% YES, 2% MAYBE.
pub fn export_betting_sheet(
    report: &DailyReport,
    path: &Path,
    include_maybe: bool,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    writer.write_record([
        "matchup",
        "bet_type",
        "line",
        "risk_score",
        "confidence",
        "bet_size",
    ])?;

    for r in &report.results {
        let Some(decision) = r.decision else { continue };
        let bet_size = match decision.recommendation {
            Recommendation::Yes => "3%",
            Recommendation::Maybe if include_maybe => "2%",
            _ => continue,
        };
        let Some(line) = r.matchup.minimum_total else {
            continue;
        };
        writer.write_record([
            format!("{} @ {}", r.matchup.away_team, r.matchup.home_team),
            "OVER".to_string(),
            format!("{}", line),
            r.risk_score.map(|s| s.to_string()).unwrap_or_default(),
            decision
                .confidence_pct
                .map(|c| format!("{}%", c))
                .unwrap_or_default(),
            bet_size.to_string(),
        ])?;
    }

    writer.flush().context("failed to flush betting sheet CSV")?;
    Ok(())
}

fn opt_num(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
