use anyhow::{Context, Result};
use cbb_totals::config::Config;
use cbb_totals::engine::monte_carlo::{self, SimConfig};
use cbb_totals::engine::stats::{build_team_database, LeagueContext};
use cbb_totals::engine::{names, report, DailyReport, EvaluationResult};
use cbb_totals::feed::espn::EspnScores;
use cbb_totals::feed::odds_api::OddsApiFeed;
use cbb_totals::feed::{LinesFeed, ScoresFeed};
use cbb_totals::output;
use chrono::Utc;
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> Result<()> {
    let log_file = std::fs::File::create("cbb-totals.log")?;
    tracing_subscriber::fmt()
        .with_env_filter("cbb_totals=debug")
        .with_writer(log_file)
        .init();

    let simulate = std::env::args().any(|arg| arg == "--simulate");

    let config = Config::load(Path::new("config.toml"))?;

    // Load saved keys from .env (real env vars take precedence)
    Config::load_env_file();

    println!();
    println!("  CBB Minimum Totals v0.1.0");
    println!("  =========================");
    println!();

    let odds_api_key = Config::odds_api_key()?;

    let today = Utc::now().date_naive();

    // --- Phase 1: historical scores and team stats ---
    let scores = EspnScores::new(&config.scores_feed);
    println!(
        "  Fetching {} days of completed games through {}...",
        config.season.history_days, today
    );
    let games = scores
        .fetch_completed_games(today, config.season.history_days)
        .await
        .context("historical scores fetch failed")?;
    let db = build_team_database(&games);
    let league = LeagueContext::from_database(&db);
    println!("  {} games, {} teams with stats", games.len(), db.len());

    // --- Phase 2: today's lines ---
    let mut lines = OddsApiFeed::new(odds_api_key, &config.odds_feed);
    match lines.check_quota().await {
        Ok(quota) => {
            println!(
                "  Odds API OK: {}/{} requests remaining",
                quota.requests_remaining,
                quota.requests_used + quota.requests_remaining,
            );
        }
        Err(e) => {
            eprintln!("  Odds API error: {:#}", e);
            std::process::exit(1);
        }
    }
    let matchups = lines
        .fetch_minimum_totals()
        .await
        .context("minimum totals fetch failed")?;
    println!("  {} matchups on the board", matchups.len());
    println!();

    // --- Phase 3: evaluate and report ---
    let daily = report::evaluate_slate(&matchups, &db, &league);
    print_report(&daily);

    if simulate {
        print_simulations(&daily, &db, &config_sim(&config));
    }

    // --- Phase 4: exports ---
    let out_dir = PathBuf::from(&config.output.directory);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let predictions = out_dir.join(format!("predictions_{}.csv", today));
    output::csv::export_predictions(&daily, &predictions)?;

    let sheet = out_dir.join(format!("betting_sheet_{}.csv", today));
    output::csv::export_betting_sheet(&daily, &sheet, true)?;

    let dashboard = out_dir.join(format!("dashboard_{}.html", today));
    output::dashboard::write(&daily, today, &dashboard)?;

    println!();
    println!("  Wrote {}", predictions.display());
    println!("  Wrote {}", sheet.display());
    println!("  Wrote {}", dashboard.display());

    if let Some(quota) = lines.last_quota() {
        tracing::debug!(
            used = quota.requests_used,
            remaining = quota.requests_remaining,
            "final odds api quota"
        );
    }
    Ok(())
}

fn config_sim(config: &Config) -> SimConfig {
    SimConfig {
        n_simulations: config.simulation.n_simulations,
        team_total_sd: config.simulation.team_total_sd,
        seed: config.simulation.seed,
    }
}

fn print_report(daily: &DailyReport) {
    let s = &daily.summary;
    println!("  {} matchups evaluated, {} scored", s.total, s.analyzed());
    println!(
        "  YES: {} (high {} / mid {} / low {})  MAYBE: {}  NO: {}",
        s.yes(),
        s.yes_high,
        s.yes_mid,
        s.yes_low,
        s.maybe,
        s.no,
    );
    println!(
        "  UNVERIFIED: {}  SKIP: {}  INVALID: {}",
        s.unverified, s.skip, s.invalid,
    );
    println!();

    for r in &daily.results {
        print_result(r);
    }
}

fn print_result(r: &EvaluationResult) {
    let line = r
        .matchup
        .minimum_total
        .map(|l| format!("o{}", l))
        .unwrap_or_else(|| "no line".to_string());
    let score = r
        .risk_score
        .map(|v| format!("risk {}", v))
        .unwrap_or_else(|| "unscored".to_string());
    let confidence = r
        .decision
        .and_then(|d| d.confidence_pct)
        .map(|c| format!(" ({}%)", c))
        .unwrap_or_default();

    println!(
        "  [{:>10}]{} {} @ {} | {} | {}",
        r.label(),
        confidence,
        r.matchup.away_team,
        r.matchup.home_team,
        line,
        score,
    );
    for f in &r.factors {
        if f.points > 0 {
            println!("      +{:<3} {}", f.points, f.name);
        } else {
            println!("           {}", f.name);
        }
    }
    if let Some(err) = &r.error {
        println!("           invalid input: {}", err);
    }
}

/// Second-opinion pass: Monte Carlo clear probability for every scored
/// YES or MAYBE pick. Informational only, never changes a decision.
fn print_simulations(
    daily: &DailyReport,
    db: &cbb_totals::engine::TeamDatabase,
    sim: &SimConfig,
) {
    println!();
    println!("  Monte Carlo ({} sims, sd {})", sim.n_simulations, sim.team_total_sd);
    for r in &daily.results {
        if r.risk_score.is_none() || r.label() == "NO" {
            continue;
        }
        let (Some(line), Some(away), Some(home)) = (
            r.matchup.minimum_total,
            names::resolve(db, &r.matchup.away_team),
            names::resolve(db, &r.matchup.home_team),
        ) else {
            continue;
        };
        let result = monte_carlo::simulate(away, home, line, sim);
        println!(
            "  {} @ {} o{}: clears {:.1}% of sims (mean total {:.1})",
            r.matchup.away_team,
            r.matchup.home_team,
            line,
            result.clear_probability * 100.0,
            result.mean_total,
        );
    }
}
