use chrono::NaiveDate;
use std::collections::HashMap;

/// Combined-score multiplier used as a possessions proxy.
/// Must stay identical between backtesting and live scoring.
pub const PACE_CONSTANT: f64 = 0.55;

/// Fraction of the league counted as "bottom 20%" for percentile-gated
/// risk factors (stingiest defenses, slowest pace).
const PERCENTILE_CUT: f64 = 0.20;

/// One completed game as reported by the scores collaborator.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u16,
    pub away_score: u16,
}

/// Per-team descriptive statistics, fully recomputed from the current
/// set of GameRecords each run.
#[derive(Debug, Clone)]
pub struct TeamStats {
    pub team_id: String,
    /// Mean points scored per game.
    pub ppg: f64,
    /// Mean points allowed per game.
    pub opp_ppg: f64,
    /// Possessions proxy: average game total scaled by PACE_CONSTANT.
    pub pace: f64,
    /// Mean of (home score + away score) across this team's games.
    pub avg_total: f64,
    /// Sample size. Always >= 1 for a team present in the database.
    pub games: usize,
}

/// Read-only snapshot of the league for one evaluation run.
/// Keyed by lowercase team id. Teams with zero recorded games have no
/// entry; the evaluator treats them as unverified, never as an error.
pub type TeamDatabase = HashMap<String, TeamStats>;

/// Reduce a set of completed games into per-team statistics.
/// Each game contributes one sample to both participants.
pub fn build_team_database(records: &[GameRecord]) -> TeamDatabase {
    let mut samples: HashMap<String, Vec<(u16, u16)>> = HashMap::new();

    for rec in records {
        let home = rec.home_team.trim().to_lowercase();
        let away = rec.away_team.trim().to_lowercase();
        if home.is_empty() || away.is_empty() {
            continue;
        }
        samples
            .entry(home)
            .or_default()
            .push((rec.home_score, rec.away_score));
        samples
            .entry(away)
            .or_default()
            .push((rec.away_score, rec.home_score));
    }

    samples
        .into_iter()
        .map(|(team_id, games)| {
            let n = games.len() as f64;
            let scored: f64 = games.iter().map(|&(s, _)| s as f64).sum();
            let allowed: f64 = games.iter().map(|&(_, a)| a as f64).sum();
            let ppg = scored / n;
            let opp_ppg = allowed / n;
            let avg_total = ppg + opp_ppg;
            let stats = TeamStats {
                team_id: team_id.clone(),
                ppg,
                opp_ppg,
                pace: avg_total * PACE_CONSTANT,
                avg_total,
                games: games.len(),
            };
            (team_id, stats)
        })
        .collect()
}

/// League-wide percentile cutoffs computed once per run from the full
/// team database. Gates the percentile-based risk factors.
#[derive(Debug, Clone, Default)]
pub struct LeagueContext {
    /// 20th percentile of opp_ppg: teams at or below allow the fewest points.
    pub defense_cutoff: Option<f64>,
    /// 20th percentile of pace: teams at or below play the slowest.
    pub pace_cutoff: Option<f64>,
}

impl LeagueContext {
    pub fn from_database(db: &TeamDatabase) -> Self {
        let opp: Vec<f64> = db.values().map(|t| t.opp_ppg).collect();
        let pace: Vec<f64> = db.values().map(|t| t.pace).collect();
        Self {
            defense_cutoff: percentile(opp, PERCENTILE_CUT),
            pace_cutoff: percentile(pace, PERCENTILE_CUT),
        }
    }

    /// Is this team in the stingiest 20% of defenses league-wide?
    pub fn stingy_defense(&self, stats: &TeamStats) -> bool {
        self.defense_cutoff
            .map(|cut| stats.opp_ppg <= cut)
            .unwrap_or(false)
    }

    /// Is this team in the slowest 20% of the league by pace?
    pub fn slow_pace(&self, stats: &TeamStats) -> bool {
        self.pace_cutoff
            .map(|cut| stats.pace <= cut)
            .unwrap_or(false)
    }
}

/// Nearest-rank percentile over unsorted values. None for an empty league,
/// so no percentile-gated factor can trigger without data.
fn percentile(mut values: Vec<f64>, p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).expect("non-finite stat"));
    let rank = ((values.len() as f64 * p).ceil() as usize).max(1) - 1;
    Some(values[rank.min(values.len() - 1)])
}
