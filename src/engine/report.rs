use super::decision::{self, DataAvailability, Decision, Recommendation, YesTier};
use super::names;
use super::risk::{self, RiskOutcome, TriggeredFactor};
use super::stats::{LeagueContext, TeamDatabase};
use chrono::NaiveDate;
use thiserror::Error;

/// One game of the day as supplied by the odds collaborator.
#[derive(Debug, Clone)]
pub struct MatchupInput {
    pub home_team: String,
    pub away_team: String,
    /// Lowest alternate over line offered, if any.
    pub minimum_total: Option<f64>,
    /// Standard total, carried through for the report only.
    pub standard_total: Option<f64>,
    pub date: NaiveDate,
}

/// The only error class that aborts a single matchup. Never aborts the
/// batch; missing teams and missing lines are not errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MatchupError {
    #[error("empty team id")]
    EmptyTeamId,
    #[error("negative minimum line: {0}")]
    NegativeLine(f64),
    #[error("non-finite minimum line")]
    NonFiniteLine,
}

/// Outcome for one matchup. Created once per run, never mutated.
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    pub matchup: MatchupInput,
    /// Present only when both teams were verified and a line existed.
    pub risk_score: Option<i32>,
    pub factors: Vec<TriggeredFactor>,
    /// None when the input was invalid.
    pub decision: Option<Decision>,
    pub unknown_teams: Vec<String>,
    pub error: Option<MatchupError>,
}

impl EvaluationResult {
    pub fn label(&self) -> &'static str {
        match (&self.error, &self.decision) {
            (Some(_), _) => "INVALID",
            (None, Some(d)) => d.recommendation.label(),
            (None, None) => "INVALID",
        }
    }
}

/// Counts per decision label for one day's slate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub yes_high: usize,
    pub yes_mid: usize,
    pub yes_low: usize,
    pub maybe: usize,
    pub no: usize,
    pub unverified: usize,
    pub skip: usize,
    pub invalid: usize,
}

impl Summary {
    pub fn yes(&self) -> usize {
        self.yes_high + self.yes_mid + self.yes_low
    }

    /// Matchups that produced a numeric risk score.
    pub fn analyzed(&self) -> usize {
        self.yes() + self.maybe + self.no
    }
}

#[derive(Debug, Clone)]
pub struct DailyReport {
    /// Ordered by descending risk score; unscored results last.
    pub results: Vec<EvaluationResult>,
    pub summary: Summary,
}

/// Evaluate every matchup of the day against the stats snapshot.
///
/// Per-matchup failures are isolated into that matchup's own result;
/// nothing here aborts the batch. An empty slate yields an empty report.
pub fn evaluate_slate(
    inputs: &[MatchupInput],
    db: &TeamDatabase,
    league: &LeagueContext,
) -> DailyReport {
    let mut results: Vec<EvaluationResult> =
        inputs.iter().map(|m| evaluate_one(m, db, league)).collect();

    // Descending score, unscored last, ties by ascending (away, home) pair.
    results.sort_by(|a, b| {
        let ka = a.risk_score.unwrap_or(i32::MIN);
        let kb = b.risk_score.unwrap_or(i32::MIN);
        kb.cmp(&ka)
            .then_with(|| a.matchup.away_team.cmp(&b.matchup.away_team))
            .then_with(|| a.matchup.home_team.cmp(&b.matchup.home_team))
    });

    let summary = summarize(&results);
    DailyReport { results, summary }
}

fn evaluate_one(
    matchup: &MatchupInput,
    db: &TeamDatabase,
    league: &LeagueContext,
) -> EvaluationResult {
    if let Err(err) = validate(matchup) {
        return EvaluationResult {
            matchup: matchup.clone(),
            risk_score: None,
            factors: Vec::new(),
            decision: None,
            unknown_teams: Vec::new(),
            error: Some(err),
        };
    }

    let Some(line) = matchup.minimum_total else {
        return EvaluationResult {
            matchup: matchup.clone(),
            risk_score: None,
            factors: vec![TriggeredFactor {
                name: "No alternate total available".to_string(),
                points: 0,
            }],
            decision: Some(decision::decide(0, DataAvailability::NoLine)),
            unknown_teams: Vec::new(),
            error: None,
        };
    };

    let away = names::resolve(db, &matchup.away_team);
    let home = names::resolve(db, &matchup.home_team);

    match risk::evaluate(
        away,
        &matchup.away_team,
        home,
        &matchup.home_team,
        league,
        line,
    ) {
        RiskOutcome::Scored { score, factors } => EvaluationResult {
            matchup: matchup.clone(),
            risk_score: Some(score),
            factors,
            decision: Some(decision::decide(score, DataAvailability::Verified)),
            unknown_teams: Vec::new(),
            error: None,
        },
        RiskOutcome::InsufficientData { unknown_teams } => EvaluationResult {
            matchup: matchup.clone(),
            risk_score: None,
            factors: unknown_teams
                .iter()
                .map(|t| TriggeredFactor {
                    name: format!("Unknown team (no data): {}", t),
                    points: 0,
                })
                .collect(),
            decision: Some(decision::decide(0, DataAvailability::Unverified)),
            unknown_teams,
            error: None,
        },
    }
}

fn validate(matchup: &MatchupInput) -> Result<(), MatchupError> {
    if matchup.home_team.trim().is_empty() || matchup.away_team.trim().is_empty() {
        return Err(MatchupError::EmptyTeamId);
    }
    if let Some(line) = matchup.minimum_total {
        if !line.is_finite() {
            return Err(MatchupError::NonFiniteLine);
        }
        if line < 0.0 {
            return Err(MatchupError::NegativeLine(line));
        }
    }
    Ok(())
}

fn summarize(results: &[EvaluationResult]) -> Summary {
    let mut summary = Summary {
        total: results.len(),
        ..Summary::default()
    };
    for r in results {
        if r.error.is_some() {
            summary.invalid += 1;
            continue;
        }
        match r.decision {
            Some(d) => match d.recommendation {
                Recommendation::Yes => match d.yes_tier {
                    Some(YesTier::High) => summary.yes_high += 1,
                    Some(YesTier::Mid) => summary.yes_mid += 1,
                    Some(YesTier::Low) | None => summary.yes_low += 1,
                },
                Recommendation::Maybe => summary.maybe += 1,
                Recommendation::No => summary.no += 1,
                Recommendation::Unverified => summary.unverified += 1,
                Recommendation::Skip => summary.skip += 1,
            },
            None => summary.invalid += 1,
        }
    }
    summary
}
