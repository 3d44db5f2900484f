use super::stats::{LeagueContext, TeamStats};

// Per-team factor weights. Tiered rules are mutually exclusive buckets:
// the most specific matching threshold wins, never summed across tiers.
const ELITE_DEFENSE_T1: i32 = 22; // opp PPG < 60
const ELITE_DEFENSE_T2: i32 = 18; // opp PPG < 65
const ELITE_DEFENSE_T3: i32 = 14; // stingiest 20% league-wide
const LOW_OFFENSE_T1: i32 = 22; // PPG < 65
const LOW_OFFENSE_T2: i32 = 12; // PPG < 70
const SLOW_PACE_T1: i32 = 12; // pace < 75
const SLOW_PACE_T2: i32 = 8; // pace < 80
const SLOW_PACE_T3: i32 = 5; // slowest 20%, but faster than 80

// Compound weights, on top of the individual flags.
const BOTH_ELITE_DEFENSE: i32 = 20;
const BOTH_LOW_OFFENSE: i32 = 15;
const BOTH_SLOW_PACE: i32 = 12;

// Line weights.
const VERY_LOW_LINE: i32 = 20; // < 120
const LOW_LINE: i32 = 15; // 120..125
const BELOW_AVG_LINE: i32 = 8; // 125..130

/// One triggered risk factor, named for the report rationale.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggeredFactor {
    pub name: String,
    pub points: i32,
}

/// Outcome of scoring one matchup. A matchup with an unverified side gets
/// an explicit insufficient-data outcome, never a partial score.
#[derive(Debug, Clone)]
pub enum RiskOutcome {
    Scored {
        score: i32,
        factors: Vec<TriggeredFactor>,
    },
    InsufficientData {
        unknown_teams: Vec<String>,
    },
}

/// Flags carried between the per-team pass and the compound pass.
#[derive(Debug, Default)]
struct TeamFlags {
    elite_defense: bool,
    low_offense: bool,
    slow_pace: bool,
}

/// Score one matchup against the fixed factor table.
///
/// Purely additive and order-independent; factor order in the output is
/// fixed (away, home, compounds, line) for stable rationale rendering.
/// `None` stats mean the team has no qualifying sample.
pub fn evaluate(
    away: Option<&TeamStats>,
    away_name: &str,
    home: Option<&TeamStats>,
    home_name: &str,
    league: &LeagueContext,
    minimum_total: f64,
) -> RiskOutcome {
    let mut unknown = Vec::new();
    if away.is_none() {
        unknown.push(away_name.to_string());
    }
    if home.is_none() {
        unknown.push(home_name.to_string());
    }
    if !unknown.is_empty() {
        return RiskOutcome::InsufficientData {
            unknown_teams: unknown,
        };
    }
    let (away, home) = (away.unwrap(), home.unwrap());

    let mut factors = Vec::new();
    let away_flags = team_factors(away_name, away, league, &mut factors);
    let home_flags = team_factors(home_name, home, league, &mut factors);

    if away_flags.elite_defense && home_flags.elite_defense {
        factors.push(TriggeredFactor {
            name: "BOTH teams elite defense".to_string(),
            points: BOTH_ELITE_DEFENSE,
        });
    }
    if away_flags.low_offense && home_flags.low_offense {
        factors.push(TriggeredFactor {
            name: "BOTH teams low offense".to_string(),
            points: BOTH_LOW_OFFENSE,
        });
    }
    if away_flags.slow_pace && home_flags.slow_pace {
        factors.push(TriggeredFactor {
            name: "BOTH teams slow pace".to_string(),
            points: BOTH_SLOW_PACE,
        });
    }

    if minimum_total < 120.0 {
        factors.push(TriggeredFactor {
            name: format!("Very low line ({})", minimum_total),
            points: VERY_LOW_LINE,
        });
    } else if minimum_total < 125.0 {
        factors.push(TriggeredFactor {
            name: format!("Low line ({})", minimum_total),
            points: LOW_LINE,
        });
    } else if minimum_total < 130.0 {
        factors.push(TriggeredFactor {
            name: format!("Below average line ({})", minimum_total),
            points: BELOW_AVG_LINE,
        });
    }

    let score = factors.iter().map(|f| f.points).sum();
    RiskOutcome::Scored { score, factors }
}

/// Evaluate the per-team factor rows for one side.
fn team_factors(
    label: &str,
    stats: &TeamStats,
    league: &LeagueContext,
    out: &mut Vec<TriggeredFactor>,
) -> TeamFlags {
    let mut flags = TeamFlags::default();

    // Elite defense: tiers 1-2 are absolute thresholds, tier 3 requires
    // membership in the league's stingiest 20%.
    let defense = if stats.opp_ppg < 60.0 {
        Some((1, ELITE_DEFENSE_T1))
    } else if stats.opp_ppg < 65.0 {
        Some((2, ELITE_DEFENSE_T2))
    } else if league.stingy_defense(stats) {
        Some((3, ELITE_DEFENSE_T3))
    } else {
        None
    };
    if let Some((tier, points)) = defense {
        flags.elite_defense = true;
        out.push(TriggeredFactor {
            name: format!(
                "{} - Elite Defense T{} ({:.1} opp PPG)",
                label, tier, stats.opp_ppg
            ),
            points,
        });
    }

    let offense = if stats.ppg < 65.0 {
        Some(LOW_OFFENSE_T1)
    } else if stats.ppg < 70.0 {
        Some(LOW_OFFENSE_T2)
    } else {
        None
    };
    if let Some(points) = offense {
        flags.low_offense = true;
        out.push(TriggeredFactor {
            name: format!("{} - Low Offense ({:.1} PPG)", label, stats.ppg),
            points,
        });
    }

    // Slow pace: gated on the slowest 20%, tier by absolute pace.
    if league.slow_pace(stats) {
        let points = if stats.pace < 75.0 {
            SLOW_PACE_T1
        } else if stats.pace < 80.0 {
            SLOW_PACE_T2
        } else {
            SLOW_PACE_T3
        };
        flags.slow_pace = true;
        out.push(TriggeredFactor {
            name: format!("{} - Slow Pace ({:.1})", label, stats.pace),
            points,
        });
    }

    if stats.avg_total < 140.0 {
        let points = (((140.0 - stats.avg_total) * 0.5) as i32).clamp(5, 10);
        out.push(TriggeredFactor {
            name: format!("{} - Low game totals (avg {:.1})", label, stats.avg_total),
            points,
        });
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stats::PACE_CONSTANT;

    fn team(id: &str, ppg: f64, opp_ppg: f64) -> TeamStats {
        let avg_total = ppg + opp_ppg;
        TeamStats {
            team_id: id.to_string(),
            ppg,
            opp_ppg,
            pace: avg_total * PACE_CONSTANT,
            avg_total,
            games: 20,
        }
    }

    /// Neutral league: no percentile-gated factor can trigger.
    fn no_league() -> LeagueContext {
        LeagueContext::default()
    }

    fn score_of(outcome: &RiskOutcome) -> i32 {
        match outcome {
            RiskOutcome::Scored { score, .. } => *score,
            RiskOutcome::InsufficientData { .. } => panic!("expected scored outcome"),
        }
    }

    #[test]
    fn test_defense_tiers_never_double_count() {
        // opp PPG 55 qualifies for both the <60 and <65 tiers; only the
        // more specific +22 applies.
        let a = team("a", 85.0, 55.0);
        let b = team("b", 82.0, 78.0);
        let outcome = evaluate(Some(&a), "a", Some(&b), "b", &no_league(), 150.0);
        match outcome {
            RiskOutcome::Scored { score, factors } => {
                let defense: Vec<_> = factors
                    .iter()
                    .filter(|f| f.name.contains("Elite Defense"))
                    .collect();
                assert_eq!(defense.len(), 1);
                assert_eq!(defense[0].points, 22);
                assert!(defense[0].name.contains("T1"));
                assert_eq!(score, 22);
            }
            _ => panic!("expected scored outcome"),
        }
    }

    #[test]
    fn test_defense_tier_two() {
        let a = team("a", 78.0, 62.0);
        let b = team("b", 82.0, 78.0);
        let outcome = evaluate(Some(&a), "a", Some(&b), "b", &no_league(), 150.0);
        assert_eq!(score_of(&outcome), 18);
    }

    #[test]
    fn test_defense_tier_boundaries() {
        // Inclusive lower bound, exclusive upper: 60.0 is T2, not T1.
        let a = team("a", 80.0, 60.0);
        let b = team("b", 82.0, 78.0);
        assert_eq!(
            score_of(&evaluate(Some(&a), "a", Some(&b), "b", &no_league(), 150.0)),
            18
        );
        let a = team("a", 75.0, 65.0);
        assert_eq!(
            score_of(&evaluate(Some(&a), "a", Some(&b), "b", &no_league(), 150.0)),
            0
        );
    }

    #[test]
    fn test_both_elite_defense_bonus_is_exactly_twenty() {
        let a = team("a", 85.0, 58.0);
        let b = team("b", 85.0, 58.0);
        let both = score_of(&evaluate(Some(&a), "a", Some(&b), "b", &no_league(), 150.0));

        // Flip one side to non-elite: the compound and that side's flag go.
        let b2 = team("b", 85.0, 78.0);
        let one = score_of(&evaluate(Some(&a), "a", Some(&b2), "b", &no_league(), 150.0));

        // 22 + 22 + 20 vs 22.
        assert_eq!(both, 64);
        assert_eq!(one, 22);
        assert_eq!(both - one - 22, BOTH_ELITE_DEFENSE);
    }

    #[test]
    fn test_line_tiers_exclusive() {
        let a = team("a", 82.0, 78.0);
        let b = team("b", 82.0, 78.0);
        assert_eq!(
            score_of(&evaluate(Some(&a), "a", Some(&b), "b", &no_league(), 118.0)),
            20
        );
        assert_eq!(
            score_of(&evaluate(Some(&a), "a", Some(&b), "b", &no_league(), 120.0)),
            15
        );
        assert_eq!(
            score_of(&evaluate(Some(&a), "a", Some(&b), "b", &no_league(), 125.0)),
            8
        );
        assert_eq!(
            score_of(&evaluate(Some(&a), "a", Some(&b), "b", &no_league(), 130.0)),
            0
        );
    }

    #[test]
    fn test_low_total_weight_clamped() {
        // avg total 139 -> (140-139)*0.5 = 0.5 -> clamped up to 5.
        let a = team("a", 70.0, 69.0);
        let b = team("b", 82.0, 78.0);
        let outcome = evaluate(Some(&a), "a", Some(&b), "b", &no_league(), 150.0);
        match outcome {
            RiskOutcome::Scored { factors, .. } => {
                let low = factors
                    .iter()
                    .find(|f| f.name.contains("Low game totals"))
                    .unwrap();
                assert_eq!(low.points, 5);
            }
            _ => panic!("expected scored outcome"),
        }

        // avg total 110 -> 15 -> clamped down to 10.
        let a = team("a", 55.0, 55.0);
        let outcome = evaluate(Some(&a), "a", Some(&b), "b", &no_league(), 150.0);
        match outcome {
            RiskOutcome::Scored { factors, .. } => {
                let low = factors
                    .iter()
                    .find(|f| f.name.contains("Low game totals"))
                    .unwrap();
                assert_eq!(low.points, 10);
            }
            _ => panic!("expected scored outcome"),
        }
    }

    #[test]
    fn test_unverified_side_yields_insufficient_data() {
        let a = team("a", 85.0, 58.0);
        let outcome = evaluate(Some(&a), "a", None, "mystery", &no_league(), 118.0);
        match outcome {
            RiskOutcome::InsufficientData { unknown_teams } => {
                assert_eq!(unknown_teams, vec!["mystery".to_string()]);
            }
            _ => panic!("expected insufficient data"),
        }
    }

    #[test]
    fn test_deterministic_for_identical_inputs() {
        let a = team("a", 62.0, 58.0);
        let b = team("b", 68.0, 63.0);
        let league = no_league();
        let first = evaluate(Some(&a), "a", Some(&b), "b", &league, 121.5);
        let second = evaluate(Some(&a), "a", Some(&b), "b", &league, 121.5);
        assert_eq!(score_of(&first), score_of(&second));
    }
}
