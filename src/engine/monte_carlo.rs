use super::stats::TeamStats;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Monte Carlo estimate of the chance a game's combined score clears the
/// minimum line. A pluggable second opinion alongside the heuristic risk
/// score; it never overrides the decider.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub n_simulations: usize,
    /// Standard deviation of a single team's game total, in points.
    pub team_total_sd: f64,
    /// Fixed seed for reproducible runs; None seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            n_simulations: 10_000,
            team_total_sd: 11.0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimResult {
    /// P(combined score > minimum line), in [0, 1].
    pub clear_probability: f64,
    pub mean_total: f64,
}

/// Expected points for one side: own scoring blended with what the
/// opponent's defense allows.
fn expected_points(team: &TeamStats, opponent: &TeamStats) -> f64 {
    (team.ppg + opponent.opp_ppg) / 2.0
}

pub fn simulate(
    away: &TeamStats,
    home: &TeamStats,
    minimum_total: f64,
    config: &SimConfig,
) -> SimResult {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let away_mean = expected_points(away, home);
    let home_mean = expected_points(home, away);

    let n = config.n_simulations.max(1);
    let mut cleared = 0usize;
    let mut total_sum = 0.0;
    for _ in 0..n {
        let total = sample_normal(&mut rng, away_mean, config.team_total_sd)
            + sample_normal(&mut rng, home_mean, config.team_total_sd);
        total_sum += total;
        if total > minimum_total {
            cleared += 1;
        }
    }

    SimResult {
        clear_probability: cleared as f64 / n as f64,
        mean_total: total_sum / n as f64,
    }
}

/// Box-Muller draw from N(mean, sd).
fn sample_normal(rng: &mut ChaCha8Rng, mean: f64, sd: f64) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
    mean + sd * z
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stats::PACE_CONSTANT;

    fn team(ppg: f64, opp_ppg: f64) -> TeamStats {
        let avg_total = ppg + opp_ppg;
        TeamStats {
            team_id: "t".to_string(),
            ppg,
            opp_ppg,
            pace: avg_total * PACE_CONSTANT,
            avg_total,
            games: 20,
        }
    }

    fn seeded(n: usize) -> SimConfig {
        SimConfig {
            n_simulations: n,
            team_total_sd: 11.0,
            seed: Some(42),
        }
    }

    #[test]
    fn test_reproducible_with_seed() {
        let a = team(72.0, 68.0);
        let b = team(75.0, 70.0);
        let first = simulate(&a, &b, 130.5, &seeded(5_000));
        let second = simulate(&a, &b, 130.5, &seeded(5_000));
        assert_eq!(first, second);
    }

    #[test]
    fn test_low_line_nearly_always_clears() {
        // Expected total ~145; a 110 line should clear almost always.
        let a = team(72.0, 68.0);
        let b = team(75.0, 70.0);
        let result = simulate(&a, &b, 110.0, &seeded(10_000));
        assert!(result.clear_probability > 0.95, "{:?}", result);
    }

    #[test]
    fn test_high_line_rarely_clears() {
        let a = team(62.0, 58.0);
        let b = team(60.0, 61.0);
        let result = simulate(&a, &b, 160.0, &seeded(10_000));
        assert!(result.clear_probability < 0.05, "{:?}", result);
    }

    #[test]
    fn test_mean_total_tracks_expectations() {
        let a = team(72.0, 68.0);
        let b = team(75.0, 70.0);
        let expected = (72.0 + 70.0) / 2.0 + (75.0 + 68.0) / 2.0;
        let result = simulate(&a, &b, 130.0, &seeded(20_000));
        assert!((result.mean_total - expected).abs() < 1.0, "{:?}", result);
    }
}
