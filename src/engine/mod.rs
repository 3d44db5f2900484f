pub mod decision;
pub mod monte_carlo;
pub mod names;
pub mod report;
pub mod risk;
pub mod stats;

pub use report::{DailyReport, EvaluationResult, MatchupInput, Summary};
pub use stats::{GameRecord, LeagueContext, TeamDatabase, TeamStats};
