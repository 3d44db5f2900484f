pub mod espn;
pub mod odds_api;
pub mod types;

use crate::engine::{GameRecord, MatchupInput};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use types::ApiQuota;

/// Historical game results provider.
#[async_trait]
pub trait ScoresFeed: Send + Sync {
    /// Completed games over the trailing `days_back` days ending at `through`.
    async fn fetch_completed_games(
        &self,
        through: NaiveDate,
        days_back: u32,
    ) -> Result<Vec<GameRecord>>;
}

/// Today's matchups with their minimum alternate total lines.
#[async_trait]
pub trait LinesFeed: Send + Sync {
    async fn fetch_minimum_totals(&mut self) -> Result<Vec<MatchupInput>>;
    fn last_quota(&self) -> Option<ApiQuota>;
}
