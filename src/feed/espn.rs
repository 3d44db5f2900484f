use super::types::EspnScoreboard;
use super::ScoresFeed;
use crate::config::ScoresFeedConfig;
use crate::engine::GameRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use reqwest::Client;

pub struct EspnScores {
    client: Client,
    scoreboard_url: String,
}

impl EspnScores {
    pub fn new(config: &ScoresFeedConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("failed to build reqwest client");
        Self {
            client,
            scoreboard_url: config.espn_scoreboard_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_day(&self, date: NaiveDate) -> Result<Vec<GameRecord>> {
        let url = format!("{}?dates={}", self.scoreboard_url, date.format("%Y%m%d"));
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("ESPN scoreboard request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("ESPN scoreboard error ({}): {}", status, body);
        }

        let body = resp.text().await.context("ESPN scoreboard body read failed")?;
        parse_scoreboard(&body, date)
    }
}

#[async_trait]
impl ScoresFeed for EspnScores {
    async fn fetch_completed_games(
        &self,
        through: NaiveDate,
        days_back: u32,
    ) -> Result<Vec<GameRecord>> {
        let mut records = Vec::new();
        for days_ago in 0..days_back {
            let date = through - Duration::days(days_ago as i64);
            match self.fetch_day(date).await {
                Ok(mut day) => records.append(&mut day),
                // One bad day never sinks the whole window.
                Err(e) => {
                    tracing::warn!(date = %date, error = %e, "scoreboard fetch failed, skipping day")
                }
            }
        }
        tracing::debug!(games = records.len(), days = days_back, "historical games collected");
        Ok(records)
    }
}

/// Parse one day's scoreboard JSON into completed-game records.
/// In-progress and scheduled games are dropped; zero-score finals are
/// treated as data glitches and dropped too.
pub fn parse_scoreboard(json: &str, date: NaiveDate) -> Result<Vec<GameRecord>> {
    let scoreboard: EspnScoreboard =
        serde_json::from_str(json).context("failed to parse ESPN scoreboard")?;

    let mut records = Vec::new();
    for event in scoreboard.events {
        let Some(comp) = event.competitions.first() else {
            continue;
        };
        if !comp.status.status_type.completed {
            continue;
        }

        let home = comp.competitors.iter().find(|c| c.home_away == "home");
        let away = comp.competitors.iter().find(|c| c.home_away == "away");
        let (Some(home), Some(away)) = (home, away) else {
            continue;
        };

        let (Ok(home_score), Ok(away_score)) =
            (home.score.parse::<u16>(), away.score.parse::<u16>())
        else {
            continue;
        };
        if home_score == 0 || away_score == 0 {
            continue;
        }

        records.push(GameRecord {
            date,
            home_team: home.team.display_name.clone(),
            away_team: away.team.display_name.clone(),
            home_score,
            away_score,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCOREBOARD: &str = r#"{
        "events": [
            {
                "id": "401",
                "competitions": [{
                    "competitors": [
                        {"homeAway": "home", "team": {"displayName": "Duke Blue Devils"}, "score": "78"},
                        {"homeAway": "away", "team": {"displayName": "Virginia Cavaliers"}, "score": "60"}
                    ],
                    "status": {"type": {"completed": true}}
                }]
            },
            {
                "id": "402",
                "competitions": [{
                    "competitors": [
                        {"homeAway": "home", "team": {"displayName": "Kansas Jayhawks"}, "score": "41"},
                        {"homeAway": "away", "team": {"displayName": "Baylor Bears"}, "score": "39"}
                    ],
                    "status": {"type": {"completed": false}}
                }]
            }
        ]
    }"#;

    #[test]
    fn test_parse_scoreboard_completed_only() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
        let records = parse_scoreboard(SCOREBOARD, date).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].home_team, "Duke Blue Devils");
        assert_eq!(records[0].home_score, 78);
        assert_eq!(records[0].away_score, 60);
    }

    #[test]
    fn test_parse_scoreboard_empty() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
        let records = parse_scoreboard(r#"{"events": []}"#, date).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_scoreboard_drops_zero_scores() {
        let json = r#"{
            "events": [{
                "id": "403",
                "competitions": [{
                    "competitors": [
                        {"homeAway": "home", "team": {"displayName": "A"}, "score": "0"},
                        {"homeAway": "away", "team": {"displayName": "B"}, "score": "55"}
                    ],
                    "status": {"type": {"completed": true}}
                }]
            }]
        }"#;
        let date = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
        assert!(parse_scoreboard(json, date).unwrap().is_empty());
    }
}
