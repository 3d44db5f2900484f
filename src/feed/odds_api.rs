use super::types::{ApiQuota, OddsApiEvent};
use super::LinesFeed;
use crate::config::OddsFeedConfig;
use crate::engine::MatchupInput;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;

/// Minimum alternate totals via the-odds-api.com.
///
/// Alternate totals are only served per event, so the fetch is two-step:
/// one slate call for the standard totals, then one call per event for
/// its alternate ladder. Each per-event call costs a usage credit, hence
/// the configured lookup cap.
pub struct OddsApiFeed {
    client: Client,
    api_key: String,
    base_url: String,
    sport_key: String,
    bookmakers: String,
    max_alternate_lookups: usize,
    last_quota: Option<ApiQuota>,
}

/// Parse a quota header that may be an integer or float (e.g. "14527.0").
fn parse_quota_header(headers: &reqwest::header::HeaderMap, name: &str) -> u64 {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<f64>().ok())
        .map(|v| v as u64)
        .unwrap_or(0)
}

impl OddsApiFeed {
    pub fn new(api_key: String, config: &OddsFeedConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("failed to build reqwest client");
        Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            sport_key: config.sport_key.clone(),
            bookmakers: config.bookmakers.clone(),
            max_alternate_lookups: config.max_alternate_lookups,
            last_quota: None,
        }
    }

    /// Free endpoint; validates the key and reads quota without burning credits.
    pub async fn check_quota(&mut self) -> Result<ApiQuota> {
        let url = format!("{}/sports?apiKey={}", self.base_url, self.api_key);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("failed to reach the-odds-api for quota check")?;

        let status = resp.status();
        let quota = ApiQuota {
            requests_used: parse_quota_header(resp.headers(), "x-requests-used"),
            requests_remaining: parse_quota_header(resp.headers(), "x-requests-remaining"),
        };
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("the-odds-api key validation failed ({}): {}", status, body);
        }
        self.last_quota = Some(quota.clone());
        if quota.requests_remaining == 0 {
            anyhow::bail!(
                "API quota exhausted ({} used, 0 remaining)",
                quota.requests_used
            );
        }
        Ok(quota)
    }

    async fn get_events(&mut self, markets: &str, path: &str) -> Result<Vec<OddsApiEvent>> {
        let url = format!(
            "{}{}?apiKey={}&regions=us&markets={}&bookmakers={}",
            self.base_url, path, self.api_key, markets, self.bookmakers,
        );
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("the-odds-api request failed")?;

        self.last_quota = Some(ApiQuota {
            requests_used: parse_quota_header(resp.headers(), "x-requests-used"),
            requests_remaining: parse_quota_header(resp.headers(), "x-requests-remaining"),
        });

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("the-odds-api error ({}): {}", status, body);
        }

        resp.json().await.context("failed to parse the-odds-api response")
    }

    async fn fetch_slate_totals(&mut self) -> Result<Vec<OddsApiEvent>> {
        let path = format!("/sports/{}/odds", self.sport_key);
        self.get_events("totals", &path).await
    }

    async fn fetch_event_alternates(&mut self, event_id: &str) -> Result<Option<f64>> {
        let path = format!("/sports/{}/events/{}/odds", self.sport_key, event_id);
        let url = format!(
            "{}{}?apiKey={}&regions=us&markets=alternate_totals&bookmakers={}",
            self.base_url, path, self.api_key, self.bookmakers,
        );
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("the-odds-api event request failed")?;

        self.last_quota = Some(ApiQuota {
            requests_used: parse_quota_header(resp.headers(), "x-requests-used"),
            requests_remaining: parse_quota_header(resp.headers(), "x-requests-remaining"),
        });

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("the-odds-api event error ({}): {}", status, body);
        }

        let event: OddsApiEvent = resp
            .json()
            .await
            .context("failed to parse event alternate totals")?;
        Ok(minimum_over_line(&event, "alternate_totals"))
    }
}

/// Lowest Over point offered across the event's bookmakers for a market.
pub fn minimum_over_line(event: &OddsApiEvent, market_key: &str) -> Option<f64> {
    event
        .bookmakers
        .iter()
        .flat_map(|b| &b.markets)
        .filter(|m| m.key == market_key)
        .flat_map(|m| &m.outcomes)
        .filter(|o| o.name == "Over")
        .filter_map(|o| o.point)
        .min_by(|a, b| a.total_cmp(b))
}

fn commence_date(commence_time: &str) -> Option<chrono::NaiveDate> {
    DateTime::parse_from_rfc3339(commence_time)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

#[async_trait]
impl LinesFeed for OddsApiFeed {
    async fn fetch_minimum_totals(&mut self) -> Result<Vec<MatchupInput>> {
        let events = self.fetch_slate_totals().await?;
        tracing::debug!(events = events.len(), "slate totals fetched");

        let mut matchups = Vec::with_capacity(events.len());
        let mut lookups = 0usize;
        for event in &events {
            let standard_total = minimum_over_line(event, "totals");

            let minimum_total = if lookups < self.max_alternate_lookups {
                lookups += 1;
                match self.fetch_event_alternates(&event.id).await {
                    Ok(min) => min,
                    Err(e) => {
                        tracing::warn!(event = %event.id, error = %e, "alternate totals fetch failed");
                        None
                    }
                }
            } else {
                None
            };

            let Some(date) = commence_date(&event.commence_time) else {
                tracing::warn!(event = %event.id, "unparseable commence time, skipping");
                continue;
            };

            matchups.push(MatchupInput {
                home_team: event.home_team.clone(),
                away_team: event.away_team.clone(),
                minimum_total,
                standard_total,
                date,
            });
        }

        if let Some(quota) = &self.last_quota {
            tracing::debug!(
                used = quota.requests_used,
                remaining = quota.requests_remaining,
                "odds api quota"
            );
        }
        Ok(matchups)
    }

    fn last_quota(&self) -> Option<ApiQuota> {
        self.last_quota.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENT: &str = r#"{
        "id": "abc123",
        "sport_key": "basketball_ncaab",
        "commence_time": "2026-01-20T23:00:00Z",
        "home_team": "Duke Blue Devils",
        "away_team": "Virginia Cavaliers",
        "bookmakers": [{
            "key": "draftkings",
            "markets": [{
                "key": "alternate_totals",
                "outcomes": [
                    {"name": "Over", "point": 129.5, "price": -450.0},
                    {"name": "Over", "point": 119.5, "price": -900.0},
                    {"name": "Under", "point": 119.5, "price": 600.0},
                    {"name": "Over", "point": 139.5, "price": -180.0}
                ]
            }]
        }]
    }"#;

    #[test]
    fn test_minimum_over_line_picks_lowest_over() {
        let event: OddsApiEvent = serde_json::from_str(EVENT).unwrap();
        assert_eq!(minimum_over_line(&event, "alternate_totals"), Some(119.5));
    }

    #[test]
    fn test_minimum_over_line_missing_market() {
        let event: OddsApiEvent = serde_json::from_str(EVENT).unwrap();
        assert_eq!(minimum_over_line(&event, "totals"), None);
    }

    #[test]
    fn test_commence_date() {
        assert_eq!(
            commence_date("2026-01-20T23:00:00Z"),
            chrono::NaiveDate::from_ymd_opt(2026, 1, 20)
        );
        assert_eq!(commence_date("not-a-date"), None);
    }
}
