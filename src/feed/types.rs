use serde::Deserialize;

/// Provider response types. Normalized internal types live in `engine`.

// ESPN scoreboard

#[derive(Debug, Deserialize)]
pub struct EspnScoreboard {
    #[serde(default)]
    pub events: Vec<EspnEvent>,
}

#[derive(Debug, Deserialize)]
pub struct EspnEvent {
    pub id: String,
    #[serde(default)]
    pub competitions: Vec<EspnCompetition>,
}

#[derive(Debug, Deserialize)]
pub struct EspnCompetition {
    #[serde(default)]
    pub competitors: Vec<EspnCompetitor>,
    pub status: EspnStatus,
}

#[derive(Debug, Deserialize)]
pub struct EspnCompetitor {
    #[serde(rename = "homeAway")]
    pub home_away: String,
    pub team: EspnTeam,
    #[serde(default)]
    pub score: String,
}

#[derive(Debug, Deserialize)]
pub struct EspnTeam {
    #[serde(rename = "displayName")]
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: EspnStatusType,
}

#[derive(Debug, Deserialize)]
pub struct EspnStatusType {
    #[serde(default)]
    pub completed: bool,
}

// the-odds-api.com v4

#[derive(Debug, Deserialize)]
pub struct OddsApiEvent {
    pub id: String,
    pub sport_key: String,
    pub commence_time: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub bookmakers: Vec<OddsApiBookmaker>,
}

#[derive(Debug, Deserialize)]
pub struct OddsApiBookmaker {
    pub key: String,
    #[serde(default)]
    pub markets: Vec<OddsApiMarket>,
}

#[derive(Debug, Deserialize)]
pub struct OddsApiMarket {
    pub key: String,
    #[serde(default)]
    pub outcomes: Vec<OddsApiOutcome>,
}

#[derive(Debug, Deserialize)]
pub struct OddsApiOutcome {
    pub name: String,
    pub point: Option<f64>,
    pub price: Option<f64>,
}

/// API usage quota info extracted from response headers.
#[derive(Debug, Clone, Default)]
pub struct ApiQuota {
    pub requests_used: u64,
    pub requests_remaining: u64,
}
