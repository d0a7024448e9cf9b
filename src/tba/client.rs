use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::types::{
    alliances_from, rankings_from, TbaAlliance, TbaAward, TbaEvent, TbaMatch, TbaRankings,
};
use crate::provider::{EventDataProvider, EventInfo, FetchError};
use crate::scoring::{AllianceEntry, AwardEntry, MatchEntry, RankingEntry};

pub const DEFAULT_BASE_URL: &str = "https://www.thebluealliance.com/api/v3";

const AUTH_HEADER: &str = "x-tba-auth-key";

/// The Blue Alliance API v3 client
#[derive(Clone)]
pub struct TbaClient {
    http: reqwest::Client,
    base_url: String,
}

/// Create an authenticated TBA client using a read API key
pub fn create_client(api_key: &str, base_url: &str) -> Result<TbaClient> {
    let mut headers = HeaderMap::new();
    let mut key = HeaderValue::from_str(api_key).context("API key contains invalid characters")?;
    key.set_sensitive(true);
    headers.insert(AUTH_HEADER, key);

    let http = reqwest::Client::builder()
        .default_headers(headers)
        .user_agent(concat!("slff/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create TBA client")?;

    Ok(TbaClient {
        http,
        base_url: base_url.trim_end_matches('/').to_string(),
    })
}

/// Map a non-success HTTP status onto a fetch error
fn status_error(status: StatusCode, path: &str) -> Option<FetchError> {
    match status {
        status if status.is_success() => None,
        StatusCode::UNAUTHORIZED => Some(FetchError::Unauthorized),
        StatusCode::NOT_FOUND => Some(FetchError::NotFound(path.to_string())),
        status => Some(FetchError::Http(status.as_u16(), path.to_string())),
    }
}

impl TbaClient {
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if let Some(err) = status_error(response.status(), path) {
            return Err(err);
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| FetchError::Decode(path.to_string(), e.to_string()))
    }
}

impl EventDataProvider for TbaClient {
    async fn event_info(&self, event_key: &str) -> Result<EventInfo, FetchError> {
        let event: TbaEvent = self.get_json(&format!("/event/{}", event_key)).await?;
        Ok(event.into())
    }

    async fn rankings(&self, event_key: &str) -> Result<Vec<RankingEntry>, FetchError> {
        let body: Option<TbaRankings> = self
            .get_json(&format!("/event/{}/rankings", event_key))
            .await?;
        Ok(rankings_from(body))
    }

    async fn alliances(&self, event_key: &str) -> Result<Vec<AllianceEntry>, FetchError> {
        let body: Option<Vec<TbaAlliance>> = self
            .get_json(&format!("/event/{}/alliances", event_key))
            .await?;
        Ok(alliances_from(body))
    }

    async fn matches(&self, event_key: &str) -> Result<Vec<MatchEntry>, FetchError> {
        let matches: Vec<TbaMatch> = self
            .get_json(&format!("/event/{}/matches", event_key))
            .await?;
        Ok(matches.into_iter().map(MatchEntry::from).collect())
    }

    async fn awards(&self, event_key: &str) -> Result<Vec<AwardEntry>, FetchError> {
        let awards: Vec<TbaAward> = self
            .get_json(&format!("/event/{}/awards", event_key))
            .await?;
        Ok(awards.into_iter().map(AwardEntry::from).collect())
    }
}
