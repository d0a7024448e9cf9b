use std::fmt;

use crate::scoring::{AllianceEntry, AwardEntry, EventFacts, MatchEntry, RankingEntry};

/// Event metadata needed to classify an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInfo {
    pub key: String,
    pub name: String,
    pub event_type: i32,
}

#[derive(Debug)]
pub enum FetchError {
    /// The API key was rejected
    Unauthorized,
    /// The resource does not exist (usually a bad event key)
    NotFound(String),
    /// Any other non-success HTTP status
    Http(u16, String),
    /// The request never completed
    Network(String),
    /// The response body could not be decoded
    Decode(String, String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Unauthorized => {
                write!(f, "Authentication failed. Your TBA API key may be invalid.")
            }
            FetchError::NotFound(resource) => write!(f, "Not found: {}", resource),
            FetchError::Http(status, resource) => {
                write!(f, "HTTP {} while fetching {}", status, resource)
            }
            FetchError::Network(msg) => write!(f, "Network error: {}", msg),
            FetchError::Decode(resource, msg) => {
                write!(f, "Failed to decode {}: {}", resource, msg)
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// Source of raw event facts.
///
/// Every call returns fully materialized data; any error is fatal to the
/// scoring pass that made it.
#[allow(async_fn_in_trait)]
pub trait EventDataProvider {
    async fn event_info(&self, event_key: &str) -> Result<EventInfo, FetchError>;
    async fn rankings(&self, event_key: &str) -> Result<Vec<RankingEntry>, FetchError>;
    async fn alliances(&self, event_key: &str) -> Result<Vec<AllianceEntry>, FetchError>;
    async fn matches(&self, event_key: &str) -> Result<Vec<MatchEntry>, FetchError>;
    async fn awards(&self, event_key: &str) -> Result<Vec<AwardEntry>, FetchError>;
}

/// Everything fetched for one event
#[derive(Debug, Clone)]
pub struct EventData {
    pub info: EventInfo,
    pub facts: EventFacts,
}

/// Fetch all five resources for an event concurrently
pub async fn fetch_event_data<P: EventDataProvider>(
    provider: &P,
    event_key: &str,
) -> Result<EventData, FetchError> {
    let (info, rankings, alliances, matches, awards) = tokio::try_join!(
        provider.event_info(event_key),
        provider.rankings(event_key),
        provider.alliances(event_key),
        provider.matches(event_key),
        provider.awards(event_key),
    )?;

    Ok(EventData {
        info,
        facts: EventFacts {
            rankings,
            awards,
            matches,
            alliances,
        },
    })
}
