//! Wire types for the Umami share API.

use chrono::Utc;
use secrecy::SecretString;
use serde::Deserialize;

/// Fixed window origin used by the upstream dashboard (epoch milliseconds).
pub const STATS_START_AT_MS: i64 = 1_733_333_200_000;

// ── Share lookup ─────────────────────────────────────────────────────

/// Raw body of `/api/share/{shareId}`.
///
/// Both fields default to empty so a missing field and an empty field
/// take the same validation path in the client.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShareResponse {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub website_id: String,
}

/// Credential returned by the share endpoint.
///
/// Lives for one fetch cycle and is never persisted. The token is wrapped
/// in [`SecretString`] so it stays out of `Debug` output and logs.
#[derive(Debug, Clone)]
pub struct ShareCredential {
    token: SecretString,
    website_id: String,
}

impl ShareCredential {
    pub fn new(token: impl Into<String>, website_id: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            website_id: website_id.into(),
        }
    }

    /// The share token, sent as `x-umami-share-token` on the stats request.
    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// The website this share grants access to.
    pub fn website_id(&self) -> &str {
        &self.website_id
    }
}

// ── Stats lookup ─────────────────────────────────────────────────────

/// A single `{ "value": N }` counter object.
#[derive(Debug, Deserialize)]
pub(crate) struct Metric {
    pub value: u64,
}

/// Raw body of `/api/websites/{websiteId}/stats`.
#[derive(Debug, Deserialize)]
pub(crate) struct StatsResponse {
    pub pageviews: Option<Metric>,
    pub visits: Option<Metric>,
    pub visitors: Option<Metric>,
}

/// Parsed visitor counters, ready for display.
///
/// Each counter stays `None` until a successful fetch sets it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub pageviews: Option<u64>,
    pub visits: Option<u64>,
    pub visitors: Option<u64>,
}

impl StatsSnapshot {
    /// Convert a raw response under the both-or-neither rule: `pageviews`
    /// and `visits` only land together; `visitors` rides along when the
    /// upstream included it.
    pub(crate) fn from_response(resp: &StatsResponse) -> Self {
        match (&resp.pageviews, &resp.visits) {
            (Some(pageviews), Some(visits)) => Self {
                pageviews: Some(pageviews.value),
                visits: Some(visits.value),
                visitors: resp.visitors.as_ref().map(|m| m.value),
            },
            _ => Self::default(),
        }
    }
}

// ── Query window ─────────────────────────────────────────────────────

/// Query window for the stats endpoint.
///
/// `start_at` is pinned to [`STATS_START_AT_MS`]; `end_at` is the wall
/// clock at construction time. `compare=false` is always sent and has no
/// field here.
#[derive(Debug, Clone)]
pub struct StatsWindow {
    pub start_at: i64,
    pub end_at: i64,
    pub unit: String,
    pub timezone: String,
    pub page_url: String,
}

impl StatsWindow {
    /// Window from the fixed origin up to now, bucketed hourly.
    pub fn current(timezone: &str, page_url: &str) -> Self {
        Self {
            start_at: STATS_START_AT_MS,
            end_at: Utc::now().timestamp_millis(),
            unit: "hour".to_owned(),
            timezone: timezone.to_owned(),
            page_url: page_url.to_owned(),
        }
    }
}
