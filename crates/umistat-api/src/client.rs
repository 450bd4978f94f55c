// Hand-crafted async HTTP client for the Umami share API.
//
// Two endpoints: /api/share/{shareId} resolves a public share into a
// token + website id, and /api/websites/{websiteId}/stats returns the
// counters. The second call authenticates with the x-umami-share-token
// header obtained from the first.

use reqwest::header::{ACCEPT, CACHE_CONTROL, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types::{ShareCredential, ShareResponse, StatsResponse, StatsSnapshot, StatsWindow};

/// Async client for a Umami share.
///
/// Holds a `reqwest::Client` and the analytics endpoint base URL. All
/// requests send `Accept: application/json` and `Cache-Control: no-store`
/// so intermediaries never serve a stale counter.
pub struct ShareClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ShareClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an endpoint base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the base URL and guarantee a trailing slash so joins work.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// Join a relative path (e.g. `"api/share/abc"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/`, so joining `api/…` works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Resolve a public share identifier into a [`ShareCredential`].
    ///
    /// An empty `token` or `websiteId` in the response is rejected as
    /// [`Error::MissingCredential`].
    pub async fn get_share(&self, share_id: &str) -> Result<ShareCredential, Error> {
        let url = self.url(&format!("api/share/{share_id}"));
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;
        let share: ShareResponse = handle_response(resp).await?;

        if share.token.is_empty() {
            return Err(Error::MissingCredential { field: "token" });
        }
        if share.website_id.is_empty() {
            return Err(Error::MissingCredential { field: "websiteId" });
        }

        debug!(website_id = %share.website_id, "share credential received");
        Ok(ShareCredential::new(share.token, share.website_id))
    }

    /// Fetch the visitor counters for the credential's website.
    pub async fn get_stats(
        &self,
        credential: &ShareCredential,
        window: &StatsWindow,
    ) -> Result<StatsSnapshot, Error> {
        let url = self.url(&format!("api/websites/{}/stats", credential.website_id()));
        debug!("GET {url} window={window:?}");

        let mut token_value = HeaderValue::from_str(credential.token().expose_secret())
            .map_err(|_| Error::MissingCredential { field: "token" })?;
        token_value.set_sensitive(true);

        let resp = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-store")
            .header("x-umami-share-token", token_value)
            .query(&[
                ("startAt", window.start_at.to_string()),
                ("endAt", window.end_at.to_string()),
                ("unit", window.unit.clone()),
                ("timezone", window.timezone.clone()),
                ("url", window.page_url.clone()),
                ("compare", "false".to_owned()),
            ])
            .send()
            .await?;

        let body: StatsResponse = handle_response(resp).await?;
        let snapshot = StatsSnapshot::from_response(&body);
        debug!(?snapshot, "stats received");
        Ok(snapshot)
    }

    /// The full two-step fetch: share credential, then the counters.
    ///
    /// Strictly ordered -- the stats request never starts unless the share
    /// lookup succeeded and yielded a usable credential.
    pub async fn fetch_stats(
        &self,
        share_id: &str,
        window: &StatsWindow,
    ) -> Result<StatsSnapshot, Error> {
        let credential = self.get_share(share_id).await?;
        self.get_stats(&credential, window).await
    }
}

// ── Response handling ────────────────────────────────────────────────

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    } else {
        debug!(status = status.as_u16(), "non-success response");
        let raw = resp.text().await.unwrap_or_default();
        Err(Error::Api {
            status: status.as_u16(),
            message: if raw.is_empty() {
                status.to_string()
            } else {
                raw
            },
        })
    }
}
