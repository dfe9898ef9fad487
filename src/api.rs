// API client module: a small blocking HTTP client for the Timeular API.
// Each call owns its request/response exchange; the client itself keeps no
// session state, so the bearer token is passed in by the caller every time.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::time_range;
use chrono::NaiveDateTime;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A time entry exactly as the API returned it. Fields are not interpreted.
pub type TimeEntry = Value;

/// Blocking client holding a reqwest client and the API base URL.
#[derive(Clone)]
pub struct TimeularClient {
    client: Client,
    base_url: Url,
}

/// API key and secret used for signing in. Only lives for the login call.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Sign-in request payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    api_key: &'a str,
    api_secret: &'a str,
}

/// Parsed sign-in response. Passed through unexamined: an error payload
/// from the server ends up here just like a successful one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SignInResponse(Map<String, Value>);

impl SignInResponse {
    /// The `token` field, if present and a string.
    pub fn token(&self) -> Option<&str> {
        self.0.get("token").and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl TimeularClient {
    /// Create a client talking to `base_url` (for example
    /// [`time_range::DEFAULT_BASE_URL`]).
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim_end_matches('/');
        let base_url = Url::parse(trimmed)
            .map_err(|e| Error::Config(format!("invalid base URL {:?}: {}", trimmed, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("base URL {} cannot carry a path", base_url)));
        }

        let client = Client::builder().build()?;
        Ok(TimeularClient { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Exchange credentials for an access token.
    ///
    /// The response body is parsed as a JSON object and returned whatever the
    /// HTTP status was. A body that is not a JSON object yields
    /// [`Error::MalformedResponse`]; transport failures yield
    /// [`Error::Transport`].
    pub fn login(&self, credentials: &Credentials) -> Result<SignInResponse> {
        let url = self.endpoint(&["developer", "sign-in"])?;
        let payload = SignInRequest {
            api_key: credentials.api_key(),
            api_secret: credentials.api_secret(),
        };

        log::info!("Sending login request to {}", url);
        log::debug!("Payload: {}", redacted_sign_in_payload());
        log::debug!("Headers: {{\"Content-Type\": \"application/json\"}}");

        // `.json` sets `Content-Type: application/json`.
        let res = self.client.post(url).json(&payload).send()?;
        log::info!("Received response {}", res.status());

        let text = res.text()?;
        log::debug!("Response text: {}", text);

        Ok(serde_json::from_str(&text)?)
    }

    /// Invalidate `token`. Returns the raw response text verbatim; a non-2xx
    /// status is not treated as an error.
    pub fn logout(&self, token: &str) -> Result<String> {
        log::info!("Logging out of the Timeular API");
        let url = self.endpoint(&["developer", "api-access"])?;

        let res = self
            .client
            .post(url)
            .headers(auth_headers(token)?)
            .body(String::new())
            .send()?;
        log::debug!("Logout response: {}", res.status());

        Ok(res.text()?)
    }

    /// Fetch a single time entry by its identifier.
    ///
    /// The ID is sent as one percent-encoded path segment, so `/`, `?` or
    /// `#` inside it cannot reach another endpoint. Empty, `.` and `..`
    /// are rejected with [`Error::InvalidEntryId`] before any request.
    pub fn get_entry_by_id(&self, id: &str, token: &str) -> Result<TimeEntry> {
        if matches!(id, "" | "." | "..") {
            return Err(Error::InvalidEntryId(id.to_string()));
        }
        let url = self.endpoint(&["time-entries", id])?;
        let data = self.get_json(url, token)?;
        log::info!("Retrieved time entry with ID '{}'", id);
        Ok(data)
    }

    /// Fetch the entries between two local timestamps in `timezone`.
    ///
    /// Timezone and DST problems are reported before any request is made.
    /// The body is expected to be a JSON array but is returned as parsed.
    pub fn get_entry_by_timestamp(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        token: &str,
        timezone: &str,
    ) -> Result<TimeEntry> {
        log::info!(
            "Retrieving time entries between {} and {} in timezone {}",
            start,
            end,
            timezone
        );
        let url = time_range::entry_by_timestamp_url(self.base_url.as_str(), start, end, timezone)?;
        let url = Url::parse(&url)
            .map_err(|e| Error::Config(format!("invalid time range URL {:?}: {}", url, e)))?;
        let data = self.get_json(url.clone(), token)?;
        match data.as_array() {
            Some(entries) => log::info!("Retrieved {} time entries", entries.len()),
            None => log::warn!("Expected a list of time entries from {}", url),
        }
        Ok(data)
    }

    /// Base URL with `segments` appended, each one percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("base URL {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `url` with bearer auth, fail on non-2xx, parse the body as JSON.
    fn get_json(&self, url: Url, token: &str) -> Result<Value> {
        let headers = auth_headers(token)?;
        // Status is checked before the body is touched, so a 404 page is a
        // transport error and never reaches the JSON parser.
        let res = self
            .client
            .get(url.clone())
            .headers(headers)
            .send()
            .and_then(Response::error_for_status)
            .map_err(|e| {
                log::error!("An error occurred while making the request to {}: {}", url, e);
                Error::Transport(e)
            })?;

        // Read the text first so a bad body is a MalformedResponse, not a
        // reqwest decode error that looks like a network failure.
        let text = res.text()?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Build the `Authorization: Bearer {token}` header map.
fn auth_headers(token: &str) -> Result<HeaderMap> {
    let mut value =
        HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| Error::InvalidToken)?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// What gets written to the debug log in place of the real sign-in body.
fn redacted_sign_in_payload() -> String {
    serde_json::json!({ "apiKey": "<redacted>", "apiSecret": "<redacted>" }).to_string()
}
