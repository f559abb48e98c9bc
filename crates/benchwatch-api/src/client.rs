// Workbench API HTTP client
//
// Wraps `reqwest::Client` with workbench-specific URL construction and
// envelope unwrapping. Endpoint modules (devices, inventories, simulator)
// are implemented as inherent methods via separate files to keep this
// module focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::Envelope;
use crate::transport::TransportConfig;

/// Raw HTTP client for the workbench server API.
///
/// Handles the `{ "acknowledge": bool, ... }` envelope. All methods return
/// unwrapped payloads; an unacknowledged response surfaces as
/// `Error::Unacknowledged` before the caller sees any data.
pub struct WorkbenchClient {
    http: reqwest::Client,
    base_url: Url,
}

impl WorkbenchClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` should be the server root (e.g. `http://192.168.2.2:8090`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an endpoint path relative to the server root.
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the acknowledge envelope.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        endpoint: &'static str,
    ) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        Self::parse_envelope(resp, endpoint).await
    }

    /// Send a form-encoded POST request and unwrap the acknowledge envelope.
    pub(crate) async fn post_form<T: DeserializeOwned>(
        &self,
        url: Url,
        form: &impl Serialize,
        endpoint: &'static str,
    ) -> Result<T, Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_envelope(resp, endpoint).await
    }

    /// Send a form-encoded POST request judged by HTTP status alone.
    ///
    /// For endpoints whose body is uninformative; callers branch on
    /// success or failure, never on the envelope.
    pub(crate) async fn post_form_status(
        &self,
        url: Url,
        form: &impl Serialize,
        endpoint: &'static str,
    ) -> Result<(), Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Status {
                status: status.as_u16(),
                endpoint,
            })
        }
    }

    /// Parse the acknowledge envelope, returning the payload on success
    /// or `Error::Unacknowledged` when the server answered without the
    /// flag set.
    async fn parse_envelope<T: DeserializeOwned>(
        resp: reqwest::Response,
        endpoint: &'static str,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                endpoint,
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        if envelope.acknowledge {
            Ok(envelope.payload)
        } else {
            Err(Error::Unacknowledged { endpoint })
        }
    }
}
