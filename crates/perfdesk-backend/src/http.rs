//! HTTP backend implementation using `reqwest`.

use std::time::Duration;

use perfdesk_identity::{
    Credentials, EmployeePage, ErrorBody, GoogleGrant, Identity, RegisterReply,
    Registration, TokenGrant,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{AuthBackend, BackendError, RosterBackend, RosterQuery};

/// Body of the Google sign-in call: the credential from Google Identity
/// Services, sent under the key `token`.
#[derive(Serialize)]
struct GoogleBody<'a> {
    token: &'a str,
}

/// An [`AuthBackend`] + [`RosterBackend`] that speaks JSON over HTTP.
///
/// Cloning is cheap: `reqwest::Client` is reference-counted internally.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Creates a backend rooted at `base_url` (e.g.
    /// `http://localhost:5000/api`) with the given per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(BackendError::Request)?;
        Ok(Self::with_client(client, base_url))
    }

    /// Wraps an already-configured `reqwest::Client`.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The base URL every endpoint path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> Result<T, BackendError> {
        tracing::debug!(path, "backend request");
        let response = request.send().await.map_err(|e| {
            tracing::debug!(path, error = %e, "backend unreachable");
            BackendError::Request(e)
        })?;
        read_json(response, path).await
    }
}

/// Turns a response into `T`, or into `BackendError::Rejected` carrying the
/// backend's error message for non-2xx statuses.
async fn read_json<T: DeserializeOwned>(
    response: Response,
    path: &str,
) -> Result<T, BackendError> {
    let status = response.status();
    if !status.is_success() {
        // The error payload is best effort: an HTML 502 page from a proxy
        // has no `message`, so fall back to the status text.
        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        let message = body.message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        tracing::debug!(path, status = status.as_u16(), %message, "backend rejected request");
        return Err(BackendError::Rejected {
            status: status.as_u16(),
            message,
        });
    }
    response.json::<T>().await.map_err(BackendError::Decode)
}

impl AuthBackend for HttpBackend {
    async fn login(&self, creds: &Credentials) -> Result<TokenGrant, BackendError> {
        let path = "/users/login";
        self.send(self.client.post(self.url(path)).json(creds), path)
            .await
    }

    async fn register(
        &self,
        reg: &Registration,
    ) -> Result<RegisterReply, BackendError> {
        let path = "/users/register";
        self.send(self.client.post(self.url(path)).json(reg), path)
            .await
    }

    async fn profile(&self, token: &str) -> Result<Identity, BackendError> {
        let path = "/users/profile";
        self.send(self.client.get(self.url(path)).bearer_auth(token), path)
            .await
    }

    async fn google(&self, credential: &str) -> Result<GoogleGrant, BackendError> {
        let path = "/users/auth/google";
        let body = GoogleBody { token: credential };
        self.send(self.client.post(self.url(path)).json(&body), path)
            .await
    }
}

impl RosterBackend for HttpBackend {
    async fn employees(
        &self,
        token: &str,
        query: &RosterQuery,
    ) -> Result<EmployeePage, BackendError> {
        let path = "/emp/get";
        let mut params = vec![
            ("page", query.page.to_string()),
            ("perPage", query.per_page.to_string()),
        ];
        if let Some(manager) = &query.manager_id {
            params.push(("managerId", manager.to_string()));
        }
        let request = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .query(&params);
        self.send(request, path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let backend = HttpBackend::with_client(Client::new(), "http://api.local/v1/");
        assert_eq!(backend.url("/users/login"), "http://api.local/v1/users/login");
        assert_eq!(backend.url("emp/get"), "http://api.local/v1/emp/get");
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let backend = HttpBackend::with_client(Client::new(), "http://api.local///");
        assert_eq!(backend.base_url(), "http://api.local");
    }
}
