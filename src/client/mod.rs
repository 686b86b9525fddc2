use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{Config, ConfigStore, DEFAULT_API_HOST};

mod auth;
mod error;
mod projects;
mod tasks;
mod users;

pub use auth::Company;
pub use error::{ClientError, ClientResult};
pub use projects::{Board, Column, Project};
pub use tasks::{CreatedTask, Deadline, NewTask, Task};
pub use users::User;

const USER_AGENT: &str = concat!("yougile-cli/", env!("CARGO_PKG_VERSION"));

/// Client for the Yougile REST API.
///
/// Auth endpoints work without configuration. Every other call goes through a
/// transport built lazily from the [`ConfigStore`] and cached until
/// [`YougileClient::reset_handle`] is called.
pub struct YougileClient {
    store: ConfigStore,
    auth_http: Client,
    auth_host: Url,
    transport: Option<Transport>,
}

/// Authenticated session bound to one API key and host.
struct Transport {
    http: Client,
    base_url: Url,
}

impl Transport {
    fn from_config(config: &Config) -> ClientResult<Self> {
        let base_url = parse_host(&config.api_host)?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| {
                ClientError::Configuration("API key contains invalid characters".to_string())
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(ClientError::Network)?;

        tracing::debug!(base_url = %base_url, "built authenticated transport");
        Ok(Self { http, base_url })
    }
}

/// Parses an API host, falling back to the default when empty.
///
/// A trailing slash is enforced so relative endpoint paths join under it.
fn parse_host(host: &str) -> ClientResult<Url> {
    let host = host.trim();
    let host = if host.is_empty() { DEFAULT_API_HOST } else { host };
    let url = if host.ends_with('/') {
        Url::parse(host)?
    } else {
        Url::parse(&format!("{}/", host))?
    };
    Ok(url)
}

/// Envelope wrapping every list endpoint response.
#[derive(Debug, Deserialize)]
struct ListEnvelope<T> {
    content: Option<Vec<T>>,
    paging: Option<Paging>,
}

#[derive(Debug, Deserialize)]
struct Paging {
    count: Option<u64>,
    limit: Option<u64>,
    offset: Option<u64>,
    next: Option<bool>,
}

impl<T> ListEnvelope<T> {
    fn into_items(self) -> Vec<T> {
        if let Some(paging) = &self.paging {
            tracing::debug!(
                count = ?paging.count,
                limit = ?paging.limit,
                offset = ?paging.offset,
                "received page"
            );
            if paging.next == Some(true) {
                tracing::debug!("more results available; only the first page is fetched");
            }
        }
        self.content.unwrap_or_default()
    }
}

impl YougileClient {
    pub fn new(store: ConfigStore) -> ClientResult<Self> {
        Self::with_auth_host(store, DEFAULT_API_HOST)
    }

    /// Client whose auth endpoints live under `auth_host`.
    pub fn with_auth_host(store: ConfigStore, auth_host: &str) -> ClientResult<Self> {
        let auth_http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            store,
            auth_http,
            auth_host: parse_host(auth_host)?,
            transport: None,
        })
    }

    /// Drops the cached transport; the next authenticated call rebuilds it.
    pub fn reset_handle(&mut self) {
        self.transport = None;
    }

    /// Returns `false` instead of an error when the API is unreachable.
    pub async fn test_connection(&mut self) -> bool {
        match self.list_projects().await {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(error = %err, "connection test failed");
                false
            }
        }
    }

    fn transport(&mut self) -> ClientResult<&Transport> {
        let transport = match self.transport.take() {
            Some(transport) => transport,
            None => {
                let config = self
                    .store
                    .load()
                    .filter(Config::has_api_key)
                    .ok_or_else(ClientError::not_configured)?;
                Transport::from_config(&config)?
            }
        };
        Ok(self.transport.insert(transport))
    }

    fn build_request(&mut self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let transport = self.transport()?;
        let url = transport.base_url.join(path)?;
        tracing::debug!(%method, %url, "sending request");
        Ok(transport.http.request(method, url))
    }

    async fn get_list<T: DeserializeOwned>(
        &mut self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<Vec<T>> {
        let request = self.build_request(Method::GET, path)?.query(query);
        let envelope: ListEnvelope<T> = execute(request).await?;
        Ok(envelope.into_items())
    }

    async fn post_json<B, R>(&mut self, path: &str, body: &B) -> ClientResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.build_request(Method::POST, path)?.json(body);
        execute(request).await
    }

    async fn post_auth<B, R>(&self, path: &str, body: &B) -> ClientResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.auth_host.join(path)?;
        tracing::debug!(%url, "sending auth request");

        let auth_error = |err: reqwest::Error| ClientError::Auth {
            status: err.status(),
            message: err.to_string(),
        };

        let response = self
            .auth_http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(auth_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::Auth {
                status: Some(status),
                message: format!("{}: {}", status, error_text),
            });
        }

        response.json().await.map_err(auth_error)
    }
}

async fn execute<R: DeserializeOwned>(request: RequestBuilder) -> ClientResult<R> {
    let response = request.send().await.map_err(ClientError::Network)?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::Http {
            status,
            body: error_text,
        });
    }

    response.json().await.map_err(ClientError::Decode)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use httpmock::MockServer;
    use tempfile::TempDir;

    pub const TEST_KEY: &str = "test-key";
    pub const TEST_BEARER: &str = "Bearer test-key";

    /// Client whose config points at `server` with [`TEST_KEY`].
    pub fn configured_client(server: &MockServer) -> (TempDir, ConfigStore, YougileClient) {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::at(dir.path().join("config.json"));
        store
            .save(&Config::new(TEST_KEY, server.base_url()))
            .unwrap();
        let client = YougileClient::with_auth_host(store.clone(), &server.base_url()).unwrap();
        (dir, store, client)
    }

    /// Client with no config file on disk.
    pub fn unconfigured_client(server: &MockServer) -> (TempDir, YougileClient) {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::at(dir.path().join("config.json"));
        let client = YougileClient::with_auth_host(store, &server.base_url()).unwrap();
        (dir, client)
    }
}
