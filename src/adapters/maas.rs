// Copyright (c) 2025 - Cowboy AI, Inc.

//! MAAS REST API Adapter
//!
//! Implements [`MaasApi`] over the MAAS 2.0 HTTP API.
//!
//! ```text
//! resolve_machine   = GET    /api/2.0/machines/
//! list_interfaces   = GET    /api/2.0/nodes/{system_id}/interfaces/
//! get_interface     = GET    /api/2.0/nodes/{system_id}/interfaces/{id}/
//! create_bridge     = POST   /api/2.0/nodes/{system_id}/interfaces/?op=create_bridge
//! update_interface  = PUT    /api/2.0/nodes/{system_id}/interfaces/{id}/
//! delete_interface  = DELETE /api/2.0/nodes/{system_id}/interfaces/{id}/
//! ```
//!
//! # Authentication
//!
//! MAAS API keys have the form `consumer_key:token_key:token_secret` and are
//! sent as an OAuth 1.0 PLAINTEXT `Authorization` header. Every request gets
//! a fresh nonce and timestamp.
//!
//! # Example
//!
//! ```rust,no_run
//! use maas_bridge::adapters::{MaasClient, MaasConfig};
//! use maas_bridge::api::MaasApi;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MaasConfig {
//!         base_url: "http://maas.example.com:5240/MAAS".to_string(),
//!         api_key: "consumer:token:secret".to_string(),
//!         ..Default::default()
//!     };
//!
//!     let client = MaasClient::new(config)?;
//!     let machine = client.resolve_machine("node1").await?;
//!     let interfaces = client.list_interfaces(&machine.system_id).await?;
//!     println!("{} interfaces", interfaces.len());
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::api::MaasApi;
use crate::domain::{BridgeParams, Machine, NetworkInterface};
use crate::errors::{BridgeError, BridgeResult};

/// Configuration for the MAAS connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaasConfig {
    /// MAAS base URL (e.g., "http://maas.example.com:5240/MAAS")
    pub base_url: String,

    /// API key, `consumer_key:token_key:token_secret`
    pub api_key: String,

    /// API version segment of the URL
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_version() -> String {
    "2.0".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for MaasConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5240/MAAS".to_string(),
            api_key: String::new(),
            api_version: default_api_version(),
            timeout_secs: default_timeout(),
        }
    }
}

impl MaasConfig {
    /// Load configuration from `MAAS_URL`, `MAAS_API_KEY`,
    /// `MAAS_API_VERSION`, and `MAAS_TIMEOUT_SECS`
    pub fn from_env() -> BridgeResult<Self> {
        let defaults = Self::default();

        let api_key = std::env::var("MAAS_API_KEY")
            .map_err(|_| BridgeError::Configuration("MAAS_API_KEY not set".to_string()))?;

        let timeout_secs = match std::env::var("MAAS_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                BridgeError::Configuration(format!("MAAS_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            Err(_) => defaults.timeout_secs,
        };

        Ok(Self {
            base_url: std::env::var("MAAS_URL").unwrap_or(defaults.base_url),
            api_key,
            api_version: std::env::var("MAAS_API_VERSION").unwrap_or(defaults.api_version),
            timeout_secs,
        })
    }
}

/// The three parts of a MAAS API key
#[derive(Clone)]
struct Credentials {
    consumer_key: String,
    token_key: String,
    token_secret: String,
}

impl Credentials {
    fn parse(api_key: &str) -> BridgeResult<Self> {
        let parts: Vec<&str> = api_key.split(':').collect();
        match parts.as_slice() {
            [consumer_key, token_key, token_secret]
                if !consumer_key.is_empty() && !token_key.is_empty() =>
            {
                Ok(Self {
                    consumer_key: consumer_key.to_string(),
                    token_key: token_key.to_string(),
                    token_secret: token_secret.to_string(),
                })
            }
            _ => Err(BridgeError::Configuration(
                "API key must be consumer_key:token_key:token_secret".to_string(),
            )),
        }
    }

    fn authorization(&self) -> String {
        let nonce = Uuid::new_v4().simple().to_string();
        let timestamp = chrono::Utc::now().timestamp();
        format!(
            "OAuth oauth_version=\"1.0\", oauth_signature_method=\"PLAINTEXT\", \
             oauth_consumer_key=\"{}\", oauth_token=\"{}\", oauth_signature=\"&{}\", \
             oauth_nonce=\"{}\", oauth_timestamp=\"{}\"",
            urlencoding::encode(&self.consumer_key),
            urlencoding::encode(&self.token_key),
            urlencoding::encode(&self.token_secret),
            nonce,
            timestamp
        )
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("token_key", &self.token_key)
            .finish_non_exhaustive()
    }
}

/// Region controller version report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaasVersion {
    pub version: String,
    #[serde(default)]
    pub subversion: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

/// HTTP client for the MAAS API
#[derive(Debug, Clone)]
pub struct MaasClient {
    config: MaasConfig,
    credentials: Credentials,
    client: Client,
}

impl MaasClient {
    /// Create a new MAAS client
    pub fn new(config: MaasConfig) -> BridgeResult<Self> {
        let credentials = Credentials::parse(&config.api_key)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()
            .map_err(|e| {
                BridgeError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        info!("MAAS client targeting {}", config.base_url);

        Ok(Self {
            config,
            credentials,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/api/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version,
            path
        )
    }

    fn interfaces_path(system_id: &str) -> String {
        format!("nodes/{}/interfaces/", urlencoding::encode(system_id))
    }

    fn interface_path(system_id: &str, id: i64) -> String {
        format!("nodes/{}/interfaces/{}/", urlencoding::encode(system_id), id)
    }

    async fn send(&self, request: RequestBuilder) -> BridgeResult<reqwest::Response> {
        let response = request
            .header(reqwest::header::AUTHORIZATION, self.credentials.authorization())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!("MAAS API returned {}: {}", status, body);
            Err(BridgeError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> BridgeResult<T> {
        Ok(self.send(request).await?.json::<T>().await?)
    }

    /// Query the region controller version; doubles as a credentials check
    pub async fn version(&self) -> BridgeResult<MaasVersion> {
        self.fetch(self.client.get(self.url("version/"))).await
    }
}

#[async_trait]
impl MaasApi for MaasClient {
    async fn resolve_machine(&self, identifier: &str) -> BridgeResult<Machine> {
        let machines: Vec<Machine> = self.fetch(self.client.get(self.url("machines/"))).await?;
        debug!("Resolving machine {} among {}", identifier, machines.len());

        machines
            .into_iter()
            .find(|m| m.is_identified_by(identifier))
            .ok_or_else(|| BridgeError::MachineNotFound(identifier.to_string()))
    }

    async fn list_interfaces(&self, system_id: &str) -> BridgeResult<Vec<NetworkInterface>> {
        let url = self.url(&Self::interfaces_path(system_id));
        self.fetch(self.client.get(url)).await
    }

    async fn get_interface(&self, system_id: &str, id: i64) -> BridgeResult<NetworkInterface> {
        let url = self.url(&Self::interface_path(system_id, id));
        self.fetch(self.client.get(url)).await
    }

    async fn create_bridge(
        &self,
        system_id: &str,
        params: &BridgeParams,
    ) -> BridgeResult<NetworkInterface> {
        let url = self.url(&Self::interfaces_path(system_id));
        let request = self
            .client
            .post(url)
            .query(&[("op", "create_bridge")])
            .form(&params.to_form());
        self.fetch(request).await
    }

    async fn update_interface(
        &self,
        system_id: &str,
        id: i64,
        params: &BridgeParams,
    ) -> BridgeResult<NetworkInterface> {
        let url = self.url(&Self::interface_path(system_id, id));
        self.fetch(self.client.put(url).form(&params.to_form()))
            .await
    }

    async fn delete_interface(&self, system_id: &str, id: i64) -> BridgeResult<()> {
        let url = self.url(&Self::interface_path(system_id, id));
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}
