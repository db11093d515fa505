/// Palette API client
use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::error::PaletteError;
use super::models::*;
use crate::config::{CloudType, ConnectionConfig};

/// Header carrying the API key credential
pub const API_KEY_HEADER: &str = "apikey";
/// Header scoping every call to one project
pub const PROJECT_UID_HEADER: &str = "projectuid";

/// Authenticated Palette session, immutable after construction
#[derive(Clone)]
pub struct PaletteClient {
    client: Client,
    base_url: String,
}

impl PaletteClient {
    /// Create a new client whose every request carries `ApiKey` and `ProjectUid`
    pub fn new(config: &ConnectionConfig) -> Result<Self> {
        let mut api_key = header::HeaderValue::from_str(&config.api_key)
            .context("Invalid API key format")?;
        api_key.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::HeaderName::from_static(API_KEY_HEADER), api_key);
        headers.insert(
            header::HeaderName::from_static(PROJECT_UID_HEADER),
            header::HeaderValue::from_str(&config.project_uid)
                .context("Invalid project UID format")?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Send a GET request and return the raw body on success
    async fn get_text(&self, path: &str) -> Result<String> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send GET request")?;

        let response = Self::check_status(response).await?;
        response.text().await.context("Failed to read API response")
    }

    /// Make a GET request to the API
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.get_text(path).await?;
        serde_json::from_str(&body).context("Failed to parse API response")
    }

    /// Make a POST request to the API
    async fn post<T: Serialize, R: DeserializeOwned>(&self, path: &str, body: &T) -> Result<R> {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .context("Failed to send POST request")?;

        Self::check_status(response)
            .await?
            .json::<R>()
            .await
            .context("Failed to parse API response")
    }

    /// Turn a non-success status into a `PaletteError::Api` carrying the raw body
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(PaletteError::Api { status, body }.into())
    }

    /// List every cluster visible to the project, in API order
    pub async fn list_clusters(&self) -> Result<Vec<SpectroCluster>> {
        let response: SpectroClusterList = self.get("v1/spectroclusters").await?;
        Ok(response.into_items())
    }

    /// Import a new cluster and return the uid the API assigned to it
    pub async fn import_cluster(&self, cloud_type: CloudType, name: &str) -> Result<String> {
        let request = ImportClusterRequest::new(name);
        let response: ImportClusterResponse = self
            .post(&format!("v1/spectroclusters/{}/import", cloud_type), &request)
            .await?;

        response
            .uid()
            .map(str::to_string)
            .ok_or_else(|| {
                PaletteError::MissingUid {
                    name: name.to_string(),
                }
                .into()
            })
    }

    /// Fetch the import manifest for a cluster, verbatim
    pub async fn get_import_manifest(&self, cluster_uid: &str) -> Result<String> {
        self.get_text(&format!("v1/spectroclusters/{}/import/manifest", cluster_uid))
            .await
    }
}
