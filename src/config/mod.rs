/// Connection settings and cloud types for the Palette import tool
use anyhow::Context;
use clap::ValueEnum;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Public Palette SaaS endpoint
pub const DEFAULT_API_ENDPOINT: &str = "https://api.spectrocloud.com";

/// Infrastructure provider a cluster runs on; selects the import API path
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CloudType {
    Aws,
    Azure,
    EdgeNative,
    Edge,
    Gcp,
    Generic,
    Libvirt,
    Maas,
    Openstack,
    Vsphere,
}

impl CloudType {
    /// Path segment used by `/v1/spectroclusters/{cloud_type}/import`
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudType::Aws => "aws",
            CloudType::Azure => "azure",
            CloudType::EdgeNative => "edge-native",
            CloudType::Edge => "edge",
            CloudType::Gcp => "gcp",
            CloudType::Generic => "generic",
            CloudType::Libvirt => "libvirt",
            CloudType::Maas => "maas",
            CloudType::Openstack => "openstack",
            CloudType::Vsphere => "vsphere",
        }
    }
}

impl fmt::Display for CloudType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to build an authenticated Palette session
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Base API endpoint (e.g., "https://api.spectrocloud.com")
    pub api_endpoint: String,

    /// Project the API calls are scoped to
    pub project_uid: String,

    /// API key from the Palette profile screen
    pub api_key: String,

    /// Per-request timeout; the HTTP client default applies when unset
    pub timeout: Option<Duration>,
}

impl ConnectionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        let url = Url::parse(&self.api_endpoint)
            .with_context(|| format!("Invalid API endpoint: {}", self.api_endpoint))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => anyhow::bail!(
                "Unsupported API endpoint scheme '{}' in {}",
                scheme,
                self.api_endpoint
            ),
        }
    }

    /// Endpoint without trailing slashes, ready for path concatenation
    pub fn base_url(&self) -> &str {
        self.api_endpoint.trim_end_matches('/')
    }
}

/// Reject cluster names the API would register as an unnamed cluster
pub fn validate_cluster_name(name: &str) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("cluster name cannot be empty");
    }
    Ok(())
}
