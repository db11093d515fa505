/// Palette API data models
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Annotation the API sets on clusters that are being (or have been) deleted
pub const DELETED_ANNOTATION: &str = "deleted";

/// Cluster list response from `GET /v1/spectroclusters`
///
/// `items` must be present; a `null` list decodes as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpectroClusterList {
    #[serde(deserialize_with = "null_as_empty")]
    pub items: Vec<SpectroCluster>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<SpectroCluster>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<SpectroCluster>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl SpectroClusterList {
    /// Items in API order
    pub fn into_items(self) -> Vec<SpectroCluster> {
        self.items
    }
}

/// Palette cluster resource; only the metadata is read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectroCluster {
    pub metadata: ObjectMeta,
}

/// Cluster metadata
///
/// Every field is optional so one unusual item never fails the whole list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub annotations: Option<HashMap<String, serde_json::Value>>,
}

impl ObjectMeta {
    /// Cluster name, empty when the API sent none
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Cluster uid, if the API sent a non-empty one
    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref().filter(|uid| !uid.is_empty())
    }

    /// Whether the cluster carries the `deleted` annotation
    pub fn is_deleted(&self) -> bool {
        self.annotations
            .as_ref()
            .is_some_and(|annotations| annotations.contains_key(DELETED_ANNOTATION))
    }
}

/// Request body for `POST /v1/spectroclusters/{cloud_type}/import`
#[derive(Debug, Serialize)]
pub struct ImportClusterRequest {
    pub metadata: ImportMetadata,
    pub spec: ImportSpec,
}

/// Name of the cluster to import
#[derive(Debug, Serialize)]
pub struct ImportMetadata {
    pub name: String,
}

/// Import spec; the cluster config is always sent empty
#[derive(Debug, Default, Serialize)]
pub struct ImportSpec {
    #[serde(rename = "clusterConfig")]
    pub cluster_config: ImportClusterConfig,
}

#[derive(Debug, Default, Serialize)]
pub struct ImportClusterConfig {}

impl ImportClusterRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            metadata: ImportMetadata { name: name.into() },
            spec: ImportSpec::default(),
        }
    }
}

/// Import response; the uid appears either under `metadata` or at the top level
#[derive(Debug, Default, Deserialize)]
pub struct ImportClusterResponse {
    #[serde(default)]
    pub metadata: Option<ObjectMeta>,
    #[serde(default)]
    pub uid: Option<String>,
}

impl ImportClusterResponse {
    /// Uid assigned to the imported cluster, preferring `metadata.uid`
    pub fn uid(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(ObjectMeta::uid)
            .or_else(|| self.uid.as_deref().filter(|uid| !uid.is_empty()))
    }
}
