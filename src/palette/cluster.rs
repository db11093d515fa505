/// Cluster resolution: reuse an existing registration or import a new one
use anyhow::{Context, Result};
use tracing::info;

use super::client::PaletteClient;
use super::error::PaletteError;
use super::models::SpectroCluster;
use crate::config::CloudType;

/// Find the first cluster with exactly this name that is not marked deleted.
///
/// Items are scanned in the order the API returned them. Deleted matches are
/// skipped without ending the scan; later duplicates of the winner are ignored.
pub fn find_active_cluster<'a>(
    clusters: &'a [SpectroCluster],
    name: &str,
) -> Option<&'a SpectroCluster> {
    clusters
        .iter()
        .filter(|cluster| cluster.metadata.name() == name)
        .find(|cluster| {
            info!("Found existing cluster: {}", cluster.metadata.name());
            if cluster.metadata.is_deleted() {
                info!(
                    "Ignoring deleted cluster: {} (UID: {})",
                    cluster.metadata.name(),
                    cluster.metadata.uid().unwrap_or("-")
                );
                return false;
            }
            true
        })
}

/// Cluster manager resolving names to Palette cluster uids
pub struct ClusterManager {
    client: PaletteClient,
}

impl ClusterManager {
    /// Create a new cluster manager
    pub fn new(client: PaletteClient) -> Self {
        Self { client }
    }

    /// Return the uid of the named cluster, importing it if no live one exists
    ///
    /// An existing, non-deleted cluster is only read, never modified. When the
    /// only matches are deleted, a fresh import is issued under the same name.
    pub async fn ensure_cluster(&self, cluster_name: &str, cloud_type: CloudType) -> Result<String> {
        info!("Getting list of existing clusters");
        let clusters = self
            .client
            .list_clusters()
            .await
            .context("Failed to list clusters")?;

        if let Some(cluster) = find_active_cluster(&clusters, cluster_name) {
            let uid = cluster.metadata.uid().ok_or_else(|| PaletteError::MissingUid {
                name: cluster_name.to_string(),
            })?;
            info!(
                "Will get manifest for existing cluster {} (UID: {})",
                cluster_name, uid
            );
            return Ok(uid.to_string());
        }

        info!(
            "No cluster found, importing a new {} cluster named {}",
            cloud_type, cluster_name
        );
        let uid = self
            .client
            .import_cluster(cloud_type, cluster_name)
            .await
            .context("Failed to import cluster")?;

        info!("Cluster imported successfully: {} (UID: {})", cluster_name, uid);

        Ok(uid)
    }
}
