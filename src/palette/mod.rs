/// Spectro Cloud Palette API client implementation
pub mod client;
pub mod cluster;
pub mod error;
pub mod models;

pub use client::PaletteClient;
pub use cluster::ClusterManager;
