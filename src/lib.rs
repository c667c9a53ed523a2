/* src/lib.rs */

//!
//! Periodically-refreshing configuration providers that pull key-value
//! settings from remote config and secret stores into atomic, flat
//! snapshots.
//!
//! This crate integrates these components:
//!
//! - **snapshot**: Thread-safe, atomically replaced flat key-value state.
//! - **codec**: Payload decoding into hierarchical `:`-delimited keys.
//! - **remote**: Thin typed HTTP clients for the two remote collaborators.
//! - **auth**: Bearer-token acquisition, including signed-assertion exchange.
//! - **backend**: The `{fetch, decode}` capability pair per remote store.
//! - **provider**: Reload orchestration, failure escalation and building.
//! - **tick**: The self-re-arming refresh timer.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use pollbox::auth::StaticTokenProvider;
//! use pollbox::backend::{VaultBackend, VaultSettings};
//! use pollbox::provider::{Provider, ProviderOptions};
//! use pollbox::remote::VaultClient;
//!
//! # async fn run() -> Result<(), pollbox::provider::ProviderError> {
//! let backend = VaultBackend::new(
//! 	VaultClient::new("https://vault.example.com"),
//! 	Arc::new(StaticTokenProvider::new("oauth-token")),
//! 	VaultSettings {
//! 		secret_id: "my-secret".to_owned(),
//! 		path: Some("myapp".to_owned()),
//! 		path_separator: '-',
//! 	},
//! )?;
//!
//! let provider = Provider::builder()
//! 	.backend(backend)
//! 	.options(ProviderOptions::new().optional(false))
//! 	.register()
//! 	.await?;
//!
//! let database_host = provider.get("database:host");
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod backend;
pub mod codec;
pub mod provider;
pub mod remote;
pub mod snapshot;
pub mod tick;

pub use backend::{
	Backend, ConfigStoreBackend, ConfigStoreSettings, ValidationError, VaultBackend, VaultSettings,
};
pub use provider::{
	ExceptionContext, OnLoadException, Provider, ProviderBuilder, ProviderError, ProviderOptions,
};
pub use snapshot::{Snapshot, SnapshotEvent, SnapshotStore};
