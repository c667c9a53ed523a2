/* src/remote/mod.rs */

mod config_store;
mod error;
mod vault;

pub use config_store::{
	ConfigDocument, ConfigRequest, ConfigStoreClient, FetchOutcome, VERSION_HEADER,
};
pub use error::TransportError;
pub use vault::VaultClient;
