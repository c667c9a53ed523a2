/* src/provider/mod.rs */

mod cycle;
mod error;
mod options;

pub use cycle::{Provider, ProviderBuilder};
pub use error::{ExceptionContext, OnLoadException, ProviderError};
pub use options::{DEFAULT_LOAD_TIMEOUT, DEFAULT_RELOAD_PERIOD, ProviderOptions};
