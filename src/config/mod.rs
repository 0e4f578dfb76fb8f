//! Configuration loading for the evaluation client.
//!
//! This module loads the backend location, endpoint paths, timing and
//! submission policy from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use plexus_evaluations::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/plexus.yaml").unwrap();
//! println!("Backend: {}", config.config().base_url);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ClientConfig, EndpointConfig, SuccessPolicy};
