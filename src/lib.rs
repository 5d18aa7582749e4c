pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::adapters::{
    http::ReqwestTransport,
    readability::{FleschReadability, NoEnrichment},
};
pub use crate::config::toml_config::ApiConfig;
pub use crate::core::{
    batch::{descriptions_from_json, projects_from_json, transform_all},
    lookup::UserLookup,
    pool::{TaskHandle, WorkerPool},
};
pub use crate::domain::model::{Job, Project, Readability, User};
pub use crate::utils::error::{FetchError, Result};
