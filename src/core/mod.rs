pub mod batch;
pub mod decode;
pub mod lookup;
pub mod pool;

pub use crate::domain::model::{Job, Project, User};
pub use crate::domain::ports::{ConfigProvider, HttpGet, ProjectEnricher};
pub use crate::utils::error::Result;
