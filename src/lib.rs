pub mod config;
pub mod error;
pub mod models;
pub mod dataset;
pub mod analysis;
pub mod view;

pub use config::{Config, EngineConfig};
pub use error::{Error, Result};
pub use dataset::{Dataset, DatasetSource, JsonFileSource};
pub use analysis::ResumeMatcher;
pub use view::{Action, Controller, Tab, ViewState};
