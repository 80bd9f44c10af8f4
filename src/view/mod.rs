pub mod state;
pub mod paginator;
pub mod controller;

pub use controller::{Controller, JobPage};
pub use paginator::{page, PageWindow};
pub use state::{reduce, Action, Tab, ViewState};
