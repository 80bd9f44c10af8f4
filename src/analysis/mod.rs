pub mod filter_engine;
pub mod aggregator;
pub mod resume_matcher;
pub mod trends;
pub mod simulator;

pub use filter_engine::filter;
pub use resume_matcher::{match_skills, read_resume, ResumeMatcher};
pub use simulator::simulate;
pub use trends::{rolling_average, DateRange};
