pub mod job;
pub mod filter;
pub mod aggregate;

pub use job::*;
pub use filter::*;
pub use aggregate::*;
