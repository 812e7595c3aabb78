pub mod config;
pub mod error;
pub mod pipeline;
pub mod progress;
pub mod source;
pub mod transform;

pub use config::Config;
pub use error::Error;
pub use pipeline::{Artifacts, run, verify};
pub use progress::{LogProgress, Progress, Step};
