//! Subcommand drivers used by the binary.

mod detect;
mod serve;

pub use detect::{run_detect, DetectSummary};
pub use serve::run_serve;
