//! Command handlers.

mod ask;
mod detect;
mod seed;

pub use ask::AskCommand;
pub use detect::DetectCommand;
pub use seed::SeedCommand;
