//! Built-in modules and the scenarios that exercise them

mod builtins;
pub mod scenario;
mod transcript;

pub use builtins::{builtin_sources, COUNTER_MODULE, COUNTER_START};
pub use scenario::Scenario;
pub use transcript::Transcript;
