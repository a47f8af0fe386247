//! tune-messages
//!
//! Centralized messaging for the engine-tune CLI.
//! Provides standardized templates and a small message builder
//! for user-facing output.

pub mod builder;
pub mod macros;
pub mod messages;

pub use builder::MessageBuilder;
pub use messages::MESSAGES;
