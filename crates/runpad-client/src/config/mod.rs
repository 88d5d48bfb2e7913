//! Configuration for talking to the execution service
//!
//! The client never reads ambient state: everything it needs travels in a
//! [`ClientConfig`] that the hosting application builds, either directly or
//! through [`ConfigLoader`] from a YAML file and the environment.

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;
