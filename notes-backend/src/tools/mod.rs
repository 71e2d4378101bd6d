//! Tool layer: named operations with JSON input schemas, dispatched by name

pub mod builtin;
pub mod registry;
pub mod types;

pub use registry::ToolRegistry;
pub use types::ToolContext;
