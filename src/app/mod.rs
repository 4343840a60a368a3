pub mod commands;
mod context;

pub use context::RuntimeContext;
