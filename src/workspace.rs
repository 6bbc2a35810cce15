//! Workspace domain: the add, regenerate and verify workflows.

mod commands;
mod facade;
mod types;

pub use facade::*;
