//! State mirrored from the AMAF program and client-side configuration

pub mod config;
pub mod market;

pub use config::*;
pub use market::*;
