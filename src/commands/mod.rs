//! Command implementations for bundlescope CLI

pub mod completions;
pub mod extensions;
pub mod helpers;
pub mod inspect;
pub mod list;
pub mod main_exec;
pub mod serve;
pub mod version;
