//! Configuration loading
//!
//! Settings come only from a file passed with `--config`; without one the
//! defaults apply. The measured repository is never searched for settings.

pub mod loader;

pub use loader::load_config;
