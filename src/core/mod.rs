//! Core library components.
//!
//! This module contains the secret pipeline: parsing the secrets file,
//! fetching and decoding paths from the backend, resolving requested keys,
//! and assembling the environment handed to the command.

pub mod config;
pub mod constants;
pub mod decode;
pub mod env;
pub mod fetch;
pub mod launch;
pub mod resolve;
pub mod retry;
pub mod secret;
pub mod types;
