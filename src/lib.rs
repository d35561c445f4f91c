//! Vaultrun - run a command with secrets from an HTTP secret store.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── output        # Terminal output helpers
//! │   └── run           # Fetch secrets, then exec the command
//! └── core/             # Core library components
//!     ├── config        # Run configuration
//!     ├── secret        # Secrets file parsing
//!     ├── retry         # Full-jitter retry policy
//!     ├── fetch         # Concurrent per-path retrieval
//!     ├── decode        # Response classification
//!     ├── resolve       # Path data to variables
//!     ├── env           # Environment assembly
//!     └── launch        # Process replacement
//! ```
//!
//! # Pipeline
//!
//! secrets file → [`core::secret`] → [`core::fetch`] (via [`core::decode`])
//! → [`core::resolve`] → [`core::env`] → [`core::launch`]
//!
//! Any failure aborts the run before the command starts; the command never
//! sees a partial environment.

pub mod cli;
pub mod core;
pub mod error;
