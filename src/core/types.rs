//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

use std::collections::HashMap;

/// An environment variable name (e.g., DB_PASS, API_CREDS_TOKEN).
pub type VarName = String;

/// One `(name, value)` entry of a process environment.
///
/// Sequences of these keep the order they were produced in.
pub type EnvVar = (VarName, String);

/// The string-valued fields stored under one secret path, keyed by field name.
pub type PathData = HashMap<String, String>;
