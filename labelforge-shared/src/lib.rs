//! # LabelForge Shared Library
//!
//! Store access and labeling logic used by the LabelForge API server.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool, schema bootstrap and demo seeding
//! - `models`: Users, projects, items and labels, including the
//!   next-unlabeled-item selector and the label recorder
//! - `export`: CSV and JSON Lines rendering of labeled items

pub mod db;
pub mod export;
pub mod models;

/// Current version of the LabelForge shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User assumed when a request does not name one
pub const DEFAULT_USER_ID: i64 = 1;

/// Project assumed when a request does not name one
pub const DEFAULT_PROJECT_ID: i64 = db::seed::DEMO_PROJECT_ID;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
