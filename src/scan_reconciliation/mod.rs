//! Domain layer for vulnerability scan reconciliation.
//!
//! Holds the canonical record types for both upstream scan formats, the
//! package-keyed collection with its set algebra, and the services that
//! turn three collections (current scan, allowlist, post-upgrade scan)
//! into a pass/fail verdict.

pub mod domain;
pub mod services;
