//! Shared pieces for the health-records contract suite.
//!
//! This crate provides:
//! - [`ProviderDirectory`]: the read-only verification interface the core
//!   contract consumes, with its generated [`ProviderDirectoryClient`].
//! - [`ttl`]: persistent/instance storage lifetime helpers used by every
//!   contract in the workspace.

#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod directory;
pub mod ttl;

pub use directory::*;
