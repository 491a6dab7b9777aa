//! Collaborator-facing plumbing: remote naming backends and export.

pub mod export;
pub mod namegen;
pub mod off;
