//! Core library components.
//!
//! Everything below is independent of the command line: rendering cluster
//! artifacts, vault encryption, repository lifecycle and the provisioning
//! flow that ties them together.

pub mod config;
pub mod constants;
pub mod domain;
pub mod provision;
pub mod repository;
pub mod template;
pub mod validation;
pub mod vault;
