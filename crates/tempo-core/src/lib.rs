//! # tempo-core
//!
//! Core types shared across all Tempo crates.
//!
//! This crate provides the foundational types for the time tracker:
//! - Entity structs for tasks and time logs, plus the [`entities::Entity`]
//!   trait that ties each one to its remote collection and ordering
//! - Drafts and update builders that validate themselves before submission
//! - Collection and ordering enums used by the remote contract
//! - ID prefix constants
//! - The authenticated user identity
//! - A clock abstraction so "today" is injectable
//! - Cross-cutting error types

pub mod clock;
pub mod drafts;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
