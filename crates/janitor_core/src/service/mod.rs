//! Dashboard use-case services.
//!
//! # Responsibility
//! - Combine schedule, session and repositories into role-gated operations.
//! - Keep front ends free of SQL and photo handling.
//!
//! # Invariants
//! - Every role-restricted operation checks the caller's `Session` first.
//! - Services stay storage-agnostic and depend only on repository traits.

pub mod checklist_service;
pub mod export_service;
pub mod report_service;
