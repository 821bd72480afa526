//! # pulse-core
//!
//! Core types, clock abstraction, and error types for callpulse.
//!
//! This crate provides the foundational types shared across all callpulse crates:
//! - Entity structs for leads, call analyses, recommendations, and effectiveness reports
//! - Classification enums (lead status, satisfaction, priority, outcome)
//! - Cross-cutting error types
//! - An injectable `Clock` so scoring is reproducible in tests
//! - Structured error telemetry (`ErrorReporter`)
//! - Adapters from legacy analysis shapes into the canonical `CallAnalysis`

pub mod adapters;
pub mod clock;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod telemetry;
