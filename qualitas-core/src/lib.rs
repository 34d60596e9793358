// qualitas-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contracts for the collaborators (dataset ingestion).
pub mod ports;

// 2. Domain (business core)
// Dataset shape, quality rules, classification, summary, breakdown.
// Depends on nothing else (no infra, no app).
pub mod domain;

// 3. Infrastructure (Adapters)
// CSV / JSON readers, YAML rule configuration, report files.
pub mod infrastructure;

// 4. Application (Use Cases)
// Single dataset assessment and batch assessment.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// use qualitas_core::QualitasError;
pub use error::QualitasError;
