//! Infrastructure adapters. Implement ports.
//!
//! Generative model, terminal UI, document export. Map errors to DomainError.

pub mod ai;
pub mod export;
pub mod ui;
