//! Promotion use-case services.
//!
//! # Responsibility
//! - Orchestrate the gate decision, the per-note executor and the batch
//!   sweep into use-case level APIs.
//! - Keep CLI wiring decoupled from storage and decision details.

pub mod batch;
pub mod promotion;
pub mod quality_gate;
pub mod report;
