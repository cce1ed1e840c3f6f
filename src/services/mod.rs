//! Orchestration services: suggestion analysis and generation flows.

pub mod analyze;
pub mod generate;
