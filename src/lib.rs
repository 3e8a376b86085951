//! AI Diet & Fitness Coach Library
//!
//! Core functionality for free-text meal and workout logging with
//! AI-estimated nutrition, daily aggregation, and goal deltas.

pub mod build_info;
pub mod estimation;
pub mod mcp;
pub mod models;
pub mod session;
pub mod targets;
pub mod tools;
