//! MCP tool implementations
//!
//! Tool-layer functions invoked by the MCP server.

pub mod coach;
pub mod dashboard;
pub mod log;
pub mod profile;
pub mod status;
