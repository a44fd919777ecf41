//! MCP server for the wellness knowledge base
//!
//! Exposes query, add and status operations of the matcher as tools.

mod params;
mod server;

pub use server::{run_mcp_server, WellnessService};
