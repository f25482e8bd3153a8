//! planlens - query plan narration and alternative plan discovery
//!
//! Given a SQL query, asks the planner for its chosen plan, then re-plans
//! with the chosen strategies disabled to surface up to two structurally
//! different alternatives. Every plan is summarized and narrated node by
//! node in plain language.

pub mod analysis;
pub mod annotate;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod plan;
pub mod session;
