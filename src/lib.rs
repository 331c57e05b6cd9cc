//! Core engine for a panelist survey platform.
//!
//! The crate covers the write path (normalizing raw survey answer payloads
//! into typed response rows and awarding reward points under per-category
//! cooldown policies) and the read path (reconstructing stored rows into
//! display-ready answers, and aggregating the reward ledger into a balance
//! summary). Persistence, transport, and UI live behind the collaborator
//! traits in [`surveys::profiling::repository`].

pub mod config;
pub mod surveys;
pub mod telemetry;
