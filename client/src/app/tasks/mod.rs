//! # Refresh Tasks
//!
//! Fetch-and-replace reads used standalone and as the refresh sets of actions.

pub mod refresh;
