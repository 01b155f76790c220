//! Command handlers, one module per command family.
//!
//! Each handler takes the already-resolved repo list from the dispatcher,
//! walks it with [`crate::walker::for_each_repo`] where directory context is
//! needed, and shells out to the relevant external tool.

pub mod archive;
pub mod audit;
pub mod last_week;
pub mod pulls;
pub mod release;
pub mod repo;
