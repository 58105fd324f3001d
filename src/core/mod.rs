//! Configuration and the small data model shared by every handler

pub mod config;
pub mod models;
pub mod session;
