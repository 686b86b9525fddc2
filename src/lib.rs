//! Interactive command-line client for the Yougile task-management API.
//!
//! [`config::ConfigStore`] persists the local settings record and
//! [`client::YougileClient`] talks to the REST API; everything else is the
//! interactive command layer built on top of them.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod display;
pub mod logging;
pub mod prompts;
