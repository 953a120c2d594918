//! rsarchive: uniform front end for command-line archive tools
//!
//! Each archive operation (tar, gzip, gunzip, zip, unzip, rar, unrar) is
//! translated into exactly one shell command line and run through an
//! injected [`CommandExecutor`](infrastructure::traits::CommandExecutor).
//!
//! Layers, inner to outer:
//! - [`domain`]: operations, requests and command construction
//! - [`application`]: capability registry and the archive service
//! - [`infrastructure`]: process execution, binary lookup, templating, DI
//! - [`cli`]: argument parsing and dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
