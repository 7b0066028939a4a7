//! Core library for the `uriload` CLI.
//!
//! This crate provides the internal building blocks used by the binary: CLI
//! argument types, configuration parsing, request execution, and report
//! aggregation. The primary user-facing interface is the `uriload`
//! command-line application; library APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod entry;
pub mod error;
pub mod http;
pub mod logger;
pub mod report;
pub mod runner;
pub mod shutdown;
