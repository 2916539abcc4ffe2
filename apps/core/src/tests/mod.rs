//! Test Module
//!
//! Cross-module tests for the intent chat crate.
//!
//! ## Test Categories
//! - `brain_tests`: end-to-end pipeline behaviour on the reference data
//! - `config_tests`: JSON files and environment overrides
//! - `session_tests`: chat session with mocked speech collaborators

pub mod brain_tests;
