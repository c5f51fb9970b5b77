//! Integration tests for the tool gateway
//!
//! This crate contains end-to-end tests that exercise the full stack:
//! - HTTP API layer
//! - Registry refresh and routing
//! - Backend adapters against mock backends
//!
//! # Running Tests
//!
//! Tests are fully in-process: mock backends are spawned on ephemeral
//! ports, so no external services are needed.
//!
//! ```bash
//! cargo test -p toolgate-tests
//! ```
//!
//! # Test Structure
//!
//! - `gateway_e2e_test.rs` - Full stack tests: mock backends behind the
//!   adapters, driven through the gateway's HTTP surface

// This crate only contains tests, no library code
