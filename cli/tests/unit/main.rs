//! Unit tests for ltc CLI
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod mocks;
mod poll_service;
