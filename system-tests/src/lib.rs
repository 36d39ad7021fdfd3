// system-tests/src/lib.rs
// ============================================================================
// Module: Cube Conformance System Tests Library
// Description: Shared configuration and helpers for system test scenarios.
// Purpose: Provide common utilities for the conformance system-test binaries.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration and helper utilities used by the
//! conformance system-test binaries in `system-tests/tests`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
