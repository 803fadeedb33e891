//! Tests for tracing functionality
//!
//! These tests verify that the tracing feature works correctly when enabled
//! and that the library works without it when disabled.

#[cfg(feature = "tracing")]
mod with_tracing;
mod without_tracing;
