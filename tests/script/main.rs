//! Integration tests for Layer 1: Script
//!
//! Tests quantity parsing, branch extraction from entity scripts, and
//! shared-table resolution.

mod extraction;
mod shared_tables;
