//! Property-based tests for tree invariants under random workloads.
