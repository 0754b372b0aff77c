//! Shared test utilities for kiroku-sync unit tests.
