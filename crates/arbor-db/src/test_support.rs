//! Shared test utilities for arbor-db tests.
