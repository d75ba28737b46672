//! Shared test utilities for tempo-remote tests.
