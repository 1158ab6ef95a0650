//! Unit tests for the error taxonomy
