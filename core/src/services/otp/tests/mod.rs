//! Tests for passcode generation and the in-process store
