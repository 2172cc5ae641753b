//! Tests for the in-process rate limiter
