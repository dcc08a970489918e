//! Tests for registry services
//!
//! The lookup client is exercised against a local wiremock server so the
//! retry policy can be checked against exact request counts.
