//! HTTP handlers for the proactive message gateway.

pub mod proactive;
