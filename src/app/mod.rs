//! Application core: domain orchestration, zero direct I/O.
//!
//! This module owns the session, the per-dog verification wizards, the
//! document pipeline and the audit trail. All interaction with the clock,
//! storage and event consumers happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable with fakes.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod session;
