//! Integration test driver for the `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises one subsystem of the
//! passport service against the mock ports in `mock_ports`. No real timers
//! or storage backends are involved.

mod business_verification_tests;
mod mock_ports;
mod session_tests;
mod wizard_flow_tests;
