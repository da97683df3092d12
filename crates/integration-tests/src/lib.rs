//! Integration test support for the OpenMeccanoid stack
//!
//! Hosts the virtual robot link used by the end-to-end suites under
//! `tests/`. Nothing here talks to real hardware.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod virtual_robot;
