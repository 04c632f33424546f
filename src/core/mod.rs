//! Core driver infrastructure
//!
//! Shared pieces used by every device module. Currently this is the
//! logging abstraction.

pub mod logging;
