//! Support library for the `fiedler` binary.
//!
//! Exposes the command pipeline and logging setup so doctests and
//! integration tests can run commands without spawning a subprocess.

pub mod cli;
pub mod logging;
