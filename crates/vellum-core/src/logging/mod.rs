//! Logging bootstrap.
//!
//! Library code only talks to the `log` facade. Binaries, tests and scene walkers
//! call [`init_logging`] once to route records through `env_logger`.

mod init;

pub use init::{LoggingConfig, init_logging};
