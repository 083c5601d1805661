//! refcheck-core library.
//!
//! Checks candidate functions against a reference function under a
//! caller-chosen relation. See [`ConstraintSet`] for the general form and
//! [`IdenticalFunctionSet`] for the exact-equality shorthand.
//!
//! ```
//! use refcheck_core::{ConstraintEntry, ConstraintSet, check};
//!
//! let set = ConstraintSet::new(
//!     |x: &i64| x.pow(2),
//!     vec![
//!         ConstraintEntry::new(|x: &i64| x * x, check::equal()).named("mul"),
//!         ConstraintEntry::new(|x: &i64| x.pow(2) + 1, check::less_than()),
//!     ],
//! );
//! assert_eq!(set.call(&2), Ok(4));
//! ```
//!
//! # Conventions
//!
//! - **Errors**: check failures are [`ConstraintViolation`] values; config
//!   loading uses `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod check;
pub mod config;
pub mod error;
pub mod identical;
pub mod logging;
pub mod set;

pub use check::{CheckFailure, CheckResult};
pub use config::{HarnessConfig, Tolerance, load_config};
pub use error::{ConstraintViolation, ErrorCode};
pub use identical::IdenticalFunctionSet;
pub use logging::init_test_logging;
pub use set::{CheckFn, ConstraintEntry, ConstraintSet, Function};
