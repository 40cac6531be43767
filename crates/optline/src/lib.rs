//! Declarative command-line option framework.
//!
//! Options are registered once against a [`Registry`], then an argument
//! vector flows through a fixed pipeline: translation groups raw tokens
//! under the option they belong to, and execution validates each group
//! and applies it (setting a boolean cell, filling value slots, or
//! invoking a handler) in encounter order.
//!
//! # Example
//!
//! ```rust,ignore
//! use optline::{FlagCell, Opt, Registry, SlotType, exec, slot};
//!
//! let mut registry = Registry::new();
//!
//! let verbose = FlagCell::new();
//! registry.register(Opt::flag("v", "verbose", verbose.clone(), "Log more"))?;
//!
//! let rate = slot(30i64).named("fps").typed(SlotType::Int).build()?;
//! registry.register(Opt::var("r", "rate", vec![rate.clone()], "Set the frame rate"))?;
//!
//! let argv: Vec<String> = std::env::args().skip(1).collect();
//! exec(&registry, &argv)?;
//!
//! if verbose.get() {
//!     println!("rate = {:?}", rate.value());
//! }
//! ```
//!
//! Every registry carries a built-in `-h`/`--help` option that renders
//! the option table and ends the pipeline as a successful exit.

mod error;
mod exec;
mod option;
mod registry;
mod signature;
mod slot;
mod translate;

pub use error::{HandlerError, RunError, SetupError, Termination, UsageError};
pub use exec::{Outcome, exec, execute, run};
pub use option::{Handler, LONG_JUST, Opt, SHORT_JUST};
pub use registry::{HelpStyle, OptId, Registry};
pub use signature::{Signature, SignatureBuilder, sig};
pub use slot::{
    DEFAULT_SLOT_PLACEHOLDER, FlagCell, Slot, SlotBuilder, SlotType, SlotValue, slot,
};
