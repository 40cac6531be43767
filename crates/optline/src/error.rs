//! Error taxonomy for the option pipeline.
//!
//! Three classes with different propagation policies:
//!
//! - [`SetupError`]: construction/registration-time programmer mistakes.
//!   Surfaced immediately and never caught by the pipeline's top level.
//! - [`UsageError`]: user-input mistakes found while translating or
//!   executing an argument vector. The top level turns these into a
//!   single-line message plus a help hint and a failing exit code.
//! - Handler-internal failures: opaque to the framework, carried through
//!   [`RunError::Handler`] unmodified.

use std::error::Error;
use std::fmt;

/// Construction-time failure: invalid descriptor, slot set, signature or
/// registration collision. These signal bugs in the host program, not bad
/// user input, and should crash loudly during startup.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// Short and long names must be non-empty tokens without whitespace
    /// or a leading dash.
    #[error("option short and long must be valid nonrepetitive tokens ('{short}', '{long}')")]
    InvalidName { short: String, long: String },
    /// The short or long name collides with an already-registered option.
    #[error("option name already in use ({0})")]
    NameInUse(String),
    /// A signature parameter is not a plain positional name, or repeats.
    #[error("signature parameter '{0}' is not a plain positional name")]
    ParameterShape(String),
    /// An aterisk slot cannot carry a scalar declared type.
    #[error("aterisk slot is only for list values")]
    AteriskType,
    /// Only an aterisk slot may hold a list value.
    #[error("cannot use a list value on a non-aterisk slot")]
    ListSlot,
    /// The slot's initial value does not match its declared type.
    #[error("slot value does not match the declared type")]
    SlotType,
    /// Only the final slot of a var option may be the aterisk slot.
    #[error("cannot put an aterisk slot in the middle of the slot list")]
    AteriskMiddle,
    /// Once an optional slot appears, every later slot must be optional.
    #[error("cannot use a required slot after an optional one")]
    RequiredAfterOptional,
    /// A var option needs at least one slot and no slot may appear twice.
    #[error("var option needs a non-empty set of distinct slots")]
    InvalidSlotSet,
}

fn argument_word(n: usize) -> &'static str {
    if n == 1 { "argument" } else { "arguments" }
}

fn was_were(n: usize) -> &'static str {
    if n < 2 { "was" } else { "were" }
}

/// User-input failure raised while translating or executing an argument
/// vector. The message shapes below are part of the crate's contract.
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    /// A flag-prefixed token matched no registered option. Carries the
    /// offending token verbatim, dashes included.
    #[error("No option named: {0}")]
    UnknownOption(String),
    /// A value token appeared before any flag opened a group.
    #[error("No option before value: {0}")]
    DanglingArgument(String),
    /// More tokens than the option's slots (or a boolean flag given any).
    #[error("--{long} takes {max} positional {} but {given} {} given", argument_word(*.max), was_were(*.given))]
    TooManyArgs {
        long: String,
        max: usize,
        given: usize,
    },
    /// Fewer tokens than the option's required slots.
    #[error("--{long} missing {missing} positional {}", argument_word(*.missing))]
    MissingArgs { long: String, missing: usize },
    /// A typed slot could not coerce its token. `index` is 1-based.
    #[error("Unable to convert {index} param of --{long} into {ty}")]
    TypeCoercion {
        long: String,
        index: usize,
        ty: &'static str,
    },
    /// A functional option was invoked with a token count its handler
    /// signature rejects. The message reads `--{long} {tail}`.
    #[error("--{long} {message}")]
    Param { long: String, message: String },
}

/// Deliberate, successful program exit requested by a handler or by the
/// built-in help option. Not an error: the pipeline stops and the message
/// is printed on the normal exit path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Termination {
    pub message: String,
}

impl Termination {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// What a handler can signal back to the execution engine.
#[derive(Debug)]
pub enum HandlerError {
    /// End the pipeline deliberately; treated as a success.
    Exit(Termination),
    /// The handler's own business logic failed; propagated unmodified.
    Failure(Box<dyn Error>),
}

impl HandlerError {
    /// Deliberate exit carrying `message`.
    pub fn exit(message: impl Into<String>) -> Self {
        Self::Exit(Termination::new(message))
    }
}

impl From<Termination> for HandlerError {
    fn from(t: Termination) -> Self {
        Self::Exit(t)
    }
}

impl From<String> for HandlerError {
    fn from(msg: String) -> Self {
        Self::Failure(msg.into())
    }
}

impl From<&str> for HandlerError {
    fn from(msg: &str) -> Self {
        Self::Failure(msg.into())
    }
}

impl From<Box<dyn Error>> for HandlerError {
    fn from(e: Box<dyn Error>) -> Self {
        Self::Failure(e)
    }
}

/// Pipeline failure: either a user-input mistake or a handler's own error.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error("{0}")]
    Handler(Box<dyn Error>),
}
