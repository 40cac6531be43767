//! Option descriptors: a short/long identity plus a kind-specific payload
//! (boolean flag, functional handler, or multi-value slots), with the
//! arity bounds and help rendering derived at construction time.

use std::cell::RefCell;

use crate::error::{HandlerError, SetupError};
use crate::signature::Signature;
use crate::slot::{FlagCell, Slot};

/// Width of the short-flag column in a help line.
pub const SHORT_JUST: usize = 20;
/// Width of the long-flag column in a help line.
pub const LONG_JUST: usize = 30;

const BOOL_OPT_DEF_DESC: &str = "Boolean option";
const FNC_OPT_DEF_DESC: &str = "Run function";
const VAR_OPT_DEF_DESC: &str = "Variable option";
const HELP_OPT_DESC: &str = "Show syntax for usage of this app.";

/// Handler invoked for a functional option, positionally, with the raw
/// tokens collected for it.
pub type Handler = Box<dyn FnMut(&[String]) -> Result<(), HandlerError>>;

pub(crate) enum OptKind {
    Flag(FlagCell),
    Func {
        handler: RefCell<Handler>,
        signature: Signature,
    },
    Var {
        slots: Vec<Slot>,
    },
    /// Built-in help renderer; dispatched by the engine itself.
    Help,
}

/// A registered option: immutable identity, derived arity bounds and the
/// payload that the execution engine dispatches on.
pub struct Opt {
    short: String,
    long: String,
    description: String,
    min_params: usize,
    max_params: Option<usize>,
    param_str: String,
    kind: OptKind,
}

impl std::fmt::Debug for Opt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Opt")
            .field("short", &self.short)
            .field("long", &self.long)
            .field("description", &self.description)
            .field("min_params", &self.min_params)
            .field("max_params", &self.max_params)
            .field("param_str", &self.param_str)
            .finish_non_exhaustive()
    }
}

impl Opt {
    /// Boolean option: takes no arguments, sets `cell` to true when
    /// matched. Pass an empty description to get the default one.
    pub fn flag(
        short: impl Into<String>,
        long: impl Into<String>,
        cell: FlagCell,
        description: impl Into<String>,
    ) -> Result<Self, SetupError> {
        let (short, long) = checked_names(short, long)?;
        Ok(Self {
            short,
            long,
            description: described(description, BOOL_OPT_DEF_DESC),
            min_params: 0,
            max_params: Some(0),
            param_str: String::new(),
            kind: OptKind::Flag(cell),
        })
    }

    /// Functional option: `handler` is invoked with the collected tokens
    /// once `signature` accepts their count.
    pub fn func(
        short: impl Into<String>,
        long: impl Into<String>,
        signature: Signature,
        handler: impl FnMut(&[String]) -> Result<(), HandlerError> + 'static,
        description: impl Into<String>,
    ) -> Result<Self, SetupError> {
        let (short, long) = checked_names(short, long)?;
        Ok(Self {
            short,
            long,
            description: described(description, FNC_OPT_DEF_DESC),
            min_params: signature.min_params(),
            max_params: signature.max_params(),
            param_str: signature.render(),
            kind: OptKind::Func {
                handler: RefCell::new(Box::new(handler)),
                signature,
            },
        })
    }

    /// Multi-value option over an ordered, non-empty slot list. At most
    /// the final slot may be the aterisk slot, and no required slot may
    /// follow an optional one.
    pub fn var(
        short: impl Into<String>,
        long: impl Into<String>,
        slots: Vec<Slot>,
        description: impl Into<String>,
    ) -> Result<Self, SetupError> {
        let (short, long) = checked_names(short, long)?;
        check_slot_set(&slots)?;
        let (min_params, max_params) = slot_arity(&slots)?;
        Ok(Self {
            short,
            long,
            description: described(description, VAR_OPT_DEF_DESC),
            min_params,
            max_params,
            param_str: render_slots(&slots),
            kind: OptKind::Var { slots },
        })
    }

    /// The built-in `h`/`help` option seeded into every registry.
    pub(crate) fn help() -> Self {
        Self {
            short: "h".to_string(),
            long: "help".to_string(),
            description: HELP_OPT_DESC.to_string(),
            min_params: 0,
            max_params: Some(0),
            param_str: String::new(),
            kind: OptKind::Help,
        }
    }

    pub fn short(&self) -> &str {
        &self.short
    }

    pub fn long(&self) -> &str {
        &self.long
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn min_params(&self) -> usize {
        self.min_params
    }

    /// `None` means unbounded (trailing variadic or aterisk slot).
    pub fn max_params(&self) -> Option<usize> {
        self.max_params
    }

    /// Parameter list as it appears after the flag in help output.
    pub fn param_str(&self) -> &str {
        &self.param_str
    }

    pub(crate) fn kind(&self) -> &OptKind {
        &self.kind
    }

    /// Three-column help line: `-short params | --long params | description`.
    /// The flag columns are padded and then truncated to their fixed widths.
    pub fn describe(&self) -> String {
        let short_col = format!("-{}{}", self.short, self.param_str);
        let long_col = format!("--{}{}", self.long, self.param_str);
        format!(
            "{} | {} | {}",
            pad_trunc(&short_col, SHORT_JUST),
            pad_trunc(&long_col, LONG_JUST),
            self.description
        )
    }
}

fn described(description: impl Into<String>, default: &str) -> String {
    let description = description.into();
    if description.is_empty() {
        default.to_string()
    } else {
        description
    }
}

fn checked_names(
    short: impl Into<String>,
    long: impl Into<String>,
) -> Result<(String, String), SetupError> {
    let short = short.into();
    let long = long.into();
    let valid = |name: &str| {
        !name.is_empty() && !name.starts_with('-') && !name.chars().any(char::is_whitespace)
    };
    if !valid(&short) || !valid(&long) {
        return Err(SetupError::InvalidName { short, long });
    }
    Ok((short, long))
}

fn check_slot_set(slots: &[Slot]) -> Result<(), SetupError> {
    if slots.is_empty() {
        return Err(SetupError::InvalidSlotSet);
    }
    for (i, slot) in slots.iter().enumerate() {
        if slots[..i].iter().any(|prior| prior.shares_cell(slot)) {
            return Err(SetupError::InvalidSlotSet);
        }
    }
    Ok(())
}

fn slot_arity(slots: &[Slot]) -> Result<(usize, Option<usize>), SetupError> {
    let mut used_optional = false;
    let mut optional = 0;
    let mut required = 0;
    for (i, slot) in slots.iter().enumerate() {
        if slot.aterisk() {
            if i == slots.len() - 1 {
                return Ok((required, None));
            }
            return Err(SetupError::AteriskMiddle);
        }
        if slot.optional() {
            used_optional = true;
            optional += 1;
            continue;
        }
        if used_optional {
            return Err(SetupError::RequiredAfterOptional);
        }
        required += 1;
    }
    Ok((required, Some(required + optional)))
}

fn render_slots(slots: &[Slot]) -> String {
    let mut out = String::new();
    for (i, slot) in slots.iter().enumerate() {
        let name = slot.display_name(i);
        if slot.aterisk() {
            out.push_str(&format!(" [*{name}]"));
        } else if slot.optional() {
            out.push_str(&format!(" [{name}]"));
        } else {
            out.push_str(&format!(" {name}"));
        }
    }
    out
}

fn pad_trunc(s: &str, width: usize) -> String {
    let mut out: String = s.chars().take(width).collect();
    let have = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(have)));
    out
}
