//! Value slots for var options and boolean cells for flag options.
//!
//! Both are cheap clone-able handles onto shared storage: the host keeps
//! a clone at registration time and reads the result after execution.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::SetupError;

/// Placeholder prefix used for unnamed slots in help output (`arg0`, ...).
pub const DEFAULT_SLOT_PLACEHOLDER: &str = "arg";

/// Declared coercion target for a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotType {
    Str,
    Int,
    Float,
    Bool,
}

impl SlotType {
    pub fn name(self) -> &'static str {
        match self {
            SlotType::Str => "str",
            SlotType::Int => "int",
            SlotType::Float => "float",
            SlotType::Bool => "bool",
        }
    }

    /// Coerce a raw token into this type. `Err` carries no detail; the
    /// engine wraps it into a `TypeCoercion` usage error with position.
    pub(crate) fn coerce(self, raw: &str) -> Result<SlotValue, ()> {
        match self {
            SlotType::Str => Ok(SlotValue::Str(raw.to_string())),
            SlotType::Int => raw.parse().map(SlotValue::Int).map_err(|_| ()),
            SlotType::Float => raw.parse().map(SlotValue::Float).map_err(|_| ()),
            SlotType::Bool => raw.parse().map(SlotValue::Bool).map_err(|_| ()),
        }
    }

    fn matches(self, value: &SlotValue) -> bool {
        matches!(
            (self, value),
            (SlotType::Str, SlotValue::Str(_))
                | (SlotType::Int, SlotValue::Int(_))
                | (SlotType::Float, SlotValue::Float(_))
                | (SlotType::Bool, SlotValue::Bool(_))
        )
    }
}

/// Current value held by a slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Sequence absorbed by an aterisk slot.
    List(Vec<String>),
}

impl SlotValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SlotValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SlotValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            SlotValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SlotValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            SlotValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for SlotValue {
    fn from(s: &str) -> Self {
        SlotValue::Str(s.to_string())
    }
}

impl From<String> for SlotValue {
    fn from(s: String) -> Self {
        SlotValue::Str(s)
    }
}

impl From<i64> for SlotValue {
    fn from(n: i64) -> Self {
        SlotValue::Int(n)
    }
}

impl From<f64> for SlotValue {
    fn from(n: f64) -> Self {
        SlotValue::Float(n)
    }
}

impl From<bool> for SlotValue {
    fn from(b: bool) -> Self {
        SlotValue::Bool(b)
    }
}

impl From<Vec<String>> for SlotValue {
    fn from(items: Vec<String>) -> Self {
        SlotValue::List(items)
    }
}

/// One positional value holder within a var option.
///
/// The initial value doubles as the default: an optional slot that
/// receives no token keeps it. Cloning yields a handle onto the same
/// underlying cell.
#[derive(Debug, Clone)]
pub struct Slot {
    name: Option<String>,
    vtype: Option<SlotType>,
    optional: bool,
    aterisk: bool,
    cell: Rc<RefCell<SlotValue>>,
}

impl Slot {
    /// Snapshot of the current value.
    pub fn value(&self) -> SlotValue {
        self.cell.borrow().clone()
    }

    pub(crate) fn set(&self, value: SlotValue) {
        *self.cell.borrow_mut() = value;
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn vtype(&self) -> Option<SlotType> {
        self.vtype
    }

    pub fn optional(&self) -> bool {
        self.optional
    }

    pub fn aterisk(&self) -> bool {
        self.aterisk
    }

    /// Two handles onto the same cell count as the same slot.
    pub(crate) fn shares_cell(&self, other: &Slot) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    /// Display name for help output; unnamed slots fall back to a
    /// positional placeholder.
    pub(crate) fn display_name(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{DEFAULT_SLOT_PLACEHOLDER}{index}"),
        }
    }
}

/// Create a slot builder around an initial (default) value.
pub fn slot(value: impl Into<SlotValue>) -> SlotBuilder {
    SlotBuilder::new(value)
}

/// Builder for [`Slot`].
pub struct SlotBuilder {
    value: SlotValue,
    name: Option<String>,
    vtype: Option<SlotType>,
    optional: bool,
    aterisk: bool,
}

impl SlotBuilder {
    pub fn new(value: impl Into<SlotValue>) -> Self {
        Self {
            value: value.into(),
            name: None,
            vtype: None,
            optional: false,
            aterisk: false,
        }
    }

    /// Display name used in help output.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declare a coercion target; untyped slots store the raw token.
    pub fn typed(mut self, vtype: SlotType) -> Self {
        self.vtype = Some(vtype);
        self
    }

    /// Mark the slot optional; it keeps its default when no token arrives.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Collect-rest slot: absorbs all remaining tokens as a list. Implies
    /// optional and must be the last slot of its option.
    pub fn aterisk(mut self) -> Self {
        self.aterisk = true;
        self
    }

    pub fn build(self) -> Result<Slot, SetupError> {
        if self.aterisk {
            if self.vtype.is_some() {
                return Err(SetupError::AteriskType);
            }
            if !matches!(self.value, SlotValue::List(_)) {
                return Err(SetupError::SlotType);
            }
        } else {
            if matches!(self.value, SlotValue::List(_)) {
                return Err(SetupError::ListSlot);
            }
            if let Some(vtype) = self.vtype
                && !vtype.matches(&self.value)
            {
                return Err(SetupError::SlotType);
            }
        }

        Ok(Slot {
            name: self.name,
            vtype: self.vtype,
            optional: self.optional || self.aterisk,
            aterisk: self.aterisk,
            cell: Rc::new(RefCell::new(self.value)),
        })
    }
}

/// Shared boolean cell owned by a flag option. The execution engine sets
/// it to true when the flag is matched.
#[derive(Debug, Clone, Default)]
pub struct FlagCell(Rc<Cell<bool>>);

impl FlagCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> bool {
        self.0.get()
    }

    pub(crate) fn set(&self, value: bool) {
        self.0.set(value);
    }
}
