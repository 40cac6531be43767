//! Argv tokenizer: a single left-to-right pass that partitions the raw
//! argument vector into per-option token groups.
//!
//! A token starting with `-` is always a flag attempt, so a
//! negative-number value cannot be told apart from an unknown flag. This
//! is a known parsing ambiguity of the scheme, kept as-is.

use indexmap::IndexMap;

use crate::error::UsageError;
use crate::registry::{OptId, Registry};

/// Ordered grouping of raw tokens by matched option, built fresh per
/// invocation and consumed once by the execution engine.
#[derive(Debug, Default)]
pub struct Translation {
    groups: IndexMap<OptId, Vec<String>>,
}

impl Translation {
    /// Groups in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (OptId, &[String])> {
        self.groups.iter().map(|(id, tokens)| (*id, tokens.as_slice()))
    }

    pub fn get(&self, id: OptId) -> Option<&[String]> {
        self.groups.get(&id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Partition `argv` (excluding the program name) into per-option groups.
///
/// Long-name lookup (`--` prefix) runs before short-name lookup (`-`
/// prefix). A matched flag becomes the current key and opens a fresh
/// group; re-matching an already-seen key resets its collected tokens
/// while the group keeps its original position. Flag-prefixed tokens
/// matching nothing and value tokens arriving before any key abort the
/// pass.
pub fn translate(registry: &Registry, argv: &[String]) -> Result<Translation, UsageError> {
    tracing::debug!(tokens = argv.len(), "translating argument vector");
    let mut groups: IndexMap<OptId, Vec<String>> = IndexMap::new();
    let mut key: Option<OptId> = None;

    for arg in argv {
        if let Some(name) = arg.strip_prefix("--")
            && let Some(id) = registry.position_long(name)
        {
            key = Some(id);
            groups.insert(id, Vec::new());
            continue;
        }

        if let Some(name) = arg.strip_prefix('-') {
            if let Some(id) = registry.position_short(name) {
                key = Some(id);
                groups.insert(id, Vec::new());
                continue;
            }
            return Err(UsageError::UnknownOption(arg.clone()));
        }

        match key {
            Some(id) => groups[&id].push(arg.clone()),
            None => return Err(UsageError::DanglingArgument(arg.clone())),
        }
    }

    Ok(Translation { groups })
}
