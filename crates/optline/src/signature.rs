//! Statically declared handler parameter lists.
//!
//! Replaces runtime introspection of a handler: the arity bounds and the
//! help rendering are derived once, when the functional option is
//! constructed, from an explicit [`Signature`].

use crate::error::SetupError;

/// Parameter list of a functional option's handler: required positionals,
/// then optional positionals, then at most one trailing variadic.
#[derive(Debug, Clone, Default)]
pub struct Signature {
    required: Vec<String>,
    optional: Vec<String>,
    variadic: Option<String>,
}

impl Signature {
    /// Count of parameters the handler cannot do without.
    pub fn min_params(&self) -> usize {
        self.required.len()
    }

    /// Upper bound on accepted tokens; `None` when a trailing variadic
    /// makes the signature unbounded.
    pub fn max_params(&self) -> Option<usize> {
        if self.variadic.is_some() {
            None
        } else {
            Some(self.required.len() + self.optional.len())
        }
    }

    /// Render the parameter list for help output: required parameters as
    /// bare names, optional ones as `[name]`, the variadic as `[*name]`.
    /// Each entry is preceded by a space so the result appends directly
    /// to a flag column.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for name in &self.required {
            out.push(' ');
            out.push_str(name);
        }
        for name in &self.optional {
            out.push_str(&format!(" [{name}]"));
        }
        if let Some(name) = &self.variadic {
            out.push_str(&format!(" [*{name}]"));
        }
        out
    }

    pub(crate) fn validate(&self) -> Result<(), SetupError> {
        let names = self
            .required
            .iter()
            .chain(&self.optional)
            .chain(&self.variadic);
        let mut seen: Vec<&str> = Vec::new();
        for name in names {
            if name.is_empty()
                || name.starts_with('-')
                || name.chars().any(char::is_whitespace)
                || seen.contains(&name.as_str())
            {
                return Err(SetupError::ParameterShape(name.clone()));
            }
            seen.push(name);
        }
        Ok(())
    }

    /// Check a token count against the signature. `None` means the call
    /// shape is accepted; `Some` carries the message tail for a
    /// `--{long} {tail}` param error.
    pub(crate) fn mismatch(&self, given: usize) -> Option<String> {
        let min = self.min_params();
        if given < min {
            let missing = &self.required[given..];
            let noun = if missing.len() > 1 {
                "arguments"
            } else {
                "argument"
            };
            return Some(format!(
                "missing {} required positional {}: {}",
                missing.len(),
                noun,
                join_quoted(missing)
            ));
        }
        let max = self.max_params()?;
        if given > max {
            let verb = if given < 2 { "was" } else { "were" };
            if self.optional.is_empty() {
                let noun = if max == 1 { "argument" } else { "arguments" };
                return Some(format!(
                    "takes {max} positional {noun} but {given} {verb} given"
                ));
            }
            return Some(format!(
                "takes from {min} to {max} positional arguments but {given} {verb} given"
            ));
        }
        None
    }
}

fn join_quoted(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => format!("'{only}'"),
        [first, second] => format!("'{first}' and '{second}'"),
        [init @ .., last] => {
            let head = init
                .iter()
                .map(|n| format!("'{n}'"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{head}, and '{last}'")
        }
    }
}

/// Create a signature builder.
pub fn sig() -> SignatureBuilder {
    SignatureBuilder::default()
}

/// Builder for [`Signature`].
#[derive(Debug, Default)]
pub struct SignatureBuilder {
    signature: Signature,
}

impl SignatureBuilder {
    /// Add a required positional parameter.
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.signature.required.push(name.into());
        self
    }

    /// Add an optional positional parameter (one with a default).
    pub fn optional(mut self, name: impl Into<String>) -> Self {
        self.signature.optional.push(name.into());
        self
    }

    /// Set the trailing variadic parameter; makes the arity unbounded.
    pub fn variadic(mut self, name: impl Into<String>) -> Self {
        self.signature.variadic = Some(name.into());
        self
    }

    pub fn build(self) -> Result<Signature, SetupError> {
        self.signature.validate()?;
        Ok(self.signature)
    }
}
