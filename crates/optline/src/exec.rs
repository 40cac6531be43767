//! Execution engine: validates each translated group, coerces typed
//! values, sets boolean cells and invokes handlers in encounter order.

use std::error::Error;
use std::process::ExitCode;

use crate::error::{HandlerError, RunError, Termination, UsageError};
use crate::option::{Opt, OptKind};
use crate::registry::Registry;
use crate::signature::Signature;
use crate::slot::{Slot, SlotValue};
use crate::translate::{Translation, translate};

/// How a completed pipeline ended.
#[derive(Debug)]
pub enum Outcome {
    /// Every matched option was dispatched.
    Completed,
    /// A handler (or the built-in help option) requested a deliberate,
    /// successful exit; later groups were not dispatched.
    Exited(Termination),
}

/// Dispatch every group of `translation` in encounter order.
///
/// The first failure aborts the remaining groups; side effects of
/// already-dispatched options are not rolled back.
pub fn execute(registry: &Registry, translation: &Translation) -> Result<Outcome, RunError> {
    for (id, tokens) in translation.iter() {
        let option = registry.get(id);
        tracing::debug!(
            option = option.long(),
            tokens = tokens.len(),
            "dispatching option"
        );

        match option.kind() {
            OptKind::Flag(cell) => {
                if !tokens.is_empty() {
                    return Err(UsageError::TooManyArgs {
                        long: option.long().to_string(),
                        max: 0,
                        given: tokens.len(),
                    }
                    .into());
                }
                cell.set(true);
            }
            OptKind::Var { slots } => {
                check_var_arity(option, tokens)?;
                set_var_values(option, slots, tokens)?;
            }
            OptKind::Func { handler, signature } => {
                check_call_shape(option, signature, tokens)?;
                match (handler.borrow_mut())(tokens) {
                    Ok(()) => {}
                    Err(HandlerError::Exit(termination)) => {
                        return Ok(Outcome::Exited(termination));
                    }
                    Err(HandlerError::Failure(e)) => return Err(RunError::Handler(e)),
                }
            }
            OptKind::Help => {
                check_call_shape(option, &Signature::default(), tokens)?;
                return Ok(Outcome::Exited(Termination::new(registry.render_help())));
            }
        }
    }
    Ok(Outcome::Completed)
}

/// Translate `argv` (excluding the program name) and dispatch the result.
pub fn exec(registry: &Registry, argv: &[String]) -> Result<Outcome, RunError> {
    let translation = translate(registry, argv)?;
    execute(registry, &translation)
}

/// Process-facing wrapper around [`exec`].
///
/// Usage errors become a single-line stderr message (plus the registry's
/// help hint) and a failing exit code; a deliberate termination prints
/// its message and exits successfully. Handler failures are handed back
/// to the caller unchanged so they crash loudly instead of posing as
/// user mistakes.
pub fn run(registry: &Registry, argv: &[String]) -> Result<ExitCode, Box<dyn Error>> {
    match exec(registry, argv) {
        Ok(Outcome::Completed) => Ok(ExitCode::SUCCESS),
        Ok(Outcome::Exited(termination)) => {
            println!("{termination}");
            Ok(ExitCode::SUCCESS)
        }
        Err(RunError::Usage(e)) => {
            let style = registry.style();
            if style.show_help_note {
                eprintln!("{e}\n{}", style.help_note);
            } else {
                eprintln!("{e}");
            }
            Ok(ExitCode::FAILURE)
        }
        Err(RunError::Handler(e)) => Err(e),
    }
}

fn check_call_shape(
    option: &Opt,
    signature: &Signature,
    tokens: &[String],
) -> Result<(), UsageError> {
    match signature.mismatch(tokens.len()) {
        Some(message) => Err(UsageError::Param {
            long: option.long().to_string(),
            message,
        }),
        None => Ok(()),
    }
}

fn check_var_arity(option: &Opt, tokens: &[String]) -> Result<(), UsageError> {
    if let Some(max) = option.max_params()
        && tokens.len() > max
    {
        return Err(UsageError::TooManyArgs {
            long: option.long().to_string(),
            max,
            given: tokens.len(),
        });
    }
    if tokens.len() < option.min_params() {
        return Err(UsageError::MissingArgs {
            long: option.long().to_string(),
            missing: option.min_params() - tokens.len(),
        });
    }
    Ok(())
}

fn set_var_values(option: &Opt, slots: &[Slot], tokens: &[String]) -> Result<(), UsageError> {
    for (i, token) in tokens.iter().enumerate() {
        let slot = &slots[i];
        if slot.aterisk() {
            slot.set(SlotValue::List(tokens[i..].to_vec()));
            break;
        }
        match slot.vtype() {
            Some(vtype) => match vtype.coerce(token) {
                Ok(value) => slot.set(value),
                Err(()) => {
                    return Err(UsageError::TypeCoercion {
                        long: option.long().to_string(),
                        index: i + 1,
                        ty: vtype.name(),
                    });
                }
            },
            None => slot.set(SlotValue::Str(token.clone())),
        }
    }
    Ok(())
}
