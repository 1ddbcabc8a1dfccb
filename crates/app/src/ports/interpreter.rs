//! Command interpreter port: turns a free-form prompt into device actions.

use std::future::Future;

use homecontrol_domain::command::InterpretedCommand;
use homecontrol_domain::home::HomeSnapshot;

/// Parses natural-language commands against the current home.
///
/// Returning `None` means the interpreter could not produce anything
/// (not configured, remote failure, unparsable answer).
pub trait CommandInterpreter: Send + Sync {
    fn interpret(
        &self,
        prompt: &str,
        home: &HomeSnapshot,
    ) -> impl Future<Output = Option<InterpretedCommand>> + Send;
}

/// Interpreter used when no language model is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableInterpreter;

impl CommandInterpreter for UnavailableInterpreter {
    fn interpret(
        &self,
        prompt: &str,
        _home: &HomeSnapshot,
    ) -> impl Future<Output = Option<InterpretedCommand>> + Send {
        tracing::warn!(
            prompt_len = prompt.len(),
            "no command interpreter configured, ignoring prompt"
        );
        async { None }
    }
}
