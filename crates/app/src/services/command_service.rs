//! Command service: natural-language prompts turned into device actions.

use std::sync::Arc;

use serde::Serialize;

use homecontrol_domain::error::{HomeControlError, ValidationError};
use homecontrol_domain::home::Outcome;

use crate::ports::{CommandInterpreter, EventPublisher, SimulationNoise};
use crate::services::home_service::HomeService;

/// Reply used when the interpreter produced nothing.
pub const INTERPRETER_UNAVAILABLE: &str = "Command assistant is unavailable right now.";

/// What happened to a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandReply {
    /// `false` when the interpreter was unavailable.
    pub understood: bool,
    pub reply: String,
    pub outcome: Outcome,
}

/// Application service wiring an interpreter to the home.
pub struct CommandService<I, P, N> {
    interpreter: I,
    home: Arc<HomeService<P, N>>,
}

impl<I, P, N> CommandService<I, P, N>
where
    I: CommandInterpreter,
    P: EventPublisher,
    N: SimulationNoise,
{
    pub fn new(interpreter: I, home: Arc<HomeService<P, N>>) -> Self {
        Self { interpreter, home }
    }

    /// Interpret `prompt` against the current home and apply the result.
    ///
    /// The home is only read while the interpreter runs; actions go through
    /// the same gates as UI commands.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::Validation`] for a blank prompt.
    #[tracing::instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn execute(&self, prompt: &str) -> Result<CommandReply, HomeControlError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ValidationError::EmptyPrompt.into());
        }
        let snapshot = self.home.snapshot();
        let Some(command) = self.interpreter.interpret(prompt, &snapshot).await else {
            return Ok(CommandReply {
                understood: false,
                reply: INTERPRETER_UNAVAILABLE.to_string(),
                outcome: Outcome::Ignored,
            });
        };

        let outcome = self.home.apply_actions(&command.actions).await;
        let reply = match &outcome {
            Outcome::Advisory { notification } => notification.message.clone(),
            _ => command.reply,
        };
        Ok(CommandReply {
            understood: true,
            reply,
            outcome,
        })
    }
}
