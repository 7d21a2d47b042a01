//! Wizard actions and the errors they can raise.

use serde::{Deserialize, Serialize};

use crate::phases::Step;
use crate::types::GameId;
use crate::validation::FieldErrors;

/// Request to register a catalog game under a campaign theme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Registration {
    /// The game to register.
    pub game_id: GameId,
    /// The chosen theme.
    pub theme: String,
    /// How the game expresses the theme.
    pub description: String,
}

impl Registration {
    /// Creates a registration request.
    pub fn new(
        game_id: impl Into<GameId>,
        theme: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            game_id: game_id.into(),
            theme: theme.into(),
            description: description.into(),
        }
    }
}

impl std::fmt::Display for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} as {}", self.game_id, self.theme)
    }
}

/// Request to go back and register another game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChangeGame;

/// Error returned by a rejected transition. The state is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum WizardError {
    /// One or more fields failed validation.
    #[display("Invalid input: {}", _0)]
    Invalid(FieldErrors),

    /// The action does not apply at the current step.
    #[display("Action needs step '{}' but the wizard is at '{}'", expected, actual)]
    WrongStep {
        /// Step the action applies to.
        expected: Step,
        /// Step the wizard is at.
        actual: Step,
    },

    /// A postcondition failed.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for WizardError {}

impl From<FieldErrors> for WizardError {
    fn from(errors: FieldErrors) -> Self {
        Self::Invalid(errors)
    }
}

impl WizardError {
    /// Field errors, when this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}
