//! Serializable wizard state covering every phase.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::action::{Registration, WizardError};
use crate::catalog::Catalog;
use crate::contracts::{ChangeGameContract, Contract, ContactContract, RegistrationContract};
use crate::invariants::{InvariantSet, WizardInvariants};
use crate::phases::Step;
use crate::typestate::{AwaitingContact, AwaitingGame, Registered};
use crate::types::{ContactInfo, GameRecord};
use crate::validation::{FieldErrors, RegistrationRules, validate_contact_info, validate_registration};

/// Wizard state in any phase.
///
/// Each variant holds the typestate struct for its step, so the step can
/// never disagree with which of contact info and selected game are present.
/// Transitions are pure: they return a new state and leave `self` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum WizardState {
    /// Waiting for contact info.
    NeedsContactInfo(AwaitingContact),
    /// Waiting for a game registration.
    NeedsGameRegistration(AwaitingGame),
    /// A game has been registered.
    Complete(Registered),
}

impl From<AwaitingContact> for WizardState {
    fn from(phase: AwaitingContact) -> Self {
        Self::NeedsContactInfo(phase)
    }
}

impl From<AwaitingGame> for WizardState {
    fn from(phase: AwaitingGame) -> Self {
        Self::NeedsGameRegistration(phase)
    }
}

impl From<Registered> for WizardState {
    fn from(phase: Registered) -> Self {
        Self::Complete(phase)
    }
}

impl WizardState {
    /// Creates the initial state for a session.
    pub fn new(catalog: Catalog, rules: RegistrationRules) -> Self {
        AwaitingContact::new(catalog, rules).into()
    }

    /// Returns the current step.
    pub fn step(&self) -> Step {
        match self {
            Self::NeedsContactInfo(_) => Step::NeedsContactInfo,
            Self::NeedsGameRegistration(_) => Step::NeedsGameRegistration,
            Self::Complete(_) => Step::Complete,
        }
    }

    /// Returns the contact info, absent only before the first submission.
    pub fn contact_info(&self) -> Option<&ContactInfo> {
        match self {
            Self::NeedsContactInfo(_) => None,
            Self::NeedsGameRegistration(phase) => Some(phase.contact()),
            Self::Complete(phase) => Some(phase.contact()),
        }
    }

    /// Returns the registered game, present only when complete.
    pub fn selected_game(&self) -> Option<&GameRecord> {
        match self {
            Self::Complete(phase) => Some(phase.selected_game()),
            _ => None,
        }
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &Catalog {
        match self {
            Self::NeedsContactInfo(phase) => phase.catalog(),
            Self::NeedsGameRegistration(phase) => phase.catalog(),
            Self::Complete(phase) => phase.catalog(),
        }
    }

    /// Returns the games in catalog order.
    pub fn games(&self) -> &[GameRecord] {
        self.catalog().games()
    }

    /// Returns the registration rules.
    pub fn rules(&self) -> &RegistrationRules {
        match self {
            Self::NeedsContactInfo(phase) => phase.rules(),
            Self::NeedsGameRegistration(phase) => phase.rules(),
            Self::Complete(phase) => phase.rules(),
        }
    }

    /// Submits or edits contact info.
    ///
    /// Advances from `NeedsContactInfo`; at later steps the contact info is
    /// replaced and the step stays put.
    #[instrument(skip(self, contact), fields(step = %self.step()))]
    pub fn submit_contact_info(&self, contact: ContactInfo) -> Result<Self, WizardError> {
        let next: Self = match self {
            Self::NeedsContactInfo(phase) => phase.submit_contact(contact)?.into(),
            Self::NeedsGameRegistration(phase) => phase.edit_contact(contact)?.into(),
            Self::Complete(phase) => phase.edit_contact(contact)?.into(),
        };

        #[cfg(debug_assertions)]
        ContactContract::post(self, &next)?;

        debug!(next_step = %next.step(), "Contact transition applied");
        Ok(next)
    }

    /// Registers a game. Only legal at `NeedsGameRegistration`.
    #[instrument(skip(self, registration), fields(step = %self.step(), game_id = %registration.game_id))]
    pub fn register_game(&self, registration: &Registration) -> Result<Self, WizardError> {
        let next: Self = match self {
            Self::NeedsGameRegistration(phase) => phase.register(registration)?.into(),
            other => {
                warn!("Registration attempted at the wrong step");
                return Err(WizardError::WrongStep {
                    expected: Step::NeedsGameRegistration,
                    actual: other.step(),
                });
            }
        };

        #[cfg(debug_assertions)]
        RegistrationContract::post(self, &next)?;

        Ok(next)
    }

    /// Returns to game registration, folding any registration into the catalog.
    ///
    /// Already at `NeedsGameRegistration` this returns an equal state.
    #[instrument(skip(self), fields(step = %self.step()))]
    pub fn change_game(&self) -> Result<Self, WizardError> {
        let next: Self = match self {
            Self::Complete(phase) => phase.register_another().into(),
            Self::NeedsGameRegistration(_) => self.clone(),
            Self::NeedsContactInfo(_) => {
                warn!("Change of game attempted before contact info");
                return Err(WizardError::WrongStep {
                    expected: Step::Complete,
                    actual: Step::NeedsContactInfo,
                });
            }
        };

        #[cfg(debug_assertions)]
        ChangeGameContract::post(self, &next)?;

        Ok(next)
    }

    /// Alias of [`WizardState::change_game`].
    pub fn continue_with_another_game(&self) -> Result<Self, WizardError> {
        self.change_game()
    }

    /// Checks a registration against this state without applying it.
    pub fn check_registration(&self, registration: &Registration) -> Result<(), WizardError> {
        RegistrationContract::pre(self, registration)
    }

    /// Verifies all invariants, e.g. after deserializing a snapshot.
    ///
    /// Recorded contact info and the selected game's theme and description
    /// must also pass the same validation a live submission would.
    #[instrument(skip(self))]
    pub fn verify(&self) -> Result<(), WizardError> {
        WizardInvariants::check_all(self).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            WizardError::InvariantViolation(descriptions)
        })?;

        let mut errors = FieldErrors::new();
        if let Some(contact) = self.contact_info() {
            errors.merge(validate_contact_info(contact));
        }
        if let Some(game) = self.selected_game() {
            errors.merge(validate_registration(
                game.theme().unwrap_or_default(),
                game.description().unwrap_or_default(),
                self.rules(),
            ));
        }
        if !errors.is_empty() {
            warn!(%errors, "Stored state fails field validation");
        }
        errors.into_result().map_err(WizardError::Invalid)
    }

    /// Flat, read-only view for presentation.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(self)
    }
}

/// Flat view of a wizard state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Current step.
    pub step: Step,
    /// Contact info, if recorded.
    pub contact_info: Option<ContactInfo>,
    /// Registered game, if complete.
    pub selected_game: Option<GameRecord>,
    /// Games in catalog order.
    pub games: Vec<GameRecord>,
}

impl From<&WizardState> for Snapshot {
    fn from(state: &WizardState) -> Self {
        Self {
            step: state.step(),
            contact_info: state.contact_info().cloned(),
            selected_game: state.selected_game().cloned(),
            games: state.games().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> WizardState {
        WizardState::new(Catalog::sample(), RegistrationRules::default())
    }

    #[test]
    fn test_fresh_state() {
        let state = fresh();
        assert_eq!(state.step(), Step::NeedsContactInfo);
        assert!(state.contact_info().is_none());
        assert!(state.selected_game().is_none());
        assert_eq!(state.games().len(), 5);
    }

    #[test]
    fn test_change_game_rejected_before_contact() {
        let state = fresh();
        assert!(matches!(
            state.change_game(),
            Err(WizardError::WrongStep {
                actual: Step::NeedsContactInfo,
                ..
            })
        ));
    }

    #[test]
    fn test_change_game_idempotent_at_game_step() {
        let state = fresh()
            .submit_contact_info(ContactInfo::new("13800000000", "abc"))
            .expect("valid contact");
        assert_eq!(state.change_game().expect("legal"), state);
    }

    #[test]
    fn test_serialized_shape() {
        let state = fresh()
            .submit_contact_info(ContactInfo::new("13800000000", "abc"))
            .and_then(|s| s.register_game(&Registration::new("game-1", "重力", "一个关于重力玩法的创新设计")))
            .expect("valid flow");

        let value = serde_json::to_value(&state).expect("serializable");
        assert_eq!(value["step"], "complete");
        assert_eq!(value["contactInfo"]["phone"], "13800000000");
        assert_eq!(value["selectedGame"]["theme"], "重力");
        assert_eq!(value["games"].as_array().map(Vec::len), Some(5));

        let back: WizardState = serde_json::from_value(value).expect("deserializable");
        assert_eq!(back, state);
        assert!(back.verify().is_ok());
    }

    #[test]
    fn test_snapshot_matches_state() {
        let state = fresh()
            .submit_contact_info(ContactInfo::new("13800000000", "abc"))
            .expect("valid contact");
        let snapshot = state.snapshot();
        assert_eq!(snapshot.step, Step::NeedsGameRegistration);
        assert_eq!(snapshot.contact_info.as_ref(), state.contact_info());
        assert!(snapshot.selected_game.is_none());

        let value = serde_json::to_value(&snapshot).expect("serializable");
        assert_eq!(value["step"], "needs_game_registration");
        assert!(value["selectedGame"].is_null());
    }

    #[test]
    fn test_deserialized_corruption_caught_by_verify() {
        let json = serde_json::json!({
            "step": "complete",
            "contactInfo": {"phone": "13800000000", "wechat": "abc"},
            "games": [],
            "rules": {},
            "selectedGame": {"id": "ghost", "name": "Ghost", "type": "tapplay", "status": "online"}
        });
        let state: WizardState = serde_json::from_value(json).expect("shape is valid");
        assert!(state.verify().is_err());
    }
}
