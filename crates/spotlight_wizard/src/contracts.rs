//! Contract-based validation for wizard transitions.
//!
//! Each transition has a precondition over the current state and the action,
//! and a postcondition relating the state before and after.

use tracing::{instrument, warn};

use crate::action::{ChangeGame, Registration, WizardError};
use crate::catalog::Catalog;
use crate::invariants::{InvariantSet, WizardInvariants};
use crate::phases::Step;
use crate::state::WizardState;
use crate::typestate::AwaitingGame;
use crate::types::{ContactInfo, GameId};
use crate::validation::{Field, FieldErrors, RegistrationRules, validate_contact_info, validate_registration};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), WizardError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), WizardError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: contact fields pass validation.
pub struct ContactFieldsValid;

impl ContactFieldsValid {
    /// Rejects contact info with any field error.
    #[instrument(skip(contact))]
    pub fn check(contact: &ContactInfo) -> Result<(), WizardError> {
        validate_contact_info(contact).into_result()?;
        Ok(())
    }
}

/// Precondition: the game exists, is eligible, and is not yet registered.
pub struct GameSelectable;

impl GameSelectable {
    /// Records a `game` field error when the id cannot be registered.
    #[instrument(skip(catalog, errors))]
    pub fn check(catalog: &Catalog, id: &GameId, errors: &mut FieldErrors) {
        if id.as_str().is_empty() {
            errors.insert(Field::Game, "game required");
            return;
        }
        match catalog.get(id) {
            None => errors.insert(Field::Game, "game not found"),
            Some(game) => {
                if let Some(issue) = game.eligibility_issue() {
                    errors.insert(Field::Game, format!("game not eligible: {issue}"));
                } else if game.is_registered() {
                    errors.insert(Field::Game, "game already registered");
                }
            }
        }
    }
}

/// Precondition: theme and description follow the campaign rules.
pub struct RegistrationFieldsValid;

impl RegistrationFieldsValid {
    /// Records theme and description errors.
    #[instrument(skip(registration, rules, errors))]
    pub fn check(registration: &Registration, rules: &RegistrationRules, errors: &mut FieldErrors) {
        errors.merge(validate_registration(
            &registration.theme,
            &registration.description,
            rules,
        ));
    }
}

/// Composite precondition: every registration check, all errors collected.
pub struct LegalRegistration;

impl LegalRegistration {
    /// Validates a registration against a wizard awaiting a game.
    #[instrument(skip(registration, state), fields(game_id = %registration.game_id))]
    pub fn check(registration: &Registration, state: &AwaitingGame) -> Result<(), WizardError> {
        let mut errors = FieldErrors::new();
        GameSelectable::check(state.catalog(), &registration.game_id, &mut errors);
        RegistrationFieldsValid::check(registration, state.rules(), &mut errors);
        errors.into_result()?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Transition Contracts
// ─────────────────────────────────────────────────────────────

/// Maps invariant violations into a single error.
fn invariants_hold(state: &WizardState) -> Result<(), WizardError> {
    WizardInvariants::check_all(state).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%descriptions, "Postcondition failed");
        WizardError::InvariantViolation(format!("Postcondition failed: {descriptions}"))
    })
}

fn legal_edge(before: &WizardState, after: &WizardState) -> Result<(), WizardError> {
    ensure(
        before.step().can_move_to(after.step()),
        "Transition follows a legal step edge",
    )
}

fn ensure(condition: bool, message: &str) -> Result<(), WizardError> {
    if condition {
        Ok(())
    } else {
        warn!(message, "Postcondition failed");
        Err(WizardError::InvariantViolation(message.to_string()))
    }
}

/// Contract for submitting or editing contact info.
///
/// Preconditions:
/// - Phone and WeChat pass validation
///
/// Postconditions:
/// - Contact info is present
/// - The step advances only from `NeedsContactInfo`
/// - Catalog and selected game are untouched
pub struct ContactContract;

impl Contract<WizardState, ContactInfo> for ContactContract {
    fn pre(_state: &WizardState, contact: &ContactInfo) -> Result<(), WizardError> {
        ContactFieldsValid::check(contact)
    }

    fn post(before: &WizardState, after: &WizardState) -> Result<(), WizardError> {
        let expected_step = match before.step() {
            Step::NeedsContactInfo => Step::NeedsGameRegistration,
            other => other,
        };
        legal_edge(before, after)?;
        ensure(after.contact_info().is_some(), "Contact info recorded")?;
        ensure(after.step() == expected_step, "Contact submission moves only the first step")?;
        ensure(after.catalog() == before.catalog(), "Contact submission leaves the catalog alone")?;
        ensure(
            after.selected_game() == before.selected_game(),
            "Contact submission keeps the selected game",
        )?;
        invariants_hold(after)
    }
}

/// Contract for registering a game.
///
/// Preconditions:
/// - The wizard is at `NeedsGameRegistration`
/// - The game is selectable and the fields follow the campaign rules
///
/// Postconditions:
/// - The wizard is complete with a registered selection
/// - Contact info and catalog are untouched
pub struct RegistrationContract;

impl Contract<WizardState, Registration> for RegistrationContract {
    fn pre(state: &WizardState, registration: &Registration) -> Result<(), WizardError> {
        match state {
            WizardState::NeedsGameRegistration(phase) => LegalRegistration::check(registration, phase),
            other => Err(WizardError::WrongStep {
                expected: Step::NeedsGameRegistration,
                actual: other.step(),
            }),
        }
    }

    fn post(before: &WizardState, after: &WizardState) -> Result<(), WizardError> {
        legal_edge(before, after)?;
        ensure(after.step() == Step::Complete, "Registration completes the wizard")?;
        ensure(
            after.contact_info() == before.contact_info(),
            "Registration keeps contact info",
        )?;
        ensure(after.catalog() == before.catalog(), "Registration leaves the catalog alone")?;
        invariants_hold(after)
    }
}

/// Contract for going back to register another game.
///
/// Preconditions:
/// - Contact info has been recorded
///
/// Postconditions:
/// - The wizard is at `NeedsGameRegistration` with no selection
/// - A previous selection has been folded back into the catalog
pub struct ChangeGameContract;

impl Contract<WizardState, ChangeGame> for ChangeGameContract {
    fn pre(state: &WizardState, _action: &ChangeGame) -> Result<(), WizardError> {
        if state.step().has_contact_info() {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                expected: Step::Complete,
                actual: state.step(),
            })
        }
    }

    fn post(before: &WizardState, after: &WizardState) -> Result<(), WizardError> {
        legal_edge(before, after)?;
        ensure(
            after.step() == Step::NeedsGameRegistration,
            "Changing game returns to game registration",
        )?;
        ensure(after.selected_game().is_none(), "Changing game clears the selection")?;
        if let Some(previous) = before.selected_game() {
            ensure(
                after.catalog().get(previous.id()) == Some(previous),
                "Previous registration is folded into the catalog",
            )?;
        }
        invariants_hold(after)
    }
}
