//! Phase-specific typestate structs for the wizard.
//!
//! Each step is its own type carrying exactly the data that step has. A
//! [`Registered`] wizard always has contact info and a selected game, never
//! `Option`s. Transitions borrow the current phase and return a new one, so
//! a rejected transition leaves the caller's value as it was.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::action::{Registration, WizardError};
use crate::catalog::Catalog;
use crate::contracts::{ContactFieldsValid, LegalRegistration};
use crate::types::{ContactInfo, GameRecord};
use crate::validation::{Field, FieldErrors, RegistrationRules};

// ─────────────────────────────────────────────────────────────
//  Contact Phase
// ─────────────────────────────────────────────────────────────

/// Wizard waiting for contact info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwaitingContact {
    #[serde(rename = "games")]
    pub(crate) catalog: Catalog,
    pub(crate) rules: RegistrationRules,
}

impl AwaitingContact {
    /// Starts a wizard over the given catalog.
    #[instrument(skip(catalog, rules), fields(games = catalog.len()))]
    pub fn new(catalog: Catalog, rules: RegistrationRules) -> Self {
        info!("Starting registration wizard");
        Self { catalog, rules }
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the registration rules.
    pub fn rules(&self) -> &RegistrationRules {
        &self.rules
    }

    /// Records contact info and moves on to game registration.
    #[instrument(skip(self, contact))]
    pub fn submit_contact(&self, contact: ContactInfo) -> Result<AwaitingGame, WizardError> {
        ContactFieldsValid::check(&contact)?;
        info!("Contact info accepted");
        Ok(AwaitingGame {
            contact,
            catalog: self.catalog.clone(),
            rules: self.rules.clone(),
        })
    }
}

// ─────────────────────────────────────────────────────────────
//  Game Registration Phase
// ─────────────────────────────────────────────────────────────

/// Wizard with contact info, waiting for a game registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwaitingGame {
    #[serde(rename = "contactInfo")]
    pub(crate) contact: ContactInfo,
    #[serde(rename = "games")]
    pub(crate) catalog: Catalog,
    pub(crate) rules: RegistrationRules,
}

impl AwaitingGame {
    /// Returns the recorded contact info.
    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the registration rules.
    pub fn rules(&self) -> &RegistrationRules {
        &self.rules
    }

    /// Games that may be registered now.
    pub fn selectable_games(&self) -> impl Iterator<Item = &GameRecord> {
        self.catalog.selectable()
    }

    /// Replaces the contact info, staying in this phase.
    #[instrument(skip(self, contact))]
    pub fn edit_contact(&self, contact: ContactInfo) -> Result<AwaitingGame, WizardError> {
        ContactFieldsValid::check(&contact)?;
        debug!("Contact info replaced");
        Ok(AwaitingGame {
            contact,
            ..self.clone()
        })
    }

    /// Checks a registration without applying it.
    pub fn validate(&self, registration: &Registration) -> Result<(), WizardError> {
        LegalRegistration::check(registration, self)
    }

    /// Registers a game and completes the wizard.
    ///
    /// The selection is a registered copy of the catalog entry; the catalog
    /// itself is unchanged until the user moves on to another game.
    #[instrument(skip(self, registration), fields(game_id = %registration.game_id))]
    pub fn register(&self, registration: &Registration) -> Result<Registered, WizardError> {
        self.validate(registration)?;

        let game = self.catalog.get(&registration.game_id).ok_or_else(|| {
            let mut errors = FieldErrors::new();
            errors.insert(Field::Game, "game not found");
            WizardError::Invalid(errors)
        })?;

        let selected = game.registered_with(&registration.theme, &registration.description);
        info!(theme = %registration.theme, "Game registered");

        Ok(Registered {
            contact: self.contact.clone(),
            catalog: self.catalog.clone(),
            rules: self.rules.clone(),
            selected,
        })
    }
}

// ─────────────────────────────────────────────────────────────
//  Registered Phase
// ─────────────────────────────────────────────────────────────

/// Wizard complete: contact info and a registered game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registered {
    #[serde(rename = "contactInfo")]
    pub(crate) contact: ContactInfo,
    #[serde(rename = "games")]
    pub(crate) catalog: Catalog,
    pub(crate) rules: RegistrationRules,
    #[serde(rename = "selectedGame")]
    pub(crate) selected: GameRecord,
}

impl Registered {
    /// Returns the recorded contact info.
    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the registration rules.
    pub fn rules(&self) -> &RegistrationRules {
        &self.rules
    }

    /// Returns the registered game. Never absent in this phase.
    pub fn selected_game(&self) -> &GameRecord {
        &self.selected
    }

    /// Replaces the contact info, keeping the registration.
    #[instrument(skip(self, contact))]
    pub fn edit_contact(&self, contact: ContactInfo) -> Result<Registered, WizardError> {
        ContactFieldsValid::check(&contact)?;
        debug!("Contact info replaced after registration");
        Ok(Registered {
            contact,
            ..self.clone()
        })
    }

    /// Goes back to game registration to enter another game.
    ///
    /// The registration is written back into the catalog so the game shows
    /// as registered and can no longer be selected.
    #[instrument(skip(self), fields(game_id = %self.selected.id()))]
    pub fn register_another(&self) -> AwaitingGame {
        info!("Returning to game registration");
        AwaitingGame {
            contact: self.contact.clone(),
            catalog: self.catalog.with_record(self.selected.clone()),
            rules: self.rules.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameId;

    fn awaiting_game() -> AwaitingGame {
        AwaitingContact::new(Catalog::sample(), RegistrationRules::default())
            .submit_contact(ContactInfo::new("13800000000", "abc"))
            .expect("valid contact")
    }

    #[test]
    fn test_lifecycle() {
        let game_phase = awaiting_game();
        assert_eq!(game_phase.contact().phone(), "13800000000");
        assert_eq!(game_phase.selectable_games().count(), 2);

        let done = game_phase
            .register(&Registration::new("game-1", "重力", "一个关于重力玩法的创新设计"))
            .expect("valid registration");
        assert_eq!(done.selected_game().theme(), Some("重力"));

        let again = done.register_another();
        assert_eq!(again.selectable_games().count(), 1);
        assert!(
            again
                .catalog()
                .get(&GameId::from("game-1"))
                .is_some_and(|g| g.is_registered())
        );
    }

    #[test]
    fn test_rejected_contact_leaves_phase_usable() {
        let phase = AwaitingContact::new(Catalog::sample(), RegistrationRules::default());
        assert!(phase.submit_contact(ContactInfo::new("", "")).is_err());
        assert!(phase.submit_contact(ContactInfo::new("13800000000", "abc")).is_ok());
    }

    #[test]
    fn test_selection_is_a_value_copy() {
        let done = awaiting_game()
            .register(&Registration::new("game-2", "盲盒", "every level is a surprise"))
            .expect("valid registration");
        let catalog_entry = done.catalog().get(&GameId::from("game-2")).expect("present");
        assert!(!catalog_entry.is_registered());
        assert!(done.selected_game().is_registered());
    }

    #[test]
    fn test_edit_contact_keeps_registration() {
        let done = awaiting_game()
            .register(&Registration::new("game-2", "盲盒", "every level is a surprise"))
            .expect("valid registration");
        let edited = done
            .edit_contact(ContactInfo::new("13900000000", "new_wx"))
            .expect("valid edit");
        assert_eq!(edited.selected_game(), done.selected_game());
        assert_eq!(edited.contact().wechat(), "new_wx");
    }
}
