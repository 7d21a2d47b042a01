//! The selected game comes from the catalog.

use super::Invariant;
use crate::WizardState;

/// Invariant: the selected game's id names a catalog entry.
pub struct SelectedGameInCatalogInvariant;

impl Invariant<WizardState> for SelectedGameInCatalogInvariant {
    fn holds(state: &WizardState) -> bool {
        match state.selected_game() {
            Some(game) => state.catalog().get(game.id()).is_some(),
            None => true,
        }
    }

    fn description() -> &'static str {
        "Selected game exists in the catalog"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Catalog, ContactInfo, GameRecord, GameStatus, GameType, Registration, RegistrationRules};

    #[test]
    fn test_selection_from_catalog_holds() {
        let state = WizardState::new(Catalog::sample(), RegistrationRules::default())
            .submit_contact_info(ContactInfo::new("13700000000", "someone"))
            .and_then(|s| s.register_game(&Registration::new("game-2", "重启人生", "a second chance at life")))
            .expect("valid flow");
        assert!(SelectedGameInCatalogInvariant::holds(&state));
    }

    #[test]
    fn test_foreign_selection_violates() {
        let mut state = WizardState::new(Catalog::sample(), RegistrationRules::default())
            .submit_contact_info(ContactInfo::new("13700000000", "someone"))
            .and_then(|s| s.register_game(&Registration::new("game-2", "重启人生", "a second chance at life")))
            .expect("valid flow");
        if let WizardState::Complete(registered) = &mut state {
            registered.selected = GameRecord::new("elsewhere", "Elsewhere", GameType::MiniGame, GameStatus::Test)
                .registered_with("重启人生", "a second chance at life");
        }
        assert!(!SelectedGameInCatalogInvariant::holds(&state));
    }
}
