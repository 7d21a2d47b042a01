//! The selected game is a registered copy of its catalog entry.

use super::Invariant;
use crate::WizardState;

/// Invariant: apart from the registration fields, the selected game equals
/// the catalog entry with the same id.
///
/// A selection without a catalog entry or without a theme and description is
/// left to the other invariants.
pub struct SelectedGameMatchesCatalogInvariant;

impl Invariant<WizardState> for SelectedGameMatchesCatalogInvariant {
    fn holds(state: &WizardState) -> bool {
        let Some(game) = state.selected_game() else {
            return true;
        };
        let (Some(entry), Some(theme), Some(description)) =
            (state.catalog().get(game.id()), game.theme(), game.description())
        else {
            return true;
        };
        entry.registered_with(theme, description) == *game
    }

    fn description() -> &'static str {
        "Selected game matches its catalog entry"
    }
}
