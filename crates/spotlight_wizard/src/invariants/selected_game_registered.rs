//! A selected game always carries its registration.

use super::Invariant;
use crate::WizardState;

/// Invariant: the selected game is registered with a theme and description.
pub struct SelectedGameRegisteredInvariant;

impl Invariant<WizardState> for SelectedGameRegisteredInvariant {
    fn holds(state: &WizardState) -> bool {
        match state.selected_game() {
            Some(game) => game.is_registered() && game.theme().is_some() && game.description().is_some(),
            None => true,
        }
    }

    fn description() -> &'static str {
        "Selected game is registered with theme and description"
    }
}
