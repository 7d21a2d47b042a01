//! Only eligible games can be selected.

use super::Invariant;
use crate::WizardState;

/// Invariant: the selected game passes the eligibility policy.
pub struct SelectedGameEligibleInvariant;

impl Invariant<WizardState> for SelectedGameEligibleInvariant {
    fn holds(state: &WizardState) -> bool {
        state.selected_game().is_none_or(|game| game.is_eligible())
    }

    fn description() -> &'static str {
        "Selected game is eligible"
    }
}
