//! Unique id invariant: no two catalog entries share an id.

use std::collections::HashSet;

use super::Invariant;
use crate::WizardState;

/// Invariant: game ids are unique across the catalog.
pub struct UniqueGameIdsInvariant;

impl Invariant<WizardState> for UniqueGameIdsInvariant {
    fn holds(state: &WizardState) -> bool {
        let mut seen = HashSet::new();
        state.games().iter().all(|g| seen.insert(g.id()))
    }

    fn description() -> &'static str {
        "Game ids are unique across the catalog"
    }
}
