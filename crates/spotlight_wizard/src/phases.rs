//! Wizard steps.

use serde::{Deserialize, Serialize};

/// The step the wizard is at.
///
/// `NeedsContactInfo -> NeedsGameRegistration -> Complete`, plus
/// `Complete -> NeedsGameRegistration` to register another game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// No contact info yet.
    #[strum(serialize = "contact info")]
    NeedsContactInfo,
    /// Contact info recorded, no game registered.
    #[strum(serialize = "game registration")]
    NeedsGameRegistration,
    /// A game has been registered.
    #[strum(serialize = "complete")]
    Complete,
}

impl Step {
    /// One-based position for progress indicators.
    pub fn number(self) -> usize {
        match self {
            Self::NeedsContactInfo => 1,
            Self::NeedsGameRegistration => 2,
            Self::Complete => 3,
        }
    }

    /// Returns true once contact info has been recorded.
    pub fn has_contact_info(self) -> bool {
        !matches!(self, Self::NeedsContactInfo)
    }

    /// Returns true if `next` is a legal edge from this step.
    ///
    /// Staying put is legal everywhere (contact edits happen in place).
    pub fn can_move_to(self, next: Step) -> bool {
        use Step::*;
        matches!(
            (self, next),
            (NeedsContactInfo, NeedsContactInfo | NeedsGameRegistration)
                | (NeedsGameRegistration, NeedsGameRegistration | Complete)
                | (Complete, Complete | NeedsGameRegistration)
        )
    }
}
