//! Spotlight Wizard - registration logic for a themed game campaign
//!
//! A developer enters contact info, then registers one of their games under
//! a campaign theme. The wizard enforces the step order, validates every
//! field and only offers games that meet the campaign's eligibility policy.
//!
//! # Architecture
//!
//! - **Phases**: typestate structs, one per step
//! - **State**: a serializable enum over the phases, with pure transitions
//! - **Contracts**: preconditions and debug-build postconditions per transition
//! - **Wizard**: the session object, owning the state and the workflow hooks
//!
//! # Example
//!
//! ```
//! use spotlight_wizard::{Catalog, ContactInfo, Registration, RegistrationRules, Step, Wizard};
//!
//! let mut wizard = Wizard::with_tracing(Catalog::sample(), RegistrationRules::default());
//! wizard.submit_contact_info(ContactInfo::new("13800000000", "abc"))?;
//! wizard.register_game(Registration::new("game-1", "重力", "一个关于重力玩法的创新设计"))?;
//! assert_eq!(wizard.step(), Step::Complete);
//! # Ok::<(), spotlight_wizard::WizardError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod catalog;
mod contracts;
mod eligibility;
mod hooks;
mod phases;
mod state;
mod types;
mod typestate;
mod validation;
mod wizard;

pub mod invariants;

// Crate-level exports - Domain types
pub use types::{ContactInfo, GameId, GameRecord, GameStatus, GameType};

// Crate-level exports - Eligibility policy
pub use eligibility::{EligibilityIssue, eligibility_issue, is_eligible};

// Crate-level exports - External workflows
pub use hooks::{RecordingHooks, TracingHooks, WorkflowHooks, WorkflowRequest};

// Crate-level exports - Validation
pub use validation::{
    DEFAULT_MIN_DESCRIPTION_CHARS, DEFAULT_THEMES, Field, FieldErrors, PHONE_DIGITS, RegistrationRules,
    is_valid_phone, validate_contact_info, validate_registration,
};

// Crate-level exports - Catalog
pub use catalog::{Catalog, CatalogError};

// Crate-level exports - Actions and errors
pub use action::{ChangeGame, Registration, WizardError};

// Crate-level exports - Steps and phases
pub use phases::Step;
pub use typestate::{AwaitingContact, AwaitingGame, Registered};

// Crate-level exports - Contracts
pub use contracts::{
    ChangeGameContract, ContactContract, ContactFieldsValid, Contract, GameSelectable, LegalRegistration,
    RegistrationContract, RegistrationFieldsValid,
};

// Crate-level exports - State and session
pub use state::{Snapshot, WizardState};
pub use wizard::Wizard;
