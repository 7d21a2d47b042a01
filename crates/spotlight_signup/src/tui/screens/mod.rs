//! Screen implementations, one per wizard step.

mod complete;
mod contact_form;
mod game_registration;

pub use complete::CompleteScreen;
pub use contact_form::{ContactFocus, ContactFormScreen};
pub use game_registration::{GameRegistrationScreen, RegistrationFocus};
