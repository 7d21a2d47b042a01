//! Headless wizard run for scripts and smoke tests.

use derive_getters::Getters;
use derive_new::new;
use spotlight_wizard::{
    Catalog, ContactInfo, RecordingHooks, Registration, RegistrationRules, Snapshot, Wizard, WizardError,
};
use tracing::{info, instrument};

/// Inputs for one pass through the wizard.
///
/// Without a game the run stops at game registration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct WalkRequest {
    phone: String,
    wechat: String,
    game: Option<String>,
    theme: Option<String>,
    description: Option<String>,
}

impl WalkRequest {
    /// Registration built from the request, if a game was named.
    pub fn registration(&self) -> Option<Registration> {
        self.game.as_ref().map(|game| {
            Registration::new(
                game.as_str(),
                self.theme.clone().unwrap_or_default(),
                self.description.clone().unwrap_or_default(),
            )
        })
    }
}

/// Drives a wizard through contact info and an optional registration.
///
/// Returns the final snapshot, or the first rejected transition.
#[instrument(skip(catalog, rules, request), fields(game = ?request.game))]
pub fn walk(catalog: Catalog, rules: RegistrationRules, request: &WalkRequest) -> Result<Snapshot, WizardError> {
    let mut wizard = Wizard::new(catalog, rules, RecordingHooks::new());

    wizard.submit_contact_info(ContactInfo::new(request.phone.as_str(), request.wechat.as_str()))?;

    if let Some(registration) = request.registration() {
        if let Some(issue) = wizard
            .state()
            .catalog()
            .get(&registration.game_id)
            .and_then(|g| g.eligibility_issue())
            && let Some(remedy) = issue.remedy()
        {
            info!(%issue, "Game is not eligible, pointing at the remedy");
            wizard.request(remedy);
        }
        wizard.register_game(registration)?;
    }

    info!(step = %wizard.step(), "Headless run finished");
    Ok(wizard.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotlight_wizard::{Field, Step};

    fn request(game: Option<&str>, theme: Option<&str>, description: Option<&str>) -> WalkRequest {
        WalkRequest::new(
            "13800000000".to_string(),
            "abc".to_string(),
            game.map(str::to_string),
            theme.map(str::to_string),
            description.map(str::to_string),
        )
    }

    #[test]
    fn test_contact_only_stops_at_registration() {
        let snapshot = walk(Catalog::sample(), RegistrationRules::default(), &request(None, None, None))
            .expect("valid contact");
        assert_eq!(snapshot.step, Step::NeedsGameRegistration);
    }

    #[test]
    fn test_missing_theme_reported() {
        let err = walk(
            Catalog::sample(),
            RegistrationRules::default(),
            &request(Some("game-1"), None, Some("一个关于重力玩法的创新设计")),
        )
        .expect_err("theme missing");
        assert_eq!(
            err.field_errors().and_then(|e| e.get(Field::Theme)),
            Some("theme required")
        );
    }
}
