//! Eligibility report for a catalog.

use derive_getters::Getters;
use derive_new::new;
use serde::Serialize;
use spotlight_wizard::{Catalog, EligibilityIssue, GameRecord, WorkflowRequest};
use tracing::instrument;

/// One catalog entry with its eligibility verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters, new)]
pub struct ReportRow {
    game: GameRecord,
    issue: Option<EligibilityIssue>,
}

impl ReportRow {
    /// What the user can do about the issue, if anything.
    pub fn remedy(&self) -> Option<WorkflowRequest> {
        self.issue.and_then(EligibilityIssue::remedy)
    }

    /// Whether the game can be registered now.
    pub fn is_selectable(&self) -> bool {
        self.issue.is_none() && !self.game.is_registered()
    }

    /// One-word verdict for the status column.
    pub fn verdict(&self) -> &'static str {
        if self.game.is_registered() {
            "registered"
        } else if self.issue.is_some() {
            "blocked"
        } else {
            "eligible"
        }
    }
}

/// Eligibility of every game in a catalog, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct EligibilityReport {
    rows: Vec<ReportRow>,
}

impl EligibilityReport {
    /// Evaluates the eligibility policy over the catalog.
    #[instrument(skip(catalog), fields(games = catalog.len()))]
    pub fn build(catalog: &Catalog) -> Self {
        let rows = catalog
            .iter()
            .map(|game| ReportRow::new(game.clone(), game.eligibility_issue()))
            .collect();
        Self { rows }
    }

    /// Number of games that can be registered now.
    pub fn selectable_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_selectable()).count()
    }

    /// What the user should do next when nothing is selectable.
    pub fn suggested_request(&self) -> Option<WorkflowRequest> {
        if self.selectable_count() > 0 {
            return None;
        }
        self.rows
            .iter()
            .find_map(ReportRow::remedy)
            .or(Some(WorkflowRequest::CreateGame))
    }
}

impl std::fmt::Display for EligibilityReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.rows.is_empty() {
            writeln!(f, "No games in the catalog.")?;
        }
        for row in &self.rows {
            let game = row.game();
            write!(
                f,
                "{:<10} {:<11} {:<10} {:<9} {}",
                game.id(),
                game.game_type(),
                game.status(),
                row.verdict(),
                game.name()
            )?;
            if let Some(issue) = row.issue() {
                write!(f, " ({})", issue)?;
            }
            if let Some(remedy) = row.remedy() {
                write!(f, " -> {}", remedy.label())?;
            }
            writeln!(f)?;
        }
        write!(f, "{} of {} games can be registered", self.selectable_count(), self.rows.len())?;
        if let Some(request) = self.suggested_request() {
            write!(f, "\nSuggested next step: {}", request.label())?;
        }
        Ok(())
    }
}
