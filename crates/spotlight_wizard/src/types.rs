//! Core domain types for the registration wizard.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Stable identifier of a catalog game.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// Creates a game id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for GameId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How a game is delivered on the platform.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    /// TapPlay cloud game.
    #[strum(serialize = "TapPlay")]
    TapPlay,
    /// Mini-game.
    #[strum(serialize = "mini-game")]
    MiniGame,
    /// Anything else; must be integrated before it can take part.
    #[strum(serialize = "other")]
    Other,
}

/// Publication status of a game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Not yet submitted.
    #[strum(serialize = "draft")]
    Draft,
    /// Submitted and waiting for approval.
    #[strum(serialize = "in review")]
    Review,
    /// Approved for testing.
    #[strum(serialize = "test")]
    Test,
    /// Publicly released.
    #[strum(serialize = "online")]
    Online,
}

/// A submittable game from the catalog.
///
/// Records are values. Registration produces a new record through
/// [`GameRecord::registered_with`]; the original is never touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    id: GameId,
    name: String,
    #[serde(rename = "type")]
    game_type: GameType,
    status: GameStatus,
    #[serde(default)]
    is_registered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl GameRecord {
    /// Creates an unregistered game record.
    pub fn new(
        id: impl Into<GameId>,
        name: impl Into<String>,
        game_type: GameType,
        status: GameStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            game_type,
            status,
            is_registered: false,
            theme: None,
            description: None,
        }
    }

    /// Returns the game id.
    pub fn id(&self) -> &GameId {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the delivery type.
    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    /// Returns the publication status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true once the game has been registered into the campaign.
    pub fn is_registered(&self) -> bool {
        self.is_registered
    }

    /// Returns the chosen theme, if registered.
    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    /// Returns the theme description, if registered.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns a registered copy of this record carrying theme and description.
    #[instrument(skip(self, theme, description), fields(game_id = %self.id))]
    pub fn registered_with(&self, theme: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            is_registered: true,
            theme: Some(theme.into()),
            description: Some(description.into()),
            ..self.clone()
        }
    }

    /// Returns true if the game passes the eligibility policy.
    pub fn is_eligible(&self) -> bool {
        crate::eligibility::is_eligible(self)
    }

    /// Returns the first eligibility issue, if any.
    pub fn eligibility_issue(&self) -> Option<crate::EligibilityIssue> {
        crate::eligibility::eligibility_issue(self)
    }

    /// Returns true if the game may be picked for registration right now.
    pub fn is_selectable(&self) -> bool {
        self.is_eligible() && !self.is_registered
    }
}

/// Contact details submitted in the first wizard step.
///
/// Replaced as a whole on edit; there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Mainland China mobile number.
    phone: String,
    /// WeChat account id.
    wechat: String,
}

impl ContactInfo {
    /// Creates contact info. Validation happens on submission, not here.
    pub fn new(phone: impl Into<String>, wechat: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            wechat: wechat.into(),
        }
    }
}
