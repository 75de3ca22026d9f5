//! Advisory password strength. The tier is presentational only and never
//! participates in the submittable decision.

use serde::Serialize;

/// Symbols counted by the special-character check.
pub const SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

const MIN_STRONG_LENGTH: usize = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthTier {
    #[default]
    None,
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthTier {
    /// Text shown next to the indicator.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "Password strength",
            Self::Weak => "Weak password",
            Self::Fair => "Fair password",
            Self::Good => "Good password",
            Self::Strong => "Strong password",
        }
    }

    /// State class for the indicator bar, empty when there is nothing to show.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Weak => "weak",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::Strong => "strong",
        }
    }

    /// Fill of the proportional indicator.
    #[must_use]
    pub const fn percent(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Weak => 25,
            Self::Fair => 50,
            Self::Good => 75,
            Self::Strong => 100,
        }
    }
}

/// Number of satisfied checks out of five.
#[must_use]
pub fn satisfied_checks(password: &str) -> usize {
    [
        password.chars().count() >= MIN_STRONG_LENGTH,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| SYMBOLS.contains(c)),
    ]
    .into_iter()
    .filter(|passed| *passed)
    .count()
}

#[must_use]
pub fn score(password: &str) -> StrengthTier {
    if password.is_empty() {
        return StrengthTier::None;
    }
    match satisfied_checks(password) {
        0..=2 => StrengthTier::Weak,
        3 => StrengthTier::Fair,
        4 => StrengthTier::Good,
        _ => StrengthTier::Strong,
    }
}
