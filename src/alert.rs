//! Alert system for displaying success, warning and error messages to users.
//!
//! Every user-triggered action ends with at most one alert.

use std::fmt::Display;

/// Alert message types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    /// The action completed.
    Success,
    /// The action did not complete but nothing went wrong.
    Warning,
    /// The action failed.
    Error,
}

/// A message for the user with optional details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// How the alert should be styled.
    pub alert_type: AlertType,
    /// A short summary.
    pub message: String,
    /// A longer explanation, may be empty.
    pub details: String,
}

impl Alert {
    /// Create a new success alert
    pub fn success(message: &str, details: &str) -> Self {
        Self::new(AlertType::Success, message, details)
    }

    /// Create a new warning alert
    pub fn warning(message: &str, details: &str) -> Self {
        Self::new(AlertType::Warning, message, details)
    }

    /// Create a new error alert
    pub fn error(message: &str, details: &str) -> Self {
        Self::new(AlertType::Error, message, details)
    }

    fn new(alert_type: AlertType, message: &str, details: &str) -> Self {
        Self {
            alert_type,
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Render the alert with ANSI colours for a terminal.
    pub fn to_ansi_string(&self) -> String {
        let colour = match self.alert_type {
            AlertType::Success => "32",
            AlertType::Warning => "33",
            AlertType::Error => "31",
        };

        format!("\x1b[{colour};1m{self}\x1b[0m")
    }
}

impl Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.details.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.message, capitalise_first_char(&self.details))
        }
    }
}

/// From https://crates.io/crates/capitalize
fn capitalise_first_char(string: &str) -> String {
    let mut chars = string.chars();
    let Some(first) = chars.next() else {
        return String::with_capacity(0);
    };
    first.to_uppercase().chain(chars).collect()
}

#[cfg(test)]
mod alert_tests {
    use crate::alert::{Alert, AlertType};

    #[test]
    fn display_joins_message_and_capitalised_details() {
        let alert = Alert::error("Database Error", "the expense could not be saved");

        assert_eq!(alert.alert_type, AlertType::Error);
        assert_eq!(
            alert.to_string(),
            "Database Error: The expense could not be saved"
        );
    }

    #[test]
    fn display_without_details_is_just_the_message() {
        assert_eq!(Alert::success("Saved", "").to_string(), "Saved");
    }

    #[test]
    fn ansi_string_is_coloured_by_type() {
        assert_eq!(
            Alert::warning("No Data", "").to_ansi_string(),
            "\x1b[33;1mNo Data\x1b[0m"
        );
    }
}
