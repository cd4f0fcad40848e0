//! Keyword classification of user prompts.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Login,
    Register,
    Form,
    Dashboard,
    Search,
    Profile,
    Settings,
    List,
    Landing,
    Modal,
    Contact,
    Default,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Login => "login",
            Intent::Register => "register",
            Intent::Form => "form",
            Intent::Dashboard => "dashboard",
            Intent::Search => "search",
            Intent::Profile => "profile",
            Intent::Settings => "settings",
            Intent::List => "list",
            Intent::Landing => "landing",
            Intent::Modal => "modal",
            Intent::Contact => "contact",
            Intent::Default => "default",
        }
    }
}

impl Display for Intent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub action: Action,
    pub intent: Intent,
}

/// Substrings that turn a prompt into an edit request.
pub const EDIT_VERBS: &[&str] = &["add", "remove", "change", "update", "make", "replace"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentRule {
    pub intent: Intent,
    pub pattern: &'static str,
}

/// Evaluated in order against the lower-cased prompt; first match wins.
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Login,
        pattern: "login|sign in|signin|authentication|auth",
    },
    IntentRule {
        intent: Intent::Register,
        pattern: "register|signup|sign up|create account",
    },
    IntentRule {
        intent: Intent::Form,
        pattern: "contact|feedback|form|apply|submit details",
    },
    IntentRule {
        intent: Intent::Dashboard,
        pattern: "dashboard|admin panel|analytics|control panel",
    },
    IntentRule {
        intent: Intent::Search,
        pattern: "search|filter|find|lookup",
    },
    IntentRule {
        intent: Intent::Profile,
        pattern: "profile|account details|user info",
    },
    IntentRule {
        intent: Intent::Settings,
        pattern: "settings|preferences|change password",
    },
    IntentRule {
        intent: Intent::List,
        pattern: "table|list|records|data list|users list",
    },
    IntentRule {
        intent: Intent::Landing,
        pattern: "landing|homepage|home page|marketing page",
    },
    IntentRule {
        intent: Intent::Modal,
        pattern: "popup|modal|dialog",
    },
    IntentRule {
        intent: Intent::Contact,
        pattern: "contact us|support page|help form",
    },
];

pub fn classify_action(lowered: &str) -> Action {
    if EDIT_VERBS.iter().any(|verb| lowered.contains(verb)) {
        Action::Edit
    } else {
        Action::Create
    }
}

/// Compiled form of an ordered intent rule list.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<(Intent, Regex)>,
}

impl IntentClassifier {
    pub fn new() -> Self {
        Self::from_rules(INTENT_RULES).expect("built-in intent patterns are valid regex")
    }

    pub fn from_rules(rules: &[IntentRule]) -> Result<Self, regex::Error> {
        let rules = rules
            .iter()
            .map(|rule| Ok((rule.intent, Regex::new(rule.pattern)?)))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { rules })
    }

    /// Expects an already lower-cased prompt.
    pub fn classify_intent(&self, lowered: &str) -> Intent {
        self.rules
            .iter()
            .find(|(_, pattern)| pattern.is_match(lowered))
            .map(|(intent, _)| *intent)
            .unwrap_or(Intent::Default)
    }

    pub fn classify(&self, prompt: &str) -> Classification {
        let lowered = prompt.to_lowercase();
        Classification {
            action: classify_action(&lowered),
            intent: self.classify_intent(&lowered),
        }
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
