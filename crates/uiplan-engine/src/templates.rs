use crate::classify::Intent;
use uiplan_core::{Component, Plan};

const CENTERED_CARD: &str = "centered-card";
const SINGLE_COLUMN: &str = "single-column";
const DASHBOARD: &str = "dashboard";

/// Static plan for each intent.
pub fn build_plan(intent: Intent) -> Plan {
    match intent {
        Intent::Login => Plan::new(
            CENTERED_CARD,
            vec![Component::card("Login").with_children(vec![
                Component::input("Email"),
                Component::input("Password"),
                Component::button("Submit"),
            ])],
        ),
        Intent::Register => Plan::new(
            CENTERED_CARD,
            vec![Component::card("Create Account").with_children(vec![
                Component::input("Name"),
                Component::input("Email"),
                Component::input("Password"),
                Component::button("Register"),
            ])],
        ),
        Intent::Form => Plan::new(
            SINGLE_COLUMN,
            vec![
                Component::input("Name"),
                Component::input("Email"),
                Component::button("Submit"),
            ],
        ),
        Intent::Dashboard => Plan::new(
            DASHBOARD,
            vec![
                Component::card("Users"),
                Component::card("Revenue"),
                Component::card("Performance"),
            ],
        ),
        Intent::Search => Plan::new(
            SINGLE_COLUMN,
            vec![Component::input("Search..."), Component::button("Find")],
        ),
        Intent::Profile => Plan::new(
            SINGLE_COLUMN,
            vec![
                Component::input("Full Name"),
                Component::input("Email"),
                Component::button("Update Profile"),
            ],
        ),
        Intent::Settings => Plan::new(
            SINGLE_COLUMN,
            vec![
                Component::input("New Password"),
                Component::input("Confirm Password"),
                Component::button("Save Settings"),
            ],
        ),
        Intent::List => Plan::new(
            DASHBOARD,
            vec![
                Component::card("User 1"),
                Component::card("User 2"),
                Component::card("User 3"),
            ],
        ),
        Intent::Landing => Plan::new(
            CENTERED_CARD,
            vec![Component::card("Welcome").with_children(vec![Component::button("Get Started")])],
        ),
        Intent::Modal => Plan::new(
            CENTERED_CARD,
            vec![Component::card("Confirmation").with_children(vec![
                Component::button("Confirm"),
                Component::button("Cancel"),
            ])],
        ),
        Intent::Contact => Plan::new(
            SINGLE_COLUMN,
            vec![
                Component::input("Name"),
                Component::input("Email"),
                Component::input("Message"),
                Component::button("Send Message"),
            ],
        ),
        Intent::Default => {
            tracing::info!("no intent matched; using fallback plan");
            Plan::new(
                CENTERED_CARD,
                vec![Component::card("AI Generated UI").with_children(vec![
                    Component::input("Text"),
                    Component::button("Submit"),
                ])],
            )
        }
    }
}

#[cfg(test)]
#[path = "templates_test.rs"]
mod tests;
