use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const DEFAULT_LAYOUT: &str = "default";

/// Closed set of component kinds a plan may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKind {
    Card,
    Input,
    Button,
    Modal,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 4] = [
        ComponentKind::Card,
        ComponentKind::Input,
        ComponentKind::Button,
        ComponentKind::Modal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Card => "Card",
            ComponentKind::Input => "Input",
            ComponentKind::Button => "Button",
            ComponentKind::Modal => "Modal",
        }
    }

    /// Prop keys retained by sanitization for this kind.
    pub fn allowed_props(self) -> &'static [&'static str] {
        match self {
            ComponentKind::Card | ComponentKind::Modal => &["title"],
            ComponentKind::Input | ComponentKind::Button => &["label"],
        }
    }

    /// The single text prop each kind carries: `title` for containers, `label` otherwise.
    pub fn primary_prop(self) -> &'static str {
        self.allowed_props()[0]
    }

    /// Containers render their children and may never be empty after sanitization.
    pub fn is_container(self) -> bool {
        matches!(self, ComponentKind::Card | ComponentKind::Modal)
    }
}

impl Display for ComponentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown component kind `{0}`")]
pub struct UnknownComponentKind(pub String);

impl FromStr for ComponentKind {
    type Err = UnknownComponentKind;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        ComponentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == input)
            .ok_or_else(|| UnknownComponentKind(input.to_string()))
    }
}

pub type Props = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    #[serde(default)]
    pub props: Props,
    #[serde(default)]
    pub children: Vec<Component>,
}

impl Component {
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            props: Props::new(),
            children: Vec::new(),
        }
    }

    pub fn card(title: impl Into<String>) -> Self {
        Self::new(ComponentKind::Card).with_prop("title", title)
    }

    pub fn modal(title: impl Into<String>) -> Self {
        Self::new(ComponentKind::Modal).with_prop("title", title)
    }

    pub fn input(label: impl Into<String>) -> Self {
        Self::new(ComponentKind::Input).with_prop("label", label)
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self::new(ComponentKind::Button).with_prop("label", label)
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Component>) -> Self {
        self.children = children;
        self
    }

    pub fn prop(&self, key: &str) -> Option<&str> {
        self.props
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Primary display text: `label`, falling back to `title`.
    pub fn display_label(&self) -> Option<&str> {
        self.prop("label").or_else(|| self.prop("title"))
    }

    /// Depth of the deepest node below and including this one, counting this node as 0.
    pub fn subtree_depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.subtree_depth() + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Component::node_count).sum::<usize>()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub layout: String,
    pub components: Vec<Component>,
}

impl Plan {
    pub fn new(layout: impl Into<String>, components: Vec<Component>) -> Self {
        Self {
            layout: layout.into(),
            components,
        }
    }

    pub fn first_component_mut(&mut self) -> Option<&mut Component> {
        self.components.first_mut()
    }

    /// Deepest node depth, where top-level components sit at depth 0.
    /// `None` for a plan without components.
    pub fn max_depth(&self) -> Option<usize> {
        self.components.iter().map(Component::subtree_depth).max()
    }

    pub fn node_count(&self) -> usize {
        self.components.iter().map(Component::node_count).sum()
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).expect("plan is always serializable")
    }
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
