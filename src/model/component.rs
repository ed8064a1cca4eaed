//! Catalog components and the client configuration they are selected against.
//!
//! # Actor Framework
//! [`Component`] implements [`ActorEntity`](resource_actor::ActorEntity) (see
//! [`crate::catalog_actor`]); its unique key is the component name.

use crate::model::ComponentId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Order hint used for components that declare none; they deploy last.
pub const DEFAULT_DEPLOYMENT_ORDER: u32 = 100;

/// Vertical marker meaning "every vertical".
pub const ALL_VERTICALS: &str = "all";

/// Subscription level gating feature access.
///
/// [`PlanTier::ALL`] is the only place the hierarchy is written down; ordering
/// is derived from a tier's position in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    Starter,
    Essentials,
    Growth,
    Scale,
}

impl PlanTier {
    /// Every tier, lowest first.
    pub const ALL: [PlanTier; 4] = [
        PlanTier::Starter,
        PlanTier::Essentials,
        PlanTier::Growth,
        PlanTier::Scale,
    ];

    /// Position of the tier in the hierarchy.
    pub fn rank(self) -> usize {
        Self::ALL
            .iter()
            .position(|tier| *tier == self)
            .unwrap_or(Self::ALL.len())
    }

    /// True when this tier grants everything `required` grants.
    pub fn satisfies(self, required: Option<PlanTier>) -> bool {
        required.is_none_or(|min| self >= min)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlanTier::Starter => "starter",
            PlanTier::Essentials => "essentials",
            PlanTier::Growth => "growth",
            PlanTier::Scale => "scale",
        }
    }
}

impl PartialOrd for PlanTier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PlanTier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown plan tier: {0}")]
pub struct UnknownPlan(pub String);

impl FromStr for PlanTier {
    type Err = UnknownPlan;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str() == wanted)
            .ok_or_else(|| UnknownPlan(s.to_string()))
    }
}

/// How a component is selected for a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Core,
    PlanFeature,
    VerticalModule,
    Addon,
    Integration,
}

/// Names of the configuration variables a component needs (not their values).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigTemplate {
    pub required: Vec<String>,
    pub optional: Vec<String>,
}

/// A dashboard widget a component contributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSpec {
    pub kind: String,
    pub title: String,
    pub data_source: Option<String>,
}

impl WidgetSpec {
    pub fn new(kind: &str, title: &str) -> Self {
        Self {
            kind: kind.to_string(),
            title: title.to_string(),
            data_source: None,
        }
    }
}

/// A catalog entry describing one installable feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub display_name: String,
    pub component_type: ComponentType,
    /// Empty means unrestricted; `"all"` means every vertical.
    pub applicable_verticals: Vec<String>,
    pub min_plan: Option<PlanTier>,
    /// Names of other components, resolved at assembly time.
    pub dependencies: Vec<String>,
    pub config_template: ConfigTemplate,
    pub feature_flags: Vec<String>,
    pub widgets: Vec<WidgetSpec>,
    pub setup_minutes: u32,
    pub manual_instructions: Option<String>,
    pub deployment_order: Option<u32>,
    pub workflow_file: Option<String>,
    pub database_tables: Vec<String>,
    pub is_active: bool,
    pub is_deprecated: bool,
}

impl Component {
    /// An active component with no restrictions, dependencies or extras.
    pub fn new(name: &str, component_type: ComponentType) -> Self {
        Self {
            id: ComponentId(0),
            name: name.to_string(),
            display_name: name.to_string(),
            component_type,
            applicable_verticals: Vec::new(),
            min_plan: None,
            dependencies: Vec::new(),
            config_template: ConfigTemplate::default(),
            feature_flags: Vec::new(),
            widgets: Vec::new(),
            setup_minutes: 5,
            manual_instructions: None,
            deployment_order: None,
            workflow_file: None,
            database_tables: Vec::new(),
            is_active: true,
            is_deprecated: false,
        }
    }

    pub fn display_name(mut self, display_name: &str) -> Self {
        self.display_name = display_name.to_string();
        self
    }

    pub fn verticals(mut self, verticals: &[&str]) -> Self {
        self.applicable_verticals = to_strings(verticals);
        self
    }

    pub fn min_plan(mut self, plan: PlanTier) -> Self {
        self.min_plan = Some(plan);
        self
    }

    pub fn depends_on(mut self, names: &[&str]) -> Self {
        self.dependencies = to_strings(names);
        self
    }

    pub fn order(mut self, order: u32) -> Self {
        self.deployment_order = Some(order);
        self
    }

    pub fn setup_minutes(mut self, minutes: u32) -> Self {
        self.setup_minutes = minutes;
        self
    }

    pub fn manual(mut self, instructions: &str) -> Self {
        self.manual_instructions = Some(instructions.to_string());
        self
    }

    pub fn config(mut self, required: &[&str], optional: &[&str]) -> Self {
        self.config_template = ConfigTemplate {
            required: to_strings(required),
            optional: to_strings(optional),
        };
        self
    }

    pub fn flags(mut self, flags: &[&str]) -> Self {
        self.feature_flags = to_strings(flags);
        self
    }

    pub fn widget(mut self, widget: WidgetSpec) -> Self {
        self.widgets.push(widget);
        self
    }

    pub fn workflow(mut self, file: &str) -> Self {
        self.workflow_file = Some(file.to_string());
        self
    }

    pub fn tables(mut self, tables: &[&str]) -> Self {
        self.database_tables = to_strings(tables);
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.is_deprecated = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Active and not deprecated.
    pub fn is_available(&self) -> bool {
        self.is_active && !self.is_deprecated
    }

    /// Deployment order with the default applied.
    pub fn sort_key(&self) -> u32 {
        self.deployment_order.unwrap_or(DEFAULT_DEPLOYMENT_ORDER)
    }

    /// True when the component may be used by `vertical`.
    pub fn applies_to(&self, vertical: &str) -> bool {
        self.applicable_verticals.is_empty()
            || self
                .applicable_verticals
                .iter()
                .any(|v| v == ALL_VERTICALS || v.eq_ignore_ascii_case(vertical))
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Payload for toggling a registered component.
#[derive(Debug, Clone, Default)]
pub struct ComponentUpdate {
    pub is_active: Option<bool>,
    pub is_deprecated: Option<bool>,
    pub deployment_order: Option<u32>,
}

/// What one client needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub client_id: String,
    pub vertical: String,
    pub plan: PlanTier,
    #[serde(default)]
    pub addons: Vec<String>,
    #[serde(default)]
    pub legacy_system: Option<String>,
    /// Informational only.
    #[serde(default)]
    pub custom_requirements: Vec<String>,
    /// Component or feature-flag name to forced state.
    #[serde(default)]
    pub feature_overrides: BTreeMap<String, bool>,
    #[serde(default)]
    pub branch_count: Option<u32>,
}

impl ClientConfig {
    pub fn new(client_id: &str, vertical: &str, plan: PlanTier) -> Self {
        Self {
            client_id: client_id.to_string(),
            vertical: vertical.to_string(),
            plan,
            addons: Vec::new(),
            legacy_system: None,
            custom_requirements: Vec::new(),
            feature_overrides: BTreeMap::new(),
            branch_count: None,
        }
    }

    pub fn override_for(&self, name: &str) -> Option<bool> {
        self.feature_overrides.get(name).copied()
    }
}
