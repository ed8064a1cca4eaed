//! # Plan Generator
//!
//! Turns resolved components into a [`DeploymentPlan`]. No I/O happens here;
//! everything the plan needs arrives as arguments, including its timestamp.

use super::resolver::ResolvedComponent;
use crate::model::{ClientConfig, ComponentType, PlanTier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

pub const PLAN_VERSION: &str = "1.0";

/// Components taking longer than this need a human.
pub const MANUAL_SETUP_THRESHOLD_MINUTES: u32 = 15;

const GRID_COLUMNS: u32 = 12;
const WIDGET_WIDTH: u32 = 6;
const WIDGET_HEIGHT: u32 = 4;

/// Who the plan is for and when it was requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanMeta {
    pub request_id: String,
    /// Display name used in verification checks and notifications.
    pub client_name: String,
    #[serde(default)]
    pub proposal_id: Option<String>,
    #[serde(default)]
    pub subscription_id: Option<String>,
    pub requested_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    Install,
    Connect,
    Activate,
    Configure,
}

impl From<ComponentType> for StepAction {
    fn from(component_type: ComponentType) -> Self {
        match component_type {
            ComponentType::Core => StepAction::Install,
            ComponentType::Integration => StepAction::Connect,
            ComponentType::Addon => StepAction::Activate,
            ComponentType::PlanFeature | ComponentType::VerticalModule => StepAction::Configure,
        }
    }
}

/// Template variable names merged with the client's identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepConfig {
    pub client_id: String,
    pub vertical: String,
    pub plan: PlanTier,
    pub branch_count: u32,
    pub required_variables: Vec<String>,
    pub optional_variables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentStep {
    /// 1-based position in the plan.
    pub order: usize,
    pub component: String,
    pub display_name: String,
    pub component_type: ComponentType,
    pub action: StepAction,
    pub config: StepConfig,
    pub estimated_minutes: u32,
    pub requires_manual: bool,
    pub manual_instructions: Option<String>,
    pub dependencies_met: bool,
    pub missing_dependencies: Vec<String>,
}

/// A table a component owns, isolated per tenant by row-level security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSetup {
    pub component: String,
    pub table: String,
    pub tenant_column: String,
    pub rls_policy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowImport {
    pub component: String,
    pub workflow_file: String,
    pub variables: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialRequirement {
    pub component: String,
    pub display_name: String,
    pub variables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetPlacement {
    pub id: String,
    pub component: String,
    pub kind: String,
    pub title: String,
    pub data_source: Option<String>,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureFlag {
    pub key: String,
    pub component: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationCheck {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub audience: String,
    pub channel: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub total_components: usize,
    pub components_by_type: BTreeMap<ComponentType, usize>,
    pub estimated_total_minutes: u32,
    pub manual_steps_count: usize,
    pub missing_dependencies_count: usize,
    pub feature_flags_count: usize,
    pub widgets_count: usize,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentPlan {
    pub version: String,
    pub request_id: String,
    pub client_id: String,
    pub client_name: String,
    pub proposal_id: Option<String>,
    pub subscription_id: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub summary: PlanSummary,
    pub deployment_steps: Vec<DeploymentStep>,
    pub database_setup: Vec<TableSetup>,
    pub workflow_imports: Vec<WorkflowImport>,
    pub credentials_needed: Vec<CredentialRequirement>,
    pub dashboard_widgets: Vec<WidgetPlacement>,
    pub feature_flags: Vec<FeatureFlag>,
    pub verification_checks: Vec<VerificationCheck>,
    pub notifications: Vec<Notification>,
}

/// Builds the plan for `components`, keeping their order.
pub fn generate_plan(
    components: &[ResolvedComponent],
    client: &ClientConfig,
    meta: &PlanMeta,
) -> DeploymentPlan {
    let branch_count = client.branch_count.unwrap_or(1).max(1);

    let deployment_steps: Vec<DeploymentStep> = components
        .iter()
        .enumerate()
        .map(|(index, resolved)| step(index + 1, resolved, client, branch_count))
        .collect();

    let database_setup = database_setup(components);
    let workflow_imports = workflow_imports(components, client, branch_count);
    let credentials_needed = components
        .iter()
        .map(|r| &r.component)
        .filter(|c| c.component_type == ComponentType::Integration)
        .map(|c| CredentialRequirement {
            component: c.name.clone(),
            display_name: c.display_name.clone(),
            variables: c.config_template.required.clone(),
        })
        .collect();
    let dashboard_widgets = layout_widgets(components, &client.client_id);
    let feature_flags = feature_flags(components, client);

    let summary = summarize(components, &deployment_steps, &feature_flags, &dashboard_widgets);
    let verification_checks = verification_checks(&summary, &database_setup, &workflow_imports, &meta.client_name);
    let notifications = notifications(&summary, &meta.client_name);

    DeploymentPlan {
        version: PLAN_VERSION.to_string(),
        request_id: meta.request_id.clone(),
        client_id: client.client_id.clone(),
        client_name: meta.client_name.clone(),
        proposal_id: meta.proposal_id.clone(),
        subscription_id: meta.subscription_id.clone(),
        generated_at: meta.requested_at,
        summary,
        deployment_steps,
        database_setup,
        workflow_imports,
        credentials_needed,
        dashboard_widgets,
        feature_flags,
        verification_checks,
        notifications,
    }
}

fn step(
    order: usize,
    resolved: &ResolvedComponent,
    client: &ClientConfig,
    branch_count: u32,
) -> DeploymentStep {
    let component = &resolved.component;
    let requires_manual = component.setup_minutes > MANUAL_SETUP_THRESHOLD_MINUTES;
    DeploymentStep {
        order,
        component: component.name.clone(),
        display_name: component.display_name.clone(),
        component_type: component.component_type,
        action: component.component_type.into(),
        config: StepConfig {
            client_id: client.client_id.clone(),
            vertical: client.vertical.clone(),
            plan: client.plan,
            branch_count,
            required_variables: component.config_template.required.clone(),
            optional_variables: component.config_template.optional.clone(),
        },
        estimated_minutes: component.setup_minutes,
        requires_manual,
        manual_instructions: if requires_manual {
            component.manual_instructions.clone()
        } else {
            None
        },
        dependencies_met: resolved.dependencies_met(),
        missing_dependencies: resolved.missing_dependencies.clone(),
    }
}

fn database_setup(components: &[ResolvedComponent]) -> Vec<TableSetup> {
    components
        .iter()
        .flat_map(|r| {
            r.component.database_tables.iter().map(|table| TableSetup {
                component: r.component.name.clone(),
                table: table.clone(),
                tenant_column: "tenant_id".to_string(),
                rls_policy: format!("{table}_tenant_isolation"),
            })
        })
        .collect()
}

fn workflow_imports(
    components: &[ResolvedComponent],
    client: &ClientConfig,
    branch_count: u32,
) -> Vec<WorkflowImport> {
    components
        .iter()
        .filter_map(|r| {
            let file = r.component.workflow_file.as_ref()?;
            let variables = BTreeMap::from([
                ("client_id".to_string(), client.client_id.clone()),
                ("vertical".to_string(), client.vertical.clone()),
                ("plan".to_string(), client.plan.to_string()),
                ("branch_count".to_string(), branch_count.to_string()),
            ]);
            Some(WorkflowImport {
                component: r.component.name.clone(),
                workflow_file: file.clone(),
                variables,
            })
        })
        .collect()
}

/// Packs widgets two per row into the 12-column grid.
fn layout_widgets(components: &[ResolvedComponent], client_id: &str) -> Vec<WidgetPlacement> {
    let mut placements = Vec::new();
    let (mut x, mut y) = (0, 0);

    for resolved in components {
        let component = &resolved.component;
        for (n, widget) in component.widgets.iter().enumerate() {
            placements.push(WidgetPlacement {
                id: format!("{client_id}_{}_{}", component.name, n + 1),
                component: component.name.clone(),
                kind: widget.kind.clone(),
                title: widget.title.clone(),
                data_source: widget.data_source.clone(),
                x,
                y,
                w: WIDGET_WIDTH,
                h: WIDGET_HEIGHT,
            });
            x += WIDGET_WIDTH;
            if x >= GRID_COLUMNS {
                x = 0;
                y += WIDGET_HEIGHT;
            }
        }
    }
    placements
}

/// One entry per distinct flag; the first component declaring it owns it.
fn feature_flags(components: &[ResolvedComponent], client: &ClientConfig) -> Vec<FeatureFlag> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut flags = Vec::new();
    for resolved in components {
        for flag in &resolved.component.feature_flags {
            if !seen.insert(flag) {
                continue;
            }
            flags.push(FeatureFlag {
                key: flag.clone(),
                component: resolved.component.name.clone(),
                enabled: client.override_for(flag) != Some(false),
            });
        }
    }
    flags
}

fn summarize(
    components: &[ResolvedComponent],
    steps: &[DeploymentStep],
    flags: &[FeatureFlag],
    widgets: &[WidgetPlacement],
) -> PlanSummary {
    let mut components_by_type = BTreeMap::new();
    for resolved in components {
        *components_by_type
            .entry(resolved.component.component_type)
            .or_insert(0) += 1;
    }

    let warnings = components
        .iter()
        .filter(|r| !r.dependencies_met())
        .map(|r| {
            format!(
                "{} is missing dependencies: {}",
                r.component.name,
                r.missing_dependencies.join(", ")
            )
        })
        .collect();

    PlanSummary {
        total_components: components.len(),
        components_by_type,
        estimated_total_minutes: steps
            .iter()
            .fold(0u32, |total, s| total.saturating_add(s.estimated_minutes)),
        manual_steps_count: steps.iter().filter(|s| s.requires_manual).count(),
        missing_dependencies_count: components.iter().map(|r| r.missing_dependencies.len()).sum(),
        feature_flags_count: flags.len(),
        widgets_count: widgets.len(),
        warnings,
    }
}

fn check(name: &str, description: String) -> VerificationCheck {
    VerificationCheck {
        name: name.to_string(),
        description,
    }
}

fn verification_checks(
    summary: &PlanSummary,
    tables: &[TableSetup],
    workflows: &[WorkflowImport],
    client_name: &str,
) -> Vec<VerificationCheck> {
    let mut checks = vec![
        check(
            "components_deployed",
            format!("All {} components report healthy", summary.total_components),
        ),
        check(
            "feature_flags_active",
            format!(
                "{} feature flags are set for {client_name}",
                summary.feature_flags_count
            ),
        ),
        check(
            "dashboard_renders",
            format!("{} dashboard widgets render without errors", summary.widgets_count),
        ),
    ];
    if !tables.is_empty() {
        checks.push(check(
            "tenant_isolation",
            format!("Row-level security blocks cross-tenant reads on {} tables", tables.len()),
        ));
    }
    if !workflows.is_empty() {
        checks.push(check(
            "workflows_running",
            format!("{} imported workflows are active", workflows.len()),
        ));
    }
    checks
}

fn notifications(summary: &PlanSummary, client_name: &str) -> Vec<Notification> {
    vec![
        Notification {
            audience: "client".to_string(),
            channel: "email".to_string(),
            subject: format!("{client_name}, your platform is being set up"),
            body: format!(
                "We are activating {} components and {} features. Estimated time: {} minutes.",
                summary.total_components, summary.feature_flags_count, summary.estimated_total_minutes
            ),
        },
        Notification {
            audience: "operations".to_string(),
            channel: "internal".to_string(),
            subject: format!("Deployment plan ready for {client_name}"),
            body: format!(
                "{} steps, {} manual, {} missing dependencies.",
                summary.total_components,
                summary.manual_steps_count,
                summary.missing_dependencies_count
            ),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Component, WidgetSpec};

    fn resolved(component: Component) -> ResolvedComponent {
        ResolvedComponent {
            resolved_dependencies: component.dependencies.clone(),
            missing_dependencies: Vec::new(),
            component,
        }
    }

    fn meta() -> PlanMeta {
        PlanMeta {
            request_id: "req-1".into(),
            client_name: "Sonrisa".into(),
            proposal_id: None,
            subscription_id: Some("sub_9".into()),
            requested_at: Utc::now(),
        }
    }

    fn client() -> ClientConfig {
        ClientConfig::new("client_7", "dental", PlanTier::Growth)
    }

    #[test]
    fn test_action_follows_component_type() {
        let components: Vec<ResolvedComponent> = [
            ComponentType::Core,
            ComponentType::Integration,
            ComponentType::Addon,
            ComponentType::PlanFeature,
            ComponentType::VerticalModule,
        ]
        .into_iter()
        .enumerate()
        .map(|(n, t)| resolved(Component::new(&format!("c{n}"), t)))
        .collect();

        let plan = generate_plan(&components, &client(), &meta());
        let actions: Vec<StepAction> = plan.deployment_steps.iter().map(|s| s.action).collect();
        assert_eq!(
            actions,
            vec![
                StepAction::Install,
                StepAction::Connect,
                StepAction::Activate,
                StepAction::Configure,
                StepAction::Configure,
            ]
        );
        let orders: Vec<usize> = plan.deployment_steps.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_totals_and_manual_steps() {
        let components = vec![
            resolved(Component::new("auth", ComponentType::Core).setup_minutes(10)),
            resolved(
                Component::new("pos_bridge", ComponentType::Integration)
                    .setup_minutes(45)
                    .manual("Install the bridge on the front desk PC"),
            ),
            resolved(
                Component::new("reports", ComponentType::PlanFeature)
                    .setup_minutes(15)
                    .manual("never shown"),
            ),
        ];

        let plan = generate_plan(&components, &client(), &meta());
        assert_eq!(plan.summary.estimated_total_minutes, 70);
        assert_eq!(plan.summary.manual_steps_count, 1);
        assert!(plan.deployment_steps[1].requires_manual);
        assert_eq!(
            plan.deployment_steps[1].manual_instructions.as_deref(),
            Some("Install the bridge on the front desk PC")
        );
        assert!(!plan.deployment_steps[2].requires_manual);
        assert_eq!(plan.deployment_steps[2].manual_instructions, None);
        assert_eq!(plan.deployment_steps[0].config.branch_count, 1);
    }

    #[test]
    fn test_total_minutes_saturate() {
        let components = vec![
            resolved(Component::new("a", ComponentType::Core).setup_minutes(u32::MAX)),
            resolved(Component::new("b", ComponentType::Core).setup_minutes(30)),
        ];

        let plan = generate_plan(&components, &client(), &meta());
        assert_eq!(plan.summary.estimated_total_minutes, u32::MAX);
    }

    #[test]
    fn test_widget_layout_wraps_at_twelve_columns() {
        let mut dashboard = Component::new("dashboard", ComponentType::Core);
        for n in 0..5 {
            dashboard = dashboard.widget(WidgetSpec::new("chart", &format!("Chart {n}")));
        }
        let plan = generate_plan(&[resolved(dashboard)], &client(), &meta());

        let coords: Vec<(u32, u32)> = plan.dashboard_widgets.iter().map(|w| (w.x, w.y)).collect();
        assert_eq!(coords, vec![(0, 0), (6, 0), (0, 4), (6, 4), (0, 8)]);
        assert!(plan.dashboard_widgets.iter().all(|w| w.x < 12));
        assert_eq!(plan.dashboard_widgets[0].id, "client_7_dashboard_1");
    }

    #[test]
    fn test_feature_flag_override_disables() {
        let components = vec![
            resolved(Component::new("agenda", ComponentType::Core).flags(&["online_booking", "reminders"])),
            resolved(Component::new("crm", ComponentType::PlanFeature).flags(&["reminders"])),
        ];
        let mut client = client();
        client.feature_overrides.insert("reminders".into(), false);

        let plan = generate_plan(&components, &client, &meta());
        let flags: Vec<(&str, bool)> = plan
            .feature_flags
            .iter()
            .map(|f| (f.key.as_str(), f.enabled))
            .collect();
        assert_eq!(flags, vec![("online_booking", true), ("reminders", false)]);
    }

    #[test]
    fn test_aggregate_sections() {
        let mut crm = resolved(
            Component::new("dentalink_sync", ComponentType::Integration)
                .config(&["api_key", "clinic_id"], &["region"])
                .workflow("workflows/dentalink.json")
                .tables(&["patients"]),
        );
        crm.missing_dependencies = vec!["webhooks".into()];
        let mut client = client();
        client.branch_count = Some(3);

        let plan = generate_plan(&[crm], &client, &meta());

        assert_eq!(plan.credentials_needed[0].variables, vec!["api_key", "clinic_id"]);
        assert_eq!(plan.workflow_imports[0].variables["branch_count"], "3");
        assert_eq!(plan.workflow_imports[0].variables["plan"], "growth");
        assert_eq!(plan.database_setup[0].rls_policy, "patients_tenant_isolation");
        assert!(!plan.deployment_steps[0].dependencies_met);
        assert_eq!(plan.summary.missing_dependencies_count, 1);
        assert_eq!(plan.summary.warnings, vec!["dentalink_sync is missing dependencies: webhooks"]);
        assert!(plan
            .verification_checks
            .iter()
            .any(|c| c.name == "tenant_isolation"));
        assert!(plan.notifications[0].subject.starts_with("Sonrisa"));
    }

    #[test]
    fn test_plan_serializes_to_json() {
        let plan = generate_plan(
            &[resolved(Component::new("auth", ComponentType::Core))],
            &client(),
            &meta(),
        );
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["version"], PLAN_VERSION);
        assert_eq!(json["deployment_steps"][0]["action"], "install");
        assert_eq!(json["summary"]["components_by_type"]["core"], 1);

        let back: DeploymentPlan = serde_json::from_value(json).unwrap();
        assert_eq!(back, plan);
    }
}
