//! Selection, resolution and plan generation over a live component catalog.

use chrono::Utc;
use tenant_forge::assembly::{PlanMeta, ResolveError, StepAction};
use tenant_forge::config::ForgeConfig;
use tenant_forge::lifecycle::TenantSystem;
use tenant_forge::model::{ClientConfig, Component, ComponentType, PlanTier, WidgetSpec};

fn catalog() -> Vec<Component> {
    vec![
        Component::new("core_platform", ComponentType::Core)
            .order(1)
            .tables(&["tenants", "branches"])
            .widget(WidgetSpec::new("kpi", "Resumen del día")),
        Component::new("whatsapp_inbox", ComponentType::Core)
            .depends_on(&["core_platform"])
            .order(10)
            .config(&["whatsapp_phone_id"], &[])
            .flags(&["whatsapp_inbox"])
            .workflow("workflows/whatsapp_inbox.json"),
        Component::new("appointment_reminders", ComponentType::PlanFeature)
            .min_plan(PlanTier::Essentials)
            .depends_on(&["whatsapp_inbox", "calendar_sync"])
            .order(20)
            .flags(&["reminders_24h"]),
        Component::new("calendar_sync", ComponentType::PlanFeature)
            .min_plan(PlanTier::Scale)
            .order(15),
        Component::new("dental_charting", ComponentType::VerticalModule)
            .verticals(&["dental"])
            .order(30),
        Component::new("dentalink_sync", ComponentType::Integration)
            .config(&["dentalink_api_key"], &[])
            .setup_minutes(45)
            .manual("Request an API key from the clinic's Dentalink administrator"),
        Component::new("loyalty_program", ComponentType::Addon).order(40),
    ]
}

async fn system_with(components: Vec<Component>) -> TenantSystem {
    let system = TenantSystem::new(&ForgeConfig::default());
    for component in components {
        system.components.register(component).await.unwrap();
    }
    system
}

fn meta(request_id: &str) -> PlanMeta {
    PlanMeta {
        request_id: request_id.to_string(),
        client_name: "Clínica Dental Sonrisa".to_string(),
        proposal_id: Some("prop-7".to_string()),
        subscription_id: None,
        requested_at: Utc::now(),
    }
}

fn dental_growth() -> ClientConfig {
    let mut client = ClientConfig::new("client_1", "dental", PlanTier::Growth);
    client.legacy_system = Some("Dentalink".to_string());
    client.branch_count = Some(2);
    client
}

#[tokio::test]
async fn test_dependencies_are_pulled_in_and_ordered() {
    let system = system_with(catalog()).await;
    let assembler = system.assembler();

    let response = assembler
        .assemble_for(dental_growth(), meta("req-1"))
        .await
        .unwrap();
    let plan = &response.plan;

    let steps: Vec<&str> = plan
        .deployment_steps
        .iter()
        .map(|s| s.component.as_str())
        .collect();
    // calendar_sync is above the plan but required by appointment_reminders
    assert_eq!(
        steps,
        vec![
            "core_platform",
            "whatsapp_inbox",
            "calendar_sync",
            "appointment_reminders",
            "dental_charting",
            "dentalink_sync",
        ]
    );
    assert!(plan.deployment_steps.iter().all(|s| s.dependencies_met));
    assert_eq!(response.counters.components, 6);
    assert_eq!(response.counters.missing_dependencies, 0);
    assert_eq!(plan.client_id, "client_1");
    assert_eq!(plan.proposal_id.as_deref(), Some("prop-7"));

    let integration = plan
        .deployment_steps
        .iter()
        .find(|s| s.component == "dentalink_sync")
        .unwrap();
    assert_eq!(integration.action, StepAction::Connect);
    assert!(integration.requires_manual);
    assert!(response.counters.manual_steps >= 1);
    assert_eq!(integration.config.branch_count, 2);

    assert_eq!(plan.workflow_imports.len(), 1);
    assert_eq!(plan.database_setup.len(), 2);
    assert_eq!(plan.credentials_needed.len(), 1);

    drop(assembler);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_inactive_dependency_is_reported_missing() {
    let mut components = catalog();
    components[3] = Component::new("calendar_sync", ComponentType::PlanFeature)
        .min_plan(PlanTier::Scale)
        .inactive();
    let system = system_with(components).await;
    let assembler = system.assembler();

    let response = assembler
        .assemble_for(dental_growth(), meta("req-2"))
        .await
        .unwrap();

    let reminders = response
        .plan
        .deployment_steps
        .iter()
        .find(|s| s.component == "appointment_reminders")
        .unwrap();
    assert!(!reminders.dependencies_met);
    assert_eq!(reminders.missing_dependencies, vec!["calendar_sync".to_string()]);
    assert_eq!(response.counters.components, 5);
    assert_eq!(response.plan.summary.missing_dependencies_count, 1);
    assert!(!response.plan.summary.warnings.is_empty());

    drop(assembler);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_restaurant_on_essentials() {
    let system = system_with(vec![
        Component::new("core_platform", ComponentType::Core).order(1),
        Component::new("advanced_analytics", ComponentType::PlanFeature)
            .min_plan(PlanTier::Growth)
            .order(10),
        Component::new("loyalty_program", ComponentType::Addon).order(20),
        Component::new("dental_charting", ComponentType::VerticalModule)
            .verticals(&["dental"])
            .order(30),
    ])
    .await;
    let assembler = system.assembler();

    let mut client = ClientConfig::new("client_2", "restaurant", PlanTier::Essentials);
    client.addons = vec!["loyalty_program".to_string()];
    let response = assembler.assemble_for(client, meta("req-3")).await.unwrap();

    let steps: Vec<&str> = response
        .plan
        .deployment_steps
        .iter()
        .map(|s| s.component.as_str())
        .collect();
    assert_eq!(steps, vec!["core_platform", "loyalty_program"]);
    assert_eq!(response.counters.components, 2);

    drop(assembler);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_override_adds_and_removes_components() {
    let system = system_with(catalog()).await;
    let assembler = system.assembler();

    let mut client = dental_growth();
    client.feature_overrides.insert("loyalty_program".to_string(), true);
    client.feature_overrides.insert("dental_charting".to_string(), false);
    let response = assembler.assemble_for(client, meta("req-4")).await.unwrap();

    let names: Vec<&str> = response
        .plan
        .deployment_steps
        .iter()
        .map(|s| s.component.as_str())
        .collect();
    assert!(names.contains(&"loyalty_program"));
    assert!(!names.contains(&"dental_charting"));

    drop(assembler);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cycle_fails_assembly() {
    let system = system_with(vec![
        Component::new("billing", ComponentType::Core).depends_on(&["invoicing"]),
        Component::new("invoicing", ComponentType::Core).depends_on(&["billing"]),
    ])
    .await;
    let assembler = system.assembler();

    let err = assembler
        .assemble_for(ClientConfig::new("client_3", "dental", PlanTier::Starter), meta("req-5"))
        .await
        .unwrap_err();

    match err {
        ResolveError::Cycle { chain, .. } => {
            assert_eq!(chain.first(), chain.last());
            assert_eq!(chain.len(), 3);
        }
        other => panic!("expected a cycle, got {other:?}"),
    }

    drop(assembler);
    system.shutdown().await.unwrap();
}
