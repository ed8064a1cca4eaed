//! Demo: seed a component catalog, provision a dental clinic, then assemble
//! and print its deployment plan.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

use chrono::Utc;
use tenant_forge::assembly::PlanMeta;
use tenant_forge::config::ForgeConfig;
use tenant_forge::lifecycle::{setup_tracing, TenantSystem};
use tenant_forge::model::{
    ClientAccountCreate, ClientConfig, Component, ComponentType, PlanTier, WidgetSpec,
};
use tenant_forge::provisioning::ProvisionRequest;
use tracing::{error, info, Instrument};

fn catalog() -> Vec<Component> {
    vec![
        Component::new("core_platform", ComponentType::Core)
            .display_name("Plataforma")
            .order(1)
            .tables(&["tenants", "branches", "staff"])
            .widget(WidgetSpec::new("kpi", "Resumen del día")),
        Component::new("whatsapp_inbox", ComponentType::Core)
            .display_name("Bandeja de WhatsApp")
            .depends_on(&["core_platform"])
            .order(10)
            .config(&["whatsapp_phone_id"], &["greeting"])
            .flags(&["whatsapp_inbox"])
            .workflow("workflows/whatsapp_inbox.json")
            .widget(WidgetSpec::new("list", "Conversaciones abiertas")),
        Component::new("appointment_reminders", ComponentType::PlanFeature)
            .min_plan(PlanTier::Essentials)
            .depends_on(&["whatsapp_inbox", "calendar_sync"])
            .order(20)
            .flags(&["reminders_24h", "reminders_2h"]),
        Component::new("calendar_sync", ComponentType::PlanFeature)
            .min_plan(PlanTier::Scale)
            .order(15),
        Component::new("dental_charting", ComponentType::VerticalModule)
            .verticals(&["dental"])
            .order(30)
            .tables(&["odontograms"])
            .widget(WidgetSpec::new("chart", "Tratamientos activos")),
        Component::new("dentalink_sync", ComponentType::Integration)
            .config(&["dentalink_api_key"], &[])
            .setup_minutes(45)
            .manual("Request an API key from the clinic's Dentalink administrator"),
        Component::new("loyalty_program", ComponentType::Addon).order(40),
    ]
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = ForgeConfig::load().map_err(|e| e.to_string())?;
    info!(?config, "Starting tenant forge demo");
    let system = TenantSystem::new(&config);

    for component in catalog() {
        system
            .components
            .register(component)
            .await
            .map_err(|e| e.to_string())?;
    }

    let client_id = system
        .client_accounts
        .create_account(ClientAccountCreate {
            business_name: "Clínica Dental Sonrisa".to_string(),
            contact_email: "dra.lopez@sonrisa.mx".to_string(),
        })
        .await
        .map_err(|e| e.to_string())?;

    let provisioner = system.provisioner(config.provisioning.clone());
    let request = ProvisionRequest {
        client_id: Some(client_id),
        email: "Dra.Lopez@Sonrisa.mx".to_string(),
        owner_name: Some("Dra. Ana López".to_string()),
        vertical: "dental".to_string(),
        plan: "growth".to_string(),
        branch_count: Some(2),
        ..Default::default()
    };

    let span = tracing::info_span!("provisioning", client = %client_id);
    match provisioner.provision(request).instrument(span).await {
        Ok(outcome) => info!(
            tenant_id = %outcome.tenant_id,
            slug = ?outcome.slug,
            branches = outcome.details.branches_created,
            "Tenant provisioned"
        ),
        Err(failure) => {
            error!(error = %failure, "Provisioning failed");
            return Err(failure.to_string());
        }
    }

    let mut client = ClientConfig::new(&client_id.to_string(), "dental", PlanTier::Growth);
    client.legacy_system = Some("Dentalink".to_string());
    client.branch_count = Some(2);
    let meta = PlanMeta {
        request_id: "demo-1".to_string(),
        client_name: "Clínica Dental Sonrisa".to_string(),
        proposal_id: None,
        subscription_id: None,
        requested_at: Utc::now(),
    };

    let assembler = system.assembler();
    let span = tracing::info_span!("assembly", client = %client_id);
    let response = assembler
        .assemble_for(client, meta)
        .instrument(span)
        .await
        .map_err(|e| e.to_string())?;

    let rendered = serde_json::to_string_pretty(&response).map_err(|e| e.to_string())?;
    println!("{rendered}");

    drop(provisioner);
    drop(assembler);
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
