//! # Component Assembly Engine
//!
//! Data flows one way: [`selector`] → [`resolver`] → [`plan`].
//!
//! [`assemble`] is the pure entry point for callers that already hold a
//! resolved component list. [`ComponentAssembler`] runs the whole pipeline
//! against a live [`ComponentSource`].
//!
//! ```rust
//! use chrono::Utc;
//! use tenant_forge::assembly::{ComponentAssembler, PlanMeta};
//! use tenant_forge::model::{ClientConfig, Component, ComponentType, PlanTier};
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = vec![
//!         Component::new("auth", ComponentType::Core).order(1),
//!         Component::new("agenda", ComponentType::VerticalModule)
//!             .verticals(&["dental"])
//!             .depends_on(&["auth"]),
//!     ];
//!     let assembler = ComponentAssembler::new(registry);
//!
//!     let meta = PlanMeta {
//!         request_id: "req-1".into(),
//!         client_name: "Clínica Sonrisa".into(),
//!         proposal_id: None,
//!         subscription_id: None,
//!         requested_at: Utc::now(),
//!     };
//!     let response = assembler
//!         .assemble_for(ClientConfig::new("client_1", "dental", PlanTier::Starter), meta)
//!         .await
//!         .unwrap();
//!
//!     assert_eq!(response.counters.components, 2);
//!     assert_eq!(response.plan.deployment_steps[0].component, "auth");
//! }
//! ```

pub mod plan;
pub mod resolver;
pub mod selector;

pub use plan::{generate_plan, DeploymentPlan, DeploymentStep, PlanMeta, StepAction};
pub use resolver::{resolve, ComponentSource, ResolveError, ResolvedComponent};
pub use selector::{select_components, select_for_client};

use crate::model::{ClientConfig, Component};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Input of [`assemble`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyRequest {
    #[serde(flatten)]
    pub meta: PlanMeta,
    pub client: ClientConfig,
    /// Already resolved and in deployment order.
    pub components: Vec<ResolvedComponent>,
}

/// Headline numbers of a plan, for callers that do not read the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyCounters {
    pub components: usize,
    pub manual_steps: usize,
    pub estimated_total_minutes: u32,
    pub feature_flags: usize,
    pub widgets: usize,
    pub workflows: usize,
    pub credentials_needed: usize,
    pub missing_dependencies: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyResponse {
    pub plan: DeploymentPlan,
    pub counters: AssemblyCounters,
}

/// Generates the deployment plan for an already resolved request.
pub fn assemble(request: &AssemblyRequest) -> AssemblyResponse {
    let plan = generate_plan(&request.components, &request.client, &request.meta);
    let counters = AssemblyCounters {
        components: plan.summary.total_components,
        manual_steps: plan.summary.manual_steps_count,
        estimated_total_minutes: plan.summary.estimated_total_minutes,
        feature_flags: plan.summary.feature_flags_count,
        widgets: plan.summary.widgets_count,
        workflows: plan.workflow_imports.len(),
        credentials_needed: plan.credentials_needed.len(),
        missing_dependencies: plan.summary.missing_dependencies_count,
    };
    AssemblyResponse { plan, counters }
}

/// Select, resolve and plan against one component source.
pub struct ComponentAssembler<S> {
    source: S,
}

impl<S: ComponentSource> ComponentAssembler<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Components selected for `client` plus their dependencies, deployment-ordered.
    pub async fn resolve_for(&self, client: &ClientConfig) -> Result<Vec<ResolvedComponent>, ResolveError> {
        let selected: Vec<Component> = select_for_client(&self.source, client).await?;
        resolve(&selected, &self.source).await
    }

    #[instrument(skip_all, fields(request_id = %meta.request_id, client = %client.client_id))]
    pub async fn assemble_for(
        &self,
        client: ClientConfig,
        meta: PlanMeta,
    ) -> Result<AssemblyResponse, ResolveError> {
        let components = self.resolve_for(&client).await?;
        let response = assemble(&AssemblyRequest {
            meta,
            client,
            components,
        });
        info!(
            components = response.counters.components,
            minutes = response.counters.estimated_total_minutes,
            missing = response.counters.missing_dependencies,
            "Deployment plan generated"
        );
        Ok(response)
    }
}
