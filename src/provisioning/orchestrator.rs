//! # Provisioning Orchestrator
//!
//! Runs the tenant bootstrap sequence, strictly in this order:
//!
//! ```text
//! validate_input → resolve_client → generate_slug → create_tenant → create_branches
//!   → resolve_identity → create_staff_and_role → link_client
//!   → seed_services → seed_faqs → audit_log
//! ```
//!
//! Validation failures happen before any write. Every later write records its
//! [`Compensation`] in the attempt's [`RollbackTracker`]; a fatal failure
//! replays them in reverse. Extra branches, services, FAQs and the audit entry
//! are enrichments: their failures are logged, counted and skipped.
//!
//! Calling [`TenantProvisioner::provision`] again for a client that already
//! has a tenant performs no writes and returns
//! [`ProvisionStatus::AlreadyProvisioned`].

use super::identity::{generate_temp_password, IdentityDirectory};
use super::rollback::{Compensation, Compensator, RollbackReport, RollbackTracker};
use super::slug::SlugGenerator;
use super::validate::{ProvisionRequest, ValidatedRequest, ValidationError};
use super::verticals::{self, VerticalDefaults};
use crate::clients::{
    AuditLogClient, BranchClient, ClientAccountClient, FaqClient, ServiceClient,
    StaffBranchClient, StaffClient, TenantClient, UserRoleClient,
};
use crate::config::ProvisioningConfig;
use crate::identity_actor::IdentityError;
use crate::model::{
    AuditLogCreate, BranchCreate, BranchId, ClaimOutcome, ClientAccount, ClientId, FaqCreate,
    IdentityId, Metadata, ServiceCreate, StaffBranchCreate, StaffCreate, StaffId, TenantCreate,
    TenantId, UserRoleCreate, OWNER_PERMISSIONS, OWNER_ROLE,
};
use crate::staff_actor::StaffError;
use crate::tenant_actor::TenantError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use resource_actor::ActorClient;
use serde::Serialize;
use serde_json::json;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

/// Steps of one provisioning attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionStep {
    ValidateInput,
    ResolveClient,
    GenerateSlug,
    CreateTenant,
    CreateBranches,
    ResolveIdentity,
    CreateStaffAndRole,
    LinkClient,
    SeedServices,
    SeedFaqs,
    AuditLog,
}

impl ProvisionStep {
    pub fn as_str(self) -> &'static str {
        match self {
            ProvisionStep::ValidateInput => "validate_input",
            ProvisionStep::ResolveClient => "resolve_client",
            ProvisionStep::GenerateSlug => "generate_slug",
            ProvisionStep::CreateTenant => "create_tenant",
            ProvisionStep::CreateBranches => "create_branches",
            ProvisionStep::ResolveIdentity => "resolve_identity",
            ProvisionStep::CreateStaffAndRole => "create_staff_and_role",
            ProvisionStep::LinkClient => "link_client",
            ProvisionStep::SeedServices => "seed_services",
            ProvisionStep::SeedFaqs => "seed_faqs",
            ProvisionStep::AuditLog => "audit_log",
        }
    }
}

impl fmt::Display for ProvisionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an attempt failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Client not found: {0}")]
    ClientNotFound(ClientId),

    /// Another attempt for the same client holds a live claim.
    #[error("Client {client} is already being provisioned (since {since})")]
    InProgress {
        client: ClientId,
        since: DateTime<Utc>,
    },

    #[error("No free slug for '{base}' after {attempts} attempts")]
    SlugExhausted { base: String, attempts: usize },

    #[error(transparent)]
    Tenant(#[from] TenantError),

    #[error(transparent)]
    Staff(#[from] StaffError),

    #[error(transparent)]
    Identity(#[from] IdentityError),
}

/// A failed attempt: where it stopped and what was undone.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Provisioning failed at {step}: {error}")]
pub struct ProvisionFailure {
    pub step: ProvisionStep,
    pub error: ProvisionError,
    /// `None` when nothing had been written yet.
    pub rollback: Option<RollbackReport>,
}

impl ProvisionFailure {
    /// True when the request was rejected before any write.
    pub fn is_validation(&self) -> bool {
        matches!(self.error, ProvisionError::Validation(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionStatus {
    Created,
    /// The client already had a tenant; nothing was written.
    AlreadyProvisioned,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchSummary {
    pub id: BranchId,
    pub name: String,
    pub is_headquarters: bool,
}

/// Counts that expose degraded outcomes of a successful attempt.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProvisionDetails {
    pub duration_ms: u64,
    pub branches_requested: u32,
    pub branches_created: u32,
    pub branches: Vec<BranchSummary>,
    pub services_created: usize,
    pub faqs_created: usize,
    /// The owner's identity existed before this attempt.
    pub existing_account: bool,
    pub audit_logged: bool,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvisionOutcome {
    pub status: ProvisionStatus,
    pub tenant_id: TenantId,
    pub slug: Option<String>,
    pub branch_id: Option<BranchId>,
    pub user_id: Option<IdentityId>,
    pub staff_id: Option<StaffId>,
    /// Only set when a new identity was created.
    pub temporary_password: Option<String>,
    pub message: String,
    pub details: ProvisionDetails,
}

/// Stores written by provisioning.
#[derive(Clone)]
pub struct ProvisioningStores {
    pub clients: ClientAccountClient,
    pub tenants: TenantClient,
    pub branches: BranchClient,
    pub staff: StaffClient,
    pub staff_branches: StaffBranchClient,
    pub roles: UserRoleClient,
    pub services: ServiceClient,
    pub faqs: FaqClient,
    pub audit_logs: AuditLogClient,
}

#[async_trait]
impl Compensator for ProvisioningStores {
    async fn compensate(&self, compensation: Compensation) -> Result<(), String> {
        match compensation {
            Compensation::ReleaseClaim(id) => self.clients.release_claim(id).await.map_err(|e| e.to_string()),
            Compensation::DeleteTenant(id) => self.tenants.delete(id).await.map_err(|e| e.to_string()),
            Compensation::DeleteBranch(id) => self.branches.delete(id).await.map_err(|e| e.to_string()),
            Compensation::DeleteStaff(id) => self.staff.delete(id).await.map_err(|e| e.to_string()),
            Compensation::DeleteStaffBranch(id) => {
                self.staff_branches.delete(id).await.map_err(|e| e.to_string())
            }
            Compensation::DeleteUserRole(id) => self.roles.delete(id).await.map_err(|e| e.to_string()),
            Compensation::DeleteService(id) => self.services.delete(id).await.map_err(|e| e.to_string()),
            Compensation::DeleteFaq(id) => self.faqs.delete(id).await.map_err(|e| e.to_string()),
        }
    }
}

type StepResult<T> = Result<T, (ProvisionStep, ProvisionError)>;

fn at<E: Into<ProvisionError>>(step: ProvisionStep) -> impl FnOnce(E) -> (ProvisionStep, ProvisionError) {
    move |e| (step, e.into())
}

enum ClientResolution {
    Claimed(ClientAccount),
    AlreadyProvisioned(TenantId),
}

struct OwnerIdentity {
    user_id: IdentityId,
    temporary_password: Option<String>,
    existing: bool,
}

/// Provisions tenants against a set of stores and an identity provider.
pub struct TenantProvisioner {
    stores: ProvisioningStores,
    identities: Arc<dyn IdentityDirectory>,
    config: ProvisioningConfig,
}

impl TenantProvisioner {
    pub fn new(
        stores: ProvisioningStores,
        identities: Arc<dyn IdentityDirectory>,
        config: ProvisioningConfig,
    ) -> Self {
        Self {
            stores,
            identities,
            config,
        }
    }

    pub fn config(&self) -> &ProvisioningConfig {
        &self.config
    }

    /// Provisions a tenant for the client named in `request`.
    #[instrument(skip_all, fields(client = ?request.client_id))]
    pub async fn provision(
        &self,
        request: ProvisionRequest,
    ) -> Result<ProvisionOutcome, ProvisionFailure> {
        let started = Instant::now();
        let request = request
            .validate(&self.config)
            .map_err(|e| ProvisionFailure {
                step: ProvisionStep::ValidateInput,
                error: e.into(),
                rollback: None,
            })?;

        let mut tracker = RollbackTracker::new();
        match self.run(&request, &mut tracker, started).await {
            Ok(outcome) => {
                tracker.commit();
                info!(
                    tenant_id = %outcome.tenant_id,
                    status = ?outcome.status,
                    duration_ms = outcome.details.duration_ms,
                    "Provisioning finished"
                );
                Ok(outcome)
            }
            Err((step, error)) => {
                error!(%step, %error, tracked = tracker.len(), "Provisioning failed");
                let rollback = if tracker.is_empty() {
                    None
                } else {
                    Some(tracker.rollback(&self.stores).await)
                };
                Err(ProvisionFailure {
                    step,
                    error,
                    rollback,
                })
            }
        }
    }

    async fn run(
        &self,
        request: &ValidatedRequest,
        tracker: &mut RollbackTracker,
        started: Instant,
    ) -> StepResult<ProvisionOutcome> {
        let mut details = ProvisionDetails {
            branches_requested: request.branch_count,
            ..Default::default()
        };

        let account = match self
            .resolve_client(request.client_id, tracker)
            .await
            .map_err(at(ProvisionStep::ResolveClient))?
        {
            ClientResolution::Claimed(account) => account,
            ClientResolution::AlreadyProvisioned(tenant_id) => {
                info!(%tenant_id, "Client already provisioned");
                details.duration_ms = elapsed_ms(started);
                return Ok(ProvisionOutcome {
                    status: ProvisionStatus::AlreadyProvisioned,
                    tenant_id,
                    slug: None,
                    branch_id: None,
                    user_id: None,
                    staff_id: None,
                    temporary_password: None,
                    message: format!("Client already provisioned with {tenant_id}"),
                    details,
                });
            }
        };

        let name = request
            .business_name
            .clone()
            .unwrap_or_else(|| account.business_name.clone());
        let defaults = verticals::defaults_for(&request.vertical, &self.config.default_vertical);

        let slug = self
            .generate_slug(&name)
            .await
            .map_err(at(ProvisionStep::GenerateSlug))?;

        let tenant_id = self
            .create_tenant(request, &name, &slug, defaults, tracker)
            .await
            .map_err(at(ProvisionStep::CreateTenant))?;

        let hq = self
            .create_branches(request, tenant_id, &mut details, tracker)
            .await
            .map_err(at(ProvisionStep::CreateBranches))?;

        let owner = self
            .resolve_identity(request, tenant_id, &slug)
            .await
            .map_err(at(ProvisionStep::ResolveIdentity))?;
        details.existing_account = owner.existing;

        let staff_id = self
            .create_staff_and_role(request, tenant_id, hq, owner.user_id, tracker)
            .await
            .map_err(at(ProvisionStep::CreateStaffAndRole))?;

        // Last fatal step: the link itself never needs undoing.
        self.stores
            .clients
            .link_tenant(request.client_id, tenant_id)
            .await
            .map_err(at(ProvisionStep::LinkClient))?;

        self.seed_services(tenant_id, defaults, &mut details, tracker).await;
        self.seed_faqs(tenant_id, defaults, &mut details, tracker).await;
        self.audit(request, tenant_id, &slug, &mut details).await;

        details.duration_ms = elapsed_ms(started);
        Ok(ProvisionOutcome {
            status: ProvisionStatus::Created,
            tenant_id,
            slug: Some(slug.clone()),
            branch_id: Some(hq),
            user_id: Some(owner.user_id),
            staff_id: Some(staff_id),
            temporary_password: owner.temporary_password,
            message: format!("Tenant '{slug}' provisioned"),
            details,
        })
    }

    /// Atomically claims the client; a linked client short-circuits.
    async fn resolve_client(
        &self,
        client_id: ClientId,
        tracker: &mut RollbackTracker,
    ) -> Result<ClientResolution, ProvisionError> {
        let account = self
            .stores
            .clients
            .get(client_id)
            .await?
            .ok_or(ProvisionError::ClientNotFound(client_id))?;

        match self
            .stores
            .clients
            .claim(client_id, Utc::now(), self.config.claim_ttl_secs)
            .await?
        {
            ClaimOutcome::AlreadyProvisioned(tenant_id) => {
                Ok(ClientResolution::AlreadyProvisioned(tenant_id))
            }
            ClaimOutcome::InProgress { since } => Err(ProvisionError::InProgress {
                client: client_id,
                since,
            }),
            ClaimOutcome::Claimed => {
                tracker.record(Compensation::ReleaseClaim(client_id));
                Ok(ClientResolution::Claimed(account))
            }
        }
    }

    async fn generate_slug(&self, name: &str) -> Result<String, ProvisionError> {
        let generator = SlugGenerator::from_config(&self.config);
        let mut base = None;
        for candidate in generator.candidates(name) {
            if !self.stores.tenants.slug_taken(&candidate).await? {
                debug!(slug = %candidate, "Slug available");
                return Ok(candidate);
            }
            debug!(slug = %candidate, "Slug taken");
            base.get_or_insert(candidate);
        }
        Err(ProvisionError::SlugExhausted {
            base: base.unwrap_or_default(),
            attempts: generator.max_attempts(),
        })
    }

    /// The point of no return: from here on failures roll back.
    async fn create_tenant(
        &self,
        request: &ValidatedRequest,
        name: &str,
        slug: &str,
        defaults: &VerticalDefaults,
        tracker: &mut RollbackTracker,
    ) -> Result<TenantId, ProvisionError> {
        let mut metadata = request.metadata.clone();
        metadata.insert("client_id".into(), json!(request.client_id.0));
        metadata.insert("vertical_name".into(), json!(defaults.display_name));
        if let Some(phone) = &request.phone {
            metadata.insert("phone".into(), json!(phone));
        }

        let tenant_id = self
            .stores
            .tenants
            .create_tenant(TenantCreate {
                name: name.to_string(),
                slug: slug.to_string(),
                vertical: request.vertical.clone(),
                plan: request.plan,
                settings: defaults.settings(&self.config),
                subscription_id: request.subscription_id.clone(),
                owner_email: request.email.clone(),
                metadata,
            })
            .await?;
        tracker.record(Compensation::DeleteTenant(tenant_id));
        info!(%tenant_id, %slug, "Tenant created");
        Ok(tenant_id)
    }

    /// Headquarters is mandatory; further branches are best-effort.
    async fn create_branches(
        &self,
        request: &ValidatedRequest,
        tenant_id: TenantId,
        details: &mut ProvisionDetails,
        tracker: &mut RollbackTracker,
    ) -> Result<BranchId, ProvisionError> {
        let hq_name = "Sucursal Principal".to_string();
        let hq = self
            .stores
            .branches
            .create_branch(BranchCreate {
                tenant_id,
                name: hq_name.clone(),
                is_headquarters: true,
                position: 1,
            })
            .await?;
        tracker.record(Compensation::DeleteBranch(hq));
        details.branches.push(BranchSummary {
            id: hq,
            name: hq_name,
            is_headquarters: true,
        });

        for position in 2..=request.branch_count {
            let name = format!("Sucursal {position}");
            match self
                .stores
                .branches
                .create_branch(BranchCreate {
                    tenant_id,
                    name: name.clone(),
                    is_headquarters: false,
                    position,
                })
                .await
            {
                Ok(id) => {
                    tracker.record(Compensation::DeleteBranch(id));
                    details.branches.push(BranchSummary {
                        id,
                        name,
                        is_headquarters: false,
                    });
                }
                Err(e) => {
                    warn!(position, error = %e, "Skipping branch");
                    details
                        .warnings
                        .push(format!("Branch {position} was not created: {e}"));
                }
            }
        }

        details.branches_created = details.branches.len() as u32;
        Ok(hq)
    }

    /// Reuses the identity registered under the email, or creates one.
    async fn resolve_identity(
        &self,
        request: &ValidatedRequest,
        tenant_id: TenantId,
        slug: &str,
    ) -> Result<OwnerIdentity, ProvisionError> {
        let mut metadata = Metadata::new();
        metadata.insert("role".into(), json!(OWNER_ROLE));
        metadata.insert("vertical".into(), json!(request.vertical));
        metadata.insert("tenant_id".into(), json!(tenant_id.0));
        metadata.insert("tenant_slug".into(), json!(slug));

        let existing = self
            .identities
            .find_by_email(
                &request.email,
                self.config.identity_page_size,
                self.config.identity_max_pages,
            )
            .await?;

        match existing {
            Some(user) => {
                self.identities
                    .update_user_metadata(user.id, metadata)
                    .await?;
                info!(user_id = %user.id, "Reusing existing identity");
                Ok(OwnerIdentity {
                    user_id: user.id,
                    temporary_password: None,
                    existing: true,
                })
            }
            None => {
                let password = generate_temp_password(self.config.temp_password_length);
                let user = self
                    .identities
                    .create_user(&request.email, &password, metadata)
                    .await?;
                info!(user_id = %user.id, "Created identity");
                Ok(OwnerIdentity {
                    user_id: user.id,
                    temporary_password: Some(password),
                    existing: false,
                })
            }
        }
    }

    async fn create_staff_and_role(
        &self,
        request: &ValidatedRequest,
        tenant_id: TenantId,
        hq: BranchId,
        user_id: IdentityId,
        tracker: &mut RollbackTracker,
    ) -> Result<StaffId, ProvisionError> {
        let staff = self
            .stores
            .staff
            .upsert_staff(StaffCreate {
                tenant_id,
                user_id,
                email: request.email.clone(),
                full_name: request.owner_name.clone(),
                phone: request.phone.clone(),
                position: OWNER_ROLE.to_string(),
            })
            .await?;
        if staff.created {
            tracker.record(Compensation::DeleteStaff(staff.id));
        }

        let link = self
            .stores
            .staff_branches
            .upsert_link(StaffBranchCreate {
                staff_id: staff.id,
                branch_id: hq,
                is_primary: true,
            })
            .await?;
        if link.created {
            tracker.record(Compensation::DeleteStaffBranch(link.id));
        }

        let role = self
            .stores
            .roles
            .upsert_role(UserRoleCreate {
                user_id,
                tenant_id,
                role: OWNER_ROLE.to_string(),
                permissions: OWNER_PERMISSIONS.iter().map(|p| p.to_string()).collect(),
            })
            .await?;
        if role.created {
            tracker.record(Compensation::DeleteUserRole(role.id));
        }

        debug!(staff_id = %staff.id, role_id = %role.id, "Staff and role in place");
        Ok(staff.id)
    }

    async fn seed_services(
        &self,
        tenant_id: TenantId,
        defaults: &VerticalDefaults,
        details: &mut ProvisionDetails,
        tracker: &mut RollbackTracker,
    ) {
        for template in defaults.services {
            let created = self
                .stores
                .services
                .create_service(ServiceCreate {
                    tenant_id,
                    name: template.name.to_string(),
                    duration_minutes: template.duration_minutes,
                })
                .await;
            match created {
                Ok(id) => {
                    tracker.record(Compensation::DeleteService(id));
                    details.services_created += 1;
                }
                Err(e) => {
                    warn!(service = template.name, error = %e, "Skipping default service");
                    details
                        .warnings
                        .push(format!("Service '{}' was not created: {e}", template.name));
                }
            }
        }
    }

    async fn seed_faqs(
        &self,
        tenant_id: TenantId,
        defaults: &VerticalDefaults,
        details: &mut ProvisionDetails,
        tracker: &mut RollbackTracker,
    ) {
        for template in defaults.faqs {
            let created = self
                .stores
                .faqs
                .create_faq(FaqCreate {
                    tenant_id,
                    question: template.question.to_string(),
                    answer: template.answer.to_string(),
                    category: template.category.to_string(),
                })
                .await;
            match created {
                Ok(id) => {
                    tracker.record(Compensation::DeleteFaq(id));
                    details.faqs_created += 1;
                }
                Err(e) => {
                    warn!(category = template.category, error = %e, "Skipping default FAQ");
                    details
                        .warnings
                        .push(format!("FAQ '{}' was not created: {e}", template.question));
                }
            }
        }
    }

    async fn audit(
        &self,
        request: &ValidatedRequest,
        tenant_id: TenantId,
        slug: &str,
        details: &mut ProvisionDetails,
    ) {
        let entry = AuditLogCreate {
            tenant_id,
            action: "tenant.provisioned".to_string(),
            actor: request.email.clone(),
            details: json!({
                "client_id": request.client_id.0,
                "slug": slug,
                "plan": request.plan,
                "vertical": request.vertical,
                "branches_requested": details.branches_requested,
                "branches_created": details.branches_created,
                "services_created": details.services_created,
                "faqs_created": details.faqs_created,
                "existing_account": details.existing_account,
            }),
        };
        match self.stores.audit_logs.record(entry).await {
            Ok(_) => details.audit_logged = true,
            Err(e) => {
                warn!(error = %e, "Audit entry not written");
                details.warnings.push(format!("Audit entry was not written: {e}"));
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
