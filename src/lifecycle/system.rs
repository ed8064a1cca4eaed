use crate::assembly::ComponentAssembler;
use crate::clients::{
    AuditLogClient, BranchClient, ClientAccountClient, ComponentClient, FaqClient,
    IdentityClient, ServiceClient, StaffBranchClient, StaffClient, TenantClient, UserRoleClient,
};
use crate::config::{ForgeConfig, ProvisioningConfig};
use crate::provisioning::{ProvisioningStores, TenantProvisioner};
use crate::{catalog_actor, content_actor, identity_actor, staff_actor, tenant_actor};
use std::sync::Arc;
use tracing::{error, info};

/// Runtime owner of every record store.
///
/// `TenantSystem` is responsible for:
/// - **Lifecycle Management**: spawning each resource actor and stopping it again
/// - **Wiring**: handing out the typed clients, and building the
///   [`TenantProvisioner`] and [`ComponentAssembler`] on top of them
///
/// # Example
///
/// ```rust
/// use tenant_forge::config::ForgeConfig;
/// use tenant_forge::lifecycle::TenantSystem;
///
/// #[tokio::main]
/// async fn main() -> Result<(), String> {
///     let system = TenantSystem::new(&ForgeConfig::default());
///     let provisioner = system.provisioner(ForgeConfig::default().provisioning);
///     assert_eq!(provisioner.config().max_slug_attempts, 5);
///     drop(provisioner);
///     system.shutdown().await
/// }
/// ```
pub struct TenantSystem {
    pub client_accounts: ClientAccountClient,
    pub tenants: TenantClient,
    pub branches: BranchClient,
    pub identities: IdentityClient,
    pub staff: StaffClient,
    pub staff_branches: StaffBranchClient,
    pub user_roles: UserRoleClient,
    pub services: ServiceClient,
    pub faqs: FaqClient,
    pub audit_logs: AuditLogClient,
    pub components: ComponentClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl TenantSystem {
    /// Spawns one actor per record type.
    pub fn new(config: &ForgeConfig) -> Self {
        let buffer = config.actor_buffer_size;

        let (client_account_store, client_accounts) = tenant_actor::new_client_accounts(buffer);
        let (tenant_store, tenants) = tenant_actor::new_tenants(buffer);
        let (branch_store, branches) = tenant_actor::new_branches(buffer);
        let (identity_store, identities) = identity_actor::new(buffer);
        let (staff_store, staff) = staff_actor::new_staff(buffer);
        let (staff_branch_store, staff_branches) = staff_actor::new_staff_branches(buffer);
        let (user_role_store, user_roles) = staff_actor::new_user_roles(buffer);
        let (service_store, services) = content_actor::new_services(buffer);
        let (faq_store, faqs) = content_actor::new_faqs(buffer);
        let (audit_log_store, audit_logs) = content_actor::new_audit_logs(buffer);
        let (component_store, components) = catalog_actor::new(buffer);

        // No actor depends on another (Context = ())
        let handles = vec![
            tokio::spawn(client_account_store.run(())),
            tokio::spawn(tenant_store.run(())),
            tokio::spawn(branch_store.run(())),
            tokio::spawn(identity_store.run(())),
            tokio::spawn(staff_store.run(())),
            tokio::spawn(staff_branch_store.run(())),
            tokio::spawn(user_role_store.run(())),
            tokio::spawn(service_store.run(())),
            tokio::spawn(faq_store.run(())),
            tokio::spawn(audit_log_store.run(())),
            tokio::spawn(component_store.run(())),
        ];
        info!(actors = handles.len(), "Tenant system started");

        Self {
            client_accounts,
            tenants,
            branches,
            identities,
            staff,
            staff_branches,
            user_roles,
            services,
            faqs,
            audit_logs,
            components,
            handles,
        }
    }

    /// The stores provisioning writes to.
    pub fn stores(&self) -> ProvisioningStores {
        ProvisioningStores {
            clients: self.client_accounts.clone(),
            tenants: self.tenants.clone(),
            branches: self.branches.clone(),
            staff: self.staff.clone(),
            staff_branches: self.staff_branches.clone(),
            roles: self.user_roles.clone(),
            services: self.services.clone(),
            faqs: self.faqs.clone(),
            audit_logs: self.audit_logs.clone(),
        }
    }

    pub fn provisioner(&self, config: ProvisioningConfig) -> TenantProvisioner {
        TenantProvisioner::new(self.stores(), Arc::new(self.identities.clone()), config)
    }

    /// An assembler reading the live component catalog.
    pub fn assembler(&self) -> ComponentAssembler<ComponentClient> {
        ComponentAssembler::new(self.components.clone())
    }

    /// Drops every client held here and waits for the actors to stop.
    ///
    /// Actors stop once *all* clients are gone, so provisioners and
    /// assemblers built from this system must be dropped first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        let TenantSystem {
            client_accounts,
            tenants,
            branches,
            identities,
            staff,
            staff_branches,
            user_roles,
            services,
            faqs,
            audit_logs,
            components,
            handles,
        } = self;
        drop((client_accounts, tenants, branches, identities, staff, staff_branches));
        drop((user_roles, services, faqs, audit_logs, components));

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
