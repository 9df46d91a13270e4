use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{
    JwtService, ProvisioningBackend, SessionRevocations, SingleSessionProvisioning,
};
use crate::core::Config;
use crate::db::DbService;
use crate::db::models::{Role, UserCreate};
use crate::db::repository::UserRepository;
use crate::live::SubscriptionHub;
use crate::register::RegisterManager;
use crate::stock::StockService;
use crate::tenants::TenantService;

/// Server state — shared handles to every service
///
/// Cloning is shallow (`Arc` all the way down); handlers receive a clone
/// per request.
///
/// | Field | Purpose |
/// |-------|---------|
/// | config | configuration (immutable) |
/// | db | embedded SurrealDB handle |
/// | hub | live change-notification hub |
/// | jwt_service | token issue/validation |
/// | sessions | token revocation ledger |
/// | registers | cash-drawer lifecycle manager |
/// | stock | stock ledger service |
/// | tenants | restaurant administration service |
/// | provisioning | account creation backend |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub hub: SubscriptionHub,
    pub jwt_service: Arc<JwtService>,
    pub sessions: Arc<SessionRevocations>,
    pub registers: Arc<RegisterManager>,
    pub stock: StockService,
    pub tenants: TenantService,
    pub provisioning: Arc<dyn ProvisioningBackend>,
}

impl ServerState {
    /// Initialize the server state.
    ///
    /// Creates the working directory structure, opens the database and
    /// wires up the services.
    ///
    /// # Panics
    ///
    /// Panics when the working directory or the database cannot be
    /// initialized — there is nothing to serve without them.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("tableauchef.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let state = Self::from_parts(config.clone(), db_service.db);
        state.seed_super_admin().await;
        state
    }

    /// Build the state around an existing database handle (tests use
    /// this with an in-memory database).
    pub fn from_parts(config: Config, db: Surreal<Db>) -> Self {
        let sessions = Arc::new(SessionRevocations::new());
        let provisioning: Arc<dyn ProvisioningBackend> = Arc::new(SingleSessionProvisioning::new(
            db.clone(),
            sessions.clone(),
        ));

        Self {
            config: config.clone(),
            db: db.clone(),
            hub: SubscriptionHub::new(),
            jwt_service: Arc::new(JwtService::new(config.jwt)),
            sessions,
            registers: Arc::new(RegisterManager::new(db.clone())),
            stock: StockService::new(db.clone()),
            tenants: TenantService::new(db.clone()),
            provisioning,
        }
    }

    /// Create the platform super admin on first boot
    async fn seed_super_admin(&self) {
        let repo = UserRepository::new(self.db.clone());
        match repo.find_all().await {
            Ok(users) if users.is_empty() => {
                let email = std::env::var("SUPER_ADMIN_EMAIL")
                    .unwrap_or_else(|_| "admin@tableauchef.local".to_string());
                let password = std::env::var("SUPER_ADMIN_PASSWORD").unwrap_or_else(|_| {
                    tracing::warn!(
                        "SUPER_ADMIN_PASSWORD not set, using the default — change it immediately"
                    );
                    "change-me-now".to_string()
                });

                let result = repo
                    .create(UserCreate {
                        email: email.clone(),
                        password,
                        name: "Platform Admin".to_string(),
                        role: Role::SuperAdmin,
                        restaurant_name: String::new(),
                    })
                    .await;

                match result {
                    Ok(_) => tracing::info!(email, "Seeded platform super admin"),
                    Err(e) => tracing::error!("Failed to seed super admin: {e}"),
                }
            }
            Ok(_) => {}
            Err(e) => tracing::error!("Failed to check for existing users: {e}"),
        }
    }

    /// Get the database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Broadcast a change notification to every live subscriber.
    ///
    /// # Arguments
    /// - `resource`: resource type ("inventory", "journal", ...)
    /// - `action`: change type ("created", "updated", "deleted")
    /// - `id`: resource id
    /// - `data`: resource data (None for deletions)
    pub fn broadcast_sync<T: serde::Serialize>(
        &self,
        resource: &str,
        action: &str,
        id: &str,
        data: Option<&T>,
    ) {
        let payload = data.and_then(|d| serde_json::to_value(d).ok());
        let version = self.hub.publish(resource, action, id, payload);
        tracing::debug!(resource, action, id, version, "Change broadcast");
    }
}
