//! Account provisioning seam
//!
//! Creating an account is a privileged operation executed behind this
//! trait, so that the concrete credential-issuance flow can be replaced
//! without touching call sites.
//!
//! The default backend, [`SingleSessionProvisioning`], reproduces the
//! behavior of the upstream auth client, which holds a single session:
//! issuing credentials for a new account drops the acting admin's own
//! session, and the admin has to log in again afterwards. Known
//! limitation of that client; swap the backend to change the semantics.

use std::sync::Arc;

use async_trait::async_trait;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{Capability, CurrentUser, SessionRevocations};
use crate::db::models::{UserCreate, UserProfile};
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

/// Result of a provisioning call
#[derive(Debug)]
pub struct ProvisioningOutcome {
    /// The newly created profile
    pub user: UserProfile,
    /// Whether the acting user's own session was invalidated as a side
    /// effect and must be re-established
    pub actor_session_invalidated: bool,
}

/// Privileged account creation
#[async_trait]
pub trait ProvisioningBackend: Send + Sync {
    async fn create_account(
        &self,
        actor: &CurrentUser,
        data: UserCreate,
    ) -> AppResult<ProvisioningOutcome>;
}

/// Backend bound to a single-session auth client
pub struct SingleSessionProvisioning {
    db: Surreal<Db>,
    sessions: Arc<SessionRevocations>,
}

impl SingleSessionProvisioning {
    pub fn new(db: Surreal<Db>, sessions: Arc<SessionRevocations>) -> Self {
        Self { db, sessions }
    }
}

#[async_trait]
impl ProvisioningBackend for SingleSessionProvisioning {
    async fn create_account(
        &self,
        actor: &CurrentUser,
        data: UserCreate,
    ) -> AppResult<ProvisioningOutcome> {
        actor.require(Capability::UsersManage)?;

        // Admins provision into their own restaurant only
        if !matches!(actor.role, crate::db::models::Role::SuperAdmin)
            && data.restaurant_name != actor.restaurant_name
        {
            return Err(AppError::Forbidden(
                "Cannot provision accounts for another restaurant".to_string(),
            ));
        }

        validator::Validate::validate(&data)?;

        let repo = UserRepository::new(self.db.clone());
        let user = repo.create(data).await?;

        // The single-session client signed in as the new account while
        // issuing its credentials, dropping the actor's session.
        self.sessions.revoke_now(&actor.id);
        tracing::info!(
            actor = %actor.name,
            created = %user.email,
            "Account provisioned; actor must re-authenticate"
        );

        Ok(ProvisioningOutcome {
            user,
            actor_session_invalidated: true,
        })
    }
}
