//! Authentication and authorization
//!
//! - [`JwtService`] - token issue/validation
//! - [`CurrentUser`] - explicit session context, threaded through handlers
//!   and domain services (never an ambient global)
//! - [`capabilities`] - role capability sets, the single authorization policy
//! - [`ProvisioningBackend`] - privileged account creation seam
//! - [`SessionRevocations`] - token invalidation ledger

pub mod capabilities;
pub mod extractor;
pub mod jwt;
pub mod provisioning;
pub mod sessions;

pub use capabilities::Capability;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use provisioning::{ProvisioningBackend, ProvisioningOutcome, SingleSessionProvisioning};
pub use sessions::SessionRevocations;
