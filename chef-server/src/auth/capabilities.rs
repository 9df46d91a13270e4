//! Capability Definitions
//!
//! All authorization policy lives here: each role maps to a fixed
//! capability set, and callers ask for capabilities, never compare role
//! strings.

use crate::db::models::Role;

/// A single grantable capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Open/close the cash drawer, compute variances
    RegisterOperate,
    /// Restock / consume / recount inventory
    StockManage,
    /// Product catalog CRUD
    CatalogManage,
    /// Manage accounts of the caller's own restaurant
    UsersManage,
    /// Cross-restaurant administration (status toggles, directory)
    TenantsAdminister,
    /// Read journals and notifications
    ReportsView,
    /// Read the marketing-site contact inbox
    ContactInboxView,
}

/// Capability set of the `Admin` role
const ADMIN_CAPABILITIES: &[Capability] = &[
    Capability::RegisterOperate,
    Capability::StockManage,
    Capability::CatalogManage,
    Capability::UsersManage,
    Capability::ReportsView,
];

/// Capability set of the `Cashier` role
const CASHIER_CAPABILITIES: &[Capability] = &[
    Capability::RegisterOperate,
    Capability::StockManage,
    Capability::ReportsView,
];

/// Capability set of the `Super Admin` role.
/// Platform administration only: no drawer or stock operations.
const SUPER_ADMIN_CAPABILITIES: &[Capability] = &[
    Capability::TenantsAdminister,
    Capability::UsersManage,
    Capability::ContactInboxView,
    Capability::ReportsView,
];

/// Capability set for a role
pub fn capabilities_for(role: Role) -> &'static [Capability] {
    match role {
        Role::SuperAdmin => SUPER_ADMIN_CAPABILITIES,
        Role::Admin => ADMIN_CAPABILITIES,
        Role::Cashier => CASHIER_CAPABILITIES,
    }
}

/// Whether a role holds a capability
pub fn role_has(role: Role, capability: Capability) -> bool {
    capabilities_for(role).contains(&capability)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_operate_is_admin_and_cashier_only() {
        assert!(role_has(Role::Admin, Capability::RegisterOperate));
        assert!(role_has(Role::Cashier, Capability::RegisterOperate));
        assert!(!role_has(Role::SuperAdmin, Capability::RegisterOperate));
    }

    #[test]
    fn cashier_cannot_manage_users_or_catalog() {
        assert!(!role_has(Role::Cashier, Capability::UsersManage));
        assert!(!role_has(Role::Cashier, Capability::CatalogManage));
    }

    #[test]
    fn only_super_admin_administers_tenants() {
        assert!(role_has(Role::SuperAdmin, Capability::TenantsAdminister));
        assert!(!role_has(Role::Admin, Capability::TenantsAdminister));
        assert!(!role_has(Role::Cashier, Capability::TenantsAdminister));
    }

    #[test]
    fn contact_inbox_is_super_admin_only() {
        assert!(role_has(Role::SuperAdmin, Capability::ContactInboxView));
        assert!(!role_has(Role::Admin, Capability::ContactInboxView));
    }
}
