use async_trait::async_trait;

use crate::core::{
    errors::OrgResult,
    models::{Group, Membership, User, Vault, VaultGroupAccess, VaultUserAccess},
};

/// Storage contract shared by every backend.
///
/// `create_*` fails when the natural key (email or name) is already taken and
/// returns the entity with its backend-assigned id. `ensure_*` on users, groups
/// and vaults only updates: the id must already exist, and the fake backend
/// refuses to move a record onto another record's email or name. `ensure_*` on
/// memberships and grants is a create-or-update keyed by the record's two ids.
#[async_trait]
pub trait OrgRepository: Send + Sync {
    async fn create_user(&self, user: &User) -> OrgResult<User>;
    async fn get_user_by_id(&self, id: &str) -> OrgResult<User>;
    async fn get_user_by_email(&self, email: &str) -> OrgResult<User>;
    async fn ensure_user(&self, user: &User) -> OrgResult<User>;
    async fn delete_user(&self, id: &str) -> OrgResult<()>;

    async fn create_group(&self, group: &Group) -> OrgResult<Group>;
    async fn get_group_by_id(&self, id: &str) -> OrgResult<Group>;
    async fn get_group_by_name(&self, name: &str) -> OrgResult<Group>;
    async fn ensure_group(&self, group: &Group) -> OrgResult<Group>;
    async fn delete_group(&self, id: &str) -> OrgResult<()>;

    async fn create_vault(&self, vault: &Vault) -> OrgResult<Vault>;
    async fn get_vault_by_id(&self, id: &str) -> OrgResult<Vault>;
    async fn get_vault_by_name(&self, name: &str) -> OrgResult<Vault>;
    async fn list_vaults_by_user(&self, user_id: &str) -> OrgResult<Vec<Vault>>;
    async fn ensure_vault(&self, vault: &Vault) -> OrgResult<Vault>;
    async fn delete_vault(&self, id: &str) -> OrgResult<()>;

    async fn ensure_membership(&self, membership: &Membership) -> OrgResult<()>;
    async fn get_membership_by_id(&self, group_id: &str, user_id: &str)
    -> OrgResult<Membership>;
    async fn delete_membership(&self, group_id: &str, user_id: &str) -> OrgResult<()>;

    async fn ensure_vault_group_access(&self, access: &VaultGroupAccess) -> OrgResult<()>;
    async fn get_vault_group_access_by_id(
        &self,
        vault_id: &str,
        group_id: &str,
    ) -> OrgResult<VaultGroupAccess>;
    async fn delete_vault_group_access(&self, vault_id: &str, group_id: &str) -> OrgResult<()>;

    async fn ensure_vault_user_access(&self, access: &VaultUserAccess) -> OrgResult<()>;
    async fn get_vault_user_access_by_id(
        &self,
        vault_id: &str,
        user_id: &str,
    ) -> OrgResult<VaultUserAccess>;
    async fn delete_vault_user_access(&self, vault_id: &str, user_id: &str) -> OrgResult<()>;
}
