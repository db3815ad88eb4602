//! Backend that drives the 1Password `op` CLI.
//!
//! Every repository call becomes one `op` invocation, except where the tool
//! lacks a matching primitive: manager memberships take two grants and
//! vault grants are a revoke followed by a grant. Neither pair is atomic.

mod group;
mod membership;
mod user;
mod vault;
mod vault_access;

pub mod command;
pub mod runner;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::core::{
    errors::{OrgError, OrgResult},
    models::{Group, Membership, User, Vault, VaultGroupAccess, VaultUserAccess},
};
use crate::storage::r#trait::OrgRepository;

use self::command::OpCommand;
use self::runner::{OpCli, OpProcess, RunFailure};

impl From<RunFailure> for OrgError {
    fn from(failure: RunFailure) -> Self {
        Self::Cli {
            reason: failure.reason,
            stderr: failure.stderr,
        }
    }
}

#[derive(Clone)]
pub struct OpCliRepository<C: OpCli = OpProcess> {
    cli: C,
}

impl<C: OpCli> OpCliRepository<C> {
    pub fn new(cli: C) -> Self {
        Self { cli }
    }

    pub fn cli(&self) -> &C {
        &self.cli
    }

    async fn exec(&self, cmd: &OpCommand) -> OrgResult<String> {
        Ok(self.cli.run(cmd.args()).await?)
    }

    async fn query<T: DeserializeOwned>(&self, cmd: &OpCommand) -> OrgResult<T> {
        let stdout = self.exec(cmd).await?;
        serde_json::from_str(&stdout).map_err(OrgError::Decode)
    }
}

#[async_trait]
impl<C: OpCli> OrgRepository for OpCliRepository<C> {
    async fn create_user(&self, user: &User) -> OrgResult<User> {
        user::create(self, user).await
    }

    async fn get_user_by_id(&self, id: &str) -> OrgResult<User> {
        user::get(self, id).await
    }

    async fn get_user_by_email(&self, email: &str) -> OrgResult<User> {
        user::get(self, email).await
    }

    async fn ensure_user(&self, user: &User) -> OrgResult<User> {
        user::ensure(self, user).await
    }

    async fn delete_user(&self, id: &str) -> OrgResult<()> {
        user::delete(self, id).await
    }

    async fn create_group(&self, group: &Group) -> OrgResult<Group> {
        group::create(self, group).await
    }

    async fn get_group_by_id(&self, id: &str) -> OrgResult<Group> {
        group::get(self, id).await
    }

    async fn get_group_by_name(&self, name: &str) -> OrgResult<Group> {
        group::get(self, name).await
    }

    async fn ensure_group(&self, group: &Group) -> OrgResult<Group> {
        group::ensure(self, group).await
    }

    async fn delete_group(&self, id: &str) -> OrgResult<()> {
        group::delete(self, id).await
    }

    async fn create_vault(&self, vault: &Vault) -> OrgResult<Vault> {
        vault::create(self, vault).await
    }

    async fn get_vault_by_id(&self, id: &str) -> OrgResult<Vault> {
        vault::get(self, id).await
    }

    async fn get_vault_by_name(&self, name: &str) -> OrgResult<Vault> {
        vault::get(self, name).await
    }

    async fn list_vaults_by_user(&self, user_id: &str) -> OrgResult<Vec<Vault>> {
        vault::list_by_user(self, user_id).await
    }

    async fn ensure_vault(&self, vault: &Vault) -> OrgResult<Vault> {
        vault::ensure(self, vault).await
    }

    async fn delete_vault(&self, id: &str) -> OrgResult<()> {
        vault::delete(self, id).await
    }

    async fn ensure_membership(&self, membership: &Membership) -> OrgResult<()> {
        membership::ensure(self, membership).await
    }

    async fn get_membership_by_id(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> OrgResult<Membership> {
        membership::get(self, group_id, user_id).await
    }

    async fn delete_membership(&self, group_id: &str, user_id: &str) -> OrgResult<()> {
        membership::delete(self, group_id, user_id).await
    }

    async fn ensure_vault_group_access(&self, access: &VaultGroupAccess) -> OrgResult<()> {
        vault_access::ensure_group(self, access).await
    }

    async fn get_vault_group_access_by_id(
        &self,
        vault_id: &str,
        group_id: &str,
    ) -> OrgResult<VaultGroupAccess> {
        vault_access::get_group(self, vault_id, group_id).await
    }

    async fn delete_vault_group_access(&self, vault_id: &str, group_id: &str) -> OrgResult<()> {
        vault_access::revoke_group(self, vault_id, group_id).await
    }

    async fn ensure_vault_user_access(&self, access: &VaultUserAccess) -> OrgResult<()> {
        vault_access::ensure_user(self, access).await
    }

    async fn get_vault_user_access_by_id(
        &self,
        vault_id: &str,
        user_id: &str,
    ) -> OrgResult<VaultUserAccess> {
        vault_access::get_user(self, vault_id, user_id).await
    }

    async fn delete_vault_user_access(&self, vault_id: &str, user_id: &str) -> OrgResult<()> {
        vault_access::revoke_user(self, vault_id, user_id).await
    }
}
