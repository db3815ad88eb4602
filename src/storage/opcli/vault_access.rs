//! Vault grants for groups and users.
//!
//! op can't patch an existing grant, so ensuring one revokes whatever is
//! there and grants the full desired set. Between the two calls the subject
//! has no access to the vault.

use serde::Deserialize;
use tracing::debug;

use super::{OpCliRepository, command::OpCommand, runner::OpCli};
use crate::core::{
    composite_id::CompositeKey,
    errors::{OrgError, OrgResult},
    models::{VaultGroupAccess, VaultUserAccess},
    permissions::AccessPermissions,
};

#[derive(Debug, Deserialize)]
struct OpVaultAccess {
    id: String,
    #[serde(default)]
    permissions: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum Subject {
    Group,
    User,
}

impl Subject {
    fn base(self) -> OpCommand {
        match self {
            Subject::Group => OpCommand::new().vault().group(),
            Subject::User => OpCommand::new().vault().user(),
        }
    }

    fn with_flag(self, cmd: OpCommand, id: &str) -> OpCommand {
        match self {
            Subject::Group => cmd.group_flag(id),
            Subject::User => cmd.user_flag(id),
        }
    }

    fn key(self) -> CompositeKey {
        match self {
            Subject::Group => CompositeKey::VaultGroupAccess,
            Subject::User => CompositeKey::VaultUserAccess,
        }
    }

    fn entity(self) -> &'static str {
        match self {
            Subject::Group => "vault group access",
            Subject::User => "vault user access",
        }
    }
}

async fn revoke<C: OpCli>(
    repo: &OpCliRepository<C>,
    subject: Subject,
    vault_id: &str,
    subject_id: &str,
) -> OrgResult<()> {
    let cmd = subject.base().revoke().vault_flag(vault_id);
    let cmd = subject.with_flag(cmd, subject_id);
    repo.exec(&cmd).await?;
    Ok(())
}

async fn replace_grant<C: OpCli>(
    repo: &OpCliRepository<C>,
    subject: Subject,
    vault_id: &str,
    subject_id: &str,
    permissions: &AccessPermissions,
) -> OrgResult<()> {
    // A failed revoke usually means there was no grant yet.
    if let Err(err) = revoke(repo, subject, vault_id, subject_id).await {
        debug!(
            entity = subject.entity(),
            vault_id, subject_id, error = %err, "ignoring revoke failure before grant"
        );
    }

    let cmd = subject.base().grant().vault_flag(vault_id);
    let cmd = subject
        .with_flag(cmd, subject_id)
        .no_input_flag()
        .permissions_flag(&permissions.to_tokens());
    repo.exec(&cmd).await?;
    Ok(())
}

async fn find<C: OpCli>(
    repo: &OpCliRepository<C>,
    subject: Subject,
    vault_id: &str,
    subject_id: &str,
) -> OrgResult<AccessPermissions> {
    let cmd = subject.base().list().raw(vault_id).format_json_flag();
    let accesses: Vec<OpVaultAccess> = repo.query(&cmd).await?;

    accesses
        .into_iter()
        .find(|a| a.id == subject_id)
        .map(|a| AccessPermissions::from_tokens(&a.permissions))
        .ok_or_else(|| {
            OrgError::not_found(subject.entity(), subject.key().pack(vault_id, subject_id))
        })
}

pub(super) async fn ensure_group<C: OpCli>(
    repo: &OpCliRepository<C>,
    access: &VaultGroupAccess,
) -> OrgResult<()> {
    replace_grant(
        repo,
        Subject::Group,
        &access.vault_id,
        &access.group_id,
        &access.permissions,
    )
    .await
}

pub(super) async fn get_group<C: OpCli>(
    repo: &OpCliRepository<C>,
    vault_id: &str,
    group_id: &str,
) -> OrgResult<VaultGroupAccess> {
    let permissions = find(repo, Subject::Group, vault_id, group_id).await?;
    Ok(VaultGroupAccess {
        vault_id: vault_id.to_owned(),
        group_id: group_id.to_owned(),
        permissions,
    })
}

pub(super) async fn revoke_group<C: OpCli>(
    repo: &OpCliRepository<C>,
    vault_id: &str,
    group_id: &str,
) -> OrgResult<()> {
    revoke(repo, Subject::Group, vault_id, group_id).await
}

pub(super) async fn ensure_user<C: OpCli>(
    repo: &OpCliRepository<C>,
    access: &VaultUserAccess,
) -> OrgResult<()> {
    replace_grant(
        repo,
        Subject::User,
        &access.vault_id,
        &access.user_id,
        &access.permissions,
    )
    .await
}

pub(super) async fn get_user<C: OpCli>(
    repo: &OpCliRepository<C>,
    vault_id: &str,
    user_id: &str,
) -> OrgResult<VaultUserAccess> {
    let permissions = find(repo, Subject::User, vault_id, user_id).await?;
    Ok(VaultUserAccess {
        vault_id: vault_id.to_owned(),
        user_id: user_id.to_owned(),
        permissions,
    })
}

pub(super) async fn revoke_user<C: OpCli>(
    repo: &OpCliRepository<C>,
    vault_id: &str,
    user_id: &str,
) -> OrgResult<()> {
    revoke(repo, Subject::User, vault_id, user_id).await
}
