use serde::Deserialize;

use super::{OpCliRepository, command::OpCommand, runner::OpCli};
use crate::core::{
    errors::{OrgError, OrgResult},
    models::Vault,
};

#[derive(Debug, Deserialize)]
struct OpVault {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
}

impl From<OpVault> for Vault {
    fn from(v: OpVault) -> Self {
        Self {
            id: v.id,
            name: v.name,
            description: v.description,
        }
    }
}

pub(super) async fn create<C: OpCli>(
    repo: &OpCliRepository<C>,
    vault: &Vault,
) -> OrgResult<Vault> {
    // Same as groups, names are not unique on the op side.
    if get(repo, &vault.name).await.is_ok() {
        return Err(OrgError::already_exists("vault", &vault.name));
    }

    let cmd = OpCommand::new()
        .vault()
        .create()
        .raw(&vault.name)
        .description_flag(&vault.description)
        .format_json_flag();
    let created: OpVault = repo.query(&cmd).await?;
    Ok(created.into())
}

pub(super) async fn get<C: OpCli>(repo: &OpCliRepository<C>, id_or_name: &str) -> OrgResult<Vault> {
    let cmd = OpCommand::new()
        .vault()
        .get()
        .raw(id_or_name)
        .format_json_flag();
    let found: OpVault = repo.query(&cmd).await?;
    Ok(found.into())
}

pub(super) async fn list_by_user<C: OpCli>(
    repo: &OpCliRepository<C>,
    user_id: &str,
) -> OrgResult<Vec<Vault>> {
    let cmd = OpCommand::new()
        .vault()
        .list()
        .user_flag(user_id)
        .format_json_flag();
    let vaults: Vec<OpVault> = repo.query(&cmd).await?;
    Ok(vaults.into_iter().map(Vault::from).collect())
}

pub(super) async fn ensure<C: OpCli>(
    repo: &OpCliRepository<C>,
    vault: &Vault,
) -> OrgResult<Vault> {
    let cmd = OpCommand::new()
        .vault()
        .edit()
        .raw(&vault.id)
        .name_flag(&vault.name)
        .description_flag(&vault.description);
    repo.exec(&cmd).await?;
    Ok(vault.clone())
}

pub(super) async fn delete<C: OpCli>(repo: &OpCliRepository<C>, id: &str) -> OrgResult<()> {
    let cmd = OpCommand::new().vault().delete().raw(id);
    repo.exec(&cmd).await?;
    Ok(())
}
