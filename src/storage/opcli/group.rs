use serde::Deserialize;

use super::{OpCliRepository, command::OpCommand, runner::OpCli};
use crate::core::{
    errors::{OrgError, OrgResult},
    models::Group,
};

#[derive(Debug, Deserialize)]
struct OpGroup {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
}

impl From<OpGroup> for Group {
    fn from(g: OpGroup) -> Self {
        Self {
            id: g.id,
            name: g.name,
            description: g.description,
        }
    }
}

pub(super) async fn create<C: OpCli>(
    repo: &OpCliRepository<C>,
    group: &Group,
) -> OrgResult<Group> {
    // op happily creates several groups with the same name.
    if get(repo, &group.name).await.is_ok() {
        return Err(OrgError::already_exists("group", &group.name));
    }

    let cmd = OpCommand::new()
        .group()
        .create()
        .raw(&group.name)
        .description_flag(&group.description)
        .format_json_flag();
    let created: OpGroup = repo.query(&cmd).await?;
    Ok(created.into())
}

pub(super) async fn get<C: OpCli>(repo: &OpCliRepository<C>, id_or_name: &str) -> OrgResult<Group> {
    let cmd = OpCommand::new()
        .group()
        .get()
        .raw(id_or_name)
        .format_json_flag();
    let found: OpGroup = repo.query(&cmd).await?;
    Ok(found.into())
}

pub(super) async fn ensure<C: OpCli>(
    repo: &OpCliRepository<C>,
    group: &Group,
) -> OrgResult<Group> {
    let cmd = OpCommand::new()
        .group()
        .edit()
        .raw(&group.id)
        .name_flag(&group.name)
        .description_flag(&group.description);
    repo.exec(&cmd).await?;
    Ok(group.clone())
}

pub(super) async fn delete<C: OpCli>(repo: &OpCliRepository<C>, id: &str) -> OrgResult<()> {
    let cmd = OpCommand::new().group().delete().raw(id);
    repo.exec(&cmd).await?;
    Ok(())
}
