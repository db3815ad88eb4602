use serde::Deserialize;

use super::{OpCliRepository, command::OpCommand, runner::OpCli};
use crate::core::{
    errors::{OrgError, OrgResult},
    models::User,
};

#[derive(Debug, Deserialize)]
struct OpUser {
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    name: String,
}

impl From<OpUser> for User {
    fn from(u: OpUser) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
        }
    }
}

pub(super) async fn create<C: OpCli>(repo: &OpCliRepository<C>, user: &User) -> OrgResult<User> {
    if get(repo, &user.email).await.is_ok() {
        return Err(OrgError::already_exists("user", &user.email));
    }

    let cmd = OpCommand::new()
        .user()
        .provision()
        .email_flag(&user.email)
        .name_flag(&user.name)
        .format_json_flag();
    let created: OpUser = repo.query(&cmd).await?;
    Ok(created.into())
}

/// `op user get` accepts either the id or the email.
pub(super) async fn get<C: OpCli>(repo: &OpCliRepository<C>, id_or_email: &str) -> OrgResult<User> {
    let cmd = OpCommand::new()
        .user()
        .get()
        .raw(id_or_email)
        .format_json_flag();
    let found: OpUser = repo.query(&cmd).await?;
    Ok(found.into())
}

pub(super) async fn ensure<C: OpCli>(repo: &OpCliRepository<C>, user: &User) -> OrgResult<User> {
    let cmd = OpCommand::new()
        .user()
        .edit()
        .raw(&user.id)
        .name_flag(&user.name);
    repo.exec(&cmd).await?;
    Ok(user.clone())
}

pub(super) async fn delete<C: OpCli>(repo: &OpCliRepository<C>, id: &str) -> OrgResult<()> {
    let cmd = OpCommand::new().user().delete().raw(id);
    repo.exec(&cmd).await?;
    Ok(())
}
