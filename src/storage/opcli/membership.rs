use serde::Deserialize;

use super::{OpCliRepository, command::OpCommand, runner::OpCli};
use crate::core::{
    composite_id::CompositeKey,
    errors::{OrgError, OrgResult},
    models::{Membership, MembershipRole},
};

#[derive(Debug, Deserialize)]
struct OpGroupMember {
    id: String,
    #[serde(default)]
    role: String,
}

/// Grants the membership, then grants it again for any non-default role.
///
/// op always adds a user with the member role, whatever `--role` says, and
/// only honors the role on a repeated grant. If the second call fails the
/// user stays in the group as a plain member.
pub(super) async fn ensure<C: OpCli>(
    repo: &OpCliRepository<C>,
    membership: &Membership,
) -> OrgResult<()> {
    let cmd = OpCommand::new()
        .group()
        .user()
        .grant()
        .group_flag(&membership.group_id)
        .user_flag(&membership.user_id)
        .role_flag(membership.role.as_str());

    repo.exec(&cmd).await?;
    if membership.role != MembershipRole::Member {
        repo.exec(&cmd).await?;
    }
    Ok(())
}

pub(super) async fn get<C: OpCli>(
    repo: &OpCliRepository<C>,
    group_id: &str,
    user_id: &str,
) -> OrgResult<Membership> {
    let cmd = OpCommand::new()
        .group()
        .user()
        .list()
        .raw(group_id)
        .format_json_flag();
    let members: Vec<OpGroupMember> = repo.query(&cmd).await?;

    let member = members
        .into_iter()
        .find(|m| m.id == user_id)
        .ok_or_else(|| {
            OrgError::not_found("membership", CompositeKey::Membership.pack(group_id, user_id))
        })?;

    Ok(Membership {
        user_id: user_id.to_owned(),
        group_id: group_id.to_owned(),
        role: MembershipRole::parse(&member.role)?,
    })
}

pub(super) async fn delete<C: OpCli>(
    repo: &OpCliRepository<C>,
    group_id: &str,
    user_id: &str,
) -> OrgResult<()> {
    let cmd = OpCommand::new()
        .group()
        .user()
        .revoke()
        .group_flag(group_id)
        .user_flag(user_id);
    repo.exec(&cmd).await?;
    Ok(())
}
