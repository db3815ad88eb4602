use serde::{Deserialize, Serialize};

use crate::core::{
    composite_id::CompositeKey,
    errors::{OrgError, OrgResult},
    permissions::AccessPermissions,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipRole {
    #[default]
    Member,
    Manager,
}

impl MembershipRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipRole::Member => "member",
            MembershipRole::Manager => "manager",
        }
    }

    /// The tool reports roles upper-cased (`MEMBER`) but accepts them lower-cased.
    pub fn parse(value: &str) -> OrgResult<Self> {
        match value.to_ascii_lowercase().as_str() {
            "member" => Ok(Self::Member),
            "manager" => Ok(Self::Manager),
            _ => Err(OrgError::InvalidRole(value.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub user_id: String,
    pub group_id: String,
    pub role: MembershipRole,
}

impl Membership {
    pub fn id(&self) -> String {
        CompositeKey::Membership.pack(&self.group_id, &self.user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultGroupAccess {
    pub vault_id: String,
    pub group_id: String,
    pub permissions: AccessPermissions,
}

impl VaultGroupAccess {
    pub fn id(&self) -> String {
        CompositeKey::VaultGroupAccess.pack(&self.vault_id, &self.group_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultUserAccess {
    pub vault_id: String,
    pub user_id: String,
    pub permissions: AccessPermissions,
}

impl VaultUserAccess {
    pub fn id(&self) -> String {
        CompositeKey::VaultUserAccess.pack(&self.vault_id, &self.user_id)
    }
}
