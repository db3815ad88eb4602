//! File-backed in-memory backend used for development and tests.
//!
//! All entity maps live behind one `RwLock`; every call holds it for its whole
//! duration, including the snapshot write, so calls are serialized against
//! each other. A failed write does not roll the in-memory change back.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::core::{
    composite_id::CompositeKey,
    errors::{OrgError, OrgResult},
    models::{Group, Membership, User, Vault, VaultGroupAccess, VaultUserAccess},
};
use crate::storage::r#trait::OrgRepository;

/// On-disk document; top-level keys are part of the file format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FakeSnapshot {
    #[serde(rename = "Users", default)]
    pub users: BTreeMap<String, User>,
    #[serde(rename = "Groups", default)]
    pub groups: BTreeMap<String, Group>,
    #[serde(rename = "Members", default)]
    pub members: BTreeMap<String, Membership>,
    #[serde(rename = "Vaults", default)]
    pub vaults: BTreeMap<String, Vault>,
    #[serde(rename = "VaultGroupAccess", default)]
    pub vault_group_access: BTreeMap<String, VaultGroupAccess>,
    #[serde(rename = "VaultUserAccess", default)]
    pub vault_user_access: BTreeMap<String, VaultUserAccess>,
}

#[derive(Clone)]
pub struct FakeRepository {
    path: PathBuf,
    state: Arc<RwLock<FakeSnapshot>>,
}

impl FakeRepository {
    /// Opens the store at `path`. A missing or unreadable file starts empty.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let snapshot = Self::load(&path).await.unwrap_or_default();
        Self {
            path,
            state: Arc::new(RwLock::new(snapshot)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn snapshot(&self) -> FakeSnapshot {
        self.state.read().await.clone()
    }

    async fn load(path: &Path) -> Option<FakeSnapshot> {
        let data = match tokio::fs::read(path).await {
            Ok(data) => data,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "no fake storage file, starting empty");
                return None;
            }
        };

        match serde_json::from_slice(&data) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring corrupt fake storage file");
                None
            }
        }
    }

    async fn persist(&self, snapshot: &FakeSnapshot) -> OrgResult<()> {
        let data = serde_json::to_vec_pretty(snapshot).map_err(OrgError::Marshal)?;
        tokio::fs::write(&self.path, data)
            .await
            .map_err(OrgError::Write)?;
        debug!(path = %self.path.display(), "fake storage persisted");
        Ok(())
    }
}

#[async_trait]
impl OrgRepository for FakeRepository {
    async fn create_user(&self, user: &User) -> OrgResult<User> {
        let mut state = self.state.write().await;

        let taken = state.users.contains_key(&user.email)
            || state.users.values().any(|u| u.email == user.email);
        if taken {
            return Err(OrgError::already_exists("user", &user.email));
        }

        let created = User {
            id: user.email.clone(),
            ..user.clone()
        };
        state.users.insert(created.id.clone(), created.clone());

        self.persist(&state).await?;
        Ok(created)
    }

    async fn get_user_by_id(&self, id: &str) -> OrgResult<User> {
        let state = self.state.read().await;
        state
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| OrgError::not_found("user", id))
    }

    async fn get_user_by_email(&self, email: &str) -> OrgResult<User> {
        let state = self.state.read().await;
        state
            .users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| OrgError::not_found("user", email))
    }

    async fn ensure_user(&self, user: &User) -> OrgResult<User> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&user.id) {
            return Err(OrgError::not_found("user", &user.id));
        }
        let taken = state
            .users
            .values()
            .any(|u| u.id != user.id && u.email == user.email);
        if taken {
            return Err(OrgError::already_exists("user", &user.email));
        }
        state.users.insert(user.id.clone(), user.clone());

        self.persist(&state).await?;
        Ok(user.clone())
    }

    async fn delete_user(&self, id: &str) -> OrgResult<()> {
        let mut state = self.state.write().await;

        if state.users.remove(id).is_none() {
            return Err(OrgError::not_found("user", id));
        }

        self.persist(&state).await
    }

    async fn create_group(&self, group: &Group) -> OrgResult<Group> {
        let mut state = self.state.write().await;

        let taken = state.groups.contains_key(&group.name)
            || state.groups.values().any(|g| g.name == group.name);
        if taken {
            return Err(OrgError::already_exists("group", &group.name));
        }

        let created = Group {
            id: group.name.clone(),
            ..group.clone()
        };
        state.groups.insert(created.id.clone(), created.clone());

        self.persist(&state).await?;
        Ok(created)
    }

    async fn get_group_by_id(&self, id: &str) -> OrgResult<Group> {
        let state = self.state.read().await;
        state
            .groups
            .get(id)
            .cloned()
            .ok_or_else(|| OrgError::not_found("group", id))
    }

    async fn get_group_by_name(&self, name: &str) -> OrgResult<Group> {
        let state = self.state.read().await;
        state
            .groups
            .values()
            .find(|g| g.name == name)
            .cloned()
            .ok_or_else(|| OrgError::not_found("group", name))
    }

    async fn ensure_group(&self, group: &Group) -> OrgResult<Group> {
        let mut state = self.state.write().await;

        if !state.groups.contains_key(&group.id) {
            return Err(OrgError::not_found("group", &group.id));
        }
        let taken = state
            .groups
            .values()
            .any(|g| g.id != group.id && g.name == group.name);
        if taken {
            return Err(OrgError::already_exists("group", &group.name));
        }
        state.groups.insert(group.id.clone(), group.clone());

        self.persist(&state).await?;
        Ok(group.clone())
    }

    async fn delete_group(&self, id: &str) -> OrgResult<()> {
        let mut state = self.state.write().await;

        if state.groups.remove(id).is_none() {
            return Err(OrgError::not_found("group", id));
        }

        self.persist(&state).await
    }

    async fn create_vault(&self, vault: &Vault) -> OrgResult<Vault> {
        let mut state = self.state.write().await;

        let taken = state.vaults.contains_key(&vault.name)
            || state.vaults.values().any(|v| v.name == vault.name);
        if taken {
            return Err(OrgError::already_exists("vault", &vault.name));
        }

        let created = Vault {
            id: vault.name.clone(),
            ..vault.clone()
        };
        state.vaults.insert(created.id.clone(), created.clone());

        self.persist(&state).await?;
        Ok(created)
    }

    async fn get_vault_by_id(&self, id: &str) -> OrgResult<Vault> {
        let state = self.state.read().await;
        state
            .vaults
            .get(id)
            .cloned()
            .ok_or_else(|| OrgError::not_found("vault", id))
    }

    async fn get_vault_by_name(&self, name: &str) -> OrgResult<Vault> {
        let state = self.state.read().await;
        state
            .vaults
            .values()
            .find(|v| v.name == name)
            .cloned()
            .ok_or_else(|| OrgError::not_found("vault", name))
    }

    async fn list_vaults_by_user(&self, user_id: &str) -> OrgResult<Vec<Vault>> {
        let state = self.state.read().await;

        let groups: BTreeSet<&str> = state
            .members
            .values()
            .filter(|m| m.user_id == user_id)
            .map(|m| m.group_id.as_str())
            .collect();

        let direct = state
            .vault_user_access
            .values()
            .filter(|a| a.user_id == user_id)
            .map(|a| a.vault_id.as_str());
        let via_groups = state
            .vault_group_access
            .values()
            .filter(|a| groups.contains(a.group_id.as_str()))
            .map(|a| a.vault_id.as_str());
        let vault_ids: BTreeSet<&str> = direct.chain(via_groups).collect();

        Ok(vault_ids
            .into_iter()
            .filter_map(|id| state.vaults.get(id).cloned())
            .collect())
    }

    async fn ensure_vault(&self, vault: &Vault) -> OrgResult<Vault> {
        let mut state = self.state.write().await;

        if !state.vaults.contains_key(&vault.id) {
            return Err(OrgError::not_found("vault", &vault.id));
        }
        let taken = state
            .vaults
            .values()
            .any(|v| v.id != vault.id && v.name == vault.name);
        if taken {
            return Err(OrgError::already_exists("vault", &vault.name));
        }
        state.vaults.insert(vault.id.clone(), vault.clone());

        self.persist(&state).await?;
        Ok(vault.clone())
    }

    async fn delete_vault(&self, id: &str) -> OrgResult<()> {
        let mut state = self.state.write().await;

        if state.vaults.remove(id).is_none() {
            return Err(OrgError::not_found("vault", id));
        }

        self.persist(&state).await
    }

    async fn ensure_membership(&self, membership: &Membership) -> OrgResult<()> {
        let mut state = self.state.write().await;
        state.members.insert(membership.id(), membership.clone());
        self.persist(&state).await
    }

    async fn get_membership_by_id(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> OrgResult<Membership> {
        let id = CompositeKey::Membership.pack(group_id, user_id);
        let state = self.state.read().await;
        state
            .members
            .get(&id)
            .cloned()
            .ok_or_else(|| OrgError::not_found("membership", id))
    }

    async fn delete_membership(&self, group_id: &str, user_id: &str) -> OrgResult<()> {
        let id = CompositeKey::Membership.pack(group_id, user_id);
        let mut state = self.state.write().await;

        if state.members.remove(&id).is_none() {
            return Err(OrgError::not_found("membership", id));
        }

        self.persist(&state).await
    }

    async fn ensure_vault_group_access(&self, access: &VaultGroupAccess) -> OrgResult<()> {
        let mut state = self.state.write().await;
        state.vault_group_access.insert(access.id(), access.clone());
        self.persist(&state).await
    }

    async fn get_vault_group_access_by_id(
        &self,
        vault_id: &str,
        group_id: &str,
    ) -> OrgResult<VaultGroupAccess> {
        let id = CompositeKey::VaultGroupAccess.pack(vault_id, group_id);
        let state = self.state.read().await;
        state
            .vault_group_access
            .get(&id)
            .cloned()
            .ok_or_else(|| OrgError::not_found("vault group access", id))
    }

    async fn delete_vault_group_access(&self, vault_id: &str, group_id: &str) -> OrgResult<()> {
        let id = CompositeKey::VaultGroupAccess.pack(vault_id, group_id);
        let mut state = self.state.write().await;

        if state.vault_group_access.remove(&id).is_none() {
            return Err(OrgError::not_found("vault group access", id));
        }

        self.persist(&state).await
    }

    async fn ensure_vault_user_access(&self, access: &VaultUserAccess) -> OrgResult<()> {
        let mut state = self.state.write().await;
        state.vault_user_access.insert(access.id(), access.clone());
        self.persist(&state).await
    }

    async fn get_vault_user_access_by_id(
        &self,
        vault_id: &str,
        user_id: &str,
    ) -> OrgResult<VaultUserAccess> {
        let id = CompositeKey::VaultUserAccess.pack(vault_id, user_id);
        let state = self.state.read().await;
        state
            .vault_user_access
            .get(&id)
            .cloned()
            .ok_or_else(|| OrgError::not_found("vault user access", id))
    }

    async fn delete_vault_user_access(&self, vault_id: &str, user_id: &str) -> OrgResult<()> {
        let id = CompositeKey::VaultUserAccess.pack(vault_id, user_id);
        let mut state = self.state.write().await;

        if state.vault_user_access.remove(&id).is_none() {
            return Err(OrgError::not_found("vault user access", id));
        }

        self.persist(&state).await
    }
}
