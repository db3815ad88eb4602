use async_trait::async_trait;

use crate::{
    config::{self, BackendKind, RuntimeConfig},
    core::{
        errors::{OrgError, OrgResult},
        models::{Group, Membership, User, Vault, VaultGroupAccess, VaultUserAccess},
    },
    storage::{
        fake::FakeRepository,
        opcli::{OpCliRepository, runner::OpProcess},
        r#trait::OrgRepository,
    },
};

#[derive(Clone)]
pub enum AppRepository {
    Fake(FakeRepository),
    OpCli(OpCliRepository<OpProcess>),
}

impl AppRepository {
    pub async fn connect(backend: &str, location: &str) -> OrgResult<Self> {
        let config = match backend.parse::<BackendKind>()? {
            BackendKind::Fake => RuntimeConfig::fake(location),
            BackendKind::Opcli => {
                RuntimeConfig::opcli((!location.is_empty()).then(|| location.into()))
            }
        };
        Self::from_config(&config).await
    }

    /// Backend from the saved config file, or from the environment without one.
    pub async fn resolve() -> OrgResult<Self> {
        Self::from_config(&config::resolve()?).await
    }

    pub async fn from_config(config: &RuntimeConfig) -> OrgResult<Self> {
        match config.backend {
            BackendKind::Fake => {
                let path = config.fake_storage_path.clone().ok_or_else(|| {
                    OrgError::Config("fake backend needs a storage path".to_owned())
                })?;
                Ok(Self::Fake(FakeRepository::open(path).await))
            }
            BackendKind::Opcli => {
                let process = match &config.op_cli_path {
                    Some(path) => OpProcess::new(path),
                    None => OpProcess::default(),
                };
                Ok(Self::OpCli(OpCliRepository::new(process)))
            }
        }
    }
}

#[async_trait]
impl OrgRepository for AppRepository {
    async fn create_user(&self, user: &User) -> OrgResult<User> {
        match self {
            AppRepository::Fake(repo) => repo.create_user(user).await,
            AppRepository::OpCli(repo) => repo.create_user(user).await,
        }
    }

    async fn get_user_by_id(&self, id: &str) -> OrgResult<User> {
        match self {
            AppRepository::Fake(repo) => repo.get_user_by_id(id).await,
            AppRepository::OpCli(repo) => repo.get_user_by_id(id).await,
        }
    }

    async fn get_user_by_email(&self, email: &str) -> OrgResult<User> {
        match self {
            AppRepository::Fake(repo) => repo.get_user_by_email(email).await,
            AppRepository::OpCli(repo) => repo.get_user_by_email(email).await,
        }
    }

    async fn ensure_user(&self, user: &User) -> OrgResult<User> {
        match self {
            AppRepository::Fake(repo) => repo.ensure_user(user).await,
            AppRepository::OpCli(repo) => repo.ensure_user(user).await,
        }
    }

    async fn delete_user(&self, id: &str) -> OrgResult<()> {
        match self {
            AppRepository::Fake(repo) => repo.delete_user(id).await,
            AppRepository::OpCli(repo) => repo.delete_user(id).await,
        }
    }

    async fn create_group(&self, group: &Group) -> OrgResult<Group> {
        match self {
            AppRepository::Fake(repo) => repo.create_group(group).await,
            AppRepository::OpCli(repo) => repo.create_group(group).await,
        }
    }

    async fn get_group_by_id(&self, id: &str) -> OrgResult<Group> {
        match self {
            AppRepository::Fake(repo) => repo.get_group_by_id(id).await,
            AppRepository::OpCli(repo) => repo.get_group_by_id(id).await,
        }
    }

    async fn get_group_by_name(&self, name: &str) -> OrgResult<Group> {
        match self {
            AppRepository::Fake(repo) => repo.get_group_by_name(name).await,
            AppRepository::OpCli(repo) => repo.get_group_by_name(name).await,
        }
    }

    async fn ensure_group(&self, group: &Group) -> OrgResult<Group> {
        match self {
            AppRepository::Fake(repo) => repo.ensure_group(group).await,
            AppRepository::OpCli(repo) => repo.ensure_group(group).await,
        }
    }

    async fn delete_group(&self, id: &str) -> OrgResult<()> {
        match self {
            AppRepository::Fake(repo) => repo.delete_group(id).await,
            AppRepository::OpCli(repo) => repo.delete_group(id).await,
        }
    }

    async fn create_vault(&self, vault: &Vault) -> OrgResult<Vault> {
        match self {
            AppRepository::Fake(repo) => repo.create_vault(vault).await,
            AppRepository::OpCli(repo) => repo.create_vault(vault).await,
        }
    }

    async fn get_vault_by_id(&self, id: &str) -> OrgResult<Vault> {
        match self {
            AppRepository::Fake(repo) => repo.get_vault_by_id(id).await,
            AppRepository::OpCli(repo) => repo.get_vault_by_id(id).await,
        }
    }

    async fn get_vault_by_name(&self, name: &str) -> OrgResult<Vault> {
        match self {
            AppRepository::Fake(repo) => repo.get_vault_by_name(name).await,
            AppRepository::OpCli(repo) => repo.get_vault_by_name(name).await,
        }
    }

    async fn list_vaults_by_user(&self, user_id: &str) -> OrgResult<Vec<Vault>> {
        match self {
            AppRepository::Fake(repo) => repo.list_vaults_by_user(user_id).await,
            AppRepository::OpCli(repo) => repo.list_vaults_by_user(user_id).await,
        }
    }

    async fn ensure_vault(&self, vault: &Vault) -> OrgResult<Vault> {
        match self {
            AppRepository::Fake(repo) => repo.ensure_vault(vault).await,
            AppRepository::OpCli(repo) => repo.ensure_vault(vault).await,
        }
    }

    async fn delete_vault(&self, id: &str) -> OrgResult<()> {
        match self {
            AppRepository::Fake(repo) => repo.delete_vault(id).await,
            AppRepository::OpCli(repo) => repo.delete_vault(id).await,
        }
    }

    async fn ensure_membership(&self, membership: &Membership) -> OrgResult<()> {
        match self {
            AppRepository::Fake(repo) => repo.ensure_membership(membership).await,
            AppRepository::OpCli(repo) => repo.ensure_membership(membership).await,
        }
    }

    async fn get_membership_by_id(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> OrgResult<Membership> {
        match self {
            AppRepository::Fake(repo) => repo.get_membership_by_id(group_id, user_id).await,
            AppRepository::OpCli(repo) => repo.get_membership_by_id(group_id, user_id).await,
        }
    }

    async fn delete_membership(&self, group_id: &str, user_id: &str) -> OrgResult<()> {
        match self {
            AppRepository::Fake(repo) => repo.delete_membership(group_id, user_id).await,
            AppRepository::OpCli(repo) => repo.delete_membership(group_id, user_id).await,
        }
    }

    async fn ensure_vault_group_access(&self, access: &VaultGroupAccess) -> OrgResult<()> {
        match self {
            AppRepository::Fake(repo) => repo.ensure_vault_group_access(access).await,
            AppRepository::OpCli(repo) => repo.ensure_vault_group_access(access).await,
        }
    }

    async fn get_vault_group_access_by_id(
        &self,
        vault_id: &str,
        group_id: &str,
    ) -> OrgResult<VaultGroupAccess> {
        match self {
            AppRepository::Fake(repo) => {
                repo.get_vault_group_access_by_id(vault_id, group_id).await
            }
            AppRepository::OpCli(repo) => {
                repo.get_vault_group_access_by_id(vault_id, group_id).await
            }
        }
    }

    async fn delete_vault_group_access(&self, vault_id: &str, group_id: &str) -> OrgResult<()> {
        match self {
            AppRepository::Fake(repo) => repo.delete_vault_group_access(vault_id, group_id).await,
            AppRepository::OpCli(repo) => repo.delete_vault_group_access(vault_id, group_id).await,
        }
    }

    async fn ensure_vault_user_access(&self, access: &VaultUserAccess) -> OrgResult<()> {
        match self {
            AppRepository::Fake(repo) => repo.ensure_vault_user_access(access).await,
            AppRepository::OpCli(repo) => repo.ensure_vault_user_access(access).await,
        }
    }

    async fn get_vault_user_access_by_id(
        &self,
        vault_id: &str,
        user_id: &str,
    ) -> OrgResult<VaultUserAccess> {
        match self {
            AppRepository::Fake(repo) => repo.get_vault_user_access_by_id(vault_id, user_id).await,
            AppRepository::OpCli(repo) => {
                repo.get_vault_user_access_by_id(vault_id, user_id).await
            }
        }
    }

    async fn delete_vault_user_access(&self, vault_id: &str, user_id: &str) -> OrgResult<()> {
        match self {
            AppRepository::Fake(repo) => repo.delete_vault_user_access(vault_id, user_id).await,
            AppRepository::OpCli(repo) => repo.delete_vault_user_access(vault_id, user_id).await,
        }
    }
}
