use std::path::PathBuf;

use uuid::Uuid;

use oporg::{
    core::{
        errors::{OrgError, OrgResult},
        models::{
            Group, Membership, MembershipRole, User, Vault, VaultGroupAccess, VaultUserAccess,
        },
        permissions::AccessPermissions,
    },
    storage::{
        fake::{FakeRepository, FakeSnapshot},
        r#trait::OrgRepository,
    },
};

fn temp_store_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("oporg-fake-{}.json", Uuid::new_v4()));
    path
}

async fn open_store() -> (FakeRepository, PathBuf) {
    let path = temp_store_path();
    (FakeRepository::open(&path).await, path)
}

fn user(email: &str, name: &str) -> User {
    User {
        id: String::new(),
        email: email.to_owned(),
        name: name.to_owned(),
    }
}

fn group(name: &str, description: &str) -> Group {
    Group {
        id: String::new(),
        name: name.to_owned(),
        description: description.to_owned(),
    }
}

fn vault(name: &str) -> Vault {
    Vault {
        id: String::new(),
        name: name.to_owned(),
        description: String::new(),
    }
}

#[tokio::test]
async fn created_user_is_readable_by_id() -> OrgResult<()> {
    let (repo, path) = open_store().await;

    let created = repo.create_user(&user("u@test.io", "U")).await?;
    assert_eq!(created.id, "u@test.io");

    let fetched = repo.get_user_by_id(&created.id).await?;
    assert_eq!(fetched, created);
    assert_eq!(repo.get_user_by_email("u@test.io").await?, created);

    let _ = std::fs::remove_file(path);
    Ok(())
}

#[tokio::test]
async fn duplicate_group_is_rejected_and_first_kept() -> OrgResult<()> {
    let (repo, path) = open_store().await;

    let first = repo.create_group(&group("eng", "Engineering")).await?;
    let second = repo.create_group(&group("eng", "Something else")).await;
    assert!(matches!(second, Err(OrgError::AlreadyExists { entity: "group", .. })));

    assert_eq!(repo.get_group_by_name("eng").await?, first);
    assert_eq!(repo.get_group_by_id("eng").await?.description, "Engineering");

    let _ = std::fs::remove_file(path);
    Ok(())
}

#[tokio::test]
async fn duplicate_user_email_is_rejected() -> OrgResult<()> {
    let (repo, path) = open_store().await;

    repo.create_user(&user("dup@test.io", "One")).await?;
    let result = repo.create_user(&user("dup@test.io", "Two")).await;
    assert!(matches!(result, Err(OrgError::AlreadyExists { .. })));

    let _ = std::fs::remove_file(path);
    Ok(())
}

#[tokio::test]
async fn ensure_requires_prior_create() -> OrgResult<()> {
    let (repo, path) = open_store().await;

    let ghost = User {
        id: "ghost@test.io".to_owned(),
        ..user("ghost@test.io", "Ghost")
    };
    let result = repo.ensure_user(&ghost).await;
    let err = result.unwrap_err();
    assert!(matches!(err, OrgError::NotFound { entity: "user", .. }));
    assert!(err.to_string().contains("doesn't exist"));

    let created = repo.create_user(&user("ghost@test.io", "Ghost")).await?;
    let renamed = User {
        name: "Casper".to_owned(),
        ..created.clone()
    };
    let ensured = repo.ensure_user(&renamed).await?;
    assert_eq!(ensured, renamed);
    assert_eq!(repo.get_user_by_id(&created.id).await?.name, "Casper");

    let _ = std::fs::remove_file(path);
    Ok(())
}

#[tokio::test]
async fn ensure_vault_overwrites_description() -> OrgResult<()> {
    let (repo, path) = open_store().await;

    let created = repo.create_vault(&vault("infra")).await?;
    let updated = Vault {
        description: "Infrastructure secrets".to_owned(),
        ..created
    };
    repo.ensure_vault(&updated).await?;
    assert_eq!(repo.get_vault_by_name("infra").await?, updated);

    let _ = std::fs::remove_file(path);
    Ok(())
}

#[tokio::test]
async fn delete_fails_for_missing_and_removes_existing() -> OrgResult<()> {
    let (repo, path) = open_store().await;

    assert!(matches!(
        repo.delete_vault("nope").await,
        Err(OrgError::NotFound { .. })
    ));

    let created = repo.create_vault(&vault("ops")).await?;
    repo.delete_vault(&created.id).await?;
    assert!(repo.get_vault_by_id(&created.id).await.is_err());
    assert!(repo.delete_vault(&created.id).await.is_err());

    let _ = std::fs::remove_file(path);
    Ok(())
}

#[tokio::test]
async fn membership_ensure_is_an_upsert_on_role() -> OrgResult<()> {
    let (repo, path) = open_store().await;

    let mut membership = Membership {
        user_id: "u@test.io".to_owned(),
        group_id: "eng".to_owned(),
        role: MembershipRole::Member,
    };
    repo.ensure_membership(&membership).await?;

    membership.role = MembershipRole::Manager;
    repo.ensure_membership(&membership).await?;

    assert_eq!(repo.get_membership_by_id("eng", "u@test.io").await?, membership);
    assert_eq!(repo.snapshot().await.members.len(), 1);

    repo.delete_membership("eng", "u@test.io").await?;
    assert!(matches!(
        repo.get_membership_by_id("eng", "u@test.io").await,
        Err(OrgError::NotFound { entity: "membership", .. })
    ));
    assert!(repo.delete_membership("eng", "u@test.io").await.is_err());

    let _ = std::fs::remove_file(path);
    Ok(())
}

#[tokio::test]
async fn access_ensure_replaces_permissions() -> OrgResult<()> {
    let (repo, path) = open_store().await;

    let broad = AccessPermissions {
        allow_viewing: true,
        allow_editing: true,
        manage_vault: true,
        ..Default::default()
    };
    let narrow = AccessPermissions {
        view_items: true,
        ..Default::default()
    };

    let mut access = VaultGroupAccess {
        vault_id: "infra".to_owned(),
        group_id: "eng".to_owned(),
        permissions: broad,
    };
    repo.ensure_vault_group_access(&access).await?;
    access.permissions = narrow;
    repo.ensure_vault_group_access(&access).await?;

    let stored = repo.get_vault_group_access_by_id("infra", "eng").await?;
    assert_eq!(stored.permissions, narrow);

    let user_access = VaultUserAccess {
        vault_id: "infra".to_owned(),
        user_id: "u@test.io".to_owned(),
        permissions: broad,
    };
    repo.ensure_vault_user_access(&user_access).await?;
    assert_eq!(
        repo.get_vault_user_access_by_id("infra", "u@test.io").await?,
        user_access
    );

    repo.delete_vault_user_access("infra", "u@test.io").await?;
    repo.delete_vault_group_access("infra", "eng").await?;
    assert!(repo.get_vault_group_access_by_id("infra", "eng").await.is_err());

    let _ = std::fs::remove_file(path);
    Ok(())
}

#[tokio::test]
async fn list_vaults_by_user_includes_group_grants() -> OrgResult<()> {
    let (repo, path) = open_store().await;

    let infra = repo.create_vault(&vault("infra")).await?;
    let web = repo.create_vault(&vault("web")).await?;
    repo.create_vault(&vault("hr")).await?;

    repo.ensure_vault_user_access(&VaultUserAccess {
        vault_id: web.id.clone(),
        user_id: "u@test.io".to_owned(),
        permissions: AccessPermissions::default(),
    })
    .await?;
    repo.ensure_membership(&Membership {
        user_id: "u@test.io".to_owned(),
        group_id: "eng".to_owned(),
        role: MembershipRole::Member,
    })
    .await?;
    repo.ensure_vault_group_access(&VaultGroupAccess {
        vault_id: infra.id.clone(),
        group_id: "eng".to_owned(),
        permissions: AccessPermissions::default(),
    })
    .await?;

    let vaults = repo.list_vaults_by_user("u@test.io").await?;
    assert_eq!(vaults, vec![infra, web]);
    assert!(repo.list_vaults_by_user("other@test.io").await?.is_empty());

    let _ = std::fs::remove_file(path);
    Ok(())
}

#[tokio::test]
async fn reopening_reproduces_state() -> OrgResult<()> {
    let (repo, path) = open_store().await;

    repo.create_user(&user("a@test.io", "A")).await?;
    repo.create_group(&group("eng", "")).await?;
    repo.create_vault(&vault("infra")).await?;
    repo.ensure_membership(&Membership {
        user_id: "a@test.io".to_owned(),
        group_id: "eng".to_owned(),
        role: MembershipRole::Manager,
    })
    .await?;
    repo.ensure_vault_group_access(&VaultGroupAccess {
        vault_id: "infra".to_owned(),
        group_id: "eng".to_owned(),
        permissions: AccessPermissions {
            allow_viewing: true,
            ..Default::default()
        },
    })
    .await?;

    let reopened = FakeRepository::open(repo.path()).await;
    assert_eq!(reopened.snapshot().await, repo.snapshot().await);

    repo.delete_vault_group_access("infra", "eng").await?;
    repo.delete_membership("eng", "a@test.io").await?;
    repo.delete_user("a@test.io").await?;
    let reopened = FakeRepository::open(repo.path()).await;
    let state = reopened.snapshot().await;
    assert_eq!(state, repo.snapshot().await);
    assert!(state.users.is_empty());
    assert!(state.members.is_empty());
    assert!(state.vault_group_access.is_empty());
    assert_eq!(state.groups.len(), 1);

    let _ = std::fs::remove_file(path);
    Ok(())
}

#[tokio::test]
async fn ensure_cannot_take_another_records_natural_key() -> OrgResult<()> {
    let (repo, path) = open_store().await;

    let eng = repo.create_group(&group("eng", "Engineering")).await?;
    let ops = repo.create_group(&group("ops", "Operations")).await?;
    let result = repo
        .ensure_group(&Group {
            name: "eng".to_owned(),
            ..ops.clone()
        })
        .await;
    assert!(matches!(result, Err(OrgError::AlreadyExists { entity: "group", .. })));
    assert_eq!(repo.get_group_by_id(&ops.id).await?, ops);
    assert_eq!(repo.get_group_by_name("eng").await?, eng);

    let a = repo.create_user(&user("a@test.io", "A")).await?;
    let b = repo.create_user(&user("b@test.io", "B")).await?;
    let result = repo
        .ensure_user(&User {
            email: "a@test.io".to_owned(),
            ..b.clone()
        })
        .await;
    assert!(matches!(result, Err(OrgError::AlreadyExists { entity: "user", .. })));
    assert_eq!(repo.get_user_by_id(&b.id).await?, b);
    assert_eq!(repo.get_user_by_email("a@test.io").await?, a);

    repo.create_vault(&vault("infra")).await?;
    let web = repo.create_vault(&vault("web")).await?;
    let result = repo
        .ensure_vault(&Vault {
            name: "infra".to_owned(),
            ..web.clone()
        })
        .await;
    assert!(matches!(result, Err(OrgError::AlreadyExists { entity: "vault", .. })));
    assert_eq!(repo.get_vault_by_id(&web.id).await?, web);

    // Keeping its own key is still an update.
    let renamed = Group {
        description: "Ops team".to_owned(),
        ..ops
    };
    assert_eq!(repo.ensure_group(&renamed).await?, renamed);

    let reopened = FakeRepository::open(&path).await;
    assert_eq!(reopened.snapshot().await.groups.len(), 2);

    let _ = std::fs::remove_file(path);
    Ok(())
}

#[tokio::test]
async fn persisted_file_uses_documented_top_level_keys() -> OrgResult<()> {
    let (repo, path) = open_store().await;
    repo.create_user(&user("a@test.io", "A")).await?;

    let raw = std::fs::read_to_string(&path).expect("store file written");
    let document: serde_json::Value = serde_json::from_str(&raw).expect("store file is JSON");
    for key in [
        "Users",
        "Groups",
        "Members",
        "Vaults",
        "VaultGroupAccess",
        "VaultUserAccess",
    ] {
        assert!(document.get(key).is_some(), "missing key {key}");
    }
    assert_eq!(document["Users"]["a@test.io"]["email"], "a@test.io");

    let _ = std::fs::remove_file(path);
    Ok(())
}

#[tokio::test]
async fn missing_or_corrupt_file_starts_empty() -> OrgResult<()> {
    let missing = FakeRepository::open(temp_store_path()).await;
    assert_eq!(missing.snapshot().await, FakeSnapshot::default());

    let path = temp_store_path();
    std::fs::write(&path, b"{ not json").expect("seed corrupt file");
    let corrupt = FakeRepository::open(&path).await;
    assert_eq!(corrupt.snapshot().await, FakeSnapshot::default());

    // The corrupt file is replaced on the first successful mutation.
    corrupt.create_group(&group("eng", "")).await?;
    let reopened = FakeRepository::open(&path).await;
    assert!(reopened.get_group_by_name("eng").await.is_ok());

    let _ = std::fs::remove_file(path);
    Ok(())
}

#[tokio::test]
async fn write_failure_surfaces_but_keeps_memory_change() {
    let mut path = std::env::temp_dir();
    path.push(format!("oporg-missing-dir-{}", Uuid::new_v4()));
    path.push("store.json");

    let repo = FakeRepository::open(&path).await;
    let result = repo.create_user(&user("a@test.io", "A")).await;
    assert!(matches!(result, Err(OrgError::Write(_))));

    assert!(repo.get_user_by_id("a@test.io").await.is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_are_all_persisted() -> OrgResult<()> {
    let (repo, path) = open_store().await;

    let mut handles = Vec::new();
    for i in 0..32 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.create_user(&user(&format!("user{i}@test.io"), "U")).await
        }));
    }
    for handle in handles {
        handle.await.expect("task panicked")?;
    }

    let reopened = FakeRepository::open(&path).await;
    let users = reopened.snapshot().await.users;
    assert_eq!(users.len(), 32);
    for i in 0..32 {
        assert!(users.contains_key(&format!("user{i}@test.io")));
    }

    let _ = std::fs::remove_file(path);
    Ok(())
}
