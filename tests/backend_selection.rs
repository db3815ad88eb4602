use uuid::Uuid;

use oporg::{
    config::RuntimeConfig,
    core::{
        errors::{OrgError, OrgResult},
        models::Group,
    },
    storage::{app::AppRepository, r#trait::OrgRepository},
};

#[tokio::test]
async fn app_repository_rejects_unknown_backend() {
    let result = AppRepository::connect("unknown", "ignored").await;
    assert!(matches!(result, Err(OrgError::UnsupportedBackend(_))));
}

#[tokio::test]
async fn fake_backend_selection_and_group_roundtrip() -> OrgResult<()> {
    let mut path = std::env::temp_dir();
    path.push(format!("oporg-selection-{}.json", Uuid::new_v4()));
    let location = path.to_string_lossy().into_owned();

    let repo = AppRepository::connect("fake", &location).await?;
    assert!(matches!(repo, AppRepository::Fake(_)));

    let created = repo
        .create_group(&Group {
            id: String::new(),
            name: "eng".to_owned(),
            description: "Engineering".to_owned(),
        })
        .await?;

    let reopened = AppRepository::connect("fake", &location).await?;
    assert_eq!(reopened.get_group_by_id(&created.id).await?, created);

    let _ = std::fs::remove_file(path);
    Ok(())
}

#[tokio::test]
async fn fake_backend_without_path_is_a_config_error() {
    let mut config = RuntimeConfig::fake("unused");
    config.fake_storage_path = None;

    let result = AppRepository::from_config(&config).await;
    assert!(matches!(result, Err(OrgError::Config(_))));
}

#[tokio::test]
async fn opcli_backend_reports_missing_binary() -> OrgResult<()> {
    let binary = format!("/nonexistent/op-{}", Uuid::new_v4());
    let repo = AppRepository::connect("opcli", &binary).await?;
    assert!(matches!(repo, AppRepository::OpCli(_)));

    match repo.get_vault_by_name("Private").await {
        Err(OrgError::Cli { reason, .. }) => assert!(reason.starts_with("failed to spawn")),
        other => panic!("expected a spawn failure, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn opcli_backend_selection_if_env_configured() -> OrgResult<()> {
    let Ok(vault) = std::env::var("OPORG_TEST_VAULT_NAME") else {
        return Ok(());
    };
    let binary = std::env::var("OP_CLI_PATH").unwrap_or_default();

    let repo = AppRepository::connect("opcli", &binary).await?;
    let found = repo.get_vault_by_name(&vault).await?;
    assert_eq!(found.name, vault);
    Ok(())
}
