use std::time::Duration;

use anyhow::Result;
use directory_tests::TestServer;
use products_directory::{
    DirectoryError, DirectoryProvider, DirectorySession, EmployeeStatus, HttpDirectory,
    LoadOutcome, LoadState, SortField,
};
use serde_json::{Value, json};

#[tokio::test]
async fn http_provider_reads_groups_and_members() -> Result<()> {
    let server = TestServer::spawn_instant().await?;
    let provider = HttpDirectory::new(&server.base_url())?;

    let groups = provider.groups().await?;
    assert_eq!(groups.len(), 6);
    assert_eq!(groups[1].name, "디자인팀");

    let marketing = provider.employees(Some(3)).await?;
    assert_eq!(marketing.len(), 3);
    assert!(marketing.iter().all(|e| e.department == "마케팅팀"));

    assert_eq!(provider.employees(None).await?.len(), 15);
    Ok(())
}

#[tokio::test]
async fn session_over_http_scenario() -> Result<()> {
    let server = TestServer::spawn_instant().await?;
    let mut session = DirectorySession::new(HttpDirectory::new(&server.base_url())?);

    session.load_groups().await?;
    assert_eq!(session.active_group_id(), Some(1));
    assert_eq!(session.open_group(99).await, LoadOutcome::Applied);
    assert_eq!(session.view().raw().len(), 15);

    session.update_query(|q| q.toggle_status(EmployeeStatus::Active));
    let page = session.view().page();
    assert_eq!(page.total_matches, 12);
    assert_eq!(page.items.len(), 10);
    assert!(page.items.windows(2).all(|w| w[0].name <= w[1].name));

    assert!(session.go_to_page(2));
    assert_eq!(session.view().page().items.len(), 2);

    session.update_query(|q| q.sort_by(SortField::JoinDate));
    assert_eq!(session.view().query().page(), 1);
    Ok(())
}

#[tokio::test]
async fn slow_earlier_request_cannot_overwrite_newer_group() -> Result<()> {
    let server = TestServer::spawn(Duration::ZERO, Duration::from_millis(150)).await?;
    let mut session = DirectorySession::new(HttpDirectory::new(&server.base_url())?);

    let group_a = session.select_group(1);
    let group_b = session.select_group(4);
    let b = session.fetch(group_b).await;
    assert_eq!(session.deliver(group_b, b), LoadOutcome::Applied);
    let a = session.fetch(group_a).await;
    assert_eq!(session.deliver(group_a, a), LoadOutcome::Stale);

    assert!(
        session
            .view()
            .raw()
            .iter()
            .all(|e| e.department == "영업팀")
    );
    Ok(())
}

#[tokio::test]
async fn unreachable_provider_surfaces_error_state() -> Result<()> {
    let server = TestServer::spawn_instant().await?;
    let base = server.base_url();
    drop(server);
    tokio::time::sleep(Duration::from_millis(50)).await;

    let mut session = DirectorySession::new(HttpDirectory::new(&base)?);
    let err = session.load_groups().await.unwrap_err();
    assert!(matches!(err, DirectoryError::Transport { .. }));

    assert_eq!(session.open_group(1).await, LoadOutcome::Failed);
    match session.view().state() {
        LoadState::Failed(message) => assert!(message.starts_with("failed to load employee data")),
        other => panic!("unexpected state {other:?}"),
    }
    assert!(session.view().page().no_results());
    Ok(())
}

#[tokio::test]
async fn missing_route_maps_to_status_error() -> Result<()> {
    let server = TestServer::spawn_instant().await?;
    let provider = HttpDirectory::new(&format!("{}/nested", server.base_url()))?;
    let err = provider.groups().await.unwrap_err();
    assert!(matches!(err, DirectoryError::Status { status: 404, .. }));
    Ok(())
}

#[tokio::test]
async fn graphql_view_over_http() -> Result<()> {
    let server = TestServer::spawn_instant().await?;
    let client = reqwest::Client::new();
    let body: Value = client
        .post(format!("{}/graphql", server.base_url()))
        .json(&json!({
            "query": r#"{ employeeView(input: { search: "개발" }) { totalMatches items { department } } }"#
        }))
        .send()
        .await?
        .json()
        .await?;
    let view = &body["data"]["employeeView"];
    assert_eq!(view["totalMatches"], 5);
    Ok(())
}
