mod common;

use std::sync::atomic::Ordering;

use serde_json::{json, Value};

use algo_dashboard::models::StepField;
use algo_dashboard::views::ViewError;
use common::FakeApi;

#[tokio::test]
async fn list_replaces_rows_and_fetches_probe() {
    let fake = FakeApi::spawn().await;
    fake.seed_steps(3);
    let dir = tempfile::tempdir().unwrap();
    let state = common::dashboard_state(&fake, dir.path(), Some("tok"));

    state.steps.list().await.unwrap();

    {
        let table = state.steps.table().await;
        assert_eq!(table.rows().len(), 3);
        assert!(table.rows().iter().all(|r| !r.editing));
        let probe = table.probe().unwrap();
        assert_eq!(probe.step, 100);
        assert_eq!(probe.more_shares_needed, 300.0);
    }

    assert_eq!(fake.state.count("GET", "/api/v1/steps/count/100"), 1);
    assert!(fake
        .state
        .requests()
        .iter()
        .all(|r| r.auth.as_deref() == Some("Bearer tok")));
}

#[tokio::test]
async fn list_drops_edit_flags_from_previous_render() {
    let fake = FakeApi::spawn().await;
    fake.seed_steps(2);
    let dir = tempfile::tempdir().unwrap();
    let state = common::dashboard_state(&fake, dir.path(), Some("tok"));

    state.steps.list().await.unwrap();
    state.steps.begin_edit(0).await.unwrap();
    fake.seed_steps(1);

    state.steps.list().await.unwrap();

    let table = state.steps.table().await;
    assert_eq!(table.rows().len(), 3);
    assert!(table.rows().iter().all(|r| !r.editing));
}

#[tokio::test]
async fn commit_sends_numbers_not_strings() {
    let fake = FakeApi::spawn().await;
    fake.seed_steps(1);
    let dir = tempfile::tempdir().unwrap();
    let state = common::dashboard_state(&fake, dir.path(), Some("tok"));
    state.steps.list().await.unwrap();

    state.steps.toggle_edit(0).await.unwrap();
    state.steps.edit_field(0, StepField::BuyPrice, "0.35").await.unwrap();
    state.steps.edit_field(0, StepField::SellPrice, "0.4").await.unwrap();
    state.steps.edit_field(0, StepField::SharesToBuy, "250").await.unwrap();
    state.steps.edit_field(0, StepField::AdditionalShares, "12").await.unwrap();
    state.steps.toggle_edit(0).await.unwrap();

    let put = fake.state.last_put.lock().unwrap().clone().unwrap();
    assert_eq!(put["buy_price"], json!(0.35));
    assert_eq!(put["sell_price"], json!(0.4));
    assert_eq!(put["shares_to_buy"], json!(250.0));
    assert_eq!(put["additional_shares"], json!(12.0));
    assert!(put["buy_price"].is_number());

    // Saved, then re-listed from the API.
    assert_eq!(fake.state.count("PUT", "/api/v1/steps/1"), 1);
    assert_eq!(fake.state.count("GET", "/api/v1/steps"), 2);
    let table = state.steps.table().await;
    assert_eq!(table.rows()[0].record.shares_to_buy, 250.0);
    assert!(!table.rows()[0].editing);
}

#[tokio::test]
async fn commit_with_garbage_sends_null() {
    let fake = FakeApi::spawn().await;
    fake.seed_steps(1);
    let dir = tempfile::tempdir().unwrap();
    let state = common::dashboard_state(&fake, dir.path(), Some("tok"));
    state.steps.list().await.unwrap();
    state.steps.begin_edit(0).await.unwrap();

    state
        .steps
        .commit(0, 1, [(StepField::SharesToBuy, "lots".to_string())])
        .await
        .unwrap();

    let put = fake.state.last_put.lock().unwrap().clone().unwrap();
    assert_eq!(put["shares_to_buy"], Value::Null);
    assert_eq!(put["buy_price"], json!(0.1));

    let table = state.steps.table().await;
    assert!(table.rows()[0].record.shares_to_buy.is_nan());
}

#[tokio::test]
async fn save_never_lands_on_a_different_step() {
    let fake = FakeApi::spawn().await;
    fake.seed_steps(3);
    let dir = tempfile::tempdir().unwrap();
    let state = common::dashboard_state(&fake, dir.path(), Some("tok"));
    state.steps.list().await.unwrap();
    state.steps.begin_edit(1).await.unwrap();

    // Step 1 goes away upstream and another tab re-lists: step 3 is now at
    // index 1 and the edit on step 2 is gone.
    fake.state.steps.lock().unwrap().retain(|s| s["id"] != json!(1));
    state.steps.list().await.unwrap();

    let err = state
        .steps
        .commit(1, 2, [(StepField::BuyPrice, "9".to_string())])
        .await
        .unwrap_err();

    assert!(matches!(err, ViewError::RowMoved { index: 1, id: 2 }));
    assert_eq!(fake.state.count("PUT", "/api/v1/steps/3"), 0);
    assert!(fake.state.last_put.lock().unwrap().is_none());
}

#[tokio::test]
async fn save_passes_unmodelled_columns_through() {
    let fake = FakeApi::spawn().await;
    fake.seed_steps(1);
    fake.state.steps.lock().unwrap()[0]["note"] = json!("hand-tuned");
    let dir = tempfile::tempdir().unwrap();
    let state = common::dashboard_state(&fake, dir.path(), Some("tok"));
    state.steps.list().await.unwrap();
    state.steps.begin_edit(0).await.unwrap();

    state
        .steps
        .commit(0, 1, [(StepField::SellPrice, "0.5".to_string())])
        .await
        .unwrap();

    let put = fake.state.last_put.lock().unwrap().clone().unwrap();
    assert_eq!(put["note"], json!("hand-tuned"));
    assert_eq!(put["sell_price"], json!(0.5));
    assert_eq!(put["total_shares"], json!(105.0));
}

#[tokio::test]
async fn failed_save_still_relists() {
    let fake = FakeApi::spawn().await;
    fake.seed_steps(1);
    fake.state.fail_put.store(true, Ordering::SeqCst);
    let dir = tempfile::tempdir().unwrap();
    let state = common::dashboard_state(&fake, dir.path(), Some("tok"));
    state.steps.list().await.unwrap();
    state.steps.begin_edit(0).await.unwrap();

    state
        .steps
        .commit(0, 1, [(StepField::BuyPrice, "9".to_string())])
        .await
        .unwrap();

    assert_eq!(fake.state.count("GET", "/api/v1/steps"), 2);
    // The API kept the old value; the re-list shows it.
    let table = state.steps.table().await;
    assert_eq!(table.rows()[0].record.buy_price, 0.1);
}

#[tokio::test]
async fn add_appears_only_after_round_trip() {
    let fake = FakeApi::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let state = common::dashboard_state(&fake, dir.path(), Some("tok"));

    state.steps.add().await.unwrap();

    let post = fake.state.last_post.lock().unwrap().clone().unwrap();
    assert_eq!(
        post,
        json!({ "buy_price": 0.0, "sell_price": 0.0, "shares_to_buy": 0.0, "additional_shares": 0.0 })
    );
    let table = state.steps.table().await;
    assert_eq!(table.rows().len(), 1);
    assert_eq!(table.rows()[0].record.buy_price, 0.0);
}

#[tokio::test]
async fn delete_removes_id_from_refetched_state() {
    let fake = FakeApi::spawn().await;
    fake.seed_steps(3);
    let dir = tempfile::tempdir().unwrap();
    let state = common::dashboard_state(&fake, dir.path(), Some("tok"));
    state.steps.list().await.unwrap();

    state.steps.delete(2).await.unwrap();

    assert_eq!(fake.state.count("DELETE", "/api/v1/steps/2"), 1);
    let table = state.steps.table().await;
    let ids: Vec<i64> = table.rows().iter().map(|r| r.record.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn probe_count_change_refetches_probe() {
    let fake = FakeApi::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let state = common::dashboard_state(&fake, dir.path(), Some("tok"));

    state.steps.probe(42).await.unwrap();

    let table = state.steps.table().await;
    assert_eq!(table.probe_count(), 42);
    assert_eq!(table.probe().unwrap().step, 42);
}

#[tokio::test]
async fn restart_reports_success() {
    let fake = FakeApi::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let state = common::dashboard_state(&fake, dir.path(), Some("tok"));

    assert!(state.steps.restart().await.unwrap());
    assert_eq!(fake.state.count("POST", "/api/v1/algo/restart"), 1);
}

#[tokio::test]
async fn unreachable_api_is_logged_not_raised() {
    let dir = tempfile::tempdir().unwrap();
    // Nothing listens on the discard port.
    let env = [
        ("ALGO_API_URL", "http://127.0.0.1:9".to_string()),
        ("TOKEN_PATH", dir.path().join("session.json").display().to_string()),
        ("HTTP_TIMEOUT_SECS", "2".to_string()),
    ];
    let config = algo_dashboard::Config::from_lookup(|key| {
        env.iter().find(|(k, _)| *k == key).map(|(_, v)| v.clone())
    })
    .unwrap();
    let state = algo_dashboard::build_state(config).unwrap();

    state.steps.list().await.unwrap();
    assert!(!state.steps.restart().await.unwrap());
    assert!(state.steps.table().await.rows().is_empty());
}
