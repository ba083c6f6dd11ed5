use canvas::doc::Snapshot;
use canvas::render::TARGET_LABEL;

use super::*;
use crate::source::SourceError;

fn with_target() -> Snapshot {
    Snapshot::from_json(
        r#"{
            "scanners": [{"id": "ESP1", "position": {"x": 0.0, "y": 0.0}, "estimated_distance": 2.0}],
            "target": {"position": {"x": 1.0, "y": 1.0}}
        }"#,
    )
    .unwrap()
}

fn without_target() -> Snapshot {
    Snapshot::from_json(r#"{"scanners": [{"id": "ESP9", "position": {"x": 5.0, "y": 5.0}}]}"#).unwrap()
}

fn ok(seq: u64, snapshot: Snapshot) -> Delivery {
    Delivery { seq, result: Ok(snapshot) }
}

async fn read(viewer: &Viewer) -> String {
    tokio::fs::read_to_string(viewer.output()).await.unwrap()
}

#[tokio::test]
async fn applied_snapshot_is_published() {
    let dir = tempfile::tempdir().unwrap();
    let mut viewer = Viewer::new(900.0, dir.path().join("view.svg")).unwrap();

    let outcome = viewer.handle(ok(1, with_target())).await.unwrap();

    assert_eq!(outcome, Some(UpdateOutcome::Applied));
    let doc = read(&viewer).await;
    assert!(doc.contains(">ESP1</text>"));
    assert!(doc.contains(TARGET_LABEL));
}

#[tokio::test]
async fn stale_snapshot_leaves_published_frame() {
    let dir = tempfile::tempdir().unwrap();
    let mut viewer = Viewer::new(900.0, dir.path().join("view.svg")).unwrap();

    viewer.handle(ok(2, with_target())).await.unwrap();
    let before = read(&viewer).await;
    let outcome = viewer.handle(ok(1, without_target())).await.unwrap();

    assert_eq!(outcome, Some(UpdateOutcome::Stale));
    assert_eq!(read(&viewer).await, before);
    assert_eq!(viewer.engine.core.scanners[0].id, "ESP1");
}

#[tokio::test]
async fn failed_fetch_keeps_last_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut viewer = Viewer::new(900.0, dir.path().join("view.svg")).unwrap();

    viewer.handle(ok(1, with_target())).await.unwrap();
    let before = read(&viewer).await;
    let failed = Delivery { seq: 2, result: Err(SourceError::Request("timed out".into())) };
    let outcome = viewer.handle(failed).await.unwrap();

    assert_eq!(outcome, None);
    assert_eq!(read(&viewer).await, before);
    assert!(viewer.engine.core.target.is_some());
    // The failed seq was never applied, so a later one still lands.
    assert_eq!(viewer.engine.core.last_seq(), Some(1));
}

#[tokio::test]
async fn newer_snapshot_without_target_clears_it() {
    let dir = tempfile::tempdir().unwrap();
    let mut viewer = Viewer::new(900.0, dir.path().join("view.svg")).unwrap();

    viewer.handle(ok(1, with_target())).await.unwrap();
    viewer.handle(ok(2, without_target())).await.unwrap();

    let doc = read(&viewer).await;
    assert!(!doc.contains(TARGET_LABEL));
    assert!(doc.contains(">ESP9</text>"));
}

#[tokio::test]
async fn publish_writes_initial_empty_frame() {
    let dir = tempfile::tempdir().unwrap();
    let viewer = Viewer::new(900.0, dir.path().join("view.svg")).unwrap();

    viewer.publish().await.unwrap();

    let doc = read(&viewer).await;
    assert!(doc.contains(r#"width="868" height="500""#));
    assert!(!doc.contains("<circle"));
}

#[tokio::test]
async fn run_drains_channel_and_stops_when_senders_drop() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("view.svg");
    let viewer = Viewer::new(900.0, path.clone()).unwrap();
    let (tx, rx) = mpsc::channel(4);

    tx.send(ok(1, without_target())).await.unwrap();
    tx.send(ok(2, with_target())).await.unwrap();
    drop(tx);
    tokio::time::timeout(std::time::Duration::from_secs(5), viewer.run(rx))
        .await
        .unwrap();

    let doc = tokio::fs::read_to_string(&path).await.unwrap();
    assert!(doc.contains(">ESP1</text>"));
}
