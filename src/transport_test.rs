use frames::{Frame, LogLevel};
use serde_json::json;

use super::*;

#[tokio::test]
async fn host_messages_reach_worker_in_order() {
    let (mut host, mut worker) = channel(8);
    host.send(HostMessage::Resize { width: 800.0, height: 600.0, zoom: 1.0 }).await.unwrap();
    host.send(HostMessage::Execute(json!({"type": "finishStroke", "id": "s1"}))).await.unwrap();
    host.send(HostMessage::Pointer(json!({"type": "pointerMove", "pointerId": 7, "x": 1, "y": 2})))
        .await
        .unwrap();

    assert_eq!(worker.recv().await, Some(HostMessage::Resize { width: 800.0, height: 600.0, zoom: 1.0 }));
    assert_eq!(worker.recv().await, Some(HostMessage::Execute(json!({"type": "finishStroke", "id": "s1"}))));
    let Some(HostMessage::Pointer(event)) = worker.recv().await else {
        panic!("expected pointer message");
    };
    assert_eq!(event["pointerId"], json!(7));
}

#[tokio::test]
async fn worker_messages_reach_host() {
    let (mut host, mut worker) = channel(8);
    worker.send(WorkerMessage::Ready).unwrap();
    worker.send(WorkerMessage::info("fallback engine active")).unwrap();
    worker.send(WorkerMessage::State(json!({"presences": []}))).unwrap();

    assert_eq!(host.recv().await, Some(WorkerMessage::Ready));
    assert_eq!(
        host.recv().await,
        Some(WorkerMessage::Log { level: LogLevel::Info, message: "fallback engine active".into() })
    );
    assert_eq!(host.recv().await, Some(WorkerMessage::State(json!({"presences": []}))));
}

#[tokio::test]
async fn garbage_and_unknown_frames_are_skipped() {
    let (host, mut worker) = channel(8);
    host.tx.send(vec![0xff, 0xff, 0xff]).await.unwrap();
    host.tx.send(encode_frame(&Frame::new(1, "engine:explode", json!({})))).await.unwrap();
    host.tx
        .send(encode_frame(&Frame::new(2, "engine:execute", json!({"type": "finishStroke", "id": "x"}))))
        .await
        .unwrap();
    assert_eq!(worker.recv().await, Some(HostMessage::Execute(json!({"type": "finishStroke", "id": "x"}))));
}

#[tokio::test]
async fn full_queue_drops_instead_of_blocking() {
    let (_host, mut worker) = channel(1);
    worker.send(WorkerMessage::Ready).unwrap();
    assert!(matches!(worker.send(WorkerMessage::Ready), Err(TransportError::Full)));
}

#[tokio::test]
async fn hung_up_sides_report_closed() {
    let (host, mut worker) = channel(4);
    drop(host);
    assert!(matches!(worker.send(WorkerMessage::Ready), Err(TransportError::Closed)));
    assert_eq!(worker.recv().await, None);

    let (mut host, worker) = channel(4);
    drop(worker);
    let sent = host.send(HostMessage::Execute(json!({}))).await;
    assert!(matches!(sent, Err(TransportError::Closed)));
    assert_eq!(host.recv().await, None);
}

#[tokio::test]
async fn drain_returns_only_pending_messages() {
    let (mut host, mut worker) = channel(8);
    assert!(host.drain().is_empty());
    worker.send(WorkerMessage::Ready).unwrap();
    worker.send(WorkerMessage::info("hello")).unwrap();
    assert_eq!(host.drain().len(), 2);
    assert!(host.drain().is_empty());
}

#[test]
fn sequence_numbers_increase_per_port() {
    let (_host, mut worker) = channel(8);
    worker.send(WorkerMessage::Ready).unwrap();
    worker.send(WorkerMessage::Ready).unwrap();
    assert_eq!(worker.seq, 2);
}

#[test]
fn zero_capacity_is_clamped() {
    let (_host, mut worker) = channel(0);
    assert!(worker.send(WorkerMessage::Ready).is_ok());
}

#[tokio::test]
async fn try_recv_skips_garbage_and_never_waits() {
    let (mut host, mut worker) = channel(8);
    assert_eq!(worker.try_recv(), None);
    host.tx.send(vec![0xff, 0xff]).await.unwrap();
    host.send(HostMessage::Execute(json!({"type": "finishStroke", "id": "a"}))).await.unwrap();
    assert_eq!(worker.try_recv(), Some(HostMessage::Execute(json!({"type": "finishStroke", "id": "a"}))));
    assert_eq!(worker.try_recv(), None);
}
