/// Remote sync is gated on identity and never blocks local changes
use std::sync::Arc;

use streakpath::*;

use crate::support::RecordingSync;

fn store_for(
    identity: Arc<dyn IdentitySource>,
    remote: Arc<RecordingSync>,
) -> HabitStore<Arc<MemoryKvStore>> {
    HabitStore::new(Arc::new(MemoryKvStore::new()))
        .with_identity(identity)
        .with_remote_sync(remote)
}

#[tokio::test]
async fn test_signed_in_pushes_on_create_and_delete_only() {
    let remote = Arc::new(RecordingSync::new());
    let store = store_for(Arc::new(Identity::signed_in()), remote.clone());
    store.load().await;
    assert_eq!(remote.push_count(), 0);

    let habit = store.create("Run", "Heart", "#ef4444", None).await.unwrap();
    assert_eq!(remote.push_count(), 1);
    assert_eq!(remote.last_push().unwrap().len(), 2);

    let date = parse_day("2024-01-15").unwrap();
    store.toggle_completion(&habit.id, date).await;
    let mut edited = habit.clone();
    edited.name = "Long Run".to_string();
    store.update(edited).await;
    assert_eq!(remote.push_count(), 1);

    store.delete(&habit.id).await;
    assert_eq!(remote.push_count(), 2);
    assert_eq!(remote.last_push().unwrap().len(), 1);
}

#[tokio::test]
async fn test_guest_never_pushes() {
    let remote = Arc::new(RecordingSync::new());
    let store = store_for(Arc::new(Identity::guest()), remote.clone());
    store.load().await;

    let habit = store.create("Run", "Heart", "#ef4444", None).await.unwrap();
    store.delete(&habit.id).await;

    assert_eq!(remote.push_count(), 0);
}

#[tokio::test]
async fn test_identity_is_read_per_operation() {
    let remote = Arc::new(RecordingSync::new());
    let session = Arc::new(SessionIdentity::new(Identity::guest()));
    let store = store_for(session.clone(), remote.clone());
    store.load().await;

    store.create("Before", "Sun", "#f59e0b", None).await;
    assert_eq!(remote.push_count(), 0);

    session.set(Identity::signed_in());
    store.create("After", "Sun", "#f59e0b", None).await;
    assert_eq!(remote.push_count(), 1);

    session.set(Identity::signed_out());
    store.create("Signed out", "Sun", "#f59e0b", None).await;
    assert_eq!(remote.push_count(), 1);
}

#[tokio::test]
async fn test_remote_failure_is_swallowed() {
    let remote = Arc::new(RecordingSync::failing());
    let store = store_for(Arc::new(Identity::signed_in()), remote.clone());
    store.load().await;

    let habit = store.create("Run", "Heart", "#ef4444", None).await;
    assert!(habit.is_some());
    assert_eq!(store.habits().await.len(), 2);

    let on_disk = store.repository().read().await.unwrap().unwrap();
    assert_eq!(on_disk.len(), 2);
}
