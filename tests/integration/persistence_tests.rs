/// Durable round trips through SQLite
use std::sync::Arc;

use streakpath::*;
use tempfile::tempdir;

#[tokio::test]
async fn test_snapshot_round_trip() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("habits.db");

    let app = StreakPath::open(db_path.clone(), Arc::new(Identity::guest()))
        .await
        .expect("Failed to open app");
    let store = app.store();

    let habit = store
        .create("Stretch", "Smile", "#10b981", Some("Mobility"))
        .await
        .unwrap();
    store
        .toggle_completion(&habit.id, parse_day("2024-07-01").unwrap())
        .await;
    let snapshot = store.habits().await;
    drop(app);

    let reopened = StreakPath::open(db_path, Arc::new(Identity::guest()))
        .await
        .expect("Failed to reopen app");
    assert_eq!(reopened.store().habits().await, snapshot);
}

#[tokio::test]
async fn test_persist_then_load_is_deep_equal() {
    let storage = Arc::new(SqliteKvStore::open_in_memory().unwrap());
    let store = HabitStore::new(storage.clone());
    let collection = store.load().await;

    let repository = SnapshotRepository::new(storage.clone());
    repository.write(&collection).await.unwrap();

    let again = HabitStore::new(storage);
    assert_eq!(again.load().await, collection);
}

#[tokio::test]
async fn test_reads_snapshot_written_by_mobile_client() {
    let storage = Arc::new(MemoryKvStore::new());
    let json = r##"[
        {"id":"k3j9x","name":"Drink water","icon":"Coffee","color":"#3b82f6",
         "createdAt":1717000000000,"frequency":"daily",
         "completions":{"2024-06-01":"done","2024-06-02":"skip"}},
        {"id":"a1b2c","name":"Lift","icon":"Dumbbell","color":"#ef4444",
         "createdAt":1717000001000,"frequency":"weekly","completions":{},"group":"Gym"}
    ]"##;
    storage.set(HABITS_KEY, json).await.unwrap();

    let store = HabitStore::new(storage);
    let habits = store.load().await;

    assert_eq!(habits.len(), 2);
    assert_eq!(habits[0].group_name(), "General");
    assert_eq!(
        habits[0].status_on(parse_day("2024-06-02").unwrap()),
        Some(CompletionStatus::Skip)
    );
    assert_eq!(habits[1].icon_glyph(), HabitIcon::Circle);
    assert_eq!(habits[1].frequency, Frequency::Weekly);

    let sections = store.sections("").await;
    let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["General", "Gym"]);
}
