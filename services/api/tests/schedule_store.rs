//! Integration tests for the file-backed schedule store.

mod common;

use common::temp_dir;
use planner_api::adapters::FileScheduleStore;
use std::sync::Arc;
use weekly_planner_core::domain::{Activity, Day, ScheduleDocument, SlotId, SlotRecord, TimeSlot};
use weekly_planner_core::ports::{PortError, ScheduleStore};

fn slot(day: Day, hour: u8) -> SlotId {
    SlotId::new(day, TimeSlot::new(hour).unwrap())
}

#[tokio::test]
async fn missing_file_reads_as_an_empty_document() {
    let store = FileScheduleStore::new(temp_dir("schedule-store").join("schedule.json"));
    assert_eq!(store.read().await.unwrap(), ScheduleDocument::new());
}

#[tokio::test]
async fn written_document_reads_back_in_the_wire_format() {
    let path = temp_dir("schedule-store").join("schedule.json");
    let store = FileScheduleStore::new(&path);

    let mut document = ScheduleDocument::new();
    document.set_slot(slot(Day::Mon, 9), SlotRecord::new("Math", Some(Activity::Study)));
    store.write(&document).await.unwrap();

    assert_eq!(store.read().await.unwrap(), document);
    let raw = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        raw,
        "{\n  \"Mon_09:00\": {\n    \"text\": \"Math\",\n    \"activity\": \"study\"\n  }\n}"
    );
}

#[tokio::test]
async fn clear_all_round_trips_to_an_empty_document() {
    let store = FileScheduleStore::new(temp_dir("schedule-store").join("schedule.json"));

    let mut document = ScheduleDocument::new();
    document.set_slot(slot(Day::Sat, 11), SlotRecord::new("Brunch", Some(Activity::Social)));
    store.write(&document).await.unwrap();

    document.clear_all();
    store.write(&document).await.unwrap();
    assert!(store.read().await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_write_reports_a_storage_error() {
    let store = FileScheduleStore::new(
        temp_dir("schedule-store")
            .join("does-not-exist")
            .join("schedule.json"),
    );
    let result = store.write(&ScheduleDocument::new()).await;
    assert!(matches!(result, Err(PortError::Storage(_))));
}

#[tokio::test]
async fn failed_write_keeps_the_previous_document() {
    let dir = temp_dir("schedule-store");
    let store = FileScheduleStore::new(dir.join("schedule.json"));

    let mut previous = ScheduleDocument::new();
    previous.set_slot(slot(Day::Tue, 6), SlotRecord::new("Run", Some(Activity::Exercise)));
    store.write(&previous).await.unwrap();

    // A directory squatting on the target makes the final rename fail.
    std::fs::create_dir(dir.join("occupied")).unwrap();
    let blocked = FileScheduleStore::new(dir.join("occupied"));
    let mut next = ScheduleDocument::new();
    next.set_slot(slot(Day::Tue, 7), SlotRecord::new("Shower", None));
    assert!(matches!(blocked.write(&next).await, Err(PortError::Storage(_))));

    assert_eq!(store.read().await.unwrap(), previous);
    let mut entries: Vec<String> = std::fs::read_dir(&dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    entries.sort();
    assert_eq!(entries, vec!["occupied".to_string(), "schedule.json".to_string()]);
}

#[tokio::test]
async fn corrupt_file_is_a_storage_error() {
    let path = temp_dir("schedule-store").join("schedule.json");
    std::fs::write(&path, "{ not json").unwrap();
    let store = FileScheduleStore::new(&path);
    assert!(matches!(store.read().await, Err(PortError::Storage(_))));
}

#[tokio::test]
async fn concurrent_writes_leave_one_complete_document() {
    let dir = temp_dir("schedule-store");
    let store = Arc::new(FileScheduleStore::new(dir.join("schedule.json")));

    let writers: Vec<_> = (TimeSlot::FIRST_HOUR..=TimeSlot::LAST_HOUR)
        .map(|hour| {
            let store = store.clone();
            tokio::spawn(async move {
                let mut document = ScheduleDocument::new();
                document.set_slot(slot(Day::Wed, hour), SlotRecord::new(format!("v{hour}"), None));
                store.write(&document).await
            })
        })
        .collect();
    for writer in writers {
        writer.await.unwrap().unwrap();
    }

    let stored = store.read().await.unwrap();
    assert_eq!(stored.len(), 1);

    let entries: Vec<String> = std::fs::read_dir(&dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["schedule.json".to_string()]);
}
