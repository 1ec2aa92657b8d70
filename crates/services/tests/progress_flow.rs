use std::sync::Arc;

use chrono::NaiveDate;
use services::{Clock, ProgressError, ProgressTracker};
use smart_learn_core::model::{LessonId, OverallProgress, QuizScore};
use storage::{InMemoryStore, KeyValueStore, StorageKey};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn lesson(id: &str) -> LessonId {
    LessonId::new(id).unwrap()
}

fn score(value: u32) -> QuizScore {
    QuizScore::new(value).unwrap()
}

async fn seeded_store(blob: &str) -> InMemoryStore {
    let store = InMemoryStore::new();
    store.set(StorageKey::Progress, blob).await.unwrap();
    store
}

fn tracker(store: &InMemoryStore, today: NaiveDate) -> ProgressTracker {
    ProgressTracker::new(Clock::fixed_on(today), Arc::new(store.clone()))
}

#[tokio::test]
async fn fresh_install_then_lesson_and_quiz() {
    let store = InMemoryStore::new();
    let progress = tracker(&store, day(10));

    let loaded = progress.load().await.unwrap();
    assert!(loaded.completed_lessons().is_empty());
    assert_eq!(loaded.streak(), 1);
    assert_eq!(loaded.last_login_date(), Some(day(10)));

    progress.mark_lesson_complete(lesson("L1")).await.unwrap();
    progress.save_quiz_score(lesson("L1"), score(92)).await.unwrap();

    let overall = progress.overall_progress().await;
    assert_eq!(overall.total_completed, 1);
    assert_eq!(overall.average_score, 92);
    assert_eq!(overall.streak, 1);

    let blob = store.get(StorageKey::Progress).await.unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert_eq!(json["completedLessons"], serde_json::json!(["L1"]));
    assert_eq!(json["quizScores"]["L1"], 92);
    assert_eq!(json["lastLoginDate"], "2024-03-10");
}

#[tokio::test]
async fn login_yesterday_extends_the_streak() {
    let store = seeded_store(r#"{"streak":4,"lastLoginDate":"2024-03-09"}"#).await;
    let loaded = tracker(&store, day(10)).load().await.unwrap();
    assert_eq!(loaded.streak(), 5);
    assert_eq!(loaded.last_login_date(), Some(day(10)));
}

#[tokio::test]
async fn a_gap_restarts_the_streak() {
    let store = seeded_store(r#"{"streak":7,"lastLoginDate":"2024-03-07"}"#).await;
    let loaded = tracker(&store, day(10)).load().await.unwrap();
    assert_eq!(loaded.streak(), 1);
}

#[tokio::test]
async fn second_load_on_the_same_day_keeps_the_streak() {
    let store = seeded_store(r#"{"streak":3,"lastLoginDate":"2024-03-10"}"#).await;
    let loaded = tracker(&store, day(10)).load().await.unwrap();
    assert_eq!(loaded.streak(), 3);
}

#[tokio::test]
async fn login_date_in_the_future_restarts_the_streak() {
    let store = seeded_store(r#"{"streak":9,"lastLoginDate":"2024-03-20"}"#).await;
    let loaded = tracker(&store, day(10)).load().await.unwrap();
    assert_eq!(loaded.streak(), 1);
    assert_eq!(loaded.last_login_date(), Some(day(10)));
}

#[tokio::test]
async fn corrupt_blob_falls_back_to_defaults() {
    let store = seeded_store("{not json").await;
    let loaded = tracker(&store, day(10)).load().await.unwrap();
    assert!(loaded.completed_lessons().is_empty());
    assert_eq!(loaded.streak(), 1);

    let out_of_range = seeded_store(r#"{"quizScores":{"L1":140}}"#).await;
    let loaded = tracker(&out_of_range, day(10)).load().await.unwrap();
    assert_eq!(loaded.quiz_score(&lesson("L1")), None);
}

#[tokio::test]
async fn marking_twice_is_idempotent_and_last_score_wins() {
    let store = InMemoryStore::new();
    let progress = tracker(&store, day(10));
    progress.load().await.unwrap();

    let once = progress.mark_lesson_complete(lesson("L1")).await.unwrap();
    let twice = progress.mark_lesson_complete(lesson("L1")).await.unwrap();
    assert_eq!(once.completed_lessons(), twice.completed_lessons());

    for value in [40, 100, 75] {
        progress.save_quiz_score(lesson("L1"), score(value)).await.unwrap();
    }
    assert_eq!(progress.quiz_score(&lesson("L1")).await, Some(score(75)));
}

#[tokio::test]
async fn average_rounds_over_all_scores() {
    let store = InMemoryStore::new();
    let progress = tracker(&store, day(10));
    progress.load().await.unwrap();
    assert_eq!(progress.overall_progress().await.average_score, 0);

    progress.save_quiz_score(lesson("L1"), score(80)).await.unwrap();
    progress.save_quiz_score(lesson("L2"), score(60)).await.unwrap();
    assert_eq!(progress.overall_progress().await.average_score, 70);

    progress.save_quiz_score(lesson("L3"), score(65)).await.unwrap();
    // (80 + 60 + 65) / 3 = 68.33
    assert_eq!(progress.overall_progress().await.average_score, 68);
}

#[tokio::test]
async fn reset_clears_everything_including_the_stored_blob() {
    let store = InMemoryStore::new();
    let progress = tracker(&store, day(10));
    progress.load().await.unwrap();
    progress.mark_lesson_complete(lesson("L1")).await.unwrap();
    progress.save_quiz_score(lesson("L1"), score(90)).await.unwrap();
    progress.add_time_spent(15).await.unwrap();

    progress.reset().await.unwrap();
    assert_eq!(progress.overall_progress().await, OverallProgress::default());
    assert!(!progress.is_lesson_complete(&lesson("L1")).await);
    assert_eq!(store.get(StorageKey::Progress).await.unwrap(), None);
}

#[tokio::test]
async fn concurrent_writers_do_not_lose_updates() {
    let store = InMemoryStore::new();
    let progress = Arc::new(tracker(&store, day(10)));
    progress.load().await.unwrap();

    let mut handles = Vec::new();
    for n in 0..20 {
        let progress = Arc::clone(&progress);
        handles.push(tokio::spawn(async move {
            progress
                .mark_lesson_complete(LessonId::new(format!("L{n}")).unwrap())
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(progress.overall_progress().await.total_completed, 20);
    let reloaded = tracker(&store, day(10)).load().await.unwrap();
    assert_eq!(reloaded.completed_lessons().len(), 20);
}

#[tokio::test]
async fn mutations_need_a_load_first() {
    let progress = tracker(&InMemoryStore::new(), day(10));
    let err = progress.add_time_spent(5).await.unwrap_err();
    assert!(matches!(err, ProgressError::NotLoaded));
}

#[tokio::test]
async fn achievements_follow_overall_progress() {
    let store = seeded_store(r#"{"streak":2,"lastLoginDate":"2024-03-09"}"#).await;
    let progress = tracker(&store, day(10));
    progress.load().await.unwrap();
    progress.mark_lesson_complete(lesson("L1")).await.unwrap();
    progress.save_quiz_score(lesson("L1"), score(85)).await.unwrap();

    let unlocked: Vec<&str> = progress
        .achievements()
        .await
        .into_iter()
        .filter(|(_, unlocked)| *unlocked)
        .map(|(achievement, _)| achievement.id())
        .collect();
    assert_eq!(unlocked.len(), 3, "{unlocked:?}");
}
