//! Behavioural tests for the merged feed and its specialised views.

#![expect(clippy::expect_used, reason = "test code uses expect for assertion clarity")]

use std::sync::Arc;

use crate::candidate::{
    adapters::memory::InMemoryCandidateRepository,
    domain::{
        CandidateId, CandidateStatus, ConfidenceBand, PersistedCandidateData, SourceMessageId,
        TaskCandidate,
    },
    ports::CandidateRepository,
};
use crate::feed::services::{FeedService, FeedStatusFilter};
use crate::identity::domain::UserId;
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{PersistedTaskData, Task, TaskId, TaskKind, TaskStatus},
    ports::TaskRepository,
};
use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::json;
use uuid::Uuid;

struct Harness {
    service: FeedService,
    candidates: Arc<InMemoryCandidateRepository>,
    tasks: Arc<InMemoryTaskRepository>,
    owner: UserId,
}

#[fixture]
fn harness() -> Harness {
    let candidates = Arc::new(InMemoryCandidateRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let service = FeedService::new(candidates.clone(), tasks.clone());
    Harness {
        service,
        candidates,
        tasks,
        owner: UserId::from_uuid(Uuid::new_v4()),
    }
}

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, 8, 0, 0)
        .single()
        .expect("timestamp")
}

fn candidate(
    owner: UserId,
    title: &str,
    status: CandidateStatus,
    score: Option<f64>,
    created_at: DateTime<Utc>,
) -> TaskCandidate {
    TaskCandidate::from_persisted(PersistedCandidateData {
        id: CandidateId::new(),
        owner,
        source_message_id: SourceMessageId::from_uuid(Uuid::new_v4()),
        kind: TaskKind::Deadline,
        title: title.to_owned(),
        module: None,
        due_date: None,
        location: None,
        confidence: ConfidenceBand::Med,
        confidence_score: score,
        extraction_reasons: json!({}),
        links: None,
        attachments: None,
        status,
        thread_id: None,
        created_at,
        updated_at: created_at,
    })
}

fn task(
    owner: UserId,
    title: &str,
    status: TaskStatus,
    due_date: Option<DateTime<Utc>>,
) -> Task {
    let completed_at = (status == TaskStatus::Completed).then(|| at(2));
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        candidate_id: CandidateId::new(),
        owner,
        thread_id: None,
        title: title.to_owned(),
        kind: TaskKind::Deadline,
        module: None,
        due_date,
        notes: None,
        links: None,
        status,
        created_at: at(1),
        completed_at,
    })
}

async fn seed_candidate(harness: &Harness, value: &TaskCandidate) {
    harness.candidates.store(value).await.expect("seed candidate");
}

async fn seed_task(harness: &Harness, value: &Task) {
    harness.tasks.store(value).await.expect("seed task");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn feed_returns_both_halves_without_joining(harness: Harness) {
    let fresh = candidate(harness.owner, "Fresh", CandidateStatus::New, None, at(3));
    let older = candidate(harness.owner, "Older", CandidateStatus::Confirmed, None, at(1));
    let pending = task(harness.owner, "Essay", TaskStatus::Pending, Some(at(10)));
    seed_candidate(&harness, &fresh).await;
    seed_candidate(&harness, &older).await;
    seed_task(&harness, &pending).await;

    let feed = harness
        .service
        .feed(harness.owner, FeedStatusFilter::All)
        .await
        .expect("feed succeeds");

    let titles: Vec<&str> = feed.candidates.iter().map(TaskCandidate::title).collect();
    assert_eq!(titles, ["Fresh", "Older"]);
    assert_eq!(feed.tasks.len(), 1);
    assert_eq!(feed.tasks.first().map(Task::title), Some("Essay"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn feed_status_filter_narrows_candidates_only(harness: Harness) {
    let fresh = candidate(harness.owner, "Fresh", CandidateStatus::New, None, at(3));
    let done = candidate(harness.owner, "Done", CandidateStatus::Confirmed, None, at(2));
    let pending = task(harness.owner, "Essay", TaskStatus::Pending, None);
    seed_candidate(&harness, &fresh).await;
    seed_candidate(&harness, &done).await;
    seed_task(&harness, &pending).await;

    let feed = harness
        .service
        .feed(harness.owner, FeedStatusFilter::Confirmed)
        .await
        .expect("feed succeeds");

    assert_eq!(feed.candidates.len(), 1);
    assert_eq!(
        feed.candidates.first().map(TaskCandidate::title),
        Some("Done")
    );
    assert_eq!(feed.tasks.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn feed_is_scoped_to_the_requesting_owner(harness: Harness) {
    let mine = candidate(harness.owner, "Mine", CandidateStatus::New, None, at(1));
    let theirs = candidate(
        UserId::from_uuid(Uuid::new_v4()),
        "Theirs",
        CandidateStatus::New,
        None,
        at(2),
    );
    seed_candidate(&harness, &mine).await;
    seed_candidate(&harness, &theirs).await;

    let feed = harness
        .service
        .feed(harness.owner, FeedStatusFilter::All)
        .await
        .expect("feed succeeds");

    let titles: Vec<&str> = feed.candidates.iter().map(TaskCandidate::title).collect();
    assert_eq!(titles, ["Mine"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn new_candidates_rank_by_score_with_unscored_last(harness: Harness) {
    let strong = candidate(harness.owner, "Strong", CandidateStatus::New, Some(0.9), at(1));
    let weak = candidate(harness.owner, "Weak", CandidateStatus::New, Some(0.4), at(3));
    let unscored = candidate(harness.owner, "Unscored", CandidateStatus::New, None, at(5));
    let processed = candidate(
        harness.owner,
        "Processed",
        CandidateStatus::Ignored,
        Some(0.99),
        at(4),
    );
    for value in [&strong, &weak, &unscored, &processed] {
        seed_candidate(&harness, value).await;
    }

    let ranked = harness
        .service
        .new_candidates(harness.owner)
        .await
        .expect("ranking succeeds");

    let titles: Vec<&str> = ranked.iter().map(TaskCandidate::title).collect();
    assert_eq!(titles, ["Strong", "Weak", "Unscored"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upcoming_returns_only_pending_dated_tasks_soonest_first(harness: Harness) {
    let dated = task(harness.owner, "Dated", TaskStatus::Pending, Some(at(10)));
    let undated = task(harness.owner, "Undated", TaskStatus::Pending, None);
    let finished = task(harness.owner, "Finished", TaskStatus::Completed, Some(at(5)));
    for value in [&dated, &undated, &finished] {
        seed_task(&harness, value).await;
    }

    let upcoming = harness
        .service
        .upcoming_tasks(harness.owner, None)
        .await
        .expect("upcoming succeeds");

    let titles: Vec<&str> = upcoming.iter().map(Task::title).collect();
    assert_eq!(titles, ["Dated"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upcoming_respects_the_requested_limit(harness: Harness) {
    for day in 1..=5 {
        let value = task(
            harness.owner,
            &format!("Task {day}"),
            TaskStatus::Pending,
            Some(at(day)),
        );
        seed_task(&harness, &value).await;
    }

    let capped = harness
        .service
        .upcoming_tasks(harness.owner, Some(2))
        .await
        .expect("upcoming succeeds");

    let titles: Vec<&str> = capped.iter().map(Task::title).collect();
    assert_eq!(titles, ["Task 1", "Task 2"]);
}
