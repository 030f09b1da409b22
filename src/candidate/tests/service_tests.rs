//! Service orchestration tests for candidate triage.

#![expect(clippy::expect_used, reason = "test code uses expect for assertion clarity")]

use std::sync::Arc;

use crate::candidate::{
    adapters::memory::{InMemoryCandidateRepository, InMemorySourceMessageRepository},
    domain::{
        CandidateDomainError, CandidateId, CandidateStatus, ConfidenceBand, EditCandidate,
        ExtractedCandidate, SourceMessageId, SourceSnippet, TaskCandidate,
    },
    ports::CandidateRepository,
    services::{CandidateLifecycleError, CandidateLifecycleService, ConfirmOverrides, IgnoreReason},
};
use crate::identity::domain::UserId;
use crate::patch::Patch;
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskKind, TaskStatus},
    ports::{TaskQuery, TaskRepository},
};
use chrono::{TimeZone, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::json;
use uuid::Uuid;

struct Harness {
    service: CandidateLifecycleService,
    candidates: Arc<InMemoryCandidateRepository>,
    tasks: Arc<InMemoryTaskRepository>,
    sources: Arc<InMemorySourceMessageRepository>,
    owner: UserId,
}

#[fixture]
fn harness() -> Harness {
    let candidates = Arc::new(InMemoryCandidateRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let sources = Arc::new(InMemorySourceMessageRepository::new());
    let service = CandidateLifecycleService::new(
        candidates.clone(),
        tasks.clone(),
        sources.clone(),
        Arc::new(DefaultClock),
    );
    Harness {
        service,
        candidates,
        tasks,
        sources,
        owner: UserId::from_uuid(Uuid::new_v4()),
    }
}

fn submit_lab(owner: UserId) -> TaskCandidate {
    TaskCandidate::from_extraction(
        ExtractedCandidate {
            owner,
            source_message_id: SourceMessageId::from_uuid(Uuid::new_v4()),
            kind: TaskKind::Deadline,
            title: "Submit Lab".to_owned(),
            module: Some("CS101".to_owned()),
            due_date: Some(
                Utc.with_ymd_and_hms(2025, 12, 22, 14, 0, 0)
                    .single()
                    .expect("timestamp"),
            ),
            location: None,
            confidence: ConfidenceBand::High,
            confidence_score: Some(0.93),
            extraction_reasons: json!({"matched": ["due", "submit"]}),
            links: Some(vec!["https://example.edu/lab".to_owned()]),
            attachments: None,
            thread_id: Some("thread-1".to_owned()),
        },
        &DefaultClock,
    )
    .expect("valid extraction")
}

async fn seed(harness: &Harness, candidate: &TaskCandidate) {
    harness
        .candidates
        .store(candidate)
        .await
        .expect("seed candidate");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn confirm_materialises_pending_task_from_candidate_fields(harness: Harness) {
    let candidate = submit_lab(harness.owner);
    seed(&harness, &candidate).await;

    let confirmation = harness
        .service
        .confirm(candidate.id(), harness.owner, ConfirmOverrides::default())
        .await
        .expect("confirm succeeds");

    let task = &confirmation.task;
    assert_eq!(task.title(), "Submit Lab");
    assert_eq!(task.kind(), TaskKind::Deadline);
    assert_eq!(task.module(), Some("CS101"));
    assert_eq!(task.due_date(), candidate.due_date());
    assert_eq!(task.status(), TaskStatus::Pending);
    assert_eq!(task.candidate_id(), candidate.id());
    assert_eq!(task.owner(), harness.owner);
    assert_eq!(task.thread_id(), Some("thread-1"));
    assert_eq!(task.links(), candidate.links());
    assert_eq!(task.notes(), None);
    assert_eq!(confirmation.candidate.status(), CandidateStatus::Confirmed);

    let stored = harness
        .tasks
        .find_by_id(task.id(), harness.owner)
        .await
        .expect("lookup succeeds")
        .expect("task persisted");
    assert_eq!(stored, *task);
    let refetched = harness
        .candidates
        .find_by_id(candidate.id(), harness.owner)
        .await
        .expect("lookup succeeds")
        .expect("candidate persisted");
    assert_eq!(refetched.status(), CandidateStatus::Confirmed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn confirm_overrides_win_and_explicit_null_clears(harness: Harness) {
    let candidate = submit_lab(harness.owner);
    seed(&harness, &candidate).await;

    let overrides = ConfirmOverrides {
        title: Some("Submit Lab 3 report".to_owned()),
        kind: Some(TaskKind::Admin),
        module: Patch::Clear,
        due_date: Patch::Keep,
        notes: Some("bring receipt".to_owned()),
    };
    let confirmation = harness
        .service
        .confirm(candidate.id(), harness.owner, overrides)
        .await
        .expect("confirm succeeds");

    let task = &confirmation.task;
    assert_eq!(task.title(), "Submit Lab 3 report");
    assert_eq!(task.kind(), TaskKind::Admin);
    assert_eq!(task.module(), None);
    assert_eq!(task.due_date(), candidate.due_date());
    assert_eq!(task.notes(), Some("bring receipt"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn confirm_rejects_processed_candidate_and_creates_no_task(harness: Harness) {
    let candidate = submit_lab(harness.owner);
    seed(&harness, &candidate).await;
    harness
        .service
        .ignore(candidate.id(), harness.owner, None)
        .await
        .expect("ignore succeeds");

    let result = harness
        .service
        .confirm(candidate.id(), harness.owner, ConfirmOverrides::default())
        .await;

    assert!(matches!(
        result,
        Err(CandidateLifecycleError::Domain(
            CandidateDomainError::InvalidStatusTransition { .. }
        ))
    ));
    let tasks = harness
        .tasks
        .list(harness.owner, TaskQuery::default())
        .await
        .expect("list succeeds");
    assert!(tasks.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn confirm_unknown_candidate_reports_not_found(harness: Harness) {
    let result = harness
        .service
        .confirm(CandidateId::new(), harness.owner, ConfirmOverrides::default())
        .await;

    assert!(matches!(result, Err(CandidateLifecycleError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn operations_never_cross_owner_boundaries(harness: Harness) {
    let candidate = submit_lab(harness.owner);
    seed(&harness, &candidate).await;
    let intruder = UserId::from_uuid(Uuid::new_v4());

    let confirm = harness
        .service
        .confirm(candidate.id(), intruder, ConfirmOverrides::default())
        .await;
    let ignore = harness.service.ignore(candidate.id(), intruder, None).await;
    let source = harness.service.source(candidate.id(), intruder).await;

    assert!(matches!(confirm, Err(CandidateLifecycleError::NotFound(_))));
    assert!(matches!(ignore, Err(CandidateLifecycleError::NotFound(_))));
    assert!(matches!(source, Err(CandidateLifecycleError::NotFound(_))));

    let untouched = harness
        .candidates
        .find_by_id(candidate.id(), harness.owner)
        .await
        .expect("lookup succeeds")
        .expect("still present");
    assert_eq!(untouched.status(), CandidateStatus::New);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_persists_replacement_and_marks_edited(harness: Harness) {
    let candidate = submit_lab(harness.owner);
    seed(&harness, &candidate).await;

    let edited = harness
        .service
        .edit(
            candidate.id(),
            harness.owner,
            EditCandidate {
                title: "Submit Lab 3".to_owned(),
                kind: TaskKind::Deadline,
                module: Patch::Keep,
                due_date: Patch::Keep,
                location: Patch::Keep,
            },
        )
        .await
        .expect("edit succeeds");

    assert_eq!(edited.status(), CandidateStatus::Edited);
    assert_eq!(edited.title(), "Submit Lab 3");
    assert_eq!(edited.module(), Some("CS101"));

    let refetched = harness
        .candidates
        .find_by_id(candidate.id(), harness.owner)
        .await
        .expect("lookup succeeds")
        .expect("candidate persisted");
    assert_eq!(refetched, edited);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_rejects_already_confirmed_candidate(harness: Harness) {
    let candidate = submit_lab(harness.owner);
    seed(&harness, &candidate).await;
    harness
        .service
        .confirm(candidate.id(), harness.owner, ConfirmOverrides::default())
        .await
        .expect("confirm succeeds");

    let result = harness
        .service
        .edit(
            candidate.id(),
            harness.owner,
            EditCandidate {
                title: "Too late".to_owned(),
                kind: TaskKind::Admin,
                module: Patch::Keep,
                due_date: Patch::Keep,
                location: Patch::Keep,
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(CandidateLifecycleError::Domain(
            CandidateDomainError::InvalidStatusTransition { .. }
        ))
    ));
}

#[rstest]
#[case(None)]
#[case(Some(IgnoreReason::Spam))]
#[tokio::test(flavor = "multi_thread")]
async fn ignore_marks_ignored_and_never_persists_reason(
    harness: Harness,
    #[case] reason: Option<IgnoreReason>,
) {
    let candidate = submit_lab(harness.owner);
    seed(&harness, &candidate).await;

    let ignored = harness
        .service
        .ignore(candidate.id(), harness.owner, reason)
        .await
        .expect("ignore succeeds");

    assert_eq!(ignored.status(), CandidateStatus::Ignored);
    let value = serde_json::to_value(&ignored).expect("candidate serialises");
    assert!(value.get("reason").is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn source_returns_snippet_behind_owned_candidate(harness: Harness) {
    let candidate = submit_lab(harness.owner);
    seed(&harness, &candidate).await;
    let snippet = SourceSnippet {
        subject: "Lab 3 due Friday".to_owned(),
        from_name: Some("Dr. Osei".to_owned()),
        from_email: "osei@example.edu".to_owned(),
        received_at: Utc
            .with_ymd_and_hms(2025, 12, 15, 9, 30, 0)
            .single()
            .expect("timestamp"),
        body_snippet: "Reminder: lab 3 reports are due".to_owned(),
        urls: vec!["https://example.edu/lab".to_owned()],
    };
    harness
        .sources
        .insert(candidate.source_message_id(), snippet.clone())
        .expect("seed snippet");

    let fetched = harness
        .service
        .source(candidate.id(), harness.owner)
        .await
        .expect("source succeeds");

    assert_eq!(fetched, snippet);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn source_reports_missing_message_distinctly(harness: Harness) {
    let candidate = submit_lab(harness.owner);
    seed(&harness, &candidate).await;

    let result = harness.service.source(candidate.id(), harness.owner).await;

    assert!(matches!(
        result,
        Err(CandidateLifecycleError::SourceNotFound(id))
            if id == candidate.source_message_id()
    ));
}
