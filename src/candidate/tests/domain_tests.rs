//! Unit tests for candidate domain construction, edits, and serialisation.

#![expect(clippy::expect_used, reason = "test code uses expect for assertion clarity")]

use crate::candidate::domain::{
    CandidateDomainError, CandidateStatus, ConfidenceBand, EditCandidate, ExtractedCandidate,
    SourceMessageId, TaskCandidate,
};
use crate::identity::domain::UserId;
use crate::patch::Patch;
use crate::task::domain::TaskKind;
use chrono::{TimeZone, Utc};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::json;
use uuid::Uuid;

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn extraction(title: &str) -> ExtractedCandidate {
    ExtractedCandidate {
        owner: UserId::from_uuid(Uuid::new_v4()),
        source_message_id: SourceMessageId::from_uuid(Uuid::new_v4()),
        kind: TaskKind::Reading,
        title: title.to_owned(),
        module: Some("HIST210".to_owned()),
        due_date: Some(Utc.with_ymd_and_hms(2025, 12, 22, 14, 0, 0).single().expect("timestamp")),
        location: Some("Library".to_owned()),
        confidence: ConfidenceBand::Med,
        confidence_score: Some(0.61),
        extraction_reasons: json!({"matched": ["reading list"]}),
        links: Some(vec!["https://example.edu/reading".to_owned()]),
        attachments: None,
        thread_id: Some("thread-9".to_owned()),
    }
}

#[rstest]
fn from_extraction_starts_new_and_trims_title(clock: DefaultClock) -> eyre::Result<()> {
    let candidate = TaskCandidate::from_extraction(extraction("  Chapter 4  "), &clock)?;

    ensure!(candidate.status() == CandidateStatus::New);
    ensure!(candidate.title() == "Chapter 4");
    ensure!(candidate.created_at() == candidate.updated_at());
    Ok(())
}

#[rstest]
fn from_extraction_rejects_blank_title(clock: DefaultClock) {
    let result = TaskCandidate::from_extraction(extraction("   "), &clock);

    assert_eq!(result, Err(CandidateDomainError::EmptyTitle));
}

#[rstest]
fn edit_replaces_required_fields_and_keeps_omitted_ones(clock: DefaultClock) -> eyre::Result<()> {
    let mut candidate = TaskCandidate::from_extraction(extraction("Chapter 4"), &clock)?;

    candidate.apply_edit(
        EditCandidate {
            title: "Chapters 4-5".to_owned(),
            kind: TaskKind::Deadline,
            module: Patch::Keep,
            due_date: Patch::Keep,
            location: Patch::Keep,
        },
        &clock,
    )?;

    ensure!(candidate.status() == CandidateStatus::Edited);
    ensure!(candidate.title() == "Chapters 4-5");
    ensure!(candidate.kind() == TaskKind::Deadline);
    ensure!(candidate.module() == Some("HIST210"));
    ensure!(candidate.location() == Some("Library"));
    ensure!(candidate.due_date().is_some());
    Ok(())
}

#[rstest]
fn edit_clears_fields_on_explicit_null(clock: DefaultClock) -> eyre::Result<()> {
    let mut candidate = TaskCandidate::from_extraction(extraction("Chapter 4"), &clock)?;

    candidate.apply_edit(
        EditCandidate {
            title: "Chapter 4".to_owned(),
            kind: TaskKind::Reading,
            module: Patch::Clear,
            due_date: Patch::Clear,
            location: Patch::Set("Lecture hall".to_owned()),
        },
        &clock,
    )?;

    ensure!(candidate.module().is_none());
    ensure!(candidate.due_date().is_none());
    ensure!(candidate.location() == Some("Lecture hall"));
    Ok(())
}

#[rstest]
fn edit_with_blank_title_is_rejected_without_mutation(clock: DefaultClock) -> eyre::Result<()> {
    let mut candidate = TaskCandidate::from_extraction(extraction("Chapter 4"), &clock)?;

    let result = candidate.apply_edit(
        EditCandidate {
            title: "  ".to_owned(),
            kind: TaskKind::Admin,
            module: Patch::Clear,
            due_date: Patch::Keep,
            location: Patch::Keep,
        },
        &clock,
    );

    ensure!(result == Err(CandidateDomainError::EmptyTitle));
    ensure!(candidate.status() == CandidateStatus::New);
    ensure!(candidate.title() == "Chapter 4");
    ensure!(candidate.module() == Some("HIST210"));
    Ok(())
}

#[rstest]
fn serialised_candidate_uses_wire_field_names(clock: DefaultClock) -> eyre::Result<()> {
    let candidate = TaskCandidate::from_extraction(extraction("Chapter 4"), &clock)?;

    let value = serde_json::to_value(&candidate).expect("candidate serialises");

    ensure!(value.get("type") == Some(&json!("READING")));
    ensure!(value.get("status") == Some(&json!("new")));
    ensure!(value.get("confidence") == Some(&json!("MED")));
    ensure!(value.get("owner_id").is_some());
    ensure!(value.get("kind").is_none());
    ensure!(value.get("owner").is_none());
    Ok(())
}

#[rstest]
fn edit_payload_distinguishes_null_from_omitted() {
    let payload: EditCandidate = serde_json::from_value(json!({
        "title": "Retake quiz",
        "type": "ADMIN",
        "module": null,
    }))
    .expect("payload parses");

    assert_eq!(payload.module, Patch::Clear);
    assert_eq!(payload.due_date, Patch::Keep);
    assert_eq!(payload.location, Patch::Keep);
}
