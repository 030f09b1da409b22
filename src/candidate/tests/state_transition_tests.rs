//! Unit tests for candidate status transition validation.

use crate::candidate::domain::{
    CandidateDomainError, CandidateStatus, ConfidenceBand, EditCandidate, ExtractedCandidate,
    SourceMessageId, TaskCandidate,
};
use crate::identity::domain::UserId;
use crate::patch::Patch;
use crate::task::domain::TaskKind;
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::json;
use uuid::Uuid;

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[fixture]
fn new_candidate(clock: DefaultClock) -> Result<TaskCandidate, CandidateDomainError> {
    TaskCandidate::from_extraction(
        ExtractedCandidate {
            owner: UserId::from_uuid(Uuid::new_v4()),
            source_message_id: SourceMessageId::from_uuid(Uuid::new_v4()),
            kind: TaskKind::Deadline,
            title: "Submit Lab".to_owned(),
            module: Some("CS101".to_owned()),
            due_date: None,
            location: None,
            confidence: ConfidenceBand::High,
            confidence_score: Some(0.93),
            extraction_reasons: json!({"matched": ["deadline keyword"]}),
            links: None,
            attachments: None,
            thread_id: None,
        },
        &clock,
    )
}

#[rstest]
#[case(CandidateStatus::New, CandidateStatus::New, false)]
#[case(CandidateStatus::New, CandidateStatus::Confirmed, true)]
#[case(CandidateStatus::New, CandidateStatus::Edited, true)]
#[case(CandidateStatus::New, CandidateStatus::Ignored, true)]
#[case(CandidateStatus::Confirmed, CandidateStatus::New, false)]
#[case(CandidateStatus::Confirmed, CandidateStatus::Confirmed, false)]
#[case(CandidateStatus::Confirmed, CandidateStatus::Edited, false)]
#[case(CandidateStatus::Confirmed, CandidateStatus::Ignored, false)]
#[case(CandidateStatus::Edited, CandidateStatus::New, false)]
#[case(CandidateStatus::Edited, CandidateStatus::Confirmed, false)]
#[case(CandidateStatus::Edited, CandidateStatus::Edited, false)]
#[case(CandidateStatus::Edited, CandidateStatus::Ignored, false)]
#[case(CandidateStatus::Ignored, CandidateStatus::New, false)]
#[case(CandidateStatus::Ignored, CandidateStatus::Confirmed, false)]
#[case(CandidateStatus::Ignored, CandidateStatus::Edited, false)]
#[case(CandidateStatus::Ignored, CandidateStatus::Ignored, false)]
fn can_transition_to_returns_expected(
    #[case] from: CandidateStatus,
    #[case] to: CandidateStatus,
    #[case] expected: bool,
) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[rstest]
#[case(CandidateStatus::New, false)]
#[case(CandidateStatus::Confirmed, true)]
#[case(CandidateStatus::Edited, false)]
#[case(CandidateStatus::Ignored, true)]
fn is_terminal_returns_expected(#[case] status: CandidateStatus, #[case] expected: bool) {
    assert_eq!(status.is_terminal(), expected);
}

#[rstest]
fn confirm_from_new_succeeds(
    clock: DefaultClock,
    new_candidate: Result<TaskCandidate, CandidateDomainError>,
) -> eyre::Result<()> {
    let mut candidate = new_candidate?;
    let original_updated_at = candidate.updated_at();

    candidate.confirm(&clock)?;

    ensure!(candidate.status() == CandidateStatus::Confirmed);
    ensure!(candidate.updated_at() >= original_updated_at);
    Ok(())
}

#[rstest]
fn confirm_twice_is_rejected_without_mutation(
    clock: DefaultClock,
    new_candidate: Result<TaskCandidate, CandidateDomainError>,
) -> eyre::Result<()> {
    let mut candidate = new_candidate?;
    candidate.confirm(&clock)?;
    let confirmed_updated_at = candidate.updated_at();

    let result = candidate.confirm(&clock);
    let expected = Err(CandidateDomainError::InvalidStatusTransition {
        candidate_id: candidate.id(),
        from: CandidateStatus::Confirmed,
        to: CandidateStatus::Confirmed,
    });

    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    ensure!(candidate.status() == CandidateStatus::Confirmed);
    ensure!(candidate.updated_at() == confirmed_updated_at);
    Ok(())
}

#[rstest]
fn ignore_from_new_succeeds(
    clock: DefaultClock,
    new_candidate: Result<TaskCandidate, CandidateDomainError>,
) -> eyre::Result<()> {
    let mut candidate = new_candidate?;

    candidate.ignore(&clock)?;

    ensure!(candidate.status() == CandidateStatus::Ignored);
    Ok(())
}

#[rstest]
fn edit_after_confirm_is_rejected_without_mutation(
    clock: DefaultClock,
    new_candidate: Result<TaskCandidate, CandidateDomainError>,
) -> eyre::Result<()> {
    let mut candidate = new_candidate?;
    candidate.confirm(&clock)?;
    let original_title = candidate.title().to_owned();

    let edit = EditCandidate {
        title: "Renamed".to_owned(),
        kind: TaskKind::Admin,
        module: Patch::Clear,
        due_date: Patch::Keep,
        location: Patch::Keep,
    };
    let result = candidate.apply_edit(edit, &clock);
    let expected = Err(CandidateDomainError::InvalidStatusTransition {
        candidate_id: candidate.id(),
        from: CandidateStatus::Confirmed,
        to: CandidateStatus::Edited,
    });

    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    ensure!(candidate.title() == original_title);
    ensure!(candidate.kind() == TaskKind::Deadline);
    ensure!(candidate.module() == Some("CS101"));
    Ok(())
}

#[rstest]
fn ignore_after_ignore_is_rejected(
    clock: DefaultClock,
    new_candidate: Result<TaskCandidate, CandidateDomainError>,
) -> eyre::Result<()> {
    let mut candidate = new_candidate?;
    candidate.ignore(&clock)?;

    let result = candidate.ignore(&clock);
    let expected = Err(CandidateDomainError::InvalidStatusTransition {
        candidate_id: candidate.id(),
        from: CandidateStatus::Ignored,
        to: CandidateStatus::Ignored,
    });

    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    Ok(())
}
