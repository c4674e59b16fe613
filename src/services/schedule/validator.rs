//! Scheduling validation: the pure gate in front of create/update commands.
//!
//! A draft that fails here never reaches the store. On success the draft is
//! returned normalized: the recurrence selection collapses to exactly the
//! fields its kind carries.

use chrono::{NaiveDateTime, Weekday};
use thiserror::Error;

use crate::models::appointment::{AppointmentDraft, Recurrence};

/// User-correctable validation failures. Messages are surfaced verbatim in
/// the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter a title")]
    MissingTitle,
    #[error("Title must be 50 characters or fewer")]
    TitleTooLong,
    #[error("Description must be 250 characters or fewer")]
    DescriptionTooLong,
    #[error("Start time must be in the future")]
    StartNotInFuture,
    #[error("End must be after start")]
    EndNotAfterStart,
    #[error("Select at least one day for weekly recurrence")]
    MissingRecurrenceDays,
    #[error("Repeat count must be at least 1")]
    InvalidRecurrenceCount,
}

/// Validate a draft against "now" and return the normalized payload.
///
/// Both creation and edits require a strictly future start; this also blocks
/// moving an existing appointment's start into the past.
pub fn validate_draft(
    draft: &AppointmentDraft,
    now: NaiveDateTime,
) -> Result<AppointmentDraft, ValidationError> {
    if draft.title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if draft.title.chars().count() > 50 {
        return Err(ValidationError::TitleTooLong);
    }
    if draft.description.chars().count() > 250 {
        return Err(ValidationError::DescriptionTooLong);
    }
    if draft.start <= now {
        return Err(ValidationError::StartNotInFuture);
    }
    if draft.end <= draft.start {
        return Err(ValidationError::EndNotAfterStart);
    }

    let recurrence = normalize_recurrence(&draft.recurrence)?;

    let mut normalized = draft.clone();
    normalized.recurrence = recurrence;
    normalized.participant_ids = dedup_preserving_order(&draft.participant_ids);
    Ok(normalized)
}

fn normalize_recurrence(recurrence: &Recurrence) -> Result<Recurrence, ValidationError> {
    match recurrence {
        Recurrence::None => Ok(Recurrence::None),
        Recurrence::Daily { count } => {
            if *count == 0 {
                return Err(ValidationError::InvalidRecurrenceCount);
            }
            Ok(Recurrence::Daily { count: *count })
        }
        Recurrence::Weekly { count, days } => {
            if days.is_empty() {
                return Err(ValidationError::MissingRecurrenceDays);
            }
            if *count == 0 {
                return Err(ValidationError::InvalidRecurrenceCount);
            }
            Ok(Recurrence::Weekly {
                count: *count,
                days: dedup_weekdays(days),
            })
        }
    }
}

fn dedup_preserving_order(ids: &[i64]) -> Vec<i64> {
    let mut seen = Vec::with_capacity(ids.len());
    for &id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

fn dedup_weekdays(days: &[Weekday]) -> Vec<Weekday> {
    let mut seen = Vec::with_capacity(days.len());
    for &day in days {
        if !seen.contains(&day) {
            seen.push(day);
        }
    }
    seen
}
