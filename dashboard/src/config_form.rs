//! Singleton configuration forms.
//!
//! Cloud preferences and business constraints are single-row records:
//! the form fetches the record, binds it into an editable draft, and on
//! save issues POST when nothing exists yet or PUT when it does, then
//! re-fetches. Advisory text is computed from the draft alone through
//! static lookups; it is recomputed on every read and never persisted.

use std::sync::Arc;

use chrono::NaiveDate;
use validator::Validate;

use api_client::{ApiTransport, MigrationClient};
use common::errors::{AppError, AppResult};
use common::models::{DowntimeTolerance, SingletonEntity};

/// Form over one singleton configuration record.
pub struct SingletonForm<T, S: SingletonEntity> {
    client: Arc<MigrationClient<T>>,
    stored: Option<S>,
    draft: Option<S::Draft>,
    last_error: Option<String>,
}

impl<T: ApiTransport, S: SingletonEntity> SingletonForm<T, S> {
    /// Creates an empty form; call [`load`](Self::load) to populate it.
    pub fn new(client: Arc<MigrationClient<T>>) -> Self {
        Self {
            client,
            stored: None,
            draft: None,
            last_error: None,
        }
    }

    /// Fetches the singleton and binds it into the draft.
    pub async fn load(&mut self) -> AppResult<()> {
        match self.client.fetch_singleton::<S>().await {
            Ok(stored) => {
                self.draft = stored.as_ref().map(S::to_draft);
                self.stored = stored;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!(entity = S::ENTITY, error = %e, "singleton fetch failed");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// The record as last confirmed by the backend.
    pub fn stored(&self) -> Option<&S> {
        self.stored.as_ref()
    }

    /// The editable draft, if one is bound.
    pub fn draft(&self) -> Option<&S::Draft> {
        self.draft.as_ref()
    }

    /// Replaces the draft wholesale (form edit).
    pub fn set_draft(&mut self, draft: S::Draft) {
        self.draft = Some(draft);
    }

    /// Persists the draft: POST when no record exists, PUT otherwise.
    /// Re-fetches on success so the form reflects stored state.
    pub async fn save(&mut self) -> AppResult<()> {
        let draft = self
            .draft
            .clone()
            .ok_or_else(|| AppError::Validation(format!("no {} draft to save", S::ENTITY)))?;
        draft.validate().map_err(AppError::from_validation)?;

        let result = match self.stored.as_ref().map(S::id) {
            Some(id) => self.client.update_singleton::<S>(id, &draft).await,
            None => self.client.create_singleton::<S>(&draft).await,
        };

        if let Err(e) = result {
            self.last_error = Some(e.to_string());
            return Err(e);
        }
        self.load().await
    }

    /// Message of the most recent failure.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// Recommended migration window for a downtime tolerance.
///
/// Static lookup; the backend is not consulted.
pub fn window_recommendation(tolerance: DowntimeTolerance) -> &'static str {
    match tolerance {
        DowntimeTolerance::None | DowntimeTolerance::VeryLow => {
            "24/7 window with blue-green deployment"
        }
        DowntimeTolerance::Low => "scheduled maintenance windows or evenings",
        DowntimeTolerance::Medium => "weekends only",
        DowntimeTolerance::High | DowntimeTolerance::VeryHigh => "business hours are acceptable",
    }
}

/// Urgency bucket for the cutover lead time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadTime {
    /// Under 30 days; planning and testing will be tight.
    Short,
    /// 30-89 days; adequate for most migrations.
    Adequate,
    /// 90 days or more.
    Comfortable,
    /// The cutover date is already in the past.
    Elapsed,
}

/// Advisory about the time remaining until cutover.
#[derive(Debug, Clone, PartialEq)]
pub struct CutoverAdvisory {
    /// Calendar days from `today` to the cutover date.
    pub days_remaining: i64,
    /// Urgency bucket.
    pub lead_time: LeadTime,
    /// Human-readable advisory line.
    pub message: String,
}

/// Computes the cutover lead-time advisory against a caller-supplied
/// "today" (date-only, no timezone handling).
pub fn cutover_advisory(cutover_date: NaiveDate, today: NaiveDate) -> CutoverAdvisory {
    let days_remaining = (cutover_date - today).num_days();
    let (lead_time, message) = if days_remaining < 0 {
        (
            LeadTime::Elapsed,
            format!("cutover date passed {} days ago", -days_remaining),
        )
    } else if days_remaining < 30 {
        (
            LeadTime::Short,
            format!("only {days_remaining} days until cutover; consider extending the timeline"),
        )
    } else if days_remaining < 90 {
        (
            LeadTime::Adequate,
            format!("{days_remaining} days until cutover; adequate for most migrations"),
        )
    } else {
        (
            LeadTime::Comfortable,
            format!("{days_remaining} days until cutover; comfortable planning margin"),
        )
    };
    CutoverAdvisory {
        days_remaining,
        lead_time,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_downtime_recommends_always_on_window() {
        assert_eq!(
            window_recommendation(DowntimeTolerance::None),
            "24/7 window with blue-green deployment"
        );
        assert_eq!(
            window_recommendation(DowntimeTolerance::VeryLow),
            "24/7 window with blue-green deployment"
        );
    }

    #[test]
    fn medium_downtime_recommends_weekends() {
        assert_eq!(window_recommendation(DowntimeTolerance::Medium), "weekends only");
    }

    #[test]
    fn lead_time_buckets() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();
        let soon = NaiveDate::from_ymd_opt(2026, 8, 20).unwrap();
        let later = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let far = NaiveDate::from_ymd_opt(2027, 2, 1).unwrap();
        let past = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();

        assert_eq!(cutover_advisory(soon, today).lead_time, LeadTime::Short);
        assert_eq!(cutover_advisory(later, today).lead_time, LeadTime::Adequate);
        assert_eq!(cutover_advisory(far, today).lead_time, LeadTime::Comfortable);
        assert_eq!(cutover_advisory(past, today).lead_time, LeadTime::Elapsed);
    }

    #[test]
    fn advisory_is_pure_and_repeatable() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();
        let cutover = NaiveDate::from_ymd_opt(2026, 9, 15).unwrap();
        assert_eq!(cutover_advisory(cutover, today), cutover_advisory(cutover, today));
    }
}
