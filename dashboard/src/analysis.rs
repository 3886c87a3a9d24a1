//! Analysis viewers.
//!
//! The cost, strategy and timeline screens render backend-computed
//! reports; the only client-side derivation is the timeline's calendar
//! arithmetic when the user picks a start date. Sample data is never
//! substituted silently: a fetch failure stays an error, and loading the
//! built-in sample requires an explicit call that marks the panel's
//! data origin so renderers can show a banner.

use std::sync::Arc;

use chrono::{Days, NaiveDate};

use api_client::{ApiTransport, MigrationClient};
use common::errors::AppResult;
use common::models::analysis::{TimelineOverview, TimelinePhase};
use common::models::{CostReport, StrategyReport, TimelineReport};

/// Where the currently displayed report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    /// Fetched from the backend.
    Backend,
    /// Built-in sample data, explicitly requested by the user.
    Sample,
}

/// Adds whole weeks to a date-only value.
pub fn add_weeks(date: NaiveDate, weeks: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(weeks) * 7))
        .unwrap_or(date)
}

/// One phase anchored to concrete calendar dates.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSchedule {
    /// Phase title.
    pub title: String,
    /// Length in weeks.
    pub duration_weeks: u32,
    /// First day of the phase.
    pub starts_on: NaiveDate,
    /// Day after the phase's last week (start of the next phase).
    pub ends_on: NaiveDate,
}

/// Anchors the report's phases at a start date, sequentially.
pub fn schedule_phases(phases: &[TimelinePhase], start: NaiveDate) -> Vec<PhaseSchedule> {
    let mut cursor = start;
    phases
        .iter()
        .map(|phase| {
            let starts_on = cursor;
            let ends_on = add_weeks(cursor, phase.duration_weeks);
            cursor = ends_on;
            PhaseSchedule {
                title: phase.title.clone(),
                duration_weeks: phase.duration_weeks,
                starts_on,
                ends_on,
            }
        })
        .collect()
}

/// Cost estimation viewer.
pub struct CostPanel<T> {
    client: Arc<MigrationClient<T>>,
    report: Option<CostReport>,
    last_error: Option<String>,
}

impl<T: ApiTransport> CostPanel<T> {
    pub fn new(client: Arc<MigrationClient<T>>) -> Self {
        Self {
            client,
            report: None,
            last_error: None,
        }
    }

    /// Fetches (or re-fetches) the cost report.
    pub async fn refresh(&mut self) -> AppResult<()> {
        match self.client.cost_estimation().await {
            Ok(report) => {
                self.report = Some(report);
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "cost estimation fetch failed");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn report(&self) -> Option<&CostReport> {
        self.report.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// Migration strategy viewer.
pub struct StrategyPanel<T> {
    client: Arc<MigrationClient<T>>,
    report: Option<StrategyReport>,
    last_error: Option<String>,
}

impl<T: ApiTransport> StrategyPanel<T> {
    pub fn new(client: Arc<MigrationClient<T>>) -> Self {
        Self {
            client,
            report: None,
            last_error: None,
        }
    }

    /// Fetches (or re-fetches) the strategy report.
    pub async fn refresh(&mut self) -> AppResult<()> {
        match self.client.migration_strategy().await {
            Ok(report) => {
                self.report = Some(report);
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "migration strategy fetch failed");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn report(&self) -> Option<&StrategyReport> {
        self.report.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// Migration timeline viewer.
///
/// The user may pick a start date; every derived date is then
/// recomputed locally from the phases' week durations.
pub struct TimelinePanel<T> {
    client: Arc<MigrationClient<T>>,
    report: Option<TimelineReport>,
    origin: DataOrigin,
    start_date: Option<NaiveDate>,
    last_error: Option<String>,
}

impl<T: ApiTransport> TimelinePanel<T> {
    pub fn new(client: Arc<MigrationClient<T>>) -> Self {
        Self {
            client,
            report: None,
            origin: DataOrigin::Backend,
            start_date: None,
            last_error: None,
        }
    }

    /// Picks the start date used for schedule derivation and requests.
    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.start_date = Some(date);
    }

    /// Fetches (or re-fetches) the timeline report.
    pub async fn refresh(&mut self) -> AppResult<()> {
        match self.client.timeline(self.start_date).await {
            Ok(report) => {
                self.report = Some(report);
                self.origin = DataOrigin::Backend;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "timeline fetch failed");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Loads the built-in sample report.
    ///
    /// Only ever called on an explicit user request; the panel's origin
    /// flips to [`DataOrigin::Sample`] and stays that way until a
    /// successful [`refresh`](Self::refresh).
    pub fn use_sample_data(&mut self) {
        let start = self.effective_start_date();
        self.report = Some(sample_timeline(start));
        self.origin = DataOrigin::Sample;
    }

    /// Start date used for derivation: the user's pick, else the
    /// report's own estimated start.
    pub fn effective_start_date(&self) -> NaiveDate {
        self.start_date
            .or_else(|| self.report.as_ref().map(|r| r.overview.estimated_start_date))
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }

    /// Calendar schedule derived from the held report and start date.
    pub fn schedule(&self) -> Vec<PhaseSchedule> {
        match &self.report {
            Some(report) => schedule_phases(&report.phases, self.effective_start_date()),
            None => Vec::new(),
        }
    }

    /// Derived project end date: start plus total duration.
    pub fn project_end(&self) -> Option<NaiveDate> {
        self.report
            .as_ref()
            .map(|r| add_weeks(self.effective_start_date(), r.overview.total_duration_weeks))
    }

    pub fn report(&self) -> Option<&TimelineReport> {
        self.report.as_ref()
    }

    pub fn origin(&self) -> DataOrigin {
        self.origin
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// Built-in sample timeline used when the backend is unreachable and the
/// user explicitly asks for sample data.
pub fn sample_timeline(start: NaiveDate) -> TimelineReport {
    let durations: [(&str, u32, &str); 7] = [
        ("Assessment and Planning", 2, "Discovery, dependency mapping and plan finalization"),
        ("Environment Setup", 2, "Cloud accounts, network, security and monitoring"),
        ("Pilot Migration", 3, "Migrate pilot workloads and refine the process"),
        ("Data Migration", 2, "Database and file share migration with validation"),
        ("Server Migration", 2, "Replicate and cut over servers in waves"),
        ("Testing and Validation", 3, "End-to-end, performance and acceptance testing"),
        ("Cutover and Go-Live", 2, "Final sync, DNS cutover and go-live checks"),
    ];
    let total_weeks: u32 = durations.iter().map(|(_, w, _)| w).sum();

    let mut phases = Vec::with_capacity(durations.len());
    let mut week = 1;
    for (index, (title, weeks, description)) in durations.iter().enumerate() {
        phases.push(TimelinePhase {
            phase: index as u32 + 1,
            title: (*title).to_string(),
            description: (*description).to_string(),
            duration_weeks: *weeks,
            start_week: week,
            end_week: week + weeks - 1,
            milestones: vec![format!("{title} complete")],
            resources_required: vec!["Migration Engineer".to_string()],
        });
        week += weeks;
    }

    TimelineReport {
        overview: TimelineOverview {
            total_duration_weeks: total_weeks,
            estimated_start_date: start,
            estimated_end_date: add_weeks(start, total_weeks),
            confidence_level: "Low (sample data)".to_string(),
            complexity_score: 0.0,
        },
        phases,
        critical_path: vec![
            "Assessment and Planning".to_string(),
            "Data Migration".to_string(),
            "Cutover and Go-Live".to_string(),
        ],
        ai_insights: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sixteen_weeks_after_march_first_is_june_twenty_first() {
        assert_eq!(add_weeks(date(2024, 3, 1), 16), date(2024, 6, 21));
    }

    #[test]
    fn phases_are_scheduled_back_to_back() {
        let report = sample_timeline(date(2024, 3, 1));
        let schedule = schedule_phases(&report.phases, date(2024, 3, 1));

        assert_eq!(schedule.len(), report.phases.len());
        assert_eq!(schedule[0].starts_on, date(2024, 3, 1));
        // Each phase starts the day its predecessor ends.
        for pair in schedule.windows(2) {
            assert_eq!(pair[0].ends_on, pair[1].starts_on);
        }
        // The last phase ends exactly total_duration_weeks after start.
        assert_eq!(
            schedule.last().unwrap().ends_on,
            add_weeks(date(2024, 3, 1), report.overview.total_duration_weeks)
        );
    }

    #[test]
    fn sample_timeline_totals_sixteen_weeks() {
        let report = sample_timeline(date(2024, 3, 1));
        assert_eq!(report.overview.total_duration_weeks, 16);
        assert_eq!(report.overview.estimated_end_date, date(2024, 6, 21));
        assert!(report.ai_insights.is_none());
    }
}
