//! Scheduling run orchestration.
//!
//! A run loads employees and zones concurrently, validates them, and
//! hands them to a fresh assigner pass. Loader failures and duplicate IDs
//! abort the run before any assignment happens, so no partial schedule is
//! produced. Suspicious but legal data (blank roles, empty windows) is
//! logged and left to the assigner, which reports it as staffing gaps.
//!
//! Every run owns its fairness state. One service can execute runs for
//! different organizations concurrently.

use crate::analysis::{
    ChatNarrativeGenerator, NarrativeGenerator, ScheduleAnalysis, ScheduleAnalyzer,
};
use crate::config::RosterConfig;
use crate::error::RosterError;
use crate::models::{RosterSchedule, RunRequest};
use crate::scheduler::{AssignerOptions, RosterAssigner};
use crate::source::{AvailabilitySource, RequirementSource};
use crate::validation::{input_warnings, validate_input};

/// Loads, validates, assigns, and optionally analyzes.
#[derive(Debug, Clone)]
pub struct RosterService<A, R, G = ChatNarrativeGenerator> {
    employees: A,
    zones: R,
    assigner: RosterAssigner,
    analyzer: ScheduleAnalyzer<G>,
}

impl<A, R> RosterService<A, R>
where
    A: AvailabilitySource,
    R: RequirementSource,
{
    /// Creates a service with default options and no narrative.
    pub fn new(employees: A, zones: R) -> Self {
        Self {
            employees,
            zones,
            assigner: RosterAssigner::new(),
            analyzer: ScheduleAnalyzer::default(),
        }
    }

    /// Creates a service from configuration.
    pub fn from_config(employees: A, zones: R, config: &RosterConfig) -> Self {
        Self {
            employees,
            zones,
            assigner: RosterAssigner::with_options(config.assignment),
            analyzer: ScheduleAnalyzer::from_config(&config.narrative),
        }
    }
}

impl<A, R, G> RosterService<A, R, G>
where
    A: AvailabilitySource,
    R: RequirementSource,
    G: NarrativeGenerator,
{
    /// Replaces the assignment options.
    pub fn with_options(mut self, options: AssignerOptions) -> Self {
        self.assigner = RosterAssigner::with_options(options);
        self
    }

    /// Replaces the analyzer.
    pub fn with_analyzer<H: NarrativeGenerator>(
        self,
        analyzer: ScheduleAnalyzer<H>,
    ) -> RosterService<A, R, H> {
        RosterService {
            employees: self.employees,
            zones: self.zones,
            assigner: self.assigner,
            analyzer,
        }
    }

    /// Active assigner.
    pub fn assigner(&self) -> &RosterAssigner {
        &self.assigner
    }

    /// Produces a schedule for the request.
    ///
    /// # Errors
    /// - [`RosterError::DataUnavailable`] if either loader fails.
    /// - [`RosterError::InvalidInput`] if employee or zone IDs repeat.
    pub async fn run(&self, request: &RunRequest) -> Result<RosterSchedule, RosterError> {
        let organization_id = request.organization_id.as_str();
        tracing::info!(
            organization_id,
            start_date = %request.start_date,
            end_date = %request.end_date,
            "starting roster run"
        );

        let (employees, zones) = tokio::try_join!(
            async {
                self.employees
                    .load_employees(organization_id)
                    .await
                    .map_err(|source| RosterError::DataUnavailable {
                        what: "employees",
                        organization_id: organization_id.to_string(),
                        source,
                    })
            },
            async {
                self.zones
                    .load_zones(organization_id)
                    .await
                    .map_err(|source| RosterError::DataUnavailable {
                        what: "zones",
                        organization_id: organization_id.to_string(),
                        source,
                    })
            },
        )
        .inspect_err(|error| tracing::error!(organization_id, %error, "roster run aborted"))?;

        tracing::debug!(
            organization_id,
            employees = employees.len(),
            zones = zones.len(),
            "roster inputs loaded"
        );

        validate_input(&employees, &zones).map_err(|errors| {
            tracing::error!(
                organization_id,
                count = errors.len(),
                "roster input failed validation"
            );
            RosterError::InvalidInput(errors)
        })?;
        for warning in input_warnings(&employees, &zones) {
            tracing::warn!(organization_id, %warning, "suspicious roster input");
        }

        let schedule = self
            .assigner
            .assign(&employees, &zones, request.start_date, request.end_date);

        if !schedule.is_fully_staffed() {
            tracing::warn!(
                organization_id,
                gaps = schedule.gaps.len(),
                shortfall = schedule.total_shortfall(),
                "roster has staffing gaps"
            );
        }

        Ok(schedule)
    }

    /// Produces a schedule and its analysis.
    pub async fn run_and_analyze(
        &self,
        request: &RunRequest,
    ) -> Result<(RosterSchedule, ScheduleAnalysis), RosterError> {
        let schedule = self.run(request).await?;
        let analysis = self.analyzer.analyze(&schedule).await;
        Ok((schedule, analysis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::NARRATIVE_UNAVAILABLE;
    use crate::error::SourceError;
    use crate::models::{AvailabilityEntry, Employee, Weekday, Zone, ZoneRequirement};
    use crate::source::InMemorySource;
    use crate::validation::ValidationErrorKind;
    use chrono::{NaiveDate, NaiveTime};

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn source() -> InMemorySource {
        InMemorySource::new().with_organization(
            "org-1",
            vec![
                Employee::new("E1")
                    .with_role("server")
                    .available_on(Weekday::Monday, hm(9, 0), hm(17, 0)),
                Employee::new("E2")
                    .with_role("server")
                    .available_on(Weekday::Monday, hm(9, 0), hm(17, 0)),
            ],
            vec![Zone::new("Z1").with_requirement(ZoneRequirement::new(
                Weekday::Monday,
                "server",
                1,
                hm(9, 0),
                hm(17, 0),
            ))],
        )
    }

    /// Fails every zone load.
    struct BrokenZones;

    impl RequirementSource for BrokenZones {
        async fn load_zones(&self, organization_id: &str) -> Result<Vec<Zone>, SourceError> {
            Err(SourceError::UnknownOrganization {
                organization_id: organization_id.to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_run_produces_schedule() {
        let service = RosterService::new(source(), source());
        let schedule = service
            .run(&RunRequest::new("org-1", monday(), monday()))
            .await
            .unwrap();
        assert_eq!(schedule.assignment_count(), 1);
        assert_eq!(schedule.assignments[0].employee_id, "E1");
    }

    #[tokio::test]
    async fn test_loader_failure_is_data_unavailable() {
        let service = RosterService::new(source(), BrokenZones);
        let err = service
            .run(&RunRequest::new("org-1", monday(), monday()))
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::DataUnavailable { what: "zones", .. }));
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_rejected() {
        let source = InMemorySource::new().with_organization(
            "org-1",
            vec![Employee::new("E1"), Employee::new("E1")],
            vec![],
        );
        let service = RosterService::new(source.clone(), source);
        let err = service
            .run(&RunRequest::new("org-1", monday(), monday()))
            .await
            .unwrap_err();
        let RosterError::InvalidInput(errors) = &err else {
            panic!("expected invalid input, got {err:?}");
        };
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
    }

    #[tokio::test]
    async fn test_suspicious_input_still_schedules() {
        // A zero-length day-off row and a blank-role requirement are legal:
        // the run succeeds and the blank role surfaces as a gap.
        let source = InMemorySource::new().with_organization(
            "org-1",
            vec![Employee::new("E1")
                .with_role("server")
                .available_on(Weekday::Monday, hm(9, 0), hm(17, 0))
                .with_availability(AvailabilityEntry::unavailable(
                    Weekday::Sunday,
                    hm(0, 0),
                    hm(0, 0),
                ))],
            vec![Zone::new("Z1")
                .with_requirement(ZoneRequirement::new(
                    Weekday::Monday,
                    "server",
                    1,
                    hm(9, 0),
                    hm(17, 0),
                ))
                .with_requirement(ZoneRequirement::new(
                    Weekday::Monday,
                    " ",
                    1,
                    hm(9, 0),
                    hm(17, 0),
                ))],
        );
        let service = RosterService::new(source.clone(), source);
        let schedule = service
            .run(&RunRequest::new("org-1", monday(), monday()))
            .await
            .unwrap();

        assert_eq!(schedule.assignment_count(), 1);
        assert_eq!(schedule.gaps.len(), 1);
        assert_eq!(schedule.gaps[0].role, " ");
        assert_eq!(schedule.gaps[0].shortfall, 1);
    }

    #[tokio::test]
    async fn test_run_and_analyze_without_narrative() {
        let service = RosterService::new(source(), source());
        let (schedule, analysis) = service
            .run_and_analyze(&RunRequest::new("org-1", monday(), monday()))
            .await
            .unwrap();
        assert_eq!(analysis.metrics.total_shifts, schedule.assignment_count());
        assert_eq!(analysis.narrative, NARRATIVE_UNAVAILABLE);
    }
}
