//! Fairness-aware greedy roster assigner.
//!
//! # Algorithm
//!
//! 1. Start every employee's fairness counter at zero.
//! 2. Walk the date range day by day (inclusive).
//! 3. For each zone, for each requirement recurring on that weekday:
//!    a. Collect employees holding the role whose workable availability
//!       covers the shift window. A requirement with a blank role or a
//!       non-positive window has no candidates.
//!    b. Order them by fairness counter ascending; equal counters are
//!       ordered by the configured [`TieBreak`].
//!    c. Assign the first `min(required_count, eligible)` and bump their
//!       counters.
//!    d. Record a [`StaffingGap`] for any shortfall.
//!
//! The result depends only on the inputs, their order, and the options.
//! It is a heuristic: no attempt is made at globally optimal coverage.
//!
//! # Complexity
//! O(d * r * (e log e)) where d=days, r=requirements per day, e=employees.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashMap;

use super::{AssignerOptions, FairnessTracker, OverlapPolicy, TieBreak};
use crate::models::{
    Employee, RosterSchedule, ShiftAssignment, ShiftWindow, StaffingGap, Weekday, Zone,
    ZoneRequirement,
};

/// Greedy shift assigner with a fairness tie-break.
///
/// Holds only configuration. All run state lives inside a single
/// [`assign`](Self::assign) call, so one assigner can serve concurrent
/// runs for different organizations.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use u_roster::models::{Employee, Weekday, Zone, ZoneRequirement};
/// use u_roster::scheduler::RosterAssigner;
///
/// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let five = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
/// let employees = vec![
///     Employee::new("E1").with_role("server").available_on(Weekday::Monday, nine, five),
/// ];
/// let requirement = ZoneRequirement::new(Weekday::Monday, "server", 1, nine, five);
/// let zones = vec![Zone::new("Z1").with_requirement(requirement)];
/// let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
///
/// let schedule = RosterAssigner::new().assign(&employees, &zones, monday, monday);
/// assert_eq!(schedule.assignment_count(), 1);
/// assert!(schedule.is_fully_staffed());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RosterAssigner {
    options: AssignerOptions,
}

/// Mutable state scoped to one run.
struct RunState<'a> {
    fairness: FairnessTracker,
    rng: Option<StdRng>,
    /// Windows booked per employee on the current date.
    booked: HashMap<&'a str, Vec<ShiftWindow>>,
}

impl RosterAssigner {
    /// Creates an assigner with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an assigner with the given options.
    pub fn with_options(options: AssignerOptions) -> Self {
        Self { options }
    }

    /// Active options.
    pub fn options(&self) -> &AssignerOptions {
        &self.options
    }

    /// Rosters `employees` onto `zones` for every date in
    /// `[start_date, end_date]`.
    ///
    /// A reversed range yields an empty schedule.
    pub fn assign(
        &self,
        employees: &[Employee],
        zones: &[Zone],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RosterSchedule {
        self.assign_with_fairness(employees, zones, start_date, end_date)
            .0
    }

    /// Like [`assign`](Self::assign), also returning the final fairness
    /// counters of the run.
    pub fn assign_with_fairness(
        &self,
        employees: &[Employee],
        zones: &[Zone],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> (RosterSchedule, FairnessTracker) {
        let mut schedule = RosterSchedule::new();
        let mut state = RunState {
            fairness: FairnessTracker::new(employees),
            rng: match self.options.tie_break {
                TieBreak::Seeded(seed) => Some(StdRng::seed_from_u64(seed)),
                _ => None,
            },
            booked: HashMap::new(),
        };

        if start_date > end_date {
            tracing::debug!(%start_date, %end_date, "reversed date range; nothing to schedule");
            return (schedule, state.fairness);
        }

        for date in start_date.iter_days().take_while(|d| *d <= end_date) {
            let day = Weekday::of(date);
            state.booked.clear();

            for zone in zones {
                for requirement in zone.requirements_on(day) {
                    self.fill_requirement(
                        employees,
                        zone,
                        requirement,
                        date,
                        day,
                        &mut state,
                        &mut schedule,
                    );
                }
            }
        }

        tracing::info!(
            assignments = schedule.assignment_count(),
            gaps = schedule.gaps.len(),
            required_slots = schedule.required_slots,
            "roster assignment complete"
        );

        (schedule, state.fairness)
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_requirement<'a>(
        &self,
        employees: &'a [Employee],
        zone: &Zone,
        requirement: &ZoneRequirement,
        date: NaiveDate,
        day: Weekday,
        state: &mut RunState<'a>,
        schedule: &mut RosterSchedule,
    ) {
        let required = requirement.required_count;
        schedule.required_slots += u64::from(required);
        if required == 0 {
            return;
        }

        let window = requirement.window();
        let mut candidates: Vec<&'a Employee> = if requirement.is_fillable() {
            employees
                .iter()
                .filter(|e| e.is_eligible(&requirement.role, day, &window))
                .filter(|e| self.is_free(state, e, &window))
                .collect()
        } else {
            Vec::new()
        };
        self.rank(&mut candidates, state);

        let take = candidates.len().min(required as usize);
        for &employee in &candidates[..take] {
            schedule.add_assignment(ShiftAssignment::new(
                &employee.id,
                &zone.id,
                date,
                &requirement.role,
                window,
            ));
            state.fairness.record(&employee.id);
            state
                .booked
                .entry(employee.id.as_str())
                .or_default()
                .push(window);
        }

        // take <= required, which fits in u32
        let assigned = take as u32;
        if assigned < required {
            tracing::debug!(
                zone_id = %zone.id,
                %date,
                role = %requirement.role,
                required,
                assigned,
                "staffing gap"
            );
            schedule.add_gap(StaffingGap {
                zone_id: zone.id.clone(),
                zone_name: zone.name.clone(),
                date,
                role: requirement.role.clone(),
                required,
                assigned,
                shortfall: required - assigned,
            });
        }
    }

    fn is_free(&self, state: &RunState<'_>, employee: &Employee, window: &ShiftWindow) -> bool {
        match self.options.overlap {
            OverlapPolicy::Permit => true,
            OverlapPolicy::Reject => state
                .booked
                .get(employee.id.as_str())
                .map_or(true, |booked| !booked.iter().any(|w| w.overlaps(window))),
        }
    }

    /// Orders candidates by fairness counter, then by tie-break.
    fn rank(&self, candidates: &mut [&Employee], state: &mut RunState<'_>) {
        if let Some(rng) = state.rng.as_mut() {
            candidates.shuffle(rng);
        }

        let fairness = &state.fairness;
        match self.options.tie_break {
            TieBreak::InputOrder | TieBreak::Seeded(_) => {
                candidates.sort_by_key(|e| fairness.count(&e.id));
            }
            TieBreak::EmployeeId => {
                candidates.sort_by(|a, b| {
                    fairness
                        .count(&a.id)
                        .cmp(&fairness.count(&b.id))
                        .then_with(|| a.id.cmp(&b.id))
                });
            }
        }
    }
}
