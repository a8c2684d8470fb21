//! Term-by-term greedy scheduler.
//!
//! # Algorithm
//!
//! 1. Expand the completed courses across equivalence groups (done set).
//! 2. Pool = catalog courses relevant to the track and not yet done.
//! 3. For each term (at most [`TERM_HORIZON`]), while credits < max:
//!    a. available = pool courses whose prerequisites are all done;
//!    b. order by (category priority, course id);
//!    c. place the first course that fits under the credit limit;
//!    d. mark it done together with its equivalence group and remove the
//!       whole group from the pool;
//!    e. once the term holds [`EARLY_EXIT_CREDITS`] or more, end it as soon
//!       as no available course could still fit.
//! 4. Stop when the pool is empty or a term places nothing.
//!
//! # Complexity
//! O(T * n² log n) where T = term horizon, n = pool size.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::dispatching::{RuleEngine, SchedulingContext};
use crate::equivalence::EquivalenceGroups;
use crate::models::{Category, Course, Plan, PlannedCourse, TermPlan, UnscheduledCourse};
use crate::prereq::{PrerequisiteMap, PrerequisiteResolver};

/// Number of terms in the planning horizon (four years, two terms each).
pub const TERM_HORIZON: usize = 8;

/// Term load after which a term ends as soon as nothing else fits.
pub const EARLY_EXIT_CREDITS: u32 = 15;

/// Default per-term credit limit.
pub const DEFAULT_MAX_CREDITS: u32 = 18;

/// Input for a planning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Track the student follows.
    pub track: String,
    /// Courses the student has already completed.
    pub completed_courses: Vec<String>,
    /// Per-term credit limit.
    pub max_credits: u32,
}

impl PlanRequest {
    /// Creates a request with no completed courses and the default limit.
    pub fn new(track: impl Into<String>) -> Self {
        Self {
            track: track.into(),
            completed_courses: Vec::new(),
            max_credits: DEFAULT_MAX_CREDITS,
        }
    }

    /// Sets the completed courses.
    pub fn with_completed<I, S>(mut self, course_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.completed_courses = course_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the per-term credit limit.
    pub fn with_max_credits(mut self, max_credits: u32) -> Self {
        self.max_credits = max_credits;
        self
    }
}

/// A course waiting in the remaining pool.
#[derive(Debug, Clone, Copy)]
struct PoolEntry<'c> {
    course: &'c Course,
    category: Category,
}

/// Greedy term scheduler.
///
/// Holds only immutable configuration; every [`schedule`](Self::schedule)
/// call owns its done set and remaining pool, so one scheduler can serve
/// concurrent runs.
///
/// # Example
///
/// ```
/// use u_curriculum::catalog::Catalog;
/// use u_curriculum::models::Course;
/// use u_curriculum::scheduler::{PlanRequest, TermScheduler};
///
/// let catalog = Catalog::new(vec![
///     Course::new("X").with_units(3).core(),
///     Course::new("Y").with_units(3).core().with_prerequisites("X"),
/// ]);
/// let request = PlanRequest::new("Networking").with_max_credits(3);
/// let plan = TermScheduler::new().schedule(&catalog, &request);
///
/// assert_eq!(plan.term_count(), 2);
/// assert_eq!(plan.terms[0].courses[0].course_id, "X");
/// assert_eq!(plan.terms[1].courses[0].course_id, "Y");
/// assert!(plan.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct TermScheduler {
    resolver: PrerequisiteResolver,
    groups: EquivalenceGroups,
    rule_engine: RuleEngine,
}

impl TermScheduler {
    /// Creates a scheduler with no prerequisite overrides, the built-in
    /// equivalence groups and the (category, id) ordering.
    pub fn new() -> Self {
        Self {
            resolver: PrerequisiteResolver::default(),
            groups: EquivalenceGroups::builtin(),
            rule_engine: RuleEngine::scheduling(),
        }
    }

    /// Sets the prerequisite resolver.
    pub fn with_resolver(mut self, resolver: PrerequisiteResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Sets the equivalence groups.
    pub fn with_equivalence_groups(mut self, groups: EquivalenceGroups) -> Self {
        self.groups = groups;
        self
    }

    /// Sets the rule engine used to order eligible courses.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// The prerequisite resolver in use.
    pub fn resolver(&self) -> &PrerequisiteResolver {
        &self.resolver
    }

    /// The equivalence groups in use.
    pub fn equivalence_groups(&self) -> &EquivalenceGroups {
        &self.groups
    }

    /// Builds a term-by-term plan.
    ///
    /// Never fails: an empty catalog or unknown track yields an empty plan,
    /// and a credit limit too small for any course leaves every relevant
    /// course unscheduled.
    pub fn schedule(&self, catalog: &Catalog, request: &PlanRequest) -> Plan {
        let track = request.track.as_str();
        let prerequisites = self.resolver.build_map(catalog.courses());
        let mut done = self.groups.normalize(request.completed_courses.iter().cloned());

        let mut pool: Vec<PoolEntry<'_>> = catalog
            .courses()
            .iter()
            .filter(|c| c.track.applies_to(track) && !done.contains(&c.id))
            .map(|course| PoolEntry {
                course,
                category: Category::classify(course, track),
            })
            .collect();
        let pool_size = pool.len();

        let mut plan = Plan::new();
        for term_index in 0..TERM_HORIZON {
            let mut ctx = SchedulingContext::for_track(track)
                .at_term(term_index)
                .with_max_credits(request.max_credits);
            let term = self.fill_term(&mut ctx, &mut pool, &mut done, &prerequisites);

            // Nothing changed, so every later term would come out empty too
            if term.is_empty() {
                break;
            }
            info!(
                term = term_index,
                courses = term.courses.len(),
                credits = term.credits,
                "term planned"
            );
            plan.terms.push(term);

            if pool.is_empty() {
                break;
            }
        }

        plan.unscheduled = pool
            .iter()
            .map(|entry| UnscheduledCourse {
                course_id: entry.course.id.clone(),
                course_name: entry.course.name.clone(),
                category: entry.category,
            })
            .collect();

        info!(
            track,
            max_credits = request.max_credits,
            pool = pool_size,
            terms = plan.term_count(),
            credits = plan.total_credits(),
            unscheduled = plan.unscheduled.len(),
            "plan generated"
        );
        plan
    }

    /// Places courses into one term until it is full or nothing fits.
    fn fill_term<'c>(
        &self,
        ctx: &mut SchedulingContext,
        pool: &mut Vec<PoolEntry<'c>>,
        done: &mut HashSet<String>,
        prerequisites: &PrerequisiteMap,
    ) -> TermPlan {
        let mut term = TermPlan::new(ctx.term_index);

        while ctx.term_credits < ctx.max_credits {
            let mut ready = available(pool, prerequisites, done);
            if ready.is_empty() {
                break;
            }

            ready.sort_by(|a, b| self.rule_engine.compare(a.course, b.course, ctx));
            let Some(entry) = ready
                .into_iter()
                .find(|e| e.course.units <= ctx.remaining_credits())
            else {
                break;
            };

            let course = entry.course;
            term.push(PlannedCourse {
                course_id: course.id.clone(),
                course_name: course.name.clone(),
                units: course.units,
                category: entry.category,
            });
            ctx.term_credits = term.credits;

            let satisfied = self.groups.close(&course.id, done);
            pool.retain(|e| !satisfied.contains(&e.course.id));
            debug!(
                term = ctx.term_index,
                course_id = %course.id,
                units = course.units,
                category = %entry.category,
                credits = ctx.term_credits,
                "course placed"
            );

            if ctx.term_credits >= EARLY_EXIT_CREDITS {
                let can_fit_more = available(pool, prerequisites, done)
                    .iter()
                    .any(|e| e.course.units <= ctx.remaining_credits());
                if !can_fit_more {
                    debug!(
                        term = ctx.term_index,
                        credits = ctx.term_credits,
                        "term closed early"
                    );
                    break;
                }
            }
        }

        term
    }
}

impl Default for TermScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Pool entries whose prerequisites are all done, in pool order.
fn available<'c>(
    pool: &[PoolEntry<'c>],
    prerequisites: &PrerequisiteMap,
    done: &HashSet<String>,
) -> Vec<PoolEntry<'c>> {
    pool.iter()
        .filter(|e| prerequisites.is_satisfied(&e.course.id, done))
        .copied()
        .collect()
}
