//! Plan quality metrics (KPIs).
//!
//! Computes degree-progress indicators from a generated plan, its catalog
//! and the student's completed courses.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Term count | Number of emitted terms |
//! | Scheduled credits | Sum of units over all terms |
//! | Completed credits | Units of completed catalog courses |
//! | Avg / max term load | Mean and peak credits per term |
//! | Projected completion | (completed + scheduled) / catalog credits |

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::models::Plan;

/// Plan performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanKpi {
    /// Number of emitted terms.
    pub term_count: usize,
    /// Number of courses placed across all terms.
    pub scheduled_courses: usize,
    /// Credits placed across all terms.
    pub scheduled_credits: u32,
    /// Number of courses left unscheduled.
    pub unscheduled_courses: usize,
    /// Units of the completed courses found in the catalog.
    pub completed_credits: u32,
    /// Units of every course in the catalog.
    pub catalog_credits: u32,
    /// Mean credits per emitted term (0.0 for an empty plan).
    pub avg_term_credits: f64,
    /// Heaviest term load.
    pub max_term_credits: u32,
    /// Fraction of catalog credits covered once the plan is finished
    /// (0.0..=1.0).
    pub projected_completion_rate: f64,
}

impl PlanKpi {
    /// Computes KPIs for a plan.
    ///
    /// # Arguments
    /// * `plan` - The generated plan.
    /// * `catalog` - The catalog the plan was built from.
    /// * `completed` - The student's completed course identifiers.
    pub fn calculate<S: AsRef<str>>(plan: &Plan, catalog: &Catalog, completed: &[S]) -> Self {
        let scheduled_credits = plan.total_credits();
        let completed_credits = catalog.units_of(completed.iter().map(AsRef::as_ref));
        let catalog_credits = catalog.total_units();

        let avg_term_credits = if plan.terms.is_empty() {
            0.0
        } else {
            f64::from(scheduled_credits) / plan.terms.len() as f64
        };

        let projected_completion_rate = if catalog_credits == 0 {
            0.0
        } else {
            let covered = f64::from(completed_credits) + f64::from(scheduled_credits);
            (covered / f64::from(catalog_credits)).min(1.0)
        };

        Self {
            term_count: plan.term_count(),
            scheduled_courses: plan.scheduled_courses().count(),
            scheduled_credits,
            unscheduled_courses: plan.unscheduled.len(),
            completed_credits,
            catalog_credits,
            avg_term_credits,
            max_term_credits: plan.max_term_credits(),
            projected_completion_rate,
        }
    }
}
