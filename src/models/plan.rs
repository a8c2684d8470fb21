//! Plan (solution) model.
//!
//! A plan is the scheduler's output: an ordered sequence of terms, each
//! holding the courses placed in it, plus the courses that could not be
//! placed within the term horizon.

use serde::{Deserialize, Serialize};

use super::Category;

/// A term-by-term course plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Emitted terms in chronological order.
    pub terms: Vec<TermPlan>,
    /// Courses left in the remaining pool, in catalog order.
    pub unscheduled: Vec<UnscheduledCourse>,
}

/// Courses placed in a single term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermPlan {
    /// Zero-based term number within the horizon.
    pub term_index: usize,
    /// Placed courses, in placement order.
    pub courses: Vec<PlannedCourse>,
    /// Sum of the placed courses' units.
    pub credits: u32,
}

/// A course placed in a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedCourse {
    /// Course identifier.
    pub course_id: String,
    /// Display name.
    pub course_name: String,
    /// Credit units.
    pub units: u32,
    /// Requirement category relative to the active track.
    pub category: Category,
}

/// A course that never became placeable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnscheduledCourse {
    /// Course identifier.
    pub course_id: String,
    /// Display name.
    pub course_name: String,
    /// Requirement category relative to the active track.
    pub category: Category,
}

impl TermPlan {
    /// Creates an empty term.
    pub fn new(term_index: usize) -> Self {
        Self {
            term_index,
            courses: Vec::new(),
            credits: 0,
        }
    }

    /// Appends a course and accumulates its units.
    pub fn push(&mut self, course: PlannedCourse) {
        self.credits += course.units;
        self.courses.push(course);
    }

    /// Whether nothing was placed in this term.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Whether the term contains the given course.
    pub fn contains(&self, course_id: &str) -> bool {
        self.courses.iter().any(|c| c.course_id == course_id)
    }
}

impl Plan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of emitted terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Whether every relevant course was placed.
    pub fn is_complete(&self) -> bool {
        self.unscheduled.is_empty()
    }

    /// Total units across all terms, saturating at `u32::MAX`.
    pub fn total_credits(&self) -> u32 {
        self.terms
            .iter()
            .fold(0u32, |acc, t| acc.saturating_add(t.credits))
    }

    /// Largest single-term load.
    pub fn max_term_credits(&self) -> u32 {
        self.terms.iter().map(|t| t.credits).max().unwrap_or(0)
    }

    /// Finds the term a course was placed in.
    pub fn term_for_course(&self, course_id: &str) -> Option<&TermPlan> {
        self.terms.iter().find(|t| t.contains(course_id))
    }

    /// Whether a course was placed anywhere in the plan.
    pub fn is_scheduled(&self, course_id: &str) -> bool {
        self.term_for_course(course_id).is_some()
    }

    /// Whether a course ended up unscheduled.
    pub fn is_unscheduled(&self, course_id: &str) -> bool {
        self.unscheduled.iter().any(|c| c.course_id == course_id)
    }

    /// All placed courses in plan order.
    pub fn scheduled_courses(&self) -> impl Iterator<Item = &PlannedCourse> {
        self.terms.iter().flat_map(|t| t.courses.iter())
    }
}
