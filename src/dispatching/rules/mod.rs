//! Built-in dispatching rules.
//!
//! - **CATEGORY**: requirement category priority (scheduling)
//! - **RELEVANCE**: weighted relevance score (recommendations)
//!
//! # Score Convention
//! All rules return lower scores for higher priority courses.

use super::{DispatchingRule, RuleScore, SchedulingContext};
use crate::models::{Category, Course};

/// Requirement category priority.
///
/// Scores a course by [`Category::priority`] for the active track:
/// Core = 0, Track Core = 1, Track Elective = 2, Elective = 3, Other = 4.
#[derive(Debug, Clone, Copy)]
pub struct CategoryPriority;

impl DispatchingRule for CategoryPriority {
    fn name(&self) -> &'static str {
        "CATEGORY"
    }

    fn evaluate(&self, course: &Course, context: &SchedulingContext) -> RuleScore {
        RuleScore::from(Category::classify(course, &context.active_track).priority())
    }
}

/// Relevance score for recommendations.
///
/// Adds 3 for a core requirement, 2 when the course belongs to the active
/// track and 1 for an elective. Negated so that higher relevance sorts
/// first.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationScore;

impl RecommendationScore {
    /// The (non-negated) relevance score.
    pub fn score(course: &Course, track: &str) -> u32 {
        let mut score = 0;
        if course.core_required {
            score += 3;
        }
        if course.track.is_labeled(track) {
            score += 2;
        }
        if course.elective {
            score += 1;
        }
        score
    }
}

impl DispatchingRule for RecommendationScore {
    fn name(&self) -> &'static str {
        "RELEVANCE"
    }

    fn evaluate(&self, course: &Course, context: &SchedulingContext) -> RuleScore {
        -RuleScore::from(Self::score(course, &context.active_track))
    }
}
