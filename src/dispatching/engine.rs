//! Rule engine for multi-criteria course ordering.
//!
//! Rules are applied in sequence: a later rule is consulted only when all
//! earlier rules tie. A final tie-breaker makes the order total.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, DispatchingRule, SchedulingContext};
use crate::models::Course;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Default)]
pub enum TieBreaker {
    /// Leave tied courses in input order (stable sort).
    #[default]
    InputOrder,
    /// Deterministic by course ID (lexicographic).
    ById,
}

/// A composable rule engine for course prioritization.
///
/// # Example
/// ```
/// use u_curriculum::dispatching::{RuleEngine, TieBreaker};
/// use u_curriculum::dispatching::rules;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::CategoryPriority)
///     .with_final_tie_breaker(TieBreaker::ById);
/// assert_eq!(engine.rule_names(), vec!["CATEGORY"]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::InputOrder,
            epsilon: 1e-9,
        }
    }

    /// Term scheduling order: category priority, then course ID.
    pub fn scheduling() -> Self {
        Self::new()
            .with_rule(rules::CategoryPriority)
            .with_final_tie_breaker(TieBreaker::ById)
    }

    /// Recommendation order: relevance score descending, then course ID.
    pub fn recommendation() -> Self {
        Self::new()
            .with_rule(rules::RecommendationScore)
            .with_final_tie_breaker(TieBreaker::ById)
    }

    /// Appends a rule. Rules are consulted in the order they are added.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts courses by priority (highest priority first).
    ///
    /// Returns indices into the original slice.
    pub fn sort_indices(&self, courses: &[&Course], context: &SchedulingContext) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..courses.len()).collect();
        indices.sort_by(|&a, &b| self.compare(courses[a], courses[b], context));
        indices
    }

    /// Compares two courses: `Less` means `a` is taken before `b`.
    pub fn compare(&self, a: &Course, b: &Course, context: &SchedulingContext) -> Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(a, context);
            let score_b = rule.evaluate(b, context);

            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal);
            }
        }

        // All rules tied → use final tie-breaker
        match &self.tie_breaker {
            TieBreaker::InputOrder => Ordering::Equal,
            TieBreaker::ById => a.id.cmp(&b.id),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
