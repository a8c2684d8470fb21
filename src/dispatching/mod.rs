//! Dispatching rules and rule engine for course ordering.
//!
//! When several courses are eligible at once, the scheduler takes them in
//! the order produced here. The default order is requirement category
//! (Core → Track Core → Track Elective → Elective → Other) with the course
//! identifier as a deterministic tie-break.
//!
//! # Usage
//!
//! ```
//! use u_curriculum::dispatching::{RuleEngine, SchedulingContext, TieBreaker};
//! use u_curriculum::dispatching::rules;
//! use u_curriculum::models::Course;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::CategoryPriority)
//!     .with_final_tie_breaker(TieBreaker::ById);
//!
//! let elective = Course::new("A100").elective();
//! let core = Course::new("Z900").core();
//! let ctx = SchedulingContext::for_track("Networking");
//!
//! let order = engine.sort_indices(&[&elective, &core], &ctx);
//! assert_eq!(order, vec![1, 0]); // core first despite its larger id
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::SchedulingContext;
pub use engine::{RuleEngine, TieBreaker};

use crate::models::Course;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (scheduled first).
pub type RuleScore = f64;

/// A dispatching rule that evaluates course priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for courses that should be taken first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "CATEGORY").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a course given the current context.
    ///
    /// Returns a score where lower = higher priority.
    fn evaluate(&self, course: &Course, context: &SchedulingContext) -> RuleScore;
}
