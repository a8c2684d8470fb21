//! Greedy term scheduler and plan KPI evaluation.
//!
//! # Algorithm
//!
//! `TermScheduler` fills one term at a time with a greedy, priority-driven,
//! first-fit heuristic: among the courses whose prerequisites are done, it
//! repeatedly takes the highest-priority course that still fits under the
//! credit limit. It is not optimal (no backtracking, no knapsack search),
//! but it is fast and fully deterministic.
//!
//! # KPI
//!
//! `PlanKpi` summarizes a plan: term count, credits scheduled, load
//! balance and degree progress.

mod kpi;
mod term;

pub use kpi::PlanKpi;
pub use term::{
    PlanRequest, TermScheduler, DEFAULT_MAX_CREDITS, EARLY_EXIT_CREDITS, TERM_HORIZON,
};
