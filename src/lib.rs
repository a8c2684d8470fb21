//! Term-by-term degree planning.
//!
//! Assigns the remaining courses of a catalog to future terms for a single
//! student, respecting prerequisites, a per-term credit limit and the
//! requirement priorities of the student's track.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `TrackAffiliation`, `Category`,
//!   `Plan`, `TermPlan`
//! - **`catalog`**: Read-only course catalog (CSV or JSON)
//! - **`prereq`**: Prerequisite resolution with curated overrides
//! - **`equivalence`**: Interchangeable-course groups and closure
//! - **`dispatching`**: Priority rules and the `RuleEngine` ordering
//! - **`scheduler`**: Greedy `TermScheduler` and `PlanKpi`
//! - **`report`**: Term labels and presentation-ready reports
//! - **`recommend`**: Relevance-ranked next-course recommendations
//! - **`validation`**: Advisory catalog diagnostics (duplicate IDs, DAG cycles)
//! - **`config`**: TOML planner configuration
//! - **`cli`**: Command-line front end
//!
//! # Example
//!
//! ```
//! use u_curriculum::{Catalog, Course, PlanRequest, TermScheduler};
//!
//! let catalog = Catalog::new(vec![
//!     Course::new("CIS101").with_units(3).core(),
//!     Course::new("CIS201").with_units(3).core().with_prerequisites("CIS101"),
//! ]);
//! let request = PlanRequest::new("Networking").with_max_credits(18);
//! let plan = TermScheduler::new().schedule(&catalog, &request);
//!
//! // CIS201 unlocks once CIS101 is placed and shares its term
//! assert_eq!(plan.term_count(), 1);
//! assert_eq!(plan.terms[0].credits, 6);
//! assert!(plan.unscheduled.is_empty());
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod dispatching;
pub mod equivalence;
pub mod error;
pub mod models;
pub mod prereq;
pub mod recommend;
pub mod report;
pub mod scheduler;
pub mod validation;

pub use catalog::Catalog;
pub use config::{load_planner_config, PlannerConfig};
pub use equivalence::EquivalenceGroups;
pub use error::{CatalogError, ConfigError};
pub use models::{Category, Course, Plan, TrackAffiliation};
pub use prereq::PrerequisiteResolver;
pub use recommend::Recommender;
pub use report::{PlanFormatter, PlanReport};
pub use scheduler::{PlanKpi, PlanRequest, TermScheduler};
