//! Degree planning domain models.
//!
//! Provides the data types describing a course catalog and a term-by-term
//! plan produced from it.
//!
//! # Concept Mappings
//!
//! | u-curriculum | Scheduling term | Meaning |
//! |--------------|-----------------|---------|
//! | Course | Task | Unit of work, sized in credit units |
//! | Term | Time bucket | Capacity-limited slot (max credits) |
//! | Prerequisite | Precedence | Must be done in an earlier step |
//! | Category | Priority class | Tie-break for eligible courses |
//! | Plan | Schedule | Term assignments + leftovers |

mod category;
mod course;
mod plan;

pub use category::Category;
pub use course::{Course, PrerequisiteSpec, TrackAffiliation, ALL_TRACKS};
pub use plan::{Plan, PlannedCourse, TermPlan, UnscheduledCourse};
