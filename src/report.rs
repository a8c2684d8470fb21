//! Plan formatting.
//!
//! Turns a [`Plan`] into a presentation-ready [`PlanReport`]: each term gets
//! a "Season Year" label, each course carries its resolved prerequisites,
//! and optional [`PlanKpi`] statistics can be attached.
//!
//! # Serialized shape
//!
//! ```text
//! {
//!   "plan": [{"semester": "Fall 2026", "courses": [...], "credits": 15}],
//!   "unscheduled": [{"course_id": ..., "course_name": ..., "category": ..., "prerequisites": [...]}],
//!   "stats": {...}
//! }
//! ```

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::models::{Category, Plan};
use crate::prereq::PrerequisiteResolver;
use crate::scheduler::{PlanKpi, TERM_HORIZON};

/// Academic season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Fall,
}

impl Season {
    /// Season containing the given date: Spring through June, Fall after.
    pub fn of(date: NaiveDate) -> Self {
        if date.month() <= 6 {
            Season::Spring
        } else {
            Season::Fall
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Spring => write!(f, "Spring"),
            Season::Fall => write!(f, "Fall"),
        }
    }
}

/// Generates human-readable term labels.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use u_curriculum::report::TermLabeler;
///
/// let start = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
/// let labeler = TermLabeler::starting(start, 3);
/// assert_eq!(labeler.label(0), "Fall 2026");
/// assert_eq!(labeler.label(1), "Spring 2027");
/// assert_eq!(labeler.label(2), "Fall 2027");
/// assert_eq!(labeler.label(3), "Term 4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermLabeler {
    labels: Vec<String>,
}

impl TermLabeler {
    /// Generates `count` labels starting from the season containing `date`,
    /// advancing one season per term.
    pub fn starting(date: NaiveDate, count: usize) -> Self {
        let mut season = Season::of(date);
        let mut year = date.year();
        let mut labels = Vec::with_capacity(count);
        for _ in 0..count {
            labels.push(format!("{season} {year}"));
            season = match season {
                Season::Spring => Season::Fall,
                Season::Fall => {
                    year += 1;
                    Season::Spring
                }
            };
        }
        Self { labels }
    }

    /// Labels for the full horizon starting today (local time).
    pub fn current() -> Self {
        Self::starting(Local::now().date_naive(), TERM_HORIZON)
    }

    /// Label of the given zero-based term; `"Term N"` past the generated
    /// sequence.
    pub fn label(&self, term_index: usize) -> String {
        self.labels
            .get(term_index)
            .cloned()
            .unwrap_or_else(|| format!("Term {}", term_index + 1))
    }
}

/// A placed course as presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseReport {
    pub course_id: String,
    pub course_name: String,
    pub units: u32,
    pub category: Category,
    pub prerequisites: Vec<String>,
}

/// One labeled term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermReport {
    pub semester: String,
    pub courses: Vec<CourseReport>,
    pub credits: u32,
}

/// A course that could not be placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnscheduledReport {
    pub course_id: String,
    pub course_name: String,
    pub category: Category,
    pub prerequisites: Vec<String>,
}

/// Presentation-ready plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    pub plan: Vec<TermReport>,
    pub unscheduled: Vec<UnscheduledReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<PlanKpi>,
}

impl PlanReport {
    /// Attaches plan statistics.
    pub fn with_stats(mut self, stats: PlanKpi) -> Self {
        self.stats = Some(stats);
        self
    }
}

impl fmt::Display for PlanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.plan.is_empty() {
            writeln!(f, "No courses could be scheduled.")?;
        }
        for term in &self.plan {
            writeln!(f, "{} ({} credits)", term.semester, term.credits)?;
            for course in &term.courses {
                write!(
                    f,
                    "  {:<10} {:<40} {:>2}  {}",
                    course.course_id, course.course_name, course.units, course.category
                )?;
                if !course.prerequisites.is_empty() {
                    write!(f, "  [requires {}]", course.prerequisites.join(", "))?;
                }
                writeln!(f)?;
            }
        }

        if !self.unscheduled.is_empty() {
            writeln!(f, "Unscheduled:")?;
            for course in &self.unscheduled {
                write!(f, "  {:<10} {}", course.course_id, course.course_name)?;
                if !course.prerequisites.is_empty() {
                    write!(f, "  [requires {}]", course.prerequisites.join(", "))?;
                }
                writeln!(f)?;
            }
        }

        if let Some(stats) = &self.stats {
            writeln!(
                f,
                "{} terms, {} credits scheduled, {:.0}% of catalog credits projected",
                stats.term_count,
                stats.scheduled_credits,
                stats.projected_completion_rate * 100.0
            )?;
        }
        Ok(())
    }
}

/// Builds [`PlanReport`]s from plans.
#[derive(Debug, Clone)]
pub struct PlanFormatter {
    resolver: PrerequisiteResolver,
    labeler: TermLabeler,
}

impl PlanFormatter {
    /// Creates a formatter labeling terms from today's date.
    pub fn new(resolver: PrerequisiteResolver) -> Self {
        Self {
            resolver,
            labeler: TermLabeler::current(),
        }
    }

    /// Replaces the term labeler.
    pub fn with_labeler(mut self, labeler: TermLabeler) -> Self {
        self.labeler = labeler;
        self
    }

    /// Formats a plan; prerequisites are recomputed through the resolver.
    pub fn format(&self, plan: &Plan, catalog: &Catalog) -> PlanReport {
        let terms = plan
            .terms
            .iter()
            .map(|term| TermReport {
                semester: self.labeler.label(term.term_index),
                courses: term
                    .courses
                    .iter()
                    .map(|c| CourseReport {
                        course_id: c.course_id.clone(),
                        course_name: c.course_name.clone(),
                        units: c.units,
                        category: c.category,
                        prerequisites: self.resolver.resolve_id(catalog, &c.course_id),
                    })
                    .collect(),
                credits: term.credits,
            })
            .collect();

        let unscheduled = plan
            .unscheduled
            .iter()
            .map(|c| UnscheduledReport {
                course_id: c.course_id.clone(),
                course_name: c.course_name.clone(),
                category: c.category,
                prerequisites: self.resolver.resolve_id(catalog, &c.course_id),
            })
            .collect();

        PlanReport {
            plan: terms,
            unscheduled,
            stats: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Course;
    use crate::scheduler::{PlanRequest, TermScheduler};
    use std::collections::BTreeMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Course::new("CIS101").with_name("Intro").with_units(3).core(),
            Course::new("CIS201")
                .with_name("Data Structures")
                .with_units(3)
                .core()
                .with_prerequisites("CIS101"),
            Course::new("CIS999")
                .with_name("Capstone")
                .with_units(3)
                .core()
                .with_prerequisites("CIS101; GHOST"),
        ])
    }

    fn formatter() -> PlanFormatter {
        PlanFormatter::new(PrerequisiteResolver::default())
            .with_labeler(TermLabeler::starting(date(2026, 1, 15), TERM_HORIZON))
    }

    #[test]
    fn test_labels_from_spring() {
        let labeler = TermLabeler::starting(date(2026, 6, 30), 4);
        assert_eq!(labeler.label(0), "Spring 2026");
        assert_eq!(labeler.label(1), "Fall 2026");
        assert_eq!(labeler.label(2), "Spring 2027");
        assert_eq!(labeler.label(3), "Fall 2027");
    }

    #[test]
    fn test_labels_from_fall() {
        let labeler = TermLabeler::starting(date(2026, 7, 1), TERM_HORIZON);
        assert_eq!(labeler.label(0), "Fall 2026");
        assert_eq!(labeler.label(7), "Spring 2030");
        assert_eq!(labeler.label(8), "Term 9");
    }

    #[test]
    fn test_empty_labeler_falls_back() {
        let labeler = TermLabeler::starting(date(2026, 1, 1), 0);
        assert_eq!(labeler.label(0), "Term 1");
    }

    #[test]
    fn test_format_plan() {
        let catalog = catalog();
        let request = PlanRequest::new("Networking").with_max_credits(3);
        let plan = TermScheduler::new().schedule(&catalog, &request);
        let report = formatter().format(&plan, &catalog);

        assert_eq!(report.plan.len(), 2);
        assert_eq!(report.plan[0].semester, "Spring 2026");
        assert_eq!(report.plan[1].semester, "Fall 2026");
        assert_eq!(report.plan[1].courses[0].course_id, "CIS201");
        assert_eq!(report.plan[1].courses[0].prerequisites, vec!["CIS101"]);
        assert_eq!(report.plan[1].credits, 3);

        assert_eq!(report.unscheduled.len(), 1);
        assert_eq!(report.unscheduled[0].course_id, "CIS999");
        assert_eq!(report.unscheduled[0].prerequisites, vec!["CIS101", "GHOST"]);
        assert!(report.stats.is_none());
    }

    #[test]
    fn test_format_uses_overrides() {
        let catalog = catalog();
        let mut overrides = BTreeMap::new();
        overrides.insert("CIS201".to_string(), vec!["CIS101".to_string(), "MATH1".to_string()]);
        let resolver = PrerequisiteResolver::new(overrides);
        let plan = TermScheduler::new()
            .with_resolver(resolver.clone())
            .schedule(&catalog, &PlanRequest::new("Networking"));
        let report = PlanFormatter::new(resolver).format(&plan, &catalog);

        let cis201 = report
            .unscheduled
            .iter()
            .find(|c| c.course_id == "CIS201")
            .unwrap();
        assert_eq!(cis201.prerequisites, vec!["CIS101", "MATH1"]);
    }

    #[test]
    fn test_json_shape() {
        let catalog = catalog();
        let plan = TermScheduler::new().schedule(&catalog, &PlanRequest::new("Networking"));
        let stats = PlanKpi::calculate::<&str>(&plan, &catalog, &[]);
        let report = formatter().format(&plan, &catalog).with_stats(stats);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["plan"][0]["semester"], "Spring 2026");
        assert_eq!(json["plan"][0]["courses"][0]["course_id"], "CIS101");
        assert_eq!(json["plan"][0]["courses"][0]["category"], "Core");
        assert_eq!(json["plan"][0]["courses"][1]["course_id"], "CIS201");
        assert_eq!(json["plan"][0]["courses"][1]["prerequisites"][0], "CIS101");
        assert_eq!(json["plan"][0]["credits"], 6);
        assert_eq!(json["unscheduled"][0]["course_name"], "Capstone");
        assert_eq!(json["stats"]["term_count"], 1);

        let without = serde_json::to_value(formatter().format(&plan, &catalog)).unwrap();
        assert!(without.get("stats").is_none());
    }

    #[test]
    fn test_display_text() {
        let catalog = catalog();
        let plan = TermScheduler::new().schedule(&catalog, &PlanRequest::new("Networking"));
        let text = formatter().format(&plan, &catalog).to_string();

        assert!(text.contains("Spring 2026 (6 credits)"));
        assert!(!text.contains("Fall 2026"));
        assert!(text.contains("[requires CIS101]"));
        assert!(text.contains("Unscheduled:"));
        assert!(text.contains("[requires CIS101, GHOST]"));
    }

    #[test]
    fn test_display_empty() {
        let report = formatter().format(&Plan::new(), &Catalog::default());
        assert!(report.to_string().starts_with("No courses could be scheduled."));
    }
}
