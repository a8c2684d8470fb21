//! Course recommendations.
//!
//! A lighter collaborator of the term scheduler: instead of a full plan it
//! answers "what could I take next?". Courses not yet completed are split
//! into *locked* (some prerequisite missing) and *available*; available
//! courses are ranked by relevance to the student's track.
//!
//! # Scoring
//!
//! | Attribute | Points |
//! |-----------|--------|
//! | Core requirement | +3 |
//! | Belongs to the track | +2 |
//! | Elective | +1 |
//!
//! Ties are broken by course identifier. Unlike the scheduler, the
//! recommender neither filters by track nor expands equivalence groups.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::dispatching::rules::RecommendationScore;
use crate::dispatching::{RuleEngine, SchedulingContext};
use crate::models::Course;
use crate::prereq::PrerequisiteResolver;

/// A recommended course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub course_id: String,
    pub course_name: String,
    pub score: u32,
}

/// A course whose prerequisites are not yet met.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedCourse {
    pub course_id: String,
    /// Unmet prerequisites, in resolution order.
    pub missing: Vec<String>,
}

/// Result of a recommendation query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    /// Available courses, best first.
    pub recommended: Vec<Recommendation>,
    /// Locked courses, in catalog order.
    pub locked: Vec<LockedCourse>,
}

/// Ranks the courses a student could take next.
///
/// # Example
/// ```
/// use u_curriculum::catalog::Catalog;
/// use u_curriculum::models::Course;
/// use u_curriculum::recommend::Recommender;
///
/// let catalog = Catalog::new(vec![
///     Course::new("A").core(),
///     Course::new("B").elective(),
///     Course::new("C").with_prerequisites("A"),
/// ]);
/// let result = Recommender::new().recommend(&catalog, "Security", &[] as &[&str]);
///
/// assert_eq!(result.recommended[0].course_id, "A");
/// assert_eq!(result.locked[0].missing, vec!["A"]);
/// ```
#[derive(Debug, Clone)]
pub struct Recommender {
    resolver: PrerequisiteResolver,
    rule_engine: RuleEngine,
}

impl Recommender {
    /// Creates a recommender with no prerequisite overrides.
    pub fn new() -> Self {
        Self {
            resolver: PrerequisiteResolver::default(),
            rule_engine: RuleEngine::recommendation(),
        }
    }

    /// Sets the prerequisite resolver.
    pub fn with_resolver(mut self, resolver: PrerequisiteResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Recommends courses for a track given the completed courses.
    pub fn recommend<S: AsRef<str>>(
        &self,
        catalog: &Catalog,
        track: &str,
        completed: &[S],
    ) -> Recommendations {
        let done: HashSet<&str> = completed.iter().map(AsRef::as_ref).collect();

        let mut available: Vec<&Course> = Vec::new();
        let mut locked = Vec::new();
        for course in catalog.courses() {
            if done.contains(course.id.as_str()) {
                continue;
            }
            let missing: Vec<String> = self
                .resolver
                .resolve(course)
                .into_iter()
                .filter(|p| !done.contains(p.as_str()))
                .collect();
            if missing.is_empty() {
                available.push(course);
            } else {
                locked.push(LockedCourse {
                    course_id: course.id.clone(),
                    missing,
                });
            }
        }

        let ctx = SchedulingContext::for_track(track);
        let recommended = self
            .rule_engine
            .sort_indices(&available, &ctx)
            .into_iter()
            .map(|i| {
                let course = available[i];
                Recommendation {
                    course_id: course.id.clone(),
                    course_name: course.name.clone(),
                    score: RecommendationScore::score(course, track),
                }
            })
            .collect();

        Recommendations {
            recommended,
            locked,
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrackAffiliation;
    use std::collections::BTreeMap;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Course::new("GEN100").with_name("Writing").with_units(3),
            Course::new("CIS101").with_name("Intro").with_units(3).core(),
            Course::new("NET200")
                .with_name("Routing")
                .with_units(3)
                .elective()
                .with_track(TrackAffiliation::track("Networking")),
            Course::new("SEC200")
                .with_name("Crypto")
                .with_units(3)
                .core()
                .with_track(TrackAffiliation::track("Security")),
            Course::new("NET300")
                .with_name("Advanced Routing")
                .with_units(3)
                .with_track(TrackAffiliation::track("Networking"))
                .with_prerequisites("NET200, CIS101"),
        ])
    }

    fn ids(result: &Recommendations) -> Vec<&str> {
        result
            .recommended
            .iter()
            .map(|r| r.course_id.as_str())
            .collect()
    }

    #[test]
    fn test_ranking() {
        let result = Recommender::new().recommend::<&str>(&catalog(), "Networking", &[]);

        // CIS101: 3, NET200: 2 + 1, SEC200: 3 (other track still listed), GEN100: 0
        assert_eq!(ids(&result), vec!["CIS101", "NET200", "SEC200", "GEN100"]);
        assert_eq!(result.recommended[1].score, 3);
        assert_eq!(result.recommended[3].score, 0);
    }

    #[test]
    fn test_locked_reports_missing() {
        let result = Recommender::new().recommend(&catalog(), "Networking", &["CIS101"]);

        assert_eq!(result.locked.len(), 1);
        assert_eq!(result.locked[0].course_id, "NET300");
        assert_eq!(result.locked[0].missing, vec!["NET200"]);
        assert!(!ids(&result).contains(&"CIS101"));
    }

    #[test]
    fn test_unlocked_after_completion() {
        let result = Recommender::new().recommend(&catalog(), "Networking", &["CIS101", "NET200"]);

        assert!(result.locked.is_empty());
        assert!(ids(&result).contains(&"NET300"));
        let net300 = result
            .recommended
            .iter()
            .find(|r| r.course_id == "NET300")
            .unwrap();
        assert_eq!(net300.score, 2);
    }

    #[test]
    fn test_no_equivalence_expansion() {
        let catalog = Catalog::new(vec![
            Course::new("CIS212").core(),
            Course::new("CIS350").with_prerequisites("CIS212"),
        ]);
        let result = Recommender::new().recommend(&catalog, "Networking", &["COSC236"]);

        assert_eq!(ids(&result), vec!["CIS212"]);
        assert_eq!(result.locked[0].missing, vec!["CIS212"]);
    }

    #[test]
    fn test_override_applies() {
        let mut overrides = BTreeMap::new();
        overrides.insert("NET300".to_string(), Vec::new());
        let recommender =
            Recommender::new().with_resolver(PrerequisiteResolver::new(overrides));
        let result = recommender.recommend::<&str>(&catalog(), "Networking", &[]);

        assert!(result.locked.is_empty());
        assert_eq!(result.recommended.len(), 5);
    }

    #[test]
    fn test_serialize() {
        let result = Recommender::new().recommend(&catalog(), "Networking", &["CIS101"]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["recommended"][0]["course_id"], "NET200");
        assert_eq!(json["locked"][0]["missing"][0], "NET200");
    }
}
