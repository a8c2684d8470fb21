//! Requirement categories.
//!
//! Every course in the remaining pool is labeled with exactly one category
//! relative to the student's active track. The category decides which
//! courses the scheduler prefers when several are eligible.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Course;

/// Role a course plays in the student's degree.
///
/// Variants are declared in scheduling order: `Core` is placed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Core requirement shared by all tracks.
    #[serde(rename = "Core")]
    Core,
    /// Core requirement of the active track.
    #[serde(rename = "Track Core")]
    TrackCore,
    /// Elective belonging to the active track.
    #[serde(rename = "Track Elective")]
    TrackElective,
    /// Any other elective.
    #[serde(rename = "Elective")]
    Elective,
    /// Neither core nor elective.
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Classifies a course for the active track.
    ///
    /// Precedence (first match wins):
    /// 1. core-required and applies to all tracks → `Core`
    /// 2. core-required and belongs to `track` → `TrackCore`
    /// 3. elective and belongs to `track` → `TrackElective`
    /// 4. elective → `Elective`
    /// 5. otherwise → `Other`
    ///
    /// Track membership compares the label literally, so an all-track
    /// elective is a `TrackElective` when `track` is `"All"`.
    ///
    /// A core course of a different track falls through to `Elective` or
    /// `Other`; the scheduler never sees such courses because they are
    /// excluded from the pool.
    pub fn classify(course: &Course, track: &str) -> Self {
        let own_track = course.track.is_labeled(track);
        if course.core_required && course.track.name().is_none() {
            Self::Core
        } else if course.core_required && own_track {
            Self::TrackCore
        } else if course.elective && own_track {
            Self::TrackElective
        } else if course.elective {
            Self::Elective
        } else {
            Self::Other
        }
    }

    /// Scheduling priority (lower = scheduled sooner).
    pub fn priority(self) -> u8 {
        match self {
            Self::Core => 0,
            Self::TrackCore => 1,
            Self::TrackElective => 2,
            Self::Elective => 3,
            Self::Other => 4,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Core => "Core",
            Self::TrackCore => "Track Core",
            Self::TrackElective => "Track Elective",
            Self::Elective => "Elective",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrackAffiliation;

    fn classify(track: TrackAffiliation, core: bool, elective: bool) -> Category {
        let mut c = Course::new("C").with_track(track);
        c.core_required = core;
        c.elective = elective;
        Category::classify(&c, "Networking")
    }

    #[test]
    fn test_classify_precedence() {
        let own = || TrackAffiliation::track("Networking");
        let other = || TrackAffiliation::track("Security");

        assert_eq!(classify(TrackAffiliation::All, true, true), Category::Core);
        assert_eq!(classify(own(), true, true), Category::TrackCore);
        assert_eq!(classify(own(), false, true), Category::TrackElective);
        assert_eq!(classify(TrackAffiliation::All, false, true), Category::Elective);
        assert_eq!(classify(other(), false, true), Category::Elective);
        assert_eq!(classify(own(), false, false), Category::Other);
        // Core course of another track is not a requirement here
        assert_eq!(classify(other(), true, false), Category::Other);
    }

    #[test]
    fn test_classify_for_all_track_request() {
        let c = Course::new("X").elective();
        assert_eq!(Category::classify(&c, "All"), Category::TrackElective);
        assert_eq!(Category::classify(&c.clone().core(), "All"), Category::Core);
    }

    #[test]
    fn test_priority_order() {
        let all = [
            Category::Core,
            Category::TrackCore,
            Category::TrackElective,
            Category::Elective,
            Category::Other,
        ];
        let priorities: Vec<u8> = all.iter().map(|c| c.priority()).collect();
        assert_eq!(priorities, vec![0, 1, 2, 3, 4]);
        assert!(Category::Core < Category::Other);
    }

    #[test]
    fn test_serde_labels() {
        let json = serde_json::to_string(&Category::TrackElective).unwrap();
        assert_eq!(json, "\"Track Elective\"");
        let back: Category = serde_json::from_str("\"Track Core\"").unwrap();
        assert_eq!(back, Category::TrackCore);
        assert_eq!(Category::Other.to_string(), "Other");
    }
}
