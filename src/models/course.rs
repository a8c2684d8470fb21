//! Course model.
//!
//! A course is the unit being scheduled: it consumes credit units in the
//! term it is placed in and may depend on other courses being done first.
//!
//! Courses are immutable once loaded from the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal used by catalogs for courses that apply to every track.
pub const ALL_TRACKS: &str = "All";

/// A catalog course.
///
/// Field names serialize the way catalog records name them
/// (`course_id`, `course_name`, ...).
///
/// # Example
///
/// ```
/// use u_curriculum::models::{Course, TrackAffiliation};
///
/// let course = Course::new("CIS350")
///     .with_name("Data Communication")
///     .with_units(3)
///     .with_track(TrackAffiliation::track("Networking"))
///     .core()
///     .with_prerequisites("CIS212; MATH263");
///
/// assert_eq!(course.units, 3);
/// assert!(course.track.applies_to("Networking"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier (e.g. `COSC236`).
    #[serde(rename = "course_id")]
    pub id: String,
    /// Display name.
    #[serde(rename = "course_name")]
    pub name: String,
    /// Credit units consumed when the course is taken.
    pub units: u32,
    /// Track this course belongs to.
    pub track: TrackAffiliation,
    /// Whether the course is a required core course.
    #[serde(default)]
    pub core_required: bool,
    /// Whether the course counts as an elective.
    #[serde(default)]
    pub elective: bool,
    /// Raw prerequisite specification as found in the catalog.
    #[serde(default)]
    pub prerequisites: PrerequisiteSpec,
}

impl Course {
    /// Creates a course with the given identifier.
    ///
    /// Defaults: no name, zero units, applies to all tracks, neither core
    /// nor elective, no prerequisites.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            units: 0,
            track: TrackAffiliation::All,
            core_required: false,
            elective: false,
            prerequisites: PrerequisiteSpec::default(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the credit units.
    pub fn with_units(mut self, units: u32) -> Self {
        self.units = units;
        self
    }

    /// Sets the track affiliation.
    pub fn with_track(mut self, track: TrackAffiliation) -> Self {
        self.track = track;
        self
    }

    /// Marks the course as core-required.
    pub fn core(mut self) -> Self {
        self.core_required = true;
        self
    }

    /// Marks the course as an elective.
    pub fn elective(mut self) -> Self {
        self.elective = true;
        self
    }

    /// Sets the raw prerequisite text (comma/semicolon separated).
    pub fn with_prerequisites(mut self, text: impl Into<String>) -> Self {
        self.prerequisites = PrerequisiteSpec::Text(text.into());
        self
    }

    /// Sets an explicit prerequisite list.
    pub fn with_prerequisite_list<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = PrerequisiteSpec::List(ids.into_iter().map(Into::into).collect());
        self
    }
}

/// Which track(s) a course belongs to.
///
/// Serialized as a plain string: `"All"` or the track name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrackAffiliation {
    /// Applies to every track.
    All,
    /// Belongs to one named track.
    Track(String),
}

impl TrackAffiliation {
    /// Affiliation to a single named track.
    ///
    /// The literal `"All"` maps to [`TrackAffiliation::All`].
    pub fn track(name: impl Into<String>) -> Self {
        Self::from(name.into())
    }

    /// Whether a student on `track` should take this course into account.
    pub fn applies_to(&self, track: &str) -> bool {
        match self {
            Self::All => true,
            Self::Track(name) => name == track,
        }
    }

    /// Whether the course belongs specifically to `track`.
    pub fn is_track(&self, track: &str) -> bool {
        matches!(self, Self::Track(name) if name == track)
    }

    /// Whether the track label reads exactly `track`.
    ///
    /// Unlike [`is_track`](Self::is_track), an all-track course matches a
    /// requested track literally named `"All"`.
    pub fn is_labeled(&self, track: &str) -> bool {
        match self {
            Self::All => track == ALL_TRACKS,
            Self::Track(name) => name == track,
        }
    }

    /// The track name, or `None` for all-track courses.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Track(name) => Some(name),
        }
    }
}

impl From<String> for TrackAffiliation {
    fn from(value: String) -> Self {
        if value == ALL_TRACKS {
            Self::All
        } else {
            Self::Track(value)
        }
    }
}

impl From<TrackAffiliation> for String {
    fn from(value: TrackAffiliation) -> Self {
        match value {
            TrackAffiliation::All => ALL_TRACKS.to_string(),
            TrackAffiliation::Track(name) => name,
        }
    }
}

impl fmt::Display for TrackAffiliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_TRACKS),
            Self::Track(name) => f.write_str(name),
        }
    }
}

/// Raw prerequisite specification.
///
/// Catalogs carry either free text (`"CIS212, MATH263"`) or an explicit
/// list. Resolution into identifiers happens in [`crate::prereq`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrerequisiteSpec {
    /// Comma/semicolon separated identifiers. Blank means none.
    Text(String),
    /// Explicit identifier list.
    List(Vec<String>),
}

impl Default for PrerequisiteSpec {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl PrerequisiteSpec {
    /// Whether no prerequisite is named.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::List(ids) => ids.iter().all(|id| id.trim().is_empty()),
        }
    }
}
