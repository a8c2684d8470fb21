//! Prerequisite resolution.
//!
//! Turns a course's raw prerequisite specification into a list of course
//! identifiers. A curated override table takes precedence over whatever
//! the catalog says.
//!
//! Identifiers are not checked against the catalog. A prerequisite that
//! names an unknown course can never be satisfied, which keeps the
//! dependent course out of every plan.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::catalog::Catalog;
use crate::models::{Course, PrerequisiteSpec};

/// Resolves prerequisite identifiers for courses.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use u_curriculum::models::Course;
/// use u_curriculum::prereq::PrerequisiteResolver;
///
/// let mut overrides = BTreeMap::new();
/// overrides.insert("CIS350".to_string(), vec![]);
/// let resolver = PrerequisiteResolver::new(overrides);
///
/// let parsed = Course::new("CIS377").with_prerequisites("COSC236; CIS212,");
/// assert_eq!(resolver.resolve(&parsed), vec!["COSC236", "CIS212"]);
///
/// // Override wins, even when it is empty
/// let overridden = Course::new("CIS350").with_prerequisites("CIS212");
/// assert!(resolver.resolve(&overridden).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PrerequisiteResolver {
    overrides: BTreeMap<String, Vec<String>>,
}

impl PrerequisiteResolver {
    /// Creates a resolver with a curated override table.
    pub fn new(overrides: BTreeMap<String, Vec<String>>) -> Self {
        Self { overrides }
    }

    /// Resolves a course's prerequisites.
    ///
    /// Order of the returned identifiers follows the source; repeated
    /// identifiers are collapsed to their first occurrence.
    pub fn resolve(&self, course: &Course) -> Vec<String> {
        match self.overrides.get(&course.id) {
            Some(ids) => dedup(ids.iter().map(String::as_str)),
            None => parse_spec(&course.prerequisites),
        }
    }

    /// Resolves by identifier. Courses missing from the catalog resolve to
    /// their override entry, or to nothing.
    pub fn resolve_id(&self, catalog: &Catalog, course_id: &str) -> Vec<String> {
        match (catalog.get(course_id), self.overrides.get(course_id)) {
            (Some(course), _) => self.resolve(course),
            (None, Some(ids)) => dedup(ids.iter().map(String::as_str)),
            (None, None) => Vec::new(),
        }
    }

    /// Builds the per-run prerequisite mapping for a set of courses.
    pub fn build_map<'a, I>(&self, courses: I) -> PrerequisiteMap
    where
        I: IntoIterator<Item = &'a Course>,
    {
        PrerequisiteMap {
            entries: courses
                .into_iter()
                .map(|c| (c.id.clone(), self.resolve(c)))
                .collect(),
        }
    }

    /// Whether an override is registered for the course.
    pub fn has_override(&self, course_id: &str) -> bool {
        self.overrides.contains_key(course_id)
    }
}

/// Immutable mapping from course identifier to its resolved prerequisites.
#[derive(Debug, Clone, Default)]
pub struct PrerequisiteMap {
    entries: HashMap<String, Vec<String>>,
}

impl PrerequisiteMap {
    /// Prerequisites of a course; empty when the course is unknown.
    pub fn get(&self, course_id: &str) -> &[String] {
        self.entries
            .get(course_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether every prerequisite of the course is in `done`.
    pub fn is_satisfied(&self, course_id: &str, done: &HashSet<String>) -> bool {
        self.get(course_id).iter().all(|p| done.contains(p))
    }

    /// Prerequisites of the course that are not in `done`.
    pub fn missing<'a>(&'a self, course_id: &str, done: &HashSet<String>) -> Vec<&'a str> {
        self.get(course_id)
            .iter()
            .filter(|p| !done.contains(*p))
            .map(String::as_str)
            .collect()
    }
}

/// Parses a raw prerequisite specification.
///
/// Text is split on `,` and `;`; tokens are trimmed and empty tokens are
/// discarded. Blank text means no prerequisites.
pub fn parse_spec(spec: &PrerequisiteSpec) -> Vec<String> {
    match spec {
        PrerequisiteSpec::Text(text) => dedup(text.split([',', ';'])),
        PrerequisiteSpec::List(ids) => dedup(ids.iter().map(String::as_str)),
    }
}

fn dedup<'a, I>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty() && seen.insert(*t))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> PrerequisiteSpec {
        PrerequisiteSpec::Text(s.into())
    }

    #[test]
    fn test_parse_separators() {
        assert_eq!(parse_spec(&text("A,B;C")), vec!["A", "B", "C"]);
        assert_eq!(parse_spec(&text("  A ;  B  ")), vec!["A", "B"]);
        assert_eq!(parse_spec(&text("A,,;B,")), vec!["A", "B"]);
    }

    #[test]
    fn test_parse_blank() {
        assert!(parse_spec(&text("")).is_empty());
        assert!(parse_spec(&text("   ")).is_empty());
        assert!(parse_spec(&text(" , ; ")).is_empty());
    }

    #[test]
    fn test_parse_list_and_duplicates() {
        let list = PrerequisiteSpec::List(vec![" A".into(), "".into(), "B".into(), "A".into()]);
        assert_eq!(parse_spec(&list), vec!["A", "B"]);
        assert_eq!(parse_spec(&text("A, B, A")), vec!["A", "B"]);
    }

    #[test]
    fn test_override_precedence() {
        let mut overrides = BTreeMap::new();
        overrides.insert("Y".to_string(), vec!["Z".to_string()]);
        overrides.insert("W".to_string(), vec![]);
        let resolver = PrerequisiteResolver::new(overrides);

        let y = Course::new("Y").with_prerequisites("X");
        assert_eq!(resolver.resolve(&y), vec!["Z"]);

        let w = Course::new("W").with_prerequisites("X");
        assert!(resolver.resolve(&w).is_empty());
        assert!(resolver.has_override("W"));

        let v = Course::new("V").with_prerequisites("X");
        assert_eq!(resolver.resolve(&v), vec!["X"]);
        assert!(!resolver.has_override("V"));
    }

    #[test]
    fn test_resolve_id() {
        let catalog = Catalog::new(vec![Course::new("Y").with_prerequisites("X")]);
        let mut overrides = BTreeMap::new();
        overrides.insert("GHOST".to_string(), vec!["Y".to_string()]);
        let resolver = PrerequisiteResolver::new(overrides);

        assert_eq!(resolver.resolve_id(&catalog, "Y"), vec!["X"]);
        assert_eq!(resolver.resolve_id(&catalog, "GHOST"), vec!["Y"]);
        assert!(resolver.resolve_id(&catalog, "NOPE").is_empty());
    }

    #[test]
    fn test_prerequisite_map() {
        let courses = vec![
            Course::new("X"),
            Course::new("Y").with_prerequisites("X"),
            Course::new("Z").with_prerequisites("X, Y, MISSING"),
        ];
        let map = PrerequisiteResolver::default().build_map(&courses);

        let mut done = HashSet::new();
        assert!(map.is_satisfied("X", &done));
        assert!(!map.is_satisfied("Y", &done));

        done.insert("X".to_string());
        assert!(map.is_satisfied("Y", &done));
        assert_eq!(map.missing("Z", &done), vec!["Y", "MISSING"]);

        done.insert("Y".to_string());
        // An unknown prerequisite is never satisfied
        assert!(!map.is_satisfied("Z", &done));
        assert!(map.get("UNKNOWN").is_empty());
    }
}
