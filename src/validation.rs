//! Catalog diagnostics.
//!
//! The scheduler never rejects a catalog: an unknown prerequisite simply
//! leaves its course unscheduled. These checks are advisory and report the
//! data problems that cause such outcomes. Detects:
//! - Duplicate course IDs
//! - Courses with zero units
//! - Prerequisites that reference unknown courses
//! - Self-referencing prerequisites
//! - Circular prerequisite chains (DAG validation)
//! - Equivalence group members missing from the catalog (warning)
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::equivalence::EquivalenceGroups;
use crate::models::Course;
use crate::prereq::PrerequisiteResolver;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Finding category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationErrorKind {
    /// Two records share the same course ID.
    DuplicateId,
    /// A course carries no credit units.
    ZeroUnits,
    /// A prerequisite references a course that doesn't exist.
    UnknownPrerequisite,
    /// A course lists itself as a prerequisite.
    SelfPrerequisite,
    /// Prerequisite graph contains a cycle.
    CyclicDependency,
    /// An equivalence group names a course that doesn't exist.
    UnknownEquivalenceMember,
}

impl ValidationErrorKind {
    /// Whether the finding only deserves a warning.
    pub fn is_warning(self) -> bool {
        matches!(self, ValidationErrorKind::UnknownEquivalenceMember)
    }
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Whether this finding is an error (as opposed to a warning).
    pub fn is_error(&self) -> bool {
        !self.kind.is_warning()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = if self.is_error() { "error" } else { "warning" };
        write!(f, "{level}: {}", self.message)
    }
}

/// Collects every finding, errors and warnings alike, in check order.
///
/// Checks:
/// 1. No duplicate course IDs
/// 2. Every course has at least one unit
/// 3. No course lists itself as a prerequisite
/// 4. All prerequisite references point to existing courses
/// 5. No circular prerequisite chains
/// 6. All equivalence members exist (warning)
pub fn diagnose_catalog(
    courses: &[Course],
    resolver: &PrerequisiteResolver,
    groups: &EquivalenceGroups,
) -> Vec<ValidationError> {
    let mut findings = Vec::new();

    let mut course_ids = HashSet::new();
    for course in courses {
        if !course_ids.insert(course.id.as_str()) {
            findings.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", course.id),
            ));
        }
        if course.units == 0 {
            findings.push(ValidationError::new(
                ValidationErrorKind::ZeroUnits,
                format!("Course '{}' has zero units", course.id),
            ));
        }
    }

    // Resolved once; duplicates keep the first record like the catalog does
    let mut prerequisites: Vec<(&str, Vec<String>)> = Vec::new();
    let mut seen = HashSet::new();
    for course in courses {
        if seen.insert(course.id.as_str()) {
            prerequisites.push((course.id.as_str(), resolver.resolve(course)));
        }
    }

    for (id, prereqs) in &prerequisites {
        for prereq in prereqs {
            if prereq == id {
                findings.push(ValidationError::new(
                    ValidationErrorKind::SelfPrerequisite,
                    format!("Course '{id}' lists itself as a prerequisite"),
                ));
            } else if !course_ids.contains(prereq.as_str()) {
                findings.push(ValidationError::new(
                    ValidationErrorKind::UnknownPrerequisite,
                    format!("Course '{id}' references unknown prerequisite '{prereq}'"),
                ));
            }
        }
    }

    if let Some(cycle_err) = detect_cycles(&prerequisites) {
        findings.push(cycle_err);
    }

    for group in groups.groups() {
        for member in group {
            if !course_ids.contains(member.as_str()) {
                findings.push(ValidationError::new(
                    ValidationErrorKind::UnknownEquivalenceMember,
                    format!("Equivalence group member '{member}' is not in the catalog"),
                ));
            }
        }
    }

    findings
}

/// Validates a catalog.
///
/// # Returns
/// `Ok(())` if no error-level finding exists, `Err(errors)` otherwise.
/// Warnings never fail validation.
pub fn validate_catalog(
    courses: &[Course],
    resolver: &PrerequisiteResolver,
    groups: &EquivalenceGroups,
) -> ValidationResult {
    let errors: Vec<ValidationError> = diagnose_catalog(courses, resolver, groups)
        .into_iter()
        .filter(ValidationError::is_error)
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles in the prerequisite graph using DFS.
///
/// Self-references are reported separately and ignored here; edges to
/// unknown courses are dropped. Roots are visited in catalog order so the
/// reported course is deterministic.
///
/// # Algorithm
/// Topological sort via DFS. If a back-edge is found (visiting a node
/// currently in the recursion stack), a cycle exists.
fn detect_cycles(prerequisites: &[(&str, Vec<String>)]) -> Option<ValidationError> {
    // Build adjacency list: course_id → prerequisites
    let adj: HashMap<&str, Vec<&str>> = prerequisites
        .iter()
        .map(|(id, prereqs)| {
            let edges = prereqs
                .iter()
                .map(String::as_str)
                .filter(|p| p != id)
                .collect();
            (*id, edges)
        })
        .collect();

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for node in prerequisites.iter().map(|(id, _)| *id) {
        if !visited.contains(node) && has_cycle_dfs(node, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicDependency,
                format!("Circular prerequisite chain detected involving course '{node}'"),
            ));
        }
    }

    None
}

fn has_cycle_dfs<'a>(
    node: &'a str,
    adj: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    in_stack: &mut HashSet<&'a str>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = adj.get(node) {
        for &next in neighbors {
            if in_stack.contains(next) {
                return true; // Back edge → cycle
            }
            if adj.contains_key(next)
                && !visited.contains(next)
                && has_cycle_dfs(next, adj, visited, in_stack)
            {
                return true;
            }
        }
    }

    in_stack.remove(node);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn course(id: &str, prereqs: &str) -> Course {
        Course::new(id).with_units(3).with_prerequisites(prereqs)
    }

    fn kinds(findings: &[ValidationError]) -> Vec<ValidationErrorKind> {
        findings.iter().map(|e| e.kind).collect()
    }

    fn check(courses: &[Course]) -> ValidationResult {
        validate_catalog(
            courses,
            &PrerequisiteResolver::default(),
            &EquivalenceGroups::default(),
        )
    }

    #[test]
    fn test_valid_catalog() {
        let courses = vec![course("A", ""), course("B", "A"), course("C", "A; B")];
        assert!(check(&courses).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        let courses = vec![course("A", ""), course("A", "")];
        let errors = check(&courses).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::DuplicateId]);
        assert!(errors[0].message.contains("A"));
    }

    #[test]
    fn test_zero_units() {
        let courses = vec![Course::new("A")];
        let errors = check(&courses).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::ZeroUnits]);
    }

    #[test]
    fn test_unknown_prerequisite() {
        let courses = vec![course("A", "GHOST")];
        let errors = check(&courses).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::UnknownPrerequisite]);
        assert!(errors[0].message.contains("GHOST"));
    }

    #[test]
    fn test_self_prerequisite() {
        let courses = vec![course("A", "A")];
        let errors = check(&courses).unwrap_err();
        // Not also reported as a cycle
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::SelfPrerequisite]);
    }

    #[test]
    fn test_cyclic_dependency() {
        // A → C → B → A
        let courses = vec![course("A", "C"), course("B", "A"), course("C", "B")];
        let errors = check(&courses).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::CyclicDependency]);
        assert!(errors[0].message.contains("'A'"));
    }

    #[test]
    fn test_no_cycle_in_chain() {
        let courses = vec![course("C", "B"), course("B", "A"), course("A", "")];
        assert!(check(&courses).is_ok());
    }

    #[test]
    fn test_override_breaks_cycle() {
        let courses = vec![course("A", "B"), course("B", "A")];
        let mut overrides = BTreeMap::new();
        overrides.insert("A".to_string(), Vec::new());
        let resolver = PrerequisiteResolver::new(overrides);

        assert!(validate_catalog(&courses, &resolver, &EquivalenceGroups::default()).is_ok());
    }

    #[test]
    fn test_equivalence_member_is_warning() {
        let courses = vec![course("MATH211", "")];
        let groups = EquivalenceGroups::new(vec![vec!["MATH211", "MATH273"]]);
        let resolver = PrerequisiteResolver::default();

        let findings = diagnose_catalog(&courses, &resolver, &groups);
        assert_eq!(
            kinds(&findings),
            vec![ValidationErrorKind::UnknownEquivalenceMember]
        );
        assert!(!findings[0].is_error());
        assert!(findings[0].to_string().starts_with("warning:"));
        assert!(validate_catalog(&courses, &resolver, &groups).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let courses = vec![Course::new("A").with_prerequisites("X"), course("A", "")];
        let errors = check(&courses).unwrap_err();
        assert_eq!(
            kinds(&errors),
            vec![
                ValidationErrorKind::ZeroUnits,
                ValidationErrorKind::DuplicateId,
                ValidationErrorKind::UnknownPrerequisite,
            ]
        );
    }
}
