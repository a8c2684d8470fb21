//! Equivalence groups.
//!
//! Some degree requirements can be met by any one of several courses
//! (e.g. `CIS212` or `COSC236`). Once one member of such a group is done,
//! every member counts as done.
//!
//! Overlapping input groups are merged when the collection is built, so
//! closing over any member always closes over the whole merged group.

use std::collections::{BTreeSet, HashSet};

/// Built-in interchangeable course sets.
pub const DEFAULT_GROUPS: [&[&str]; 4] = [
    &["MATH211", "MATH273"],
    &["MATH231", "MATH330"],
    &["ART102", "ART103"],
    &["CIS212", "COSC236"],
];

/// A fixed collection of disjoint equivalence groups.
///
/// # Example
///
/// ```
/// use u_curriculum::equivalence::EquivalenceGroups;
///
/// let groups = EquivalenceGroups::new(vec![
///     vec!["CIS212".to_string(), "COSC236".to_string()],
/// ]);
/// let done = groups.normalize(["COSC236"]);
/// assert!(done.contains("CIS212"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquivalenceGroups {
    groups: Vec<BTreeSet<String>>,
}

impl EquivalenceGroups {
    /// Builds groups, merging any that share a member.
    ///
    /// Groups keep the position of their earliest contributing input.
    /// Blank identifiers are ignored and groups left empty are dropped.
    pub fn new<I, G, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut merged: Vec<BTreeSet<String>> = Vec::new();
        for group in groups {
            let mut incoming: BTreeSet<String> = group
                .into_iter()
                .map(|id| {
                    let id: String = id.into();
                    id.trim().to_string()
                })
                .filter(|id| !id.is_empty())
                .collect();
            if incoming.is_empty() {
                continue;
            }

            let overlapping: Vec<usize> = merged
                .iter()
                .enumerate()
                .filter(|(_, existing)| !existing.is_disjoint(&incoming))
                .map(|(i, _)| i)
                .collect();

            match overlapping.first() {
                None => merged.push(incoming),
                Some(&keep) => {
                    // Remove from the back so earlier indices stay valid
                    for &i in overlapping.iter().skip(1).rev() {
                        incoming.extend(merged.remove(i));
                    }
                    merged[keep].extend(incoming);
                }
            }
        }
        Self { groups: merged }
    }

    /// The built-in groups.
    pub fn builtin() -> Self {
        Self::new(DEFAULT_GROUPS.iter().map(|g| g.iter().copied()))
    }

    /// Groups in configuration order.
    pub fn groups(&self) -> &[BTreeSet<String>] {
        &self.groups
    }

    /// Whether there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The group containing `course_id`, if any.
    pub fn group_of(&self, course_id: &str) -> Option<&BTreeSet<String>> {
        self.groups.iter().find(|g| g.contains(course_id))
    }

    /// Expands a completed-course set across all groups.
    ///
    /// Every group sharing at least one member with the input is added in
    /// full.
    pub fn normalize<I, S>(&self, completed: I) -> HashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut done: HashSet<String> = completed.into_iter().map(Into::into).collect();
        for group in &self.groups {
            if group.iter().any(|id| done.contains(id)) {
                done.extend(group.iter().cloned());
            }
        }
        done
    }

    /// Marks `course_id` done together with its whole group.
    ///
    /// Returns every identifier satisfied by this step (the course itself
    /// plus its group members), sorted.
    pub fn close(&self, course_id: &str, done: &mut HashSet<String>) -> BTreeSet<String> {
        let mut satisfied = BTreeSet::new();
        satisfied.insert(course_id.to_string());
        if let Some(group) = self.group_of(course_id) {
            satisfied.extend(group.iter().cloned());
        }
        done.extend(satisfied.iter().cloned());
        satisfied
    }
}
