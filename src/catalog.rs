//! Course catalog store.
//!
//! Loads course records from CSV or JSON and exposes them as an ordered,
//! read-only collection. A loaded [`Catalog`] is never mutated, so one
//! instance can be shared (e.g. behind an `Arc`) by any number of
//! scheduling runs.
//!
//! # CSV Layout
//!
//! ```text
//! course_id,course_name,units,track,core_required,elective,prerequisites
//! COSC236,Intro to Computer Science II,4,All,yes,no,COSC175
//! CIS350,Data Communication,3,Networking,yes,no,"CIS212, MATH263"
//! ```
//!
//! Columns are located by header name. `prerequisites` may be omitted.
//! Fields containing separators must be double-quoted (`""` escapes a
//! quote). Blank lines and lines starting with `#` are skipped.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Course, PrerequisiteSpec, TrackAffiliation};

const REQUIRED_COLUMNS: [&str; 6] = [
    "course_id",
    "course_name",
    "units",
    "track",
    "core_required",
    "elective",
];

/// Ordered, read-only course catalog.
///
/// # Example
///
/// ```
/// use u_curriculum::catalog::Catalog;
///
/// let csv = "course_id,course_name,units,track,core_required,elective,prerequisites\n\
///            X,Intro,3,All,yes,no,\n";
/// let catalog = Catalog::from_csv_str(csv, "inline.csv").unwrap();
/// assert_eq!(catalog.len(), 1);
/// assert_eq!(catalog.get("X").unwrap().units, 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog from course records, preserving their order.
    ///
    /// Course identifiers are unique keys: a later record with an already
    /// seen identifier is dropped with a warning.
    pub fn new(courses: Vec<Course>) -> Self {
        let mut catalog = Self::default();
        for course in courses {
            if catalog.index.contains_key(&course.id) {
                warn!(course_id = %course.id, "duplicate course id in catalog, keeping first record");
                continue;
            }
            catalog
                .index
                .insert(course.id.clone(), catalog.courses.len());
            catalog.courses.push(course);
        }
        catalog
    }

    /// Loads a catalog file (JSON or CSV).
    pub fn load<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let catalog = Self::new(load_courses(path.as_ref())?);
        info!(
            path = %path.as_ref().display(),
            courses = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Parses CSV content. `path` is only used in error messages.
    pub fn from_csv_str(content: &str, path: impl AsRef<Path>) -> CatalogResult<Self> {
        parse_csv(content, path.as_ref()).map(Self::new)
    }

    /// Parses a JSON array of course records.
    pub fn from_json_str(content: &str, path: impl AsRef<Path>) -> CatalogResult<Self> {
        serde_json::from_str::<Vec<Course>>(content)
            .map(Self::new)
            .map_err(|err| CatalogError::json(err, path.as_ref()))
    }

    /// Courses in catalog order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Looks up a course by identifier.
    pub fn get(&self, course_id: &str) -> Option<&Course> {
        self.index.get(course_id).map(|&i| &self.courses[i])
    }

    /// Whether the catalog contains the identifier.
    pub fn contains(&self, course_id: &str) -> bool {
        self.index.contains_key(course_id)
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog has no courses.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Distinct named tracks, sorted. The all-tracks sentinel is excluded.
    pub fn tracks(&self) -> Vec<String> {
        self.courses
            .iter()
            .filter_map(|c| c.track.name())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Whether `track` is one of the catalog's named tracks.
    pub fn has_track(&self, track: &str) -> bool {
        self.courses.iter().any(|c| c.track.is_track(track))
    }

    /// Sum of units over the whole catalog, saturating at `u32::MAX`.
    pub fn total_units(&self) -> u32 {
        self.courses
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.units))
    }

    /// Sum of units of the given courses. Unknown identifiers count as zero
    /// and repeated identifiers count once.
    pub fn units_of<'a, I>(&self, course_ids: I) -> u32
    where
        I: IntoIterator<Item = &'a str>,
    {
        course_ids
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter_map(|id| self.get(id))
            .fold(0u32, |acc, c| acc.saturating_add(c.units))
    }
}

/// Reads raw course records from a file, keeping duplicates.
///
/// Files with a `.json` extension, or whose content starts with `[`, are
/// parsed as JSON; everything else as CSV.
pub fn load_courses(path: &Path) -> CatalogResult<Vec<Course>> {
    let content = fs::read_to_string(path).map_err(|err| CatalogError::io(err, path))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
        || content.trim_start().starts_with('[');

    if is_json {
        serde_json::from_str::<Vec<Course>>(&content).map_err(|err| CatalogError::json(err, path))
    } else {
        parse_csv(&content, path)
    }
}

/// Parses CSV catalog content into course records (duplicates kept).
pub fn parse_csv(content: &str, path: &Path) -> CatalogResult<Vec<Course>> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        });

    let Some((header_line, header)) = lines.next() else {
        return Ok(Vec::new());
    };
    let header = split_record(header.trim_start_matches('\u{feff}'))
        .map_err(|message| invalid(header_line, message, path))?;
    let columns = ColumnMap::new(&header, path)?;

    let mut courses = Vec::new();
    for (line_no, line) in lines {
        let fields = split_record(line).map_err(|message| invalid(line_no, message, path))?;
        courses.push(columns.course(&fields, line_no, path)?);
    }
    Ok(courses)
}

struct ColumnMap {
    id: usize,
    name: usize,
    units: usize,
    track: usize,
    core_required: usize,
    elective: usize,
    prerequisites: Option<usize>,
}

impl ColumnMap {
    fn new(header: &[String], path: &Path) -> CatalogResult<Self> {
        let position = |column: &str| header.iter().position(|h| h.trim() == column);
        let required = |column: &str| {
            position(column).ok_or_else(|| CatalogError::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            })
        };
        let [id, name, units, track, core_required, elective] = REQUIRED_COLUMNS;
        Ok(Self {
            id: required(id)?,
            name: required(name)?,
            units: required(units)?,
            track: required(track)?,
            core_required: required(core_required)?,
            elective: required(elective)?,
            prerequisites: position("prerequisites"),
        })
    }

    fn course(&self, fields: &[String], line: usize, path: &Path) -> CatalogResult<Course> {
        let field = |idx: usize| fields.get(idx).map(|f| f.trim()).unwrap_or("");

        let id = field(self.id);
        if id.is_empty() {
            return Err(invalid(line, "empty course_id".to_string(), path));
        }
        let units = field(self.units).parse::<u32>().map_err(|_| {
            invalid(
                line,
                format!("units `{}` is not a non-negative integer", field(self.units)),
                path,
            )
        })?;

        Ok(Course {
            id: id.to_string(),
            name: field(self.name).to_string(),
            units,
            track: TrackAffiliation::track(field(self.track)),
            core_required: is_yes(field(self.core_required)),
            elective: is_yes(field(self.elective)),
            prerequisites: self
                .prerequisites
                .map(|idx| PrerequisiteSpec::Text(field(idx).to_string()))
                .unwrap_or_default(),
        })
    }
}

fn is_yes(value: &str) -> bool {
    value.eq_ignore_ascii_case("yes")
}

fn invalid(line: usize, message: String, path: &Path) -> CatalogError {
    CatalogError::InvalidRecord {
        line,
        message,
        path: path.to_path_buf(),
    }
}

/// Splits one CSV line into fields, honoring double quotes.
fn split_record(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    quoted = false;
                }
            }
            '"' if field.trim().is_empty() => {
                field.clear();
                quoted = true;
            }
            ',' if !quoted => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    if quoted {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(field);
    Ok(fields)
}
