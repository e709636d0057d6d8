//! Course records and catalog ordering
//!
//! A [`Course`] is one listing from the search results. Records are not
//! deduplicated; the catalog order is department, then course number, with
//! the remaining fields as tie-breakers so the output never depends on the
//! order in which pages arrived.

mod title;

pub use title::{parse_leading_int, parse_leading_number, parse_title, split_list, TitleParts};

use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;

/// One course listing
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Department code (e.g. "MATH")
    pub department: String,

    /// Course number; `None` when the code carried no digits
    pub course_number: Option<u32>,

    /// Course name
    pub name: String,

    /// Credit weight
    #[serde(serialize_with = "serialize_credits")]
    pub num_credits: Option<f64>,

    /// Link to the course page (possibly relative)
    pub link: String,

    /// Faculty offering the course
    pub faculty: String,

    /// Full department name
    pub department_name: String,

    /// Study levels
    pub level: Vec<String>,

    /// Terms in which the course is offered
    pub terms_offered: Vec<String>,
}

impl Course {
    /// Compares two courses in catalog order
    ///
    /// Department ascends lexicographically, then course number ascends
    /// numerically with unparsable numbers after every numbered course. The
    /// remaining fields only break ties between otherwise equal keys.
    pub fn catalog_cmp(&self, other: &Self) -> Ordering {
        self.department
            .cmp(&other.department)
            .then_with(|| cmp_course_number(self.course_number, other.course_number))
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.link.cmp(&other.link))
            .then_with(|| self.faculty.cmp(&other.faculty))
            .then_with(|| self.department_name.cmp(&other.department_name))
            .then_with(|| self.level.cmp(&other.level))
            .then_with(|| self.terms_offered.cmp(&other.terms_offered))
            .then_with(|| cmp_credits(self.num_credits, other.num_credits))
    }
}

/// Sorts courses into catalog order
pub fn sort_catalog(courses: &mut [Course]) {
    courses.sort_by(Course::catalog_cmp);
}

fn cmp_course_number(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn cmp_credits(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Writes whole credit values as integers (`3` rather than `3.0`)
fn serialize_credits<S>(credits: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match credits {
        Some(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
            serializer.serialize_i64(*value as i64)
        }
        Some(value) => serializer.serialize_f64(*value),
        None => serializer.serialize_none(),
    }
}
