//! Syllabus data record
//!
//! A flat JSON object whose fields fill the `{{field}}` placeholders of a
//! template. Every field is optional; a missing field renders as an empty
//! string.

use crate::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Every placeholder name a template can use
pub const FIELD_NAMES: [&str; 21] = [
    "courseCode",
    "courseTitle",
    "courseDescription",
    "credits",
    "department",
    "semester",
    "startDate",
    "endDate",
    "instructorName",
    "instructorEmail",
    "instructorPhone",
    "officeLocation",
    "officeHours",
    "meetingTimes",
    "classroom",
    "prerequisites",
    "textbooks",
    "learningObjectives",
    "gradingPolicy",
    "attendancePolicy",
    "academicIntegrity",
];

/// Whether `name` is a known placeholder field
pub fn is_known_field(name: &str) -> bool {
    FIELD_NAMES.contains(&name)
}

/// Credit count as stored; older records keep it as a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Credits {
    Number(f64),
    Text(String),
}

impl Credits {
    /// Whole numbers print without a fraction (`3`, not `3.0`)
    pub fn to_display(&self) -> String {
        match self {
            Credits::Number(n) if n.fract() == 0.0 && n.is_finite() => format!("{n:.0}"),
            Credits::Number(n) => n.to_string(),
            Credits::Text(s) => s.clone(),
        }
    }
}

/// A course syllabus record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyllabusRecord {
    pub course_code: Option<String>,
    pub course_title: Option<String>,
    pub course_description: Option<String>,
    pub credits: Option<Credits>,
    pub department: Option<String>,
    pub semester: Option<String>,
    /// `YYYY-MM`
    pub start_date: Option<String>,
    /// `YYYY-MM`
    pub end_date: Option<String>,
    pub instructor_name: Option<String>,
    pub instructor_email: Option<String>,
    pub instructor_phone: Option<String>,
    pub office_location: Option<String>,
    pub office_hours: Option<String>,
    pub meeting_times: Option<String>,
    pub classroom: Option<String>,
    pub prerequisites: Option<String>,
    pub textbooks: Option<String>,
    pub learning_objectives: Option<String>,
    pub grading_policy: Option<String>,
    pub attendance_policy: Option<String>,
    pub academic_integrity: Option<String>,
}

impl SyllabusRecord {
    /// Parse a record from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a record from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Display value of a field, formatted for print. `None` for unknown
    /// field names; `Some("")` for known fields the record leaves empty.
    pub fn field_value(&self, name: &str) -> Option<String> {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let value = match name {
            "courseCode" => text(&self.course_code),
            "courseTitle" => text(&self.course_title),
            "courseDescription" => text(&self.course_description),
            "credits" => self.credits.as_ref().map(Credits::to_display).unwrap_or_default(),
            "department" => text(&self.department),
            "semester" => text(&self.semester),
            "startDate" => self.start_date.as_deref().map(format_month).unwrap_or_default(),
            "endDate" => self.end_date.as_deref().map(format_month).unwrap_or_default(),
            "instructorName" => text(&self.instructor_name),
            "instructorEmail" => text(&self.instructor_email),
            "instructorPhone" => text(&self.instructor_phone),
            "officeLocation" => text(&self.office_location),
            "officeHours" => text(&self.office_hours),
            "meetingTimes" => text(&self.meeting_times),
            "classroom" => text(&self.classroom),
            "prerequisites" => text(&self.prerequisites),
            "textbooks" => text(&self.textbooks),
            "learningObjectives" => text(&self.learning_objectives),
            "gradingPolicy" => text(&self.grading_policy),
            "attendancePolicy" => text(&self.attendance_policy),
            "academicIntegrity" => text(&self.academic_integrity),
            _ => return None,
        };
        Some(value)
    }

    /// Display values for every known field
    pub fn placeholder_values(&self) -> PlaceholderValues {
        let values = FIELD_NAMES
            .iter()
            .map(|&name| (name.to_string(), self.field_value(name).unwrap_or_default()))
            .collect();
        PlaceholderValues { values }
    }
}

/// Format a `YYYY-MM` month as `Month YYYY`. Anything else passes through.
pub fn format_month(raw: &str) -> String {
    match NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d") {
        Ok(date) => date.format("%B %Y").to_string(),
        Err(_) => {
            tracing::debug!(value = raw, "date is not YYYY-MM, leaving as is");
            raw.to_string()
        }
    }
}

/// Resolved placeholder values keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderValues {
    values: BTreeMap<String, String>,
}

impl PlaceholderValues {
    /// Value for a field, if the field is known
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<&SyllabusRecord> for PlaceholderValues {
    fn from(record: &SyllabusRecord) -> Self {
        record.placeholder_values()
    }
}
