//! Students and courses
//!
//! Both kinds share one shape: a server-assigned [`RecordId`], a
//! client-generated business key (`studentId` / `courseCode`), a name and one
//! secondary field. The [`Entity`] trait captures that shape so the API client
//! and the list/form components are written once.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Opaque identifier assigned by the remote store.
///
/// The server may send ids as JSON numbers or strings; both are kept as text.
/// Numbers keep their JSON spelling, so `7.0` stays `"7.0"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(serde_json::Number),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

/// The two record kinds the console manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Student,
    Course,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Student, EntityKind::Course];

    /// REST collection path segment
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::Student => "students",
            EntityKind::Course => "courses",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Student => "Student",
            EntityKind::Course => "Course",
        }
    }

    /// Column title of the business key in the list view
    pub fn key_column(self) -> &'static str {
        match self {
            EntityKind::Student => "ID",
            EntityKind::Course => "Code",
        }
    }

    /// Form label of the business key
    pub fn key_label(self) -> &'static str {
        match self {
            EntityKind::Student => "Student ID (Unique)",
            EntityKind::Course => "Course Code (Unique)",
        }
    }

    /// Title of the secondary field (major / instructor)
    pub fn secondary_label(self) -> &'static str {
        match self {
            EntityKind::Student => "Major",
            EntityKind::Course => "Instructor",
        }
    }

    fn key_prefix(self) -> &'static str {
        match self {
            EntityKind::Student => "S",
            EntityKind::Course => "C",
        }
    }

    /// Generate a new business key: prefix plus 8 hex chars of a v4 UUID.
    pub fn fresh_key(self) -> String {
        let uuid = Uuid::new_v4().simple().to_string();
        format!("{}-{}", self.key_prefix(), &uuid[..8])
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shape shared by students and courses
pub trait Entity: Clone + fmt::Debug + DeserializeOwned + Send + 'static {
    const KIND: EntityKind;

    /// Request body for create/update: business fields only, never the id
    type Fields: Serialize + fmt::Debug + Clone + Send + Sync + 'static;

    fn id(&self) -> Option<&RecordId>;
    fn business_key(&self) -> &str;
    fn name(&self) -> &str;
    fn secondary(&self) -> &str;
    fn fields(&self) -> Self::Fields;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub major: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFields {
    pub student_id: String,
    pub name: String,
    pub major: String,
}

impl Entity for Student {
    const KIND: EntityKind = EntityKind::Student;
    type Fields = StudentFields;

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn business_key(&self) -> &str {
        &self.student_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn secondary(&self) -> &str {
        &self.major
    }

    fn fields(&self) -> StudentFields {
        StudentFields {
            student_id: self.student_id.clone(),
            name: self.name.clone(),
            major: self.major.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub course_code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub instructor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseFields {
    pub course_code: String,
    pub name: String,
    pub instructor: String,
}

impl Entity for Course {
    const KIND: EntityKind = EntityKind::Course;
    type Fields = CourseFields;

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn business_key(&self) -> &str {
        &self.course_code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn secondary(&self) -> &str {
        &self.instructor
    }

    fn fields(&self) -> CourseFields {
        CourseFields {
            course_code: self.course_code.clone(),
            name: self.name.clone(),
            instructor: self.instructor.clone(),
        }
    }
}

/// A student or a course, tagged with its kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Student(Student),
    Course(Course),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Student(_) => EntityKind::Student,
            Record::Course(_) => EntityKind::Course,
        }
    }

    pub fn id(&self) -> Option<&RecordId> {
        match self {
            Record::Student(s) => s.id(),
            Record::Course(c) => c.id(),
        }
    }

    pub fn business_key(&self) -> &str {
        match self {
            Record::Student(s) => s.business_key(),
            Record::Course(c) => c.business_key(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Record::Student(s) => s.name(),
            Record::Course(c) => c.name(),
        }
    }

    pub fn secondary(&self) -> &str {
        match self {
            Record::Student(s) => s.secondary(),
            Record::Course(c) => c.secondary(),
        }
    }
}

impl From<Student> for Record {
    fn from(s: Student) -> Self {
        Record::Student(s)
    }
}

impl From<Course> for Record {
    fn from(c: Course) -> Self {
        Record::Course(c)
    }
}

/// Create/update payload for either kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordFields {
    Student(StudentFields),
    Course(CourseFields),
}

impl RecordFields {
    pub fn kind(&self) -> EntityKind {
        match self {
            RecordFields::Student(_) => EntityKind::Student,
            RecordFields::Course(_) => EntityKind::Course,
        }
    }

    /// Payload for `kind` from the three form values.
    pub fn from_parts(kind: EntityKind, key: &str, name: &str, secondary: &str) -> Self {
        match kind {
            EntityKind::Student => RecordFields::Student(StudentFields {
                student_id: key.to_string(),
                name: name.to_string(),
                major: secondary.to_string(),
            }),
            EntityKind::Course => RecordFields::Course(CourseFields {
                course_code: key.to_string(),
                name: name.to_string(),
                instructor: secondary.to_string(),
            }),
        }
    }
}
