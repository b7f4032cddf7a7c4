use serde::{Deserialize, Serialize};

use crate::stores::group::Group;
use crate::stores::session::Session;

/// Wrapper every portal endpoint returns. `code == 0` is success, `code == 1`
/// means the session is no longer authorized; anything else is an application
/// error described by `message`.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub response: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub user: Session,
}

#[derive(Debug, Deserialize)]
pub struct GroupsResponse {
    pub groups: Vec<Group>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleResponse {
    pub schedule: Vec<ScheduleDay>,
}

#[derive(Debug, Deserialize)]
pub struct SkippingResponse {
    pub skipping: Vec<SkippingRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ThemesResponse {
    pub themes: Vec<ThesisTopic>,
}

/// One day of the group schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub date: String,
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub lesson_num: u32,
    pub time_from: String,
    pub time_to: String,
    pub lesson_name: String,
    pub teacher: String,
    pub room: String,
}

/// One day with skipped class hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippingRecord {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub hours: u32,
}

/// Thesis or coursework topic assigned to the student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThesisTopic {
    #[serde(rename = "type")]
    pub kind: String,
    pub theme: String,
    pub curator: String,
}
