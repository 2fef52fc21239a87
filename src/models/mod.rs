//! Business models shared by routes, services and storage, with TypeScript
//! bindings exported for the web client.

pub mod announcements;
pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod common;
pub mod files;
pub mod homeroom;
pub mod materials;
pub mod schedules;
pub mod subjects;
pub mod submissions;
pub mod system;
pub mod topics;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

/// Process start time, exposed by the health endpoint.
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// Application error codes carried in the `code` field of every response.
///
/// 0 is success; 1xxx mirror HTTP failures; higher ranges are per domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    PayloadTooLarge = 1013,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,
    BadGateway = 1502,

    // auth
    AuthFailed = 2000,
    AccountInactive = 2001,
    PasswordPolicyViolation = 2002,

    // users
    UserNotFound = 2100,
    UserNameInvalid = 2101,
    UserEmailInvalid = 2102,
    UserAlreadyExists = 2103,
    UserIdentityNumberInvalid = 2104,
    CanNotDeleteCurrentUser = 2105,

    // courses
    ClassNotFound = 3000,
    ClassAlreadyExists = 3001,
    SubjectNotFound = 3100,
    TopicNotFound = 3200,
    MaterialNotFound = 3300,
    NotSubjectTeacher = 3400,

    // grading
    AssignmentNotFound = 4000,
    SubmissionNotFound = 4100,
    SubmissionDeadlinePassed = 4101,
    SubmissionAlreadyGraded = 4102,
    ScoreOutOfRange = 4103,

    // attendance
    AttendanceNotFound = 5000,
    AttendanceInvalidDate = 5001,

    // announcements
    AnnouncementNotFound = 6000,

    // homeroom
    NotHomeroomTeacher = 6500,

    // schedules
    ScheduleNotFound = 7000,
    ScheduleInvalidTime = 7001,
    ScheduleConflict = 7002,

    // files
    FileNotFound = 8000,
    FileUploadFailed = 8001,
    FileTypeNotAllowed = 8002,
    FileSizeExceeded = 8003,
    MultifileUploadNotAllowed = 8004,

    // settings
    SettingNotFound = 9000,
    SettingValueInvalid = 9001,
}
