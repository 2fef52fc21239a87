use std::sync::Arc;

use crate::models::{
    PaginationQuery,
    announcements::{
        entities::Announcement,
        requests::{
            AnnouncementListParams, AnnouncementVisibility, CreateAnnouncementRequest,
            UpdateAnnouncementRequest,
        },
        responses::AnnouncementListResponse,
    },
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    attendance::{
        entities::Attendance,
        requests::{AttendanceEntry, AttendanceFilter, UpdateAttendanceRequest},
        responses::AttendanceListResponse,
    },
    classes::{
        entities::Class,
        requests::{ClassListParams, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    files::entities::File,
    materials::{
        entities::Material,
        requests::{CreateMaterialRequest, UpdateMaterialRequest},
    },
    schedules::{
        entities::Schedule,
        requests::{CreateScheduleRequest, ScheduleFilter, UpdateScheduleRequest},
    },
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, SubjectListParams, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
    submissions::{
        entities::{Submission, SubmissionStatus},
        requests::SubmissionListQuery,
        responses::SubmissionListResponse,
    },
    system::{
        entities::SystemSetting,
        requests::SettingAuditParams,
        responses::SettingAuditListResponse,
    },
    topics::{
        entities::Topic,
        requests::{CreateTopicRequest, UpdateTopicRequest},
    },
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UpdateUserRequest, UserListParams},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// Persistence seam used by every service.
///
/// `Ok(None)` / `Ok(false)` mean the row does not exist; failures are `Err`.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    // Users. `CreateUserRequest::password` must already be hashed.
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    async fn list_users_with_pagination(&self, query: UserListParams) -> Result<UserListResponse>;
    async fn list_students_by_class(&self, class_id: i64) -> Result<Vec<User>>;
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn delete_user(&self, id: i64) -> Result<bool>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn count_users_by_role(&self, role: UserRole) -> Result<u64>;

    // Classes
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    async fn get_class_by_homeroom_teacher(&self, teacher_id: i64) -> Result<Option<Class>>;
    async fn list_classes_with_pagination(
        &self,
        query: ClassListParams,
    ) -> Result<ClassListResponse>;
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    /// Also detaches the class's students.
    async fn delete_class(&self, class_id: i64) -> Result<bool>;
    async fn count_classes(&self) -> Result<u64>;

    // Subjects
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<Subject>>;
    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListParams,
    ) -> Result<SubjectListResponse>;
    async fn list_subjects_by_class(&self, class_id: i64) -> Result<Vec<Subject>>;
    async fn list_subject_ids_by_teacher(&self, teacher_id: i64) -> Result<Vec<i64>>;
    async fn update_subject(
        &self,
        subject_id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>>;
    async fn delete_subject(&self, subject_id: i64) -> Result<bool>;
    async fn count_subjects(&self) -> Result<u64>;

    // Topics
    async fn create_topic(&self, topic: CreateTopicRequest) -> Result<Topic>;
    async fn get_topic_by_id(&self, topic_id: i64) -> Result<Option<Topic>>;
    async fn list_topics_by_subject(&self, subject_id: i64) -> Result<Vec<Topic>>;
    async fn update_topic(&self, topic_id: i64, update: UpdateTopicRequest)
    -> Result<Option<Topic>>;
    async fn delete_topic(&self, topic_id: i64) -> Result<bool>;

    // Materials
    async fn create_material(
        &self,
        material: CreateMaterialRequest,
        created_by: i64,
    ) -> Result<Material>;
    async fn get_material_by_id(&self, material_id: i64) -> Result<Option<Material>>;
    async fn list_materials_by_topic(&self, topic_id: i64) -> Result<Vec<Material>>;
    async fn update_material(
        &self,
        material_id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>>;
    async fn delete_material(&self, material_id: i64) -> Result<bool>;

    // Assignments
    async fn create_assignment(
        &self,
        assignment: CreateAssignmentRequest,
        created_by: i64,
    ) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    async fn list_assignments_by_subjects(&self, subject_ids: &[i64]) -> Result<Vec<Assignment>>;
    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;
    async fn count_assignments(&self) -> Result<u64>;

    // Submissions
    /// Inserts or replaces the (assignment, student) submission, clearing any grade.
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: Option<String>,
        attachment: Option<String>,
        status: SubmissionStatus,
    ) -> Result<Submission>;
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    async fn list_graded_submissions_by_assignments(
        &self,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>>;
    async fn grade_submission(
        &self,
        submission_id: i64,
        score: f64,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<Submission>>;
    async fn delete_submission(&self, submission_id: i64) -> Result<bool>;
    async fn count_submissions_by_status(&self, status: SubmissionStatus) -> Result<u64>;

    // Attendance
    /// Upserts one row per entry on (subject, student, date) in a single transaction.
    async fn record_attendances(
        &self,
        subject_id: i64,
        date: &str,
        entries: Vec<AttendanceEntry>,
        recorded_by: i64,
    ) -> Result<Vec<Attendance>>;
    async fn get_attendance_by_id(&self, attendance_id: i64) -> Result<Option<Attendance>>;
    async fn list_attendances_with_pagination(
        &self,
        filter: AttendanceFilter,
        pagination: PaginationQuery,
    ) -> Result<AttendanceListResponse>;
    async fn list_attendances(&self, filter: AttendanceFilter) -> Result<Vec<Attendance>>;
    async fn update_attendance(
        &self,
        attendance_id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>>;
    async fn delete_attendance(&self, attendance_id: i64) -> Result<bool>;

    // Announcements
    async fn create_announcement(
        &self,
        announcement: CreateAnnouncementRequest,
        author_id: i64,
    ) -> Result<Announcement>;
    async fn get_announcement_by_id(&self, announcement_id: i64) -> Result<Option<Announcement>>;
    async fn list_announcements_with_pagination(
        &self,
        query: AnnouncementListParams,
        visibility: AnnouncementVisibility,
    ) -> Result<AnnouncementListResponse>;
    async fn update_announcement(
        &self,
        announcement_id: i64,
        update: UpdateAnnouncementRequest,
    ) -> Result<Option<Announcement>>;
    async fn delete_announcement(&self, announcement_id: i64) -> Result<bool>;

    // Schedules
    async fn create_schedule(&self, schedule: CreateScheduleRequest) -> Result<Schedule>;
    async fn get_schedule_by_id(&self, schedule_id: i64) -> Result<Option<Schedule>>;
    /// Ordered by day, then start time.
    async fn list_schedules(&self, filter: ScheduleFilter) -> Result<Vec<Schedule>>;
    async fn update_schedule(
        &self,
        schedule_id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<Option<Schedule>>;
    async fn delete_schedule(&self, schedule_id: i64) -> Result<bool>;

    // Files
    async fn create_file(
        &self,
        download_token: &str,
        original_name: &str,
        stored_name: &str,
        file_size: i64,
        content_type: &str,
        user_id: i64,
    ) -> Result<File>;
    async fn get_file_by_token(&self, download_token: &str) -> Result<Option<File>>;

    // Settings
    async fn list_all_settings(&self) -> Result<Vec<SystemSetting>>;
    async fn get_setting_by_key(&self, key: &str) -> Result<Option<SystemSetting>>;
    /// Writes the value and its audit row together.
    async fn update_setting(
        &self,
        key: &str,
        value: &str,
        user_id: i64,
        ip_address: Option<String>,
    ) -> Result<SystemSetting>;
    async fn list_setting_audits(
        &self,
        query: SettingAuditParams,
    ) -> Result<SettingAuditListResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
