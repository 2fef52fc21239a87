//! SeaORM storage for SQLite, PostgreSQL and MySQL.

mod announcements;
mod assignments;
mod attendances;
mod classes;
mod files;
mod materials;
mod schedules;
mod subjects;
mod submissions;
mod system_settings;
mod topics;
mod users;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{Result, SpadaError};
use crate::models::PaginationInfo;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait, Select};
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// Connects with the configured database and runs pending migrations.
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    pub async fn connect(url: &str, pool_size: u32, timeout_secs: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout_secs).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout_secs).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Migration failed: {e}")))?;

        info!("SeaORM storage ready, database: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite with WAL and pragma tuning. In-memory databases live as long as
    /// their connection, so those pools never recycle connections.
    async fn connect_sqlite(
        url: &str,
        pool_size: u32,
        timeout_secs: u64,
    ) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SpadaError::database_config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");
        }

        let mut pool = SqlitePoolOptions::new()
            .max_connections(if in_memory { 1 } else { pool_size })
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout_secs));
        pool = if in_memory {
            pool.idle_timeout(None).max_lifetime(None)
        } else {
            pool.idle_timeout(Duration::from_secs(300))
        };

        let pool = pool
            .connect_with(opt)
            .await
            .map_err(|e| SpadaError::database_connection(format!("SQLite connection failed: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// PostgreSQL, MySQL and friends.
    async fn connect_generic(
        url: &str,
        pool_size: u32,
        timeout_secs: u64,
    ) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(pool_size.min(5))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .acquire_timeout(Duration::from_secs(timeout_secs))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt).await.map_err(|e| {
            SpadaError::database_connection(format!("Unable to connect to database: {e}"))
        })
    }

    /// Infers the backend from the URL; bare `.db`/`.sqlite` paths become SQLite URLs.
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SpadaError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or a .db/.sqlite path"
            )))
        }
    }

    /// Runs `select` through the paginator; `page` is 1-based.
    pub(crate) async fn fetch_page<E>(
        &self,
        select: Select<E>,
        page: u64,
        size: u64,
    ) -> Result<(Vec<E::Model>, PaginationInfo)>
    where
        E: EntityTrait,
        E::Model: Send + Sync + 'static,
    {
        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await?;
        let pages = paginator.num_pages().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((items, PaginationInfo::new(page, size, total, pages)))
    }
}

// Storage trait implementation
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

use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListParams) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn list_students_by_class(&self, class_id: i64) -> Result<Vec<User>> {
        self.list_students_by_class_impl(class_id).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users_by_role(&self, role: UserRole) -> Result<u64> {
        self.count_users_by_role_impl(role).await
    }

    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn get_class_by_homeroom_teacher(&self, teacher_id: i64) -> Result<Option<Class>> {
        self.get_class_by_homeroom_teacher_impl(teacher_id).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListParams,
    ) -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.update_class_impl(class_id, update).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    async fn count_classes(&self) -> Result<u64> {
        self.count_classes_impl().await
    }

    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(subject_id).await
    }

    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListParams,
    ) -> Result<SubjectListResponse> {
        self.list_subjects_with_pagination_impl(query).await
    }

    async fn list_subjects_by_class(&self, class_id: i64) -> Result<Vec<Subject>> {
        self.list_subjects_by_class_impl(class_id).await
    }

    async fn list_subject_ids_by_teacher(&self, teacher_id: i64) -> Result<Vec<i64>> {
        self.list_subject_ids_by_teacher_impl(teacher_id).await
    }

    async fn update_subject(
        &self,
        subject_id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(subject_id, update).await
    }

    async fn delete_subject(&self, subject_id: i64) -> Result<bool> {
        self.delete_subject_impl(subject_id).await
    }

    async fn count_subjects(&self) -> Result<u64> {
        self.count_subjects_impl().await
    }

    async fn create_topic(&self, topic: CreateTopicRequest) -> Result<Topic> {
        self.create_topic_impl(topic).await
    }

    async fn get_topic_by_id(&self, topic_id: i64) -> Result<Option<Topic>> {
        self.get_topic_by_id_impl(topic_id).await
    }

    async fn list_topics_by_subject(&self, subject_id: i64) -> Result<Vec<Topic>> {
        self.list_topics_by_subject_impl(subject_id).await
    }

    async fn update_topic(
        &self,
        topic_id: i64,
        update: UpdateTopicRequest,
    ) -> Result<Option<Topic>> {
        self.update_topic_impl(topic_id, update).await
    }

    async fn delete_topic(&self, topic_id: i64) -> Result<bool> {
        self.delete_topic_impl(topic_id).await
    }

    async fn create_material(
        &self,
        material: CreateMaterialRequest,
        created_by: i64,
    ) -> Result<Material> {
        self.create_material_impl(material, created_by).await
    }

    async fn get_material_by_id(&self, material_id: i64) -> Result<Option<Material>> {
        self.get_material_by_id_impl(material_id).await
    }

    async fn list_materials_by_topic(&self, topic_id: i64) -> Result<Vec<Material>> {
        self.list_materials_by_topic_impl(topic_id).await
    }

    async fn update_material(
        &self,
        material_id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>> {
        self.update_material_impl(material_id, update).await
    }

    async fn delete_material(&self, material_id: i64) -> Result<bool> {
        self.delete_material_impl(material_id).await
    }

    async fn create_assignment(
        &self,
        assignment: CreateAssignmentRequest,
        created_by: i64,
    ) -> Result<Assignment> {
        self.create_assignment_impl(assignment, created_by).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_with_pagination_impl(query).await
    }

    async fn list_assignments_by_subjects(&self, subject_ids: &[i64]) -> Result<Vec<Assignment>> {
        self.list_assignments_by_subjects_impl(subject_ids).await
    }

    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(assignment_id, update).await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(assignment_id).await
    }

    async fn count_assignments(&self) -> Result<u64> {
        self.count_assignments_impl().await
    }

    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: Option<String>,
        attachment: Option<String>,
        status: SubmissionStatus,
    ) -> Result<Submission> {
        self.upsert_submission_impl(assignment_id, student_id, content, attachment, status).await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_by_assignment_and_student_impl(assignment_id, student_id).await
    }

    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(query).await
    }

    async fn list_graded_submissions_by_assignments(
        &self,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>> {
        self.list_graded_submissions_by_assignments_impl(assignment_ids).await
    }

    async fn grade_submission(
        &self,
        submission_id: i64,
        score: f64,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<Submission>> {
        self.grade_submission_impl(submission_id, score, feedback, graded_by).await
    }

    async fn delete_submission(&self, submission_id: i64) -> Result<bool> {
        self.delete_submission_impl(submission_id).await
    }

    async fn count_submissions_by_status(&self, status: SubmissionStatus) -> Result<u64> {
        self.count_submissions_by_status_impl(status).await
    }

    async fn record_attendances(
        &self,
        subject_id: i64,
        date: &str,
        entries: Vec<AttendanceEntry>,
        recorded_by: i64,
    ) -> Result<Vec<Attendance>> {
        self.record_attendances_impl(subject_id, date, entries, recorded_by).await
    }

    async fn get_attendance_by_id(&self, attendance_id: i64) -> Result<Option<Attendance>> {
        self.get_attendance_by_id_impl(attendance_id).await
    }

    async fn list_attendances_with_pagination(
        &self,
        filter: AttendanceFilter,
        pagination: PaginationQuery,
    ) -> Result<AttendanceListResponse> {
        self.list_attendances_with_pagination_impl(filter, pagination).await
    }

    async fn list_attendances(&self, filter: AttendanceFilter) -> Result<Vec<Attendance>> {
        self.list_attendances_impl(filter).await
    }

    async fn update_attendance(
        &self,
        attendance_id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>> {
        self.update_attendance_impl(attendance_id, update).await
    }

    async fn delete_attendance(&self, attendance_id: i64) -> Result<bool> {
        self.delete_attendance_impl(attendance_id).await
    }

    async fn create_announcement(
        &self,
        announcement: CreateAnnouncementRequest,
        author_id: i64,
    ) -> Result<Announcement> {
        self.create_announcement_impl(announcement, author_id).await
    }

    async fn get_announcement_by_id(&self, announcement_id: i64) -> Result<Option<Announcement>> {
        self.get_announcement_by_id_impl(announcement_id).await
    }

    async fn list_announcements_with_pagination(
        &self,
        query: AnnouncementListParams,
        visibility: AnnouncementVisibility,
    ) -> Result<AnnouncementListResponse> {
        self.list_announcements_with_pagination_impl(query, visibility).await
    }

    async fn update_announcement(
        &self,
        announcement_id: i64,
        update: UpdateAnnouncementRequest,
    ) -> Result<Option<Announcement>> {
        self.update_announcement_impl(announcement_id, update).await
    }

    async fn delete_announcement(&self, announcement_id: i64) -> Result<bool> {
        self.delete_announcement_impl(announcement_id).await
    }

    async fn create_schedule(&self, schedule: CreateScheduleRequest) -> Result<Schedule> {
        self.create_schedule_impl(schedule).await
    }

    async fn get_schedule_by_id(&self, schedule_id: i64) -> Result<Option<Schedule>> {
        self.get_schedule_by_id_impl(schedule_id).await
    }

    async fn list_schedules(&self, filter: ScheduleFilter) -> Result<Vec<Schedule>> {
        self.list_schedules_impl(filter).await
    }

    async fn update_schedule(
        &self,
        schedule_id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<Option<Schedule>> {
        self.update_schedule_impl(schedule_id, update).await
    }

    async fn delete_schedule(&self, schedule_id: i64) -> Result<bool> {
        self.delete_schedule_impl(schedule_id).await
    }

    async fn create_file(
        &self,
        download_token: &str,
        original_name: &str,
        stored_name: &str,
        file_size: i64,
        content_type: &str,
        user_id: i64,
    ) -> Result<File> {
        self.create_file_impl(download_token, original_name, stored_name, file_size, content_type, user_id)
            .await
    }

    async fn get_file_by_token(&self, download_token: &str) -> Result<Option<File>> {
        self.get_file_by_token_impl(download_token).await
    }

    async fn list_all_settings(&self) -> Result<Vec<SystemSetting>> {
        self.list_all_settings_impl().await
    }

    async fn get_setting_by_key(&self, key: &str) -> Result<Option<SystemSetting>> {
        self.get_setting_by_key_impl(key).await
    }

    async fn update_setting(
        &self,
        key: &str,
        value: &str,
        user_id: i64,
        ip_address: Option<String>,
    ) -> Result<SystemSetting> {
        self.update_setting_impl(key, value, user_id, ip_address).await
    }

    async fn list_setting_audits(
        &self,
        query: SettingAuditParams,
    ) -> Result<SettingAuditListResponse> {
        self.list_setting_audits_impl(query).await
    }
}
