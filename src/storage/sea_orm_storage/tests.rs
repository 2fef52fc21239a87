use super::SeaOrmStorage;
use crate::models::PaginationQuery;
use crate::models::announcements::requests::{
    AnnouncementListParams, AnnouncementVisibility, CreateAnnouncementRequest,
};
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::attendance::entities::AttendanceStatus;
use crate::models::attendance::requests::{AttendanceEntry, AttendanceFilter};
use crate::models::classes::requests::CreateClassRequest;
use crate::models::schedules::requests::{CreateScheduleRequest, ScheduleFilter};
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::submissions::entities::SubmissionStatus;
use crate::models::system::requests::SettingAuditParams;
use crate::models::topics::requests::CreateTopicRequest;
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::{CreateUserRequest, UserListParams};
use crate::storage::Storage;

async fn storage() -> SeaOrmStorage {
    SeaOrmStorage::connect("sqlite::memory:", 1, 5)
        .await
        .expect("in-memory database")
}

async fn user(storage: &SeaOrmStorage, username: &str, role: UserRole, class_id: Option<i64>) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@spada.test"),
            password: "hash".to_string(),
            role,
            display_name: None,
            identity_number: None,
            class_id,
            avatar_url: None,
        })
        .await
        .unwrap()
}

/// Class 10-A taught by one teacher, with one subject.
async fn school(storage: &SeaOrmStorage) -> (User, i64, i64) {
    let teacher = user(storage, "guru01", UserRole::Teacher, None).await;
    let class = storage
        .create_class(CreateClassRequest {
            name: "10-A".to_string(),
            grade_level: 10,
            academic_year: "2025/2026".to_string(),
            homeroom_teacher_id: Some(teacher.id),
        })
        .await
        .unwrap();
    let subject = storage
        .create_subject(CreateSubjectRequest {
            class_id: class.id,
            teacher_id: teacher.id,
            name: "Matematika".to_string(),
            code: "MTK-10A".to_string(),
            description: None,
        })
        .await
        .unwrap();
    (teacher, class.id, subject.id)
}

#[tokio::test]
async fn test_user_lookup_and_search() {
    let storage = storage().await;
    user(&storage, "siswa_01", UserRole::Student, None).await;
    user(&storage, "siswa%02", UserRole::Student, None).await;
    user(&storage, "admin01", UserRole::Admin, None).await;

    let found = storage
        .get_user_by_username_or_email("siswa_01@spada.test")
        .await
        .unwrap();
    assert_eq!(found.map(|u| u.username).as_deref(), Some("siswa_01"));

    let listed = storage
        .list_users_with_pagination(UserListParams {
            pagination: PaginationQuery::default(),
            role: None,
            status: None,
            class_id: None,
            search: Some("%".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(listed.pagination.total, 1);
    assert_eq!(listed.items[0].username, "siswa%02");

    assert_eq!(storage.count_users_by_role(UserRole::Student).await.unwrap(), 2);
}

#[tokio::test]
async fn test_duplicate_username_is_unique_violation() {
    let storage = storage().await;
    user(&storage, "siswa_01", UserRole::Student, None).await;
    let err = storage
        .create_user(CreateUserRequest {
            username: "siswa_01".to_string(),
            email: "other@spada.test".to_string(),
            password: "hash".to_string(),
            role: UserRole::Student,
            display_name: None,
            identity_number: None,
            class_id: None,
            avatar_url: None,
        })
        .await
        .unwrap_err();
    assert!(err.is_unique_violation());
}

#[tokio::test]
async fn test_delete_class_detaches_students_and_cascades() {
    let storage = storage().await;
    let (_, class_id, subject_id) = school(&storage).await;
    let student = user(&storage, "siswa_01", UserRole::Student, Some(class_id)).await;

    assert_eq!(storage.list_students_by_class(class_id).await.unwrap().len(), 1);
    assert!(storage.delete_class(class_id).await.unwrap());

    let student = storage.get_user_by_id(student.id).await.unwrap().unwrap();
    assert_eq!(student.class_id, None);
    assert!(storage.get_subject_by_id(subject_id).await.unwrap().is_none());
    assert!(!storage.delete_class(class_id).await.unwrap());
}

#[tokio::test]
async fn test_topic_positions_append() {
    let storage = storage().await;
    let (_, _, subject_id) = school(&storage).await;

    for title in ["Aljabar", "Geometri"] {
        storage
            .create_topic(CreateTopicRequest {
                subject_id,
                title: title.to_string(),
                description: None,
                position: None,
            })
            .await
            .unwrap();
    }

    let topics = storage.list_topics_by_subject(subject_id).await.unwrap();
    let positions: Vec<i32> = topics.iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![1, 2]);
}

#[tokio::test]
async fn test_resubmission_resets_grade() {
    let storage = storage().await;
    let (teacher, class_id, subject_id) = school(&storage).await;
    let student = user(&storage, "siswa_01", UserRole::Student, Some(class_id)).await;
    let assignment = storage
        .create_assignment(
            CreateAssignmentRequest {
                subject_id,
                topic_id: None,
                title: "Latihan 1".to_string(),
                description: None,
                attachment: None,
                max_score: None,
                deadline: None,
                allow_late: None,
            },
            teacher.id,
        )
        .await
        .unwrap();
    assert_eq!(assignment.max_score, 100.0);

    let first = storage
        .upsert_submission(
            assignment.id,
            student.id,
            Some("v1".to_string()),
            None,
            SubmissionStatus::Submitted,
        )
        .await
        .unwrap();
    let graded = storage
        .grade_submission(first.id, 80.0, Some("Bagus".to_string()), teacher.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(graded.status, SubmissionStatus::Graded);
    assert_eq!(graded.score, Some(80.0));

    let second = storage
        .upsert_submission(
            assignment.id,
            student.id,
            Some("v2".to_string()),
            None,
            SubmissionStatus::Late,
        )
        .await
        .unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.content.as_deref(), Some("v2"));
    assert_eq!(second.status, SubmissionStatus::Late);
    assert_eq!(second.score, None);
    assert_eq!(second.graded_by, None);
}

#[tokio::test]
async fn test_attendance_upsert_per_day() {
    let storage = storage().await;
    let (teacher, class_id, subject_id) = school(&storage).await;
    let student = user(&storage, "siswa_01", UserRole::Student, Some(class_id)).await;

    let entry = |status| AttendanceEntry {
        student_id: student.id,
        status,
        note: None,
    };

    storage
        .record_attendances(subject_id, "2025-09-01", vec![entry(AttendanceStatus::Absent)], teacher.id)
        .await
        .unwrap();
    let rows = storage
        .record_attendances(subject_id, "2025-09-01", vec![entry(AttendanceStatus::Sick)], teacher.id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, AttendanceStatus::Sick);

    storage
        .record_attendances(subject_id, "2025-09-02", vec![entry(AttendanceStatus::Present)], teacher.id)
        .await
        .unwrap();

    let all = storage
        .list_attendances(AttendanceFilter {
            student_id: Some(student.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let ranged = storage
        .list_attendances(AttendanceFilter {
            student_id: Some(student.id),
            date_from: Some("2025-09-02".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(ranged.len(), 1);
    assert_eq!(ranged[0].status, AttendanceStatus::Present);
}

#[tokio::test]
async fn test_announcement_visibility() {
    let storage = storage().await;
    let (teacher, class_id, _) = school(&storage).await;

    let post = |title: &str, class_id: Option<i64>, target_role: Option<UserRole>, pinned| {
        CreateAnnouncementRequest {
            title: title.to_string(),
            content: "...".to_string(),
            class_id,
            target_role,
            pinned,
        }
    };

    for req in [
        post("school", None, None, false),
        post("class", Some(class_id), None, false),
        post("teachers", None, Some(UserRole::Teacher), false),
        post("pinned", None, Some(UserRole::Student), true),
    ] {
        storage.create_announcement(req, teacher.id).await.unwrap();
    }

    let params = || AnnouncementListParams {
        pagination: PaginationQuery::default(),
        class_id: None,
    };

    let student_view = storage
        .list_announcements_with_pagination(
            params(),
            AnnouncementVisibility {
                role: Some(UserRole::Student),
                class_ids: vec![class_id],
            },
        )
        .await
        .unwrap();
    let titles: Vec<&str> = student_view.items.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles.len(), 3);
    assert_eq!(titles[0], "pinned");
    assert!(!titles.contains(&"teachers"));

    let outsider_view = storage
        .list_announcements_with_pagination(
            params(),
            AnnouncementVisibility {
                role: Some(UserRole::Student),
                class_ids: vec![],
            },
        )
        .await
        .unwrap();
    assert_eq!(outsider_view.pagination.total, 2);

    let admin_view = storage
        .list_announcements_with_pagination(
            params(),
            AnnouncementVisibility {
                role: None,
                class_ids: vec![],
            },
        )
        .await
        .unwrap();
    assert_eq!(admin_view.pagination.total, 4);
}

#[tokio::test]
async fn test_schedules_ordered_by_day_and_time() {
    let storage = storage().await;
    let (_, class_id, subject_id) = school(&storage).await;

    for (day, start, end) in [(2, "07:00", "08:00"), (1, "09:00", "10:00"), (1, "07:00", "08:30")] {
        storage
            .create_schedule(CreateScheduleRequest {
                class_id,
                subject_id,
                day_of_week: day,
                start_time: start.to_string(),
                end_time: end.to_string(),
                room: None,
            })
            .await
            .unwrap();
    }

    let schedules = storage
        .list_schedules(ScheduleFilter {
            class_id: Some(class_id),
            ..Default::default()
        })
        .await
        .unwrap();
    let order: Vec<(i32, &str)> = schedules
        .iter()
        .map(|s| (s.day_of_week, s.start_time.as_str()))
        .collect();
    assert_eq!(order, vec![(1, "07:00"), (1, "09:00"), (2, "07:00")]);
}

#[tokio::test]
async fn test_setting_update_is_audited() {
    let storage = storage().await;
    let admin = user(&storage, "admin01", UserRole::Admin, None).await;

    let before = storage
        .get_setting_by_key("app.school_name")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(before.value, "SPADA");

    let updated = storage
        .update_setting(
            "app.school_name",
            "SMA Negeri 1",
            admin.id,
            Some("127.0.0.1".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(updated.value, "SMA Negeri 1");
    assert_eq!(updated.updated_by, Some(admin.id));

    let audits = storage
        .list_setting_audits(SettingAuditParams {
            pagination: PaginationQuery::default(),
            key: Some("app.school_name".to_string()),
            changed_by: None,
        })
        .await
        .unwrap();
    assert_eq!(audits.pagination.total, 1);
    assert_eq!(audits.items[0].old_value.as_deref(), Some("SPADA"));
    assert_eq!(audits.items[0].ip_address.as_deref(), Some("127.0.0.1"));

    assert!(storage.update_setting("missing.key", "x", admin.id, None).await.is_err());
}
