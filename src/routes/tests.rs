//! End-to-end checks over the mounted route groups, backed by in-memory SQLite.

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use super::configure_services;
use crate::cache::ObjectCache;
use crate::cache::object_cache::moka::MokaCacheWrapper;
use crate::config::AppConfig;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::system::entities::KnownSettingKey;
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::services::DynamicConfig;
use crate::storage::sea_orm_storage::SeaOrmStorage;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::hash_password;

struct School {
    storage: Arc<dyn Storage>,
    admin: User,
    teacher: User,
    other_teacher: User,
    student: User,
    class_id: i64,
    subject_id: i64,
}

async fn user(
    storage: &Arc<dyn Storage>,
    username: &str,
    role: UserRole,
    class_id: Option<i64>,
) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@spada.test"),
            password: hash_password("Rahasia123").unwrap(),
            role,
            display_name: None,
            identity_number: None,
            class_id,
            avatar_url: None,
        })
        .await
        .unwrap()
}

async fn school() -> School {
    let storage: Arc<dyn Storage> = Arc::new(
        SeaOrmStorage::connect("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory database"),
    );
    let admin = user(&storage, "admin01", UserRole::Admin, None).await;
    let teacher = user(&storage, "guru01", UserRole::Teacher, None).await;
    let other_teacher = user(&storage, "guru02", UserRole::Teacher, None).await;
    let class = storage
        .create_class(CreateClassRequest {
            name: "X IPA 1".to_string(),
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
            name: "Biologi".to_string(),
            code: "BIO-10A".to_string(),
            description: None,
        })
        .await
        .unwrap();
    let student = user(&storage, "siswa01", UserRole::Student, Some(class.id)).await;

    School {
        storage,
        admin,
        teacher,
        other_teacher,
        student,
        class_id: class.id,
        subject_id: subject.id,
    }
}

fn bearer(user: &User) -> (&'static str, String) {
    let token = JwtUtils::generate_access_token(user.id, user.role.as_str(), 30).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

macro_rules! spada_app {
    ($school:expr) => {{
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_capacity(64, 60));
        test::init_service(
            App::new()
                .app_data(web::Data::new($school.storage.clone()))
                .app_data(web::Data::new(cache))
                .configure(|cfg| configure_services(cfg, AppConfig::get())),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_health_is_public() {
    let school = school().await;
    let app = spada_app!(school);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_login_then_profile() {
    let school = school().await;
    let app = spada_app!(school);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .peer_addr("10.20.0.1:40000".parse().unwrap())
        .set_json(json!({ "username": "siswa01@spada.test", "password": "Rahasia123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["access_token"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["user"]["username"], "siswa01");
    assert!(body["data"]["user"].get("password_hash").is_none());

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["id"], school.student.id);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .peer_addr("10.20.0.1:40000".parse().unwrap())
        .set_json(json!({ "username": "siswa01", "password": "salah" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_token_and_role_guards() {
    let school = school().await;
    let app = spada_app!(school);

    let req = test::TestRequest::get().uri("/api/v1/classes").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/classes")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/classes")
        .insert_header(bearer(&school.student))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let class = json!({ "name": "XI IPS 2", "grade_level": 11, "academic_year": "2025/2026" });
    let req = test::TestRequest::post()
        .uri("/api/v1/classes")
        .insert_header(bearer(&school.student))
        .set_json(&class)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/classes")
        .insert_header(bearer(&school.admin))
        .set_json(&class)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(bearer(&school.teacher))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[actix_web::test]
async fn test_only_the_subject_teacher_writes_topics() {
    let school = school().await;
    let app = spada_app!(school);
    let topic = json!({ "subject_id": school.subject_id, "title": "Sel" });

    let req = test::TestRequest::post()
        .uri("/api/v1/topics")
        .insert_header(bearer(&school.other_teacher))
        .set_json(&topic)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/topics")
        .insert_header(bearer(&school.teacher))
        .set_json(&topic)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/subjects/{}/topics", school.subject_id))
        .insert_header(bearer(&school.student))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn test_submission_grading_flow() {
    let school = school().await;
    let app = spada_app!(school);

    let req = test::TestRequest::post()
        .uri("/api/v1/assignments")
        .insert_header(bearer(&school.teacher))
        .set_json(json!({
            "subject_id": school.subject_id,
            "title": "Laporan praktikum",
            "max_score": 50.0
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let assignment_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/submissions")
        .insert_header(bearer(&school.student))
        .set_json(json!({ "assignment_id": assignment_id }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/submissions")
        .insert_header(bearer(&school.student))
        .set_json(json!({ "assignment_id": assignment_id, "content": "Hasil pengamatan" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let submission_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["status"], "submitted");

    // teachers cannot submit
    let req = test::TestRequest::post()
        .uri("/api/v1/submissions")
        .insert_header(bearer(&school.teacher))
        .set_json(json!({ "assignment_id": assignment_id, "content": "x" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let grade_uri = format!("/api/v1/submissions/{submission_id}/grade");
    let req = test::TestRequest::put()
        .uri(&grade_uri)
        .insert_header(bearer(&school.teacher))
        .set_json(json!({ "score": 51.0 }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::put()
        .uri(&grade_uri)
        .insert_header(bearer(&school.other_teacher))
        .set_json(json!({ "score": 40.0 }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::put()
        .uri(&grade_uri)
        .insert_header(bearer(&school.teacher))
        .set_json(json!({ "score": 40.0, "feedback": "Rapi" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "graded");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/submissions/{submission_id}"))
        .insert_header(bearer(&school.student))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CONFLICT
    );

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/grades/report?subject_id={}", school.subject_id))
        .insert_header(bearer(&school.teacher))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["students"][0]["average_percentage"], 80.0);
}

#[actix_web::test]
async fn test_schedule_validation_and_my_schedule() {
    let school = school().await;
    let app = spada_app!(school);
    let entry = |start: &str, end: &str| {
        json!({
            "class_id": school.class_id,
            "subject_id": school.subject_id,
            "day_of_week": 1,
            "start_time": start,
            "end_time": end
        })
    };

    for (body, expected) in [
        (entry("07:00", "08:30"), StatusCode::CREATED),
        (entry("08:00", "09:00"), StatusCode::CONFLICT),
        (entry("09:00", "08:00"), StatusCode::BAD_REQUEST),
        (entry("08:30", "10:00"), StatusCode::CREATED),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/v1/schedules")
            .insert_header(bearer(&school.admin))
            .set_json(&body)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), expected, "{body}");
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/schedules/me")
        .insert_header(bearer(&school.student))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let starts: Vec<&str> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["start_time"].as_str())
        .collect();
    assert_eq!(starts, vec!["07:00", "08:30"]);

    let req = test::TestRequest::post()
        .uri("/api/v1/schedules")
        .insert_header(bearer(&school.teacher))
        .set_json(entry("13:00", "14:00"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[actix_web::test]
async fn test_attendance_is_scoped_for_students() {
    let school = school().await;
    let app = spada_app!(school);
    let classmate = user(&school.storage, "siswa02", UserRole::Student, Some(school.class_id)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/attendances")
        .insert_header(bearer(&school.teacher))
        .set_json(json!({
            "subject_id": school.subject_id,
            "date": "2025-09-01",
            "entries": [
                { "student_id": school.student.id, "status": "sick" },
                { "student_id": classmate.id, "status": "present" }
            ]
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/v1/attendances")
        .insert_header(bearer(&school.teacher))
        .set_json(json!({
            "subject_id": school.subject_id,
            "date": "2025-13-01",
            "entries": [{ "student_id": school.student.id, "status": "present" }]
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/attendances")
        .insert_header(bearer(&school.student))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["status"], "sick");

    let req = test::TestRequest::get()
        .uri("/api/v1/homeroom/attendance")
        .insert_header(bearer(&school.teacher))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["students"].as_array().map(Vec::len), Some(2));

    let req = test::TestRequest::get()
        .uri("/api/v1/homeroom/class")
        .insert_header(bearer(&school.other_teacher))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[actix_web::test]
async fn test_admin_setting_update_is_validated() {
    let school = school().await;
    let app = spada_app!(school);

    let put = |key: &str, value: &str| {
        test::TestRequest::put()
            .uri(&format!("/api/v1/admin/settings/{key}"))
            .insert_header(bearer(&school.admin))
            .set_json(json!({ "value": value }))
            .to_request()
    };

    let resp = test::call_service(&app, put("app.semester", "5")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let resp = test::call_service(&app, put("unknown.key", "1")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = test::call_service(&app, put("app.school_name", "SMA Negeri 3")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/settings/audits")
        .insert_header(bearer(&school.admin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/dashboard")
        .insert_header(bearer(&school.teacher))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[actix_web::test]
async fn test_huge_page_number_is_clamped() {
    let school = school().await;
    let app = spada_app!(school);

    let req = test::TestRequest::get()
        .uri("/api/v1/classes?page=9223372036854775807&size=100")
        .insert_header(bearer(&school.admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["items"], json!([]));
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(
        body["data"]["pagination"]["page"],
        crate::models::common::pagination::MAX_PAGE
    );
}

const BOUNDARY: &str = "spada-test-boundary";

fn multipart_body(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, data) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn stored_files() -> usize {
    std::fs::read_dir(&AppConfig::get().upload.dir)
        .map(|entries| entries.count())
        .unwrap_or(0)
}

#[actix_web::test]
async fn test_file_upload_rules_and_download() {
    DynamicConfig::init(vec![(
        KnownSettingKey::UploadMaxSize.as_str().to_string(),
        "1024".to_string(),
    )])
    .await;
    let school = school().await;
    let app = spada_app!(school);

    let upload = |files: &[(&str, &[u8])], with_token: bool| {
        let mut req = test::TestRequest::post()
            .uri("/api/v1/files/upload")
            .insert_header((
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(multipart_body(files));
        if with_token {
            req = req.insert_header(bearer(&school.student));
        }
        req.to_request()
    };

    let before = stored_files();

    let resp = test::call_service(&app, upload(&[("catatan.txt", &b"isi"[..])], false)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let big = vec![b'a'; 2048];
    let resp = test::call_service(&app, upload(&[("besar.txt", big.as_slice())], true)).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let resp = test::call_service(&app, upload(&[("rpp.pdf", &b"bukan pdf"[..])], true)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(&app, upload(&[("setup.exe", &b"MZ"[..])], true)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        upload(&[("a.txt", &b"pertama"[..]), ("b.txt", &b"kedua"[..])], true),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(stored_files(), before);

    let content: &[u8] = b"Fotosintesis terjadi di kloroplas.";
    let resp = test::call_service(&app, upload(&[("catatan.txt", content)], true)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["download_token"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["file_name"], "catatan.txt");
    assert_eq!(body["data"]["size"], content.len());
    assert_eq!(stored_files(), before + 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/files/download/{token}"))
        .insert_header(bearer(&school.teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("filename=\"catatan.txt\""));
    assert_eq!(test::read_body(resp).await, content);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/files/download/{}", uuid::Uuid::new_v4()))
        .insert_header(bearer(&school.teacher))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let file = school.storage.get_file_by_token(&token).await.unwrap().unwrap();
    std::fs::remove_file(std::path::Path::new(&AppConfig::get().upload.dir).join(file.stored_name))
        .unwrap();
}
