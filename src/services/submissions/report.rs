use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::SubmissionService;
use crate::models::{
    ApiResponse,
    assignments::entities::Assignment,
    submissions::{
        entities::Submission,
        requests::GradeReportParams,
        responses::{GradeReportResponse, StudentGradeSummary},
    },
    users::entities::User,
};
use crate::services::access::{current_user, ensure_subject_teacher, load_subject};

/// Per-student averages over graded submissions. Students without grades get `None`.
pub(crate) fn summarize_grades(
    students: &[User],
    assignments: &[Assignment],
    submissions: &[Submission],
) -> Vec<StudentGradeSummary> {
    let max_scores: HashMap<i64, f64> = assignments.iter().map(|a| (a.id, a.max_score)).collect();

    // student -> (score sum, percentage sum, count)
    let mut totals: HashMap<i64, (f64, f64, i64)> = HashMap::new();
    for submission in submissions {
        let (Some(score), Some(max)) = (submission.score, max_scores.get(&submission.assignment_id))
        else {
            continue;
        };
        let entry = totals.entry(submission.student_id).or_default();
        entry.0 += score;
        if *max > 0.0 {
            entry.1 += score / max * 100.0;
        }
        entry.2 += 1;
    }

    students
        .iter()
        .map(|student| {
            let (score_sum, pct_sum, count) = totals.get(&student.id).copied().unwrap_or_default();
            let average = |sum: f64| (count > 0).then(|| round2(sum / count as f64));
            StudentGradeSummary {
                student_id: student.id,
                username: student.username.clone(),
                display_name: student.display_name.clone(),
                graded_count: count,
                average_score: average(score_sum),
                average_percentage: average(pct_sum),
            }
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub async fn grade_report(
    service: &SubmissionService,
    request: &HttpRequest,
    query: GradeReportParams,
) -> ActixResult<HttpResponse> {
    let claims = current_user(request)?;
    let storage = service.get_storage(request)?;

    let subject = load_subject(&storage, query.subject_id).await?;
    ensure_subject_teacher(claims, &subject)?;

    let students = storage.list_students_by_class(subject.class_id).await?;
    let assignments = storage.list_assignments_by_subjects(&[subject.id]).await?;
    let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
    let graded = storage
        .list_graded_submissions_by_assignments(&assignment_ids)
        .await?;

    let report = GradeReportResponse {
        subject_id: Some(subject.id),
        class_id: subject.class_id,
        assignment_count: assignments.len() as i64,
        students: summarize_grades(&students, &assignments, &graded),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        report,
        "Grade report retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::SubmissionStatus;
    use crate::models::users::entities::{UserRole, UserStatus};
    use chrono::Utc;

    fn student(id: i64) -> User {
        let now = Utc::now();
        User {
            id,
            username: format!("siswa{id:02}"),
            email: format!("siswa{id}@spada.test"),
            password_hash: String::new(),
            role: UserRole::Student,
            status: UserStatus::Active,
            display_name: None,
            identity_number: None,
            class_id: Some(1),
            avatar_url: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn assignment(id: i64, max_score: f64) -> Assignment {
        let now = Utc::now();
        Assignment {
            id,
            subject_id: 1,
            topic_id: None,
            title: format!("Tugas {id}"),
            description: None,
            attachment: None,
            max_score,
            deadline: None,
            allow_late: false,
            created_by: 1,
            created_at: now,
            updated_at: now,
        }
    }

    fn graded(assignment_id: i64, student_id: i64, score: f64) -> Submission {
        let now = Utc::now();
        Submission {
            id: assignment_id * 100 + student_id,
            assignment_id,
            student_id,
            content: None,
            attachment: None,
            status: SubmissionStatus::Graded,
            score: Some(score),
            feedback: None,
            graded_by: Some(1),
            graded_at: Some(now),
            submitted_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_summarize_grades_averages() {
        let students = [student(1), student(2)];
        let assignments = [assignment(10, 100.0), assignment(11, 50.0)];
        let submissions = [graded(10, 1, 80.0), graded(11, 1, 45.0)];

        let rows = summarize_grades(&students, &assignments, &submissions);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].graded_count, 2);
        assert_eq!(rows[0].average_score, Some(62.5));
        assert_eq!(rows[0].average_percentage, Some(85.0));

        assert_eq!(rows[1].graded_count, 0);
        assert_eq!(rows[1].average_score, None);
    }
}
