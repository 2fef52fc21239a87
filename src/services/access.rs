//! Ownership checks shared by services, applied after the role guard.

use actix_web::{HttpRequest, Result as ActixResult};
use std::sync::Arc;

use crate::errors::ApiError;
use crate::middlewares::{AuthClaims, RequireJWT};
use crate::models::ErrorCode;
use crate::models::subjects::entities::Subject;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;

/// Claims of the caller; 401 when the JWT layer did not run.
pub fn current_user(req: &HttpRequest) -> Result<AuthClaims, ApiError> {
    RequireJWT::extract_claims(req).ok_or_else(|| ApiError::unauthorized("Authentication required"))
}

/// The caller's user row. A token for a deleted account is treated as unauthenticated.
pub async fn current_account(storage: &Arc<dyn Storage>, claims: AuthClaims) -> ActixResult<User> {
    storage
        .get_user_by_id(claims.user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Account no longer exists").into())
}

/// Class of a student caller, `None` for staff or unassigned students.
pub async fn student_class_id(
    storage: &Arc<dyn Storage>,
    claims: AuthClaims,
) -> ActixResult<Option<i64>> {
    if claims.role != UserRole::Student {
        return Ok(None);
    }
    Ok(current_account(storage, claims).await?.class_id)
}

pub async fn load_subject(storage: &Arc<dyn Storage>, subject_id: i64) -> ActixResult<Subject> {
    storage
        .get_subject_by_id(subject_id)
        .await?
        .ok_or_else(|| ApiError::not_found(ErrorCode::SubjectNotFound, "Subject not found").into())
}

/// Writes to a subject's content: admins, or the teacher assigned to it.
pub fn ensure_subject_teacher(claims: AuthClaims, subject: &Subject) -> Result<(), ApiError> {
    match claims.role {
        UserRole::Admin => Ok(()),
        UserRole::Teacher if subject.teacher_id == claims.user_id => Ok(()),
        _ => Err(ApiError::forbidden(
            ErrorCode::NotSubjectTeacher,
            "Only the subject's teacher can modify it",
        )),
    }
}

/// Reads of a subject's content: staff, or students of the subject's class.
pub async fn ensure_subject_visible(
    storage: &Arc<dyn Storage>,
    claims: AuthClaims,
    subject: &Subject,
) -> ActixResult<()> {
    if claims.role.is_staff() {
        return Ok(());
    }
    match student_class_id(storage, claims).await? {
        Some(class_id) if class_id == subject.class_id => Ok(()),
        _ => Err(ApiError::forbidden(
            ErrorCode::Forbidden,
            "This subject belongs to another class",
        )
        .into()),
    }
}

/// Subjects whose content the caller may read; `None` means unrestricted (admins).
pub async fn visible_subject_ids(
    storage: &Arc<dyn Storage>,
    claims: AuthClaims,
) -> ActixResult<Option<Vec<i64>>> {
    match claims.role {
        UserRole::Admin => Ok(None),
        UserRole::Teacher => Ok(Some(
            storage.list_subject_ids_by_teacher(claims.user_id).await?,
        )),
        UserRole::Student => match student_class_id(storage, claims).await? {
            Some(class_id) => Ok(Some(
                storage
                    .list_subjects_by_class(class_id)
                    .await?
                    .into_iter()
                    .map(|s| s.id)
                    .collect(),
            )),
            None => Ok(Some(Vec::new())),
        },
    }
}

/// Attachments are download tokens of previously uploaded files.
pub async fn ensure_attachment(
    storage: &Arc<dyn Storage>,
    attachment: Option<&str>,
) -> ActixResult<()> {
    if let Some(token) = attachment
        && storage.get_file_by_token(token).await?.is_none()
    {
        return Err(ApiError::not_found(
            ErrorCode::FileNotFound,
            format!("Attachment '{token}' does not exist"),
        )
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(teacher_id: i64) -> Subject {
        let now = chrono::Utc::now();
        Subject {
            id: 1,
            class_id: 1,
            teacher_id,
            name: "Fisika".into(),
            code: "FIS-10A".into(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn claims(user_id: i64, role: UserRole) -> AuthClaims {
        AuthClaims { user_id, role }
    }

    #[test]
    fn test_subject_teacher_rule() {
        let subject = subject(7);
        assert!(ensure_subject_teacher(claims(7, UserRole::Teacher), &subject).is_ok());
        assert!(ensure_subject_teacher(claims(1, UserRole::Admin), &subject).is_ok());
        assert!(ensure_subject_teacher(claims(8, UserRole::Teacher), &subject).is_err());
        assert!(ensure_subject_teacher(claims(7, UserRole::Student), &subject).is_err());
    }
}
