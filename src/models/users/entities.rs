use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;

define_string_enum! {
    /// Account role carried in access tokens.
    UserRole, "user role", "../web/src/types/generated/user.ts" {
        Admin => "admin",
        Teacher => "teacher",
        Student => "student",
    }
}

impl UserRole {
    pub fn admin_roles() -> &'static [UserRole] {
        &[UserRole::Admin]
    }

    /// Admins and teachers.
    pub fn staff_roles() -> &'static [UserRole] {
        &[UserRole::Admin, UserRole::Teacher]
    }

    pub fn all_roles() -> &'static [UserRole] {
        UserRole::ALL
    }

    pub fn is_staff(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Teacher)
    }
}

define_string_enum! {
    UserStatus, "user status", "../web/src/types/generated/user.ts" {
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub display_name: Option<String>,
    /// NIS for students, NIP for teachers.
    pub identity_number: Option<String>,
    /// Class a student belongs to.
    pub class_id: Option<i64>,
    pub avatar_url: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Name shown in reports, falling back to the username.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("teacher".parse::<UserRole>(), Ok(UserRole::Teacher));
        let err = "user".parse::<UserRole>().unwrap_err();
        assert!(err.contains("admin, teacher, student"));
        let role: UserRole = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, UserRole::Student);
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_role_sets() {
        assert_eq!(UserRole::admin_roles(), &[UserRole::Admin]);
        assert!(UserRole::staff_roles().contains(&UserRole::Teacher));
        assert!(!UserRole::staff_roles().contains(&UserRole::Student));
        assert_eq!(UserRole::all_roles().len(), 3);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let now = chrono::Utc::now();
        let user = User {
            id: 1,
            username: "guru01".into(),
            email: "guru01@sekolah.id".into(),
            password_hash: "$argon2id$secret".into(),
            role: UserRole::Teacher,
            status: UserStatus::Active,
            display_name: None,
            identity_number: None,
            class_id: None,
            avatar_url: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert_eq!(user.label(), "guru01");
    }
}
