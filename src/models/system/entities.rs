use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;

define_string_enum! {
    /// How a setting's text value is interpreted.
    SettingValueType, "setting value type", "../web/src/types/generated/system.ts" {
        String => "string",
        Integer => "integer",
        Boolean => "boolean",
        JsonArray => "json_array",
    }
}

impl SettingValueType {
    /// Checks that `value` parses as this type.
    pub fn validate(&self, value: &str) -> Result<(), String> {
        match self {
            SettingValueType::String => Ok(()),
            SettingValueType::Integer => value
                .trim()
                .parse::<i64>()
                .map(|_| ())
                .map_err(|_| format!("'{value}' is not an integer")),
            SettingValueType::Boolean => match value.trim() {
                "true" | "false" => Ok(()),
                _ => Err(format!("'{value}' is not a boolean (true/false)")),
            },
            SettingValueType::JsonArray => {
                match serde_json::from_str::<serde_json::Value>(value) {
                    Ok(serde_json::Value::Array(_)) => Ok(()),
                    _ => Err(format!("'{value}' is not a JSON array")),
                }
            }
        }
    }
}

/// Settings the application reads at runtime through `DynamicConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownSettingKey {
    SchoolName,
    AcademicYear,
    Semester,
    AccessTokenExpiry,
    UploadMaxSize,
    UploadAllowedTypes,
}

impl KnownSettingKey {
    pub const ALL: &'static [KnownSettingKey] = &[
        KnownSettingKey::SchoolName,
        KnownSettingKey::AcademicYear,
        KnownSettingKey::Semester,
        KnownSettingKey::AccessTokenExpiry,
        KnownSettingKey::UploadMaxSize,
        KnownSettingKey::UploadAllowedTypes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KnownSettingKey::SchoolName => "app.school_name",
            KnownSettingKey::AcademicYear => "app.academic_year",
            KnownSettingKey::Semester => "app.semester",
            KnownSettingKey::AccessTokenExpiry => "jwt.access_token_expiry",
            KnownSettingKey::UploadMaxSize => "upload.max_size",
            KnownSettingKey::UploadAllowedTypes => "upload.allowed_types",
        }
    }

    pub fn value_type(&self) -> SettingValueType {
        match self {
            KnownSettingKey::SchoolName | KnownSettingKey::AcademicYear => {
                SettingValueType::String
            }
            KnownSettingKey::Semester
            | KnownSettingKey::AccessTokenExpiry
            | KnownSettingKey::UploadMaxSize => SettingValueType::Integer,
            KnownSettingKey::UploadAllowedTypes => SettingValueType::JsonArray,
        }
    }
}

impl std::str::FromStr for KnownSettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KnownSettingKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Unknown setting key: {s}"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/system.ts")]
pub struct SystemSetting {
    pub key: String,
    pub value: String,
    pub value_type: SettingValueType,
    pub description: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub updated_by: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/system.ts")]
pub struct SettingAudit {
    pub id: i64,
    pub setting_key: String,
    pub old_value: Option<String>,
    pub new_value: String,
    pub changed_by: i64,
    pub changed_at: chrono::DateTime<chrono::Utc>,
    pub ip_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_validation() {
        assert!(SettingValueType::Integer.validate("1440").is_ok());
        assert!(SettingValueType::Integer.validate("abc").is_err());
        assert!(SettingValueType::Boolean.validate("true").is_ok());
        assert!(SettingValueType::Boolean.validate("yes").is_err());
        assert!(SettingValueType::JsonArray.validate(r#"["pdf","png"]"#).is_ok());
        assert!(SettingValueType::JsonArray.validate(r#"{"a":1}"#).is_err());
        assert!(SettingValueType::String.validate("anything").is_ok());
    }

    #[test]
    fn test_known_keys_roundtrip() {
        for key in KnownSettingKey::ALL {
            assert_eq!(key.as_str().parse::<KnownSettingKey>().unwrap(), *key);
        }
        assert!("cors.max_age".parse::<KnownSettingKey>().is_err());
    }
}
