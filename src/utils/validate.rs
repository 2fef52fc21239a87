use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

// NIS/NIP are digit strings; NIP is 18 digits, NIS/NISN 4 to 10.
static IDENTITY_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4,18}$").expect("Invalid identity number regex"));

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}$").expect("Invalid time regex"));

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Invalid date regex"));

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 5 || username.len() > 16 {
        return Err("Username length must be between 5 and 16 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_identity_number(number: &str) -> Result<(), &'static str> {
    if !IDENTITY_NUMBER_RE.is_match(number) {
        return Err("Identity number must be 4 to 18 digits");
    }
    Ok(())
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, &'static str> {
    if !DATE_RE.is_match(value) {
        return Err("Date must use the YYYY-MM-DD format");
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| "Date is not a valid calendar day")
}

/// Parses a 24-hour `HH:MM` time of day.
pub fn parse_time(value: &str) -> Result<NaiveTime, &'static str> {
    if !TIME_RE.is_match(value) {
        return Err("Time must use the HH:MM format");
    }
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| "Time is not a valid time of day")
}

#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// Password policy: at least 8 characters with upper case, lower case and a digit,
/// and not one of the well-known weak passwords.
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "Qwerty123",
        "Abcd1234",
        "Sekolah123",
        "Spada123",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("guru_01").is_ok());
        assert!(validate_username("abc").is_err());
        assert!(validate_username("seventeen-chars-x").is_err());
        assert!(validate_username("bad name").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("siswa@sman1.sch.id").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_identity_number() {
        assert!(validate_identity_number("0051234567").is_ok());
        assert!(validate_identity_number("198705122010011003").is_ok());
        assert!(validate_identity_number("12a4").is_err());
        assert!(validate_identity_number("123").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2025-09-01").is_ok());
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("01-09-2025").is_err());
        assert!(parse_date("2025-9-1").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(
            parse_time("07:30").ok(),
            NaiveTime::from_hms_opt(7, 30, 0)
        );
        assert!(parse_time("24:00").is_err());
        assert!(parse_time("7:30").is_err());
        assert!(parse_time("07:60").is_err());
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("BelajarRust2025").is_valid);
    }

    #[test]
    fn test_password_failures_are_reported_together() {
        let result = validate_password("abc");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one digit")
        );
        assert!(validate_password_simple("abc").unwrap_err().contains("; "));
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Spada123");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }
}
