use crate::forms::FieldCheck;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MIN_AGE: i32 = 13;
pub const MAX_AGE: i32 = 120;

static UPPERCASE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]").expect("valid regex"));
static LOWERCASE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]").expect("valid regex"));
static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("valid regex"));
static SPECIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).expect("valid regex"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("valid regex"));
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("valid regex"));
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s").expect("valid regex"));

/// Length first, then each character class in turn; the first miss decides the
/// message. A non-empty confirmation must match.
pub fn validate_password(password: &str, confirm: &str) -> FieldCheck {
    const FIELD: &str = "password";

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return FieldCheck::fail(
            FIELD,
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters long"),
        );
    }
    if !UPPERCASE_RE.is_match(password) {
        return FieldCheck::fail(FIELD, "Password must contain at least one uppercase letter");
    }
    if !LOWERCASE_RE.is_match(password) {
        return FieldCheck::fail(FIELD, "Password must contain at least one lowercase letter");
    }
    if !DIGIT_RE.is_match(password) {
        return FieldCheck::fail(FIELD, "Password must contain at least one number");
    }
    if !SPECIAL_RE.is_match(password) {
        return FieldCheck::fail(FIELD, "Password must contain at least one special character");
    }

    match confirm {
        "" => FieldCheck::pass(FIELD, ""),
        c if c == password => FieldCheck::pass(FIELD, "Passwords match ✓"),
        _ => FieldCheck::fail(FIELD, "Passwords do not match"),
    }
}

/// An empty confirmation is not judged yet.
pub fn validate_confirm_password(password: &str, confirm: &str) -> FieldCheck {
    const FIELD: &str = "confirmPassword";

    if confirm.is_empty() {
        FieldCheck::pass(FIELD, "")
    } else if confirm == password {
        FieldCheck::pass(FIELD, "Passwords match ✓")
    } else {
        FieldCheck::fail(FIELD, "Passwords do not match")
    }
}

pub fn validate_email(email: &str) -> FieldCheck {
    const FIELD: &str = "email";

    let valid = EMAIL_RE.is_match(email);
    let message = match (email.is_empty(), valid) {
        (true, _) => "",
        (false, true) => "Valid email address ✓",
        (false, false) => "Please enter a valid email address",
    };
    FieldCheck {
        field: FIELD.to_string(),
        valid,
        message: message.to_string(),
    }
}

/// Whitespace is ignored, so `+91 98765 43210` passes.
pub fn validate_phone(phone: &str) -> FieldCheck {
    const FIELD: &str = "phone";

    let compact = WHITESPACE_RE.replace_all(phone, "");
    let valid = PHONE_RE.is_match(&compact);
    let message = match (phone.is_empty(), valid) {
        (true, _) => "",
        (false, true) => "Valid phone number ✓",
        (false, false) => "Please enter a valid phone number",
    };
    FieldCheck {
        field: FIELD.to_string(),
        valid,
        message: message.to_string(),
    }
}

pub fn validate_username(username: &str) -> FieldCheck {
    const FIELD: &str = "username";

    let valid = username.chars().count() >= MIN_USERNAME_LENGTH && USERNAME_RE.is_match(username);
    let message = match (username.is_empty(), valid) {
        (true, _) => "",
        (false, true) => "Username is available ✓",
        (false, false) => {
            "Username must be at least 3 characters and contain only letters, numbers, and underscores"
        }
    };
    FieldCheck {
        field: FIELD.to_string(),
        valid,
        message: message.to_string(),
    }
}

/// Whole years between `dob` and `today`, counting a birthday only once reached.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// `date_of_birth` is `YYYY-MM-DD` as sent by a date input.
pub fn validate_age(date_of_birth: &str, today: NaiveDate) -> FieldCheck {
    const FIELD: &str = "dateOfBirth";

    let Ok(dob) = NaiveDate::parse_from_str(date_of_birth.trim(), "%Y-%m-%d") else {
        let message = if date_of_birth.trim().is_empty() {
            ""
        } else {
            "Please enter a valid date of birth"
        };
        return FieldCheck::fail(FIELD, message);
    };

    let age = age_on(dob, today);
    if (MIN_AGE..=MAX_AGE).contains(&age) {
        FieldCheck::pass(FIELD, format!("Age: {age} years ✓"))
    } else {
        FieldCheck::fail(FIELD, "You must be at least 13 years old to register")
    }
}

pub fn validate_terms(accepted: bool) -> FieldCheck {
    if accepted {
        FieldCheck::pass("terms", "")
    } else {
        FieldCheck::fail("terms", "You must accept the terms and conditions")
    }
}

/// Login only asks for both fields to be filled in.
pub fn validate_login(username: &str, password: &str) -> FieldCheck {
    if username.trim().is_empty() || password.is_empty() {
        FieldCheck::fail("login", "Please fill in all fields")
    } else {
        FieldCheck::pass("login", "")
    }
}
