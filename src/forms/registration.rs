use crate::forms::validators::{
    validate_age, validate_confirm_password, validate_email, validate_password, validate_phone,
    validate_terms, validate_username,
};
use crate::forms::FieldCheck;
use crate::models::user::{CitizenUser, RegistrationForm};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationReport {
    pub valid: bool,
    pub checks: Vec<FieldCheck>,
}

impl RegistrationReport {
    pub fn failures(&self) -> impl Iterator<Item = &FieldCheck> {
        self.checks.iter().filter(|check| !check.valid)
    }
}

/// Runs every field check; submission is blocked unless all pass.
pub fn validate_registration(form: &RegistrationForm, today: NaiveDate) -> RegistrationReport {
    let checks = vec![
        validate_password(&form.password, &form.confirm_password),
        validate_confirm_password(&form.password, &form.confirm_password),
        validate_email(&form.email),
        validate_phone(&form.phone),
        validate_username(&form.username),
        validate_age(&form.date_of_birth, today),
        validate_terms(form.terms_accepted),
    ];

    RegistrationReport {
        valid: checks.iter().all(|check| check.valid),
        checks,
    }
}

/// The stored user record. Passwords are dropped here.
pub fn to_citizen_user(form: &RegistrationForm, now: DateTime<Utc>) -> CitizenUser {
    CitizenUser {
        user_id: uuid::Uuid::new_v4().to_string(),
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        date_of_birth: form.date_of_birth.clone(),
        address: form.address.trim().to_string(),
        city: form.city.trim().to_string(),
        pincode: form.pincode.trim().to_string(),
        username: form.username.clone(),
        email_notifications: form.email_notifications,
        sms_notifications: form.sms_notifications,
        issue_updates: form.issue_updates,
        interests: form.interests.clone(),
        registration_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

#[cfg(test)]
pub(crate) fn valid_form() -> RegistrationForm {
    RegistrationForm {
        first_name: "Asha".to_string(),
        last_name: "Patnaik".to_string(),
        email: "asha@example.in".to_string(),
        phone: "+91 94370 12345".to_string(),
        date_of_birth: "1990-04-12".to_string(),
        address: "Plot 12, Saheed Nagar".to_string(),
        city: "Bhubaneswar".to_string(),
        pincode: "751007".to_string(),
        username: "asha_p".to_string(),
        password: "Civic#2024".to_string(),
        confirm_password: "Civic#2024".to_string(),
        email_notifications: true,
        sms_notifications: false,
        issue_updates: true,
        interests: vec!["Roads".to_string()],
        terms_accepted: true,
    }
}
