use serde::{Deserialize, Serialize};

/// Everything the citizen registration page posts. Field names follow the
/// form's camelCase payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String, // YYYY-MM-DD
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub issue_updates: bool,
    pub interests: Vec<String>,
    pub terms_accepted: bool,
}

/// A registered citizen as kept under the `citizenUsers` key. The password is
/// checked at registration and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitizenUser {
    #[serde(default)]
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub username: String,
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub issue_updates: bool,
    pub interests: Vec<String>,
    pub registration_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Citizen,
    Authority,
}

impl Role {
    pub fn logged_in_key(self) -> &'static str {
        match self {
            Role::Citizen => "citizenLoggedIn",
            Role::Authority => "authorityLoggedIn",
        }
    }

    pub fn username_key(self) -> &'static str {
        match self {
            Role::Citizen => "citizenUsername",
            Role::Authority => "authorityUsername",
        }
    }

    /// Keys cleared on logout. A citizen's username outlives the session and
    /// pre-fills the next login.
    pub fn logout_keys(self) -> &'static [&'static str] {
        match self {
            Role::Citizen => &["citizenLoggedIn"],
            Role::Authority => &["authorityLoggedIn", "authorityUsername"],
        }
    }

    /// Page the web view navigates to after a successful login.
    pub fn landing_page(self) -> &'static str {
        match self {
            Role::Citizen => "Citizen.html",
            Role::Authority => "login-authority.html",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub citizen_logged_in: bool,
    pub citizen_username: Option<String>,
    pub authority_logged_in: bool,
    pub authority_username: Option<String>,
}
