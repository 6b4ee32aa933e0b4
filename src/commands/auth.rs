use crate::commands::db::IssueStore;
use crate::error::{FixityError, Result};
use crate::forms::registration::{to_citizen_user, validate_registration, RegistrationReport};
use crate::forms::validators::validate_login;
use crate::models::user::{CitizenUser, RegistrationForm, Role, SessionState};
use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const INVALID_FORM_MESSAGE: &str = "Please fix all validation errors before submitting.";
const DUPLICATE_USERNAME_MESSAGE: &str = "Username already exists. Please choose a different username.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginOutcome {
    pub role: Role,
    pub username: String,
    pub redirect: String,
}

#[cfg_attr(feature = "desktop", tauri::command)]
pub fn validate_registration_form(form: RegistrationForm) -> RegistrationReport {
    validate_registration(&form, Local::now().date_naive())
}

#[cfg_attr(feature = "desktop", tauri::command)]
pub async fn register_citizen(data_dir: String, form: RegistrationForm) -> Result<CitizenUser, String> {
    let store = IssueStore::open(&data_dir).map_err(|e| e.to_string())?;
    register_with_store(&store, &form, Local::now().date_naive()).map_err(|e| e.to_string())
}

#[cfg_attr(feature = "desktop", tauri::command)]
pub async fn login(
    data_dir: String,
    role: Role,
    username: String,
    password: String,
) -> Result<LoginOutcome, String> {
    let store = IssueStore::open(&data_dir).map_err(|e| e.to_string())?;
    login_with_store(&store, role, &username, &password).map_err(|e| e.to_string())
}

#[cfg_attr(feature = "desktop", tauri::command)]
pub async fn logout(data_dir: String, role: Role) -> Result<SessionState, String> {
    let store = IssueStore::open(&data_dir).map_err(|e| e.to_string())?;
    logout_with_store(&store, role).map_err(|e| e.to_string())
}

#[cfg_attr(feature = "desktop", tauri::command)]
pub async fn get_session(data_dir: String) -> Result<SessionState, String> {
    let store = IssueStore::open(&data_dir).map_err(|e| e.to_string())?;
    session_state(&store).map_err(|e| e.to_string())
}

/// Validates the form, rejects taken usernames, then appends the new citizen
/// to the stored user list.
pub fn register_with_store(store: &IssueStore, form: &RegistrationForm, today: NaiveDate) -> Result<CitizenUser> {
    let report = validate_registration(form, today);
    if !report.valid {
        return Err(FixityError::Validation {
            message: INVALID_FORM_MESSAGE.to_string(),
            checks: report.failures().cloned().collect(),
        });
    }

    let mut users = store.load_users();
    if users.iter().any(|user| user.username == form.username) {
        return Err(FixityError::validation(DUPLICATE_USERNAME_MESSAGE));
    }

    let user = to_citizen_user(form, Utc::now());
    users.push(user.clone());
    store.save_users(&users)?;
    log::info!("registered citizen {}", user.username);
    Ok(user)
}

/// Both fields must be filled in; credentials are not checked further.
pub fn login_with_store(store: &IssueStore, role: Role, username: &str, password: &str) -> Result<LoginOutcome> {
    let check = validate_login(username, password);
    if !check.valid {
        return Err(FixityError::Validation {
            message: check.message.clone(),
            checks: vec![check],
        });
    }

    let username = username.trim();
    store.set_item(role.logged_in_key(), "true")?;
    store.set_item(role.username_key(), username)?;
    log::info!("{role:?} login for {username}");

    Ok(LoginOutcome {
        role,
        username: username.to_string(),
        redirect: role.landing_page().to_string(),
    })
}

pub fn logout_with_store(store: &IssueStore, role: Role) -> Result<SessionState> {
    for key in role.logout_keys() {
        store.remove_item(key)?;
    }
    session_state(store)
}

pub fn session_state(store: &IssueStore) -> Result<SessionState> {
    let logged_in = |role: Role| -> Result<bool> {
        Ok(store.get_item(role.logged_in_key())?.as_deref() == Some("true"))
    };

    Ok(SessionState {
        citizen_logged_in: logged_in(Role::Citizen)?,
        citizen_username: store.get_item(Role::Citizen.username_key())?,
        authority_logged_in: logged_in(Role::Authority)?,
        authority_username: store.get_item(Role::Authority.username_key())?,
    })
}
