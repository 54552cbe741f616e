//! Form validation for radar edits and account forms.
//!
//! Two failure tiers: `ValidationError` is user-correctable and names the
//! field; `AccessError` covers missing or foreign records and is reported
//! with a generic message so it does not reveal whether a record exists.
//! Validation stops at the first failing rule.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Radar not found")]
    RadarNotFound,

    #[error("Blip not found")]
    BlipNotFound,
}

pub const RADAR_NAME_MAX: usize = 100;
pub const RADAR_DESCRIPTION_MAX: usize = 500;
pub const BLIP_NAME_MAX: usize = 100;
pub const BLIP_DESCRIPTION_MAX: usize = 1000;
pub const LABEL_NAME_MAX: usize = 50;
pub const ACCOUNT_NAME_MAX: usize = 100;
pub const PASSWORD_MIN: usize = 12;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlipForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quadrant_id: String,
    #[serde(default)]
    pub ring_id: String,
    #[serde(default)]
    pub is_new: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuadrantForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RingForm {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Radar fields after validation. Empty descriptions become `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadarInput {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlipInput {
    pub name: String,
    pub description: Option<String>,
    pub quadrant_id: String,
    pub ring_id: String,
    pub is_new: bool,
}

fn required(field: &'static str, label: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(field, format!("{} is required", label)));
    }
    at_most(field, label, value, max)
}

fn at_most(field: &'static str, label: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::new(
            field,
            format!("{} must be at most {} characters", label, max),
        ));
    }
    Ok(())
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|s| !s.is_empty()).cloned()
}

/// `#RRGGBB`
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// `local@domain.tld`. The local part allows letters, digits and `_'+-.`
/// without a leading, trailing or doubled dot. Domain labels start with a
/// letter or digit; the last one is at least two letters.
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.ends_with('\'')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_'+-.".contains(c));
    if !local_ok {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, hosts)) = labels.split_last() else {
        return false;
    };
    !hosts.is_empty()
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
        && hosts.iter().all(|label| {
            label.starts_with(|c: char| c.is_ascii_alphanumeric())
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

fn email(value: &str) -> Result<(), ValidationError> {
    if is_email(value) {
        Ok(())
    } else {
        Err(ValidationError::new("email", "Invalid email"))
    }
}

/// Password strength rules, checked in order.
const PASSWORD_RULES: [(fn(char) -> bool, &str); 4] = [
    (|c| c.is_ascii_lowercase(), "Password must contain at least one lowercase letter"),
    (|c| c.is_ascii_uppercase(), "Password must contain at least one uppercase letter"),
    (|c| c.is_ascii_digit(), "Password must contain at least one number"),
    (|c| !c.is_ascii_alphanumeric(), "Password must contain at least one special character"),
];

fn strong_password(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < PASSWORD_MIN {
        return Err(ValidationError::new(
            "password",
            format!("Password must be at least {} characters", PASSWORD_MIN),
        ));
    }
    for (rule, message) in PASSWORD_RULES {
        if !value.chars().any(rule) {
            return Err(ValidationError::new("password", message));
        }
    }
    Ok(())
}

pub fn validate_register(form: &RegisterForm) -> Result<(), ValidationError> {
    required("name", "Name", &form.name, ACCOUNT_NAME_MAX)?;
    email(&form.email)?;
    strong_password(&form.password)
}

pub fn validate_login(form: &LoginForm) -> Result<(), ValidationError> {
    email(&form.email)?;
    if form.password.is_empty() {
        return Err(ValidationError::new("password", "Password is required"));
    }
    Ok(())
}

pub fn validate_radar(form: &RadarForm) -> Result<RadarInput, ValidationError> {
    required("name", "Name", &form.name, RADAR_NAME_MAX)?;
    if let Some(description) = &form.description {
        at_most("description", "Description", description, RADAR_DESCRIPTION_MAX)?;
    }
    Ok(RadarInput {
        name: form.name.clone(),
        description: non_empty(form.description.as_ref()),
    })
}

pub fn validate_blip(form: &BlipForm) -> Result<BlipInput, ValidationError> {
    required("name", "Name", &form.name, BLIP_NAME_MAX)?;
    if let Some(description) = &form.description {
        at_most("description", "Description", description, BLIP_DESCRIPTION_MAX)?;
    }
    if form.quadrant_id.is_empty() {
        return Err(ValidationError::new("quadrantId", "Quadrant is required"));
    }
    if form.ring_id.is_empty() {
        return Err(ValidationError::new("ringId", "Ring is required"));
    }
    Ok(BlipInput {
        name: form.name.clone(),
        description: non_empty(form.description.as_ref()),
        quadrant_id: form.quadrant_id.clone(),
        ring_id: form.ring_id.clone(),
        is_new: form.is_new.unwrap_or(true),
    })
}

pub fn validate_quadrant(form: &QuadrantForm) -> Result<(), ValidationError> {
    required("name", "Name", &form.name, LABEL_NAME_MAX)?;
    if !is_hex_color(&form.color) {
        return Err(ValidationError::new("color", "Invalid color"));
    }
    Ok(())
}

pub fn validate_ring(form: &RingForm) -> Result<(), ValidationError> {
    required("name", "Name", &form.name, LABEL_NAME_MAX)
}
