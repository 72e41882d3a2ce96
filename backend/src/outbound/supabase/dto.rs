//! Wire shapes for the Supabase auth, storage and PostgREST endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{IdentityUser, Note, Registration};

#[derive(Debug, Serialize)]
pub(super) struct SignUpBodyDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
    pub(super) data: ProfileDto<'a>,
}

#[derive(Debug, Serialize)]
pub(super) struct ProfileDto<'a> {
    pub(super) name: &'a str,
}

impl<'a> From<&'a Registration> for SignUpBodyDto<'a> {
    fn from(registration: &'a Registration) -> Self {
        Self {
            email: registration.email().as_ref(),
            password: registration.password(),
            data: ProfileDto {
                name: registration.name(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct PasswordGrantDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct VerifyOtpDto<'a> {
    #[serde(rename = "type")]
    pub(super) kind: &'static str,
    pub(super) email: &'a str,
    pub(super) token: &'a str,
}

/// Session issued by the password grant. Only the user object is relayed.
#[derive(Debug, Deserialize)]
pub(super) struct SessionDto {
    pub(super) user: IdentityUser,
}

/// PostgREST answers inserts with the affected rows as an array.
pub(super) fn first_row(body: &[u8]) -> Result<Note, String> {
    let rows: Vec<Note> = serde_json::from_slice(body).map_err(|err| err.to_string())?;
    rows.into_iter()
        .next()
        .ok_or_else(|| "insert returned no rows".to_owned())
}

pub(super) fn rows(body: &[u8]) -> Result<Vec<Note>, String> {
    serde_json::from_slice(body).map_err(|err| err.to_string())
}

/// Pull a human-readable message out of a Supabase error payload.
///
/// GoTrue, Storage and PostgREST each name the field differently.
pub(super) fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["msg", "message", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_owned)
}
