//! Member screens, one module per controller generation.
//!
//! Every generation serves the same three screens (form, save, list) so the
//! generations can be compared side by side.

pub mod v1;
pub mod v2;
pub mod v3;
pub mod v4;

use thiserror::Error;

use crate::app::member::Member;

pub const VIEW_NEW_FORM: &str = "new-form";
pub const VIEW_SAVE_RESULT: &str = "save-result";
pub const VIEW_MEMBERS: &str = "members";

/// Invalid member form input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemberFormError {
    #[error("missing parameter: {0}")]
    Missing(&'static str),

    #[error("age must be a non-negative integer, got {0:?}")]
    InvalidAge(String),
}

/// Build an unsaved member from raw form values.
pub fn parse_member(username: Option<&str>, age: Option<&str>) -> Result<Member, MemberFormError> {
    let username = username
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or(MemberFormError::Missing("username"))?;
    let age = age.ok_or(MemberFormError::Missing("age"))?;
    let age = age
        .trim()
        .parse::<u32>()
        .map_err(|_| MemberFormError::InvalidAge(age.to_string()))?;
    Ok(Member::new(username, age))
}
