use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::user::{NewUser, User, UserChanges};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserForm {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 50))]
    pub password: String,
    #[validate(length(min = 1, max = 50))]
    pub nickname: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserForm {
    /// Current username of the user to update.
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 50))]
    pub password: String,
    #[validate(length(min = 1, max = 50))]
    pub nickname: String,
    /// Replacement username; the current one is kept when omitted.
    #[serde(default)]
    #[validate(length(min = 1, max = 50))]
    pub new_username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserData {
    pub userid: u64,
    pub username: String,
    pub nickname: String,
}

impl From<CreateUserForm> for NewUser {
    fn from(form: CreateUserForm) -> Self {
        Self {
            username: form.username,
            password: form.password,
            nickname: form.nickname,
        }
    }
}

impl UpdateUserForm {
    /// Splits the form into the lookup username and the values to write.
    pub fn into_parts(self) -> (String, UserChanges) {
        let changes = UserChanges {
            username: self.new_username.unwrap_or_else(|| self.username.clone()),
            password: self.password,
            nickname: self.nickname,
        };
        (self.username, changes)
    }
}

impl TryFrom<User> for UserData {
    type Error = Error;

    fn try_from(user: User) -> Result<Self> {
        let userid = u64::try_from(user.id)
            .map_err(|_| Error::Failed(format!("invalid user id {}", user.id)))?;
        Ok(Self {
            userid,
            username: user.username,
            nickname: user.nickname,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_form(username: &str, password: &str, nickname: &str) -> CreateUserForm {
        CreateUserForm {
            username: username.into(),
            password: password.into(),
            nickname: nickname.into(),
        }
    }

    #[test]
    fn create_form_requires_every_field() {
        assert!(create_form("alice", "p1", "A").validate().is_ok());
        assert!(create_form("", "p1", "A").validate().is_err());
        assert!(create_form("alice", "", "A").validate().is_err());
        assert!(create_form("alice", "p1", "").validate().is_err());
    }

    #[test]
    fn create_form_caps_fields_at_fifty_chars() {
        let fifty = "a".repeat(50);
        let fifty_one = "a".repeat(51);
        assert!(create_form(&fifty, &fifty, &fifty).validate().is_ok());
        assert!(create_form(&fifty_one, "p1", "A").validate().is_err());
        assert!(create_form("alice", &fifty_one, "A").validate().is_err());
        assert!(create_form("alice", "p1", &fifty_one).validate().is_err());
    }

    #[test]
    fn update_form_keeps_username_when_no_replacement_given() {
        let form = UpdateUserForm {
            username: "alice".into(),
            password: "p2".into(),
            nickname: "B".into(),
            new_username: None,
        };
        let (lookup, changes) = form.into_parts();
        assert_eq!(lookup, "alice");
        assert_eq!(changes.username, "alice");
        assert_eq!(changes.password, "p2");
        assert_eq!(changes.nickname, "B");
    }

    #[test]
    fn update_form_renames_when_replacement_given() {
        let form = UpdateUserForm {
            username: "alice".into(),
            password: "p2".into(),
            nickname: "B".into(),
            new_username: Some("alice_b".into()),
        };
        assert!(form.validate().is_ok());
        let (lookup, changes) = form.into_parts();
        assert_eq!(lookup, "alice");
        assert_eq!(changes.username, "alice_b");
    }

    #[test]
    fn empty_replacement_username_is_rejected() {
        let form = UpdateUserForm {
            username: "alice".into(),
            password: "p2".into(),
            nickname: "B".into(),
            new_username: Some(String::new()),
        };
        assert!(form.validate().is_err());
    }
}
