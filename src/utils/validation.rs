use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{Error, Result};

pub const USERNAME_MAX_LEN: usize = 40;
pub const NICKNAME_MAX_LEN: usize = 35;
pub const PASSWORD_MAX_LEN: usize = 50;

/// Request body bound from a form (or a JSON body when the request says so)
/// and checked with [`Validate`] before the handler runs.
#[derive(Debug, Clone)]
pub struct ValidatedForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/json"))
            .unwrap_or(false);

        let value = if is_json {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
            value
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
            value
        };

        value.validate()?;
        Ok(Self(value))
    }
}

pub fn check_username(username: &str) -> Result<()> {
    if username.is_empty() || username.chars().count() > USERNAME_MAX_LEN {
        return Err(Error::Constraint(format!(
            "username must be 1 to {} characters",
            USERNAME_MAX_LEN
        )));
    }
    if !username.chars().all(|c| c.is_ascii_alphabetic() || c == '_') {
        return Err(Error::Constraint(
            "username may only contain letters and underscores".to_string(),
        ));
    }
    Ok(())
}

pub fn check_nickname(nickname: &str) -> Result<()> {
    if nickname.chars().count() > NICKNAME_MAX_LEN {
        return Err(Error::Constraint(format!(
            "nickname must be at most {} characters",
            NICKNAME_MAX_LEN
        )));
    }
    Ok(())
}

pub fn check_password(password: &str) -> Result<()> {
    if password.chars().count() > PASSWORD_MAX_LEN {
        return Err(Error::Constraint(format!(
            "password must be at most {} characters",
            PASSWORD_MAX_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usernames_accept_letters_and_underscores() {
        assert!(check_username("alice").is_ok());
        assert!(check_username("Alice_Smith").is_ok());
        assert!(check_username("_").is_ok());
    }

    #[test]
    fn usernames_reject_digits_and_symbols() {
        for name in ["alice1", "1alice", "al-ice", "al ice", "alice!", "élise"] {
            assert!(
                matches!(check_username(name), Err(Error::Constraint(_))),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn usernames_are_bounded() {
        assert!(check_username("").is_err());
        assert!(check_username(&"a".repeat(40)).is_ok());
        assert!(check_username(&"a".repeat(41)).is_err());
    }

    #[test]
    fn nickname_and_password_limits() {
        assert!(check_nickname("").is_ok());
        assert!(check_nickname(&"n".repeat(35)).is_ok());
        assert!(check_nickname(&"n".repeat(36)).is_err());
        assert!(check_password(&"p".repeat(50)).is_ok());
        assert!(check_password(&"p".repeat(51)).is_err());
    }
}
