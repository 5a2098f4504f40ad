use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dto::user_dto::UserData;

/// Uniform `{code, msg, data}` wrapper returned by every user endpoint.
///
/// The HTTP status is always 200; the outcome is carried in `code`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(UserEnvelope = Envelope<UserData>)]
pub struct Envelope<T> {
    pub code: u16,
    pub msg: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            msg: String::new(),
            data: Some(data),
        }
    }

    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            msg: msg.into(),
            data: None,
        }
    }

    pub fn failure(code: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            code: code.as_u16(),
            msg: msg.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_envelope_carries_data_and_empty_message() {
        let envelope = Envelope::ok(UserData {
            userid: 1,
            username: "alice".into(),
            nickname: "A".into(),
        });
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "code": 200,
                "msg": "",
                "data": {"userid": 1, "username": "alice", "nickname": "A"}
            })
        );
    }

    #[test]
    fn message_envelope_serializes_null_data() {
        let envelope = Envelope::<()>::message("delete user ok");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"code": 200, "msg": "delete user ok", "data": null})
        );
    }
}
