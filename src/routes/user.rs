use axum::{
    extract::{Path, State},
    http::Uri,
    response::IntoResponse,
};

use crate::{
    dto::{
        response::Envelope,
        user_dto::{CreateUserForm, UpdateUserForm, UserData},
    },
    error::{Error, Result},
    utils::validation::ValidatedForm,
    AppState,
};

#[utoipa::path(
    post,
    path = "/user/create",
    tag = "user",
    request_body(content = CreateUserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Envelope: code 200 with the new user, 400 on invalid params, 500 when the user cannot be created", body = crate::dto::response::UserEnvelope)
    )
)]
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<CreateUserForm>,
) -> Result<impl IntoResponse> {
    let user = state
        .users
        .create(form.into())
        .await
        .map_err(|err| operation_failed("create user", err))?;

    tracing::info!(user_id = user.id, username = %user.username, "user created");
    Ok(Envelope::ok(UserData::try_from(user)?))
}

#[utoipa::path(
    get,
    path = "/user/{username}",
    tag = "user",
    params(
        ("username" = String, Path, description = "Username to look up")
    ),
    responses(
        (status = 200, description = "Envelope: code 200 with the user, 500 when it doesn't exist", body = crate::dto::response::UserEnvelope)
    )
)]
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse> {
    fetch_user(&state, &username).await
}

#[utoipa::path(
    post,
    path = "/user/update",
    tag = "user",
    request_body(content = UpdateUserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Envelope: code 200 with the updated user, 400 on invalid params, 500 when nothing was updated", body = crate::dto::response::UserEnvelope)
    )
)]
#[axum::debug_handler]
pub async fn update_user(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<UpdateUserForm>,
) -> Result<impl IntoResponse> {
    let (username, changes) = form.into_parts();
    let new_username = changes.username.clone();

    let count = state
        .users
        .update_by_username(&username, changes)
        .await
        .map_err(|err| operation_failed("update user", err))?;
    if count == 0 {
        return Err(Error::Failed("update user failed".into()));
    }

    let user = state.users.get_by_username(&new_username).await?;
    tracing::info!(user_id = user.id, %username, username_now = %user.username, "user updated");
    Ok(Envelope::ok(UserData::try_from(user)?))
}

#[utoipa::path(
    delete,
    path = "/user/{username}",
    tag = "user",
    params(
        ("username" = String, Path, description = "Username to delete")
    ),
    responses(
        (status = 200, description = "Envelope: code 200 with null data, 500 when the delete fails")
    )
)]
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse> {
    remove_user(&state, &username).await
}

/// `GET` on `/user/create` and `/user/update`. Those static routes shadow
/// `/user/:username`, so users with those names are looked up here.
pub async fn get_user_at_uri(State(state): State<AppState>, uri: Uri) -> Result<impl IntoResponse> {
    fetch_user(&state, last_segment(&uri)).await
}

/// `DELETE` counterpart of [`get_user_at_uri`].
pub async fn delete_user_at_uri(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<impl IntoResponse> {
    remove_user(&state, last_segment(&uri)).await
}

fn last_segment(uri: &Uri) -> &str {
    uri.path().rsplit('/').next().unwrap_or_default()
}

/// Store-level rejections get the operation prefix; infrastructure errors
/// pass through so they keep their own message and log level.
fn operation_failed(action: &str, err: Error) -> Error {
    match err {
        Error::NotFound(_) | Error::Constraint(_) => {
            Error::Failed(format!("{} failed: {}", action, err))
        }
        other => other,
    }
}

async fn fetch_user(state: &AppState, username: &str) -> Result<Envelope<UserData>> {
    if username.trim().is_empty() {
        return Err(Error::BadRequest("missing username".into()));
    }
    let user = state.users.get_by_username(username).await?;
    Ok(Envelope::ok(UserData::try_from(user)?))
}

async fn remove_user(state: &AppState, username: &str) -> Result<Envelope<()>> {
    if username.trim().is_empty() {
        return Err(Error::BadRequest("missing username".into()));
    }
    let removed = state
        .users
        .delete_by_username(username)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, %username, "delete failed");
            Error::Failed("delete user failed".into())
        })?;

    tracing::info!(%username, removed, "user delete requested");
    Ok(Envelope::message("delete user ok"))
}

/// `GET`/`DELETE /user/` without a username.
pub async fn missing_username() -> Result<Envelope<()>> {
    Err(Error::BadRequest("missing username".into()))
}
