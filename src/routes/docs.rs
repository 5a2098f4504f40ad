use axum::Json;
use utoipa::OpenApi;

use crate::dto::{
    response::UserEnvelope,
    user_dto::{CreateUserForm, UpdateUserForm, UserData},
};

#[derive(OpenApi)]
#[openapi(
    info(title = "User CRUD service", description = "Create, read, update and delete users"),
    paths(
        crate::routes::user::create_user,
        crate::routes::user::get_user,
        crate::routes::user::update_user,
        crate::routes::user::delete_user,
    ),
    components(schemas(CreateUserForm, UpdateUserForm, UserData, UserEnvelope)),
    tags((name = "user", description = "User management"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
