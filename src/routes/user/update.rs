use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::AdminAccess;
use crate::views;
use actix_web::{route, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use uuid::Uuid;

#[tracing::instrument(name = "Admin update user.", skip(form, pg_pool))]
#[route("/{id}", method = "PUT", method = "PATCH")]
pub async fn update_handler(
    _admin: AdminAccess,
    path: web::Path<(Uuid,)>,
    form: web::Json<forms::UserPatch>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<views::user::Admin>::build().form_error(errors.to_string()));
    }
    if form.is_empty() {
        return Err(JsonResponse::<views::user::Admin>::build().bad_request("Nothing to update"));
    }

    let id = path.0;
    let user = db::user::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<views::user::Admin>::build().internal_server_error(err))
        .and_then(|user| match user {
            Some(user) => Ok(user),
            None => Err(JsonResponse::<views::user::Admin>::build().not_found("User not found")),
        })?;

    // hashing is CPU bound, keep it off the async workers
    let user = web::block(move || {
        let mut user = user;
        form.apply(&mut user).map(|_| user)
    })
    .await
    .map_err(|err| JsonResponse::<views::user::Admin>::build().internal_server_error(err.to_string()))?
    .map_err(|err| {
        tracing::error!("Failed to hash password: {}", err);
        JsonResponse::<views::user::Admin>::build().internal_server_error("")
    })?;

    db::user::update(pg_pool.get_ref(), user)
        .await
        .map_err(|err| JsonResponse::<views::user::Admin>::build().internal_server_error(err))
        .and_then(|user| match user {
            Some(user) => Ok(JsonResponse::build()
                .set_id(id)
                .set_item(Into::<views::user::Admin>::into(user))
                .ok("success")),
            None => Err(JsonResponse::<views::user::Admin>::build().not_found("User not found")),
        })
}
