use crate::db;
use crate::helpers::JsonResponse;
use crate::middleware::AdminAccess;
use crate::views;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use uuid::Uuid;

#[tracing::instrument(name = "Admin get the list of users.", skip(pg_pool))]
#[get("")]
pub async fn list_handler(
    _admin: AdminAccess,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    db::user::fetch_all(pg_pool.get_ref())
        .await
        .map(|users| {
            let users = users
                .into_iter()
                .map(Into::into)
                .collect::<Vec<views::user::Admin>>();

            JsonResponse::build().set_list(users).ok("OK")
        })
        .map_err(|err| JsonResponse::<views::user::Admin>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Admin get user.", skip(pg_pool))]
#[get("/{id}")]
pub async fn item_handler(
    _admin: AdminAccess,
    path: web::Path<(Uuid,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let id = path.0;
    let user = db::user::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<views::user::Admin>::build().internal_server_error(err))
        .and_then(|user| match user {
            Some(user) => Ok(user),
            None => Err(JsonResponse::<views::user::Admin>::build().not_found("User not found")),
        })?;

    Ok(JsonResponse::build()
        .set_id(id)
        .set_item(Into::<views::user::Admin>::into(user))
        .ok("OK"))
}
