use crate::db;
use crate::helpers::JsonResponse;
use crate::middleware::AdminAccess;
use crate::models;
use actix_web::{delete, web, Responder, Result};
use sqlx::PgPool;
use uuid::Uuid;

#[tracing::instrument(name = "Admin delete FAQ.", skip(pg_pool))]
#[delete("/{id}")]
pub async fn delete_handler(
    _admin: AdminAccess,
    path: web::Path<(Uuid,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let id = path.0;
    db::faq::delete(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Faq>::build().internal_server_error(err))
        .and_then(|deleted| match deleted {
            true => Ok(JsonResponse::<models::Faq>::build().set_id(id).ok("Deleted")),
            false => Err(JsonResponse::<models::Faq>::build().not_found("FAQ not found")),
        })
}
