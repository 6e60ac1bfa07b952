use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::AdminAccess;
use crate::models;
use actix_web::{route, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use uuid::Uuid;

#[tracing::instrument(name = "Admin update FAQ.", skip(pg_pool))]
#[route("/{id}", method = "PUT", method = "PATCH")]
pub async fn update_handler(
    _admin: AdminAccess,
    path: web::Path<(Uuid,)>,
    form: web::Json<forms::FaqPatch>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Faq>::build().form_error(errors.to_string()));
    }

    let id = path.0;
    let mut faq = db::faq::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Faq>::build().internal_server_error(err))
        .and_then(|faq| match faq {
            Some(faq) => Ok(faq),
            None => Err(JsonResponse::<models::Faq>::build().not_found("FAQ not found")),
        })?;

    form.apply(&mut faq)
        .map_err(|err| JsonResponse::<models::Faq>::build().form_error(err))?;

    db::faq::update(pg_pool.get_ref(), faq)
        .await
        .map_err(|err| JsonResponse::<models::Faq>::build().internal_server_error(err))
        .and_then(|faq| match faq {
            Some(faq) => Ok(JsonResponse::build().set_id(id).set_item(faq).ok("success")),
            None => Err(JsonResponse::<models::Faq>::build().not_found("FAQ not found")),
        })
}
