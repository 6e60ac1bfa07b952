use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::AdminAccess;
use crate::models;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Admin add FAQ.", skip(pg_pool))]
#[post("")]
pub async fn add_handler(
    _admin: AdminAccess,
    form: web::Json<forms::FaqForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Faq>::build().form_error(errors.to_string()));
    }

    let faq: models::Faq = form
        .try_into()
        .map_err(|err: String| JsonResponse::<models::Faq>::build().form_error(err))?;

    db::faq::insert(pg_pool.get_ref(), faq)
        .await
        .map(|faq| {
            tracing::info!("New FAQ {} has been saved to database", faq.id);
            JsonResponse::build().set_id(faq.id).set_item(faq).ok("Saved")
        })
        .map_err(|err| JsonResponse::<models::Faq>::build().internal_server_error(err))
}
