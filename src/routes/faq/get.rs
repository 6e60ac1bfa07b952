use crate::db;
use crate::helpers::JsonResponse;
use crate::middleware::AdminAccess;
use crate::models;
use actix_web::{get, web, Responder, Result};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct Query {
    pub category: Option<models::FaqCategory>,
    pub q: Option<String>,
}

/// GET /faqs?category={category}&q={text}
/// Active FAQs, highest priority first.
#[tracing::instrument(name = "Get the list of FAQs.", skip(pg_pool))]
#[get("")]
pub async fn list_handler(
    query: web::Query<Query>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let query = query.into_inner();
    let filter = db::faq::FaqFilter {
        category: query.category,
        search: query.q,
        only_active: true,
    };

    db::faq::fetch_all(pg_pool.get_ref(), &filter)
        .await
        .map(|faqs| JsonResponse::build().set_list(faqs).ok("OK"))
        .map_err(|err| JsonResponse::<models::Faq>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Get FAQ.", skip(pg_pool))]
#[get("/{id}")]
pub async fn item_handler(
    path: web::Path<(Uuid,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let id = path.0;
    let faq = db::faq::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Faq>::build().internal_server_error(err))
        .and_then(|faq| match faq {
            Some(faq) if faq.is_active => Ok(faq),
            _ => Err(JsonResponse::<models::Faq>::build().not_found("FAQ not found")),
        })?;

    Ok(JsonResponse::build().set_id(id).set_item(faq).ok("OK"))
}

/// Includes inactive entries.
#[tracing::instrument(name = "Admin get the list of FAQs.", skip(pg_pool))]
#[get("")]
pub async fn admin_list_handler(
    _admin: AdminAccess,
    query: web::Query<Query>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let query = query.into_inner();
    let filter = db::faq::FaqFilter {
        category: query.category,
        search: query.q,
        only_active: false,
    };

    db::faq::fetch_all(pg_pool.get_ref(), &filter)
        .await
        .map(|faqs| JsonResponse::build().set_list(faqs).ok("OK"))
        .map_err(|err| JsonResponse::<models::Faq>::build().internal_server_error(err))
}
