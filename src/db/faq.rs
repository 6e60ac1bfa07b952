use crate::models;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

const COLUMNS: &str =
    "id, question, answer, category, tags, is_active, priority, created_at, updated_at";

#[derive(Debug, Default, Clone)]
pub struct FaqFilter {
    pub category: Option<models::FaqCategory>,
    pub search: Option<String>,
    pub only_active: bool,
}

/// Lists FAQs in display order: highest priority first, then oldest first.
pub async fn fetch_all(pool: &PgPool, filter: &FaqFilter) -> Result<Vec<models::Faq>, String> {
    let query_span = tracing::info_span!("Fetch FAQs.", ?filter);
    let search = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    sqlx::query_as::<_, models::Faq>(&format!(
        r#"
        SELECT {COLUMNS} FROM faqs
        WHERE ($1 = FALSE OR is_active = TRUE)
          AND ($2::varchar IS NULL OR category = $2)
          AND ($3::text IS NULL OR search_vector @@ plainto_tsquery('english', $3))
        ORDER BY priority DESC, created_at ASC
        "#
    ))
    .bind(filter.only_active)
    .bind(filter.category.map(|category| category.as_str()))
    .bind(search)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch FAQs, error: {:?}", err);
        "Could not fetch FAQs".to_string()
    })
}

pub async fn fetch(pool: &PgPool, id: Uuid) -> Result<Option<models::Faq>, String> {
    let query_span = tracing::info_span!("Fetch FAQ by id.", %id);
    sqlx::query_as::<_, models::Faq>(&format!("SELECT {COLUMNS} FROM faqs WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch FAQ, error: {:?}", err);
            "Could not fetch FAQ".to_string()
        })
}

pub async fn insert(pool: &PgPool, faq: models::Faq) -> Result<models::Faq, String> {
    let query_span = tracing::info_span!("Saving new FAQ into the database");
    sqlx::query_as::<_, models::Faq>(&format!(
        r#"
        INSERT INTO faqs (id, question, answer, category, tags, is_active, priority, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
        RETURNING {COLUMNS}
        "#
    ))
    .bind(faq.id)
    .bind(&faq.question)
    .bind(&faq.answer)
    .bind(faq.category)
    .bind(&faq.tags)
    .bind(faq.is_active)
    .bind(faq.priority)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to insert FAQ, error: {:?}", err);
        "Failed to insert".to_string()
    })
}

pub async fn update(pool: &PgPool, faq: models::Faq) -> Result<Option<models::Faq>, String> {
    let query_span = tracing::info_span!("Updating FAQ", id = %faq.id);
    sqlx::query_as::<_, models::Faq>(&format!(
        r#"
        UPDATE faqs
        SET question = $2, answer = $3, category = $4, tags = $5, is_active = $6, priority = $7
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(faq.id)
    .bind(&faq.question)
    .bind(&faq.answer)
    .bind(faq.category)
    .bind(&faq.tags)
    .bind(faq.is_active)
    .bind(faq.priority)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to update FAQ, error: {:?}", err);
        "Failed to update FAQ".to_string()
    })
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, String> {
    let query_span = tracing::info_span!("Deleting FAQ", %id);
    sqlx::query("DELETE FROM faqs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .instrument(query_span)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to delete FAQ, error: {:?}", err);
            "Failed to delete FAQ".to_string()
        })
}
