use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(sqlx::Type, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[sqlx(rename_all = "lowercase", type_name = "varchar")]
#[serde(rename_all = "lowercase")]
pub enum FaqCategory {
    #[default]
    General,
    Products,
    Skincare,
    Shipping,
    Returns,
    Ingredients,
    Orders,
}

impl FaqCategory {
    pub const ALL: [FaqCategory; 7] = [
        FaqCategory::General,
        FaqCategory::Products,
        FaqCategory::Skincare,
        FaqCategory::Shipping,
        FaqCategory::Returns,
        FaqCategory::Ingredients,
        FaqCategory::Orders,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FaqCategory::General => "general",
            FaqCategory::Products => "products",
            FaqCategory::Skincare => "skincare",
            FaqCategory::Shipping => "shipping",
            FaqCategory::Returns => "returns",
            FaqCategory::Ingredients => "ingredients",
            FaqCategory::Orders => "orders",
        }
    }
}

impl std::fmt::Display for FaqCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FaqCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        FaqCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| format!("unknown FAQ category: {value}"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub category: FaqCategory,
    pub tags: Vec<String>,
    pub is_active: bool,
    pub priority: i32, // higher is shown first
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Faq {
    pub fn new(question: String, answer: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            question,
            answer,
            category: FaqCategory::default(),
            tags: vec![],
            is_active: true,
            priority: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
