use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::{PostgresPersistence, parse_text_with_fallback},
    app_error::{AppError, AppResult},
    application::use_cases::subscription::{SubscriberRepo, SubscriberUpsert},
    domain::entities::subscriber::Subscriber,
};

fn row_to_subscriber(row: &sqlx::postgres::PgRow) -> Subscriber {
    let id: Uuid = row.get("id");
    let tier: Option<String> = row.get("subscription_tier");

    Subscriber {
        id,
        email: row.get("email"),
        user_id: row.get("user_id"),
        stripe_customer_id: row.get("stripe_customer_id"),
        subscribed: row.get("subscribed"),
        subscription_tier: parse_text_with_fallback(
            tier.as_deref(),
            "subscription_tier",
            "subscriber",
            &id.to_string(),
        ),
        subscription_end: row.get("subscription_end"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

const SELECT_COLS: &str = r#"
    id, email, user_id, stripe_customer_id, subscribed, subscription_tier,
    subscription_end, created_at, updated_at
"#;

#[async_trait]
impl SubscriberRepo for PostgresPersistence {
    async fn upsert(&self, input: &SubscriberUpsert) -> AppResult<Subscriber> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO subscribers (
                id, email, user_id, stripe_customer_id, subscribed,
                subscription_tier, subscription_end, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            ON CONFLICT (email) DO UPDATE SET
                user_id = EXCLUDED.user_id,
                stripe_customer_id = EXCLUDED.stripe_customer_id,
                subscribed = EXCLUDED.subscribed,
                subscription_tier = EXCLUDED.subscription_tier,
                subscription_end = EXCLUDED.subscription_end,
                updated_at = EXCLUDED.updated_at
            RETURNING {}
            "#,
            SELECT_COLS
        ))
        .bind(Uuid::new_v4())
        .bind(&input.email)
        .bind(input.user_id)
        .bind(&input.stripe_customer_id)
        .bind(input.subscribed)
        .bind(input.subscription_tier.map(|tier| tier.to_string()))
        .bind(input.subscription_end)
        .bind(input.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_subscriber(&row))
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<Subscriber>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM subscribers WHERE email = $1",
            SELECT_COLS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row.as_ref().map(row_to_subscriber))
    }
}
