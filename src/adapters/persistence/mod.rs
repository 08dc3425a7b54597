use std::str::FromStr;

use sqlx::PgPool;

use crate::app_error::AppError;

pub mod subscriber;

/// Parse an optional text column into an enum, logging a warning on failure.
///
/// SQL NULL maps to `None` without logging. Unknown values are logged and
/// also treated as `None`, so a hand-edited row never fails a request.
pub fn parse_text_with_fallback<T: FromStr>(
    raw: Option<&str>,
    field_name: &str,
    entity_type: &str,
    entity_id: &str,
) -> Option<T> {
    let raw = raw?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(
                field = field_name,
                entity_type = entity_type,
                entity_id = entity_id,
                raw_value = %raw,
                "Failed to parse text field, treating as null"
            );
            None
        }
    }
}

#[derive(Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    pub fn new(pool: PgPool) -> Self {
        PostgresPersistence { pool }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        // Details stay in debug logs; the HTTP boundary logs the failure itself
        tracing::debug!(error = ?err, "Database error");
        AppError::Database("Database operation failed".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::count_error_events;
    use shieldguard_types::SubscriptionTier;

    #[test]
    fn parse_text_valid_tier() {
        let tier: Option<SubscriptionTier> =
            parse_text_with_fallback(Some("Premium"), "subscription_tier", "subscriber", "1");
        assert_eq!(tier, Some(SubscriptionTier::Premium));
    }

    #[test]
    fn parse_text_sql_null_returns_none() {
        let tier: Option<SubscriptionTier> =
            parse_text_with_fallback(None, "subscription_tier", "subscriber", "1");
        assert_eq!(tier, None);
    }

    #[test]
    fn parse_text_unknown_value_returns_none() {
        let tier: Option<SubscriptionTier> =
            parse_text_with_fallback(Some("Platinum"), "subscription_tier", "subscriber", "1");
        assert_eq!(tier, None);
    }

    #[test]
    fn sqlx_error_maps_to_sanitized_database_error() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        match err {
            AppError::Database(msg) => assert_eq!(msg, "Database operation failed"),
            other => panic!("expected database error, got {other:?}"),
        }
    }

    #[test]
    fn sqlx_error_conversion_leaves_error_logging_to_the_boundary() {
        let (err, errors_logged) =
            count_error_events(|| AppError::from(sqlx::Error::RowNotFound));
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(errors_logged, 0);
    }
}
