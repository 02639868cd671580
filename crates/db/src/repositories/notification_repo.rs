//! Repository for the `notifications` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::notification::{NewNotification, Notification, NotificationFilter};

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, event_type, event_data, user_id, user_name, user_email, \
    subject, message, status, source_service, sent_at, created_at, updated_at";

/// Provides read/write operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a new `pending` notification row, returning the generated ID.
    pub async fn create(pool: &PgPool, new: &NewNotification) -> Result<Uuid, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO notifications \
                (event_type, event_data, user_id, user_name, user_email, \
                 subject, message, source_service) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id",
        )
        .bind(&new.event_type)
        .bind(&new.event_data)
        .bind(&new.user_id)
        .bind(&new.user_name)
        .bind(&new.user_email)
        .bind(&new.subject)
        .bind(&new.message)
        .bind(&new.source_service)
        .fetch_one(pool)
        .await
    }

    /// Fetch a single notification by ID.
    pub async fn get(pool: &PgPool, id: Uuid) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List notifications matching the filter, newest-first.
    pub async fn list(
        pool: &PgPool,
        filter: &NotificationFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let (where_clause, binds, bind_idx) = build_filter(filter);

        let query = format!(
            "SELECT {COLUMNS} FROM notifications {where_clause} \
             ORDER BY created_at DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let mut q = sqlx::query_as::<_, Notification>(&query);
        for value in &binds {
            q = q.bind(value.as_str());
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count notifications matching the filter.
    pub async fn count(pool: &PgPool, filter: &NotificationFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, binds, _) = build_filter(filter);

        let query = format!("SELECT COUNT(*) FROM notifications {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for value in &binds {
            q = q.bind(value.as_str());
        }
        q.fetch_one(pool).await
    }

    /// Count notifications per status value.
    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT status, COUNT(*) FROM notifications GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }

    /// Mark a pending notification as sent.
    ///
    /// Returns `true` if the notification existed and was still pending.
    pub async fn mark_sent(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET status = 'sent', sent_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark a pending notification as failed.
    ///
    /// Returns `true` if the notification existed and was still pending.
    pub async fn mark_failed(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET status = 'failed', updated_at = NOW() \
             WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Build the WHERE clause and bind values for a [`NotificationFilter`].
///
/// Returns the clause, the text values to bind in order, and the next free
/// bind index (for appending LIMIT/OFFSET placeholders).
fn build_filter(filter: &NotificationFilter) -> (String, Vec<String>, usize) {
    let mut conditions: Vec<String> = Vec::new();
    let mut binds: Vec<String> = Vec::new();
    let mut bind_idx = 1;

    if let Some(ref event_type) = filter.event_type {
        conditions.push(format!("event_type = ${bind_idx}"));
        bind_idx += 1;
        binds.push(event_type.clone());
    }

    if let Some(ref status) = filter.status {
        conditions.push(format!("status = ${bind_idx}"));
        bind_idx += 1;
        binds.push(status.clone());
    }

    if let Some(ref source_service) = filter.source_service {
        conditions.push(format!("source_service = ${bind_idx}"));
        bind_idx += 1;
        binds.push(source_service.clone());
    }

    if let Some(ref user_id) = filter.user_id {
        conditions.push(format!("user_id = ${bind_idx}"));
        bind_idx += 1;
        binds.push(user_id.clone());
    }

    if let Some(ref search) = filter.search {
        conditions.push(format!(
            "(subject ILIKE ${bind_idx} OR message ILIKE ${bind_idx} OR user_name ILIKE ${bind_idx})"
        ));
        bind_idx += 1;
        binds.push(format!("%{search}%"));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, binds, bind_idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_has_no_where_clause() {
        let (clause, binds, bind_idx) = build_filter(&NotificationFilter::default());
        assert_eq!(clause, "");
        assert!(binds.is_empty());
        assert_eq!(bind_idx, 1);
    }

    #[test]
    fn filters_are_anded_with_sequential_binds() {
        let filter = NotificationFilter {
            event_type: Some("order_created".into()),
            status: Some("pending".into()),
            user_id: Some("user-1".into()),
            ..Default::default()
        };
        let (clause, binds, bind_idx) = build_filter(&filter);
        assert_eq!(
            clause,
            "WHERE event_type = $1 AND status = $2 AND user_id = $3"
        );
        assert_eq!(binds, vec!["order_created", "pending", "user-1"]);
        assert_eq!(bind_idx, 4);
    }

    #[test]
    fn search_binds_one_pattern_for_all_columns() {
        let filter = NotificationFilter {
            search: Some("chess".into()),
            ..Default::default()
        };
        let (clause, binds, _) = build_filter(&filter);
        assert_eq!(
            clause,
            "WHERE (subject ILIKE $1 OR message ILIKE $1 OR user_name ILIKE $1)"
        );
        assert_eq!(binds, vec!["%chess%"]);
    }
}
