use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

use crate::db::Database;

/// One attention-state observation tied to a subject. Immutable once
/// written; the store is append-only and never pruned here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusEvent {
    pub id: String,
    pub subject_id: String,
    pub status: String,
    pub received_at: DateTime<Utc>,
}

/// An accepted telemetry message, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFocusEvent {
    pub subject_id: String,
    pub status: String,
}

pub async fn insert_focus_event(
    db: &Database,
    event: &NewFocusEvent,
) -> Result<FocusEvent, sqlx::Error> {
    let record = FocusEvent {
        id: Uuid::new_v4().to_string(),
        subject_id: event.subject_id.clone(),
        status: event.status.clone(),
        received_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO focus_events (id, subject_id, status, received_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&record.id)
    .bind(&record.subject_id)
    .bind(&record.status)
    .bind(record.received_at)
    .execute(db.pool())
    .await?;

    Ok(record)
}

/// Most-recent-first focus events for one subject, capped at 50 rows.
pub async fn recent_focus_events(
    db: &Database,
    subject_id: &str,
) -> Result<Vec<FocusEvent>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, subject_id, status, received_at
        FROM focus_events
        WHERE subject_id = ?1
        ORDER BY received_at DESC
        LIMIT 50
        "#,
    )
    .bind(subject_id)
    .fetch_all(db.pool())
    .await?;

    rows.into_iter()
        .map(|row| {
            Ok(FocusEvent {
                id: row.try_get("id")?,
                subject_id: row.try_get("subject_id")?,
                status: row.try_get("status")?,
                received_at: row.try_get("received_at")?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_and_read_back_one_event() {
        let db = Database::connect_ephemeral().await.unwrap();

        let event = NewFocusEvent {
            subject_id: "42".to_string(),
            status: "true".to_string(),
        };
        insert_focus_event(&db, &event).await.unwrap();

        let events = recent_focus_events(&db, "42").await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].subject_id, "42");
        assert_eq!(events[0].status, "true");
    }

    #[tokio::test]
    async fn reads_are_scoped_to_the_subject() {
        let db = Database::connect_ephemeral().await.unwrap();

        for subject in ["1", "2", "1"] {
            insert_focus_event(
                &db,
                &NewFocusEvent {
                    subject_id: subject.to_string(),
                    status: "false".to_string(),
                },
            )
            .await
            .unwrap();
        }

        assert_eq!(recent_focus_events(&db, "1").await.unwrap().len(), 2);
        assert_eq!(recent_focus_events(&db, "2").await.unwrap().len(), 1);
        assert!(recent_focus_events(&db, "3").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reads_are_bounded_to_fifty_rows() {
        let db = Database::connect_ephemeral().await.unwrap();

        for i in 0..60 {
            insert_focus_event(
                &db,
                &NewFocusEvent {
                    subject_id: "7".to_string(),
                    status: format!("{}", i % 2 == 0),
                },
            )
            .await
            .unwrap();
        }

        let events = recent_focus_events(&db, "7").await.unwrap();
        assert_eq!(events.len(), 50);
        // Most recent first.
        for pair in events.windows(2) {
            assert!(pair[0].received_at >= pair[1].received_at);
        }
    }
}
