use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

use crate::db::Database;

/// Registration record. Telemetry references learners only loosely by
/// subject id; nothing enforces that a focus event's subject exists here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Learner {
    pub id: String,
    pub name: String,
    pub email: String,
    pub interests: String,
    pub skills: String,
    pub scores: String,
    pub parent_email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewLearner {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub interests: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub scores: String,
    #[serde(default)]
    pub parent_email: String,
}

pub async fn insert_learner(db: &Database, new: &NewLearner) -> Result<Learner, sqlx::Error> {
    let learner = Learner {
        id: Uuid::new_v4().to_string(),
        name: new.name.clone(),
        email: new.email.clone(),
        interests: new.interests.clone(),
        skills: new.skills.clone(),
        scores: new.scores.clone(),
        parent_email: new.parent_email.clone(),
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO learners (id, name, email, interests, skills, scores, parent_email, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(&learner.id)
    .bind(&learner.name)
    .bind(&learner.email)
    .bind(&learner.interests)
    .bind(&learner.skills)
    .bind(&learner.scores)
    .bind(&learner.parent_email)
    .bind(learner.created_at)
    .execute(db.pool())
    .await?;

    Ok(learner)
}

pub async fn get_learner(db: &Database, id: &str) -> Result<Option<Learner>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, name, email, interests, skills, scores, parent_email, created_at
        FROM learners
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(db.pool())
    .await?;

    row.map(|row| {
        Ok(Learner {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            interests: row.try_get("interests")?,
            skills: row.try_get("skills")?,
            scores: row.try_get("scores")?,
            parent_email: row.try_get("parent_email")?,
            created_at: row.try_get("created_at")?,
        })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registration_round_trips() {
        let db = Database::connect_ephemeral().await.unwrap();

        let new = NewLearner {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            interests: "coding".to_string(),
            scores: "Math:80,Science:90".to_string(),
            ..NewLearner::default()
        };

        let created = insert_learner(&db, &new).await.unwrap();
        let fetched = get_learner(&db, &created.id).await.unwrap().unwrap();

        assert_eq!(fetched.name, "Asha");
        assert_eq!(fetched.scores, "Math:80,Science:90");
        assert_eq!(fetched.id, created.id);
    }

    #[tokio::test]
    async fn missing_learner_is_none() {
        let db = Database::connect_ephemeral().await.unwrap();
        assert!(get_learner(&db, "nope").await.unwrap().is_none());
    }
}
