/**
 * PostgreSQL Member Store
 *
 * Members live in one table with uuid[] columns for the relationship sets.
 * Set semantics come from conditional array updates: an add only fires when
 * the array does not already contain the value, a remove only when it does.
 * Each UPDATE is a single statement, so each call is atomic on its record.
 */

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::store::{Member, MemberStore, NewMember, RelationField, StoreError};

const MEMBER_COLUMNS: &str =
    "id, name, email, age, password_hash, friends, sent_requests, received_requests, created_at";

/// Member store backed by PostgreSQL.
#[derive(Clone)]
pub struct PgMemberStore {
    pool: PgPool,
}

impl PgMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberStore for PgMemberStore {
    async fn insert(&self, new: NewMember) -> Result<Member, StoreError> {
        let id = Uuid::new_v4();
        let now = chrono::Utc::now();

        let query = format!(
            r#"
            INSERT INTO members (id, name, email, age, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {MEMBER_COLUMNS}
            "#
        );

        let member = sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .bind(&new.name)
            .bind(&new.email)
            .bind(new.age)
            .bind(&new.password_hash)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateEmail,
                _ => StoreError::Database(e),
            })?;

        Ok(member)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, StoreError> {
        let query = format!("SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1");
        let member = sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(member)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, StoreError> {
        let query = format!("SELECT {MEMBER_COLUMNS} FROM members WHERE email = $1");
        let member = sqlx::query_as::<_, Member>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(member)
    }

    async fn find_many_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Member>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query =
            format!("SELECT {MEMBER_COLUMNS} FROM members WHERE id = ANY($1) ORDER BY name");
        let members = sqlx::query_as::<_, Member>(&query)
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await?;
        Ok(members)
    }

    async fn list_other_than(&self, id: Uuid) -> Result<Vec<Member>, StoreError> {
        let query = format!("SELECT {MEMBER_COLUMNS} FROM members WHERE id <> $1 ORDER BY name");
        let members = sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        Ok(members)
    }

    async fn add_to_set(
        &self,
        id: Uuid,
        field: RelationField,
        value: Uuid,
    ) -> Result<bool, StoreError> {
        let col = field.column();
        let query = format!(
            r#"
            UPDATE members
            SET {col} = array_append({col}, $2)
            WHERE id = $1 AND NOT ({col} @> ARRAY[$2::uuid])
            "#
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(value)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove_from_set(
        &self,
        id: Uuid,
        field: RelationField,
        value: Uuid,
    ) -> Result<bool, StoreError> {
        let col = field.column();
        let query = format!(
            r#"
            UPDATE members
            SET {col} = array_remove({col}, $2)
            WHERE id = $1 AND {col} @> ARRAY[$2::uuid]
            "#
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(value)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn apply_acceptance(&self, id: Uuid, other: Uuid) -> Result<(), StoreError> {
        // One statement: the record never shows `other` as friend and
        // pending at the same time.
        sqlx::query(
            r#"
            UPDATE members
            SET friends = CASE
                    WHEN friends @> ARRAY[$2::uuid] THEN friends
                    ELSE array_append(friends, $2)
                END,
                sent_requests = array_remove(sent_requests, $2),
                received_requests = array_remove(received_requests, $2)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(other)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
