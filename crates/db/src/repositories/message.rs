use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row};
use uuid::Uuid;

use msgstats_core::{Amount, Message, MessageFilter};

use super::{MessageRepository, RepositoryError};
use crate::DbPool;

const SELECT_MESSAGE: &str = "SELECT uuid, customerid, type, amount FROM message";

pub struct SqlMessageRepository {
    pool: DbPool,
}

impl SqlMessageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn message_from_row(row: &SqliteRow) -> Result<Message, RepositoryError> {
        let raw_uuid: String = row.try_get("uuid")?;
        let uuid = Uuid::parse_str(&raw_uuid)
            .map_err(|error| RepositoryError::Decode(format!("invalid uuid `{raw_uuid}`: {error}")))?;

        let raw_amount: String = row.try_get("amount")?;
        let amount = Amount::parse(&raw_amount).map_err(|error| {
            RepositoryError::Decode(format!("invalid amount `{raw_amount}`: {error}"))
        })?;

        Ok(Message {
            customerid: row.try_get("customerid")?,
            message_type: row.try_get("type")?,
            amount,
            uuid,
        })
    }
}

#[async_trait]
impl MessageRepository for SqlMessageRepository {
    async fn list_all(&self) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query(SELECT_MESSAGE).fetch_all(&self.pool).await?;
        rows.iter().map(Self::message_from_row).collect()
    }

    async fn create(&self, message: Message) -> Result<Message, RepositoryError> {
        let date = Utc::now().date_naive();

        sqlx::query(
            "INSERT INTO message (uuid, customerid, type, amount, date) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(message.uuid.to_string())
        .bind(message.customerid)
        .bind(&message.message_type)
        .bind(message.amount.to_string())
        .bind(date)
        .execute(&self.pool)
        .await
        .map_err(|error| match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::Duplicate(message.uuid)
            }
            _ => RepositoryError::Database(error),
        })?;

        Ok(message)
    }

    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Message>, RepositoryError> {
        let row = sqlx::query(
            "SELECT uuid, customerid, type, amount FROM message WHERE uuid = ? LIMIT 1",
        )
        .bind(uuid.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::message_from_row).transpose()
    }

    async fn find_filtered(
        &self,
        filter: &MessageFilter,
    ) -> Result<Vec<Message>, RepositoryError> {
        let mut builder = QueryBuilder::new(SELECT_MESSAGE);
        builder.push(" WHERE 1=1");

        match (filter.start_date, filter.end_date) {
            (Some(start), Some(end)) => {
                builder.push(" AND date BETWEEN ");
                builder.push_bind(start);
                builder.push(" AND ");
                builder.push_bind(end);
            }
            (Some(start), None) => {
                builder.push(" AND date >= ");
                builder.push_bind(start);
            }
            (None, Some(end)) => {
                builder.push(" AND date <= ");
                builder.push_bind(end);
            }
            (None, None) => {}
        }

        if let Some(customerid) = filter.customerid {
            builder.push(" AND customerid = ");
            builder.push_bind(customerid);
        }

        if let Some(message_type) = &filter.message_type {
            builder.push(" AND type = ");
            builder.push_bind(message_type);
        }

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(Self::message_from_row).collect()
    }
}
