//! PostgreSQL adapter and table bootstrap. Tables live in the schema named by `SOCIAL_SCHEMA`
//! (default `public`).

use crate::config::is_identifier;
use crate::error::{AppError, ConfigError};
use crate::model::{Account, AccountDraft, Message, MessageDraft};
use crate::store::{AccountStore, MessageStore};
use async_trait::async_trait;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

const ACCOUNT_COLUMNS: &str = "account_id, username, password";
const MESSAGE_COLUMNS: &str = "message_id, posted_by, message_text, time_posted_epoch";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    schema: String,
    account_table: String,
    message_table: String,
}

impl PgStore {
    /// `schema` must be a plain identifier; it is interpolated into SQL.
    pub fn new(pool: PgPool, schema: &str) -> Result<Self, AppError> {
        if !is_identifier(schema) {
            return Err(ConfigError::Invalid {
                key: "SOCIAL_SCHEMA",
                value: schema.to_string(),
            }
            .into());
        }
        Ok(PgStore {
            pool,
            schema: schema.to_string(),
            account_table: qualified_table(schema, "account"),
            message_table: qualified_table(schema, "message"),
        })
    }

    /// Create the schema and both tables if they do not exist. Safe to call on every start.
    pub async fn ensure_tables(&self) -> Result<(), AppError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(&self.schema)))
            .execute(&self.pool)
            .await?;

        let account_ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                account_id SERIAL PRIMARY KEY,
                username VARCHAR(255) NOT NULL UNIQUE,
                password VARCHAR(255) NOT NULL
            )
            "#,
            self.account_table
        );
        sqlx::query(&account_ddl).execute(&self.pool).await?;

        let message_ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                message_id SERIAL PRIMARY KEY,
                posted_by INTEGER NOT NULL REFERENCES {}(account_id),
                message_text VARCHAR(255) NOT NULL,
                time_posted_epoch BIGINT NOT NULL
            )
            "#,
            self.message_table, self.account_table
        );
        sqlx::query(&message_ddl).execute(&self.pool).await?;
        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS message_posted_by_idx ON {} (posted_by)",
            self.message_table
        ))
        .execute(&self.pool)
        .await?;

        tracing::info!(schema = %self.schema, "account and message tables ready");
        Ok(())
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn insert_account(&self, draft: &AccountDraft) -> Result<Option<Account>, AppError> {
        let sql = format!(
            "INSERT INTO {} (username, password) VALUES ($1, $2) \
             ON CONFLICT (username) DO NOTHING RETURNING {}",
            self.account_table, ACCOUNT_COLUMNS
        );
        tracing::debug!(sql = %sql, username = %draft.username, "query");
        let row = sqlx::query_as::<_, Account>(&sql)
            .bind(&draft.username)
            .bind(&draft.password)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Account>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE username = $1 AND password = $2",
            ACCOUNT_COLUMNS, self.account_table
        );
        tracing::debug!(sql = %sql, username = %username, "query");
        let row = sqlx::query_as::<_, Account>(&sql)
            .bind(username)
            .bind(password)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_account_by_id(&self, account_id: i32) -> Result<Option<Account>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE account_id = $1",
            ACCOUNT_COLUMNS, self.account_table
        );
        tracing::debug!(sql = %sql, account_id, "query");
        let row = sqlx::query_as::<_, Account>(&sql)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl MessageStore for PgStore {
    async fn insert_message(&self, draft: &MessageDraft) -> Result<Message, AppError> {
        let sql = format!(
            "INSERT INTO {} (posted_by, message_text, time_posted_epoch) VALUES ($1, $2, $3) RETURNING {}",
            self.message_table, MESSAGE_COLUMNS
        );
        tracing::debug!(sql = %sql, posted_by = draft.posted_by, "query");
        sqlx::query_as::<_, Message>(&sql)
            .bind(draft.posted_by)
            .bind(&draft.message_text)
            .bind(draft.time_posted_epoch)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                // Account vanished between the existence check and the insert.
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    AppError::Validation(format!("account {} does not exist", draft.posted_by))
                }
                e => AppError::Db(e),
            })
    }

    async fn list_messages(&self) -> Result<Vec<Message>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY message_id",
            MESSAGE_COLUMNS, self.message_table
        );
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Message>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_message_by_id(&self, message_id: i32) -> Result<Option<Message>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE message_id = $1",
            MESSAGE_COLUMNS, self.message_table
        );
        tracing::debug!(sql = %sql, message_id, "query");
        let row = sqlx::query_as::<_, Message>(&sql)
            .bind(message_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_message(&self, message_id: i32) -> Result<u64, AppError> {
        let sql = format!("DELETE FROM {} WHERE message_id = $1", self.message_table);
        tracing::debug!(sql = %sql, message_id, "query");
        let result = sqlx::query(&sql).bind(message_id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn update_message_text(&self, message_id: i32, message_text: &str) -> Result<u64, AppError> {
        let sql = format!(
            "UPDATE {} SET message_text = $1 WHERE message_id = $2",
            self.message_table
        );
        tracing::debug!(sql = %sql, message_id, "query");
        let result = sqlx::query(&sql)
            .bind(message_text)
            .bind(message_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn list_messages_by_account(&self, account_id: i32) -> Result<Vec<Message>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE posted_by = $1 ORDER BY message_id",
            MESSAGE_COLUMNS, self.message_table
        );
        tracing::debug!(sql = %sql, account_id, "query");
        let rows = sqlx::query_as::<_, Message>(&sql)
            .bind(account_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::Invalid {
            key: "DATABASE_URL",
            value: e.to_string(),
        })?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i + 1)
        .ok_or(ConfigError::Invalid {
            key: "DATABASE_URL",
            value: "no database path".into(),
        })?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres{}", base, query);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(table))
}
