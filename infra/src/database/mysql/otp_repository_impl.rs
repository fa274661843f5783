//! MySQL implementation of the OtpRepository trait.
//!
//! Records live in a single table (default `otp_verifications`) with a
//! unique index on `identity`, which is what makes `replace` a single
//! atomic upsert.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::{MySqlPool, Row};
use tracing::{debug, error, info};
use uuid::Uuid;

use otp_core::domain::entities::OtpRecord;
use otp_core::errors::{DomainError, DomainResult};
use otp_core::repositories::OtpRepository;
use otp_shared::config::otp::DEFAULT_TABLE;
use otp_shared::utils::mask_identity;

use crate::InfrastructureError;

// Unquoted MySQL identifier, at most 64 characters
static TABLE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,63}$").unwrap());

/// Check that `table` can be interpolated into SQL as an identifier
pub fn validate_table_name(table: &str) -> Result<(), InfrastructureError> {
    if TABLE_NAME.is_match(table) {
        Ok(())
    } else {
        Err(InfrastructureError::Config(format!(
            "Invalid table name: {:?}",
            table
        )))
    }
}

/// DDL for the code table
pub fn create_table_sql(table: &str) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS `{table}` (
            id CHAR(36) NOT NULL,
            identity VARCHAR(191) COLLATE utf8mb4_bin NOT NULL,
            token CHAR(64) NOT NULL,
            expired DATETIME(6) NOT NULL,
            created_at DATETIME(6) NOT NULL,
            updated_at DATETIME(6) NOT NULL,
            PRIMARY KEY (id),
            UNIQUE KEY uniq_identity (identity),
            KEY idx_expired (expired)
        ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
        "#
    )
}

/// MySQL implementation of OtpRepository
pub struct MySqlOtpRepository {
    /// Database connection pool
    pool: MySqlPool,
    /// Validated table name
    table: String,
}

impl MySqlOtpRepository {
    /// Create a repository over `table`
    ///
    /// # Returns
    /// * `Err(InfrastructureError::Config)` - `table` is not a plain identifier
    pub fn new(pool: MySqlPool, table: &str) -> Result<Self, InfrastructureError> {
        validate_table_name(table)?;
        Ok(Self {
            pool,
            table: table.to_string(),
        })
    }

    /// Create a repository over the default `otp_verifications` table
    pub fn with_default_table(pool: MySqlPool) -> Self {
        Self {
            pool,
            table: DEFAULT_TABLE.to_string(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Create the table and its indexes if they do not exist
    pub async fn create_table(&self) -> Result<(), InfrastructureError> {
        sqlx::query(&create_table_sql(&self.table))
            .execute(&self.pool)
            .await?;

        info!(table = %self.table, "Ensured OTP table exists");
        Ok(())
    }

    fn upsert_sql(&self) -> String {
        format!(
            r#"
            INSERT INTO `{}` (id, identity, token, expired, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                id = VALUES(id),
                token = VALUES(token),
                expired = VALUES(expired),
                created_at = VALUES(created_at),
                updated_at = VALUES(updated_at)
            "#,
            self.table
        )
    }

    /// Convert database row to OtpRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> DomainResult<OtpRecord> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::storage("Failed to get id", e))?;

        Ok(OtpRecord {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::storage("Invalid record UUID", e))?,
            identity: row
                .try_get("identity")
                .map_err(|e| DomainError::storage("Failed to get identity", e))?,
            token: row
                .try_get("token")
                .map_err(|e| DomainError::storage("Failed to get token", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expired")
                .map_err(|e| DomainError::storage("Failed to get expired", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::storage("Failed to get created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::storage("Failed to get updated_at", e))?,
        })
    }
}

#[async_trait]
impl OtpRepository for MySqlOtpRepository {
    async fn find_by_identity(&self, identity: &str) -> DomainResult<Option<OtpRecord>> {
        let query = format!(
            "SELECT id, identity, token, expired, created_at, updated_at FROM `{}` WHERE identity = ? LIMIT 1",
            self.table
        );

        let row = sqlx::query(&query)
            .bind(identity)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage("Failed to find code", e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn replace(&self, record: OtpRecord) -> DomainResult<OtpRecord> {
        sqlx::query(&self.upsert_sql())
            .bind(record.id.to_string())
            .bind(&record.identity)
            .bind(&record.token)
            .bind(record.expires_at)
            .bind(record.created_at)
            .bind(record.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    identity = %mask_identity(&record.identity),
                    error = %e,
                    "Failed to store code in database"
                );
                DomainError::storage("Failed to store code", e)
            })?;

        debug!(identity = %mask_identity(&record.identity), "Stored code in database");
        Ok(record)
    }

    async fn consume(&self, identity: &str, token: &str, now: DateTime<Utc>) -> DomainResult<bool> {
        let query = format!(
            "DELETE FROM `{}` WHERE identity = ? AND token = ? AND expired > ?",
            self.table
        );

        let result = sqlx::query(&query)
            .bind(identity)
            .bind(token)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    identity = %mask_identity(identity),
                    error = %e,
                    "Failed to consume code"
                );
                DomainError::storage("Failed to consume code", e)
            })?;

        Ok(result.rows_affected() == 1)
    }

    async fn upsert(&self, record: &OtpRecord) -> DomainResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage("Failed to begin transaction", e))?;

        let select = format!(
            "SELECT id FROM `{}` WHERE identity = ? AND token = ? FOR UPDATE",
            self.table
        );
        let existing = sqlx::query(&select)
            .bind(&record.identity)
            .bind(&record.token)
            .fetch_optional(&mut *tx)
            .await;

        let written = match existing {
            Ok(Some(_)) => {
                let update = format!(
                    "UPDATE `{}` SET expired = ?, created_at = ?, updated_at = ? WHERE identity = ? AND token = ?",
                    self.table
                );
                sqlx::query(&update)
                    .bind(record.expires_at)
                    .bind(record.created_at)
                    .bind(record.updated_at)
                    .bind(&record.identity)
                    .bind(&record.token)
                    .execute(&mut *tx)
                    .await
            }
            Ok(None) => {
                sqlx::query(&self.upsert_sql())
                    .bind(record.id.to_string())
                    .bind(&record.identity)
                    .bind(&record.token)
                    .bind(record.expires_at)
                    .bind(record.created_at)
                    .bind(record.updated_at)
                    .execute(&mut *tx)
                    .await
            }
            Err(e) => Err(e),
        };

        match written {
            Ok(_) => tx
                .commit()
                .await
                .map_err(|e| DomainError::storage("Failed to commit transaction", e)),
            Err(e) => {
                if let Err(rollback_error) = tx.rollback().await {
                    error!(error = %rollback_error, "Failed to roll back upsert");
                }
                error!(
                    identity = %mask_identity(&record.identity),
                    error = %e,
                    "Failed to upsert code"
                );
                Err(DomainError::storage("Failed to upsert code", e))
            }
        }
    }

    async fn delete_by_identity(&self, identity: &str) -> DomainResult<u64> {
        let query = format!("DELETE FROM `{}` WHERE identity = ?", self.table);

        let result = sqlx::query(&query)
            .bind(identity)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage("Failed to delete codes", e))?;

        Ok(result.rows_affected())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> DomainResult<u64> {
        let query = format!("DELETE FROM `{}` WHERE expired <= ?", self.table);

        let result = sqlx::query(&query)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to delete expired codes");
                DomainError::storage("Failed to delete expired codes", e)
            })?;

        Ok(result.rows_affected())
    }
}
