use crate::domain::syndication::model::{AccountId, AccountIdentifier};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;

/// Lookup of account scopes for feed requests.
///
/// Implementations resolve selectors to the canonical numeric account id;
/// `None` means no matching account.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Resolve an id-shaped selector (numeric id or UUID).
    async fn find_by_identifier(
        &self,
        identifier: &AccountIdentifier,
    ) -> AppResult<Option<AccountId>>;

    /// Resolve a local account name. Only accounts owned by a local user are
    /// eligible; remote accounts cannot own a locally-filtered feed.
    async fn find_local_by_name(&self, name: &str) -> AppResult<Option<AccountId>>;
}

pub struct PgAccountRepository {
    pool: Arc<DbPool>,
}

impl PgAccountRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_by_identifier(
        &self,
        identifier: &AccountIdentifier,
    ) -> AppResult<Option<AccountId>> {
        let pool = self.pool.as_ref();
        let id = match identifier {
            AccountIdentifier::Numeric(id) => {
                sqlx::query_scalar::<_, i64>("SELECT id FROM accounts WHERE id = $1")
                    .bind(id)
                    .fetch_optional(pool)
                    .await?
            }
            AccountIdentifier::Uuid(uuid) => {
                sqlx::query_scalar::<_, i64>("SELECT id FROM accounts WHERE uuid = $1")
                    .bind(uuid)
                    .fetch_optional(pool)
                    .await?
            }
        };

        Ok(id)
    }

    async fn find_local_by_name(&self, name: &str) -> AppResult<Option<AccountId>> {
        let pool = self.pool.as_ref();
        // Local accounts are exactly those owned by a user row.
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT accounts.id
            FROM accounts
            INNER JOIN users ON users.account_id = accounts.id
            WHERE users.username = $1
            "#,
        )
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(id)
    }
}
