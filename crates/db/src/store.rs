use jardine_shared::mealplan::PlannerState;
use jardine_shared::{Error, LocalStore};
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use sqlx_migrator::{Migrate, Plan};

use crate::table::KvStore;

pub const DEFAULT_KEY: &str = "jardineMealPlanner";

/// Local snapshot slot: one row of `kv_store` holding the serialized state.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    key: String,
}

fn persistence(err: impl std::fmt::Display) -> Error {
    Error::Persistence(err.to_string())
}

pub async fn migrate(pool: &SqlitePool) -> anyhow::Result<()> {
    let mut conn = pool.acquire().await?;
    crate::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    Ok(())
}

impl SqliteStore {
    pub fn new(pool: SqlitePool, key: impl Into<String>) -> Self {
        Self {
            pool,
            key: key.into(),
        }
    }

    /// Opens the database, applies pending migrations and binds to `key`.
    pub async fn connect(database_url: &str, key: impl Into<String>) -> anyhow::Result<Self> {
        let pool = crate::create_pool(database_url, 1).await?;
        migrate(&pool).await?;

        Ok(Self::new(pool, key))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Raw stored value, without parsing it.
    pub async fn load_raw(&self) -> jardine_shared::Result<Option<String>> {
        let statement = Query::select()
            .columns([KvStore::Value])
            .from(KvStore::Table)
            .and_where(Expr::col(KvStore::Key).eq(&self.key))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence)?;

        Ok(row.map(|(value,)| value))
    }

    pub async fn save_raw(&self, value: impl Into<String>) -> jardine_shared::Result<()> {
        let value: String = value.into();
        let now = time::OffsetDateTime::now_utc().unix_timestamp();

        let statement = Query::insert()
            .into_table(KvStore::Table)
            .columns([KvStore::Key, KvStore::Value, KvStore::UpdatedAt])
            .values_panic([self.key.to_owned().into(), value.into(), now.into()])
            .on_conflict(
                OnConflict::column(KvStore::Key)
                    .update_columns([KvStore::Value, KvStore::UpdatedAt])
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.pool)
            .await
            .map_err(persistence)?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl LocalStore for SqliteStore {
    async fn load(&self) -> jardine_shared::Result<Option<PlannerState>> {
        let Some(value) = self.load_raw().await? else {
            return Ok(None);
        };

        let state = PlannerState::from_json(&value)?;

        Ok(Some(state))
    }

    async fn save(&self, state: &PlannerState) -> jardine_shared::Result<()> {
        let value = state.to_json().map_err(persistence)?;
        self.save_raw(value).await?;

        tracing::debug!(key = self.key, "local snapshot saved");

        Ok(())
    }
}
