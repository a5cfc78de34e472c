use crate::binder::{BindValue, PlaceholderStyle, QueryAssembly};
use crate::db::{prepare, EngineError, QueryExecutor};

use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};


/// Executes assemblies against PostgreSQL through a sqlx pool.
pub struct PostgresExecutor {
    pool: PgPool,
}

impl PostgresExecutor {
    pub async fn connect(conn_str: &str) -> Result<Self, EngineError> {
        let pool = PgPool::connect(conn_str).await?;
        Ok(PostgresExecutor { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        PostgresExecutor { pool }
    }
}

fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &'q BindValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        BindValue::Null => query.bind(None::<String>),
        BindValue::Bool(v) => query.bind(*v),
        BindValue::Int(v) => query.bind(*v),
        BindValue::Float(v) => query.bind(*v),
        BindValue::Text(v) => query.bind(v.as_str()),
    }
}

fn bound<'q>(statement: &'q QueryAssembly) -> Query<'q, Postgres, PgArguments> {
    statement
        .parameters()
        .iter()
        .fold(sqlx::query(statement.sql()), bind_value)
}


#[async_trait::async_trait]
impl QueryExecutor for PostgresExecutor {
    fn style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Numbered
    }

    async fn execute(&mut self, assembly: &QueryAssembly) -> Result<u64, EngineError> {
        let statement = prepare(assembly, self.style())?;

        let result = bound(&statement)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn fetch_column(&mut self, assembly: &QueryAssembly) -> Result<Vec<Option<String>>, EngineError> {
        let statement = prepare(assembly, self.style())?;

        let rows = bound(&statement)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| row.try_get::<Option<String>, _>(0).map_err(EngineError::from))
            .collect()
    }
}
