//! Values bound to bookmark statements.

use sqlx::postgres::{PgArguments, PgRow, Postgres};
use sqlx::query::{Query, QueryAs};
use sqlx::FromRow;

/// A value that can be bound to a PostgreSQL query.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlParam {
    BigInt(i64),
    Double(f64),
    Text(String),
}

impl SqlParam {
    pub fn bind_to<'q>(
        self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        match self {
            SqlParam::BigInt(n) => query.bind(n),
            SqlParam::Double(n) => query.bind(n),
            SqlParam::Text(s) => query.bind(s),
        }
    }

    pub fn bind_to_as<'q, O>(
        self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments>
    where
        O: for<'r> FromRow<'r, PgRow>,
    {
        match self {
            SqlParam::BigInt(n) => query.bind(n),
            SqlParam::Double(n) => query.bind(n),
            SqlParam::Text(s) => query.bind(s),
        }
    }
}

impl From<i64> for SqlParam {
    fn from(n: i64) -> Self {
        SqlParam::BigInt(n)
    }
}

impl From<f64> for SqlParam {
    fn from(n: f64) -> Self {
        SqlParam::Double(n)
    }
}

impl From<String> for SqlParam {
    fn from(s: String) -> Self {
        SqlParam::Text(s)
    }
}
