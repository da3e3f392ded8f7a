//! PostgreSQL store and the DDL it needs.

use super::BookmarkStore;
use crate::error::StorageError;
use crate::model::{Bookmark, BookmarkPatch, NewBookmark};
use crate::sql::{self, BOOKMARKS_TABLE};
use async_trait::async_trait;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct PgBookmarkStore {
    pool: PgPool,
}

impl PgBookmarkStore {
    pub fn new(pool: PgPool) -> Self {
        PgBookmarkStore { pool }
    }
}

#[async_trait]
impl BookmarkStore for PgBookmarkStore {
    async fn list_all(&self) -> Result<Vec<Bookmark>, StorageError> {
        let q = sql::select_all();
        tracing::debug!(sql = %q.sql, "query");
        Ok(q.query_as::<Bookmark>().fetch_all(&self.pool).await?)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Bookmark>, StorageError> {
        let q = sql::select_by_id(id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        Ok(q.query_as::<Bookmark>().fetch_optional(&self.pool).await?)
    }

    async fn insert(&self, new: NewBookmark) -> Result<Bookmark, StorageError> {
        let q = sql::insert(&new);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        Ok(q.query_as::<Bookmark>().fetch_one(&self.pool).await?)
    }

    async fn update(&self, id: i64, patch: BookmarkPatch) -> Result<u64, StorageError> {
        let Some(q) = sql::update(id, &patch) else {
            return Ok(0);
        };
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        Ok(q.query().execute(&self.pool).await?.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64, StorageError> {
        let q = sql::delete(id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        Ok(q.query().execute(&self.pool).await?.rows_affected())
    }
}

/// Create the bookmarks table if it does not exist yet.
pub async fn ensure_bookmarks_table(pool: &PgPool) -> Result<(), StorageError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS "{}" (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            url TEXT NOT NULL,
            description TEXT NOT NULL,
            rating DOUBLE PRECISION NOT NULL
        )
        "#,
        BOOKMARKS_TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;
    tracing::info!(table = BOOKMARKS_TABLE, "bookmarks table ready");
    Ok(())
}

/// Connect to the server's `postgres` database and create the target database when missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StorageError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
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

fn parse_db_name_from_url(url: &str) -> Result<(String, String), StorageError> {
    let scheme_end = url
        .find("://")
        .ok_or_else(|| StorageError::InvalidUrl("missing scheme".into()))?
        + 3;
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| StorageError::InvalidUrl("no database path".into()))?;
    let path_and_query = &url[path_start..];
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((name, query)) => (name, Some(query)),
        None => (path_and_query, None),
    };
    let mut admin_url = format!("{}postgres", &url[..path_start]);
    if let Some(query) = query {
        admin_url.push('?');
        admin_url.push_str(query);
    }
    Ok((admin_url, db_name.trim().to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
