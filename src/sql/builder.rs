//! Builds parameterized SELECT, INSERT, UPDATE and DELETE for the bookmarks table.

use super::params::SqlParam;
use crate::model::{BookmarkPatch, NewBookmark};
use sqlx::postgres::{PgArguments, PgRow, Postgres};
use sqlx::query::{Query, QueryAs};
use sqlx::FromRow;

pub const BOOKMARKS_TABLE: &str = "bookmarks";

/// Columns in the order `Bookmark` reads them.
const COLUMNS: [&str; 5] = ["id", "title", "url", "description", "rating"];

fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn column_list() -> String {
    COLUMNS.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ")
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: impl Into<SqlParam>) -> usize {
        self.params.push(v.into());
        self.params.len()
    }

    /// Statement with every parameter bound, for execute / rows_affected.
    pub fn query(&self) -> Query<'_, Postgres, PgArguments> {
        self.params
            .iter()
            .cloned()
            .fold(sqlx::query::<Postgres>(&self.sql), |q, p| p.bind_to(q))
    }

    /// Statement with every parameter bound, decoding rows into `O`.
    pub fn query_as<O>(&self) -> QueryAs<'_, Postgres, O, PgArguments>
    where
        O: for<'r> FromRow<'r, PgRow>,
    {
        self.params
            .iter()
            .cloned()
            .fold(sqlx::query_as::<Postgres, O>(&self.sql), |q, p| p.bind_to_as(q))
    }
}

pub fn select_all() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        column_list(),
        quoted(BOOKMARKS_TABLE),
        quoted("id")
    );
    q
}

pub fn select_by_id(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        column_list(),
        quoted(BOOKMARKS_TABLE),
        quoted("id"),
        n
    );
    q
}

/// INSERT of every non-id column, returning the stored row.
pub fn insert(new: &NewBookmark) -> QueryBuf {
    let mut q = QueryBuf::new();
    let values: [(&str, SqlParam); 4] = [
        ("title", new.title.clone().into()),
        ("url", new.url.clone().into()),
        ("description", new.description.clone().into()),
        ("rating", new.rating.into()),
    ];
    let mut cols = Vec::with_capacity(values.len());
    let mut placeholders = Vec::with_capacity(values.len());
    for (col, value) in values {
        let n = q.push_param(value);
        cols.push(quoted(col));
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(BOOKMARKS_TABLE),
        cols.join(", "),
        placeholders.join(", "),
        column_list()
    );
    q
}

/// UPDATE of the supplied columns only. `None` when the patch changes nothing.
pub fn update(id: i64, patch: &BookmarkPatch) -> Option<QueryBuf> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    let changes: [(&str, Option<SqlParam>); 4] = [
        ("title", patch.title.clone().map(SqlParam::from)),
        ("url", patch.url.clone().map(SqlParam::from)),
        ("description", patch.description.clone().map(SqlParam::from)),
        ("rating", patch.rating.map(SqlParam::from)),
    ];
    for (col, value) in changes {
        let Some(value) = value else { continue };
        let n = q.push_param(value);
        sets.push(format!("{} = ${}", quoted(col), n));
    }
    if sets.is_empty() {
        return None;
    }
    let id_param = q.push_param(id);
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        quoted(BOOKMARKS_TABLE),
        sets.join(", "),
        quoted("id"),
        id_param
    );
    Some(q)
}

pub fn delete(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${}",
        quoted(BOOKMARKS_TABLE),
        quoted("id"),
        n
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_binds_every_value() {
        let q = insert(&NewBookmark {
            title: "Google".into(),
            url: "https://www.google.com".into(),
            description: "desc".into(),
            rating: 4.0,
        });
        assert_eq!(
            q.sql,
            r#"INSERT INTO "bookmarks" ("title", "url", "description", "rating") VALUES ($1, $2, $3, $4) RETURNING "id", "title", "url", "description", "rating""#
        );
        assert_eq!(
            q.params,
            vec![
                SqlParam::Text("Google".into()),
                SqlParam::Text("https://www.google.com".into()),
                SqlParam::Text("desc".into()),
                SqlParam::Double(4.0),
            ]
        );
    }

    #[test]
    fn update_sets_only_supplied_columns() {
        let patch = BookmarkPatch {
            title: Some("Updated".into()),
            rating: Some(2.5),
            ..BookmarkPatch::default()
        };
        let q = update(9, &patch).unwrap();
        assert_eq!(
            q.sql,
            r#"UPDATE "bookmarks" SET "title" = $1, "rating" = $2 WHERE "id" = $3"#
        );
        assert_eq!(
            q.params,
            vec![
                SqlParam::Text("Updated".into()),
                SqlParam::Double(2.5),
                SqlParam::BigInt(9),
            ]
        );
    }

    #[test]
    fn empty_patch_builds_no_statement() {
        assert!(update(1, &BookmarkPatch::default()).is_none());
    }

    #[test]
    fn id_statements_take_a_single_parameter() {
        let q = select_by_id(3);
        assert_eq!(
            q.sql,
            r#"SELECT "id", "title", "url", "description", "rating" FROM "bookmarks" WHERE "id" = $1"#
        );
        assert_eq!(q.params, vec![SqlParam::BigInt(3)]);

        let q = delete(3);
        assert_eq!(q.sql, r#"DELETE FROM "bookmarks" WHERE "id" = $1"#);
        assert_eq!(q.params, vec![SqlParam::BigInt(3)]);
    }

    #[test]
    fn select_all_has_no_parameters() {
        let q = select_all();
        assert!(q.params.is_empty());
        assert!(q.sql.ends_with(r#"FROM "bookmarks" ORDER BY "id""#));
    }
}
