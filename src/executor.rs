//! Executor：模板替换 → 选择预编译/直接执行 → 包装驱动错误。
//!
//! 每次调用都从一个新的 [`Query`] 开始，执行器只持有连接引用和选项，可被多处共享。

use crate::clause::Clause;
use crate::coerce::{coerce_bool, coerce_float, coerce_int};
use crate::condition::validate_column;
use crate::driver::{Connection, Cursor};
use crate::engine::{Engine, unquote};
use crate::error::{ConfigError, Error, QueryError};
use crate::query::Query;
use crate::row::Row;
use crate::template::substitute;
use crate::value::SqlValue;
use std::sync::Arc;

const SQL_TARGET: &str = "halo_clause::sql";

/// 执行器选项。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutorOptions {
    /// 没有查询变量时也解析 `{$...}` 占位符（用于套用默认值）。
    pub always_parse_variables: bool,
    /// 只给与保留字冲突的标识符加引号。
    pub check_keywords: bool,
}

impl ExecutorOptions {
    pub fn always_parse_variables(mut self, on: bool) -> Self {
        self.always_parse_variables = on;
        self
    }

    pub fn check_keywords(mut self, on: bool) -> Self {
        self.check_keywords = on;
        self
    }
}

/// 绑定在一个连接上的执行器。
#[derive(Debug)]
pub struct Executor<'c, C> {
    conn: &'c C,
    options: ExecutorOptions,
}

impl<C> Clone for Executor<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Executor<'_, C> {}

/// 已发送给驱动的最终语句，用于包装后续的读取错误。
#[derive(Debug, Clone)]
struct Sent {
    sql: String,
    params: Vec<SqlValue>,
    context: String,
}

impl Sent {
    fn wrap(&self, source: impl std::error::Error + Send + Sync + 'static) -> Error {
        tracing::warn!(
            target: SQL_TARGET,
            error = %source,
            sql = %self.sql,
            "statement failed"
        );
        QueryError::new(
            self.context.clone(),
            self.sql.clone(),
            self.params.clone(),
            source,
        )
        .into()
    }
}

impl<'c, C: Connection> Executor<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self::with_options(conn, ExecutorOptions::default())
    }

    pub fn with_options(conn: &'c C, options: ExecutorOptions) -> Self {
        Self { conn, options }
    }

    pub fn connection(&self) -> &'c C {
        self.conn
    }

    pub fn options(&self) -> ExecutorOptions {
        self.options
    }

    pub fn engine(&self) -> Engine {
        self.conn.engine()
    }

    /// 按当前连接的方言与选项，把 `clause` 追加到 `query` 上。
    pub fn with_clause(&self, query: impl Into<Query>, clause: &Clause) -> Query {
        query
            .into()
            .where_clause(clause, self.engine(), self.options.check_keywords)
    }

    fn send(&self, query: Query, default_context: &str) -> Result<(C::Cursor, Sent), Error> {
        let (sql, params, variables, context) = query.into_parts();
        let sql = substitute(&sql, &variables, self.options.always_parse_variables)?.into_owned();
        let sent = Sent {
            sql,
            params,
            context: context.unwrap_or_else(|| default_context.to_string()),
        };

        let prepared = !sent.params.is_empty();
        tracing::debug!(
            target: SQL_TARGET,
            engine = %self.engine(),
            prepared,
            params = sent.params.len(),
            sql = %sent.sql,
            "executing statement"
        );

        let cursor = if prepared {
            let mut statement = self.conn.prepare(&sent.sql).map_err(|e| sent.wrap(e))?;
            self.conn
                .execute_prepared(&mut statement, &sent.params)
                .map_err(|e| sent.wrap(e))?
        } else {
            self.conn.execute(&sent.sql).map_err(|e| sent.wrap(e))?
        };

        Ok((cursor, sent))
    }

    /// 执行并原样返回驱动游标。
    pub fn run(&self, query: impl Into<Query>) -> Result<C::Cursor, Error> {
        self.send(query.into(), "query failed").map(|(cursor, _)| cursor)
    }

    /// 执行非查询语句，返回影响行数。
    pub fn execute(&self, query: impl Into<Query>) -> Result<u64, Error> {
        let (cursor, _) = self.send(query.into(), "execute failed")?;
        Ok(cursor.affected_rows())
    }

    /// 逐行读取结果。
    pub fn iterate(&self, query: impl Into<Query>) -> Result<Rows<C::Cursor>, Error> {
        let (cursor, sent) = self.send(query.into(), "iterate failed")?;
        Ok(Rows::new(cursor, sent))
    }

    /// 逐行读取第一列。
    pub fn iterate_column<Q: Into<Query>>(
        &self,
        query: Q,
    ) -> Result<impl Iterator<Item = Result<SqlValue, Error>> + use<'c, C, Q>, Error> {
        let rows = self.iterate(query)?;
        Ok(rows.map(|row| row.map(|r| r.into_first().unwrap_or(SqlValue::Null))))
    }

    pub fn fetch_all(&self, query: impl Into<Query>) -> Result<Vec<Row>, Error> {
        let (cursor, sent) = self.send(query.into(), "fetch_all failed")?;
        Rows::new(cursor, sent).collect()
    }

    /// 第一行；没有结果返回 `None`，有结果但没有列返回空的 [`Row`]。
    pub fn fetch_record(&self, query: impl Into<Query>) -> Result<Option<Row>, Error> {
        let (cursor, sent) = self.send(query.into(), "fetch_record failed")?;
        Rows::new(cursor, sent).next().transpose()
    }

    /// 第一行第一列；没有结果（或没有列）返回 `None`。
    pub fn fetch_scalar(&self, query: impl Into<Query>) -> Result<Option<SqlValue>, Error> {
        let (cursor, sent) = self.send(query.into(), "fetch_scalar failed")?;
        let row = Rows::new(cursor, sent).next().transpose()?;
        Ok(row.and_then(Row::into_first))
    }

    /// 同 [`Executor::fetch_scalar`]，没有结果时返回 `default`。
    pub fn fetch_scalar_or(
        &self,
        query: impl Into<Query>,
        default: impl Into<SqlValue>,
    ) -> Result<SqlValue, Error> {
        Ok(self.fetch_scalar(query)?.unwrap_or_else(|| default.into()))
    }

    /// 布尔结果；没有结果或为 NULL 时返回 `default`。
    pub fn fetch_bool(&self, query: impl Into<Query>, default: bool) -> Result<bool, Error> {
        match self.fetch_scalar(query)? {
            None | Some(SqlValue::Null) => Ok(default),
            Some(v) => Ok(coerce_bool(&v)),
        }
    }

    /// 整数结果；没有结果或为 NULL 时返回 `default`，无法转换时报错。
    pub fn fetch_int(&self, query: impl Into<Query>, default: i64) -> Result<i64, Error> {
        match self.fetch_scalar(query)? {
            None | Some(SqlValue::Null) => Ok(default),
            Some(v) => coerce_int(&v).ok_or(Error::Conversion {
                expected: "integer",
                value: v,
            }),
        }
    }

    /// 浮点结果，规则同 [`Executor::fetch_int`]。
    pub fn fetch_float(&self, query: impl Into<Query>, default: f64) -> Result<f64, Error> {
        match self.fetch_scalar(query)? {
            None | Some(SqlValue::Null) => Ok(default),
            Some(v) => coerce_float(&v).ok_or(Error::Conversion {
                expected: "float",
                value: v,
            }),
        }
    }

    /// 所有行的第一列。
    pub fn fetch_column(&self, query: impl Into<Query>) -> Result<Vec<SqlValue>, Error> {
        self.iterate_column(query)?.collect()
    }

    /// 每行前两列组成 `(key, value)`，按结果顺序返回；缺失的列为 NULL。
    pub fn fetch_pairs(&self, query: impl Into<Query>) -> Result<Vec<(SqlValue, SqlValue)>, Error> {
        let (cursor, sent) = self.send(query.into(), "fetch_pairs failed")?;
        Rows::new(cursor, sent)
            .map(|row| {
                let mut values = row?.into_values().into_iter();
                let key = values.next().unwrap_or(SqlValue::Null);
                let value = values.next().unwrap_or(SqlValue::Null);
                Ok((key, value))
            })
            .collect()
    }

    /// `SELECT COUNT(*) FROM table [WHERE ...]`。
    pub fn count(&self, table: &str, clause: Option<&Clause>) -> Result<i64, Error> {
        let table = self.quote_table(table)?;
        let mut query = Query::new(format!("SELECT COUNT(*) FROM {table}")).context("count failed");
        if let Some(clause) = clause {
            query = query.where_clause(clause, self.engine(), self.options.check_keywords);
        }
        self.fetch_int(query, 0)
    }

    /// 表是否存在；`table` 可以是 `schema.table`。
    pub fn table_exists(&self, table: &str) -> Result<bool, Error> {
        let (schema, name) = split_table(table)?;
        let query = match (self.engine(), schema) {
            (Engine::PostgreSQL, Some(schema)) => Query::new(
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
            )
            .bind(schema.to_string()),
            (Engine::PostgreSQL, None) => Query::new(
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = current_schema() AND table_name = ?",
            ),
            (Engine::MySQL, schema) => Query::new(
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
            )
            .bind(
                schema
                    .map(str::to_string)
                    .unwrap_or_else(|| self.conn.database_name().to_string()),
            ),
            (Engine::SQLite, Some(schema)) => Query::new(format!(
                "SELECT COUNT(*) FROM {}.sqlite_master WHERE type = 'table' AND name = ?",
                Engine::SQLite.quote(schema)
            )),
            (Engine::SQLite, None) => {
                Query::new("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
            }
        };
        let query = query.bind(name.to_string()).context("table_exists failed");
        self.fetch_bool(query, false)
    }

    /// 数据库（SQLite 为已附加的 schema）是否存在。
    pub fn database_exists(&self, name: &str) -> Result<bool, Error> {
        let sql = match self.engine() {
            Engine::PostgreSQL => "SELECT COUNT(*) FROM pg_database WHERE datname = ?",
            Engine::MySQL => {
                "SELECT COUNT(*) FROM information_schema.schemata WHERE schema_name = ?"
            }
            Engine::SQLite => "SELECT COUNT(*) FROM pragma_database_list WHERE name = ?",
        };
        let query = Query::new(sql)
            .bind(name.to_string())
            .context("database_exists failed");
        self.fetch_bool(query, false)
    }

    fn quote_table(&self, table: &str) -> Result<String, ConfigError> {
        validate_column(table).map_err(|_| ConfigError::InvalidIdentifier(table.to_string()))?;
        Ok(self
            .engine()
            .quote_ident(table, self.options.check_keywords))
    }
}

fn split_table(table: &str) -> Result<(Option<&str>, &str), ConfigError> {
    validate_column(table).map_err(|_| ConfigError::InvalidIdentifier(table.to_string()))?;
    Ok(match table.split_once('.') {
        Some((schema, name)) => (Some(unquote(schema)), unquote(name)),
        None => (None, unquote(table)),
    })
}

/// 结果行迭代器；读取出错后停止。
pub struct Rows<Cu> {
    cursor: Cu,
    columns: Arc<[String]>,
    sent: Sent,
    done: bool,
}

impl<Cu: Cursor> Rows<Cu> {
    fn new(cursor: Cu, sent: Sent) -> Self {
        let columns: Arc<[String]> = cursor.columns().into();
        Self {
            cursor,
            columns,
            sent,
            done: false,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn affected_rows(&self) -> u64 {
        self.cursor.affected_rows()
    }

    /// 发送给驱动的最终 SQL。
    pub fn sql(&self) -> &str {
        &self.sent.sql
    }
}

impl<Cu: Cursor> Iterator for Rows<Cu> {
    type Item = Result<Row, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.cursor.next_row() {
            Ok(Some(values)) => Some(Ok(Row::new(self.columns.clone(), values))),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(self.sent.wrap(e)))
            }
        }
    }
}

impl<Cu> std::fmt::Debug for Rows<Cu> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rows")
            .field("columns", &self.columns)
            .field("sql", &self.sent.sql)
            .field("done", &self.done)
            .finish()
    }
}
