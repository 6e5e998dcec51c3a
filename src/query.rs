//! Query：一次调用的请求（SQL、绑定参数、查询变量、上下文描述）。
//!
//! 每次调用构造新的 `Query` 交给 [`crate::Executor`]，执行器自身不保存调用状态。

use crate::clause::Clause;
use crate::engine::Engine;
use crate::template::Variables;
use crate::value::SqlValue;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    sql: String,
    params: Vec<SqlValue>,
    variables: Variables,
    context: Option<String>,
}

impl Query {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            ..Self::default()
        }
    }

    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn bind_all<T: Into<SqlValue>>(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.params.extend(values.into_iter().map(Into::into));
        self
    }

    /// 设置一个查询变量（对应 SQL 里的 `{$name}`）。
    pub fn var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.variables
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// 执行失败时附带在错误里的描述。
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// 追加 ` WHERE ...` 及其参数。
    pub fn where_clause(mut self, clause: &Clause, engine: Engine, check_keywords: bool) -> Self {
        let fragment = clause.render(&mut self.params, engine, check_keywords);
        self.sql.push_str(&fragment);
        self
    }

    /// 在当前 SQL 后追加文本（如 `ORDER BY ...`），不加分隔符。
    pub fn push_sql(mut self, sql: &str) -> Self {
        self.sql.push_str(sql);
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn context_message(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub(crate) fn into_parts(self) -> (String, Vec<SqlValue>, Variables, Option<String>) {
        (self.sql, self.params, self.variables, self.context)
    }
}

impl From<&str> for Query {
    fn from(sql: &str) -> Self {
        Self::new(sql)
    }
}

impl From<String> for Query {
    fn from(sql: String) -> Self {
        Self::new(sql)
    }
}
