//! halo-clause：按方言渲染 WHERE 条件、收集预编译参数，并提供 `{$Name=Default}` 查询变量模板。

pub mod clause;
#[cfg(test)]
mod clause_tests;
pub mod coerce;
pub mod condition;
#[cfg(test)]
mod condition_tests;
pub mod driver;
pub mod engine;
pub mod error;
pub mod executor;
mod keywords;
pub mod query;
pub mod row;
mod string_builder;
pub mod template;
pub mod value;

pub use crate::clause::Clause;
pub use crate::coerce::{coerce_bool, coerce_float, coerce_int};
pub use crate::condition::{Condition, ConditionValue, MAX_PARENTHESES, Operator, Prefix};
pub use crate::driver::{Connection, Cursor};
pub use crate::engine::Engine;
pub use crate::error::{ConfigError, Error, QueryError, TemplateError};
pub use crate::executor::{Executor, ExecutorOptions, Rows};
pub use crate::query::Query;
pub use crate::row::Row;
pub use crate::template::{Placeholder, Variables, placeholders, substitute};
pub use crate::value::SqlValue;
