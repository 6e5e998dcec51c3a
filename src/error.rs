//! 错误类型：构造期配置错误、模板替换错误、执行期错误。

use crate::condition::Operator;
use crate::value::SqlValue;

/// 构造期错误：在产出任何 SQL 之前抛出。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("clause unknown engine `{0}`")]
    UnknownEngine(String),
    #[error("clause invalid operator `{0}`")]
    InvalidOperator(String),
    #[error("clause invalid prefix `{0}`, expected AND or OR")]
    InvalidPrefix(String),
    #[error("clause invalid column name `{0}`")]
    InvalidColumn(String),
    #[error("clause invalid identifier `{0}`")]
    InvalidIdentifier(String),
    #[error("clause too many parentheses: {0} (max 10)")]
    TooManyParentheses(i32),
    #[error("clause IN value `{0}` is not an integer")]
    InvalidListValue(String),
    #[error("clause list value is only allowed with IN, got {0}")]
    ListValueForOperator(Operator),
}

/// 查询变量替换错误，携带出错的变量名。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template value for `{name}` contains forbidden characters")]
    UnsafeValue { name: String },
    #[error("template placeholder `{name}` has no value and no default")]
    MissingValue { name: String },
}

/// 驱动执行失败：携带最终 SQL、实际发送的参数、上下文描述与原始错误。
#[derive(Debug, thiserror::Error)]
#[error("{context}: {source}")]
pub struct QueryError {
    pub context: String,
    pub sql: String,
    pub params: Vec<SqlValue>,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl QueryError {
    pub fn new(
        context: impl Into<String>,
        sql: impl Into<String>,
        params: Vec<SqlValue>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            context: context.into(),
            sql: sql.into(),
            params,
            source: source.into(),
        }
    }
}

/// Executor 统一返回的错误。
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Query(#[from] QueryError),
    /// 查询成功，但结果无法转换成请求的类型。
    #[error("cannot convert {value:?} to {expected}")]
    Conversion {
        expected: &'static str,
        value: SqlValue,
    },
}

impl Error {
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    pub fn is_template(&self) -> bool {
        matches!(self, Self::Template(_))
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Self::Query(_))
    }

    /// 执行失败时的最终 SQL（模板替换之后）。
    pub fn sql(&self) -> Option<&str> {
        match self {
            Self::Query(e) => Some(&e.sql),
            _ => None,
        }
    }
}
