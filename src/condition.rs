//! 单个 WHERE 条件：列、运算符、值、分组括号、AND/OR 前缀与原生 SQL 覆盖。

use crate::coerce::coerce_int;
use crate::engine::Engine;
use crate::error::ConfigError;
use crate::string_builder::StringBuilder;
use crate::value::SqlValue;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// 分组括号数量上限。
pub const MAX_PARENTHESES: i32 = 10;

fn column_re() -> &'static Regex {
    static COLUMN_RE: OnceLock<Regex> = OnceLock::new();
    COLUMN_RE.get_or_init(|| {
        Regex::new(
            r#"^([A-Za-z_][A-Za-z0-9_]*|"[A-Za-z_][A-Za-z0-9_]*")(\.([A-Za-z_][A-Za-z0-9_]*|"[A-Za-z_][A-Za-z0-9_]*"))?$"#,
        )
        .expect("invalid column regex")
    })
}

/// 校验列名：`col` 或 `table.col`，每段可整体包在一对双引号里。
pub(crate) fn validate_column(column: &str) -> Result<(), ConfigError> {
    if column_re().is_match(column) {
        Ok(())
    } else {
        Err(ConfigError::InvalidColumn(column.to_string()))
    }
}

/// 条件运算符。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    LessThan,
    GreaterThan,
    NotEqual,
    Equal,
    Like,
    In,
    Is,
    IsNot,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::NotEqual => "<>",
            Self::Equal => "=",
            Self::Like => "LIKE",
            Self::In => "IN",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
        }
    }
}

impl FromStr for Operator {
    type Err = ConfigError;

    /// 大小写不敏感；`IS NOT` 中间允许多个空白；`!=` 视为 `<>`。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();
        match normalized.as_str() {
            "<" => Ok(Self::LessThan),
            ">" => Ok(Self::GreaterThan),
            "<>" | "!=" => Ok(Self::NotEqual),
            "=" => Ok(Self::Equal),
            "LIKE" => Ok(Self::Like),
            "IN" => Ok(Self::In),
            "IS" => Ok(Self::Is),
            "IS NOT" => Ok(Self::IsNot),
            _ => Err(ConfigError::InvalidOperator(s.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 与前一个条件的连接方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Prefix {
    #[default]
    And,
    Or,
}

impl Prefix {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl FromStr for Prefix {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            _ => Err(ConfigError::InvalidPrefix(s.to_string())),
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 条件值：单个标量，或 `IN` 使用的整数序列。
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionValue {
    Scalar(SqlValue),
    IntList(Vec<i64>),
}

impl ConditionValue {
    /// 逐个转换为整数，任何一个无法转换都返回错误。
    pub fn list<I, T>(values: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<SqlValue>,
    {
        values
            .into_iter()
            .map(|v| to_int(&v.into()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::IntList)
    }

    pub fn as_scalar(&self) -> Option<&SqlValue> {
        match self {
            Self::Scalar(v) => Some(v),
            Self::IntList(_) => None,
        }
    }

    pub fn as_int_list(&self) -> Option<&[i64]> {
        match self {
            Self::Scalar(_) => None,
            Self::IntList(v) => Some(v),
        }
    }

    /// 规整到运算符要求的形态：`IN` 必须是整数序列，其它运算符必须是标量。
    fn normalize(self, operator: Operator) -> Result<Self, ConfigError> {
        match (operator, self) {
            (Operator::In, Self::Scalar(v)) => Ok(Self::IntList(vec![to_int(&v)?])),
            (Operator::In, list @ Self::IntList(_)) => Ok(list),
            (_, scalar @ Self::Scalar(_)) => Ok(scalar),
            (op, Self::IntList(_)) => Err(ConfigError::ListValueForOperator(op)),
        }
    }

    fn push_binds(&self, binds: &mut Vec<SqlValue>) {
        match self {
            Self::Scalar(v) => binds.push(v.clone()),
            Self::IntList(v) => binds.extend(v.iter().copied().map(SqlValue::I64)),
        }
    }
}

fn to_int(v: &SqlValue) -> Result<i64, ConfigError> {
    coerce_int(v).ok_or_else(|| ConfigError::InvalidListValue(v.to_string()))
}

impl Default for ConditionValue {
    fn default() -> Self {
        Self::Scalar(SqlValue::Null)
    }
}

impl<T: Into<SqlValue>> From<T> for ConditionValue {
    fn from(v: T) -> Self {
        Self::Scalar(v.into())
    }
}

impl<T: Into<i64>> From<Vec<T>> for ConditionValue {
    fn from(v: Vec<T>) -> Self {
        Self::IntList(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<i64>, const N: usize> From<[T; N]> for ConditionValue {
    fn from(v: [T; N]) -> Self {
        Self::IntList(v.into_iter().map(Into::into).collect())
    }
}

/// 单个条件。
///
/// 构造后通过 `set_*` 修改，渲染时只会向外部参数列表追加值，不会修改自身。
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    column: String,
    operator: Option<Operator>,
    value: ConditionValue,
    value_override_sql: Option<String>,
    prepared: bool,
    prefix: Prefix,
    paren_before: u8,
    paren_after: u8,
    raw_sql: Option<String>,
}

impl Condition {
    /// 新建一个预编译条件（前缀 AND）。
    pub fn new(
        column: impl Into<String>,
        operator: Operator,
        value: impl Into<ConditionValue>,
    ) -> Result<Self, ConfigError> {
        let column = column.into();
        validate_column(&column)?;
        Ok(Self {
            column,
            operator: Some(operator),
            value: value.into().normalize(operator)?,
            value_override_sql: None,
            prepared: true,
            prefix: Prefix::And,
            paren_before: 0,
            paren_after: 0,
            raw_sql: None,
        })
    }

    /// 与 [`Condition::new`] 相同，但运算符从字符串解析。
    pub fn parse(
        column: impl Into<String>,
        operator: &str,
        value: impl Into<ConditionValue>,
    ) -> Result<Self, ConfigError> {
        Self::new(column, operator.parse()?, value)
    }

    /// 原生 SQL 条件：列与运算符为空，默认不预编译。
    pub fn from_raw_sql(sql: impl Into<String>) -> Self {
        Self {
            column: String::new(),
            operator: None,
            value: ConditionValue::default(),
            value_override_sql: None,
            prepared: false,
            prefix: Prefix::And,
            paren_before: 0,
            paren_after: 0,
            raw_sql: Some(sql.into()),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn value(&self) -> &ConditionValue {
        &self.value
    }

    pub fn value_override_sql(&self) -> Option<&str> {
        self.value_override_sql.as_deref()
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn prefix(&self) -> Prefix {
        self.prefix
    }

    pub fn paren_before(&self) -> u8 {
        self.paren_before
    }

    pub fn paren_after(&self) -> u8 {
        self.paren_after
    }

    pub fn raw_sql(&self) -> Option<&str> {
        self.raw_sql.as_deref()
    }

    pub fn is_raw(&self) -> bool {
        self.raw_sql.is_some()
    }

    pub fn set_column(&mut self, column: impl Into<String>) -> Result<&mut Self, ConfigError> {
        let column = column.into();
        validate_column(&column)?;
        self.column = column;
        Ok(self)
    }

    /// 修改运算符，同时按新运算符重新规整当前值。
    pub fn set_operator(&mut self, operator: Operator) -> Result<&mut Self, ConfigError> {
        self.value = self.value.clone().normalize(operator)?;
        self.operator = Some(operator);
        Ok(self)
    }

    pub fn set_value(&mut self, value: impl Into<ConditionValue>) -> Result<&mut Self, ConfigError> {
        let value = value.into();
        self.value = match self.operator {
            Some(op) => value.normalize(op)?,
            None => value,
        };
        Ok(self)
    }

    /// 预编译时用 `sql`（如 `(? + 1)`）代替单个 `?`。
    pub fn set_value_override_sql(&mut self, sql: impl Into<String>) -> &mut Self {
        self.value_override_sql = Some(sql.into());
        self
    }

    pub fn set_prepared(&mut self, prepared: bool) -> &mut Self {
        self.prepared = prepared;
        self
    }

    pub fn set_prefix(&mut self, prefix: Prefix) -> &mut Self {
        self.prefix = prefix;
        self
    }

    /// 条件前的 `(` 数量：超过 10 报错，负数按 0 处理。
    pub fn set_paren_before(&mut self, count: i32) -> Result<&mut Self, ConfigError> {
        self.paren_before = clamp_parentheses(count)?;
        Ok(self)
    }

    /// 条件后的 `)` 数量，规则同 [`Condition::set_paren_before`]。
    pub fn set_paren_after(&mut self, count: i32) -> Result<&mut Self, ConfigError> {
        self.paren_after = clamp_parentheses(count)?;
        Ok(self)
    }

    /// 设置原生 SQL，渲染时完全替代列/运算符/值。
    pub fn set_raw_sql(&mut self, sql: impl Into<String>) -> &mut Self {
        self.raw_sql = Some(sql.into());
        self
    }

    /// 渲染条件，返回以空格开头的 SQL 片段；预编译值按出现顺序追加到 `binds`。
    pub fn render(
        &self,
        binds: &mut Vec<SqlValue>,
        engine: Engine,
        include_prefix: bool,
        check_keywords: bool,
    ) -> String {
        let mut buf = StringBuilder::new();
        if include_prefix {
            buf.write_word(self.prefix.as_str());
        }

        match (&self.raw_sql, self.operator) {
            (None, Some(operator)) => {
                self.write_predicate(&mut buf, operator, binds, engine, check_keywords)
            }
            (raw, _) => {
                buf.write_word(raw.as_deref().unwrap_or_default().trim_start());
                if self.prepared {
                    self.value.push_binds(binds);
                }
            }
        }

        buf.into_string()
    }

    fn write_predicate(
        &self,
        buf: &mut StringBuilder,
        operator: Operator,
        binds: &mut Vec<SqlValue>,
        engine: Engine,
        check_keywords: bool,
    ) {
        buf.write_repeat(" (", self.paren_before as usize);
        buf.write_word(&engine.quote_ident(&self.column, check_keywords));
        buf.write_word(operator.as_str());

        match &self.value {
            ConditionValue::IntList(values) => {
                buf.write_str(" ( ");
                if values.is_empty() {
                    buf.write_str("NULL");
                } else if self.prepared {
                    buf.write_joined(values, ", ", |out, _| out.push('?'));
                    binds.extend(values.iter().copied().map(SqlValue::I64));
                } else {
                    buf.write_joined(values, ", ", |out, v| out.push_str(&v.to_string()));
                }
                buf.write_str(" )");
            }
            ConditionValue::Scalar(value) => {
                if self.prepared {
                    buf.write_word(self.value_override_sql.as_deref().unwrap_or("?"));
                    binds.push(value.clone());
                } else {
                    buf.write_char(' ');
                    value.write_literal(engine, buf.buf_mut());
                }
            }
        }

        buf.write_repeat(" )", self.paren_after as usize);
    }
}

fn clamp_parentheses(count: i32) -> Result<u8, ConfigError> {
    if count > MAX_PARENTHESES {
        return Err(ConfigError::TooManyParentheses(count));
    }
    Ok(count.max(0) as u8)
}
