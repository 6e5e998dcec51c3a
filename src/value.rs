//! SQL 值类型：绑定参数与内联字面量共用。

use crate::engine::Engine;
use std::borrow::Cow;
use std::fmt;
use time::format_description::FormatItem;
use time::macros::format_description;

const MYSQL_DATETIME: &[FormatItem<'static>] =
    format_description!("'[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]'");
const SQLITE_DATETIME: &[FormatItem<'static>] =
    format_description!("'[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]'");
const PG_DATETIME: &[FormatItem<'static>] = format_description!(
    "'[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6][offset_hour sign:mandatory]:[offset_minute]'"
);

/// SQL 标量值。
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(Cow<'static, str>),
    DateTime(time::OffsetDateTime),
}

impl SqlValue {
    /// 将 `Option<T>` 映射为 `SqlValue`：`None => Null`，`Some(v) => v.into()`。
    pub fn from_option<T: Into<SqlValue>>(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// 以内联字面量形式写入 SQL（不做转义，字符串原样写入）。
    pub(crate) fn write_literal(&self, engine: Engine, out: &mut String) {
        match self {
            Self::Null => out.push_str("NULL"),
            Self::Bool(v) => match engine {
                Engine::PostgreSQL => out.push_str(if *v { "TRUE" } else { "FALSE" }),
                Engine::MySQL | Engine::SQLite => out.push(if *v { '1' } else { '0' }),
            },
            Self::I64(v) => out.push_str(&v.to_string()),
            Self::U64(v) => out.push_str(&v.to_string()),
            Self::F64(v) => out.push_str(&v.to_string()),
            Self::String(s) => out.push_str(s),
            Self::DateTime(dt) => {
                let fmt = match engine {
                    Engine::PostgreSQL => PG_DATETIME,
                    Engine::MySQL => MYSQL_DATETIME,
                    Engine::SQLite => SQLITE_DATETIME,
                };
                let s = dt.format(fmt).expect("fixed datetime format");
                out.push_str(&s);
            }
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::String(s) => f.write_str(s),
            Self::DateTime(dt) => write!(f, "{dt}"),
        }
    }
}

impl From<()> for SqlValue {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i8> for SqlValue {
    fn from(v: i8) -> Self {
        Self::I64(v as i64)
    }
}

impl From<i16> for SqlValue {
    fn from(v: i16) -> Self {
        Self::I64(v as i64)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::I64(v as i64)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<u8> for SqlValue {
    fn from(v: u8) -> Self {
        Self::I64(v as i64)
    }
}

impl From<u16> for SqlValue {
    fn from(v: u16) -> Self {
        Self::I64(v as i64)
    }
}

impl From<u32> for SqlValue {
    fn from(v: u32) -> Self {
        Self::I64(v as i64)
    }
}

impl From<u64> for SqlValue {
    fn from(v: u64) -> Self {
        Self::U64(v)
    }
}

impl From<usize> for SqlValue {
    fn from(v: usize) -> Self {
        Self::U64(v as u64)
    }
}

impl From<f32> for SqlValue {
    fn from(v: f32) -> Self {
        Self::F64(v as f64)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::String(Cow::Owned(v))
    }
}

impl From<&'static str> for SqlValue {
    fn from(v: &'static str) -> Self {
        Self::String(Cow::Borrowed(v))
    }
}

impl From<time::OffsetDateTime> for SqlValue {
    fn from(v: time::OffsetDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        Self::from_option(v)
    }
}
