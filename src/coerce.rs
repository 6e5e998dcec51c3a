//! 查询结果的宽松类型转换：布尔、整数、浮点。

use crate::value::SqlValue;
use regex::Regex;
use std::sync::OnceLock;

fn truthy_re() -> &'static Regex {
    static TRUTHY_RE: OnceLock<Regex> = OnceLock::new();
    TRUTHY_RE.get_or_init(|| {
        Regex::new(r"(?i)^(t(rue)?|on|yes|enabled|ok|[1-9]\d*)$").expect("invalid truthy regex")
    })
}

/// 布尔转换：数值大于 0 为真；字符串整体匹配 `t/true/on/yes/enabled/ok/正整数`（大小写不敏感，不去除空白）为真。
pub fn coerce_bool(v: &SqlValue) -> bool {
    match v {
        SqlValue::Null => false,
        SqlValue::Bool(b) => *b,
        SqlValue::I64(n) => *n > 0,
        SqlValue::U64(n) => *n > 0,
        SqlValue::F64(f) => *f > 0.0,
        SqlValue::String(s) => truthy_re().is_match(s),
        SqlValue::DateTime(_) => false,
    }
}

/// 整数转换：浮点截断，布尔 `true => 1`，数字字符串按数值解析。
pub fn coerce_int(v: &SqlValue) -> Option<i64> {
    match v {
        SqlValue::I64(n) => Some(*n),
        SqlValue::U64(n) => i64::try_from(*n).ok(),
        SqlValue::F64(f) => truncate(*f),
        SqlValue::Bool(b) => Some(i64::from(*b)),
        SqlValue::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        SqlValue::Null | SqlValue::DateTime(_) => None,
    }
}

/// 浮点转换，规则同 [`coerce_int`]。
pub fn coerce_float(v: &SqlValue) -> Option<f64> {
    match v {
        SqlValue::I64(n) => Some(*n as f64),
        SqlValue::U64(n) => Some(*n as f64),
        SqlValue::F64(f) => Some(*f),
        SqlValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        SqlValue::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        SqlValue::Null | SqlValue::DateTime(_) => None,
    }
}

fn truncate(f: f64) -> Option<i64> {
    if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}
