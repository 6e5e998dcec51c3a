//! 查询变量模板：把 SQL 中的 `{$Name}` / `{$Name=Default}` 替换成文本。
//!
//! 安全警告：这里是纯文本替换，不是参数绑定。替换后的值直接成为 SQL 的一部分，
//! 唯一的防护是字符白名单加上禁止 `--`。数据值请走预编译参数（[`crate::Clause`]），
//! 这里只用于无法参数化的结构片段（比较运算符、默认 LIMIT 等）。

use crate::error::TemplateError;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::Range;
use std::sync::OnceLock;

/// 变量名到替换文本的映射，按次调用传入。
pub type Variables = HashMap<String, String>;

fn placeholder_re() -> &'static Regex {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_RE.get_or_init(|| {
        Regex::new(r"\{\$([A-Za-z0-9_.\-]+)(?:=([A-Za-z0-9 \t?_:.<=>\-]+))?\}")
            .expect("invalid placeholder regex")
    })
}

fn safe_value_re() -> &'static Regex {
    static SAFE_VALUE_RE: OnceLock<Regex> = OnceLock::new();
    SAFE_VALUE_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9 \t?_:.<=>\-]+$").expect("invalid safe value regex")
    })
}

/// SQL 中的一个占位符。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    pub name: &'a str,
    pub default: Option<&'a str>,
    /// 占位符在原 SQL 中的字节范围。
    pub range: Range<usize>,
}

/// 按出现顺序列出 `sql` 中的全部占位符。
pub fn placeholders(sql: &str) -> Vec<Placeholder<'_>> {
    placeholder_re()
        .captures_iter(sql)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(Placeholder {
                name: caps.get(1)?.as_str(),
                default: caps.get(2).map(|m| m.as_str()),
                range: whole.range(),
            })
        })
        .collect()
}

/// 校验调用方提供的变量值：只允许白名单字符，且不能包含 `--`。
pub fn check_value(name: &str, value: &str) -> Result<(), TemplateError> {
    if safe_value_re().is_match(value) && !value.contains("--") {
        return Ok(());
    }
    tracing::warn!(
        target: "halo_clause::template",
        variable = name,
        "rejected query variable value"
    );
    Err(TemplateError::UnsafeValue {
        name: name.to_string(),
    })
}

/// 替换 `sql` 中的全部占位符。
///
/// `variables` 为空且 `always_parse` 为 false 时直接返回原文。
/// 替换只扫描一遍原文，替换进去的文本不会被再次解析。
pub fn substitute<'a>(
    sql: &'a str,
    variables: &Variables,
    always_parse: bool,
) -> Result<Cow<'a, str>, TemplateError> {
    if variables.is_empty() && !always_parse {
        return Ok(Cow::Borrowed(sql));
    }

    let found = placeholders(sql);
    if found.is_empty() {
        return Ok(Cow::Borrowed(sql));
    }

    let mut out = String::with_capacity(sql.len());
    let mut last = 0usize;
    for ph in found {
        out.push_str(&sql[last..ph.range.start]);
        match (variables.get(ph.name), ph.default) {
            (Some(value), _) => {
                check_value(ph.name, value)?;
                out.push_str(value);
            }
            (None, Some(default)) => out.push_str(default.trim()),
            (None, None) => {
                return Err(TemplateError::MissingValue {
                    name: ph.name.to_string(),
                });
            }
        }
        last = ph.range.end;
    }
    out.push_str(&sql[last..]);

    Ok(Cow::Owned(out))
}
