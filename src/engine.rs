//! 数据库方言：标识符引号与保留字判断。

use crate::error::ConfigError;
use crate::keywords::{MYSQL_KEYWORDS, POSTGRESQL_KEYWORDS, SQLITE_KEYWORDS};
use std::fmt;
use std::str::FromStr;

/// 支持的数据库方言。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    PostgreSQL,
    MySQL,
    SQLite,
}

impl Engine {
    pub const ALL: [Engine; 3] = [Engine::PostgreSQL, Engine::MySQL, Engine::SQLite];

    /// 标识符引号字符。
    pub fn quote_char(self) -> char {
        match self {
            Self::MySQL => '`',
            Self::PostgreSQL | Self::SQLite => '"',
        }
    }

    /// 为单个标识符加引号（不切分 `.`）。
    pub fn quote(self, name: &str) -> String {
        let q = self.quote_char();
        format!("{q}{name}{q}")
    }

    /// 按 `.` 切分后逐段加引号。
    ///
    /// `check_keywords` 为 true 时只给保留字加引号，其余部分原样输出；
    /// 已经带引号的部分总是按当前方言重新加引号。
    pub fn quote_ident(self, ident: &str, check_keywords: bool) -> String {
        let parts: Vec<String> = ident
            .split('.')
            .filter(|p| !p.is_empty())
            .map(|p| {
                let bare = unquote(p);
                if !check_keywords || bare.len() != p.len() || self.is_keyword(bare) {
                    self.quote(bare)
                } else {
                    bare.to_string()
                }
            })
            .collect();
        parts.join(".")
    }

    /// 大小写不敏感的保留字判断。
    pub fn is_keyword(self, token: &str) -> bool {
        self.keywords()
            .iter()
            .any(|k| k.eq_ignore_ascii_case(token))
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::PostgreSQL => POSTGRESQL_KEYWORDS,
            Self::MySQL => MYSQL_KEYWORDS,
            Self::SQLite => SQLITE_KEYWORDS,
        }
    }

    /// 是否为可识别的方言名。
    pub fn is_known(name: &str) -> bool {
        name.parse::<Engine>().is_ok()
    }
}

/// 去除首尾成对的反引号/双引号。
pub(crate) fn unquote(s: &str) -> &str {
    let b = s.as_bytes();
    if b.len() >= 2 {
        let (first, last) = (b[0], b[b.len() - 1]);
        if first == last && (first == b'"' || first == b'`') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

impl FromStr for Engine {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pgsql" | "postgres" | "postgresql" => Ok(Self::PostgreSQL),
            "mysql" | "mariadb" => Ok(Self::MySQL),
            "sqlite" | "sqlite3" => Ok(Self::SQLite),
            _ => Err(ConfigError::UnknownEngine(s.to_string())),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::PostgreSQL => "PostgreSQL",
            Self::MySQL => "MySQL",
            Self::SQLite => "SQLite",
        };
        f.write_str(s)
    }
}
