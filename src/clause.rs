//! Clause：有序的条件集合，渲染成完整的 `WHERE ...`。

use crate::condition::{Condition, ConditionValue, Operator, Prefix};
use crate::engine::Engine;
use crate::error::ConfigError;
use crate::string_builder::StringBuilder;
use crate::value::SqlValue;
use std::ops::{Index, IndexMut};

/// 条件按加入顺序渲染；只能整体清空，不能单独删除。
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Clause {
    conditions: Vec<Condition>,
}

impl Clause {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个条件（默认预编译），返回它以便继续设置括号等属性。
    pub fn add_condition(
        &mut self,
        column: impl Into<String>,
        operator: Operator,
        value: impl Into<ConditionValue>,
        prefix: Prefix,
    ) -> Result<&mut Condition, ConfigError> {
        let mut condition = Condition::new(column, operator, value)?;
        condition.set_prefix(prefix);
        Ok(self.push(condition))
    }

    /// 追加一个原生 SQL 条件（默认不预编译）。
    pub fn add_raw_condition(&mut self, sql: impl Into<String>, prefix: Prefix) -> &mut Condition {
        let mut condition = Condition::from_raw_sql(sql);
        condition.set_prefix(prefix);
        self.push(condition)
    }

    pub fn push(&mut self, condition: Condition) -> &mut Condition {
        self.conditions.push(condition);
        let last = self.conditions.len() - 1;
        &mut self.conditions[last]
    }

    pub fn clear(&mut self) {
        self.conditions.clear();
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Condition> {
        self.conditions.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Condition> {
        self.conditions.get_mut(index)
    }

    /// 替换 `index` 处的条件并返回旧值；越界时原样退回 `condition`。
    pub fn replace(&mut self, index: usize, condition: Condition) -> Result<Condition, Condition> {
        match self.conditions.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, condition)),
            None => Err(condition),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Condition> {
        self.conditions.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Condition> {
        self.conditions.iter_mut()
    }

    pub fn as_slice(&self) -> &[Condition] {
        &self.conditions
    }

    /// 渲染 ` WHERE ...`；没有条件时返回空串。
    ///
    /// 第一个条件的前缀从不输出，之后每个条件输出自身的 AND/OR。
    pub fn render(
        &self,
        binds: &mut Vec<SqlValue>,
        engine: Engine,
        check_keywords: bool,
    ) -> String {
        if self.conditions.is_empty() {
            return String::new();
        }

        let mut buf = StringBuilder::new();
        buf.write_str(" WHERE");
        for (i, condition) in self.conditions.iter().enumerate() {
            buf.write_str(&condition.render(binds, engine, i > 0, check_keywords));
        }
        buf.into_string()
    }

    /// 渲染并返回独立的参数列表。
    pub fn build(&self, engine: Engine, check_keywords: bool) -> (String, Vec<SqlValue>) {
        let mut binds = Vec::new();
        let sql = self.render(&mut binds, engine, check_keywords);
        (sql, binds)
    }
}

impl Index<usize> for Clause {
    type Output = Condition;

    fn index(&self, index: usize) -> &Condition {
        &self.conditions[index]
    }
}

impl IndexMut<usize> for Clause {
    fn index_mut(&mut self, index: usize) -> &mut Condition {
        &mut self.conditions[index]
    }
}

impl FromIterator<Condition> for Clause {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        Self {
            conditions: iter.into_iter().collect(),
        }
    }
}

impl Extend<Condition> for Clause {
    fn extend<I: IntoIterator<Item = Condition>>(&mut self, iter: I) {
        self.conditions.extend(iter);
    }
}

impl IntoIterator for Clause {
    type Item = Condition;
    type IntoIter = std::vec::IntoIter<Condition>;

    fn into_iter(self) -> Self::IntoIter {
        self.conditions.into_iter()
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Condition;
    type IntoIter = std::slice::Iter<'a, Condition>;

    fn into_iter(self) -> Self::IntoIter {
        self.conditions.iter()
    }
}

impl<'a> IntoIterator for &'a mut Clause {
    type Item = &'a mut Condition;
    type IntoIter = std::slice::IterMut<'a, Condition>;

    fn into_iter(self) -> Self::IntoIter {
        self.conditions.iter_mut()
    }
}
