//! 驱动边界：由外部连接实现，这里只消费。
//!
//! 驱动返回的错误对本库是不透明的，只会被包装成 [`crate::QueryError`]。

use crate::engine::Engine;
use crate::value::SqlValue;

/// 一次执行产生的结果游标。
pub trait Cursor {
    type Error: std::error::Error + Send + Sync + 'static;

    /// 结果列名（无结果集的语句可以为空）。
    fn columns(&self) -> &[String];

    /// 读取下一行；读完返回 `Ok(None)`。
    fn next_row(&mut self) -> Result<Option<Vec<SqlValue>>, Self::Error>;

    /// 非查询语句影响的行数。
    fn affected_rows(&self) -> u64;
}

/// 一个可用的数据库连接。
///
/// 连接的生命周期、连接池与事务都由实现方负责。
pub trait Connection {
    type Statement;
    type Cursor: Cursor;
    type Error: std::error::Error + Send + Sync + 'static;

    fn engine(&self) -> Engine;

    fn database_name(&self) -> &str;

    fn prepare(&self, sql: &str) -> Result<Self::Statement, Self::Error>;

    /// 直接执行（无参数）。
    fn execute(&self, sql: &str) -> Result<Self::Cursor, Self::Error>;

    fn execute_prepared(
        &self,
        statement: &mut Self::Statement,
        params: &[SqlValue],
    ) -> Result<Self::Cursor, Self::Error>;
}
