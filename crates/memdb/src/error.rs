//! 内存查询引擎错误类型
//!
//! 读取与变更操作本身不会失败；这里只有边界错误：表名解析、参数解析、种子数据加载。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("未知的数据表: {0}")]
    UnknownTable(String),

    #[error("无效的排序方向: {0}")]
    InvalidDirection(String),

    #[error("无效的变更模式: {0}")]
    InvalidMutationMode(String),

    #[error("种子数据解析失败: {0}")]
    Fixture(#[from] serde_json::Error),

    #[error("种子数据文件读取失败: {path}: {source}")]
    FixtureIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, QueryError>;
