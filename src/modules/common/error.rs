use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("请至少选择一种要清理的缓存类型")]
    NoSelection,

    #[error("已有清理任务正在进行")]
    Busy,

    /// 清理步骤失败，消息原样保留
    #[error("{0}")]
    Execution(String),

    #[error("存储错误: {0}")]
    Storage(String),

    #[error("文件系统错误: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    Serde(String),

    #[error("参数无效: {0}")]
    InvalidInput(String),

    #[error("其他错误: {0}")]
    Other(String),
}

impl From<rusqlite::Error> for SweepError {
    fn from(error: rusqlite::Error) -> Self {
        SweepError::Storage(error.to_string())
    }
}

impl From<serde_json::Error> for SweepError {
    fn from(error: serde_json::Error) -> Self {
        SweepError::Serde(error.to_string())
    }
}

impl serde::Serialize for SweepError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
