// ==========================================
// 项目管理工具 - 分析层错误类型
// ==========================================
// 职责: 定义阶段工时分析的错误类型,
//       转换引擎错误为用户友好的错误消息
// ==========================================

use crate::error::EngineError;
use thiserror::Error;

/// 分析层错误类型
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("仓储访问失败: {0}")]
    RepositoryError(String),

    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for AnalyticsError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NotFound { entity, id } => {
                AnalyticsError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            EngineError::FieldValueError { field, message } => {
                AnalyticsError::InvalidInput(format!("字段{}错误: {}", field, message))
            }
            EngineError::InternalError(msg) => AnalyticsError::InternalError(msg),
            EngineError::Other(err) => AnalyticsError::Other(err),
            other => AnalyticsError::InvalidInput(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
