// ==========================================
// 项目管理工具 - 引擎层错误类型
// ==========================================
// 依据: Rust 错误处理最佳实践
// 工具: thiserror 派生宏
// ==========================================
// 职责: 定义工时分摊/挣值引擎的统一错误类型
// 原则: 构造期校验错误快速失败; 退化但合法的状态
//       (零工作日/零分母) 不在此处, 以哨兵值或警告返回
// ==========================================

use chrono::NaiveDate;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    // ===== 构造期校验错误 =====
    #[error("无效的取整单位: unit={unit}, 必须大于0")]
    InvalidUnit { unit: f64 },

    #[error("无效的参与率: assignee_id={assignee_id}, rate={rate}, 必须大于0")]
    InvalidRate { assignee_id: String, rate: f64 },

    #[error("无效的标准工作时长: hours={hours}, 必须大于0")]
    InvalidWorkingHours { hours: f64 },

    #[error("可用工时为负数: date={date}, hours={hours}")]
    NegativeAvailableHours { date: NaiveDate, hours: f64 },

    #[error("无效的期间: start={start}, end={end}, 开始日不得晚于结束日")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },

    #[error("休日日期重复: date={date}")]
    DuplicateHoliday { date: NaiveDate },

    #[error("字段值错误 (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    // ===== 领域状态错误 =====
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineError::InvalidUnit { unit: -0.25 };
        assert!(err.to_string().contains("-0.25"));

        let err = EngineError::NotFound {
            entity: "Task".to_string(),
            id: "T001".to_string(),
        };
        assert!(err.to_string().contains("Task"));
        assert!(err.to_string().contains("T001"));
    }
}
