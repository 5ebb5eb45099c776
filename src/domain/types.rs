// ==========================================
// 项目管理工具 - 领域类型定义
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 任务状态 (Task Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    NotStarted, // 未着手
    InProgress, // 进行中
    Completed,  // 已完成
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::NotStarted => write!(f, "NOT_STARTED"),
            TaskStatus::InProgress => write!(f, "IN_PROGRESS"),
            TaskStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

impl TaskStatus {
    /// 从字符串解析任务状态
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "IN_PROGRESS" => TaskStatus::InProgress,
            "COMPLETED" => TaskStatus::Completed,
            _ => TaskStatus::NotStarted, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "NOT_STARTED",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
        }
    }
}

// ==========================================
// 进度测定方式 (Progress Method)
// ==========================================
// ZERO_HUNDRED: 完成才计 100, 否则 0
// FIFTY_FIFTY:  进行中一律计 50
// SELF_REPORTED: 采用自报进度 (完成状态强制覆盖为 100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressMethod {
    ZeroHundred,
    FiftyFifty,
    SelfReported,
}

impl fmt::Display for ProgressMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressMethod::ZeroHundred => write!(f, "ZERO_HUNDRED"),
            ProgressMethod::FiftyFifty => write!(f, "FIFTY_FIFTY"),
            ProgressMethod::SelfReported => write!(f, "SELF_REPORTED"),
        }
    }
}

impl ProgressMethod {
    /// 从字符串解析进度测定方式
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "ZERO_HUNDRED" => ProgressMethod::ZeroHundred,
            "FIFTY_FIFTY" => ProgressMethod::FiftyFifty,
            _ => ProgressMethod::SelfReported, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ProgressMethod::ZeroHundred => "ZERO_HUNDRED",
            ProgressMethod::FiftyFifty => "FIFTY_FIFTY",
            ProgressMethod::SelfReported => "SELF_REPORTED",
        }
    }
}

// ==========================================
// 预测估算方式 (Forecast Method)
// ==========================================
// CONSERVATIVE: 按当前消耗速度外推
// OPTIMISTIC:   实绩 + 剩余计划
// REALISTIC:    两者按进度加权混合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForecastMethod {
    Conservative,
    Optimistic,
    Realistic,
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastMethod::Conservative => write!(f, "CONSERVATIVE"),
            ForecastMethod::Optimistic => write!(f, "OPTIMISTIC"),
            ForecastMethod::Realistic => write!(f, "REALISTIC"),
        }
    }
}

impl ForecastMethod {
    /// 从字符串解析预测估算方式
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "CONSERVATIVE" => ForecastMethod::Conservative,
            "OPTIMISTIC" => ForecastMethod::Optimistic,
            _ => ForecastMethod::Realistic, // 默认值
        }
    }
}

// ==========================================
// EVM 计算口径 (EVM Calculation Mode)
// ==========================================
// HOURS: 工时口径 / COST: 成本口径 (工时 × 单价)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvmMode {
    Hours,
    Cost,
}

impl fmt::Display for EvmMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvmMode::Hours => write!(f, "HOURS"),
            EvmMode::Cost => write!(f, "COST"),
        }
    }
}

// ==========================================
// 项目健康状态 (Health Status)
// ==========================================
// 判定: CPI/SPI 双指标 ≥1 健康, ≥0.9 预警, 其余危险
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Healthy,  // 健康
    Warning,  // 预警
    Critical, // 危险
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "HEALTHY"),
            HealthStatus::Warning => write!(f, "WARNING"),
            HealthStatus::Critical => write!(f, "CRITICAL"),
        }
    }
}

// ==========================================
// 休日类型 (Holiday Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HolidayType {
    National, // 法定节假日
    Company,  // 公司休日
    Special,  // 特别休日
}

impl fmt::Display for HolidayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolidayType::National => write!(f, "NATIONAL"),
            HolidayType::Company => write!(f, "COMPANY"),
            HolidayType::Special => write!(f, "SPECIAL"),
        }
    }
}

// ==========================================
// 时间序列步长 (Time Series Interval)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeSeriesInterval {
    Daily,   // 按日
    Weekly,  // 按周
    Monthly, // 按月
}

impl fmt::Display for TimeSeriesInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeSeriesInterval::Daily => write!(f, "DAILY"),
            TimeSeriesInterval::Weekly => write!(f, "WEEKLY"),
            TimeSeriesInterval::Monthly => write!(f, "MONTHLY"),
        }
    }
}

// ==========================================
// 分摊警告原因 (Allocation Warning Reason)
// ==========================================
// 退化但合法的状态以结构化警告返回, 不抛错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllocationWarningReason {
    NoWorkingDays, // 期间内无工作日
    MissingPeriod, // 期间开始/结束日缺失, 无法分摊
}

impl fmt::Display for AllocationWarningReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationWarningReason::NoWorkingDays => write!(f, "NO_WORKING_DAYS"),
            AllocationWarningReason::MissingPeriod => write!(f, "MISSING_PERIOD"),
        }
    }
}
