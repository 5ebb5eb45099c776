// ==========================================
// 项目管理工具 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、值对象
// 红线: 不含数据访问逻辑, 不含引擎逻辑
// ==========================================

pub mod allocation;
pub mod calendar;
pub mod evm;
pub mod task;
pub mod types;

// 重导出核心类型
pub use allocation::{
    month_key, DailyAllocation, MonthlyAllocation, MonthlyTaskAllocation, TaskDailyAllocation,
};
pub use calendar::{CompanyCalendar, Holiday, ProjectAssignee, UserScheduleEntry};
pub use evm::{ActualCostEntry, EvmMetrics, ProjectEvmSettings, WbsBuffer};
pub use task::{DatePeriod, TaskRecord};
pub use types::{
    AllocationWarningReason, EvmMode, ForecastMethod, HealthStatus, HolidayType, ProgressMethod,
    TaskStatus, TimeSeriesInterval,
};
