// ==========================================
// 项目管理工具 - 工时分摊与挣值计算引擎
// ==========================================
// 系统定位: 计算核心库 (持久化/UI/通知由外部协作方负责)
// 红线: 引擎不做 I/O; 保和取整; 退化状态输出 reason
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 分析层 - 跨 WBS 阶段工时分析
pub mod analytics;

// 配置层 - 引擎参数
pub mod config;

// 错误类型
pub mod error;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AllocationWarningReason, EvmMode, ForecastMethod, HealthStatus, HolidayType, ProgressMethod,
    TaskStatus, TimeSeriesInterval,
};

// 领域实体
pub use domain::{
    ActualCostEntry, CompanyCalendar, DailyAllocation, DatePeriod, EvmMetrics, Holiday,
    MonthlyAllocation, MonthlyTaskAllocation, ProjectAssignee, ProjectEvmSettings, TaskRecord,
    UserScheduleEntry, WbsBuffer,
};

// 引擎
pub use engine::{
    AllocationQuantizer, BusinessDayPeriod, EvmService, ForecastCalculationService,
    TaskProgressCalculator, WorkingHoursAllocationService,
};

// 引擎仓储抽象
pub use engine::{
    ActualCostRepository, AssigneeRepository, BufferRepository, EvmRepositories,
    ProjectSettingsRepository, TaskRepository,
};

// 分析对象
pub use analytics::{
    PhaseCoefficient, PhaseCoefficientService, PhaseHoursRepository, PhaseHoursSummary,
    PhaseProportion, PhaseProportionService, WbsAnalyticsHandler, WbsScopeFilter,
    WbsTagRepository,
};

// 配置与错误
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "项目管理工具 - 工时分摊与挣值计算引擎";

// ==========================================
// 预编译检查
// ==========================================
