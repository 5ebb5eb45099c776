// ==========================================
// 项目管理工具 - 引擎层
// ==========================================
// 职责: 实现工时分摊/进度/预测/挣值的业务规则
// 红线: Engine 不做 I/O, 退化状态必须输出 reason
// ==========================================

pub mod allocation;
pub mod business_day;
pub mod evm;
pub mod forecast;
pub mod progress;
pub mod quantizer;
pub mod repositories;

// 重导出核心引擎
pub use allocation::{AllocationWarning, TaskAllocationResult, WorkingHoursAllocationService};
pub use business_day::{BusinessDayPeriod, WeightedBusinessDay};
pub use evm::EvmService;
pub use forecast::{ForecastCalculationService, TaskForecast};
pub use progress::TaskProgressCalculator;
pub use quantizer::AllocationQuantizer;
pub use repositories::{
    ActualCostRepository, AssigneeRepository, BufferRepository, EvmRepositories,
    ProjectSettingsRepository, TaskRepository,
};
