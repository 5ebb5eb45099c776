// ==========================================
// 项目管理工具 - 分析层 (阶段工时分析)
// ==========================================
// 职责: 跨 WBS 阶段工时的系数/占比分析, 用于新项目估算
// 说明: 与单任务分摊引擎相互独立, 共用聚合风格
// ==========================================

pub mod coefficient;
pub mod error;
pub mod handler;
pub mod models;
pub mod proportion;

// 重导出分析对象
pub use coefficient::PhaseCoefficientService;
pub use error::{AnalyticsError, AnalyticsResult};
pub use handler::{PhaseHoursRepository, WbsAnalyticsHandler, WbsTagRepository};
pub use models::{PhaseCoefficient, PhaseHoursSummary, PhaseProportion, WbsScopeFilter};
pub use proportion::PhaseProportionService;
