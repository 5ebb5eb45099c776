// ==========================================
// 项目管理工具 - 完工工时预测引擎
// ==========================================
// 职责: 由进度与实绩估算任务完工工时 (EAC)
// 输入: 任务快照 + 估算方式
// 输出: TaskForecast (含有效进度率与预测工时)
// ==========================================

use crate::domain::task::TaskRecord;
use crate::domain::types::{ForecastMethod, ProgressMethod};
use crate::engine::progress::TaskProgressCalculator;
use serde::{Deserialize, Serialize};

// ==========================================
// TaskForecast - 预测结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskForecast {
    /// 任务 ID
    pub task_id: String,
    /// 估算方式
    pub method: ForecastMethod,
    /// 计划工时
    pub planned_hours: f64,
    /// 实绩工时
    pub actual_hours: f64,
    /// 有效进度率 (完成状态覆盖为 100)
    pub effective_progress_rate: f64,
    /// 预测完工工时
    pub forecast_hours: f64,
}

// ==========================================
// ForecastCalculationService - 预测引擎
// ==========================================
pub struct ForecastCalculationService {
    progress: TaskProgressCalculator,
}

impl ForecastCalculationService {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            progress: TaskProgressCalculator::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算任务预测工时
    ///
    /// 规则:
    /// - 进度 >= 100 → 预测 = 实绩
    /// - 进度 <= 0   → 预测 = 计划
    /// - 其余 (remaining = (100-进度)/100):
    ///   - CONSERVATIVE: 实绩 / 进度 × 100
    ///   - OPTIMISTIC:   实绩 + 计划 × remaining
    ///   - REALISTIC:    进度/100 加权偏向保守估算,
    ///                   1-进度/100 加权偏向 (实绩 + 计划 × remaining)
    ///
    /// # 参数
    /// - `task`: 任务快照
    /// - `method`: 估算方式
    pub fn calculate_task_forecast(&self, task: &TaskRecord, method: ForecastMethod) -> TaskForecast {
        // 有效进度率采用自报口径 (完成状态覆盖为 100)
        let progress = self.progress.calculate_effective_progress(
            task.status,
            task.progress,
            ProgressMethod::SelfReported,
        );

        let forecast_hours = if progress >= 100.0 {
            task.actual_hours
        } else if progress <= 0.0 {
            task.planned_hours
        } else {
            let remaining = (100.0 - progress) / 100.0;
            let conservative = task.actual_hours / progress * 100.0;
            let remaining_plan = task.actual_hours + task.planned_hours * remaining;
            match method {
                ForecastMethod::Conservative => conservative,
                ForecastMethod::Optimistic => remaining_plan,
                ForecastMethod::Realistic => {
                    let weight = progress / 100.0;
                    conservative * weight + remaining_plan * (1.0 - weight)
                }
            }
        };

        TaskForecast {
            task_id: task.task_id.clone(),
            method,
            planned_hours: task.planned_hours,
            actual_hours: task.actual_hours,
            effective_progress_rate: progress,
            forecast_hours,
        }
    }
}
