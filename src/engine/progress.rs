// ==========================================
// 项目管理工具 - 进度测定引擎
// ==========================================
// 职责: 由任务状态/自报进度计算有效进度率
// 红线: COMPLETED 状态一律覆盖为 100 (数据完整性优先)
// ==========================================

use crate::domain::task::TaskRecord;
use crate::domain::types::{ProgressMethod, TaskStatus};

// ==========================================
// TaskProgressCalculator - 进度测定引擎
// ==========================================
pub struct TaskProgressCalculator {
    // 无状态引擎, 不需要注入依赖
}

impl TaskProgressCalculator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算有效进度率 (0-100)
    ///
    /// 规则:
    /// - ZERO_HUNDRED: 完成→100, 其余→0
    /// - FIFTY_FIFTY:  完成→100, 进行中→50, 其余→0
    /// - SELF_REPORTED: 完成→100 (无视自报值);
    ///   否则取自报值并截断到 [0,100];
    ///   无自报值时按状态回退 (进行中→50, 其余→0)
    ///
    /// # 参数
    /// - `status`: 任务状态
    /// - `self_reported`: 自报进度 (可缺失)
    /// - `method`: 进度测定方式
    pub fn calculate_effective_progress(
        &self,
        status: TaskStatus,
        self_reported: Option<f64>,
        method: ProgressMethod,
    ) -> f64 {
        match method {
            ProgressMethod::ZeroHundred => match status {
                TaskStatus::Completed => 100.0,
                _ => 0.0,
            },
            ProgressMethod::FiftyFifty => match status {
                TaskStatus::Completed => 100.0,
                TaskStatus::InProgress => 50.0,
                _ => 0.0,
            },
            ProgressMethod::SelfReported => {
                if status == TaskStatus::Completed {
                    return 100.0;
                }
                match self_reported {
                    Some(value) => value.clamp(0.0, 100.0),
                    None => match status {
                        TaskStatus::InProgress => 50.0,
                        _ => 0.0,
                    },
                }
            }
        }
    }

    /// 按计划工时加权的平均进度
    ///
    /// 公式: Σ(progress_i × planned_hours_i) / Σ(planned_hours_i)
    /// 合计权重为 0 时返回 0
    pub fn calculate_weighted_average_progress(
        &self,
        tasks: &[TaskRecord],
        method: ProgressMethod,
    ) -> f64 {
        let total_weight: f64 = tasks.iter().map(|t| t.planned_hours).sum();
        if total_weight <= 0.0 {
            return 0.0;
        }

        let weighted_sum: f64 = tasks
            .iter()
            .map(|t| {
                self.calculate_effective_progress(t.status, t.progress, method) * t.planned_hours
            })
            .sum();

        weighted_sum / total_weight
    }
}
