// ==========================================
// 项目管理工具 - 阶段系数引擎
// ==========================================
// 职责: 以指定基准阶段为 1.0, 计算各阶段工时系数
// 输入: 阶段工时汇总列表 + 基准阶段模板 ID
// 输出: PhaseCoefficient 列表 (保持输入顺序)
// ==========================================

use crate::analytics::error::{AnalyticsError, AnalyticsResult};
use crate::analytics::models::{PhaseCoefficient, PhaseHoursSummary};
use tracing::instrument;

// ==========================================
// PhaseCoefficientService - 阶段系数引擎
// ==========================================
pub struct PhaseCoefficientService {
    // 无状态引擎, 不需要注入依赖
}

impl PhaseCoefficientService {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算阶段系数
    ///
    /// 规则:
    /// - coefficient = 阶段工时 / 基准阶段工时
    /// - 基准阶段自身恒为 1.0, 标记 is_base
    /// - 基准阶段工时为 0 时其余阶段系数按 0 计 (零分母哨兵)
    ///
    /// # 参数
    /// - `summaries`: 阶段工时汇总
    /// - `base_template_id`: 基准阶段模板 ID
    ///
    /// # 返回
    /// - Ok(Vec<PhaseCoefficient>)
    /// - Err(AnalyticsError::NotFound): 基准阶段不在列表中
    #[instrument(skip(self, summaries), fields(
        base_template_id = %base_template_id,
        phases = summaries.len()
    ))]
    pub fn calculate_coefficients(
        &self,
        summaries: &[PhaseHoursSummary],
        base_template_id: &str,
    ) -> AnalyticsResult<Vec<PhaseCoefficient>> {
        let base = summaries
            .iter()
            .find(|s| s.template_id == base_template_id)
            .ok_or_else(|| {
                AnalyticsError::NotFound(format!(
                    "基准阶段未找到: template_id={}",
                    base_template_id
                ))
            })?;
        let base_hours = base.total_hours;

        let coefficients = summaries
            .iter()
            .map(|summary| {
                let is_base = summary.template_id == base_template_id;
                let coefficient = if is_base {
                    1.0
                } else if base_hours > 0.0 {
                    summary.total_hours / base_hours
                } else {
                    0.0
                };
                PhaseCoefficient {
                    template_id: summary.template_id.clone(),
                    phase_name: summary.phase_name.clone(),
                    phase_code: summary.phase_code.clone(),
                    total_hours: summary.total_hours,
                    coefficient,
                    is_base,
                }
            })
            .collect();

        Ok(coefficients)
    }
}
