// ==========================================
// 项目管理工具 - 阶段占比引擎
// ==========================================
// 职责: 计算各阶段工时在全体/自定义基准集合中的占比
// 红线: 零分母不是错误 → 占比 0 / 自定义占比 None
// ==========================================

use crate::analytics::models::{PhaseHoursSummary, PhaseProportion};
use std::collections::HashSet;
use tracing::instrument;

// ==========================================
// PhaseProportionService - 阶段占比引擎
// ==========================================
pub struct PhaseProportionService {
    // 无状态引擎, 不需要注入依赖
}

impl PhaseProportionService {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算阶段占比
    ///
    /// 规则:
    /// - proportion = 阶段工时 / Σ 全部工时 (合计 0 → 一律 0)
    /// - 指定自定义基准集合时:
    ///   custom_proportion = 阶段工时 / Σ(集合内工时);
    ///   集合合计为 0 → 一律 None
    /// - 未指定集合时 custom_proportion 恒为 None
    ///
    /// # 参数
    /// - `summaries`: 阶段工时汇总
    /// - `custom_base_ids`: 自定义基准集合 (模板 ID, 可缺省)
    #[instrument(skip(self, summaries, custom_base_ids), fields(phases = summaries.len()))]
    pub fn calculate_proportions(
        &self,
        summaries: &[PhaseHoursSummary],
        custom_base_ids: Option<&[String]>,
    ) -> Vec<PhaseProportion> {
        let total: f64 = summaries.iter().map(|s| s.total_hours).sum();

        let custom_set: Option<HashSet<&str>> = custom_base_ids
            .map(|ids| ids.iter().map(|id| id.as_str()).collect());
        let custom_total: f64 = match &custom_set {
            Some(set) => summaries
                .iter()
                .filter(|s| set.contains(s.template_id.as_str()))
                .map(|s| s.total_hours)
                .sum(),
            None => 0.0,
        };

        summaries
            .iter()
            .map(|summary| {
                let proportion = if total > 0.0 {
                    summary.total_hours / total
                } else {
                    0.0
                };
                let custom_proportion = match &custom_set {
                    Some(_) if custom_total > 0.0 => Some(summary.total_hours / custom_total),
                    _ => None,
                };
                PhaseProportion {
                    template_id: summary.template_id.clone(),
                    phase_name: summary.phase_name.clone(),
                    phase_code: summary.phase_code.clone(),
                    total_hours: summary.total_hours,
                    proportion,
                    custom_proportion,
                }
            })
            .collect()
    }
}
