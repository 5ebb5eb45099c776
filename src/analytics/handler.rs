// ==========================================
// 项目管理工具 - WBS 分析处理器
// ==========================================
// 职责: 解析 WBS 范围过滤 (ID 列表 / 全部 / 标签),
//       编排阶段系数与阶段占比计算
// 红线: 标签解析为空集时立即返回空结果, 不查询工时
// ==========================================

use crate::analytics::coefficient::PhaseCoefficientService;
use crate::analytics::error::AnalyticsResult;
use crate::analytics::models::{
    PhaseCoefficient, PhaseHoursSummary, PhaseProportion, WbsScopeFilter,
};
use crate::analytics::proportion::PhaseProportionService;
use std::sync::Arc;
use tracing::instrument;

/// WBS 标签仓储接口
pub trait WbsTagRepository {
    /// 解析标签对应的 WBS ID 列表
    fn wbs_ids_for_tag(&self, tag: &str) -> AnalyticsResult<Vec<String>>;
}

/// 阶段工时仓储接口
///
/// `wbs_ids` 为 None 表示全量 (不过滤)
pub trait PhaseHoursRepository {
    fn phase_hours(&self, wbs_ids: Option<&[String]>) -> AnalyticsResult<Vec<PhaseHoursSummary>>;
}

/// 范围解析结果: None = 全量, Some(ids) = 限定集合
type ResolvedScope = Option<Vec<String>>;

// ==========================================
// WbsAnalyticsHandler - WBS 分析处理器
// ==========================================
pub struct WbsAnalyticsHandler {
    tag_repo: Arc<dyn WbsTagRepository>,
    hours_repo: Arc<dyn PhaseHoursRepository>,
    coefficient_service: PhaseCoefficientService,
    proportion_service: PhaseProportionService,
}

impl WbsAnalyticsHandler {
    /// 构造函数
    pub fn new(
        tag_repo: Arc<dyn WbsTagRepository>,
        hours_repo: Arc<dyn PhaseHoursRepository>,
    ) -> Self {
        Self {
            tag_repo,
            hours_repo,
            coefficient_service: PhaseCoefficientService::new(),
            proportion_service: PhaseProportionService::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 按范围过滤计算阶段系数
    ///
    /// 范围解析为空集时返回空列表, 不查询工时
    #[instrument(skip(self, filter), fields(base_template_id = %base_template_id))]
    pub fn phase_coefficients(
        &self,
        filter: &WbsScopeFilter,
        base_template_id: &str,
    ) -> AnalyticsResult<Vec<PhaseCoefficient>> {
        let summaries = match self.fetch_summaries(filter)? {
            Some(summaries) => summaries,
            None => return Ok(Vec::new()),
        };
        self.coefficient_service
            .calculate_coefficients(&summaries, base_template_id)
    }

    /// 按范围过滤计算阶段占比
    ///
    /// 范围解析为空集时返回空列表, 不查询工时
    #[instrument(skip(self, filter, custom_base_ids))]
    pub fn phase_proportions(
        &self,
        filter: &WbsScopeFilter,
        custom_base_ids: Option<&[String]>,
    ) -> AnalyticsResult<Vec<PhaseProportion>> {
        let summaries = match self.fetch_summaries(filter)? {
            Some(summaries) => summaries,
            None => return Ok(Vec::new()),
        };
        Ok(self
            .proportion_service
            .calculate_proportions(&summaries, custom_base_ids))
    }

    // ==========================================
    // 内部: 范围解析
    // ==========================================

    /// 解析范围并查询工时; 空集短路返回 None
    fn fetch_summaries(
        &self,
        filter: &WbsScopeFilter,
    ) -> AnalyticsResult<Option<Vec<PhaseHoursSummary>>> {
        let scope = self.resolve_scope(filter)?;
        if let Some(ids) = &scope {
            if ids.is_empty() {
                tracing::debug!("范围解析为空集, 跳过工时查询");
                return Ok(None);
            }
        }
        let summaries = self.hours_repo.phase_hours(scope.as_deref())?;
        Ok(Some(summaries))
    }

    /// 三种过滤模式的范围解析
    fn resolve_scope(&self, filter: &WbsScopeFilter) -> AnalyticsResult<ResolvedScope> {
        match filter {
            WbsScopeFilter::Ids(ids) => Ok(Some(ids.clone())),
            WbsScopeFilter::All => Ok(None),
            WbsScopeFilter::Tag(tag) => Ok(Some(self.tag_repo.wbs_ids_for_tag(tag)?)),
        }
    }
}
