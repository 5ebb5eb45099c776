// ==========================================
// 项目管理工具 - 分析对象: 阶段工时
// ==========================================
// 职责: 定义跨 WBS 阶段工时分析的输入/输出对象
// 用途: 新项目估算 (系数法 / 占比法)
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// PhaseHoursSummary - 阶段工时汇总 (输入)
// ==========================================
// 由外部聚合提供 (通常是 SQL), 每条对应一个阶段模板
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseHoursSummary {
    /// 阶段模板 ID
    pub template_id: String,
    /// 阶段名称
    pub phase_name: String,
    /// 阶段代码
    pub phase_code: String,
    /// 合计工时
    pub total_hours: f64,
}

// ==========================================
// PhaseCoefficient - 阶段系数 (输出)
// ==========================================
// coefficient = 阶段工时 / 基准阶段工时; 基准阶段自身恒为 1.0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseCoefficient {
    pub template_id: String,
    pub phase_name: String,
    pub phase_code: String,
    pub total_hours: f64,
    /// 相对基准阶段的系数
    pub coefficient: f64,
    /// 是否基准阶段
    pub is_base: bool,
}

// ==========================================
// PhaseProportion - 阶段占比 (输出)
// ==========================================
// proportion = 阶段工时 / Σ 全部工时;
// custom_proportion = 阶段工时 / Σ(自定义基准集合工时),
// 自定义集合未指定或合计为 0 时为 None
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseProportion {
    pub template_id: String,
    pub phase_name: String,
    pub phase_code: String,
    pub total_hours: f64,
    /// 相对全体合计的占比
    pub proportion: f64,
    /// 相对自定义基准集合的占比
    pub custom_proportion: Option<f64>,
}

// ==========================================
// WbsScopeFilter - WBS 范围过滤
// ==========================================
// 三种模式: 显式 ID 列表 / 全部 / 标签
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "mode", content = "value")]
pub enum WbsScopeFilter {
    /// 显式 WBS ID 列表
    Ids(Vec<String>),
    /// 全部 WBS (不过滤)
    All,
    /// 按标签解析 WBS ID
    Tag(String),
}
