// ==========================================
// 项目管理工具 - 挣值领域模型
// ==========================================
// 职责: EVM 指标快照与其输入记录的定义
// 说明: 快照按查询即时生成, 不持久化、不并发修改
// ==========================================

use crate::domain::types::{EvmMode, HealthStatus, ProgressMethod};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// EvmMetrics - EVM 指标快照
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvmMetrics {
    /// 快照 ID
    pub metrics_id: String,
    /// 所属 WBS ID
    pub wbs_id: String,
    /// 评估基准日
    pub evaluation_date: NaiveDate,

    // ===== 核心指标 =====
    /// 计划价值 (Planned Value)
    pub pv: f64,
    /// 挣值 (Earned Value)
    pub ev: f64,
    /// 实际成本 (Actual Cost)
    pub ac: f64,
    /// 完工预算 (Budget at Completion), 含缓冲, 与评估日无关
    pub bac: f64,

    // ===== 计算口径 =====
    /// 计算口径 (工时 | 成本)
    pub calculation_mode: EvmMode,
    /// 进度测定方式
    pub progress_method: ProgressMethod,

    // ===== 派生指标 =====
    /// 成本绩效指数 EV/AC (AC=0 时为 None)
    pub cpi: Option<f64>,
    /// 进度绩效指数 EV/PV (PV=0 时为 None)
    pub spi: Option<f64>,
    /// 健康状态
    pub health_status: HealthStatus,

    /// 生成时刻
    pub created_at: NaiveDateTime,
}

// ==========================================
// WbsBuffer - WBS 缓冲
// ==========================================
// BAC = Σ计划 + Σ缓冲, 一次性计入, 与评估日无关
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WbsBuffer {
    /// 缓冲 ID
    pub buffer_id: String,
    /// 缓冲名称
    pub name: String,
    /// 缓冲工时
    pub buffer_hours: f64,
    /// 缓冲成本
    pub buffer_cost: f64,
}

// ==========================================
// ActualCostEntry - 按日实绩记录
// ==========================================
// 由外部聚合提供 (按日工时与成本), 引擎只做区间求和
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActualCostEntry {
    /// 当日实绩工时
    pub actual_hours: f64,
    /// 当日实际成本
    pub actual_cost: f64,
}

// ==========================================
// ProjectEvmSettings - 项目级 EVM 设定
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEvmSettings {
    /// 所属 WBS ID
    pub wbs_id: String,
    /// 项目设定的进度测定方式
    pub progress_method: ProgressMethod,
}
