// ==========================================
// 项目管理工具 - 引擎层仓储抽象
// ==========================================
// 职责: 定义 EVM 引擎所需的仓储接口并聚合注入
// 目标: 减少 EvmService 的构造函数参数数量, 便于 mock
// 红线: 引擎不做 I/O, 所有数据经由仓储接口进入
// ==========================================

use crate::domain::calendar::ProjectAssignee;
use crate::domain::evm::{ActualCostEntry, ProjectEvmSettings, WbsBuffer};
use crate::domain::task::TaskRecord;
use crate::error::EngineResult;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;

/// 任务仓储接口
pub trait TaskRepository {
    /// 查询 WBS 下的全部任务快照
    fn tasks_for_wbs(&self, wbs_id: &str) -> EngineResult<Vec<TaskRecord>>;
}

/// 担当者仓储接口
pub trait AssigneeRepository {
    /// 查询担当者 (不存在返回 None)
    fn assignee(&self, assignee_id: &str) -> EngineResult<Option<ProjectAssignee>>;
}

/// 缓冲仓储接口
pub trait BufferRepository {
    /// 查询 WBS 下的全部缓冲
    fn buffers_for_wbs(&self, wbs_id: &str) -> EngineResult<Vec<WbsBuffer>>;
}

/// 按日实绩仓储接口
///
/// 实绩按日聚合由外部完成 (通常是 SQL), 引擎只做区间求和
pub trait ActualCostRepository {
    fn actual_costs_by_date(
        &self,
        wbs_id: &str,
    ) -> EngineResult<BTreeMap<NaiveDate, ActualCostEntry>>;
}

/// 项目设定仓储接口
pub trait ProjectSettingsRepository {
    /// 查询项目级 EVM 设定 (未设定返回 None)
    fn evm_settings(&self, wbs_id: &str) -> EngineResult<Option<ProjectEvmSettings>>;
}

// ==========================================
// EvmRepositories - EVM 引擎仓储集合
// ==========================================
// 将 5 个仓储参数合并为 1 个结构体参数
#[derive(Clone)]
pub struct EvmRepositories {
    /// 任务仓储
    pub task_repo: Arc<dyn TaskRepository>,
    /// 担当者仓储
    pub assignee_repo: Arc<dyn AssigneeRepository>,
    /// 缓冲仓储
    pub buffer_repo: Arc<dyn BufferRepository>,
    /// 按日实绩仓储
    pub actual_cost_repo: Arc<dyn ActualCostRepository>,
    /// 项目设定仓储
    pub settings_repo: Arc<dyn ProjectSettingsRepository>,
}

impl EvmRepositories {
    /// 创建新的仓储集合
    pub fn new(
        task_repo: Arc<dyn TaskRepository>,
        assignee_repo: Arc<dyn AssigneeRepository>,
        buffer_repo: Arc<dyn BufferRepository>,
        actual_cost_repo: Arc<dyn ActualCostRepository>,
        settings_repo: Arc<dyn ProjectSettingsRepository>,
    ) -> Self {
        Self {
            task_repo,
            assignee_repo,
            buffer_repo,
            actual_cost_repo,
            settings_repo,
        }
    }
}

// 注: 各仓储的具体实现由外部协作方 (持久化层) 提供,
// 本 crate 的测试使用内存 mock 实现这些接口。
