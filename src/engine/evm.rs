// ==========================================
// 项目管理工具 - 挣值计算引擎
// ==========================================
// 职责: 按评估日聚合 WBS 级 PV/EV/AC/BAC 与派生指数
// 输入: 仓储接口 (任务/担当者/缓冲/按日实绩/项目设定)
// 输出: EvmMetrics (单点) / Vec<EvmMetrics> (时间序列)
// 说明: 时间序列为朴素实现, 每个时点独立全量重算
// ==========================================

use crate::config::EngineConfig;
use crate::domain::evm::EvmMetrics;
use crate::domain::task::TaskRecord;
use crate::domain::types::{EvmMode, HealthStatus, ProgressMethod, TimeSeriesInterval};
use crate::engine::progress::TaskProgressCalculator;
use crate::engine::repositories::EvmRepositories;
use crate::error::EngineResult;
use chrono::{Duration, Months, NaiveDate, Utc};
use tracing::instrument;
use uuid::Uuid;

// ==========================================
// EvmService - 挣值计算引擎
// ==========================================
pub struct EvmService {
    repos: EvmRepositories,
    progress: TaskProgressCalculator,
    healthy_threshold: f64,
    warning_threshold: f64,
    default_progress_method: ProgressMethod,
}

impl EvmService {
    /// 构造函数 (默认阈值: 健康 ≥1.0, 预警 ≥0.9)
    pub fn new(repos: EvmRepositories) -> Self {
        Self {
            repos,
            progress: TaskProgressCalculator::new(),
            healthy_threshold: 1.0,
            warning_threshold: 0.9,
            default_progress_method: ProgressMethod::SelfReported,
        }
    }

    /// 按引擎配置构造
    pub fn with_config(repos: EvmRepositories, config: &EngineConfig) -> Self {
        Self {
            repos,
            progress: TaskProgressCalculator::new(),
            healthy_threshold: config.healthy_threshold,
            warning_threshold: config.warning_threshold,
            default_progress_method: config.default_progress_method,
        }
    }

    // ==========================================
    // 核心方法: 单点计算
    // ==========================================

    /// 计算评估日的 EVM 指标
    ///
    /// 口径:
    /// - PV: Σ 各任务在评估日的计划价值 (按期间线性推进)
    /// - EV: Σ 各任务总价值 × 有效进度率
    /// - AC: 按日实绩在 [最早计划开始日, 评估日] 区间求和
    /// - BAC: Σ 计划总量 + Σ 缓冲, 与评估日无关
    ///
    /// 进度测定方式解析顺序:
    /// 显式参数 → 项目设定 → 默认 (SELF_REPORTED)
    ///
    /// # 参数
    /// - `wbs_id`: WBS ID
    /// - `evaluation_date`: 评估基准日
    /// - `mode`: 计算口径 (工时 | 成本)
    /// - `progress_method`: 进度测定方式 (可缺省)
    #[instrument(skip(self), fields(wbs_id = %wbs_id, evaluation_date = %evaluation_date))]
    pub fn calculate_current_evm_metrics(
        &self,
        wbs_id: &str,
        evaluation_date: NaiveDate,
        mode: EvmMode,
        progress_method: Option<ProgressMethod>,
    ) -> EngineResult<EvmMetrics> {
        let method = self.resolve_progress_method(wbs_id, progress_method)?;
        let tasks = self.repos.task_repo.tasks_for_wbs(wbs_id)?;

        // PV / EV / BAC (任务部分)
        let mut pv = 0.0;
        let mut ev = 0.0;
        let mut bac = 0.0;
        for task in &tasks {
            let rate = self.cost_rate_for(task, mode)?;
            let total_value = task.planned_hours * rate;
            bac += total_value;
            pv += self.planned_value_at(task, evaluation_date) * rate;

            let progress =
                self.progress
                    .calculate_effective_progress(task.status, task.progress, method);
            ev += total_value * progress / 100.0;
        }

        // BAC (缓冲部分): 一次性计入, 与评估日无关
        for buffer in self.repos.buffer_repo.buffers_for_wbs(wbs_id)? {
            bac += match mode {
                EvmMode::Hours => buffer.buffer_hours,
                EvmMode::Cost => buffer.buffer_cost,
            };
        }

        // AC: [最早计划开始日, 评估日] 区间求和
        let ac = self.actual_cost_until(wbs_id, &tasks, evaluation_date, mode)?;

        // 派生指数 (分母为 0 时无定义)
        let cpi = if ac > 0.0 { Some(ev / ac) } else { None };
        let spi = if pv > 0.0 { Some(ev / pv) } else { None };
        let health_status = self.health_status(cpi, spi);

        Ok(EvmMetrics {
            metrics_id: Uuid::new_v4().to_string(),
            wbs_id: wbs_id.to_string(),
            evaluation_date,
            pv,
            ev,
            ac,
            bac,
            calculation_mode: mode,
            progress_method: method,
            cpi,
            spi,
            health_status,
            created_at: Utc::now().naive_utc(),
        })
    }

    // ==========================================
    // 核心方法: 时间序列
    // ==========================================

    /// 生成 EVM 时间序列 (每个时点独立全量重算)
    ///
    /// 返回数组按生成日期升序, 这是唯一的顺序契约
    #[instrument(skip(self), fields(wbs_id = %wbs_id, %start, %end, interval = %interval))]
    pub fn get_evm_time_series(
        &self,
        wbs_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: TimeSeriesInterval,
        mode: EvmMode,
        progress_method: Option<ProgressMethod>,
    ) -> EngineResult<Vec<EvmMetrics>> {
        let mut series = Vec::new();
        let mut current = start;
        while current <= end {
            series.push(self.calculate_current_evm_metrics(
                wbs_id,
                current,
                mode,
                progress_method,
            )?);
            current = match interval {
                TimeSeriesInterval::Daily => current + Duration::days(1),
                TimeSeriesInterval::Weekly => current + Duration::days(7),
                TimeSeriesInterval::Monthly => match current.checked_add_months(Months::new(1)) {
                    Some(next) => next,
                    None => break,
                },
            };
        }
        Ok(series)
    }

    // ==========================================
    // 内部计算
    // ==========================================

    /// 进度测定方式解析: 显式参数 → 项目设定 → 默认
    fn resolve_progress_method(
        &self,
        wbs_id: &str,
        explicit: Option<ProgressMethod>,
    ) -> EngineResult<ProgressMethod> {
        if let Some(method) = explicit {
            return Ok(method);
        }
        if let Some(settings) = self.repos.settings_repo.evm_settings(wbs_id)? {
            return Ok(settings.progress_method);
        }
        Ok(self.default_progress_method)
    }

    /// 成本口径下的任务单价 (工时口径恒为 1)
    ///
    /// 未分配担当者或担当者不存在时单价按 0 计
    fn cost_rate_for(&self, task: &TaskRecord, mode: EvmMode) -> EngineResult<f64> {
        match mode {
            EvmMode::Hours => Ok(1.0),
            EvmMode::Cost => {
                let Some(assignee_id) = &task.assignee_id else {
                    return Ok(0.0);
                };
                Ok(self
                    .repos
                    .assignee_repo
                    .assignee(assignee_id)?
                    .map(|a| a.cost_per_hour())
                    .unwrap_or(0.0))
            }
        }
    }

    /// 单任务在评估日的计划价值 (工时口径)
    ///
    /// 期间两端确定时按经过日数线性推进 (含两端);
    /// 开放端按朴素规则: 评估日达到已知边界即全额计入
    fn planned_value_at(&self, task: &TaskRecord, evaluation_date: NaiveDate) -> f64 {
        match (task.planned_period.start(), task.planned_period.end()) {
            (Some(start), Some(end)) => {
                if evaluation_date < start {
                    0.0
                } else if evaluation_date >= end {
                    task.planned_hours
                } else {
                    let elapsed = (evaluation_date - start).num_days() + 1;
                    let total = (end - start).num_days() + 1;
                    task.planned_hours * elapsed as f64 / total as f64
                }
            }
            (Some(start), None) => {
                if evaluation_date >= start {
                    task.planned_hours
                } else {
                    0.0
                }
            }
            (None, Some(end)) => {
                if evaluation_date >= end {
                    task.planned_hours
                } else {
                    0.0
                }
            }
            (None, None) => task.planned_hours,
        }
    }

    /// AC 区间求和: [最早计划开始日, 评估日]
    fn actual_cost_until(
        &self,
        wbs_id: &str,
        tasks: &[TaskRecord],
        evaluation_date: NaiveDate,
        mode: EvmMode,
    ) -> EngineResult<f64> {
        let earliest_start = tasks
            .iter()
            .filter_map(|t| t.planned_period.start())
            .min();

        let costs = self.repos.actual_cost_repo.actual_costs_by_date(wbs_id)?;
        let total = costs
            .iter()
            .filter(|(date, _)| {
                **date <= evaluation_date
                    && earliest_start.map(|s| **date >= s).unwrap_or(true)
            })
            .map(|(_, entry)| match mode {
                EvmMode::Hours => entry.actual_hours,
                EvmMode::Cost => entry.actual_cost,
            })
            .sum();
        Ok(total)
    }

    /// 健康状态判定 (三档)
    ///
    /// 双指标 ≥ 健康阈值 → HEALTHY; ≥ 预警阈值 → WARNING; 其余 → CRITICAL
    /// 无定义的指数 (分母 0) 不拉低判定
    fn health_status(&self, cpi: Option<f64>, spi: Option<f64>) -> HealthStatus {
        let tier = |index: Option<f64>| match index {
            Some(value) if value >= self.healthy_threshold => 2,
            Some(value) if value >= self.warning_threshold => 1,
            Some(_) => 0,
            None => 2,
        };
        match tier(cpi).min(tier(spi)) {
            2 => HealthStatus::Healthy,
            1 => HealthStatus::Warning,
            _ => HealthStatus::Critical,
        }
    }
}
