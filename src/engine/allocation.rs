// ==========================================
// 项目管理工具 - 工时分摊引擎
// ==========================================
// 职责: 将单任务的计划/基准/预测工时总量分摊到月度桶,
//       并把多任务的日度分摊合并为担当者工作量视图
// 输入: 任务快照 + 公司日历 + 担当者 + 个人日程例外
// 输出: MonthlyTaskAllocation / DailyAllocation 列表 + 结构化警告
// 红线: 每条工时流 (计划/基准/预测) 独立取整, 各自严格保和
// ==========================================

use crate::domain::allocation::{
    month_key, DailyAllocation, MonthlyAllocation, MonthlyTaskAllocation,
};
use crate::domain::calendar::{CompanyCalendar, ProjectAssignee, UserScheduleEntry};
use crate::domain::task::{DatePeriod, TaskRecord};
use crate::domain::types::AllocationWarningReason;
use crate::engine::business_day::BusinessDayPeriod;
use crate::engine::quantizer::AllocationQuantizer;
use crate::error::EngineResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::instrument;

// ==========================================
// AllocationWarning - 结构化警告
// ==========================================
// 退化但合法的状态 (无工作日/期间缺失) 不抛错误
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationWarning {
    /// 任务 ID
    pub task_id: String,
    /// 警告原因
    pub reason: AllocationWarningReason,
    /// 说明
    pub message: String,
}

// ==========================================
// TaskAllocationResult - 单任务分摊结果
// ==========================================
#[derive(Debug, Clone)]
pub struct TaskAllocationResult {
    pub allocation: MonthlyTaskAllocation,
    pub warnings: Vec<AllocationWarning>,
}

// ==========================================
// WorkingHoursAllocationService - 工时分摊引擎
// ==========================================
pub struct WorkingHoursAllocationService {
    quantizer: AllocationQuantizer,
}

impl WorkingHoursAllocationService {
    /// 构造函数 (构造期校验取整单位)
    ///
    /// # 参数
    /// - `quantize_unit`: 报告粒度 (小时), 必须 > 0
    pub fn new(quantize_unit: f64) -> EngineResult<Self> {
        Ok(Self {
            quantizer: AllocationQuantizer::new(quantize_unit)?,
        })
    }

    /// 按默认粒度 (0.25h) 构造
    pub fn with_default_unit() -> Self {
        Self {
            quantizer: AllocationQuantizer::with_default_unit(),
        }
    }

    // ==========================================
    // 核心方法: 月度分摊
    // ==========================================

    /// 单任务月度分摊
    ///
    /// 规则:
    /// 1) 计划期间落在单月 → 全额归入该月, 不取整
    /// 2) 跨月 → 按各月加权工作日容量占比分摊, 逐流取整保和
    /// 3) 计划/预测工时按计划期间权重分摊;
    ///    基准工时在基准期间存在时按基准期间自身权重分摊,
    ///    否则沿用计划期间权重
    /// 4) 实绩工时: 单月全额归入该月; 跨月归入计划期间首月
    ///
    /// 注: 基准期间与计划期间跨度不一致时 (如基准单月/计划跨月),
    /// 基准工时按各自路径分摊, 两者的月度边界可能不对齐
    #[instrument(skip(self, calendar, assignee, schedules), fields(
        task_id = %task.task_id,
        assignee_id = %assignee.assignee_id()
    ))]
    pub fn allocate_task_monthly(
        &self,
        task: &TaskRecord,
        calendar: &CompanyCalendar,
        assignee: &ProjectAssignee,
        schedules: &[UserScheduleEntry],
    ) -> EngineResult<TaskAllocationResult> {
        let mut warnings = Vec::new();

        // 计划期间两端必须确定才能分摊
        let (start, end) = match task.planned_period.resolved() {
            Some(bounds) => bounds,
            None => {
                warnings.push(missing_period_warning(&task.task_id));
                return Ok(TaskAllocationResult {
                    allocation: MonthlyTaskAllocation::empty(&task.task_id),
                    warnings,
                });
            }
        };

        // 单月: 全额归入, 无需取整
        if task.planned_period.is_single_month() {
            let month = month_key(start);
            let allocation = MonthlyTaskAllocation::create_single_month(
                &task.task_id,
                &month,
                task.planned_hours,
                task.baseline_hours,
                task.actual_hours,
                task.forecast_hours.unwrap_or(0.0),
            );
            return Ok(TaskAllocationResult {
                allocation,
                warnings,
            });
        }

        // 跨月: 展开计划期间
        let planned_period =
            BusinessDayPeriod::expand(calendar, assignee, schedules, start, end)?;
        if planned_period.is_empty() || planned_period.total_available_hours() <= 0.0 {
            warnings.push(no_working_days_warning(&task.task_id, start, end));
            return Ok(TaskAllocationResult {
                allocation: MonthlyTaskAllocation::empty(&task.task_id),
                warnings,
            });
        }

        let planned_weights = planned_period.monthly_available_hours();
        let total_weight = planned_period.total_available_hours();

        // 计划工时流
        let planned_map = self.apportion_stream(task.planned_hours, &planned_weights, total_weight);

        // 预测工时流 (独立取整, 各自保和)
        let forecast_map = match task.forecast_hours {
            Some(hours) if hours > 0.0 => {
                self.apportion_stream(hours, &planned_weights, total_weight)
            }
            _ => BTreeMap::new(),
        };

        // 基准工时流
        let baseline_map = self.apportion_baseline(
            task,
            calendar,
            assignee,
            schedules,
            &planned_weights,
            total_weight,
            &mut warnings,
        )?;

        let allocation = MonthlyTaskAllocation::create_multi_month(
            &task.task_id,
            planned_map,
            baseline_map,
            forecast_map,
            &month_key(start),
            task.actual_hours,
        );

        Ok(TaskAllocationResult {
            allocation,
            warnings,
        })
    }

    /// 按权重分摊一条工时流并取整保和
    fn apportion_stream(
        &self,
        total_hours: f64,
        weights: &BTreeMap<String, f64>,
        total_weight: f64,
    ) -> BTreeMap<String, f64> {
        if total_hours == 0.0 || total_weight <= 0.0 {
            return BTreeMap::new();
        }
        let raw: BTreeMap<String, f64> = weights
            .iter()
            .map(|(month, weight)| (month.clone(), total_hours * weight / total_weight))
            .collect();
        self.quantizer.quantize(&raw)
    }

    /// 基准工时分摊
    ///
    /// 基准期间存在且两端确定时按其自身权重分摊;
    /// 基准期间单月时全额归入该月; 其余情形沿用计划期间权重
    #[allow(clippy::too_many_arguments)]
    fn apportion_baseline(
        &self,
        task: &TaskRecord,
        calendar: &CompanyCalendar,
        assignee: &ProjectAssignee,
        schedules: &[UserScheduleEntry],
        planned_weights: &BTreeMap<String, f64>,
        planned_total_weight: f64,
        warnings: &mut Vec<AllocationWarning>,
    ) -> EngineResult<BTreeMap<String, f64>> {
        if task.baseline_hours == 0.0 {
            return Ok(BTreeMap::new());
        }

        let baseline_bounds = task.baseline_period.as_ref().and_then(DatePeriod::resolved);
        match baseline_bounds {
            Some((start, end)) => {
                if month_key(start) == month_key(end) {
                    // 基准期间单月: 全额归入
                    let mut map = BTreeMap::new();
                    map.insert(month_key(start), task.baseline_hours);
                    return Ok(map);
                }
                let baseline_period =
                    BusinessDayPeriod::expand(calendar, assignee, schedules, start, end)?;
                if baseline_period.is_empty() || baseline_period.total_available_hours() <= 0.0 {
                    // 基准期间无工作日: 回退到计划期间权重
                    warnings.push(no_working_days_warning(&task.task_id, start, end));
                    return Ok(self.apportion_stream(
                        task.baseline_hours,
                        planned_weights,
                        planned_total_weight,
                    ));
                }
                Ok(self.apportion_stream(
                    task.baseline_hours,
                    &baseline_period.monthly_available_hours(),
                    baseline_period.total_available_hours(),
                ))
            }
            // 无基准期间: 沿用计划期间权重
            None => Ok(self.apportion_stream(
                task.baseline_hours,
                planned_weights,
                planned_total_weight,
            )),
        }
    }

    // ==========================================
    // 核心方法: 日度分摊与工作量视图
    // ==========================================

    /// 单任务日度分摊 (计划工时按日容量占比拆分, 不取整)
    ///
    /// 期间缺失或无工作日时返回空列表
    pub fn allocate_task_daily(
        &self,
        task: &TaskRecord,
        calendar: &CompanyCalendar,
        assignee: &ProjectAssignee,
        schedules: &[UserScheduleEntry],
    ) -> EngineResult<Vec<DailyAllocation>> {
        let (start, end) = match task.planned_period.resolved() {
            Some(bounds) => bounds,
            None => return Ok(Vec::new()),
        };

        let period = BusinessDayPeriod::expand(calendar, assignee, schedules, start, end)?;
        let total = period.total_available_hours();
        if period.is_empty() || total <= 0.0 {
            return Ok(Vec::new());
        }

        let mut result = Vec::with_capacity(period.len());
        for day in period.days() {
            let mut daily = DailyAllocation::create(day.date, day.available_hours)?;
            daily.add_task_hours(
                &task.task_id,
                task.planned_hours * day.available_hours / total,
            );
            result.push(daily);
        }
        Ok(result)
    }

    /// 合并多任务的日度分摊为单担当者工作量视图
    ///
    /// 同一日期的明细合并到一条记录 (可用工时取首见值,
    /// 同担当者同日历下各任务展开结果一致), 日期升序;
    /// 过载检测由 DailyAllocation::is_overloaded 在 UI 边界完成
    pub fn aggregate_daily_workload(
        &self,
        per_task: &[Vec<DailyAllocation>],
    ) -> Vec<DailyAllocation> {
        let mut merged: BTreeMap<NaiveDate, DailyAllocation> = BTreeMap::new();
        for task_days in per_task {
            for day in task_days {
                match merged.get_mut(&day.date()) {
                    Some(entry) => {
                        for detail in day.task_allocations() {
                            entry.add_task_hours(&detail.task_id, detail.hours);
                        }
                    }
                    None => {
                        merged.insert(day.date(), day.clone());
                    }
                }
            }
        }
        merged.into_values().collect()
    }

    // ==========================================
    // 核心方法: 跨任务月度汇总
    // ==========================================

    /// 合并多任务的月度分摊为看板月度汇总, 按月份键升序
    pub fn summarize_monthly(
        &self,
        allocations: &[MonthlyTaskAllocation],
    ) -> Vec<MonthlyAllocation> {
        let mut merged: BTreeMap<String, MonthlyAllocation> = BTreeMap::new();
        for allocation in allocations {
            for bucket in allocation.monthly_allocations() {
                merged
                    .entry(bucket.month().to_string())
                    .or_insert_with(|| MonthlyAllocation::new(bucket.month()))
                    .add_task_allocation(bucket);
            }
        }
        merged.into_values().collect()
    }
}

fn missing_period_warning(task_id: &str) -> AllocationWarning {
    AllocationWarning {
        task_id: task_id.to_string(),
        reason: AllocationWarningReason::MissingPeriod,
        message: "计划期间的开始日/结束日缺失, 无法分摊".to_string(),
    }
}

fn no_working_days_warning(task_id: &str, start: NaiveDate, end: NaiveDate) -> AllocationWarning {
    AllocationWarning {
        task_id: task_id.to_string(),
        reason: AllocationWarningReason::NoWorkingDays,
        message: format!("期间 {} 〜 {} 内无工作日", start, end),
    }
}
