// ==========================================
// 项目管理工具 - 工时分摊领域模型
// ==========================================
// 职责: 月度/日度分摊结果的值对象
// 红线: MonthlyAllocation 构造后不可变,
//       仅允许聚合期通过 add_task_allocation 合并
// ==========================================

use crate::error::{EngineError, EngineResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 月份键格式: "YYYY/MM" (自然序即时间序)
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y/%m").to_string()
}

// ==========================================
// MonthlyAllocation - 月度分摊桶
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAllocation {
    month: String,
    planned_hours: f64,
    baseline_hours: f64,
    actual_hours: f64,
    forecast_hours: f64,
}

impl MonthlyAllocation {
    /// 创建空桶
    pub fn new(month: &str) -> Self {
        Self {
            month: month.to_string(),
            planned_hours: 0.0,
            baseline_hours: 0.0,
            actual_hours: 0.0,
            forecast_hours: 0.0,
        }
    }

    /// 创建带工时的桶
    pub fn with_hours(
        month: &str,
        planned_hours: f64,
        baseline_hours: f64,
        actual_hours: f64,
        forecast_hours: f64,
    ) -> Self {
        Self {
            month: month.to_string(),
            planned_hours,
            baseline_hours,
            actual_hours,
            forecast_hours,
        }
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn planned_hours(&self) -> f64 {
        self.planned_hours
    }

    pub fn baseline_hours(&self) -> f64 {
        self.baseline_hours
    }

    pub fn actual_hours(&self) -> f64 {
        self.actual_hours
    }

    pub fn forecast_hours(&self) -> f64 {
        self.forecast_hours
    }

    /// 聚合期合并另一任务的同月桶 (唯一允许的变更入口)
    ///
    /// 月份键不一致时不合并, 直接忽略
    pub fn add_task_allocation(&mut self, other: &MonthlyAllocation) {
        if self.month != other.month {
            return;
        }
        self.planned_hours += other.planned_hours;
        self.baseline_hours += other.baseline_hours;
        self.actual_hours += other.actual_hours;
        self.forecast_hours += other.forecast_hours;
    }
}

// ==========================================
// MonthlyTaskAllocation - 单任务月度分摊
// ==========================================
// 不可变值对象: 私有构造 + 命名工厂
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyTaskAllocation {
    task_id: String,
    buckets: BTreeMap<String, MonthlyAllocation>,
}

impl MonthlyTaskAllocation {
    /// 工厂: 计划期间落在单一自然月
    ///
    /// 计划/基准/实绩/预测工时全额归入该月, 无需取整分摊
    pub fn create_single_month(
        task_id: &str,
        month: &str,
        planned_hours: f64,
        baseline_hours: f64,
        actual_hours: f64,
        forecast_hours: f64,
    ) -> Self {
        let mut buckets = BTreeMap::new();
        buckets.insert(
            month.to_string(),
            MonthlyAllocation::with_hours(
                month,
                planned_hours,
                baseline_hours,
                actual_hours,
                forecast_hours,
            ),
        );
        Self {
            task_id: task_id.to_string(),
            buckets,
        }
    }

    /// 工厂: 计划期间跨多个自然月
    ///
    /// # 参数
    /// - `planned`: 已按月分摊并取整的计划工时
    /// - `baseline`: 已按月分摊并取整的基准工时
    /// - `forecast`: 已按月分摊并取整的预测工时
    /// - `actual_month`: 实绩工时归属月 (计划期间首月)
    /// - `actual_hours`: 实绩工时 (整体归入 actual_month)
    pub fn create_multi_month(
        task_id: &str,
        planned: BTreeMap<String, f64>,
        baseline: BTreeMap<String, f64>,
        forecast: BTreeMap<String, f64>,
        actual_month: &str,
        actual_hours: f64,
    ) -> Self {
        let mut buckets: BTreeMap<String, MonthlyAllocation> = BTreeMap::new();

        for (month, hours) in &planned {
            buckets
                .entry(month.clone())
                .or_insert_with(|| MonthlyAllocation::new(month))
                .planned_hours += hours;
        }
        for (month, hours) in &baseline {
            buckets
                .entry(month.clone())
                .or_insert_with(|| MonthlyAllocation::new(month))
                .baseline_hours += hours;
        }
        for (month, hours) in &forecast {
            buckets
                .entry(month.clone())
                .or_insert_with(|| MonthlyAllocation::new(month))
                .forecast_hours += hours;
        }
        if actual_hours != 0.0 {
            buckets
                .entry(actual_month.to_string())
                .or_insert_with(|| MonthlyAllocation::new(actual_month))
                .actual_hours += actual_hours;
        }

        Self {
            task_id: task_id.to_string(),
            buckets,
        }
    }

    /// 工厂: 空分摊 (期间缺失或无工作日)
    pub fn empty(task_id: &str) -> Self {
        Self {
            task_id: task_id.to_string(),
            buckets: BTreeMap::new(),
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// 查询指定月份的分摊桶
    pub fn get_allocation(&self, month: &str) -> Option<&MonthlyAllocation> {
        self.buckets.get(month)
    }

    /// 全部月度分摊桶, 按月份键升序
    pub fn monthly_allocations(&self) -> Vec<&MonthlyAllocation> {
        self.buckets.values().collect()
    }

    /// 涉及的月份键, 升序
    pub fn months(&self) -> Vec<&str> {
        self.buckets.keys().map(|k| k.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

// ==========================================
// DailyAllocation - 日度工作量视图
// ==========================================
// 派生对象, 不持久化: 日期 + 可用工时 + 各任务分摊明细
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDailyAllocation {
    /// 任务 ID
    pub task_id: String,
    /// 当日分摊工时
    pub hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyAllocation {
    date: NaiveDate,
    available_hours: f64,
    task_allocations: Vec<TaskDailyAllocation>,
}

impl DailyAllocation {
    /// 创建日度视图 (构造期校验可用工时非负)
    pub fn create(date: NaiveDate, available_hours: f64) -> EngineResult<Self> {
        if available_hours < 0.0 {
            return Err(EngineError::NegativeAvailableHours {
                date,
                hours: available_hours,
            });
        }
        Ok(Self {
            date,
            available_hours,
            task_allocations: Vec::new(),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn available_hours(&self) -> f64 {
        self.available_hours
    }

    pub fn task_allocations(&self) -> &[TaskDailyAllocation] {
        &self.task_allocations
    }

    /// 追加一条任务分摊明细
    pub fn add_task_hours(&mut self, task_id: &str, hours: f64) {
        self.task_allocations.push(TaskDailyAllocation {
            task_id: task_id.to_string(),
            hours,
        });
    }

    /// 当日合计分摊工时
    pub fn allocated_hours(&self) -> f64 {
        self.task_allocations.iter().map(|t| t.hours).sum()
    }

    /// 是否过载 (分摊超过可用)
    pub fn is_overloaded(&self) -> bool {
        self.allocated_hours() > self.available_hours
    }
}
