// ==========================================
// 项目管理工具 - 任务领域模型
// ==========================================
// 职责: 定义用于工时分摊/挣值计算的任务快照
// 红线: 不含数据访问逻辑, 不含引擎逻辑
// ==========================================

use crate::domain::types::TaskStatus;
use crate::error::{EngineError, EngineResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// ==========================================
// DatePeriod - 期间值对象
// ==========================================
// 不变式: start/end 同时存在时 start <= end
// 说明: 计划期间(预定)与基准期间相互独立, 均可开放端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePeriod {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DatePeriod {
    /// 创建期间 (构造期校验不变式)
    ///
    /// # 参数
    /// - `start`: 开始日 (可缺失)
    /// - `end`: 结束日 (可缺失)
    ///
    /// # 返回
    /// - Ok(DatePeriod): 合法期间
    /// - Err(EngineError::InvalidPeriod): start > end
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> EngineResult<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(EngineError::InvalidPeriod { start: s, end: e });
            }
        }
        Ok(Self { start, end })
    }

    /// 从完整边界创建期间
    pub fn closed(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        Self::new(Some(start), Some(end))
    }

    /// 空期间 (两端均缺失)
    pub fn open() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// 两端均确定时返回 (start, end)
    pub fn resolved(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        }
    }

    /// 期间是否落在单一自然月内
    ///
    /// 任一端缺失视为无法判定, 返回 false
    pub fn is_single_month(&self) -> bool {
        match self.resolved() {
            Some((s, e)) => s.year() == e.year() && s.month() == e.month(),
            None => false,
        }
    }

    /// 期间是否包含指定日期 (开放端视为无界)
    pub fn contains(&self, date: NaiveDate) -> bool {
        let after_start = self.start.map(|s| date >= s).unwrap_or(true);
        let before_end = self.end.map(|e| date <= e).unwrap_or(true);
        after_start && before_end
    }

    /// 期间总天数 (含两端); 开放端返回 None
    pub fn total_days(&self) -> Option<i64> {
        self.resolved().map(|(s, e)| (e - s).num_days() + 1)
    }
}

// ==========================================
// TaskRecord - 任务快照
// ==========================================
// 由外部仓储提供的纯数据记录, 引擎不做 I/O
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    /// 任务 ID
    pub task_id: String,
    /// 所属 WBS ID
    pub wbs_id: String,
    /// 担当者 ID (未分配时为 None)
    pub assignee_id: Option<String>,
    /// 任务状态
    pub status: TaskStatus,
    /// 自报进度 (0-100, 未填报为 None)
    pub progress: Option<f64>,
    /// 计划期间 (预定)
    pub planned_period: DatePeriod,
    /// 基准期间 (与计划期间相互独立, 可缺失)
    pub baseline_period: Option<DatePeriod>,
    /// 计划工时
    pub planned_hours: f64,
    /// 基准工时
    pub baseline_hours: f64,
    /// 实绩工时
    pub actual_hours: f64,
    /// 预测工时 (可缺失)
    pub forecast_hours: Option<f64>,
}

impl TaskRecord {
    /// 计划期间是否落在单一自然月内
    pub fn is_single_month_planned(&self) -> bool {
        self.planned_period.is_single_month()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_period_validation() {
        // 正常期间
        let period = DatePeriod::closed(d(2025, 1, 1), d(2025, 1, 31)).unwrap();
        assert_eq!(period.total_days(), Some(31));

        // start > end 构造失败
        let result = DatePeriod::closed(d(2025, 2, 1), d(2025, 1, 1));
        assert!(matches!(result, Err(EngineError::InvalidPeriod { .. })));

        // 开放端合法
        let period = DatePeriod::new(Some(d(2025, 1, 1)), None).unwrap();
        assert!(period.resolved().is_none());
        assert_eq!(period.total_days(), None);
    }

    #[test]
    fn test_single_month_detection() {
        let single = DatePeriod::closed(d(2025, 3, 3), d(2025, 3, 28)).unwrap();
        assert!(single.is_single_month());

        let multi = DatePeriod::closed(d(2025, 3, 3), d(2025, 4, 1)).unwrap();
        assert!(!multi.is_single_month());

        // 跨年同月号也是多月
        let cross_year = DatePeriod::closed(d(2024, 3, 1), d(2025, 3, 1)).unwrap();
        assert!(!cross_year.is_single_month());

        // 开放端无法判定
        let open = DatePeriod::new(Some(d(2025, 3, 1)), None).unwrap();
        assert!(!open.is_single_month());
    }

    #[test]
    fn test_contains_with_open_ends() {
        let open_end = DatePeriod::new(Some(d(2025, 1, 10)), None).unwrap();
        assert!(open_end.contains(d(2025, 6, 1)));
        assert!(!open_end.contains(d(2025, 1, 9)));

        let fully_open = DatePeriod::open();
        assert!(fully_open.contains(d(1999, 1, 1)));
    }
}
