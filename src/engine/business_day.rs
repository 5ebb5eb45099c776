// ==========================================
// 项目管理工具 - 工作日期间展开引擎
// ==========================================
// 职责: 将 [start, end] 展开为某担当者的加权工作日列表
// 权重: max(0, (标准时长 - 日程占用) × 参与率)
// 红线: 整日占用仍算工作日 (权重 0);
//       期间全为休日 → 空集合, 由调用方按警告处理
// ==========================================

use crate::domain::calendar::{CompanyCalendar, ProjectAssignee, UserScheduleEntry};
use crate::domain::month_key;
use crate::error::{EngineError, EngineResult};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::instrument;

// ==========================================
// WeightedBusinessDay - 加权工作日
// ==========================================
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeightedBusinessDay {
    /// 日期
    pub date: NaiveDate,
    /// 当日可用工时 (净值)
    pub available_hours: f64,
}

// ==========================================
// BusinessDayPeriod - 工作日期间
// ==========================================
#[derive(Debug, Clone)]
pub struct BusinessDayPeriod {
    days: Vec<WeightedBusinessDay>,
}

impl BusinessDayPeriod {
    /// 展开期间为加权工作日列表
    ///
    /// # 参数
    /// - `calendar`: 公司日历
    /// - `assignee`: 担当者 (参与率)
    /// - `schedules`: 个人日程例外 (仅同担当者同日期的条目生效)
    /// - `start` / `end`: 期间边界 (含两端)
    ///
    /// # 返回
    /// - Ok(BusinessDayPeriod): 可能为空 (期间内无工作日)
    /// - Err(EngineError::InvalidPeriod): start > end
    #[instrument(skip(calendar, assignee, schedules), fields(
        assignee_id = %assignee.assignee_id(),
        start = %start,
        end = %end
    ))]
    pub fn expand(
        calendar: &CompanyCalendar,
        assignee: &ProjectAssignee,
        schedules: &[UserScheduleEntry],
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Self> {
        if start > end {
            return Err(EngineError::InvalidPeriod { start, end });
        }

        let mut days = Vec::new();
        let mut current = start;
        while current <= end {
            if calendar.is_business_day(current) {
                let blocked: f64 = schedules
                    .iter()
                    .filter(|s| s.assignee_id == assignee.assignee_id() && s.date == current)
                    .map(|s| s.blocked_hours)
                    .sum();
                let net_hours = (calendar.standard_working_hours() - blocked).max(0.0);
                days.push(WeightedBusinessDay {
                    date: current,
                    available_hours: net_hours * assignee.allocation_rate(),
                });
            }
            current += Duration::days(1);
        }

        if days.is_empty() {
            tracing::debug!(
                assignee_id = %assignee.assignee_id(),
                %start,
                %end,
                "期间内无工作日"
            );
        }

        Ok(Self { days })
    }

    /// 期间内是否无工作日
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// 工作日数量
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// 全部加权工作日, 按日期升序
    pub fn days(&self) -> &[WeightedBusinessDay] {
        &self.days
    }

    /// 期间合计可用工时
    pub fn total_available_hours(&self) -> f64 {
        self.days.iter().map(|d| d.available_hours).sum()
    }

    /// 按月份键 ("YYYY/MM") 汇总的可用工时
    pub fn monthly_available_hours(&self) -> BTreeMap<String, f64> {
        let mut monthly: BTreeMap<String, f64> = BTreeMap::new();
        for day in &self.days {
            *monthly.entry(month_key(day.date)).or_insert(0.0) += day.available_hours;
        }
        monthly
    }

    /// 查询指定日期的可用工时 (非工作日返回 None)
    pub fn daily_available(&self, date: NaiveDate) -> Option<f64> {
        self.days
            .iter()
            .find(|d| d.date == date)
            .map(|d| d.available_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::Holiday;
    use crate::domain::types::HolidayType;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn calendar_without_holidays() -> CompanyCalendar {
        CompanyCalendar::create(8.0, vec![]).unwrap()
    }

    #[test]
    fn test_weekend_excluded() {
        // 2025-01-06(周一) 〜 2025-01-12(周日): 工作日 5 天
        let calendar = calendar_without_holidays();
        let assignee = ProjectAssignee::create("U001", 1.0, 0.0).unwrap();
        let period =
            BusinessDayPeriod::expand(&calendar, &assignee, &[], d(2025, 1, 6), d(2025, 1, 12))
                .unwrap();

        assert_eq!(period.len(), 5);
        assert_eq!(period.total_available_hours(), 40.0);
    }

    #[test]
    fn test_holiday_excluded_and_rate_applied() {
        let calendar = CompanyCalendar::create(
            8.0,
            vec![Holiday::new(d(2025, 1, 8), HolidayType::Company)],
        )
        .unwrap();
        let assignee = ProjectAssignee::create("U001", 0.5, 0.0).unwrap();
        let period =
            BusinessDayPeriod::expand(&calendar, &assignee, &[], d(2025, 1, 6), d(2025, 1, 10))
                .unwrap();

        // 周一〜周五减去休日周三 = 4 天, 每天 8h × 0.5
        assert_eq!(period.len(), 4);
        assert_eq!(period.total_available_hours(), 16.0);
        assert!(period.daily_available(d(2025, 1, 8)).is_none());
    }

    #[test]
    fn test_schedule_exception_reduces_weight() {
        let calendar = calendar_without_holidays();
        let assignee = ProjectAssignee::create("U001", 1.0, 0.0).unwrap();
        let schedules = vec![
            UserScheduleEntry::create("U001", d(2025, 1, 6), 2.0, Some("定例会")).unwrap(),
            // 别人的日程不生效
            UserScheduleEntry::create("U002", d(2025, 1, 7), 8.0, None).unwrap(),
        ];
        let period = BusinessDayPeriod::expand(
            &calendar,
            &assignee,
            &schedules,
            d(2025, 1, 6),
            d(2025, 1, 7),
        )
        .unwrap();

        assert_eq!(period.daily_available(d(2025, 1, 6)), Some(6.0));
        assert_eq!(period.daily_available(d(2025, 1, 7)), Some(8.0));
    }

    #[test]
    fn test_full_day_block_keeps_business_day() {
        let calendar = calendar_without_holidays();
        let assignee = ProjectAssignee::create("U001", 1.0, 0.0).unwrap();
        // 占用超过标准时长也只会降到 0, 不会为负
        let schedules =
            vec![UserScheduleEntry::create("U001", d(2025, 1, 6), 10.0, None).unwrap()];
        let period = BusinessDayPeriod::expand(
            &calendar,
            &assignee,
            &schedules,
            d(2025, 1, 6),
            d(2025, 1, 6),
        )
        .unwrap();

        // 仍算工作日, 但权重为 0
        assert_eq!(period.len(), 1);
        assert_eq!(period.daily_available(d(2025, 1, 6)), Some(0.0));
        assert_eq!(period.total_available_hours(), 0.0);
    }

    #[test]
    fn test_all_holiday_span_yields_empty() {
        // 周末-only 期间
        let calendar = calendar_without_holidays();
        let assignee = ProjectAssignee::create("U001", 1.0, 0.0).unwrap();
        let period =
            BusinessDayPeriod::expand(&calendar, &assignee, &[], d(2025, 1, 4), d(2025, 1, 5))
                .unwrap();

        assert!(period.is_empty());
        assert_eq!(period.total_available_hours(), 0.0);
    }

    #[test]
    fn test_invalid_period() {
        let calendar = calendar_without_holidays();
        let assignee = ProjectAssignee::create("U001", 1.0, 0.0).unwrap();
        let result =
            BusinessDayPeriod::expand(&calendar, &assignee, &[], d(2025, 1, 10), d(2025, 1, 6));
        assert!(matches!(result, Err(EngineError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_monthly_grouping() {
        // 2025-01-30(周四) 〜 2025-02-04(周二)
        let calendar = calendar_without_holidays();
        let assignee = ProjectAssignee::create("U001", 1.0, 0.0).unwrap();
        let period =
            BusinessDayPeriod::expand(&calendar, &assignee, &[], d(2025, 1, 30), d(2025, 2, 4))
                .unwrap();

        let monthly = period.monthly_available_hours();
        // 1月: 30(周四)31(周五) = 16h; 2月: 3(周一)4(周二) = 16h
        assert_eq!(monthly.get("2025/01"), Some(&16.0));
        assert_eq!(monthly.get("2025/02"), Some(&16.0));
    }
}
