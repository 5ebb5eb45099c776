// ==========================================
// 项目管理工具 - 工作日历领域模型
// ==========================================
// 职责: 公司日历 / 担当者 / 个人日程例外的定义
// 红线: 日历只回答"某日是否工作日/当日容量多少",
//       期间展开由引擎层 BusinessDayPeriod 负责
// ==========================================

use crate::domain::types::HolidayType;
use crate::error::{EngineError, EngineResult};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Holiday - 休日记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holiday {
    /// 休日日期
    pub date: NaiveDate,
    /// 休日类型
    pub holiday_type: HolidayType,
    /// 休日名称 (可缺失)
    pub name: Option<String>,
}

impl Holiday {
    pub fn new(date: NaiveDate, holiday_type: HolidayType) -> Self {
        Self {
            date,
            holiday_type,
            name: None,
        }
    }

    pub fn named(date: NaiveDate, holiday_type: HolidayType, name: &str) -> Self {
        Self {
            date,
            holiday_type,
            name: Some(name.to_string()),
        }
    }
}

// ==========================================
// CompanyCalendar - 公司日历
// ==========================================
// 不变式: 标准工作时长 > 0, 休日日期唯一
// 用途: 工作日判定与当日标准容量查询
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyCalendar {
    standard_working_hours: f64,
    holidays: BTreeMap<NaiveDate, HolidayType>,
}

impl CompanyCalendar {
    /// 创建公司日历 (构造期校验不变式)
    ///
    /// # 参数
    /// - `standard_working_hours`: 每日标准工作时长 (小时)
    /// - `holidays`: 休日列表
    ///
    /// # 返回
    /// - Ok(CompanyCalendar)
    /// - Err(EngineError::InvalidWorkingHours): 时长 <= 0
    /// - Err(EngineError::DuplicateHoliday): 休日日期重复
    pub fn create(standard_working_hours: f64, holidays: Vec<Holiday>) -> EngineResult<Self> {
        if standard_working_hours <= 0.0 {
            return Err(EngineError::InvalidWorkingHours {
                hours: standard_working_hours,
            });
        }

        let mut map = BTreeMap::new();
        for holiday in holidays {
            if map.insert(holiday.date, holiday.holiday_type).is_some() {
                return Err(EngineError::DuplicateHoliday { date: holiday.date });
            }
        }

        Ok(Self {
            standard_working_hours,
            holidays: map,
        })
    }

    /// 每日标准工作时长
    pub fn standard_working_hours(&self) -> f64 {
        self.standard_working_hours
    }

    /// 是否登记为休日
    pub fn holiday_type(&self, date: NaiveDate) -> Option<HolidayType> {
        self.holidays.get(&date).copied()
    }

    /// 是否工作日 (非周末且非休日)
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
            && !self.holidays.contains_key(&date)
    }

    /// 登记的休日数量
    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }
}

// ==========================================
// ProjectAssignee - 项目担当者
// ==========================================
// 不变式: 参与率 > 0 (有效分配), 单价 >= 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectAssignee {
    assignee_id: String,
    allocation_rate: f64,
    cost_per_hour: f64,
}

impl ProjectAssignee {
    /// 创建项目担当者 (构造期校验不变式)
    ///
    /// # 参数
    /// - `assignee_id`: 担当者 ID
    /// - `allocation_rate`: 参与率 (一个工作日投入本项目的比例, 允许 > 1)
    /// - `cost_per_hour`: 每小时单价
    pub fn create(assignee_id: &str, allocation_rate: f64, cost_per_hour: f64) -> EngineResult<Self> {
        if allocation_rate <= 0.0 {
            return Err(EngineError::InvalidRate {
                assignee_id: assignee_id.to_string(),
                rate: allocation_rate,
            });
        }
        if cost_per_hour < 0.0 {
            return Err(EngineError::FieldValueError {
                field: "cost_per_hour".to_string(),
                message: format!("单价不得为负数: {}", cost_per_hour),
            });
        }

        Ok(Self {
            assignee_id: assignee_id.to_string(),
            allocation_rate,
            cost_per_hour,
        })
    }

    pub fn assignee_id(&self) -> &str {
        &self.assignee_id
    }

    pub fn allocation_rate(&self) -> f64 {
        self.allocation_rate
    }

    pub fn cost_per_hour(&self) -> f64 {
        self.cost_per_hour
    }
}

// ==========================================
// UserScheduleEntry - 个人日程例外
// ==========================================
// 语义: 特定日期上的时间块, 扣减该日可用工时
//       (部分扣减或整日占用; 占满仍算工作日, 权重为 0)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserScheduleEntry {
    /// 担当者 ID
    pub assignee_id: String,
    /// 发生日期
    pub date: NaiveDate,
    /// 占用工时 (小时)
    pub blocked_hours: f64,
    /// 日程标题 (可缺失)
    pub title: Option<String>,
}

impl UserScheduleEntry {
    /// 创建日程例外 (构造期校验占用工时非负)
    pub fn create(
        assignee_id: &str,
        date: NaiveDate,
        blocked_hours: f64,
        title: Option<&str>,
    ) -> EngineResult<Self> {
        if blocked_hours < 0.0 {
            return Err(EngineError::FieldValueError {
                field: "blocked_hours".to_string(),
                message: format!("占用工时不得为负数: {}", blocked_hours),
            });
        }

        Ok(Self {
            assignee_id: assignee_id.to_string(),
            date,
            blocked_hours,
            title: title.map(|t| t.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_calendar_business_day() {
        let calendar = CompanyCalendar::create(
            8.0,
            vec![Holiday::named(d(2025, 1, 1), HolidayType::National, "元旦")],
        )
        .unwrap();

        // 2025-01-01 是周三但为法定节假日
        assert!(!calendar.is_business_day(d(2025, 1, 1)));
        // 2025-01-02 周四
        assert!(calendar.is_business_day(d(2025, 1, 2)));
        // 2025-01-04 周六
        assert!(!calendar.is_business_day(d(2025, 1, 4)));
        // 2025-01-05 周日
        assert!(!calendar.is_business_day(d(2025, 1, 5)));

        assert_eq!(calendar.holiday_type(d(2025, 1, 1)), Some(HolidayType::National));
        assert_eq!(calendar.holiday_count(), 1);
    }

    #[test]
    fn test_calendar_construction_validation() {
        // 标准工作时长必须 > 0
        let result = CompanyCalendar::create(0.0, vec![]);
        assert!(matches!(
            result,
            Err(EngineError::InvalidWorkingHours { .. })
        ));

        // 休日日期不得重复
        let result = CompanyCalendar::create(
            8.0,
            vec![
                Holiday::new(d(2025, 5, 1), HolidayType::National),
                Holiday::new(d(2025, 5, 1), HolidayType::Company),
            ],
        );
        assert!(matches!(result, Err(EngineError::DuplicateHoliday { .. })));
    }

    #[test]
    fn test_assignee_validation() {
        let assignee = ProjectAssignee::create("U001", 0.8, 5000.0).unwrap();
        assert_eq!(assignee.allocation_rate(), 0.8);
        assert_eq!(assignee.cost_per_hour(), 5000.0);

        // 参与率必须 > 0
        assert!(matches!(
            ProjectAssignee::create("U001", 0.0, 5000.0),
            Err(EngineError::InvalidRate { .. })
        ));

        // 单价不得为负
        assert!(matches!(
            ProjectAssignee::create("U001", 1.0, -1.0),
            Err(EngineError::FieldValueError { .. })
        ));
    }

    #[test]
    fn test_schedule_entry_validation() {
        let entry = UserScheduleEntry::create("U001", d(2025, 1, 6), 2.0, Some("定例会")).unwrap();
        assert_eq!(entry.blocked_hours, 2.0);

        assert!(matches!(
            UserScheduleEntry::create("U001", d(2025, 1, 6), -1.0, None),
            Err(EngineError::FieldValueError { .. })
        ));
    }
}
