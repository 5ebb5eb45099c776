// ==========================================
// WBS 阶段工时分析集成测试
// ==========================================
// 测试目标: 验证阶段系数/占比计算与范围过滤编排
// 覆盖范围: 基准系数、自定义基准集合、零分母哨兵、
//           标签空集短路 (不触发工时查询)
// ==========================================

use project_evm_engine::analytics::{
    AnalyticsError, AnalyticsResult, PhaseCoefficientService, PhaseHoursRepository,
    PhaseHoursSummary, PhaseProportionService, WbsAnalyticsHandler, WbsScopeFilter,
    WbsTagRepository,
};
use std::cell::{Cell, RefCell};
use std::sync::Arc;

// ==========================================
// 测试辅助函数
// ==========================================

fn phase(template_id: &str, code: &str, hours: f64) -> PhaseHoursSummary {
    PhaseHoursSummary {
        template_id: template_id.to_string(),
        phase_name: format!("{}阶段", code),
        phase_code: code.to_string(),
        total_hours: hours,
    }
}

/// 标准六阶段样本 (合计 1650h)
fn sample_phases() -> Vec<PhaseHoursSummary> {
    vec![
        phase("P-PM", "PM", 150.0),
        phase("P-RD", "RD", 120.0),
        phase("P-BD", "BD", 200.0),
        phase("P-DD", "DD", 300.0),
        phase("P-IM", "IM", 600.0),
        phase("P-TE", "TE", 280.0),
    ]
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "实际值 {} != 期望值 {}",
        actual,
        expected
    );
}

// ==========================================
// 阶段系数
// ==========================================

#[test]
fn test_coefficients_relative_to_base() {
    let service = PhaseCoefficientService::new();
    let result = service
        .calculate_coefficients(&sample_phases(), "P-BD")
        .unwrap();

    assert_eq!(result.len(), 6);
    // 输入顺序保持
    let bd = &result[2];
    assert!(bd.is_base);
    assert_close(bd.coefficient, 1.0);

    assert_close(result[0].coefficient, 0.75); // PM 150/200
    assert_close(result[4].coefficient, 3.0); // IM 600/200
    assert_close(result[5].coefficient, 1.4); // TE 280/200
    assert!(!result[0].is_base);
}

#[test]
fn test_coefficient_base_not_found() {
    let service = PhaseCoefficientService::new();
    let result = service.calculate_coefficients(&sample_phases(), "P-XX");
    assert!(matches!(result, Err(AnalyticsError::NotFound(_))));
}

#[test]
fn test_coefficient_zero_base_hours() {
    // 基准阶段工时为 0: 基准自身仍为 1.0, 其余按 0 计
    let service = PhaseCoefficientService::new();
    let phases = vec![phase("P-A", "A", 0.0), phase("P-B", "B", 100.0)];
    let result = service.calculate_coefficients(&phases, "P-A").unwrap();

    assert_close(result[0].coefficient, 1.0);
    assert!(result[0].is_base);
    assert_close(result[1].coefficient, 0.0);
}

// ==========================================
// 阶段占比
// ==========================================

#[test]
fn test_proportions_over_grand_total() {
    let service = PhaseProportionService::new();
    let result = service.calculate_proportions(&sample_phases(), None);

    assert_close(result[0].proportion, 150.0 / 1650.0);
    assert_close(result[4].proportion, 600.0 / 1650.0);
    assert_close(result.iter().map(|p| p.proportion).sum::<f64>(), 1.0);
    // 未指定自定义集合时恒为 None
    assert!(result.iter().all(|p| p.custom_proportion.is_none()));
}

#[test]
fn test_proportions_with_custom_base_set() {
    // 自定义基准集合 {BD, DD, IM, TE}: 合计 1380h
    let service = PhaseProportionService::new();
    let custom: Vec<String> = ["P-BD", "P-DD", "P-IM", "P-TE"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let result = service.calculate_proportions(&sample_phases(), Some(&custom));

    // 集合外的阶段同样按集合合计计算占比
    assert_close(result[0].custom_proportion.unwrap(), 150.0 / 1380.0);
    assert_close(result[4].custom_proportion.unwrap(), 600.0 / 1380.0);
}

#[test]
fn test_proportions_zero_denominators() {
    let service = PhaseProportionService::new();
    let phases = vec![phase("P-A", "A", 0.0), phase("P-B", "B", 0.0)];

    // 全体合计 0 → 占比一律 0
    let result = service.calculate_proportions(&phases, None);
    assert_close(result[0].proportion, 0.0);
    assert_close(result[1].proportion, 0.0);

    // 自定义集合合计 0 → 一律 None
    let custom = vec!["P-A".to_string()];
    let result = service.calculate_proportions(&phases, Some(&custom));
    assert!(result.iter().all(|p| p.custom_proportion.is_none()));
}

// ==========================================
// 范围过滤编排
// ==========================================

struct MockTagRepo;

impl WbsTagRepository for MockTagRepo {
    fn wbs_ids_for_tag(&self, tag: &str) -> AnalyticsResult<Vec<String>> {
        match tag {
            "team-a" => Ok(vec!["W001".to_string(), "W002".to_string()]),
            _ => Ok(Vec::new()),
        }
    }
}

/// 记录调用的工时仓储 mock
struct RecordingHoursRepo {
    calls: Cell<u32>,
    last_scope: RefCell<Option<Option<Vec<String>>>>,
}

impl RecordingHoursRepo {
    fn new() -> Self {
        Self {
            calls: Cell::new(0),
            last_scope: RefCell::new(None),
        }
    }
}

impl PhaseHoursRepository for RecordingHoursRepo {
    fn phase_hours(&self, wbs_ids: Option<&[String]>) -> AnalyticsResult<Vec<PhaseHoursSummary>> {
        self.calls.set(self.calls.get() + 1);
        *self.last_scope.borrow_mut() = Some(wbs_ids.map(|ids| ids.to_vec()));
        Ok(sample_phases())
    }
}

fn build_handler() -> (WbsAnalyticsHandler, Arc<RecordingHoursRepo>) {
    let hours_repo = Arc::new(RecordingHoursRepo::new());
    let handler = WbsAnalyticsHandler::new(Arc::new(MockTagRepo), hours_repo.clone());
    (handler, hours_repo)
}

#[test]
fn test_tag_scope_resolved_and_passed_through() {
    let (handler, hours_repo) = build_handler();
    let result = handler
        .phase_coefficients(&WbsScopeFilter::Tag("team-a".to_string()), "P-BD")
        .unwrap();

    assert_eq!(result.len(), 6);
    assert_eq!(hours_repo.calls.get(), 1);
    assert_eq!(
        hours_repo.last_scope.borrow().clone().unwrap(),
        Some(vec!["W001".to_string(), "W002".to_string()])
    );
}

#[test]
fn test_empty_tag_short_circuits_without_query() {
    let (handler, hours_repo) = build_handler();
    let result = handler
        .phase_coefficients(&WbsScopeFilter::Tag("no-such-tag".to_string()), "P-BD")
        .unwrap();

    assert!(result.is_empty());
    // 空集短路: 工时仓储不得被查询
    assert_eq!(hours_repo.calls.get(), 0);
}

#[test]
fn test_empty_explicit_ids_short_circuit() {
    let (handler, hours_repo) = build_handler();
    let result = handler
        .phase_proportions(&WbsScopeFilter::Ids(Vec::new()), None)
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(hours_repo.calls.get(), 0);
}

#[test]
fn test_all_scope_queries_unfiltered() {
    let (handler, hours_repo) = build_handler();
    let result = handler
        .phase_proportions(&WbsScopeFilter::All, None)
        .unwrap();

    assert_eq!(result.len(), 6);
    assert_eq!(hours_repo.calls.get(), 1);
    // All → 仓储收到 None (不过滤)
    assert_eq!(hours_repo.last_scope.borrow().clone().unwrap(), None);
}
