// ==========================================
// 项目管理工具 - 分摊取整引擎
// ==========================================
// 职责: 对"期间键 → 工时"映射做保和取整
// 算法: 最大余数法 (Hamilton 分配)
// 红线: 取整后合计 == round(原始合计/unit) × unit, 严格保和
// ==========================================

use crate::error::{EngineError, EngineResult};
use std::collections::BTreeMap;
use tracing::instrument;

/// 浮点噪声容差 (如 0.1+0.2 之类的二进制误差)
const FLOAT_EPSILON: f64 = 1e-9;

// ==========================================
// AllocationQuantizer - 分摊取整引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct AllocationQuantizer {
    unit: f64,
}

impl AllocationQuantizer {
    /// 报告粒度默认值: 15 分钟
    pub const DEFAULT_UNIT: f64 = 0.25;

    /// 构造函数 (构造期校验单位)
    ///
    /// # 参数
    /// - `unit`: 取整单位 (小时), 必须 > 0
    ///
    /// # 返回
    /// - Ok(AllocationQuantizer)
    /// - Err(EngineError::InvalidUnit): unit <= 0
    pub fn new(unit: f64) -> EngineResult<Self> {
        if unit <= 0.0 {
            return Err(EngineError::InvalidUnit { unit });
        }
        Ok(Self { unit })
    }

    /// 按默认粒度 (0.25h) 构造
    pub fn with_default_unit() -> Self {
        Self {
            unit: Self::DEFAULT_UNIT,
        }
    }

    pub fn unit(&self) -> f64 {
        self.unit
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 保和取整
    ///
    /// 步骤 (最大余数法):
    /// 1) 各键 floor_units = floor(raw/unit), 余数 = raw/unit - floor_units
    /// 2) target_units = round(合计raw/unit)
    /// 3) deficit = target_units - Σ floor_units
    /// 4) 按余数降序排序, 余数相同按键升序 (月份键即时间序)
    /// 5) 前 deficit 个键各加 1 个单位;
    ///    deficit 为负时从余数最小的键各减 1 个单位 (对称处理)
    ///
    /// # 参数
    /// - `raw`: 期间键 → 原始工时 (允许浮点噪声)
    ///
    /// # 返回
    /// 同键集合的取整结果; 空输入返回空映射
    #[instrument(skip(self, raw), fields(unit = self.unit, keys = raw.len()))]
    pub fn quantize(&self, raw: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
        if raw.is_empty() {
            return BTreeMap::new();
        }

        // 1. 逐键取整并记录余数 (BTreeMap 迭代即键升序)
        let mut entries: Vec<(String, i64, f64)> = Vec::with_capacity(raw.len());
        let mut total_raw = 0.0;
        for (key, value) in raw {
            let units = value / self.unit;
            let floor_units = (units + FLOAT_EPSILON).floor() as i64;
            let remainder = (units - floor_units as f64).max(0.0);
            entries.push((key.clone(), floor_units, remainder));
            total_raw += value;
        }

        // 2. 目标单位数与差额
        let target_units = (total_raw / self.unit).round() as i64;
        let floor_sum: i64 = entries.iter().map(|(_, f, _)| f).sum();
        let deficit = target_units - floor_sum;

        // 3. 差额分配
        if deficit > 0 {
            // 余数降序, 同余数按键升序
            entries.sort_by(|a, b| {
                b.2.partial_cmp(&a.2)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.0.cmp(&b.0))
            });
            for entry in entries.iter_mut().take(deficit as usize) {
                entry.1 += 1;
            }
        } else if deficit < 0 {
            // 对称情形: 余数升序, 从最小余数开始扣减
            entries.sort_by(|a, b| {
                a.2.partial_cmp(&b.2)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.0.cmp(&b.0))
            });
            let mut to_remove = (-deficit) as usize;
            for entry in entries.iter_mut() {
                if to_remove == 0 {
                    break;
                }
                if entry.1 > 0 {
                    entry.1 -= 1;
                    to_remove -= 1;
                }
            }
        }

        // 4. 回写结果
        entries
            .into_iter()
            .map(|(key, units, _)| (key, units as f64 * self.unit))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn test_invalid_unit() {
        assert!(matches!(
            AllocationQuantizer::new(0.0),
            Err(EngineError::InvalidUnit { .. })
        ));
        assert!(matches!(
            AllocationQuantizer::new(-0.25),
            Err(EngineError::InvalidUnit { .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        let quantizer = AllocationQuantizer::with_default_unit();
        assert!(quantizer.quantize(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_exact_multiples_unchanged() {
        let quantizer = AllocationQuantizer::with_default_unit();
        let input = map(&[("2025/01", 1.25), ("2025/02", 2.5), ("2025/03", 0.75)]);
        let output = quantizer.quantize(&input);
        assert_eq!(output, input);
    }

    #[test]
    fn test_epsilon_bumped_floors_keep_total() {
        // 贴近单位边界的值会被容差抬升 floor, 合计仍须保和
        let quantizer = AllocationQuantizer::with_default_unit();
        let nearly_one = 1.0 - 2.5e-10;
        let input = map(&[
            ("2025/01", nearly_one),
            ("2025/02", nearly_one),
            ("2025/03", 0.30),
        ]);
        let output = quantizer.quantize(&input);
        let total: f64 = output.values().sum();
        let expected_total =
            ((input.values().sum::<f64>() / 0.25).round()) * 0.25;
        assert!((total - expected_total).abs() < 1e-9);
    }
}
