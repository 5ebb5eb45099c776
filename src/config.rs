// ==========================================
// 项目管理工具 - 引擎配置
// ==========================================
// 职责: 分摊/挣值引擎的可调参数 (加载、校验、默认值)
// 存储: JSON 文件 (持久化配置表由外部协作方负责)
// ==========================================

use crate::domain::types::ProgressMethod;
use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ==========================================
// EngineConfig - 引擎配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 报告粒度 (小时), 分摊取整单位
    pub quantize_unit: f64,
    /// 每日标准工作时长 (小时)
    pub standard_working_hours: f64,
    /// 默认进度测定方式
    pub default_progress_method: ProgressMethod,
    /// 健康判定阈值 (CPI/SPI 双指标)
    pub healthy_threshold: f64,
    /// 预警判定阈值
    pub warning_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quantize_unit: 0.25,
            standard_working_hours: 8.0,
            default_progress_method: ProgressMethod::SelfReported,
            healthy_threshold: 1.0,
            warning_threshold: 0.9,
        }
    }
}

impl EngineConfig {
    /// 从 JSON 文件加载配置 (缺失字段使用默认值)
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            EngineError::InternalError(format!(
                "配置文件读取失败: {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config: EngineConfig = serde_json::from_str(&content).map_err(|e| {
            EngineError::FieldValueError {
                field: "engine_config".to_string(),
                message: format!("配置解析失败: {}", e),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 配置校验
    ///
    /// 规则: 取整单位 > 0, 标准工作时长 > 0,
    ///       0 < 预警阈值 <= 健康阈值
    pub fn validate(&self) -> EngineResult<()> {
        if self.quantize_unit <= 0.0 {
            return Err(EngineError::InvalidUnit {
                unit: self.quantize_unit,
            });
        }
        if self.standard_working_hours <= 0.0 {
            return Err(EngineError::InvalidWorkingHours {
                hours: self.standard_working_hours,
            });
        }
        if self.warning_threshold <= 0.0 || self.warning_threshold > self.healthy_threshold {
            return Err(EngineError::FieldValueError {
                field: "warning_threshold".to_string(),
                message: format!(
                    "预警阈值必须满足 0 < warning({}) <= healthy({})",
                    self.warning_threshold, self.healthy_threshold
                ),
            });
        }
        Ok(())
    }
}
