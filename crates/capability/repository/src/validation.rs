//! 验证辅助函数
//!
//! 创建 / 更新前的输入校验，失败统一返回 `RepositoryError::Validation`：
//! - require_text：文本字段非空（忽略首尾空格）
//! - require_id：引用 ID 为正数
//! - ensure_percent：百分比取值 [0, 100]
//! - ensure_non_negative：非负数值
//! - ensure_finite：有限数值

use crate::error::RepositoryError;

pub fn require_text(value: &str, field: &str) -> Result<(), RepositoryError> {
    if value.trim().is_empty() {
        return Err(RepositoryError::validation(format!("{field} required")));
    }
    Ok(())
}

pub fn require_id(value: i64, field: &str) -> Result<(), RepositoryError> {
    if value <= 0 {
        return Err(RepositoryError::validation(format!(
            "{field} must be a positive integer"
        )));
    }
    Ok(())
}

pub fn ensure_percent(value: f64, field: &str) -> Result<(), RepositoryError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(RepositoryError::validation(format!(
            "{field} must be between 0 and 100"
        )));
    }
    Ok(())
}

pub fn ensure_non_negative(value: f64, field: &str) -> Result<(), RepositoryError> {
    // NaN 不满足 >= 0
    if !(value >= 0.0) || value.is_infinite() {
        return Err(RepositoryError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(())
}

pub fn ensure_finite(value: f64, field: &str) -> Result<(), RepositoryError> {
    if !value.is_finite() {
        return Err(RepositoryError::validation(format!(
            "{field} must be a finite number"
        )));
    }
    Ok(())
}
