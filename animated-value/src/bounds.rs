//! # Bounds 模块
//!
//! 边界与钳制规则。
//!
//! ## 不变量
//!
//! - 任何时候 `min <= max`
//! - 新的 `min` 若不小于 `max`，会被替换为 `max`（`exclusive_max` 时再减去 `precision`）
//! - 新的 `max` 若不大于 `min`，会被替换为 `min`（`exclusive_min` 时再加上 `precision`）

use crate::scalar::Scalar;

/// 闭区间边界，带可选的开区间偏移
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub(crate) min: T,
    pub(crate) max: T,
    pub(crate) exclusive_min: bool,
    pub(crate) exclusive_max: bool,
    pub(crate) precision: T,
}

impl<T: Scalar> Default for Bounds<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<T: Scalar> Bounds<T> {
    /// 无边界（`-∞..=+∞`）
    pub fn unbounded() -> Self {
        Self {
            min: T::NEG_INFINITY,
            max: T::INFINITY,
            exclusive_min: false,
            exclusive_max: false,
            precision: T::EPSILON,
        }
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    pub fn exclusive_min(&self) -> bool {
        self.exclusive_min
    }

    pub fn exclusive_max(&self) -> bool {
        self.exclusive_max
    }

    pub fn precision(&self) -> T {
        self.precision
    }

    /// 把 `value` 限制在边界内
    ///
    /// 等于边界的值总是落在边界上（开区间时再偏移 `precision`），
    /// `min == max` 时直接返回 `min`。
    pub fn clamp(&self, value: T) -> T {
        if self.min == self.max {
            return self.min;
        }

        if value <= self.min {
            return if self.exclusive_min {
                self.min + self.precision
            } else {
                self.min
            };
        }

        if value >= self.max {
            return if self.exclusive_max {
                self.max - self.precision
            } else {
                self.max
            };
        }

        value
    }

    /// 按 `min <= max` 规则调整待设置的 `min`
    pub(crate) fn fit_min(&self, min: T) -> T {
        if min >= self.max {
            if self.exclusive_max {
                self.max - self.precision
            } else {
                self.max
            }
        } else {
            min
        }
    }

    /// 按 `min <= max` 规则调整待设置的 `max`
    pub(crate) fn fit_max(&self, max: T) -> T {
        if max <= self.min {
            if self.exclusive_min {
                self.min + self.precision
            } else {
                self.min
            }
        } else {
            max
        }
    }
}
