//! # Domain 模块
//!
//! 值域变换：在读写边界上对数值做的附加处理。
//!
//! - [`Linear`]: 普通数轴，不做任何变换
//! - [`Degrees`]: 角度，支持 0-360° 环绕与最短路径旋转

use serde::{Deserialize, Serialize};

use crate::scalar::Scalar;

/// 值域变换
pub trait Domain<T: Scalar>: std::fmt::Debug {
    /// 规范化读出的值；写入 `target` 时在钳制之后、相等性检查之前同样调用
    fn normalize(&self, value: T) -> T;

    /// 在动画起点确定之后修正起点
    fn align_start(&self, start: T, target: T) -> T;
}

/// 普通数轴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Linear;

impl<T: Scalar> Domain<T> for Linear {
    #[inline]
    fn normalize(&self, value: T) -> T {
        value
    }

    #[inline]
    fn align_start(&self, start: T, _target: T) -> T {
        start
    }
}

/// 角度值域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Degrees {
    /// 读出的 `current` / `target` 是否环绕到 0-360°
    #[serde(default)]
    pub wrap: bool,
    /// `wrap` 开启时，动画路径是否取不超过 180° 的最短方向
    #[serde(default)]
    pub short_rotation: bool,
}

impl Degrees {
    /// 创建角度值域
    pub fn new(wrap: bool, short_rotation: bool) -> Self {
        Self {
            wrap,
            short_rotation,
        }
    }
}

impl<T: Scalar> Domain<T> for Degrees {
    fn normalize(&self, value: T) -> T {
        if self.wrap {
            wrap_to_360(value)
        } else {
            value
        }
    }

    fn align_start(&self, start: T, target: T) -> T {
        if self.wrap && self.short_rotation {
            short_rotation_start(start, target)
        } else {
            start
        }
    }
}

/// 把角度环绕到 0-360°
///
/// 只有严格大于 360 的值才取模，因此 360 本身保持不变；
/// 负值加 360 直到非负。
pub fn wrap_to_360<T: Scalar>(angle: T) -> T {
    let full = T::from_f64(360.0);

    if angle > full {
        return angle % full;
    }

    if angle < T::ZERO {
        let wrapped = angle % full;
        return if wrapped < T::ZERO {
            wrapped + full
        } else {
            wrapped
        };
    }

    angle
}

/// 修正动画起点，使 `|start - target| <= 180`
pub fn short_rotation_start<T: Scalar>(mut start: T, target: T) -> T {
    let half = T::from_f64(180.0);
    let full = T::from_f64(360.0);

    while start - target > half {
        start = start - full;
    }

    while start - target < -half {
        start = start + full;
    }

    start
}
