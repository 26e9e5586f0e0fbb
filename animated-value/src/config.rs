//! # Config 模块
//!
//! 动画值的构造配置。
//!
//! ## 配置来源
//!
//! 1. 代码中通过 `with_*` 方法构建
//! 2. JSON 文档（`from_json_str`），缺省字段使用默认值

use serde::{Deserialize, Serialize};

use crate::domain::Degrees;
use crate::easing::EasingFunction;
use crate::error::AnimResult;
use crate::scalar::Scalar;

/// 数值配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Scalar"))]
pub struct ValueConfig<T> {
    /// 可选的标识字符串
    #[serde(default)]
    pub id: Option<String>,

    /// 启用标记（不直接影响行为）
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// 是否忽略 `min` / `max`
    #[serde(default)]
    pub ignore_bounds: bool,

    /// 是否锁定 `target`
    #[serde(default)]
    pub locked: bool,

    /// 初始值（构造时直接应用，不产生动画）
    #[serde(default = "default_initial")]
    pub initial: T,

    /// 最小值，缺省为负无穷
    #[serde(default = "default_min")]
    pub min: T,

    /// 最大值，缺省为正无穷
    #[serde(default = "default_max")]
    pub max: T,

    /// `min` 是否为开区间
    #[serde(default)]
    pub exclusive_min: bool,

    /// `max` 是否为开区间
    #[serde(default)]
    pub exclusive_max: bool,

    /// 开区间偏移量，缺省为数值类型的机器精度
    #[serde(default = "default_precision")]
    pub exclusive_precision: T,

    /// 从 `current` 过渡到 `target` 的时长（毫秒）
    #[serde(default = "default_animation_time")]
    pub animation_time: f64,

    /// 缓动函数
    #[serde(default)]
    pub easing: EasingFunction,
}

fn default_enabled() -> bool {
    true
}

fn default_initial<T: Scalar>() -> T {
    T::ZERO
}

fn default_min<T: Scalar>() -> T {
    T::NEG_INFINITY
}

fn default_max<T: Scalar>() -> T {
    T::INFINITY
}

fn default_precision<T: Scalar>() -> T {
    T::EPSILON
}

/// 默认动画时长（毫秒）
pub const DEFAULT_ANIMATION_TIME: f64 = 300.0;

fn default_animation_time() -> f64 {
    DEFAULT_ANIMATION_TIME
}

impl<T: Scalar> Default for ValueConfig<T> {
    fn default() -> Self {
        Self {
            id: None,
            enabled: default_enabled(),
            ignore_bounds: false,
            locked: false,
            initial: default_initial(),
            min: default_min(),
            max: default_max(),
            exclusive_min: false,
            exclusive_max: false,
            exclusive_precision: default_precision(),
            animation_time: default_animation_time(),
            easing: EasingFunction::default(),
        }
    }
}

impl<T: Scalar> ValueConfig<T> {
    /// 使用默认值创建配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 文档解析配置
    pub fn from_json_str(json: &str) -> AnimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 设置初始值
    pub fn with_initial(mut self, initial: T) -> Self {
        self.initial = initial;
        self
    }

    /// 设置边界
    pub fn with_bounds(mut self, min: T, max: T) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// 设置开区间
    pub fn with_exclusive(mut self, exclusive_min: bool, exclusive_max: bool) -> Self {
        self.exclusive_min = exclusive_min;
        self.exclusive_max = exclusive_max;
        self
    }

    /// 设置开区间偏移量
    pub fn with_exclusive_precision(mut self, precision: T) -> Self {
        self.exclusive_precision = precision;
        self
    }

    /// 设置动画时长（毫秒）
    pub fn with_animation_time(mut self, ms: f64) -> Self {
        self.animation_time = ms;
        self
    }

    /// 设置缓动函数
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// 设置锁定状态
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// 设置是否忽略边界
    pub fn with_ignore_bounds(mut self, ignore_bounds: bool) -> Self {
        self.ignore_bounds = ignore_bounds;
        self
    }

    /// 设置启用标记
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// 设置标识
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// 角度配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Scalar"))]
pub struct AngleConfig<T> {
    /// 通用数值配置
    #[serde(flatten)]
    pub value: ValueConfig<T>,

    /// 角度值域参数（`wrap` / `short_rotation`）
    #[serde(flatten)]
    pub degrees: Degrees,
}

impl<T: Scalar> Default for AngleConfig<T> {
    fn default() -> Self {
        Self {
            value: ValueConfig::default(),
            degrees: Degrees::default(),
        }
    }
}

impl<T: Scalar> AngleConfig<T> {
    /// 使用默认值创建配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 文档解析配置
    pub fn from_json_str(json: &str) -> AnimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 替换通用数值配置
    pub fn with_value(mut self, value: ValueConfig<T>) -> Self {
        self.value = value;
        self
    }

    /// 设置是否环绕到 0-360°
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.degrees.wrap = wrap;
        self
    }

    /// 设置是否使用最短路径旋转
    pub fn with_short_rotation(mut self, short_rotation: bool) -> Self {
        self.degrees.short_rotation = short_rotation;
        self
    }
}
