//! # Easing 模块
//!
//! 缓动函数库，用于动画的时间插值。
//!
//! 所有缓动函数遵循 Penner 约定：`ease(t, b, c, d)`
//! - `t`: 当前时间（或步数）
//! - `b`: 起始值
//! - `c`: 变化量
//! - `d`: 总时长
//!
//! 返回 `t` 时刻的插值结果，`t == d` 时结果为 `b + c`。

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// 缓动函数接口
///
/// 任何 `Fn(f64, f64, f64, f64) -> f64` 闭包都自动实现此 trait，
/// 调用方可以注入自定义曲线。
pub trait Easing {
    /// 计算插值
    fn ease(&self, t: f64, b: f64, c: f64, d: f64) -> f64;
}

impl<F> Easing for F
where
    F: Fn(f64, f64, f64, f64) -> f64,
{
    fn ease(&self, t: f64, b: f64, c: f64, d: f64) -> f64 {
        self(t, b, c, d)
    }
}

/// 内置缓动函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// 线性（匀速）
    Linear,
    /// 二次缓入
    EaseInQuad,
    /// 二次缓出
    #[default]
    EaseOutQuad,
    /// 二次缓入缓出
    EaseInOutQuad,
    /// 三次缓入
    EaseInCubic,
    /// 三次缓出
    EaseOutCubic,
    /// 三次缓入缓出
    EaseInOutCubic,
    /// 四次缓入
    EaseInQuart,
    /// 四次缓出
    EaseOutQuart,
    /// 四次缓入缓出
    EaseInOutQuart,
    /// 五次缓入
    EaseInQuint,
    /// 五次缓出
    EaseOutQuint,
    /// 五次缓入缓出
    EaseInOutQuint,
    /// 正弦缓入
    EaseInSine,
    /// 正弦缓出
    EaseOutSine,
    /// 正弦缓入缓出
    EaseInOutSine,
    /// 指数缓入
    EaseInExpo,
    /// 指数缓出
    EaseOutExpo,
    /// 指数缓入缓出
    EaseInOutExpo,
    /// 圆形缓入
    EaseInCirc,
    /// 圆形缓出
    EaseOutCirc,
    /// 圆形缓入缓出
    EaseInOutCirc,
}

impl EasingFunction {
    /// 计算归一化进度
    ///
    /// # 参数
    /// - `t`: 时间进度 (0.0 - 1.0)，超出范围会被限制
    ///
    /// # 返回
    /// - 缓动后的进度值（起点 0.0，终点 1.0）
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseInQuad => t * t,
            EasingFunction::EaseOutQuad => -t * (t - 2.0),
            EasingFunction::EaseInOutQuad => in_out(t, |t| t * t),
            EasingFunction::EaseInCubic => t.powi(3),
            EasingFunction::EaseOutCubic => (t - 1.0).powi(3) + 1.0,
            EasingFunction::EaseInOutCubic => in_out(t, |t| t.powi(3)),
            EasingFunction::EaseInQuart => t.powi(4),
            EasingFunction::EaseOutQuart => 1.0 - (t - 1.0).powi(4),
            EasingFunction::EaseInOutQuart => in_out(t, |t| t.powi(4)),
            EasingFunction::EaseInQuint => t.powi(5),
            EasingFunction::EaseOutQuint => (t - 1.0).powi(5) + 1.0,
            EasingFunction::EaseInOutQuint => in_out(t, |t| t.powi(5)),
            EasingFunction::EaseInSine => 1.0 - (t * PI / 2.0).cos(),
            EasingFunction::EaseOutSine => (t * PI / 2.0).sin(),
            EasingFunction::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            EasingFunction::EaseInExpo => ease_in_expo(t),
            EasingFunction::EaseOutExpo => ease_out_expo(t),
            EasingFunction::EaseInOutExpo => in_out(t, ease_in_expo),
            EasingFunction::EaseInCirc => 1.0 - (1.0 - t * t).sqrt(),
            EasingFunction::EaseOutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            EasingFunction::EaseInOutCirc => in_out(t, |t| 1.0 - (1.0 - t * t).sqrt()),
        }
    }
}

impl Easing for EasingFunction {
    fn ease(&self, t: f64, b: f64, c: f64, d: f64) -> f64 {
        if d <= 0.0 {
            return b + c;
        }
        b + c * self.apply(t / d)
    }
}

impl fmt::Display for EasingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// 由缓入曲线构造对称的缓入缓出曲线
fn in_out(t: f64, ease_in: impl Fn(f64) -> f64) -> f64 {
    if t < 0.5 {
        ease_in(t * 2.0) / 2.0
    } else {
        1.0 - ease_in((1.0 - t) * 2.0) / 2.0
    }
}

/// 指数缓入
///
/// 端点精确落在 0 和 1 上。
fn ease_in_expo(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        2.0_f64.powf(10.0 * (t - 1.0))
    }
}

/// 指数缓出
fn ease_out_expo(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}
