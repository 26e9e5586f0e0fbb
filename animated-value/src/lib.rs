//! # Animated Value
//!
//! 带边界的可动画数值。
//!
//! ## 概述
//!
//! 每个值持有一个 `target`（期望值）和一个 `current`（当前显示值）。
//! 写入 `target` 后，调用方按帧推进时间，`current` 按缓动函数逐步逼近 `target`：
//!
//! ```text
//! set_target(v) ──► clamp(min, max) ──► target
//!                                         │
//!          advance(delta_ms) / update()   ▼
//!                            current ───► target
//! ```
//!
//! 值可以被锁定、整体偏移、保存后恢复，所有修改都会同步通知订阅者。
//! [`AngleValue`] 在此基础上增加 0-360° 环绕与最短路径旋转。
//!
//! ## 使用示例
//!
//! ```ignore
//! use animated_value::{AnimatedValue, EasingFunction, ValueConfig};
//!
//! let mut opacity = AnimatedValue::new(
//!     ValueConfig::new()
//!         .with_bounds(0.0, 1.0)
//!         .with_animation_time(200.0)
//!         .with_easing(EasingFunction::EaseOutCubic),
//! )?;
//!
//! opacity.set_target(1.0)?;
//! while opacity.advance(16.0)? {
//!     draw(opacity.current());
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`value`]：动画值本体
//! - [`angle`]：角度值
//! - [`bounds`]：边界与钳制
//! - [`domain`]：值域变换（普通数轴 / 角度）
//! - [`easing`]：缓动函数
//! - [`clock`]：时钟
//! - [`event`]：变更通知
//! - [`config`]：构造配置
//! - [`error`]：错误类型定义

pub mod angle;
pub mod bounds;
pub mod clock;
pub mod config;
pub mod domain;
pub mod easing;
pub mod error;
pub mod event;
pub mod scalar;
pub mod value;

// 重导出核心类型
pub use angle::AngleValue;
pub use bounds::Bounds;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AngleConfig, DEFAULT_ANIMATION_TIME, ValueConfig};
pub use domain::{Degrees, Domain, Linear, short_rotation_start, wrap_to_360};
pub use easing::{Easing, EasingFunction};
pub use error::{AnimError, AnimResult};
pub use event::{Emitter, Event, EventKind, Listener, ListenerId, Property, PropertyValue, Topic};
pub use scalar::Scalar;
pub use value::AnimatedValue;
