//! # Angle 模块
//!
//! 角度值：在 [`AnimatedValue`] 之上增加 0-360° 环绕与最短路径旋转。
//!
//! - `wrap` 开启时，读出的 `current` / `target` 以及写入的 `target` 都环绕到 0-360°
//! - `wrap` 与 `short_rotation` 同时开启时，动画起点会被移动若干个 360°，
//!   使过渡路径不超过 180°

use std::f64::consts::PI;

use crate::config::AngleConfig;
use crate::domain::Degrees;
use crate::error::AnimResult;
use crate::event::{Property, PropertyValue};
use crate::scalar::Scalar;
use crate::value::AnimatedValue;

/// 角度值
pub type AngleValue<T = f64> = AnimatedValue<T, Degrees>;

impl<T: Scalar> AnimatedValue<T, Degrees> {
    /// 按配置创建角度值
    pub fn new_angle(config: AngleConfig<T>) -> AnimResult<Self> {
        Self::with_domain(config.value, config.degrees)
    }

    pub fn wrap(&self) -> bool {
        self.domain().wrap
    }

    /// 开关 0-360° 环绕，只影响之后的读写
    pub fn set_wrap(&mut self, wrap: bool) {
        if wrap == self.domain().wrap {
            return;
        }

        self.domain_mut().wrap = wrap;
        self.notify_change(Property::Wrap, PropertyValue::Flag(wrap));
    }

    pub fn short_rotation(&self) -> bool {
        self.domain().short_rotation
    }

    /// 开关最短路径旋转，从下一次写入 `target` 开始生效
    pub fn set_short_rotation(&mut self, short_rotation: bool) {
        if short_rotation == self.domain().short_rotation {
            return;
        }

        self.domain_mut().short_rotation = short_rotation;
        self.notify_change(Property::ShortRotation, PropertyValue::Flag(short_rotation));
    }

    /// `target` 的弧度值
    pub fn target_radians(&self) -> T {
        to_radians(self.target())
    }

    /// `current` 的弧度值
    pub fn current_radians(&self) -> T {
        to_radians(self.current())
    }
}

fn to_radians<T: Scalar>(degrees: T) -> T {
    T::from_f64(degrees.to_f64() * PI / 180.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::ValueConfig;
    use crate::easing::EasingFunction;

    fn angle(wrap: bool, short_rotation: bool) -> AngleValue {
        AngleValue::new_angle(
            AngleConfig::new()
                .with_value(ValueConfig::new().with_easing(EasingFunction::Linear))
                .with_wrap(wrap)
                .with_short_rotation(short_rotation),
        )
        .unwrap()
        .with_clock(ManualClock::new())
    }

    #[test]
    fn test_default_angle() {
        let value = angle(false, false);
        assert!(!value.wrap());
        assert!(!value.short_rotation());
        assert_eq!(value.target(), 0.0);
    }

    #[test]
    fn test_wrap_target() {
        let mut value = angle(true, false);

        value.set_target(540.0).unwrap();
        assert_eq!(value.target(), 180.0);

        value.set_target(-120.0).unwrap();
        assert_eq!(value.target(), 240.0);

        value.set_target(360.0).unwrap();
        assert_eq!(value.target(), 360.0);
    }

    #[test]
    fn test_no_wrap_keeps_raw_angle() {
        let mut value = angle(false, false);
        value.set_target(540.0).unwrap();
        assert_eq!(value.target(), 540.0);
    }

    #[test]
    fn test_wrapped_equal_target_is_noop() {
        let mut value = angle(true, false);
        value.set_target(90.0).unwrap();
        value.update_immediate();

        // 450 环绕后等于 90
        value.set_target(450.0).unwrap();
        assert!(!value.is_dirty());
        assert_eq!(value.last_target(), Some(0.0));
    }

    #[test]
    fn test_short_rotation_backwards() {
        let mut value = angle(true, true);
        value.set_animation_time(300.0).unwrap();

        value.set_target(350.0).unwrap();
        value.advance(250.0).unwrap();
        // 0 → 350 走 -10°，途中读数略大于 350
        assert!(value.current() > 350.0);

        value.update_immediate();
        value.set_target(10.0).unwrap();
        value.advance(250.0).unwrap();
        // 350 → 10 走 +20°，途中读数小于 10
        assert!(value.current() < 10.0);
    }

    #[test]
    fn test_long_rotation_without_short() {
        let mut value = angle(true, false);
        value.set_target(350.0).unwrap();
        value.advance(150.0).unwrap();
        assert_eq!(value.current(), 175.0);
    }

    #[test]
    fn test_wrap_toggle_emits() {
        let mut value = angle(false, false);
        let seen = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = seen.clone();
        value.subscribe(crate::event::Topic::Change, move |_| counter.set(counter.get() + 1));

        value.set_wrap(true);
        value.set_wrap(true);
        value.set_short_rotation(true);

        assert_eq!(seen.get(), 2);
        assert!(value.wrap());
        assert!(value.short_rotation());
    }

    #[test]
    fn test_stop_mid_short_rotation_settles_wrapped() {
        let mut value = angle(true, true);
        value.apply(350.0).unwrap();

        // 350 → 10 经过 0°，内部起点为 -10
        value.set_target(10.0).unwrap();
        value.advance(75.0).unwrap();
        assert_eq!(value.current(), 355.0);

        assert!(value.stop());
        assert_eq!(value.target(), 355.0);
        assert_eq!(value.current(), 355.0);
        assert!(!value.is_dirty());

        let changes = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = changes.clone();
        value.subscribe(crate::event::Topic::Change, move |_| counter.set(counter.get() + 1));

        value.set_target(355.0).unwrap();
        assert_eq!(changes.get(), 0);
        assert!(!value.advance(10.0).unwrap());
    }

    #[test]
    fn test_radians() {
        let mut value = angle(false, false);
        value.apply(180.0).unwrap();
        assert_eq!(value.target_radians(), PI);
        assert_eq!(value.current_radians(), PI);

        value.set_target(90.0).unwrap();
        assert_eq!(value.target_radians(), PI / 2.0);
        assert_eq!(value.current_radians(), PI);
    }
}
