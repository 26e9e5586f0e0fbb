//! # Value 模块
//!
//! 带边界的可动画数值。
//!
//! ## 状态
//!
//! ```text
//! raw ──clamp──► target ◄── 每次 update / advance 逼近 ──┐
//!                  │                                      │
//!           last_target                  previous ◄── current
//! ```
//!
//! - 写入 `target` 会记录起点（`current`）与起止时间，之后每次推进时间
//!   都按缓动函数重新计算 `current`
//! - 时间由调用方驱动：`advance(delta_ms)` 推进内部时间游标，
//!   `update()` 读取注入的时钟
//! - `animation_time == 0` 时写入 `target` 会立即完成过渡

use std::fmt;

use tracing::{debug, trace};

use crate::bounds::Bounds;
use crate::clock::{Clock, SystemClock};
use crate::config::ValueConfig;
use crate::domain::{Domain, Linear};
use crate::easing::Easing;
use crate::error::{AnimError, AnimResult};
use crate::event::{Emitter, Event, EventKind, ListenerId, Property, PropertyValue, Topic};
use crate::scalar::{Scalar, ensure_finite, ensure_number};

/// 带边界的可动画数值
///
/// `D` 决定读写边界上的附加变换，普通数值使用 [`Linear`]，
/// 角度使用 [`Degrees`](crate::Degrees)（见 [`AngleValue`](crate::AngleValue)）。
pub struct AnimatedValue<T: Scalar = f64, D: Domain<T> = Linear> {
    id: Option<String>,
    enabled: bool,
    locked: bool,
    ignore_bounds: bool,
    animation_time: f64,
    easing: Box<dyn Easing>,
    bounds: Bounds<T>,
    domain: D,

    raw: T,
    target: T,
    last_target: Option<T>,
    current: T,
    previous: T,
    stored: T,
    updated: bool,

    /// 插值起点
    start: T,
    start_time: f64,
    current_time: f64,
    target_time: f64,

    clock: Box<dyn Clock>,
    emitter: Emitter<T>,
}

impl<T: Scalar, D: Domain<T>> fmt::Debug for AnimatedValue<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatedValue")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("current", &self.current)
            .field("raw", &self.raw)
            .field("bounds", &self.bounds)
            .field("domain", &self.domain)
            .field("locked", &self.locked)
            .field("animation_time", &self.animation_time)
            .field("listeners", &self.emitter.len())
            .finish()
    }
}

impl<T: Scalar> AnimatedValue<T, Linear> {
    /// 按配置创建普通数值
    pub fn new(config: ValueConfig<T>) -> AnimResult<Self> {
        Self::with_domain(config, Linear)
    }
}

impl<T: Scalar, D: Domain<T>> AnimatedValue<T, D> {
    /// 按配置和值域创建
    ///
    /// 初始值经过钳制后直接成为 `target` / `current` / `previous`，不产生动画，
    /// 也不受 `locked` 影响。
    pub fn with_domain(config: ValueConfig<T>, domain: D) -> AnimResult<Self> {
        let ValueConfig {
            id,
            enabled,
            ignore_bounds,
            locked,
            initial,
            min,
            max,
            exclusive_min,
            exclusive_max,
            exclusive_precision,
            animation_time,
            easing,
        } = config;

        ensure_finite("initial", initial)?;
        ensure_min(min)?;
        ensure_max(max)?;
        let precision = ensure_precision(exclusive_precision)?;
        let animation_time = ensure_animation_time(animation_time)?;

        // 先 min 后 max：倒置的一对会让 max 收敛到 min
        let mut bounds = Bounds {
            precision,
            ..Bounds::unbounded()
        };
        bounds.min = bounds.fit_min(min);
        bounds.max = bounds.fit_max(max);
        bounds.exclusive_min = exclusive_min;
        bounds.exclusive_max = exclusive_max;

        let clamped = if ignore_bounds {
            initial
        } else {
            bounds.clamp(initial)
        };
        let target = domain.normalize(clamped);

        let clock: Box<dyn Clock> = Box::new(SystemClock::new());
        let now = clock.now_ms();

        Ok(Self {
            id,
            enabled,
            locked,
            ignore_bounds,
            animation_time,
            easing: Box::new(easing),
            bounds,
            domain,
            raw: initial,
            target,
            last_target: None,
            current: target,
            previous: target,
            stored: T::ZERO,
            updated: false,
            start: target,
            start_time: now,
            current_time: now,
            target_time: now,
            clock,
            emitter: Emitter::new(),
        })
    }

    /// 替换时钟并以新时钟的当前时间为基准
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        let now = clock.now_ms();
        let elapsed = self.current_time - self.start_time;
        let remaining = self.target_time - self.current_time;
        self.start_time = now - elapsed;
        self.current_time = now;
        self.target_time = now + remaining;
        self.clock = Box::new(clock);
        self
    }

    /// 替换缓动函数（可传入任意 `Fn(t, b, c, d) -> f64`）
    pub fn with_easing(mut self, easing: impl Easing + 'static) -> Self {
        self.easing = Box::new(easing);
        self
    }

    // ========== 读取 ==========

    /// 最近一次写入 `target` 的原始值（钳制之前）
    pub fn raw(&self) -> T {
        self.raw
    }

    /// 目标值
    pub fn target(&self) -> T {
        self.domain.normalize(self.target)
    }

    /// 上一次修改之前的目标值，从未修改过时为 `None`
    pub fn last_target(&self) -> Option<T> {
        self.last_target
    }

    /// 当前值，通过 `update` / `advance` / `update_immediate` 更新
    pub fn current(&self) -> T {
        self.domain.normalize(self.current)
    }

    /// 上一次 `update` / `advance` / `update_immediate` 之前的 `current`
    pub fn previous(&self) -> T {
        self.previous
    }

    /// `current != target`
    pub fn is_dirty(&self) -> bool {
        self.current != self.target
    }

    /// 最近一次 `update` / `advance` / `update_immediate` / `stop` 是否改变了状态
    pub fn is_updated(&self) -> bool {
        self.updated
    }

    pub fn min(&self) -> T {
        self.bounds.min
    }

    pub fn max(&self) -> T {
        self.bounds.max
    }

    pub fn exclusive_min(&self) -> bool {
        self.bounds.exclusive_min
    }

    pub fn exclusive_max(&self) -> bool {
        self.bounds.exclusive_max
    }

    pub fn exclusive_precision(&self) -> T {
        self.bounds.precision
    }

    /// 当前边界
    pub fn bounds(&self) -> &Bounds<T> {
        &self.bounds
    }

    /// `store` 保存的值
    pub fn stored(&self) -> T {
        self.stored
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn ignores_bounds(&self) -> bool {
        self.ignore_bounds
    }

    /// 动画时长（毫秒）
    pub fn animation_time(&self) -> f64 {
        self.animation_time
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// 值域
    pub fn domain(&self) -> &D {
        &self.domain
    }

    /// 按当前边界钳制 `value`（不修改状态）
    pub fn clamp(&self, value: T) -> T {
        self.bounds.clamp(value)
    }

    // ========== 写入 ==========

    /// 设置目标值
    ///
    /// - 非有限值返回 `InvalidArgument`
    /// - `locked` 时静默忽略
    /// - 钳制后与当前目标相等时不做任何事
    pub fn set_target(&mut self, target: T) -> AnimResult<()> {
        ensure_finite("target", target)?;
        self.assign_target(target);
        Ok(())
    }

    /// 设置最小值
    ///
    /// 不能超过 `max`，超过时被替换为 `max`（`exclusive_max` 时再减去偏移量）。
    /// 修改后按新边界重新钳制 `raw`。NaN 与正无穷返回 `InvalidArgument`。
    pub fn set_min(&mut self, min: T) -> AnimResult<()> {
        ensure_min(min)?;
        self.assign_min(min);
        Ok(())
    }

    /// 取消最小值限制（负无穷）
    pub fn clear_min(&mut self) {
        self.assign_min(T::NEG_INFINITY);
    }

    fn assign_min(&mut self, min: T) {
        let fitted = self.bounds.fit_min(min);
        if fitted != min {
            debug!(id = ?self.id, requested = ?min, min = ?fitted, max = ?self.bounds.max, "min 超过 max，已收敛");
        }

        if fitted == self.bounds.min {
            return;
        }

        self.bounds.min = fitted;
        self.notify_change(Property::Min, PropertyValue::Number(fitted));
        self.reclamp();
    }

    /// 设置最大值
    ///
    /// 不能小于 `min`，小于时被替换为 `min`（`exclusive_min` 时再加上偏移量）。
    /// 修改后按新边界重新钳制 `raw`。NaN 与负无穷返回 `InvalidArgument`。
    pub fn set_max(&mut self, max: T) -> AnimResult<()> {
        ensure_max(max)?;
        self.assign_max(max);
        Ok(())
    }

    /// 取消最大值限制（正无穷）
    pub fn clear_max(&mut self) {
        self.assign_max(T::INFINITY);
    }

    fn assign_max(&mut self, max: T) {
        let fitted = self.bounds.fit_max(max);
        if fitted != max {
            debug!(id = ?self.id, requested = ?max, max = ?fitted, min = ?self.bounds.min, "max 小于 min，已收敛");
        }

        if fitted == self.bounds.max {
            return;
        }

        self.bounds.max = fitted;
        self.notify_change(Property::Max, PropertyValue::Number(fitted));
        self.reclamp();
    }

    pub fn set_exclusive_min(&mut self, exclusive_min: bool) {
        if exclusive_min == self.bounds.exclusive_min {
            return;
        }

        self.bounds.exclusive_min = exclusive_min;
        self.notify_change(Property::ExclusiveMin, PropertyValue::Flag(exclusive_min));
        self.reclamp();
    }

    pub fn set_exclusive_max(&mut self, exclusive_max: bool) {
        if exclusive_max == self.bounds.exclusive_max {
            return;
        }

        self.bounds.exclusive_max = exclusive_max;
        self.notify_change(Property::ExclusiveMax, PropertyValue::Flag(exclusive_max));
        self.reclamp();
    }

    /// 设置开区间偏移量，只影响之后的钳制
    pub fn set_exclusive_precision(&mut self, precision: T) -> AnimResult<()> {
        let precision = ensure_precision(precision)?;

        if precision == self.bounds.precision {
            return Ok(());
        }

        self.bounds.precision = precision;
        self.notify_change(
            Property::ExclusivePrecision,
            PropertyValue::Number(precision),
        );
        Ok(())
    }

    /// 锁定后写入 `target` 会被静默忽略
    pub fn set_locked(&mut self, locked: bool) {
        if locked == self.locked {
            return;
        }

        self.locked = locked;
        self.notify_change(Property::Locked, PropertyValue::Flag(locked));
    }

    /// 启用标记（不直接影响行为）
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }

        self.enabled = enabled;
        self.notify_change(Property::Enabled, PropertyValue::Flag(enabled));
    }

    /// 忽略边界后，写入的值直接成为 `target`
    pub fn set_ignore_bounds(&mut self, ignore_bounds: bool) {
        if ignore_bounds == self.ignore_bounds {
            return;
        }

        self.ignore_bounds = ignore_bounds;
        self.notify_change(Property::IgnoreBounds, PropertyValue::Flag(ignore_bounds));
    }

    /// 设置动画时长（毫秒）
    ///
    /// 负值取绝对值。不影响正在进行的动画；设为 0 且 `dirty` 时立即完成。
    pub fn set_animation_time(&mut self, ms: f64) -> AnimResult<()> {
        let ms = ensure_animation_time(ms)?;

        if ms != self.animation_time {
            self.animation_time = ms;
            self.notify_change(Property::AnimationTime, PropertyValue::Millis(ms));
        }

        if self.animation_time == 0.0 && self.is_dirty() {
            self.update_immediate();
        }

        Ok(())
    }

    /// 替换缓动函数，从下一次推进开始生效
    pub fn set_easing(&mut self, easing: impl Easing + 'static) {
        self.easing = Box::new(easing);
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = Some(id.into());
        if id == self.id {
            return;
        }

        self.id = id;
        self.notify_change(Property::Id, PropertyValue::Text(self.id.clone()));
    }

    // ========== 推进 ==========

    /// 按经过的时间（毫秒）推进
    ///
    /// # 返回
    /// - `Ok(true)`: `current` 已更新
    /// - `Ok(false)`: 没有需要更新的内容
    /// - `Err(_)`: `delta_ms` 为负数或 NaN
    pub fn advance(&mut self, delta_ms: f64) -> AnimResult<bool> {
        if !delta_ms.is_finite() || delta_ms < 0.0 {
            return Err(AnimError::invalid_argument(
                "delta",
                format!("必须是非负有限数值，实际为 {delta_ms}"),
            ));
        }

        Ok(self.step_to(self.current_time + delta_ms))
    }

    /// 按时钟推进到当前时间
    pub fn update(&mut self) -> bool {
        let now = self.clock.now_ms().max(self.current_time);
        self.step_to(now)
    }

    /// 直接把 `current` 设为 `target`
    pub fn update_immediate(&mut self) -> bool {
        self.updated = self.is_dirty();

        if self.updated {
            self.previous = self.current;
            self.current = self.target;
            self.notify_update();
        }

        self.updated
    }

    /// 停止动画：把 `target` 设为 `current`
    ///
    /// 返回 `target` 是否改变。
    pub fn stop(&mut self) -> bool {
        self.updated = self.is_dirty();

        if self.updated {
            let settled = self.domain.normalize(self.current);
            self.last_target = Some(self.target);
            self.target = settled;
            self.current = settled;
            self.notify_change(Property::Target, PropertyValue::Number(self.target()));
        }

        self.updated
    }

    /// 设置 `target` 并立即完成过渡
    pub fn apply(&mut self, value: T) -> AnimResult<()> {
        self.set_target(value)?;
        self.update_immediate();
        Ok(())
    }

    /// 同时偏移 `target` 与 `current`
    ///
    /// 不重置动画的起点时间，正在进行的动画保持相对进度。
    /// 实际偏移量为钳制后的新目标减去原目标，`current` 与插值起点都按实际偏移量移动。
    pub fn add_offset(&mut self, offset: T) -> AnimResult<()> {
        ensure_finite("offset", offset)?;

        if self.locked || offset == T::ZERO {
            return Ok(());
        }

        let requested = self.target() + offset;
        ensure_finite("offset", requested)?;

        let previous_target = self.target;
        let was_dirty = self.is_dirty();
        self.raw = requested;
        let next = self.fit_target(requested);

        if next == previous_target {
            return Ok(());
        }

        self.last_target = Some(previous_target);
        self.target = next;
        self.notify_change(Property::Target, PropertyValue::Number(self.target()));

        let actual = next - previous_target;
        self.start = self.domain.align_start(self.start + actual, next);
        self.current = if was_dirty {
            self.domain.normalize(self.current + actual)
        } else {
            next
        };
        self.updated = true;
        self.notify_update();

        Ok(())
    }

    /// 保存一个值，`None` 或 NaN 表示保存当前 `target`
    pub fn store(&mut self, value: Option<T>) -> AnimResult<()> {
        self.stored = match value {
            Some(value) if !value.is_nan() => ensure_finite("value", value)?,
            _ => self.target(),
        };
        Ok(())
    }

    /// 把 `target` 设为 `stored`
    ///
    /// `ignore_lock` 为 true 时临时解除锁定，完成后恢复原锁定状态。
    pub fn restore(&mut self, ignore_lock: bool) -> AnimResult<()> {
        let locked = self.locked;

        if ignore_lock {
            self.locked = false;
        }

        let result = self.set_target(self.stored);
        self.locked = locked;
        result
    }

    // ========== 事件 ==========

    /// 订阅事件
    pub fn subscribe(
        &mut self,
        topic: Topic,
        listener: impl FnMut(&mut Event<T>) + 'static,
    ) -> ListenerId {
        self.emitter.subscribe(topic, listener)
    }

    /// 取消订阅
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.emitter.unsubscribe(id)
    }

    /// 已注册的监听者数量
    pub fn listener_count(&self) -> usize {
        self.emitter.len()
    }

    /// 同步分发事件
    ///
    /// 返回 `false` 表示有监听者取消了默认行为。
    pub fn dispatch_event(&mut self, kind: EventKind<T>) -> bool {
        let proceed = self.emitter.dispatch(kind);
        if !proceed {
            debug!(id = ?self.id, "事件默认行为已被监听者取消");
        }
        proceed
    }

    pub(crate) fn notify_change(&mut self, property: Property, value: PropertyValue<T>) {
        self.dispatch_event(EventKind::Change { property, value });
    }

    fn notify_update(&mut self) {
        let value = self.current();
        self.dispatch_event(EventKind::Update { value });
    }

    pub(crate) fn domain_mut(&mut self) -> &mut D {
        &mut self.domain
    }

    // ========== 内部 ==========

    /// 已校验的目标值写入：钳制、规范化、比较后开始过渡
    fn assign_target(&mut self, target: T) {
        if self.locked {
            return;
        }

        self.raw = target;
        let target = self.fit_target(target);

        if target == self.target {
            return;
        }

        self.retarget(target);

        if self.animation_time == 0.0 {
            self.update_immediate();
        }
    }

    /// 按当前边界重新钳制 `raw`（`raw` 总是有限值）
    fn reclamp(&mut self) {
        self.assign_target(self.raw);
    }

    /// 钳制并规范化待写入的目标值
    fn fit_target(&self, value: T) -> T {
        let value = if self.ignore_bounds {
            value
        } else {
            self.bounds.clamp(value)
        };
        self.domain.normalize(value)
    }

    /// 记录动画起点并切换到新目标
    fn retarget(&mut self, target: T) {
        let now = self.clock.now_ms().max(self.current_time);

        self.last_target = Some(self.target);
        self.start = self.current();
        self.start_time = now;
        self.current_time = now;

        self.target = target;
        self.target_time = now + self.animation_time;
        self.start = self.domain.align_start(self.start, self.target);

        trace!(
            id = ?self.id,
            from = ?self.last_target,
            to = ?self.target,
            start = ?self.start,
            end_ms = self.target_time,
            "target 已更新"
        );

        self.notify_change(Property::Target, PropertyValue::Number(self.target()));
    }

    /// 把时间游标移到 `time` 并重新插值
    fn step_to(&mut self, time: f64) -> bool {
        if !self.is_dirty() {
            self.updated = false;
            return false;
        }

        self.previous = self.current;
        self.current_time = time;

        let span = self.target_time - self.start_time;
        let fraction = if span > 0.0 {
            ((self.current_time - self.start_time) / span).min(1.0)
        } else {
            1.0
        };

        self.current = if fraction >= 1.0 {
            self.target
        } else {
            let start = self.start.to_f64();
            let change = self.target.to_f64() - start;
            T::from_f64(self.easing.ease(fraction, start, change, 1.0))
        };

        self.updated = true;
        self.notify_update();
        true
    }
}

/// `min` 可以是负无穷（无下限），不能是 NaN 或正无穷
fn ensure_min<T: Scalar>(min: T) -> AnimResult<T> {
    let min = ensure_number("min", min)?;
    if min == T::INFINITY {
        return Err(AnimError::invalid_argument("min", "不能为正无穷"));
    }
    Ok(min)
}

/// `max` 可以是正无穷（无上限），不能是 NaN 或负无穷
fn ensure_max<T: Scalar>(max: T) -> AnimResult<T> {
    let max = ensure_number("max", max)?;
    if max == T::NEG_INFINITY {
        return Err(AnimError::invalid_argument("max", "不能为负无穷"));
    }
    Ok(max)
}

fn ensure_precision<T: Scalar>(precision: T) -> AnimResult<T> {
    let precision = ensure_finite("exclusive_precision", precision)?;
    if precision < T::ZERO {
        return Err(AnimError::invalid_argument(
            "exclusive_precision",
            "不能为负数",
        ));
    }
    Ok(precision)
}

fn ensure_animation_time(ms: f64) -> AnimResult<f64> {
    if !ms.is_finite() {
        return Err(AnimError::invalid_argument(
            "animation_time",
            format!("必须是有限数值，实际为 {ms}"),
        ));
    }
    Ok(ms.abs())
}
