//! # 动画值生命周期集成测试
//!
//! 通过公共 API 驱动一个数值从创建、过渡、偏移到保存恢复的完整流程，
//! 并检查监听者看到的事件序列。

use std::cell::RefCell;
use std::rc::Rc;

use animated_value::{
    AnimatedValue, EasingFunction, EventKind, ManualClock, Property, PropertyValue, Topic,
    ValueConfig,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn linear_value(animation_time: f64) -> AnimatedValue {
    AnimatedValue::new(
        ValueConfig::new()
            .with_easing(EasingFunction::Linear)
            .with_animation_time(animation_time),
    )
    .unwrap()
    .with_clock(ManualClock::new())
}

fn record_all(value: &mut AnimatedValue) -> Rc<RefCell<Vec<EventKind<f64>>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let changes = log.clone();
    value.subscribe(Topic::Change, move |event| {
        changes.borrow_mut().push(event.kind().clone())
    });
    let updates = log.clone();
    value.subscribe(Topic::Update, move |event| {
        updates.borrow_mut().push(event.kind().clone())
    });
    log
}

/// 两步过渡：每次推进一半时长
#[test]
fn test_two_step_transition_events() {
    init_tracing();
    let mut value = linear_value(2.0);
    let events = record_all(&mut value);

    value.set_target(4.0).unwrap();
    assert!(value.advance(1.0).unwrap());
    assert!(value.advance(1.0).unwrap());
    assert!(!value.advance(1.0).unwrap());

    insta::assert_debug_snapshot!(events.borrow(), @r"
    [
        Change {
            property: Target,
            value: Number(
                4.0,
            ),
        },
        Update {
            value: 2.0,
        },
        Update {
            value: 4.0,
        },
    ]
    ");
}

/// 时钟驱动：每帧读取注入的时钟
#[test]
fn test_clock_driven_frames() {
    init_tracing();
    let clock = ManualClock::new();
    let mut value = AnimatedValue::new(
        ValueConfig::new()
            .with_bounds(0.0, 100.0)
            .with_easing(EasingFunction::Linear)
            .with_animation_time(100.0),
    )
    .unwrap()
    .with_clock(clock.clone());

    value.set_target(50.0).unwrap();

    let mut frames = Vec::new();
    for _ in 0..6 {
        clock.advance(25.0);
        if value.update() {
            frames.push(value.current());
        }
    }

    assert_eq!(frames, vec![12.5, 25.0, 37.5, 50.0]);
    assert!(!value.is_dirty());
}

/// 中途改变目标：从当前位置重新开始过渡
#[test]
fn test_retarget_mid_animation() {
    init_tracing();
    let mut value = linear_value(4.0);

    value.set_target(8.0).unwrap();
    value.advance(2.0).unwrap();
    assert_eq!(value.current(), 4.0);

    value.set_target(0.0).unwrap();
    assert_eq!(value.last_target(), Some(8.0));

    value.advance(2.0).unwrap();
    assert_eq!(value.current(), 2.0);
    value.advance(2.0).unwrap();
    assert_eq!(value.current(), 0.0);
    assert!(!value.is_dirty());
}

/// 每次推进后 current 都在 start 与 target 之间
#[test]
fn test_interpolation_stays_between_endpoints() {
    init_tracing();
    for easing in [
        EasingFunction::Linear,
        EasingFunction::EaseInQuad,
        EasingFunction::EaseOutQuad,
        EasingFunction::EaseInOutCubic,
        EasingFunction::EaseOutSine,
        EasingFunction::EaseInOutCirc,
    ] {
        let mut value = AnimatedValue::new(
            ValueConfig::new()
                .with_initial(10.0)
                .with_easing(easing)
                .with_animation_time(100.0),
        )
        .unwrap()
        .with_clock(ManualClock::new());

        value.set_target(-10.0).unwrap();
        while value.advance(7.0).unwrap() {
            let current = value.current();
            assert!((-10.0..=10.0).contains(&current), "{easing}: {current}");
        }
        assert_eq!(value.current(), -10.0);
    }
}

/// 边界：闭区间与开区间
#[test]
fn test_bounds_and_exclusive_precision() {
    init_tracing();
    let mut value = AnimatedValue::new(
        ValueConfig::new()
            .with_bounds(0.0, 10.0)
            .with_exclusive(false, true)
            .with_exclusive_precision(1e-6)
            .with_animation_time(0.0),
    )
    .unwrap();

    value.set_target(10.0).unwrap();
    assert_eq!(value.target(), 10.0 - 1e-6);
    assert_eq!(value.current(), 10.0 - 1e-6);

    value.set_target(-5.0).unwrap();
    assert_eq!(value.target(), 0.0);

    assert_eq!(value.clamp(42.0), 10.0 - 1e-6);
    assert_eq!(value.clamp(5.0), 5.0);
}

/// 修改边界后按 raw 重新钳制
#[test]
fn test_bounds_reclamp_raw() {
    init_tracing();
    let mut value = linear_value(0.0);
    let events = record_all(&mut value);

    value.set_target(20.0).unwrap();
    value.set_max(10.0).unwrap();
    value.clear_max();

    assert_eq!(value.target(), 20.0);
    insta::assert_debug_snapshot!(events.borrow(), @r"
    [
        Change {
            property: Target,
            value: Number(
                20.0,
            ),
        },
        Update {
            value: 20.0,
        },
        Change {
            property: Max,
            value: Number(
                10.0,
            ),
        },
        Change {
            property: Target,
            value: Number(
                10.0,
            ),
        },
        Update {
            value: 10.0,
        },
        Change {
            property: Max,
            value: Number(
                inf,
            ),
        },
        Change {
            property: Target,
            value: Number(
                20.0,
            ),
        },
        Update {
            value: 20.0,
        },
    ]
    ");
}

/// 任意顺序修改边界后 min <= max
#[test]
fn test_bound_ordering_after_every_assignment() {
    init_tracing();
    let mut value = linear_value(0.0);
    let steps = [
        (true, 5.0),
        (false, 2.0),
        (true, 10.0),
        (false, -3.0),
        (true, -8.0),
        (false, 7.0),
        (true, 7.0),
    ];

    for exclusive in [false, true] {
        value.set_exclusive_min(exclusive);
        value.set_exclusive_max(exclusive);
        for (is_min, bound) in steps {
            if is_min {
                value.set_min(bound).unwrap();
            } else {
                value.set_max(bound).unwrap();
            }
            assert!(value.min() <= value.max(), "{} > {}", value.min(), value.max());
            assert!(value.target() >= value.min() && value.target() <= value.max());
        }
        value.clear_min();
        value.clear_max();
    }
}

/// 锁定后任意写入都不改变 target
#[test]
fn test_locked_ignores_every_write() {
    init_tracing();
    let mut value = linear_value(0.0);
    value.apply(4.0).unwrap();
    value.set_locked(true);

    for x in [-1e9, -1.0, 0.0, 4.0, 3.5, 1e9] {
        value.set_target(x).unwrap();
        assert_eq!(value.target(), 4.0);
    }
}

/// 锁定、保存与恢复
#[test]
fn test_lock_store_restore() {
    init_tracing();
    let mut value = linear_value(0.0);

    value.set_target(3.0).unwrap();
    value.store(None).unwrap();
    value.set_target(9.0).unwrap();
    value.set_locked(true);

    value.set_target(1.0).unwrap();
    value.add_offset(1.0).unwrap();
    assert_eq!(value.target(), 9.0);

    value.restore(false).unwrap();
    assert_eq!(value.target(), 9.0);

    value.restore(true).unwrap();
    assert_eq!(value.target(), 3.0);
    assert_eq!(value.current(), 3.0);
    assert!(value.is_locked());
}

/// 偏移：target 与 current 同时移动，进度保持
#[test]
fn test_add_offset_during_animation() {
    init_tracing();
    let mut value = linear_value(300.0);

    value.set_target(5.0).unwrap();
    value.add_offset(2.0).unwrap();

    assert_eq!(value.current(), 2.0);
    assert_eq!(value.target(), 7.0);
    assert_eq!(value.last_target(), Some(5.0));
    assert!(value.is_updated());

    value.advance(300.0).unwrap();
    assert_eq!(value.current(), 7.0);
}

/// 按属性订阅
#[test]
fn test_property_channel_subscription() {
    init_tracing();
    let mut value = linear_value(300.0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let id = value.subscribe(Topic::ChangeOf(Property::ExclusiveMax), move |event| {
        sink.borrow_mut().push(event.kind().clone())
    });

    value.set_exclusive_min(true);
    value.set_exclusive_max(true);
    value.set_locked(true);

    assert_eq!(
        *seen.borrow(),
        vec![EventKind::Change {
            property: Property::ExclusiveMax,
            value: PropertyValue::Flag(true),
        }]
    );

    assert!(value.unsubscribe(id));
    value.set_exclusive_max(false);
    assert_eq!(seen.borrow().len(), 1);
}

/// 监听者取消默认行为
#[test]
fn test_prevent_default() {
    init_tracing();
    let mut value = linear_value(300.0);
    value.subscribe(Topic::Update, |event| event.prevent_default());

    assert!(!value.dispatch_event(EventKind::Update { value: 1.0 }));
    assert!(value.dispatch_event(EventKind::Change {
        property: Property::Enabled,
        value: PropertyValue::Flag(false),
    }));
}

/// 停止动画
#[test]
fn test_stop_freezes_current() {
    init_tracing();
    let mut value = linear_value(10.0);
    let events = record_all(&mut value);

    value.set_target(10.0).unwrap();
    value.advance(3.0).unwrap();
    assert!(value.stop());
    assert!(!value.advance(3.0).unwrap());

    assert_eq!(value.target(), 3.0);
    assert_eq!(value.last_target(), Some(10.0));
    assert_eq!(events.borrow().len(), 3);
}

/// 从 JSON 配置创建
#[test]
fn test_from_json_config() {
    init_tracing();
    let config = ValueConfig::<f64>::from_json_str(
        r#"{ "initial": 12, "min": 0, "max": 10, "animation_time": -50, "easing": "linear" }"#,
    )
    .unwrap();

    let value = AnimatedValue::new(config).unwrap();
    assert_eq!(value.target(), 10.0);
    assert_eq!(value.raw(), 12.0);
    assert_eq!(value.animation_time(), 50.0);
}
