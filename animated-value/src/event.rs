//! # Event 模块
//!
//! 变更通知。动画值持有自己的监听者列表，在触发调用内部同步分发，
//! 分发顺序与注册顺序一致。
//!
//! ## 事件类型
//!
//! - `Update`: `current` 发生变化
//! - `Change`: 任意配置属性（包括 `target`）被修改为新值
//!
//! 监听者可以调用 [`Event::prevent_default`] 取消默认行为，
//! 此时 `dispatch` 返回 `false`。

use std::fmt;

use serde::Serialize;

/// 可被修改并发出 `Change` 事件的属性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Target,
    Min,
    Max,
    ExclusiveMin,
    ExclusiveMax,
    ExclusivePrecision,
    Locked,
    Enabled,
    IgnoreBounds,
    AnimationTime,
    Id,
    Wrap,
    ShortRotation,
}

impl Property {
    /// 属性名（与 `change:<property>` 频道名一致）
    pub fn name(&self) -> &'static str {
        match self {
            Property::Target => "target",
            Property::Min => "min",
            Property::Max => "max",
            Property::ExclusiveMin => "exclusiveMin",
            Property::ExclusiveMax => "exclusiveMax",
            Property::ExclusivePrecision => "exclusivePrecision",
            Property::Locked => "locked",
            Property::Enabled => "enabled",
            Property::IgnoreBounds => "ignoreBounds",
            Property::AnimationTime => "animationTime",
            Property::Id => "id",
            Property::Wrap => "wrap",
            Property::ShortRotation => "shortRotation",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 属性的新值
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PropertyValue<T> {
    /// 数值属性（target / min / max / exclusive_precision）
    Number(T),
    /// 布尔属性
    Flag(bool),
    /// 时长（毫秒）
    Millis(f64),
    /// 文本属性（id）
    Text(Option<String>),
}

/// 事件内容
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EventKind<T> {
    /// `current` 已更新
    Update { value: T },
    /// 属性已修改
    Change {
        property: Property,
        value: PropertyValue<T>,
    },
}

/// 分发给监听者的事件
#[derive(Debug, Clone, PartialEq)]
pub struct Event<T> {
    kind: EventKind<T>,
    default_prevented: bool,
}

impl<T> Event<T> {
    /// 创建事件
    pub fn new(kind: EventKind<T>) -> Self {
        Self {
            kind,
            default_prevented: false,
        }
    }

    /// 事件内容
    pub fn kind(&self) -> &EventKind<T> {
        &self.kind
    }

    /// 取消默认行为
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// 默认行为是否已被取消
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// 订阅频道
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// `update`
    Update,
    /// `change`：所有属性
    Change,
    /// `change:<property>`：单个属性
    ChangeOf(Property),
}

impl Topic {
    /// 此频道是否接收该事件
    pub fn matches<T>(&self, kind: &EventKind<T>) -> bool {
        match (self, kind) {
            (Topic::Update, EventKind::Update { .. }) => true,
            (Topic::Change, EventKind::Change { .. }) => true,
            (Topic::ChangeOf(wanted), EventKind::Change { property, .. }) => wanted == property,
            _ => false,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::Update => f.write_str("update"),
            Topic::Change => f.write_str("change"),
            Topic::ChangeOf(property) => write!(f, "change:{property}"),
        }
    }
}

/// 监听者 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// 获取内部 ID 值
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// 监听回调
pub type Listener<T> = Box<dyn FnMut(&mut Event<T>)>;

struct Subscription<T> {
    id: ListenerId,
    topic: Topic,
    listener: Listener<T>,
}

/// 监听者列表
pub struct Emitter<T> {
    subscriptions: Vec<Subscription<T>>,
    next_id: u64,
}

impl<T> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.subscriptions.len())
            .finish()
    }
}

impl<T> Emitter<T> {
    /// 创建空的监听者列表
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 1,
        }
    }

    /// 注册监听者
    pub fn subscribe(
        &mut self,
        topic: Topic,
        listener: impl FnMut(&mut Event<T>) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            topic,
            listener: Box::new(listener),
        });
        id
    }

    /// 注销监听者
    ///
    /// 返回是否找到并移除了该监听者。
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// 已注册的监听者数量
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// 是否没有监听者
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// 分发事件
    ///
    /// 返回 `false` 表示有监听者取消了默认行为。
    pub fn dispatch(&mut self, kind: EventKind<T>) -> bool {
        let mut event = Event::new(kind);
        for subscription in &mut self.subscriptions {
            if subscription.topic.matches(&event.kind) {
                (subscription.listener)(&mut event);
            }
        }
        !event.default_prevented
    }
}
