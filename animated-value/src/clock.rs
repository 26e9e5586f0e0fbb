//! # Clock 模块
//!
//! 时间源抽象。核心不拥有定时器，只在 `update()` 时读取时间。

use std::cell::Cell;
use std::fmt::Debug;
use std::rc::Rc;
use std::time::Instant;

/// 单调时间源（毫秒）
pub trait Clock: Debug {
    /// 当前时间（毫秒）
    fn now_ms(&self) -> f64;
}

/// 系统时钟
///
/// 返回自创建以来经过的毫秒数。
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// 创建新的系统时钟
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// 手动时钟
///
/// 时间只在调用 `advance` / `set` 时变化。克隆得到的句柄共享同一时间，
/// 测试中可以把一个句柄交给动画值，另一个留在手里推进时间。
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// 创建从 0 开始的手动时钟
    pub fn new() -> Self {
        Self::default()
    }

    /// 推进时间
    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    /// 直接设置时间
    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}
