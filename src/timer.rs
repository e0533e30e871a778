//! 帧驱动定时器调度模块
//! Frame-driven timer scheduling module
//!
//! 该模块实现了由外部逐帧tick信号驱动的定时器注册表：调用者注册一次性或
//! 重复执行的延迟动作，之后可以按名称暂停、恢复或取消；倒计时只在显式的
//! `tick` 调用中推进，没有后台线程或挂钟时间。
//!
//! This module implements a timer registry driven by an external per-frame
//! tick signal: callers schedule one-shot or repeating deferred actions and
//! later pause, resume, or cancel them by name; countdowns only advance
//! inside explicit `tick` calls, with no background thread and no wall clock.

pub mod action;
pub mod entry;
pub mod handle;
pub mod observer;
pub mod registry;
pub mod stats;

#[cfg(test)]
mod tests;

pub use action::{ActionError, FallibleAction, NoOpAction, TimerAction};
pub use entry::TimerEntryId;
pub use handle::TimerHandle;
pub use observer::TimerObserver;
pub use registry::TimerRegistry;
pub use stats::RegistryStats;
