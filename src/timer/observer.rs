//! 注册表观察者钩子
//! Registry observer hook
//!
//! 宿主可以通过该钩子对定时器的状态变化做出反应（例如驱动呈现层），
//! 而调度的正确性不依赖于它。
//!
//! The host can react to timer state transitions through this hook (for
//! example to drive a presentation layer); scheduling correctness never
//! depends on it.

use crate::timer::entry::TimerEntryId;

/// Receives notifications after timer state transitions.
///
/// 在定时器状态转换之后接收通知。
///
/// All methods have empty default bodies, so hosts implement only the
/// transitions they care about. Every callback runs after the transition it
/// reports; the observer has no way to reach back into the registry.
///
/// 所有方法都有空的默认实现，宿主只需实现自己关心的转换。每个回调都在它
/// 所报告的转换之后执行；观察者无法反过来操作注册表。
pub trait TimerObserver: 'static {
    /// A timer was registered.
    fn on_scheduled(&mut self, _id: TimerEntryId, _name: Option<&str>) {}

    /// A timer's action was invoked.
    fn on_fired(&mut self, _id: TimerEntryId, _name: Option<&str>) {}

    /// A timer reached its terminal state and was removed.
    fn on_expired(&mut self, _id: TimerEntryId, _name: Option<&str>) {}

    /// A timer was removed by cancellation, without firing.
    fn on_cancelled(&mut self, _id: TimerEntryId, _name: Option<&str>) {}

    /// A timer's countdown was frozen.
    fn on_paused(&mut self, _id: TimerEntryId, _name: Option<&str>) {}

    /// A timer's countdown was resumed.
    fn on_resumed(&mut self, _id: TimerEntryId, _name: Option<&str>) {}
}
