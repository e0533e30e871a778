//! 定时器注册表核心实现
//! Timer registry core implementation
//!
//! 本模块包含调度域的协调者：注册表持有全部存活定时器，在每次tick中推进
//! 它们，提供基于名称的暂停/恢复/取消操作，并以两阶段的方式处理移除，
//! 保证移除永远不会干扰对其余定时器的迭代。
//!
//! This module contains the coordinator of a scheduling domain: the registry
//! owns all live timers, advances them on every tick, provides name-based
//! pause/resume/cancel operations, and performs removal in two phases so that
//! removing one timer never perturbs iteration over the rest.

use tracing::{debug, trace, warn};

use crate::config::{ActionErrorPolicy, Config};
use crate::error::{Error, Result};
use crate::timer::action::TimerAction;
use crate::timer::entry::{TimerEntry, TimerEntryId};
use crate::timer::handle::TimerHandle;
use crate::timer::observer::TimerObserver;
use crate::timer::stats::RegistryStats;

/// An explicitly owned set of frame-driven timers.
///
/// 一组显式持有的帧驱动定时器。
///
/// There is no process-wide registry: each instance is its own independent
/// scheduling domain, advanced only by its own `tick` calls. The registry is
/// single-threaded by construction (`Rc` state shared with handles) and all
/// mutation happens synchronously inside its methods.
///
/// 不存在进程级的全局注册表：每个实例都是独立的调度域，只由自己的 `tick`
/// 调用推进。注册表在构造上即是单线程的（与句柄共享 `Rc` 状态），所有状态
/// 变更都在其方法内部同步发生。
///
/// Every lookup degrades gracefully on an empty registry: cancel returns
/// `false`, pause/resume affect zero timers, and `tick` is a no-op; none of
/// this is ever an error.
pub struct TimerRegistry {
    /// Live timers in insertion order. Order is semantically significant
    /// only for first-match name cancellation.
    /// 按插入顺序存放的存活定时器。顺序仅对按名称取消的首个匹配有意义。
    entries: Vec<TimerEntry>,
    /// 下一个分配的定时器条目ID
    /// Next timer entry ID to allocate
    next_entry_id: TimerEntryId,
    /// Optional host hook for reacting to state transitions.
    /// 可选的宿主钩子，用于对状态转换做出反应。
    observer: Option<Box<dyn TimerObserver>>,
    /// 统计信息
    /// Statistics
    stats: RegistryStats,
    config: Config,
}

impl Default for TimerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TimerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerRegistry")
            .field("entries", &self.entries)
            .field("next_entry_id", &self.next_entry_id)
            .field("observer", &self.observer.as_ref().map(|_| "<observer>"))
            .field("stats", &self.stats)
            .field("config", &self.config)
            .finish()
    }
}

impl TimerRegistry {
    /// 创建默认配置的注册表
    /// Create registry with default configuration
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// 创建指定配置的注册表
    /// Create registry with the given configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            entries: Vec::with_capacity(config.initial_capacity),
            next_entry_id: 1,
            observer: None,
            stats: RegistryStats::default(),
            config,
        }
    }

    /// Schedules `action` to fire once, `lifetime` seconds of tick time from
    /// now.
    ///
    /// 调度 `action` 在距现在 `lifetime` 秒的tick时间后触发一次。
    ///
    /// A negative `lifetime` is accepted and fires on the very next tick,
    /// since the expiry check is "crossed below zero". Names need not be
    /// unique; duplicates are resolved per-operation (see `cancel_by_name`
    /// vs. `pause_by_name`).
    pub fn create_one_shot(
        &mut self,
        action: impl TimerAction,
        lifetime: f32,
        name: Option<&str>,
    ) -> TimerHandle {
        let id = self.allocate_id();
        let entry =
            TimerEntry::new_one_shot(id, name.map(str::to_owned), Box::new(action), lifetime);
        let handle = entry.handle();
        self.entries.push(entry);
        trace!(entry_id = id, name, lifetime, "one-shot timer scheduled");
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_scheduled(id, name);
        }
        handle
    }

    /// Schedules `action` to fire every `interval` seconds until `lifetime`
    /// seconds have elapsed, plus one grace tick for a coincident final
    /// firing.
    ///
    /// 调度 `action` 每隔 `interval` 秒触发一次，直到经过 `lifetime` 秒，外加
    /// 一个宽限tick以完成与之重合的最后一次触发。
    ///
    /// An `interval <= 0` fires the action on every tick until expiry:
    /// degenerate but valid.
    pub fn create_repeating(
        &mut self,
        action: impl TimerAction,
        lifetime: f32,
        interval: f32,
        name: Option<&str>,
    ) -> TimerHandle {
        let id = self.allocate_id();
        let entry = TimerEntry::new_repeating(
            id,
            name.map(str::to_owned),
            Box::new(action),
            lifetime,
            interval,
        );
        let handle = entry.handle();
        self.entries.push(entry);
        trace!(
            entry_id = id,
            name,
            lifetime,
            interval,
            "repeating timer scheduled"
        );
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_scheduled(id, name);
        }
        handle
    }

    /// Removes the *first* timer with this name, in insertion order, without
    /// invoking its action. Returns `false` when nothing matched.
    ///
    /// 按插入顺序移除*第一个*匹配该名称的定时器，不调用其动作。没有匹配时
    /// 返回 `false`。
    ///
    /// First-match-only is deliberate and asymmetric with `pause_by_name` /
    /// `resume_by_name`, which affect every match.
    /// 只命中首个匹配是有意为之，与作用于全部匹配的 `pause_by_name` /
    /// `resume_by_name` 不对称。
    pub fn cancel_by_name(&mut self, name: &str) -> bool {
        let Some(position) = self.entries.iter().position(|e| e.name() == Some(name)) else {
            return false;
        };
        let entry = self.entries.remove(position);
        self.stats.cancelled_timers += 1;
        trace!(entry_id = entry.id(), name, "timer cancelled by name");
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_cancelled(entry.id(), entry.name());
        }
        true
    }

    /// Removes every live timer without firing any action. Returns how many
    /// were removed.
    /// 移除所有存活的定时器，不触发任何动作。返回移除的数量。
    pub fn cancel_all(&mut self) -> usize {
        let removed = self.entries.len();
        let observer = &mut self.observer;
        for entry in self.entries.drain(..) {
            if let Some(observer) = observer.as_deref_mut() {
                observer.on_cancelled(entry.id(), entry.name());
            }
        }
        self.stats.cancelled_timers += removed as u64;
        if removed > 0 {
            debug!(removed, "cancelled all timers");
        }
        removed
    }

    /// Freezes the countdown of every live timer. Idempotent.
    /// 冻结所有存活定时器的倒计时。幂等。
    pub fn pause_all(&mut self) {
        let affected = self.entries.len();
        let observer = &mut self.observer;
        for entry in &self.entries {
            entry.set_paused(true);
            if let Some(observer) = observer.as_deref_mut() {
                observer.on_paused(entry.id(), entry.name());
            }
        }
        if affected > 0 {
            debug!(affected, "paused all timers");
        }
    }

    /// Resumes the countdown of every live timer, exactly where it left off.
    /// 恢复所有存活定时器的倒计时，从冻结处继续。
    pub fn resume_all(&mut self) {
        let affected = self.entries.len();
        let observer = &mut self.observer;
        for entry in &self.entries {
            entry.set_paused(false);
            if let Some(observer) = observer.as_deref_mut() {
                observer.on_resumed(entry.id(), entry.name());
            }
        }
        if affected > 0 {
            debug!(affected, "resumed all timers");
        }
    }

    /// Freezes *every* timer with this name (not just the first match) and
    /// returns how many were affected.
    /// 冻结*所有*匹配该名称的定时器（不只是第一个），返回受影响的数量。
    pub fn pause_by_name(&mut self, name: &str) -> usize {
        let mut affected = 0;
        let observer = &mut self.observer;
        for entry in self.entries.iter().filter(|e| e.name() == Some(name)) {
            entry.set_paused(true);
            if let Some(observer) = observer.as_deref_mut() {
                observer.on_paused(entry.id(), entry.name());
            }
            affected += 1;
        }
        if affected > 0 {
            trace!(name, affected, "timers paused by name");
        }
        affected
    }

    /// Resumes *every* timer with this name and returns how many were
    /// affected.
    /// 恢复*所有*匹配该名称的定时器，返回受影响的数量。
    pub fn resume_by_name(&mut self, name: &str) -> usize {
        let mut affected = 0;
        let observer = &mut self.observer;
        for entry in self.entries.iter().filter(|e| e.name() == Some(name)) {
            entry.set_paused(false);
            if let Some(observer) = observer.as_deref_mut() {
                observer.on_resumed(entry.id(), entry.name());
            }
            affected += 1;
        }
        if affected > 0 {
            trace!(name, affected, "timers resumed by name");
        }
        affected
    }

    /// Advances every live timer by `delta_time` seconds, then removes the
    /// timers that reached their terminal state during this tick.
    ///
    /// 将每个存活定时器推进 `delta_time` 秒，然后移除在本次tick中进入终止
    /// 状态的定时器。
    ///
    /// The two phases are strict: the advance pass visits every live timer
    /// exactly once, in insertion order, and no removal happens until the
    /// pass completes. A timer's final firing therefore always precedes its
    /// destruction, and firings never observe a mutated collection.
    ///
    /// 两个阶段严格分离：推进阶段按插入顺序恰好访问每个存活定时器一次，在
    /// 该阶段结束前不发生任何移除——因此定时器的最后一次触发总是先于其销毁，
    /// 触发过程也绝不会观察到被修改过的集合。
    ///
    /// Action failures are governed by `Config::action_error_policy`; with
    /// the default `Propagate`, the first failure (in advance order) is
    /// returned after both phases have completed.
    pub fn tick(&mut self, delta_time: f32) -> Result<()> {
        self.stats.ticks += 1;
        if self.entries.is_empty() {
            return Ok(());
        }

        let mut first_failure: Option<Error> = None;

        // Advance pass.
        // 推进阶段。
        for entry in &mut self.entries {
            let outcome = entry.advance(delta_time);
            if outcome.fired {
                self.stats.fired_actions += 1;
                trace!(entry_id = entry.id(), name = entry.name(), "timer fired");
                if let Some(observer) = self.observer.as_deref_mut() {
                    observer.on_fired(entry.id(), entry.name());
                }
            }
            if let Some(source) = outcome.error {
                match self.config.action_error_policy {
                    ActionErrorPolicy::Propagate if first_failure.is_none() => {
                        first_failure = Some(Error::ActionFailed {
                            timer_id: entry.id(),
                            name: entry.name().map(str::to_owned),
                            source,
                        });
                    }
                    _ => {
                        warn!(
                            entry_id = entry.id(),
                            name = entry.name(),
                            error = %source,
                            "timer action failed"
                        );
                    }
                }
            }
        }

        // Removal pass.
        // 移除阶段。
        let observer = &mut self.observer;
        let mut removed = 0u64;
        self.entries.retain(|entry| {
            if entry.is_expired() {
                trace!(entry_id = entry.id(), name = entry.name(), "timer expired");
                if let Some(observer) = observer.as_deref_mut() {
                    observer.on_expired(entry.id(), entry.name());
                }
                removed += 1;
                false
            } else {
                true
            }
        });
        if removed > 0 {
            self.stats.expired_timers += removed;
            debug!(removed, live = self.entries.len(), "removed expired timers");
        }

        match first_failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Installs the observer hook, replacing any previous one.
    /// 安装观察者钩子，替换之前安装的钩子。
    pub fn set_observer(&mut self, observer: impl TimerObserver) {
        self.observer = Some(Box::new(observer));
    }

    /// Removes the observer hook.
    /// 移除观察者钩子。
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Number of live timers.
    /// 存活定时器的数量。
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no timer is live.
    /// 是否没有任何存活的定时器。
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A snapshot of the registry's activity counters.
    /// 注册表活动计数器的快照。
    pub fn stats(&self) -> RegistryStats {
        let mut stats = self.stats.clone();
        stats.live_timers = self.entries.len();
        stats
    }

    fn allocate_id(&mut self) -> TimerEntryId {
        let id = self.next_entry_id;
        self.next_entry_id += 1;
        id
    }
}
