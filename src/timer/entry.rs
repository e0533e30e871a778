//! 定时器条目的状态机实现
//! Timer entry state machine implementation
//!
//! 一个条目最多同时驱动两个独立的倒计时：总生命周期，以及（对重复定时器
//! 而言）触发间隔。到期的判定是"值越过零以下"，而不是"值等于零"；生命周期
//! 永远不会在零处截断。
//!
//! An entry drives up to two independent countdowns: the overall lifetime
//! and, for repeating timers, the inter-fire interval. Expiry means "the
//! value crossed below zero", never "the value reached zero"; the lifetime is
//! never clamped at zero.

use std::cell::RefCell;
use std::rc::Rc;

use crate::timer::action::{ActionError, TimerAction};
use crate::timer::handle::TimerHandle;

/// 定时器条目ID，用于在注册表中唯一标识定时器条目
/// Timer entry ID, used to uniquely identify timer entries in the registry
pub type TimerEntryId = u64;

/// Countdown state shared between a registry entry and its handles.
/// 注册表条目与其句柄共享的倒计时状态。
#[derive(Debug)]
pub(crate) struct CountdownCell {
    /// Seconds until the terminal event. Goes negative at expiry.
    /// 距终止事件的秒数。到期时变为负值。
    pub remaining_lifetime: f32,
    /// When set, `advance` is a no-op for this entry.
    /// 置位时，该条目的 `advance` 是空操作。
    pub paused: bool,
}

/// Per-kind countdown state.
/// 按定时器类型区分的倒计时状态。
#[derive(Debug)]
pub(crate) enum TimerKind {
    /// Fires once when the lifetime crosses below zero, then expires.
    /// 生命周期越过零以下时触发一次，随后到期。
    OneShot,
    /// Fires whenever the interval countdown reaches zero, until the
    /// lifetime runs out and the grace tick has passed.
    /// 每当间隔倒计时归零时触发，直到生命周期耗尽并度过宽限tick。
    Repeating {
        /// Seconds until the next firing.
        /// 距下一次触发的秒数。
        interval_remaining: f32,
        /// The configured period between firings.
        /// 配置的触发间隔。
        interval_length: f32,
        /// Lifetime has run out; expire on the next tick.
        /// 生命周期已耗尽；在下一次tick时到期。
        pending_destroy: bool,
    },
}

/// What a single `advance` call did to an entry.
/// 一次 `advance` 调用对条目产生的结果。
#[derive(Default)]
pub(crate) struct AdvanceOutcome {
    /// The action was invoked (at most once per tick).
    /// 动作被调用（每次tick至多一次）。
    pub fired: bool,
    /// The action was invoked and reported a failure.
    /// 动作被调用并报告了失败。
    pub error: Option<ActionError>,
}

/// A live timer owned by the registry.
/// 注册表持有的存活定时器。
pub(crate) struct TimerEntry {
    id: TimerEntryId,
    name: Option<String>,
    kind: TimerKind,
    cell: Rc<RefCell<CountdownCell>>,
    action: Box<dyn TimerAction>,
    expired: bool,
}

impl std::fmt::Debug for TimerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEntry")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("expired", &self.expired)
            .field("action", &"<action>")
            .finish()
    }
}

impl TimerEntry {
    /// 创建新的一次性定时器条目
    /// Create new one-shot timer entry
    pub(crate) fn new_one_shot(
        id: TimerEntryId,
        name: Option<String>,
        action: Box<dyn TimerAction>,
        lifetime: f32,
    ) -> Self {
        Self {
            id,
            name,
            kind: TimerKind::OneShot,
            cell: Rc::new(RefCell::new(CountdownCell {
                remaining_lifetime: lifetime,
                paused: false,
            })),
            action,
            expired: false,
        }
    }

    /// 创建新的重复定时器条目
    /// Create new repeating timer entry
    pub(crate) fn new_repeating(
        id: TimerEntryId,
        name: Option<String>,
        action: Box<dyn TimerAction>,
        lifetime: f32,
        interval: f32,
    ) -> Self {
        Self {
            id,
            name,
            kind: TimerKind::Repeating {
                interval_remaining: interval,
                interval_length: interval,
                pending_destroy: false,
            },
            cell: Rc::new(RefCell::new(CountdownCell {
                remaining_lifetime: lifetime,
                paused: false,
            })),
            action,
            expired: false,
        }
    }

    pub(crate) fn id(&self) -> TimerEntryId {
        self.id
    }

    pub(crate) fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The entry reached its terminal state and awaits the removal pass.
    /// 条目已进入终止状态，等待移除阶段处理。
    pub(crate) fn is_expired(&self) -> bool {
        self.expired
    }

    pub(crate) fn set_paused(&self, paused: bool) {
        self.cell.borrow_mut().paused = paused;
    }

    /// Creates a query handle sharing this entry's countdown cell.
    /// 创建与该条目共享倒计时状态的查询句柄。
    pub(crate) fn handle(&self) -> TimerHandle {
        TimerHandle::new(self.id, self.name.clone(), Rc::clone(&self.cell))
    }

    /// Advance the countdowns by `delta` seconds and fire if due.
    ///
    /// 将倒计时推进 `delta` 秒，并在到期时触发。
    ///
    /// For a repeating entry the order of checks is load-bearing: the
    /// interval fires first, the `pending_destroy` flag from a *previous*
    /// tick expires the entry second, and only then is the flag set for a
    /// freshly exhausted lifetime. That sequencing is what grants the
    /// one-tick grace window in which a coincident final interval firing
    /// still happens.
    ///
    /// 对重复定时器而言，检查顺序不可调换：先处理间隔触发，再根据*上一次*
    /// tick设置的 `pending_destroy` 标志使条目到期，最后才为刚耗尽的生命周期
    /// 设置该标志。正是这一顺序提供了一个tick的宽限窗口，使得与之重合的最后
    /// 一次间隔触发不会丢失。
    pub(crate) fn advance(&mut self, delta: f32) -> AdvanceOutcome {
        let mut outcome = AdvanceOutcome::default();
        if self.cell.borrow().paused {
            return outcome;
        }

        // The borrow must not be held across the action call: the action may
        // itself own a handle onto this same cell.
        // 不能在调用动作期间持有借用：动作自身可能持有指向同一状态单元的句柄。
        let remaining = {
            let mut cell = self.cell.borrow_mut();
            cell.remaining_lifetime -= delta;
            cell.remaining_lifetime
        };

        match &mut self.kind {
            TimerKind::OneShot => {
                if remaining < 0.0 {
                    outcome.fired = true;
                    outcome.error = self.action.fire().err();
                    self.expired = true;
                }
            }
            TimerKind::Repeating {
                interval_remaining,
                interval_length,
                pending_destroy,
            } => {
                *interval_remaining -= delta;
                if *interval_remaining <= 0.0 {
                    outcome.fired = true;
                    outcome.error = self.action.fire().err();
                    // Additive reset: overshoot carries into the next
                    // interval, even when the action failed.
                    // 加法重置：超出量结转到下一个间隔，动作失败时也一样。
                    *interval_remaining += *interval_length;
                }
                if *pending_destroy {
                    self.expired = true;
                }
                if remaining < 0.0 {
                    *pending_destroy = true;
                }
            }
        }

        outcome
    }
}
