//! 定时器调度核心的单元测试
//! Unit tests for the timer scheduling core

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::{ActionErrorPolicy, Config};
use crate::error::Error;
use crate::timer::{FallibleAction, NoOpAction, TimerEntryId, TimerObserver, TimerRegistry};

/// Returns a counter cell together with an action that increments it.
fn counting_action() -> (Rc<Cell<u32>>, impl FnMut()) {
    let count = Rc::new(Cell::new(0u32));
    let in_action = Rc::clone(&count);
    (count, move || in_action.set(in_action.get() + 1))
}

#[test]
fn one_shot_fires_once_and_is_removed() {
    let mut registry = TimerRegistry::new();
    let (count, action) = counting_action();
    registry.create_one_shot(action, 1.0, Some("attack"));

    registry.tick(0.4).unwrap();
    registry.tick(0.4).unwrap();
    assert_eq!(count.get(), 0);
    assert_eq!(registry.len(), 1);

    // 累计 1.2 > 1.0：第三次tick触发，定时器随即消失
    // Cumulative 1.2 > 1.0: the third tick fires and the timer is gone
    registry.tick(0.4).unwrap();
    assert_eq!(count.get(), 1);
    assert_eq!(registry.len(), 0);

    registry.tick(10.0).unwrap();
    assert_eq!(count.get(), 1, "a one-shot fires exactly once");
}

#[test]
fn expiry_requires_crossing_below_zero() {
    let mut registry = TimerRegistry::new();
    let (count, action) = counting_action();
    registry.create_one_shot(action, 1.0, None);

    registry.tick(1.0).unwrap();
    assert_eq!(count.get(), 0, "remaining hit exactly zero, must not fire yet");
    registry.tick(0.0).unwrap();
    assert_eq!(count.get(), 0, "a zero delta keeps remaining at zero");
    registry.tick(0.25).unwrap();
    assert_eq!(count.get(), 1);
}

#[test]
fn negative_lifetime_fires_on_the_very_next_tick() {
    let mut registry = TimerRegistry::new();
    let (count, action) = counting_action();
    registry.create_one_shot(action, -1.0, None);

    registry.tick(0.0).unwrap();
    assert_eq!(count.get(), 1);
    assert!(registry.is_empty());
}

#[test]
fn repeating_keeps_grace_tick_for_final_interval() {
    let mut registry = TimerRegistry::new();
    let (count, action) = counting_action();
    registry.create_repeating(action, 1.0, 0.5, Some("dot"));

    registry.tick(0.3).unwrap(); // 0.3 elapsed
    assert_eq!(count.get(), 0);
    registry.tick(0.3).unwrap(); // 0.6 → first interval firing
    assert_eq!(count.get(), 1);
    registry.tick(0.3).unwrap(); // 0.9
    assert_eq!(count.get(), 1);
    registry.tick(0.3).unwrap(); // 1.2 → second firing; lifetime exhausted
    assert_eq!(count.get(), 2);
    assert_eq!(registry.len(), 1, "grace tick keeps the timer alive");

    // 宽限tick：与销毁重合的最后一次间隔触发不能丢失
    // Grace tick: the final interval firing coinciding with destruction must
    // not be dropped
    registry.tick(0.3).unwrap();
    assert_eq!(count.get(), 3);
    assert_eq!(registry.len(), 0);
}

#[test]
fn repeating_fire_count_is_floor_ratio_plus_one() {
    let mut registry = TimerRegistry::new();
    let (count, action) = counting_action();
    registry.create_repeating(action, 1.0, 0.5, None);

    let mut ticks = 0;
    while !registry.is_empty() {
        registry.tick(0.25).unwrap();
        ticks += 1;
        assert!(ticks < 100, "repeating timer never expired");
    }
    // floor(1.0 / 0.5) + 1 firings with this tick granularity
    assert_eq!(count.get(), 3);
}

#[test]
fn interval_reset_is_additive_and_preserves_overshoot() {
    let mut registry = TimerRegistry::new();
    let (count, action) = counting_action();
    registry.create_repeating(action, 10.0, 0.5, None);

    registry.tick(0.8).unwrap();
    assert_eq!(count.get(), 1);
    // 0.3 的超出量结转：下一次触发只差约 0.2 秒，而不是重新等满 0.5 秒
    // The 0.3 overshoot carries over: the next firing is ~0.2s away, not a
    // fresh 0.5s
    registry.tick(0.2).unwrap();
    assert_eq!(count.get(), 2);
}

#[test]
fn non_positive_interval_fires_every_tick() {
    let mut registry = TimerRegistry::new();
    let (count, action) = counting_action();
    registry.create_repeating(action, 1.0, 0.0, None);

    for _ in 0..3 {
        registry.tick(0.25).unwrap();
    }
    assert_eq!(count.get(), 3);
}

#[test]
fn pause_freezes_countdown_and_resume_restores_it() {
    let mut registry = TimerRegistry::new();
    let (count, action) = counting_action();
    let handle = registry.create_one_shot(action, 1.0, Some("boss"));

    registry.tick(0.25).unwrap();
    let frozen = handle.remaining_time();
    registry.pause_all();
    assert!(handle.is_paused());

    for _ in 0..10 {
        registry.tick(5.0).unwrap();
    }
    assert_eq!(handle.remaining_time(), frozen);
    assert_eq!(count.get(), 0);

    registry.resume_all();
    assert!(!handle.is_paused());
    registry.tick(0.25).unwrap();
    assert_eq!(handle.remaining_time(), frozen - 0.25);
    registry.tick(1.0).unwrap();
    assert_eq!(count.get(), 1);
    assert!(registry.is_empty());
}

#[test]
fn pause_freezes_repeating_interval_too() {
    let mut registry = TimerRegistry::new();
    let (count, action) = counting_action();
    registry.create_repeating(action, 10.0, 0.5, Some("dot"));

    registry.tick(0.25).unwrap();
    assert_eq!(registry.pause_by_name("dot"), 1);
    for _ in 0..5 {
        registry.tick(1.0).unwrap();
    }
    assert_eq!(count.get(), 0, "paused interval countdown must not advance");

    assert_eq!(registry.resume_by_name("dot"), 1);
    registry.tick(0.25).unwrap();
    assert_eq!(count.get(), 1, "interval resumed exactly where it left off");
}

#[test]
fn cancel_only_first_match_pause_affects_all() {
    let mut registry = TimerRegistry::new();
    let (count_a, action_a) = counting_action();
    let (count_b, action_b) = counting_action();
    let (count_c, action_c) = counting_action();
    registry.create_one_shot(action_a, 1.0, Some("wave"));
    registry.create_one_shot(action_b, 1.0, Some("wave"));
    registry.create_one_shot(action_c, 1.0, Some("other"));

    // Pause/resume act on every timer sharing the name.
    assert_eq!(registry.pause_by_name("wave"), 2);
    assert_eq!(registry.resume_by_name("wave"), 2);

    // 取消只命中插入顺序中的第一个同名定时器——与暂停/恢复刻意不对称
    // Cancel hits only the first matching timer in insertion order, a
    // deliberate asymmetry with pause/resume
    assert!(registry.cancel_by_name("wave"));
    assert_eq!(registry.len(), 2);

    registry.tick(1.5).unwrap();
    assert_eq!(count_a.get(), 0, "cancelled timer must not fire");
    assert_eq!(count_b.get(), 1, "duplicate name survives a cancel");
    assert_eq!(count_c.get(), 1);
}

#[test]
fn lookups_on_empty_registry_are_harmless() {
    let mut registry = TimerRegistry::new();

    assert!(!registry.cancel_by_name("ghost"));
    assert_eq!(registry.pause_by_name("ghost"), 0);
    assert_eq!(registry.resume_by_name("ghost"), 0);
    registry.pause_all();
    registry.resume_all();
    registry.tick(1.0).unwrap();
    assert_eq!(registry.cancel_all(), 0);
    assert!(registry.is_empty());
}

#[test]
fn cancel_miss_on_populated_registry_returns_false() {
    let mut registry = TimerRegistry::new();
    registry.create_one_shot(NoOpAction, 1.0, Some("present"));

    assert!(!registry.cancel_by_name("missing"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn unnamed_timers_are_invisible_to_name_lookups() {
    let mut registry = TimerRegistry::new();
    registry.create_one_shot(NoOpAction, 1.0, None);

    assert!(!registry.cancel_by_name(""));
    assert_eq!(registry.pause_by_name(""), 0);
}

#[test]
fn failing_action_propagates_and_timer_is_still_removed() {
    let mut registry = TimerRegistry::new();
    registry.create_one_shot(
        FallibleAction::new(|| Err("payload lost".into())),
        0.5,
        Some("fragile"),
    );

    let err = registry.tick(1.0).unwrap_err();
    match err {
        Error::ActionFailed { timer_id, name, .. } => {
            assert_eq!(timer_id, 1);
            assert_eq!(name.as_deref(), Some("fragile"));
        }
    }
    // 失败的动作不能泄漏定时器状态
    // A failing action must not leak timer state
    assert!(registry.is_empty());
}

#[test]
fn failing_repeating_action_still_reschedules() {
    let mut registry = TimerRegistry::new();
    let fails = Rc::new(Cell::new(0u32));
    let in_action = Rc::clone(&fails);
    registry.create_repeating(
        FallibleAction::new(move || {
            in_action.set(in_action.get() + 1);
            Err("flaky".into())
        }),
        10.0,
        0.5,
        None,
    );

    assert!(registry.tick(0.5).is_err());
    assert_eq!(fails.get(), 1);
    assert_eq!(registry.len(), 1, "a repeating timer survives its failure");

    assert!(registry.tick(0.5).is_err());
    assert_eq!(fails.get(), 2, "the interval was reset despite the failure");
}

#[test]
fn log_only_policy_keeps_tick_infallible() {
    let mut registry = TimerRegistry::with_config(Config {
        action_error_policy: ActionErrorPolicy::LogOnly,
        ..Config::default()
    });
    registry.create_one_shot(FallibleAction::new(|| Err("ignored".into())), 0.0, None);

    registry.tick(0.1).unwrap();
    assert!(registry.is_empty());
}

#[test]
fn observer_sees_lifecycle_transitions() {
    struct Recorder(Rc<RefCell<Vec<&'static str>>>);
    impl TimerObserver for Recorder {
        fn on_scheduled(&mut self, _id: TimerEntryId, _name: Option<&str>) {
            self.0.borrow_mut().push("scheduled");
        }
        fn on_fired(&mut self, _id: TimerEntryId, _name: Option<&str>) {
            self.0.borrow_mut().push("fired");
        }
        fn on_expired(&mut self, _id: TimerEntryId, _name: Option<&str>) {
            self.0.borrow_mut().push("expired");
        }
        fn on_cancelled(&mut self, _id: TimerEntryId, _name: Option<&str>) {
            self.0.borrow_mut().push("cancelled");
        }
        fn on_paused(&mut self, _id: TimerEntryId, _name: Option<&str>) {
            self.0.borrow_mut().push("paused");
        }
        fn on_resumed(&mut self, _id: TimerEntryId, _name: Option<&str>) {
            self.0.borrow_mut().push("resumed");
        }
    }

    let events: Rc<RefCell<Vec<&'static str>>> = Rc::default();
    let mut registry = TimerRegistry::new();
    registry.set_observer(Recorder(Rc::clone(&events)));

    registry.create_one_shot(NoOpAction, 1.0, Some("a"));
    registry.create_one_shot(NoOpAction, 5.0, Some("b"));
    registry.pause_by_name("b");
    registry.resume_by_name("b");
    registry.tick(1.5).unwrap();
    registry.cancel_by_name("b");

    assert_eq!(
        *events.borrow(),
        vec!["scheduled", "scheduled", "paused", "resumed", "fired", "expired", "cancelled"]
    );
}

#[test]
fn handles_stay_answerable_after_removal() {
    let mut registry = TimerRegistry::new();
    let handle = registry.create_one_shot(NoOpAction, 1.0, Some("ui"));
    assert_eq!(handle.entry_id(), 1);
    assert_eq!(handle.name(), Some("ui"));
    assert_eq!(handle.remaining_time(), 1.0);
    assert!(!handle.is_paused());

    registry.tick(1.5).unwrap();
    assert!(registry.is_empty());
    // 句柄冻结最后一次观察到的倒计时值
    // The handle freezes the last observed countdown value
    assert_eq!(handle.remaining_time(), -0.5);
    assert!(!handle.is_paused());
}

#[test]
fn cancel_all_empties_registry_without_firing() {
    let mut registry = TimerRegistry::new();
    let (count, action) = counting_action();
    registry.create_one_shot(action, 0.1, Some("a"));
    registry.create_repeating(NoOpAction, 1.0, 0.1, Some("b"));
    registry.create_one_shot(NoOpAction, 0.1, None);

    assert_eq!(registry.cancel_all(), 3);
    assert!(registry.is_empty());
    assert_eq!(count.get(), 0);
}

#[test]
fn stats_track_activity() {
    let mut registry = TimerRegistry::new();
    let (_count, action) = counting_action();
    registry.create_one_shot(action, 0.5, None);
    registry.create_one_shot(NoOpAction, 99.0, Some("idle"));
    registry.create_repeating(NoOpAction, 99.0, 1.0, None);

    registry.tick(1.0).unwrap();
    assert!(registry.cancel_by_name("idle"));

    let stats = registry.stats();
    assert_eq!(stats.live_timers, 1);
    assert_eq!(stats.ticks, 1);
    assert_eq!(stats.fired_actions, 2);
    assert_eq!(stats.expired_timers, 1);
    assert_eq!(stats.cancelled_timers, 1);
    assert_eq!(
        stats.to_string(),
        "RegistryStats { live: 1, ticks: 1, fired: 2, expired: 1, cancelled: 1 }"
    );
}
