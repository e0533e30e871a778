//! 注册表统计信息
//! Registry statistics

/// Counters describing a registry's activity since creation.
/// 描述注册表自创建以来活动情况的计数器。
#[derive(Debug, Clone, Default)]
pub struct RegistryStats {
    /// Timers currently live in the registry.
    /// 注册表中当前存活的定时器数。
    pub live_timers: usize,
    /// Total `tick` calls observed.
    /// 观察到的 `tick` 调用总数。
    pub ticks: u64,
    /// Total action invocations, across one-shot and repeating firings.
    /// 动作被调用的总次数，包含一次性与重复触发。
    pub fired_actions: u64,
    /// Timers removed after reaching their terminal state.
    /// 因进入终止状态而被移除的定时器数。
    pub expired_timers: u64,
    /// Timers removed by cancellation before expiry.
    /// 在到期前被取消移除的定时器数。
    pub cancelled_timers: u64,
}

impl std::fmt::Display for RegistryStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RegistryStats {{ live: {}, ticks: {}, fired: {}, expired: {}, cancelled: {} }}",
            self.live_timers, self.ticks, self.fired_actions, self.expired_timers, self.cancelled_timers
        )
    }
}
