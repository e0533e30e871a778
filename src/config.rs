//! 定义了注册表的可配置参数。
//! Defines configurable parameters for the registry.

/// How `TimerRegistry::tick` surfaces an action failure.
///
/// `TimerRegistry::tick` 如何上报动作失败。
///
/// The advance pass always completes either way; every live timer is advanced
/// exactly once per tick regardless of failures.
/// 无论采用哪种策略，推进阶段都会完整执行；每次tick中每个存活的定时器都
/// 恰好被推进一次。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionErrorPolicy {
    /// Return the first failure (in advance order) to the caller once the
    /// tick has finished its advance and removal phases.
    /// 在tick完成推进与移除两个阶段后，把（按推进顺序）第一个失败返回给调用者。
    #[default]
    Propagate,
    /// Log every failure at warn level and keep `tick` returning `Ok`.
    /// 以warn级别记录每个失败，使 `tick` 始终返回 `Ok`。
    LogOnly,
}

/// A structure containing all configurable parameters for a timer registry.
///
/// 包含定时器注册表所有可配置参数的结构体。
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of timer slots to pre-allocate in the active set.
    /// 活动集合中预分配的定时器槽位数量。
    pub initial_capacity: usize,

    /// What to do when a fired action reports a failure.
    /// 触发的动作报告失败时的处理方式。
    pub action_error_policy: ActionErrorPolicy,
}

impl Default for Config {
    /// Creates a configuration suitable for a typical frame loop.
    ///
    /// 创建适用于典型帧循环的配置。
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            action_error_policy: ActionErrorPolicy::Propagate,
        }
    }
}
