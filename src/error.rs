//! 定义了库中所有可能的错误类型。
//! Defines all possible error types in the library.

use crate::timer::{ActionError, TimerEntryId};
use thiserror::Error;

/// The primary error type for the timer scheduler library.
/// 定时器调度库的主要错误类型。
///
/// The scheduler itself is total: lookup misses and degenerate lifetimes or
/// intervals are not errors. The only failure that can surface is one
/// reported by a scheduled action when it fires.
///
/// 调度器本身是全函数式的：查找未命中以及退化的生命周期或间隔都不是错误。
/// 唯一可能出现的失败来自计划动作在触发时的报告。
#[derive(Debug, Error)]
pub enum Error {
    /// A scheduled action reported a failure when its timer fired. The timer
    /// still completed its normal state transition before this surfaced.
    /// 定时器触发时，计划动作报告了失败。该定时器在此错误浮出之前仍然完成了
    /// 正常的状态转换。
    #[error("action of timer {timer_id} failed")]
    ActionFailed {
        /// Id of the timer whose action failed.
        /// 动作失败的定时器ID。
        timer_id: TimerEntryId,
        /// Name given at scheduling time, if any.
        /// 调度时给定的名称（如果有）。
        name: Option<String>,
        /// The underlying failure reported by the action.
        /// 动作报告的底层失败。
        #[source]
        source: ActionError,
    },
}

/// A specialized `Result` type for this library.
/// 本库专用的 `Result` 类型。
pub type Result<T> = std::result::Result<T, Error>;
