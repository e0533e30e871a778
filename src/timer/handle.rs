//! 定时器查询句柄
//! Timer query handle
//!
//! 注册表在调度时返回句柄，调用者用它直接查询单个定时器的状态，而无需
//! 按名称查找。句柄与注册表条目共享倒计时状态；条目被移除后，句柄继续
//! 回答最后一次观察到的值。
//!
//! The registry returns a handle at scheduling time; callers use it to query
//! a single timer's state directly, without a name lookup. The handle shares
//! the countdown cell with the registry entry; after the entry is removed the
//! handle keeps answering with the last observed values.

use std::cell::RefCell;
use std::rc::Rc;

use crate::timer::entry::{CountdownCell, TimerEntryId};

/// Cheap clonable handle onto a scheduled timer.
/// 指向已调度定时器的轻量可克隆句柄。
#[derive(Debug, Clone)]
pub struct TimerHandle {
    entry_id: TimerEntryId,
    name: Option<String>,
    cell: Rc<RefCell<CountdownCell>>,
}

impl TimerHandle {
    /// 创建新的定时器句柄
    /// Create new timer handle
    pub(crate) fn new(
        entry_id: TimerEntryId,
        name: Option<String>,
        cell: Rc<RefCell<CountdownCell>>,
    ) -> Self {
        Self {
            entry_id,
            name,
            cell,
        }
    }

    /// Id of the timer this handle points at.
    /// 该句柄指向的定时器ID。
    pub fn entry_id(&self) -> TimerEntryId {
        self.entry_id
    }

    /// Name given at scheduling time, if any.
    /// 调度时给定的名称（如果有）。
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Seconds left on the lifetime countdown. Negative once expired; never
    /// clamped at zero.
    /// 生命周期倒计时剩余的秒数。到期后为负值；不会在零处截断。
    pub fn remaining_time(&self) -> f32 {
        self.cell.borrow().remaining_lifetime
    }

    /// Whether the countdown is currently frozen.
    /// 倒计时当前是否被冻结。
    pub fn is_paused(&self) -> bool {
        self.cell.borrow().paused
    }
}
