//! 定时器动作类型定义
//! Timer action type definitions
//!
//! 调度器把每个动作当作不透明的零参数可调用对象；本模块提供对应的trait、
//! 针对普通闭包的覆盖实现，以及可失败闭包与空操作的适配器。
//!
//! The scheduler treats every action as an opaque zero-argument callable;
//! this module provides the trait, a blanket impl for plain closures, and
//! adapters for fallible closures and no-op actions.

/// Error type an action may report when it fires.
/// 动作触发时可能报告的错误类型。
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// The zero-argument callable a timer invokes on each firing event.
///
/// 定时器在每次触发事件时调用的零参数可调用对象。
///
/// A failure surfaces to the caller of `TimerRegistry::tick`; the timer that
/// fired still completes its normal state transition either way.
pub trait TimerAction: 'static {
    /// Run the action once.
    /// 执行一次动作。
    fn fire(&mut self) -> Result<(), ActionError>;
}

/// Every plain `FnMut()` closure is an infallible action.
/// 每个普通的 `FnMut()` 闭包都是一个不会失败的动作。
impl<F> TimerAction for F
where
    F: FnMut() + 'static,
{
    fn fire(&mut self) -> Result<(), ActionError> {
        self();
        Ok(())
    }
}

/// 基于可失败闭包的动作实现
/// Fallible closure-based action implementation
pub struct FallibleAction<F>
where
    F: FnMut() -> Result<(), ActionError> + 'static,
{
    action: F,
}

impl<F> FallibleAction<F>
where
    F: FnMut() -> Result<(), ActionError> + 'static,
{
    /// 创建新的可失败动作
    /// Create new fallible action
    pub fn new(action: F) -> Self {
        Self { action }
    }
}

impl<F> std::fmt::Debug for FallibleAction<F>
where
    F: FnMut() -> Result<(), ActionError> + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallibleAction")
            .field("action", &"<closure>")
            .finish()
    }
}

impl<F> TimerAction for FallibleAction<F>
where
    F: FnMut() -> Result<(), ActionError> + 'static,
{
    fn fire(&mut self) -> Result<(), ActionError> {
        (self.action)()
    }
}

/// 空动作实现（用于测试或只关心到期事件本身的场景）
/// No-op action implementation (for tests or callers that only care about
/// the expiry event itself)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpAction;

impl TimerAction for NoOpAction {
    fn fire(&mut self) -> Result<(), ActionError> {
        Ok(())
    }
}
