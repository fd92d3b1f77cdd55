use crate::{Button, ButtonDriver};

/// [`Button::tick`] 产生的通知。
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// 消抖后的状态发生变化，每个确认的边沿最先触发。
    Transition { pressed: bool },
    /// 非长按状态下释放，`clicks` 已包含本次点击。
    EachClick { clicks: u8 },
    /// 按钮保持释放达到点击时间，计数结束。
    DoneClicking { clicks: u8 },
    SingleClick,
    DoubleClick,
    /// 按住达到长按时间，每个手势只触发一次。
    LongPressStart,
    /// 长按状态下每次 tick 都触发，在消抖判断之前。
    DuringLongPress,
    /// 从长按状态释放，在跳变事件之后触发。
    LongPressEnd,
}

impl ButtonEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ButtonEvent::Transition { .. } => EventKind::Transition,
            ButtonEvent::EachClick { .. } => EventKind::EachClick,
            ButtonEvent::DoneClicking { .. } => EventKind::DoneClicking,
            ButtonEvent::SingleClick => EventKind::SingleClick,
            ButtonEvent::DoubleClick => EventKind::DoubleClick,
            ButtonEvent::LongPressStart => EventKind::LongPressStart,
            ButtonEvent::DuringLongPress => EventKind::DuringLongPress,
            ButtonEvent::LongPressEnd => EventKind::LongPressEnd,
        }
    }
}

/// 附带按钮ID的事件，由 [`Button::run`] 发送。
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedEvent {
    pub id: u8,
    pub event: ButtonEvent,
}

/// 标识一个处理函数槽位。
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Transition,
    EachClick,
    DoneClicking,
    SingleClick,
    DoubleClick,
    LongPressStart,
    DuringLongPress,
    LongPressEnd,
}

impl EventKind {
    pub const COUNT: usize = 8;

    pub const ALL: [EventKind; Self::COUNT] = [
        EventKind::Transition,
        EventKind::EachClick,
        EventKind::DoneClicking,
        EventKind::SingleClick,
        EventKind::DoubleClick,
        EventKind::LongPressStart,
        EventKind::DuringLongPress,
        EventKind::LongPressEnd,
    ];
}

/// 在 `tick` 内同步调用的处理函数。
///
/// 参数是触发事件的按钮，因此多个按钮可以共用一个处理函数，
/// 并通过 `==` 或 [`Button::id`] 区分。
pub type EventHandler<D> = fn(&Button<D>);

/// 每种 [`EventKind`] 最多一个处理函数。
pub struct Handlers<D: ButtonDriver> {
    slots: [Option<EventHandler<D>>; EventKind::COUNT],
}

impl<D: ButtonDriver> Handlers<D> {
    pub const fn new() -> Self {
        Self {
            slots: [None; EventKind::COUNT],
        }
    }

    /// 为 `kind` 设置处理函数，返回被替换的旧函数。
    pub fn set(&mut self, kind: EventKind, handler: EventHandler<D>) -> Option<EventHandler<D>> {
        self.slots[kind as usize].replace(handler)
    }

    pub fn clear(&mut self, kind: EventKind) -> Option<EventHandler<D>> {
        self.slots[kind as usize].take()
    }

    pub fn get(&self, kind: EventKind) -> Option<EventHandler<D>> {
        self.slots[kind as usize]
    }

    pub fn is_attached(&self, kind: EventKind) -> bool {
        self.slots[kind as usize].is_some()
    }
}

impl<D: ButtonDriver> Default for Handlers<D> {
    fn default() -> Self {
        Self::new()
    }
}
