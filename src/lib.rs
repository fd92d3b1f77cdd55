#![no_std]

#[macro_use]
mod fmt;

pub mod config;
pub mod event;
pub mod gpio;

pub use config::*;
pub use event::{ButtonEvent, EventHandler, EventKind, Handlers, TaggedEvent};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Instant, Ticker};

/// 一个trait，抽象了可以随时报告按钮是否被按下的硬件源。
pub trait ButtonDriver {
    type Error;

    fn is_pressed(&mut self) -> Result<bool, Self::Error>;
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Idle,
    /// 已按下，正在计数点击，可能升级为 `LongPressed`。
    CountingDown,
    /// 已释放，等待下一次点击或点击时间耗尽。
    CountingUp,
    /// 按住超过长按时间，只有释放时才会离开。
    LongPressed,
}

/// 轮询式按钮状态机。
///
/// 以短于最小配置时间的周期调用 [`tick`](Button::tick)。
/// 每次 tick 采样驱动、推进状态机，并在返回前执行已注册的处理函数。
pub struct Button<D: ButtonDriver> {
    driver: D,
    id: u8,
    config: ButtonConfig,
    handlers: Handlers<D>,

    state: ButtonState,
    pressed: bool,
    start_time: Instant,
    last_transition: Option<Instant>,
    clicks: u8,
}

impl<D: ButtonDriver> Button<D> {
    pub fn new(driver: D) -> Self {
        Self::with_config(driver, ButtonConfig::default())
    }

    pub fn with_config(driver: D, config: ButtonConfig) -> Self {
        Self {
            driver,
            id: 0,
            config,
            handlers: Handlers::new(),
            state: ButtonState::Idle,
            pressed: false,
            start_time: Instant::from_ticks(0),
            last_transition: None,
            clicks: 0,
        }
    }

    /// 设置按钮ID，可通过 [`id`](Button::id) 读取，并随 [`TaggedEvent`] 发送。
    pub fn with_id(mut self, id: u8) -> Self {
        self.id = id;
        self
    }

    pub fn set_debounce_time(&mut self, time: Duration) {
        self.config.debounce = time;
    }

    pub fn set_click_time(&mut self, time: Duration) {
        self.config.click_time = time;
    }

    pub fn set_long_press_time(&mut self, time: Duration) {
        self.config.long_press_time = time;
    }

    pub fn set_config(&mut self, new_config: ButtonConfig) {
        self.config = new_config;
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    /// 每次确认按下或释放时最先触发。
    pub fn attach_transition(&mut self, handler: EventHandler<D>) {
        self.handlers.set(EventKind::Transition, handler);
    }

    /// 每次非长按结束的释放时触发，在跳变事件之后。
    pub fn attach_each_click(&mut self, handler: EventHandler<D>) {
        self.handlers.set(EventKind::EachClick, handler);
    }

    /// 所有点击计数完成后触发；在处理函数中通过 [`clicks`](Button::clicks) 读取次数。
    pub fn attach_done_clicking(&mut self, handler: EventHandler<D>) {
        self.handlers.set(EventKind::DoneClicking, handler);
    }

    pub fn attach_single_click(&mut self, handler: EventHandler<D>) {
        self.handlers.set(EventKind::SingleClick, handler);
    }

    pub fn attach_double_click(&mut self, handler: EventHandler<D>) {
        self.handlers.set(EventKind::DoubleClick, handler);
    }

    pub fn attach_long_press_start(&mut self, handler: EventHandler<D>) {
        self.handlers.set(EventKind::LongPressStart, handler);
    }

    /// 长按状态下每次 tick 都会触发，无论本次是否采样引脚。
    pub fn attach_during_long_press(&mut self, handler: EventHandler<D>) {
        self.handlers.set(EventKind::DuringLongPress, handler);
    }

    pub fn attach_long_press_end(&mut self, handler: EventHandler<D>) {
        self.handlers.set(EventKind::LongPressEnd, handler);
    }

    pub fn detach(&mut self, kind: EventKind) {
        self.handlers.clear(kind);
    }

    pub fn handlers(&self) -> &Handlers<D> {
        &self.handlers
    }

    /// 重置按钮状态到初始空闲状态，丢弃进行中的手势。
    ///
    /// 配置、处理函数和上次跳变时间保持不变。
    pub fn reset(&mut self) {
        self.state = ButtonState::Idle;
        self.start_time = Instant::from_ticks(0);
        self.clicks = 0;
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// 与 [`tick`](Button::tick) 相同，但当前时间由调用方提供。
    pub fn tick_at(&mut self, now: Instant) {
        self.step(now, &mut |_, _| {});
    }

    /// 以 `period` 为周期持续 tick，除了调用已注册的处理函数，
    /// 还会把每个事件转发到 `sender`。
    ///
    /// 通道已满时事件会被丢弃。
    pub async fn run<M: RawMutex, const N: usize>(
        &mut self,
        period: Duration,
        sender: Sender<'_, M, TaggedEvent, N>,
    ) -> ! {
        let mut ticker = Ticker::every(period);
        loop {
            ticker.next().await;
            self.step(Instant::now(), &mut |button, event| {
                if sender.try_send(TaggedEvent { id: button.id, event }).is_err() {
                    warn!("button {}: event channel full, dropping {:?}", button.id, event);
                }
            });
        }
    }

    fn step(&mut self, now: Instant, sink: &mut impl FnMut(&Self, ButtonEvent)) {
        if self.state == ButtonState::LongPressed {
            self.emit(ButtonEvent::DuringLongPress, sink);
        }

        // 第一次确认跳变之前无需消抖
        let since_last_transition = self
            .last_transition
            .map_or(Duration::MAX, |last| now.saturating_duration_since(last));
        if since_last_transition < self.config.debounce {
            return;
        }

        self.pressed = match self.driver.is_pressed() {
            Ok(pressed) => pressed,
            Err(_) => {
                warn!("button {}: pin read failed, skipping sample", self.id);
                return;
            }
        };

        match self.state {
            ButtonState::Idle => {
                if self.pressed {
                    self.start_time = now;
                    self.transition(now, sink);
                }
            }
            ButtonState::CountingDown => {
                if !self.pressed {
                    self.transition(now, sink);
                } else if since_last_transition >= self.config.long_press_time {
                    self.state = ButtonState::LongPressed;
                    debug!("button {}: long press started", self.id);
                    self.emit(ButtonEvent::LongPressStart, sink);
                }
            }
            ButtonState::CountingUp => {
                if self.pressed {
                    self.transition(now, sink);
                } else if since_last_transition >= self.config.click_time {
                    debug!("button {}: done clicking, {} clicks", self.id, self.clicks);
                    self.emit(ButtonEvent::DoneClicking { clicks: self.clicks }, sink);
                    match self.clicks {
                        1 => self.emit(ButtonEvent::SingleClick, sink),
                        2 => self.emit(ButtonEvent::DoubleClick, sink),
                        _ => {}
                    }
                    self.reset();
                }
            }
            ButtonState::LongPressed => {
                if !self.pressed {
                    self.transition(now, sink);
                    debug!("button {}: long press ended", self.id);
                    self.emit(ButtonEvent::LongPressEnd, sink);
                    self.reset();
                }
            }
        }
    }

    /// 每个确认的边沿执行一次。
    fn transition(&mut self, now: Instant, sink: &mut impl FnMut(&Self, ButtonEvent)) {
        // 长按后的释放不算点击
        let click = !self.pressed && self.state != ButtonState::LongPressed;

        if self.pressed {
            self.state = ButtonState::CountingDown;
        } else if click {
            self.state = ButtonState::CountingUp;
            self.clicks = self.clicks.saturating_add(1);
        }

        trace!(
            "button {}: transition to {} at {}ms",
            self.id,
            if self.pressed { "pressed" } else { "released" },
            now.as_millis()
        );
        self.emit(ButtonEvent::Transition { pressed: self.pressed }, sink);
        if click {
            self.emit(ButtonEvent::EachClick { clicks: self.clicks }, sink);
        }

        // 调用方传入更早的时间时，不让上次跳变时间倒退
        self.last_transition = Some(self.last_transition.map_or(now, |last| last.max(now)));
    }

    fn emit(&self, event: ButtonEvent, sink: &mut impl FnMut(&Self, ButtonEvent)) {
        if let Some(handler) = self.handlers.get(event.kind()) {
            handler(self);
        }
        sink(self, event);
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    /// 当前手势中已计数的点击次数
    pub fn clicks(&self) -> u8 {
        self.clicks
    }

    /// 最近一次有效采样时按钮是否按下
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_long_pressed(&self) -> bool {
        self.state == ButtonState::LongPressed
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// 当前手势第一次按下的时间
    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    /// 上次确认按下或释放的时间，第一次之前为 `None`
    pub fn last_transition_time(&self) -> Option<Instant> {
        self.last_transition
    }

    /// 获取底层驱动的不可变引用
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// 获取底层驱动的可变引用
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

/// 只有同一个实例才相等（比较地址而非配置）。
impl<D: ButtonDriver> PartialEq for Button<D> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self, other)
    }
}

impl<D: ButtonDriver> Eq for Button<D> {}
