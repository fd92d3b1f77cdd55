use embassy_time::Duration;

/// 按钮状态机的时间参数。
///
/// 三个时间窗口都从最近一次确认的按下/释放跳变开始计算，
/// 而不是从手势开始时计算。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// 消抖持续时间。
    ///
    /// 确认一次跳变后，在此时间段内不再采样引脚，
    /// 以忽略机械触点的抖动。为零时信任每一次采样。
    pub debounce: Duration,

    /// 点击时间。
    ///
    /// 最后一次点击后按钮需要保持释放的时长，之后点击计数结束，
    /// 并触发 `DoneClicking`、`SingleClick` 或 `DoubleClick`。
    pub click_time: Duration,

    /// 进入长按状态所需的最短按下时间。
    pub long_press_time: Duration,
}

impl ButtonConfig {
    pub const DEFAULT_DEBOUNCE_MS: u64 = 50;
    pub const DEFAULT_CLICK_MS: u64 = 150;
    pub const DEFAULT_LONG_PRESS_MS: u64 = 1000;
}

impl Default for ButtonConfig {
    /// 提供一套合理的默认配置。
    ///
    /// - 消抖: 50ms
    /// - 点击时间: 150ms
    /// - 长按阈值: 1000ms
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(Self::DEFAULT_DEBOUNCE_MS),
            click_time: Duration::from_millis(Self::DEFAULT_CLICK_MS),
            long_press_time: Duration::from_millis(Self::DEFAULT_LONG_PRESS_MS),
        }
    }
}
