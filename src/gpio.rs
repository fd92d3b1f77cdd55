use embedded_hal::digital::{ErrorType, InputPin};

use crate::ButtonDriver;

/// 定义GPIO按钮的有效电平。
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveLevel {
    /// 低电平有效（例如，使用上拉电阻，按下时引脚接地）。
    Low,
    /// 高电平有效（例如，使用下拉电阻，按下时引脚接VCC）。
    High,
}

/// 交给按钮之前，引脚需要配置的输入模式。
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pull {
    None,
    Up,
}

impl ActiveLevel {
    /// 该有效电平下HAL引脚应配置的上下拉。
    ///
    /// 低电平有效的按钮依赖内部上拉；高电平有效的按钮需要外部下拉。
    pub fn pull(self) -> Pull {
        match self {
            ActiveLevel::Low => Pull::Up,
            ActiveLevel::High => Pull::None,
        }
    }
}

/// 一个直接由GPIO输入引脚驱动的按钮。
///
/// 封装了一个 `InputPin`，并实现了 `ButtonDriver` trait。
pub struct GpioButton<P: InputPin> {
    pin: P,
    active_level: ActiveLevel,
}

impl<P: InputPin> GpioButton<P> {
    /// 创建一个新的GPIO按钮。
    ///
    /// # 参数
    /// * `pin`: 一个已配置好的 `InputPin`。引脚的电气模式由HAL类型决定，
    ///   请在调用前按 `active_level.pull()` 配置一次。
    /// * `active_level`: 按钮按下时的有效电平。
    pub fn new(pin: P, active_level: ActiveLevel) -> Self {
        Self { pin, active_level }
    }

    pub fn active_level(&self) -> ActiveLevel {
        self.active_level
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    /// 释放并返回引脚
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> ButtonDriver for GpioButton<P> {
    type Error = <P as ErrorType>::Error;

    fn is_pressed(&mut self) -> Result<bool, Self::Error> {
        match self.active_level {
            ActiveLevel::Low => self.pin.is_low(),
            ActiveLevel::High => self.pin.is_high(),
        }
    }
}
