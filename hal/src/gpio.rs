//! General purpose input-output pins

use crate::pac;
use core::ptr::{read_volatile, write_volatile};
use cortex_m::interrupt::CriticalSection;

#[cfg(feature = "adc")]
use crate::adc;

/// GPIO output types.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputType {
    /// Push-pull output.
    PushPull = 0b0,
    /// Open-drain output.
    ///
    /// This is typically used with [`Pull::Up`].
    OpenDrain = 0b1,
}

/// GPIO speeds.
///
/// Refer to the device datasheet for the frequency specifications and the power
/// supply and load conditions for each speed.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    /// Low speed.
    Low = 0b00,
    /// Medium speed.
    Medium = 0b01,
    /// Fast speed.
    Fast = 0b10,
    /// High speed.
    High = 0b11,
}

/// GPIO pull-up and pull-down.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// No pull-up, no pull-down.
    None = 0b00,
    /// Pull-up.
    Up = 0b01,
    /// Pull-down.
    Down = 0b10,
}

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct Pin<const BASE: usize, const N: u8> {}

impl<const BASE: usize, const N: u8> Pin<BASE, N> {
    const MODER_R: *const u32 = BASE as *const u32;
    const MODER_W: *mut u32 = BASE as *mut u32;
    const OTYPER_R: *const u32 = (BASE + 0x4) as *const u32;
    const OTYPER_W: *mut u32 = (BASE + 0x4) as *mut u32;
    const OSPEEDR_R: *const u32 = (BASE + 0x8) as *const u32;
    const OSPEEDR_W: *mut u32 = (BASE + 0x8) as *mut u32;
    const PUPDR_R: *const u32 = (BASE + 0xC) as *const u32;
    const PUPDR_W: *mut u32 = (BASE + 0xC) as *mut u32;
    const IDR: *const u32 = (BASE + 0x10) as *const u32;
    const ODR: *const u32 = (BASE + 0x14) as *const u32;
    const BSRR: *mut u32 = (BASE + 0x18) as *mut u32;

    const AF: usize = if N > 7 { BASE + 0x24 } else { BASE + 0x20 };
    const AF_R: *const u32 = Self::AF as *const u32;
    const AF_W: *mut u32 = Self::AF as *mut u32;
    const AF_SHIFT: u8 = if N > 7 { (N - 8) * 4 } else { N * 4 };

    pub(crate) const fn new() -> Pin<BASE, N> {
        Pin {}
    }

    #[inline(always)]
    pub(crate) unsafe fn set_mode(&mut self, _cs: &CriticalSection, mode: sealed::Mode) {
        let mut val: u32 = read_volatile(Self::MODER_R);
        val &= !(0b11 << (N * 2));
        val |= (mode as u8 as u32) << (N * 2);
        write_volatile(Self::MODER_W, val);
    }

    #[inline(always)]
    pub(crate) unsafe fn set_output_type(&mut self, _cs: &CriticalSection, ot: OutputType) {
        let mut val: u32 = read_volatile(Self::OTYPER_R);
        match ot {
            OutputType::PushPull => val &= !(1 << N),
            OutputType::OpenDrain => val |= 1 << N,
        }
        write_volatile(Self::OTYPER_W, val);
    }

    #[inline(always)]
    pub(crate) unsafe fn set_speed(&mut self, _cs: &CriticalSection, speed: Speed) {
        let mut val: u32 = read_volatile(Self::OSPEEDR_R);
        val &= !(0b11 << (N * 2));
        val |= (speed as u8 as u32) << (N * 2);
        write_volatile(Self::OSPEEDR_W, val);
    }

    #[inline(always)]
    pub(crate) unsafe fn set_pull(&mut self, _cs: &CriticalSection, pull: Pull) {
        let mut val: u32 = read_volatile(Self::PUPDR_R);
        val &= !(0b11 << (N * 2));
        val |= (pull as u8 as u32) << (N * 2);
        write_volatile(Self::PUPDR_W, val);
    }

    #[inline(always)]
    pub(crate) fn input_level(&self) -> Level {
        if unsafe { read_volatile(Self::IDR) } & (1 << N) == 0 {
            Level::Low
        } else {
            Level::High
        }
    }

    #[inline(always)]
    pub(crate) fn output_level(&self) -> Level {
        if unsafe { read_volatile(Self::ODR) } & (1 << N) == 0 {
            Level::Low
        } else {
            Level::High
        }
    }

    #[inline(always)]
    pub(crate) fn set_output_level(&mut self, level: Level) {
        let val: u32 = match level {
            Level::Low => 1 << (N + 16),
            Level::High => 1 << N,
        };
        unsafe { write_volatile(Self::BSRR, val) }
    }

    #[inline(always)]
    pub(crate) unsafe fn set_alternate_function(&mut self, cs: &CriticalSection, af: u8) {
        self.set_mode(cs, sealed::Mode::Alternate);
        let mut val: u32 = read_volatile(Self::AF_R);
        val &= !(0b1111 << Self::AF_SHIFT);
        val |= (af as u8 as u32) << Self::AF_SHIFT;
        write_volatile(Self::AF_W, val);
    }
}

pub(crate) mod sealed {
    use super::{CriticalSection, Level, OutputType, Pull, Speed};

    #[cfg(feature = "adc")]
    use super::adc;

    /// GPIO modes.
    #[repr(u8)]
    pub enum Mode {
        Input = 0b00,
        Output = 0b01,
        Alternate = 0b10,
        Analog = 0b11,
    }

    /// This is the same methods as Pin, but in a trait so that the individual
    /// Pin structures can implement it in a light wrapper without putting a ton
    /// of code into the macro which will result in longer compile times.
    pub trait PinOps {
        /// Port index (0 for A, 1 for B, ...) and pin number, used for
        /// extended interrupt line routing.
        const PORT_IDX: u8;
        const PIN: u8;

        unsafe fn steal() -> Self;
        unsafe fn set_mode(&mut self, cs: &CriticalSection, mode: Mode);
        unsafe fn set_output_type(&mut self, cs: &CriticalSection, ot: OutputType);
        unsafe fn set_speed(&mut self, cs: &CriticalSection, speed: Speed);
        unsafe fn set_pull(&mut self, cs: &CriticalSection, pull: Pull);
        fn input_level(&self) -> Level;
        fn output_level(&self) -> Level;
        fn set_output_level(&mut self, level: Level);
        unsafe fn set_alternate_function(&mut self, cs: &CriticalSection, af: u8);
    }

    macro_rules! af_trait {
        ($trt:ident, $method:ident) => {
            pub trait $trt {
                fn $method(&mut self, cs: &CriticalSection);
            }
        };
    }

    af_trait!(Spi1Mosi, set_spi1_mosi_af);
    af_trait!(Spi1Miso, set_spi1_miso_af);
    af_trait!(Spi1Sck, set_spi1_sck_af);
    af_trait!(Spi1Nss, set_spi1_nss_af);
    af_trait!(Spi2Mosi, set_spi2_mosi_af);
    af_trait!(Spi2Miso, set_spi2_miso_af);
    af_trait!(Spi2Sck, set_spi2_sck_af);
    af_trait!(Spi2Nss, set_spi2_nss_af);
    af_trait!(I2c1Sda, set_i2c1_sda_af);
    af_trait!(I2c1Scl, set_i2c1_scl_af);
    af_trait!(I2c2Sda, set_i2c2_sda_af);
    af_trait!(I2c2Scl, set_i2c2_scl_af);
    af_trait!(Uart1Tx, set_uart1_tx_af);
    af_trait!(Uart1Rx, set_uart1_rx_af);
    af_trait!(Uart2Tx, set_uart2_tx_af);
    af_trait!(Uart2Rx, set_uart2_rx_af);
    af_trait!(LpUart1Tx, set_lpuart1_tx_af);
    af_trait!(LpUart1Rx, set_lpuart1_rx_af);

    /// Indicate a GPIO pin can be sampled by the ADC
    #[cfg(feature = "adc")]
    pub trait AdcCh {
        const ADC_CH: adc::Ch;
    }
}

/// GPIO pins
pub mod pins {
    const GPIOA_BASE: usize = 0x5000_0000;
    const GPIOB_BASE: usize = 0x5000_0400;
    const GPIOC_BASE: usize = 0x5000_0800;
    const GPIOD_BASE: usize = 0x5000_0C00;
    const GPIOF_BASE: usize = 0x5000_1400;

    use super::{CriticalSection, Level, OutputType, Pin, Pull, Speed};

    #[cfg(feature = "adc")]
    use super::adc;

    macro_rules! gpio_struct {
        ($name:ident, $base:expr, $port_idx:expr, $n:expr, $doc:expr) => {
            #[doc=$doc]
            #[derive(Debug)]
            #[cfg_attr(feature = "defmt", derive(defmt::Format))]
            pub struct $name {
                pin: Pin<$base, $n>,
            }

            impl $name {
                pub(crate) const fn new() -> Self {
                    $name { pin: Pin::new() }
                }
            }

            impl super::sealed::PinOps for $name {
                const PORT_IDX: u8 = $port_idx;
                const PIN: u8 = $n;

                #[inline(always)]
                unsafe fn steal() -> Self {
                    Self::new()
                }

                #[inline(always)]
                unsafe fn set_mode(&mut self, cs: &CriticalSection, mode: super::sealed::Mode) {
                    self.pin.set_mode(cs, mode)
                }

                #[inline(always)]
                unsafe fn set_output_type(&mut self, cs: &CriticalSection, ot: OutputType) {
                    self.pin.set_output_type(cs, ot)
                }

                #[inline(always)]
                unsafe fn set_speed(&mut self, cs: &CriticalSection, speed: Speed) {
                    self.pin.set_speed(cs, speed)
                }

                #[inline(always)]
                unsafe fn set_pull(&mut self, cs: &CriticalSection, pull: Pull) {
                    self.pin.set_pull(cs, pull)
                }

                #[inline(always)]
                fn input_level(&self) -> Level {
                    self.pin.input_level()
                }

                #[inline(always)]
                fn output_level(&self) -> Level {
                    self.pin.output_level()
                }

                #[inline(always)]
                fn set_output_level(&mut self, level: Level) {
                    self.pin.set_output_level(level)
                }

                #[inline(always)]
                unsafe fn set_alternate_function(&mut self, cs: &CriticalSection, af: u8) {
                    self.pin.set_alternate_function(cs, af)
                }
            }
        };
    }

    gpio_struct!(A0, GPIOA_BASE, 0, 0, "Port A pin 0");
    gpio_struct!(A1, GPIOA_BASE, 0, 1, "Port A pin 1");
    gpio_struct!(A2, GPIOA_BASE, 0, 2, "Port A pin 2");
    gpio_struct!(A3, GPIOA_BASE, 0, 3, "Port A pin 3");
    gpio_struct!(A4, GPIOA_BASE, 0, 4, "Port A pin 4");
    gpio_struct!(A5, GPIOA_BASE, 0, 5, "Port A pin 5");
    gpio_struct!(A6, GPIOA_BASE, 0, 6, "Port A pin 6");
    gpio_struct!(A7, GPIOA_BASE, 0, 7, "Port A pin 7");
    gpio_struct!(A8, GPIOA_BASE, 0, 8, "Port A pin 8");
    gpio_struct!(A9, GPIOA_BASE, 0, 9, "Port A pin 9");
    gpio_struct!(A10, GPIOA_BASE, 0, 10, "Port A pin 10");
    gpio_struct!(A11, GPIOA_BASE, 0, 11, "Port A pin 11");
    gpio_struct!(A12, GPIOA_BASE, 0, 12, "Port A pin 12");
    gpio_struct!(A13, GPIOA_BASE, 0, 13, "Port A pin 13");
    gpio_struct!(A14, GPIOA_BASE, 0, 14, "Port A pin 14");
    gpio_struct!(A15, GPIOA_BASE, 0, 15, "Port A pin 15");

    gpio_struct!(B0, GPIOB_BASE, 1, 0, "Port B pin 0");
    gpio_struct!(B1, GPIOB_BASE, 1, 1, "Port B pin 1");
    gpio_struct!(B2, GPIOB_BASE, 1, 2, "Port B pin 2");
    gpio_struct!(B3, GPIOB_BASE, 1, 3, "Port B pin 3");
    gpio_struct!(B4, GPIOB_BASE, 1, 4, "Port B pin 4");
    gpio_struct!(B5, GPIOB_BASE, 1, 5, "Port B pin 5");
    gpio_struct!(B6, GPIOB_BASE, 1, 6, "Port B pin 6");
    gpio_struct!(B7, GPIOB_BASE, 1, 7, "Port B pin 7");
    gpio_struct!(B8, GPIOB_BASE, 1, 8, "Port B pin 8");
    gpio_struct!(B9, GPIOB_BASE, 1, 9, "Port B pin 9");
    gpio_struct!(B10, GPIOB_BASE, 1, 10, "Port B pin 10");
    gpio_struct!(B11, GPIOB_BASE, 1, 11, "Port B pin 11");
    gpio_struct!(B12, GPIOB_BASE, 1, 12, "Port B pin 12");
    gpio_struct!(B13, GPIOB_BASE, 1, 13, "Port B pin 13");
    gpio_struct!(B14, GPIOB_BASE, 1, 14, "Port B pin 14");
    gpio_struct!(B15, GPIOB_BASE, 1, 15, "Port B pin 15");

    gpio_struct!(C0, GPIOC_BASE, 2, 0, "Port C pin 0");
    gpio_struct!(C1, GPIOC_BASE, 2, 1, "Port C pin 1");
    gpio_struct!(C2, GPIOC_BASE, 2, 2, "Port C pin 2");
    gpio_struct!(C3, GPIOC_BASE, 2, 3, "Port C pin 3");
    gpio_struct!(C4, GPIOC_BASE, 2, 4, "Port C pin 4");
    gpio_struct!(C5, GPIOC_BASE, 2, 5, "Port C pin 5");
    gpio_struct!(C6, GPIOC_BASE, 2, 6, "Port C pin 6");
    gpio_struct!(C7, GPIOC_BASE, 2, 7, "Port C pin 7");
    gpio_struct!(C13, GPIOC_BASE, 2, 13, "Port C pin 13");
    gpio_struct!(C14, GPIOC_BASE, 2, 14, "Port C pin 14");
    gpio_struct!(C15, GPIOC_BASE, 2, 15, "Port C pin 15");

    gpio_struct!(D0, GPIOD_BASE, 3, 0, "Port D pin 0");
    gpio_struct!(D1, GPIOD_BASE, 3, 1, "Port D pin 1");
    gpio_struct!(D2, GPIOD_BASE, 3, 2, "Port D pin 2");
    gpio_struct!(D3, GPIOD_BASE, 3, 3, "Port D pin 3");

    gpio_struct!(F0, GPIOF_BASE, 5, 0, "Port F pin 0");
    gpio_struct!(F1, GPIOF_BASE, 5, 1, "Port F pin 1");
    gpio_struct!(F2, GPIOF_BASE, 5, 2, "Port F pin 2");

    macro_rules! impl_af {
        ($trt:ident, $gpio:ident, $method:ident, $num:expr) => {
            impl super::sealed::$trt for $gpio {
                #[inline(always)]
                fn $method(&mut self, cs: &CriticalSection) {
                    unsafe { self.pin.set_alternate_function(cs, $num) }
                }
            }
        };
    }

    impl_af!(Spi1Nss, A4, set_spi1_nss_af, 0);
    impl_af!(Spi1Sck, A5, set_spi1_sck_af, 0);
    impl_af!(Spi1Miso, A6, set_spi1_miso_af, 0);
    impl_af!(Spi1Mosi, A7, set_spi1_mosi_af, 0);
    impl_af!(Spi1Nss, A15, set_spi1_nss_af, 0);
    impl_af!(Spi1Sck, B3, set_spi1_sck_af, 0);
    impl_af!(Spi1Miso, B4, set_spi1_miso_af, 0);
    impl_af!(Spi1Mosi, B5, set_spi1_mosi_af, 0);

    impl_af!(Spi2Nss, B12, set_spi2_nss_af, 0);
    impl_af!(Spi2Sck, B13, set_spi2_sck_af, 0);
    impl_af!(Spi2Miso, B14, set_spi2_miso_af, 0);
    impl_af!(Spi2Mosi, B15, set_spi2_mosi_af, 0);

    impl_af!(Uart2Tx, A2, set_uart2_tx_af, 1);
    impl_af!(Uart2Rx, A3, set_uart2_rx_af, 1);
    impl_af!(Uart1Tx, A9, set_uart1_tx_af, 1);
    impl_af!(Uart1Rx, A10, set_uart1_rx_af, 1);
    impl_af!(Uart2Tx, A14, set_uart2_tx_af, 1);
    impl_af!(Uart2Rx, A15, set_uart2_rx_af, 1);
    impl_af!(LpUart1Rx, B10, set_lpuart1_rx_af, 1);
    impl_af!(LpUart1Tx, B11, set_lpuart1_tx_af, 1);
    impl_af!(LpUart1Rx, C0, set_lpuart1_rx_af, 1);
    impl_af!(LpUart1Tx, C1, set_lpuart1_tx_af, 1);

    impl_af!(Uart1Tx, B6, set_uart1_tx_af, 0);
    impl_af!(Uart1Rx, B7, set_uart1_rx_af, 0);

    impl_af!(LpUart1Tx, A2, set_lpuart1_tx_af, 6);
    impl_af!(LpUart1Rx, A3, set_lpuart1_rx_af, 6);

    impl_af!(I2c1Scl, B6, set_i2c1_scl_af, 6);
    impl_af!(I2c1Sda, B7, set_i2c1_sda_af, 6);
    impl_af!(I2c1Scl, B8, set_i2c1_scl_af, 6);
    impl_af!(I2c1Sda, B9, set_i2c1_sda_af, 6);
    impl_af!(I2c2Scl, B10, set_i2c2_scl_af, 6);
    impl_af!(I2c2Sda, B11, set_i2c2_sda_af, 6);
    impl_af!(I2c2Scl, B13, set_i2c2_scl_af, 6);
    impl_af!(I2c2Sda, B14, set_i2c2_sda_af, 6);

    // keep the trait separate from the pin so that users can use the ADC_CH
    // but are unable to implement the sealed trait themselves
    #[cfg(feature = "adc")]
    macro_rules! impl_adc_ch {
        ($pin:ident, $ch:expr) => {
            impl $pin {
                /// Analog to digital converter channel when this pin is
                /// configured as [`Analog`](crate::gpio::Analog).
                pub const ADC_CH: adc::Ch = $ch;
            }

            impl crate::gpio::sealed::AdcCh for $pin {
                const ADC_CH: adc::Ch = Self::ADC_CH;
            }
        };
    }

    #[cfg(feature = "adc")]
    mod adc_channels {
        use super::*;

        impl_adc_ch!(A0, adc::Ch::In0);
        impl_adc_ch!(A1, adc::Ch::In1);
        impl_adc_ch!(A2, adc::Ch::In2);
        impl_adc_ch!(A3, adc::Ch::In3);
        impl_adc_ch!(A4, adc::Ch::In4);
        impl_adc_ch!(A5, adc::Ch::In5);
        impl_adc_ch!(A6, adc::Ch::In6);
        impl_adc_ch!(A7, adc::Ch::In7);
        impl_adc_ch!(B0, adc::Ch::In8);
        impl_adc_ch!(B1, adc::Ch::In9);
        impl_adc_ch!(B2, adc::Ch::In10);
        impl_adc_ch!(B10, adc::Ch::In11);
    }
}

macro_rules! gpio_port {
    (
        $port:ident,
        $pac:ident,
        $en:ident,
        $rst:ident,
        $doc:expr,
        { $($field:ident: $pin:ident,)+ }
    ) => {
        #[doc = $doc]
        #[derive(Debug)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[allow(missing_docs)]
        pub struct $port {
            $(pub $field: pins::$pin,)+
        }

        impl $port {
            const GPIOS: $port = $port {
                $($field: pins::$pin::new(),)+
            };

            /// Reset the GPIO port and split it into individual pins.
            ///
            /// This will enable clocks and reset the GPIO port.
            #[allow(unused_variables)]
            pub fn split(gpio: pac::$pac, rcc: &mut pac::RCC) -> Self {
                Self::enable_clock(rcc);
                rcc.ioprstr.modify(|_, w| w.$rst().set_bit());
                rcc.ioprstr.modify(|_, w| w.$rst().clear_bit());

                Self::GPIOS
            }

            /// Steal the port GPIOs from whatever is currently using them.
            ///
            /// This will **not** initialize the GPIOs (unlike `split`).
            ///
            /// # Safety
            ///
            /// This will create new GPIOs, bypassing the singleton checks that
            /// normally occur.
            /// You are responsible for ensuring that the driver has exclusive
            /// access to the GPIOs.
            /// You are also responsible for ensuring the GPIO peripheral has
            /// been setup correctly.
            pub unsafe fn steal() -> Self {
                Self::GPIOS
            }

            /// Disable the port clock.
            ///
            /// # Safety
            ///
            /// 1. You cannot use any pin of this port while the clock is
            ///    disabled.
            /// 2. You are responsible for re-enabling the clock before resuming
            ///    use of any pin of this port.
            pub unsafe fn disable_clock(rcc: &mut pac::RCC) {
                rcc.iopenr.modify(|_, w| w.$en().clear_bit());
            }

            /// Enable the port clock.
            pub fn enable_clock(rcc: &mut pac::RCC) {
                rcc.iopenr.modify(|_, w| w.$en().set_bit());
                rcc.iopenr.read(); // delay after an RCC peripheral clock enabling
            }
        }
    };
}

gpio_port!(PortA, GPIOA, iopaen, ioparst, "Port A GPIOs", {
    a0: A0,
    a1: A1,
    a2: A2,
    a3: A3,
    a4: A4,
    a5: A5,
    a6: A6,
    a7: A7,
    a8: A8,
    a9: A9,
    a10: A10,
    a11: A11,
    a12: A12,
    a13: A13,
    a14: A14,
    a15: A15,
});

gpio_port!(PortB, GPIOB, iopben, iopbrst, "Port B GPIOs", {
    b0: B0,
    b1: B1,
    b2: B2,
    b3: B3,
    b4: B4,
    b5: B5,
    b6: B6,
    b7: B7,
    b8: B8,
    b9: B9,
    b10: B10,
    b11: B11,
    b12: B12,
    b13: B13,
    b14: B14,
    b15: B15,
});

gpio_port!(PortC, GPIOC, iopcen, iopcrst, "Port C GPIOs", {
    c0: C0,
    c1: C1,
    c2: C2,
    c3: C3,
    c4: C4,
    c5: C5,
    c6: C6,
    c7: C7,
    c13: C13,
    c14: C14,
    c15: C15,
});

gpio_port!(PortD, GPIOD, iopden, iopdrst, "Port D GPIOs", {
    d0: D0,
    d1: D1,
    d2: D2,
    d3: D3,
});

gpio_port!(PortF, GPIOF, iopfen, iopfrst, "Port F GPIOs", {
    f0: F0,
    f1: F1,
    f2: F2,
});

/// Digital input or output level.
#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// GPIO logic low.
    Low,
    /// GPIO logic high.
    High,
}

impl Level {
    /// Toggle the level.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::gpio::Level;
    ///
    /// assert_eq!(Level::High.toggle(), Level::Low);
    /// assert_eq!(Level::Low.toggle(), Level::High);
    /// ```
    pub const fn toggle(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }

    /// Returns `true` if the level is low.
    pub fn is_low(&self) -> bool {
        matches!(self, Self::Low)
    }

    /// Returns `true` if the level is high.
    pub fn is_high(&self) -> bool {
        matches!(self, Self::High)
    }
}

/// Output pin arguments.
///
/// Argument of [`Output::new`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputArgs {
    /// Output speed.
    pub speed: Speed,
    /// Initial output level.
    pub level: Level,
    /// Output type.
    pub ot: OutputType,
    /// IO pull configuration.
    ///
    /// This is only used if the output type is [`OutputType::OpenDrain`].
    pub pull: Pull,
}

impl OutputArgs {
    /// Create a new `OutputArgs` struct.
    ///
    /// This is the same as `default`, but in a `const` fn.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::gpio::OutputArgs;
    ///
    /// assert_eq!(OutputArgs::new(), OutputArgs::default());
    /// ```
    pub const fn new() -> Self {
        OutputArgs {
            speed: Speed::High,
            level: Level::Low,
            ot: OutputType::PushPull,
            pull: Pull::None,
        }
    }
}

impl Default for OutputArgs {
    fn default() -> Self {
        Self::new()
    }
}

/// Output pin.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Output<P> {
    pin: P,
}

impl<P> Output<P>
where
    P: sealed::PinOps,
{
    /// Create a new output pin from a GPIO.
    ///
    /// # Example
    ///
    /// Configure GPIO A5 as an output.
    /// This is the GPIO for LD4 on the NUCLEO-G071RB.
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     gpio::{self, pins, Output, PortA},
    ///     pac,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// const OUTPUT_ARGS: gpio::OutputArgs = gpio::OutputArgs {
    ///     level: gpio::Level::Low,
    ///     speed: gpio::Speed::High,
    ///     ot: gpio::OutputType::PushPull,
    ///     pull: gpio::Pull::None,
    /// };
    ///
    /// let gpioa: PortA = PortA::split(dp.GPIOA, &mut dp.RCC);
    /// let mut a5: Output<pins::A5> = Output::new(gpioa.a5, &OUTPUT_ARGS);
    /// ```
    pub fn new(mut pin: P, args: &OutputArgs) -> Self {
        cortex_m::interrupt::free(|cs| unsafe {
            pin.set_output_type(cs, args.ot);
            if args.ot == OutputType::OpenDrain {
                pin.set_pull(cs, args.pull)
            } else {
                pin.set_pull(cs, Pull::None)
            }
            pin.set_speed(cs, args.speed);
            pin.set_output_level(args.level);
            pin.set_mode(cs, sealed::Mode::Output);
        });
        Output { pin }
    }

    /// Create a new output pin from a GPIO using the default settings.
    pub fn default(pin: P) -> Self {
        Self::new(pin, &OutputArgs::new())
    }

    /// Steal the output GPIO from whatever is currently using it.
    ///
    /// # Safety
    ///
    /// 1. Ensure that the code stealing the GPIO has exclusive access to the
    ///    peripheral. Singleton checks are bypassed with this method.
    /// 2. You are responsible for setting up the GPIO correctly.
    ///    No setup will occur when using this method.
    pub unsafe fn steal() -> Self {
        Output { pin: P::steal() }
    }

    /// Free the GPIO pin.
    pub fn free(self) -> P {
        self.pin
    }

    /// Set the GPIO output level.
    ///
    /// This is the same as the `OutputPin` trait from the embedded hal, but
    /// without the `Infallible` result types.
    ///
    /// # Example
    ///
    /// Pulse a GPIO pin.
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     gpio::{pins, Level, Output, PortA},
    ///     pac,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// let gpioa: PortA = PortA::split(dp.GPIOA, &mut dp.RCC);
    /// let mut a5: Output<pins::A5> = Output::default(gpioa.a5);
    /// a5.set_level(Level::High);
    /// a5.set_level(Level::Low);
    /// ```
    pub fn set_level(&mut self, level: Level) {
        self.pin.set_output_level(level)
    }

    /// Set the GPIO output level high.
    pub fn set_level_high(&mut self) {
        self.set_level(Level::High)
    }

    /// Set the GPIO output level low.
    pub fn set_level_low(&mut self) {
        self.set_level(Level::Low)
    }

    /// Get the current GPIO output level.
    pub fn level(&self) -> Level {
        self.pin.output_level()
    }

    pub(crate) fn pin(&self) -> &P {
        &self.pin
    }

    pub(crate) fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }
}

impl<P> embedded_hal::digital::v2::OutputPin for Output<P>
where
    P: sealed::PinOps,
{
    type Error = core::convert::Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_output_level(Level::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_output_level(Level::High);
        Ok(())
    }
}

impl<P> embedded_hal::digital::v2::StatefulOutputPin for Output<P>
where
    P: sealed::PinOps,
{
    fn is_set_high(&self) -> Result<bool, Self::Error> {
        Ok(self.pin.output_level().is_high())
    }

    fn is_set_low(&self) -> Result<bool, Self::Error> {
        Ok(self.pin.output_level().is_low())
    }
}

impl<P: sealed::PinOps> embedded_hal::digital::v2::toggleable::Default for Output<P> {}

/// Input pin
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Input<P> {
    pin: P,
}

impl<P> Input<P>
where
    P: sealed::PinOps,
{
    /// Create a new input pin from a GPIO.
    ///
    /// # Example
    ///
    /// Configure GPIO C13 as an input.
    /// This is the GPIO for button B1 on the NUCLEO-G071RB.
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     gpio::{pins, Input, PortC, Pull},
    ///     pac,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// let gpioc: PortC = PortC::split(dp.GPIOC, &mut dp.RCC);
    /// let mut c13: Input<pins::C13> = Input::new(gpioc.c13, Pull::None);
    /// ```
    pub fn new(mut pin: P, pull: Pull) -> Self {
        cortex_m::interrupt::free(|cs| unsafe {
            pin.set_pull(cs, pull);
            pin.set_output_type(cs, OutputType::PushPull);
            pin.set_mode(cs, sealed::Mode::Input);
        });
        Input { pin }
    }

    /// Create a new input pin from a GPIO with default settings.
    pub fn default(pin: P) -> Self {
        Self::new(pin, Pull::None)
    }

    /// Steal the input GPIO from whatever is currently using it.
    ///
    /// # Safety
    ///
    /// 1. Ensure that the code stealing the GPIO has exclusive access to the
    ///    peripheral. Singleton checks are bypassed with this method.
    /// 2. You are responsible for setting up the GPIO correctly.
    ///    No setup will occur when using this method.
    pub unsafe fn steal() -> Self {
        Input { pin: P::steal() }
    }

    /// Free the GPIO pin.
    pub fn free(self) -> P {
        self.pin
    }

    /// Get the input level.
    ///
    /// # Example
    ///
    /// Get the input level of C13.
    /// This is the GPIO for button B1 on the NUCLEO-G071RB.
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     gpio::{pins, Input, Level, PortC, Pull},
    ///     pac,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// let gpioc: PortC = PortC::split(dp.GPIOC, &mut dp.RCC);
    /// let mut c13: Input<pins::C13> = Input::new(gpioc.c13, Pull::None);
    ///
    /// let button_is_pressed: bool = c13.level() == Level::Low;
    /// ```
    pub fn level(&self) -> Level {
        self.pin.input_level()
    }

    pub(crate) fn pin(&self) -> &P {
        &self.pin
    }

    pub(crate) fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }
}

impl<P> embedded_hal::digital::v2::InputPin for Input<P>
where
    P: sealed::PinOps,
{
    type Error = core::convert::Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.pin.input_level().is_high())
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(self.pin.input_level().is_low())
    }
}

/// Analog pin
#[cfg(feature = "adc")]
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Analog<P> {
    pin: P,
}

#[cfg(feature = "adc")]
impl<P> Analog<P>
where
    P: sealed::PinOps + sealed::AdcCh,
{
    /// Analog to digital converter channel.
    pub const ADC_CH: adc::Ch = P::ADC_CH;

    /// Create a new analog pin from a GPIO.
    ///
    /// # Example
    ///
    /// Configure GPIO A0 as an analog pin (ADC_IN0).
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     gpio::{pins, Analog, PortA},
    ///     pac,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// let gpioa: PortA = PortA::split(dp.GPIOA, &mut dp.RCC);
    /// let mut a0: Analog<pins::A0> = Analog::new(gpioa.a0);
    /// ```
    pub fn new(mut pin: P) -> Self {
        cortex_m::interrupt::free(|cs| unsafe {
            pin.set_mode(cs, sealed::Mode::Analog);
        });
        Analog { pin }
    }

    /// Free the GPIO pin.
    pub fn free(self) -> P {
        self.pin
    }
}

#[cfg(feature = "adc")]
impl<P> From<P> for Analog<P>
where
    P: sealed::PinOps + sealed::AdcCh,
{
    fn from(p: P) -> Self {
        Analog::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::{Level, OutputArgs, OutputType, Pull, Speed};

    #[test]
    fn level_toggle() {
        assert_eq!(Level::High.toggle(), Level::Low);
        assert_eq!(Level::Low.toggle(), Level::High);
        assert!(Level::Low.is_low());
        assert!(Level::High.is_high());
    }

    #[test]
    fn output_args_default() {
        let args: OutputArgs = OutputArgs::default();
        assert_eq!(args.speed, Speed::High);
        assert_eq!(args.level, Level::Low);
        assert_eq!(args.ot, OutputType::PushPull);
        assert_eq!(args.pull, Pull::None);
    }
}
