//! Universal synchronous/asynchronous receiver transmitter
use crate::{gpio, pac, rcc, Ratio};
use cortex_m::interrupt::CriticalSection;
use embedded_hal::prelude::*;

#[cfg(feature = "dma")]
use crate::dma::{self, DmaCh};

typestate!(NoRx, "no RX on a generic UART structure");
typestate!(NoTx, "no TX on a generic UART structure");

/// UART clock selection.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Clk {
    /// PCLK
    PClk = 0b00,
    /// System clock
    Sysclk = 0b01,
    /// HSI16 clock
    Hsi16 = 0b10,
    /// LSE clock
    Lse = 0b11,
}

/// UART errors.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Overrun.
    Overrun,
    /// Start bit noise detected.
    Noise,
    /// Framing error.
    Framing,
    /// Parity error.
    Parity,
    /// RX DMA error
    ///
    /// This can only occur on UART transfers that use the RX DMA.
    RxDma,
    /// TX DMA error
    ///
    /// This can only occur on UART transfers that use the TX DMA.
    TxDma,
}

// ISR bit positions, shared by the USARTs and the LPUART.
// With the FIFO enabled bit 5 is RXFNE and bit 7 is TXFNF, the positions do
// not move.
const ISR_PE: u32 = 1 << 0;
const ISR_FE: u32 = 1 << 1;
const ISR_NE: u32 = 1 << 2;
const ISR_ORE: u32 = 1 << 3;
const ISR_RXNE: u32 = 1 << 5;
const ISR_TXE: u32 = 1 << 7;
const ISR_BUSY: u32 = 1 << 16;

// CCIPR kernel clock selection fields
const USART1SEL_SHIFT: u32 = 0;
const USART2SEL_SHIFT: u32 = 2;
const LPUART1SEL_SHIFT: u32 = 10;

const fn presc_div(bits: u32) -> u32 {
    match bits {
        0b0000 => 1,
        0b0001 => 2,
        0b0010 => 4,
        0b0011 => 6,
        0b0100 => 8,
        0b0101 => 10,
        0b0110 => 12,
        0b0111 => 16,
        0b1000 => 32,
        0b1001 => 64,
        0b1010 => 128,
        _ => 256,
    }
}

/// UART1 driver.
#[derive(Debug)]
pub struct Uart1<RX, TX> {
    uart: pac::USART1,
    rx: RX,
    tx: TX,
}

/// UART2 driver.
#[derive(Debug)]
pub struct Uart2<RX, TX> {
    uart: pac::USART2,
    rx: RX,
    tx: TX,
}

/// Low-power UART driver.
#[derive(Debug)]
pub struct LpUart<RX, TX> {
    uart: pac::LPUART,
    rx: RX,
    tx: TX,
}

impl LpUart<NoRx, NoTx> {
    /// Create a new LPUART driver from a LPUART peripheral.
    ///
    /// This will enable clocks and reset the LPUART peripheral.
    ///
    /// # Panics
    ///
    /// With the `param-assert` feature enabled this panics when:
    ///
    /// * Source frequency is not between 3× and 4096× the baud rate
    /// * The derived baud rate register value is less than `0x300`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     pac,
    ///     uart::{self, LpUart, NoRx, NoTx},
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// // enable the HSI16 source clock
    /// dp.RCC.cr.modify(|_, w| w.hsion().set_bit());
    /// while dp.RCC.cr.read().hsirdy().bit_is_clear() {}
    ///
    /// let uart: LpUart<NoRx, NoTx> = LpUart::new(dp.LPUART, 115_200, uart::Clk::Hsi16, &mut dp.RCC);
    /// ```
    pub fn new(uart: pac::LPUART, baud: u32, clk: Clk, rcc: &mut pac::RCC) -> LpUart<NoRx, NoTx> {
        unsafe { Self::pulse_reset(rcc) };
        Self::enable_clock(rcc);

        set_ccipr_sel(rcc, LPUART1SEL_SHIFT, clk);

        let ret: LpUart<NoRx, NoTx> = LpUart {
            uart,
            rx: NoRx::new(),
            tx: NoTx::new(),
        };

        let freq: u32 = ret.clock_hz(rcc);
        param_assert!(
            u64::from(freq) >= u64::from(baud).saturating_mul(3)
                && u64::from(freq) <= u64::from(baud).saturating_mul(4096)
        );

        let br: u32 = lpuart_brr(freq, baud);
        param_assert!(br >= 0x300);
        ret.uart.brr.write(|w| unsafe { w.bits(br) });
        ret.uart.cr1.write(|w| w.ue().set_bit().fifoen().set_bit());

        ret
    }
}

impl Uart1<NoRx, NoTx> {
    /// Create a new UART driver from a UART peripheral.
    ///
    /// This will enable clocks and reset the UART peripheral.
    ///
    /// # Panics
    ///
    /// With the `param-assert` feature enabled this panics when the source
    /// frequency is less than 16× the baud rate.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     pac,
    ///     uart::{self, NoRx, NoTx, Uart1},
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// // enable the HSI16 source clock
    /// dp.RCC.cr.modify(|_, w| w.hsion().set_bit());
    /// while dp.RCC.cr.read().hsirdy().bit_is_clear() {}
    ///
    /// let uart: Uart1<NoRx, NoTx> = Uart1::new(dp.USART1, 115_200, uart::Clk::Hsi16, &mut dp.RCC);
    /// ```
    pub fn new(uart: pac::USART1, baud: u32, clk: Clk, rcc: &mut pac::RCC) -> Uart1<NoRx, NoTx> {
        unsafe { Self::pulse_reset(rcc) };
        Self::enable_clock(rcc);

        set_ccipr_sel(rcc, USART1SEL_SHIFT, clk);

        let ret: Uart1<NoRx, NoTx> = Uart1 {
            uart,
            rx: NoRx::new(),
            tx: NoTx::new(),
        };

        let freq: u32 = ret.clock_hz(rcc);
        param_assert!(freq >= baud.saturating_mul(16));

        let br: u16 = usart_brr(freq, baud);
        ret.uart.brr.write(|w| unsafe { w.bits(br.into()) });
        ret.uart.cr1.write(|w| w.ue().set_bit().fifoen().set_bit());

        ret
    }
}

impl Uart2<NoRx, NoTx> {
    /// Create a new UART driver from a UART peripheral.
    ///
    /// This will enable clocks and reset the UART peripheral.
    ///
    /// # Panics
    ///
    /// With the `param-assert` feature enabled this panics when the source
    /// frequency is less than 16× the baud rate.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     pac,
    ///     uart::{self, NoRx, NoTx, Uart2},
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// // enable the HSI16 source clock
    /// dp.RCC.cr.modify(|_, w| w.hsion().set_bit());
    /// while dp.RCC.cr.read().hsirdy().bit_is_clear() {}
    ///
    /// let uart: Uart2<NoRx, NoTx> = Uart2::new(dp.USART2, 115_200, uart::Clk::Hsi16, &mut dp.RCC);
    /// ```
    pub fn new(uart: pac::USART2, baud: u32, clk: Clk, rcc: &mut pac::RCC) -> Uart2<NoRx, NoTx> {
        unsafe { Self::pulse_reset(rcc) };
        Self::enable_clock(rcc);

        set_ccipr_sel(rcc, USART2SEL_SHIFT, clk);

        let ret: Uart2<NoRx, NoTx> = Uart2 {
            uart,
            rx: NoRx::new(),
            tx: NoTx::new(),
        };

        let freq: u32 = ret.clock_hz(rcc);
        param_assert!(freq >= baud.saturating_mul(16));

        let br: u16 = usart_brr(freq, baud);
        ret.uart.brr.write(|w| unsafe { w.bits(br.into()) });
        ret.uart.cr1.write(|w| w.ue().set_bit().fifoen().set_bit());

        ret
    }
}

// only for oversampling of 16 (default), change for oversampling of 8
const fn usart_brr(freq: u32, baud: u32) -> u16 {
    (freq / baud) as u16
}

// the LPUART baud rate is fractional with a fixed 256 multiplier,
// the intermediate product needs 64 bits
const fn lpuart_brr(freq: u32, baud: u32) -> u32 {
    ((freq as u64 * 256) / baud as u64) as u32
}

fn set_ccipr_sel(rcc: &mut pac::RCC, shift: u32, clk: Clk) {
    rcc.ccipr
        .modify(|r, w| unsafe { w.bits((r.bits() & !(0b11 << shift)) | ((clk as u32) << shift)) });
}

const LPUART_BASE: usize = 0x4000_8000;
const UART1_BASE: usize = 0x4001_3800;
const UART2_BASE: usize = 0x4000_4400;
#[cfg(feature = "dma")]
const RDR_OFFSET: usize = 0x24;
#[cfg(feature = "dma")]
const TDR_OFFSET: usize = 0x28;

#[cfg(feature = "dma")]
macro_rules! impl_consts {
    ($uart:ident, $rx_req_id:expr, $tx_req_id:expr, $base:expr) => {
        impl<RX, TX> $uart<RX, TX> {
            const DMA_RX_ID: u8 = $rx_req_id;
            const DMA_TX_ID: u8 = $tx_req_id;
            const RDR: usize = $base + RDR_OFFSET;
            const TDR: usize = $base + TDR_OFFSET;
        }
    };
}

#[cfg(feature = "dma")]
impl_consts!(LpUart, 14, 15, LPUART_BASE);
#[cfg(feature = "dma")]
impl_consts!(Uart1, 50, 51, UART1_BASE);
#[cfg(feature = "dma")]
impl_consts!(Uart2, 52, 53, UART2_BASE);

macro_rules! impl_clock_hz {
    ($uart:ident, $shift:expr) => {
        impl<RX, TX> $uart<RX, TX> {
            /// Calculate the clock frequency.
            ///
            /// Fractional frequencies will be rounded towards zero.
            pub fn clock_hz(&self, rcc: &pac::RCC) -> u32 {
                let src: Ratio<u32> = match (rcc.ccipr.read().bits() >> $shift) & 0b11 {
                    0b00 => {
                        let cfgr: pac::rcc::cfgr::R = rcc.cfgr.read();
                        rcc::pclk(rcc, &cfgr)
                    }
                    0b01 => {
                        let cfgr: pac::rcc::cfgr::R = rcc.cfgr.read();
                        rcc::sysclk(rcc, &cfgr)
                    }
                    0b10 => Ratio::new_raw(crate::board::HSI_VALUE, 1),
                    _ => Ratio::new_raw(crate::board::LSE_VALUE, 1),
                };
                let pre: u32 = presc_div(self.uart.presc.read().bits() & 0xF);
                (src / pre).to_integer()
            }
        }
    };
}

impl_clock_hz!(LpUart, LPUART1SEL_SHIFT);
impl_clock_hz!(Uart1, USART1SEL_SHIFT);
impl_clock_hz!(Uart2, USART2SEL_SHIFT);

macro_rules! impl_pulse_reset {
    ($uart:ident, $reg:ident, $method:ident) => {
        impl $uart<NoRx, NoTx> {
            /// Reset the UART.
            ///
            /// # Safety
            ///
            /// 1. The UART must not be in-use.
            /// 2. You are responsible for setting up the UART after a reset.
            ///
            /// # Example
            ///
            /// See [`steal`](Self::steal)
            pub unsafe fn pulse_reset(rcc: &mut pac::RCC) {
                rcc.$reg.modify(|_, w| w.$method().set_bit());
                rcc.$reg.modify(|_, w| w.$method().clear_bit());
            }
        }
    };
}

impl_pulse_reset!(LpUart, apbrstr1, lpuart1rst);
impl_pulse_reset!(Uart1, apbrstr2, usart1rst);
impl_pulse_reset!(Uart2, apbrstr1, usart2rst);

macro_rules! impl_clock_en_dis {
    ($uart:ident, $reg:ident, $method:ident) => {
        impl $uart<NoRx, NoTx> {
            /// Enable the UART clock.
            ///
            /// This is done for you in [`new`](Self::new)
            ///
            /// # Example
            ///
            /// ```no_run
            /// use stm32g0xx_hal::{pac, uart::LpUart};
            ///
            /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
            /// LpUart::enable_clock(&mut dp.RCC);
            /// ```
            pub fn enable_clock(rcc: &mut pac::RCC) {
                rcc.$reg.modify(|_, w| w.$method().set_bit());
                rcc.$reg.read(); // delay after an RCC peripheral clock enabling
            }

            /// Disable the UART clock.
            ///
            /// # Safety
            ///
            /// 1. You are responsible for ensuring the UART is in a state where
            ///    the clock can be disabled without entering an error state.
            /// 2. You cannot use the UART while the clock is disabled.
            /// 3. You are responsible for re-enabling the clock before resuming
            ///    use of the UART.
            /// 4. You are responsible for setting up anything that may have lost
            ///    state while the clock was disabled.
            pub unsafe fn disable_clock(rcc: &mut pac::RCC) {
                rcc.$reg.modify(|_, w| w.$method().clear_bit())
            }
        }
    };
}

impl_clock_en_dis!(LpUart, apbenr1, lpuart1en);
impl_clock_en_dis!(Uart1, apbenr2, usart1en);
impl_clock_en_dis!(Uart2, apbenr1, usart2en);

macro_rules! impl_free_steal {
    ($uart:ident, $periph:ident) => {
        impl $uart<NoRx, NoTx> {
            /// Steal the UART peripheral from whatever is currently using it.
            ///
            /// This will **not** initialize the peripheral (unlike [`new`]).
            ///
            /// # Safety
            ///
            /// 1. Ensure that the code stealing the UART has exclusive access to the
            ///    peripheral. Singleton checks are bypassed with this method.
            /// 2. You are responsible for setting up the UART correctly.
            ///
            /// # Example
            ///
            /// ```no_run
            /// use stm32g0xx_hal::{
            ///     pac,
            ///     uart::{LpUart, NoRx, NoTx},
            /// };
            ///
            /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
            ///
            /// LpUart::enable_clock(&mut dp.RCC);
            /// // safety:
            /// // 1. Nothing else is using the LPUART in this code.
            /// // 2. This code performs setup for the LPUART.
            /// unsafe { LpUart::pulse_reset(&mut dp.RCC) };
            ///
            /// // safety:
            /// // 1. Nothing else is using the LPUART in this code.
            /// // 2. The LPUART has been setup, clocks are enabled and the LPUART has been reset.
            /// let mut lpuart: LpUart<NoRx, NoTx> = unsafe { LpUart::steal() };
            /// ```
            ///
            /// [`new`]: Self::new
            pub unsafe fn steal() -> $uart<NoRx, NoTx> {
                $uart {
                    uart: pac::Peripherals::steal().$periph,
                    rx: NoRx::new(),
                    tx: NoTx::new(),
                }
            }
        }

        impl<RX, TX> $uart<RX, TX> {
            /// Free the UART peripheral from the driver.
            ///
            /// # Example
            ///
            /// ```no_run
            /// use stm32g0xx_hal::{
            ///     pac,
            ///     uart::{self, LpUart, NoRx, NoTx},
            /// };
            ///
            /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
            /// let lpuart: pac::LPUART = dp.LPUART;
            ///
            /// let lpuart: LpUart<NoRx, NoTx> =
            ///     LpUart::new(lpuart, 115_200, uart::Clk::Hsi16, &mut dp.RCC);
            /// // ... use LPUART
            /// let lpuart: pac::LPUART = lpuart.free();
            /// ```
            pub fn free(self) -> pac::$periph {
                self.uart
            }
        }
    };
}

impl_free_steal!(LpUart, LPUART);
impl_free_steal!(Uart1, USART1);
impl_free_steal!(Uart2, USART2);

macro_rules! impl_tx_en_dis {
    ($uart:ident, $trt:ident, $method:ident) => {
        impl<RX> $uart<RX, NoTx> {
            /// Enable the UART transmitter.
            ///
            /// # Example
            ///
            /// ```no_run
            /// use stm32g0xx_hal::{
            ///     cortex_m,
            ///     gpio::{pins, PortA},
            ///     pac,
            ///     uart::{self, LpUart, NoRx},
            /// };
            ///
            /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
            ///
            /// // enable the HSI16 source clock
            /// dp.RCC.cr.modify(|_, w| w.hsion().set_bit());
            /// while dp.RCC.cr.read().hsirdy().bit_is_clear() {}
            ///
            /// let gpioa: PortA = PortA::split(dp.GPIOA, &mut dp.RCC);
            /// let uart: LpUart<NoRx, pins::A2> = cortex_m::interrupt::free(|cs| {
            ///     LpUart::new(dp.LPUART, 115_200, uart::Clk::Hsi16, &mut dp.RCC)
            ///         .enable_tx(gpioa.a2, cs)
            /// });
            /// ```
            pub fn enable_tx<TX: gpio::sealed::$trt>(
                self,
                mut tx: TX,
                cs: &CriticalSection,
            ) -> $uart<RX, TX> {
                tx.$method(cs);
                self.uart.cr1.modify(|_, w| w.te().set_bit());
                $uart {
                    uart: self.uart,
                    rx: self.rx,
                    tx,
                }
            }
        }

        #[cfg(feature = "dma")]
        impl<RX> $uart<RX, NoTx> {
            /// Enable the UART transmitter with a DMA channel.
            ///
            /// # Example
            ///
            /// ```no_run
            /// use stm32g0xx_hal::{
            ///     cortex_m,
            ///     dma::{AllDma, DmaCh},
            ///     gpio::{pins, PortA},
            ///     pac,
            ///     uart::{self, LpUart, NoRx},
            /// };
            ///
            /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
            ///
            /// // enable the HSI16 source clock
            /// dp.RCC.cr.modify(|_, w| w.hsion().set_bit());
            /// while dp.RCC.cr.read().hsirdy().bit_is_clear() {}
            ///
            /// let dma: AllDma = AllDma::split(dp.DMA, dp.DMAMUX, &mut dp.RCC);
            /// let gpioa: PortA = PortA::split(dp.GPIOA, &mut dp.RCC);
            /// let uart: LpUart<NoRx, (pins::A2, DmaCh)> = cortex_m::interrupt::free(|cs| {
            ///     LpUart::new(dp.LPUART, 115_200, uart::Clk::Hsi16, &mut dp.RCC)
            ///         .enable_tx_dma(gpioa.a2, dma.d1c7, cs)
            /// });
            /// ```
            pub fn enable_tx_dma<TxPin: gpio::sealed::$trt>(
                self,
                mut tx: TxPin,
                mut tx_dma: DmaCh,
                cs: &CriticalSection,
            ) -> $uart<RX, (TxPin, DmaCh)> {
                tx.$method(cs);
                self.uart.cr1.modify(|_, w| w.te().set_bit());
                self.uart.cr3.modify(|_, w| w.dmat().set_bit());

                tx_dma.set_cr(dma::Cr::DISABLE);
                tx_dma.clear_all_flags();
                tx_dma.set_periph_addr(Self::TDR as u32);
                tx_dma.set_mux_cr_reqid(Self::DMA_TX_ID);

                $uart {
                    uart: self.uart,
                    rx: self.rx,
                    tx: (tx, tx_dma),
                }
            }
        }

        impl<RX, TX> $uart<RX, TX> {
            /// Disable the UART transmitter.
            pub fn disable_tx(self) -> ($uart<RX, NoTx>, TX) {
                self.uart.cr1.modify(|_, w| w.te().clear_bit());
                self.uart.cr3.modify(|_, w| w.dmat().clear_bit());
                (
                    $uart {
                        uart: self.uart,
                        rx: self.rx,
                        tx: NoTx::new(),
                    },
                    self.tx,
                )
            }
        }
    };
}

impl_tx_en_dis!(LpUart, LpUart1Tx, set_lpuart1_tx_af);
impl_tx_en_dis!(Uart1, Uart1Tx, set_uart1_tx_af);
impl_tx_en_dis!(Uart2, Uart2Tx, set_uart2_tx_af);

macro_rules! impl_rx_en_dis {
    ($uart:ident, $trt:ident, $method:ident) => {
        impl<TX> $uart<NoRx, TX> {
            /// Enable the UART receiver.
            ///
            /// # Example
            ///
            /// ```no_run
            /// use stm32g0xx_hal::{
            ///     cortex_m,
            ///     gpio::{pins, PortA},
            ///     pac,
            ///     uart::{self, LpUart, NoTx},
            /// };
            ///
            /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
            ///
            /// // enable the HSI16 source clock
            /// dp.RCC.cr.modify(|_, w| w.hsion().set_bit());
            /// while dp.RCC.cr.read().hsirdy().bit_is_clear() {}
            ///
            /// let gpioa: PortA = PortA::split(dp.GPIOA, &mut dp.RCC);
            /// let uart: LpUart<pins::A3, NoTx> = cortex_m::interrupt::free(|cs| {
            ///     LpUart::new(dp.LPUART, 115_200, uart::Clk::Hsi16, &mut dp.RCC)
            ///         .enable_rx(gpioa.a3, cs)
            /// });
            /// ```
            pub fn enable_rx<RX: gpio::sealed::$trt>(
                self,
                mut rx: RX,
                cs: &CriticalSection,
            ) -> $uart<RX, TX> {
                rx.$method(cs);
                self.uart.cr1.modify(|_, w| w.re().set_bit());
                $uart {
                    uart: self.uart,
                    rx,
                    tx: self.tx,
                }
            }
        }

        #[cfg(feature = "dma")]
        impl<TX> $uart<NoRx, TX> {
            /// Enable the UART receiver with a DMA channel.
            ///
            /// # Example
            ///
            /// ```no_run
            /// use stm32g0xx_hal::{
            ///     cortex_m,
            ///     dma::{AllDma, DmaCh},
            ///     gpio::{pins, PortA},
            ///     pac,
            ///     uart::{self, LpUart, NoTx},
            /// };
            ///
            /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
            ///
            /// // enable the HSI16 source clock
            /// dp.RCC.cr.modify(|_, w| w.hsion().set_bit());
            /// while dp.RCC.cr.read().hsirdy().bit_is_clear() {}
            ///
            /// let dma: AllDma = AllDma::split(dp.DMA, dp.DMAMUX, &mut dp.RCC);
            /// let gpioa: PortA = PortA::split(dp.GPIOA, &mut dp.RCC);
            /// let uart: LpUart<(pins::A3, DmaCh), NoTx> = cortex_m::interrupt::free(|cs| {
            ///     LpUart::new(dp.LPUART, 115_200, uart::Clk::Hsi16, &mut dp.RCC)
            ///         .enable_rx_dma(gpioa.a3, dma.d1c6, cs)
            /// });
            /// ```
            pub fn enable_rx_dma<RxPin: gpio::sealed::$trt>(
                self,
                mut rx: RxPin,
                mut rx_dma: DmaCh,
                cs: &CriticalSection,
            ) -> $uart<(RxPin, DmaCh), TX> {
                rx.$method(cs);
                self.uart.cr1.modify(|_, w| w.re().set_bit());
                self.uart.cr3.modify(|_, w| w.dmar().set_bit());

                rx_dma.set_cr(dma::Cr::DISABLE);
                rx_dma.clear_all_flags();
                rx_dma.set_periph_addr(Self::RDR as u32);
                rx_dma.set_mux_cr_reqid(Self::DMA_RX_ID);

                $uart {
                    uart: self.uart,
                    rx: (rx, rx_dma),
                    tx: self.tx,
                }
            }
        }

        impl<RX, TX> $uart<RX, TX> {
            /// Disable the UART receiver.
            pub fn disable_rx(self) -> ($uart<NoRx, TX>, RX) {
                self.uart.cr1.modify(|_, w| w.re().clear_bit());
                self.uart.cr3.modify(|_, w| w.dmar().clear_bit());
                (
                    $uart {
                        uart: self.uart,
                        rx: NoRx::new(),
                        tx: self.tx,
                    },
                    self.rx,
                )
            }
        }
    };
}

impl_rx_en_dis!(LpUart, LpUart1Rx, set_lpuart1_rx_af);
impl_rx_en_dis!(Uart1, Uart1Rx, set_uart1_rx_af);
impl_rx_en_dis!(Uart2, Uart2Rx, set_uart2_rx_af);

macro_rules! impl_status {
    ($uart:ident) => {
        impl<RX, TX> $uart<RX, TX> {
            #[inline]
            fn status(&self) -> Result<u32, Error> {
                let isr: u32 = self.uart.isr.read().bits();
                if isr & ISR_PE != 0 {
                    Err(Error::Parity)
                } else if isr & ISR_FE != 0 {
                    Err(Error::Framing)
                } else if isr & ISR_NE != 0 {
                    Err(Error::Noise)
                } else if isr & ISR_ORE != 0 {
                    Err(Error::Overrun)
                } else {
                    Ok(isr)
                }
            }
        }
    };
}

impl_status!(LpUart);
impl_status!(Uart1);
impl_status!(Uart2);

macro_rules! impl_eh_traits {
    ($uart:ident, $rx_trait:ident, $tx_trait:ident) => {
        impl<RX, TX> embedded_hal::serial::Write<u8> for $uart<RX, TX>
        where
            TX: gpio::sealed::$tx_trait,
        {
            type Error = Error;

            #[inline]
            fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
                if self.status()? & ISR_TXE != 0 {
                    self.uart.tdr.write(|w| unsafe { w.bits(word.into()) });
                    Ok(())
                } else {
                    Err(nb::Error::WouldBlock)
                }
            }

            #[inline]
            fn flush(&mut self) -> nb::Result<(), Self::Error> {
                if self.status()? & ISR_BUSY != 0 {
                    Err(nb::Error::WouldBlock)
                } else {
                    Ok(())
                }
            }
        }

        #[cfg(feature = "dma")]
        impl<RX, TxPin> embedded_hal::blocking::serial::Write<u8> for $uart<RX, (TxPin, DmaCh)>
        where
            TxPin: gpio::sealed::$tx_trait,
        {
            type Error = Error;

            fn bwrite_all(&mut self, buffer: &[u8]) -> Result<(), Self::Error> {
                if buffer.is_empty() {
                    return Ok(());
                }

                const CR: dma::Cr = dma::Cr::RESET
                    .set_dir_from_mem()
                    .set_mem_inc(true)
                    .set_enable(true);

                self.tx.1.set_mem_addr(buffer.as_ptr() as u32);

                let ndt: u32 = buffer.len() as u32;
                self.tx.1.set_num_data_xfer(ndt);

                self.tx.1.set_cr(CR);

                let ret: Result<(), Error> = loop {
                    self.status()?;
                    let dma_flags: u8 = self.tx.1.flags();
                    if dma_flags & dma::flags::XFER_ERR != 0 {
                        break Err(Error::TxDma);
                    } else if dma_flags & dma::flags::XFER_CPL != 0 {
                        break Ok(());
                    }
                };

                self.tx.1.set_cr(dma::Cr::DISABLE);
                self.tx.1.clear_all_flags();

                ret
            }

            #[inline]
            fn bflush(&mut self) -> Result<(), Self::Error> {
                while self.status()? & ISR_BUSY != 0 {}
                Ok(())
            }
        }

        impl<RX, TX> embedded_hal::serial::Read<u8> for $uart<RX, TX>
        where
            RX: gpio::sealed::$rx_trait,
        {
            type Error = Error;

            #[inline]
            fn read(&mut self) -> nb::Result<u8, Self::Error> {
                if self.status()? & ISR_RXNE != 0 {
                    Ok(self.uart.rdr.read().bits() as u8)
                } else {
                    Err(nb::Error::WouldBlock)
                }
            }
        }

        #[cfg(feature = "dma")]
        impl<RxPin, TX> $uart<(RxPin, DmaCh), TX>
        where
            RxPin: gpio::sealed::$rx_trait,
        {
            /// This is not an embedded-hal trait, it is added simply for
            /// parity with what exists on the TX side.
            pub fn bread_all(&mut self, buffer: &mut [u8]) -> Result<(), Error> {
                if buffer.is_empty() {
                    return Ok(());
                }

                const CR: dma::Cr = dma::Cr::RESET
                    .set_dir_from_periph()
                    .set_mem_inc(true)
                    .set_enable(true);

                self.rx.1.set_mem_addr(buffer.as_ptr() as u32);

                let ndt: u32 = buffer.len() as u32;
                self.rx.1.set_num_data_xfer(ndt);

                self.rx.1.set_cr(CR);

                let ret: Result<(), Error> = loop {
                    self.status()?;
                    let dma_flags: u8 = self.rx.1.flags();
                    if dma_flags & dma::flags::XFER_ERR != 0 {
                        break Err(Error::RxDma);
                    } else if dma_flags & dma::flags::XFER_CPL != 0 {
                        break Ok(());
                    }
                };

                self.rx.1.set_cr(dma::Cr::DISABLE);
                self.rx.1.clear_all_flags();

                ret
            }
        }

        impl<RX, TX> core::fmt::Write for $uart<RX, TX>
        where
            $uart<RX, TX>: embedded_hal::serial::Write<u8>,
        {
            fn write_str(&mut self, s: &str) -> core::fmt::Result {
                let _ = s
                    .as_bytes()
                    .iter()
                    .map(|c| nb::block!(self.write(*c)))
                    .last();
                Ok(())
            }
        }
    };
}

impl_eh_traits!(LpUart, LpUart1Rx, LpUart1Tx);
impl_eh_traits!(Uart1, Uart1Rx, Uart1Tx);
impl_eh_traits!(Uart2, Uart2Rx, Uart2Tx);

#[cfg(test)]
mod tests {
    use super::{lpuart_brr, presc_div, usart_brr, LpUart, NoRx, NoTx, Uart1, Uart2};

    // the three drivers ship as one unit and share the serial trait surface
    static_assertions::assert_impl_all!(
        LpUart<NoRx, NoTx>: core::fmt::Debug
    );
    static_assertions::assert_impl_all!(
        Uart1<NoRx, NoTx>: core::fmt::Debug
    );
    static_assertions::assert_impl_all!(
        Uart2<NoRx, NoTx>: core::fmt::Debug
    );

    #[test]
    fn usart_baud_register() {
        // oversampling by 16, BRR is the integer divider
        assert_eq!(usart_brr(16_000_000, 115_200), 0x8A);
        assert_eq!(usart_brr(16_000_000, 9_600), 0x682);
        assert_eq!(usart_brr(64_000_000, 115_200), 0x22B);
    }

    #[test]
    fn lpuart_baud_register() {
        assert_eq!(lpuart_brr(16_000_000, 115_200), 35_555);
        // LSE-clocked low power case
        assert_eq!(lpuart_brr(32_768, 9_600), 873);
        // the 256 multiplier overflows 32 bits for fast kernel clocks
        assert_eq!(lpuart_brr(64_000_000, 9_600), 1_706_666);
    }

    #[test]
    fn prescaler_table() {
        assert_eq!(presc_div(0b0000), 1);
        assert_eq!(presc_div(0b0001), 2);
        assert_eq!(presc_div(0b0111), 16);
        assert_eq!(presc_div(0b1010), 128);
        assert_eq!(presc_div(0b1011), 256);
        assert_eq!(presc_div(0b1111), 256);
    }
}
