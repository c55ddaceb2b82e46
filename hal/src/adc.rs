//! Analog to digital converter
//!
//! Quickstart:
//!
//! * [`Adc::pin`] Sample an analog pin
//! * [`Adc::temperature`] Sample the junction temperature
//! * [`Adc::vbat`] Sample the battery voltage

use crate::board;
use crate::gpio;
use crate::Ratio;

use super::pac;
use core::{ptr::read_volatile, time::Duration};

use embedded_hal::blocking::delay::DelayUs;

const ADC_BASE: usize = 0x4001_2400;

// CHSELR has two layouts selected by CHSELRMOD, this driver only uses the
// CHSELRMOD=0 (bitmask) layout, access the register by address.
const CHSELR: *mut u32 = (ADC_BASE + 0x28) as *mut u32;

// ADC_CCR bits
const CCR_VREFEN: u32 = 1 << 22;
const CCR_TSEN: u32 = 1 << 23;
const CCR_VBATEN: u32 = 1 << 24;
const CCR_PRESC_SHIFT: u32 = 18;

// ADC_CFGR2 clock mode, bits 31:30
const CKMODE_ADCLK: u32 = 0b00;
const CKMODE_PCLK_DIV2: u32 = 0b01;
const CKMODE_PCLK_DIV4: u32 = 0b10;
const CKMODE_PCLK: u32 = 0b11;
const CKMODE_SHIFT: u32 = 30;

// RCC_CCIPR ADCSEL, bits 31:30
const ADCSEL_SYSCLK: u32 = 0b00;
const ADCSEL_HSI16: u32 = 0b10;
const ADCSEL_SHIFT: u32 = 30;

// DS12232 rev 6 table 14
// TS ADC raw data acquired at 30 °C (± 5 °C),
// VDDA = VREF+ = 3.0 V (± 10 mV)
fn ts_cal1() -> u16 {
    unsafe { read_volatile(0x1FFF_75A8 as *const u16) }
}

// DS12232 rev 6 table 14
// TS ADC raw data acquired at 130 °C (± 5 °C),
// VDDA = VREF+ = 3.0 V (± 10 mV)
fn ts_cal2() -> u16 {
    unsafe { read_volatile(0x1FFF_75CA as *const u16) }
}

fn ts_cal() -> (u16, u16) {
    (ts_cal1(), ts_cal2())
}

const TS_CAL1_TEMP: i16 = 30;
const TS_CAL2_TEMP: i16 = 130;
const TS_CAL_TEMP_DELTA: i16 = TS_CAL2_TEMP - TS_CAL1_TEMP;

/// t<sub>S_temp</sub> temperature sensor minimum sampling time
///
/// Value from DS12232 rev 6 "Temperature sensor characteristics"
pub const TS_MIN_SAMPLE: Duration = Duration::from_micros(5);
/// t<sub>START</sub> temperature sensor maximum startup time
///
/// Value from DS12232 rev 6 "Temperature sensor characteristics"
pub const TS_START_MAX: Duration = Duration::from_micros(120);

/// t<sub>ADCVREG_SETUP</sub> ADC voltage regulator maximum startup time
///
/// Value from DS12232 rev 6 "ADC characteristics"
pub const T_ADCVREG_SETUP: Duration = Duration::from_micros(20);

/// [`T_ADCVREG_SETUP`] expressed in microseconds
///
/// # Example
///
/// ```
/// use stm32g0xx_hal::adc::{T_ADCVREG_SETUP, T_ADCVREG_SETUP_MICROS};
///
/// assert_eq!(
///     u128::from(T_ADCVREG_SETUP_MICROS),
///     T_ADCVREG_SETUP.as_micros()
/// );
/// ```
pub const T_ADCVREG_SETUP_MICROS: u8 = T_ADCVREG_SETUP.as_micros() as u8;

/// Mask of all channels handled by this driver, 0-14.
const CH_MASK: u32 = 0x7FFF;

/// Interrupt masks
///
/// Used for [`Adc::set_isr`] and [`Adc::set_ier`].
pub mod irq {
    /// Channel configuration ready
    pub const CCRDY: u32 = 1 << 13;
    /// End of calibration
    pub const EOCAL: u32 = 1 << 11;
    /// Analog watchdog 3
    pub const AWD3: u32 = 1 << 9;
    /// Analog watchdog 2
    pub const AWD2: u32 = 1 << 8;
    /// Analog watchdog 1
    pub const AWD1: u32 = 1 << 7;
    /// Overrun
    pub const OVR: u32 = 1 << 4;
    /// End of conversion sequence
    pub const EOS: u32 = 1 << 3;
    /// End of conversion
    pub const EOC: u32 = 1 << 2;
    /// End of sampling
    pub const EOSMP: u32 = 1 << 1;
    /// ADC ready
    pub const ADRDY: u32 = 1;

    /// All IRQs
    pub const ALL: u32 = CCRDY | EOCAL | AWD3 | AWD2 | AWD1 | OVR | EOS | EOC | EOSMP | ADRDY;
}

/// Internal voltage reference ADC calibration
///
/// This is raw ADC data acquired at 30 °C (± 5 °C).
///
/// V<sub>DDA</sub> = V<sub>REF+</sub> = 3.0 V (± 10mV)
pub fn vref_cal() -> u16 {
    // DS12232 rev 6 "Internal voltage reference"
    unsafe { read_volatile(0x1FFF_75AA as *const u16) }
}

/// Convert a 12-bit sample to millivolts.
///
/// This assumes V<sub>DDA</sub> is [`VDD_VALUE_MV`](crate::board::VDD_VALUE_MV).
///
/// # Example
///
/// ```
/// use stm32g0xx_hal::adc::sample_to_mv;
///
/// assert_eq!(sample_to_mv(0), 0);
/// assert_eq!(sample_to_mv(0xFFF), 3300);
/// ```
pub const fn sample_to_mv(sample: u16) -> u16 {
    ((sample as u32 * board::VDD_VALUE_MV as u32) / 0xFFF) as u16
}

/// ADC clock mode
///
/// In all synchronous clock modes, there is no jitter in the delay from a
/// timer trigger to the start of a conversion.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Clk {
    /// Asynchronous clock mode SYSCLK
    RccSysClk,
    /// Asynchronous clock mode HSI16
    RccHsi,
    /// Synchronous clock mode, pclk/2
    PClkDiv2,
    /// Synchronous clock mode, pclk/4
    PClkDiv4,
    /// Synchronous clock mode, pclk
    ///
    /// This configuration must be enabled only if PCLK has a 50% duty clock
    /// cycle (APB prescaler configured inside the RCC must be bypassed and
    /// the system clock must by 50% duty cycle)
    PClk,
}

impl Clk {
    const fn ckmode(&self) -> u32 {
        match self {
            Clk::RccSysClk | Clk::RccHsi => CKMODE_ADCLK,
            Clk::PClkDiv2 => CKMODE_PCLK_DIV2,
            Clk::PClkDiv4 => CKMODE_PCLK_DIV4,
            Clk::PClk => CKMODE_PCLK,
        }
    }

    const fn adcsel(&self) -> u32 {
        match self {
            Clk::RccHsi => ADCSEL_HSI16,
            _ => ADCSEL_SYSCLK,
        }
    }
}

/// ADC sample times
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Ts {
    /// 1.5 ADC clock cycles
    Cyc1 = 0,
    /// 3.5 ADC clock cycles
    Cyc3 = 1,
    /// 7.5 ADC clock cycles
    Cyc7 = 2,
    /// 12.5 ADC clock cycles
    Cyc12 = 3,
    /// 19.5 ADC clock cycles
    Cyc19 = 4,
    /// 39.5 ADC clock cycles
    Cyc39 = 5,
    /// 79.5 ADC clock cycles
    Cyc79 = 6,
    /// 160.5 ADC clock cycles
    Cyc160 = 7,
}

impl Default for Ts {
    /// Reset value of the sample time.
    fn default() -> Self {
        Ts::Cyc1
    }
}

impl Ts {
    /// Maximum sample time, 160.5 ADC clock cycles.
    pub const MAX: Self = Self::Cyc160;

    /// Minimum sample time, 1.5 ADC clock cycles.
    pub const MIN: Self = Self::Cyc1;

    /// Number of cycles.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::adc::Ts;
    ///
    /// assert!(f32::from(Ts::Cyc1.cycles()) - 1.5 < 0.001);
    /// assert!(f32::from(Ts::Cyc39.cycles()) - 39.5 < 0.001);
    /// assert!(f32::from(Ts::Cyc160.cycles()) - 160.5 < 0.001);
    /// ```
    pub const fn cycles(&self) -> Ratio<u16> {
        match self {
            Ts::Cyc1 => Ratio::new_raw(3, 2),
            Ts::Cyc3 => Ratio::new_raw(7, 2),
            Ts::Cyc7 => Ratio::new_raw(15, 2),
            Ts::Cyc12 => Ratio::new_raw(25, 2),
            Ts::Cyc19 => Ratio::new_raw(39, 2),
            Ts::Cyc39 => Ratio::new_raw(79, 2),
            Ts::Cyc79 => Ratio::new_raw(159, 2),
            Ts::Cyc160 => Ratio::new_raw(321, 2),
        }
    }

    /// Get the cycles as a duration.
    ///
    /// Fractional nano-seconds are rounded towards zero.
    ///
    /// You can get the ADC frequency with [`Adc::clock_hz`].
    ///
    /// # Example
    ///
    /// Assuming the ADC clock frequency is 16 MHz.
    ///
    /// ```
    /// use core::time::Duration;
    /// use stm32g0xx_hal::adc::Ts;
    ///
    /// const FREQ: u32 = 16_000_000;
    ///
    /// assert_eq!(Ts::Cyc1.as_duration(FREQ), Duration::from_nanos(93));
    /// assert_eq!(Ts::Cyc160.as_duration(FREQ), Duration::from_nanos(10_031));
    /// ```
    pub const fn as_duration(&self, hz: u32) -> Duration {
        let numer: u64 = (*self.cycles().numer() as u64).saturating_mul(1_000_000_000);
        let denom: u64 = (*self.cycles().denom() as u64).saturating_mul(hz as u64);
        Duration::from_nanos(numer / denom)
    }
}

impl From<Ts> for u8 {
    fn from(ts: Ts) -> Self {
        ts as u8
    }
}

impl From<Ts> for u32 {
    fn from(ts: Ts) -> Self {
        ts as u32
    }
}

/// ADC channels
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum Ch {
    /// ADC input 0.
    ///
    /// Connected to [`A0`](crate::gpio::pins::A0).
    In0 = 0,
    /// ADC input 1.
    ///
    /// Connected to [`A1`](crate::gpio::pins::A1).
    In1 = 1,
    /// ADC input 2.
    ///
    /// Connected to [`A2`](crate::gpio::pins::A2).
    In2 = 2,
    /// ADC input 3.
    ///
    /// Connected to [`A3`](crate::gpio::pins::A3).
    In3 = 3,
    /// ADC input 4.
    ///
    /// Connected to [`A4`](crate::gpio::pins::A4).
    In4 = 4,
    /// ADC input 5.
    ///
    /// Connected to [`A5`](crate::gpio::pins::A5).
    In5 = 5,
    /// ADC input 6.
    ///
    /// Connected to [`A6`](crate::gpio::pins::A6).
    In6 = 6,
    /// ADC input 7.
    ///
    /// Connected to [`A7`](crate::gpio::pins::A7).
    In7 = 7,
    /// ADC input 8.
    ///
    /// Connected to [`B0`](crate::gpio::pins::B0).
    In8 = 8,
    /// ADC input 9.
    ///
    /// Connected to [`B1`](crate::gpio::pins::B1).
    In9 = 9,
    /// ADC input 10.
    ///
    /// Connected to [`B2`](crate::gpio::pins::B2).
    In10 = 10,
    /// ADC input 11.
    ///
    /// Connected to [`B10`](crate::gpio::pins::B10).
    In11 = 11,
    /// Junction temperature sensor.
    Vts = 12,
    /// Internal voltage reference.
    Vref = 13,
    /// Battery voltage divided by 3.
    Vbat = 14,
}

impl Ch {
    /// Bitmask of the channel.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::adc::Ch;
    ///
    /// assert_eq!(Ch::In0.mask(), 0x001);
    /// assert_eq!(Ch::In8.mask(), 0x100);
    /// ```
    pub const fn mask(self) -> u32 {
        1 << (self as u8)
    }
}

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

/// Analog to digital converter driver.
#[derive(Debug)]
pub struct Adc {
    adc: pac::ADC,
}

impl Adc {
    /// Create a new ADC driver from a ADC peripheral.
    ///
    /// This will enable the ADC clock and reset the ADC peripheral.
    ///
    /// **Note:** This will select the clock source, but you are responsible
    /// for enabling that clock source.
    ///
    /// # Example
    ///
    /// Initialize the ADC with HSI16.
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     adc::{self, Adc},
    ///     pac,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// // enable the HSI16 source clock
    /// dp.RCC.cr.modify(|_, w| w.hsion().set_bit());
    /// while dp.RCC.cr.read().hsirdy().bit_is_clear() {}
    ///
    /// let mut adc = Adc::new(dp.ADC, adc::Clk::RccHsi, &mut dp.RCC);
    /// ```
    #[inline]
    pub fn new(adc: pac::ADC, clk: Clk, rcc: &mut pac::RCC) -> Self {
        unsafe { Self::pulse_reset(rcc) };
        Self::enable_clock(rcc);
        let mut adc: Self = Self { adc };
        adc.set_clock_source(clk, rcc);
        adc
    }

    /// Create a new ADC driver from an ADC peripheral without initialization.
    ///
    /// This is a slightly safer version of [`steal`](Self::steal).
    ///
    /// # Safety
    ///
    /// 1. Reset the ADC peripheral if determinism is required.
    /// 2. Enable the ADC peripheral clock before using the ADC.
    /// 3. Select the clock source if a non-default clock is required.
    #[inline]
    pub const unsafe fn new_no_init(adc: pac::ADC) -> Self {
        Self { adc }
    }

    /// Free the ADC peripheral from the driver.
    #[inline]
    pub fn free(self) -> pac::ADC {
        self.adc
    }

    /// Steal the ADC peripheral from whatever is currently using it.
    ///
    /// This will **not** initialize the ADC (unlike [`new`]).
    ///
    /// # Safety
    ///
    /// 1. Ensure that the code stealing the ADC has exclusive access to the
    ///    peripheral. Singleton checks are bypassed with this method.
    /// 2. Reset the ADC peripheral if determinism is required.
    /// 3. Enable the ADC peripheral clock before using the ADC.
    /// 4. Select the clock source if a non-default clock is required.
    ///
    /// [`new`]: Adc::new
    #[inline]
    pub unsafe fn steal() -> Adc {
        Adc {
            adc: pac::Peripherals::steal().ADC,
        }
    }

    /// Set the ADC clock source.
    ///
    /// # Panics
    ///
    /// * (debug) ADC is enabled
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     adc::{self, Adc},
    ///     pac,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let mut adc: Adc = Adc::new(dp.ADC, adc::Clk::PClkDiv4, &mut dp.RCC);
    ///
    /// // change the clock source
    /// adc.disable();
    /// adc.set_clock_source(adc::Clk::RccSysClk, &mut dp.RCC);
    /// ```
    pub fn set_clock_source(&mut self, clk: Clk, rcc: &mut pac::RCC) {
        debug_assert!(!self.is_enabled());
        self.adc.cfgr2.modify(|r, w| unsafe {
            w.bits((r.bits() & !(0b11 << CKMODE_SHIFT)) | (clk.ckmode() << CKMODE_SHIFT))
        });
        rcc.ccipr.modify(|r, w| unsafe {
            w.bits((r.bits() & !(0b11 << ADCSEL_SHIFT)) | (clk.adcsel() << ADCSEL_SHIFT))
        });
    }

    /// Get the ADC clock source.
    ///
    /// Returns `None` if the ADC is configured for an asynchronous clock,
    /// but the clock selection is a reserved value.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     adc::{self, Adc},
    ///     pac,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let mut adc: Adc = Adc::new(dp.ADC, adc::Clk::PClkDiv4, &mut dp.RCC);
    ///
    /// assert_eq!(adc.clock_source(&dp.RCC), Some(adc::Clk::PClkDiv4));
    /// ```
    pub fn clock_source(&self, rcc: &pac::RCC) -> Option<Clk> {
        match (self.adc.cfgr2.read().bits() >> CKMODE_SHIFT) & 0b11 {
            CKMODE_ADCLK => match (rcc.ccipr.read().bits() >> ADCSEL_SHIFT) & 0b11 {
                ADCSEL_SYSCLK => Some(Clk::RccSysClk),
                ADCSEL_HSI16 => Some(Clk::RccHsi),
                _ => None,
            },
            CKMODE_PCLK_DIV2 => Some(Clk::PClkDiv2),
            CKMODE_PCLK_DIV4 => Some(Clk::PClkDiv4),
            _ => Some(Clk::PClk),
        }
    }

    /// Disable the ADC clock.
    ///
    /// # Safety
    ///
    /// 1. Ensure nothing is using the ADC before disabling the clock.
    /// 2. You are responsible for re-enabling the clock before using the ADC.
    #[inline]
    pub unsafe fn disable_clock(rcc: &mut pac::RCC) {
        rcc.apbenr2.modify(|_, w| w.adcen().clear_bit());
    }

    /// Enable the ADC clock.
    ///
    /// [`new`](crate::adc::Adc::new) will enable clocks for you.
    #[inline]
    pub fn enable_clock(rcc: &mut pac::RCC) {
        rcc.apbenr2.modify(|_, w| w.adcen().set_bit());
        rcc.apbenr2.read(); // delay after an RCC peripheral clock enabling
    }

    /// Pulse the ADC reset.
    ///
    /// [`new`](crate::adc::Adc::new) will pulse reset for you.
    ///
    /// # Safety
    ///
    /// 1. Ensure nothing is using the ADC before calling this function.
    /// 2. You are responsible for setting up the ADC after a reset.
    #[inline]
    pub unsafe fn pulse_reset(rcc: &mut pac::RCC) {
        rcc.apbrstr2.modify(|_, w| w.adcrst().set_bit());
        rcc.apbrstr2.modify(|_, w| w.adcrst().clear_bit());
    }

    /// Calculate the ADC clock frequency in hertz.
    ///
    /// **Note:** If the ADC prescaler register erroneously returns a reserved
    /// value the code will default to an ADC prescaler of 256.
    ///
    /// Fractional frequencies will be rounded towards zero.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     adc::{self, Adc},
    ///     pac,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// // enable the HSI16 source clock
    /// dp.RCC.cr.modify(|_, w| w.hsion().set_bit());
    /// while dp.RCC.cr.read().hsirdy().bit_is_clear() {}
    ///
    /// let adc: Adc = Adc::new(dp.ADC, adc::Clk::RccHsi, &mut dp.RCC);
    /// assert_eq!(adc.clock_hz(&dp.RCC), 16_000_000);
    /// ```
    pub fn clock_hz(&self, rcc: &pac::RCC) -> u32 {
        let cfgr: pac::rcc::cfgr::R = rcc.cfgr.read();
        let source_freq: Ratio<u32> = match (self.adc.cfgr2.read().bits() >> CKMODE_SHIFT) & 0b11 {
            CKMODE_ADCLK => {
                let src: Ratio<u32> = match (rcc.ccipr.read().bits() >> ADCSEL_SHIFT) & 0b11 {
                    ADCSEL_HSI16 => Ratio::new_raw(board::HSI_VALUE, 1),
                    _ => crate::rcc::sysclk(rcc, &cfgr),
                };

                // only the asynchronous clocks have the prescaler applied
                let presc: u32 = (self.adc.ccr.read().bits() >> CCR_PRESC_SHIFT) & 0xF;
                src / presc_div(presc)
            }
            CKMODE_PCLK_DIV2 => crate::rcc::pclk(rcc, &cfgr) / 2,
            CKMODE_PCLK_DIV4 => crate::rcc::pclk(rcc, &cfgr) / 4,
            _ => crate::rcc::pclk(rcc, &cfgr),
        };

        source_freq.to_integer()
    }

    /// Set sample times for **all** channels.
    ///
    /// For each bit in the mask:
    ///
    /// * `0`: Sample time is set by the `sel0` argument.
    /// * `1`: Sample time is set by the `sel1` argument.
    ///
    /// # Panics
    ///
    /// * (debug) An ADC conversion is in-progress
    ///
    /// # Example
    ///
    /// Set ADC channels [`In5`] and [`In6`] (pins [`A5`] and [`A6`]
    /// respectively) and the internal V<sub>BAT</sub> to a sample time of
    /// 39.5 ADC clock cycles, and set all other channels to a sample time of
    /// 160.5 clock cycles.
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     adc::{self, Adc, Ts},
    ///     gpio::pins::{A5, A6},
    ///     pac,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let mut adc = Adc::new(dp.ADC, adc::Clk::PClkDiv4, &mut dp.RCC);
    /// adc.set_sample_times(
    ///     A5::ADC_CH.mask() | A6::ADC_CH.mask() | adc::Ch::Vbat.mask(),
    ///     Ts::Cyc160,
    ///     Ts::Cyc39,
    /// );
    /// ```
    ///
    /// [`In5`]: crate::adc::Ch::In5
    /// [`In6`]: crate::adc::Ch::In6
    /// [`A5`]: crate::gpio::pins::A5
    /// [`A6`]: crate::gpio::pins::A6
    #[inline]
    pub fn set_sample_times(&mut self, mask: u32, sel0: Ts, sel1: Ts) {
        debug_assert!(self.adc.cr.read().adstart().bit_is_clear());
        // saftey: reserved bits are masked and will be held at reset value
        self.adc.smpr.write(|w| unsafe {
            w.bits((mask & CH_MASK) << 8 | u32::from(sel1) << 4 | u32::from(sel0))
        })
    }

    /// Sets all channels to the maximum sample time.
    ///
    /// This is a helper for testing and rapid prototyping purpose because
    /// [`set_sample_times`](Adc::set_sample_times) is verbose.
    #[inline]
    pub fn set_max_sample_time(&mut self) {
        self.set_sample_times(0, Ts::Cyc160, Ts::Cyc160);
    }

    /// Clear interrupts.
    ///
    /// # Example
    ///
    /// Clear all interrupts.
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     adc::{self, Adc},
    ///     pac,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let mut adc = Adc::new(dp.ADC, adc::Clk::PClkDiv4, &mut dp.RCC);
    /// adc.set_isr(adc::irq::ALL);
    /// ```
    #[inline]
    pub fn set_isr(&mut self, isr: u32) {
        // saftey: reserved bits are masked and will be held at reset value
        self.adc.isr.write(|w| unsafe { w.bits(isr & irq::ALL) })
    }

    /// Read the interrupt status.
    ///
    /// # Example
    ///
    /// Check if the ADC is ready.
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     adc::{self, Adc},
    ///     pac,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let mut adc = Adc::new(dp.ADC, adc::Clk::PClkDiv4, &mut dp.RCC);
    /// // this will be false because the ADC is not enabled
    /// let ready: bool = Adc::isr().adrdy().bit_is_set();
    /// ```
    #[inline]
    pub fn isr() -> pac::adc::isr::R {
        // saftey: atomic read with no side-effects
        unsafe { (*pac::ADC::PTR).isr.read() }
    }

    /// Enable and disable interrupts.
    ///
    /// # Example
    ///
    /// Enable all IRQs
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     adc::{self, Adc},
    ///     pac,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let mut adc = Adc::new(dp.ADC, adc::Clk::PClkDiv4, &mut dp.RCC);
    /// adc.set_ier(adc::irq::ALL);
    /// ```
    #[inline]
    pub fn set_ier(&mut self, ier: u32) {
        // saftey: reserved bits are masked and will be held at reset value
        self.adc.ier.write(|w| unsafe { w.bits(ier & irq::ALL) })
    }

    /// Configure the channel sequencer.
    ///
    /// This is advanced ADC usage, most of the time you will want to use a
    /// one of the available sample methods that will configure this.
    ///
    /// * [`pin`](Self::pin)
    /// * [`temperature`](Self::temperature)
    /// * [`vbat`](Self::vbat)
    ///
    /// This will not poll for completion, when this method returns the channel
    /// configuration may not be ready.
    ///
    /// # Panics
    ///
    /// * (debug) ADC conversion is in-progress.
    ///
    /// # Example
    ///
    /// Select the ADC V<sub>BAT</sub> channel.
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     adc::{self, Adc},
    ///     pac,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let mut adc = Adc::new(dp.ADC, adc::Clk::PClkDiv4, &mut dp.RCC);
    /// adc.start_chsel(adc::Ch::Vbat.mask());
    /// while Adc::isr().ccrdy().bit_is_clear() {}
    /// ```
    #[inline]
    pub fn start_chsel(&mut self, ch: u32) {
        debug_assert!(self.adc.cr.read().adstart().bit_is_clear());
        // RM0444 rev 5 section 15.3.8 "Channel selection"
        // saftey: reserved bits are masked and will be held at reset value
        unsafe { CHSELR.write_volatile(ch & CH_MASK) }
    }

    #[inline]
    fn cfg_ch_seq(&mut self, ch: u32) {
        self.start_chsel(ch);
        while self.adc.isr.read().ccrdy().bit_is_clear() {}
    }

    /// Start an ADC conversion.
    ///
    /// This is advanced ADC usage, most of the time you will want to use a
    /// one of the available sample methods that will configure this.
    ///
    /// This will not poll for completion, when this method returns the AD
    /// conversion may not be complete.
    ///
    /// # Panics
    ///
    /// * (debug) ADC is not enabled
    /// * (debug) ADC has a pending disable request
    #[inline]
    pub fn start_conversion(&mut self) {
        debug_assert!(self.is_enabled());
        debug_assert!(self.adc.cr.read().addis().bit_is_clear());
        self.adc.cr.write(|w| w.adstart().set_bit());
    }

    /// Stop an ADC conversion if there is one in-progress.
    pub fn stop_conversion(&mut self) {
        if self.adc.cr.read().adstart().bit_is_set() {
            self.adc.cr.write(|w| w.adstp().set_bit());
            while self.adc.cr.read().adstp().bit_is_set() {}
        }
    }

    /// Read the ADC conversion data.
    ///
    /// This is advanced ADC usage, most of the time you will want to use a
    /// one of the available sample methods.
    ///
    /// * [`pin`](Self::pin)
    /// * [`temperature`](Self::temperature)
    /// * [`vbat`](Self::vbat)
    ///
    /// # Example
    ///
    /// Read the ADC V<sub>BAT</sub> channel.
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     adc::{self, Adc},
    ///     pac,
    ///     tim::Tim3,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// // enable the HSI16 source clock
    /// dp.RCC.cr.modify(|_, w| w.hsion().set_bit());
    /// while dp.RCC.cr.read().hsirdy().bit_is_clear() {}
    ///
    /// let mut delay: Tim3 = Tim3::new(dp.TIM3, &mut dp.RCC);
    /// let mut adc = Adc::new(dp.ADC, adc::Clk::RccHsi, &mut dp.RCC);
    ///
    /// // calibrate the ADC before it is enabled
    /// adc.calibrate(&mut delay);
    ///
    /// // enable the ADC
    /// adc.enable();
    /// adc.enable_vbat();
    ///
    /// // set the sample times to the maximum (160.5 ADC cycles)
    /// adc.set_max_sample_time();
    ///
    /// // select the Vbat channel and poll for completion
    /// adc.start_chsel(adc::Ch::Vbat.mask());
    /// while Adc::isr().ccrdy().bit_is_clear() {}
    ///
    /// // start the conversion and poll for completion
    /// adc.start_conversion();
    /// while Adc::isr().eoc().bit_is_clear() {}
    ///
    /// // read the ADC data
    /// let vbat: u16 = adc.data();
    /// ```
    #[inline]
    pub fn data(&self) -> u16 {
        self.adc.dr.read().bits() as u16
    }

    fn poll_data(&self) -> u16 {
        while self.adc.isr.read().eoc().bit_is_clear() {}
        let data: u16 = self.data();
        self.adc.isr.write(|w| w.eoc().set_bit());
        data
    }

    /// Enable the temperature sensor.
    ///
    /// You **MUST** wait for the temperature sensor to start up
    /// ([`TS_START_MAX`]) before the samples will be accurate.
    #[inline]
    pub fn enable_tsen(&mut self) {
        self.adc
            .ccr
            .modify(|r, w| unsafe { w.bits(r.bits() | CCR_TSEN) })
    }

    /// Disable the temperature sensor.
    #[inline]
    pub fn disable_tsen(&mut self) {
        self.adc
            .ccr
            .modify(|r, w| unsafe { w.bits(r.bits() & !CCR_TSEN) })
    }

    /// Returns `true` if the temperature sensor is enabled.
    #[inline]
    #[must_use]
    pub fn is_tsen_enabled(&mut self) -> bool {
        self.adc.ccr.read().bits() & CCR_TSEN != 0
    }

    /// Get the junction temperature.
    ///
    /// # Panics
    ///
    /// * (debug) ADC is not enabled
    /// * (debug) Temperature sensor is not enabled
    ///
    /// # Sample Time
    ///
    /// You must set a sampling time with
    /// [`set_sample_times`](Adc::set_sample_times) greater than or equal to
    /// [`TS_MIN_SAMPLE`] before calling this method.
    /// When in doubt use the maximum sampling time, [`Ts::Cyc160`].
    ///
    /// # Calibration
    ///
    /// If the ADC has been calibrated with [`calibrate`] the calibration
    /// offset will be removed from the sample.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use embedded_hal::blocking::delay::DelayUs;
    /// use stm32g0xx_hal::{
    ///     adc::{self, Adc},
    ///     pac,
    ///     tim::Tim3,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// // enable the HSI16 source clock
    /// dp.RCC.cr.modify(|_, w| w.hsion().set_bit());
    /// while dp.RCC.cr.read().hsirdy().bit_is_clear() {}
    ///
    /// let mut delay: Tim3 = Tim3::new(dp.TIM3, &mut dp.RCC);
    ///
    /// let mut adc = Adc::new(dp.ADC, adc::Clk::RccHsi, &mut dp.RCC);
    /// adc.enable();
    /// adc.enable_tsen();
    /// delay.delay_us(adc::TS_START_MAX.as_micros() as u32);
    /// adc.set_max_sample_time();
    ///
    /// let tj: i16 = adc.temperature().to_integer();
    /// ```
    ///
    /// [`calibrate`]: crate::adc::Adc::calibrate
    pub fn temperature(&mut self) -> Ratio<i16> {
        debug_assert!(self.is_enabled());
        debug_assert!(self.is_tsen_enabled());

        self.cfg_ch_seq(Ch::Vts.mask());
        self.start_conversion();

        let (ts_cal1, ts_cal2): (u16, u16) = ts_cal();
        let ret: Ratio<i16> =
            Ratio::new_raw(TS_CAL_TEMP_DELTA, ts_cal2.wrapping_sub(ts_cal1) as i16);

        let calfact: u8 = self.calfact();
        let ts_data: u16 = self.poll_data().saturating_add(u16::from(calfact));

        ret * (ts_data.wrapping_sub(ts_cal1) as i16) + TS_CAL1_TEMP
    }

    /// Enable the internal voltage reference.
    #[inline]
    pub fn enable_vref(&mut self) {
        self.adc
            .ccr
            .modify(|r, w| unsafe { w.bits(r.bits() | CCR_VREFEN) })
    }

    /// Disable the internal voltage reference.
    #[inline]
    pub fn disable_vref(&mut self) {
        self.adc
            .ccr
            .modify(|r, w| unsafe { w.bits(r.bits() & !CCR_VREFEN) })
    }

    /// Returns `true` if the internal voltage reference is enabled.
    #[inline]
    #[must_use]
    pub fn is_vref_enabled(&mut self) -> bool {
        self.adc.ccr.read().bits() & CCR_VREFEN != 0
    }

    /// Read the internal voltage reference.
    ///
    /// # Panics
    ///
    /// * (debug) ADC is not enabled
    /// * (debug) Voltage reference is not enabled
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     adc::{self, Adc},
    ///     pac,
    ///     tim::Tim3,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// // enable the HSI16 source clock
    /// dp.RCC.cr.modify(|_, w| w.hsion().set_bit());
    /// while dp.RCC.cr.read().hsirdy().bit_is_clear() {}
    ///
    /// let mut delay: Tim3 = Tim3::new(dp.TIM3, &mut dp.RCC);
    ///
    /// let mut adc = Adc::new(dp.ADC, adc::Clk::RccHsi, &mut dp.RCC);
    /// adc.calibrate(&mut delay);
    /// adc.set_max_sample_time();
    /// adc.enable();
    /// adc.enable_vref();
    ///
    /// let vref: u16 = adc.vref();
    /// ```
    pub fn vref(&mut self) -> u16 {
        debug_assert!(self.is_enabled());
        debug_assert!(self.is_vref_enabled());
        self.cfg_ch_seq(Ch::Vref.mask());
        self.start_conversion();
        self.poll_data()
    }

    /// Sample a GPIO pin.
    ///
    /// # Panics
    ///
    /// * (debug) ADC is not enabled
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     adc::{self, Adc},
    ///     gpio::{pins::A5, Analog, PortA},
    ///     pac,
    ///     tim::Tim3,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// // enable the HSI16 source clock
    /// dp.RCC.cr.modify(|_, w| w.hsion().set_bit());
    /// while dp.RCC.cr.read().hsirdy().bit_is_clear() {}
    ///
    /// let mut delay: Tim3 = Tim3::new(dp.TIM3, &mut dp.RCC);
    ///
    /// let mut adc = Adc::new(dp.ADC, adc::Clk::RccHsi, &mut dp.RCC);
    /// adc.calibrate(&mut delay);
    /// adc.set_max_sample_time();
    /// adc.enable();
    ///
    /// let gpioa: PortA = PortA::split(dp.GPIOA, &mut dp.RCC);
    /// let a5: Analog<A5> = Analog::new(gpioa.a5);
    ///
    /// let sample: u16 = adc.pin(&a5);
    /// ```
    #[allow(unused_variables)]
    pub fn pin<P: gpio::sealed::AdcCh>(&mut self, pin: &gpio::Analog<P>) -> u16 {
        debug_assert!(self.is_enabled());
        self.cfg_ch_seq(P::ADC_CH.mask());
        self.start_conversion();
        self.poll_data()
    }

    /// Enable V<sub>BAT</sub>.
    ///
    /// To prevent any unwanted consumption on the battery, it is recommended to
    /// enable the bridge divider only when needed for ADC conversion.
    #[inline]
    pub fn enable_vbat(&mut self) {
        self.adc
            .ccr
            .modify(|r, w| unsafe { w.bits(r.bits() | CCR_VBATEN) })
    }

    /// Disable V<sub>BAT</sub>.
    #[inline]
    pub fn disable_vbat(&mut self) {
        self.adc
            .ccr
            .modify(|r, w| unsafe { w.bits(r.bits() & !CCR_VBATEN) })
    }

    /// Returns `true` if V<sub>BAT</sub> is enabled.
    #[inline]
    #[must_use]
    pub fn is_vbat_enabled(&self) -> bool {
        self.adc.ccr.read().bits() & CCR_VBATEN != 0
    }

    /// Sample the V<sub>BAT</sub> pin.
    ///
    /// This is internally connected to a bridge divider, the converted digital
    /// value is a third the V<sub>BAT</sub> voltage.
    ///
    /// # Panics
    ///
    /// * (debug) ADC is not enabled
    /// * (debug) V<sub>BAT</sub> is not enabled
    pub fn vbat(&mut self) -> u16 {
        debug_assert!(self.is_enabled());
        debug_assert!(self.is_vbat_enabled());
        self.cfg_ch_seq(Ch::Vbat.mask());
        self.start_conversion();
        self.poll_data()
    }
}

// on-off control
// see RM0444 rev 5 section 15.3.5
impl Adc {
    /// Returns `true` if the ADC is enabled.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.adc.cr.read().aden().bit_is_set()
    }

    /// Returns `true` if an ADC disable command is in-progress.
    #[inline]
    #[must_use]
    pub fn disable_in_progress(&self) -> bool {
        self.adc.cr.read().addis().bit_is_set()
    }

    /// Returns `true` if the ADC is disabled, and there is no disable command
    /// in-progress.
    #[inline]
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        let cr = self.adc.cr.read();
        cr.aden().bit_is_clear() && cr.addis().bit_is_clear()
    }

    /// Start the ADC enable procedure.
    ///
    /// This is advanced ADC usage, most of the time you will want to use
    /// [`enable`](Self::enable).
    ///
    /// This will not poll for completion, when this method returns the ADC
    /// may not be enabled.
    ///
    /// The method returns `true` if the caller function should poll for
    /// completion (the ADC was not already enabled),
    /// if the ADC was already enabled and the ADRDY interrupt was cleared then
    /// the ADRDY bit will **not** be set again after calling this method
    /// which can lead to polling loops that will never terminate.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     adc::{self, Adc},
    ///     pac,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let mut adc = Adc::new(dp.ADC, adc::Clk::PClkDiv4, &mut dp.RCC);
    /// if adc.start_enable() {
    ///     while Adc::isr().adrdy().bit_is_clear() {}
    /// }
    /// ```
    #[inline]
    #[must_use = "the return value indicates if you should wait for completion"]
    pub fn start_enable(&mut self) -> bool {
        if self.adc.cr.read().aden().bit_is_clear() {
            self.adc.isr.write(|w| w.adrdy().set_bit());
            self.adc.cr.write(|w| w.aden().set_bit());
            true
        } else {
            false
        }
    }

    /// Enable the ADC and poll for completion.
    #[inline]
    pub fn enable(&mut self) {
        if self.start_enable() {
            while self.adc.isr.read().adrdy().bit_is_clear() {}
        }
    }

    /// Start the ADC disable procedure.
    ///
    /// This is advanced ADC usage, most of the time you will want to use
    /// [`disable`](Self::disable).
    ///
    /// This will not poll for completion, when this function returns the ADC
    /// may not be disabled.
    ///
    /// This will stop any conversions in-progress.
    pub fn start_disable(&mut self) {
        // RM0444 rev 5 section 15.3.5 ADC on-off control
        // 1. Check that ADSTART = 0 in the ADC_CR register to ensure that no
        //    conversion is ongoing.
        //    If required, stop any ongoing conversion by writing 1 to the
        //    ADSTP bit in the ADC_CR register and waiting until this bit is
        //    read at 0.
        // 2. Set ADDIS = 1 in the ADC_CR register.
        // 3. If required by the application, wait until ADEN = 0 in the ADC_CR
        //    register, indicating that the ADC is fully disabled
        //    (ADDIS is automatically reset once ADEN = 0).
        // 4. Clear the ADRDY bit in ADC_ISR register by programming this bit
        //    to 1 (optional).
        self.stop_conversion();
        // Setting ADDIS to `1` is only effective when ADEN = 1 and ADSTART = 0
        // (which ensures that no conversion is ongoing)
        if self.adc.cr.read().aden().bit_is_set() {
            self.adc.cr.write(|w| w.addis().set_bit());
        }
    }

    /// Disable the ADC and poll for completion.
    pub fn disable(&mut self) {
        self.start_disable();
        while !self.is_disabled() {}
    }
}

// calibration related methods
// see RM0444 rev 5 section 15.3.3
impl Adc {
    /// Calibrate the ADC for additional accuracy.
    ///
    /// Calibration should be performed before starting A/D conversion.
    /// It removes the offset error which may vary from chip to chip due to
    /// process variation.
    ///
    /// The calibration factor is lost in the following cases:
    /// * The power supply is removed from the ADC
    ///   (for example when entering STANDBY mode)
    /// * The ADC peripheral is reset.
    ///
    /// This will disable the ADC if it is not already disabled.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     adc::{self, Adc},
    ///     pac,
    ///     tim::Tim3,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// // enable the HSI16 source clock
    /// dp.RCC.cr.modify(|_, w| w.hsion().set_bit());
    /// while dp.RCC.cr.read().hsirdy().bit_is_clear() {}
    ///
    /// let mut delay: Tim3 = Tim3::new(dp.TIM3, &mut dp.RCC);
    /// let mut adc = Adc::new(dp.ADC, adc::Clk::RccHsi, &mut dp.RCC);
    /// adc.calibrate(&mut delay);
    /// ```
    pub fn calibrate<D: DelayUs<u32>>(&mut self, delay: &mut D) {
        self.enable_vreg();

        // voltage regulator output is available after T_ADCVREG_SETUP
        delay.delay_us(u32::from(T_ADCVREG_SETUP_MICROS));

        self.start_calibrate();

        while self.adc.cr.read().adcal().bit_is_set() {}
        self.adc.isr.write(|w| w.eocal().set_bit());
    }

    /// Enable the ADC voltage regulator for calibration.
    ///
    /// This is advanced ADC usage, most of the time you will want to use
    /// [`calibrate`](Self::calibrate).
    ///
    /// This will disable the ADC and DMA request generation if not already
    /// disabled.
    ///
    /// You **MUST** wait [`T_ADCVREG_SETUP`] before the voltage regulator
    /// output is available.  This delay is not performed for you.
    pub fn enable_vreg(&mut self) {
        // RM0444 rev 5 section 15.3.3 Software calibration procedure
        // 1. Ensure that ADEN = 0, ADVREGEN = 1 and DMAEN = 0.
        // 2. Set ADCAL = 1.
        // 3. Wait until ADCAL = 0 (or until EOCAL = 1).
        // 4. The calibration factor can be read from bits 6:0 of ADC_DR or
        //    ADC_CALFACT registers.
        self.disable();

        // enable the voltage regulator as soon as possible to start the
        // countdown on the regulator setup time
        // this is a write because all other fields must be zero
        self.adc.cr.write(|w| w.advregen().set_bit());
        // disable DMA per the calibration procedure
        self.adc.cfgr1.modify(|_, w| w.dmaen().clear_bit());
    }

    /// Disable the ADC voltage regulator.
    ///
    /// # Panics
    ///
    /// * (debug) ADC is enabled
    #[inline]
    pub fn disable_vreg(&mut self) {
        debug_assert!(self.is_disabled());
        self.adc.cr.write(|w| w.advregen().clear_bit());
    }

    /// Start the ADC calibration.
    ///
    /// This is advanced ADC usage, most of the time you will want to use
    /// [`calibrate`](Self::calibrate).
    ///
    /// When this function returns the ADC calibration has started, but
    /// may not have finished.
    /// Check if the ADC calibration has finished with [`Adc::isr`].
    ///
    /// # Panics
    ///
    /// * (debug) ADC is enabled.
    /// * (debug) ADC voltage regulator is not enabled.
    #[inline]
    pub fn start_calibrate(&mut self) {
        debug_assert!(self.adc.cr.read().advregen().bit_is_set());
        debug_assert!(self.is_disabled());
        self.adc
            .cr
            .write(|w| w.adcal().set_bit().advregen().set_bit());
    }

    /// Get the ADC calibration factor.
    #[inline]
    pub fn calfact(&self) -> u8 {
        (self.adc.calfact.read().bits() & 0x7F) as u8
    }

    /// Force the ADC calibration.
    ///
    /// The calibration factor is lost each time power is removed from the ADC
    /// (for example when entering standby mode).
    /// It is possible to save and restore the calibration factor with firmware
    /// to save time when re-starting the ADC (as long as temperature and
    /// voltage are stable during the ADC power-down).
    ///
    /// # Panics
    ///
    /// * (debug) ADC is not enabled
    /// * (debug) ADC conversion is in-progress
    #[inline]
    pub fn force_cal(&mut self, calfact: u8) {
        debug_assert!(self.is_enabled());
        debug_assert!(self.adc.cr.read().adstart().bit_is_clear());
        self.adc
            .calfact
            .write(|w| unsafe { w.bits(u32::from(calfact) & 0x7F) })
    }
}

#[cfg(test)]
mod tests {
    use super::{presc_div, sample_to_mv, Ch, CH_MASK};

    #[test]
    fn channel_masks() {
        assert_eq!(Ch::In0.mask(), 0x0001);
        assert_eq!(Ch::In11.mask(), 0x0800);
        assert_eq!(Ch::Vts.mask(), 0x1000);
        assert_eq!(Ch::Vref.mask(), 0x2000);
        assert_eq!(Ch::Vbat.mask(), 0x4000);
        assert_eq!(
            CH_MASK,
            Ch::Vbat.mask() | (Ch::Vbat.mask() - 1),
            "mask must cover all modeled channels"
        );
    }

    #[test]
    fn prescaler_table() {
        assert_eq!(presc_div(0b0000), 1);
        assert_eq!(presc_div(0b0101), 10);
        assert_eq!(presc_div(0b1001), 64);
        assert_eq!(presc_div(0b1011), 256);
        assert_eq!(presc_div(0b1111), 256);
    }

    #[test]
    fn sample_millivolts() {
        assert_eq!(sample_to_mv(0), 0);
        assert_eq!(sample_to_mv(0x800), 1650);
        assert_eq!(sample_to_mv(0xFFF), 3300);
    }
}
