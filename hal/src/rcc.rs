//! Reset and clocking control
//!
//! Unlike other HALs clocks do not get frozen.
//! A lot of applications for this chip will require low-power considerations,
//! and there are many scenarios where you will want to adjust the clocks.
//!
//! All frequencies are computed from the hardware registers and the
//! [`board`](crate::board) constants, never cached.

use crate::{board, pac, Ratio};
use core::convert::TryFrom;
use cortex_m::{interrupt::CriticalSection, peripheral::syst::SystClkSource};

/// Sysclk source selection, CFGR SW/SWS encoding.
const SW_HSISYS: u8 = 0b000;
const SW_HSE: u8 = 0b001;
const SW_PLLR: u8 = 0b010;
const SW_LSI: u8 = 0b011;
const SW_LSE: u8 = 0b100;

fn set_flash_latency(flash: &pac::FLASH, target_sysclk_hz: u32, vos: Vos) {
    let latency: FlashLatency = FlashLatency::from_hertz(vos, target_sysclk_hz);

    // safety: all latency values of the field are valid
    flash
        .acr
        .modify(|_, w| unsafe { w.latency().bits(latency as u8) });

    while flash.acr.read().latency().bits() != (latency as u8) {}
}

#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum FlashLatency {
    /// Zero wait states.
    Zero = 0b000,
    /// One wait state.
    One = 0b001,
    /// Two wait states.
    Two = 0b010,
}

impl FlashLatency {
    pub const fn from_hertz(vos: Vos, hz: u32) -> FlashLatency {
        match vos {
            Vos::Range1 => match hz {
                0..=24_000_000 => FlashLatency::Zero,
                24_000_001..=48_000_000 => FlashLatency::One,
                _ => FlashLatency::Two,
            },
            Vos::Range2 => match hz {
                0..=8_000_000 => FlashLatency::Zero,
                _ => FlashLatency::One,
            },
        }
    }
}

/// Voltage scaling
///
/// See RM0444 rev 5 section 4.1.4 dynamic voltage scaling management
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Vos {
    /// High-performance range (range 1)
    ///
    /// * The main regulator provides a typical output voltage at 1.2 V.
    /// * The system clock frequency can be up to 64 MHz.
    /// * The Flash memory access time for read access is minimum.
    Range1 = 0b01,
    /// Low-power range (range 2)
    ///
    /// * The main regulator provides a typical output voltage at 1.0 V.
    /// * The system clock frequency can be up to 16 MHz.
    /// * The Flash memory access time for a read access is increased as
    ///   compared to range 1.
    Range2 = 0b10,
}

/// HSI16 prescaler, the HSISYS divider.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HsiDiv {
    /// HSI16 not divided, HSISYS is 16 MHz.
    Div1 = 0b000,
    /// HSI16 divided by 2, HSISYS is 8 MHz.
    Div2 = 0b001,
    /// HSI16 divided by 4, HSISYS is 4 MHz.
    Div4 = 0b010,
    /// HSI16 divided by 8, HSISYS is 2 MHz.
    Div8 = 0b011,
    /// HSI16 divided by 16, HSISYS is 1 MHz.
    Div16 = 0b100,
    /// HSI16 divided by 32, HSISYS is 500 kHz.
    Div32 = 0b101,
    /// HSI16 divided by 64, HSISYS is 250 kHz.
    Div64 = 0b110,
    /// HSI16 divided by 128, HSISYS is 125 kHz.
    Div128 = 0b111,
}

impl HsiDiv {
    /// Get the divisor value.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::rcc::HsiDiv;
    ///
    /// assert_eq!(HsiDiv::Div1.divisor(), 1);
    /// assert_eq!(HsiDiv::Div8.divisor(), 8);
    /// assert_eq!(HsiDiv::Div128.divisor(), 128);
    /// ```
    pub const fn divisor(&self) -> u32 {
        1 << (*self as u8)
    }

    fn from_rcc(rcc: &pac::RCC) -> HsiDiv {
        // the field is 3 bits wide and all 8 values are defined
        unwrap!(HsiDiv::try_from(rcc.cr.read().hsidiv().bits()))
    }
}

impl Default for HsiDiv {
    fn default() -> Self {
        HsiDiv::Div1
    }
}

impl From<HsiDiv> for u8 {
    fn from(x: HsiDiv) -> Self {
        x as u8
    }
}

impl TryFrom<u8> for HsiDiv {
    type Error = u8;
    fn try_from(x: u8) -> Result<Self, Self::Error> {
        match x {
            0b000 => Ok(HsiDiv::Div1),
            0b001 => Ok(HsiDiv::Div2),
            0b010 => Ok(HsiDiv::Div4),
            0b011 => Ok(HsiDiv::Div8),
            0b100 => Ok(HsiDiv::Div16),
            0b101 => Ok(HsiDiv::Div32),
            0b110 => Ok(HsiDiv::Div64),
            0b111 => Ok(HsiDiv::Div128),
            _ => Err(x),
        }
    }
}

/// AHB prescaler divisor, HPRE encoding.
const fn hpre_div(pre: u8) -> u16 {
    match pre {
        0b1000 => 2,
        0b1001 => 4,
        0b1010 => 8,
        0b1011 => 16,
        0b1100 => 64,
        0b1101 => 128,
        0b1110 => 256,
        0b1111 => 512,
        _ => 1,
    }
}

/// APB prescaler divisor, PPRE encoding.
const fn ppre_div(pre: u8) -> u8 {
    match pre {
        0b100 => 2,
        0b101 => 4,
        0b110 => 8,
        0b111 => 16,
        _ => 1,
    }
}

/// PLL configuration.
///
/// The PLL output is `src / m * n / r`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PllCfg {
    /// Input divider, 1 through 8.
    pub m: u8,
    /// Multiplier, 8 through 86.
    pub n: u8,
    /// PLLR output divider, 2 through 8.
    pub r: u8,
}

impl PllCfg {
    /// 64 MHz from the 16 MHz HSI: 16 / 1 × 8 / 2.
    pub const MAX_FROM_HSI: PllCfg = PllCfg { m: 1, n: 8, r: 2 };

    /// Calculate the PLLR output frequency for a given input frequency.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::rcc::PllCfg;
    ///
    /// assert_eq!(PllCfg::MAX_FROM_HSI.output_hz(16_000_000), 64_000_000);
    /// ```
    pub const fn output_hz(&self, src_hz: u32) -> u32 {
        src_hz / (self.m as u32) * (self.n as u32) / (self.r as u32)
    }

    const fn validate(&self) {
        param_assert!(self.m >= 1 && self.m <= 8);
        param_assert!(self.n >= 8 && self.n <= 86);
        param_assert!(self.r >= 2 && self.r <= 8);
    }
}

/// Set the sysclk to the HSI16 clock through the HSISYS divider.
///
/// # Safety
///
/// 1. Ensure peripherals are not in-use before calling this function.
/// 2. Ensure peripherals have their clocks adjusted correctly for the new
///    sysclk frequency after calling this function.
///
/// # Example
///
/// ```no_run
/// use stm32g0xx_hal::{
///     pac,
///     rcc::{set_sysclk_hsisys, HsiDiv},
/// };
///
/// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
/// cortex_m::interrupt::free(|cs| unsafe {
///     set_sysclk_hsisys(&mut dp.FLASH, &mut dp.PWR, &mut dp.RCC, HsiDiv::Div1, cs)
/// });
/// ```
#[allow(unused_variables)]
pub unsafe fn set_sysclk_hsisys(
    flash: &mut pac::FLASH,
    pwr: &mut pac::PWR,
    rcc: &mut pac::RCC,
    div: HsiDiv,
    cs: &CriticalSection,
) {
    rcc.cr.modify(|_, w| w.hsion().set_bit());
    while rcc.cr.read().hsirdy().bit_is_clear() {}

    rcc.cr.modify(|_, w| w.hsidiv().bits(div as u8));

    // 16 MHz and below is within the low-power regulator range,
    // latency comes from the range 2 table
    let target_sysclk_hz: u32 = board::HSI_VALUE / div.divisor();
    switch_sysclk(flash, rcc, SW_HSISYS, target_sysclk_hz, Vos::Range2);

    pwr.cr1.modify(|_, w| w.vos().bits(Vos::Range2 as u8));
}

/// Set the sysclk to the HSE clock.
///
/// The HSE frequency is [`board::HSE_VALUE`].
///
/// # Safety
///
/// 1. Ensure peripherals are not in-use before calling this function.
/// 2. Ensure peripherals have their clocks adjusted correctly for the new
///    sysclk frequency after calling this function.
/// 3. `bypass` must only be set when a digital clock (not a crystal) drives
///    the OSC_IN pin.
#[allow(unused_variables)]
pub unsafe fn set_sysclk_hse(
    flash: &mut pac::FLASH,
    pwr: &mut pac::PWR,
    rcc: &mut pac::RCC,
    bypass: bool,
    cs: &CriticalSection,
) {
    // HSEBYP can only be written when HSE is off
    if rcc.cr.read().hseon().bit_is_clear() {
        rcc.cr
            .modify(|_, w| w.hsebyp().bit(bypass).hseon().set_bit());
    } else {
        rcc.cr.modify(|_, w| w.hseon().set_bit());
    }
    while rcc.cr.read().hserdy().bit_is_clear() {}

    switch_sysclk(flash, rcc, SW_HSE, board::HSE_VALUE, Vos::Range1);
}

/// Set the sysclk to the PLLR output, sourced from the HSI16 clock.
///
/// # Panics
///
/// With the `param-assert` feature enabled this panics when a divider or the
/// multiplier of `cfg` is outside its hardware range.
///
/// # Safety
///
/// 1. Ensure peripherals are not in-use before calling this function.
/// 2. Ensure peripherals have their clocks adjusted correctly for the new
///    sysclk frequency after calling this function.
///
/// # Example
///
/// ```no_run
/// use stm32g0xx_hal::{
///     pac,
///     rcc::{set_sysclk_pll_hsi, PllCfg},
/// };
///
/// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
/// cortex_m::interrupt::free(|cs| unsafe {
///     set_sysclk_pll_hsi(
///         &mut dp.FLASH,
///         &mut dp.PWR,
///         &mut dp.RCC,
///         PllCfg::MAX_FROM_HSI,
///         cs,
///     )
/// });
/// ```
#[allow(unused_variables)]
pub unsafe fn set_sysclk_pll_hsi(
    flash: &mut pac::FLASH,
    pwr: &mut pac::PWR,
    rcc: &mut pac::RCC,
    cfg: PllCfg,
    cs: &CriticalSection,
) {
    cfg.validate();

    rcc.cr.modify(|_, w| w.hsion().set_bit());
    while rcc.cr.read().hsirdy().bit_is_clear() {}

    // increase VOS range before raising the clock
    pwr.cr1.modify(|_, w| w.vos().bits(Vos::Range1 as u8));
    while pwr.sr2.read().vosf().bit_is_set() {}

    // the PLL must be off while M, N, R change
    rcc.cr.modify(|_, w| w.pllon().clear_bit());
    while rcc.cr.read().pllrdy().bit_is_set() {}

    rcc.pllsyscfgr.modify(|_, w| {
        w.pllsrc()
            .bits(0b10) // HSI16
            .pllm()
            .bits(cfg.m - 1)
            .plln()
            .bits(cfg.n)
            .pllr()
            .bits(cfg.r - 1)
    });

    rcc.cr.modify(|_, w| w.pllon().set_bit());
    while rcc.cr.read().pllrdy().bit_is_clear() {}
    rcc.pllsyscfgr.modify(|_, w| w.pllren().set_bit());

    let target_sysclk_hz: u32 = cfg.output_hz(board::HSI_VALUE);
    switch_sysclk(flash, rcc, SW_PLLR, target_sysclk_hz, Vos::Range1);
}

/// Set the sysclk to the PLL at the maximum frequency of 64 MHz.
///
/// This is a convenience function that wraps [`set_sysclk_pll_hsi`].
///
/// # Safety
///
/// 1. Ensure peripherals are not in-use before calling this function.
/// 2. Ensure peripherals have their clocks adjusted correctly for the new
///    sysclk frequency after calling this function.
pub unsafe fn set_sysclk_pll_max(flash: &mut pac::FLASH, pwr: &mut pac::PWR, rcc: &mut pac::RCC) {
    cortex_m::interrupt::free(|cs| set_sysclk_pll_hsi(flash, pwr, rcc, PllCfg::MAX_FROM_HSI, cs))
}

unsafe fn switch_sysclk(
    flash: &mut pac::FLASH,
    rcc: &mut pac::RCC,
    sw: u8,
    target_sysclk_hz: u32,
    vos: Vos,
) {
    let current_sysclk_hz: u32 = sysclk_hz(rcc);

    if target_sysclk_hz > current_sysclk_hz {
        // freq increase, set new flash latency first
        set_flash_latency(flash, target_sysclk_hz, vos);
        rcc.cfgr.modify(|_, w| w.sw().bits(sw));
        while rcc.cfgr.read().sws().bits() != sw {}
    } else {
        // freq decrease, set new flash latency last
        rcc.cfgr.modify(|_, w| w.sw().bits(sw));
        while rcc.cfgr.read().sws().bits() != sw {}
        set_flash_latency(flash, target_sysclk_hz, vos);
    }
}

fn pllrclk(rcc: &pac::RCC, pllsyscfgr: &pac::rcc::pllsyscfgr::R) -> Ratio<u32> {
    let src_freq: u32 = match pllsyscfgr.pllsrc().bits() {
        0b10 => board::HSI_VALUE,
        0b11 => board::HSE_VALUE,
        // cannot be executing this code with the PLL sourced from no clock
        _ => unreachable!(),
    };

    let pll_m: u32 = u32::from(pllsyscfgr.pllm().bits()) + 1;
    let pll_n: u32 = pllsyscfgr.plln().bits().into();
    let pll_r: u32 = u32::from(pllsyscfgr.pllr().bits()) + 1;

    // proof that this will not panic:
    //
    // pll_n is max 127 and src_freq is one of the compiled constants,
    // HSI_VALUE (16 MHz) or HSE_VALUE (8 MHz); the max numer is
    // 127 × 16 MHz ≈ 2.0e9, less than u32::MAX
    //
    // pll_m and pll_r are both min 1 (denom cannot be zero)
    Ratio::new_raw(pll_n * src_freq, pll_m * pll_r)
}

pub(crate) fn sysclk(rcc: &pac::RCC, cfgr: &pac::rcc::cfgr::R) -> Ratio<u32> {
    match cfgr.sws().bits() {
        SW_HSISYS => Ratio::new_raw(board::HSI_VALUE, HsiDiv::from_rcc(rcc).divisor()),
        SW_HSE => Ratio::new_raw(board::HSE_VALUE, 1),
        SW_PLLR => {
            let pllsyscfgr = rcc.pllsyscfgr.read();
            pllrclk(rcc, &pllsyscfgr)
        }
        SW_LSI => Ratio::new_raw(board::LSI_VALUE, 1),
        SW_LSE => Ratio::new_raw(board::LSE_VALUE, 1),
        // remaining SWS values are reserved
        _ => unreachable!(),
    }
}

/// Calculate the current system clock frequency in hertz
///
/// Fractional frequencies will be rounded down.
///
/// # Example
///
/// ```no_run
/// use stm32g0xx_hal::{pac, rcc::sysclk_hz};
///
/// let dp: pac::Peripherals = pac::Peripherals::take().unwrap();
///
/// // without any initialization sysclk will be 16MHz
/// assert_eq!(sysclk_hz(&dp.RCC), 16_000_000);
/// ```
pub fn sysclk_hz(rcc: &pac::RCC) -> u32 {
    let cfgr: pac::rcc::cfgr::R = rcc.cfgr.read();
    sysclk(rcc, &cfgr).to_integer()
}

fn hclk(rcc: &pac::RCC, cfgr: &pac::rcc::cfgr::R) -> Ratio<u32> {
    let div: u32 = hpre_div(cfgr.hpre().bits()).into();
    sysclk(rcc, cfgr) / div
}

/// Calculate the current AHB clock frequency in hertz
///
/// Fractional frequencies will be rounded down.
///
/// # Example
///
/// ```no_run
/// use stm32g0xx_hal::{pac, rcc::hclk_hz};
///
/// let dp: pac::Peripherals = pac::Peripherals::take().unwrap();
///
/// // without any initialization hclk will be 16MHz
/// assert_eq!(hclk_hz(&dp.RCC), 16_000_000);
/// ```
pub fn hclk_hz(rcc: &pac::RCC) -> u32 {
    let cfgr: pac::rcc::cfgr::R = rcc.cfgr.read();
    hclk(rcc, &cfgr).to_integer()
}

pub(crate) fn pclk(rcc: &pac::RCC, cfgr: &pac::rcc::cfgr::R) -> Ratio<u32> {
    let div: u32 = ppre_div(cfgr.ppre().bits()).into();
    hclk(rcc, cfgr) / div
}

/// Calculate the current APB clock frequency in hertz
///
/// Fractional frequencies will be rounded down.
///
/// # Example
///
/// ```no_run
/// use stm32g0xx_hal::{pac, rcc::pclk_hz};
///
/// let dp: pac::Peripherals = pac::Peripherals::take().unwrap();
///
/// // without any initialization pclk will be 16MHz
/// assert_eq!(pclk_hz(&dp.RCC), 16_000_000);
/// ```
pub fn pclk_hz(rcc: &pac::RCC) -> u32 {
    let cfgr: pac::rcc::cfgr::R = rcc.cfgr.read();
    pclk(rcc, &cfgr).to_integer()
}

pub(crate) fn apbtim(rcc: &pac::RCC) -> Ratio<u32> {
    let cfgr: pac::rcc::cfgr::R = rcc.cfgr.read();
    // * If the APB prescaler (PPRE) selects the PCLK clock to be HCLK not divided,
    //   the timer clock frequencies are set to the HCLK frequency (timer clock = HCLK).
    // * If the APB prescaler (PPRE) selects the PCLK clock to be HCLK divided by n,
    //   the timer clock frequencies are set to HCLK divided by (n / 2) (timer clock = 2 x PCLK).
    let div: u32 = match cfgr.ppre().bits() {
        0b101 => 2, // 4 / 2
        0b110 => 4, // 8 / 2
        0b111 => 8, // 16 / 2
        _ => 1,     // 2 / 2 and all others
    };
    hclk(rcc, &cfgr) / div
}

/// Calculate the current APB timer kernel clock frequency in hertz
///
/// Fractional frequencies will be rounded down.
pub fn apbtim_hz(rcc: &pac::RCC) -> u32 {
    apbtim(rcc).to_integer()
}

fn systick(rcc: &pac::RCC, cfgr: &pac::rcc::cfgr::R, src: SystClkSource) -> Ratio<u32> {
    let hclk: Ratio<u32> = hclk(rcc, cfgr);
    match src {
        SystClkSource::Core => hclk,
        SystClkSource::External => hclk / 8,
    }
}

/// Calculate the current systick frequency in hertz
///
/// Fractional frequencies will be rounded down.
///
/// # Example
///
/// Create a systick based delay structure.
///
/// ```no_run
/// use stm32g0xx_hal::{
///     cortex_m::{delay::Delay, peripheral::syst::SystClkSource},
///     pac,
///     rcc::systick_hz,
/// };
///
/// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
/// let cp: pac::CorePeripherals = pac::CorePeripherals::take().unwrap();
///
/// // Delay constructor will set the clock source to core
/// let mut delay: Delay = Delay::new(cp.SYST, systick_hz(&dp.RCC, SystClkSource::Core));
/// delay.delay_ms(100);
/// ```
pub fn systick_hz(rcc: &pac::RCC, src: SystClkSource) -> u32 {
    let cfgr: pac::rcc::cfgr::R = rcc.cfgr.read();
    systick(rcc, &cfgr, src).to_integer()
}

/// Get the LSI clock frequency in hertz.
///
/// This chip has no LSI prescaler; the value is [`board::LSI_VALUE`].
#[inline]
pub const fn lsi_hz() -> u32 {
    board::LSI_VALUE
}

/// Enable the LSI clock and wait for completion.
///
/// # Example
///
/// ```no_run
/// use stm32g0xx_hal::{pac, rcc::enable_lsi};
///
/// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
/// enable_lsi(&mut dp.RCC);
/// ```
#[inline]
pub fn enable_lsi(rcc: &mut pac::RCC) {
    rcc.csr.modify(|_, w| w.lsion().set_bit());
    while rcc.csr.read().lsirdy().bit_is_clear() {}
}

/// Reset the backup domain.
///
/// # Safety
///
/// 1. This will disable the LSE clock.
///    Ensure no peripherals are using the LSE clock before calling this function.
/// 2. This will reset the real-time clock.
///    Setup the RTC after calling this function.
///
/// # Example
///
/// ```no_run
/// use stm32g0xx_hal::{pac, rcc::pulse_reset_backup_domain};
///
/// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
/// unsafe { pulse_reset_backup_domain(&mut dp.RCC, &mut dp.PWR) };
/// ```
#[inline]
pub unsafe fn pulse_reset_backup_domain(rcc: &mut pac::RCC, pwr: &mut pac::PWR) {
    pwr.cr1.modify(|_, w| w.dbp().set_bit());
    rcc.bdcr.modify(|_, w| w.bdrst().set_bit());
    rcc.bdcr.modify(|_, w| w.bdrst().clear_bit());
}

#[cfg(test)]
mod tests {
    use super::{hpre_div, ppre_div, FlashLatency, HsiDiv, PllCfg, Vos};
    use core::convert::TryFrom;

    #[test]
    fn flash_latency_range1() {
        assert_eq!(
            FlashLatency::from_hertz(Vos::Range1, 24_000_000),
            FlashLatency::Zero
        );
        assert_eq!(
            FlashLatency::from_hertz(Vos::Range1, 24_000_001),
            FlashLatency::One
        );
        assert_eq!(
            FlashLatency::from_hertz(Vos::Range1, 48_000_000),
            FlashLatency::One
        );
        assert_eq!(
            FlashLatency::from_hertz(Vos::Range1, 64_000_000),
            FlashLatency::Two
        );
    }

    #[test]
    fn flash_latency_range2() {
        assert_eq!(
            FlashLatency::from_hertz(Vos::Range2, 8_000_000),
            FlashLatency::Zero
        );
        assert_eq!(
            FlashLatency::from_hertz(Vos::Range2, 16_000_000),
            FlashLatency::One
        );
    }

    #[test]
    fn hsi_div() {
        for bits in 0..=0b111 {
            let div: HsiDiv = HsiDiv::try_from(bits).unwrap();
            assert_eq!(u8::from(div), bits);
            assert_eq!(div.divisor(), 1 << bits);
        }
        assert!(HsiDiv::try_from(0b1000).is_err());
    }

    #[test]
    fn prescaler_tables() {
        assert_eq!(hpre_div(0b0000), 1);
        assert_eq!(hpre_div(0b0111), 1);
        assert_eq!(hpre_div(0b1000), 2);
        assert_eq!(hpre_div(0b1011), 16);
        assert_eq!(hpre_div(0b1100), 64);
        assert_eq!(hpre_div(0b1111), 512);

        assert_eq!(ppre_div(0b000), 1);
        assert_eq!(ppre_div(0b011), 1);
        assert_eq!(ppre_div(0b100), 2);
        assert_eq!(ppre_div(0b111), 16);
    }

    #[test]
    fn pll_output() {
        assert_eq!(PllCfg::MAX_FROM_HSI.output_hz(16_000_000), 64_000_000);
        assert_eq!(PllCfg { m: 2, n: 12, r: 3 }.output_hz(16_000_000), 32_000_000);
    }

    #[test]
    fn pll_numerator_fits() {
        // PLLN is a 7-bit field, the numerator of the PLL output ratio must
        // stay in 32 bits for every compiled source frequency
        let max_src: u64 = u64::from(crate::board::HSI_VALUE.max(crate::board::HSE_VALUE));
        assert!(127 * max_src <= u64::from(u32::MAX));
    }
}
