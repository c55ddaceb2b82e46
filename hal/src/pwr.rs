//! Power control

use core::sync::atomic::{compiler_fence, Ordering::SeqCst};

use cortex_m::interrupt::CriticalSection;

use crate::{pac, rcc::HsiDiv};

const SCB_SCR_SLEEPDEEP: u32 = 0x1 << 2;
const SCB_SCR_SLEEPONEXIT: u32 = 0x1 << 1;

/// CR1 LPMS encoding.
const LPMS_STOP1: u8 = 0b001;
const LPMS_STANDBY: u8 = 0b011;
const LPMS_SHUTDOWN: u8 = 0b100;

/// Wakeup pin options for [`setup_wakeup_pins`].
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeupPin {
    /// Wakeup pin disabled.
    Disabled,
    /// Wakeup pin enabled with a rising edge.
    Rising,
    /// Wakeup pin enabled with a falling edge.
    Falling,
}

impl WakeupPin {
    const fn en(&self) -> bool {
        !matches!(self, WakeupPin::Disabled)
    }

    const fn edge(&self) -> bool {
        matches!(self, WakeupPin::Falling)
    }
}

/// Setup the wakeup pins for shutdown and standby low-power modes.
///
/// Per RM0444 "Table 35. Functionalities depending on system operating mode":
///
/// * WP1 corresponds to PA0
/// * WP2 corresponds to PC13
/// * WP4 corresponds to PA2
///
/// # Example
///
/// Enable PA0 to wakeup on a falling edge.
///
/// ```no_run
/// use stm32g0xx_hal::{
///     pac,
///     pwr::{setup_wakeup_pins, WakeupPin},
/// };
///
/// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
/// setup_wakeup_pins(
///     &mut dp.PWR,
///     WakeupPin::Falling,
///     WakeupPin::Disabled,
///     WakeupPin::Disabled,
/// );
/// ```
#[inline]
pub fn setup_wakeup_pins(pwr: &mut pac::PWR, wp1: WakeupPin, wp2: WakeupPin, wp4: WakeupPin) {
    pwr.cr3.modify(|_, w| {
        w.ewup1().bit(wp1.en());
        w.ewup2().bit(wp2.en());
        w.ewup4().bit(wp4.en())
    });
    pwr.cr4.modify(|_, w| {
        w.wp1().bit(wp1.edge());
        w.wp2().bit(wp2.edge());
        w.wp4().bit(wp4.edge())
    });
}

/// Enter shutdown mode immediately.
///
/// Wakeup pins should be configured with [`setup_wakeup_pins`] unless
/// you intend to wakeup only via reset.
///
/// This will:
///
/// 1. Disable interrupts.
/// 2. Set `PWR.CR1.LPMS` to shutdown.
/// 3. Set `SCB.SCR.SLEEPDEEP`.
/// 4. Enter WFI.
///
/// # Example
///
/// ```no_run
/// use stm32g0xx_hal::{pac, pwr::shutdown};
///
/// let mut cp: pac::CorePeripherals = pac::CorePeripherals::take().unwrap();
/// // SLEEPDEEP is implemented with retention
/// // generally you will want to clear this at power-on when using shutdown
/// cp.SCB.clear_sleepdeep();
///
/// // ... do things
///
/// shutdown();
/// ```
#[inline]
pub fn shutdown() -> ! {
    cortex_m::interrupt::disable();

    // safety: interrupts are disabled
    unsafe { (*pac::PWR::PTR).cr1.modify(|_, w| w.lpms().bits(LPMS_SHUTDOWN)) };
    unsafe { (*pac::SCB::PTR).scr.modify(|scr| scr | SCB_SCR_SLEEPDEEP) };

    cortex_m::asm::wfi();

    // technically unreachable
    // the unreachable!() macro takes up needless code space
    loop {
        compiler_fence(SeqCst)
    }
}

/// Enable shutdown on return from ISR or the next WFI or WFE.
///
/// # Example
///
/// ```no_run
/// use stm32g0xx_hal::{pac, pwr::enable_shutdown_sleeponexit};
///
/// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
/// let mut cp: pac::CorePeripherals = pac::CorePeripherals::take().unwrap();
/// // SLEEPDEEP is implemented with retention
/// // generally you will want to clear this at power-on when using shutdown
/// cp.SCB.clear_sleepdeep();
///
/// // ... do things
///
/// enable_shutdown_sleeponexit(&mut dp.PWR, &mut cp.SCB);
/// ```
#[inline]
pub fn enable_shutdown_sleeponexit(pwr: &mut pac::PWR, scb: &mut pac::SCB) {
    unsafe {
        scb.scr
            .modify(|scr| scr | SCB_SCR_SLEEPDEEP | SCB_SCR_SLEEPONEXIT)
    };
    pwr.cr1.modify(|_, w| unsafe { w.lpms().bits(LPMS_SHUTDOWN) });
}

/// Enable shutdown on the next WFI or WFE.
#[inline]
pub fn enable_shutdown(pwr: &mut pac::PWR, scb: &mut pac::SCB) {
    unsafe { scb.scr.modify(|scr| scr | SCB_SCR_SLEEPDEEP) };
    pwr.cr1.modify(|_, w| unsafe { w.lpms().bits(LPMS_SHUTDOWN) });
}

/// Enable standby on the next WFI or WFE.
///
/// SRAM content is lost; wakeup is through the wakeup pins, RTC, or reset.
#[inline]
pub fn enable_standby(pwr: &mut pac::PWR, scb: &mut pac::SCB) {
    unsafe { scb.scr.modify(|scr| scr | SCB_SCR_SLEEPDEEP) };
    pwr.cr1.modify(|_, w| unsafe { w.lpms().bits(LPMS_STANDBY) });
}

/// Enable stop 1 on the next WFI or WFE.
///
/// SRAM and register content are retained; most clocks are stopped.
#[inline]
pub fn enable_stop1(pwr: &mut pac::PWR, scb: &mut pac::SCB) {
    unsafe { scb.scr.modify(|scr| scr | SCB_SCR_SLEEPDEEP) };
    pwr.cr1.modify(|_, w| unsafe { w.lpms().bits(LPMS_STOP1) });
}

/// Enter low-power run mode with the HSISYS clock.
///
/// Low-power run requires the system clock to be at or below 2 MHz, so `div`
/// must be [`HsiDiv::Div8`] or greater.
///
/// # Panics
///
/// With the `param-assert` feature enabled this panics when `div` leaves the
/// system clock above 2 MHz.
///
/// # Safety
///
/// 1. Peripherals should have their clocks adjusted for the new sysclk
///    frequency before re-use.
///
/// # Example
///
/// ```no_run
/// use stm32g0xx_hal::{
///     pac,
///     pwr::enter_lprun,
///     rcc::HsiDiv,
/// };
///
/// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
/// cortex_m::interrupt::free(|cs| unsafe {
///     enter_lprun(&mut dp.FLASH, &mut dp.PWR, &mut dp.RCC, HsiDiv::Div16, cs)
/// });
/// ```
#[inline]
pub unsafe fn enter_lprun(
    flash: &mut pac::FLASH,
    pwr: &mut pac::PWR,
    rcc: &mut pac::RCC,
    div: HsiDiv,
    cs: &CriticalSection,
) {
    param_assert!(div >= HsiDiv::Div8);
    crate::rcc::set_sysclk_hsisys(flash, pwr, rcc, div, cs);
    pwr.cr1.modify(|_, w| w.lpr().set_bit());
}

/// Exit low-power run mode.
///
/// This will not increase the clock frequencies after exit.
///
/// # Example
///
/// ```no_run
/// use stm32g0xx_hal::{pac, pwr::exit_lprun};
///
/// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
/// exit_lprun(&mut dp.PWR);
/// ```
#[inline]
pub fn exit_lprun(pwr: &mut pac::PWR) {
    pwr.cr1.modify(|_, w| w.lpr().clear_bit());
    while pwr.sr2.read().reglpf().bit_is_set() {}
}

/// Enable write access to the backup domain.
#[inline]
pub fn enable_backup_domain_access(pwr: &mut pac::PWR) {
    pwr.cr1.modify(|_, w| w.dbp().set_bit());
}
