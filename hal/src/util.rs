//! Miscellaneous utilities
use crate::{board, pac};
use cortex_m::{
    delay::Delay,
    peripheral::{scb::SystemHandler, syst::SystClkSource},
};

/// Create a new [`cortex_m::delay::Delay`] from the current systick
/// frequency.
///
/// # Example
///
/// ```no_run
/// use stm32g0xx_hal::{pac, util::new_delay};
///
/// let dp = pac::Peripherals::take().unwrap();
/// let cp = pac::CorePeripherals::take().unwrap();
/// let delay = new_delay(cp.SYST, &dp.RCC);
/// ```
pub fn new_delay(syst: pac::SYST, rcc: &pac::RCC) -> Delay {
    Delay::new(
        syst,
        // Delay constructor will set SystClkSource::Core
        crate::rcc::systick_hz(rcc, SystClkSource::Core),
    )
}

/// Apply [`board::TICK_INT_PRIORITY`] to the SysTick exception.
///
/// # Example
///
/// ```no_run
/// use stm32g0xx_hal::{pac, util::set_tick_priority};
///
/// let mut cp = pac::CorePeripherals::take().unwrap();
/// set_tick_priority(&mut cp.SCB);
/// ```
pub fn set_tick_priority(scb: &mut pac::SCB) {
    // safety: priority-based masking is not used for memory safety anywhere
    // in this crate
    unsafe { scb.set_priority(SystemHandler::SysTick, board::TICK_INT_PRIORITY) };
}
