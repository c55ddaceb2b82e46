//! Timers

use embedded_hal::blocking::delay::DelayUs;

use crate::pac;
use crate::rcc::apbtim;

// kernel clocks below 1 MHz saturate to a prescaler of zero instead of
// wrapping to a huge divider
const fn psc_1mhz(ticks_per_us: u32) -> u16 {
    match ticks_per_us.checked_sub(1) {
        Some(psc) if psc <= u16::MAX as u32 => psc as u16,
        Some(_) => u16::MAX,
        None => 0,
    }
}

/// Timer for delays.
#[derive(Debug)]
pub struct Tim3 {
    tim3: pac::TIM3,
}

impl Tim3 {
    /// Constructs a new timer.
    ///
    /// The prescaler is set from the current timer kernel clock; change the
    /// system clocks before constructing the timer, not after.
    ///
    /// # Panics
    ///
    /// With the `param-assert` feature enabled this panics when the timer
    /// kernel clock is below 1 MHz (microsecond ticks are unattainable).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{pac, tim::Tim3};
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// let mut tim3: Tim3 = Tim3::new(dp.TIM3, &mut dp.RCC);
    /// ```
    pub fn new(tim3: pac::TIM3, rcc: &mut pac::RCC) -> Self {
        rcc.apbenr1.modify(|_, w| w.tim3en().set_bit());
        rcc.apbenr1.read(); // wait for clock to be ready
        rcc.apbrstr1.modify(|_, w| w.tim3rst().set_bit());
        rcc.apbrstr1.modify(|_, w| w.tim3rst().clear_bit());

        // Prescaler for 1 microsecond delay
        let ticks_per_us: u32 = (apbtim(rcc) / 1_000_000).to_integer();
        param_assert!(ticks_per_us >= 1);
        tim3.psc.write(|w| w.psc().bits(psc_1mhz(ticks_per_us)));

        tim3.cr1.write(|w| w.dir().clear_bit().cen().set_bit());
        tim3.egr.write(|w| w.ug().set_bit());

        Tim3 { tim3 }
    }

    /// Free the timer registers.
    pub fn free(self) -> pac::TIM3 {
        self.tim3
    }
}

impl DelayUs<u32> for Tim3 {
    fn delay_us(&mut self, us: u32) {
        // TIM3 has a 16-bit counter, longer delays run in chunks
        let mut remaining: u32 = us;
        loop {
            // Note: Make it impossible to set the ARR value to 0, since this
            // would cause an infinite loop.
            let chunk: u32 = remaining.clamp(1, u16::MAX as u32);

            // Write Auto-Reload Register (ARR)
            self.tim3.arr.write(|w| unsafe { w.bits(chunk) });

            // Trigger update event (UEV) in the event generation register
            // (EGR) in order to immediately apply the config
            self.tim3.cr1.modify(|_, w| w.urs().set_bit());
            self.tim3.egr.write(|w| w.ug().set_bit());
            self.tim3.cr1.modify(|_, w| w.urs().clear_bit());

            // Configure the counter in one-pulse mode (counter stops counting
            // at the next update event, clearing the CEN bit) and enable the
            // counter.
            self.tim3.cr1.write(|w| w.opm().set_bit().cen().set_bit());

            // Wait for CEN bit to clear
            while self.tim3.cr1.read().cen().bit_is_set() { /* wait */ }

            remaining = remaining.saturating_sub(chunk);
            if remaining == 0 {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::psc_1mhz;

    #[test]
    fn prescaler_saturation() {
        assert_eq!(psc_1mhz(0), 0);
        assert_eq!(psc_1mhz(1), 0);
        assert_eq!(psc_1mhz(16), 15);
        assert_eq!(psc_1mhz(64), 63);
        assert_eq!(psc_1mhz(0x1_0000), u16::MAX);
        assert_eq!(psc_1mhz(0x2_0000), u16::MAX);
    }
}
