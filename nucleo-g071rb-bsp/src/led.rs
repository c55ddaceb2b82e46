//! LEDs

use stm32g0xx_hal as hal;

use hal::{
    embedded_hal::digital::v2::{OutputPin, StatefulOutputPin},
    gpio::{self, pins, Output, OutputArgs},
};

const LED_ARGS: OutputArgs = OutputArgs {
    speed: gpio::Speed::High,
    level: gpio::Level::Low,
    ot: gpio::OutputType::PushPull,
    pull: gpio::Pull::None,
};

/// Simple trait for an LED
pub trait Led<OutPin>
where
    OutPin: OutputPin<Error = core::convert::Infallible>
        + StatefulOutputPin<Error = core::convert::Infallible>,
{
    /// Output pin driving the LED.
    fn output(&mut self) -> &mut OutPin;

    /// Set the LED on.
    fn set_on(&mut self) {
        self.output().set_high().unwrap()
    }

    /// Set the LED off.
    fn set_off(&mut self) {
        self.output().set_low().unwrap()
    }

    /// Toggle the LED state.
    fn toggle(&mut self) {
        if self.output().is_set_high().unwrap() {
            self.output().set_low().unwrap()
        } else {
            self.output().set_high().unwrap()
        }
    }
}

/// Green user LED
///
/// Marked as LD4 on the PCB
#[derive(Debug)]
pub struct Ld4 {
    gpio: Output<pins::A5>,
}

impl Ld4 {
    /// Create a new green user LED.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nucleo_g071rb_bsp::{
    ///     hal::{gpio::PortA, pac},
    ///     led::{Ld4, Led},
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// let gpioa: PortA = PortA::split(dp.GPIOA, &mut dp.RCC);
    /// let mut ld4 = Ld4::new(gpioa.a5);
    /// ld4.set_on();
    /// ```
    pub fn new(a5: pins::A5) -> Self {
        Self {
            gpio: Output::new(a5, &LED_ARGS),
        }
    }

    /// Free the GPIO pin from the LED struct.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nucleo_g071rb_bsp::{
    ///     hal::{gpio::PortA, pac},
    ///     led::{Ld4, Led},
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// let gpioa: PortA = PortA::split(dp.GPIOA, &mut dp.RCC);
    /// let mut ld4 = Ld4::new(gpioa.a5);
    /// // ... use LED
    /// let a5 = ld4.free();
    /// ```
    pub fn free(self) -> pins::A5 {
        self.gpio.free()
    }

    /// Steal the LED from whatever is currently using it.
    ///
    /// This will **not** initialize the GPIO peripheral.
    ///
    /// # Safety
    ///
    /// 1. Ensure that the code stealing the LED has exclusive access
    ///    to the underlying GPIO.
    ///    Singleton checks are bypassed with this method.
    /// 2. You are responsible for setting up the underlying GPIO correctly.
    ///    No setup will occur when using this method.
    ///
    /// # Example
    ///
    /// ```
    /// use nucleo_g071rb_bsp::led::Ld4;
    ///
    /// // ... setup happens here
    ///
    /// let ld4: Ld4 = unsafe { Ld4::steal() };
    /// ```
    pub unsafe fn steal() -> Self {
        Self {
            gpio: Output::steal(),
        }
    }
}

impl Led<Output<pins::A5>> for Ld4 {
    fn output(&mut self) -> &mut Output<pins::A5> {
        &mut self.gpio
    }
}
