//! Push-buttons
use stm32g0xx_hal::{
    exti::{Edge, ExtiPin},
    gpio::{pins, Input, Pull},
    pac,
};

// B1 has an external pull-up on the board
const PULL: Pull = Pull::None;

/// Push-button IRQ triggers.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrqTrig {
    /// Fire the interrupt when the button is pushed.
    OnPush,
    /// Fire the interrupt when the button is released.
    OnRelease,
    /// Fire the interrupt on both push and release.
    Both,
}

/// Push-button 1.
///
/// Marked as B1 on the PCB.
///
/// The button is active low.
#[derive(Debug)]
pub struct B1 {
    gpio: Input<pins::C13>,
}

impl B1 {
    /// Interrupt request for the push-button.
    ///
    /// EXTI line 13 shares this interrupt with lines 4-15.
    pub const IRQ: pac::Interrupt = pac::Interrupt::EXTI4_15;

    /// Create a new push-button.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nucleo_g071rb_bsp::{
    ///     hal::{gpio::PortC, pac},
    ///     pb::B1,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// let gpioc: PortC = PortC::split(dp.GPIOC, &mut dp.RCC);
    /// let b1 = B1::new(gpioc.c13);
    /// ```
    pub fn new(c13: pins::C13) -> Self {
        Self {
            gpio: Input::new(c13, PULL),
        }
    }

    /// Free the GPIO pin from the push-button struct.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nucleo_g071rb_bsp::{
    ///     hal::{gpio::PortC, pac},
    ///     pb::B1,
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// let gpioc: PortC = PortC::split(dp.GPIOC, &mut dp.RCC);
    /// let b1 = B1::new(gpioc.c13);
    /// // ... use push button
    /// let c13 = b1.free();
    /// ```
    pub fn free(self) -> pins::C13 {
        self.gpio.free()
    }

    /// Steal the push-button from whatever is currently using it.
    ///
    /// This will **not** initialize the GPIO peripheral.
    ///
    /// # Safety
    ///
    /// 1. Ensure that the code stealing the push-button has exclusive access
    ///    to the underlying GPIO.
    ///    Singleton checks are bypassed with this method.
    /// 2. You are responsible for setting up the underlying GPIO correctly.
    ///    No setup will occur when using this method.
    ///
    /// # Example
    ///
    /// ```
    /// use nucleo_g071rb_bsp::pb::B1;
    ///
    /// // ... setup happens here
    ///
    /// let b1: B1 = unsafe { B1::steal() };
    /// ```
    pub unsafe fn steal() -> Self {
        Self {
            gpio: Input::steal(),
        }
    }

    /// Returns `true` if the button is currently being pushed.
    pub fn is_pushed(&self) -> bool {
        self.gpio.level().is_low()
    }

    /// Setup the push-button to fire an interrupt.
    ///
    /// This will:
    /// 1. Route PC13 to EXTI line 13
    /// 2. Enable falling/rising triggers (or both)
    /// 3. Unmask line 13 in the EXTI IMR
    ///
    /// This will **not** unmask the EXTI IRQ in the NVIC.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nucleo_g071rb_bsp::{
    ///     hal::{gpio::PortC, pac},
    ///     pb::{IrqTrig, B1},
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// let gpioc: PortC = PortC::split(dp.GPIOC, &mut dp.RCC);
    /// let mut b1 = B1::new(gpioc.c13);
    /// b1.setup_exti(&mut dp.EXTI, IrqTrig::OnPush);
    /// unsafe { pac::NVIC::unmask(B1::IRQ) };
    /// ```
    pub fn setup_exti(&mut self, exti: &mut pac::EXTI, tri: IrqTrig) {
        // the button is active low, a push is a falling edge
        let edge: Edge = match tri {
            IrqTrig::OnPush => Edge::Falling,
            IrqTrig::OnRelease => Edge::Rising,
            IrqTrig::Both => Edge::RisingFalling,
        };
        self.gpio.make_interrupt_source(exti);
        self.gpio.trigger_on_edge(exti, edge);
        self.gpio.enable_interrupt(exti);
    }

    /// Clear a pending IRQ in the EXTI for the push-button.
    pub fn clear_pending(&mut self) {
        self.gpio.clear_interrupt_pending_bit()
    }
}
