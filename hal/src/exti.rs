//! Extended interrupt and event controller

use crate::{
    gpio::{sealed::PinOps, Input, Output},
    pac,
};

/// Interrupt edge triggers.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Trigger on a rising edge.
    Rising,
    /// Trigger on a falling edge.
    Falling,
    /// Trigger on both edges.
    RisingFalling,
}

const fn irq_for_line(line: u8) -> pac::Interrupt {
    match line {
        0 | 1 => pac::Interrupt::EXTI0_1,
        2 | 3 => pac::Interrupt::EXTI2_3,
        _ => pac::Interrupt::EXTI4_15,
    }
}

/// External interrupt pin.
///
/// Implemented for all GPIO pins, and for [`Input`] and [`Output`] wrappers
/// around them.
///
/// # Example
///
/// Trigger an interrupt on the falling edge of PC13.
///
/// ```no_run
/// use stm32g0xx_hal::{
///     exti::{Edge, ExtiPin},
///     gpio::{Input, PortC, Pull},
///     pac,
/// };
///
/// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
///
/// let gpioc: PortC = PortC::split(dp.GPIOC, &mut dp.RCC);
/// let mut c13 = Input::new(gpioc.c13, Pull::None);
/// c13.make_interrupt_source(&mut dp.EXTI);
/// c13.trigger_on_edge(&mut dp.EXTI, Edge::Falling);
/// c13.enable_interrupt(&mut dp.EXTI);
/// unsafe { pac::NVIC::unmask(c13.interrupt()) };
/// ```
pub trait ExtiPin {
    /// Route this pin to its EXTI line.
    ///
    /// Each EXTI line `N` is shared between pin `N` of every port; only one
    /// port can be routed to a line at a time.
    fn make_interrupt_source(&mut self, exti: &mut pac::EXTI);

    /// Select which edge (or both) triggers the interrupt.
    fn trigger_on_edge(&mut self, exti: &mut pac::EXTI, edge: Edge);

    /// Unmask the EXTI line for this pin.
    ///
    /// This does **not** unmask the interrupt in the NVIC.
    fn enable_interrupt(&mut self, exti: &mut pac::EXTI);

    /// Mask the EXTI line for this pin.
    fn disable_interrupt(&mut self, exti: &mut pac::EXTI);

    /// Clear the rising and falling pending bits for this pin.
    fn clear_interrupt_pending_bit(&mut self);

    /// Returns `true` if a rising or falling edge is pending for this pin.
    fn check_interrupt(&self) -> bool;

    /// Get the interrupt number for this pin.
    ///
    /// The EXTI interrupts are not independent (one per line): lines 0-1,
    /// 2-3, and 4-15 each share an interrupt.
    fn interrupt(&self) -> pac::Interrupt;
}

impl<P> ExtiPin for P
where
    P: PinOps,
{
    fn make_interrupt_source(&mut self, exti: &mut pac::EXTI) {
        // EXTICR fields are 8 bits wide, 4 lines per register
        let offset: u32 = 8 * u32::from(P::PIN % 4);
        let port: u32 = u32::from(P::PORT_IDX);
        match P::PIN {
            0..=3 => exti
                .exticr1
                .modify(|r, w| unsafe { w.bits((r.bits() & !(0xFF << offset)) | (port << offset)) }),
            4..=7 => exti
                .exticr2
                .modify(|r, w| unsafe { w.bits((r.bits() & !(0xFF << offset)) | (port << offset)) }),
            8..=11 => exti
                .exticr3
                .modify(|r, w| unsafe { w.bits((r.bits() & !(0xFF << offset)) | (port << offset)) }),
            _ => exti
                .exticr4
                .modify(|r, w| unsafe { w.bits((r.bits() & !(0xFF << offset)) | (port << offset)) }),
        }
    }

    fn trigger_on_edge(&mut self, exti: &mut pac::EXTI, edge: Edge) {
        let mask: u32 = 1 << P::PIN;
        match edge {
            Edge::Rising => {
                exti.rtsr1.modify(|r, w| unsafe { w.bits(r.bits() | mask) });
                exti.ftsr1.modify(|r, w| unsafe { w.bits(r.bits() & !mask) });
            }
            Edge::Falling => {
                exti.ftsr1.modify(|r, w| unsafe { w.bits(r.bits() | mask) });
                exti.rtsr1.modify(|r, w| unsafe { w.bits(r.bits() & !mask) });
            }
            Edge::RisingFalling => {
                exti.rtsr1.modify(|r, w| unsafe { w.bits(r.bits() | mask) });
                exti.ftsr1.modify(|r, w| unsafe { w.bits(r.bits() | mask) });
            }
        }
    }

    fn enable_interrupt(&mut self, exti: &mut pac::EXTI) {
        exti.imr1
            .modify(|r, w| unsafe { w.bits(r.bits() | (1 << P::PIN)) });
    }

    fn disable_interrupt(&mut self, exti: &mut pac::EXTI) {
        exti.imr1
            .modify(|r, w| unsafe { w.bits(r.bits() & !(1 << P::PIN)) });
    }

    fn clear_interrupt_pending_bit(&mut self) {
        // pending bits are split by edge, write-1-to-clear
        unsafe {
            (*pac::EXTI::PTR).rpr1.write(|w| w.bits(1 << P::PIN));
            (*pac::EXTI::PTR).fpr1.write(|w| w.bits(1 << P::PIN));
        }
    }

    fn check_interrupt(&self) -> bool {
        let pending: u32 = unsafe {
            (*pac::EXTI::PTR).rpr1.read().bits() | (*pac::EXTI::PTR).fpr1.read().bits()
        };
        pending & (1 << P::PIN) != 0
    }

    fn interrupt(&self) -> pac::Interrupt {
        irq_for_line(P::PIN)
    }
}

impl<P> ExtiPin for Input<P>
where
    P: PinOps,
{
    fn make_interrupt_source(&mut self, exti: &mut pac::EXTI) {
        self.pin_mut().make_interrupt_source(exti)
    }

    fn trigger_on_edge(&mut self, exti: &mut pac::EXTI, edge: Edge) {
        self.pin_mut().trigger_on_edge(exti, edge)
    }

    fn enable_interrupt(&mut self, exti: &mut pac::EXTI) {
        self.pin_mut().enable_interrupt(exti)
    }

    fn disable_interrupt(&mut self, exti: &mut pac::EXTI) {
        self.pin_mut().disable_interrupt(exti)
    }

    fn clear_interrupt_pending_bit(&mut self) {
        self.pin_mut().clear_interrupt_pending_bit()
    }

    fn check_interrupt(&self) -> bool {
        self.pin().check_interrupt()
    }

    fn interrupt(&self) -> pac::Interrupt {
        self.pin().interrupt()
    }
}

impl<P> ExtiPin for Output<P>
where
    P: PinOps,
{
    fn make_interrupt_source(&mut self, exti: &mut pac::EXTI) {
        self.pin_mut().make_interrupt_source(exti)
    }

    fn trigger_on_edge(&mut self, exti: &mut pac::EXTI, edge: Edge) {
        self.pin_mut().trigger_on_edge(exti, edge)
    }

    fn enable_interrupt(&mut self, exti: &mut pac::EXTI) {
        self.pin_mut().enable_interrupt(exti)
    }

    fn disable_interrupt(&mut self, exti: &mut pac::EXTI) {
        self.pin_mut().disable_interrupt(exti)
    }

    fn clear_interrupt_pending_bit(&mut self) {
        self.pin_mut().clear_interrupt_pending_bit()
    }

    fn check_interrupt(&self) -> bool {
        self.pin().check_interrupt()
    }

    fn interrupt(&self) -> pac::Interrupt {
        self.pin().interrupt()
    }
}

#[cfg(test)]
mod tests {
    use super::irq_for_line;
    use crate::pac::Interrupt;

    #[test]
    fn line_irq_grouping() {
        assert_eq!(irq_for_line(0), Interrupt::EXTI0_1);
        assert_eq!(irq_for_line(1), Interrupt::EXTI0_1);
        assert_eq!(irq_for_line(2), Interrupt::EXTI2_3);
        assert_eq!(irq_for_line(3), Interrupt::EXTI2_3);
        assert_eq!(irq_for_line(4), Interrupt::EXTI4_15);
        assert_eq!(irq_for_line(13), Interrupt::EXTI4_15);
        assert_eq!(irq_for_line(15), Interrupt::EXTI4_15);
    }
}
