//! Board constants.
//!
//! These values describe the board, not the chip: oscillator frequencies,
//! the supply rail, and boot-time flash policy. They are compiled into the
//! image and consumed by [`rcc`](crate::rcc), [`util`](crate::util),
//! [`flash`](crate::flash), and [`adc`](crate::adc).
//!
//! The constants are trusted, not measured. A value that disagrees with the
//! hardware (e.g. `LSE_VALUE` for a different crystal) miscalibrates every
//! computation derived from it.

/// High speed internal oscillator (HSI16) frequency in hertz.
pub const HSI_VALUE: u32 = 16_000_000;

/// High speed external oscillator frequency in hertz.
///
/// The NUCLEO-G071RB has no HSE crystal mounted; boards that do must agree
/// with this value for clock computation to be correct.
pub const HSE_VALUE: u32 = 8_000_000;

/// Low speed internal oscillator frequency in hertz.
pub const LSI_VALUE: u32 = 32_000;

/// Low speed external crystal frequency in hertz.
pub const LSE_VALUE: u32 = 32_768;

/// 48 MHz internal oscillator frequency in hertz.
///
/// Only the STM32G0B0, STM32G0B1, and STM32G0C1 have this oscillator; on
/// other chips the constant does not exist and a reference to it is a
/// compile error.
#[cfg(any(feature = "stm32g0b0", feature = "stm32g0b1", feature = "stm32g0c1"))]
pub const HSI48_VALUE: u32 = 48_000_000;

/// SysTick interrupt priority, 0 is the highest.
pub const TICK_INT_PRIORITY: u8 = 0;

/// Supply rail voltage in millivolts.
pub const VDD_VALUE_MV: u16 = 3_300;

/// Enable the flash prefetch buffer at boot.
pub const PREFETCH_ENABLE: bool = true;

/// Enable the flash instruction cache at boot.
pub const INSTRUCTION_CACHE_ENABLE: bool = true;

/// Enable hardware CRC on SPI transfers by default.
pub const USE_SPI_CRC: bool = true;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oscillators() {
        assert_eq!(HSI_VALUE, 16_000_000);
        assert_eq!(LSI_VALUE, 32_000);
        assert_eq!(LSE_VALUE, 32_768);
        #[cfg(any(feature = "stm32g0b0", feature = "stm32g0b1", feature = "stm32g0c1"))]
        assert_eq!(HSI48_VALUE, 48_000_000);
    }

    #[test]
    fn policy() {
        assert_eq!(TICK_INT_PRIORITY, 0);
        assert_eq!(VDD_VALUE_MV, 3_300);
        assert!(PREFETCH_ENABLE);
        assert!(INSTRUCTION_CACHE_ENABLE);
        assert!(USE_SPI_CRC);
    }
}
