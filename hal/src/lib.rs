//! STM32G0 series hardware abstraction layer.
//!
//! Peripheral subsystems are selected with cargo features.
//! A subsystem driver is visible if and only if its feature is enabled;
//! code inclusion and interface visibility derive from the same flag, so
//! they cannot diverge.
#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_docs)]

#[cfg(not(any(
    feature = "stm32g030",
    feature = "stm32g070",
    feature = "stm32g071",
    feature = "stm32g081",
    feature = "stm32g0b0",
    feature = "stm32g0b1",
    feature = "stm32g0c1",
)))]
compile_error!(
    "Exactly one chip feature must be enabled: \
     stm32g030, stm32g070, stm32g071, stm32g081, stm32g0b0, stm32g0b1, stm32g0c1"
);

#[cfg(any(
    all(
        feature = "stm32g030",
        any(
            feature = "stm32g070",
            feature = "stm32g071",
            feature = "stm32g081",
            feature = "stm32g0b0",
            feature = "stm32g0b1",
            feature = "stm32g0c1",
        )
    ),
    all(
        feature = "stm32g070",
        any(
            feature = "stm32g071",
            feature = "stm32g081",
            feature = "stm32g0b0",
            feature = "stm32g0b1",
            feature = "stm32g0c1",
        )
    ),
    all(
        feature = "stm32g071",
        any(
            feature = "stm32g081",
            feature = "stm32g0b0",
            feature = "stm32g0b1",
            feature = "stm32g0c1",
        )
    ),
    all(
        feature = "stm32g081",
        any(feature = "stm32g0b0", feature = "stm32g0b1", feature = "stm32g0c1")
    ),
    all(feature = "stm32g0b0", any(feature = "stm32g0b1", feature = "stm32g0c1")),
    all(feature = "stm32g0b1", feature = "stm32g0c1"),
))]
compile_error!("Chip features are mutually exclusive, enable exactly one");

cfg_if::cfg_if! {
    if #[cfg(feature = "stm32g030")] {
        /// Peripheral access crate for the selected chip.
        pub use stm32g0::stm32g030 as pac;
    } else if #[cfg(feature = "stm32g070")] {
        /// Peripheral access crate for the selected chip.
        pub use stm32g0::stm32g070 as pac;
    } else if #[cfg(feature = "stm32g071")] {
        /// Peripheral access crate for the selected chip.
        pub use stm32g0::stm32g071 as pac;
    } else if #[cfg(feature = "stm32g081")] {
        /// Peripheral access crate for the selected chip.
        pub use stm32g0::stm32g081 as pac;
    } else if #[cfg(feature = "stm32g0b0")] {
        /// Peripheral access crate for the selected chip.
        pub use stm32g0::stm32g0b0 as pac;
    } else if #[cfg(feature = "stm32g0b1")] {
        /// Peripheral access crate for the selected chip.
        pub use stm32g0::stm32g0b1 as pac;
    } else if #[cfg(feature = "stm32g0c1")] {
        /// Peripheral access crate for the selected chip.
        pub use stm32g0::stm32g0c1 as pac;
    }
}

pub use cortex_m;
pub use embedded_hal;
pub use nb;
pub use stm32g0;

#[cfg(feature = "chrono")]
pub use chrono;

#[cfg(feature = "rt")]
pub use cortex_m_rt;

mod macros;

pub mod board;
pub mod rcc;
pub mod util;

mod ratio;
pub use ratio::Ratio;

#[cfg(feature = "adc")]
pub mod adc;

#[cfg(feature = "dma")]
pub mod dma;

#[cfg(feature = "exti")]
pub mod exti;

#[cfg(feature = "flash")]
pub mod flash;

#[cfg(feature = "gpio")]
pub mod gpio;

#[cfg(feature = "i2c")]
pub mod i2c;

#[cfg(feature = "pwr")]
pub mod pwr;

#[cfg(feature = "rtc")]
pub mod rtc;

#[cfg(feature = "spi")]
pub mod spi;

#[cfg(feature = "tim")]
pub mod tim;

#[cfg(feature = "uart")]
pub mod uart;
