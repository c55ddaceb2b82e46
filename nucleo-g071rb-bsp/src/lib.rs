//! NUCLEO-G071RB board support package.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod led;
pub mod pb;

pub use stm32g0xx_hal as hal;
