//! Inter-Integrated Circuit (I2C) bus

use crate::{
    embedded_hal::blocking::i2c::{Read, Write, WriteRead},
    gpio::{OutputType, Pull},
    pac::{self, I2C1, I2C2, RCC},
    rcc::{pclk_hz, sysclk_hz},
};

use cortex_m::interrupt::CriticalSection;

/// I2C error
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// Arbitration loss
    Arbitration,
    /// Bus error
    Bus,
    /// Bus busy
    Busy,
    /// Not Acknowledge received
    Nack,
    /* Overrun, // slave mode only
     * Pec, // SMBUS mode only
     * Timeout, // SMBUS mode only
     * Alert, // SMBUS mode only */
}

/// I2C1 peripheral operating in master mode
#[derive(Debug)]
pub struct I2c1<PINS> {
    base: I2C1,
    pins: PINS,
}

/// I2C2 peripheral operating in master mode
#[derive(Debug)]
pub struct I2c2<PINS> {
    base: I2C2,
    pins: PINS,
}

macro_rules! busy_wait {
    ($self:ident, $flag:ident) => {
        loop {
            let isr = $self.isr().read();
            let icr = $self.icr();

            if isr.arlo().bit_is_set() {
                icr.write(|w| w.arlocf().set_bit());
                return Err(Error::Arbitration);
            // Bus error should be ignored during Master mode.
            // See STM doc. nr. ES0418 (Erratum).
            // Leaving this code here in case it can be used when implementing
            // slave mode
            // } else if isr.berr().bit_is_set() {
            //     icr.write(|w| w.berrcf().set_bit());
            //     return Err(Error::Bus);
            } else if isr.nackf().bit_is_set() {
                while $self.isr().read().stopf().bit_is_clear() {}
                icr.write(|w| w.nackcf().set_bit());
                icr.write(|w| w.stopcf().set_bit());
                return Err(Error::Nack);
            } else if isr.$flag().bit_is_set() {
                break;
            }
        }
    };
}

// Transfers longer than 255 bytes run in 255-byte chunks with RELOAD; the
// chunk at this index must clear RELOAD and set AUTOEND or STOPF never fires.
const fn last_chunk_idx(len: usize) -> usize {
    len.saturating_sub(1) / 0xFF
}

trait I2cBase {
    fn cr2(&self) -> &pac::i2c1::CR2;
    fn icr(&self) -> &pac::i2c1::ICR;
    fn isr(&self) -> &pac::i2c1::ISR;
    fn rxdr(&self) -> &pac::i2c1::RXDR;
    fn txdr(&self) -> &pac::i2c1::TXDR;

    /// Read `buffer.len()` bytes from `addr`
    ///
    /// # Panics
    ///
    /// With the `param-assert` feature enabled this panics when:
    ///
    /// * Empty buffer (`buffer.len() == 0`)
    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), Error> {
        param_assert!(!buffer.is_empty());

        // Detect Bus busy
        if self.isr().read().busy().bit_is_set() {
            return Err(Error::Busy);
        }

        let end = last_chunk_idx(buffer.len());

        // Process 255 bytes at a time
        for (i, buffer) in buffer.chunks_mut(0xFF).enumerate() {
            // Prepare to receive `bytes`
            self.cr2().modify(|_, w| unsafe {
                if i == 0 {
                    w.add10().clear_bit();
                    w.sadd().bits((addr << 1) as u16);
                    w.rd_wrn().set_bit();
                    w.start().set_bit();
                }
                w.nbytes().bits(buffer.len() as u8);
                if i != end {
                    w.reload().set_bit()
                } else {
                    w.reload().clear_bit().autoend().set_bit()
                }
            });

            for byte in buffer {
                // Wait until we have received something
                busy_wait!(self, rxne);

                *byte = self.rxdr().read().rxdata().bits();
            }

            if i != end {
                // Wait until the last transmission is finished
                busy_wait!(self, tcr);
            }
        }

        // automatic STOP
        // Wait until the last transmission is finished
        busy_wait!(self, stopf);

        self.icr().write(|w| w.stopcf().set_bit());

        Ok(())
    }

    /// Write `bytes.len()` bytes to `addr`. 0-byte writes are allowed, in
    /// which case the master will just write the address
    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Error> {
        // Detect Bus busy
        if self.isr().read().busy().bit_is_set() {
            return Err(Error::Busy);
        }

        if bytes.is_empty() {
            // 0 byte write
            self.cr2().modify(|_, w| unsafe {
                w.add10().clear_bit();
                w.sadd().bits((addr << 1) as u16);
                w.rd_wrn().clear_bit();
                w.nbytes().bits(0);
                w.reload().clear_bit();
                w.autoend().set_bit();
                w.start().set_bit()
            });
        } else {
            let end = last_chunk_idx(bytes.len());

            // Process 255 bytes at a time
            for (i, bytes) in bytes.chunks(0xFF).enumerate() {
                // Prepare to send `bytes`
                self.cr2().modify(|_, w| unsafe {
                    if i == 0 {
                        w.add10().clear_bit();
                        w.sadd().bits((addr << 1) as u16);
                        w.rd_wrn().clear_bit();
                        w.start().set_bit();
                    }
                    w.nbytes().bits(bytes.len() as u8);
                    if i != end {
                        w.reload().set_bit()
                    } else {
                        w.reload().clear_bit().autoend().set_bit()
                    }
                });

                for byte in bytes {
                    // Wait until we are allowed to send data
                    // (START has been ACKed or last byte went through)
                    busy_wait!(self, txis);

                    // Put byte on the wire
                    // NOTE(write): Writes all non-reserved bits.
                    self.txdr().write(|w| w.txdata().bits(*byte));
                }

                if i != end {
                    // Wait until the last transmission is finished
                    busy_wait!(self, tcr);
                }
            }
        }

        // automatic STOP
        // Wait until the last transmission is finished
        busy_wait!(self, stopf);

        self.icr().write(|w| w.stopcf().set_bit());

        Ok(())
    }

    /// Write `bytes.len()` bytes to `addr` and read back `buffer.len()` bytes.
    ///
    /// # Panics
    ///
    /// With the `param-assert` feature enabled this panics when:
    ///
    /// * `bytes` or `buffer` are empty (use `write` for 0-byte writes)
    fn write_read(&mut self, addr: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Error> {
        param_assert!(!bytes.is_empty() && !buffer.is_empty());

        // Detect Bus busy
        if self.isr().read().busy().bit_is_set() {
            return Err(Error::Busy);
        }

        let end = last_chunk_idx(bytes.len());

        // Process 255 bytes at a time
        for (i, bytes) in bytes.chunks(0xFF).enumerate() {
            // Prepare to send `bytes`
            self.cr2().modify(|_, w| unsafe {
                if i == 0 {
                    w.add10().clear_bit();
                    w.sadd().bits((addr << 1) as u16);
                    w.rd_wrn().clear_bit();
                    w.start().set_bit();
                }
                w.nbytes().bits(bytes.len() as u8);
                if i != end {
                    w.reload().set_bit()
                } else {
                    w.reload().clear_bit().autoend().clear_bit()
                }
            });

            for byte in bytes {
                // Wait until we are allowed to send data
                // (START has been ACKed or last byte went through)
                busy_wait!(self, txis);

                // Put byte on the wire
                // NOTE(write): Writes all non-reserved bits.
                self.txdr().write(|w| w.txdata().bits(*byte));
            }

            if i != end {
                // Wait until the last transmission is finished
                busy_wait!(self, tcr);
            }
        }

        // Wait until the last transmission is finished
        busy_wait!(self, tc);

        // restart

        let end = last_chunk_idx(buffer.len());

        // Process 255 bytes at a time
        for (i, buffer) in buffer.chunks_mut(0xFF).enumerate() {
            // Prepare to receive `bytes`
            self.cr2().modify(|_, w| unsafe {
                if i == 0 {
                    w.add10().clear_bit();
                    w.sadd().bits((addr << 1) as u16);
                    w.rd_wrn().set_bit();
                    w.start().set_bit();
                }
                w.nbytes().bits(buffer.len() as u8);
                if i != end {
                    w.reload().set_bit()
                } else {
                    w.reload().clear_bit().autoend().set_bit()
                }
            });

            for byte in buffer {
                // Wait until we have received something
                busy_wait!(self, rxne);

                *byte = self.rxdr().read().rxdata().bits();
            }

            if i != end {
                // Wait until the last transmission is finished
                busy_wait!(self, tcr);
            }
        }

        // automatic STOP
        // Wait until the last transmission is finished
        busy_wait!(self, stopf);

        self.icr().write(|w| w.stopcf().set_bit());

        Ok(())
    }
}

#[rustfmt::skip]
macro_rules! impl_i2c_base_for {
    ($($name:ident)+) => {
        $(
        impl I2cBase for $name {
            #[inline(always)] fn cr2(&self) -> &pac::i2c1::CR2 { &self.cr2 }
            #[inline(always)] fn icr(&self) -> &pac::i2c1::ICR { &self.icr }
            #[inline(always)] fn isr(&self) -> &pac::i2c1::ISR { &self.isr }
            #[inline(always)] fn rxdr(&self) -> &pac::i2c1::RXDR { &self.rxdr }
            #[inline(always)] fn txdr(&self) -> &pac::i2c1::TXDR { &self.txdr }
        }
        )+
    };
}

impl_i2c_base_for!(I2C1 I2C2);

// CCIPR I2C1SEL encoding
const I2CSEL_PCLK: u8 = 0b00;
const I2CSEL_SYSCLK: u8 = 0b01;

impl<SCL, SDA> I2c1<(SCL, SDA)> {
    /// Enables peripheral clock
    fn enable_clock(rcc: &mut RCC) {
        rcc.apbenr1.modify(|_, w| w.i2c1en().set_bit());
        rcc.apbenr1.read(); // delay after an RCC peripheral clock enabling
    }

    /// Resets peripheral clock
    fn pulse_reset(rcc: &mut RCC) {
        rcc.apbrstr1.modify(|_, w| w.i2c1rst().set_bit());
        rcc.apbrstr1.modify(|_, w| w.i2c1rst().clear_bit());
    }

    /// Returns the frequency of the peripheral clock driver
    fn clock(rcc: &RCC) -> u32 {
        match rcc.ccipr.read().i2c1sel().bits() {
            I2CSEL_PCLK => pclk_hz(rcc),
            I2CSEL_SYSCLK => sysclk_hz(rcc),
            _ => crate::board::HSI_VALUE,
        }
    }
}

impl<SCL, SDA> I2c2<(SCL, SDA)> {
    /// Enables peripheral clock
    fn enable_clock(rcc: &mut RCC) {
        rcc.apbenr1.modify(|_, w| w.i2c2en().set_bit());
        rcc.apbenr1.read(); // delay after an RCC peripheral clock enabling
    }

    /// Resets peripheral clock
    fn pulse_reset(rcc: &mut RCC) {
        rcc.apbrstr1.modify(|_, w| w.i2c2rst().set_bit());
        rcc.apbrstr1.modify(|_, w| w.i2c2rst().clear_bit());
    }

    /// Returns the frequency of the peripheral clock driver
    ///
    /// I2C2 has no kernel clock mux, it is always clocked from PCLK.
    fn clock(rcc: &RCC) -> u32 {
        pclk_hz(rcc)
    }
}

macro_rules! impl_new_free {
    ($($I2cX:ident: ($I2CX:ident, $I2cXSda:ident, $I2cXScl:ident,
                     $i2cXsclAf:ident, $i2cXsdaAf:ident),)+) => {
        $(
            impl<SCL, SDA> $I2cX<(SCL, SDA)> {
                /// Configures the I2C peripheral as master with the indicated
                /// frequency. The implementation takes care of setting the
                /// peripheral to standard/fast mode depending on the indicated
                /// frequency and generates values for SCLL and SCLH durations
                ///
                /// # Panics
                ///
                /// With the `param-assert` feature enabled this panics when:
                ///
                /// * Frequency is greater than 1 MHz
                /// * Resulting TIMINGR fields PRESC, SCLDEL, SDADEL, SCLH,
                ///   SCLL are out of range
                pub fn new(i2c: $I2CX, mut pins: (SCL, SDA), freq_hz: u32, rcc: &mut RCC, pullup: bool, cs: &CriticalSection) -> Self
                    where
                    SCL: crate::gpio::sealed::$I2cXScl + crate::gpio::sealed::PinOps,
                    SDA: crate::gpio::sealed::$I2cXSda + crate::gpio::sealed::PinOps,
                    {
                        param_assert!(freq_hz <= 1_000_000);

                        Self::enable_clock(rcc);
                        Self::pulse_reset(rcc);

                        unsafe {
                            pins.0.set_output_type(cs, OutputType::OpenDrain);
                            pins.1.set_output_type(cs, OutputType::OpenDrain);
                        }
                        pins.0.$i2cXsclAf(cs);
                        pins.1.$i2cXsdaAf(cs);
                        if pullup {
                            unsafe {
                                pins.0.set_pull(cs, Pull::Up);
                                pins.1.set_pull(cs, Pull::Up);
                            }
                        } else {
                            unsafe {
                                pins.0.set_pull(cs, Pull::None);
                                pins.1.set_pull(cs, Pull::None);
                            }
                        }

                        let (presc, scll, sclh, sdadel, scldel) = i2c_clocks(Self::clock(rcc), freq_hz);

                        // NOTE(write): writes all non-reserved bits.
                        i2c.timingr.write(|w| unsafe {
                            w.presc()
                                .bits(presc)
                                .sdadel()
                                .bits(sdadel)
                                .scldel()
                                .bits(scldel)
                                .scll()
                                .bits(scll)
                                .sclh()
                                .bits(sclh)
                        });

                        // Enable the peripheral
                        i2c.cr1.write(|w| w.pe().set_bit());

                        Self { base: i2c, pins }
                    }

                /// Releases the I2C peripheral and associated pins
                pub fn free(self) -> ($I2CX, (SCL, SDA)) {
                    (self.base, self.pins)
                }
            }
        )+
    }
}

macro_rules! impl_read {
    ($($I2cX:ident)+) => {
        $(
            impl<PINS> Read for $I2cX<PINS> {
                type Error = Error;

                fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
                    self.base.read(addr, buffer)
                }
            }
        )+
    }
}

macro_rules! impl_write {
    ($($I2cX:ident)+) => {
        $(
            impl<PINS> Write for $I2cX<PINS> {
                type Error = Error;

                fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error> {
                    self.base.write(addr, bytes)
                }
            }
        )+
    }
}

macro_rules! impl_write_read {
    ($($I2cX:ident)+) => {
        $(
            impl<PINS> WriteRead for $I2cX<PINS> {
                type Error = Error;

                fn write_read(&mut self, addr: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error> {
                    self.base.write_read(addr, bytes, buffer)
                }
            }
        )+
    }
}

macro_rules! i2c {
    ([ $($X:literal),+ ]) => {
        paste::paste! {
            impl_new_free!($([<I2c $X>]: ([<I2C $X>], [<I2c $X Sda>],
                                    [<I2c $X Scl>], [<set_i2c $X _scl_af>], [<set_i2c $X _sda_af>]),)+);
            impl_read!($([<I2c $X>])+);
            impl_write!($([<I2c $X>])+);
            impl_write_read!($([<I2c $X>])+);
        }
    };
}

i2c!([1, 2]);

// t_I2CCLK = 1 / clock_hz
// t_PRESC  = (PRESC + 1) * t_I2CCLK
// t_SCLL   = (SCLL + 1) * t_PRESC
// t_SCLH   = (SCLH + 1) * t_PRESC
//
// t_SYNC1 + t_SYNC2 > 4 * t_I2CCLK
// t_SCL ~= t_SYNC1 + t_SYNC2 + t_SCLL + t_SCLH
/// Returns the I2C parameters necessary to configure the peripheral.
///
/// # Parameters
/// * clock_hz: the frequency of the clock driving the I2C peripheral
/// * freq_hz: the desired frequency for the I2C peripheral
///
/// # Returns:
/// * PRESC
/// * SCLL
/// * SCLH
/// * SDADEL
/// * SCLDEL
fn i2c_clocks(clock_hz: u32, freq_hz: u32) -> (u8, u8, u8, u8, u8) {
    let i2cclk = clock_hz;
    let ratio = i2cclk / freq_hz - 4;
    let (presc, scll, sclh, sdadel, scldel) = if freq_hz >= 100_000 {
        // fast-mode or fast-mode plus
        // here we pick SCLL + 1 = 2 * (SCLH + 1)
        let presc = ratio / 387;

        let sclh = ((ratio / (presc + 1)) - 3) / 3;
        let scll = 2 * (sclh + 1) - 1;

        let (sdadel, scldel) = if freq_hz > 400_000 {
            // fast-mode plus
            let sdadel = 0;
            let scldel = i2cclk / 4_000_000 / (presc + 1) - 1;

            (sdadel, scldel)
        } else {
            // fast-mode
            let sdadel = i2cclk / 8_000_000 / (presc + 1);
            let scldel = i2cclk / 2_000_000 / (presc + 1) - 1;

            (sdadel, scldel)
        };

        (presc, scll, sclh, sdadel, scldel)
    } else {
        // standard-mode
        // here we pick SCLL = SCLH
        let presc = ratio / 514;

        let sclh = ((ratio / (presc + 1)) - 2) / 2;
        let scll = sclh;

        let sdadel = i2cclk / 2_000_000 / (presc + 1);
        let scldel = i2cclk / 800_000 / (presc + 1) - 1;

        (presc, scll, sclh, sdadel, scldel)
    };

    param_assert!(presc < 16);
    param_assert!(scldel < 16);
    param_assert!(sdadel < 16);
    param_assert!(sclh <= 0xFF);
    param_assert!(scll <= 0xFF);

    (
        presc as u8,
        scll as u8,
        sclh as u8,
        sdadel as u8,
        scldel as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::{i2c_clocks, last_chunk_idx};

    #[test]
    fn chunk_boundaries() {
        assert_eq!(last_chunk_idx(0), 0);
        assert_eq!(last_chunk_idx(1), 0);
        assert_eq!(last_chunk_idx(255), 0);
        assert_eq!(last_chunk_idx(256), 1);
        assert_eq!(last_chunk_idx(510), 1);
        assert_eq!(last_chunk_idx(511), 2);

        // the final chunk from `chunks(0xFF)` must land on the index that
        // sets AUTOEND, including exact multiples of 255
        for len in [1_usize, 254, 255, 256, 509, 510, 511, 765] {
            let buf = vec![0_u8; len];
            let final_idx = buf.chunks(0xFF).enumerate().last().map(|(i, _)| i);
            assert_eq!(final_idx, Some(last_chunk_idx(len)), "{len}");
        }
    }

    #[test]
    fn timing_fast_mode_16mhz() {
        let (presc, scll, sclh, sdadel, scldel) = i2c_clocks(16_000_000, 400_000);
        assert_eq!(presc, 0);
        assert_eq!(sclh, 11);
        assert_eq!(scll, 23);
        assert_eq!(sdadel, 2);
        assert_eq!(scldel, 7);
    }

    #[test]
    fn timing_in_range() {
        // 400 kHz from a 64 MHz kernel clock is out of range for this routine
        const PAIRS: [(u32, u32); 8] = [
            (16_000_000, 100_000),
            (16_000_000, 400_000),
            (16_000_000, 1_000_000),
            (32_000_000, 100_000),
            (32_000_000, 400_000),
            (32_000_000, 1_000_000),
            (64_000_000, 100_000),
            (64_000_000, 1_000_000),
        ];

        for (clock_hz, freq_hz) in PAIRS {
            let (presc, scll, sclh, sdadel, scldel) = i2c_clocks(clock_hz, freq_hz);
            assert!(presc < 16, "{clock_hz} {freq_hz}");
            assert!(scldel < 16, "{clock_hz} {freq_hz}");
            assert!(sdadel < 16, "{clock_hz} {freq_hz}");

            // SCL period in kernel clock cycles, ignoring sync time
            let scl: u32 = (u32::from(presc) + 1) * (u32::from(scll) + 1 + u32::from(sclh) + 1);
            let actual_hz: u32 = clock_hz / (scl + 4);
            assert!(
                actual_hz <= freq_hz + freq_hz / 4,
                "{clock_hz} {freq_hz} {actual_hz}"
            );
            assert!(
                actual_hz >= freq_hz / 2,
                "{clock_hz} {freq_hz} {actual_hz}"
            );
        }
    }
}
