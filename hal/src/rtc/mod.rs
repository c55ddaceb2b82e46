//! Real-time clock

mod alarm;

pub use alarm::{Alarm, AlarmDay};

use crate::{
    board,
    pac,
    rcc::lsi_hz,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use core::cmp::min;

// RCC_BDCR RTCSEL, bits 9:8
const RTCSEL_NONE: u32 = 0b00;
const RTCSEL_LSE: u32 = 0b01;
const RTCSEL_LSI: u32 = 0b10;
const RTCSEL_HSE: u32 = 0b11;
const RTCSEL_SHIFT: u32 = 8;
const BDCR_RTCEN: u32 = 1 << 15;

// RTC_CR WUCKSEL, bits 2:0
const WUCKSEL_CKSPRE: u32 = 0b100;
const WUCKSEL_CKSPRE_OFFSET: u32 = 0b110;
const WUCKSEL_MASK: u32 = 0b111;

/// RTC clock selection
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Clk {
    /// LSE oscillator clock selected.
    Lse = RTCSEL_LSE as u8,
    /// LSI oscillator clock selected.
    Lsi = RTCSEL_LSI as u8,
    /// HSE oscillator clock divided by 32 selected.
    Hse = RTCSEL_HSE as u8,
}

/// Status (interrupt) masks.
///
/// Used for [`Rtc::clear_status`].
pub mod stat {
    /// Internal timestamp flag
    pub const ITS: u32 = 1 << 5;
    /// Timestamp overflow flag
    pub const TSOV: u32 = 1 << 4;
    /// Timestamp flag
    pub const TS: u32 = 1 << 3;
    /// Wakeup timer flag
    pub const WUT: u32 = 1 << 2;
    /// Alarm B flag
    pub const ALRB: u32 = 1 << 1;
    /// Alarm A flag
    pub const ALRA: u32 = 1 << 0;

    /// All status flags.
    pub const ALL: u32 = ITS | TSOV | TS | WUT | ALRB | ALRA;

    /// Alarm A & B flags.
    pub const ALR_ALL: u32 = ALRA | ALRB;
}

const fn bcd(bin: u8) -> u32 {
    ((bin / 10) as u32) << 4 | (bin % 10) as u32
}

const fn unbcd(val: u32) -> u8 {
    ((val >> 4) * 10 + (val & 0xF)) as u8
}

// RTC_TR layout, 24 hour format
const fn time_to_tr(hour: u8, minute: u8, second: u8) -> u32 {
    bcd(hour) << 16 | bcd(minute) << 8 | bcd(second)
}

// RTC_DR layout, year is an offset from 2000
const fn date_to_dr(year: u8, wdu: u8, month: u8, day: u8) -> u32 {
    bcd(year) << 16 | (wdu as u32) << 13 | bcd(month) << 8 | bcd(day)
}

// prescalers for a 1 Hz calendar clock
//
// When both prescalers are used, it is recommended to configure the
// asynchronous prescaler to a high value to minimize consumption.
//
// async is 7 bit (128 max)
// sync is 15-bit (32_768 max)
const fn prediv(rtcsel: u32) -> (u8, u16) {
    match rtcsel {
        // (127 + 1) × (255 + 1) = 32_768 Hz
        RTCSEL_LSE => (127, 255),
        // (127 + 1) × (249 + 1) = 32_000 Hz
        RTCSEL_LSI => (127, 249),
        // (124 + 1) × (1_999 + 1) = 250_000 Hz = HSE_VALUE / 32
        RTCSEL_HSE => (124, 1_999),
        _ => unreachable!(),
    }
}

/// Real-time clock driver.
#[derive(Debug)]
pub struct Rtc {
    rtc: pac::RTC,
}

impl Rtc {
    /// Create a new real-time clock driver.
    ///
    /// This will **not** setup the source clock.
    ///
    /// # Safety
    ///
    /// This function _could_ be considered unsafe because it is not a
    /// pure function.
    /// The RTC is in the backup domain; system resets will not reset the RTC.
    /// You are responsible for resetting the backup domain if required.
    ///
    /// # Panics
    ///
    /// * (debug) clock source is not ready.
    ///
    /// # Example
    ///
    /// LSE clock source (this depends on HW, example valid for NUCLEO board):
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     pac,
    ///     rcc::pulse_reset_backup_domain,
    ///     rtc::{Clk, Rtc},
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// unsafe { pulse_reset_backup_domain(&mut dp.RCC, &mut dp.PWR) };
    /// dp.PWR.cr1.modify(|_, w| w.dbp().set_bit());
    /// dp.RCC.bdcr.modify(|_, w| w.lseon().set_bit());
    /// while dp.RCC.bdcr.read().lserdy().bit_is_clear() {}
    ///
    /// let rtc: Rtc = Rtc::new(dp.RTC, Clk::Lse, &mut dp.PWR, &mut dp.RCC);
    /// ```
    ///
    /// LSI clock source:
    ///
    /// ```no_run
    /// use stm32g0xx_hal::{
    ///     pac,
    ///     rcc::{enable_lsi, pulse_reset_backup_domain},
    ///     rtc::{Clk, Rtc},
    /// };
    ///
    /// let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    ///
    /// unsafe { pulse_reset_backup_domain(&mut dp.RCC, &mut dp.PWR) };
    /// enable_lsi(&mut dp.RCC);
    ///
    /// let rtc: Rtc = Rtc::new(dp.RTC, Clk::Lsi, &mut dp.PWR, &mut dp.RCC);
    /// ```
    pub fn new(rtc: pac::RTC, clk: Clk, pwr: &mut pac::PWR, rcc: &mut pac::RCC) -> Rtc {
        crate::pwr::enable_backup_domain_access(pwr);

        match clk {
            Clk::Lse => debug_assert!(rcc.bdcr.read().lserdy().bit_is_set()),
            Clk::Lsi => debug_assert!(rcc.csr.read().lsirdy().bit_is_set()),
            Clk::Hse => debug_assert!(rcc.cr.read().hserdy().bit_is_set()),
        }

        rcc.bdcr.modify(|r, w| unsafe {
            w.bits(
                (r.bits() & !(0b11 << RTCSEL_SHIFT))
                    | ((clk as u32) << RTCSEL_SHIFT)
                    | BDCR_RTCEN,
            )
        });

        Self::apbclken(rcc);

        let mut rtc: Rtc = Rtc { rtc };
        rtc.disable_write_protect();
        rtc.configure_prescaler(rcc);

        rtc
    }

    /// Create a new real-time clock driver preserving backup domain values.
    ///
    /// Unlike [`new`](Self::new) this will enable the LSE clock source if not
    /// already enabled.  This function assumes the LSE clock source will be
    /// used because it is the only clock source that is preserved in the
    /// shutdown mode.
    ///
    /// The RTC calendar may not be initialized, this can occur if this function
    /// is called after power loss or after a backup domain reset.
    ///
    /// # Safety
    ///
    /// 1. This function relies on global hardware state in the backup domain.
    ///    The backup domain is **not** reset with normal system resets.
    ///    Reset the backup domain before calling this function if determinism
    ///    is required.
    pub unsafe fn renew(rtc: pac::RTC, pwr: &mut pac::PWR, rcc: &mut pac::RCC) -> Rtc {
        crate::pwr::enable_backup_domain_access(pwr);
        Self::apbclken(rcc);

        let bdcr: u32 = rcc.bdcr.read().bits();
        let rtcsel: u32 = (bdcr >> RTCSEL_SHIFT) & 0b11;
        if rtcsel == RTCSEL_LSE && bdcr & BDCR_RTCEN != 0 && rcc.bdcr.read().lseon().bit_is_set() {
            while rcc.bdcr.read().lserdy().bit_is_clear() {}
            Rtc { rtc }
        } else {
            rcc.bdcr.modify(|_, w| w.lseon().set_bit());
            while rcc.bdcr.read().lserdy().bit_is_clear() {}
            rcc.bdcr.modify(|r, w| unsafe {
                w.bits(
                    (r.bits() & !(0b11 << RTCSEL_SHIFT))
                        | (RTCSEL_LSE << RTCSEL_SHIFT)
                        | BDCR_RTCEN,
                )
            });

            let mut rtc: Rtc = Rtc { rtc };
            rtc.disable_write_protect();
            rtc.configure_prescaler(rcc);
            rtc
        }
    }

    #[inline(always)]
    fn apbclken(rcc: &mut pac::RCC) {
        rcc.apbenr1.modify(|_, w| w.rtcapben().set_bit());
    }

    /// Source clock frequency in hertz.
    #[inline]
    pub fn hz(rcc: &pac::RCC) -> u32 {
        match (rcc.bdcr.read().bits() >> RTCSEL_SHIFT) & 0b11 {
            RTCSEL_NONE => 0,
            RTCSEL_LSE => board::LSE_VALUE,
            RTCSEL_LSI => lsi_hz(),
            _ => board::HSE_VALUE / 32,
        }
    }

    /// Read the RTC status (interrupt) register.
    #[inline]
    pub fn status() -> pac::rtc::sr::R {
        // saftey: atomic read with no side-effects
        unsafe { (*pac::RTC::PTR).sr.read() }
    }

    /// Read the RTC masked status (interrupt) register.
    #[inline]
    pub fn masked_status() -> pac::rtc::misr::R {
        // saftey: atomic read with no side-effects
        unsafe { (*pac::RTC::PTR).misr.read() }
    }

    /// Clear status (interrupt) flags.
    ///
    /// Status flag masks can be found in [`stat`].
    #[inline]
    pub fn clear_status(mask: u32) {
        // safety: mask is masked with valid register fields
        unsafe { (*pac::RTC::PTR).scr.write(|w| w.bits(mask & stat::ALL)) }
    }

    fn configure_prescaler(&mut self, rcc: &mut pac::RCC) {
        let rtcsel: u32 = (rcc.bdcr.read().bits() >> RTCSEL_SHIFT) & 0b11;
        let (a_pre, s_pre): (u8, u16) = prediv(rtcsel);

        // enter initialization mode
        self.rtc.icsr.modify(|_, w| w.init().set_bit());
        while self.rtc.icsr.read().initf().bit_is_clear() {}

        // enable shadow register bypass
        self.rtc.cr.modify(|_, w| w.bypshad().set_bit());

        self.rtc
            .prer
            .write(|w| unsafe { w.bits((a_pre as u32) << 16 | s_pre as u32) });

        // exit initialization mode
        self.rtc.icsr.modify(|_, w| w.init().clear_bit())
    }

    /// Set the date and time.
    ///
    /// The value will take some duration to apply after this function returns:
    ///
    /// * LPCAL=0: the counting restarts after 4 RTCCLK clock cycles
    /// * LPCAL=1: the counting restarts after up to 2 RTCCLK + 1 ck_apre
    ///
    /// # Panics
    ///
    /// With the `param-assert` feature enabled this panics when:
    ///
    /// * Year is greater than or equal to 2100.
    /// * Year is less than 2000.
    /// * Backup domain write protection is enabled.
    pub fn set_date_time(&mut self, date_time: chrono::NaiveDateTime) {
        // safety: atomic read with no side effects
        param_assert!(unsafe { (*pac::PWR::PTR).cr1.read().dbp().bit_is_set() });

        let year: i32 = date_time.year();
        param_assert!((2000..2100).contains(&year));

        // enter initialization mode
        self.rtc.icsr.modify(|_, w| w.init().set_bit());
        while self.rtc.icsr.read().initf().bit_is_clear() {}

        let tr: u32 = time_to_tr(
            date_time.hour() as u8,
            date_time.minute() as u8,
            date_time.second() as u8,
        );
        self.rtc.tr.write(|w| unsafe { w.bits(tr) });

        let dr: u32 = date_to_dr(
            (year - 2000) as u8,
            date_time.weekday().number_from_monday() as u8,
            date_time.month() as u8,
            date_time.day() as u8,
        );
        self.rtc.dr.write(|w| unsafe { w.bits(dr) });

        // exit initialization mode
        self.rtc.icsr.modify(|_, w| w.init().clear_bit());
    }

    /// Returns `None` if the calendar is uninitialized.
    #[inline]
    pub fn calendar_initialized(&self) -> Option<()> {
        self.rtc.icsr.read().inits().bit_is_set().then(|| ())
    }

    /// Calibrate the RTC using the low-power mode.
    ///
    /// This does not poll for completion, use [`recalibration_pending`] if you
    /// need to wait for completion.
    ///
    /// The calibration argument is in units of 0.9537 ppm.
    /// The calibration range is -487.1 ppm to +488.5 ppm (-511 to 512), values
    /// outside of this range will saturate.
    ///
    /// [`recalibration_pending`]: Self::recalibration_pending
    pub fn calibrate_lp(&mut self, calibration: i16) {
        while self.recalibration_pending() {}
        let (calp, calm): (bool, u16) = if let Ok(calibration_pos) = u16::try_from(calibration) {
            (true, 512_u16.saturating_sub(calibration_pos))
        } else {
            (false, min(calibration.abs_diff(0), 511))
        };
        // CALP bit 15, LPCAL bit 12, CALM bits 8:0
        self.rtc
            .calr
            .write(|w| unsafe { w.bits((calp as u32) << 15 | 1 << 12 | calm as u32) })
    }

    /// Returns `true` if recalibration is pending.
    #[inline]
    pub fn recalibration_pending(&self) -> bool {
        self.rtc.icsr.read().recalpf().bit_is_set()
    }

    /// Calendar Date
    ///
    /// Returns `None` if the calendar has not been initialized.
    pub fn date(&self) -> Option<NaiveDate> {
        self.calendar_initialized()?;
        let dr: u32 = self.rtc.dr.read().bits();
        let year: i32 = 2000 + unbcd((dr >> 16) & 0xFF) as i32;
        let month: u8 = unbcd((dr >> 8) & 0x1F);
        let day: u8 = unbcd(dr & 0x3F);
        NaiveDate::from_ymd_opt(year, month.into(), day.into())
    }

    fn ss_to_us(&self, ss: u32) -> u32 {
        let ss: u32 = ss & 0xFFFF;

        let pre_s: u32 = self.rtc.prer.read().bits() & 0x7FFF;
        // SS can be larger than PREDIV_S only after a shift operation.
        // In that case, the correct time/date is one second less than as
        // indicated by RTC_TR/RTC_DR.
        debug_assert!(ss <= pre_s);

        // SS[15:0] is the value in the synchronous prescaler counter.
        // The fraction of a second is given by the formula below:
        // Second fraction = (PREDIV_S - SS) / (PREDIV_S + 1)
        (((pre_s - ss) * 100_000) / (pre_s + 1)) * 10
    }

    /// Current Time
    ///
    /// Returns `None` if the calendar has not been initialized.
    pub fn time(&self) -> Option<NaiveTime> {
        loop {
            self.calendar_initialized()?;
            let ss: u32 = self.rtc.ssr.read().bits() & 0xFFFF;
            let tr: u32 = self.rtc.tr.read().bits();

            // If an RTCCLK edge occurs during read we may see inconsistent
            // values so read ssr again and see if it has changed
            // see RM0444 rev 5 "Reading the calendar"
            let ss_after: u32 = self.rtc.ssr.read().bits() & 0xFFFF;
            if ss == ss_after {
                let mut hour: u8 = unbcd((tr >> 16) & 0x3F);
                if tr & (1 << 22) != 0 {
                    // PM in 12 hour format
                    hour += 12;
                }
                let minute: u8 = unbcd((tr >> 8) & 0x7F);
                let second: u8 = unbcd(tr & 0x7F);
                let micro: u32 = self.ss_to_us(ss);

                return NaiveTime::from_hms_micro_opt(
                    hour as u32,
                    minute as u32,
                    second as u32,
                    micro,
                );
            }
        }
    }

    /// Calendar Date and Time
    ///
    /// Returns `None` if the calendar has not been initialized.
    pub fn date_time(&self) -> Option<NaiveDateTime> {
        loop {
            self.calendar_initialized()?;
            let ss: u32 = self.rtc.ssr.read().bits() & 0xFFFF;
            let dr: u32 = self.rtc.dr.read().bits();
            let tr: u32 = self.rtc.tr.read().bits();

            // If an RTCCLK edge occurs during a read we may see inconsistent
            // values so read ssr again and see if it has changed
            // see RM0444 rev 5 "Reading the calendar"
            let ss_after: u32 = self.rtc.ssr.read().bits() & 0xFFFF;
            if ss == ss_after {
                let year: i32 = 2000 + unbcd((dr >> 16) & 0xFF) as i32;
                let month: u8 = unbcd((dr >> 8) & 0x1F);
                let day: u8 = unbcd(dr & 0x3F);

                let date: NaiveDate = NaiveDate::from_ymd_opt(year, month as u32, day as u32)?;

                let mut hour: u8 = unbcd((tr >> 16) & 0x3F);
                if tr & (1 << 22) != 0 {
                    hour += 12;
                }
                let minute: u8 = unbcd((tr >> 8) & 0x7F);
                let second: u8 = unbcd(tr & 0x7F);
                let micro: u32 = self.ss_to_us(ss);

                let time = NaiveTime::from_hms_micro_opt(
                    hour as u32,
                    minute as u32,
                    second as u32,
                    micro,
                )?;

                return Some(date.and_time(time));
            }
        }
    }

    /// Setup the periodic wakeup timer for `sec + 1` seconds.
    ///
    /// `sec` can only go up to 2<sup>17</sup> (36 hours), values greater than
    /// this will be set to the maximum.
    ///
    /// # Example
    ///
    /// Setup the wakeup timer to go off in 1 hour, without interrupts.
    ///
    /// ```no_run
    /// # use stm32g0xx_hal::{pac, rtc};
    /// # let mut dp: pac::Peripherals = pac::Peripherals::take().unwrap();
    /// # let mut rtc = rtc::Rtc::new(dp.RTC, rtc::Clk::Lse, &mut dp.PWR, &mut dp.RCC);
    /// rtc.setup_wakeup_timer(3599, false);
    /// ```
    pub fn setup_wakeup_timer(&mut self, sec: u32, irq_en: bool) {
        // The following sequence is required to configure or change the wakeup
        // timer auto-reload value (WUT[15:0] in RTC_WUTR):

        // 1. Clear WUTE in RTC_CR to disable the wakeup timer.
        self.rtc.cr.modify(|_, w| w.wute().clear_bit());
        // 2. Poll WUTWF until it is set in RTC_ICSR to make sure the access to
        // wakeup auto-reload counter and to WUCKSEL[2:0] bits is allowed.
        // This step must be skipped in calendar initialization mode.
        while self.rtc.icsr.read().wutwf().bit_is_clear() {}
        // 3. Program the wakeup auto-reload value WUT[15:0] and the wakeup
        // clock selection (WUCKSEL[2:0] bits in RTC_CR).
        // Set WUTE in RTC_CR to enable the timer again.
        // The wakeup timer restarts down-counting.
        let (wucksel, sec): (u32, u16) = match u16::try_from(sec) {
            Ok(sec) => (WUCKSEL_CKSPRE, sec),
            Err(_) => (
                WUCKSEL_CKSPRE_OFFSET,
                u16::try_from(sec - (1 << 16)).unwrap_or(u16::MAX),
            ),
        };

        self.rtc.cr.modify(|r, w| unsafe {
            w.bits((r.bits() & !WUCKSEL_MASK) | wucksel)
                .wutie()
                .bit(irq_en)
        });
        self.rtc.wutr.write(|w| unsafe { w.bits(sec.into()) });
        self.rtc.cr.modify(|_, w| w.wute().set_bit());
    }

    /// Returns `true` if the wakeup timer is enabled.
    #[inline]
    pub fn is_wakeup_timer_en(&self) -> bool {
        self.rtc.cr.read().wute().bit_is_set()
    }

    /// Disable the wakeup timer.
    #[inline]
    pub fn disable_wakeup_timer(&mut self) {
        self.rtc.cr.modify(|_, w| w.wute().clear_bit());
    }

    /// Returns the wakeup timer auto-reload value in seconds, including the
    /// 2<sup>16</sup> offset when selected.
    ///
    /// The wakeup period is this value plus one.
    pub fn wakeup_period(&self) -> u32 {
        let wutr: u32 = self.rtc.wutr.read().bits() & 0xFFFF;
        if self.rtc.cr.read().bits() & WUCKSEL_MASK == WUCKSEL_CKSPRE_OFFSET {
            wutr + 0x1_0000
        } else {
            wutr
        }
    }

    /// Set alarm A.
    ///
    /// This will disable the alarm if previously enabled.
    ///
    /// This will not enable the alarm after setup.
    /// To enable the alarm use [`set_alarm_a_en`](Self::set_alarm_a_en).
    pub fn set_alarm_a(&mut self, alarm: &Alarm) {
        self.rtc.cr.modify(|_, w| w.alrae().clear_bit());
        self.rtc.alrmar.write(|w| unsafe { w.bits(alarm.val) });
        self.rtc
            .alrmassr
            .write(|w| unsafe { w.bits(alarm.ssr_bits()) });
    }

    /// Returns `true` if alarm A is enabled.
    #[inline]
    #[must_use]
    pub fn is_alarm_a_en(&self) -> bool {
        self.rtc.cr.read().alrae().bit_is_set()
    }

    /// Get the value of alarm A.
    #[inline]
    #[must_use]
    pub fn alarm_a(&self) -> Alarm {
        Alarm::from_regs(self.rtc.alrmar.read().bits(), self.rtc.alrmassr.read().bits())
    }

    /// Set the alarm A enable, and alarm A interrupt enable.
    #[inline]
    pub fn set_alarm_a_en(&mut self, en: bool, irq_en: bool) {
        self.rtc
            .cr
            .modify(|_, w| w.alrae().bit(en).alraie().bit(irq_en));
    }

    /// Set alarm B.
    ///
    /// This will disable the alarm if previously enabled.
    ///
    /// This will not enable the alarm after setup.
    /// To enable the alarm use [`set_alarm_b_en`](Self::set_alarm_b_en).
    pub fn set_alarm_b(&mut self, alarm: &Alarm) {
        self.rtc.cr.modify(|_, w| w.alrbe().clear_bit());
        self.rtc.alrmbr.write(|w| unsafe { w.bits(alarm.val) });
        self.rtc
            .alrmbssr
            .write(|w| unsafe { w.bits(alarm.ssr_bits()) });
    }

    /// Returns `true` if alarm B is enabled.
    #[inline]
    #[must_use]
    pub fn is_alarm_b_en(&self) -> bool {
        self.rtc.cr.read().alrbe().bit_is_set()
    }

    /// Get the value of alarm B.
    #[inline]
    #[must_use]
    pub fn alarm_b(&self) -> Alarm {
        Alarm::from_regs(self.rtc.alrmbr.read().bits(), self.rtc.alrmbssr.read().bits())
    }

    /// Set the alarm B enable, and alarm B interrupt enable.
    #[inline]
    pub fn set_alarm_b_en(&mut self, en: bool, irq_en: bool) {
        self.rtc
            .cr
            .modify(|_, w| w.alrbe().bit(en).alrbie().bit(irq_en));
    }

    /// Disable the RTC write protection.
    #[inline]
    pub fn disable_write_protect(&mut self) {
        self.rtc.wpr.write(|w| unsafe { w.bits(0xCA) });
        self.rtc.wpr.write(|w| unsafe { w.bits(0x53) });
    }

    /// Enable the RTC write protection.
    ///
    /// # Safety
    ///
    /// * You must call [`disable_write_protect`] before using any other
    ///   `&mut self` RTC method.
    ///
    /// [`disable_write_protect`]: Self::disable_write_protect
    #[inline]
    pub unsafe fn enable_write_protect(&mut self) {
        self.rtc.wpr.write(|w| w.bits(0xFF));
    }
}

#[cfg(test)]
mod tests {
    use super::{bcd, date_to_dr, prediv, time_to_tr, unbcd, RTCSEL_HSE, RTCSEL_LSE, RTCSEL_LSI};

    #[test]
    fn bcd_round_trip() {
        for bin in 0..=99_u8 {
            assert_eq!(unbcd(bcd(bin)), bin);
        }
    }

    #[test]
    fn calendar_register_packing() {
        assert_eq!(time_to_tr(23, 59, 41), 0x0023_5941);
        assert_eq!(time_to_tr(0, 0, 0), 0);
        // 2024-07-15 is a Monday
        assert_eq!(date_to_dr(24, 1, 7, 15), 0x0024_2715);
    }

    #[test]
    fn one_hz_prescalers() {
        for (rtcsel, hz) in [
            (RTCSEL_LSE, 32_768_u32),
            (RTCSEL_LSI, 32_000),
            (RTCSEL_HSE, 250_000),
        ] {
            let (a_pre, s_pre): (u8, u16) = prediv(rtcsel);
            assert_eq!((a_pre as u32 + 1) * (s_pre as u32 + 1), hz);
        }
    }
}
