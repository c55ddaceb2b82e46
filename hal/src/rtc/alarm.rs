/// Alarm day
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AlarmDay {
    /// Day of the month.
    Day(u8),
    /// Weekday.
    Weekday(chrono::Weekday),
}

impl From<chrono::Weekday> for AlarmDay {
    #[inline]
    fn from(wd: chrono::Weekday) -> Self {
        Self::Weekday(wd)
    }
}

const fn const_min(a: u8, b: u8) -> u8 {
    if a < b {
        a
    } else {
        b
    }
}

/// Alarm settings.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Alarm {
    // ALRMR register value
    pub(crate) val: u32,
    // SS field in the ALRMSSR register
    ss: u16,
    // MASKSS field in the ALRMSSR register
    ss_mask: u8,
}

impl Default for Alarm {
    fn default() -> Self {
        Alarm::DEFAULT
    }
}

impl Alarm {
    /// Default alarm settings.
    ///
    /// * Zero for all date and time values.
    /// * Time, day, and subseconds are not used for alarm activation.
    pub const DEFAULT: Self = Self {
        val: 0x8080_8080,
        ss: 0,
        ss_mask: 0,
    };

    pub(crate) const fn from_regs(alrmr: u32, alrmssr: u32) -> Self {
        Self {
            val: alrmr,
            ss: (alrmssr & 0x7FFF) as u16,
            ss_mask: ((alrmssr >> 24) & 0xF) as u8,
        }
    }

    pub(crate) const fn ssr_bits(&self) -> u32 {
        ((self.ss_mask & 0xF) as u32) << 24 | (self.ss & 0x7FFF) as u32
    }

    /// Set the seconds value of the alarm.
    ///
    /// If the seconds value is greater than 59 it will be truncated.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::rtc::Alarm;
    ///
    /// let alarm: Alarm = Alarm::DEFAULT.set_seconds(31);
    /// assert_eq!(alarm.seconds(), 31);
    /// ```
    #[must_use = "set_seconds returns a modified Alarm"]
    pub const fn set_seconds(mut self, seconds: u8) -> Self {
        let seconds: u8 = const_min(seconds, 59);
        self.val &= !0x7F;
        self.val |= ((seconds / 10) as u32) << 4 | (seconds % 10) as u32;
        self
    }

    /// Get the seconds value of the alarm.
    #[must_use]
    pub const fn seconds(&self) -> u8 {
        (((self.val >> 4) & 0x7) * 10 + (self.val & 0xF)) as u8
    }

    /// Set the seconds mask of the alarm.
    ///
    /// * `false`: The alarm seconds must match for the alarm to activate.
    /// * `true`: The alarm seconds are don't care for the alarm to activate.
    #[must_use = "set_seconds_mask returns a modified Alarm"]
    pub const fn set_seconds_mask(mut self, mask: bool) -> Self {
        if mask {
            self.val |= 1 << 7;
        } else {
            self.val &= !(1 << 7);
        }
        self
    }

    /// Get the seconds mask of the alarm.
    #[must_use]
    pub const fn seconds_mask(&self) -> bool {
        self.val & 1 << 7 != 0
    }

    /// Set the minutes value of the alarm.
    ///
    /// If the minutes value is greater than 59 it will be truncated.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::rtc::Alarm;
    ///
    /// let alarm: Alarm = Alarm::DEFAULT.set_minutes(59);
    /// assert_eq!(alarm.minutes(), 59);
    /// ```
    #[must_use = "set_minutes returns a modified Alarm"]
    pub const fn set_minutes(mut self, minutes: u8) -> Self {
        let minutes: u8 = const_min(minutes, 59);
        self.val &= !0x7F00;
        self.val |= ((minutes / 10) as u32) << 12 | ((minutes % 10) as u32) << 8;
        self
    }

    /// Get the minutes value of the alarm.
    #[must_use]
    pub const fn minutes(&self) -> u8 {
        (((self.val >> 12) & 0x7) * 10 + ((self.val >> 8) & 0xF)) as u8
    }

    /// Set the minutes mask of the alarm.
    ///
    /// * `false`: The alarm minutes must match for the alarm to activate.
    /// * `true`: The alarm minutes are don't care for the alarm to activate.
    #[must_use = "set_minutes_mask returns a modified Alarm"]
    pub const fn set_minutes_mask(mut self, mask: bool) -> Self {
        if mask {
            self.val |= 1 << 15;
        } else {
            self.val &= !(1 << 15);
        }
        self
    }

    /// Get the minutes mask of the alarm.
    #[must_use]
    pub const fn minutes_mask(&self) -> bool {
        self.val & 1 << 15 != 0
    }

    /// Set the hours value of the alarm.
    ///
    /// If the hours value is greater than 23 it will be truncated.
    ///
    /// The 12-hour format is not supported, the AM/PM bit is always cleared.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::rtc::Alarm;
    ///
    /// let alarm: Alarm = Alarm::DEFAULT.set_hours(23);
    /// assert_eq!(alarm.hours(), 23);
    /// ```
    #[must_use = "set_hours returns a modified Alarm"]
    pub const fn set_hours(mut self, hours: u8) -> Self {
        let hours: u8 = const_min(hours, 23);
        self.val &= !0x7F_0000;
        self.val |= ((hours / 10) as u32) << 20 | ((hours % 10) as u32) << 16;
        self
    }

    /// Get the hours value of the alarm.
    #[must_use]
    pub const fn hours(&self) -> u8 {
        (((self.val >> 20) & 0x3) * 10 + ((self.val >> 16) & 0xF)) as u8
    }

    /// Set the hours mask of the alarm.
    ///
    /// * `false`: The alarm hours must match for the alarm to activate.
    /// * `true`: The alarm hours are don't care for the alarm to activate.
    #[must_use = "set_hours_mask returns a modified Alarm"]
    pub const fn set_hours_mask(mut self, mask: bool) -> Self {
        if mask {
            self.val |= 1 << 23;
        } else {
            self.val &= !(1 << 23);
        }
        self
    }

    /// Get the hours mask of the alarm.
    #[must_use]
    pub const fn hours_mask(&self) -> bool {
        self.val & 1 << 23 != 0
    }

    /// Set the day for the alarm.
    ///
    /// The day can be either a day of the month (1-31), or a weekday.
    /// Day of the month values greater than 31 will be truncated.
    /// A day of the month value of 0 will be set to 1.
    ///
    /// # Example
    ///
    /// ```
    /// use stm32g0xx_hal::{chrono::Weekday, rtc::{Alarm, AlarmDay}};
    ///
    /// let alarm: Alarm = Alarm::DEFAULT.set_days(AlarmDay::Day(14));
    /// assert_eq!(alarm.days(), AlarmDay::Day(14));
    ///
    /// let alarm: Alarm = alarm.set_days(AlarmDay::Weekday(Weekday::Mon));
    /// assert_eq!(alarm.days(), AlarmDay::Weekday(Weekday::Mon));
    /// ```
    #[must_use = "set_days returns a modified Alarm"]
    pub fn set_days(mut self, day: AlarmDay) -> Self {
        match day {
            AlarmDay::Day(day) => {
                let day: u8 = const_min(day, 31);
                let day: u8 = if day == 0 { 1 } else { day };
                // clear WDSEL and the day value
                self.val &= !0x7F00_0000;
                self.val |= ((day / 10) as u32) << 28 | ((day % 10) as u32) << 24;
            }
            AlarmDay::Weekday(wd) => {
                self.val &= !0x3F00_0000;
                self.val |= 1 << 30 | wd.number_from_monday() << 24;
            }
        }
        self
    }

    /// Get the day of the alarm.
    #[must_use]
    pub fn days(&self) -> AlarmDay {
        use num_traits::FromPrimitive;

        let du: u32 = (self.val >> 24) & 0xF;
        if self.val & 1 << 30 != 0 {
            AlarmDay::Weekday(chrono::Weekday::from_u32(du.saturating_sub(1) % 7).unwrap_or(chrono::Weekday::Mon))
        } else {
            let dt: u32 = (self.val >> 28) & 0x3;
            AlarmDay::Day((dt * 10 + du) as u8)
        }
    }

    /// Set the day mask of the alarm.
    ///
    /// * `false`: The alarm day must match for the alarm to activate.
    /// * `true`: The alarm day is don't care for the alarm to activate.
    #[must_use = "set_days_mask returns a modified Alarm"]
    pub const fn set_days_mask(mut self, mask: bool) -> Self {
        if mask {
            self.val |= 1 << 31;
        } else {
            self.val &= !(1 << 31);
        }
        self
    }

    /// Get the day mask of the alarm.
    #[must_use]
    pub const fn days_mask(&self) -> bool {
        self.val & 1 << 31 != 0
    }

    /// Set the subseconds value of the alarm.
    ///
    /// The subseconds value is the synchronous prescaler counter value for the
    /// alarm to activate, values greater than 15 bits will be truncated.
    #[must_use = "set_subseconds returns a modified Alarm"]
    pub const fn set_subseconds(mut self, subseconds: u16) -> Self {
        self.ss = subseconds & 0x7FFF;
        self
    }

    /// Get the subseconds value of the alarm.
    #[must_use]
    pub const fn subseconds(&self) -> u16 {
        self.ss
    }

    /// Set the subseconds mask of the alarm.
    ///
    /// * 0: No comparison on subseconds for the alarm to activate.
    /// * 1: Only `SS\[0\]` is compared.
    /// * 2: Only `SS\[1:0\]` are compared.
    /// * ...
    /// * 15: All 15 subseconds bits are compared.
    ///
    /// Values greater than 15 will be truncated.
    #[must_use = "set_subseconds_mask returns a modified Alarm"]
    pub const fn set_subseconds_mask(mut self, mask: u8) -> Self {
        self.ss_mask = const_min(mask, 15);
        self
    }

    /// Get the subseconds mask of the alarm.
    #[must_use]
    pub const fn subseconds_mask(&self) -> u8 {
        self.ss_mask
    }
}

impl From<chrono::NaiveTime> for Alarm {
    fn from(time: chrono::NaiveTime) -> Self {
        use chrono::Timelike;

        Self::DEFAULT
            .set_seconds(time.second() as u8)
            .set_seconds_mask(false)
            .set_minutes(time.minute() as u8)
            .set_minutes_mask(false)
            .set_hours(time.hour() as u8)
            .set_hours_mask(false)
            .set_days_mask(true)
    }
}

impl From<Alarm> for chrono::NaiveTime {
    fn from(alarm: Alarm) -> Self {
        // the setters clamp all values into a valid range
        match chrono::NaiveTime::from_hms_opt(
            alarm.hours().into(),
            alarm.minutes().into(),
            alarm.seconds().into(),
        ) {
            Some(time) => time,
            None => unreachable!(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Alarm, AlarmDay};
    use chrono::{NaiveTime, Weekday};

    #[test]
    fn seconds() {
        let mut alarm: Alarm = Alarm::DEFAULT;
        assert_eq!(alarm.seconds(), 0);
        assert!(alarm.seconds_mask());

        for second in 0..=59 {
            alarm = alarm.set_seconds(second);
            assert_eq!(alarm.seconds(), second);
        }

        alarm = alarm.set_seconds(60);
        assert_eq!(alarm.seconds(), 59);

        alarm = alarm.set_seconds_mask(false);
        assert!(!alarm.seconds_mask());
    }

    #[test]
    fn minutes() {
        let mut alarm: Alarm = Alarm::DEFAULT;
        assert_eq!(alarm.minutes(), 0);
        assert!(alarm.minutes_mask());

        for minute in 0..=59 {
            alarm = alarm.set_minutes(minute);
            assert_eq!(alarm.minutes(), minute);
        }

        alarm = alarm.set_minutes(99);
        assert_eq!(alarm.minutes(), 59);

        alarm = alarm.set_minutes_mask(false);
        assert!(!alarm.minutes_mask());
    }

    #[test]
    fn hours() {
        let mut alarm: Alarm = Alarm::DEFAULT;
        assert_eq!(alarm.hours(), 0);
        assert!(alarm.hours_mask());

        for hour in 0..=23 {
            alarm = alarm.set_hours(hour);
            assert_eq!(alarm.hours(), hour);
        }

        alarm = alarm.set_hours(24);
        assert_eq!(alarm.hours(), 23);

        alarm = alarm.set_hours_mask(false);
        assert!(!alarm.hours_mask());
    }

    #[test]
    fn days() {
        let mut alarm: Alarm = Alarm::DEFAULT;
        assert!(alarm.days_mask());

        for day in 1..=31 {
            alarm = alarm.set_days(AlarmDay::Day(day));
            assert_eq!(alarm.days(), AlarmDay::Day(day));
        }

        alarm = alarm.set_days(AlarmDay::Day(0));
        assert_eq!(alarm.days(), AlarmDay::Day(1));
        alarm = alarm.set_days(AlarmDay::Day(99));
        assert_eq!(alarm.days(), AlarmDay::Day(31));

        for wd in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            alarm = alarm.set_days(AlarmDay::Weekday(wd));
            assert_eq!(alarm.days(), AlarmDay::Weekday(wd));
        }

        alarm = alarm.set_days_mask(false);
        assert!(!alarm.days_mask());
    }

    #[test]
    fn subseconds() {
        let mut alarm: Alarm = Alarm::DEFAULT;
        assert_eq!(alarm.subseconds(), 0);
        assert_eq!(alarm.subseconds_mask(), 0);

        alarm = alarm.set_subseconds(0x7FFF).set_subseconds_mask(15);
        assert_eq!(alarm.subseconds(), 0x7FFF);
        assert_eq!(alarm.subseconds_mask(), 15);
        assert_eq!(alarm.ssr_bits(), 0x0F00_7FFF);

        alarm = alarm.set_subseconds(0xFFFF).set_subseconds_mask(0xFF);
        assert_eq!(alarm.subseconds(), 0x7FFF);
        assert_eq!(alarm.subseconds_mask(), 15);
    }

    #[test]
    fn register_round_trip() {
        let alarm: Alarm = Alarm::DEFAULT
            .set_seconds(41)
            .set_minutes(59)
            .set_hours(23)
            .set_days(AlarmDay::Day(14))
            .set_subseconds(0x1234)
            .set_subseconds_mask(3);
        assert_eq!(Alarm::from_regs(alarm.val, alarm.ssr_bits()), alarm);
    }

    #[test]
    fn chrono_convert() {
        let time: NaiveTime = NaiveTime::from_hms_opt(15, 36, 47).unwrap();
        let alarm: Alarm = time.into();
        assert_eq!(alarm.seconds(), 47);
        assert!(!alarm.seconds_mask());
        assert_eq!(alarm.minutes(), 36);
        assert!(!alarm.minutes_mask());
        assert_eq!(alarm.hours(), 15);
        assert!(!alarm.hours_mask());
        assert!(alarm.days_mask());
        assert_eq!(NaiveTime::from(alarm), time);
    }
}
