use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::Decimal;

/// Default fractional-second precision for formatting.
pub const DEFAULT_PRECISION: u8 = 6;
/// Largest hour value a MySQL TIME can carry.
pub const MAX_HOURS: u16 = 838;

// Sign bit for Time, stored in the high bit of the hour field.
const NEG_MASK: u16 = 1 << 15;

// Day number of 9999-12-31 in the MySQL calendar.
const MAX_DAY_NUMBER: i64 = 3_652_424;

const NANOS_PER_SEC: i128 = 1_000_000_000;
const NANOS_PER_MIN: i128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: i128 = 60 * NANOS_PER_MIN;
const NANOS_PER_DAY: i128 = 24 * NANOS_PER_HOUR;

// ---------------------------------------------------------------------------
// MySQL calendar arithmetic
// ---------------------------------------------------------------------------

// MySQL's calendar starts at year 0 and treats year 0 as a non-leap year.
fn is_mysql_leap(year: i64) -> bool {
    year & 3 == 0 && (year % 100 != 0 || (year % 400 == 0 && year != 0))
}

fn days_in_year(year: i64) -> i64 {
    if is_mysql_leap(year) {
        366
    } else {
        365
    }
}

const DAYS_IN_MONTH: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

fn days_in_month(month: i64, year: i64) -> i64 {
    if month == 2 && is_mysql_leap(year) {
        29
    } else {
        DAYS_IN_MONTH[(month - 1) as usize]
    }
}

/// Day number of a date in the MySQL calendar (0000-01-01 is day 1).
#[must_use]
pub fn mysql_day_number(year: i64, month: i64, day: i64) -> i64 {
    if year == 0 && month == 0 {
        return 0;
    }
    let mut days = 365 * year + 31 * (month - 1) + day;
    let mut y = year;
    if month <= 2 {
        y -= 1;
    } else {
        days -= (month * 4 + 23) / 10;
    }
    days + y / 4 - ((y / 100 + 1) * 3) / 4
}

/// Inverse of [`mysql_day_number`]. Day numbers below 366 (inside year 0) and
/// beyond the calendar produce the zero date.
#[must_use]
pub fn mysql_date_from_day_number(daynr: i64) -> (u16, u8, u8) {
    if daynr <= 365 || daynr >= 3_652_500 {
        return (0, 0, 0);
    }
    let mut year = daynr * 100 / 36525;
    let adjust = ((year - 1) / 100 + 1) * 3 / 4;
    let mut day_of_year = daynr - year * 365 - (year - 1) / 4 + adjust;
    loop {
        let diy = days_in_year(year);
        if day_of_year <= diy {
            break;
        }
        day_of_year -= diy;
        year += 1;
    }
    let mut leap_day = 0;
    if days_in_year(year) == 366 && day_of_year > 31 + 28 {
        day_of_year -= 1;
        if day_of_year == 31 + 28 {
            leap_day = 1;
        }
    }
    let mut month = 1;
    for dim in DAYS_IN_MONTH {
        if day_of_year <= dim {
            break;
        }
        day_of_year -= dim;
        month += 1;
    }
    (year as u16, month as u8, (day_of_year + leap_day) as u8)
}

// 0 = Monday when monday_first, 0 = Sunday otherwise.
fn calc_weekday(daynr: i64, sunday_first: bool) -> i64 {
    (daynr + 5 + i64::from(sunday_first)) % 7
}

const WEEK_MONDAY_FIRST: u8 = 1;
const WEEK_YEAR: u8 = 2;
const WEEK_FIRST_WEEKDAY: u8 = 4;

// The WEEK() function's mode-to-behaviour conversion: modes without the
// Monday-first bit get the first-weekday rule toggled.
fn week_mode(mode: u8) -> u8 {
    let mut wf = mode & 7;
    if wf & WEEK_MONDAY_FIRST == 0 {
        wf ^= WEEK_FIRST_WEEKDAY;
    }
    wf
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A MySQL TIME value: a signed duration up to ±838:59:59 with nanosecond
/// resolution. The sign lives in the high bit of the hour field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Time {
    hour: u16,
    minute: u8,
    second: u8,
    nanosecond: u32,
}

impl Time {
    #[must_use]
    pub fn new(negative: bool, hour: u16, minute: u8, second: u8, nanosecond: u32) -> Self {
        let mut h = hour & !NEG_MASK;
        if negative {
            h |= NEG_MASK;
        }
        Self {
            hour: h,
            minute,
            second,
            nanosecond,
        }
    }

    #[must_use]
    pub const fn hour(&self) -> u32 {
        (self.hour & !NEG_MASK) as u32
    }

    #[must_use]
    pub const fn minute(&self) -> u32 {
        self.minute as u32
    }

    #[must_use]
    pub const fn second(&self) -> u32 {
        self.second as u32
    }

    #[must_use]
    pub const fn nanosecond(&self) -> u32 {
        self.nanosecond
    }

    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.hour & NEG_MASK != 0
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.hour() == 0 && self.minute == 0 && self.second == 0 && self.nanosecond == 0
    }

    /// Format as `[-]HH:MM:SS[.FFF...]` with `prec` fractional digits.
    #[must_use]
    pub fn format(&self, prec: u8) -> String {
        let mut out = String::with_capacity(16);
        if self.is_negative() {
            out.push('-');
        }
        let _ = fmt::Write::write_fmt(
            &mut out,
            format_args!("{:02}:{:02}:{:02}", self.hour(), self.minute(), self.second()),
        );
        append_fraction(&mut out, self.nanosecond, prec);
        out
    }

    /// The `HHMMSS` integer rendering, rounded to zero fractional digits.
    #[must_use]
    pub fn format_int64(&self) -> i64 {
        let r = self.round(0);
        let v = i64::from(r.hour()) * 10_000 + i64::from(r.minute()) * 100 + i64::from(r.second());
        if self.is_negative() {
            -v
        } else {
            v
        }
    }

    #[must_use]
    pub fn format_float64(&self) -> f64 {
        let v = f64::from(self.hour()) * 10_000.0
            + f64::from(self.minute()) * 100.0
            + f64::from(self.second())
            + f64::from(self.nanosecond) / 1e9;
        if self.is_negative() {
            -v
        } else {
            v
        }
    }

    #[must_use]
    pub fn format_decimal(&self) -> Decimal {
        let v = i64::from(self.hour()) * 10_000 + i64::from(self.minute()) * 100 + i64::from(self.second());
        let dec = Decimal::from_int(v).add(&Decimal::new(i64::from(self.nanosecond), -9));
        if self.is_negative() {
            dec.neg()
        } else {
            dec
        }
    }

    /// Signed total length in nanoseconds.
    #[must_use]
    pub fn signed_nanos(&self) -> i128 {
        let n = i128::from(self.hour()) * NANOS_PER_HOUR
            + i128::from(self.minute) * NANOS_PER_MIN
            + i128::from(self.second) * NANOS_PER_SEC
            + i128::from(self.nanosecond);
        if self.is_negative() {
            -n
        } else {
            n
        }
    }

    /// Signed duration for calendar math.
    #[must_use]
    pub fn to_duration(&self) -> chrono::Duration {
        chrono::Duration::nanoseconds(self.signed_nanos() as i64)
    }

    #[must_use]
    pub fn to_seconds(&self) -> i64 {
        (self.signed_nanos() / NANOS_PER_SEC) as i64
    }

    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.signed_nanos().cmp(&other.signed_nanos())
    }

    /// Round half-up to `p` fractional digits (0–9), carrying into seconds,
    /// minutes, and hours.
    #[must_use]
    pub fn round(&self, p: u8) -> Self {
        if self.nanosecond == 0 {
            return *self;
        }
        let p = p.min(9) as u32;
        let prec = 10u32.pow(9 - p);
        let n = self.nanosecond;
        let floor = (n / prec) * prec;
        let ceil = floor + prec;
        let n = if n - floor >= ceil - n { ceil } else { floor };

        let mut r = *self;
        if n == 1_000_000_000 {
            r.nanosecond = 0;
            r.second += 1;
            if r.second == 60 {
                r.second = 0;
                r.minute += 1;
                if r.minute == 60 {
                    r.minute = 0;
                    r.hour += 1;
                }
            }
        } else {
            r.nanosecond = n;
        }
        r
    }

    /// Add an interval to this time-of-day value; the date part is taken to
    /// be zero. Returns the saturated in-range result and whether the input
    /// interval was in range.
    #[must_use]
    pub fn add_interval(&self, itv: &Interval) -> (Self, bool) {
        let dt = DateTime {
            date: Date::ZERO,
            time: *self,
        };
        let (out, ok) = dt.add_interval(itv);
        (out.time, ok)
    }
}

fn append_fraction(out: &mut String, nanos: u32, prec: u8) {
    if prec == 0 {
        return;
    }
    let prec = prec.min(9) as usize;
    let digits = format!("{nanos:09}");
    out.push('.');
    out.push_str(&digits[..prec]);
}

/// Build a TIME from a decimal number of seconds, clamping to ±838:59:59.
#[must_use]
pub fn new_time_from_seconds(seconds: &Decimal) -> Time {
    let neg = seconds.sign() < 0;
    let seconds = seconds.abs();

    let (sec, frac) = seconds.quo_rem(&Decimal::from_int(1), 0);
    let nanos = frac.mul(&Decimal::new(1, 9)).to_i64().unwrap_or(0);

    let (hours, sec) = sec.quo_rem(&Decimal::from_int(3600), 0);
    let (minutes, sec) = sec.quo_rem(&Decimal::from_int(60), 0);

    if hours.cmp(&Decimal::from_int(i64::from(MAX_HOURS))) == Ordering::Greater {
        return Time::new(neg, MAX_HOURS, 59, 59, 0);
    }

    Time::new(
        neg,
        hours.to_i64().unwrap_or(0) as u16,
        minutes.to_i64().unwrap_or(0) as u8,
        sec.to_i64().unwrap_or(0) as u8,
        nanos as u32,
    )
}

// ---------------------------------------------------------------------------
// Date
// ---------------------------------------------------------------------------

/// A MySQL DATE: year 0000–9999, with 0000-00-00 as the zero date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Date {
    year: u16,
    month: u8,
    day: u8,
}

impl Date {
    /// The zero date, `0000-00-00`.
    pub const ZERO: Self = Self {
        year: 0,
        month: 0,
        day: 0,
    };

    #[must_use]
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    #[must_use]
    pub const fn year(&self) -> u32 {
        self.year as u32
    }

    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month as u32
    }

    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day as u32
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.year == 0 && self.month == 0 && self.day == 0
    }

    #[must_use]
    pub fn day_number(&self) -> i64 {
        mysql_day_number(i64::from(self.year), i64::from(self.month), i64::from(self.day))
    }

    /// Format as `YYYY-MM-DD`.
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// The `YYYYMMDD` integer rendering.
    #[must_use]
    pub fn format_int64(&self) -> i64 {
        i64::from(self.year) * 10_000 + i64::from(self.month) * 100 + i64::from(self.day)
    }

    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        Ord::cmp(self, other)
    }

    /// Day of week, 0 = Sunday .. 6 = Saturday.
    #[must_use]
    pub fn weekday(&self) -> u32 {
        calc_weekday(self.day_number(), true) as u32
    }

    /// Day of year, 1-based.
    #[must_use]
    pub fn yearday(&self) -> u32 {
        (self.day_number() - mysql_day_number(i64::from(self.year), 1, 1) + 1) as u32
    }

    #[must_use]
    pub fn quarter(&self) -> u32 {
        match self.month {
            0 => 0,
            1..=3 => 1,
            4..=6 => 2,
            7..=9 => 3,
            _ => 4,
        }
    }

    // MySQL's calc_week. Returns the week number and the year it belongs to.
    fn calc_week(&self, behaviour: u8) -> (i64, i64) {
        let year = i64::from(self.year);
        let daynr = self.day_number();
        let mut first_daynr = mysql_day_number(year, 1, 1);
        let monday_first = behaviour & WEEK_MONDAY_FIRST != 0;
        let mut week_year = behaviour & WEEK_YEAR != 0;
        let first_weekday = behaviour & WEEK_FIRST_WEEKDAY != 0;

        let mut out_year = year;
        let mut weekday = calc_weekday(first_daynr, !monday_first);

        if self.month == 1 && i64::from(self.day) <= 7 - weekday {
            if !week_year && ((first_weekday && weekday != 0) || (!first_weekday && weekday >= 4))
            {
                return (out_year, 0);
            }
            week_year = true;
            out_year -= 1;
            let days = days_in_year(out_year);
            first_daynr -= days;
            weekday = (weekday + 53 * 7 - days) % 7;
        }

        let days = if (first_weekday && weekday != 0) || (!first_weekday && weekday >= 4) {
            daynr - (first_daynr + (7 - weekday))
        } else {
            daynr - (first_daynr - weekday)
        };

        if week_year && days >= 52 * 7 {
            weekday = (weekday + days_in_year(out_year)) % 7;
            if (!first_weekday && weekday < 4) || (first_weekday && weekday == 0) {
                return (out_year + 1, 1);
            }
        }
        (out_year, days / 7 + 1)
    }

    /// Week number for modes 0–7.
    ///
    /// The ISO modes (1 and 3) report the week the day actually belongs to,
    /// so the first days of January can report week 52/53 of the prior year.
    #[must_use]
    pub fn week(&self, mode: u8) -> u32 {
        let mut behaviour = week_mode(mode);
        if behaviour & WEEK_MONDAY_FIRST != 0 && behaviour & WEEK_FIRST_WEEKDAY == 0 {
            behaviour |= WEEK_YEAR;
        }
        let (_, week) = self.calc_week(behaviour);
        week as u32
    }

    /// `year * 100 + week`, where the year is the one the week belongs to.
    #[must_use]
    pub fn year_week(&self, mode: u8) -> i64 {
        let (year, week) = self.calc_week(week_mode(mode) | WEEK_YEAR);
        year * 100 + week
    }

    #[must_use]
    pub fn add_interval(&self, itv: &Interval) -> (Self, bool) {
        let dt = DateTime {
            date: *self,
            time: Time::default(),
        };
        let (out, ok) = dt.add_interval(itv);
        (out.date, ok)
    }

    /// Convert to a chrono date. The zero date has no chrono equivalent.
    #[must_use]
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(i32::from(self.year), self.month(), self.day())
    }

    #[must_use]
    pub fn from_naive(d: NaiveDate) -> Self {
        Self {
            year: d.year() as u16,
            month: d.month() as u8,
            day: d.day() as u8,
        }
    }
}

// ---------------------------------------------------------------------------
// DateTime
// ---------------------------------------------------------------------------

/// A MySQL DATETIME: a [`Date`] plus a [`Time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateTime {
    pub date: Date,
    pub time: Time,
}

impl DateTime {
    #[must_use]
    pub const fn new(date: Date, time: Time) -> Self {
        Self { date, time }
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.date.is_zero() && self.time.is_zero()
    }

    /// Format as `YYYY-MM-DD HH:MM:SS[.FFF...]`.
    #[must_use]
    pub fn format(&self, prec: u8) -> String {
        let mut out = self.date.format();
        out.push(' ');
        out.push_str(&self.time.format(prec));
        out
    }

    /// The `YYYYMMDDHHMMSS` integer rendering, rounded to whole seconds.
    #[must_use]
    pub fn format_int64(&self) -> i64 {
        let r = self.round(0);
        r.date.format_int64() * 1_000_000 + r.time.format_int64()
    }

    #[must_use]
    pub fn format_float64(&self) -> f64 {
        self.date.format_int64() as f64 * 1e6 + self.time.format_float64()
    }

    #[must_use]
    pub fn format_decimal(&self) -> Decimal {
        Decimal::new(self.date.format_int64(), 6).add(&self.time.format_decimal())
    }

    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        let zero1 = self.date.is_zero();
        let zero2 = other.date.is_zero();
        if zero1 && zero2 {
            return self.time.compare(&other.time);
        }
        if zero1 != zero2 {
            // Comparing a time-of-day against a full datetime anchors the
            // time at today, letting negative times borrow from the date.
            let today = chrono::Local::now().date_naive();
            if let (Some(a), Some(b)) = (self.anchored(today), other.anchored(today)) {
                return a.cmp(&b);
            }
        }
        self.date
            .compare(&other.date)
            .then_with(|| self.time.compare(&other.time))
    }

    /// Round half-up to `p` fractional digits, carrying into the date when
    /// the time rolls over.
    #[must_use]
    pub fn round(&self, p: u8) -> Self {
        if self.time.nanosecond == 0 {
            return *self;
        }
        let p = p.min(9) as u32;
        let prec = 10u32.pow(9 - p);
        let n = self.time.nanosecond;
        let floor = (n / prec) * prec;
        let ceil = floor + prec;
        let n = if n - floor >= ceil - n { ceil } else { floor };

        let mut r = *self;
        if n == 1_000_000_000 {
            r.time.nanosecond = 0;
            let (bumped, _) = r.add_interval(&Interval::from_seconds(1));
            r = bumped;
        } else {
            r.time.nanosecond = n;
        }
        r
    }

    #[must_use]
    pub fn to_seconds(&self) -> i64 {
        let days = mysql_day_number(
            i64::from(self.date.year),
            i64::from(self.date.month),
            i64::from(self.date.day),
        );
        days * 24 * 3600 + self.time.to_seconds()
    }

    // Duration since the start of the month (day folded in), used by
    // interval addition.
    fn month_relative_nanos(&self) -> i128 {
        let mut n = self.time.signed_nanos();
        if !self.date.is_zero() {
            n += (i128::from(self.date.day()) - 1) * NANOS_PER_DAY;
        }
        n
    }

    /// Apply a MySQL interval. Returns the shifted value and an in-range
    /// flag; when the flag is false the original value is returned.
    #[must_use]
    pub fn add_interval(&self, itv: &Interval) -> (Self, bool) {
        match self.added(itv) {
            Some(out) => (out, true),
            None => (*self, false),
        }
    }

    fn added(&self, itv: &Interval) -> Option<Self> {
        let unit = itv.unit;
        if unit.has_time_parts() {
            if !itv.in_range() {
                return None;
            }
            let total = self.month_relative_nanos() + itv.duration_nanos();
            if self.date.is_zero() {
                // Pure TIME arithmetic, saturated at ±838:59:59.
                let neg = total < 0;
                let abs = total.unsigned_abs();
                let hours = abs / NANOS_PER_DAY.unsigned_abs() * 24
                    + abs % NANOS_PER_DAY.unsigned_abs() / NANOS_PER_HOUR.unsigned_abs();
                let time = if hours > u128::from(MAX_HOURS) {
                    Time::new(neg, MAX_HOURS, 59, 59, 0)
                } else {
                    Time::new(
                        neg,
                        hours as u16,
                        (abs % NANOS_PER_HOUR.unsigned_abs() / NANOS_PER_MIN.unsigned_abs()) as u8,
                        (abs % NANOS_PER_MIN.unsigned_abs() / NANOS_PER_SEC.unsigned_abs()) as u8,
                        (abs % NANOS_PER_SEC.unsigned_abs()) as u32,
                    )
                };
                return Some(Self {
                    date: Date::ZERO,
                    time,
                });
            }

            // Overflow past midnight normalizes into days.
            let days = total.div_euclid(NANOS_PER_DAY);
            let rem = total.rem_euclid(NANOS_PER_DAY);
            let time = Time::new(
                false,
                (rem / NANOS_PER_HOUR) as u16,
                (rem % NANOS_PER_HOUR / NANOS_PER_MIN) as u8,
                (rem % NANOS_PER_MIN / NANOS_PER_SEC) as u8,
                (rem % NANOS_PER_SEC) as u32,
            );
            let daynum = mysql_day_number(
                i64::from(self.date.year),
                i64::from(self.date.month),
                1,
            ) + days as i64;
            if !(0..=MAX_DAY_NUMBER).contains(&daynum) {
                return None;
            }
            let (year, month, day) = mysql_date_from_day_number(daynum);
            return Some(Self {
                date: Date::new(year, month, day),
                time,
            });
        }

        if unit.has_day_parts() {
            let daynum = self.date.day_number() + itv.day;
            if !(0..=MAX_DAY_NUMBER).contains(&daynum) {
                return None;
            }
            let (year, month, day) = mysql_date_from_day_number(daynum);
            return Some(Self {
                date: Date::new(year, month, day),
                time: self.time,
            });
        }

        if unit.has_month_parts() {
            let months = i64::from(self.date.year) * 12
                + itv.year * 12
                + (i64::from(self.date.month) - 1)
                + itv.month;
            if !(0..120_000).contains(&months) {
                return None;
            }
            let year = months / 12;
            let month = months % 12 + 1;
            // Landing on a day the target month doesn't have clamps backward
            // to its last day, not forward into the next month.
            let mut day = i64::from(self.date.day);
            let dim = days_in_month(month, year);
            if day > dim {
                day = dim;
            }
            return Some(Self {
                date: Date::new(year as u16, month as u8, day as u8),
                time: self.time,
            });
        }

        // Plain YEAR interval.
        if itv.year > 10_000 {
            return None;
        }
        let year = i64::from(self.date.year) + itv.year;
        if !(0..=9999).contains(&year) {
            return None;
        }
        let mut day = self.date.day;
        // Feb 29 clamps backward when the target year is not a leap year.
        if self.date.month == 2 && self.date.day == 29 && !is_mysql_leap(year) {
            day = 28;
        }
        Some(Self {
            date: Date::new(year as u16, self.date.month, day),
            time: self.time,
        })
    }

    fn anchored(&self, anchor: NaiveDate) -> Option<NaiveDateTime> {
        let date = if self.date.is_zero() {
            anchor
        } else {
            self.date.to_naive()?
        };
        let midnight = date.and_hms_opt(0, 0, 0)?;
        midnight.checked_add_signed(self.time.to_duration())
    }

    /// Convert to a chrono datetime. Fails for the zero date and for times
    /// that do not fit a day.
    #[must_use]
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        if self.time.is_negative() || self.time.hour() >= 24 {
            let date = self.date.to_naive()?;
            return date
                .and_hms_opt(0, 0, 0)?
                .checked_add_signed(self.time.to_duration());
        }
        let date = self.date.to_naive()?;
        let t = chrono::NaiveTime::from_hms_nano_opt(
            self.time.hour(),
            self.time.minute(),
            self.time.second(),
            self.time.nanosecond(),
        )?;
        Some(date.and_time(t))
    }

    #[must_use]
    pub fn from_naive(dt: NaiveDateTime) -> Self {
        Self {
            date: Date::from_naive(dt.date()),
            time: Time::new(
                false,
                dt.hour() as u16,
                dt.minute() as u8,
                dt.second() as u8,
                dt.nanosecond(),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Interval
// ---------------------------------------------------------------------------

/// The unit of a SQL `INTERVAL` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IntervalUnit {
    Microsecond,
    #[default]
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
    SecondMicrosecond,
    MinuteMicrosecond,
    MinuteSecond,
    HourMicrosecond,
    HourSecond,
    HourMinute,
    DayMicrosecond,
    DaySecond,
    DayMinute,
    DayHour,
    YearMonth,
}

impl IntervalUnit {
    /// The SQL spelling of the unit.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Microsecond => "MICROSECOND",
            Self::Second => "SECOND",
            Self::Minute => "MINUTE",
            Self::Hour => "HOUR",
            Self::Day => "DAY",
            Self::Week => "WEEK",
            Self::Month => "MONTH",
            Self::Quarter => "QUARTER",
            Self::Year => "YEAR",
            Self::SecondMicrosecond => "SECOND_MICROSECOND",
            Self::MinuteMicrosecond => "MINUTE_MICROSECOND",
            Self::MinuteSecond => "MINUTE_SECOND",
            Self::HourMicrosecond => "HOUR_MICROSECOND",
            Self::HourSecond => "HOUR_SECOND",
            Self::HourMinute => "HOUR_MINUTE",
            Self::DayMicrosecond => "DAY_MICROSECOND",
            Self::DaySecond => "DAY_SECOND",
            Self::DayMinute => "DAY_MINUTE",
            Self::DayHour => "DAY_HOUR",
            Self::YearMonth => "YEAR_MONTH",
        }
    }

    /// Parse the SQL spelling (case-insensitive).
    #[must_use]
    pub fn from_keyword(s: &str) -> Option<Self> {
        let upper = s.to_ascii_uppercase();
        Some(match upper.as_str() {
            "MICROSECOND" => Self::Microsecond,
            "SECOND" => Self::Second,
            "MINUTE" => Self::Minute,
            "HOUR" => Self::Hour,
            "DAY" => Self::Day,
            "WEEK" => Self::Week,
            "MONTH" => Self::Month,
            "QUARTER" => Self::Quarter,
            "YEAR" => Self::Year,
            "SECOND_MICROSECOND" => Self::SecondMicrosecond,
            "MINUTE_MICROSECOND" => Self::MinuteMicrosecond,
            "MINUTE_SECOND" => Self::MinuteSecond,
            "HOUR_MICROSECOND" => Self::HourMicrosecond,
            "HOUR_SECOND" => Self::HourSecond,
            "HOUR_MINUTE" => Self::HourMinute,
            "DAY_MICROSECOND" => Self::DayMicrosecond,
            "DAY_SECOND" => Self::DaySecond,
            "DAY_MINUTE" => Self::DayMinute,
            "DAY_HOUR" => Self::DayHour,
            "YEAR_MONTH" => Self::YearMonth,
            _ => return None,
        })
    }

    /// Whether the unit carries hour/minute/second/microsecond components.
    #[must_use]
    pub const fn has_time_parts(self) -> bool {
        matches!(
            self,
            Self::Microsecond
                | Self::Second
                | Self::Minute
                | Self::Hour
                | Self::SecondMicrosecond
                | Self::MinuteMicrosecond
                | Self::MinuteSecond
                | Self::HourMicrosecond
                | Self::HourSecond
                | Self::HourMinute
                | Self::DayMicrosecond
                | Self::DaySecond
                | Self::DayMinute
                | Self::DayHour
        )
    }

    #[must_use]
    pub const fn has_day_parts(self) -> bool {
        matches!(self, Self::Day | Self::Week)
    }

    #[must_use]
    pub const fn has_month_parts(self) -> bool {
        matches!(self, Self::Month | Self::Quarter | Self::YearMonth)
    }

    // Component fields of the composite spellings, most significant first.
    const fn parts(self) -> &'static [IntervalPart] {
        use IntervalPart as P;
        match self {
            Self::Microsecond => &[P::Usec],
            Self::Second => &[P::Sec],
            Self::Minute => &[P::Min],
            Self::Hour => &[P::Hour],
            Self::Day => &[P::Day],
            Self::Week => &[P::Week],
            Self::Month => &[P::Month],
            Self::Quarter => &[P::Quarter],
            Self::Year => &[P::Year],
            Self::SecondMicrosecond => &[P::Sec, P::Usec],
            Self::MinuteMicrosecond => &[P::Min, P::Sec, P::Usec],
            Self::MinuteSecond => &[P::Min, P::Sec],
            Self::HourMicrosecond => &[P::Hour, P::Min, P::Sec, P::Usec],
            Self::HourSecond => &[P::Hour, P::Min, P::Sec],
            Self::HourMinute => &[P::Hour, P::Min],
            Self::DayMicrosecond => &[P::Day, P::Hour, P::Min, P::Sec, P::Usec],
            Self::DaySecond => &[P::Day, P::Hour, P::Min, P::Sec],
            Self::DayMinute => &[P::Day, P::Hour, P::Min],
            Self::DayHour => &[P::Day, P::Hour],
            Self::YearMonth => &[P::Year, P::Month],
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy)]
enum IntervalPart {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    Min,
    Sec,
    Usec,
}

/// A decomposed interval value ready for calendar arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interval {
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    min: i64,
    sec: i64,
    nsec: i64,
    unit: IntervalUnit,
}

impl Interval {
    #[must_use]
    pub const fn unit(&self) -> IntervalUnit {
        self.unit
    }

    #[must_use]
    pub fn from_seconds(sec: i64) -> Self {
        Self {
            sec,
            unit: IntervalUnit::Second,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_days(day: i64) -> Self {
        Self {
            day,
            unit: IntervalUnit::Day,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_months(month: i64) -> Self {
        Self {
            month,
            unit: IntervalUnit::Month,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_years(year: i64) -> Self {
        Self {
            year,
            unit: IntervalUnit::Year,
            ..Self::default()
        }
    }

    fn set_part(&mut self, part: IntervalPart, v: i64) {
        match part {
            IntervalPart::Year => self.year = v,
            IntervalPart::Quarter => self.month = v * 3,
            IntervalPart::Month => self.month = v,
            IntervalPart::Week => self.day = v * 7,
            IntervalPart::Day => self.day = v,
            IntervalPart::Hour => self.hour = v,
            IntervalPart::Min => self.min = v,
            IntervalPart::Sec => self.sec = v,
            IntervalPart::Usec => self.nsec = v * 1_000,
        }
    }

    fn negate(&mut self) {
        self.year = -self.year;
        self.month = -self.month;
        self.day = -self.day;
        self.hour = -self.hour;
        self.min = -self.min;
        self.sec = -self.sec;
        self.nsec = -self.nsec;
    }

    /// Parse an interval payload the way MySQL does: composite units split
    /// the text on runs of non-digits and bind the pieces to the unit's
    /// components last-to-first; single units take one signed number, with a
    /// fractional part on SECOND becoming microseconds.
    #[must_use]
    pub fn parse(payload: &str, unit: IntervalUnit) -> Option<Self> {
        let mut itv = Self {
            unit,
            ..Self::default()
        };
        let payload = payload.trim();
        let (neg, payload) = match payload.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, payload),
        };

        let parts = unit.parts();
        if parts.len() == 1 {
            if matches!(unit, IntervalUnit::Second) {
                // SECOND accepts a fractional payload.
                let mut split = payload.splitn(2, '.');
                let whole = split.next()?;
                let v: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
                itv.sec = v;
                if let Some(frac) = split.next() {
                    if !frac.is_empty() {
                        if frac.bytes().any(|b| !b.is_ascii_digit()) {
                            return None;
                        }
                        let digits: String = frac.chars().take(9).collect();
                        let mut nsec: i64 = digits.parse().ok()?;
                        for _ in digits.len()..9 {
                            nsec *= 10;
                        }
                        itv.nsec = nsec;
                    }
                }
            } else {
                let v: i64 = payload.parse().ok()?;
                itv.set_part(parts[0], v);
            }
        } else {
            let numbers: Vec<i64> = payload
                .split(|c: char| !c.is_ascii_digit())
                .filter(|s| !s.is_empty())
                .map(str::parse)
                .collect::<Result<_, _>>()
                .ok()?;
            if numbers.is_empty() || numbers.len() > parts.len() {
                return None;
            }
            let offset = parts.len() - numbers.len();
            for (i, v) in numbers.iter().enumerate() {
                itv.set_part(parts[offset + i], *v);
            }
        }
        if neg {
            itv.negate();
        }
        Some(itv)
    }

    fn in_range(&self) -> bool {
        self.day.abs() <= MAX_DAY_NUMBER
            && self.hour.abs() <= MAX_DAY_NUMBER * 24
            && self.min.abs() <= MAX_DAY_NUMBER * 24 * 60
            && self.sec.abs() <= MAX_DAY_NUMBER * 24 * 3600
    }

    fn duration_nanos(&self) -> i128 {
        i128::from(self.day) * NANOS_PER_DAY
            + i128::from(self.hour) * NANOS_PER_HOUR
            + i128::from(self.min) * NANOS_PER_MIN
            + i128::from(self.sec) * NANOS_PER_SEC
            + i128::from(self.nsec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_number_round_trip() {
        for &(y, m, d) in &[
            (2000u16, 1u8, 1u8),
            (2000, 2, 29),
            (1999, 12, 31),
            (9999, 12, 31),
            (1, 1, 1),
            (2023, 6, 15),
        ] {
            let n = mysql_day_number(i64::from(y), i64::from(m), i64::from(d));
            assert_eq!(
                mysql_date_from_day_number(n),
                (y, m, d),
                "round-trip for {y:04}-{m:02}-{d:02} via day {n}"
            );
        }
    }

    #[test]
    fn max_day_number_is_last_day() {
        assert_eq!(mysql_day_number(9999, 12, 31), MAX_DAY_NUMBER);
    }

    #[test]
    fn weekday_of_known_dates() {
        // 2000-01-01 was a Saturday, 2000-01-02 a Sunday.
        assert_eq!(Date::new(2000, 1, 1).weekday(), 6);
        assert_eq!(Date::new(2000, 1, 2).weekday(), 0);
        assert_eq!(Date::new(2023, 1, 1).weekday(), 0);
    }

    #[test]
    fn week_mode_zero() {
        assert_eq!(Date::new(2000, 1, 1).week(0), 0);
        assert_eq!(Date::new(2000, 1, 2).week(0), 1);
        assert_eq!(Date::new(2000, 1, 9).week(0), 2);
    }

    #[test]
    fn week_iso_modes() {
        // 2023-01-01 belongs to ISO week 52 of 2022.
        assert_eq!(Date::new(2023, 1, 1).week(1), 52);
        assert_eq!(Date::new(2023, 1, 1).week(3), 52);
        // 2023-01-02 starts ISO week 1.
        assert_eq!(Date::new(2023, 1, 2).week(1), 1);
        // Mid-year dates agree across related modes.
        assert_eq!(Date::new(2023, 6, 15).week(1), Date::new(2023, 6, 15).week(3));
    }

    #[test]
    fn year_week() {
        assert_eq!(Date::new(2023, 1, 1).year_week(1), 2022_52);
        assert_eq!(Date::new(2000, 1, 1).year_week(0), 1999_52);
        assert_eq!(Date::new(2000, 1, 2).year_week(0), 2000_01);
    }

    #[test]
    fn quarter_and_yearday() {
        assert_eq!(Date::new(2023, 1, 1).quarter(), 1);
        assert_eq!(Date::new(2023, 4, 1).quarter(), 2);
        assert_eq!(Date::new(2023, 12, 31).quarter(), 4);
        assert_eq!(Date::ZERO.quarter(), 0);
        assert_eq!(Date::new(2023, 1, 1).yearday(), 1);
        assert_eq!(Date::new(2023, 12, 31).yearday(), 365);
        assert_eq!(Date::new(2000, 12, 31).yearday(), 366);
    }

    #[test]
    fn date_formatting() {
        assert_eq!(Date::new(2023, 6, 5).format(), "2023-06-05");
        assert_eq!(Date::new(2023, 6, 5).format_int64(), 2023_06_05);
        assert_eq!(Date::new(1, 2, 3).format(), "0001-02-03");
    }

    #[test]
    fn time_formatting() {
        let t = Time::new(false, 9, 5, 7, 123_456_789);
        assert_eq!(t.format(0), "09:05:07");
        assert_eq!(t.format(3), "09:05:07.123");
        assert_eq!(t.format(6), "09:05:07.123456");
        let neg = Time::new(true, 101, 0, 30, 0);
        assert_eq!(neg.format(0), "-101:00:30");
        assert_eq!(neg.format_int64(), -1_010_030);
    }

    #[test]
    fn datetime_formatting() {
        let dt = DateTime::new(Date::new(2023, 6, 5), Time::new(false, 9, 5, 7, 0));
        assert_eq!(dt.format(0), "2023-06-05 09:05:07");
        assert_eq!(dt.format_int64(), 2023_06_05_09_05_07);
    }

    #[test]
    fn time_round_half_up() {
        let t = Time::new(false, 1, 2, 3, 500_000_000);
        assert_eq!(t.round(0), Time::new(false, 1, 2, 4, 0));
        let t = Time::new(false, 1, 2, 3, 499_999_999);
        assert_eq!(t.round(0), Time::new(false, 1, 2, 3, 0));
        let t = Time::new(false, 1, 59, 59, 900_000_000);
        assert_eq!(t.round(0), Time::new(false, 2, 0, 0, 0));
        let t = Time::new(false, 1, 2, 3, 123_450_000);
        assert_eq!(t.round(4), Time::new(false, 1, 2, 3, 123_500_000));
    }

    #[test]
    fn datetime_round_carries_into_date() {
        let dt = DateTime::new(
            Date::new(2023, 12, 31),
            Time::new(false, 23, 59, 59, 600_000_000),
        );
        let r = dt.round(0);
        assert_eq!(r.date, Date::new(2024, 1, 1));
        assert_eq!(r.time, Time::new(false, 0, 0, 0, 0));
    }

    #[test]
    fn time_compare_sign_aware() {
        let pos = Time::new(false, 1, 0, 0, 0);
        let neg = Time::new(true, 1, 0, 0, 0);
        assert_eq!(neg.compare(&pos), Ordering::Less);
        let more_neg = Time::new(true, 2, 0, 0, 0);
        assert_eq!(more_neg.compare(&neg), Ordering::Less);
    }

    #[test]
    fn add_interval_month_clamps_backward() {
        let d = Date::new(2023, 1, 31);
        let (out, ok) = d.add_interval(&Interval::from_months(1));
        assert!(ok);
        assert_eq!(out, Date::new(2023, 2, 28));

        let d = Date::new(2024, 1, 31);
        let (out, ok) = d.add_interval(&Interval::from_months(1));
        assert!(ok);
        assert_eq!(out, Date::new(2024, 2, 29));
    }

    #[test]
    fn add_interval_year_clamps_leap_day() {
        let d = Date::new(2024, 2, 29);
        let (out, ok) = d.add_interval(&Interval::from_years(1));
        assert!(ok);
        assert_eq!(out, Date::new(2025, 2, 28));
        let (out, ok) = d.add_interval(&Interval::from_years(4));
        assert!(ok);
        assert_eq!(out, Date::new(2028, 2, 29));
    }

    #[test]
    fn add_interval_time_normalizes_into_days() {
        let dt = DateTime::new(Date::new(2023, 12, 31), Time::new(false, 23, 0, 0, 0));
        let (out, ok) = dt.add_interval(&Interval::from_seconds(2 * 3600));
        assert!(ok);
        assert_eq!(out.date, Date::new(2024, 1, 1));
        assert_eq!(out.time, Time::new(false, 1, 0, 0, 0));
    }

    #[test]
    fn add_interval_negative_seconds() {
        let dt = DateTime::new(Date::new(2024, 1, 1), Time::new(false, 0, 30, 0, 0));
        let (out, ok) = dt.add_interval(&Interval::from_seconds(-3600));
        assert!(ok);
        assert_eq!(out.date, Date::new(2023, 12, 31));
        assert_eq!(out.time, Time::new(false, 23, 30, 0, 0));
    }

    #[test]
    fn add_interval_out_of_range() {
        let d = Date::new(9999, 12, 31);
        let (out, ok) = d.add_interval(&Interval::from_days(1));
        assert!(!ok);
        assert_eq!(out, d);

        let d = Date::new(1, 1, 1);
        let (_, ok) = d.add_interval(&Interval::from_years(-2));
        assert!(!ok);

        let (_, ok) = Date::new(5000, 1, 1).add_interval(&Interval::from_months(70_000));
        assert!(!ok);
    }

    #[test]
    fn time_add_interval_saturates() {
        let t = Time::new(false, 800, 0, 0, 0);
        let (out, ok) = t.add_interval(&Interval::parse("100", IntervalUnit::Hour).unwrap());
        assert!(ok);
        assert_eq!(out, Time::new(false, MAX_HOURS, 59, 59, 0));
    }

    #[test]
    fn interval_parse_single_units() {
        let itv = Interval::parse("3", IntervalUnit::Day).unwrap();
        assert_eq!(itv.day, 3);
        let itv = Interval::parse("-2", IntervalUnit::Week).unwrap();
        assert_eq!(itv.day, -14);
        let itv = Interval::parse("2", IntervalUnit::Quarter).unwrap();
        assert_eq!(itv.month, 6);
        let itv = Interval::parse("1.5", IntervalUnit::Second).unwrap();
        assert_eq!((itv.sec, itv.nsec), (1, 500_000_000));
        assert!(Interval::parse("abc", IntervalUnit::Day).is_none());
    }

    #[test]
    fn interval_parse_composites() {
        let itv = Interval::parse("1 2", IntervalUnit::DayHour).unwrap();
        assert_eq!((itv.day, itv.hour), (1, 2));
        // Missing leading components bind to the least significant parts.
        let itv = Interval::parse("30", IntervalUnit::DayHour).unwrap();
        assert_eq!((itv.day, itv.hour), (0, 30));
        let itv = Interval::parse("1:30:15", IntervalUnit::HourSecond).unwrap();
        assert_eq!((itv.hour, itv.min, itv.sec), (1, 30, 15));
        let itv = Interval::parse("-1-6", IntervalUnit::YearMonth).unwrap();
        assert_eq!((itv.year, itv.month), (-1, -6));
        assert!(Interval::parse("1:2:3:4", IntervalUnit::HourMinute).is_none());
    }

    #[test]
    fn new_time_from_seconds_splits() {
        let t = new_time_from_seconds(&Decimal::new_from_string("3661.25").unwrap());
        assert_eq!(t, Time::new(false, 1, 1, 1, 250_000_000));
        let t = new_time_from_seconds(&Decimal::new_from_string("-90").unwrap());
        assert_eq!(t, Time::new(true, 0, 1, 30, 0));
        // Clamps past the TIME range.
        let t = new_time_from_seconds(&Decimal::from_int(999 * 3600));
        assert_eq!(t, Time::new(false, MAX_HOURS, 59, 59, 0));
    }

    #[test]
    fn chrono_round_trip() {
        let dt = DateTime::new(Date::new(2023, 6, 5), Time::new(false, 9, 5, 7, 1000));
        let naive = dt.to_naive().unwrap();
        assert_eq!(DateTime::from_naive(naive), dt);
        assert!(Date::ZERO.to_naive().is_none());
    }

    #[test]
    fn datetime_compare() {
        let a = DateTime::new(Date::new(2023, 6, 5), Time::new(false, 9, 0, 0, 0));
        let b = DateTime::new(Date::new(2023, 6, 5), Time::new(false, 10, 0, 0, 0));
        assert_eq!(a.compare(&b), Ordering::Less);
        let c = DateTime::new(Date::new(2022, 12, 31), Time::new(false, 23, 0, 0, 0));
        assert_eq!(c.compare(&a), Ordering::Less);
        assert_eq!(a.compare(&a), Ordering::Equal);
    }

    #[test]
    fn to_seconds() {
        let a = DateTime::new(Date::new(2023, 6, 5), Time::new(false, 0, 0, 30, 0));
        let b = DateTime::new(Date::new(2023, 6, 4), Time::new(false, 23, 59, 30, 0));
        assert_eq!(a.to_seconds() - b.to_seconds(), 60);
    }
}
