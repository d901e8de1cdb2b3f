// File: ./src/model/parser.rs
//! Built-in natural-language date grammar.
//!
//! `NaturalDateParser` scans free text for date expressions and reports every
//! group it finds, the way a general-purpose date oracle would. Unknown words act
//! as separators, so "Wed ~ Thur" yields two groups while "Wed or Thur" yields one
//! group with two alternatives. Nothing here decides whether a result is
//! acceptable; that is the resolver adapter's job.
use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Local, Months, NaiveDate, NaiveDateTime, NaiveTime,
    Offset, TimeZone, Timelike, Utc, Weekday,
};
use strum::Display;

/// How a date expression was phrased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DateKind {
    /// Names a calendar point ("25 Apr", "Fri 8pm", "8 days from 25 Apr").
    Explicit,
    /// An offset in days/weeks/months/years from the reference ("2 days later").
    RelativeDate,
    /// An offset in hours/minutes/seconds from the reference ("in 3 hours").
    RelativeTime,
}

/// One contiguous date expression found in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGroup {
    pub text: String,
    /// Candidate instants. More than one means the text offered alternatives.
    pub dates: Vec<DateTime<Utc>>,
    pub date_inferred: bool,
    pub time_inferred: bool,
    pub recurring: bool,
    pub kind: DateKind,
}

/// A natural-language date oracle.
pub trait DateOracle {
    /// Finds every date group in `text`, filling unspecified components from `reference`.
    fn parse(&self, text: &str, reference: DateTime<Utc>) -> Vec<DateGroup>;

    /// The wall-clock reading of `instant` in the zone this oracle reasons in.
    fn wall_clock(&self, instant: DateTime<Utc>) -> NaiveDateTime;
}

/// The zone wall-clock phrases are interpreted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Local,
    Fixed(FixedOffset),
}

impl Zone {
    pub fn utc() -> Self {
        Zone::Fixed(Utc.fix())
    }

    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(Zone::Fixed)
    }

    pub fn to_wall(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Zone::Local => instant.with_timezone(&Local).naive_local(),
            Zone::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }

    /// Maps a wall-clock reading back to an instant. Ambiguous readings take the
    /// earliest mapping; readings inside a DST gap are pushed forward by an hour.
    pub fn from_wall(&self, wall: NaiveDateTime) -> Option<DateTime<Utc>> {
        let map = |naive: NaiveDateTime| match self {
            Zone::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            Zone::Fixed(offset) => offset
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        };
        map(wall).or_else(|| map(wall + Duration::hours(1)))
    }
}

#[derive(Debug, Clone)]
pub struct NaturalDateParser {
    zone: Zone,
}

impl Default for NaturalDateParser {
    fn default() -> Self {
        Self::new(Zone::Local)
    }
}

impl NaturalDateParser {
    pub fn new(zone: Zone) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }
}

impl DateOracle for NaturalDateParser {
    fn parse(&self, text: &str, reference: DateTime<Utc>) -> Vec<DateGroup> {
        let words = tokenize(text);
        let cx = Cx {
            raw: &words,
            lower: words.iter().map(|w| w.to_lowercase()).collect(),
            reference: self.zone.to_wall(reference),
            zone: self.zone,
        };

        let mut groups = Vec::new();
        let mut i = 0;
        while i < words.len() {
            let Some((first, used)) = expression(&cx, i) else {
                i += 1;
                continue;
            };
            let start = i;
            let mut walls = vec![first.wall];
            let mut recurring = first.recurring;
            let mut j = i + used;

            // Alternatives: "Wed or Thur", "Mon, Tue and Wed"
            while j + 1 < words.len() && matches!(cx.lower[j].as_str(), "or" | "and" | ",") {
                match expression(&cx, j + 1) {
                    Some((alt, alt_used)) => {
                        walls.push(alt.wall);
                        recurring |= alt.recurring;
                        j += 1 + alt_used;
                    }
                    None => break,
                }
            }

            let dates: Vec<DateTime<Utc>> = walls
                .into_iter()
                .filter_map(|w| self.zone.from_wall(w))
                .collect();
            if !dates.is_empty() {
                groups.push(DateGroup {
                    text: words[start..j].join(" "),
                    dates,
                    date_inferred: first.date_inferred,
                    time_inferred: first.time_inferred,
                    recurring,
                    kind: first.kind,
                });
            }
            i = j;
        }
        groups
    }

    fn wall_clock(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        self.zone.to_wall(instant)
    }
}

// --- TOKENS ---

struct Cx<'a> {
    raw: &'a [String],
    lower: Vec<String>,
    reference: NaiveDateTime,
    zone: Zone,
}

impl Cx<'_> {
    fn word(&self, i: usize) -> Option<&str> {
        self.lower.get(i).map(String::as_str)
    }

    fn reference_time(&self) -> NaiveTime {
        let t = self.reference.time();
        t.with_nanosecond(0).unwrap_or(t)
    }
}

/// Splits on whitespace, peeling trailing commas into their own token.
fn tokenize(input: &str) -> Vec<String> {
    let mut out = Vec::new();
    for word in input.split_whitespace() {
        let trimmed = word.trim_end_matches(',');
        if !trimmed.is_empty() {
            out.push(trimmed.to_string());
        }
        for _ in 0..(word.len() - trimmed.len()) {
            out.push(",".to_string());
        }
    }
    out
}

#[derive(Debug, Clone, Copy)]
struct Parsed {
    wall: NaiveDateTime,
    date_inferred: bool,
    time_inferred: bool,
    kind: DateKind,
    recurring: bool,
}

fn expression(cx: &Cx, i: usize) -> Option<(Parsed, usize)> {
    recurrence(cx, i)
        .or_else(|| relative(cx, i))
        .or_else(|| datetime(cx, i))
}

// --- DATE PARSING HELPERS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Unit {
    fn kind(self) -> DateKind {
        match self {
            Unit::Second | Unit::Minute | Unit::Hour => DateKind::RelativeTime,
            _ => DateKind::RelativeDate,
        }
    }
}

fn parse_unit(s: &str) -> Option<Unit> {
    match s {
        "s" | "sec" | "secs" | "second" | "seconds" => Some(Unit::Second),
        "m" | "min" | "mins" | "minute" | "minutes" => Some(Unit::Minute),
        "h" | "hr" | "hrs" | "hour" | "hours" => Some(Unit::Hour),
        "d" | "day" | "days" => Some(Unit::Day),
        "w" | "wk" | "wks" | "week" | "weeks" => Some(Unit::Week),
        "mo" | "month" | "months" => Some(Unit::Month),
        "y" | "yr" | "yrs" | "year" | "years" => Some(Unit::Year),
        _ => None,
    }
}

fn parse_english_number(s: &str) -> Option<u32> {
    match s {
        "a" | "an" | "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        "seven" => Some(7),
        "eight" => Some(8),
        "nine" => Some(9),
        "ten" => Some(10),
        "eleven" => Some(11),
        "twelve" => Some(12),
        _ => s.parse::<u32>().ok(),
    }
}

/// Unit names as standalone words. Single letters only count when attached ("3h").
fn parse_unit_word(s: &str) -> Option<Unit> {
    if s.len() > 1 { parse_unit(s) } else { None }
}

/// "2 days", "two weeks", "a day" or the attached "3h" form. Returns the words consumed.
fn parse_amount_and_unit(cx: &Cx, i: usize) -> Option<(u32, Unit, usize)> {
    let first = cx.word(i)?;
    if let Some(amount) = parse_english_number(first)
        && let Some(unit) = cx.word(i + 1).and_then(parse_unit_word)
    {
        return Some((amount, unit, 2));
    }
    let idx = first.find(|c: char| !c.is_ascii_digit())?;
    let (amt_str, unit_str) = first.split_at(idx);
    let amount = amt_str.parse::<u32>().ok()?;
    let unit = parse_unit(unit_str)?;
    Some((amount, unit, 1))
}

fn shift(wall: NaiveDateTime, amount: i64, unit: Unit) -> Option<NaiveDateTime> {
    let months = |n: i64| -> Option<NaiveDateTime> {
        let m = Months::new(u32::try_from(n.unsigned_abs()).ok()?);
        if n >= 0 {
            wall.checked_add_months(m)
        } else {
            wall.checked_sub_months(m)
        }
    };
    match unit {
        Unit::Second => wall.checked_add_signed(Duration::seconds(amount)),
        Unit::Minute => wall.checked_add_signed(Duration::minutes(amount)),
        Unit::Hour => wall.checked_add_signed(Duration::hours(amount)),
        Unit::Day => wall.checked_add_signed(Duration::days(amount)),
        Unit::Week => wall.checked_add_signed(Duration::weeks(amount)),
        Unit::Month => months(amount),
        Unit::Year => months(amount.checked_mul(12)?),
    }
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tues" | "tuesday" => Some(Weekday::Tue),
        "wed" | "weds" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thur" | "thurs" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

fn parse_month(s: &str) -> Option<u32> {
    match s {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

/// "1st", "22nd", "3rd", "25th".
fn parse_ordinal(s: &str) -> Option<u32> {
    let digits = s
        .strip_suffix("st")
        .or_else(|| s.strip_suffix("nd"))
        .or_else(|| s.strip_suffix("rd"))
        .or_else(|| s.strip_suffix("th"))?;
    let day = digits.parse::<u32>().ok()?;
    (1..=31).contains(&day).then_some(day)
}

/// A day-of-month written as an ordinal or a bare number.
fn parse_day_of_month(s: &str) -> Option<u32> {
    parse_ordinal(s).or_else(|| {
        let day = s.parse::<u32>().ok()?;
        (s.len() <= 2 && (1..=31).contains(&day)).then_some(day)
    })
}

fn parse_year(s: &str) -> Option<i32> {
    if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

fn parse_time_string(s: &str) -> Option<NaiveTime> {
    match s {
        "noon" | "midday" => return NaiveTime::from_hms_opt(12, 0, 0),
        "midnight" => return NaiveTime::from_hms_opt(0, 0, 0),
        _ => {}
    }

    // Helper for 12h
    let parse_12h = |s: &str, is_pm: bool| -> Option<NaiveTime> {
        let (h, m) = if let Some((h_str, m_str)) = s.split_once(':') {
            (h_str.parse::<u32>().ok()?, m_str.parse::<u32>().ok()?)
        } else {
            (s.parse::<u32>().ok()?, 0)
        };
        if !(1..=12).contains(&h) || m > 59 {
            return None;
        }
        let h_24 = if h == 12 {
            if is_pm { 12 } else { 0 }
        } else if is_pm {
            h + 12
        } else {
            h
        };
        NaiveTime::from_hms_opt(h_24, m, 0)
    };

    if let Some(stripped) = s.strip_suffix("am") {
        return parse_12h(stripped, false);
    }
    if let Some(stripped) = s.strip_suffix("pm") {
        return parse_12h(stripped, true);
    }

    let mut parts = s.split(':');
    let h = parts.next()?.parse::<u32>().ok()?;
    let m = parts.next()?.parse::<u32>().ok()?;
    let sec = match parts.next() {
        Some(sec) => sec.parse::<u32>().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveTime::from_hms_opt(h, m, sec)
}

/// A time-of-day, optionally introduced by "at"/"@", optionally split as "8 pm".
fn time_at(cx: &Cx, i: usize) -> Option<(NaiveTime, usize)> {
    let (lead, i) = match cx.word(i)? {
        "at" | "@" => (1, i + 1),
        _ => (0, i),
    };
    let word = cx.word(i)?;
    if let Some(meridiem) = cx.word(i + 1).filter(|w| matches!(*w, "am" | "pm"))
        && word.chars().all(|c| c.is_ascii_digit() || c == ':')
        && let Some(t) = parse_time_string(&format!("{}{}", word, meridiem))
    {
        return Some((t, lead + 2));
    }
    parse_time_string(word).map(|t| (t, lead + 1))
}

fn next_weekday(from: NaiveDate, target: Weekday) -> NaiveDate {
    let mut d = from + Duration::days(1);
    while d.weekday() != target {
        d += Duration::days(1);
    }
    d
}

/// `target` within the Monday-based week containing `from`.
fn weekday_in_week(from: NaiveDate, target: Weekday) -> NaiveDate {
    let monday = from - Duration::days(from.weekday().num_days_from_monday() as i64);
    monday + Duration::days(target.num_days_from_monday() as i64)
}

struct DatePart {
    date: NaiveDate,
    /// Set when the date word itself implies a time ("tonight").
    time: Option<NaiveTime>,
}

fn date_only(date: NaiveDate) -> DatePart {
    DatePart { date, time: None }
}

fn calendar_date(cx: &Cx, i: usize) -> Option<(DatePart, usize)> {
    let today = cx.reference.date();
    let word = cx.word(i)?;

    // 1. Numeric dates
    if let Ok(d) = NaiveDate::parse_from_str(word, "%Y-%m-%d") {
        return Some((date_only(d), 1));
    }
    if let Ok(d) = NaiveDate::parse_from_str(word, "%Y/%m/%d") {
        return Some((date_only(d), 1));
    }

    // 2. Named days
    match word {
        "today" => return Some((date_only(today), 1)),
        "tonight" => {
            let part = DatePart {
                date: today,
                time: NaiveTime::from_hms_opt(20, 0, 0),
            };
            return Some((part, 1));
        }
        "tomorrow" | "tmr" | "tmrw" | "tml" => {
            return Some((date_only(today + Duration::days(1)), 1));
        }
        "yesterday" => return Some((date_only(today - Duration::days(1)), 1)),
        _ => {}
    }

    // "the day after tomorrow", "day before yesterday"
    let lead = usize::from(word == "the");
    if cx.word(i + lead) == Some("day") {
        match (cx.word(i + lead + 1), cx.word(i + lead + 2)) {
            (Some("after"), Some("tomorrow")) => {
                return Some((date_only(today + Duration::days(2)), lead + 3));
            }
            (Some("before"), Some("yesterday")) => {
                return Some((date_only(today - Duration::days(2)), lead + 3));
            }
            _ => {}
        }
    }

    // 3. Weekdays
    if let Some(wd) = parse_weekday(word) {
        return Some((date_only(next_weekday(today, wd)), 1));
    }
    if let Some(wd) = cx.word(i + 1).and_then(parse_weekday) {
        let date = match word {
            "this" => Some(weekday_in_week(today, wd)),
            "coming" => Some(next_weekday(today, wd)),
            "next" => Some(weekday_in_week(today, wd) + Duration::days(7)),
            "last" => Some(weekday_in_week(today, wd) - Duration::days(7)),
            _ => None,
        };
        if let Some(d) = date {
            return Some((date_only(d), 2));
        }
    }

    // 4. Day and month: "25 Apr", "25th of April 2017"
    if let Some(day) = parse_day_of_month(word) {
        let of = usize::from(cx.word(i + 1) == Some("of"));
        if let Some(month) = cx.word(i + 1 + of).and_then(parse_month) {
            let mut used = 2 + of;
            let year = optional_year(cx, i + used, &mut used).unwrap_or(today.year());
            let d = NaiveDate::from_ymd_opt(year, month, day)?;
            return Some((date_only(d), used));
        }
    }

    // 5. Month first: "Apr 25", "April 25th, 2017", "Jan 2017"
    if let Some(month) = parse_month(word) {
        if let Some(day) = cx.word(i + 1).and_then(parse_day_of_month) {
            let mut used = 2;
            let year = optional_year(cx, i + used, &mut used).unwrap_or(today.year());
            let d = NaiveDate::from_ymd_opt(year, month, day)?;
            return Some((date_only(d), used));
        }
        if let Some(year) = cx.word(i + 1).and_then(parse_year) {
            let d = NaiveDate::from_ymd_opt(year, month, 1)?;
            return Some((date_only(d), 2));
        }
    }

    // 6. Bare ordinal: "1st", "the 25th"
    if let Some(day) = cx.word(i + lead).and_then(parse_ordinal) {
        let d = NaiveDate::from_ymd_opt(today.year(), today.month(), day)?;
        return Some((date_only(d), lead + 1));
    }

    None
}

/// Consumes an optional "[,] 2017" and bumps `used` accordingly.
fn optional_year(cx: &Cx, i: usize, used: &mut usize) -> Option<i32> {
    let comma = usize::from(cx.word(i) == Some(","));
    let year = cx.word(i + comma).and_then(parse_year)?;
    *used += comma + 1;
    Some(year)
}

/// A calendar date optionally introduced by "on".
fn date_on(cx: &Cx, i: usize) -> Option<(DatePart, usize)> {
    if cx.word(i) == Some("on")
        && let Some((part, used)) = calendar_date(cx, i + 1)
    {
        return Some((part, used + 1));
    }
    calendar_date(cx, i)
}

/// An ISO timestamp as a wall reading. Offsets, when present, are honoured.
fn iso_datetime(cx: &Cx, i: usize) -> Option<NaiveDateTime> {
    let raw = cx.raw.get(i)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(cx.zone.to_wall(dt.with_timezone(&Utc)));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

fn datetime(cx: &Cx, i: usize) -> Option<(Parsed, usize)> {
    let explicit = |wall: NaiveDateTime, date_inferred: bool, time_inferred: bool| Parsed {
        wall,
        date_inferred,
        time_inferred,
        kind: DateKind::Explicit,
        recurring: false,
    };

    if let Some(wall) = iso_datetime(cx, i) {
        return Some((explicit(wall, false, false), 1));
    }

    // Time first: "8pm", "8pm 25 Apr", "at 5pm on Fri"
    if let Some((time, used)) = time_at(cx, i) {
        return Some(match date_on(cx, i + used) {
            Some((part, date_used)) => (
                explicit(part.date.and_time(time), false, false),
                used + date_used,
            ),
            None => (explicit(cx.reference.date().and_time(time), true, false), used),
        });
    }

    // Date first: "25 Apr", "Fri at 8pm", "tonight"
    let (part, used) = date_on(cx, i)?;
    if let Some((time, time_used)) = time_at(cx, i + used) {
        return Some((
            explicit(part.date.and_time(time), false, false),
            used + time_used,
        ));
    }
    Some(match part.time {
        Some(time) => (explicit(part.date.and_time(time), false, false), used),
        None => (
            explicit(part.date.and_time(cx.reference_time()), false, true),
            used,
        ),
    })
}

/// "in 2 days", "2 days later", "3 hours ago", "next week", "8 days from 25 Apr".
fn relative(cx: &Cx, i: usize) -> Option<(Parsed, usize)> {
    let word = cx.word(i)?;

    // 1. "next week", "last month"
    if let Some(unit) = cx.word(i + 1).and_then(parse_unit_word) {
        let sign = match word {
            "next" => Some(1),
            "last" => Some(-1),
            _ => None,
        };
        if let Some(sign) = sign {
            return with_relative_time(cx, i + 2, sign, unit, 2);
        }
    }

    // 2. "in 2 days"
    if word == "in"
        && let Some((amount, unit, used)) = parse_amount_and_unit(cx, i + 1)
    {
        return with_relative_time(cx, i + 1 + used, amount as i64, unit, 1 + used);
    }

    // 3. "2 days later", "2 days from now", "2 days after 25 Apr"
    let (amount, unit, used) = parse_amount_and_unit(cx, i)?;
    let amount = amount as i64;
    let j = i + used;
    match cx.word(j) {
        Some("later") | Some("hence") => with_relative_time(cx, j + 1, amount, unit, used + 1),
        Some("ago") | Some("earlier") => with_relative_time(cx, j + 1, -amount, unit, used + 1),
        Some("from") if cx.word(j + 1) == Some("now") => {
            with_relative_time(cx, j + 2, amount, unit, used + 2)
        }
        Some(dir @ ("after" | "from" | "before")) => {
            let sign = if dir == "before" { -1 } else { 1 };
            match datetime(cx, j + 1) {
                Some((anchor, anchor_used)) => {
                    let wall = shift(anchor.wall, sign * amount, unit)?;
                    Some((Parsed { wall, ..anchor }, used + 1 + anchor_used))
                }
                // A trailing "from" with no anchor is not a date.
                None if dir == "from" => None,
                None => with_relative_time(cx, j + 1, sign * amount, unit, used + 1),
            }
        }
        _ => None,
    }
}

/// Applies an offset to the reference and picks up an optional trailing time
/// ("in 2 days at 5pm").
fn with_relative_time(
    cx: &Cx,
    next: usize,
    amount: i64,
    unit: Unit,
    used: usize,
) -> Option<(Parsed, usize)> {
    let shifted = shift(cx.reference, amount, unit)?;
    let kind = unit.kind();
    if kind == DateKind::RelativeDate
        && let Some((time, time_used)) = time_at(cx, next)
    {
        let parsed = Parsed {
            wall: shifted.date().and_time(time),
            date_inferred: false,
            time_inferred: false,
            kind,
            recurring: false,
        };
        return Some((parsed, used + time_used));
    }
    let parsed = Parsed {
        wall: shifted,
        date_inferred: kind == DateKind::RelativeTime,
        time_inferred: kind == DateKind::RelativeDate,
        kind,
        recurring: false,
    };
    Some((parsed, used))
}

/// "every Friday", "every 2 weeks", "daily". Reports the first occurrence.
fn recurrence(cx: &Cx, i: usize) -> Option<(Parsed, usize)> {
    let word = cx.word(i)?;
    let simple = match word {
        "daily" => Some(Unit::Day),
        "weekly" => Some(Unit::Week),
        "monthly" => Some(Unit::Month),
        "yearly" | "annually" => Some(Unit::Year),
        _ => None,
    };
    if let Some(unit) = simple {
        let (parsed, used) = with_relative_time(cx, i + 1, 1, unit, 1)?;
        return Some((Parsed { recurring: true, ..parsed }, used));
    }

    if word != "every" {
        return None;
    }
    let other = usize::from(cx.word(i + 1) == Some("other"));
    let j = i + 1 + other;
    let step = if other == 1 { 2 } else { 1 };

    if let Some(wd) = cx.word(j).and_then(parse_weekday) {
        let date = next_weekday(cx.reference.date(), wd);
        let (time, time_used, time_inferred) = match time_at(cx, j + 1) {
            Some((t, n)) => (t, n, false),
            None => (cx.reference_time(), 0, true),
        };
        let parsed = Parsed {
            wall: date.and_time(time),
            date_inferred: false,
            time_inferred,
            kind: DateKind::Explicit,
            recurring: true,
        };
        return Some((parsed, 1 + other + 1 + time_used));
    }

    let (amount, unit, used) = match parse_amount_and_unit(cx, j) {
        Some(found) => found,
        None => (1, cx.word(j).and_then(parse_unit_word)?, 1),
    };
    let interval = amount as i64 * step;
    let (parsed, total) = with_relative_time(cx, j + used, interval, unit, 1 + other + used)?;
    Some((Parsed { recurring: true, ..parsed }, total))
}
