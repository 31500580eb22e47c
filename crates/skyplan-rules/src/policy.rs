use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};

pub const DEFAULT_MIN_SEPARATION_MINUTES: i64 = 30;
/// One week. Configured separations above this are rejected.
pub const MAX_SEPARATION_MINUTES: i64 = 7 * 24 * 60;

/// Tunables shared by every scheduling rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulePolicy {
    /// Half-width of the overlap window. A neighbour exactly this far away
    /// still conflicts.
    pub min_separation: Duration,
    /// Offset whose wall clock defines a calendar day.
    pub reference_offset: FixedOffset,
}

impl Default for SchedulePolicy {
    fn default() -> Self {
        Self {
            min_separation: Duration::minutes(DEFAULT_MIN_SEPARATION_MINUTES),
            reference_offset: Utc.fix(),
        }
    }
}

/// A closed interval of instants, inclusive at both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A calendar day together with the instants that bound it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayWindow {
    pub day: NaiveDate,
    pub window: DateWindow,
}

/// `[date - min_separation, date + min_separation]`, clamped to the
/// representable range.
pub fn overlap_window(date: DateTime<Utc>, policy: &SchedulePolicy) -> DateWindow {
    let start = date
        .checked_sub_signed(policy.min_separation)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let end = date
        .checked_add_signed(policy.min_separation)
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    DateWindow::new(start, end)
}

/// Midnight to `23:59:59.999` of the wall-clock day `date` falls on in the
/// policy's reference offset. Not a rolling 24h window.
pub fn calendar_day_window(date: DateTime<Utc>, policy: &SchedulePolicy) -> DayWindow {
    let offset = policy.reference_offset;
    let day = date.with_timezone(&offset).date_naive();

    let local_midnight = NaiveDateTime::new(day, NaiveTime::MIN);
    let start = local_to_utc(local_midnight, offset);
    let end = start + Duration::days(1) - Duration::milliseconds(1);

    DayWindow {
        day,
        window: DateWindow::new(start, end),
    }
}

fn local_to_utc(local: NaiveDateTime, offset: FixedOffset) -> DateTime<Utc> {
    let shift = Duration::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(local - shift, Utc)
}
