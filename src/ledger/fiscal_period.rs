use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Supplies the current calendar date, UTC midnight-truncated.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Real-time clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Label shown while no fiscal period has been configured.
pub const UNSET_PERIOD_LABEL: &str = "未設定";

/// Tracks the one-year accounting window currently open for posting.
///
/// `original_start_date` anchors period numbering and never moves once set;
/// `start_date` advances one year at each close. Both clear on reset,
/// returning the tracker to its unset state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FiscalPeriod {
    start_date: Option<NaiveDate>,
    original_start_date: Option<NaiveDate>,
}

impl FiscalPeriod {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a tracker from persisted state.
    pub fn from_parts(
        start_date: Option<NaiveDate>,
        original_start_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            start_date,
            original_start_date,
        }
    }

    pub fn is_set(&self) -> bool {
        self.start_date.is_some()
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn original_start_date(&self) -> Option<NaiveDate> {
        self.original_start_date
    }

    /// One year minus one day after the start date. Never independently set.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.start_date
            .map(|start| add_years(start, 1) - Duration::days(1))
    }

    /// Inclusive `[start, end]` window, when configured.
    pub fn window(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start_date, self.end_date()) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.window()
            .map(|(start, end)| start <= date && date <= end)
            .unwrap_or(false)
    }

    /// Configures the period start.
    ///
    /// The first call records `date` as the original start. The effective
    /// start is fast-forwarded by whole years until `today` falls inside the
    /// resulting one-year window, so a freshly configured real period always
    /// contains today. Sample setups skip the fast-forward so historical demo
    /// data renders unmodified. When an original start already exists it is
    /// the fast-forward candidate and the passed date is ignored.
    pub fn set_start_date(&mut self, date: NaiveDate, is_sample: bool, today: NaiveDate) {
        let candidate = match self.original_start_date {
            Some(original) => original,
            None => {
                self.original_start_date = Some(date);
                date
            }
        };

        let mut effective = candidate;
        if !is_sample && effective < today {
            while today >= add_years(effective, 1) {
                effective = add_years(effective, 1);
            }
        }

        self.start_date = Some(effective);
    }

    /// Moves the window forward exactly one calendar year. The original
    /// start date is untouched and no fast-forwarding happens here.
    pub fn advance_to_next_period(&mut self) {
        if let Some(start) = self.start_date {
            self.start_date = Some(add_years(start, 1));
        }
    }

    /// Clears both dates, returning to the unset state. Consumers must treat
    /// unset as "setup required, all statements empty".
    pub fn reset(&mut self) {
        self.start_date = None;
        self.original_start_date = None;
    }

    /// 1-based period number relative to the original start date.
    ///
    /// Counts in fiscal years: a date's fiscal year is its calendar year,
    /// decremented by one when its month precedes the original start month.
    pub fn period_number(&self) -> Option<i32> {
        let start = self.start_date?;
        let original = self.original_start_date.unwrap_or(start);
        let origin_month = original.month();
        Some(fiscal_year(start, origin_month) - fiscal_year(original, origin_month) + 1)
    }

    /// `第{n}期 ({start} - {end})`, or the unset sentinel.
    pub fn period_label(&self) -> String {
        match (self.start_date, self.end_date(), self.period_number()) {
            (Some(start), Some(end), Some(number)) => format!(
                "第{}期 ({} - {})",
                number,
                start.format("%Y/%-m/%-d"),
                end.format("%Y/%-m/%-d"),
            ),
            _ => UNSET_PERIOD_LABEL.to_string(),
        }
    }
}

fn fiscal_year(date: NaiveDate, origin_month: u32) -> i32 {
    if date.month() < origin_month {
        date.year() - 1
    } else {
        date.year()
    }
}

/// Calendar-year addition; 29 Feb clamps to 28 Feb in a non-leap target year.
fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 2, 28).unwrap_or(date))
}
