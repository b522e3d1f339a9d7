//! Budget period service
//!
//! Works out which budget period a moment falls in, which expenses belong to
//! it, and the totals shown for it. Everything here is a pure function of its
//! inputs; `PeriodService` only binds the user's settings and the local clock.

use chrono::{DateTime, Datelike, Duration, Local, Months, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::config::settings::{PeriodBoundary, Settings};
use crate::models::{BudgetConfiguration, BudgetPeriod, Expense, PeriodStartDay, PersistedState};

/// Progress above which a period counts as nearly spent
pub const NEAR_LIMIT_FRACTION: f64 = 0.9;

/// Get the budget period containing `now`
///
/// Boundaries are computed on the calendar of `now`'s time zone and start at
/// local midnight. With [`PeriodBoundary::Midnight`] the period's last instant
/// is midnight at the start of its final day.
pub fn current_period<Tz: TimeZone>(
    now: &DateTime<Tz>,
    start_day: PeriodStartDay,
    boundary: PeriodBoundary,
) -> BudgetPeriod {
    let tz = now.timezone();
    let today = now.date_naive();
    let day = start_day.get();

    // Days 1..=28 exist in every month, so these never fall back.
    let this_month = today.with_day(day).unwrap_or(today);
    let start_date = if today.day() >= day {
        this_month
    } else {
        this_month
            .checked_sub_months(Months::new(1))
            .unwrap_or(this_month)
    };
    let next_start = start_date
        .checked_add_months(Months::new(1))
        .unwrap_or(start_date);
    let end_date = next_start.pred_opt().unwrap_or(start_date);

    let end = match boundary {
        PeriodBoundary::Midnight => local_midnight(&tz, end_date),
        PeriodBoundary::EndOfDay => local_midnight(&tz, next_start) - Duration::nanoseconds(1),
    };

    BudgetPeriod {
        start_date,
        end_date,
        start: local_midnight(&tz, start_date),
        end,
    }
}

/// First instant of a calendar day in the given time zone
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        // Zones that skip midnight for DST start the day an hour later
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

/// Expenses whose date falls inside the period, in storage order
pub fn expenses_in_period<'a>(
    expenses: &'a [Expense],
    period: &BudgetPeriod,
) -> impl Iterator<Item = &'a Expense> + Clone + 'a {
    let period = *period;
    expenses.iter().filter(move |e| period.contains(e.date))
}

/// Sort expenses newest first; entries with the same date keep their order
pub fn newest_first<'a, I>(expenses: I) -> Vec<&'a Expense>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut sorted: Vec<_> = expenses.into_iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Label for a period, e.g. "May 15 - Jun 14"
pub fn period_label(period: &BudgetPeriod) -> String {
    period.label()
}

/// How a period's spending compares with the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    /// Comfortably within budget
    OnTrack,
    /// More than 90% of the budget spent
    NearLimit,
    /// Over budget, or no budget to spend against
    Critical,
}

/// Totals for one budget period
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    pub period: BudgetPeriod,
    pub expense_count: usize,
    pub total_spent: f64,
    pub budget: f64,
    /// Budget minus spending; negative when overspent
    pub remaining: f64,
    /// Share of the budget spent, capped at 1.0
    pub progress: f64,
}

impl PeriodSummary {
    /// Compute the totals for `period`
    pub fn compute(expenses: &[Expense], config: &BudgetConfiguration, period: BudgetPeriod) -> Self {
        let in_period = expenses_in_period(expenses, &period);
        let expense_count = in_period.clone().count();
        let total_spent: f64 = in_period.map(|e| e.amount).sum();
        let budget = config.budget_value();

        Self {
            period,
            expense_count,
            total_spent,
            budget,
            remaining: budget - total_spent,
            progress: progress_fraction(total_spent, budget),
        }
    }

    /// Classify the spending level
    pub fn status(&self) -> BudgetStatus {
        if self.budget <= 0.0 || self.remaining < 0.0 {
            BudgetStatus::Critical
        } else if self.progress > NEAR_LIMIT_FRACTION {
            BudgetStatus::NearLimit
        } else {
            BudgetStatus::OnTrack
        }
    }

    /// Period label, e.g. "Feb 15 - Mar 14"
    pub fn label(&self) -> String {
        self.period.label()
    }
}

/// Share of the budget spent, capped at 1.0
///
/// A zero budget has nothing to divide by and reports 1.0.
pub fn progress_fraction(total_spent: f64, budget: f64) -> f64 {
    if budget <= 0.0 {
        return 1.0;
    }
    (total_spent / budget).clamp(0.0, 1.0)
}

/// Service for budget period management
pub struct PeriodService<'a> {
    settings: &'a Settings,
}

impl<'a> PeriodService<'a> {
    /// Create a new period service
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Get the period containing the current local time
    pub fn current_period(&self, start_day: PeriodStartDay) -> BudgetPeriod {
        self.period_at(&Local::now(), start_day)
    }

    /// Get the period containing `now`, using the configured boundary rule
    pub fn period_at<Tz: TimeZone>(&self, now: &DateTime<Tz>, start_day: PeriodStartDay) -> BudgetPeriod {
        current_period(now, start_day, self.settings.period_boundary)
    }

    /// Summarize the current period of a state
    pub fn summary(&self, state: &PersistedState) -> PeriodSummary {
        self.summary_at(state, &Local::now())
    }

    /// Summarize the period of a state containing `now`
    pub fn summary_at<Tz: TimeZone>(&self, state: &PersistedState, now: &DateTime<Tz>) -> PeriodSummary {
        let period = self.period_at(now, state.budget.period_start_day);
        PeriodSummary::compute(&state.expenses, &state.budget, period)
    }
}
