//! Report generation form.

use chrono::NaiveDate;

use crate::forms::FormError;
use crate::repository::ReportQuery;

#[derive(Debug, Clone, Default)]
pub struct ReportForm {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl ReportForm {
    /// The default window: the last 30 days up to `today`.
    pub fn last_30_days(today: NaiveDate) -> Self {
        Self {
            start: today.checked_sub_days(chrono::Days::new(30)),
            end: Some(today),
        }
    }
}

impl TryFrom<ReportForm> for ReportQuery {
    type Error = FormError;

    fn try_from(form: ReportForm) -> Result<Self, Self::Error> {
        let (Some(start), Some(end)) = (form.start, form.end) else {
            return Err(FormError::MissingDates);
        };

        if start > end {
            return Err(FormError::InvalidDateRange);
        }

        Ok(ReportQuery { start, end })
    }
}
