//! Statistics reports on the admin dashboard.

use crate::domain::report::Report;
use crate::domain::types::Role;
use crate::forms::reports::ReportForm;
use crate::notice::Notifier;
use crate::repository::{ReportQuery, ReportReader};
use crate::services::{ServiceResult, announce, ensure_role};
use crate::session::Session;

pub fn generate_report<R>(
    repo: &R,
    session: &Session,
    notifier: &dyn Notifier,
    form: ReportForm,
) -> ServiceResult<Report>
where
    R: ReportReader + ?Sized,
{
    let result = try_generate_report(repo, session, form);

    announce(
        notifier,
        "generate report",
        "Report generated successfully!",
        result,
    )
}

fn try_generate_report<R>(
    repo: &R,
    session: &Session,
    form: ReportForm,
) -> ServiceResult<Report>
where
    R: ReportReader + ?Sized,
{
    ensure_role(session, &[Role::Admin])?;
    let query = ReportQuery::try_from(form)?;
    Ok(repo.news_report(&query)?)
}
