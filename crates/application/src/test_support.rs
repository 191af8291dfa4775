use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use timekeep_core::IdentityClaims;
use timekeep_domain::{
    AclParseMode, DateRange, NewTimeEntry, Principal, TimeEntry, TimeEntryHours, TimeEntryStatus,
    TimeEntryTag,
};

pub(crate) fn principal(user_id: &str, acl: &[&str]) -> Principal {
    let claims = IdentityClaims::new(
        user_id,
        user_id,
        Some(format!("{user_id}@example.com")),
        acl.iter().map(|claim| (*claim).to_owned()).collect(),
    );

    match Principal::from_claims(&claims, AclParseMode::Lenient) {
        Ok(principal) => principal,
        Err(error) => panic!("test principal should resolve: {error}"),
    }
}

pub(crate) fn day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap_or(NaiveDate::MIN)
}

pub(crate) fn entry_in_status(
    owner: &str,
    project_code: &str,
    status: TimeEntryStatus,
    tags: &[(&str, &str)],
) -> TimeEntry {
    let (Ok(hours), Ok(dates)) = (
        TimeEntryHours::new(Decimal::new(8, 0), Decimal::ZERO),
        DateRange::new(day(2), day(2)),
    ) else {
        panic!("sample values should be valid");
    };

    let entry = TimeEntry::new(
        NewTimeEntry {
            user_id: owner.to_owned(),
            project_code: project_code.to_owned(),
            task_name: "Development".to_owned(),
            hours,
            dates,
            description: None,
            issue_id: None,
            tags: tags
                .iter()
                .map(|(name, value)| TimeEntryTag::new(*name, *value))
                .collect::<BTreeSet<_>>(),
        },
        Utc::now(),
    );

    let Ok(mut entry) = entry else {
        panic!("sample entry should be valid");
    };
    let comment = (status == TimeEntryStatus::Declined).then(|| "needs detail".to_owned());
    entry.enter_status(status, comment);
    entry
}
