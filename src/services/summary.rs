//! Aggregation over expense records: relative time windows and key-grouped
//! totals. Pure functions; callers supply `today` so behavior is
//! deterministic under test.

use std::collections::HashMap;

use chrono::{DateTime, Days, Months, NaiveDate, NaiveDateTime};

use crate::models::{CategoryTotal, FinancialData, FinancialSummary, RetailerTotal, TimeFilter, TimeFilterKind};

/// Parses a record's date down to a calendar day. Accepts a bare ISO date,
/// an RFC 3339 datetime, or a zone-less datetime; anything else yields `None`
/// and the record never matches a time window.
pub fn record_day(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Keeps the records whose calendar day falls inside the selected window.
///
/// `None` and `all` leave the list untouched (order preserved). The windows
/// are trailing and inclusive of `today`: `daily` is exactly `today`,
/// `weekly` is the last seven days, `monthly` goes back one calendar month
/// (clamped at short month ends). Future-dated records never match a window.
pub fn filter_by_time(
    records: &[FinancialData],
    filter: Option<&TimeFilter>,
    today: NaiveDate,
) -> Vec<FinancialData> {
    let kind = match filter {
        None => return records.to_vec(),
        Some(f) => f.kind,
    };

    let lower = match kind {
        TimeFilterKind::All => return records.to_vec(),
        TimeFilterKind::Daily => today,
        TimeFilterKind::Weekly => today.checked_sub_days(Days::new(6)).unwrap_or(NaiveDate::MIN),
        TimeFilterKind::Monthly => today
            .checked_sub_months(Months::new(1))
            .unwrap_or(NaiveDate::MIN),
    };

    records
        .iter()
        .filter(|r| match record_day(&r.date) {
            Some(day) => day >= lower && day <= today,
            None => false,
        })
        .cloned()
        .collect()
}

/// Sums `price` grouped by the extracted key.
///
/// Accumulation preserves first-seen key order; the result is then sorted by
/// descending total with a stable sort, so equal totals keep first-seen
/// order.
pub fn totals_by<F>(records: &[FinancialData], key: F) -> Vec<(String, f64)>
where
    F: Fn(&FinancialData) -> &str,
{
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, f64> = HashMap::new();

    for record in records {
        let k = key(record);
        if let Some(total) = sums.get_mut(k) {
            *total += record.price;
        } else {
            sums.insert(k.to_string(), record.price);
            order.push(k.to_string());
        }
    }

    let mut totals: Vec<(String, f64)> = order
        .into_iter()
        .map(|k| {
            let total = sums.remove(&k).unwrap_or(0.0);
            (k, total)
        })
        .collect();
    totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    totals
}

/// Builds the summary for a record list and an optional time window.
///
/// `total_amount` and `total_entries` always cover the full list; the
/// filtered total and both breakdowns cover the windowed subset only. The
/// asymmetry is contractual: lifetime totals in the header, windowed
/// breakdowns in the charts.
pub fn summarize(
    records: &[FinancialData],
    filter: Option<&TimeFilter>,
    today: NaiveDate,
) -> FinancialSummary {
    let filtered = filter_by_time(records, filter, today);

    let total_amount = records.iter().map(|r| r.price).sum();
    let filtered_total_amount = filtered.iter().map(|r| r.price).sum();

    let category_totals = totals_by(&filtered, |r| &r.category)
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect();
    let retailer_totals = totals_by(&filtered, |r| &r.retailer)
        .into_iter()
        .map(|(retailer, total)| RetailerTotal { retailer, total })
        .collect();

    FinancialSummary {
        total_amount,
        filtered_total_amount,
        total_entries: records.len(),
        category_totals,
        retailer_totals,
    }
}
