use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use feedeater_core::model::entity::ServicePeriod;
use gtfs_structures::{Calendar, CalendarDate, Exception};

/// combines calendar.txt and calendar_dates.txt into one service period per
/// service id. a service that only appears in calendar_dates.txt runs on its
/// added dates alone.
pub fn service_periods(
    calendar: &HashMap<String, Calendar>,
    calendar_dates: &HashMap<String, Vec<CalendarDate>>,
) -> HashMap<String, ServicePeriod> {
    let mut services: HashMap<String, ServicePeriod> = calendar
        .iter()
        .map(|(service_id, c)| {
            let service = ServicePeriod {
                start_date: c.start_date,
                end_date: c.end_date,
                days_of_week: days_of_week(c),
                added_dates: BTreeSet::new(),
                except_dates: BTreeSet::new(),
            };
            (service_id.clone(), service)
        })
        .collect();

    for (service_id, dates) in calendar_dates.iter() {
        let Some(first) = dates.iter().map(|d| d.date).min() else {
            continue;
        };
        let service = services
            .entry(service_id.clone())
            .or_insert_with(|| dates_only_service(first));
        for date in dates.iter() {
            match date.exception_type {
                Exception::Added => service.added_dates.insert(date.date),
                Exception::Deleted => service.except_dates.insert(date.date),
            };
        }
        service.expand_to_added_dates();
    }
    services
}

/// the weekly pattern of a calendar, Monday first.
fn days_of_week(c: &Calendar) -> [bool; 7] {
    [
        c.monday,
        c.tuesday,
        c.wednesday,
        c.thursday,
        c.friday,
        c.saturday,
        c.sunday,
    ]
}

fn dates_only_service(date: NaiveDate) -> ServicePeriod {
    ServicePeriod {
        start_date: date,
        end_date: date,
        days_of_week: [false; 7],
        added_dates: BTreeSet::new(),
        except_dates: BTreeSet::new(),
    }
}
