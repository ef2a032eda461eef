use serde::Serialize;
use time::UtcOffset;

use crate::domain::timestamp::day_label;

/// Anything that happened at a point in time.
pub trait Timestamped {
    fn timestamp_millis(&self) -> i64;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayGroup<T> {
    pub day: String,
    pub entries: Vec<T>,
}

/// Buckets entries by calendar day in `offset`.
///
/// Groups keep the order in which their day first appears in `entries`, so a
/// newest-first input yields newest days first. Inside a group entries are
/// ordered newest first.
pub fn group_by_day<T>(entries: Vec<T>, offset: UtcOffset) -> Vec<DayGroup<T>>
where
    T: Timestamped,
{
    let mut groups: Vec<DayGroup<T>> = Vec::new();
    for entry in entries {
        let day = day_label(entry.timestamp_millis(), offset);
        match groups.iter_mut().find(|group| group.day == day) {
            Some(group) => group.entries.push(entry),
            None => groups.push(DayGroup {
                day,
                entries: vec![entry],
            }),
        }
    }
    for group in &mut groups {
        group
            .entries
            .sort_by_key(|entry| std::cmp::Reverse(entry.timestamp_millis()));
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::{group_by_day, Timestamped};
    use crate::domain::timestamp::parse_rfc3339_millis;
    use time::UtcOffset;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Event(&'static str, i64);

    impl Timestamped for Event {
        fn timestamp_millis(&self) -> i64 {
            self.1
        }
    }

    fn at(raw: &str) -> i64 {
        parse_rfc3339_millis(raw).expect("fixture timestamp should parse")
    }

    #[test]
    fn same_calendar_day_lands_in_one_group_newest_first() {
        let events = vec![
            Event("morning", at("2025-03-05T07:00:00Z")),
            Event("evening", at("2025-03-05T19:00:00Z")),
            Event("noon", at("2025-03-05T12:00:00Z")),
        ];
        let groups = group_by_day(events, UtcOffset::UTC);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].day, "05 March 2025");
        let names: Vec<&str> = groups[0].entries.iter().map(|event| event.0).collect();
        assert_eq!(names, vec!["evening", "noon", "morning"]);
    }

    #[test]
    fn groups_follow_first_occurrence_order() {
        let events = vec![
            Event("c", at("2025-03-07T08:00:00Z")),
            Event("b", at("2025-03-06T08:00:00Z")),
            Event("a", at("2025-03-05T08:00:00Z")),
        ];
        let groups = group_by_day(events, UtcOffset::UTC);
        let days: Vec<&str> = groups.iter().map(|group| group.day.as_str()).collect();
        assert_eq!(days, vec!["07 March 2025", "06 March 2025", "05 March 2025"]);
    }

    #[test]
    fn offset_moves_late_events_to_next_day() {
        let events = vec![
            Event("late", at("2025-03-05T23:30:00Z")),
            Event("early", at("2025-03-05T01:00:00Z")),
        ];
        let jakarta = UtcOffset::from_hms(7, 0, 0).expect("valid offset");
        let groups = group_by_day(events, jakarta);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].day, "06 March 2025");
        assert_eq!(groups[1].day, "05 March 2025");
    }

    #[test]
    fn empty_input_has_no_groups() {
        let groups = group_by_day(Vec::<Event>::new(), UtcOffset::UTC);
        assert!(groups.is_empty());
    }
}
