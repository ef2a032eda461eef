use super::schedule::interval_days;
use super::timestamp::MILLIS_PER_DAY;

/// Anything carrying a watering schedule and the time it was last watered.
pub trait WateringSchedule {
    fn watering_frequency(&self) -> Option<&str>;
    fn last_watered_at(&self) -> Option<i64>;
}

/// Whole days between `last` and `now`, floored. Future timestamps count as zero.
pub fn elapsed_days(last: i64, now: i64) -> i64 {
    now.saturating_sub(last).max(0) / MILLIS_PER_DAY
}

pub fn last_watered_label(last: Option<i64>, now: i64) -> String {
    match last.map(|last| elapsed_days(last, now)) {
        None => "never watered".to_string(),
        Some(0) => "watered today".to_string(),
        Some(1) => "watered 1 day ago".to_string(),
        Some(days) => format!("watered {days} days ago"),
    }
}

pub fn needs_care(plant: &impl WateringSchedule, now: i64) -> bool {
    let Some(last) = plant.last_watered_at() else {
        return true;
    };
    let Some(interval) = plant.watering_frequency().and_then(interval_days) else {
        return true;
    };
    elapsed_days(last, now) >= i64::from(interval)
}

pub fn care_needed_count<'a, P>(plants: impl IntoIterator<Item = &'a P>, now: i64) -> usize
where
    P: WateringSchedule + 'a,
{
    plants
        .into_iter()
        .filter(|plant| needs_care(*plant, now))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stub {
        frequency: Option<&'static str>,
        last: Option<i64>,
    }

    impl WateringSchedule for Stub {
        fn watering_frequency(&self) -> Option<&str> {
            self.frequency
        }

        fn last_watered_at(&self) -> Option<i64> {
            self.last
        }
    }

    const NOW: i64 = 1_741_161_600_000;

    #[test]
    fn label_for_now_and_exactly_one_day_earlier() {
        assert_eq!(last_watered_label(Some(NOW), NOW), "watered today");
        assert_eq!(
            last_watered_label(Some(NOW - MILLIS_PER_DAY), NOW),
            "watered 1 day ago"
        );
        assert_eq!(
            last_watered_label(Some(NOW - 3 * MILLIS_PER_DAY - 1), NOW),
            "watered 3 days ago"
        );
        assert_eq!(last_watered_label(None, NOW), "never watered");
    }

    #[test]
    fn elapsed_days_floors_partial_days() {
        assert_eq!(elapsed_days(NOW - MILLIS_PER_DAY + 1, NOW), 0);
        assert_eq!(elapsed_days(NOW + MILLIS_PER_DAY, NOW), 0);
        assert_eq!(elapsed_days(NOW - 8 * MILLIS_PER_DAY, NOW), 8);
    }

    #[test]
    fn counts_plants_due_for_care() {
        let plants = [
            Stub {
                frequency: Some("1x sehari"),
                last: Some(NOW - MILLIS_PER_DAY),
            },
            Stub {
                frequency: Some("1x seminggu"),
                last: Some(NOW - 2 * MILLIS_PER_DAY),
            },
            Stub {
                frequency: Some("1x seminggu"),
                last: None,
            },
            Stub {
                frequency: None,
                last: Some(NOW),
            },
            Stub {
                frequency: Some("2x sehari"),
                last: Some(NOW),
            },
        ];
        assert_eq!(care_needed_count(&plants, NOW), 3);
    }
}
