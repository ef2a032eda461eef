use tracing::warn;

pub const FREQUENCY_PLACEHOLDER: &str = "Pilih Waktu";
pub const ONCE_DAILY: &str = "1x sehari";
pub const TWICE_DAILY: &str = "2x sehari";
pub const ONCE_WEEKLY: &str = "1x seminggu";

pub const FREQUENCY_OPTIONS: [&str; 3] = [ONCE_DAILY, TWICE_DAILY, ONCE_WEEKLY];

pub const DAY_PLACEHOLDER: &str = "Pilih Hari";

pub const DAY_OPTIONS: [&str; 7] = [
    "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu",
];

/// Days between expected waterings for a frequency label.
///
/// Returns `None` for the placeholder or a blank label. Labels outside the
/// known set fall back to a one-day interval.
pub fn interval_days(label: &str) -> Option<u32> {
    let trimmed = label.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(FREQUENCY_PLACEHOLDER) {
        return None;
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "1x sehari" | "2x sehari" => Some(1),
        "1x seminggu" => Some(7),
        other => {
            warn!(
                label = other,
                known = ?FREQUENCY_OPTIONS,
                "unrecognized watering frequency, assuming daily"
            );
            Some(1)
        }
    }
}

/// Strips placeholder selections so they are stored as absent.
pub fn clean_frequency(raw: Option<&str>) -> Option<String> {
    clean_option(raw, FREQUENCY_PLACEHOLDER)
}

pub fn clean_day(raw: Option<&str>) -> Option<String> {
    clean_option(raw, DAY_PLACEHOLDER)
}

/// Canonical spelling of a weekday option, matched case-insensitively.
pub fn canonical_day(raw: &str) -> Option<&'static str> {
    let trimmed = raw.trim();
    DAY_OPTIONS
        .iter()
        .copied()
        .find(|day| day.eq_ignore_ascii_case(trimmed))
}

fn clean_option(raw: Option<&str>, placeholder: &str) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(placeholder) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// One-line schedule text such as `Water: 1x sehari Senin | Fertilize: 1x seminggu`.
pub fn schedule_summary(
    watering_frequency: Option<&str>,
    watering_day: Option<&str>,
    fertilizing_frequency: Option<&str>,
    fertilizing_day: Option<&str>,
) -> String {
    let watering = schedule_part(watering_frequency, watering_day);
    let mut summary = format!("Water: {}", watering.as_deref().unwrap_or("-"));
    if let Some(fertilizing) = schedule_part(fertilizing_frequency, fertilizing_day) {
        summary.push_str(" | Fertilize: ");
        summary.push_str(&fertilizing);
    }
    summary
}

fn schedule_part(frequency: Option<&str>, day: Option<&str>) -> Option<String> {
    let frequency = frequency.map(str::trim).filter(|value| !value.is_empty());
    let day = day.map(str::trim).filter(|value| !value.is_empty());
    match (frequency, day) {
        (None, None) => None,
        (Some(frequency), None) => Some(frequency.to_string()),
        (None, Some(day)) => Some(format!("- {day}")),
        (Some(frequency), Some(day)) => Some(format!("{frequency} {day}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_covers_fixed_label_set() {
        assert_eq!(interval_days(ONCE_DAILY), Some(1));
        assert_eq!(interval_days(TWICE_DAILY), Some(1));
        assert_eq!(interval_days(ONCE_WEEKLY), Some(7));
    }

    #[test]
    fn interval_is_unknown_for_placeholder_and_blank() {
        assert_eq!(interval_days(FREQUENCY_PLACEHOLDER), None);
        assert_eq!(interval_days(""), None);
        assert_eq!(interval_days("   "), None);
    }

    #[test]
    fn interval_falls_back_to_daily_for_unrecognized_labels() {
        assert_eq!(interval_days("every full moon"), Some(1));
    }

    #[test]
    fn clean_helpers_drop_placeholders() {
        assert_eq!(clean_frequency(Some("Pilih Waktu")), None);
        assert_eq!(clean_frequency(Some(" 1x sehari ")), Some("1x sehari".to_string()));
        assert_eq!(clean_day(Some("pilih hari")), None);
        assert_eq!(clean_day(None), None);
        assert_eq!(canonical_day("sabtu"), Some("Sabtu"));
        assert_eq!(canonical_day("Saturday"), None);
    }

    #[test]
    fn summary_mentions_fertilizing_only_when_present() {
        assert_eq!(
            schedule_summary(Some("1x sehari"), Some("Senin"), None, None),
            "Water: 1x sehari Senin"
        );
        assert_eq!(
            schedule_summary(None, None, Some("1x seminggu"), None),
            "Water: - | Fertilize: 1x seminggu"
        );
        assert_eq!(
            schedule_summary(Some("2x sehari"), None, None, Some("Rabu")),
            "Water: 2x sehari | Fertilize: - Rabu"
        );
    }
}
