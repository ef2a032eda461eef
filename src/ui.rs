use std::io::{self, IsTerminal};

use time::UtcOffset;

use crate::app::{CareEntryView, NotificationItem, PlantLogView, PlantView, Session, Stats};
use crate::domain::care_type::CareType;
use crate::domain::timestamp::{day_label, format_rfc3339, to_datetime};
use crate::domain::watering::needs_care;
use crate::history::DayGroup;

pub fn print_plant_list(plants: &[PlantView], needing_care: usize, now: i64) {
    let palette = Palette::auto();
    println!("{}", palette.heading("Plants"));
    if plants.is_empty() {
        println!("{}", palette.dim("no plants yet"));
        return;
    }
    for plant in plants {
        println!("{}", format_plant_row(plant, now, &palette));
    }
    println!(
        "{}",
        palette.dim(&format!(
            "{} plant(s), {needing_care} need care",
            plants.len()
        ))
    );
}

pub fn print_plant_show(plant: &PlantView, now: i64, offset: UtcOffset) {
    let palette = Palette::auto();
    println!("{}", format_plant_row(plant, now, &palette));
    println!("  {}", plant.schedule);
    if let Some(location) = plant.location.as_deref() {
        println!("  location: {location}");
    }
    if let Some(notes) = plant.notes.as_deref() {
        println!("  notes: {notes}");
    }
    if let Some(photo) = plant.photo_uri.as_deref() {
        println!("  photo: {}", palette.dim(photo));
    }
    if let Some(at) = plant.last_watered_at {
        println!("  last watered: {}", format_rfc3339(at));
    }
    println!(
        "  {}",
        palette.dim(&format!("added {}", day_label(plant.created_at, offset)))
    );
}

fn format_plant_row(plant: &PlantView, now: i64, palette: &Palette) -> String {
    let label = plant.last_watered_label(now);
    let status = if needs_care(plant, now) {
        palette.warn(&format!("[{label}]"))
    } else {
        palette.ok(&format!("[{label}]"))
    };
    let mut line = format!(
        "{} {} {}",
        palette.id(&format!("#{}", plant.id)),
        plant.name,
        status
    );
    if let Some(frequency) = plant.watering_frequency.as_deref() {
        line.push(' ');
        line.push_str(&palette.dim(&format!("({frequency})")));
    }
    line
}

pub fn print_grouped_history(groups: &[DayGroup<CareEntryView>], offset: UtcOffset) {
    let palette = Palette::auto();
    println!("{}", palette.heading("Care history"));
    if groups.is_empty() {
        println!("{}", palette.dim("no care recorded"));
        return;
    }
    for group in groups {
        println!("{}", palette.day(&group.day));
        for entry in &group.entries {
            println!("  {}", format_care_entry(entry, offset, &palette));
        }
    }
}

pub fn print_history_entries(entries: &[CareEntryView], offset: UtcOffset) {
    let palette = Palette::auto();
    if entries.is_empty() {
        println!("{}", palette.dim("no care recorded"));
        return;
    }
    for entry in entries {
        println!(
            "{} {}",
            palette.dim(&day_label(entry.care_timestamp, offset)),
            format_care_entry(entry, offset, &palette)
        );
    }
}

fn format_care_entry(entry: &CareEntryView, offset: UtcOffset, palette: &Palette) -> String {
    let name = entry
        .plant_name
        .clone()
        .unwrap_or_else(|| format!("plant {}", entry.plant_id));
    format!(
        "{} {} {}",
        palette.dim(&clock_label(entry.care_timestamp, offset)),
        palette.care(entry.care_type),
        name
    )
}

fn clock_label(millis: i64, offset: UtcOffset) -> String {
    match to_datetime(millis, offset) {
        Some(ts) => format!("{:02}:{:02}", ts.hour(), ts.minute()),
        None => "--:--".to_string(),
    }
}

pub fn print_logs(title: &str, logs: &[PlantLogView], offset: UtcOffset) {
    let palette = Palette::auto();
    println!("{}", palette.heading(title));
    if logs.is_empty() {
        println!("{}", palette.dim("no logs"));
        return;
    }
    for log in logs {
        println!("{}", format_log_row(log, offset, &palette));
    }
}

pub fn print_log_show(log: &PlantLogView, offset: UtcOffset) {
    let palette = Palette::auto();
    println!("{}", format_log_row(log, offset, &palette));
    if let Some(photo) = log.photo_uri.as_deref() {
        println!("  photo: {photo}");
    }
    if let (Some(lat), Some(lon)) = (log.latitude, log.longitude) {
        println!("  at: {lat:.5}, {lon:.5}");
    }
}

fn format_log_row(log: &PlantLogView, offset: UtcOffset, palette: &Palette) -> String {
    let mut line = format!(
        "{} {} {}",
        palette.id(&format!("#{}", log.id)),
        palette.dim(&format!(
            "{} {}",
            day_label(log.created_at, offset),
            clock_label(log.created_at, offset)
        )),
        palette.dim(&format!("plant {}", log.plant_id)),
    );
    if log.photo_uri.is_some() {
        line.push_str(" [photo]");
    }
    if let Some(note) = log.note.as_deref() {
        line.push(' ');
        line.push_str(note);
    }
    line
}

pub fn print_notifications(items: &[NotificationItem], offset: UtcOffset) {
    let palette = Palette::auto();
    println!("{}", palette.heading("Notifications"));
    if items.is_empty() {
        println!("{}", palette.dim("nothing here"));
        return;
    }
    for item in items {
        let marker = if item.is_read {
            palette.dim(" ")
        } else {
            palette.warn("•")
        };
        println!(
            "{} {} {}: {}",
            marker,
            palette.dim(&day_label(item.timestamp, offset)),
            item.title,
            item.message
        );
    }
}

pub fn print_stats(stats: &Stats) {
    let palette = Palette::auto();
    println!("{}", palette.heading("Stats"));
    println!("  plants: {}", stats.plants);
    let needing = format!("{}", stats.needing_care);
    if stats.needing_care > 0 {
        println!("  needing care: {}", palette.warn(&needing));
    } else {
        println!("  needing care: {}", palette.ok(&needing));
    }
    println!("  waterings in the last 7 days: {}", stats.waterings_last_week);
    println!("  unread notifications: {}", stats.unread_notifications);
}

pub fn print_session(session: &Session) {
    match (session.logged_in, session.email.as_deref()) {
        (true, Some(email)) => match session.name.as_deref() {
            Some(name) => println!("{name} <{email}>"),
            None => println!("{email}"),
        },
        _ => println!("not logged in"),
    }
}

pub fn created_line(kind: &str, id: i64, label: &str) -> String {
    let palette = Palette::auto();
    format!("{kind} {} {label}", palette.id(&format!("#{id}")))
}

pub(crate) struct Palette {
    enabled: bool,
}

impl Palette {
    pub(crate) fn auto() -> Self {
        let enabled = std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal();
        Self { enabled }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    #[cfg(test)]
    pub(crate) fn plain() -> Self {
        Self { enabled: false }
    }

    pub(crate) fn heading(&self, text: &str) -> String {
        self.paint("1;36", text)
    }

    pub(crate) fn day(&self, text: &str) -> String {
        self.paint("1;33", text)
    }

    pub(crate) fn dim(&self, text: &str) -> String {
        self.paint("2", text)
    }

    fn id(&self, text: &str) -> String {
        self.paint("1;94", text)
    }

    pub(crate) fn ok(&self, text: &str) -> String {
        self.paint("32", text)
    }

    fn warn(&self, text: &str) -> String {
        self.paint("31", text)
    }

    fn care(&self, care_type: CareType) -> String {
        let upper = care_type.as_str().to_ascii_uppercase();
        self.paint(care_color_code(care_type), &format!("[{upper}]"))
    }
}

fn care_color_code(care_type: CareType) -> &'static str {
    match care_type {
        CareType::Water => "34",
        CareType::Fertilize => "33",
    }
}

#[cfg(test)]
mod tests {
    use super::{clock_label, format_care_entry, format_plant_row, Palette};
    use crate::app::{CareEntryView, PlantView};
    use crate::domain::care_type::CareType;
    use crate::domain::timestamp::{parse_rfc3339_millis, MILLIS_PER_DAY};
    use time::UtcOffset;

    fn plain() -> Palette {
        Palette::plain()
    }

    fn plant(last_watered_at: Option<i64>) -> PlantView {
        PlantView {
            id: 3,
            name: "Fern".to_string(),
            watering_frequency: Some("1x sehari".to_string()),
            watering_day: None,
            fertilizing_frequency: None,
            fertilizing_day: None,
            location: None,
            notes: None,
            photo_uri: None,
            last_watered_at,
            created_at: 0,
            schedule: "Water: 1x sehari".to_string(),
            interval_days: Some(1),
        }
    }

    #[test]
    fn plant_row_shows_id_name_label_and_frequency() {
        let now = parse_rfc3339_millis("2025-03-05T12:00:00Z").expect("ts");
        let row = format_plant_row(&plant(Some(now - 2 * MILLIS_PER_DAY)), now, &plain());
        assert_eq!(row, "#3 Fern [watered 2 days ago] (1x sehari)");
        let row = format_plant_row(&plant(None), now, &plain());
        assert_eq!(row, "#3 Fern [never watered] (1x sehari)");
    }

    #[test]
    fn care_entry_uses_local_clock_and_falls_back_to_plant_id() {
        let at = parse_rfc3339_millis("2025-03-05T23:30:00Z").expect("ts");
        let entry = CareEntryView {
            id: 1,
            plant_id: 9,
            plant_name: None,
            care_type: CareType::Fertilize,
            care_timestamp: at,
        };
        let jakarta = UtcOffset::from_hms(7, 0, 0).expect("offset");
        assert_eq!(
            format_care_entry(&entry, jakarta, &plain()),
            "06:30 [FERTILIZE] plant 9"
        );
        assert_eq!(clock_label(at, UtcOffset::UTC), "23:30");
    }

    #[test]
    fn palette_paints_only_when_enabled() {
        assert_eq!(plain().warn("x"), "x");
        let colored = Palette { enabled: true };
        assert!(colored.care(CareType::Water).contains("\x1b[34m"));
        assert!(colored.heading("h").ends_with("\x1b[0m"));
    }
}
