use std::cell::Cell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use rusqlite::Connection;
use serde::Serialize;
use time::UtcOffset;
use tracing::{debug, info, warn};

use crate::auth;
use crate::config::{ConfigError, LeafyConfig, SinkKind};
use crate::db::{
    self, CareHistoryRecord, InsertPlantLog, InsertUser, NotificationRecord, PlantLogRecord,
    PlantRecord, UpsertPlant,
};
use crate::domain::care_type::{CareType, ParseCareTypeError};
use crate::domain::schedule::{
    canonical_day, clean_day, clean_frequency, interval_days, schedule_summary,
};
use crate::domain::timestamp::{now_millis, MILLIS_PER_DAY};
use crate::domain::watering::{care_needed_count, needs_care, WateringSchedule};
use crate::history::{group_by_day, DayGroup, Timestamped};
use crate::live::{Observable, Revision};
use crate::notify::{
    Channel, DeepLink, NotificationSink, PlatformNotification, RemoteMessage, SilentSink,
    SinkError, TerminalSink,
};
use crate::prefs::{Preferences, PrefsError, PrefsStore};

pub const PREFS_FILE: &str = "prefs.toml";
const STATS_WINDOW_DAYS: i64 = 7;
/// Care may be logged this far ahead of the local clock.
const CARE_CLOCK_SKEW_MILLIS: i64 = 5 * 60 * 1000;

pub struct App {
    conn: Connection,
    prefs: PrefsStore,
    config: LeafyConfig,
    sink: Box<dyn NotificationSink>,
    revision: Cell<u64>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Session {
    pub logged_in: bool,
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlantView {
    pub id: i64,
    pub name: String,
    pub watering_frequency: Option<String>,
    pub watering_day: Option<String>,
    pub fertilizing_frequency: Option<String>,
    pub fertilizing_day: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub photo_uri: Option<String>,
    pub last_watered_at: Option<i64>,
    pub created_at: i64,
    pub schedule: String,
    pub interval_days: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct PlantInput {
    pub name: String,
    pub watering_frequency: Option<String>,
    pub watering_day: Option<String>,
    pub fertilizing_frequency: Option<String>,
    pub fertilizing_day: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub photo_uri: Option<String>,
}

/// Field edits for an existing plant. An empty string clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct PlantPatch {
    pub name: Option<String>,
    pub watering_frequency: Option<String>,
    pub watering_day: Option<String>,
    pub fertilizing_frequency: Option<String>,
    pub fertilizing_day: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub photo_uri: Option<String>,
}

impl PlantPatch {
    fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.watering_frequency.is_some()
            || self.watering_day.is_some()
            || self.fertilizing_frequency.is_some()
            || self.fertilizing_day.is_some()
            || self.location.is_some()
            || self.notes.is_some()
            || self.photo_uri.is_some()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CareEntryView {
    pub id: i64,
    pub plant_id: i64,
    pub plant_name: Option<String>,
    pub care_type: CareType,
    pub care_timestamp: i64,
}

#[derive(Debug, Clone, Default)]
pub struct PlantLogInput {
    pub plant_id: i64,
    pub photo_uri: Option<String>,
    pub note: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: Option<i64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlantLogView {
    pub id: i64,
    pub plant_id: i64,
    pub photo_uri: Option<String>,
    pub note: Option<String>,
    pub created_at: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NotificationItem {
    pub id: i64,
    pub title: String,
    pub message: String,
    pub timestamp: i64,
    pub is_read: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Stats {
    pub plants: usize,
    pub needing_care: usize,
    pub waterings_last_week: i64,
    pub unread_notifications: i64,
}

impl App {
    pub fn open(db_path: &str, data_dir: &Path, config: LeafyConfig) -> Result<Self, AppError> {
        ensure_parent_dir(db_path)?;
        let conn = db::open_connection(db_path)?;
        let sink: Box<dyn NotificationSink> = match config.notifications.sink {
            SinkKind::Terminal => Box::new(TerminalSink),
            SinkKind::Silent => Box::new(SilentSink),
        };
        debug!(db = db_path, data_dir = %data_dir.display(), "opened leafy store");
        Ok(Self {
            conn,
            prefs: PrefsStore::new(data_dir.join(PREFS_FILE)),
            config,
            sink,
            revision: Cell::new(0),
        })
    }

    #[cfg(test)]
    pub fn with_sink(mut self, sink: Box<dyn NotificationSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &LeafyConfig {
        &self.config
    }

    pub fn utc_offset(&self) -> UtcOffset {
        self.config.utc_offset()
    }

    fn touch(&self) {
        self.revision.set(self.revision.get().wrapping_add(1));
    }

    pub fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<UserView, AppError> {
        let name = name.trim();
        let email = auth::normalize_email(email);
        if name.is_empty() || email.is_empty() || password.is_empty() || confirm.is_empty() {
            return Err(AppError::InvalidArgument(
                "name, email, password and confirmation are required".to_string(),
            ));
        }
        if !auth::looks_like_email(&email) {
            return Err(AppError::InvalidArgument(format!(
                "'{email}' is not a valid email address"
            )));
        }
        if password != confirm {
            return Err(AppError::InvalidArgument(
                "password and confirmation do not match".to_string(),
            ));
        }
        if db::get_user_by_email(&self.conn, &email)?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "email '{email}' is already registered"
            )));
        }

        let salt = auth::new_salt();
        let password_hash = auth::hash_password(&salt, password);
        let created_at = now_millis();
        let id = db::insert_user(
            &self.conn,
            &InsertUser {
                name,
                email: &email,
                password_hash: &password_hash,
                salt: &salt,
                created_at,
            },
        )?;
        self.touch();
        info!(user_id = id, "registered user");
        Ok(UserView {
            id,
            name: name.to_string(),
            email,
            created_at,
        })
    }

    pub fn login(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let email = auth::normalize_email(email);
        let user = db::get_user_by_email(&self.conn, &email)?;
        let user = match user {
            Some(user) if auth::verify_password(&user.salt, password, &user.password_hash) => user,
            _ => {
                warn!("rejected login attempt");
                return Err(AppError::Unauthorized(
                    "invalid email or password".to_string(),
                ));
            }
        };
        let prefs = self.prefs.edit(|prefs| {
            prefs.user_email = Some(user.email.clone());
            prefs.user_name = Some(user.name.clone());
            prefs.is_logged_in = true;
        })?;
        info!(user_id = user.id, prefs = %self.prefs.path().display(), "logged in");
        Ok(Session::from(prefs))
    }

    pub fn logout(&self) -> Result<(), AppError> {
        self.prefs.clear()?;
        info!("logged out");
        Ok(())
    }

    pub fn session(&self) -> Result<Session, AppError> {
        Ok(Session::from(self.prefs.snapshot()?))
    }

    pub fn add_plant(&self, input: PlantInput) -> Result<PlantView, AppError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidArgument(
                "plant name is required".to_string(),
            ));
        }
        let watering_frequency = clean_frequency(input.watering_frequency.as_deref());
        let watering_day = checked_day(input.watering_day.as_deref())?;
        let fertilizing_frequency = clean_frequency(input.fertilizing_frequency.as_deref());
        let fertilizing_day = checked_day(input.fertilizing_day.as_deref())?;
        let location = input.location.as_deref().and_then(non_empty);
        let notes = input.notes.as_deref().and_then(non_empty);
        let photo_uri = input.photo_uri.as_deref().and_then(non_empty);

        let id = db::insert_plant(
            &self.conn,
            &UpsertPlant {
                name,
                watering_frequency: watering_frequency.as_deref(),
                watering_day: watering_day.as_deref(),
                fertilizing_frequency: fertilizing_frequency.as_deref(),
                fertilizing_day: fertilizing_day.as_deref(),
                location: location.as_deref(),
                notes: notes.as_deref(),
                photo_uri: photo_uri.as_deref(),
                last_watered_at: None,
                created_at: now_millis(),
            },
        )?;
        self.touch();
        info!(plant_id = id, "added plant");
        self.require_plant(id)
    }

    pub fn list_plants(&self) -> Result<Vec<PlantView>, AppError> {
        Ok(db::list_plants(&self.conn)?
            .into_iter()
            .map(PlantView::from)
            .collect())
    }

    pub fn show_plant(&self, id: i64) -> Result<Option<PlantView>, AppError> {
        Ok(db::get_plant(&self.conn, id)?.map(PlantView::from))
    }

    pub fn edit_plant(&self, id: i64, patch: PlantPatch) -> Result<PlantView, AppError> {
        if !patch.has_changes() {
            return Err(AppError::InvalidArgument(
                "edit requires at least one field change".to_string(),
            ));
        }
        let current = db::get_plant(&self.conn, id)?
            .ok_or_else(|| AppError::NotFound(format!("plant {id}")))?;

        let name = match patch.name.as_deref() {
            Some(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(AppError::InvalidArgument(
                        "plant name cannot be empty".to_string(),
                    ));
                }
                trimmed.to_string()
            }
            None => current.name.clone(),
        };
        let watering_frequency = match patch.watering_frequency.as_deref() {
            Some(raw) => clean_frequency(Some(raw)),
            None => current.watering_frequency.clone(),
        };
        let watering_day = match patch.watering_day.as_deref() {
            Some(raw) => checked_day(Some(raw))?,
            None => current.watering_day.clone(),
        };
        let fertilizing_frequency = match patch.fertilizing_frequency.as_deref() {
            Some(raw) => clean_frequency(Some(raw)),
            None => current.fertilizing_frequency.clone(),
        };
        let fertilizing_day = match patch.fertilizing_day.as_deref() {
            Some(raw) => checked_day(Some(raw))?,
            None => current.fertilizing_day.clone(),
        };
        let location = patched(patch.location.as_deref(), &current.location);
        let notes = patched(patch.notes.as_deref(), &current.notes);
        let photo_uri = patched(patch.photo_uri.as_deref(), &current.photo_uri);

        db::update_plant(
            &self.conn,
            id,
            &UpsertPlant {
                name: &name,
                watering_frequency: watering_frequency.as_deref(),
                watering_day: watering_day.as_deref(),
                fertilizing_frequency: fertilizing_frequency.as_deref(),
                fertilizing_day: fertilizing_day.as_deref(),
                location: location.as_deref(),
                notes: notes.as_deref(),
                photo_uri: photo_uri.as_deref(),
                last_watered_at: current.last_watered_at,
                created_at: current.created_at,
            },
        )?;
        self.touch();
        info!(plant_id = id, "edited plant");
        self.require_plant(id)
    }

    /// Deletes the plant and, through the foreign key, its logs.
    pub fn delete_plant(&self, id: i64) -> Result<PlantView, AppError> {
        let plant = self.require_plant(id)?;
        db::delete_plant(&self.conn, id)?;
        self.touch();
        info!(plant_id = id, "deleted plant");
        Ok(plant)
    }

    pub fn mark_cared(
        &self,
        plant_id: i64,
        care_type: CareType,
        at: Option<i64>,
    ) -> Result<CareEntryView, AppError> {
        let plant = self.require_plant(plant_id)?;
        let now = now_millis();
        let at = at.unwrap_or(now);
        if at > now + CARE_CLOCK_SKEW_MILLIS {
            return Err(AppError::InvalidArgument(
                "care time is in the future".to_string(),
            ));
        }

        if care_type == CareType::Water {
            let latest = plant.last_watered_at.map_or(at, |last| last.max(at));
            db::set_last_watered(&self.conn, plant_id, Some(latest))?;
        }
        let id = db::insert_care(&self.conn, plant_id, at, care_type.as_str())?;
        self.touch();
        info!(plant_id, care_type = care_type.as_str(), "recorded care event");

        self.notify(
            Channel::Updates,
            "Plant care",
            &format!("{} has been {}! 🌿", plant.name, care_type.past_tense()),
            DeepLink::Plant(plant_id),
        )?;

        Ok(CareEntryView {
            id,
            plant_id,
            plant_name: Some(plant.name),
            care_type,
            care_timestamp: at,
        })
    }

    /// Care events newest first, for one plant or all of them.
    /// Rows with an unreadable care type are skipped.
    pub fn history(&self, plant_id: Option<i64>) -> Result<Vec<CareEntryView>, AppError> {
        let names: HashMap<i64, String> = db::list_plants(&self.conn)?
            .into_iter()
            .map(|plant| (plant.id, plant.name))
            .collect();
        Ok(db::list_history(&self.conn, plant_id)?
            .into_iter()
            .filter_map(|record| {
                let id = record.id;
                let plant_name = names.get(&record.plant_id).cloned();
                match CareEntryView::from_record(record, plant_name) {
                    Ok(entry) => Some(entry),
                    Err(err) => {
                        warn!(care_id = id, error = %err, "skipping unreadable care entry");
                        None
                    }
                }
            })
            .collect())
    }

    pub fn grouped_history(
        &self,
        plant_id: Option<i64>,
    ) -> Result<Vec<DayGroup<CareEntryView>>, AppError> {
        Ok(group_by_day(self.history(plant_id)?, self.utc_offset()))
    }

    /// Deletes every care event of the plant and clears its last-watered time.
    /// History left behind by a deleted plant can be reset too.
    pub fn reset_history(&self, plant_id: i64) -> Result<usize, AppError> {
        let plant = self.show_plant(plant_id)?;
        let removed = db::delete_history_for_plant(&self.conn, plant_id)?;
        let Some(plant) = plant else {
            if removed == 0 {
                return Err(AppError::NotFound(format!("plant {plant_id}")));
            }
            self.touch();
            info!(plant_id, removed, "reset care history of deleted plant");
            return Ok(removed);
        };
        db::set_last_watered(&self.conn, plant_id, None)?;
        self.touch();
        info!(plant_id, removed, "reset care history");
        self.notify(
            Channel::Updates,
            "History reset",
            &format!("Care history for {} was cleared", plant.name),
            DeepLink::History(plant_id),
        )?;
        Ok(removed)
    }

    pub fn prune_history(&self, older_than_days: u32, now: i64) -> Result<usize, AppError> {
        let cutoff = now - i64::from(older_than_days) * MILLIS_PER_DAY;
        let removed = db::delete_history_before(&self.conn, cutoff)?;
        self.touch();
        info!(removed, older_than_days, "pruned care history");
        Ok(removed)
    }

    pub fn add_log(&self, input: PlantLogInput) -> Result<PlantLogView, AppError> {
        self.require_plant(input.plant_id)?;
        let photo_uri = input.photo_uri.as_deref().and_then(non_empty);
        let note = input.note.as_deref().and_then(non_empty);
        if photo_uri.is_none() && note.is_none() {
            return Err(AppError::InvalidArgument(
                "a log needs a photo or a note".to_string(),
            ));
        }
        validate_coordinates(input.latitude, input.longitude)?;

        let id = db::insert_log(
            &self.conn,
            &InsertPlantLog {
                plant_id: input.plant_id,
                photo_uri: photo_uri.as_deref(),
                note: note.as_deref(),
                created_at: input.created_at.unwrap_or_else(now_millis),
                latitude: input.latitude,
                longitude: input.longitude,
            },
        )?;
        self.touch();
        info!(log_id = id, plant_id = input.plant_id, "added plant log");
        self.show_log(id)?
            .ok_or_else(|| AppError::NotFound(format!("log {id}")))
    }

    pub fn list_logs(&self, plant_id: Option<i64>) -> Result<Vec<PlantLogView>, AppError> {
        Ok(db::list_logs(&self.conn, plant_id)?
            .into_iter()
            .map(PlantLogView::from)
            .collect())
    }

    pub fn show_log(&self, id: i64) -> Result<Option<PlantLogView>, AppError> {
        Ok(db::get_log(&self.conn, id)?.map(PlantLogView::from))
    }

    pub fn delete_log(&self, id: i64) -> Result<PlantLogView, AppError> {
        let log = self
            .show_log(id)?
            .ok_or_else(|| AppError::NotFound(format!("log {id}")))?;
        db::delete_log(&self.conn, id)?;
        self.touch();
        info!(log_id = id, "deleted plant log");
        Ok(log)
    }

    /// Logs that carry a photo, newest first.
    pub fn gallery(&self, plant_id: Option<i64>) -> Result<Vec<PlantLogView>, AppError> {
        Ok(self
            .list_logs(plant_id)?
            .into_iter()
            .filter(|log| log.photo_uri.is_some())
            .collect())
    }

    /// Posts a notification to the sink and records it.
    pub fn notify(
        &self,
        channel: Channel,
        title: &str,
        message: &str,
        deep_link: DeepLink,
    ) -> Result<NotificationItem, AppError> {
        let notification = PlatformNotification::new(channel, title, message, deep_link);
        self.post(&notification)
    }

    fn post(&self, notification: &PlatformNotification) -> Result<NotificationItem, AppError> {
        self.sink.post(notification)?;
        let timestamp = now_millis();
        let id = db::insert_notification(
            &self.conn,
            &notification.title,
            &notification.body,
            timestamp,
        )?;
        self.touch();
        debug!(
            notification_id = id,
            channel = notification.channel.id(),
            "posted notification"
        );
        Ok(NotificationItem {
            id,
            title: notification.title.clone(),
            message: notification.body.clone(),
            timestamp,
            is_read: false,
        })
    }

    pub fn list_notifications(&self, unread_only: bool) -> Result<Vec<NotificationItem>, AppError> {
        Ok(db::list_notifications(&self.conn, unread_only)?
            .into_iter()
            .map(NotificationItem::from)
            .collect())
    }

    pub fn unread_count(&self) -> Result<i64, AppError> {
        Ok(db::unread_count(&self.conn)?)
    }

    pub fn mark_all_read(&self) -> Result<usize, AppError> {
        let updated = db::mark_all_read(&self.conn)?;
        if updated > 0 {
            self.touch();
        }
        info!(updated, "marked notifications read");
        Ok(updated)
    }

    /// Translates an inbound push message into a local notification.
    pub fn receive_push(&self, raw: &str) -> Result<Option<NotificationItem>, AppError> {
        let message = RemoteMessage::parse(raw)?;
        match message.to_local() {
            Some(notification) => Ok(Some(self.post(&notification)?)),
            None => {
                warn!("push message has no notification payload, ignoring");
                Ok(None)
            }
        }
    }

    pub fn send_care_reminders(&self, now: i64) -> Result<Vec<NotificationItem>, AppError> {
        if !self.config.notifications.reminders {
            info!("care reminders disabled by config");
            return Ok(Vec::new());
        }
        let mut posted = Vec::new();
        for plant in self.list_plants()? {
            if !needs_care(&plant, now) {
                continue;
            }
            posted.push(self.notify(
                Channel::Reminders,
                "Time to water",
                &format!("{} needs watering ({})", plant.name, plant.last_watered_label(now)),
                DeepLink::Plant(plant.id),
            )?);
        }
        Ok(posted)
    }

    pub fn stats(&self, now: i64) -> Result<Stats, AppError> {
        let plants = self.list_plants()?;
        let since = now - STATS_WINDOW_DAYS * MILLIS_PER_DAY;
        Ok(Stats {
            plants: plants.len(),
            needing_care: care_needed_count(&plants, now),
            waterings_last_week: db::count_care_since(&self.conn, CareType::Water.as_str(), since)?,
            unread_notifications: db::unread_count(&self.conn)?,
        })
    }

    fn require_plant(&self, id: i64) -> Result<PlantView, AppError> {
        self.show_plant(id)?
            .ok_or_else(|| AppError::NotFound(format!("plant {id}")))
    }
}

impl Observable for App {
    type Error = AppError;

    fn revision(&self) -> Result<Revision, AppError> {
        Ok(Revision {
            local: self.revision.get(),
            external: db::data_version(&self.conn)?,
        })
    }
}

impl PlantView {
    pub fn last_watered_label(&self, now: i64) -> String {
        crate::domain::watering::last_watered_label(self.last_watered_at, now)
    }
}

impl WateringSchedule for PlantView {
    fn watering_frequency(&self) -> Option<&str> {
        self.watering_frequency.as_deref()
    }

    fn last_watered_at(&self) -> Option<i64> {
        self.last_watered_at
    }
}

impl Timestamped for CareEntryView {
    fn timestamp_millis(&self) -> i64 {
        self.care_timestamp
    }
}

impl CareEntryView {
    fn from_record(record: CareHistoryRecord, plant_name: Option<String>) -> Result<Self, AppError> {
        Ok(Self {
            id: record.id,
            plant_id: record.plant_id,
            plant_name,
            care_type: CareType::from_str(&record.care_type)?,
            care_timestamp: record.care_timestamp,
        })
    }
}

fn ensure_parent_dir(path: &str) -> Result<(), AppError> {
    if let Some(parent) = Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn patched(raw: Option<&str>, current: &Option<String>) -> Option<String> {
    match raw {
        Some(raw) => non_empty(raw),
        None => current.clone(),
    }
}

fn checked_day(raw: Option<&str>) -> Result<Option<String>, AppError> {
    match clean_day(raw) {
        None => Ok(None),
        Some(day) => canonical_day(&day)
            .map(|canonical| Some(canonical.to_string()))
            .ok_or_else(|| {
                AppError::InvalidArgument(format!(
                    "unknown day '{day}'; use one of Senin, Selasa, Rabu, Kamis, Jumat, Sabtu, Minggu"
                ))
            }),
    }
}

fn validate_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), AppError> {
    match (latitude, longitude) {
        (None, None) => Ok(()),
        (Some(lat), Some(lon)) => {
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                return Err(AppError::InvalidArgument(format!(
                    "coordinates out of range: {lat}, {lon}"
                )));
            }
            Ok(())
        }
        _ => Err(AppError::InvalidArgument(
            "latitude and longitude must be given together".to_string(),
        )),
    }
}

impl From<Preferences> for Session {
    fn from(value: Preferences) -> Self {
        Self {
            logged_in: value.is_logged_in,
            email: value.user_email,
            name: value.user_name,
        }
    }
}

impl From<PlantRecord> for PlantView {
    fn from(value: PlantRecord) -> Self {
        let schedule = schedule_summary(
            value.watering_frequency.as_deref(),
            value.watering_day.as_deref(),
            value.fertilizing_frequency.as_deref(),
            value.fertilizing_day.as_deref(),
        );
        let interval_days = value.watering_frequency.as_deref().and_then(interval_days);
        Self {
            id: value.id,
            name: value.name,
            watering_frequency: value.watering_frequency,
            watering_day: value.watering_day,
            fertilizing_frequency: value.fertilizing_frequency,
            fertilizing_day: value.fertilizing_day,
            location: value.location,
            notes: value.notes,
            photo_uri: value.photo_uri,
            last_watered_at: value.last_watered_at,
            created_at: value.created_at,
            schedule,
            interval_days,
        }
    }
}

impl From<PlantLogRecord> for PlantLogView {
    fn from(value: PlantLogRecord) -> Self {
        Self {
            id: value.id,
            plant_id: value.plant_id,
            photo_uri: value.photo_uri,
            note: value.note,
            created_at: value.created_at,
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

impl From<NotificationRecord> for NotificationItem {
    fn from(value: NotificationRecord) -> Self {
        Self {
            id: value.id,
            title: value.title,
            message: value.message,
            timestamp: value.timestamp,
            is_read: value.is_read,
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    Io(std::io::Error),
    Db(rusqlite::Error),
    Config(ConfigError),
    Prefs(PrefsError),
    Sink(SinkError),
    Json(serde_json::Error),
    ParseCareType(ParseCareTypeError),
    InvalidArgument(String),
    NotFound(String),
    AlreadyExists(String),
    Unauthorized(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(err) => write!(f, "I/O error: {}", err),
            AppError::Db(err) => write!(f, "database error: {}", err),
            AppError::Config(err) => write!(f, "{}", err),
            AppError::Prefs(err) => write!(f, "{}", err),
            AppError::Sink(err) => write!(f, "{}", err),
            AppError::Json(err) => write!(f, "invalid JSON: {}", err),
            AppError::ParseCareType(err) => write!(f, "{}", err),
            AppError::InvalidArgument(message) => write!(f, "{}", message),
            AppError::NotFound(what) => write!(f, "{} not found", what),
            AppError::AlreadyExists(message) => write!(f, "{}", message),
            AppError::Unauthorized(message) => write!(f, "{}", message),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Io(err) => Some(err),
            AppError::Db(err) => Some(err),
            AppError::Config(err) => Some(err),
            AppError::Prefs(err) => Some(err),
            AppError::Sink(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::ParseCareType(err) => Some(err),
            AppError::InvalidArgument(_)
            | AppError::NotFound(_)
            | AppError::AlreadyExists(_)
            | AppError::Unauthorized(_) => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(value: rusqlite::Error) -> Self {
        AppError::Db(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<PrefsError> for AppError {
    fn from(value: PrefsError) -> Self {
        AppError::Prefs(value)
    }
}

impl From<SinkError> for AppError {
    fn from(value: SinkError) -> Self {
        AppError::Sink(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        AppError::Json(value)
    }
}

impl From<ParseCareTypeError> for AppError {
    fn from(value: ParseCareTypeError) -> Self {
        AppError::ParseCareType(value)
    }
}
