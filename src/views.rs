//! Observable screen state built from [`LiveQuery`] over the [`App`].

use std::time::Duration;

use crate::app::{App, AppError, CareEntryView, NotificationItem, PlantView};
use crate::domain::watering::care_needed_count;
use crate::history::{group_by_day, DayGroup};
use crate::live::{LiveQuery, Subscription};

pub struct HomeState {
    pub plants: LiveQuery<App, Vec<PlantView>>,
    pub unread_count: LiveQuery<App, i64>,
}

impl HomeState {
    pub fn new(linger: Duration) -> Self {
        Self {
            plants: LiveQuery::new("plants", Vec::new(), linger, App::list_plants),
            unread_count: LiveQuery::new("unread_count", 0, linger, App::unread_count),
        }
    }

    pub fn subscribe(&self) -> [Subscription; 2] {
        [self.plants.subscribe(), self.unread_count.subscribe()]
    }

    pub fn care_needed(&self, app: &App, now: i64) -> Result<usize, AppError> {
        let plants = self.plants.read(app)?;
        Ok(care_needed_count(&plants, now))
    }
}

pub struct CareHistoryState {
    plant_id: Option<i64>,
    pub entries: LiveQuery<App, Vec<CareEntryView>>,
    pub grouped: LiveQuery<App, Vec<DayGroup<CareEntryView>>>,
}

impl CareHistoryState {
    pub fn new(plant_id: Option<i64>, linger: Duration) -> Self {
        Self {
            plant_id,
            entries: LiveQuery::new("history", Vec::new(), linger, move |app: &App| {
                app.history(plant_id)
            }),
            grouped: LiveQuery::new("grouped_history", Vec::new(), linger, move |app: &App| {
                Ok(group_by_day(app.history(plant_id)?, app.utc_offset()))
            }),
        }
    }

    pub fn subscribe(&self) -> [Subscription; 2] {
        [self.entries.subscribe(), self.grouped.subscribe()]
    }

    /// Irreversible. Callers confirm with the user first.
    pub fn reset_history(&self, app: &App) -> Result<usize, AppError> {
        let plant_id = self.plant_id.ok_or_else(|| {
            AppError::InvalidArgument("reset needs a specific plant".to_string())
        })?;
        app.reset_history(plant_id)
    }
}

pub struct NotificationState {
    pub notifications: LiveQuery<App, Vec<NotificationItem>>,
    pub unread_count: LiveQuery<App, i64>,
}

impl NotificationState {
    pub fn new(linger: Duration) -> Self {
        Self {
            notifications: LiveQuery::new("notifications", Vec::new(), linger, |app: &App| {
                app.list_notifications(false)
            }),
            unread_count: LiveQuery::new("unread_count", 0, linger, App::unread_count),
        }
    }

    pub fn subscribe(&self) -> [Subscription; 2] {
        [self.notifications.subscribe(), self.unread_count.subscribe()]
    }

    pub fn mark_all_read(&self, app: &App) -> Result<usize, AppError> {
        app.mark_all_read()
    }
}
