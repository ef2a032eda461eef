use std::time::Duration;

use rusqlite::{params, Connection, DatabaseName, OptionalExtension, Result, Row};

pub const CURRENT_SCHEMA_VERSION: i64 = 5;

const TABLES: [&str; 6] = [
    "plant_logs",
    "care_history",
    "notifications",
    "plants",
    "users",
    "meta",
];

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    salt TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS plants (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    watering_frequency TEXT,
    watering_day TEXT,
    fertilizing_frequency TEXT,
    fertilizing_day TEXT,
    location TEXT,
    notes TEXT,
    photo_uri TEXT,
    last_watered_at INTEGER,
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS plant_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    plant_id INTEGER NOT NULL REFERENCES plants(id) ON DELETE CASCADE,
    photo_uri TEXT,
    note TEXT,
    created_at INTEGER NOT NULL,
    latitude REAL,
    longitude REAL
);

CREATE TABLE IF NOT EXISTS care_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    plant_id INTEGER NOT NULL,
    care_timestamp INTEGER NOT NULL,
    care_type TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS notifications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    message TEXT NOT NULL,
    timestamp INTEGER NOT NULL,
    is_read INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_plant_logs_plant_id ON plant_logs(plant_id);
CREATE INDEX IF NOT EXISTS idx_care_history_plant_ts ON care_history(plant_id, care_timestamp);
CREATE INDEX IF NOT EXISTS idx_notifications_is_read ON notifications(is_read);
"#;

pub fn open_connection(path: &str) -> Result<Connection> {
    let mut conn = Connection::open(path)?;
    configure_for_speed(&conn)?;
    apply_schema(&mut conn)?;
    Ok(conn)
}

fn configure_for_speed(conn: &Connection) -> Result<()> {
    conn.pragma_update(None::<DatabaseName>, "journal_mode", "WAL")?;
    conn.pragma_update(None::<DatabaseName>, "synchronous", "NORMAL")?;
    conn.pragma_update(None::<DatabaseName>, "foreign_keys", "ON")?;
    conn.pragma_update(None::<DatabaseName>, "temp_store", "MEMORY")?;
    conn.pragma_update(None::<DatabaseName>, "busy_timeout", 5000i64)?;
    conn.busy_timeout(Duration::from_millis(5000))?;
    Ok(())
}

/// Creates the schema, dropping every table first when the stored version
/// differs from [`CURRENT_SCHEMA_VERSION`]. No data survives a version bump.
fn apply_schema(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    let stored = stored_schema_version(&tx)?;
    if let Some(version) = stored {
        if version != CURRENT_SCHEMA_VERSION {
            tracing::warn!(
                from = version,
                to = CURRENT_SCHEMA_VERSION,
                "schema version mismatch, recreating database"
            );
            for table in TABLES {
                tx.execute_batch(&format!("DROP TABLE IF EXISTS {table};"))?;
            }
        }
    }

    tx.execute_batch(SCHEMA_SQL)?;
    tx.execute(
        r#"
INSERT INTO meta (key, value)
VALUES ('schema_version', ?1)
ON CONFLICT(key) DO UPDATE SET value = excluded.value
"#,
        params![CURRENT_SCHEMA_VERSION.to_string()],
    )?;
    tx.commit()
}

fn stored_schema_version(conn: &Connection) -> Result<Option<i64>> {
    let has_meta: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='meta')",
        [],
        |row| row.get(0),
    )?;
    if !has_meta {
        return Ok(None);
    }
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM meta WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .optional()?;
    // An unparsable version is treated as a mismatch.
    Ok(raw.map(|value| value.parse().unwrap_or(-1)))
}

/// Changes whenever another connection commits to the database file.
pub fn data_version(conn: &Connection) -> Result<i64> {
    conn.query_row("PRAGMA data_version", [], |row| row.get(0))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub salt: String,
    pub created_at: i64,
}

pub struct InsertUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub salt: &'a str,
    pub created_at: i64,
}

pub fn insert_user(conn: &Connection, args: &InsertUser<'_>) -> Result<i64> {
    conn.execute(
        r#"
INSERT INTO users (name, email, password_hash, salt, created_at)
VALUES (?1, ?2, ?3, ?4, ?5)
"#,
        params![
            args.name,
            args.email,
            args.password_hash,
            args.salt,
            args.created_at
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_user_by_email(conn: &Connection, email: &str) -> Result<Option<UserRecord>> {
    conn.query_row(
        r#"
SELECT id, name, email, password_hash, salt, created_at
FROM users
WHERE email = ?1
"#,
        params![email],
        |row| {
            Ok(UserRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                password_hash: row.get(3)?,
                salt: row.get(4)?,
                created_at: row.get(5)?,
            })
        },
    )
    .optional()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlantRecord {
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
}

pub struct UpsertPlant<'a> {
    pub name: &'a str,
    pub watering_frequency: Option<&'a str>,
    pub watering_day: Option<&'a str>,
    pub fertilizing_frequency: Option<&'a str>,
    pub fertilizing_day: Option<&'a str>,
    pub location: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub photo_uri: Option<&'a str>,
    pub last_watered_at: Option<i64>,
    pub created_at: i64,
}

const PLANT_COLUMNS: &str = "id, name, watering_frequency, watering_day, fertilizing_frequency, \
     fertilizing_day, location, notes, photo_uri, last_watered_at, created_at";

fn plant_from_row(row: &Row<'_>) -> Result<PlantRecord> {
    Ok(PlantRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        watering_frequency: row.get(2)?,
        watering_day: row.get(3)?,
        fertilizing_frequency: row.get(4)?,
        fertilizing_day: row.get(5)?,
        location: row.get(6)?,
        notes: row.get(7)?,
        photo_uri: row.get(8)?,
        last_watered_at: row.get(9)?,
        created_at: row.get(10)?,
    })
}

pub fn insert_plant(conn: &Connection, args: &UpsertPlant<'_>) -> Result<i64> {
    conn.execute(
        r#"
INSERT INTO plants (
    name, watering_frequency, watering_day, fertilizing_frequency, fertilizing_day,
    location, notes, photo_uri, last_watered_at, created_at
)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
"#,
        params![
            args.name,
            args.watering_frequency,
            args.watering_day,
            args.fertilizing_frequency,
            args.fertilizing_day,
            args.location,
            args.notes,
            args.photo_uri,
            args.last_watered_at,
            args.created_at
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrites every mutable column of an existing plant. Returns the number of
/// rows touched, zero when the id is unknown.
pub fn update_plant(conn: &Connection, id: i64, args: &UpsertPlant<'_>) -> Result<usize> {
    conn.execute(
        r#"
UPDATE plants SET
    name = ?2,
    watering_frequency = ?3,
    watering_day = ?4,
    fertilizing_frequency = ?5,
    fertilizing_day = ?6,
    location = ?7,
    notes = ?8,
    photo_uri = ?9,
    last_watered_at = ?10
WHERE id = ?1
"#,
        params![
            id,
            args.name,
            args.watering_frequency,
            args.watering_day,
            args.fertilizing_frequency,
            args.fertilizing_day,
            args.location,
            args.notes,
            args.photo_uri,
            args.last_watered_at
        ],
    )
}

pub fn set_last_watered(conn: &Connection, id: i64, at: Option<i64>) -> Result<usize> {
    conn.execute(
        "UPDATE plants SET last_watered_at = ?2 WHERE id = ?1",
        params![id, at],
    )
}

pub fn get_plant(conn: &Connection, id: i64) -> Result<Option<PlantRecord>> {
    conn.query_row(
        &format!("SELECT {PLANT_COLUMNS} FROM plants WHERE id = ?1"),
        params![id],
        plant_from_row,
    )
    .optional()
}

pub fn list_plants(conn: &Connection) -> Result<Vec<PlantRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PLANT_COLUMNS} FROM plants ORDER BY id DESC"
    ))?;
    let rows = stmt.query_map([], plant_from_row)?;
    rows.collect()
}

pub fn delete_plant(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM plants WHERE id = ?1", params![id])
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlantLogRecord {
    pub id: i64,
    pub plant_id: i64,
    pub photo_uri: Option<String>,
    pub note: Option<String>,
    pub created_at: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub struct InsertPlantLog<'a> {
    pub plant_id: i64,
    pub photo_uri: Option<&'a str>,
    pub note: Option<&'a str>,
    pub created_at: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

const LOG_COLUMNS: &str = "id, plant_id, photo_uri, note, created_at, latitude, longitude";

fn log_from_row(row: &Row<'_>) -> Result<PlantLogRecord> {
    Ok(PlantLogRecord {
        id: row.get(0)?,
        plant_id: row.get(1)?,
        photo_uri: row.get(2)?,
        note: row.get(3)?,
        created_at: row.get(4)?,
        latitude: row.get(5)?,
        longitude: row.get(6)?,
    })
}

pub fn insert_log(conn: &Connection, args: &InsertPlantLog<'_>) -> Result<i64> {
    conn.execute(
        r#"
INSERT INTO plant_logs (plant_id, photo_uri, note, created_at, latitude, longitude)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#,
        params![
            args.plant_id,
            args.photo_uri,
            args.note,
            args.created_at,
            args.latitude,
            args.longitude
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_log(conn: &Connection, id: i64) -> Result<Option<PlantLogRecord>> {
    conn.query_row(
        &format!("SELECT {LOG_COLUMNS} FROM plant_logs WHERE id = ?1 LIMIT 1"),
        params![id],
        log_from_row,
    )
    .optional()
}

pub fn list_logs(conn: &Connection, plant_id: Option<i64>) -> Result<Vec<PlantLogRecord>> {
    let mut stmt = conn.prepare(&format!(
        r#"
SELECT {LOG_COLUMNS}
FROM plant_logs
WHERE ?1 IS NULL OR plant_id = ?1
ORDER BY created_at DESC, id DESC
"#
    ))?;
    let rows = stmt.query_map(params![plant_id], log_from_row)?;
    rows.collect()
}

pub fn delete_log(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM plant_logs WHERE id = ?1", params![id])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareHistoryRecord {
    pub id: i64,
    pub plant_id: i64,
    pub care_timestamp: i64,
    pub care_type: String,
}

pub fn insert_care(
    conn: &Connection,
    plant_id: i64,
    care_timestamp: i64,
    care_type: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO care_history (plant_id, care_timestamp, care_type) VALUES (?1, ?2, ?3)",
        params![plant_id, care_timestamp, care_type],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Newest first. `plant_id = None` lists every plant's history.
pub fn list_history(conn: &Connection, plant_id: Option<i64>) -> Result<Vec<CareHistoryRecord>> {
    let mut stmt = conn.prepare(
        r#"
SELECT id, plant_id, care_timestamp, care_type
FROM care_history
WHERE ?1 IS NULL OR plant_id = ?1
ORDER BY care_timestamp DESC, id DESC
"#,
    )?;
    let rows = stmt.query_map(params![plant_id], |row| {
        Ok(CareHistoryRecord {
            id: row.get(0)?,
            plant_id: row.get(1)?,
            care_timestamp: row.get(2)?,
            care_type: row.get(3)?,
        })
    })?;
    rows.collect()
}

pub fn count_care_since(conn: &Connection, care_type: &str, since: i64) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM care_history WHERE care_type = ?1 AND care_timestamp >= ?2",
        params![care_type, since],
        |row| row.get(0),
    )
}

pub fn delete_history_before(conn: &Connection, timestamp: i64) -> Result<usize> {
    conn.execute(
        "DELETE FROM care_history WHERE care_timestamp < ?1",
        params![timestamp],
    )
}

pub fn delete_history_for_plant(conn: &Connection, plant_id: i64) -> Result<usize> {
    conn.execute(
        "DELETE FROM care_history WHERE plant_id = ?1",
        params![plant_id],
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRecord {
    pub id: i64,
    pub title: String,
    pub message: String,
    pub timestamp: i64,
    pub is_read: bool,
}

pub fn insert_notification(
    conn: &Connection,
    title: &str,
    message: &str,
    timestamp: i64,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO notifications (title, message, timestamp, is_read) VALUES (?1, ?2, ?3, 0)",
        params![title, message, timestamp],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_notifications(conn: &Connection, unread_only: bool) -> Result<Vec<NotificationRecord>> {
    let mut stmt = conn.prepare(
        r#"
SELECT id, title, message, timestamp, is_read
FROM notifications
WHERE ?1 = 0 OR is_read = 0
ORDER BY timestamp DESC, id DESC
"#,
    )?;
    let rows = stmt.query_map(params![unread_only], |row| {
        Ok(NotificationRecord {
            id: row.get(0)?,
            title: row.get(1)?,
            message: row.get(2)?,
            timestamp: row.get(3)?,
            is_read: row.get(4)?,
        })
    })?;
    rows.collect()
}

pub fn unread_count(conn: &Connection) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM notifications WHERE is_read = 0",
        [],
        |row| row.get(0),
    )
}

pub fn mark_all_read(conn: &Connection) -> Result<usize> {
    conn.execute("UPDATE notifications SET is_read = 1 WHERE is_read = 0", [])
}
