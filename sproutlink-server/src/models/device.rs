use serde::{Deserialize, Serialize};
use serde_json::Value;
use sproutlink_api::models::Reading;

use super::Table;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Device {
    pub id: i32,
    pub uuid: String,
    pub name: String,
    pub plant_id: Option<i32>,
    pub push_token: Option<String>,
    pub reading: Option<Value>,
    pub status: Option<Value>,
}

impl Device {
    /// Latest stored reading, if the device has reported yet.
    pub fn latest_reading(&self) -> Result<Option<Reading>, serde_json::Error> {
        self.reading
            .clone()
            .map(serde_json::from_value)
            .transpose()
    }
}

#[derive(Clone)]
pub struct DeviceTable;

impl Table for DeviceTable {
    fn name(&self) -> &'static str {
        "devices"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS devices (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                uuid VARCHAR(255) NOT NULL UNIQUE,
                name VARCHAR(255) NOT NULL,
                plant_id INTEGER,
                push_token TEXT,
                reading JSON,
                status JSON,
                FOREIGN KEY (plant_id) REFERENCES plants (id) ON DELETE SET NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS devices;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["plants"]
    }
}
