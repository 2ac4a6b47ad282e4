use serde::{Deserialize, Serialize};
use serde_json::Value;
use sproutlink_api::models::{PlantRanges, PlantResponse};

use super::Table;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Plant {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub photo: Option<String>,
    pub moisture_range: Value,
    pub light_range: Value,
    pub temperature_range: Value,
}

impl Plant {
    /// Typed view of the range columns. Stored ranges are always the
    /// canonical `{min,max}` shape.
    pub fn ranges(&self) -> Result<PlantRanges, serde_json::Error> {
        Ok(PlantRanges {
            moisture: serde_json::from_value(self.moisture_range.clone())?,
            light: serde_json::from_value(self.light_range.clone())?,
            temperature: serde_json::from_value(self.temperature_range.clone())?,
        })
    }

    pub fn to_response(&self) -> Result<PlantResponse, serde_json::Error> {
        let ranges = self.ranges()?;

        Ok(PlantResponse {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            photo: self.photo.clone(),
            moisture: ranges.moisture,
            light: ranges.light,
            temperature: ranges.temperature,
        })
    }
}

#[derive(Clone)]
pub struct PlantTable;

impl Table for PlantTable {
    fn name(&self) -> &'static str {
        "plants"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS plants (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(255) NOT NULL,
                description TEXT,
                photo TEXT,
                moisture_range JSON NOT NULL,
                light_range JSON NOT NULL,
                temperature_range JSON NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS plants;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
