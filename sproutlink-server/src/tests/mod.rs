//! Shared test fixtures, exported under the `mock` feature for the
//! integration suites.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::configs::Storage;
use crate::models::{Device, Plant};
use crate::services::{PushMessage, PushSender};

/// Push sender that records every batch instead of talking to the network.
#[derive(Default)]
pub struct RecordingSender {
    messages: Mutex<Vec<PushMessage>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<PushMessage> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushSender for RecordingSender {
    async fn send(&self, messages: Vec<PushMessage>) -> Result<(), anyhow::Error> {
        self.messages.lock().unwrap().extend(messages);
        Ok(())
    }
}

pub async fn create_test_plant(storage: Arc<Storage>, name: &str) -> Plant {
    sqlx::query_as::<_, Plant>(
        r#"
        INSERT INTO plants (name, description, photo, moisture_range, light_range, temperature_range)
            VALUES (
                $1,
                'A hardy test plant',
                NULL,
                '{"min": 200.0, "max": 600.0}',
                '{"min": 300.0, "max": 700.0}',
                '{"min": 18.0, "max": 30.0}'
            )
            RETURNING *;
        "#,
    )
    .bind(name)
    .fetch_one(storage.get_pool())
    .await
    .unwrap()
}

pub async fn create_test_device(storage: Arc<Storage>, uuid: &str, name: &str) -> Device {
    sqlx::query_as::<_, Device>(
        r#"
        INSERT INTO devices (uuid, name)
            VALUES ($1, $2)
            RETURNING *;
        "#,
    )
    .bind(uuid)
    .bind(name)
    .fetch_one(storage.get_pool())
    .await
    .unwrap()
}

pub async fn assign_test_plant(storage: Arc<Storage>, device_id: i32, plant_id: i32) {
    sqlx::query("UPDATE devices SET plant_id = $1 WHERE id = $2")
        .bind(plant_id)
        .bind(device_id)
        .execute(storage.get_pool())
        .await
        .unwrap();
}
