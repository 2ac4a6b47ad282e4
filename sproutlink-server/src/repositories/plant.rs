use std::sync::Arc;

use sqlx::{Error, Sqlite, SqlitePool, Transaction};

use crate::configs::Storage;
use crate::models::Plant;

pub struct PlantRepository {
    storage: Arc<Storage>,
}

impl PlantRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &SqlitePool {
        self.storage.get_pool()
    }

    pub async fn create(
        &self,
        item: &Plant,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO plants (name, description, photo, moisture_range, light_range, temperature_range)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.photo)
        .bind(&item.moisture_range)
        .bind(&item.light_range)
        .bind(&item.temperature_range)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Plant>, Error> {
        let plant: Option<Plant> = sqlx::query_as("SELECT * FROM plants WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(plant)
    }

    pub async fn find_all(&self) -> Result<Vec<Plant>, Error> {
        let plants: Vec<Plant> = sqlx::query_as("SELECT * FROM plants")
            .fetch_all(self.storage.get_pool())
            .await?;

        Ok(plants)
    }

    pub async fn delete(
        &self,
        id: i32,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query("DELETE FROM plants WHERE id = $1")
            .bind(id)
            .execute(&mut **transaction)
            .await?;

        Ok(())
    }
}
