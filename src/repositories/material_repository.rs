use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::FindOptions, Collection};

use crate::{db::Database, errors::AppResult, models::domain::Material};

#[async_trait]
pub trait MaterialRepository: Send + Sync {
    async fn create(&self, material: Material) -> AppResult<Material>;
    /// Most recent first.
    async fn find_all(&self) -> AppResult<Vec<Material>>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Material>>;
    /// Idempotent: deleting an absent id is a no-op.
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct MongoMaterialRepository {
    collection: Collection<Material>,
}

impl MongoMaterialRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("materials");
        Self { collection }
    }
}

#[async_trait]
impl MaterialRepository for MongoMaterialRepository {
    async fn create(&self, material: Material) -> AppResult<Material> {
        self.collection.insert_one(&material).await?;
        Ok(material)
    }

    async fn find_all(&self) -> AppResult<Vec<Material>> {
        let find_options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(doc! {})
            .with_options(find_options)
            .await?;
        let materials: Vec<Material> = cursor.try_collect().await?;
        Ok(materials)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Material>> {
        let material = self.collection.find_one(doc! { "id": id }).await?;
        Ok(material)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.collection.delete_one(doc! { "id": id }).await?;
        Ok(())
    }
}
