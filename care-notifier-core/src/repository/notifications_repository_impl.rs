use super::{dto::Notification, entity::NotificationFindEntity, Error, NotificationsRepository};
use crate::repository::entity::NotificationInsertEntity;
use axum::async_trait;
use bson::{doc, oid::ObjectId, Bson, DateTime, Document};
use futures::TryStreamExt;
use mongodb::{error::ErrorKind, options::IndexOptions, Collection, Database, IndexModel};
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

const NOTIFICATIONS: &str = "notifications";
const INDEX_NAME_USER_ID_CREATED_AT: &str = "index_user_id_created_at";

pub struct NotificationsRepositoryImpl {
    database: Database,
}

impl NotificationsRepositoryImpl {
    pub async fn new(database: Database) -> Result<Self, mongodb::error::Error> {
        let collection = database.collection::<Document>(NOTIFICATIONS);

        // createIndexes is a no-op when identical index already exists
        Self::create_user_id_created_at_index(&collection).await?;
        tracing::debug!("ensured index {NOTIFICATIONS}.{INDEX_NAME_USER_ID_CREATED_AT}");

        Ok(Self { database })
    }

    async fn create_user_id_created_at_index(
        collection: &Collection<Document>,
    ) -> Result<(), mongodb::error::Error> {
        let index = IndexModel::builder()
            .keys(doc! {
                "user_id": 1,
                "created_at": -1,
            })
            .options(
                IndexOptions::builder()
                    .name(INDEX_NAME_USER_ID_CREATED_AT.to_string())
                    .build(),
            )
            .build();

        collection.create_index(index).await?;

        Ok(())
    }

    fn collection(&self) -> Collection<Document> {
        self.database.collection(NOTIFICATIONS)
    }
}

#[async_trait]
impl NotificationsRepository for NotificationsRepositoryImpl {
    async fn insert(
        &self,
        user_id: Uuid,
        created_at: OffsetDateTime,
        title: &str,
        message: &str,
        kind: &str,
    ) -> Result<ObjectId, Error> {
        let insert_entity = NotificationInsertEntity {
            user_id: user_id.into(),
            created_at: DateTime::from(created_at),
            title,
            message,
            kind,
            is_read: false,
        };

        let insert_result = self
            .database
            .collection::<NotificationInsertEntity>(NOTIFICATIONS)
            .insert_one(&insert_entity)
            .await?;

        let Bson::ObjectId(id) = insert_result.inserted_id else {
            tracing::error!("invalid type of inserted '_id'");
            return Err(Error::Mongo(
                ErrorKind::Custom(Arc::new("invalid type of inserted '_id'")).into(),
            ));
        };

        Ok(id)
    }

    async fn find_many(&self, user_id: Uuid) -> Result<Vec<Notification>, Error> {
        let user_id = bson::Uuid::from(user_id);

        let cursor = self
            .database
            .collection::<NotificationFindEntity>(NOTIFICATIONS)
            .find(doc! { "user_id": user_id })
            .sort(doc! {
                "created_at": -1,
                "_id": -1,
            })
            .await?;

        let notifications = cursor.map_ok(Notification::from).try_collect().await?;

        Ok(notifications)
    }

    async fn update_read(&self, id: ObjectId, user_id: Uuid) -> Result<(), Error> {
        let user_id = bson::Uuid::from(user_id);

        let update_result = self
            .collection()
            .update_one(
                doc! {
                    "_id": id,
                    "user_id": user_id,
                },
                doc! {
                    "$set": {
                        "is_read": true,
                    }
                },
            )
            .await?;

        match update_result.matched_count == 1 {
            true => Ok(()),
            false => Err(Error::NoDocumentUpdated),
        }
    }

    async fn update_many_read(&self, user_id: Uuid) -> Result<u64, Error> {
        let user_id = bson::Uuid::from(user_id);

        let update_result = self
            .collection()
            .update_many(
                doc! {
                    "user_id": user_id,
                    "is_read": false,
                },
                doc! {
                    "$set": {
                        "is_read": true,
                    }
                },
            )
            .await?;

        Ok(update_result.modified_count)
    }

    async fn delete(&self, id: ObjectId, user_id: Uuid) -> Result<(), Error> {
        let user_id = bson::Uuid::from(user_id);

        let delete_result = self
            .collection()
            .delete_one(doc! {
                "_id": id,
                "user_id": user_id,
            })
            .await?;

        match delete_result.deleted_count == 1 {
            true => Ok(()),
            false => Err(Error::NoDocumentUpdated),
        }
    }

    async fn delete_many(&self, user_id: Uuid) -> Result<u64, Error> {
        let user_id = bson::Uuid::from(user_id);

        let delete_result = self
            .collection()
            .delete_many(doc! { "user_id": user_id })
            .await?;

        Ok(delete_result.deleted_count)
    }
}
