/**
 * PostgreSQL Store
 *
 * [`PlaceStore`] over a `PgPool`. Users keep their place ids in a `UUID[]`
 * column; each two-collection write is one transaction that row-locks the
 * rows it touches (`SELECT ... FOR UPDATE`) before writing, so disjoint
 * user/place pairs never block each other.
 *
 * Serialization failures and deadlocks surface as [`StoreError::Conflict`]
 * and are not retried.
 */

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::backend::store::{image_in_use, LinkOutcome, PlaceStore, StoreError, StoreFuture, UnlinkOutcome};
use crate::shared::{image_file_name, Location, Place};

/// Row shape of the `places` table
#[derive(Debug, sqlx::FromRow)]
struct PlaceRow {
    id: Uuid,
    title: String,
    description: String,
    address: String,
    lat: f64,
    lng: f64,
    image: String,
    creator: Uuid,
}

impl From<PlaceRow> for Place {
    fn from(row: PlaceRow) -> Self {
        Place {
            id: row.id,
            title: row.title,
            description: row.description,
            address: row.address,
            location: Location::new(row.lat, row.lng),
            image: row.image,
            creator: row.creator,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            match db.code().as_deref() {
                Some("23505") => return StoreError::duplicate(db.message().to_string()),
                Some("40001") | Some("40P01") => return StoreError::conflict(db.message().to_string()),
                _ => {}
            }
        }
        StoreError::backend(err.to_string())
    }
}

/// PostgreSQL-backed store
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect a pool to `database_url`
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        tracing::info!("Connecting to database...");
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        tracing::info!("Database connection pool created successfully");
        Ok(Self { pool })
    }

    /// Apply the embedded migrations
    pub async fn migrate(&self) -> Result<(), StoreError> {
        tracing::info!("Running database migrations...");
        sqlx::migrate!()
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::backend(e.to_string()))?;
        tracing::info!("Database migrations completed successfully");
        Ok(())
    }
}

const USER_COLUMNS: &str = "id, name, email, password_hash, places";
const PLACE_COLUMNS: &str = "id, title, description, address, lat, lng, image, creator";

impl PlaceStore for PgStore {
    fn insert_user(&self, user: User) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            sqlx::query(
                r#"
                INSERT INTO users (id, name, email, password_hash, places)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.places)
            .execute(&self.pool)
            .await?;
            Ok(())
        })
    }

    fn user_by_id(&self, id: Uuid) -> StoreFuture<'_, Option<User>> {
        Box::pin(async move {
            let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(user)
        })
    }

    fn user_by_email<'a>(&'a self, email: &'a str) -> StoreFuture<'a, Option<User>> {
        Box::pin(async move {
            let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
            Ok(user)
        })
    }

    fn list_users(&self) -> StoreFuture<'_, Vec<User>> {
        Box::pin(async move {
            let users = sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id"
            ))
            .fetch_all(&self.pool)
            .await?;
            Ok(users)
        })
    }

    fn place_by_id(&self, id: Uuid) -> StoreFuture<'_, Option<Place>> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, PlaceRow>(&format!("SELECT {PLACE_COLUMNS} FROM places WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row.map(Place::from))
        })
    }

    fn places_by_owner(&self, owner: Uuid) -> StoreFuture<'_, Option<Vec<Place>>> {
        Box::pin(async move {
            let mut tx = self.pool.begin().await?;
            sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
                .execute(&mut *tx)
                .await?;

            let ids: Option<Vec<Uuid>> = sqlx::query_scalar("SELECT places FROM users WHERE id = $1")
                .bind(owner)
                .fetch_optional(&mut *tx)
                .await?;
            let Some(ids) = ids else {
                tx.commit().await?;
                return Ok(None);
            };

            let rows = sqlx::query_as::<_, PlaceRow>(&format!(
                "SELECT {PLACE_COLUMNS} FROM places WHERE id = ANY($1) ORDER BY array_position($1, id)"
            ))
            .bind(&ids)
            .fetch_all(&mut *tx)
            .await?;
            tx.commit().await?;

            Ok(Some(rows.into_iter().map(Place::from).collect()))
        })
    }

    fn update_place_details<'a>(
        &'a self,
        id: Uuid,
        title: &'a str,
        description: &'a str,
    ) -> StoreFuture<'a, Option<Place>> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, PlaceRow>(&format!(
                "UPDATE places SET title = $1, description = $2 WHERE id = $3 RETURNING {PLACE_COLUMNS}"
            ))
            .bind(title)
            .bind(description)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row.map(Place::from))
        })
    }

    fn link_place(&self, place: Place) -> StoreFuture<'_, LinkOutcome> {
        Box::pin(async move {
            let mut tx = self.pool.begin().await?;

            let owner: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1 FOR UPDATE")
                .bind(place.creator)
                .fetch_optional(&mut *tx)
                .await?;
            if owner.is_none() {
                tx.rollback().await?;
                return Ok(LinkOutcome::OwnerMissing);
            }

            sqlx::query(
                r#"
                INSERT INTO places (id, title, description, address, lat, lng, image, creator)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(place.id)
            .bind(&place.title)
            .bind(&place.description)
            .bind(&place.address)
            .bind(place.location.lat)
            .bind(place.location.lng)
            .bind(&place.image)
            .bind(place.creator)
            .execute(&mut *tx)
            .await?;

            sqlx::query("UPDATE users SET places = array_append(places, $1) WHERE id = $2")
                .bind(place.id)
                .bind(place.creator)
                .execute(&mut *tx)
                .await?;

            tx.commit().await?;
            Ok(LinkOutcome::Linked)
        })
    }

    fn unlink_place(&self, place_id: Uuid, owner: Uuid) -> StoreFuture<'_, UnlinkOutcome> {
        Box::pin(async move {
            let mut tx = self.pool.begin().await?;

            let row = sqlx::query_as::<_, PlaceRow>(&format!(
                "SELECT {PLACE_COLUMNS} FROM places WHERE id = $1 FOR UPDATE"
            ))
            .bind(place_id)
            .fetch_optional(&mut *tx)
            .await?;
            let place = match row {
                None => {
                    tx.rollback().await?;
                    return Ok(UnlinkOutcome::PlaceMissing);
                }
                Some(row) if row.creator != owner => {
                    tx.rollback().await?;
                    return Ok(UnlinkOutcome::OwnerMismatch);
                }
                Some(row) => Place::from(row),
            };

            sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
                .bind(owner)
                .execute(&mut *tx)
                .await?;

            sqlx::query("DELETE FROM places WHERE id = $1")
                .bind(place_id)
                .execute(&mut *tx)
                .await?;

            sqlx::query("UPDATE users SET places = array_remove(places, $1) WHERE id = $2")
                .bind(place_id)
                .bind(owner)
                .execute(&mut *tx)
                .await?;

            // Candidates share the file name as a suffix; the exact match is done in Rust.
            let image_in_use = match image_file_name(&place.image) {
                Some(name) => {
                    let others: Vec<String> = sqlx::query_scalar("SELECT image FROM places WHERE right(image, $1) = $2")
                        .bind(name.chars().count() as i32)
                        .bind(name)
                        .fetch_all(&mut *tx)
                        .await?;
                    image_in_use(&place.image, others.iter().map(String::as_str))
                }
                None => false,
            };

            tx.commit().await?;
            Ok(UnlinkOutcome::Unlinked { place, image_in_use })
        })
    }

    fn close(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.pool.close().await;
            tracing::info!("Database pool closed");
            Ok(())
        })
    }
}
