//! HTTP handlers for the place endpoints
//!
//! - **`types`** - Request/response bodies and validation
//! - **`read`** - Public lookups by place id and by creator
//! - **`create`** - Authenticated place creation
//! - **`update`** - Owner-only title/description edits
//! - **`delete`** - Owner-only deletion

pub mod types;
pub mod read;
pub mod create;
pub mod update;
pub mod delete;

pub use create::create_place;
pub use delete::delete_place;
pub use read::{get_place_by_id, get_places_by_user_id};
pub use update::update_place;
