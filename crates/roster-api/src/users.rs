use std::sync::Arc;

use tracing::{debug, info, warn};

use roster_db::UserStore;
use roster_types::api::{UserRequest, UserView};

use crate::error::ApiError;
use crate::worker::Worker;

/// User operations over a record store, with every store call run on the
/// worker pool.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    worker: Worker,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, worker: Worker) -> Self {
        Self { store, worker }
    }

    /// Validates, checks the id is free, then saves.
    ///
    /// The existence check and the save are separate store calls, so two
    /// concurrent creates for one id can both pass the check. The store's
    /// upsert then keeps whichever write lands last.
    pub async fn create_user(&self, req: UserRequest) -> Result<(), ApiError> {
        let record = req.into_record().map_err(|violations| {
            warn!("Rejected user request: {:?}", violations);
            ApiError::Validation(violations)
        })?;

        let store = self.store.clone();
        let user_id = record.user_id.clone();
        let existing = self.worker.run(move || store.find_by_id(&user_id)).await?;

        if existing.is_some() {
            warn!("User {} already exists", record.user_id);
            return Err(ApiError::Conflict {
                user_id: record.user_id,
            });
        }

        let store = self.store.clone();
        let saved = self.worker.run(move || store.save(&record)).await?;

        info!("Created user {}", saved.user_id);
        Ok(())
    }

    /// Every stored user, in store scan order, with passwords dropped.
    pub async fn list_users(&self) -> Result<impl Iterator<Item = UserView> + use<>, ApiError> {
        let store = self.store.clone();
        let records = self.worker.run(move || store.find_all()).await?;
        debug!("Listing {} users", records.len());
        Ok(records.into_iter().map(UserView::from))
    }

    pub async fn get_user(&self, user_id: &str) -> Result<UserView, ApiError> {
        let store = self.store.clone();
        let id = user_id.to_string();
        self.worker
            .run(move || store.find_by_id(&id))
            .await?
            .map(UserView::from)
            .ok_or_else(|| {
                debug!("User {} not found", user_id);
                ApiError::NotFound {
                    user_id: user_id.to_string(),
                }
            })
    }
}
