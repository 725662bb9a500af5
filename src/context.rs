//! App Context

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::discounts::{DiscountsService, PgDiscountPoliciesRepository, PgDiscountsService},
};

/// Errors raised while building the [`AppContext`].
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The database pool could not connect.
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Services shared by the operator commands.
#[derive(Clone)]
pub struct AppContext {
    /// Discount evaluation.
    pub discounts: Arc<dyn DiscountsService>,

    /// Policy storage, used directly for seeding.
    pub policies: PgDiscountPoliciesRepository,
}

impl Debug for AppContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AppContext")
            .field("policies", &self.policies)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        Ok(Self {
            discounts: Arc::new(PgDiscountsService::new(db.clone())),
            policies: PgDiscountPoliciesRepository::new(db),
        })
    }
}
