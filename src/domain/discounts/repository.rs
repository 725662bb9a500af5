//! Discount Policies Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    database::Db,
    domain::discounts::{
        data::{NewDiscountPolicy, PolicyFilter},
        errors::DiscountsRepositoryError,
        records::{DiscountKind, DiscountPolicy, DiscountPolicyUuid},
    },
};

const FIND_POLICY_SQL: &str = include_str!("sql/find_policy.sql");
const LIST_POLICIES_SQL: &str = include_str!("sql/list_policies.sql");
const CREATE_POLICY_SQL: &str = include_str!("sql/create_policy.sql");

/// Read access to stored discount policies.
#[automock]
#[async_trait]
pub trait DiscountPoliciesRepository: Send + Sync {
    /// Look up a single policy, `None` when it does not exist.
    async fn find_policy(
        &self,
        uuid: DiscountPolicyUuid,
    ) -> Result<Option<DiscountPolicy>, DiscountsRepositoryError>;

    /// List policies matching `filter`, newest first.
    async fn list_policies(
        &self,
        filter: PolicyFilter,
    ) -> Result<Vec<DiscountPolicy>, DiscountsRepositoryError>;
}

/// PostgreSQL-backed discount policies repository.
#[derive(Debug, Clone)]
pub struct PgDiscountPoliciesRepository {
    db: Db,
}

impl PgDiscountPoliciesRepository {
    /// Repository over the given database.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Insert a new policy.
    ///
    /// # Errors
    ///
    /// Returns an error when an amount does not fit the column type or the
    /// insert violates a constraint.
    pub async fn create_policy(
        &self,
        policy: NewDiscountPolicy,
    ) -> Result<DiscountPolicy, DiscountsRepositoryError> {
        let value = i64::try_from(policy.value)?;
        let min_amount = policy.min_amount.map(i64::try_from).transpose()?;
        let max_amount = policy.max_amount.map(i64::try_from).transpose()?;

        let mut tx = self.db.begin_transaction().await?;

        let created = query_as::<Postgres, DiscountPolicy>(CREATE_POLICY_SQL)
            .bind(policy.uuid.into_uuid())
            .bind(policy.name)
            .bind(policy.description)
            .bind(policy.kind.as_str())
            .bind(value)
            .bind(min_amount)
            .bind(max_amount)
            .bind(policy.is_active)
            .bind(SqlxTimestamp::from(policy.valid_from))
            .bind(SqlxTimestamp::from(policy.valid_to))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[async_trait]
impl DiscountPoliciesRepository for PgDiscountPoliciesRepository {
    async fn find_policy(
        &self,
        uuid: DiscountPolicyUuid,
    ) -> Result<Option<DiscountPolicy>, DiscountsRepositoryError> {
        let mut tx = self.db.begin_read_transaction().await?;

        let policy = query_as::<Postgres, DiscountPolicy>(FIND_POLICY_SQL)
            .bind(uuid.into_uuid())
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(policy)
    }

    async fn list_policies(
        &self,
        filter: PolicyFilter,
    ) -> Result<Vec<DiscountPolicy>, DiscountsRepositoryError> {
        let mut tx = self.db.begin_read_transaction().await?;

        let policies = query_as::<Postgres, DiscountPolicy>(LIST_POLICIES_SQL)
            .bind(filter.active_only)
            .bind(filter.valid_at.map(SqlxTimestamp::from))
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(policies)
    }
}

fn decode_amount(row: &PgRow, column: &str) -> sqlx::Result<u64> {
    let amount: i64 = row.try_get(column)?;

    u64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn decode_optional_amount(row: &PgRow, column: &str) -> sqlx::Result<Option<u64>> {
    let amount: Option<i64> = row.try_get(column)?;

    amount
        .map(|amount| {
            u64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
                index: column.to_string(),
                source: Box::new(e),
            })
        })
        .transpose()
}

impl<'r> FromRow<'r, PgRow> for DiscountPolicy {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: DiscountPolicyUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            kind: DiscountKind::from(row.try_get::<String, _>("kind")?),
            value: decode_amount(row, "value")?,
            min_amount: decode_optional_amount(row, "min_amount")?,
            max_amount: decode_optional_amount(row, "max_amount")?,
            is_active: row.try_get("is_active")?,
            valid_from: row.try_get::<SqlxTimestamp, _>("valid_from")?.to_jiff(),
            valid_to: row.try_get::<SqlxTimestamp, _>("valid_to")?.to_jiff(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
