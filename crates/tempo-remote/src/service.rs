//! libSQL-backed remote service.
//!
//! `LibSqlRemote` wraps `TempoDb` (raw database access) and the signed-in
//! identity. Every statement carries an `owner_id = ?` predicate, so a user
//! never sees or touches another user's records.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tempo_core::enums::{Collection, Filter, OrderBy};
use tempo_core::identity::UserIdentity;
use tracing::debug;

use crate::TempoDb;
use crate::contract::{Record, RemoteService};
use crate::error::RemoteError;
use crate::helpers::{
    check_columns, check_mutable, format_timestamp, json_to_sql, row_to_record,
};

pub struct LibSqlRemote {
    db: TempoDb,
    identity: RwLock<Option<UserIdentity>>,
}

impl LibSqlRemote {
    /// Open a local database and sign in `identity`.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `identity` - Signed-in user. `None` leaves the service signed out.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the database cannot be opened or migrated.
    pub async fn new_local(
        db_path: &str,
        identity: Option<UserIdentity>,
    ) -> Result<Self, RemoteError> {
        let db = TempoDb::open_local(db_path).await?;
        Ok(Self::from_db(db, identity))
    }

    /// Create from an existing `TempoDb`.
    #[must_use]
    pub fn from_db(db: TempoDb, identity: Option<UserIdentity>) -> Self {
        Self {
            db,
            identity: RwLock::new(identity),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &TempoDb {
        &self.db
    }

    pub fn sign_in(&self, identity: UserIdentity) {
        *self.identity.write() = Some(identity);
    }

    pub fn sign_out(&self) {
        *self.identity.write() = None;
    }

    fn require_owner(&self) -> Result<String, RemoteError> {
        self.identity
            .read()
            .as_ref()
            .map(|identity| identity.user_id.clone())
            .ok_or(RemoteError::Unauthenticated)
    }

    async fn select_by_id(
        &self,
        collection: Collection,
        id: &str,
        owner: &str,
    ) -> Result<Record, RemoteError> {
        let columns = collection.columns();
        let mut rows = self
            .db
            .conn()
            .query(
                &format!(
                    "SELECT {} FROM {collection} WHERE id = ?1 AND owner_id = ?2",
                    columns.join(", ")
                ),
                libsql::params![id, owner],
            )
            .await?;
        let row = rows.next().await?.ok_or(RemoteError::NoResult)?;
        row_to_record(&row, columns)
    }
}

#[async_trait]
impl RemoteService for LibSqlRemote {
    async fn current_user(&self) -> Result<Option<UserIdentity>, RemoteError> {
        Ok(self.identity.read().clone())
    }

    async fn list(
        &self,
        collection: Collection,
        filter: &Filter,
        order: OrderBy,
    ) -> Result<Vec<Record>, RemoteError> {
        let owner = self.require_owner()?;
        if !collection.has_column(filter.column()) || !collection.has_column(order.column) {
            return Err(RemoteError::Query(format!(
                "cannot filter {collection} by {} ordered by {}",
                filter.column(),
                order.column
            )));
        }

        let columns = collection.columns();
        let dir = order.direction();
        let sql = format!(
            "SELECT {} FROM {collection} WHERE {} = ?1 AND owner_id = ?2 \
             ORDER BY {} {dir}, created_at {dir}",
            columns.join(", "),
            filter.column(),
            order.column,
        );
        let mut rows = self
            .db
            .conn()
            .query(&sql, libsql::params![filter.value(), owner.as_str()])
            .await?;

        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(row_to_record(&row, columns)?);
        }
        debug!(%collection, %filter, count = records.len(), "listed records");
        Ok(records)
    }

    async fn insert(
        &self,
        collection: Collection,
        mut record: Record,
    ) -> Result<Record, RemoteError> {
        let owner = self.require_owner()?;
        check_columns(collection, &record)?;

        match record.get("owner_id").and_then(serde_json::Value::as_str) {
            Some(claimed) if claimed != owner => {
                return Err(RemoteError::PermissionDenied(format!(
                    "cannot insert into {collection} on behalf of {claimed}"
                )));
            }
            _ => {}
        }

        let id = self.db.generate_id(collection.id_prefix()).await?;
        record.insert("id".into(), id.clone().into());
        record.insert("owner_id".into(), owner.clone().into());
        record.insert("created_at".into(), format_timestamp(Utc::now()).into());

        let names: Vec<&str> = record.keys().map(String::as_str).collect();
        let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("?{i}")).collect();
        let params: Vec<libsql::Value> = record.values().map(json_to_sql).collect();
        let sql = format!(
            "INSERT INTO {collection} ({}) VALUES ({})",
            names.join(", "),
            placeholders.join(", ")
        );
        self.db
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        debug!(%collection, %id, "inserted record");
        self.select_by_id(collection, &id, &owner).await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Record,
    ) -> Result<Record, RemoteError> {
        let owner = self.require_owner()?;
        check_mutable(collection, &fields)?;

        if fields.is_empty() {
            return self.select_by_id(collection, id, &owner).await;
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;
        for (column, value) in &fields {
            sets.push(format!("{column} = ?{idx}"));
            params.push(json_to_sql(value));
            idx += 1;
        }
        params.push(id.into());
        params.push(owner.clone().into());
        let sql = format!(
            "UPDATE {collection} SET {} WHERE id = ?{idx} AND owner_id = ?{}",
            sets.join(", "),
            idx + 1
        );

        let affected = self
            .db
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if affected == 0 {
            return Err(RemoteError::NoResult);
        }

        debug!(%collection, %id, "updated record");
        self.select_by_id(collection, id, &owner).await
    }

    async fn delete(&self, collection: Collection, filter: &Filter) -> Result<(), RemoteError> {
        let owner = self.require_owner()?;
        if !collection.has_column(filter.column()) {
            return Err(RemoteError::Query(format!(
                "cannot filter {collection} by {}",
                filter.column()
            )));
        }

        let affected = self
            .db
            .conn()
            .execute(
                &format!(
                    "DELETE FROM {collection} WHERE {} = ?1 AND owner_id = ?2",
                    filter.column()
                ),
                libsql::params![filter.value(), owner.as_str()],
            )
            .await?;

        debug!(%collection, %filter, affected, "deleted records");
        Ok(())
    }
}
