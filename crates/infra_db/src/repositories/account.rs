//! Account repository implementation
//!
//! This module provides row-level database access for the `accounts` table
//! and the `address` rows each account owns.
//!
//! # Cascade Rules
//!
//! - Inserting an account inserts all of its addresses in the same transaction
//! - Updating an account updates the addresses it already owns, inserts the
//!   new ones, and deletes every owned row missing from the new set
//! - Deleting an account removes its addresses through `ON DELETE CASCADE`

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::DatabaseError;

const ACCOUNT_COLUMNS: &str =
    "id, account_ref_id, first_name, last_name, email_address, created_dt, updated_dt";

const ADDRESS_COLUMNS: &str =
    "id, account_id, street_address, second_address, city, state, province, postal_code, country";

/// Database row for an account
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccountRow {
    pub id: i64,
    pub account_ref_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub created_dt: DateTime<Utc>,
    pub updated_dt: DateTime<Utc>,
}

/// Database row for an owned address
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AddressRow {
    pub id: i64,
    pub account_id: i64,
    pub street_address: String,
    pub second_address: Option<String>,
    pub city: String,
    pub state: String,
    pub province: Option<String>,
    pub postal_code: String,
    pub country: String,
}

/// An account row together with its address rows
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub account: AccountRow,
    pub addresses: Vec<AddressRow>,
}

/// Input for inserting or updating an account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub account_ref_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub addresses: Vec<NewAddress>,
}

/// Input for an address; `id` is honoured only when the account owns it
#[derive(Debug, Clone)]
pub struct NewAddress {
    pub id: Option<i64>,
    pub street_address: String,
    pub second_address: Option<String>,
    pub city: String,
    pub state: String,
    pub province: Option<String>,
    pub postal_code: String,
    pub country: String,
}

/// Repository for account rows and their addresses
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Creates a new AccountRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves an account and its addresses by id
    pub async fn get_by_id(&self, id: i64) -> Result<Option<AccountRecord>, DatabaseError> {
        let sql = format!("SELECT {} FROM accounts WHERE id = $1", ACCOUNT_COLUMNS);
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(account) => Ok(Some(self.with_addresses(account).await?)),
            None => Ok(None),
        }
    }

    /// Retrieves an account and its addresses by natural key
    pub async fn get_by_account_ref_id(&self, account_ref_id: &str) -> Result<Option<AccountRecord>, DatabaseError> {
        let sql = format!("SELECT {} FROM accounts WHERE account_ref_id = $1", ACCOUNT_COLUMNS);
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(account_ref_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(account) => Ok(Some(self.with_addresses(account).await?)),
            None => Ok(None),
        }
    }

    /// Retrieves every account, ordered by id
    pub async fn list(&self) -> Result<Vec<AccountRecord>, DatabaseError> {
        let sql = format!("SELECT {} FROM accounts ORDER BY id", ACCOUNT_COLUMNS);
        let accounts = sqlx::query_as::<_, AccountRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<i64> = accounts.iter().map(|a| a.id).collect();
        let sql = format!(
            "SELECT {} FROM address WHERE account_id = ANY($1) ORDER BY id",
            ADDRESS_COLUMNS
        );
        let addresses = sqlx::query_as::<_, AddressRow>(&sql)
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?;

        let mut by_account: HashMap<i64, Vec<AddressRow>> = HashMap::new();
        for address in addresses {
            by_account.entry(address.account_id).or_default().push(address);
        }

        Ok(accounts
            .into_iter()
            .map(|account| AccountRecord {
                addresses: by_account.remove(&account.id).unwrap_or_default(),
                account,
            })
            .collect())
    }

    /// Inserts an account and all of its addresses
    ///
    /// # Errors
    ///
    /// `DuplicateEntry` when the natural key or email address already exists
    pub async fn insert(&self, account: &NewAccount) -> Result<AccountRecord, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            r#"
            INSERT INTO accounts (account_ref_id, first_name, last_name, email_address)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        );
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(&account.account_ref_id)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(&account.email_address)
            .fetch_one(&mut *tx)
            .await?;

        let mut addresses = Vec::with_capacity(account.addresses.len());
        for address in &account.addresses {
            addresses.push(insert_address(&mut tx, row.id, address).await?);
        }

        tx.commit().await?;

        Ok(AccountRecord { account: row, addresses })
    }

    /// Updates an account and replaces its address set
    ///
    /// The natural key and `created_dt` are left untouched.
    ///
    /// # Errors
    ///
    /// - `AccountMissing` when no account exists at `id`
    /// - `DuplicateEntry` when the email address belongs to another account
    pub async fn update(&self, id: i64, account: &NewAccount) -> Result<AccountRecord, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            r#"
            UPDATE accounts
            SET first_name = $2, last_name = $3, email_address = $4, updated_dt = now()
            WHERE id = $1
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        );
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(&account.email_address)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DatabaseError::AccountMissing(id))?;

        let mut owned: HashSet<i64> = sqlx::query_scalar::<_, i64>("SELECT id FROM address WHERE account_id = $1")
            .bind(id)
            .fetch_all(&mut *tx)
            .await?
            .into_iter()
            .collect();

        let mut addresses = Vec::with_capacity(account.addresses.len());
        for address in &account.addresses {
            let stored = match address.id {
                Some(address_id) if owned.remove(&address_id) => {
                    update_address(&mut tx, id, address_id, address).await?
                }
                _ => insert_address(&mut tx, id, address).await?,
            };
            addresses.push(stored);
        }

        let kept: Vec<i64> = addresses.iter().map(|a| a.id).collect();
        sqlx::query("DELETE FROM address WHERE account_id = $1 AND NOT (id = ANY($2))")
            .bind(id)
            .bind(&kept)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(AccountRecord { account: row, addresses })
    }

    /// Deletes an account; its addresses go with it
    ///
    /// # Returns
    ///
    /// The number of account rows removed (0 for an unknown id)
    pub async fn delete(&self, id: i64) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn with_addresses(&self, account: AccountRow) -> Result<AccountRecord, DatabaseError> {
        let sql = format!("SELECT {} FROM address WHERE account_id = $1 ORDER BY id", ADDRESS_COLUMNS);
        let addresses = sqlx::query_as::<_, AddressRow>(&sql)
            .bind(account.id)
            .fetch_all(&self.pool)
            .await?;

        Ok(AccountRecord { account, addresses })
    }
}

async fn insert_address(
    tx: &mut Transaction<'_, Postgres>,
    account_id: i64,
    address: &NewAddress,
) -> Result<AddressRow, DatabaseError> {
    let sql = format!(
        r#"
        INSERT INTO address (account_id, street_address, second_address, city, state, province, postal_code, country)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {}
        "#,
        ADDRESS_COLUMNS
    );
    let row = sqlx::query_as::<_, AddressRow>(&sql)
        .bind(account_id)
        .bind(&address.street_address)
        .bind(&address.second_address)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.province)
        .bind(&address.postal_code)
        .bind(&address.country)
        .fetch_one(&mut **tx)
        .await?;

    Ok(row)
}

async fn update_address(
    tx: &mut Transaction<'_, Postgres>,
    account_id: i64,
    address_id: i64,
    address: &NewAddress,
) -> Result<AddressRow, DatabaseError> {
    let sql = format!(
        r#"
        UPDATE address
        SET street_address = $3, second_address = $4, city = $5, state = $6,
            province = $7, postal_code = $8, country = $9
        WHERE id = $1 AND account_id = $2
        RETURNING {}
        "#,
        ADDRESS_COLUMNS
    );
    let row = sqlx::query_as::<_, AddressRow>(&sql)
        .bind(address_id)
        .bind(account_id)
        .bind(&address.street_address)
        .bind(&address.second_address)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.province)
        .bind(&address.postal_code)
        .bind(&address.country)
        .fetch_one(&mut **tx)
        .await?;

    Ok(row)
}
