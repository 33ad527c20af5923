//! QR-code repository for database operations.

use sqlx::PgPool;

use merchant_qr_core::QrCodeId;

use super::RepositoryError;
use crate::models::{QrCode, QrCodeInput};

/// Repository for QR-code database operations.
pub struct QrCodeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> QrCodeRepository<'a> {
    /// Create a new QR-code repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a record by its ID. Absent records are `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: QrCodeId) -> Result<Option<QrCode>, RepositoryError> {
        let row = sqlx::query_as::<_, QrCode>(
            r"
            SELECT id, shop, title, product_id, product_handle, product_variant_id,
                   destination, scans, created_at
            FROM qr_code
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Get all records for a shop, newest id first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_shop(&self, shop: &str) -> Result<Vec<QrCode>, RepositoryError> {
        let rows = sqlx::query_as::<_, QrCode>(
            r"
            SELECT id, shop, title, product_id, product_handle, product_variant_id,
                   destination, scans, created_at
            FROM qr_code
            WHERE shop = $1
            ORDER BY id DESC
            ",
        )
        .bind(shop)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert a new record and return it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &QrCodeInput) -> Result<QrCode, RepositoryError> {
        let row = sqlx::query_as::<_, QrCode>(
            r"
            INSERT INTO qr_code
                (shop, title, product_id, product_handle, product_variant_id, destination)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, shop, title, product_id, product_handle, product_variant_id,
                      destination, scans, created_at
            ",
        )
        .bind(&input.shop)
        .bind(&input.title)
        .bind(&input.product_id)
        .bind(&input.product_handle)
        .bind(&input.product_variant_id)
        .bind(input.destination)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    /// Update an existing record and return it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no record has the given id.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: QrCodeId,
        input: &QrCodeInput,
    ) -> Result<QrCode, RepositoryError> {
        let row = sqlx::query_as::<_, QrCode>(
            r"
            UPDATE qr_code
            SET title = $2, product_id = $3, product_handle = $4,
                product_variant_id = $5, destination = $6
            WHERE id = $1
            RETURNING id, shop, title, product_id, product_handle, product_variant_id,
                      destination, scans, created_at
            ",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.product_id)
        .bind(&input.product_handle)
        .bind(&input.product_variant_id)
        .bind(input.destination)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)
    }

    /// Delete a record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no record has the given id.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: QrCodeId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM qr_code WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Increment the scan counter for a record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no record has the given id.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn increment_scan_count(&self, id: QrCodeId) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE qr_code SET scans = scans + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
