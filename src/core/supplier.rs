//! Supplier directory - Who a material is bought from.
//!
//! Suppliers are optional metadata on materials. Deleting a supplier keeps its
//! materials and only clears their link.

use crate::{
    entities::{Material, Supplier, material, supplier},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::info;

/// Input for [`create_supplier`].
#[derive(Debug, Clone, Default)]
pub struct NewSupplier {
    /// Unique supplier name
    pub name: String,
    /// Contact email address
    pub contact_email: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Retrieves all suppliers, ordered by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_suppliers(db: &DatabaseConnection) -> Result<Vec<supplier::Model>> {
    Supplier::find()
        .order_by_asc(supplier::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a supplier by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_supplier_by_id(
    db: &DatabaseConnection,
    supplier_id: i64,
) -> Result<Option<supplier::Model>> {
    Supplier::find_by_id(supplier_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a supplier by exact name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_supplier_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<supplier::Model>> {
    Supplier::find()
        .filter(supplier::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a supplier. Blank optional fields are stored as `NULL`.
///
/// # Errors
/// Returns an error if the name is blank or already taken.
pub async fn create_supplier(
    db: &DatabaseConnection,
    new_supplier: NewSupplier,
) -> Result<supplier::Model> {
    if new_supplier.name.trim().is_empty() {
        return Err(Error::Config {
            message: "Supplier name cannot be empty".to_string(),
        });
    }

    let created = supplier::ActiveModel {
        name: Set(new_supplier.name.trim().to_string()),
        contact_email: Set(non_blank(new_supplier.contact_email)),
        phone: Set(non_blank(new_supplier.phone)),
        notes: Set(non_blank(new_supplier.notes)),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created supplier '{}'", created.name);
    Ok(created)
}

/// Deletes a supplier and clears the link on every material that referenced it.
///
/// Returns the number of materials that were unlinked.
///
/// # Errors
/// Returns `SupplierNotFound` if the supplier does not exist.
pub async fn delete_supplier(db: &DatabaseConnection, supplier_id: i64) -> Result<u64> {
    let txn = db.begin().await?;

    let supplier = Supplier::find_by_id(supplier_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::SupplierNotFound {
            name: supplier_id.to_string(),
        })?;

    let unlinked = Material::update_many()
        .col_expr(
            material::Column::SupplierId,
            Expr::value(Option::<i64>::None),
        )
        .filter(material::Column::SupplierId.eq(supplier_id))
        .exec(&txn)
        .await?
        .rows_affected;

    Supplier::delete_by_id(supplier_id).exec(&txn).await?;
    txn.commit().await?;

    info!(
        "Deleted supplier '{}', unlinked {unlinked} material(s)",
        supplier.name
    );
    Ok(unlinked)
}
