//! Catalog Models

use percentage::Percentage;
use propbox::discounts::DiscountWindow;

use crate::{
    domain::catalog::{errors::CatalogServiceError, records::PropRecord},
    ids::OpaqueId,
};

/// Prop id issued by the catalog service.
pub type PropId = OpaqueId<Prop>;

/// A catalog entry: a prop that can be purchased or rented.
#[derive(Debug, Clone)]
pub struct Prop {
    pub id: PropId,
    pub name: String,
    pub categories: Vec<String>,
    /// Unit purchase price in minor units.
    pub purchase_price: u64,
    /// Weekly rental price in minor units.
    pub rental_price: u64,
    pub available_stock: u32,
    pub available: bool,
    pub discount: Option<DiscountWindow>,
}

impl TryFrom<PropRecord> for Prop {
    type Error = CatalogServiceError;

    /// Normalizes a catalog record at the service boundary.
    ///
    /// A record flagged as discounted must carry a complete, well-formed
    /// window; anything else is rejected here so read paths never see a
    /// malformed discount.
    fn try_from(record: PropRecord) -> Result<Self, Self::Error> {
        let discount = if record.has_discount {
            let (Some(starts_at), Some(ends_at)) = (record.discount_start, record.discount_end)
            else {
                return Err(CatalogServiceError::InvalidDiscountWindow);
            };

            if !record.discount_percent.is_finite()
                || !(0.0..=100.0).contains(&record.discount_percent)
            {
                return Err(CatalogServiceError::InvalidDiscountWindow);
            }

            let percent = Percentage::from_decimal(record.discount_percent / 100.0);

            Some(
                DiscountWindow::new(percent, starts_at, ends_at)
                    .map_err(|_| CatalogServiceError::InvalidDiscountWindow)?,
            )
        } else {
            None
        };

        Ok(Self {
            id: PropId::new(record.id),
            name: record.name,
            categories: record.category,
            purchase_price: record.purchase_price,
            rental_price: record.rental_price,
            available_stock: record.available_stock,
            available: record.availability_status.as_deref() != Some("no"),
            discount,
        })
    }
}
