use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One denormalized output row: a single product occurrence together with
/// the aisle and store it was listed under.
///
/// Every field except `date` is `None` when the source response did not
/// carry it. Identifiers are kept as strings so that large numeric ids
/// survive every export format unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRecord {
    /// Calendar date the row was produced, not a value from the response.
    pub date: NaiveDate,
    pub aisle_name: Option<String>,
    pub product_name: Option<String>,
    pub product_id: Option<String>,
    pub brand: Option<String>,
    pub brand_id: Option<String>,
    pub price: Option<f64>,
    /// Free-form package description, e.g. `"1 L"` or `"6 x 350 ml"`.
    pub package: Option<String>,
    pub store_name: Option<String>,
    pub store_id: Option<String>,
    pub store_city: Option<String>,
    pub search_term: Option<String>,
}

impl FlatRecord {
    /// Column names in serialization order.
    pub const COLUMNS: [&'static str; 12] = [
        "date",
        "aisle_name",
        "product_name",
        "product_id",
        "brand",
        "brand_id",
        "price",
        "package",
        "store_name",
        "store_id",
        "store_city",
        "search_term",
    ];

    /// A record stamped with `date` and no other values. Test fixture base
    /// for this crate and its dependents.
    #[doc(hidden)]
    #[must_use]
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            aisle_name: None,
            product_name: None,
            product_id: None,
            brand: None,
            brand_id: None,
            price: None,
            package: None,
            store_name: None,
            store_id: None,
            store_city: None,
            search_term: None,
        }
    }
}
