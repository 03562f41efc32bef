//! Flattening of search responses into [`FlatRecord`] rows.
//!
//! The response nests `results → search_result → aisles → products`; one
//! row is produced per product occurrence with its store and aisle context
//! copied in. Missing links at any depth become `None`, never an error.

use chrono::NaiveDate;
use cornershop_core::FlatRecord;
use serde_json::Value;

use crate::nested::{get_array, get_f64, get_text};

/// Returns `true` when the response carries a `results` array, even an
/// empty one.
#[must_use]
pub fn has_results_list(response: &Value) -> bool {
    response.get("results").is_some_and(Value::is_array)
}

/// Flattens a whole search response. A response whose `results` is absent
/// or not an array yields no rows.
#[must_use]
pub fn flatten_response(response: &Value, date: NaiveDate) -> Vec<FlatRecord> {
    flatten_results(get_array(response, &["results"]), date)
}

/// [`flatten_response`] stamped with today's local date.
#[must_use]
pub fn flatten_today(response: &Value) -> Vec<FlatRecord> {
    flatten_response(response, chrono::Local::now().date_naive())
}

/// Flattens a sequence of store results.
///
/// Emits exactly one record per product in every aisle of every store, in
/// response order, without deduplication.
#[must_use]
pub fn flatten_results(results: &[Value], date: NaiveDate) -> Vec<FlatRecord> {
    let mut rows = Vec::new();

    for store_result in results {
        let store = StoreContext::from_result(store_result);

        for aisle in get_array(store_result, &["search_result", "aisles"]) {
            let aisle_name = get_text(aisle, &["aisle_name"]);

            for product in get_array(aisle, &["products"]) {
                rows.push(build_row(date, &store, aisle_name.as_deref(), product));
            }
        }
    }

    tracing::debug!(stores = results.len(), rows = rows.len(), "flattened search results");
    rows
}

/// Store-level fields shared by every row of one store result.
struct StoreContext {
    name: Option<String>,
    id: Option<String>,
    city: Option<String>,
    search_term: Option<String>,
}

impl StoreContext {
    fn from_result(store_result: &Value) -> Self {
        Self {
            name: get_text(store_result, &["store", "name"]),
            id: get_text(store_result, &["store", "id"]),
            city: get_text(store_result, &["store", "closest_branch", "city"]),
            search_term: get_text(store_result, &["search_result", "search_term"]),
        }
    }
}

fn build_row(
    date: NaiveDate,
    store: &StoreContext,
    aisle_name: Option<&str>,
    product: &Value,
) -> FlatRecord {
    FlatRecord {
        date,
        aisle_name: aisle_name.map(str::to_owned),
        product_name: get_text(product, &["name"]),
        product_id: get_text(product, &["id"]),
        brand: get_text(product, &["brand", "name"]),
        brand_id: get_text(product, &["brand", "id"]),
        price: get_f64(product, &["pricing", "price", "amount"]),
        package: get_text(product, &["package"]),
        store_name: store.name.clone(),
        store_id: store.id.clone(),
        store_city: store.city.clone(),
        search_term: store.search_term.clone(),
    }
}

#[cfg(test)]
#[path = "flatten_test.rs"]
mod tests;
