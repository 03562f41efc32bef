use serde_json::json;

use super::*;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

fn product(name: &str) -> Value {
    json!({
        "name": name,
        "id": 1,
        "brand": {"name": "B", "id": 2},
        "pricing": {"price": {"amount": 1.0}},
        "package": "1 un"
    })
}

fn store(name: &str, aisles: Value) -> Value {
    json!({
        "store": {"name": name, "id": 10, "closest_branch": {"city": "Floripa"}},
        "search_result": {"search_term": "leite", "aisles": aisles}
    })
}

#[test]
fn single_product_fixture() {
    let response = json!({"results":[{"store":{"name":"S1","id":1,"closest_branch":{"city":"X"}},"search_result":{"search_term":"milk","aisles":[{"aisle_name":"Dairy","products":[{"name":"Milk 1L","id":9,"brand":{"name":"B","id":2},"pricing":{"price":{"amount":5.5}},"package":"1L"}]}]}}]});

    let rows = flatten_response(&response, day());

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.date, day());
    assert_eq!(row.product_name.as_deref(), Some("Milk 1L"));
    assert_eq!(row.product_id.as_deref(), Some("9"));
    assert_eq!(row.price, Some(5.5));
    assert_eq!(row.store_name.as_deref(), Some("S1"));
    assert_eq!(row.store_id.as_deref(), Some("1"));
    assert_eq!(row.store_city.as_deref(), Some("X"));
    assert_eq!(row.search_term.as_deref(), Some("milk"));
    assert_eq!(row.aisle_name.as_deref(), Some("Dairy"));
    assert_eq!(row.brand.as_deref(), Some("B"));
    assert_eq!(row.brand_id.as_deref(), Some("2"));
    assert_eq!(row.package.as_deref(), Some("1L"));
}

#[test]
fn absent_results_yield_no_rows() {
    assert!(flatten_response(&json!({}), day()).is_empty());
    assert!(!has_results_list(&json!({})));
}

#[test]
fn non_list_results_yield_no_rows() {
    for response in [
        json!({"results": null}),
        json!({"results": {"store": {}}}),
        json!({"results": "oops"}),
        json!([1, 2, 3]),
    ] {
        assert!(flatten_response(&response, day()).is_empty(), "{response}");
        assert!(!has_results_list(&response), "{response}");
    }
}

#[test]
fn empty_results_list_is_still_a_results_list() {
    let response = json!({"results": []});
    assert!(has_results_list(&response));
    assert!(flatten_response(&response, day()).is_empty());
}

#[test]
fn row_count_is_sum_over_stores_aisles_products() {
    let response = json!({"results": [
        store("S1", json!([
            {"aisle_name": "A", "products": [product("p1"), product("p2"), product("p3")]},
            {"aisle_name": "B", "products": [product("p4")]},
        ])),
        store("S2", json!([
            {"aisle_name": "A", "products": []},
            {"aisle_name": "C", "products": [product("p1"), product("p1")]},
        ])),
        store("S3", json!([])),
    ]});

    let rows = flatten_response(&response, day());

    assert_eq!(rows.len(), 3 + 1 + 2);
    let names: Vec<_> = rows
        .iter()
        .map(|r| {
            (
                r.store_name.as_deref().unwrap(),
                r.aisle_name.as_deref().unwrap(),
                r.product_name.as_deref().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        names,
        vec![
            ("S1", "A", "p1"),
            ("S1", "A", "p2"),
            ("S1", "A", "p3"),
            ("S1", "B", "p4"),
            ("S2", "C", "p1"),
            ("S2", "C", "p1"),
        ]
    );
}

#[test]
fn missing_aisle_list_yields_no_rows_for_that_store() {
    let response = json!({"results": [
        {"store": {"name": "S1"}, "search_result": {"search_term": "x"}},
        {"store": {"name": "S2"}},
        {"store": {"name": "S3"}, "search_result": {"aisles": null}},
        store("S4", json!([{"aisle_name": "A", "products": [product("p")]}])),
    ]});

    let rows = flatten_response(&response, day());

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].store_name.as_deref(), Some("S4"));
}

#[test]
fn missing_product_list_yields_no_rows_for_that_aisle() {
    let response = json!({"results": [store("S1", json!([
        {"aisle_name": "A"},
        {"aisle_name": "B", "products": null},
        {"aisle_name": "C", "products": [product("p")]},
    ]))]});

    let rows = flatten_response(&response, day());

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].aisle_name.as_deref(), Some("C"));
}

#[test]
fn product_without_brand_pricing_or_package_uses_placeholders() {
    let response = json!({"results": [store("S1", json!([
        {"aisle_name": "A", "products": [{"name": "Bare"}]},
    ]))]});

    let rows = flatten_response(&response, day());

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.product_name.as_deref(), Some("Bare"));
    assert_eq!(row.brand, None);
    assert_eq!(row.brand_id, None);
    assert_eq!(row.price, None);
    assert_eq!(row.package, None);
    assert_eq!(row.product_id, None);
    assert_eq!(row.store_name.as_deref(), Some("S1"));
}

#[test]
fn partial_nesting_short_circuits_to_placeholder() {
    let response = json!({"results": [store("S1", json!([
        {"aisle_name": "A", "products": [
            {"name": "a", "brand": null, "pricing": {"price": null}},
            {"name": "b", "brand": {"id": 7}, "pricing": {}},
            {"name": "c", "pricing": {"price": {"amount": "12.90"}}},
        ]},
    ]))]});

    let rows = flatten_response(&response, day());

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].brand, None);
    assert_eq!(rows[0].price, None);
    assert_eq!(rows[1].brand, None);
    assert_eq!(rows[1].brand_id.as_deref(), Some("7"));
    assert_eq!(rows[1].price, None);
    assert_eq!(rows[2].price, Some(12.9));
}

#[test]
fn store_without_closest_branch_has_no_city() {
    let response = json!({"results": [{
        "store": {"name": "S1", "id": "abc"},
        "search_result": {"aisles": [{"products": [product("p")]}]}
    }]});

    let rows = flatten_response(&response, day());

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].store_id.as_deref(), Some("abc"));
    assert_eq!(rows[0].store_city, None);
    assert_eq!(rows[0].search_term, None);
    assert_eq!(rows[0].aisle_name, None);
}

#[test]
fn non_object_product_still_counts_as_a_row() {
    let response = json!({"results": [store("S1", json!([
        {"aisle_name": "A", "products": [null, product("p")]},
    ]))]});

    let rows = flatten_response(&response, day());

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].product_name, None);
    assert_eq!(rows[0].store_name.as_deref(), Some("S1"));
    assert_eq!(rows[0].aisle_name.as_deref(), Some("A"));
}

#[test]
fn flatten_today_stamps_local_date() {
    let response = json!({"results": [store("S1", json!([
        {"aisle_name": "A", "products": [product("p")]},
    ]))]});
    let before = chrono::Local::now().date_naive();

    let rows = flatten_today(&response);

    let after = chrono::Local::now().date_naive();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].date >= before && rows[0].date <= after);
}
