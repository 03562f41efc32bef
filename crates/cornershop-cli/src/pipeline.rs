//! Single-query pipeline: fetch → flatten → export.

use std::path::PathBuf;

use anyhow::Context;
use cornershop_core::{ExportFormat, FlatRecord};
use cornershop_scraper::{
    flatten_today, has_results_list, normalize_country, normalize_postal_code, CornershopClient,
    FetchError, Throttle,
};

/// Everything needed to run one search and export it.
#[derive(Debug, Clone)]
pub(crate) struct FetchRequest {
    pub query: String,
    pub postal_code: String,
    pub country: String,
    pub output_dir: PathBuf,
    pub base_name: String,
    pub format: ExportFormat,
}

/// Validates the search area, waits on `throttle`, searches once, and
/// flattens the response. An invalid postal code or country fails without
/// waiting.
///
/// Returns `Ok(None)` when the response has no `results` list; callers
/// must not write an output file in that case.
///
/// # Errors
///
/// Propagates any [`FetchError`] from the search.
pub(crate) async fn fetch_records(
    client: &CornershopClient,
    throttle: Throttle,
    query: &str,
    postal_code: &str,
    country: &str,
) -> Result<Option<Vec<FlatRecord>>, FetchError> {
    let postal_code = normalize_postal_code(postal_code)?;
    let country = normalize_country(country)?;

    throttle.wait().await;
    let response = client.search(query, &postal_code, &country).await?;

    if !has_results_list(&response) {
        tracing::warn!(query, "'results' is missing or not a list in the response");
        return Ok(None);
    }

    let records = flatten_today(&response);
    tracing::info!(query, records = records.len(), "flattened search results");
    Ok(Some(records))
}

/// Runs the full pipeline for one query and returns the exported path, or
/// `None` when the response carried nothing to export.
///
/// # Errors
///
/// Fetch failures are returned before anything touches the filesystem.
/// Export failures are returned with the attempted path.
pub(crate) async fn run_fetch(
    client: &CornershopClient,
    throttle: Throttle,
    request: &FetchRequest,
) -> anyhow::Result<Option<PathBuf>> {
    let Some(records) = fetch_records(
        client,
        throttle,
        &request.query,
        &request.postal_code,
        &request.country,
    )
    .await
    .with_context(|| format!("failed to fetch results for \"{}\"", request.query))?
    else {
        return Ok(None);
    };

    let path = cornershop_export::export_records_at(
        &records,
        &request.output_dir,
        &request.base_name,
        request.format,
        chrono::Local::now().naive_local(),
    )?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn request(dir: &std::path::Path, format: ExportFormat) -> FetchRequest {
        FetchRequest {
            query: "milk".to_owned(),
            postal_code: "88010560".to_owned(),
            country: "BR".to_owned(),
            output_dir: dir.to_path_buf(),
            base_name: "product_data".to_owned(),
            format,
        }
    }

    async fn server_returning(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/branches/search"))
            .respond_with(template)
            .mount(&server)
            .await;
        server
    }

    fn client(server: &MockServer) -> CornershopClient {
        CornershopClient::new(&server.uri(), 5, "Mozilla/5.0").unwrap()
    }

    fn milk_body() -> serde_json::Value {
        json!({"results":[{"store":{"name":"S1","id":1,"closest_branch":{"city":"X"}},"search_result":{"search_term":"milk","aisles":[{"aisle_name":"Dairy","products":[{"name":"Milk 1L","id":9,"brand":{"name":"B","id":2},"pricing":{"price":{"amount":5.5}},"package":"1L"}]}]}}]})
    }

    #[tokio::test]
    async fn run_fetch_exports_flattened_records() {
        let server = server_returning(ResponseTemplate::new(200).set_body_json(milk_body())).await;
        let dir = tempfile::tempdir().unwrap();

        let path = run_fetch(
            &client(&server),
            Throttle::none(),
            &request(dir.path(), ExportFormat::Json),
        )
        .await
        .unwrap()
        .expect("expected an exported file");

        let records = cornershop_export::read_ndjson(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].product_name.as_deref(), Some("Milk 1L"));
        assert_eq!(records[0].price, Some(5.5));
        assert_eq!(records[0].store_city.as_deref(), Some("X"));
    }

    #[tokio::test]
    async fn fetch_failure_writes_nothing() {
        let server = server_returning(ResponseTemplate::new(500)).await;
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");

        let err = run_fetch(
            &client(&server),
            Throttle::none(),
            &request(&out, ExportFormat::Csv),
        )
        .await
        .unwrap_err();

        assert!(
            matches!(
                err.downcast_ref::<FetchError>(),
                Some(FetchError::UnexpectedStatus { status: 500, .. })
            ),
            "got: {err:?}"
        );
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn invalid_json_writes_nothing() {
        let server =
            server_returning(ResponseTemplate::new(200).set_body_string("not json")).await;
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");

        let err = run_fetch(
            &client(&server),
            Throttle::none(),
            &request(&out, ExportFormat::Csv),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::InvalidJson { .. })
        ));
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn missing_results_list_exports_nothing() {
        let server = server_returning(
            ResponseTemplate::new(200).set_body_json(json!({"results": {"oops": true}})),
        )
        .await;
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");

        let result = run_fetch(
            &client(&server),
            Throttle::none(),
            &request(&out, ExportFormat::Parquet),
        )
        .await
        .unwrap();

        assert!(result.is_none());
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn empty_results_list_still_exports_header_only_file() {
        let server =
            server_returning(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
                .await;
        let dir = tempfile::tempdir().unwrap();

        let path = run_fetch(
            &client(&server),
            Throttle::none(),
            &request(dir.path(), ExportFormat::Csv),
        )
        .await
        .unwrap()
        .expect("expected an exported file");

        assert!(cornershop_export::read_csv(&path).unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_country_fails_without_waiting_on_throttle() {
        let client = CornershopClient::new("http://127.0.0.1:9", 5, "Mozilla/5.0").unwrap();
        let start = tokio::time::Instant::now();

        let err = fetch_records(&client, Throttle::from_secs(60), "milk", "88010560", "Brazil")
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::InvalidCountry(_)), "got: {err:?}");
        assert!(start.elapsed() < std::time::Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_postal_code_fails_without_waiting_on_throttle() {
        let client = CornershopClient::new("http://127.0.0.1:9", 5, "Mozilla/5.0").unwrap();
        let start = tokio::time::Instant::now();

        let err = fetch_records(&client, Throttle::from_secs(60), "milk", "88010-560", "BR")
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::InvalidPostalCode(_)), "got: {err:?}");
        assert!(start.elapsed() < std::time::Duration::from_secs(60));
    }
}
