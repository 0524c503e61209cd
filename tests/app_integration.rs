use chrono::{Duration, Local};
use std::fs;

mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_archive_mock_server() -> MockServer {
        MockServer::start().await
    }

    pub async fn mount_day_response(server: &MockServer, date: &str, mock_response: &str) {
        Mock::given(method("GET"))
            .and(path("/p24api/exchange_rates"))
            .and(query_param("date", date))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(server)
            .await;
    }

    pub fn day_response(usd: (f64, f64), eur: (f64, f64)) -> String {
        format!(
            r#"{{
                "date": "01.12.2014",
                "bank": "PB",
                "baseCurrency": 980,
                "baseCurrencyLit": "UAH",
                "exchangeRate": [
                    {{
                        "baseCurrency": "UAH",
                        "currency": "USD",
                        "purchaseRate": {},
                        "saleRate": {}
                    }},
                    {{
                        "baseCurrency": "UAH",
                        "currency": "EUR",
                        "purchaseRate": {},
                        "saleRate": {}
                    }}
                ]
            }}"#,
            usd.0, usd.1, eur.0, eur.1
        )
    }
}

fn write_config(base_url: &str) -> tempfile::NamedTempFile {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
        provider:
          base_url: {base_url}
        currencies:
          - USD
          - EUR
    "#
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");
    config_file
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let mock_server = test_utils::create_archive_mock_server().await;

    let today = Local::now().date_naive();
    for offset in 0..=2 {
        let date = (today - Duration::days(offset)).format("%d.%m.%Y").to_string();
        test_utils::mount_day_response(
            &mock_server,
            &date,
            &test_utils::day_response((41.2, 41.8), (44.9, 45.6)),
        )
        .await;
    }

    let config_file = write_config(&mock_server.uri());

    let result = uafx::run(2, Some(config_file.path().to_str().unwrap())).await;
    assert!(
        result.is_ok(),
        "Main function failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_failed_dates_are_skipped_not_fatal() {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    let mock_server = test_utils::create_archive_mock_server().await;

    let today = Local::now().date_naive().format("%d.%m.%Y").to_string();
    Mock::given(method("GET"))
        .and(path("/p24api/exchange_rates"))
        .and(query_param("date", &today))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(test_utils::day_response((41.2, 41.8), (44.9, 45.6))),
        )
        .mount(&mock_server)
        .await;

    // Every other date gets a server error
    Mock::given(method("GET"))
        .and(path("/p24api/exchange_rates"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config_file = write_config(&mock_server.uri());

    let result = uafx::run(3, Some(config_file.path().to_str().unwrap())).await;
    assert!(
        result.is_ok(),
        "Main function failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_more_than_ten_days_makes_no_requests() {
    use wiremock::matchers::method;
    use wiremock::{Mock, ResponseTemplate};

    let mock_server = test_utils::create_archive_mock_server().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config_file = write_config(&mock_server.uri());

    let result = uafx::run(11, Some(config_file.path().to_str().unwrap())).await;
    assert!(
        result.is_ok(),
        "Main function failed with: {:?}",
        result.err()
    );

    // Dropping the server verifies the expectation of zero requests
    drop(mock_server);
}

#[test_log::test(tokio::test)]
async fn test_unreadable_config_path_fails() {
    let result = uafx::run(2, Some("/nonexistent/config.yaml")).await;
    assert!(result.is_err());
}
