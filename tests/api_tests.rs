//! WeatherClient against a one-shot local HTTP server

use city_weather::api::{QueryError, WeatherClient};
use city_weather::config::ApiConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const BODY: &str = r#"{"weather":[{"description":"overcast clouds"}],
"main":{"temp":31.4,"feels_like":36.0,"temp_min":30.1,"temp_max":32.2},
"sys":{"country":"IN","sunrise":1718150000,"sunset":1718196000},
"name":"Pune"}"#;

/// Serve one response, hand back the raw request line.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let n = socket.read(&mut buf).await.unwrap();
        let request = String::from_utf8_lossy(&buf[..n]).to_string();

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        request.lines().next().unwrap_or_default().to_string()
    });

    (base_url, handle)
}

fn client(base_url: String) -> WeatherClient {
    WeatherClient::new(ApiConfig {
        base_url,
        api_key: "TEST_KEY".into(),
    })
}

#[tokio::test]
async fn test_success_decodes_report() {
    let (base_url, server) = serve_once("200 OK", BODY).await;

    let report = client(base_url).current_weather("Pune").await.unwrap();
    let request_line = server.await.unwrap();

    assert_eq!(
        request_line,
        "GET /weather?q=Pune&appid=TEST_KEY&units=metric HTTP/1.1"
    );
    assert_eq!(report.city, "Pune");
    assert_eq!(report.country, "IN");
    assert_eq!(report.temperature, 31.4);
    assert_eq!(report.max_temperature, 32.2);
    assert_eq!(report.min_temperature, 30.1);
    assert_eq!(report.feels_like, 36.0);
    assert_eq!(report.description, "overcast clouds");
    assert_eq!(report.sunrise, 1_718_150_000);
    assert_eq!(report.sunset, 1_718_196_000);
}

#[tokio::test]
async fn test_city_is_percent_encoded() {
    let (base_url, server) = serve_once("200 OK", BODY).await;

    client(base_url).current_weather("New Delhi").await.unwrap();
    let request_line = server.await.unwrap();

    assert!(request_line.contains("q=New%20Delhi&"), "{}", request_line);
}

#[tokio::test]
async fn test_not_found_status_is_an_error() {
    let (base_url, server) = serve_once(
        "404 Not Found",
        r#"{"cod":"404","message":"city not found"}"#,
    )
    .await;

    let err = client(base_url).current_weather("Atlantis").await.unwrap_err();
    server.await.unwrap();

    match err {
        QueryError::Status { status, body } => {
            assert_eq!(status.as_u16(), 404);
            assert!(body.contains("city not found"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_an_error() {
    let (base_url, server) = serve_once("200 OK", r#"{"name":"Pune","main":{}}"#).await;

    let err = client(base_url).current_weather("Pune").await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, QueryError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn test_unreachable_provider_is_an_error() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client(base_url).current_weather("Pune").await.unwrap_err();

    assert!(matches!(err, QueryError::Request(_)), "{err:?}");
}
