//! Request/response behaviour of the shared transport against a mock server.

use httpmock::prelude::*;
use mailtrap_client::{Body, Client, DecodeTarget, Error};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderValue};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const API_KEY: &str = "test-api-token";

fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .api_key(API_KEY)
        .testing_url(server.base_url())
        .sending_url(server.url("/sending"))
        .build()
        .unwrap()
}

#[tokio::test]
async fn requests_carry_auth_accept_and_user_agent() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/accounts")
                .header("authorization", "Bearer test-api-token")
                .header("accept", "application/json")
                .header_exists("user-agent");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([{"id": 26730, "name": "James", "access_levels": [100]}]));
        })
        .await;

    let (accounts, response) = client_for(&server).accounts().list().await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].id, 26730);
    assert_eq!(accounts[0].access_levels, vec![100]);
}

#[tokio::test]
async fn bad_request_becomes_api_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/accounts");
            then.status(400).body(r#"{"message":"Bad Request"}"#);
        })
        .await;

    let err = client_for(&server).accounts().list().await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    match err {
        Error::Api(api) => {
            assert_eq!(api.message(), "Bad Request");
            assert!(api.errors().is_empty());
            assert_eq!(api.response().status(), StatusCode::BAD_REQUEST);
            assert_eq!(api.response().url().path(), "/accounts");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn error_list_is_preserved() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/accounts/1/projects");
            then.status(422)
                .json_body(json!({"message": "Invalid", "errors": ["Name is too short", "Name is taken"]}));
        })
        .await;

    let err = client_for(&server)
        .projects()
        .create(1, "x")
        .await
        .unwrap_err();

    let Error::Api(api) = err else {
        panic!("expected api error");
    };
    assert_eq!(api.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(api.message(), "Invalid");
    assert_eq!(api.errors(), ["Name is too short", "Name is taken"]);
}

#[tokio::test]
async fn html_error_page_is_kept_verbatim() {
    let server = MockServer::start_async().await;
    let page = "<html><body><h1>503 Service Unavailable</h1></body></html>";
    server
        .mock_async(|when, then| {
            when.method(GET).path("/accounts/1/inboxes");
            then.status(503)
                .header("content-type", "text/html")
                .header("retry-after", "30")
                .body(page);
        })
        .await;

    let err = client_for(&server).inboxes().list(1).await.unwrap_err();

    let Error::Api(api) = err else {
        panic!("expected api error");
    };
    assert_eq!(api.message(), page);
    assert!(api.errors().is_empty());
    assert_eq!(api.response().headers()["retry-after"], "30");
}

#[tokio::test]
async fn raw_body_is_returned_unmodified() {
    let server = MockServer::start_async().await;
    let raw = "Received: from example.com\r\nSubject: hi\r\n\r\n  body with trailing space \n";
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/accounts/1/inboxes/2/messages/3/body.raw")
                .header("accept", "text/plain");
            then.status(200).header("content-type", "text/plain").body(raw);
        })
        .await;

    let (body, _) = client_for(&server)
        .messages()
        .as_raw(1, 2, 3)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(body, raw.as_bytes());
}

#[tokio::test]
async fn body_variants_send_their_accept_header() {
    let server = MockServer::start_async().await;
    let html = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/accounts/1/inboxes/2/messages/3/body.html")
                .header("accept", "text/html");
            then.status(200).body("<p>hi</p>");
        })
        .await;
    let source = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/accounts/1/inboxes/2/messages/3/body.htmlsource")
                .header("accept", "text/html");
            then.status(200).body("&lt;p&gt;hi&lt;/p&gt;");
        })
        .await;
    let text = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/accounts/1/inboxes/2/messages/3/body.txt")
                .header("accept", "text/plain");
            then.status(200).body("hi");
        })
        .await;
    let eml = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/accounts/1/inboxes/2/messages/3/body.eml")
                .header("accept", "message/rfc822");
            then.status(200).body("Subject: hi\r\n\r\nhi");
        })
        .await;

    let client = client_for(&server);
    let messages = client.messages();
    assert_eq!(messages.as_html(1, 2, 3).await.unwrap().0, "<p>hi</p>");
    assert_eq!(
        messages.as_html_source(1, 2, 3).await.unwrap().0,
        "&lt;p&gt;hi&lt;/p&gt;"
    );
    assert_eq!(messages.as_text(1, 2, 3).await.unwrap().0, "hi");
    assert_eq!(messages.as_eml(1, 2, 3).await.unwrap().0, b"Subject: hi\r\n\r\nhi");

    html.assert_async().await;
    source.assert_async().await;
    text.assert_async().await;
    eml.assert_async().await;
}

#[tokio::test]
async fn json_target_requires_json_accept() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/accounts/1/inboxes/2/messages/3/body.html");
            then.status(200).body("<p>hi</p>");
        })
        .await;

    let client = client_for(&server);
    let mut request = client
        .new_request(reqwest::Method::GET, "/accounts/1/inboxes/2/messages/3/body.html", None::<&()>)
        .unwrap();
    request
        .headers_mut()
        .insert(ACCEPT, HeaderValue::from_static("text/html"));

    let err = client
        .execute::<serde_json::Value>(request, DecodeTarget::Json)
        .await
        .unwrap_err();

    let Error::Decode(decode) = err else {
        panic!("expected decode error");
    };
    assert_eq!(decode.message(), "undefined response type");
    assert_eq!(decode.response().map(|r| r.status()), Some(StatusCode::OK));
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/accounts");
            then.status(200).body("{not json");
        })
        .await;

    let err = client_for(&server).accounts().list().await.unwrap_err();

    assert!(matches!(err, Error::Decode(_)));
    assert_eq!(err.status(), Some(StatusCode::OK));
}

#[tokio::test]
async fn execute_returns_envelope_and_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/accounts/1/inboxes/2/messages/3/attachments/4/download");
            then.status(200)
                .header("x-request-id", "abc")
                .body([0u8, 159, 146, 150].as_slice());
        })
        .await;

    let client = client_for(&server);
    let request = client
        .new_request(
            reqwest::Method::GET,
            "/accounts/1/inboxes/2/messages/3/attachments/4/download",
            None::<&()>,
        )
        .unwrap();
    let (response, body) = client
        .execute::<()>(request, DecodeTarget::Bytes)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "abc");
    assert_eq!(body, Body::Bytes(vec![0, 159, 146, 150]));
}

#[tokio::test]
async fn discarded_body_still_returns_status() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/accounts/1/inboxes/2");
            then.status(200).json_body(json!({"id": 2, "name": "gone"}));
        })
        .await;

    let response = client_for(&server).inboxes().delete(1, 2).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(*response.method(), reqwest::Method::DELETE);
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let client = Client::builder()
        .api_key(API_KEY)
        .testing_url("http://127.0.0.1:1")
        .build()
        .unwrap();

    let err = client.accounts().list().await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)), "got {err:?}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn success_keeps_status_and_headers() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/accounts/1/inboxes/2");
            then.status(200)
                .header("x-ratelimit-remaining", "149")
                .json_body(json!({"id": 2, "name": "Staging"}));
        })
        .await;

    let (inbox, response) = client_for(&server).inboxes().get(1, 2).await.unwrap();

    assert_eq!(inbox.name, "Staging");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(*response.method(), reqwest::Method::GET);
    assert_eq!(response.url().path(), "/accounts/1/inboxes/2");
    assert_eq!(response.headers()["x-ratelimit-remaining"], "149");
}

#[tokio::test]
async fn eight_bit_eml_is_returned_byte_for_byte() {
    let server = MockServer::start_async().await;
    let eml: &[u8] = b"Content-Transfer-Encoding: 8bit\r\nSubject: caf\xe9\r\n\r\ncaf\xe9 cr\xe8me\r\n";
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/accounts/1/inboxes/2/messages/3/body.eml")
                .header("accept", "message/rfc822");
            then.status(200).header("content-type", "message/rfc822").body(eml);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/accounts/1/inboxes/2/messages/3/body.raw");
            then.status(200).body(eml);
        })
        .await;

    let client = client_for(&server);
    let (body, response) = client.messages().as_eml(1, 2, 3).await.unwrap();
    assert_eq!(body, eml);
    assert_eq!(response.headers()["content-type"], "message/rfc822");

    let (raw, _) = client.messages().as_raw(1, 2, 3).await.unwrap();
    assert_eq!(raw, eml);
}

#[tokio::test]
async fn non_utf8_text_target_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/accounts/1/inboxes/2/messages/3/body.txt");
            then.status(200).body(b"caf\xe9".as_slice());
        })
        .await;

    let err = client_for(&server)
        .messages()
        .as_text(1, 2, 3)
        .await
        .unwrap_err();

    let Error::Decode(decode) = err else {
        panic!("expected decode error");
    };
    assert_eq!(decode.message(), "response body is not valid UTF-8");
    assert_eq!(decode.response().map(|r| r.status()), Some(StatusCode::OK));
}

#[tokio::test]
async fn bytes_target_passes_invalid_utf8_through() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/accounts/1/inboxes/2/messages/3/body.raw");
            then.status(200).body([0xffu8, 0xfe, b'h', b'i'].as_slice());
        })
        .await;

    let client = client_for(&server);
    let mut request = client
        .new_request(reqwest::Method::GET, "/accounts/1/inboxes/2/messages/3/body.raw", None::<&()>)
        .unwrap();
    request
        .headers_mut()
        .insert(ACCEPT, HeaderValue::from_static("text/plain"));

    let (response, body) = client
        .execute::<()>(request, DecodeTarget::Bytes)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body, Body::Bytes(vec![0xff, 0xfe, b'h', b'i']));
}

#[tokio::test]
async fn body_cut_short_keeps_the_envelope() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await.unwrap();
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\n\
                  content-type: application/json\r\n\
                  content-length: 100\r\n\
                  x-request-id: cut\r\n\
                  \r\n\
                  [{\"id\":",
            )
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let client = Client::builder()
        .api_key(API_KEY)
        .testing_url(format!("http://{addr}"))
        .build()
        .unwrap();
    let err = client.accounts().list().await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::OK));
    let Error::Decode(decode) = err else {
        panic!("expected decode error");
    };
    assert_eq!(decode.message(), "failed to read response body");
    let response = decode.response().unwrap();
    assert_eq!(response.headers()["x-request-id"], "cut");
    assert_eq!(response.url().path(), "/accounts");
}
