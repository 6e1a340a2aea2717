//! End-to-end shell sessions: scripted lines in, rendered JSON out, with
//! the real HTTP transport talking to wiremock.

mod common;

use elasticshell::repl::io::{MockLineSource, MockPager, PageSignal, SharedWriter};
use elasticshell::repl::services::HttpTransport;
use elasticshell::{parse_line, AppController, ParsedCommand, RequestDispatcher, SessionConfig};
use wiremock::matchers::{basic_auth, body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Transcript {
    messages: String,
    responses: String,
}

/// Run the shell over `lines` on a blocking thread
async fn run_shell(
    session: SessionConfig,
    lines: Vec<String>,
    signals: Vec<PageSignal>,
    page_size: usize,
) -> Transcript {
    tokio::task::spawn_blocking(move || {
        let messages = SharedWriter::new();
        let responses = SharedWriter::new();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut app = AppController::with_io(
            session,
            HttpTransport::new().unwrap(),
            MockLineSource::from_lines(&refs),
            messages.clone(),
            responses.clone(),
            MockPager::new(signals),
            page_size,
        );
        app.run().unwrap();
        Transcript {
            messages: messages.contents(),
            responses: responses.contents(),
        }
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn set_commands_should_redirect_requests_to_the_server() {
    common::init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"name":"node-1","tagline":"You Know, for Search"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let address = server.address();
    let lines = vec![
        format!("set host http://{}", address.ip()),
        format!("set port {}", address.port()),
        "GET /".to_string(),
    ];
    let transcript = run_shell(SessionConfig::new(), lines, vec![], 50).await;

    assert_eq!(transcript.messages, "");
    assert_eq!(
        transcript.responses,
        "{\n  \"name\": \"node-1\",\n  \"tagline\": \"You Know, for Search\"\n}\n"
    );
}

#[tokio::test]
async fn credentials_and_body_should_flow_through_the_session() {
    common::init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/books/_search"))
        .and(basic_auth("reader", "s3cret"))
        .and(body_string(r#"{"query":{"match_all":{}}}"#))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"hits":{"total":0}}"#))
        .expect(1)
        .mount(&server)
        .await;

    let lines = vec![
        "set user reader".to_string(),
        "set pass s3cret".to_string(),
        r#"post books/_search {"query":{"match_all":{}}}"#.to_string(),
    ];
    let transcript = run_shell(common::session_for(&server), lines, vec![], 50).await;

    assert_eq!(transcript.messages, "");
    assert_eq!(
        transcript.responses,
        "{\n  \"hits\": {\n    \"total\": 0\n  }\n}\n"
    );
}

#[tokio::test]
async fn verbose_mode_should_print_status_and_headers_first() {
    common::init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_cluster/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-elastic-product", "Elasticsearch")
                .set_body_string(r#"{"status":"yellow"}"#),
        )
        .mount(&server)
        .await;

    let lines = vec!["set verbose".to_string(), "GET /_cluster/health".to_string()];
    let transcript = run_shell(common::session_for(&server), lines, vec![], 100).await;

    let output: Vec<&str> = transcript.responses.lines().collect();
    assert_eq!(output[0], "HTTP/1.1 200 OK");
    assert!(output.contains(&"x-elastic-product: Elasticsearch"));
    let blank = output.iter().position(|line| line.is_empty()).unwrap();
    assert_eq!(&output[blank + 1..], ["{", "  \"status\": \"yellow\"", "}"]);
}

#[tokio::test]
async fn error_statuses_should_render_their_json_body() {
    common::init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/ghost"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"status":404,"found":false}"#),
        )
        .mount(&server)
        .await;

    let transcript = run_shell(
        common::session_for(&server),
        vec!["DELETE /ghost".to_string()],
        vec![],
        100,
    )
    .await;

    assert_eq!(transcript.messages, "");
    assert_eq!(
        transcript.responses,
        "{\n  \"status\": 404,\n  \"found\": false\n}\n"
    );
}

#[tokio::test]
async fn latin1_bodies_should_be_decoded_by_charset() {
    common::init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/authors/_doc/7"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"{\"name\":\"Jos\xe9\"}".to_vec(),
            "application/json; charset=iso-8859-1",
        ))
        .mount(&server)
        .await;

    let transcript = run_shell(
        common::session_for(&server),
        vec!["GET /authors/_doc/7".to_string()],
        vec![],
        100,
    )
    .await;

    assert_eq!(transcript.responses, "{\n  \"name\": \"José\"\n}\n");
}

#[tokio::test]
async fn stopping_the_pager_should_discard_the_rest_of_the_response() {
    common::init_tracing();
    let server = MockServer::start().await;
    let body = (0..10)
        .map(|i| format!("{{\"doc\":{i}}}"))
        .collect::<Vec<_>>()
        .join("\n");
    Mock::given(method("GET"))
        .and(path("/logs/_export"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let lines = vec!["GET /logs/_export".to_string(), "GET /logs/_export".to_string()];
    let transcript = run_shell(
        common::session_for(&server),
        lines,
        vec![PageSignal::Stop, PageSignal::Stop],
        3,
    )
    .await;

    // One page per request before the user stops
    assert_eq!(transcript.messages, "");
    assert_eq!(transcript.responses.lines().count(), 6);
    assert!(transcript.responses.starts_with("{\n  \"doc\": 0\n}\n"));
}

#[tokio::test]
async fn unreachable_server_should_be_reported_and_shell_should_continue() {
    common::init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let lines = vec![
        "set host http://127.0.0.1".to_string(),
        format!("set port {port}"),
        "GET /".to_string(),
        format!("set port {}", server.address().port()),
        "GET /".to_string(),
    ];
    let transcript = run_shell(SessionConfig::new(), lines, vec![], 100).await;

    assert!(transcript.messages.starts_with("request failed: HTTP request failed"));
    assert_eq!(transcript.messages.lines().count(), 1);
    assert_eq!(transcript.responses, "{}\n");
}

#[tokio::test]
async fn one_shot_dispatch_should_render_in_batch_mode() {
    common::init_tracing();
    let server = MockServer::start().await;
    let body = (0..5)
        .map(|i| format!("{{\"n\":{i}}}"))
        .collect::<Vec<_>>()
        .join("\n");
    Mock::given(method("GET"))
        .and(path("/_stream"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let session = common::session_for(&server);
    let output = tokio::task::spawn_blocking(move || {
        let request = match parse_line("GET /_stream").unwrap() {
            Some(ParsedCommand::Request(request)) => request,
            other => panic!("Expected request, got {other:?}"),
        };
        let out = SharedWriter::new();
        let mut dispatcher = RequestDispatcher::for_session(
            HttpTransport::new().unwrap(),
            &session,
            out.clone(),
            MockPager::default(),
            2,
        );
        dispatcher.dispatch(&session, &request).unwrap();
        out.contents()
    })
    .await
    .unwrap();

    // No pager prompts outside the shell, so all 15 lines arrive
    assert_eq!(output.lines().count(), 15);
}
