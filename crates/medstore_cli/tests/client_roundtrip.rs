use medstore_cli::{ApiClient, ClientConfig, ClientError};
use medstore_core::db::open_db_in_memory;
use medstore_core::{spawn_store_worker, Medicine, Menu};
use reqwest::StatusCode;
use std::io::Cursor;
use std::net::TcpListener;
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// Starts a real server on an ephemeral port in a background runtime.
fn spawn_server() -> String {
    let (store, _worker) = spawn_store_worker(open_db_in_memory().unwrap()).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            medstore_server::serve(listener, store).await.unwrap();
        });
    });

    format!("http://{addr}")
}

fn client_for(base_url: String) -> ApiClient {
    client_with_timeout(base_url, Duration::from_secs(10))
}

fn client_with_timeout(base_url: String, fetch_timeout: Duration) -> ApiClient {
    ApiClient::new(&ClientConfig {
        base_url,
        fetch_timeout,
        log_dir: std::env::temp_dir(),
    })
    .unwrap()
}

/// A listener whose backlog completes TCP handshakes but never answers.
fn silent_listener() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    (listener, url)
}

#[test]
fn client_drives_full_record_lifecycle() {
    let client = client_for(spawn_server());

    let confirmation = client.insert(&Medicine::new("aspirin", 10, 2.5)).unwrap();
    assert_eq!(confirmation, "Data inserted successfully");

    let listed = client.fetch().unwrap();
    assert_eq!(listed.len(), 1);
    let id = listed[0].id;
    assert!(id > 0);

    client
        .update(&Medicine::with_id(id, "aspirin", 20, 2.5))
        .unwrap();
    assert_eq!(client.fetch().unwrap()[0].quantity, 20);

    let confirmation = client.delete(id).unwrap();
    assert_eq!(
        confirmation,
        format!("Medicine with ID {id} deleted successfully")
    );
    assert!(client.fetch().unwrap().is_empty());
}

#[test]
fn non_200_answer_is_reported_as_status_error() {
    let client = client_for(format!("{}/missing", spawn_server()));

    match client.fetch() {
        Err(ClientError::Status { status, .. }) => assert_eq!(status, StatusCode::NOT_FOUND),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected status error"),
    }
}

#[test]
fn unreachable_server_is_reported_as_transport_error() {
    let port = {
        let reserved = TcpListener::bind("127.0.0.1:0").unwrap();
        reserved.local_addr().unwrap().port()
    };
    let client = client_for(format!("http://127.0.0.1:{port}"));

    let err = client.insert(&Medicine::new("aspirin", 10, 2.5)).unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}

#[test]
fn menu_session_over_http() {
    let client = client_for(spawn_server());
    let menu = Menu::new(client).require_positive_delete_id(true);

    let mut input = Cursor::new(b"1\naspirin\n10\n2.5\n3\n-4\n4\n5\n".to_vec());
    let mut output = Vec::new();
    menu.run(&mut input, &mut output).unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Data inserted successfully."));
    assert!(output.contains("Invalid ID. Please enter a positive integer."));
    assert!(output.contains("Name: aspirin, Quantity: 10, Price: 2.50"));
    assert!(output.ends_with("Exiting...\n"));
}

#[test]
fn fetch_gives_up_after_its_timeout() {
    let (_listener, url) = silent_listener();
    let client = client_with_timeout(url, Duration::from_millis(200));

    let started = Instant::now();
    let err = client.fetch().unwrap_err();

    assert!(
        matches!(err, ClientError::Http(ref inner) if inner.is_timeout()),
        "unexpected error: {err}"
    );
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn writes_do_not_inherit_the_fetch_timeout() {
    let (_listener, url) = silent_listener();
    let client = client_with_timeout(url, Duration::from_millis(200));

    let (done, finished) = mpsc::channel();
    std::thread::spawn(move || {
        let _ = done.send(client.insert(&Medicine::new("aspirin", 10, 2.5)).is_ok());
    });

    // Still waiting well past the fetch timeout.
    assert!(matches!(
        finished.recv_timeout(Duration::from_secs(1)),
        Err(mpsc::RecvTimeoutError::Timeout)
    ));
}
