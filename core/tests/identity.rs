//! User id resolution across handles, clones and threads.

mod support;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use webmaster_core::{ApiError, WebmasterClient};

use support::{config, response, ScriptedTransport};

#[test]
fn each_handle_resolves_its_own_user_id() {
    let transport = ScriptedTransport::fixed(200, r#"{"hosts": []}"#);

    let first = WebmasterClient::with_transport(config(), Arc::clone(&transport)).unwrap();
    let second = WebmasterClient::with_transport(config(), Arc::clone(&transport)).unwrap();

    assert_eq!(first.user_id().unwrap(), 42);
    assert_eq!(second.user_id().unwrap(), 42);
    assert_eq!(transport.user_lookups(), 2);
}

#[test]
fn concurrent_calls_do_not_repeat_the_lookup() {
    let transport = ScriptedTransport::fixed(200, r#"{"hosts": []}"#);
    let client = WebmasterClient::with_transport(config(), Arc::clone(&transport)).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = if i % 2 == 0 {
                client.clone()
            } else {
                client.with_timeout(Duration::from_secs(1))
            };
            thread::spawn(move || {
                assert_eq!(client.user_id().unwrap(), 42);
                assert!(client.hosts().list().unwrap().is_empty());
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(transport.user_lookups(), 1);
    let host_calls = transport
        .requests()
        .iter()
        .filter(|r| r.endpoint == "user/42/hosts")
        .count();
    assert_eq!(host_calls, 8);
}

#[test]
fn unavailable_lookup_fails_construction_and_is_not_remembered() {
    let available = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&available);
    let transport = ScriptedTransport::raw(move |request| {
        if request.endpoint != "user" {
            return Ok(response(200, r#"{"hosts": []}"#));
        }
        if flag.load(Ordering::SeqCst) {
            Ok(response(200, r#"{"user_id": 7}"#))
        } else {
            Ok(response(503, "try later"))
        }
    });

    let err = WebmasterClient::with_transport(config(), Arc::clone(&transport)).unwrap_err();
    match &err {
        ApiError::Construction(cause) => {
            assert!(matches!(**cause, ApiError::HttpStatus { status: 503, .. }));
        }
        other => panic!("expected construction error, got {other:?}"),
    }
    assert_eq!(err.endpoint(), Some("user"));
    assert_eq!(err.error_data(), Some("try later"));

    available.store(true, Ordering::SeqCst);
    let client = WebmasterClient::with_transport(config(), Arc::clone(&transport)).unwrap();
    assert_eq!(client.user_id().unwrap(), 7);
    assert_eq!(transport.user_lookups(), 2);
}

#[test]
fn narrowed_timeout_reaches_the_transport() {
    let transport = ScriptedTransport::fixed(200, r#"{"hosts": []}"#);
    let client = WebmasterClient::with_transport(config(), Arc::clone(&transport)).unwrap();

    client.with_timeout(Duration::from_millis(250)).hosts().list().unwrap();
    assert_eq!(transport.last_request().timeout, Some(Duration::from_millis(250)));

    client.hosts().list().unwrap();
    assert_eq!(transport.last_request().timeout, Some(client.timeout()));
    assert_eq!(transport.user_lookups(), 1);
}
