//! Verify request building and response decoding against the JSON vectors in
//! `test-vectors/`.
//!
//! Each case names a resource call, the request it must produce, a canned
//! response and either the decoded result or the expected error. Results are
//! compared as JSON values so field order does not matter; `expected` only has
//! to be a subset of the serialized result.

mod support;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use webmaster_core::{
    ApiError, ApiResult, DateRange, DeviceType, HttpMethod, Page, PopularQueries, QueryIndicator,
    QueryOrder, SitemapQuery, WebmasterClient,
};

use support::{ScriptedTransport, BASE_URL, TOKEN};

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn str_arg<'a>(args: &'a Value, name: &str) -> &'a str {
    args[name]
        .as_str()
        .unwrap_or_else(|| panic!("missing string argument {name}"))
}

fn u32_arg(args: &Value, name: &str) -> Option<u32> {
    args[name].as_u64().map(|n| u32::try_from(n).unwrap())
}

fn date_arg(args: &Value, name: &str) -> NaiveDate {
    NaiveDate::parse_from_str(str_arg(args, name), "%Y-%m-%d").unwrap()
}

fn range_arg(args: &Value) -> DateRange {
    DateRange::new(date_arg(args, "date_from"), date_arg(args, "date_to")).unwrap()
}

fn page_arg(args: &Value) -> Page {
    Page::new(u32_arg(args, "limit").unwrap(), u32_arg(args, "offset").unwrap())
}

fn enum_arg<T: serde::de::DeserializeOwned>(args: &Value, name: &str) -> Option<T> {
    args.get(name)
        .map(|v| serde_json::from_value(v.clone()).unwrap())
}

fn to_json<T: Serialize>(result: ApiResult<T>) -> ApiResult<Value> {
    result.map(|value| serde_json::to_value(value).unwrap())
}

/// Run `operation` against `client` and serialize whatever it returns.
fn dispatch(client: &WebmasterClient, operation: &str, args: &Value) -> ApiResult<Value> {
    let host = move || str_arg(args, "host_id");
    match operation {
        "hosts.list" => to_json(client.hosts().list()),
        "hosts.get" => to_json(client.hosts().get(host())),
        "hosts.add" => to_json(client.hosts().add(str_arg(args, "host_url"))),
        "hosts.delete" => client.hosts().delete(host()).map(|_| Value::Null),
        "sitemaps.list" => {
            let query = SitemapQuery {
                limit: u32_arg(args, "limit"),
                parent_id: args["parent_id"].as_str().map(str::to_string),
                from: args["from"].as_str().map(str::to_string),
            };
            to_json(client.sitemaps().list(host(), &query))
        }
        "sitemaps.add" => to_json(client.sitemaps().add(host(), str_arg(args, "url"))),
        "indexing.history" => to_json(client.indexing().history(host(), range_arg(args))),
        "indexing.samples" => to_json(client.indexing().samples(host(), page_arg(args))),
        "important_urls.history" => {
            to_json(client.important_urls().history(host(), str_arg(args, "url")))
        }
        "search_urls.events_history" => {
            to_json(client.search_urls().events_history(host(), range_arg(args)))
        }
        "recrawl.enqueue" => to_json(client.recrawl().enqueue(host(), str_arg(args, "url"))),
        "recrawl.tasks" => to_json(
            client
                .recrawl()
                .tasks(host(), range_arg(args), page_arg(args)),
        ),
        "search_queries.popular" => {
            let indicator: QueryIndicator = enum_arg(args, "indicator").unwrap();
            let mut request = PopularQueries::new(range_arg(args), indicator);
            if let Some(order) = enum_arg::<QueryOrder>(args, "order_by") {
                request = request.order_by(order);
            }
            if let Some(device) = enum_arg::<DeviceType>(args, "device") {
                request = request.device(device);
            }
            to_json(client.search_queries().popular(host(), &request))
        }
        "search_queries.query_history" => to_json(client.search_queries().query_history(
            host(),
            str_arg(args, "query_id"),
            range_arg(args),
            enum_arg(args, "indicator").unwrap(),
            enum_arg(args, "device").unwrap_or_default(),
        )),
        "diagnostics.problems" => to_json(client.diagnostics().problems(host())),
        other => panic!("unknown operation: {other}"),
    }
}

/// Every key in `expected` must be present in `actual` with a matching value.
/// Arrays must have the same length and match element-wise.
fn assert_subset(expected: &Value, actual: &Value, path: &str) {
    match (expected, actual) {
        (Value::Object(want), Value::Object(got)) => {
            for (key, value) in want {
                let child = format!("{path}.{key}");
                let got_value = got
                    .get(key)
                    .unwrap_or_else(|| panic!("{child}: missing in {actual}"));
                assert_subset(value, got_value, &child);
            }
        }
        (Value::Array(want), Value::Array(got)) => {
            assert_eq!(want.len(), got.len(), "{path}: array length");
            for (i, (w, g)) in want.iter().zip(got).enumerate() {
                assert_subset(w, g, &format!("{path}[{i}]"));
            }
        }
        _ => assert_eq!(expected, actual, "{path}"),
    }
}

fn canned_body(case_response: &Value) -> String {
    match case_response.get("raw_body") {
        Some(raw) => raw.as_str().unwrap().to_string(),
        None => case_response["body"].to_string(),
    }
}

#[test]
fn endpoint_test_vectors() {
    let raw = include_str!("../../test-vectors/endpoints.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let status = case["response"]["status"].as_u64().unwrap() as u16;
        let body = canned_body(&case["response"]);
        let transport = ScriptedTransport::fixed(status, &body);
        let client = WebmasterClient::with_transport(support::config(), transport.clone()).unwrap();

        let result = dispatch(&client, case["operation"].as_str().unwrap(), &case["args"]);

        // Verify the request that went out.
        let expected_req = &case["expected_request"];
        let req = transport.last_request();
        let endpoint = expected_req["endpoint"].as_str().unwrap();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.endpoint, endpoint, "{name}: endpoint");
        assert_eq!(req.url, format!("{BASE_URL}{endpoint}"), "{name}: url");
        assert_eq!(
            req.header("Authorization"),
            Some(format!("OAuth {TOKEN}").as_str()),
            "{name}: authorization"
        );
        match (expected_req.get("body"), expected_req.get("raw_body")) {
            (Some(want), _) => {
                let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                assert_eq!(&sent, want, "{name}: body");
                assert_eq!(req.header("content-type"), Some("application/json"), "{name}: content-type");
            }
            (None, Some(want)) => {
                assert_eq!(req.body.as_deref(), want.as_str(), "{name}: raw body");
            }
            (None, None) => assert!(req.body.is_none(), "{name}: unexpected body"),
        }

        // Verify the outcome.
        match case.get("expected_error") {
            Some(want) => {
                let err = result.expect_err(name);
                let kind_matches = match want["kind"].as_str().unwrap() {
                    "http_status" => matches!(err, ApiError::HttpStatus { .. }),
                    "decode" => matches!(err, ApiError::Decode { .. }),
                    other => panic!("{name}: unknown error kind {other}"),
                };
                assert!(kind_matches, "{name}: wrong error kind {err:?}");
                assert_eq!(err.http_code(), Some(want["status"].as_u64().unwrap() as u16), "{name}: status");
                assert_eq!(err.endpoint(), want["endpoint"].as_str(), "{name}: error endpoint");
                assert_eq!(err.error_data(), want["body"].as_str(), "{name}: error body");
            }
            None => {
                let value = result.unwrap_or_else(|e| panic!("{name}: {e}"));
                assert_subset(&case["expected"], &value, name);
            }
        }

        // One lookup during construction, none per call.
        assert_eq!(transport.user_lookups(), 1, "{name}: user lookups");
    }
}
