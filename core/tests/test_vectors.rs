//! Verify request building against JSON test vectors stored in `test-vectors/`.
//!
//! Each case gives a raw configuration object, a verb, a path and
//! parameters, plus the request the client must build. Bodies are compared
//! as parsed JSON so key order does not matter.

use ola_core::{
    Client, ClientConfig, HttpMethod, HttpRequest, HttpResponse, Parameters, Transport,
    TransportError,
};

/// Never called: vectors only exercise request building.
struct Unreachable;

impl Transport for Unreachable {
    fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError::network("test vectors must not perform I/O"))
    }
}

fn pairs(value: &serde_json::Value) -> Option<Vec<(String, String)>> {
    let array = value.as_array()?;
    Some(
        array
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect(),
    )
}

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let config = ClientConfig::from_value(case["config"].clone()).unwrap();
        let client = Client::with_transport(config, Unreachable);

        let method: HttpMethod = case["verb"].as_str().unwrap().parse().unwrap();
        let parameters: Parameters = serde_json::from_value(case["parameters"].clone()).unwrap();
        let expected = &case["expected_request"];

        let req = client
            .build_request(method, case["path"].as_str().unwrap(), &parameters)
            .unwrap();

        assert_eq!(req.method.as_str(), expected["method"].as_str().unwrap(), "{name}: method");
        assert_eq!(req.url, expected["url"].as_str().unwrap(), "{name}: url");
        assert_eq!(Some(req.headers), pairs(&expected["headers"]), "{name}: headers");

        let mut query = req.query;
        if let Some(q) = query.as_mut() {
            q.sort();
        }
        assert_eq!(query, pairs(&expected["query"]), "{name}: query");

        match req.body.as_deref() {
            Some(body) => {
                let body: serde_json::Value = serde_json::from_str(body).unwrap();
                assert_eq!(body, expected["body"], "{name}: body");
            }
            None => assert!(expected["body"].is_null(), "{name}: body should be None"),
        }
    }
}
