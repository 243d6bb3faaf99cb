use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode},
    routing::{any, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const RATE_LIMIT: u32 = 100;
const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(3600);

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: Uuid,
    pub crn: String,
    pub status: String,
    pub category: String,
    pub pickup_lat: f64,
    pub pickup_lng: f64,
}

#[derive(Deserialize)]
pub struct CreateBooking {
    pub pickup_lat: f64,
    pub pickup_lng: f64,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub pickup_mode: Option<String>,
}

fn default_category() -> String {
    "mini".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub pickup_lat: f64,
    pub pickup_lng: f64,
    pub category: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

pub struct Sandbox {
    bookings: HashMap<Uuid, Booking>,
    remaining: u32,
    reset_at: u64,
}

pub type Db = Arc<RwLock<Sandbox>>;

type RateHeaders = [(&'static str, String); 3];
type Failure = (StatusCode, Json<ErrorBody>);

pub fn app() -> Router {
    let reset_at = (SystemTime::now() + RATE_LIMIT_WINDOW)
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let db: Db = Arc::new(RwLock::new(Sandbox {
        bookings: HashMap::new(),
        remaining: RATE_LIMIT,
        reset_at,
    }));
    Router::new()
        .route("/v1/bookings/create", post(create_booking))
        .route("/v1/products", get(list_products))
        .route("/v1/echo", any(echo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn create_booking(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateBooking>,
) -> Result<(RateHeaders, Json<Booking>), Failure> {
    authorize(&headers)?;
    let mut sandbox = db.write().await;
    let rate = meter(&mut sandbox);
    let booking = Booking {
        booking_id: Uuid::new_v4(),
        crn: format!("{}", 1000 + sandbox.bookings.len()),
        status: "SUCCESS".to_string(),
        category: input.category,
        pickup_lat: input.pickup_lat,
        pickup_lng: input.pickup_lng,
    };
    tracing::info!(
        booking_id = %booking.booking_id,
        pickup_mode = input.pickup_mode.as_deref().unwrap_or("NOW"),
        "booking created"
    );
    sandbox.bookings.insert(booking.booking_id, booking.clone());
    Ok((rate, Json(booking)))
}

async fn list_products(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<ProductQuery>,
) -> Result<(RateHeaders, Json<serde_json::Value>), Failure> {
    authorize(&headers)?;
    let rate = meter(&mut *db.write().await);
    let categories: Vec<serde_json::Value> = ["micro", "mini", "prime"]
        .into_iter()
        .filter(|id| query.category.as_deref().map_or(true, |wanted| wanted == *id))
        .map(|id| serde_json::json!({ "id": id, "eta": 4 }))
        .collect();
    Ok((
        rate,
        Json(serde_json::json!({
            "pickup_lat": query.pickup_lat,
            "pickup_lng": query.pickup_lng,
            "categories": categories,
        })),
    ))
}

/// Reflect the method and JSON body back to the caller.
async fn echo(
    method: Method,
    headers: HeaderMap,
    body: String,
) -> Result<Json<serde_json::Value>, Failure> {
    authorize(&headers)?;
    let body: serde_json::Value = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
    Ok(Json(serde_json::json!({
        "method": method.as_str(),
        "body": body,
    })))
}

fn authorize(headers: &HeaderMap) -> Result<(), Failure> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty());
    if bearer {
        return Ok(());
    }
    Err((
        StatusCode::UNAUTHORIZED,
        Json(ErrorBody {
            code: "INVALID_ACCESS_TOKEN".to_string(),
            message: "Access token is missing or invalid".to_string(),
        }),
    ))
}

/// Count one request against the window and report the remaining budget.
fn meter(sandbox: &mut Sandbox) -> RateHeaders {
    sandbox.remaining = sandbox.remaining.saturating_sub(1);
    [
        ("X-Rate-Limit-Limit", RATE_LIMIT.to_string()),
        ("X-Rate-Limit-Remaining", sandbox.remaining.to_string()),
        ("X-Rate-Limit-Reset", sandbox.reset_at.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_booking_defaults_category_to_mini() {
        let input: CreateBooking =
            serde_json::from_str(r#"{"pickup_lat":12.95,"pickup_lng":77.64}"#).unwrap();
        assert_eq!(input.category, "mini");
        assert!(input.pickup_mode.is_none());
    }

    #[test]
    fn create_booking_rejects_missing_pickup() {
        let result: Result<CreateBooking, _> = serde_json::from_str(r#"{"category":"prime"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn booking_serializes_to_json() {
        let booking = Booking {
            booking_id: Uuid::nil(),
            crn: "1000".to_string(),
            status: "SUCCESS".to_string(),
            category: "mini".to_string(),
            pickup_lat: 12.95,
            pickup_lng: 77.64,
        };
        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["booking_id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["status"], "SUCCESS");
    }

    #[test]
    fn meter_counts_down_and_saturates() {
        let mut sandbox = Sandbox {
            bookings: HashMap::new(),
            remaining: 1,
            reset_at: 1_700_000_000,
        };
        let headers = meter(&mut sandbox);
        assert_eq!(headers[1].1, "0");
        assert_eq!(headers[2].1, "1700000000");
        let headers = meter(&mut sandbox);
        assert_eq!(headers[1].1, "0");
    }

    #[test]
    fn authorize_requires_bearer_token() {
        let mut headers = HeaderMap::new();
        assert!(authorize(&headers).is_err());
        headers.insert(AUTHORIZATION, "Bearer ".parse().unwrap());
        assert!(authorize(&headers).is_err());
        headers.insert(AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert!(authorize(&headers).is_ok());
    }
}
