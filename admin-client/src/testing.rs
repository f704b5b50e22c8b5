//! In-process fake of the admin API
//!
//! Serves seeded collections from an axum `Router` that tests drive through
//! [`OneshotHttpClient`]. Envelope shapes differ per resource the way the
//! real backend's do.

use crate::http::HttpClient;
use crate::http::oneshot::OneshotHttpClient;
use crate::storage::{MemoryTokenStore, TokenStore};
use crate::store::{EntityStore, Resource, SalesStore, SettingsStore};
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{Map, Value, json};
use shared::normalize::NormalizeContext;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub const ORIGIN: &str = "http://admin.test";
pub const SEED_TOKEN: &str = "seed-token";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "secret";

/// Path prefix and collection name of every CRUD resource
const RESOURCES: &[(&str, &str)] = &[
    ("/admin/products", "products"),
    ("/admin/categories", "categories"),
    ("/admin/settings/gst", "gst"),
    ("/admin/variation", "variations"),
    ("/admin/attributes", "attributes"),
    ("/admin/variants", "variants"),
    ("/admin/online-orders", "online"),
    ("/admin/pos-orders", "pos"),
];

#[derive(Debug, Default)]
struct FakeState {
    collections: HashMap<String, Vec<Value>>,
    settings: Vec<Value>,
    tokens: HashSet<String>,
    issued: u64,
    next_id: u64,
    scripted: Option<(StatusCode, Value)>,
    broken: HashMap<String, (StatusCode, Value)>,
    requests: Vec<(String, Option<String>)>,
    last_upload: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub fn seeded() -> Self {
        let mut state = FakeState {
            next_id: 1000,
            ..Default::default()
        };
        state.tokens.insert(SEED_TOKEN.to_string());
        state.settings = vec![
            json!({"key": "site_name", "value": "Nutty Basket"}),
            json!({"key": "email", "value": "hello@nuttybasket.test"}),
            json!({"key": "phone", "value": "+91 90000 00000"}),
            json!({"key": "logo", "value": "storage/logo.png"}),
        ];
        let seed = |name: &str, records: Value| {
            let records = match records {
                Value::Array(records) => records,
                _ => Vec::new(),
            };
            (name.to_string(), records)
        };
        state.collections = HashMap::from([
            seed(
                "products",
                json!([
                    {"id": 1, "name": "Almonds", "price": "₹1,200", "grams": 500,
                     "image": "storage/products/almonds.png",
                     "category": {"id": 1, "category": "Dry Fruits"}},
                    {"id": 2, "name": "Cashew", "price": "950", "grams": "250",
                     "category": {"id": 1, "category": "Dry Fruits"}},
                    {"id": 3, "name": "Flax Seeds", "price": 180, "category_name": "Seeds"},
                ]),
            ),
            seed(
                "categories",
                json!([
                    {"id": 1, "category": "Dry Fruits", "image": "storage/categories/dry.png",
                     "productCount": 2, "created_at": "2026-01-04T09:00:00Z"},
                    {"id": 2, "category": "Seeds"},
                ]),
            ),
            seed(
                "gst",
                json!([
                    {"id": 1, "name": "GST 5%", "percentage": 5},
                    {"id": 2, "name": "GST 12%", "percentage": "12"},
                ]),
            ),
            seed("variations", json!([{"id": 1, "name": "Weight", "values": ["250g", "500g"]}])),
            seed(
                "attributes",
                json!([{"id": 1, "name": "Weight", "variation_id": 1, "value": "250g"}]),
            ),
            seed(
                "variants",
                json!([{"id": 1, "product_id": 1, "name": "Almonds 250g", "sku": "ALM-250",
                        "price": "₹650", "stock": 10, "attributes": ["250g"]}]),
            ),
            seed(
                "online",
                json!([
                    {"id": 101, "created_at": "2026-10-01 10:15:00", "status": "pending",
                     "total": "2,400", "payment_method": "razorpay",
                     "customer": {"name": "Asha", "phone": "9800000001"},
                     "shipping_address": {"line1": "12 MG Road", "city": "Pune", "pincode": "411001"},
                     "items": [{"product_id": 1, "name": "Almonds", "qty": 2, "price": 1200}]},
                    {"id": 102, "created_at": "2026-10-02 18:40:00", "status": "delivered",
                     "grand_total": 950, "user": {"name": "Kiran"},
                     "items": "[{\"name\":\"Cashew\",\"qty\":1,\"price\":950}]"},
                ]),
            ),
            seed(
                "pos",
                json!([
                    {"id": 201, "created_at": "2026-10-03 11:00:00", "customer_name": "Ravi",
                     "payment_method": "cash", "total": "₹1,250",
                     "items": [{"product_id": 1, "name": "Almonds", "qty": 1, "price": 1250}]},
                    {"id": 202, "created_at": "2026-10-03 12:30:00", "payment_method": "upi",
                     "total": "450", "items": [{"product_id": 3, "qty": 2.5, "total": 450}]},
                ]),
            ),
        ]);
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn router(&self) -> Router {
        Router::new().fallback(handle).with_state(self.clone())
    }

    /// Client reading its bearer token from `tokens`
    pub fn client(&self, tokens: Arc<dyn TokenStore>) -> Arc<dyn HttpClient> {
        Arc::new(OneshotHttpClient::new(self.router(), tokens))
    }

    pub fn context() -> NormalizeContext {
        NormalizeContext::with_origin(ORIGIN)
    }

    fn authed_client(&self) -> Arc<dyn HttpClient> {
        self.client(Arc::new(MemoryTokenStore::with_token(SEED_TOKEN)))
    }

    pub fn store<T: Resource>(&self) -> EntityStore<T> {
        EntityStore::new(self.authed_client(), Self::context())
    }

    pub fn sales_store(&self) -> SalesStore {
        SalesStore::new(self.authed_client(), Self::context())
    }

    pub fn settings_store(&self) -> SettingsStore {
        SettingsStore::new(self.authed_client(), Self::context())
    }

    // ========== Scripting ==========

    /// Answer the next request, whatever it is, with this status and body
    pub fn respond_next(&self, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.state.lock().scripted = Some((status, body));
    }

    pub fn fail_next(&self, status: u16, body: Value) {
        self.respond_next(status, body);
    }

    /// Answer every request for `path` with this status and body
    pub fn break_route(&self, path: &str, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.state.lock().broken.insert(path.to_string(), (status, body));
    }

    /// Invalidate every issued token, as a server-side session expiry would
    pub fn revoke_tokens(&self) {
        self.state.lock().tokens.clear();
    }

    pub fn push_record(&self, collection: &str, record: Value) {
        self.state
            .lock()
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(record);
    }

    pub fn remove_record(&self, collection: &str, id: &str) {
        if let Some(records) = self.state.lock().collections.get_mut(collection) {
            records.retain(|record| id_of(record).as_deref() != Some(id));
        }
    }

    // ========== Inspection ==========

    /// Every request seen so far, as `"METHOD /path"`
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().requests.iter().map(|(line, _)| line.clone()).collect()
    }

    /// `Authorization` header of the most recent request
    pub fn last_authorization(&self) -> Option<String> {
        self.state.lock().requests.last().and_then(|(_, auth)| auth.clone())
    }

    /// File name of the most recent upload
    pub fn last_upload(&self) -> Option<String> {
        self.state.lock().last_upload.clone()
    }
}

// =============================================================================
// Request handling
// =============================================================================

async fn handle(State(backend): State<FakeBackend>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let paging = Paging::from_query(request.uri().query());
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let submitted = match Submitted::read(request).await {
        Ok(submitted) => submitted,
        Err(message) => return reply(StatusCode::BAD_REQUEST, json!({ "message": message })),
    };

    let mut state = backend.state.lock();
    state
        .requests
        .push((format!("{method} {path}"), authorization.clone()));
    if let Some((status, body)) = state.scripted.take() {
        return reply(status, body);
    }
    if let Some((status, body)) = state.broken.get(&path) {
        return reply(*status, body.clone());
    }
    if let Some(upload) = &submitted.upload {
        state.last_upload = Some(upload.clone());
    }
    state.route(&method, &path, authorization.as_deref(), paging, submitted.fields)
}

/// `page` and `per_page` query parameters
///
/// Without `per_page` every record is listed on page 1.
#[derive(Debug, Clone, Copy)]
struct Paging {
    page: usize,
    per_page: Option<usize>,
}

impl Paging {
    fn from_query(query: Option<&str>) -> Self {
        let mut paging = Self { page: 1, per_page: None };
        for (key, value) in query.unwrap_or_default().split('&').filter_map(|kv| kv.split_once('=')) {
            match (key, value.parse::<usize>()) {
                ("page", Ok(page)) if page > 0 => paging.page = page,
                ("per_page", Ok(per_page)) if per_page > 0 => paging.per_page = Some(per_page),
                _ => {}
            }
        }
        paging
    }

    fn slice(&self, records: Vec<Value>) -> Vec<Value> {
        match self.per_page {
            Some(per_page) => records
                .into_iter()
                .skip((self.page - 1) * per_page)
                .take(per_page)
                .collect(),
            None => records,
        }
    }
}

impl FakeState {
    fn route(
        &mut self,
        method: &Method,
        path: &str,
        authorization: Option<&str>,
        paging: Paging,
        fields: Map<String, Value>,
    ) -> Response {
        if path == "/admin-login" {
            return if *method == Method::POST {
                self.login(&fields)
            } else if self.is_authorized(authorization) {
                reply(StatusCode::OK, json!({ "success": true, "user": admin_user() }))
            } else {
                unauthenticated()
            };
        }
        if path == "/settings" {
            return reply(StatusCode::OK, json!({ "success": true, "data": self.settings }));
        }
        if !path.starts_with("/admin/") {
            return not_found("Route");
        }
        if !self.is_authorized(authorization) {
            return unauthenticated();
        }
        if path == "/admin/settings/update" {
            return self.update_settings(fields);
        }

        let Some((prefix, collection)) = RESOURCES.iter().find(|(prefix, _)| {
            path.strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        }) else {
            return not_found("Route");
        };
        let rest: Vec<&str> = path[prefix.len()..].split('/').filter(|s| !s.is_empty()).collect();

        match (method.as_str(), rest.as_slice()) {
            ("GET", [] | ["show"]) => self.list(collection, paging),
            ("GET", ["show", id] | [id]) => self.show(collection, id),
            ("POST", ["store"]) => self.create(collection, fields),
            ("POST" | "PUT", ["update", id]) => self.update(collection, id, fields),
            ("POST" | "DELETE", ["delete", id]) => self.delete(collection, id),
            _ => not_found("Route"),
        }
    }

    fn is_authorized(&self, authorization: Option<&str>) -> bool {
        authorization
            .and_then(|h| h.strip_prefix("Bearer "))
            .is_some_and(|token| self.tokens.contains(token))
    }

    fn login(&mut self, fields: &Map<String, Value>) -> Response {
        let username = fields.get("username").and_then(Value::as_str).unwrap_or_default();
        let password = fields.get("password").and_then(Value::as_str).unwrap_or_default();
        if username != ADMIN_USERNAME || password != ADMIN_PASSWORD {
            return reply(
                StatusCode::UNAUTHORIZED,
                json!({ "success": false, "message": "Invalid credentials" }),
            );
        }
        self.issued += 1;
        let token = format!("token-{}", self.issued);
        self.tokens.insert(token.clone());
        reply(
            StatusCode::OK,
            json!({
                "success": true,
                "message": "Login successful",
                "data": {
                    "token_data": { "access_token": token, "token_type": "Bearer" },
                    "user": admin_user(),
                }
            }),
        )
    }

    fn records(&mut self, collection: &str) -> &mut Vec<Value> {
        self.collections.entry(collection.to_string()).or_default()
    }

    fn list(&mut self, collection: &str, paging: Paging) -> Response {
        let all = self.records(collection).clone();
        let total = all.len();
        let (page, per_page) = (paging.page, paging.per_page.unwrap_or(10));
        let records = paging.slice(all);
        let body = match collection {
            "products" => json!({
                "success": true,
                "data": { "data": records, "total": total, "per_page": per_page, "current_page": page }
            }),
            "gst" => Value::Array(records),
            "attributes" => json!({ "attributes": records }),
            "variants" => json!({ "success": true, "variants": records }),
            "online" => json!({
                "success": true,
                "orders": records,
                "meta": { "total": total, "per_page": per_page, "current_page": page }
            }),
            _ => json!({ "success": true, "data": records }),
        };
        reply(StatusCode::OK, body)
    }

    fn show(&mut self, collection: &str, id: &str) -> Response {
        match self.records(collection).iter().find(|r| id_of(r).as_deref() == Some(id)) {
            Some(record) => reply(StatusCode::OK, json!({ "success": true, "data": record })),
            None => not_found("Record"),
        }
    }

    fn create(&mut self, collection: &str, mut fields: Map<String, Value>) -> Response {
        self.next_id += 1;
        fields.insert("id".into(), json!(self.next_id));
        let record = Value::Object(fields);
        self.records(collection).insert(0, record.clone());

        let body = match collection {
            "categories" => json!({ "success": true, "message": "Category created successfully" }),
            "gst" => json!({ "success": true, "gst": record }),
            _ => json!({ "success": true, "message": "Created successfully", "data": record }),
        };
        reply(StatusCode::OK, body)
    }

    fn update(&mut self, collection: &str, id: &str, fields: Map<String, Value>) -> Response {
        let Some(record) = self
            .records(collection)
            .iter_mut()
            .find(|r| id_of(r).as_deref() == Some(id))
        else {
            return not_found("Record");
        };
        if let Value::Object(map) = record {
            map.extend(fields);
        }
        let record = record.clone();

        let body = match collection {
            "online" => json!({ "success": true, "message": "Order status updated" }),
            _ => json!({ "success": true, "message": "Updated successfully", "data": record }),
        };
        reply(StatusCode::OK, body)
    }

    fn delete(&mut self, collection: &str, id: &str) -> Response {
        let records = self.records(collection);
        match records.iter().position(|r| id_of(r).as_deref() == Some(id)) {
            Some(index) => {
                records.remove(index);
                reply(StatusCode::OK, json!({ "success": true, "message": "Deleted successfully" }))
            }
            None => not_found("Record"),
        }
    }

    /// Stores settings as key/value rows and answers without echoing them
    fn update_settings(&mut self, fields: Map<String, Value>) -> Response {
        for (key, value) in fields {
            match self.settings.iter_mut().find(|row| row["key"] == key.as_str()) {
                Some(row) => row["value"] = value,
                None => self.settings.push(json!({ "key": key, "value": value })),
            }
        }
        reply(StatusCode::OK, json!({ "success": true, "message": "Settings updated" }))
    }
}

fn admin_user() -> Value {
    json!({ "id": 1, "username": ADMIN_USERNAME, "name": "Store Admin", "role": { "name": "superadmin" } })
}

fn id_of(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn unauthenticated() -> Response {
    reply(StatusCode::UNAUTHORIZED, json!({ "message": "Unauthenticated." }))
}

fn not_found(what: &str) -> Response {
    reply(StatusCode::NOT_FOUND, json!({ "message": format!("{what} not found") }))
}

// =============================================================================
// Request bodies
// =============================================================================

/// Decoded JSON or multipart body
#[derive(Debug, Default)]
struct Submitted {
    fields: Map<String, Value>,
    upload: Option<String>,
}

impl Submitted {
    async fn read(request: Request) -> Result<Self, String> {
        let content_type = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(request, &())
                .await
                .map_err(|e| e.to_string())?;
            let mut submitted = Self::default();
            while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
                let name = field.name().unwrap_or_default().to_string();
                match field.file_name().map(str::to_string) {
                    Some(file_name) => {
                        field.bytes().await.map_err(|e| e.to_string())?;
                        submitted.insert(&name, Value::String(format!("storage/{file_name}")));
                        submitted.upload = Some(file_name);
                    }
                    None => {
                        let text = field.text().await.map_err(|e| e.to_string())?;
                        submitted.insert(&name, Value::String(text));
                    }
                }
            }
            Ok(submitted)
        } else if content_type.starts_with("application/json") {
            let bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
                .await
                .map_err(|e| e.to_string())?;
            let fields = match serde_json::from_slice(&bytes).map_err(|e| e.to_string())? {
                Value::Object(map) => map,
                _ => Map::new(),
            };
            Ok(Self { fields, upload: None })
        } else {
            Ok(Self::default())
        }
    }

    /// `values[]` appends to an array, `items[0][qty]` fills row objects
    fn insert(&mut self, name: &str, value: Value) {
        if let Some(base) = name.strip_suffix("[]") {
            if let Value::Array(items) = self.array(base) {
                items.push(value);
            }
            return;
        }
        if let Some((base, rest)) = name.split_once('[') {
            let parts: Vec<&str> = rest.trim_end_matches(']').split("][").collect();
            if let [index, key] = parts.as_slice() {
                if let Ok(index) = index.parse::<usize>() {
                    if let Value::Array(rows) = self.array(base) {
                        while rows.len() <= index {
                            rows.push(json!({}));
                        }
                        rows[index][*key] = value;
                    }
                    return;
                }
            }
        }
        self.fields.insert(name.to_string(), value);
    }

    fn array(&mut self, name: &str) -> &mut Value {
        self.fields
            .entry(name.to_string())
            .or_insert_with(|| Value::Array(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::request::Filters;

    #[tokio::test]
    async fn test_admin_routes_require_token() {
        let backend = FakeBackend::seeded();
        let anonymous = backend.client(Arc::new(MemoryTokenStore::new()));
        let err = anonymous.get("/admin/products/show", &Filters::new()).await.unwrap_err();
        assert_eq!(err.status(), Some(401));

        let settings = anonymous.get("/settings", &Filters::new()).await.unwrap();
        assert!(settings["data"].is_array());
    }

    #[test]
    fn test_bracketed_form_names() {
        let mut submitted = Submitted::default();
        submitted.insert("values[]", json!("a"));
        submitted.insert("values[]", json!("b"));
        submitted.insert("items[1][qty]", json!("2"));
        submitted.insert("items[0][qty]", json!("1"));
        assert_eq!(submitted.fields["values"], json!(["a", "b"]));
        assert_eq!(submitted.fields["items"], json!([{"qty": "1"}, {"qty": "2"}]));
    }
}
