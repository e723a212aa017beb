use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use campus_events_server::{
    config::Config,
    ocr::{recognizer::TextRecognizer, ExtractionStrategy, PosterScanner, ScanError},
    routes::create_routes,
    state::AppState,
    store::{InMemoryStore, KeyValueStore},
};
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const POSTER_TEXT: &str = "Title: Robotics Expo\n\
    Date: 09/01/2026\n\
    Venue: Campus 15 Atrium\n\
    Organised by: RoboSoc";

pub struct MockRecognizer;

#[async_trait]
impl TextRecognizer for MockRecognizer {
    async fn recognize(&self, _png: Vec<u8>) -> Result<String, ScanError> {
        Ok(POSTER_TEXT.to_string())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
}

#[allow(dead_code)]
impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let scanner = PosterScanner::new(Arc::new(MockRecognizer), ExtractionStrategy::Auto);
        let shared: Arc<dyn KeyValueStore> = store.clone();
        let state = AppState::new(Config::default(), shared, scanner);

        Self {
            router: create_routes(state),
            store,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, payload: Value) -> Response {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_empty(&self, uri: &str) -> Response {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn login_society(&self) {
        let response = self
            .post_json(
                "/api/auth/login",
                json!({ "role": "society", "email": "usc@kiit.ac.in", "password": "pw" }),
            )
            .await;
        assert!(response.status().is_success(), "society login failed");
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub fn poster_png() -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(GrayImage::from_pixel(16, 16, Luma([180])))
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

#[allow(dead_code)]
pub fn multipart_body(boundary: &str, field: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"poster.png\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}
