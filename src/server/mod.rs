pub mod handlers;

use std::sync::Arc;

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::Method,
    middleware, web, App, HttpRequest, HttpResponse, HttpServer,
};

use crate::{
    config::Config,
    error::Result,
    gemini::GeminiClient,
    logger,
    models::ErrorResponse,
    service::HeadshotService,
    styles::StyleCatalog,
    upload::UploadStore,
};

/// Registers the `/api` routes. Shared by the real server and the tests.
pub fn configure(cfg: &mut web::ServiceConfig, json_limit: usize) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(json_limit)
            .error_handler(json_error_handler),
    )
    .route("/api/health", web::get().to(handlers::health))
    .route("/api/styles", web::get().to(handlers::list_styles))
    .service(
        web::resource("/api/upload")
            .route(web::post().to(handlers::upload))
            .route(web::method(Method::OPTIONS).to(handlers::preflight))
            .default_service(web::to(handlers::method_not_allowed)),
    )
    .service(
        web::resource("/api/generate-all")
            .route(web::post().to(handlers::generate_all))
            .route(web::method(Method::OPTIONS).to(handlers::preflight))
            .default_service(web::to(handlers::method_not_allowed)),
    );
}

pub fn cors_headers() -> middleware::DefaultHeaders {
    middleware::DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET,OPTIONS,POST"))
        .add((
            "Access-Control-Allow-Headers",
            "X-Requested-With, Accept, Content-Length, Content-Type",
        ))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = ErrorResponse::new("Invalid request body").with_details(err.to_string());
    let response = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            HttpResponse::PayloadTooLarge().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    };
    InternalError::from_response(err, response).into()
}

pub async fn run(config: Config) -> Result<()> {
    let gemini = GeminiClient::new(config.gemini.clone())?;
    let service = HeadshotService::new(
        Arc::new(gemini.image().clone()),
        StyleCatalog::with_styles(&config.styles),
    );
    let store = UploadStore::new(config.upload_dir.clone(), config.max_upload_bytes);

    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), &config);
    logger::log_config_info(&config);

    let service = web::Data::new(service);
    let store = web::Data::new(store);
    let json_limit = config.json_limit_bytes;

    HttpServer::new(move || {
        App::new()
            .wrap(cors_headers())
            .wrap(middleware::Logger::new("%r %s %Dms"))
            .app_data(service.clone())
            .app_data(store.clone())
            .configure(|cfg| configure(cfg, json_limit))
    })
    .bind(config.bind_address())?
    .run()
    .await?;

    log::info!("👋 Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GenerateAllResponse, HealthResponse, StyleId, StyleInfo, UploadResponse};
    use crate::orchestrator::testing::{Scripted, ScriptedGenerator};
    use actix_web::{http::StatusCode, test};
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use serde_json::json;
    use std::io::Cursor;

    const LIMIT: usize = 1024 * 1024;

    fn png_data_uri() -> String {
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(16, 12))
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        format!("data:image/png;base64,{}", STANDARD.encode(buf))
    }

    fn test_service(generator: Arc<ScriptedGenerator>) -> web::Data<HeadshotService> {
        web::Data::new(HeadshotService::new(
            generator,
            StyleCatalog::with_styles(&[StyleId::CorporateClassic, StyleId::ExecutivePortrait]),
        ))
    }

    macro_rules! test_app {
        ($service:expr, $store:expr) => {
            test::init_service(
                App::new()
                    .wrap(cors_headers())
                    .app_data($service)
                    .app_data($store)
                    .configure(|cfg| configure(cfg, LIMIT)),
            )
            .await
        };
    }

    fn store(dir: &std::path::Path) -> web::Data<UploadStore> {
        web::Data::new(UploadStore::new(dir, 64))
    }

    fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> (String, Vec<u8>) {
        let boundary = "----headshot-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
        (format!("multipart/form-data; boundary={boundary}"), body)
    }

    #[actix_web::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(test_service(Arc::new(ScriptedGenerator::new())), store(dir.path()));

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.headers()
                .get("Access-Control-Allow-Origin")
                .unwrap()
                .to_str()
                .unwrap(),
            "*"
        );

        let body: HealthResponse = test::read_body_json(resp).await;
        assert_eq!(body.status, "ok");
    }

    #[actix_web::test]
    async fn test_styles_lists_active_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(test_service(Arc::new(ScriptedGenerator::new())), store(dir.path()));

        let req = test::TestRequest::get().uri("/api/styles").to_request();
        let styles: Vec<StyleInfo> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            styles.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![StyleId::CorporateClassic, StyleId::ExecutivePortrait]
        );
    }

    #[actix_web::test]
    async fn test_generate_all_mixed_results() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Arc::new(ScriptedGenerator::new().on("A", Scripted::Image("remote-a")));
        let app = test_app!(test_service(generator.clone()), store(dir.path()));

        let req = test::TestRequest::post()
            .uri("/api/generate-all")
            .set_json(json!({
                "imageData": png_data_uri(),
                "prompts": { "corporate-classic": "A", "executive-portrait": "B" }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: GenerateAllResponse = test::read_body_json(resp).await;
        assert!(body.success);
        assert_eq!(body.generated_images.len(), 2);
        assert_eq!(
            body.generated_images[&StyleId::CorporateClassic],
            "data:image/png;base64,remote-a"
        );
        assert!(body.generated_images[&StyleId::ExecutivePortrait]
            .starts_with("data:image/jpeg;base64,"));
        assert_eq!(generator.call_count(), 2);
    }

    #[actix_web::test]
    async fn test_generate_all_missing_prompts_is_client_error() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Arc::new(ScriptedGenerator::new());
        let app = test_app!(test_service(generator.clone()), store(dir.path()));

        let req = test::TestRequest::post()
            .uri("/api/generate-all")
            .set_json(json!({ "imageData": png_data_uri() }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Missing image data or prompts");
        assert_eq!(generator.call_count(), 0);
    }

    #[actix_web::test]
    async fn test_generate_all_invalid_image() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(test_service(Arc::new(ScriptedGenerator::new())), store(dir.path()));

        let req = test::TestRequest::post()
            .uri("/api/generate-all")
            .set_json(json!({ "imageData": "aGVsbG8=", "prompts": {} }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Invalid image");
        assert!(body.details.is_some());
    }

    #[actix_web::test]
    async fn test_generate_all_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(test_service(Arc::new(ScriptedGenerator::new())), store(dir.path()));

        let req = test::TestRequest::post()
            .uri("/api/generate-all")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_generate_all_preflight_and_wrong_method() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(test_service(Arc::new(ScriptedGenerator::new())), store(dir.path()));

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/generate-all")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/generate-all").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap().to_str().unwrap(),
            "*"
        );
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body, ErrorResponse::new("Method not allowed"));

        let req = test::TestRequest::put().uri("/api/upload").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Method not allowed");
    }

    #[actix_web::test]
    async fn test_upload_stores_image() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(test_service(Arc::new(ScriptedGenerator::new())), store(dir.path()));

        let (content_type, body) = multipart_body("image", "me.png", "image/png", b"fakepng");
        let req = test::TestRequest::post()
            .uri("/api/upload")
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: UploadResponse = test::read_body_json(resp).await;
        assert!(body.success);
        assert!(body.filename.ends_with(".png"));
        assert_eq!(std::fs::read(&body.path).unwrap(), b"fakepng");
    }

    #[actix_web::test]
    async fn test_upload_rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(test_service(Arc::new(ScriptedGenerator::new())), store(dir.path()));

        let (content_type, body) = multipart_body("image", "notes.txt", "text/plain", b"hello");
        let req = test::TestRequest::post()
            .uri("/api/upload")
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Only image files are allowed");
    }

    #[actix_web::test]
    async fn test_upload_rejects_oversized_files() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(test_service(Arc::new(ScriptedGenerator::new())), store(dir.path()));

        let (content_type, body) = multipart_body("image", "big.png", "image/png", &[0u8; 128]);
        let req = test::TestRequest::post()
            .uri("/api/upload")
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn test_upload_without_image_field() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(test_service(Arc::new(ScriptedGenerator::new())), store(dir.path()));

        let (content_type, body) = multipart_body("avatar", "me.png", "image/png", b"png");
        let req = test::TestRequest::post()
            .uri("/api/upload")
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "No file uploaded");
    }
}
