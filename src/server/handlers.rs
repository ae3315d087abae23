use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures::TryStreamExt;

use crate::{
    error::{HeadshotError, Result},
    models::{ErrorResponse, GenerateAllRequest, HealthResponse, UploadResponse},
    service::HeadshotService,
    upload::UploadStore,
};

pub const UPLOAD_FIELD: &str = "image";

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        message: "Server is running".to_string(),
    })
}

pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorResponse::new("Method not allowed"))
}

pub async fn list_styles(service: web::Data<HeadshotService>) -> HttpResponse {
    HttpResponse::Ok().json(service.styles())
}

pub async fn generate_all(
    service: web::Data<HeadshotService>,
    body: web::Json<GenerateAllRequest>,
) -> Result<HttpResponse> {
    match service.generate_all(body.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => {
            if e.is_client_error() {
                log::warn!("Rejected generate-all request: {}", e);
            } else {
                log::error!("Generation error: {}", e);
            }
            Err(e)
        }
    }
}

pub async fn upload(store: web::Data<UploadStore>, mut payload: Multipart) -> Result<HttpResponse> {
    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        if name != UPLOAD_FIELD {
            // Drain fields we don't care about.
            while field.try_next().await.map_err(multipart_error)?.is_some() {}
            continue;
        }

        let is_image = field
            .content_type()
            .map(|mime| mime.type_().as_str() == "image")
            .unwrap_or(false);
        if !is_image {
            return Err(HeadshotError::Upload("Only image files are allowed".into()));
        }

        let original_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
            store.check_size(bytes.len() + chunk.len())?;
            bytes.extend_from_slice(&chunk);
        }

        let stored = store
            .save(&name, original_name.as_deref(), &bytes)
            .await
            .inspect_err(|e| log::error!("Upload error: {}", e))?;

        return Ok(HttpResponse::Ok().json(UploadResponse {
            success: true,
            filename: stored.filename,
            path: stored.path.display().to_string(),
        }));
    }

    Err(HeadshotError::Upload("No file uploaded".into()))
}

fn multipart_error(e: actix_multipart::MultipartError) -> HeadshotError {
    HeadshotError::Upload(format!("Malformed upload: {}", e))
}
