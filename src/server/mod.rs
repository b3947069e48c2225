pub mod page;

use crate::{
    config::Config,
    error::{ErrorBody, ErrorDetails, ImageGenError, Result},
    huggingface::ImageRequestHandler,
    models::{GenerateRequest, GenerateResponse, GeneratedImage, ModelInfo, Prompt, PNG_MIME_TYPE},
};
use actix_web::{
    error::InternalError,
    http::header::{Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue},
    middleware, web, App, HttpResponse, HttpServer,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use uuid::Uuid;

/// Shared by every worker; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    handler: ImageRequestHandler,
    model: ModelInfo,
}

impl AppState {
    pub fn new(handler: ImageRequestHandler) -> Self {
        let model = ModelInfo::for_model(handler.model_id());
        Self { handler, model }
    }
}

/// Register all routes. Expects `web::Data<AppState>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(index))
        .route("/health", web::get().to(health))
        .route("/api/model", web::get().to(model_info))
        .route("/api/generate", web::post().to(generate_json))
        .route("/generate", web::post().to(generate_png));
}

/// Bind and serve until the process is stopped.
pub async fn run(config: Config) -> Result<()> {
    let handler = ImageRequestHandler::new(&config.huggingface)?;
    let state = web::Data::new(AppState::new(handler));
    let (host, port) = config.bind_address();

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((host.as_str(), port))
    .map_err(|e| ImageGenError::ServerError(format!("Failed to bind {}:{}: {}", host, port, e)))?
    .run()
    .await
    .map_err(|e| ImageGenError::ServerError(e.to_string()))
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("Invalid request body: {}", err);
        let response = HttpResponse::BadRequest().json(ErrorBody {
            error: ErrorDetails {
                category: "invalid_request".to_string(),
                message: message.clone(),
                detail: None,
            },
        });
        InternalError::from_response(message, response).into()
    })
}

async fn index(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page::render(&state.model))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

async fn model_info(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.model)
}

async fn generate(
    state: &AppState,
    request: GenerateRequest,
) -> Result<(Prompt, GeneratedImage, Vec<u8>)> {
    let request_id = Uuid::new_v4();
    let prompt = Prompt::new(request.prompt).map_err(|e| {
        log::warn!("[req:{}] rejected empty prompt", request_id);
        e
    })?;

    log::info!(
        "[req:{}] 🎨 generate ({} chars)",
        request_id,
        prompt.as_str().chars().count()
    );

    let image = state.handler.generate(&prompt).await.map_err(|failure| {
        log::warn!("[req:{}] {} {}", request_id, failure.emoji(), failure.user_message());
        ImageGenError::from(failure)
    })?;

    let png = image
        .to_png()
        .map_err(|e| ImageGenError::ServerError(format!("Failed to encode PNG: {}", e)))?;

    log::info!("[req:{}] ✅ {} bytes of PNG", request_id, png.len());

    Ok((prompt, image, png))
}

async fn generate_json(
    state: web::Data<AppState>,
    request: web::Json<GenerateRequest>,
) -> Result<HttpResponse> {
    let (prompt, image, png) = generate(&state, request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(GenerateResponse {
        image_base64: STANDARD.encode(&png),
        mime_type: PNG_MIME_TYPE.to_string(),
        filename: prompt.download_filename(),
        width: image.width(),
        height: image.height(),
        model: state.handler.model_id().to_string(),
        caption: prompt.caption(),
    }))
}

async fn generate_png(
    state: web::Data<AppState>,
    request: web::Json<GenerateRequest>,
) -> Result<HttpResponse> {
    let (prompt, _image, png) = generate(&state, request.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .content_type(PNG_MIME_TYPE)
        .insert_header(attachment(&prompt.download_filename()))
        .body(png))
}

/// `Content-Disposition: attachment` that survives non-ASCII prompts.
fn attachment(filename: &str) -> ContentDisposition {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect();

    let mut parameters = vec![DispositionParam::Filename(fallback)];
    if !filename.is_ascii() {
        parameters.push(DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext("UTF-8".to_string()),
            language_tag: None,
            value: filename.as_bytes().to_vec(),
        }));
    }

    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters,
    }
}
