use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use async_trait::async_trait;
use serde_json::Value;

use tripsmith_api::routes;
use tripsmith_api::services::openai_service::{GenerationError, TextGeneration};

/// What the fake generation client should hand back.
pub enum CannedResponse {
    Text(String),
    Empty,
    Failure,
}

/// In-memory stand-in for the external generation service. Counts
/// invocations and records the last prompt so tests can assert what (and
/// whether) the model was asked.
pub struct FakeGeneration {
    canned: CannedResponse,
    calls: AtomicUsize,
    last_system_prompt: Mutex<Option<String>>,
}

impl FakeGeneration {
    pub fn new(canned: CannedResponse) -> Self {
        Self {
            canned,
            calls: AtomicUsize::new(0),
            last_system_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_system_prompt(&self) -> Option<String> {
        self.last_system_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGeneration for FakeGeneration {
    async fn generate(
        &self,
        system_prompt: &str,
        _user_payload: &Value,
    ) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_system_prompt.lock().unwrap() = Some(system_prompt.to_string());

        match &self.canned {
            CannedResponse::Text(text) => Ok(text.clone()),
            CannedResponse::Empty => Err(GenerationError::EmptyResponse),
            CannedResponse::Failure => {
                Err(GenerationError::ApiError("upstream unavailable".to_string()))
            }
        }
    }
}

pub struct TestApp {
    pub generation: Arc<FakeGeneration>,
}

impl TestApp {
    pub fn with_response(canned: CannedResponse) -> Self {
        Self {
            generation: Arc::new(FakeGeneration::new(canned)),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let generation: Arc<dyn TextGeneration> = self.generation.clone();

        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .route("/health", web::get().to(|| async { "OK" }))
            .app_data(web::Data::new(generation))
            .service(
                web::scope("/api").route("/itinerary", web::post().to(routes::itinerary::generate)),
            )
    }
}
