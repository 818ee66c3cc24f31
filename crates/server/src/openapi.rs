use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDetailDoc { pub detail: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct PollPublicDoc {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
}

#[derive(ToSchema)]
pub struct PollsPublicDoc {
    pub data: Vec<PollPublicDoc>,
    /// total visible to the caller, independent of skip/limit
    pub count: u64,
}

#[derive(ToSchema)]
pub struct PollCreateDoc {
    pub title: String,
    pub description: Option<String>,
}

#[derive(ToSchema)]
pub struct PollUpdateDoc {
    pub title: Option<String>,
    pub description: Option<String>,
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme("bearer", SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)));
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::polls::list,
        crate::routes::polls::read,
        crate::routes::polls::create,
        crate::routes::polls::update,
        crate::routes::polls::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDetailDoc,
            MessageDoc,
            PollPublicDoc,
            PollsPublicDoc,
            PollCreateDoc,
            PollUpdateDoc,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health"),
        (name = "polls")
    )
)]
pub struct ApiDoc;
