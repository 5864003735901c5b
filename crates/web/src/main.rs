use std::time::Duration;

use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;

use config::Config;
use features::matching::client::MatchingClient;
use middleware::auth::TokenAuth;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::hackathons::handlers::list_hackathons,
        features::hackathons::handlers::get_hackathon,
        features::hackathons::handlers::my_hackathons,
        features::hackathons::handlers::register,
        features::hackathons::handlers::withdraw,
        features::hackathons::handlers::list_participants,
        features::organizer_hackathons::handlers::my_hackathons,
        features::organizer_hackathons::handlers::get_hackathon,
        features::organizer_hackathons::handlers::create_hackathon,
        features::organizer_hackathons::handlers::update_hackathon,
        features::organizer_hackathons::handlers::publish_hackathon,
        features::organizer_hackathons::handlers::update_status,
        features::organizer_hackathons::handlers::cancel_hackathon,
        features::teams::handlers::my_teams,
        features::teams::handlers::get_team,
        features::teams::handlers::create_team,
        features::teams::handlers::update_team,
        features::teams::handlers::delete_team,
        features::teams::handlers::leave_team,
        features::teams::handlers::invite_to_team,
        features::teams::handlers::my_invitations,
        features::teams::handlers::respond_to_invitation,
        features::matching::handlers::get_matches,
        features::matching::handlers::invite_match,
    ),
    components(
        schemas(
            storage::dto::hackathon::CreateHackathonRequest,
            storage::dto::hackathon::UpdateHackathonRequest,
            storage::dto::hackathon::StatusUpdateRequest,
            storage::dto::hackathon::HackathonResponse,
            storage::dto::hackathon::HackathonSummary,
            storage::dto::hackathon::HackathonListItem,
            storage::dto::hackathon::ParticipantEntry,
            storage::dto::hackathon::MyHackathonEntry,
            storage::dto::team::CreateTeamRequest,
            storage::dto::team::UpdateTeamRequest,
            storage::dto::team::TeamResponse,
            storage::dto::team::TeamMemberEntry,
            storage::dto::team::TeamDetailResponse,
            storage::dto::team::MyTeamEntry,
            storage::dto::invitation::InviteRequest,
            storage::dto::invitation::RespondToInvitationRequest,
            storage::dto::invitation::InvitationResponse,
            storage::dto::invitation::InvitedTeamSummary,
            storage::dto::invitation::PendingInvitationEntry,
            storage::dto::matching::MatchesResponse,
            storage::dto::matching::MatchSuggestion,
            storage::dto::common::PaginationMeta,
            storage::dto::common::UserSummary,
            storage::models::Hackathon,
            storage::models::HackathonStatus,
            storage::models::HackathonParticipant,
            storage::models::ParticipantStatus,
            storage::models::Team,
            storage::models::TeamStatus,
            storage::models::TeamMember,
            storage::models::MemberRole,
            storage::models::TeamInvitation,
            storage::models::InvitationStatus,
            storage::models::User,
            storage::models::UserRole,
        )
    ),
    tags(
        (name = "hackathons", description = "Public browsing and student registration"),
        (name = "organizer", description = "Organizer-owned hackathon lifecycle"),
        (name = "teams", description = "Team formation, invitations and membership"),
        (name = "matching", description = "Teammate suggestions"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("Token")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting TAkathon API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let token_auth = TokenAuth::new(config.auth_secret.clone());
    let matching_client = MatchingClient::new(
        config.matching_url.clone(),
        Duration::from_millis(config.matching_timeout_ms),
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest(
            "/api/hackathons",
            features::hackathons::routes::routes(token_auth.clone()),
        )
        .nest(
            "/api/organizer/hackathons",
            features::organizer_hackathons::routes::routes(token_auth.clone()),
        )
        .nest(
            "/api/teams",
            features::teams::routes::routes(token_auth.clone())
                .merge(features::matching::routes::routes(token_auth, matching_client)),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(db);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app).await?;

    Ok(())
}
