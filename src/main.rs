use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kuglana::club::handlers as club_handlers;
use kuglana::club::repository::InMemoryClubRepository;
use kuglana::import::handlers as import_handlers;
use kuglana::matches::handlers as match_handlers;
use kuglana::matches::repository::InMemoryMatchRepository;
use kuglana::player::handlers as player_handlers;
use kuglana::player::repository::InMemoryPlayerRepository;
// use kuglana::player::repository::PostgresPlayerRepository; // For production
use kuglana::stats::handlers as stats_handlers;
use kuglana::stats::repository::InMemoryTrainingRepository;
// use kuglana::stats::repository::PostgresTrainingRepository; // For production
use kuglana::shared::AppState;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kuglana=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting bowling club management server");

    // Create shared application state with dependency injection
    // Easy to switch between implementations:
    let club_repository = Arc::new(InMemoryClubRepository::new());
    let player_repository = Arc::new(InMemoryPlayerRepository::new());
    let training_repository = Arc::new(InMemoryTrainingRepository::new());
    let match_repository = Arc::new(InMemoryMatchRepository::new());

    // For production with PostgreSQL:
    // let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    // let pool = sqlx::PgPool::connect(&database_url).await.expect("Failed to connect to database");
    // let player_repository = Arc::new(PostgresPlayerRepository::new(pool.clone()));
    // let training_repository = Arc::new(PostgresTrainingRepository::new(pool));

    let app_state = AppState::new(
        club_repository,
        player_repository,
        training_repository,
        match_repository,
    );

    // build our application with the club, player, training and match routes
    let app = Router::new()
        .route("/", get(|| async { "Kuglana server" }))
        .route(
            "/clubs",
            post(club_handlers::create_club).get(club_handlers::list_clubs),
        )
        .route(
            "/clubs/:club_id",
            get(club_handlers::get_club_details).delete(club_handlers::delete_club),
        )
        .route(
            "/clubs/:club_id/players",
            post(player_handlers::add_player).get(player_handlers::list_players),
        )
        .route(
            "/clubs/:club_id/players/:player_id",
            get(player_handlers::get_player)
                .put(player_handlers::update_player)
                .delete(player_handlers::delete_player),
        )
        .route(
            "/clubs/:club_id/players/:player_id/trainings",
            post(stats_handlers::record_training).get(stats_handlers::list_trainings),
        )
        .route(
            "/clubs/:club_id/players/:player_id/trainings/:training_id",
            axum::routing::delete(stats_handlers::delete_training),
        )
        .route(
            "/clubs/:club_id/players/:player_id/reset-stats",
            post(stats_handlers::reset_stats),
        )
        .route(
            "/clubs/:club_id/matches",
            post(match_handlers::add_match).get(match_handlers::list_matches),
        )
        .route(
            "/clubs/:club_id/matches/:match_id",
            get(match_handlers::get_match)
                .put(match_handlers::update_match)
                .delete(match_handlers::delete_match),
        )
        .route("/admin/import", post(import_handlers::import_data))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // run our app with hyper, listening globally on port 3000
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Server running on http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}
