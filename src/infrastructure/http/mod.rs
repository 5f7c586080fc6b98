use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;
use crate::{
    controllers::{
        ai::AiController, analytics::AnalyticsController, auth::AuthController,
        entry::EntryController, feedback::FeedbackController, health,
        invoice::InvoiceController, project::ProjectController, task::TaskController,
        user::UserController, webhook::WebhookController,
    },
    domain::{
        ai::AiService, analytics::AnalyticsService, auth::AuthService, billing::BillingService,
        entry::EntryService, feedback::FeedbackService, invoice::InvoiceService,
        project::ProjectService, task::TaskService, user::UserService,
    },
    infrastructure::auth::{auth_middleware, request_id_middleware},
    infrastructure::repositories::{
        AnalyticsRepository, EntryRepository, FeedbackRepository, InvoiceRepository,
        ProjectRepository, RefreshTokenRepository, TaskAssistant, TaskRepository,
        UserRepository,
    },
};

/// Wire repositories, services and controllers and assemble every route
pub fn build_router(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    assistant: Arc<dyn TaskAssistant>,
) -> Router {
    // 1. Repositories
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let refresh_token_repo = Arc::new(RefreshTokenRepository::new(pool.clone()));
    let project_repo = Arc::new(ProjectRepository::new(pool.clone()));
    let task_repo = Arc::new(TaskRepository::new(pool.clone()));
    let entry_repo = Arc::new(EntryRepository::new(pool.clone()));
    let invoice_repo = Arc::new(InvoiceRepository::new(pool.clone()));
    let analytics_repo = Arc::new(AnalyticsRepository::new(pool.clone()));
    let feedback_repo = Arc::new(FeedbackRepository::new(pool.clone()));

    // 2. Services
    let auth_service = Arc::new(AuthService::new(
        user_repo.clone(),
        refresh_token_repo,
        config.clone(),
    ));
    let user_service = Arc::new(UserService::new(user_repo.clone()));
    let project_service = Arc::new(ProjectService::new(project_repo.clone(), task_repo.clone()));
    let task_service = Arc::new(TaskService::new(task_repo.clone(), project_repo.clone()));
    let entry_service = Arc::new(EntryService::new(entry_repo, project_repo.clone()));
    let invoice_service = Arc::new(InvoiceService::new(
        invoice_repo,
        user_repo.clone(),
        project_repo.clone(),
    ));
    let analytics_service = Arc::new(AnalyticsService::new(analytics_repo));
    let ai_service = Arc::new(AiService::new(
        assistant,
        user_repo.clone(),
        project_repo,
        task_repo,
    ));
    let feedback_service = Arc::new(FeedbackService::new(feedback_repo));
    let billing_service = Arc::new(BillingService::new(
        user_repo.clone(),
        config.webhook_secret.clone(),
    ));

    // 3. Controllers
    let auth_controller = Arc::new(AuthController::new(auth_service));
    let user_controller = Arc::new(UserController::new(user_service));
    let project_controller = Arc::new(ProjectController::new(project_service));
    let task_controller = Arc::new(TaskController::new(task_service));
    let entry_controller = Arc::new(EntryController::new(entry_service));
    let invoice_controller = Arc::new(InvoiceController::new(invoice_service));
    let analytics_controller = Arc::new(AnalyticsController::new(analytics_service));
    let ai_controller = Arc::new(AiController::new(ai_service));
    let feedback_controller = Arc::new(FeedbackController::new(feedback_service));
    let webhook_controller = Arc::new(WebhookController::new(billing_service));

    let auth_layer =
        || middleware::from_fn_with_state((user_repo.clone(), config.clone()), auth_middleware);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/api/auth/signup", post(AuthController::signup))
        .route("/api/auth/login", post(AuthController::login))
        .route("/api/auth/refresh", post(AuthController::refresh))
        .route("/api/auth/logout", post(AuthController::logout))
        .with_state(auth_controller.clone());

    let auth_protected_routes = Router::new()
        .route(
            "/api/auth/verify",
            get(AuthController::verify).post(AuthController::verify),
        )
        .route("/api/auth/logout/all", post(AuthController::logout_all))
        .with_state(auth_controller)
        .layer(auth_layer());

    let user_routes = Router::new()
        .route(
            "/api/me",
            get(UserController::get_me).patch(UserController::update_me),
        )
        .route("/api/me/company", put(UserController::update_company))
        .with_state(user_controller)
        .layer(auth_layer());

    let project_routes = Router::new()
        .route(
            "/api/projects",
            get(ProjectController::list_projects).post(ProjectController::create_project),
        )
        .route(
            "/api/projects/:id",
            get(ProjectController::get_project)
                .put(ProjectController::update_project)
                .delete(ProjectController::delete_project),
        )
        .route("/api/projects/:id/board", get(ProjectController::get_board))
        .with_state(project_controller)
        .layer(auth_layer());

    let task_routes = Router::new()
        .route(
            "/api/tasks",
            get(TaskController::list_tasks).post(TaskController::create_task),
        )
        .route(
            "/api/tasks/:id",
            get(TaskController::get_task)
                .put(TaskController::update_task)
                .delete(TaskController::delete_task),
        )
        // Kanban clients send the move as either PATCH or POST
        .route(
            "/api/tasks/:id/status",
            patch(TaskController::update_task_status).post(TaskController::update_task_status),
        )
        .with_state(task_controller)
        .layer(auth_layer());

    let entry_routes = Router::new()
        .route(
            "/api/entries",
            get(EntryController::list_entries).post(EntryController::create_entry),
        )
        .route(
            "/api/entries/:id",
            axum::routing::delete(EntryController::delete_entry),
        )
        .with_state(entry_controller)
        .layer(auth_layer());

    let invoice_routes = Router::new()
        .route(
            "/api/invoices",
            get(InvoiceController::list_invoices).post(InvoiceController::create_invoice),
        )
        .route("/api/invoices/next-id", get(InvoiceController::next_invoice_id))
        .route(
            "/api/invoices/:id",
            get(InvoiceController::get_invoice)
                .put(InvoiceController::update_invoice)
                .delete(InvoiceController::delete_invoice),
        )
        .route(
            "/api/invoices/:id/status",
            patch(InvoiceController::update_invoice_status),
        )
        .route("/api/invoices/:id/pdf", get(InvoiceController::download_pdf))
        .with_state(invoice_controller)
        .layer(auth_layer());

    let analytics_routes = Router::new()
        .route(
            "/api/analytics/hours-by-day",
            get(AnalyticsController::hours_by_day),
        )
        .route(
            "/api/analytics/minutes-by-project",
            get(AnalyticsController::minutes_by_project),
        )
        .route(
            "/api/analytics/invoices",
            get(AnalyticsController::invoice_summary),
        )
        .with_state(analytics_controller)
        .layer(auth_layer());

    let ai_routes = Router::new()
        .route("/api/ai/prioritize", post(AiController::prioritize))
        .route("/api/ai/generate-tasks", post(AiController::generate_tasks))
        .with_state(ai_controller)
        .layer(auth_layer());

    // Feedback: anyone may submit, only admins may read
    let feedback_public_routes = Router::new()
        .route("/api/feedback", post(FeedbackController::submit))
        .with_state(feedback_controller.clone());

    let feedback_admin_routes = Router::new()
        .route("/api/feedback", get(FeedbackController::list))
        .with_state(feedback_controller)
        .layer(auth_layer());

    // Payment provider callbacks carry no bearer token
    let webhook_routes = Router::new()
        .route("/api/webhook", post(WebhookController::handle))
        .with_state(webhook_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool)
        .merge(auth_routes)
        .merge(auth_protected_routes)
        .merge(user_routes)
        .merge(project_routes)
        .merge(task_routes)
        .merge(entry_routes)
        .merge(invoice_routes)
        .merge(analytics_routes)
        .merge(ai_routes)
        .merge(feedback_public_routes)
        .merge(feedback_admin_routes)
        .merge(webhook_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until the process is stopped
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
