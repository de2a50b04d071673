use std::{path::Path, process, sync::Arc};

use akibeks_seo::{
    application::{
        analyzer::PageAnalyzer,
        error::AppError,
        meta::MetaService,
        repos::{HealthProbe, ProjectsRepo, RobotsRepo, SeoConfigRepo, ServicesRepo},
        robots::RobotsService,
        seo_config::SeoConfigService,
        sitemap::SitemapService,
        structured_data::StructuredDataService,
    },
    config,
    domain::{analysis::AnalysisResult, types::Severity},
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, HttpState},
        telemetry,
    },
};
use tokio::sync::Notify;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Sitemap(args) => run_sitemap(settings, args).await,
        config::Command::Robots(args) => run_robots(settings, args).await,
        config::Command::Analyze(args) => run_analyze(settings, args).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings, true).await?;
    let state = build_http_state(repositories, &settings);
    serve_http(&settings, state).await
}

async fn run_sitemap(settings: config::Settings, args: config::SitemapArgs) -> Result<(), AppError> {
    let repositories = init_repositories(&settings, false).await?;
    let services: Arc<dyn ServicesRepo> = repositories.clone();
    let projects: Arc<dyn ProjectsRepo> = repositories;
    let sitemap = SitemapService::new(services, projects, Arc::new(settings.site));

    let body = sitemap.generate(args.kind).await?;
    write_output(args.output.as_deref(), &body).await
}

async fn run_robots(settings: config::Settings, args: config::RobotsArgs) -> Result<(), AppError> {
    let repositories = init_repositories(&settings, false).await?;
    let directives: Arc<dyn RobotsRepo> = repositories;
    let robots = RobotsService::new(directives, Arc::new(settings.site));

    let body = robots.robots_txt().await?;
    write_output(args.output.as_deref(), &body).await
}

async fn run_analyze(settings: config::Settings, args: config::AnalyzeArgs) -> Result<(), AppError> {
    let html = tokio::fs::read_to_string(&args.file)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    let analyzer = PageAnalyzer::new(Arc::new(settings.site));
    let result = analyzer.analyze(&args.url, &html);

    if args.json {
        let body = serde_json::to_string_pretty(&result)
            .map_err(|err| AppError::unexpected(format!("failed to encode analysis: {err}")))?;
        println!("{body}");
    } else {
        print!("{}", summarize_analysis(&args.url, &result));
    }
    Ok(())
}

fn summarize_analysis(url: &str, result: &AnalysisResult) -> String {
    let mut out = format!("{url}: score {}/100\n", result.score);
    for issue in &result.issues {
        let label = match issue.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        out.push_str(&format!("  [{label}] {}\n", issue.message));
    }
    for recommendation in &result.recommendations {
        out.push_str(&format!("  - {recommendation}\n"));
    }
    out
}

async fn write_output(path: Option<&Path>, body: &str) -> Result<(), AppError> {
    match path {
        Some(path) => {
            tokio::fs::write(path, body)
                .await
                .map_err(|err| AppError::from(InfraError::from(err)))?;
            info!(
                target = "akibeks_seo::cli",
                path = %path.display(),
                bytes = body.len(),
                "Document written"
            );
        }
        None => print!("{body}"),
    }
    Ok(())
}

async fn init_repositories(
    settings: &config::Settings,
    migrate: bool,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)?;

    let pool = PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    if migrate {
        PostgresRepositories::run_migrations(&pool)
            .await
            .map_err(|err| AppError::from(InfraError::migration(err.to_string())))?;
    }

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

fn build_http_state(repositories: Arc<PostgresRepositories>, settings: &config::Settings) -> HttpState {
    let profile = Arc::new(settings.site.clone());
    let services_repo: Arc<dyn ServicesRepo> = repositories.clone();
    let projects_repo: Arc<dyn ProjectsRepo> = repositories.clone();
    let robots_repo: Arc<dyn RobotsRepo> = repositories.clone();
    let seo_config_repo: Arc<dyn SeoConfigRepo> = repositories.clone();
    let health: Arc<dyn HealthProbe> = repositories;

    HttpState {
        sitemap: Arc::new(SitemapService::new(
            services_repo,
            projects_repo,
            profile.clone(),
        )),
        robots: Arc::new(RobotsService::new(robots_repo, profile.clone())),
        meta: Arc::new(MetaService::new(seo_config_repo.clone(), profile.clone())),
        structured_data: Arc::new(StructuredDataService::new(profile.clone())),
        analyzer: Arc::new(PageAnalyzer::new(profile)),
        seo_config: Arc::new(SeoConfigService::new(seo_config_repo)),
        health,
    }
}

async fn serve_http(settings: &config::Settings, state: HttpState) -> Result<(), AppError> {
    let router = http::build_router(state);
    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "akibeks_seo::serve",
        addr = %settings.server.addr,
        base_url = %settings.site.base_url(),
        "HTTP server listening"
    );

    let shutdown = Arc::new(Notify::new());
    let trigger = shutdown.clone();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(async move { trigger.notified().await })
            .await
    });

    tokio::select! {
        joined = &mut server => return flatten_server_result(joined),
        _ = shutdown_signal() => {}
    }

    info!(target = "akibeks_seo::serve", "Shutdown requested; draining connections");
    shutdown.notify_one();

    match tokio::time::timeout(settings.server.graceful_shutdown, &mut server).await {
        Ok(joined) => flatten_server_result(joined),
        Err(_) => {
            warn!(
                target = "akibeks_seo::serve",
                timeout_secs = settings.server.graceful_shutdown.as_secs(),
                "Graceful shutdown timed out; aborting open connections"
            );
            server.abort();
            Ok(())
        }
    }
}

fn flatten_server_result(
    joined: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), AppError> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(AppError::unexpected(format!("server error: {err}"))),
        Err(err) => Err(AppError::unexpected(format!("server task failed: {err}"))),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(target = "akibeks_seo::serve", error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(target = "akibeks_seo::serve", error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
