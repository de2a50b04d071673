//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{net::SocketAddr, num::NonZeroU32, path::PathBuf, str::FromStr, time::Duration};

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::application::profile::{DEFAULT_BASE_URL, SiteProfile};
use crate::domain::types::SitemapKind;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "akibeks-seo";
const ENV_PREFIX: &str = "AKIBEKS_SEO";
const BASE_URL_ENV: &str = "BASE_URL";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_GRACEFUL_SHUTDOWN_SECS: u64 = 30;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 8;

/// Command-line arguments for the akibeks-seo binary.
#[derive(Debug, Parser)]
#[command(
    name = "akibeks-seo",
    version,
    about = "Sitemap, robots.txt and SEO metadata service"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "AKIBEKS_SEO_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the HTTP service.
    Serve(Box<ServeArgs>),
    /// Render one sitemap document from the database.
    Sitemap(SitemapArgs),
    /// Render robots.txt from the database.
    Robots(RobotsArgs),
    /// Analyse a local HTML file.
    Analyze(AnalyzeArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct DatabaseOverride {
    /// Override the database connection URL.
    #[arg(long = "database-url", value_name = "URL")]
    pub database_url: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct SiteOverride {
    /// Override the public base URL used for absolute links.
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    #[command(flatten)]
    pub database: DatabaseOverride,

    #[command(flatten)]
    pub site: SiteOverride,

    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the graceful shutdown timeout.
    #[arg(long = "server-graceful-shutdown-seconds", value_name = "SECONDS")]
    pub server_graceful_shutdown_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the database pool size.
    #[arg(long = "database-max-connections", value_name = "COUNT")]
    pub database_max_connections: Option<u32>,
}

#[derive(Debug, Args, Clone)]
pub struct SitemapArgs {
    #[command(flatten)]
    pub database: DatabaseOverride,

    #[command(flatten)]
    pub site: SiteOverride,

    /// Which sitemap to render.
    #[arg(value_enum, value_name = "KIND")]
    pub kind: SitemapKind,

    /// Write to this file instead of stdout.
    #[arg(long, short, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct RobotsArgs {
    #[command(flatten)]
    pub database: DatabaseOverride,

    #[command(flatten)]
    pub site: SiteOverride,

    /// Write to this file instead of stdout.
    #[arg(long, short, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub site: SiteOverride,

    /// HTML file to analyse.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Public URL the file is served at.
    #[arg(long, value_name = "URL")]
    pub url: String,

    /// Print the result as JSON.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub json: bool,
}

/// Fully-resolved deployment settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub database: DatabaseSettings,
    pub site: SiteProfile,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    pub graceful_shutdown: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: NonZeroU32,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
///
/// A bare `BASE_URL` environment variable is honoured when neither a file nor
/// `AKIBEKS_SEO__SITE__BASE_URL` sets the base URL.
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("site.default_keywords")
            .with_list_parse_key("site.regional_keywords")
            .with_list_parse_key("site.same_as")
            .try_parsing(true),
    );

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_base_url_fallback(std::env::var(BASE_URL_ENV).ok());

    match cli.command.as_ref() {
        Some(Command::Serve(args)) => raw.apply_serve_overrides(&args.overrides),
        Some(Command::Sitemap(args)) => {
            raw.apply_database_override(&args.database);
            raw.apply_site_override(&args.site);
        }
        Some(Command::Robots(args)) => {
            raw.apply_database_override(&args.database);
            raw.apply_site_override(&args.site);
        }
        Some(Command::Analyze(args)) => raw.apply_site_override(&args.site),
        None => raw.apply_serve_overrides(&ServeOverrides::default()),
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    server: RawServerSettings,
    logging: RawLoggingSettings,
    database: RawDatabaseSettings,
    site: RawSiteSettings,
}

impl RawSettings {
    fn apply_base_url_fallback(&mut self, value: Option<String>) {
        if self.site.base_url.is_none() {
            self.site.base_url = value.filter(|url| !url.trim().is_empty());
        }
    }

    fn apply_serve_overrides(&mut self, overrides: &ServeOverrides) {
        if let Some(host) = overrides.server_host.as_ref() {
            self.server.host = Some(host.clone());
        }
        if let Some(port) = overrides.server_port {
            self.server.port = Some(port);
        }
        if let Some(seconds) = overrides.server_graceful_shutdown_seconds {
            self.server.graceful_shutdown_seconds = Some(seconds);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(max) = overrides.database_max_connections {
            self.database.max_connections = Some(max);
        }

        self.apply_database_override(&overrides.database);
        self.apply_site_override(&overrides.site);
    }

    fn apply_database_override(&mut self, overrides: &DatabaseOverride) {
        if let Some(url) = overrides.database_url.as_ref() {
            self.database.url = Some(url.clone());
        }
    }

    fn apply_site_override(&mut self, overrides: &SiteOverride) {
        if let Some(url) = overrides.base_url.as_ref() {
            self.site.base_url = Some(url.clone());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            server,
            logging,
            database,
            site,
        } = raw;

        Ok(Self {
            server: build_server_settings(server)?,
            logging: build_logging_settings(logging)?,
            database: build_database_settings(database)?,
            site: build_site_profile(site)?,
        })
    }
}

fn build_server_settings(server: RawServerSettings) -> Result<ServerSettings, LoadError> {
    let host = server.host.unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = server.port.unwrap_or(DEFAULT_PORT);
    if port == 0 {
        return Err(LoadError::invalid(
            "server.port",
            "port must be greater than zero",
        ));
    }

    let addr = parse_socket_addr(&host, port)
        .map_err(|reason| LoadError::invalid("server.addr", reason))?;

    let graceful_secs = server
        .graceful_shutdown_seconds
        .unwrap_or(DEFAULT_GRACEFUL_SHUTDOWN_SECS);
    if graceful_secs == 0 {
        return Err(LoadError::invalid(
            "server.graceful_shutdown_seconds",
            "must be greater than zero",
        ));
    }

    Ok(ServerSettings {
        addr,
        graceful_shutdown: Duration::from_secs(graceful_secs),
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_database_settings(database: RawDatabaseSettings) -> Result<DatabaseSettings, LoadError> {
    let url = database.url.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    });

    let max_connections = database
        .max_connections
        .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS);
    let max_connections = NonZeroU32::new(max_connections).ok_or_else(|| {
        LoadError::invalid("database.max_connections", "must be greater than zero")
    })?;

    Ok(DatabaseSettings {
        url,
        max_connections,
    })
}

fn build_site_profile(site: RawSiteSettings) -> Result<SiteProfile, LoadError> {
    let base_url = site
        .base_url
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let parsed = Url::parse(base_url.trim())
        .map_err(|err| LoadError::invalid("site.base_url", format!("invalid URL: {err}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "site.base_url",
            "scheme must be http or https",
        ));
    }

    let mut profile = SiteProfile::default().with_base_url(&base_url);

    replace(&mut profile.organization_name, site.organization_name);
    replace(&mut profile.default_title, site.default_title);
    replace(&mut profile.default_description, site.default_description);
    replace(&mut profile.default_keywords, site.default_keywords);
    replace(&mut profile.locale, site.locale);
    replace(&mut profile.language, site.language);
    replace(&mut profile.country_name, site.country_name);
    replace(&mut profile.telephone, site.telephone);
    replace(&mut profile.email, site.email);
    replace(&mut profile.logo, site.logo);
    replace(&mut profile.default_image, site.default_image);
    replace(&mut profile.same_as, site.same_as);

    replace(&mut profile.address.street, site.address.street);
    replace(&mut profile.address.locality, site.address.locality);
    replace(&mut profile.address.region, site.address.region);
    replace(&mut profile.address.postal_code, site.address.postal_code);
    replace(&mut profile.address.country, site.address.country);

    if let Some(latitude) = site.geo.latitude {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(LoadError::invalid(
                "site.geo.latitude",
                "must lie within -90..=90",
            ));
        }
        profile.geo.latitude = latitude;
    }
    if let Some(longitude) = site.geo.longitude {
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(LoadError::invalid(
                "site.geo.longitude",
                "must lie within -180..=180",
            ));
        }
        profile.geo.longitude = longitude;
    }
    replace(&mut profile.geo.region_code, site.geo.region_code);
    replace(&mut profile.geo.placename, site.geo.placename);

    if let Some(keywords) = site.regional_keywords {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|keyword| keyword.trim().to_string())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        if keywords.is_empty() {
            return Err(LoadError::invalid(
                "site.regional_keywords",
                "must list at least one keyword",
            ));
        }
        profile.regional_keywords = keywords;
    }

    Ok(profile)
}

fn replace<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawServerSettings {
    host: Option<String>,
    port: Option<u16>,
    graceful_shutdown_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawDatabaseSettings {
    url: Option<String>,
    max_connections: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSiteSettings {
    base_url: Option<String>,
    organization_name: Option<String>,
    default_title: Option<String>,
    default_description: Option<String>,
    default_keywords: Option<Vec<String>>,
    locale: Option<String>,
    language: Option<String>,
    country_name: Option<String>,
    telephone: Option<String>,
    email: Option<String>,
    logo: Option<String>,
    default_image: Option<String>,
    address: RawAddressSettings,
    geo: RawGeoSettings,
    regional_keywords: Option<Vec<String>>,
    same_as: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawAddressSettings {
    street: Option<String>,
    locality: Option<String>,
    region: Option<String>,
    postal_code: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawGeoSettings {
    latitude: Option<f64>,
    longitude: Option<f64>,
    region_code: Option<String>,
    placename: Option<String>,
}

fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, String> {
    let candidate = format!("{host}:{port}");
    candidate
        .parse()
        .map_err(|err| format!("invalid address `{candidate}`: {err}"))
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

        assert_eq!(settings.server.addr.port(), DEFAULT_PORT);
        assert_eq!(settings.logging.level, LevelFilter::INFO);
        assert!(matches!(settings.logging.format, LogFormat::Compact));
        assert_eq!(settings.database.url, None);
        assert_eq!(settings.database.max_connections.get(), 8);
        assert_eq!(settings.site.base_url(), "https://akibeks.co.ke");
    }

    #[test]
    fn cli_overrides_take_highest_precedence() {
        let mut raw = RawSettings::default();
        raw.server.port = Some(4000);
        raw.logging.level = Some("info".to_string());
        raw.site.base_url = Some("https://from-file.example".to_string());

        let overrides = ServeOverrides {
            server_port: Some(4321),
            log_level: Some("debug".to_string()),
            site: SiteOverride {
                base_url: Some("https://from-cli.example/".to_string()),
            },
            ..Default::default()
        };

        raw.apply_serve_overrides(&overrides);
        let settings = Settings::from_raw(raw).expect("valid settings");

        assert_eq!(settings.server.addr.port(), 4321);
        assert_eq!(settings.logging.level, LevelFilter::DEBUG);
        assert_eq!(settings.site.base_url(), "https://from-cli.example");
    }

    #[test]
    fn bare_base_url_env_is_a_fallback() {
        let mut raw = RawSettings::default();
        raw.apply_base_url_fallback(Some("https://env.example".to_string()));
        assert_eq!(raw.site.base_url.as_deref(), Some("https://env.example"));

        let mut configured = RawSettings::default();
        configured.site.base_url = Some("https://file.example".to_string());
        configured.apply_base_url_fallback(Some("https://env.example".to_string()));
        assert_eq!(
            configured.site.base_url.as_deref(),
            Some("https://file.example")
        );

        let mut blank = RawSettings::default();
        blank.apply_base_url_fallback(Some("   ".to_string()));
        assert_eq!(blank.site.base_url, None);
    }

    #[test]
    fn cli_json_logging_enforces_format() {
        let mut raw = RawSettings::default();
        let overrides = ServeOverrides {
            log_json: Some(true),
            ..Default::default()
        };

        raw.apply_serve_overrides(&overrides);
        let settings = Settings::from_raw(raw).expect("valid settings");

        assert!(matches!(settings.logging.format, LogFormat::Json));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut raw = RawSettings::default();
        raw.site.base_url = Some("ftp://akibeks.co.ke".to_string());

        let err = Settings::from_raw(raw).unwrap_err();
        assert!(matches!(err, LoadError::Invalid { key: "site.base_url", .. }));
    }

    #[test]
    fn rejects_empty_regional_keywords() {
        let mut raw = RawSettings::default();
        raw.site.regional_keywords = Some(vec![" ".to_string()]);

        let err = Settings::from_raw(raw).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid {
                key: "site.regional_keywords",
                ..
            }
        ));
    }

    #[test]
    fn site_fields_override_defaults() {
        let mut raw = RawSettings::default();
        raw.site.organization_name = Some("Akibeks Mombasa".to_string());
        raw.site.geo.placename = Some("Mombasa".to_string());
        raw.site.geo.latitude = Some(-4.0435);
        raw.site.regional_keywords = Some(vec!["mombasa".to_string()]);

        let settings = Settings::from_raw(raw).expect("valid settings");

        assert_eq!(settings.site.organization_name, "Akibeks Mombasa");
        assert_eq!(settings.site.geo.placename, "Mombasa");
        assert_eq!(settings.site.geo.latitude, -4.0435);
        assert_eq!(settings.site.regional_keywords, vec!["mombasa".to_string()]);
        assert_eq!(settings.site.locale, "en_KE");
    }

    #[test]
    fn rejects_zero_pool_size() {
        let mut raw = RawSettings::default();
        raw.database.max_connections = Some(0);
        assert!(Settings::from_raw(raw).is_err());
    }

    #[test]
    fn default_to_serve_command() {
        let args = CliArgs::parse_from(["akibeks-seo"]);
        let command = args
            .command
            .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));
        assert!(matches!(command, Command::Serve(_)));
    }

    #[test]
    fn parse_sitemap_arguments() {
        let args = CliArgs::parse_from([
            "akibeks-seo",
            "sitemap",
            "images",
            "--database-url",
            "postgres://example",
            "--output",
            "/tmp/sitemap-images.xml",
        ]);

        match args.command.expect("sitemap command") {
            Command::Sitemap(sitemap) => {
                assert_eq!(sitemap.kind, SitemapKind::Images);
                assert_eq!(
                    sitemap.database.database_url.as_deref(),
                    Some("postgres://example")
                );
                assert_eq!(
                    sitemap.output.as_deref(),
                    Some(std::path::Path::new("/tmp/sitemap-images.xml"))
                );
            }
            _ => panic!("wrong command parsed"),
        }
    }

    #[test]
    fn parse_analyze_arguments() {
        let args = CliArgs::parse_from([
            "akibeks-seo",
            "analyze",
            "page.html",
            "--url",
            "https://akibeks.co.ke/",
            "--json",
        ]);

        match args.command.expect("analyze command") {
            Command::Analyze(analyze) => {
                assert_eq!(analyze.file, std::path::Path::new("page.html"));
                assert_eq!(analyze.url, "https://akibeks.co.ke/");
                assert!(analyze.json);
            }
            _ => panic!("wrong command parsed"),
        }
    }

    #[test]
    fn parse_serve_overrides() {
        let args = CliArgs::parse_from([
            "akibeks-seo",
            "serve",
            "--server-host",
            "0.0.0.0",
            "--database-url",
            "postgres://override",
        ]);

        match args.command.expect("serve command") {
            Command::Serve(serve) => {
                assert_eq!(serve.overrides.server_host.as_deref(), Some("0.0.0.0"));
                assert_eq!(
                    serve.overrides.database.database_url.as_deref(),
                    Some("postgres://override")
                );
            }
            _ => panic!("wrong command parsed"),
        }
    }
}
