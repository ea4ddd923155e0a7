use object_store::memory::InMemory;
use std::sync::Arc;

use crate::{
    adapters::{
        inbound::http::AppState,
        outbound::{
            persistence::{
                InMemoryPropertyRepository, InMemoryViewingRequestRepository,
                SqlPropertyRepository, SqlViewingRequestRepository,
            },
            storage::{ObjectStoreMediaAdapter, S3Config, create_s3_store},
            telemetry::TracingEventSink,
        },
    },
    ports::{
        repositories::{PropertyRepository, ViewingRequestRepository},
        storage::MediaStore,
        telemetry::MediaEventSink,
    },
    services::{PropertyServiceBuilder, PropertyServiceImpl, ViewingRequestServiceImpl},
};

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub repository_backend: RepositoryBackend,
    pub media: MediaConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::InMemory,
            repository_backend: RepositoryBackend::InMemory,
            media: MediaConfig::default(),
        }
    }
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    /// AWS S3 or any S3-compatible service such as MinIO
    S3 {
        bucket: String,
        region: String,
        access_key: Option<String>,
        secret_key: Option<String>,
        endpoint: Option<String>,
    },
}

/// Repository backend configuration
#[derive(Debug, Clone)]
pub enum RepositoryBackend {
    InMemory,
    Database { connection_string: String },
}

/// Where uploaded images live and how they are addressed
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub public_base_url: String,
    pub prefix: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:3000/media".to_string(),
            prefix: "properties".to_string(),
        }
    }
}

/// Application dependencies container
pub struct AppDependencies {
    pub media_store: Arc<dyn MediaStore>,
    pub property_repository: Arc<dyn PropertyRepository>,
    pub viewing_request_repository: Arc<dyn ViewingRequestRepository>,
}

/// Application services container
pub struct AppServices {
    pub property_service: PropertyServiceImpl,
    pub viewing_request_service: ViewingRequestServiceImpl,
}

impl AppServices {
    /// State for the HTTP router
    pub fn app_state(&self) -> AppState {
        AppState::new(
            Arc::new(self.property_service.clone()),
            Arc::new(self.viewing_request_service.clone()),
        )
    }
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
    events: Option<Arc<dyn MediaEventSink>>,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            events: None,
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    /// Configure repository backend
    pub fn with_repository_backend(mut self, backend: RepositoryBackend) -> Self {
        self.config.repository_backend = backend;
        self
    }

    /// Configure media addressing
    pub fn with_media(mut self, media: MediaConfig) -> Self {
        self.config.media = media;
        self
    }

    /// Replace the default tracing event sink
    pub fn with_event_sink(mut self, events: Arc<dyn MediaEventSink>) -> Self {
        self.events = Some(events);
        self
    }

    /// Build the application dependencies
    pub async fn build_dependencies(&self) -> Result<AppDependencies, AppError> {
        let media_store = self.create_media_store()?;
        let (property_repository, viewing_request_repository) = self.create_repositories().await?;

        Ok(AppDependencies {
            media_store,
            property_repository,
            viewing_request_repository,
        })
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let deps = self.build_dependencies().await?;

        let events = self
            .events
            .unwrap_or_else(|| Arc::new(TracingEventSink::new()));

        let viewing_request_service = ViewingRequestServiceImpl::new(
            deps.property_repository.clone(),
            deps.viewing_request_repository,
        );

        let property_service = PropertyServiceBuilder::new()
            .repository(deps.property_repository)
            .store(deps.media_store)
            .events(events)
            .build()
            .map_err(|message| AppError::ServiceInit {
                message: message.to_string(),
            })?;

        Ok(AppServices {
            property_service,
            viewing_request_service,
        })
    }

    /// Create the media store based on configuration
    fn create_media_store(&self) -> Result<Arc<dyn MediaStore>, AppError> {
        let backend: Arc<dyn object_store::ObjectStore> = match &self.config.storage_backend {
            StorageBackend::InMemory => Arc::new(InMemory::new()),
            StorageBackend::S3 {
                bucket,
                region,
                access_key,
                secret_key,
                endpoint,
            } => {
                let config = S3Config {
                    bucket: bucket.clone(),
                    region: region.clone(),
                    access_key: access_key.clone(),
                    secret_key: secret_key.clone(),
                    endpoint: endpoint.clone(),
                };
                create_s3_store(&config).map_err(|e| AppError::StorageInit {
                    message: e.to_string(),
                })?
            }
        };

        Ok(Arc::new(ObjectStoreMediaAdapter::new(
            backend,
            self.config.media.public_base_url.clone(),
            self.config.media.prefix.clone(),
        )))
    }

    /// Create the repositories based on configuration
    ///
    /// Both repositories share one backend; viewing requests reference properties.
    async fn create_repositories(
        &self,
    ) -> Result<(Arc<dyn PropertyRepository>, Arc<dyn ViewingRequestRepository>), AppError> {
        match &self.config.repository_backend {
            RepositoryBackend::InMemory => Ok((
                Arc::new(InMemoryPropertyRepository::new()),
                Arc::new(InMemoryViewingRequestRepository::new()),
            )),
            RepositoryBackend::Database { connection_string } => {
                let repository = SqlPropertyRepository::connect(connection_string)
                    .await
                    .map_err(|e| AppError::RepositoryInit {
                        message: format!("Failed to connect to database: {}", e),
                    })?;
                repository
                    .migrate()
                    .await
                    .map_err(|e| AppError::RepositoryInit {
                        message: format!("Failed to run migrations: {}", e),
                    })?;

                let viewing_requests = SqlViewingRequestRepository::new(repository.pool().clone());
                viewing_requests
                    .migrate()
                    .await
                    .map_err(|e| AppError::RepositoryInit {
                        message: format!("Failed to run viewing request migrations: {}", e),
                    })?;

                Ok((Arc::new(repository), Arc::new(viewing_requests)))
            }
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },

    #[error("Repository initialization error: {message}")]
    RepositoryInit { message: String },

    #[error("Service initialization error: {message}")]
    ServiceInit { message: String },
}

impl AppConfig {
    /// Read configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| AppError::Configuration {
                message: format!("{} environment variable required", name),
            })
        };

        let storage_backend = match lookup("STORAGE_BACKEND").as_deref() {
            Some("s3") | Some("minio") => StorageBackend::S3 {
                bucket: required("S3_BUCKET")?,
                region: lookup("S3_REGION").unwrap_or_else(|| "us-east-1".to_string()),
                access_key: lookup("S3_ACCESS_KEY"),
                secret_key: lookup("S3_SECRET_KEY"),
                endpoint: lookup("S3_ENDPOINT"),
            },
            Some("memory") | None => StorageBackend::InMemory,
            Some(other) => {
                return Err(AppError::Configuration {
                    message: format!("Unknown STORAGE_BACKEND '{}'", other),
                });
            }
        };

        let repository_backend = match lookup("REPOSITORY_BACKEND").as_deref() {
            Some("database") => RepositoryBackend::Database {
                connection_string: required("DATABASE_URL")?,
            },
            Some("memory") | None => RepositoryBackend::InMemory,
            Some(other) => {
                return Err(AppError::Configuration {
                    message: format!("Unknown REPOSITORY_BACKEND '{}'", other),
                });
            }
        };

        let defaults = MediaConfig::default();
        let media = MediaConfig {
            public_base_url: lookup("MEDIA_PUBLIC_BASE_URL").unwrap_or(defaults.public_base_url),
            prefix: lookup("MEDIA_PREFIX").unwrap_or(defaults.prefix),
        };

        Ok(AppConfig {
            storage_backend,
            repository_backend,
            media,
        })
    }
}

/// Convenience functions for common configurations
///
/// Create an in-memory application for testing and development
pub async fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::InMemory)
        .with_repository_backend(RepositoryBackend::InMemory)
        .build()
        .await
}

/// Create application from environment variables
pub async fn create_app_from_env() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_config(AppConfig::from_env()?)
        .build()
        .await
}
