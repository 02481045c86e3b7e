use super::output::CommandOutput;
use crate::modules::{
    advanced_settings::{
        commands::SettingsCommand, AdvancedSettingsRepository, AdvancedSettingsRepositoryImpl,
        AdvancedSettingsService,
    },
    course_analysis::{
        BlockSearchRepository, BlockSearchRepositoryImpl, BlockTypeAggregator,
        CourseAnalysisService, CourseRepository, CourseRepositoryImpl,
    },
    migration::{
        commands::ImportCommand, MigrationRepository, MigrationRepositoryImpl, MigrationService,
        MigrationStatusPoller,
    },
    plugin_slots::{commands::SlotsCommand, PluginSlotService},
};
use crate::shared::errors::AppResult;
use crate::shared::{AppConfig, QueryCache, StudioHttpClient};
use crate::log_info;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Command-line client for course authoring in Studio
#[derive(Debug, Parser)]
#[command(name = "course-authoring")]
#[command(about = "Import courses into content libraries and edit course settings")]
#[command(version)]
pub struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Trace-level logging for this crate
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Course to library imports
    #[command(subcommand)]
    Import(ImportCommand),
    /// Advanced course settings
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Plugin slot configuration
    #[command(subcommand)]
    Slots(SlotsCommand),
}

/// Services shared by every command, wired once at startup
pub struct AppState {
    pub config: AppConfig,
    pub cache: QueryCache,
    pub migration_service: Arc<MigrationService>,
    pub analysis_service: Arc<CourseAnalysisService>,
    pub settings_service: Arc<AdvancedSettingsService>,
    pub slot_service: Arc<PluginSlotService>,
}

impl AppState {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        // Slot configuration is checked before anything talks to the network
        let slot_service = Arc::new(PluginSlotService::from_config(&config)?);

        let http_client = Arc::new(StudioHttpClient::for_studio(&config)?);
        let cache = QueryCache::new(config.cache_ttl);

        // Repositories, cast to trait objects for injection
        let migration_repo: Arc<dyn MigrationRepository> =
            Arc::new(MigrationRepositoryImpl::new(Arc::clone(&http_client)));
        let course_repo: Arc<dyn CourseRepository> =
            Arc::new(CourseRepositoryImpl::new(Arc::clone(&http_client)));
        let search_repo: Arc<dyn BlockSearchRepository> = Arc::new(BlockSearchRepositoryImpl::new(
            Arc::clone(&course_repo),
            config.clone(),
        ));
        let settings_repo: Arc<dyn AdvancedSettingsRepository> =
            Arc::new(AdvancedSettingsRepositoryImpl::new(Arc::clone(&http_client)));

        let analysis_service = Arc::new(CourseAnalysisService::new(
            course_repo,
            search_repo,
            Arc::clone(&migration_repo),
            BlockTypeAggregator::new(config.unsupported_block_types.clone()),
            cache.clone(),
        ));

        let poller = MigrationStatusPoller::new(
            Arc::clone(&migration_repo),
            config.poll_interval,
            config.poll_timeout,
        );
        let migration_service = Arc::new(MigrationService::new(
            migration_repo,
            Arc::clone(&analysis_service),
            poller,
            cache.clone(),
        ));

        let settings_service = Arc::new(AdvancedSettingsService::new(settings_repo, cache.clone()));

        log_info!("Services initialized for {}", config.studio_base_url);

        Ok(Self {
            config,
            cache,
            migration_service,
            analysis_service,
            settings_service,
            slot_service,
        })
    }
}

/// Run one command against the wired services
pub async fn dispatch(
    command: Command,
    state: &AppState,
    cancel: &CancellationToken,
) -> AppResult<CommandOutput> {
    match command {
        Command::Import(command) => crate::modules::migration::commands::run(command, state, cancel).await,
        Command::Settings(command) => {
            crate::modules::advanced_settings::commands::run(command, state).await
        }
        Command::Slots(command) => crate::modules::plugin_slots::commands::run(command, state),
    }
}
