use super::ApplicationEnv;
use crate::{
    media_store::{GridFsMediaStore, MediaStore},
    repository::{CapsulesRepository, CapsulesRepositoryImpl},
    service::{
        capsules_service::{CapsulesService, CapsulesServiceConfig, CapsulesServiceImpl},
        dispatcher_service::{
            HttpMailDispatcher, HttpMailDispatcherConfig, NoopDispatcher, NotificationDispatcher,
        },
        release_sweeper::{ReleaseSweeper, ReleaseSweeperConfig},
    },
};
use axum::extract::FromRef;
use mongodb::{options::ClientOptions, Client};
use std::sync::Arc;
use tokio::{sync::Notify, task::JoinHandle};

#[derive(Clone, FromRef)]
pub struct ApplicationState {
    pub capsules_service: Arc<dyn CapsulesService>,
    pub media_store: Arc<dyn MediaStore>,
}

pub struct ApplicationStateToClose {
    pub db_client: Client,
    pub release_sweeper_close_notify: Arc<Notify>,
    pub release_sweeper_handle: JoinHandle<()>,
}

pub async fn create_state(
    env: &ApplicationEnv,
) -> anyhow::Result<(ApplicationState, ApplicationStateToClose)> {
    tracing::info!("connecting to database");
    let db_client_options = ClientOptions::parse(&env.db_connection_string).await?;
    let db_client = Client::with_options(db_client_options)?;
    let db = db_client.database(&env.db_name);

    // Collections are created lazily on first use
    tracing::info!("creating repositories");
    let capsules_repository: Arc<dyn CapsulesRepository> =
        Arc::new(CapsulesRepositoryImpl::new(db.clone()));
    let media_store: Arc<dyn MediaStore> =
        Arc::new(GridFsMediaStore::new(&db, env.public_base_url.clone()));

    tracing::info!("creating services");
    let dispatcher: Arc<dyn NotificationDispatcher> = match &env.mail {
        Some(mail) => {
            let config = HttpMailDispatcherConfig {
                api_url: mail.api_url.clone(),
                api_key: mail.api_key.clone(),
                from: mail.from.clone(),
                timeout: mail.timeout,
            };
            Arc::new(HttpMailDispatcher::new(config)?)
        }
        None => {
            tracing::warn!("mail is not configured, notifications will be skipped");
            Arc::new(NoopDispatcher)
        }
    };

    let config = CapsulesServiceConfig {
        max_audio_len: env.max_audio_len,
        max_image_len: env.max_image_len,
    };
    let capsules_service = CapsulesServiceImpl::new(
        config,
        capsules_repository.clone(),
        media_store.clone(),
    );
    let capsules_service = Arc::new(capsules_service);

    let config = ReleaseSweeperConfig {
        interval: env.sweep_interval,
    };
    let release_sweeper = ReleaseSweeper::new(config, capsules_repository, dispatcher);

    tracing::info!("starting release sweeper");
    let release_sweeper_close_notify = Arc::new(Notify::new());
    let release_sweeper_handle =
        tokio::spawn(release_sweeper.run(release_sweeper_close_notify.clone()));

    Ok((
        ApplicationState {
            capsules_service,
            media_store,
        },
        ApplicationStateToClose {
            db_client,
            release_sweeper_close_notify,
            release_sweeper_handle,
        },
    ))
}
