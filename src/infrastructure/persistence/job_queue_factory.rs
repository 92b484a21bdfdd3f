use std::sync::Arc;

use crate::application::ports::{JobQueue, QueueError};
use crate::presentation::config::{QueueBackend, QueueSettings};

use super::{InMemoryJobQueue, PgJobQueue, create_pool, run_migrations};

pub struct JobQueueFactory;

impl JobQueueFactory {
    pub async fn create(settings: &QueueSettings) -> Result<Arc<dyn JobQueue>, QueueError> {
        match settings.backend {
            QueueBackend::Memory => {
                tracing::warn!(
                    queue = %settings.name,
                    "Using in-memory job queue; queued jobs are lost on restart"
                );
                Ok(Arc::new(
                    InMemoryJobQueue::new(&settings.name).with_result_ttl(settings.result_ttl()),
                ))
            }
            QueueBackend::Postgres => {
                let pool = create_pool(&settings.database_url, settings.max_connections).await?;
                if settings.run_migrations {
                    run_migrations(&pool).await?;
                }
                Ok(Arc::new(PgJobQueue::new(pool, &settings.name)))
            }
        }
    }
}
