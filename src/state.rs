use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::services::api_client::ApiClient;
use crate::services::exercise::ExerciseRunner;
use crate::services::learning::LearningService;
use crate::services::progress::ProgressTracker;
use crate::session::UserContext;
use crate::storage::LocalStorage;

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    session: Arc<UserContext>,
    api: Arc<ApiClient>,
    learning: LearningService,
    progress: Arc<ProgressTracker>,
    runner: ExerciseRunner,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<LocalStorage>) -> Self {
        let session = Arc::new(UserContext::load(storage));
        let api = Arc::new(ApiClient::new(
            config.api_base_url.clone(),
            config.api_timeout,
            Arc::clone(&session),
        ));
        let runner = ExerciseRunner::new(config.exercise_delay);

        Self {
            started_at: Instant::now(),
            learning: LearningService::new(Arc::clone(&api)),
            session,
            api,
            progress: Arc::new(ProgressTracker::new()),
            runner,
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn session(&self) -> &UserContext {
        &self.session
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn learning(&self) -> &LearningService {
        &self.learning
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn runner(&self) -> &ExerciseRunner {
        &self.runner
    }
}
