use crate::events::{ApiJob, DataEvent, Mutation};
use blog_api::{Client, Request, RequestError};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs network jobs and reports the outcome as `DataEvent`s.
#[derive(Clone)]
pub struct DataLoader {
    pub api_client: Arc<Client>,
    pub data_tx: mpsc::UnboundedSender<DataEvent>,
}

impl DataLoader {
    pub fn new(api_client: Arc<Client>, data_tx: mpsc::UnboundedSender<DataEvent>) -> Self {
        Self {
            api_client,
            data_tx,
        }
    }

    /// Apply the job's mutation, if any, then reload both collections.
    ///
    /// A failed mutation skips the reload. The job's control is released
    /// at the end either way.
    pub async fn run_job(&self, job: ApiJob) {
        let ApiJob { control, mutation } = job;

        let outcome = match mutation {
            Some(mutation) => match self.apply(mutation).await {
                Ok(()) => {
                    self.send(DataEvent::MutationApplied {
                        control: control.clone(),
                    });
                    self.load_all().await
                }
                Err(e) => Err(e),
            },
            None => self.load_all().await,
        };

        if let Err(error) = outcome {
            tracing::error!("{:?} failed: {}", control, error);
            self.send(DataEvent::RequestFailed {
                control: control.clone(),
                error,
            });
        }

        self.send(DataEvent::ControlReleased { control });
    }

    async fn apply(&self, mutation: Mutation) -> Result<(), RequestError> {
        tracing::info!("{} {}", mutation.method(), mutation.path());
        tracing::debug!("Request body: {}", mutation.body());

        match mutation {
            Mutation::CreatePost(req) => self.api_client.send(req).await.map(drop),
            Mutation::UpdatePost(req) => self.api_client.send(req).await.map(drop),
            Mutation::CreateComment(req) => self.api_client.send(req).await.map(drop),
            Mutation::PatchComment(req) => self.api_client.send(req).await.map(drop),
            Mutation::ReplaceComment(req) => self.api_client.send(req).await.map(drop),
        }
    }

    /// Fetch posts and comments concurrently and replace both lists.
    async fn load_all(&self) -> Result<(), RequestError> {
        tracing::debug!("Fetching posts and comments");
        let (posts, comments) = tokio::try_join!(
            self.api_client.send(Request::posts().list()),
            self.api_client.send(Request::comments().list()),
        )?;

        self.send(DataEvent::DataLoaded {
            posts: posts.into_inner(),
            comments: comments.into_inner(),
        });
        Ok(())
    }

    fn send(&self, event: DataEvent) {
        if self.data_tx.send(event).is_err() {
            tracing::debug!("Event receiver dropped, discarding event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Control;
    use blog_api::BaseUrl;

    fn is_release_of(event: &DataEvent, control: &Control) -> bool {
        matches!(event, DataEvent::ControlReleased { control: c } if c == control)
    }

    fn unreachable_loader() -> (DataLoader, mpsc::UnboundedReceiver<DataEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let client = Client::new(BaseUrl::new("http://127.0.0.1:1"));
        (DataLoader::new(Arc::new(client), tx), rx)
    }

    async fn collect(mut rx: mpsc::UnboundedReceiver<DataEvent>) -> Vec<DataEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_failed_reload_reports_and_releases() {
        let (loader, rx) = unreachable_loader();
        loader.run_job(ApiJob::reload(Control::Bootstrap)).await;
        drop(loader);

        let events = collect(rx).await;
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0],
            DataEvent::RequestFailed { control: Control::Bootstrap, error } if error.method == "GET"
        ));
        assert!(is_release_of(&events[1], &Control::Bootstrap));
    }

    #[tokio::test]
    async fn test_failed_mutation_skips_reload() {
        let (loader, rx) = unreachable_loader();
        let mutation = Mutation::UpdatePost(Request::posts().soft_delete("4".into()));
        loader
            .run_job(ApiJob::mutate(Control::PostUpdate, mutation))
            .await;
        drop(loader);

        let events = collect(rx).await;
        assert_eq!(events.len(), 2);
        match &events[0] {
            DataEvent::RequestFailed { error, .. } => {
                assert_eq!(error.method, "PATCH");
                assert_eq!(error.path, "/posts/4");
            }
            other => panic!("expected a failure, got {:?}", other),
        }
        assert!(is_release_of(&events[1], &Control::PostUpdate));
    }
}
