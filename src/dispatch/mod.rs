//! Command execution on the async runtime (impure shell).
//!
//! Each [`Command`] runs as its own tokio task against a shared
//! [`PostService`]. Outcomes are sent back over an unbounded channel as
//! [`ServiceEvent`]s, which the UI thread drains with `try_recv` between
//! frames. Tasks never touch application state.

use crate::client::PostService;
use crate::model::{ApiError, ImageUpload, PostDraft};
use crate::state::{Command, FormMode, FormSubmission, ServiceEvent};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

/// Receiving half handed to the event loop.
pub type EventReceiver = UnboundedReceiver<ServiceEvent>;

/// Spawns commands onto a runtime.
#[derive(Clone)]
pub struct Dispatcher {
    service: Arc<dyn PostService>,
    runtime: Handle,
    events: UnboundedSender<ServiceEvent>,
}

impl Dispatcher {
    /// Dispatcher for `service` on `runtime`, plus the event receiver.
    pub fn new(service: Arc<dyn PostService>, runtime: Handle) -> (Self, EventReceiver) {
        let (events, receiver) = mpsc::unbounded_channel();
        let dispatcher = Self {
            service,
            runtime,
            events,
        };
        (dispatcher, receiver)
    }

    /// Run every command in `commands`.
    pub fn dispatch_all(&self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.dispatch(command);
        }
    }

    /// Spawn one command. Returns immediately.
    pub fn dispatch(&self, command: Command) {
        debug!(?command, "Dispatching");
        let service = Arc::clone(&self.service);
        let events = self.events.clone();

        self.runtime.spawn(async move {
            let event = execute(service.as_ref(), command).await;
            if events.send(event).is_err() {
                warn!("Event loop closed before a command finished");
            }
        });
    }
}

/// Execute `command` and describe its outcome.
pub async fn execute(service: &dyn PostService, command: Command) -> ServiceEvent {
    match command {
        Command::FetchPosts(ticket) => {
            let result = service.retrieve(ticket.retrieval()).await;
            ServiceEvent::PostsFetched { ticket, result }
        }
        Command::DeletePost(id) => ServiceEvent::PostDeleted {
            id,
            result: service.delete_post(id).await,
        },
        Command::LoadPost(ticket) => ServiceEvent::PostLoaded {
            ticket,
            result: service.get_post(ticket.id()).await,
        },
        Command::CreatePost(submission) => {
            let result = match build_draft(&submission).await {
                Ok(draft) => service.create_post(draft).await,
                Err(err) => Err(err),
            };
            ServiceEvent::PostSaved {
                mode: FormMode::Create,
                result,
            }
        }
        Command::UpdatePost(id, submission) => {
            let result = match build_draft(&submission).await {
                Ok(draft) => service.update_post(id, draft).await,
                Err(err) => Err(err),
            };
            ServiceEvent::PostSaved {
                mode: FormMode::Edit(id),
                result,
            }
        }
    }
}

/// Read the submission's image, if any, off the async workers.
async fn build_draft(submission: &FormSubmission) -> Result<PostDraft, ApiError> {
    let draft = submission.to_draft();
    let Some(path) = submission.image_path.clone() else {
        return Ok(draft);
    };

    let read_path = path.clone();
    let image = tokio::task::spawn_blocking(move || ImageUpload::from_path(&read_path))
        .await
        .map_err(|e| ApiError::Attachment {
            path,
            reason: e.to_string(),
        })??;
    Ok(draft.with_image(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryPostService;
    use crate::model::{PageNumber, PageRequest, Post, PostId};
    use crate::state::PostsCoordinator;
    use std::io::Write;
    use std::path::PathBuf;

    fn service() -> MemoryPostService {
        MemoryPostService::with_posts(
            vec![
                Post::new(PostId::new(1), "Hello", "World"),
                Post::new(PostId::new(2), "Other", "Text"),
            ],
            10,
        )
    }

    fn submission(image_path: Option<PathBuf>) -> FormSubmission {
        FormSubmission {
            title: "Title".to_string(),
            body: "Body".to_string(),
            image_path,
        }
    }

    #[tokio::test]
    async fn fetch_returns_ticket_with_result() {
        let mut coordinator = PostsCoordinator::new();
        let ticket = coordinator
            .sync(PageRequest::new(PageNumber::FIRST, "hello"))
            .unwrap();

        let event = execute(&service(), Command::FetchPosts(ticket.clone())).await;

        match event {
            ServiceEvent::PostsFetched {
                ticket: returned,
                result,
            } => {
                assert_eq!(returned, ticket);
                assert_eq!(result.unwrap().total_count(), 1);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_reports_outcome() {
        let event = execute(&service(), Command::DeletePost(PostId::new(2))).await;
        assert_eq!(
            event,
            ServiceEvent::PostDeleted {
                id: PostId::new(2),
                result: Ok(())
            }
        );
    }

    #[tokio::test]
    async fn create_reads_image_from_disk() {
        let (path, mut file) = scratch_file("upload.png");
        file.write_all(b"png bytes").unwrap();

        let event = execute(&service(), Command::CreatePost(submission(Some(path.clone())))).await;

        match event {
            ServiceEvent::PostSaved {
                mode: FormMode::Create,
                result: Ok(post),
            } => assert!(post.image_url.unwrap().ends_with("upload.png")),
            other => panic!("unexpected event {other:?}"),
        }
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn unreadable_image_fails_the_save() {
        let missing = PathBuf::from("/nonexistent/dir/cat.png");
        let event = execute(
            &service(),
            Command::UpdatePost(PostId::new(1), submission(Some(missing))),
        )
        .await;

        assert!(matches!(
            event,
            ServiceEvent::PostSaved {
                mode: FormMode::Edit(_),
                result: Err(ApiError::Attachment { .. })
            }
        ));
    }

    #[test]
    fn dispatcher_delivers_events_over_channel() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (dispatcher, mut events) =
            Dispatcher::new(Arc::new(service()), runtime.handle().clone());

        dispatcher.dispatch(Command::DeletePost(PostId::new(1)));

        let event = runtime.block_on(events.recv()).unwrap();
        assert!(matches!(event, ServiceEvent::PostDeleted { .. }));
    }

    fn scratch_file(name: &str) -> (PathBuf, std::fs::File) {
        let dir = std::env::temp_dir().join(format!("postboard-dispatch-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let file = std::fs::File::create(&path).unwrap();
        (path, file)
    }
}
