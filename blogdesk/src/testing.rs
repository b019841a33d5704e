use crate::app_core::{AppCore, DataEventHandler};
use crate::commands::executor;
use crate::events::{AppCommand, ApiJob, DataEvent};
use crate::input::{Key, KeyEvent};
use crate::state::AppState;
use crate::ui::screens::Screen;
use blog_api::endpoints::{comments::Comment, posts::Post};

/// Mock data event handler for tests (no real async tasks)
///
/// Commands run through `execute_command_sync`; any network job is
/// recorded instead of spawned.
#[derive(Default)]
pub struct MockDataHandler {
    pub jobs: Vec<ApiJob>,
}

impl MockDataHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataEventHandler for MockDataHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        if let Some(job) = executor::execute_command_sync(command, state) {
            self.jobs.push(job);
        }
    }
}

pub struct TestApp {
    core: AppCore<MockDataHandler>,
}

impl TestApp {
    /// Create a new test app with mock handler
    pub fn new() -> Self {
        Self {
            core: AppCore::new(MockDataHandler::new()),
        }
    }

    /// Create a test app with both collections already loaded
    pub fn with_data(posts: Vec<Post>, comments: Vec<Comment>) -> Self {
        let mut app = Self::new();
        app.load(posts, comments);
        app
    }

    /// Simulate a successful reload of both collections
    pub fn load(&mut self, posts: Vec<Post>, comments: Vec<Comment>) {
        self.send_data_event(DataEvent::DataLoaded { posts, comments });
    }

    /// Send a single key event
    pub fn send_key(&mut self, key: Key) {
        self.core.handle_key(KeyEvent::new(key));
    }

    /// Send a key event with modifiers
    pub fn send_key_event(&mut self, event: KeyEvent) {
        self.core.handle_key(event);
    }

    /// Send multiple keys in sequence
    pub fn send_keys(&mut self, keys: &[Key]) {
        for key in keys {
            self.send_key(*key);
        }
    }

    /// Type text one character at a time
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send_key(Key::Char(c));
        }
    }

    /// Execute a command without going through key mapping
    pub fn execute(&mut self, command: AppCommand) {
        self.core.execute(command);
    }

    /// Inject a data event (simulate an API response)
    pub fn send_data_event(&mut self, event: DataEvent) {
        self.core.handle_data_event(event);
    }

    /// Jobs the app asked to run, oldest first
    pub fn jobs(&self) -> &[ApiJob] {
        &self.core.handler().jobs
    }

    pub fn last_job(&self) -> Option<&ApiJob> {
        self.jobs().last()
    }

    /// Finish a job the way the loader does on success: mutation applied,
    /// fresh data, control released.
    pub fn complete_job(&mut self, job: &ApiJob, posts: Vec<Post>, comments: Vec<Comment>) {
        if job.mutation.is_some() {
            self.send_data_event(DataEvent::MutationApplied {
                control: job.control.clone(),
            });
        }
        self.load(posts, comments);
        self.send_data_event(DataEvent::ControlReleased {
            control: job.control.clone(),
        });
    }

    /// Get read-only access to current state
    pub fn state(&self) -> &AppState {
        self.core.state()
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        self.core.state_mut()
    }

    /// Assert that the app is on a specific screen type
    ///
    /// Uses discriminant comparison to check screen type without
    /// requiring full equality of state.
    pub fn assert_screen_type(&self, expected_discriminant: std::mem::Discriminant<Screen>) {
        let current = self.state().current_screen();
        assert_eq!(
            std::mem::discriminant(current),
            expected_discriminant,
            "Expected different screen. Current: {:?}",
            current
        );
    }

    /// Assert that the app should quit
    pub fn assert_should_quit(&self) {
        assert!(
            self.core.should_quit(),
            "App should be marked for quit but is not"
        );
    }

    /// Assert that the app should NOT quit
    pub fn assert_not_quit(&self) {
        assert!(
            !self.core.should_quit(),
            "App should NOT be marked for quit but is"
        );
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
