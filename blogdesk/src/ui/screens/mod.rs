pub mod logs_screen;
pub mod main_screen;

use crate::state::LogsState;

#[derive(Debug, Clone)]
pub enum Screen {
    /// Posts and comments side by side with their forms.
    Main,
    Logs(LogsState),
}
