pub mod base_url_input;
pub mod empty_state;
pub mod entity_form;
pub mod help_bar;
pub mod help_popup;
pub mod loading_indicator;
pub mod notification;
pub mod popup;
pub mod screen_title;
