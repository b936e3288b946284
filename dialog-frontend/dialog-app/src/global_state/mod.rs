pub mod dialog_settings;
pub mod overlay;
pub mod page_host;
