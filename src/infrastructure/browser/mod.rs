mod chromium_browser;
mod chromium_page;

pub use chromium_browser::{ChromiumSession, drive_events};
pub use chromium_page::ChromiumPage;
