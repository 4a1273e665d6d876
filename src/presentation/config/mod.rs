mod settings;

pub use settings::{
    BrowserSettings, LoggingSettings, Settings, SolverSettings, TranscriberSettings,
};
