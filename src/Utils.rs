/// console logger initialization for demos and tests
pub mod logging;
