#![deny(warnings)]
pub mod engine;
pub mod model;
pub mod report;
pub mod store;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "tricksets"
    }

    pub const fn title() -> &'static str {
        "Trick Sets Manager"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
