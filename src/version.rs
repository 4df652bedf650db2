//! Build metadata embedded by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// `slotplan <version> (<date>, <commit>)`
pub fn version_line() -> String {
    format!(
        "slotplan {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
