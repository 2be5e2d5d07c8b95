//! Browser console logging and panic reporting.

use std::sync::Once;

static INIT: Once = Once::new();

/// Route `log` to the console and panics to `console.error`. Safe to call
/// from every mount.
pub fn init() {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
        if console_log::init_with_level(level).is_err() {
            // Another logger was installed by the host bundle; keep it.
            log::debug!("console logger already installed");
        }
    });
}
