//! Console diagnostics.
//!
//! Messages go to the browser console through `web_sys::console`. Imported JS
//! functions cannot be called off wasm32, so native builds (and native tests)
//! drop them.

/// Console severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Level {
    Debug,
    Info,
    Warn,
}

pub(crate) fn emit(level: Level, message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let value = wasm_bindgen::JsValue::from_str(message);
        match level {
            Level::Debug => web_sys::console::debug_1(&value),
            Level::Info => web_sys::console::log_1(&value),
            Level::Warn => web_sys::console::warn_1(&value),
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (level, message);
    }
}

macro_rules! console_debug {
    ($($arg:tt)*) => {
        $crate::diag::emit($crate::diag::Level::Debug, &format!($($arg)*))
    };
}

macro_rules! console_log {
    ($($arg:tt)*) => {
        $crate::diag::emit($crate::diag::Level::Info, &format!($($arg)*))
    };
}

macro_rules! console_warn {
    ($($arg:tt)*) => {
        $crate::diag::emit($crate::diag::Level::Warn, &format!($($arg)*))
    };
}

pub(crate) use {console_debug, console_log, console_warn};
