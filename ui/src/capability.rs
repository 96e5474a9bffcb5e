//! Display availability, resolved once at startup.

/// Whether a windowing environment is reachable.
///
/// Resolved eagerly and passed into the front-end selector, so the
/// text-mode fallback is an explicit branch rather than an exception path.
/// The probe cannot see missing GL/native libraries; `eframe` startup
/// failure is handled separately by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayCapability {
    available: bool,
}

impl DisplayCapability {
    /// Probes the current process environment. On Unix-like desktops a
    /// display server announces itself through `DISPLAY` (X11) or
    /// `WAYLAND_DISPLAY`; Windows and macOS always have one.
    pub fn detect() -> Self {
        if cfg!(any(target_os = "windows", target_os = "macos")) {
            return Self { available: true };
        }
        Self::from_env(
            std::env::var_os("DISPLAY").is_some(),
            std::env::var_os("WAYLAND_DISPLAY").is_some(),
        )
    }

    /// Capability from explicit probe results, for tests and callers that
    /// resolve the environment themselves.
    pub fn from_env(x11: bool, wayland: bool) -> Self {
        Self {
            available: x11 || wayland,
        }
    }

    pub fn is_available(self) -> bool {
        self.available
    }
}
