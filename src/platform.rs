use photo_gallery::RuntimeMode;

/// Resolves the runtime mode for one operation.
///
/// Packaged mobile builds always have direct file access. Everywhere else the
/// configured mode decides, defaulting to native.
pub fn detect_runtime_mode(configured: Option<RuntimeMode>) -> RuntimeMode {
    if cfg!(any(target_os = "android", target_os = "ios")) {
        return RuntimeMode::Native;
    }
    configured.unwrap_or(RuntimeMode::Native)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_native() {
        assert_eq!(detect_runtime_mode(None), RuntimeMode::Native);
    }

    #[cfg(not(any(target_os = "android", target_os = "ios")))]
    #[test]
    fn test_configured_mode_wins_on_desktop() {
        assert_eq!(detect_runtime_mode(Some(RuntimeMode::Web)), RuntimeMode::Web);
    }
}
