use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_explicit_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("VIBETUNES_CONFIG_PATH", "/tmp/vibetunes-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/vibetunes-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("vibetunes")
            .join("config.toml")
    );
}

#[test]
fn default_paths_fall_back_to_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::remove("XDG_STATE_HOME");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");

    let home = std::path::PathBuf::from("/tmp/home-dir");
    assert_eq!(
        default_config_path().unwrap(),
        home.join(".config").join("vibetunes").join("config.toml")
    );
    assert_eq!(
        default_log_path().unwrap(),
        home.join(".local/state").join("vibetunes").join("vibetunes.log")
    );
}

#[test]
fn defaults_point_at_local_service() {
    let s = Settings::default();
    assert_eq!(s.server.base_url, "http://localhost:8000");
    assert_eq!(s.server.request_timeout_secs, None);
    assert_eq!(s.audio.fetch_timeout_secs, None);
    assert_eq!(s.logging.filter, "info");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[server]
base_url = "https://music.example.com/api/"
request_timeout_secs = 15

[audio]
volume = 0.5
quit_fade_out_ms = 123
fetch_timeout_secs = 90

[ui]
header_text = "hello"
follow_playback = false

[logging]
filter = "vibetunes=debug"
file = "/tmp/vibetunes.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("VIBETUNES_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("VIBETUNES__SERVER__BASE_URL");

    let s = Settings::load().unwrap();
    assert_eq!(s.server.base_url, "https://music.example.com/api/");
    assert_eq!(s.server.request_timeout_secs, Some(15));
    assert_eq!(s.audio.volume, 0.5);
    assert_eq!(s.audio.quit_fade_out_ms, 123);
    assert_eq!(s.audio.fetch_timeout_secs, Some(90));
    assert_eq!(s.ui.header_text, "hello");
    assert!(!s.ui.follow_playback);
    assert_eq!(s.logging.filter, "vibetunes=debug");
    assert_eq!(
        s.logging.file,
        Some(std::path::PathBuf::from("/tmp/vibetunes.log"))
    );
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[server]
base_url = "http://from-file:8000"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("VIBETUNES_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("VIBETUNES__SERVER__BASE_URL", "http://from-env:9000");

    let s = Settings::load().unwrap();
    assert_eq!(s.server.base_url, "http://from-env:9000");
}

#[test]
fn missing_config_file_uses_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let _g1 = EnvGuard::set(
        "VIBETUNES_CONFIG_PATH",
        dir.path().join("absent.toml").to_str().unwrap(),
    );
    let _g2 = EnvGuard::remove("VIBETUNES__SERVER__BASE_URL");

    let s = Settings::load().unwrap();
    assert_eq!(s.server.base_url, "http://localhost:8000");
    assert_eq!(s.audio.quit_fade_out_ms, 500);
}

#[test]
fn validate_rejects_empty_base_url_and_bad_volume() {
    let mut s = Settings::default();
    s.server.base_url = "  ".into();
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.volume = 1.5;
    assert!(s.validate().is_err());
}
