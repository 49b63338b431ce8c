//! Tests for the layered configuration loader.

use callboard::config::{ConfigError, ConfigLoader};
use std::{
    env, fs,
    path::PathBuf,
    sync::{Mutex, MutexGuard, OnceLock},
};
use tempfile::TempDir;

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn env_guard() -> MutexGuard<'static, ()> {
    env_lock()
        .lock()
        .unwrap_or_else(|poison| poison.into_inner())
}

fn clear_env() {
    unsafe {
        env::remove_var("CALLBOARD_PROFILE");
        env::remove_var("CALLBOARD_API_BIND_ADDR");
        env::remove_var("CALLBOARD_LOG_LEVEL");
        env::remove_var("CALLBOARD_SERVICE_TOKEN");
        env::remove_var("CALLBOARD_SERVICE_TOKENS");
        env::remove_var("CALLBOARD_PUBLIC_BASE_URL");
        env::remove_var("CALLBOARD_CASTING_CODE_LENGTH");
        env::remove_var("CALLBOARD_FEATURE_FLAG_DEFAULT_CASTING_SURVEYS");
    }
}

fn write_env_file(dir: &TempDir, name: &str, contents: &str) {
    let path = dir.path().join(name);
    fs::write(path, contents).unwrap();
}

#[test]
fn loads_defaults_with_token_from_process_env() {
    let _guard = env_guard();
    clear_env();

    unsafe {
        env::set_var("CALLBOARD_SERVICE_TOKEN", "test-token");
    }

    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with defaults");

    assert_eq!(cfg.profile, "local");
    assert_eq!(cfg.api_bind_addr, "0.0.0.0:8080");
    assert_eq!(cfg.service_tokens, vec!["test-token".to_string()]);
    assert_eq!(cfg.casting_code_length, 6);
    cfg.bind_addr().expect("default bind addr parses");

    clear_env();
}

#[test]
fn layered_env_files_apply_in_order() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(&temp_dir, ".env", "CALLBOARD_API_BIND_ADDR=127.0.0.1:3000\n");
    write_env_file(
        &temp_dir,
        ".env.local",
        "CALLBOARD_PROFILE=test\nCALLBOARD_API_BIND_ADDR=127.0.0.1:4000\nCALLBOARD_SERVICE_TOKEN=layered-token\n",
    );
    write_env_file(
        &temp_dir,
        ".env.test",
        "CALLBOARD_API_BIND_ADDR=192.168.0.10:5000\n",
    );
    write_env_file(
        &temp_dir,
        ".env.test.local",
        "CALLBOARD_API_BIND_ADDR=10.0.0.5:6000\n",
    );

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with layered env files");

    assert_eq!(cfg.profile, "test");
    assert_eq!(cfg.api_bind_addr, "10.0.0.5:6000");

    clear_env();
}

#[test]
fn service_tokens_accepts_comma_separated_list() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(
        &temp_dir,
        ".env",
        "CALLBOARD_SERVICE_TOKENS=alpha, beta ,gamma,\n",
    );

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with token list");

    assert_eq!(
        cfg.service_tokens,
        vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()]
    );

    clear_env();
}

#[test]
fn missing_service_tokens_is_an_error() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));

    assert!(matches!(
        loader.load(),
        Err(ConfigError::MissingServiceTokens)
    ));

    clear_env();
}

#[test]
fn public_base_url_trailing_slash_is_trimmed() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(
        &temp_dir,
        ".env",
        "CALLBOARD_SERVICE_TOKEN=token\nCALLBOARD_PUBLIC_BASE_URL=https://callboard.example/\n",
    );

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads");

    assert_eq!(cfg.public_base_url, "https://callboard.example");

    clear_env();
}

#[test]
fn feature_flag_defaults_are_collected_from_env() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(
        &temp_dir,
        ".env",
        "CALLBOARD_SERVICE_TOKEN=token\nCALLBOARD_FEATURE_FLAG_DEFAULT_CASTING_SURVEYS=true\nCALLBOARD_FEATURE_FLAG_DEFAULT_QR_DOWNLOADS=false\n",
    );

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads");

    assert_eq!(cfg.feature_flag_defaults.get("casting_surveys"), Some(&true));
    assert_eq!(cfg.feature_flag_defaults.get("qr_downloads"), Some(&false));

    clear_env();
}

#[test]
fn invalid_casting_code_length_is_rejected() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(
        &temp_dir,
        ".env",
        "CALLBOARD_SERVICE_TOKEN=token\nCALLBOARD_CASTING_CODE_LENGTH=32\n",
    );

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));

    assert!(matches!(
        loader.load(),
        Err(ConfigError::InvalidCastingCodeLength { value: 32 })
    ));

    clear_env();
}
