use std::{env, time::Duration};

use crate::interface_adapters::clients::{CloudinaryConfig, CloudinaryCredentials};

// Runtime/server settings read from the environment (`.env` is loaded first).

pub fn http_port() -> u16 {
    env::var("COMIC_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000)
}

pub fn upstream_timeout() -> Duration {
    let millis = env::var("UPSTREAM_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(30_000);
    Duration::from_millis(millis)
}

pub fn replicate_api_base() -> String {
    env::var("REPLICATE_API_BASE").unwrap_or_else(|_| "https://api.replicate.com/v1".to_string())
}

pub fn replicate_api_token() -> Option<String> {
    non_empty_env("REPLICATE_API_TOKEN")
}

pub fn replicate_model() -> String {
    non_empty_env("REPLICATE_MODEL")
        .unwrap_or_else(|| "black-forest-labs/flux-kontext-pro".to_string())
}

pub fn openai_api_base() -> String {
    env::var("OPENAI_API_BASE").unwrap_or_else(|_| "https://api.openai.com/v1".to_string())
}

pub fn openai_api_key() -> Option<String> {
    non_empty_env("OPENAI_API_KEY")
}

pub fn openai_model() -> String {
    non_empty_env("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o".to_string())
}

pub fn dialogue_temperature() -> f32 {
    env::var("DIALOGUE_TEMPERATURE")
        .ok()
        .and_then(|value| value.parse::<f32>().ok())
        .filter(|value| (0.0_f32..=2.0).contains(value))
        .unwrap_or(crate::use_cases::dialogue::DEFAULT_TEMPERATURE)
}

pub fn upload_folder() -> Option<String> {
    non_empty_env("CLOUDINARY_UPLOAD_FOLDER")
}

pub fn cloudinary() -> CloudinaryConfig {
    let credentials = match (
        non_empty_env("CLOUDINARY_API_KEY"),
        non_empty_env("CLOUDINARY_API_SECRET"),
    ) {
        (Some(api_key), Some(api_secret)) => Some(CloudinaryCredentials {
            api_key,
            api_secret,
        }),
        _ => None,
    };
    CloudinaryConfig {
        api_base: env::var("CLOUDINARY_API_BASE")
            .unwrap_or_else(|_| "https://api.cloudinary.com/v1_1".to_string()),
        cloud_name: non_empty_env("CLOUDINARY_CLOUD_NAME").unwrap_or_else(|| "demo".to_string()),
        upload_preset: non_empty_env("CLOUDINARY_UPLOAD_PRESET"),
        credentials,
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
