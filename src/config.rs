// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{delete_setting, get_setting, set_setting};
use crate::models::{Session, UserProfile};
use anyhow::Result;
use rusqlite::Connection;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const ENV_API_URL: &str = "SPENDBOOK_API_URL";
pub const ENV_TOKEN: &str = "SPENDBOOK_TOKEN";

const KEY_API_URL: &str = "api_url";
const KEY_TOKEN: &str = "token";
const KEY_USER_ID: &str = "user_id";
const KEY_USER_EMAIL: &str = "user_email";
const KEY_USER_NAME: &str = "user_name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub session: Option<Session>,
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Stored settings with environment overrides applied.
pub fn load(conn: &Connection) -> Result<Settings> {
    let stored = load_stored(conn)?;
    Ok(with_overrides(
        stored,
        env_nonempty(ENV_API_URL),
        env_nonempty(ENV_TOKEN),
    ))
}

pub fn load_stored(conn: &Connection) -> Result<Settings> {
    let api_url = get_setting(conn, KEY_API_URL)?.unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let session = match get_setting(conn, KEY_TOKEN)? {
        Some(token) => Some(Session {
            token,
            user: UserProfile {
                id: get_setting(conn, KEY_USER_ID)?.unwrap_or_default(),
                email: get_setting(conn, KEY_USER_EMAIL)?.unwrap_or_default(),
                name: get_setting(conn, KEY_USER_NAME)?.unwrap_or_default(),
            },
        }),
        None => None,
    };
    Ok(Settings { api_url, session })
}

pub fn with_overrides(
    mut settings: Settings,
    api_url: Option<String>,
    token: Option<String>,
) -> Settings {
    if let Some(url) = api_url {
        settings.api_url = url;
    }
    if let Some(token) = token {
        let user = settings.session.take().map(|s| s.user).unwrap_or_default();
        settings.session = Some(Session { token, user });
    }
    settings
}

pub fn set_api_url(conn: &Connection, url: &str) -> Result<()> {
    set_setting(conn, KEY_API_URL, url)
}

pub fn save_session(conn: &Connection, session: &Session) -> Result<()> {
    set_setting(conn, KEY_TOKEN, &session.token)?;
    set_setting(conn, KEY_USER_ID, &session.user.id)?;
    set_setting(conn, KEY_USER_EMAIL, &session.user.email)?;
    set_setting(conn, KEY_USER_NAME, &session.user.name)?;
    Ok(())
}

pub fn clear_session(conn: &Connection) -> Result<()> {
    for key in [KEY_TOKEN, KEY_USER_ID, KEY_USER_EMAIL, KEY_USER_NAME] {
        delete_setting(conn, key)?;
    }
    Ok(())
}
