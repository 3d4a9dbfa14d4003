//! One-shot notices carried across a redirect in a cookie.

use axum::http::{header, HeaderMap, HeaderValue};

use super::escape_html;

pub const FLASH_COOKIE_NAME: &str = "vtb_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    fn encode(&self) -> String {
        format!(
            "{}:{}",
            self.kind.as_str(),
            urlencoding::encode(&self.message)
        )
    }

    fn decode(raw: &str) -> Option<Self> {
        let (kind, message) = raw.split_once(':')?;
        let kind = match kind {
            "success" => FlashKind::Success,
            "error" => FlashKind::Error,
            _ => return None,
        };
        let message = urlencoding::decode(message).ok()?.into_owned();
        Some(Self { kind, message })
    }

    pub fn set_cookie_header(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&format!(
            "{FLASH_COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax",
            self.encode()
        ))
        .ok()
    }

    pub fn render(&self) -> String {
        format!(
            r#"<div class="flash flash-{}" role="status">{}</div>"#,
            self.kind.as_str(),
            escape_html(&self.message)
        )
    }
}

pub fn clear_cookie_header() -> HeaderValue {
    HeaderValue::from_static("vtb_flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

pub fn read_flash(headers: &HeaderMap) -> Option<Flash> {
    get_cookie(headers, FLASH_COOKIE_NAME)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| Flash::decode(&raw))
}

fn get_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}
