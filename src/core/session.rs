use crate::domain::ports::CredentialStore;
use crate::utils::error::Result;
use reqwest::header::HeaderValue;

/// 憑證儲存中保存 bearer token 的鍵
pub const TOKEN_KEY: &str = "token";

/// 每個地址操作都帶著的認證資訊
///
/// 登入時建立（或啟動時從憑證儲存還原），登出時消耗。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// 讀取一次 `token`，不存在時回傳匿名 session
    pub async fn restore<C: CredentialStore>(store: &C) -> Result<Self> {
        let token = store.get_item(TOKEN_KEY).await?;
        if token.is_none() {
            tracing::debug!("No stored token, using anonymous session");
        }
        Ok(Self { token })
    }

    pub async fn login<C: CredentialStore>(store: &C, token: &str) -> Result<Self> {
        store.set_item(TOKEN_KEY, token).await?;
        tracing::info!("Session token stored");
        Ok(Self::with_token(token))
    }

    pub async fn logout<C: CredentialStore>(self, store: &C) -> Result<()> {
        store.remove_item(TOKEN_KEY).await?;
        tracing::info!("Session token removed");
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn authorization(&self) -> HeaderValue {
        bearer_header(self.token())
    }
}

/// 組出 `Authorization` 標頭
///
/// 不會失敗。沒有 token 或 token 不是合法標頭值時送出 `Bearer undefined`，由 API 回應未授權。
pub fn bearer_header(token: Option<&str>) -> HeaderValue {
    let mut value = token
        .and_then(|token| HeaderValue::from_str(&format!("Bearer {}", token)).ok())
        .unwrap_or_else(|| HeaderValue::from_static("Bearer undefined"));
    value.set_sensitive(true);
    value
}
