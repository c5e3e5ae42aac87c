//! REST platform client
//!
//! `PlatformClient` over the platform's HTTP API, authenticated as a bot.

use std::time::Duration;

use async_trait::async_trait;
use pinbot_common::BotConfig;
use pinbot_core::entities::{MemberInfo, MessageInfo, RoleInfo};
use pinbot_core::traits::{PlatformClient, RepoResult};
use pinbot_core::value_objects::{PermissionOverwrite, Snowflake};
use pinbot_core::DomainError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Platform REST API client
#[derive(Clone)]
pub struct HttpPlatformClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GuildBody {
    owner_id: Snowflake,
}

#[derive(Debug, Deserialize)]
struct MemberBody {
    #[serde(default)]
    roles: Vec<Snowflake>,
}

#[derive(Debug, Deserialize)]
struct ChannelBody {
    #[serde(default)]
    permission_overwrites: Vec<PermissionOverwrite>,
}

#[derive(Debug, Serialize)]
struct CreateMessageBody<'a> {
    content: &'a str,
    allowed_mentions: AllowedMentions,
}

/// Announcements mention users by id; nobody gets pinged
#[derive(Debug, Serialize)]
struct AllowedMentions {
    parse: [&'static str; 0],
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpPlatformClient {
    /// Create a new client for `base_url` authenticated with `token`
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self, DomainError> {
        let mut auth = HeaderValue::from_str(&format!("Bot {token}"))
            .map_err(|_| DomainError::ValidationError("Bot token is not a valid header".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .user_agent(concat!("pinbot (", env!("CARGO_PKG_VERSION"), ")"))
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::InternalError(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build from the bot section of the app config
    pub fn from_config(config: &BotConfig) -> Result<Self, DomainError> {
        Self::new(&config.api_base_url, &config.token, config.http_timeout())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{path}", self.base_url))
    }

    async fn execute(&self, request: RequestBuilder) -> RepoResult<Response> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        debug!(status = status.as_u16(), %message, "Platform request failed");
        Err(DomainError::Platform {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> RepoResult<T> {
        self.execute(self.request(Method::GET, path))
            .await?
            .json::<T>()
            .await
            .map_err(|e| DomainError::InternalError(format!("Malformed response from {path}: {e}")))
    }
}

fn map_transport_error(e: reqwest::Error) -> DomainError {
    DomainError::PlatformUnavailable(e.to_string())
}

#[async_trait]
impl PlatformClient for HttpPlatformClient {
    #[instrument(skip(self))]
    async fn pin_message(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<()> {
        let path = format!("/channels/{channel_id}/pins/{message_id}");
        self.execute(self.request(Method::PUT, &path)).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn unpin_message(&self, channel_id: Snowflake, message_id: Snowflake) -> RepoResult<()> {
        let path = format!("/channels/{channel_id}/pins/{message_id}");
        self.execute(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> RepoResult<MessageInfo> {
        self.get_json(&format!("/channels/{channel_id}/messages/{message_id}"))
            .await
    }

    #[instrument(skip(self))]
    async fn fetch_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<MemberInfo>> {
        match self
            .get_json::<MemberBody>(&format!("/guilds/{guild_id}/members/{user_id}"))
            .await
        {
            Ok(member) => Ok(Some(MemberInfo {
                user_id,
                role_ids: member.roles,
            })),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    async fn fetch_guild_owner(&self, guild_id: Snowflake) -> RepoResult<Snowflake> {
        let guild: GuildBody = self.get_json(&format!("/guilds/{guild_id}")).await?;
        Ok(guild.owner_id)
    }

    #[instrument(skip(self))]
    async fn fetch_guild_roles(&self, guild_id: Snowflake) -> RepoResult<Vec<RoleInfo>> {
        self.get_json(&format!("/guilds/{guild_id}/roles")).await
    }

    #[instrument(skip(self))]
    async fn fetch_channel_overwrites(
        &self,
        channel_id: Snowflake,
    ) -> RepoResult<Vec<PermissionOverwrite>> {
        let channel: ChannelBody = self.get_json(&format!("/channels/{channel_id}")).await?;
        Ok(channel.permission_overwrites)
    }

    #[instrument(skip(self, content))]
    async fn send_message(&self, channel_id: Snowflake, content: &str) -> RepoResult<()> {
        let body = CreateMessageBody {
            content,
            allowed_mentions: AllowedMentions { parse: [] },
        };
        let request = self
            .request(Method::POST, &format!("/channels/{channel_id}/messages"))
            .json(&body);
        self.execute(request).await?;
        Ok(())
    }
}

impl std::fmt::Debug for HttpPlatformClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPlatformClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
