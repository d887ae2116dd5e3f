//! JWT access token

use chrono::{TimeDelta, Utc};
use color_eyre::eyre::eyre;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::err::AppError;

/// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// 用户ID
    pub sub: String,
    /// 过期时间
    pub exp: i64,
    /// 签发时间
    pub iat: i64,
}

impl Claims {
    /// 过期时间超出可表示范围时返回错误
    pub fn new(user_id: i32, expires_in: TimeDelta) -> Result<Self, AppError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(expires_in)
            .ok_or_else(|| AppError::InternalError(eyre!("Token expiry out of range: {expires_in}")))?;

        Ok(Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }

    /// 解析`sub`中的用户ID
    pub fn user_id(&self) -> Result<i32, AppError> {
        self.sub.parse().map_err(|_| AppError::Unauthorized)
    }
}

/// JWT 签发和校验
pub struct JwtAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: TimeDelta,
}

impl JwtAuth {
    /// `lifetime_seconds` 必须为正数，且能表示为 [`TimeDelta`]
    pub fn new(secret: &[u8], lifetime_seconds: i64) -> Result<Self, AppError> {
        let lifetime = TimeDelta::try_seconds(lifetime_seconds)
            .filter(|lifetime| *lifetime > TimeDelta::zero())
            .ok_or_else(|| AppError::InternalError(eyre!("Invalid token lifetime: {lifetime_seconds}s")))?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::default(),
            lifetime,
        })
    }

    /// 为用户签发access token
    pub fn issue(&self, user_id: i32) -> Result<String, AppError> {
        let claims = Claims::new(user_id, self.lifetime)?;
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(eyre!("Token encoding failed: {e}")))
    }

    /// 校验token签名和有效期，返回其中的Claims
    ///
    /// 任何校验失败都视为未认证
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized)
    }
}
