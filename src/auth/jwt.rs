use crate::error::AppError;
use crate::health::{HealthCheckResult, HealthChecker};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// This service both signs and verifies its own tokens from one configured
/// secret, so only the HMAC family is accepted; asymmetric algorithms would
/// need key material the configuration does not carry.
pub fn parse_algorithm(alg: &str) -> Result<Algorithm, AppError> {
    let algorithm = Algorithm::from_str(alg)
        .map_err(|_| AppError::BadRequest(format!("Unknown JWT algorithm: {}", alg)))?;

    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        other => Err(AppError::BadRequest(format!(
            "Unsupported JWT algorithm: {:?} (HMAC only)",
            other
        ))),
    }
}

/// Claims carried by an issued bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Database user ID
    pub sub: i32,
    pub username: String,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    pub fn new(user_id: i32, username: impl Into<String>, expires_in_seconds: u64) -> Self {
        let now = Utc::now().timestamp() as usize;
        Self {
            sub: user_id,
            username: username.into(),
            iat: now,
            exp: now + expires_in_seconds as usize,
        }
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as usize;
        self.exp <= now
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp as i64, 0).unwrap_or_else(Utc::now)
    }
}

/// JWT service trait for dependency injection and testing
pub trait JwtService: Send + Sync {
    /// Sign a token from claims
    fn create_token(&self, claims: &Claims) -> Result<String, AppError>;

    /// Validate a token and return its claims
    fn validate_token(&self, token: &str) -> Result<Claims, AppError>;
}

#[derive(Clone)]
pub struct JwtServiceImpl {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtServiceImpl {
    pub fn new(secret: String, algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    /// Create a health checker for this JWT service
    pub fn health_checker(&self) -> Arc<JwtHealthChecker> {
        Arc::new(JwtHealthChecker {
            service: self.clone(),
        })
    }
}

impl JwtService for JwtServiceImpl {
    fn create_token(&self, claims: &Claims) -> Result<String, AppError> {
        let header = Header::new(self.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(token_data.claims)
    }
}

/// Health checker that signs and verifies a throwaway token
pub struct JwtHealthChecker {
    service: JwtServiceImpl,
}

#[async_trait::async_trait]
impl HealthChecker for JwtHealthChecker {
    fn name(&self) -> &str {
        "jwt"
    }

    async fn check(&self) -> HealthCheckResult {
        let probe_claims = Claims::new(1, "health-probe", 60);

        let token = match self.service.create_token(&probe_claims) {
            Ok(token) => token,
            Err(err) => {
                return HealthCheckResult::unhealthy_with_details(
                    "Failed to sign probe token".to_string(),
                    serde_json::json!({
                        "algorithm": format!("{:?}", self.service.algorithm),
                        "error": err.to_string()
                    }),
                );
            }
        };

        match self.service.validate_token(&token) {
            Ok(claims) if claims.sub == probe_claims.sub => {
                HealthCheckResult::healthy_with_details(serde_json::json!({
                    "algorithm": format!("{:?}", self.service.algorithm),
                }))
            }
            Ok(_) => HealthCheckResult::unhealthy(
                "Probe token validated with mismatched claims".to_string(),
            ),
            Err(err) => HealthCheckResult::unhealthy_with_details(
                "Failed to validate probe token".to_string(),
                serde_json::json!({
                    "algorithm": format!("{:?}", self.service.algorithm),
                    "error": err.to_string()
                }),
            ),
        }
    }
}
