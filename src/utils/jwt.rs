use jsonwebtoken::{encode, decode, Header, Validation, EncodingKey, DecodingKey, Algorithm};
use serde::{Deserialize, Serialize};
use chrono::{Utc, Duration};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // user_id
    pub name: String,       // username
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: i64,           // expiration timestamp
}

/// Émission / vérification des jetons bearer (HS256)
#[derive(Clone)]
pub struct JwtService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Génère un JWT token pour un utilisateur et ses rôles
    pub fn generate_token(&self, user_id: &str, username: &str, roles: &[String]) -> Result<String, String> {
        let expiration = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or("Failed to calculate expiration")?
            .timestamp();

        let claims = Claims {
            sub: user_id.to_string(),
            name: username.to_string(),
            roles: roles.to_vec(),
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| format!("Failed to generate token: {}", e))
    }

    /// Vérifie et décode un JWT token
    pub fn verify_token(&self, token: &str) -> Result<Claims, String> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| format!("Invalid token: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_verify_token() {
        let service = JwtService::new("test-secret", Duration::hours(1));
        let roles = vec!["Admin".to_string(), "User".to_string()];

        let token = service.generate_token("abc", "testuser", &roles).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.sub, "abc");
        assert_eq!(claims.name, "testuser");
        assert_eq!(claims.roles, roles);
    }

    #[test]
    fn test_invalid_token() {
        let service = JwtService::new("test-secret", Duration::hours(1));
        let result = service.verify_token("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret() {
        let issuer = JwtService::new("secret-a", Duration::hours(1));
        let verifier = JwtService::new("secret-b", Duration::hours(1));

        let token = issuer.generate_token("abc", "testuser", &[]).unwrap();
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token() {
        // Expiré depuis 2h, au-delà de la tolérance par défaut (60s)
        let service = JwtService::new("test-secret", Duration::hours(-2));
        let token = service.generate_token("abc", "testuser", &[]).unwrap();
        assert!(service.verify_token(&token).is_err());
    }
}
