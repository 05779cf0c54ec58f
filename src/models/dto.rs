//pour les requêtes / réponses structurées
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::users;

// Inscription ou mise à jour d'un utilisateur (POST/PUT /User)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserRegistration {
    #[serde(default)]
    #[validate(length(min = 1, message = "The Username field is required."))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 125, message = "The FullName field is required (125 characters max)."))]
    pub full_name: String,
    #[serde(default)]
    #[validate(email(message = "The Email field is not a valid e-mail address."))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "The Password field is required."))]
    pub password: String,
}

// Projection d'un utilisateur sans ses identifiants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDisplay {
    pub id: String,
    pub user_name: String,
    pub full_name: String,
    pub email: String,
}

impl From<&users::Model> for UserDisplay {
    fn from(user: &users::Model) -> Self {
        Self {
            id: user.id.clone(),
            user_name: user.user_name.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "The Username field is required."))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "The Password field is required."))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub time: DateTime<Utc>,
}
