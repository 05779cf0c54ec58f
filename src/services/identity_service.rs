use tracing::{error, info, warn};

use crate::config::AdminSeed;
use crate::error::ApiError;
use crate::models::dto::{LoginRequest, UserDisplay, UserRegistration};
use crate::models::{roles, users};
use crate::services::identity::{IdentityError, UserStore};
use crate::utils::jwt::JwtService;
use crate::utils::validation::validate_dto;

/// Façade d'identité: opérations exposées par /User et /Login
pub struct IdentityService;

impl IdentityService {
    pub async fn list(store: &dyn UserStore) -> Result<Vec<UserDisplay>, ApiError> {
        let users = store.list().await.map_err(internal)?;
        Ok(users.iter().map(UserDisplay::from).collect())
    }

    pub async fn get(store: &dyn UserStore, id: &str) -> Result<UserDisplay, ApiError> {
        let user = Self::find(store, id).await?;
        Ok(UserDisplay::from(&user))
    }

    /// Crée le compte puis lui donne le rôle "User".
    /// Si l'attribution du rôle échoue, le compte est supprimé.
    pub async fn register(
        store: &dyn UserStore,
        registration: UserRegistration,
    ) -> Result<users::Model, ApiError> {
        validate_dto(&registration).map_err(ApiError::Validation)?;

        let user = users::Model {
            id: String::new(),
            user_name: registration.username,
            full_name: registration.full_name,
            email: registration.email,
            password_hash: String::new(),
        };

        let created = store
            .create(user, &registration.password)
            .await
            .map_err(|e| {
                warn!(error = %e, "user creation failed");
                ApiError::problem("User registration failed", e.to_string())
            })?;

        if let Err(role_error) = store.add_to_role(&created, roles::USER).await {
            let mut descriptions = role_error.descriptions;

            // Action compensatoire: pas de compte sans rôle
            if let Err(delete_error) = store.delete(&created).await {
                error!(user_id = %created.id, error = %delete_error, "compensating delete failed");
                descriptions.extend(delete_error.descriptions);
            }

            let detail = IdentityError { descriptions }.to_string();
            warn!(user_id = %created.id, %detail, "role assignment failed, account removed");
            return Err(ApiError::problem("User registration failed", detail));
        }

        info!(user_id = %created.id, username = %created.user_name, "user registered");
        Ok(created)
    }

    pub async fn update(
        store: &dyn UserStore,
        id: &str,
        registration: UserRegistration,
    ) -> Result<(), ApiError> {
        validate_dto(&registration).map_err(ApiError::Validation)?;

        let mut user = Self::find(store, id).await?;
        user.user_name = registration.username;
        user.full_name = registration.full_name;
        user.email = registration.email;

        store
            .update(&user)
            .await
            .map_err(|e| ApiError::problem("User update failed", e.to_string()))
    }

    pub async fn delete(store: &dyn UserStore, id: &str) -> Result<(), ApiError> {
        let user = Self::find(store, id).await?;

        store
            .delete(&user)
            .await
            .map_err(|e| ApiError::problem("User deletion failed", e.to_string()))?;

        info!(user_id = %id, "user deleted");
        Ok(())
    }

    /// Vérifie les identifiants et émet un jeton bearer.
    /// Utilisateur inconnu et mauvais mot de passe donnent la même erreur.
    pub async fn login(
        store: &dyn UserStore,
        jwt: &JwtService,
        credentials: LoginRequest,
    ) -> Result<String, ApiError> {
        validate_dto(&credentials).map_err(ApiError::Validation)?;

        let user = store
            .find_by_name(&credentials.username)
            .await
            .map_err(internal)?
            .ok_or(ApiError::InvalidCredentials)?;

        if !store
            .check_password(&user, &credentials.password)
            .await
            .map_err(internal)?
        {
            return Err(ApiError::InvalidCredentials);
        }

        let roles = store.roles_of(&user).await.map_err(internal)?;
        jwt.generate_token(&user.id, &user.user_name, &roles)
            .map_err(ApiError::Internal)
    }

    /// Crée le compte Admin configuré s'il n'existe pas encore
    pub async fn seed_admin(store: &dyn UserStore, seed: &AdminSeed) -> Result<(), IdentityError> {
        if store.find_by_name(&seed.username).await?.is_some() {
            return Ok(());
        }

        let admin = users::Model {
            id: String::new(),
            user_name: seed.username.clone(),
            full_name: seed.username.clone(),
            email: seed.email.clone(),
            password_hash: String::new(),
        };
        let created = store.create(admin, &seed.password).await?;
        store.add_to_role(&created, roles::ADMIN).await?;

        info!(username = %created.user_name, "admin account seeded");
        Ok(())
    }

    async fn find(store: &dyn UserStore, id: &str) -> Result<users::Model, ApiError> {
        store
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or(ApiError::UserNotFound)
    }
}

fn internal(err: IdentityError) -> ApiError {
    ApiError::Internal(err.to_string())
}
