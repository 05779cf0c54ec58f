// ============================================================================
// IDENTITÉ : STOCKAGE DES COMPTES
// ============================================================================
//
// Description:
//   Capacité UserStore (recherche, création, mise à jour, suppression,
//   vérification du mot de passe, rôles) et son implémentation SeaORM
//   sur les tables users / roles / user_roles.
//
// Points d'attention:
//   - Les erreurs portent une liste de descriptions, jointes par "; "
//     dans les réponses "problem"
//   - create() ne donne aucun rôle: c'est au façade d'appeler add_to_role()
//   - delete() retire aussi les appartenances aux rôles
//
// ============================================================================

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::models::{roles, user_roles, users};
use crate::utils::password;

const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", .descriptions.join("; "))]
pub struct IdentityError {
    pub descriptions: Vec<String>,
}

impl IdentityError {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            descriptions: vec![description.into()],
        }
    }
}

impl From<DbErr> for IdentityError {
    fn from(err: DbErr) -> Self {
        IdentityError::new(format!("Database error: {}", err))
    }
}

/// Capacité de gestion des comptes utilisateurs
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> Result<Vec<users::Model>, IdentityError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<users::Model>, IdentityError>;

    async fn find_by_name(&self, username: &str) -> Result<Option<users::Model>, IdentityError>;

    /// Crée le compte avec le mot de passe donné (haché par le store)
    async fn create(&self, user: users::Model, password: &str) -> Result<users::Model, IdentityError>;

    /// Remplace nom d'utilisateur, nom complet et email (jamais le mot de passe)
    async fn update(&self, user: &users::Model) -> Result<(), IdentityError>;

    async fn delete(&self, user: &users::Model) -> Result<(), IdentityError>;

    async fn check_password(&self, user: &users::Model, password: &str) -> Result<bool, IdentityError>;

    async fn add_to_role(&self, user: &users::Model, role: &str) -> Result<(), IdentityError>;

    async fn roles_of(&self, user: &users::Model) -> Result<Vec<String>, IdentityError>;
}

pub struct SeaOrmUserStore {
    db: DatabaseConnection,
}

impl SeaOrmUserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn name_taken(&self, username: &str, except_id: Option<&str>) -> Result<bool, DbErr> {
        let existing = users::Entity::find()
            .filter(users::Column::UserName.eq(username))
            .one(&self.db)
            .await?;

        Ok(match (existing, except_id) {
            (Some(user), Some(id)) => user.id != id,
            (Some(_), None) => true,
            (None, _) => false,
        })
    }
}

#[async_trait]
impl UserStore for SeaOrmUserStore {
    async fn list(&self) -> Result<Vec<users::Model>, IdentityError> {
        Ok(users::Entity::find()
            .order_by_asc(users::Column::UserName)
            .all(&self.db)
            .await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<users::Model>, IdentityError> {
        Ok(users::Entity::find_by_id(id.to_string()).one(&self.db).await?)
    }

    async fn find_by_name(&self, username: &str) -> Result<Option<users::Model>, IdentityError> {
        Ok(users::Entity::find()
            .filter(users::Column::UserName.eq(username))
            .one(&self.db)
            .await?)
    }

    async fn create(&self, user: users::Model, password: &str) -> Result<users::Model, IdentityError> {
        // 1. Règles du compte
        let mut errors = Vec::new();
        if self.name_taken(&user.user_name, None).await? {
            errors.push(format!("Username '{}' is already taken.", user.user_name));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.push(format!(
                "Passwords must be at least {} characters.",
                MIN_PASSWORD_LENGTH
            ));
        }
        if !errors.is_empty() {
            return Err(IdentityError { descriptions: errors });
        }

        // 2. Hash le mot de passe
        let password_hash = password::hash_password(password).map_err(IdentityError::new)?;

        // 3. Créer l'utilisateur
        let id = if user.id.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            user.id
        };

        let new_user = users::ActiveModel {
            id: Set(id),
            user_name: Set(user.user_name),
            full_name: Set(user.full_name),
            email: Set(user.email),
            password_hash: Set(password_hash),
        };

        Ok(new_user.insert(&self.db).await?)
    }

    async fn update(&self, user: &users::Model) -> Result<(), IdentityError> {
        if self.name_taken(&user.user_name, Some(&user.id)).await? {
            return Err(IdentityError::new(format!(
                "Username '{}' is already taken.",
                user.user_name
            )));
        }

        let stored = users::Entity::find_by_id(user.id.clone())
            .one(&self.db)
            .await?
            .ok_or_else(|| IdentityError::new(format!("User '{}' does not exist.", user.id)))?;

        let mut active_model: users::ActiveModel = stored.into();
        active_model.user_name = Set(user.user_name.clone());
        active_model.full_name = Set(user.full_name.clone());
        active_model.email = Set(user.email.clone());
        active_model.update(&self.db).await?;

        Ok(())
    }

    async fn delete(&self, user: &users::Model) -> Result<(), IdentityError> {
        let txn = self.db.begin().await?;

        user_roles::Entity::delete_many()
            .filter(user_roles::Column::UserId.eq(user.id.as_str()))
            .exec(&txn)
            .await?;

        let result = users::Entity::delete_by_id(user.id.clone())
            .exec(&txn)
            .await?;
        if result.rows_affected == 0 {
            return Err(IdentityError::new(format!("User '{}' does not exist.", user.id)));
        }

        txn.commit().await?;
        Ok(())
    }

    async fn check_password(&self, user: &users::Model, password: &str) -> Result<bool, IdentityError> {
        password::verify_password(password, &user.password_hash).map_err(IdentityError::new)
    }

    async fn add_to_role(&self, user: &users::Model, role: &str) -> Result<(), IdentityError> {
        if roles::Entity::find_by_id(role.to_string())
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(IdentityError::new(format!("Role {} does not exist.", role)));
        }

        let already = user_roles::Entity::find_by_id((user.id.clone(), role.to_string()))
            .one(&self.db)
            .await?;
        if already.is_some() {
            return Err(IdentityError::new(format!(
                "User already in role '{}'.",
                role
            )));
        }

        let membership = user_roles::ActiveModel {
            user_id: Set(user.id.clone()),
            role_name: Set(role.to_string()),
        };
        user_roles::Entity::insert(membership).exec(&self.db).await?;

        Ok(())
    }

    async fn roles_of(&self, user: &users::Model) -> Result<Vec<String>, IdentityError> {
        let memberships = user_roles::Entity::find()
            .filter(user_roles::Column::UserId.eq(user.id.as_str()))
            .order_by_asc(user_roles::Column::RoleName)
            .all(&self.db)
            .await?;

        Ok(memberships.into_iter().map(|m| m.role_name).collect())
    }
}
