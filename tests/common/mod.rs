#![allow(dead_code, unused_macros)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use poseidon_backend::db::{self, context::DbContext};
use poseidon_backend::models::users;
use poseidon_backend::services::identity::{IdentityError, SeaOrmUserStore, UserStore};
use poseidon_backend::utils::jwt::JwtService;

pub const JWT_SECRET: &str = "integration-test-secret";

/// Construit l'application complète (mêmes middlewares que main.rs)
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state.ctx.clone())
                .app_data($state.jwt.clone())
                .app_data($state.store.clone())
                .wrap(actix_web::middleware::from_fn(
                    poseidon_backend::middleware::usage_log::usage_log,
                ))
                .configure(poseidon_backend::routes::configure_routes),
        )
        .await
    };
}

/// Base SQLite en mémoire: une seule connexion, sinon chaque
/// connexion du pool verrait sa propre base vide
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.expect("sqlite connection");
    db::ensure_schema(&db).await.expect("schema creation");
    db
}

pub struct TestState {
    pub db: DatabaseConnection,
    pub ctx: web::Data<DbContext>,
    pub jwt: web::Data<JwtService>,
    pub store: web::Data<dyn UserStore>,
}

impl TestState {
    pub async fn new() -> Self {
        let db = setup_db().await;
        let store: Arc<dyn UserStore> = Arc::new(SeaOrmUserStore::new(db.clone()));
        Self {
            ctx: web::Data::new(DbContext::new(db.clone())),
            jwt: web::Data::new(JwtService::new(JWT_SECRET, chrono::Duration::hours(1))),
            store: web::Data::from(store),
            db,
        }
    }

    /// Header Authorization pour un utilisateur fictif
    pub fn bearer(&self, username: &str, roles: &[&str]) -> (&'static str, String) {
        let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
        let token = self
            .jwt
            .generate_token(&format!("id-{}", username), username, &roles)
            .expect("token");
        ("Authorization", format!("Bearer {}", token))
    }
}

/// UserStore en mémoire avec injection de pannes
#[derive(Default)]
pub struct FakeUserStore {
    pub users: Mutex<Vec<users::Model>>,
    pub roles: Mutex<Vec<(String, String)>>,
    pub fail_create: Option<String>,
    pub fail_role: Option<String>,
    pub fail_update: Option<String>,
    pub fail_delete: Option<String>,
    pub delete_calls: AtomicUsize,
}

impl FakeUserStore {
    pub fn with_users(users: Vec<users::Model>) -> Self {
        Self {
            users: Mutex::new(users),
            ..Default::default()
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn deletes(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

pub fn user(id: &str, name: &str, full_name: &str, email: &str) -> users::Model {
    users::Model {
        id: id.to_string(),
        user_name: name.to_string(),
        full_name: full_name.to_string(),
        email: email.to_string(),
        password_hash: format!("plain:{}", "P@ssw0rd!"),
    }
}

#[async_trait]
impl UserStore for FakeUserStore {
    async fn list(&self) -> Result<Vec<users::Model>, IdentityError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<users::Model>, IdentityError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_name(&self, username: &str) -> Result<Option<users::Model>, IdentityError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user_name == username)
            .cloned())
    }

    async fn create(&self, mut user: users::Model, password: &str) -> Result<users::Model, IdentityError> {
        if let Some(e) = &self.fail_create {
            return Err(IdentityError::new(e.clone()));
        }
        if user.id.is_empty() {
            user.id = uuid::Uuid::new_v4().simple().to_string();
        }
        user.password_hash = format!("plain:{}", password);
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &users::Model) -> Result<(), IdentityError> {
        if let Some(e) = &self.fail_update {
            return Err(IdentityError::new(e.clone()));
        }
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(IdentityError::new("missing")),
        }
    }

    async fn delete(&self, user: &users::Model) -> Result<(), IdentityError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = &self.fail_delete {
            return Err(IdentityError::new(e.clone()));
        }
        self.users.lock().unwrap().retain(|u| u.id != user.id);
        Ok(())
    }

    async fn check_password(&self, user: &users::Model, password: &str) -> Result<bool, IdentityError> {
        Ok(user.password_hash == format!("plain:{}", password))
    }

    async fn add_to_role(&self, user: &users::Model, role: &str) -> Result<(), IdentityError> {
        if let Some(e) = &self.fail_role {
            return Err(IdentityError::new(e.clone()));
        }
        self.roles
            .lock()
            .unwrap()
            .push((user.id.clone(), role.to_string()));
        Ok(())
    }

    async fn roles_of(&self, user: &users::Model) -> Result<Vec<String>, IdentityError> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| *id == user.id)
            .map(|(_, role)| role.clone())
            .collect())
    }
}

/// Tampon de logs partagé, pour inspecter la sortie de tracing
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
