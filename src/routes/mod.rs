pub mod health;
pub mod login;
pub mod resource;
pub mod user;

use actix_web::middleware::from_fn;
use actix_web::web;

use crate::error::ApiError;
use crate::middleware::auth::{require_admin, require_user};
use crate::models::{bid_list, curve_point, rating, rule_name, trade};
use crate::utils::validation::FieldErrors;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Corps JSON illisible -> 400 avec la même forme que les erreurs de validation
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let mut errors = FieldErrors::new();
        errors.insert("body".to_string(), vec![err.to_string()]);
        ApiError::Validation(errors).into()
    });

    cfg.app_data(json_config)
        .service(health::health_check)
        .service(web::scope("/Login").service(login::login))
        // Ressources ouvertes
        .service(web::scope("/BidList").configure(resource::routes::<bid_list::Entity>))
        .service(web::scope("/RuleName").configure(resource::routes::<rule_name::Entity>))
        // Ressources réservées aux utilisateurs authentifiés
        .service(
            web::scope("/Curve")
                .configure(resource::routes::<curve_point::Entity>)
                .wrap(from_fn(require_user)),
        )
        .service(
            web::scope("/Rating")
                .configure(resource::routes::<rating::Entity>)
                .wrap(from_fn(require_user)),
        )
        .service(
            web::scope("/Trade")
                .configure(resource::routes::<trade::Entity>)
                .wrap(from_fn(require_user)),
        )
        // Administration des comptes
        .service(
            web::scope("/User")
                .service(user::get_all)
                .service(user::get_by_id)
                .service(user::register)
                .service(user::update_user)
                .service(user::delete_user)
                .wrap(from_fn(require_admin)),
        );
}
