// routes/mod.rs
use actix_web::{web, Scope};

use crate::types::MemberRole;

pub mod authentication;
pub mod root;
pub mod users_api;

pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(scoped("/auth", authentication::scope()))
        .service(scoped("/users", "users", Some(MemberRole::Member), users_api::scope()))
        .service(scoped("/root", crate::routes::root::scope()))
        .service(scoped("/billing", billing::scope()))
}
