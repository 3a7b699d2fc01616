use actix_web::{get, post, put, web, HttpResponse, Responder, Scope};

use crate::models::users::{create_user as insert_user, get_users, update_user_details, NewUser};
use crate::validator::AuthContext;
use crate::AppState;

#[get("")]
async fn list_users(data: web::Data<AppState>) -> impl Responder {
    let conn = &mut data.db_pool.get().expect("Database connection failed");
    match get_users(conn) {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(_) => HttpResponse::InternalServerError().body("Failed to retrieve users"),
    }
}

#[post("")]
async fn create_user(data: web::Data<AppState>, new_user: web::Json<NewUser>) -> impl Responder {
    let conn = &mut data.db_pool.get().expect("Database connection failed");
    match insert_user(conn, &new_user.username, Some(&new_user.email)) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(_) => HttpResponse::InternalServerError().body("Failed to create user"),
    }
}

// Kept for the old admin console only.
#[get("/legacy")]
// @audit-ignore
async fn legacy_users() -> impl Responder {
    HttpResponse::Gone().finish()
}

async fn ping() -> impl Responder {
    HttpResponse::Ok().body("pong")
}

#[put("/{user_id}")]
pub async fn update_user(
    data: web::Data<AppState>,
    path: web::Path<i32>,
    auth_context: AuthContext,
    body: web::Json<serde_json::Value>,
) -> impl Responder {
    let conn = &mut data.db_pool.get().expect("Database connection failed");
    match update_user_details(conn, path.into_inner(), auth_context.user_id, body.into_inner()) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(_) => HttpResponse::InternalServerError().body("Failed to update user"),
    }
}

pub fn scope() -> Scope {
    web::scope("")
        .service(list_users)
        .service(create_user)
        .service(update_user)
        .service(ping)
        .service(delete_user)
}
