use actix_web::{post, web, HttpResponse, Responder, Scope};

use crate::validator::AuthContext;

#[derive(serde::Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

#[post("/logout")]
pub async fn logout(auth: AuthContext) -> impl Responder {
    HttpResponse::Ok().body("Logged out")
}

#[post("/login")]
// async fn login_v1(form: web::Form<LoginForm>) -> impl Responder {
async fn login(form: web::Json<LoginForm>) -> impl Responder {
    HttpResponse::Ok().body(form.username.clone())
}

/* =========================
   Public Scope
   ========================= */

pub fn scope() -> Scope {
    web::scope("")
        .service(login)
        .service(logout)
}
