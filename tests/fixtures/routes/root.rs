use actix_web::{get, post, HttpResponse, Responder, Scope};

#[get("/")]
#[post("/")]
async fn root_handler(body: String) -> impl Responder {
    HttpResponse::Ok().body(body)
}

pub fn scope() -> Scope {
    web::scope("").service(root_handler)
}
