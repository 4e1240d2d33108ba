use crate::modules::user::handle::*;
use actix_web::web::ServiceConfig;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(register)
        .service(list_users)
        .service(search_user)
        .service(get_user)
        .service(delete_user);
}
