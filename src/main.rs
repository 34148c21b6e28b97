use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use scholar_api::config::Env;
use scholar_api::endpoints::handlers::configs::connection_pool::get_pool_connection;
use scholar_api::endpoints::{
    auth_endpoints::auth_config, graphql_endpoints::graphql_config, health_config,
    payment_endpoints::payment_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env
    dotenv::dotenv().ok();
    let config = Env::env_init();

    let port = config.port;
    let host = config.host;

    env_logger::init();

    // One pool for the whole server, every handler borrows it as app data
    let pool = web::Data::new(get_pool_connection());

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(pool.clone())
            .configure(graphql_config)
            .configure(health_config)
            .configure(auth_config)
            .configure(payment_config)
            .wrap(cors)
    })
    .bind((host, port))?
    .run()
    .await
}
