use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use canteen_engine::{
    cache::RedisCache,
    events::EventProducers,
    CanteenApi,
    FeedbackApi,
    OrderFlowApi,
    PaymentApi,
    SqliteDatabase,
    UserApi,
};
use log::{info, warn};

use crate::{
    auth::TokenIssuer,
    config::ServerConfig,
    errors::ServerError,
    integrations::{cache::AppCache, midtrans::MidtransGateway},
    payment_routes::PaymentCallbackRoute,
    routes::{
        health,
        CanteenInfoRoute,
        CanteenListRoute,
        CreateCanteenRoute,
        CreateFeedbackRoute,
        CreateMenuRoute,
        CreateOrderRoute,
        CreatePaymentRoute,
        DeleteFeedbackRoute,
        DeleteMenuRoute,
        MenuInfoRoute,
        MyOrdersRoute,
        UpdateMenuRoute,
        UpdateOrderRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let cache = match &config.redis_url {
        Some(url) => match RedisCache::connect(url).await {
            Ok(cache) => {
                info!("🚀️ Connected to redis. User lookups are cached.");
                AppCache::Redis(cache)
            },
            Err(e) => {
                warn!("🚀️ Could not connect to redis at {url}: {e}. Continuing without a user cache.");
                AppCache::none()
            },
        },
        None => AppCache::none(),
    };
    let srv = create_server_instance(config, db, cache)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase, cache: AppCache) -> Result<Server, ServerError> {
    let gateway =
        MidtransGateway::new(config.midtrans.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let auth_config = config.auth.clone();
    let server_key = config.midtrans.server_key.clone();
    let srv = HttpServer::new(move || {
        // Deployments that want side effects (notification mail, live order boards) attach hooks
        // here; the default build runs with no subscribers.
        let producers = EventProducers::default();
        let orders_api = OrderFlowApi::new(db.clone(), producers.clone());
        let payments_api = PaymentApi::new(db.clone(), gateway.clone(), server_key.clone(), producers);
        let canteen_api = CanteenApi::new(db.clone());
        let feedback_api = FeedbackApi::new(db.clone());
        let user_api = UserApi::new(db.clone(), cache.clone());
        let jwt_signer = TokenIssuer::new(&auth_config);
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("ccs::access_log"))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(payments_api))
            .app_data(web::Data::new(canteen_api))
            .app_data(web::Data::new(feedback_api))
            .app_data(web::Data::new(user_api))
            .app_data(web::Data::new(jwt_signer))
            .service(health)
            // Literal paths must register ahead of the `{id}` patterns that share their segment
            // count, or the pattern wins the route match.
            .service(CreateOrderRoute::<SqliteDatabase>::new())
            .service(MyOrdersRoute::<SqliteDatabase>::new())
            .service(UpdateOrderRoute::<SqliteDatabase>::new())
            .service(CreateFeedbackRoute::<SqliteDatabase>::new())
            .service(DeleteFeedbackRoute::<SqliteDatabase>::new())
            .service(CreateMenuRoute::<SqliteDatabase>::new())
            .service(MenuInfoRoute::<SqliteDatabase>::new())
            .service(UpdateMenuRoute::<SqliteDatabase>::new())
            .service(DeleteMenuRoute::<SqliteDatabase>::new())
            .service(CreateCanteenRoute::<SqliteDatabase>::new())
            .service(CanteenListRoute::<SqliteDatabase>::new())
            .service(CanteenInfoRoute::<SqliteDatabase>::new())
            .service(CreatePaymentRoute::<SqliteDatabase>::new())
            .service(PaymentCallbackRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
