//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests:
//! ```nocompile
//!     fn my_handler() -> impl Responder {
//!         std::thread::sleep(Duration::from_secs(5)); // <-- Bad practice! Will cause the current worker thread to
//! hang!
//!     }
//! ```
//! For this reason, any long, non-cpu-bound operation (e.g. I/O, database operations, etc.) should be expressed as
//! futures or asynchronous functions. Async handlers get executed concurrently by worker threads and thus don't block
//! execution.

use actix_web::{get, web, HttpResponse, Responder};
use canteen_engine::{
    db_types::{MenuUpdate, NewCanteen, NewFeedback, NewMenu, NewOrder, Role},
    order_objects::OrderResult,
    traits::{
        CanteenManagement,
        FeedbackManagement,
        GatewayCustomer,
        MenuManagement,
        OrderManagement,
        PaymentManagement,
        UserStore,
    },
    CanteenApi,
    FeedbackApi,
    OrderFlowApi,
    PaymentApi,
    UserApi,
};
use ccs_common::Rupiah;
use log::*;
use uuid::Uuid;

use crate::{
    auth::JwtClaims,
    data_objects::{
        JsonResponse,
        NewCanteenRequest,
        NewFeedbackRequest,
        NewMenuRequest,
        NewOrderRequest,
        NewPaymentRequest,
        UpdateMenuRequest,
        UpdateOrderRequest,
    },
    errors::ServerError,
    integrations::{cache::AppCache, midtrans::MidtransGateway},
};

// Web-actix cannot handle generics in handlers, so routes are registered manually via the
// `route!` macro. Each invocation generates a unit struct implementing `HttpServiceFactory` for
// the named handler, optionally wrapping it in the role ACL middleware.
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:path),+) => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $($bounds +)+ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:path),+ where requires [$($roles:expr),+]) => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $($bounds +)+ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>)
                    .wrap($crate::middleware::AclMiddlewareFactory::new(&[$($roles),+]));
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Canteens  ----------------------------------------------------
route!(create_canteen => Post "/canteen" impl CanteenManagement, MenuManagement where requires [Role::Canteen]);
pub async fn create_canteen<A>(
    claims: JwtClaims,
    body: web::Json<NewCanteenRequest>,
    api: web::Data<CanteenApi<A>>,
) -> Result<HttpResponse, ServerError>
where
    A: CanteenManagement + MenuManagement,
{
    let req = body.into_inner();
    if req.name.trim().is_empty() {
        return Err(ServerError::InvalidRequestBody("Canteen name must not be empty".to_string()));
    }
    debug!("💻️ POST create canteen '{}' for user {}", req.name, claims.sub);
    let canteen = api.create_canteen(NewCanteen { user_id: claims.sub, name: req.name }).await?;
    Ok(HttpResponse::Created().json(canteen))
}

route!(canteen_list => Get "/canteen" impl CanteenManagement, MenuManagement where requires [Role::Admin, Role::Canteen, Role::User]);
pub async fn canteen_list<A>(api: web::Data<CanteenApi<A>>) -> Result<HttpResponse, ServerError>
where A: CanteenManagement + MenuManagement {
    trace!("💻️ GET canteen list");
    let canteens = api.fetch_canteens().await?;
    Ok(HttpResponse::Ok().json(canteens))
}

route!(canteen_info => Get "/canteen/{id}" impl CanteenManagement, MenuManagement where requires [Role::Admin, Role::Canteen, Role::User]);
pub async fn canteen_info<A>(path: web::Path<Uuid>, api: web::Data<CanteenApi<A>>) -> Result<HttpResponse, ServerError>
where A: CanteenManagement + MenuManagement {
    let canteen_id = path.into_inner();
    debug!("💻️ GET canteen info for {canteen_id}");
    let canteen = api.canteen_by_id(canteen_id).await?;
    Ok(HttpResponse::Ok().json(canteen))
}

//----------------------------------------------    Menus   ----------------------------------------------------
route!(create_menu => Post "/canteen/menu" impl CanteenManagement, MenuManagement where requires [Role::Canteen, Role::Admin]);
pub async fn create_menu<A>(
    claims: JwtClaims,
    body: web::Json<NewMenuRequest>,
    api: web::Data<CanteenApi<A>>,
) -> Result<HttpResponse, ServerError>
where
    A: CanteenManagement + MenuManagement,
{
    let req = body.into_inner();
    if req.name.trim().is_empty() {
        return Err(ServerError::InvalidRequestBody("Menu name must not be empty".to_string()));
    }
    if req.price < 0 || req.stock < 0 {
        return Err(ServerError::InvalidRequestBody("Price and stock must not be negative".to_string()));
    }
    debug!("💻️ POST create menu '{}' on canteen {}", req.name, req.canteen_id);
    let menu = NewMenu { canteen_id: req.canteen_id, name: req.name, price: Rupiah::from(req.price), stock: req.stock };
    let menu = api.create_menu(menu, claims.sub, claims.role).await?;
    Ok(HttpResponse::Created().json(menu))
}

route!(menu_info => Get "/canteen/menu/{id}" impl CanteenManagement, MenuManagement where requires [Role::Admin, Role::Canteen, Role::User]);
pub async fn menu_info<A>(path: web::Path<Uuid>, api: web::Data<CanteenApi<A>>) -> Result<HttpResponse, ServerError>
where A: CanteenManagement + MenuManagement {
    let menu_id = path.into_inner();
    debug!("💻️ GET menu info for {menu_id}");
    let menu = api.menu_by_id(menu_id).await?;
    Ok(HttpResponse::Ok().json(menu))
}

route!(update_menu => Patch "/canteen/menu/{id}" impl CanteenManagement, MenuManagement where requires [Role::Canteen, Role::Admin]);
pub async fn update_menu<A>(
    claims: JwtClaims,
    path: web::Path<Uuid>,
    body: web::Json<UpdateMenuRequest>,
    api: web::Data<CanteenApi<A>>,
) -> Result<HttpResponse, ServerError>
where
    A: CanteenManagement + MenuManagement,
{
    let menu_id = path.into_inner();
    let req = body.into_inner();
    if req.price.is_some_and(|p| p < 0) || req.stock.is_some_and(|s| s < 0) {
        return Err(ServerError::InvalidRequestBody("Price and stock must not be negative".to_string()));
    }
    if req.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(ServerError::InvalidRequestBody("Menu name must not be empty".to_string()));
    }
    let mut update = MenuUpdate::default();
    if let Some(name) = req.name {
        update = update.with_name(name);
    }
    if let Some(price) = req.price {
        update = update.with_price(Rupiah::from(price));
    }
    if let Some(stock) = req.stock {
        update = update.with_stock(stock);
    }
    debug!("💻️ PATCH menu {menu_id} by user {}", claims.sub);
    let menu = api.update_menu(menu_id, update, claims.sub, claims.role).await?;
    Ok(HttpResponse::Ok().json(menu))
}

route!(delete_menu => Delete "/canteen/menu/{id}" impl CanteenManagement, MenuManagement where requires [Role::Canteen, Role::Admin]);
pub async fn delete_menu<A>(
    claims: JwtClaims,
    path: web::Path<Uuid>,
    api: web::Data<CanteenApi<A>>,
) -> Result<HttpResponse, ServerError>
where
    A: CanteenManagement + MenuManagement,
{
    let menu_id = path.into_inner();
    debug!("💻️ DELETE menu {menu_id} by user {}", claims.sub);
    api.delete_menu(menu_id, claims.sub, claims.role).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Menu deleted.")))
}

//----------------------------------------------    Orders   ----------------------------------------------------
route!(create_order => Post "/canteen/menu/order" impl OrderManagement where requires [Role::User]);
pub async fn create_order<A>(
    claims: JwtClaims,
    body: web::Json<NewOrderRequest>,
    api: web::Data<OrderFlowApi<A>>,
) -> Result<HttpResponse, ServerError>
where
    A: OrderManagement,
{
    let req = body.into_inner();
    debug!("💻️ POST create order on menu {} x{} for user {}", req.menu_id, req.quantity, claims.sub);
    let order = api.create_order(NewOrder::new(claims.sub, req.menu_id, req.quantity)).await?;
    Ok(HttpResponse::Created().json(order))
}

route!(my_orders => Get "/canteen/menu/order" impl OrderManagement where requires [Role::Admin, Role::Canteen, Role::User]);
pub async fn my_orders<A>(claims: JwtClaims, api: web::Data<OrderFlowApi<A>>) -> Result<HttpResponse, ServerError>
where A: OrderManagement {
    debug!("💻️ GET orders for user {}", claims.sub);
    let orders = api.orders_for_user(claims.sub).await?;
    let result = OrderResult { user_id: claims.sub, total_orders: orders.len(), orders };
    Ok(HttpResponse::Ok().json(result))
}

route!(update_order => Patch "/canteen/menu/order" impl OrderManagement where requires [Role::Canteen]);
pub async fn update_order<A>(
    claims: JwtClaims,
    body: web::Json<UpdateOrderRequest>,
    api: web::Data<OrderFlowApi<A>>,
) -> Result<HttpResponse, ServerError>
where
    A: OrderManagement,
{
    let req = body.into_inner();
    debug!("💻️ PATCH order {} to {} by user {}", req.order_id, req.status, claims.sub);
    let order = api.update_order_status(req.order_id, req.status, claims.sub).await?;
    Ok(HttpResponse::Ok().json(order))
}

//----------------------------------------------   Payments  ----------------------------------------------------
route!(create_payment => Post "/canteen/payment" impl OrderManagement, PaymentManagement, MenuManagement, UserStore where requires [Role::User]);
pub async fn create_payment<A>(
    claims: JwtClaims,
    body: web::Json<NewPaymentRequest>,
    payments: web::Data<PaymentApi<A, MidtransGateway>>,
    users: web::Data<UserApi<A, AppCache>>,
) -> Result<HttpResponse, ServerError>
where
    A: OrderManagement + PaymentManagement + MenuManagement + UserStore,
{
    let req = body.into_inner();
    debug!("💻️ POST create payment for order {} by user {}", req.order_id, claims.sub);
    let user = users.fetch_user(claims.sub).await?;
    let customer = GatewayCustomer { first_name: user.name, email: user.email };
    let transaction = payments.create_payment(req.order_id, claims.sub, customer).await?;
    Ok(HttpResponse::Created().json(transaction))
}

//----------------------------------------------   Feedback  ----------------------------------------------------
route!(create_feedback => Post "/canteen/menu/order/feedback" impl FeedbackManagement where requires [Role::User]);
pub async fn create_feedback<A>(
    claims: JwtClaims,
    body: web::Json<NewFeedbackRequest>,
    api: web::Data<FeedbackApi<A>>,
) -> Result<HttpResponse, ServerError>
where
    A: FeedbackManagement,
{
    let req = body.into_inner();
    if req.content.trim().is_empty() {
        return Err(ServerError::InvalidRequestBody("Feedback content must not be empty".to_string()));
    }
    debug!("💻️ POST create feedback on order {} by user {}", req.order_id, claims.sub);
    let feedback =
        api.create_feedback(NewFeedback { order_id: req.order_id, user_id: claims.sub, content: req.content }).await?;
    Ok(HttpResponse::Created().json(feedback))
}

route!(delete_feedback => Delete "/canteen/menu/order/feedback/{id}" impl FeedbackManagement where requires [Role::Canteen]);
pub async fn delete_feedback<A>(
    claims: JwtClaims,
    path: web::Path<Uuid>,
    api: web::Data<FeedbackApi<A>>,
) -> Result<HttpResponse, ServerError>
where
    A: FeedbackManagement,
{
    let feedback_id = path.into_inner();
    debug!("💻️ DELETE feedback {feedback_id} by user {}", claims.sub);
    api.delete_feedback(feedback_id, claims.sub).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Feedback deleted.")))
}
