//----------------------------------------------   Gateway callback  ----------------------------------------------------
//
// The payment gateway confirms transaction outcomes by POSTing here. The route is registered
// outside the authenticated scope: the caller is the gateway, not a user, and authenticity is
// established solely by the signature check inside `PaymentApi::confirm_payment`. Rejections go
// out as real error statuses so the gateway's retry machinery can see them.

use actix_web::{error::ResponseError, web, HttpResponse};
use canteen_engine::{
    payment_objects::{PaymentNotification, PaymentOutcome},
    traits::{MenuManagement, OrderManagement, PaymentManagement},
    PaymentApi,
    PaymentApiError,
};
use log::*;

use crate::{data_objects::JsonResponse, errors::ServerError, integrations::midtrans::MidtransGateway, route};

route!(payment_callback => Post "/payment/notification" impl OrderManagement, PaymentManagement, MenuManagement);
pub async fn payment_callback<A>(
    body: web::Json<PaymentNotification>,
    api: web::Data<PaymentApi<A, MidtransGateway>>,
) -> HttpResponse
where
    A: OrderManagement + PaymentManagement + MenuManagement,
{
    let callback = body.into_inner();
    trace!("🔔️ Received payment notification for [{}]", callback.order_id);
    match api.confirm_payment(callback).await {
        Ok(PaymentOutcome::Paid(order)) => {
            info!("🔔️ Order {} reconciled and marked as paid.", order.id);
            HttpResponse::Ok().json(JsonResponse::success(format!("Order {} is paid.", order.id)))
        },
        Ok(PaymentOutcome::AlreadyPaid(order)) => {
            info!("🔔️ Duplicate settlement notification for order {}.", order.id);
            HttpResponse::Ok().json(JsonResponse::success("Payment already settled."))
        },
        Ok(PaymentOutcome::Ignored(status)) => {
            HttpResponse::Ok().json(JsonResponse::success(format!("Transaction status '{status}' noted.")))
        },
        Err(e @ PaymentApiError::SignatureInvalid) => {
            warn!("🔔️ Rejected payment notification: {e}");
            ServerError::SignatureInvalid.error_response()
        },
        Err(PaymentApiError::MalformedCallback(e)) => {
            warn!("🔔️ Malformed payment notification: {e}");
            ServerError::InvalidRequestBody(e).error_response()
        },
        Err(PaymentApiError::OrderNotFound(id)) => {
            warn!("🔔️ Settlement notification for unknown payment {id}");
            ServerError::NoRecordFound(format!("No order matches payment {id}")).error_response()
        },
        Err(e) => {
            warn!("🔔️ Unexpected error while handling payment notification. {e}");
            ServerError::from(e).error_response()
        },
    }
}
