use std::fmt::Debug;

use ccs_common::Secret;
use log::*;
use uuid::Uuid;

use crate::{
    api::{
        errors::PaymentApiError,
        payment_objects::{is_settlement_status, PaymentNotification, PaymentOutcome},
    },
    db::traits::{
        GatewayCustomer,
        GatewayTransaction,
        MarkPaidResult,
        MenuManagement,
        OrderManagement,
        PaymentGateway,
        PaymentManagement,
    },
    db_types::{NewPayment, Order, OrderStatus},
    events::{EventProducers, OrderPaidEvent},
    helpers::verify_callback_signature,
};

/// `PaymentApi` opens transactions with the external payment gateway and reconciles the
/// gateway's asynchronous, signature-authenticated callbacks against orders.
pub struct PaymentApi<B, G> {
    db: B,
    gateway: G,
    server_key: Secret<String>,
    producers: EventProducers,
}

impl<B, G> Debug for PaymentApi<B, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentApi")
    }
}

impl<B, G> PaymentApi<B, G> {
    pub fn new(db: B, gateway: G, server_key: Secret<String>, producers: EventProducers) -> Self {
        Self { db, gateway, server_key, producers }
    }
}

impl<B, G> PaymentApi<B, G>
where
    B: OrderManagement + PaymentManagement + MenuManagement,
    G: PaymentGateway,
{
    /// Opens a gateway transaction for an unpaid order owned by `user_id`.
    ///
    /// A fresh payment id is generated and used as the gateway-facing order reference. The gross
    /// amount is derived server-side as menu price × order quantity. `customer` is resolved by
    /// the caller (through the cache-aside user lookup) and forwarded to the gateway verbatim.
    /// After the gateway call succeeds, the payment record is persisted; if that write fails,
    /// the inconsistency is logged and the transaction is still returned — the gateway side
    /// effect has already happened, and hiding it behind an error would only detach the customer
    /// from a live payment page.
    pub async fn create_payment(
        &self,
        order_id: Uuid,
        user_id: Uuid,
        customer: GatewayCustomer,
    ) -> Result<GatewayTransaction, PaymentApiError> {
        let order = self
            .db
            .order_by_id(order_id)
            .await
            .map_err(|e| PaymentApiError::DatabaseError(e.to_string()))?
            .filter(|o| o.user_id == user_id)
            .ok_or(PaymentApiError::OrderNotFound(order_id))?;
        if order.status != OrderStatus::Unpaid {
            return Err(PaymentApiError::OrderNotPayable { order_id, status: order.status });
        }
        let price = self
            .db
            .menu_price(order.menu_id)
            .await
            .map_err(|e| PaymentApiError::DatabaseError(e.to_string()))?
            .ok_or_else(|| PaymentApiError::DatabaseError(format!("No menu row for order {order_id}")))?;
        let gross_amount = price * order.quantity;
        let payment_id = Uuid::new_v4();
        let transaction = self
            .gateway
            .create_transaction(payment_id, gross_amount, customer)
            .await
            .map_err(|e| PaymentApiError::GatewayError(e.to_string()))?;
        debug!("🔄️💰️ Gateway transaction open for order {order_id}: payment {payment_id}, {gross_amount}");
        let payment = NewPayment {
            id: payment_id,
            order_id,
            user_id,
            price: gross_amount,
            redirect_url: transaction.redirect_url.clone(),
        };
        if let Err(e) = self.db.insert_payment(payment).await {
            error!(
                "🔄️💰️ Gateway transaction {payment_id} for order {order_id} is live, but the payment record could \
                 not be persisted: {e}. The callback for this payment will not reconcile."
            );
        }
        Ok(transaction)
    }

    /// Reconciles a gateway callback.
    ///
    /// The signature is verified first — a SHA-512 over the callback fields and the server key,
    /// compared in constant time. On mismatch, nothing is mutated. A verified settlement
    /// advances the linked order UNPAID → PAID; a replayed settlement is a logged no-op; any
    /// non-settlement status is ignored.
    pub async fn confirm_payment(&self, callback: PaymentNotification) -> Result<PaymentOutcome, PaymentApiError> {
        verify_callback_signature(&callback, &self.server_key).map_err(|e| {
            warn!("🔐️ Rejecting gateway callback for [{}]: {e}", callback.order_id);
            PaymentApiError::SignatureInvalid
        })?;
        if !is_settlement_status(&callback.transaction_status) {
            info!(
                "🔄️💰️ Callback for [{}] has status '{}'. No order transition applies.",
                callback.order_id, callback.transaction_status
            );
            return Ok(PaymentOutcome::Ignored(callback.transaction_status));
        }
        let payment_id = callback
            .order_id
            .parse::<Uuid>()
            .map_err(|e| PaymentApiError::MalformedCallback(format!("order_id is not a uuid: {e}")))?;
        let result =
            self.db.mark_order_paid(payment_id).await.map_err(|e| PaymentApiError::DatabaseError(e.to_string()))?;
        match result {
            MarkPaidResult::Paid(order) => {
                info!("🔄️💰️ Order {} is now PAID (payment {payment_id})", order.id);
                self.call_order_paid_hook(&order).await;
                Ok(PaymentOutcome::Paid(order))
            },
            MarkPaidResult::AlreadyPaid(order) => {
                info!("🔄️💰️ Replayed callback for payment {payment_id}; order {} is already {}", order.id, order.status);
                Ok(PaymentOutcome::AlreadyPaid(order))
            },
            MarkPaidResult::NotFound => Err(PaymentApiError::OrderNotFound(payment_id)),
        }
    }

    async fn call_order_paid_hook(&self, order: &Order) {
        for emitter in &self.producers.order_paid_producer {
            trace!("🔄️💰️ Notifying order paid hook subscribers");
            let event = OrderPaidEvent { order: order.clone() };
            emitter.publish_event(event).await;
        }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
