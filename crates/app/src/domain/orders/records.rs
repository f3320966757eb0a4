//! Order Records

use serde::{Deserialize, Serialize};

use crate::domain::{
    catalog::models::PropId,
    line_mode_tag,
    orders::models::{OrderItem, OrderRequest, PaymentMethod, PaymentStatus},
    parse_line_mode,
};

/// One ordered line on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRecord {
    pub prop_id: String,
    pub quantity: u32,
    /// `"purchase"` or `"rental"`.
    #[serde(rename = "type")]
    pub mode: String,
    #[serde(default, rename = "rentalDays")]
    pub rental_days: u32,
}

impl From<&OrderItem> for OrderItemRecord {
    fn from(item: &OrderItem) -> Self {
        Self {
            prop_id: item.prop_id.to_string(),
            quantity: item.mode.quantity(),
            mode: line_mode_tag(&item.mode).to_string(),
            rental_days: item.mode.rental_days(),
        }
    }
}

impl OrderItemRecord {
    /// Rebuild the domain item; fails on an unknown mode tag.
    pub(crate) fn into_item(self) -> Option<OrderItem> {
        let mode = parse_line_mode(&self.mode, self.quantity, self.rental_days)?;

        Some(OrderItem {
            prop_id: PropId::new(self.prop_id),
            mode,
        })
    }
}

/// Order submission payload on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequestRecord {
    pub user_id: String,
    pub items: Vec<OrderItemRecord>,
    #[serde(rename = "deliveryFee")]
    pub delivery_fee: u64,
    pub total_price: u64,
    #[serde(rename = "paymentMethod")]
    pub payment_method: &'static str,
    #[serde(rename = "paymentIntentId", skip_serializing_if = "Option::is_none")]
    pub payment_intent_id: Option<String>,
    #[serde(rename = "paymentStatus", skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<&'static str>,
}

impl From<&OrderRequest> for OrderRequestRecord {
    fn from(order: &OrderRequest) -> Self {
        Self {
            user_id: order.user_id.to_string(),
            items: order.items.iter().map(OrderItemRecord::from).collect(),
            delivery_fee: order.delivery_fee,
            total_price: order.total_price,
            payment_method: match order.payment_method {
                PaymentMethod::Cod => "cod",
                PaymentMethod::Online => "online",
            },
            payment_intent_id: order.payment_intent.as_ref().map(ToString::to_string),
            payment_status: order.payment_status.map(|status| match status {
                PaymentStatus::Done => "done",
            }),
        }
    }
}

/// Order as returned by the order service.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, rename = "paymentStatus")]
    pub payment_status: Option<String>,
}

/// Response of the order-existence probe.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderExistsRecord {
    pub exists: bool,
}

#[cfg(test)]
mod tests {
    use propbox::lines::LineMode;
    use testresult::TestResult;

    use crate::{domain::payments::models::PaymentIntentId, session::UserId};

    use super::*;

    #[test]
    fn cod_request_serializes_without_payment_fields() -> TestResult {
        let order = OrderRequest {
            user_id: UserId::new("u-1"),
            items: vec![OrderItem {
                prop_id: PropId::new("prop-1"),
                mode: LineMode::Purchase { quantity: 2 },
            }],
            delivery_fee: 100_00,
            total_price: 1100_00,
            payment_method: PaymentMethod::Cod,
            payment_intent: None,
            payment_status: None,
        };

        let json = serde_json::to_value(OrderRequestRecord::from(&order))?;

        assert_eq!(
            json,
            serde_json::json!({
                "user_id": "u-1",
                "items": [{
                    "prop_id": "prop-1",
                    "quantity": 2,
                    "type": "purchase",
                    "rentalDays": 0
                }],
                "deliveryFee": 10000,
                "total_price": 110000,
                "paymentMethod": "cod"
            })
        );

        Ok(())
    }

    #[test]
    fn online_request_carries_intent_and_status() -> TestResult {
        let order = OrderRequest {
            user_id: UserId::new("u-1"),
            items: vec![OrderItem {
                prop_id: PropId::new("prop-1"),
                mode: LineMode::Rental { days: 14 },
            }],
            delivery_fee: 100_00,
            total_price: 1500_00,
            payment_method: PaymentMethod::Online,
            payment_intent: Some(PaymentIntentId::new("pi_123")),
            payment_status: Some(PaymentStatus::Done),
        };

        let json = serde_json::to_value(OrderRequestRecord::from(&order))?;

        assert_eq!(json["paymentIntentId"], "pi_123");
        assert_eq!(json["paymentStatus"], "done");
        assert_eq!(json["items"][0]["type"], "rental");
        assert_eq!(json["items"][0]["rentalDays"], 14);
        assert_eq!(json["items"][0]["quantity"], 1);

        Ok(())
    }

    #[test]
    fn item_record_rebuilds_domain_item() {
        let record = OrderItemRecord {
            prop_id: "prop-1".to_string(),
            quantity: 1,
            mode: "rental".to_string(),
            rental_days: 21,
        };

        let item = record.into_item();

        assert_eq!(
            item,
            Some(OrderItem {
                prop_id: PropId::new("prop-1"),
                mode: LineMode::Rental { days: 21 },
            })
        );
    }
}
