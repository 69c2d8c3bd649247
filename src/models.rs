// Data models for the Lygos payment gateway API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Generate a client-side order id (UUID v4, hyphenated).
///
/// Used by [`crate::LygosClient`] when a create request carries no
/// `order_id`; exposed so callers can pre-generate ids themselves.
pub fn generate_order_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A payment gateway resource as returned by the server.
///
/// Every field is optional: the server decides which ones are present
/// and the client passes them through without validation. Fields the
/// client does not know about are captured in `extra` so new server
/// fields survive a round trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Gateway {
    /// Server-assigned resource id (`gw_...`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Transaction amount in minor currency units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,

    /// Client-supplied order id, or server-generated if omitted at creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_country: Option<String>,

    /// Hosted payment page URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Server fields this client version does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Gateway {
    /// Parse `creation_date` as an RFC 3339 timestamp.
    pub fn creation_date_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.creation_date
            .as_deref()
            .and_then(|raw| chrono::DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&chrono::Utc))
    }

    /// Project a single field as JSON, checking the typed fields first
    /// and falling back to the extension map. Absent fields project as
    /// JSON null.
    pub fn field_value(&self, field: GatewayField) -> Value {
        let typed = match field {
            GatewayField::Link => self.link.clone().map(Value::from),
            GatewayField::Amount => self.amount.map(Value::from),
            GatewayField::ShopName => self.shop_name.clone().map(Value::from),
            GatewayField::Message => self.message.clone().map(Value::from),
            GatewayField::UserCountry => self.user_country.clone().map(Value::from),
            GatewayField::CreationDate => self.creation_date.clone().map(Value::from),
            GatewayField::OrderId => self.order_id.clone().map(Value::from),
            GatewayField::SuccessUrl => self.success_url.clone().map(Value::from),
            GatewayField::FailureUrl => self.failure_url.clone().map(Value::from),
        };

        typed
            .or_else(|| self.extra.get(field.as_str()).cloned())
            .unwrap_or(Value::Null)
    }
}

/// The gateway fields that can be projected individually via the
/// `get_<field>` accessors on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayField {
    Link,
    Amount,
    ShopName,
    Message,
    UserCountry,
    CreationDate,
    OrderId,
    SuccessUrl,
    FailureUrl,
}

impl GatewayField {
    /// The field name as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            GatewayField::Link => "link",
            GatewayField::Amount => "amount",
            GatewayField::ShopName => "shop_name",
            GatewayField::Message => "message",
            GatewayField::UserCountry => "user_country",
            GatewayField::CreationDate => "creation_date",
            GatewayField::OrderId => "order_id",
            GatewayField::SuccessUrl => "success_url",
            GatewayField::FailureUrl => "failure_url",
        }
    }
}

/// Request body for creating a payment gateway.
///
/// `amount` and `shop_name` are required by the API; the rest are
/// optional and omitted from the JSON body when unset. If `order_id`
/// is still unset when the request is sent, the client fills it in
/// from its order-id generator.
#[derive(Debug, Clone, Serialize)]
pub struct CreateGateway {
    pub amount: i64,
    pub shop_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_url: Option<String>,
}

impl CreateGateway {
    /// Create a request with the required fields.
    pub fn new(amount: i64, shop_name: impl Into<String>) -> Self {
        Self {
            amount,
            shop_name: shop_name.into(),
            order_id: None,
            message: None,
            success_url: None,
            failure_url: None,
        }
    }

    pub fn order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn success_url(mut self, url: impl Into<String>) -> Self {
        self.success_url = Some(url.into());
        self
    }

    pub fn failure_url(mut self, url: impl Into<String>) -> Self {
        self.failure_url = Some(url.into());
        self
    }
}

/// Request body for updating a payment gateway.
///
/// Only the fields that are set are serialized, so the server leaves
/// the rest untouched. An update with no fields set is rejected
/// client-side with [`crate::LygosError::EmptyUpdate`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct GatewayUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_url: Option<String>,
}

impl GatewayUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn shop_name(mut self, shop_name: impl Into<String>) -> Self {
        self.shop_name = Some(shop_name.into());
        self
    }

    pub fn order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn success_url(mut self, url: impl Into<String>) -> Self {
        self.success_url = Some(url.into());
        self
    }

    pub fn failure_url(mut self, url: impl Into<String>) -> Self {
        self.failure_url = Some(url.into());
        self
    }

    /// True when no field has been set.
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.shop_name.is_none()
            && self.order_id.is_none()
            && self.message.is_none()
            && self.success_url.is_none()
            && self.failure_url.is_none()
    }
}

/// Completion state of a payin transaction, keyed by order id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayinStatus {
    pub order_id: String,
    pub status: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
