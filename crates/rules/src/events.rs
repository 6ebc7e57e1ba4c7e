//! Trigger events and the event-to-field catalog.

use serde::{Deserialize, Serialize};

use crate::condition::FilterField;

/// A user behavior that starts rule evaluation. Closed set; selecting a new
/// event for a rule resets its conditions, since fields are event-scoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerEvent {
    PageView,
    Search,
    AddToCart,
    RemoveFromCart,
    Purchase,
    UserSignup,
    ExitIntent,
}

impl TriggerEvent {
    pub const ALL: [TriggerEvent; 7] = [
        TriggerEvent::PageView,
        TriggerEvent::Search,
        TriggerEvent::AddToCart,
        TriggerEvent::RemoveFromCart,
        TriggerEvent::Purchase,
        TriggerEvent::UserSignup,
        TriggerEvent::ExitIntent,
    ];

    /// Display label, phrased to follow the "when user" summary prefix.
    pub fn label(&self) -> &'static str {
        match self {
            TriggerEvent::PageView => "views a page",
            TriggerEvent::Search => "searches for a product",
            TriggerEvent::AddToCart => "adds a product to the cart",
            TriggerEvent::RemoveFromCart => "removes a product from the cart",
            TriggerEvent::Purchase => "completes a purchase",
            TriggerEvent::UserSignup => "user registers",
            TriggerEvent::ExitIntent => "is about to leave the page",
        }
    }

    /// The ordered set of filter fields this event's payload supports.
    /// Total over the enum; exit intent carries no filterable payload.
    pub fn fields(&self) -> &'static [FilterField] {
        match self {
            TriggerEvent::PageView => &[
                FilterField::PageUrl,
                FilterField::PageTitle,
                FilterField::Referrer,
                FilterField::DeviceType,
            ],
            TriggerEvent::Search => &[FilterField::SearchTerm, FilterField::DeviceType],
            TriggerEvent::AddToCart | TriggerEvent::RemoveFromCart => &[
                FilterField::ProductName,
                FilterField::ProductCategory,
                FilterField::Price,
                FilterField::Quantity,
            ],
            TriggerEvent::Purchase => &[
                FilterField::OrderTotal,
                FilterField::PaymentMethod,
                FilterField::ProductCategory,
                FilterField::DeviceType,
            ],
            TriggerEvent::UserSignup => &[
                FilterField::SignupMethod,
                FilterField::Referrer,
                FilterField::DeviceType,
            ],
            TriggerEvent::ExitIntent => &[],
        }
    }
}
