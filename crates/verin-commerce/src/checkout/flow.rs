//! Checkout submission state machine.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use verin_cache::KvStore;

use crate::cart::CartStore;
use crate::checkout::{
    Confirmation, DraftField, FieldError, OrderDraft, OrderGateway, OrderPayload,
};
use crate::ids::OrderId;
use crate::notice::{messages, Notice};
use crate::CommerceError;

/// Where a checkout is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutState {
    /// Collecting details.
    Editing,
    /// Waiting on the order service.
    Submitting,
    /// Order placed. Terminal.
    Succeeded { order_id: OrderId },
    /// Last submission failed; draft and cart are untouched.
    Failed,
}

impl CheckoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Editing => "editing",
            CheckoutState::Submitting => "submitting",
            CheckoutState::Succeeded { .. } => "succeeded",
            CheckoutState::Failed => "failed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutState::Editing => "Editing",
            CheckoutState::Submitting => "Placing order",
            CheckoutState::Succeeded { .. } => "Order placed",
            CheckoutState::Failed => "Failed",
        }
    }
}

/// Errors returned by [`CheckoutFlow::submit`].
#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Please check: {}", join_fields(.0))]
    Invalid(Vec<FieldError>),

    #[error("An order is already being placed")]
    SubmissionPending,

    #[error("This checkout is already complete")]
    AlreadyCompleted,

    /// The cart could not be priced.
    #[error("Cart error: {0}")]
    Cart(#[source] CommerceError),

    /// The order service failed or rejected the order.
    #[error("Failed to place order: {0}")]
    Gateway(#[source] CommerceError),
}

impl CheckoutError {
    /// The notice to show for this error.
    pub fn notice(&self) -> Notice {
        match self {
            CheckoutError::EmptyCart => Notice::error(messages::EMPTY_CART),
            CheckoutError::Gateway(_) => Notice::error(messages::ORDER_FAILED),
            other => Notice::error(other.to_string()),
        }
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One checkout attempt: the draft plus its submission state.
///
/// The flow does not own the cart; [`submit`](Self::submit) borrows the
/// session's [`CartStore`] and clears it once the order is placed.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    draft: OrderDraft,
    state: CheckoutState,
    notice: Option<Notice>,
}

impl CheckoutFlow {
    /// Start with an empty draft.
    pub fn new() -> Self {
        Self::with_draft(OrderDraft::default())
    }

    pub fn with_draft(draft: OrderDraft) -> Self {
        Self {
            draft,
            state: CheckoutState::Editing,
            notice: None,
        }
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// The most recent notice raised by a submission.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Whether a submission is in flight.
    pub fn is_pending(&self) -> bool {
        self.state == CheckoutState::Submitting
    }

    /// Change a draft field.
    ///
    /// Editing after a failure returns the flow to `Editing`.
    pub fn set_field(
        &mut self,
        field: DraftField,
        value: impl Into<String>,
    ) -> Result<(), CheckoutError> {
        match self.state {
            CheckoutState::Submitting => return Err(CheckoutError::SubmissionPending),
            CheckoutState::Succeeded { .. } => return Err(CheckoutError::AlreadyCompleted),
            CheckoutState::Failed => self.state = CheckoutState::Editing,
            CheckoutState::Editing => {}
        }
        self.draft.set(field, value);
        Ok(())
    }

    /// Return a flow stuck in `Submitting` to `Editing`.
    ///
    /// Used when the submit future was dropped before it finished.
    pub fn abandon(&mut self) {
        if self.state == CheckoutState::Submitting {
            self.state = CheckoutState::Editing;
        }
    }

    /// Validate the draft and place the order.
    ///
    /// An empty cart or invalid draft fails before any request is made. On
    /// success the cart is cleared and the confirmation route returned; on
    /// failure the draft and cart are left as they were.
    pub async fn submit<S, G>(
        &mut self,
        cart: &mut CartStore<S>,
        gateway: &G,
    ) -> Result<Confirmation, CheckoutError>
    where
        S: KvStore,
        G: OrderGateway + ?Sized,
    {
        match self.state {
            CheckoutState::Submitting => return Err(CheckoutError::SubmissionPending),
            CheckoutState::Succeeded { .. } => return Err(CheckoutError::AlreadyCompleted),
            CheckoutState::Editing | CheckoutState::Failed => {}
        }

        let payload = match self.prepare(cart) {
            Ok(payload) => payload,
            Err(e) => {
                self.notice = Some(e.notice());
                return Err(e);
            }
        };

        self.state = CheckoutState::Submitting;
        match gateway.create_order(&payload).await {
            Ok(created) => {
                cart.clear_cart();
                info!(order = %created.id, items = payload.items.len(), "order placed");
                self.state = CheckoutState::Succeeded {
                    order_id: created.id.clone(),
                };
                self.notice = Some(Notice::success(messages::ORDER_PLACED));
                Ok(Confirmation::new(created.id))
            }
            Err(e) => {
                warn!(error = %e, "order submission failed");
                self.state = CheckoutState::Failed;
                let err = CheckoutError::Gateway(e);
                self.notice = Some(err.notice());
                Err(err)
            }
        }
    }

    fn prepare<S: KvStore>(&self, cart: &CartStore<S>) -> Result<OrderPayload, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.draft.validate().map_err(CheckoutError::Invalid)?;
        OrderPayload::build(&self.draft, cart.cart()).map_err(CheckoutError::Cart)
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}
