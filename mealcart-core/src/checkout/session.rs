//! Checkout session state machine.
//!
//! A session walks `Browsing -> Detail -> Address -> Payment` and ends
//! either back in `Browsing` (payment succeeded) or in `Address` (payment
//! failed). Each stage carries exactly the context it requires, so a
//! session in `Payment` always has an item, a recipient and a total.
//!
//! Transitions whose precondition does not hold are ignored rather than
//! reported as errors.

use std::fmt;
use uuid::Uuid;

use super::RecipientInfo;
use crate::catalog::CatalogItem;

/// The screen a session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckoutStep {
    #[default]
    Browsing,
    Detail,
    Address,
    Payment,
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutStep::Browsing => write!(f, "browsing"),
            CheckoutStep::Detail => write!(f, "detail"),
            CheckoutStep::Address => write!(f, "address"),
            CheckoutStep::Payment => write!(f, "payment"),
        }
    }
}

/// Result of asking the session to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied { from: CheckoutStep, to: CheckoutStep },
    /// The transition is not legal from the current step; nothing changed.
    Ignored,
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Stage {
    Browsing,
    Detail {
        item: CatalogItem,
    },
    Address {
        item: CatalogItem,
    },
    Payment {
        item: CatalogItem,
        recipient: RecipientInfo,
        total: u32,
    },
}

impl Stage {
    fn step(&self) -> CheckoutStep {
        match self {
            Stage::Browsing => CheckoutStep::Browsing,
            Stage::Detail { .. } => CheckoutStep::Detail,
            Stage::Address { .. } => CheckoutStep::Address,
            Stage::Payment { .. } => CheckoutStep::Payment,
        }
    }
}

/// Accumulated context of one checkout attempt.
///
/// The session id changes whenever an attempt starts (leaving `Browsing`)
/// and whenever one is discarded (returning to `Browsing`). A rollback from
/// `Payment` to `Address` keeps the id and the selected item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    id: Uuid,
    stage: Stage,
}

impl CheckoutSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            stage: Stage::Browsing,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> CheckoutStep {
        self.stage.step()
    }

    /// The item being bought. Present from `Detail` onwards.
    pub fn selected_item(&self) -> Option<&CatalogItem> {
        match &self.stage {
            Stage::Browsing => None,
            Stage::Detail { item } | Stage::Address { item } | Stage::Payment { item, .. } => {
                Some(item)
            }
        }
    }

    /// The recipient. Present only in `Payment`.
    pub fn recipient(&self) -> Option<&RecipientInfo> {
        match &self.stage {
            Stage::Payment { recipient, .. } => Some(recipient),
            _ => None,
        }
    }

    /// The amount to charge in the local currency. Present only in
    /// `Payment`, fixed when the step was entered.
    pub fn total(&self) -> Option<u32> {
        match &self.stage {
            Stage::Payment { total, .. } => Some(*total),
            _ => None,
        }
    }

    // -- Transitions --------------------------------------------------------

    /// `Browsing -> Detail`: start a new attempt for `item`.
    pub fn select_item(&mut self, item: CatalogItem) -> Transition {
        self.advance(|stage| match stage {
            Stage::Browsing => Ok(Stage::Detail { item }),
            other => Err(other),
        })
    }

    /// `Detail -> Browsing`: abandon the attempt.
    pub fn back(&mut self) -> Transition {
        self.advance(|stage| match stage {
            Stage::Detail { .. } => Ok(Stage::Browsing),
            other => Err(other),
        })
    }

    /// `Detail -> Address`.
    pub fn add_to_cart(&mut self) -> Transition {
        self.advance(|stage| match stage {
            Stage::Detail { item } => Ok(Stage::Address { item }),
            other => Err(other),
        })
    }

    /// `Address -> Payment`: record the recipient and fix the total at the
    /// selected item's local price.
    pub fn submit_recipient(&mut self, recipient: RecipientInfo) -> Transition {
        self.advance(|stage| match stage {
            Stage::Address { item } => {
                let total = item.price_local();
                Ok(Stage::Payment {
                    item,
                    recipient,
                    total,
                })
            }
            other => Err(other),
        })
    }

    /// `Payment -> Browsing`: the order went through, reset everything.
    pub fn payment_succeeded(&mut self) -> Transition {
        self.advance(|stage| match stage {
            Stage::Payment { .. } => Ok(Stage::Browsing),
            other => Err(other),
        })
    }

    /// `Payment -> Address`: drop recipient and total, keep the item.
    pub fn payment_failed(&mut self) -> Transition {
        self.advance(|stage| match stage {
            Stage::Payment { item, .. } => Ok(Stage::Address { item }),
            other => Err(other),
        })
    }

    /// Apply `next` to the current stage. `Err` hands the stage back
    /// unchanged.
    fn advance(&mut self, next: impl FnOnce(Stage) -> Result<Stage, Stage>) -> Transition {
        let from = self.step();
        let stage = std::mem::replace(&mut self.stage, Stage::Browsing);
        match next(stage) {
            Ok(stage) => {
                self.stage = stage;
                let to = self.step();
                if from == CheckoutStep::Browsing || to == CheckoutStep::Browsing {
                    self.id = Uuid::new_v4();
                }
                Transition::Applied { from, to }
            }
            Err(stage) => {
                self.stage = stage;
                Transition::Ignored
            }
        }
    }
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new()
    }
}
