//! Bill Model

use serde::{Deserialize, Serialize};

use super::profile::Profile;

/// One line of a bill's item snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillItem {
    pub name: String,
    pub qty: i32,
    /// Unit price in currency units
    pub price: f64,
}

/// Immutable snapshot of a completed order
///
/// `items` and `profile` are value copies taken at generation time;
/// subsequent catalog or profile edits never alter a past bill. Bills are
/// only ever appended to history or destroyed by a full history clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    /// Unique and chronological (monotonic sequence)
    pub id: String,
    /// Generation time, Unix millis
    pub created_at: i64,
    pub items: Vec<BillItem>,
    /// Sum of qty x price over `items`, rounded to 2 decimal places
    pub total: f64,
    /// Shop profile as it was when the bill was generated
    pub profile: Profile,
}
