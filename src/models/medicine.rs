//! Inventory item DTO.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Consumable or medicine held in the clinic stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: String,
    pub name: String,
    pub barcode: String,
    pub quantity: u32,
    pub unit: String,
    pub expiry_date: NaiveDate,
    pub provider: String,
    /// Unit price in MAD.
    pub price: f64,
}

impl Medicine {
    /// Stock value of this line (price x quantity).
    pub fn stock_value(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}
