//! Stock status, filtering and totals for the inventory panel.

use chrono::NaiveDate;

use crate::models::Medicine;

/// Days before expiry at which a line is flagged.
pub const EXPIRING_WITHIN_DAYS: i64 = 30;

/// Quantity under which a line counts as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    Expired,
    Expiring,
    Low,
    Normal,
}

impl StockStatus {
    /// Derive the status of a stock line. Expiry wins over quantity.
    pub fn of(medicine: &Medicine, today: NaiveDate) -> Self {
        let days_left = (medicine.expiry_date - today).num_days();
        if days_left < 0 {
            StockStatus::Expired
        } else if days_left < EXPIRING_WITHIN_DAYS {
            StockStatus::Expiring
        } else if medicine.quantity < LOW_STOCK_THRESHOLD {
            StockStatus::Low
        } else {
            StockStatus::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Expired => "Expired",
            StockStatus::Expiring => "Expiring soon",
            StockStatus::Low => "Low stock",
            StockStatus::Normal => "Normal",
        }
    }
}

/// Status filter offered above the inventory table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockFilter {
    #[default]
    All,
    Low,
    /// Expired or expiring soon.
    Expired,
    Normal,
}

impl StockFilter {
    pub const ALL: [StockFilter; 4] = [StockFilter::All, StockFilter::Low, StockFilter::Expired, StockFilter::Normal];

    pub fn label(&self) -> &'static str {
        match self {
            StockFilter::All => "All items",
            StockFilter::Low => "Low stock",
            StockFilter::Expired => "Expirations",
            StockFilter::Normal => "Normal",
        }
    }

    pub fn matches(&self, status: StockStatus) -> bool {
        match self {
            StockFilter::All => true,
            StockFilter::Low => status == StockStatus::Low,
            StockFilter::Expired => matches!(status, StockStatus::Expired | StockStatus::Expiring),
            StockFilter::Normal => status == StockStatus::Normal,
        }
    }
}

/// Lines matching the search text and the status filter.
///
/// Names match case-insensitively; barcodes match the trimmed text as typed.
pub fn filter<'a>(medicines: &'a [Medicine], search: &str, status_filter: StockFilter, today: NaiveDate) -> Vec<&'a Medicine> {
    let term = search.trim();
    let needle = term.to_lowercase();
    medicines
        .iter()
        .filter(|m| term.is_empty() || m.name.to_lowercase().contains(&needle) || m.barcode.contains(term))
        .filter(|m| status_filter.matches(StockStatus::of(m, today)))
        .collect()
}

/// Headline numbers for the inventory cards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InventorySummary {
    pub total_items: usize,
    pub low_stock: usize,
    pub expiring: usize,
    /// Total stock value in MAD.
    pub total_value: f64,
}

impl InventorySummary {
    pub fn compute(medicines: &[Medicine], today: NaiveDate) -> Self {
        medicines.iter().fold(
            Self {
                total_items: medicines.len(),
                ..Default::default()
            },
            |mut acc, m| {
                match StockStatus::of(m, today) {
                    StockStatus::Low => acc.low_stock += 1,
                    StockStatus::Expired | StockStatus::Expiring => acc.expiring += 1,
                    StockStatus::Normal => {}
                }
                acc.total_value += m.stock_value();
                acc
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn item(name: &str, barcode: &str, quantity: u32, expiry: NaiveDate, price: f64) -> Medicine {
        Medicine {
            id: barcode.to_string(),
            name: name.to_string(),
            barcode: barcode.to_string(),
            quantity,
            unit: "units".to_string(),
            expiry_date: expiry,
            provider: "Test".to_string(),
            price,
        }
    }

    fn days_from_today(days: i64) -> NaiveDate {
        today() + chrono::Duration::days(days)
    }

    #[test]
    fn test_status_boundaries() {
        let t = today();
        assert_eq!(StockStatus::of(&item("a", "1", 50, days_from_today(-1), 1.0), t), StockStatus::Expired);
        assert_eq!(StockStatus::of(&item("a", "1", 50, t, 1.0), t), StockStatus::Expiring);
        assert_eq!(StockStatus::of(&item("a", "1", 50, days_from_today(29), 1.0), t), StockStatus::Expiring);
        assert_eq!(StockStatus::of(&item("a", "1", 50, days_from_today(30), 1.0), t), StockStatus::Normal);
        assert_eq!(StockStatus::of(&item("a", "1", 9, days_from_today(90), 1.0), t), StockStatus::Low);
        assert_eq!(StockStatus::of(&item("a", "1", 10, days_from_today(90), 1.0), t), StockStatus::Normal);
    }

    #[test]
    fn test_expiry_takes_precedence_over_quantity() {
        let status = StockStatus::of(&item("a", "1", 1, days_from_today(-10), 1.0), today());
        assert_eq!(status, StockStatus::Expired);
    }

    #[test]
    fn test_filter_by_search_and_status() {
        let stock = vec![
            item("Local Anaesthetic", "111", 5, days_from_today(120), 45.5),
            item("Composite", "222", 25, days_from_today(400), 89.0),
            item("Disinfectant", "333", 2, days_from_today(-3), 25.75),
        ];

        let names = |found: Vec<&Medicine>| found.into_iter().map(|m| m.name.clone()).collect::<Vec<_>>();

        assert_eq!(filter(&stock, "", StockFilter::All, today()).len(), 3);
        assert_eq!(names(filter(&stock, "ANAES", StockFilter::All, today())), vec!["Local Anaesthetic"]);
        assert_eq!(names(filter(&stock, "22", StockFilter::All, today())), vec!["Composite"]);
        assert_eq!(names(filter(&stock, "", StockFilter::Low, today())), vec!["Local Anaesthetic"]);
        assert_eq!(names(filter(&stock, "", StockFilter::Expired, today())), vec!["Disinfectant"]);
        assert_eq!(names(filter(&stock, "", StockFilter::Normal, today())), vec!["Composite"]);
        assert!(filter(&stock, "composite", StockFilter::Low, today()).is_empty());
    }

    #[test]
    fn test_barcode_search_is_case_sensitive() {
        let stock = vec![
            item("Gauze", "GZ-100", 40, days_from_today(200), 3.0),
            item("Gloves", "gl-200", 40, days_from_today(200), 8.0),
        ];
        let found = |term: &str| filter(&stock, term, StockFilter::All, today()).into_iter().map(|m| m.id.clone()).collect::<Vec<_>>();

        assert_eq!(found(" GZ-1 "), vec!["GZ-100"]);
        assert!(found("gz-1").is_empty());
        assert_eq!(found("gl-2"), vec!["gl-200"]);
    }

    #[test]
    fn test_summary() {
        let stock = vec![
            item("a", "1", 5, days_from_today(120), 45.5),
            item("b", "2", 25, days_from_today(400), 89.0),
            item("c", "3", 2, days_from_today(-3), 25.75),
        ];
        let summary = InventorySummary::compute(&stock, today());
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.low_stock, 1);
        assert_eq!(summary.expiring, 1);
        assert!((summary.total_value - (227.5 + 2225.0 + 51.5)).abs() < 1e-9);
    }

    #[test]
    fn test_summary_of_empty_stock() {
        assert_eq!(InventorySummary::compute(&[], today()), InventorySummary::default());
    }
}
