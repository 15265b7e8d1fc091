//! Inventory panel with summary cards, search, status filter, and stock table.

use chrono::Local;
use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_phosphor::regular::MAGNIFYING_GLASS;

use crate::inventory::{self, InventorySummary, StockFilter, StockStatus};

use super::app::App;
use super::components::{colors, panel_header, section_frame, stat_card, status_badge};

fn status_color(status: StockStatus) -> Color32 {
    match status {
        StockStatus::Expired => colors::ERROR,
        StockStatus::Expiring => Color32::from_rgb(240, 150, 60),
        StockStatus::Low => colors::WARNING,
        StockStatus::Normal => colors::SUCCESS,
    }
}

/// Show the inventory panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    let today = Local::now().date_naive();

    panel_header(ui, "Inventory");

    let summary = InventorySummary::compute(&app.medicines, today);
    ui.horizontal(|ui| {
        stat_card(ui, "Total items", &summary.total_items.to_string(), "Stock lines");
        stat_card(ui, "Low stock", &summary.low_stock.to_string(), "Below 10 units");
        stat_card(ui, "Expirations", &summary.expiring.to_string(), "Expired or within 30 days");
        stat_card(ui, "Total value", &format!("{:.2} MAD", summary.total_value), "Price x quantity");
    });

    ui.add_space(20.0);

    // Toolbar: search and filter
    ui.horizontal(|ui| {
        ui.label(MAGNIFYING_GLASS);
        ui.add(
            egui::TextEdit::singleline(&mut app.inventory_search)
                .desired_width(220.0)
                .hint_text("Name or barcode..."),
        );

        ui.add_space(20.0);

        ui.label("Status:");
        egui::ComboBox::from_id_salt("stock_filter")
            .selected_text(app.inventory_filter.label())
            .show_ui(ui, |ui| {
                for filter in StockFilter::ALL {
                    ui.selectable_value(&mut app.inventory_filter, filter, filter.label());
                }
            });
    });

    ui.add_space(10.0);

    let rows = inventory::filter(&app.medicines, &app.inventory_search, app.inventory_filter, today);

    section_frame(ui, |ui| {
        if rows.is_empty() {
            ui.label(RichText::new("No items match the current filter").weak());
            return;
        }

        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(180.0))
            .column(Column::auto().at_least(130.0))
            .column(Column::auto().at_least(110.0))
            .column(Column::auto().at_least(100.0))
            .column(Column::auto().at_least(120.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::remainder())
            .header(22.0, |mut header| {
                for title in ["Name", "Barcode", "Quantity", "Expiry", "Provider", "Price", "Status"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for medicine in rows {
                    let status = StockStatus::of(medicine, today);
                    body.row(24.0, |mut row| {
                        row.col(|ui| {
                            ui.label(&medicine.name);
                        });
                        row.col(|ui| {
                            ui.label(RichText::new(&medicine.barcode).monospace());
                        });
                        row.col(|ui| {
                            ui.label(format!("{} {}", medicine.quantity, medicine.unit));
                        });
                        row.col(|ui| {
                            ui.label(medicine.expiry_date.format("%d/%m/%Y").to_string());
                        });
                        row.col(|ui| {
                            ui.label(&medicine.provider);
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.2} MAD", medicine.price));
                        });
                        row.col(|ui| {
                            status_badge(ui, status.label(), status_color(status));
                        });
                    });
                }
            });
    });
}
