//! Dashboard panel with stats, navigation cards, and recent activity.

use chrono::Local;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::auth::Section;
use crate::inventory::InventorySummary;
use crate::waiting_room::WaitingRoomSnapshot;

use super::app::{App, LogLevel};
use super::components::{dashboard_card, section_frame, stat_card};

/// Show the dashboard panel.
///
/// Returns `Some(section)` if navigation is requested.
pub fn show(app: &mut App, ui: &mut Ui, snapshot: &WaitingRoomSnapshot) -> Option<Section> {
    let mut next_section = None;

    ui.vertical_centered(|ui| {
        ui.add_space(30.0);

        let name = app.session.user().map(|u| u.full_name()).unwrap_or_default();
        ui.label(RichText::new(format!("Hello, {name}")).size(32.0).strong());
        ui.add_space(5.0);
        ui.label(RichText::new(Local::now().format("%A %d %B %Y").to_string()).size(14.0).weak());

        ui.add_space(30.0);

        // Stat cards row
        let waiting = app
            .patients
            .iter()
            .filter(|p| !app.called_at.contains_key(&p.id))
            .count();
        let stock = InventorySummary::compute(&app.medicines, Local::now().date_naive());

        ui.horizontal(|ui| {
            let available = ui.available_width();
            let start_offset = ((available - 680.0) / 2.0).max(0.0);
            ui.add_space(start_offset);

            stat_card(ui, "Waiting", &waiting.to_string(), "Patients not yet called");
            stat_card(ui, "Called today", &app.calls_today().to_string(), "Patients sent to a cabinet");
            stat_card(
                ui,
                "On display",
                snapshot
                    .current
                    .as_ref()
                    .map(|c| c.cabinet_number.as_str())
                    .unwrap_or("-"),
                "Cabinet being called",
            );
            if app.session.has_access(Section::Inventory) {
                stat_card(ui, "Stock alerts", &(stock.low_stock + stock.expiring).to_string(), "Low or expiring");
            }
        });

        ui.add_space(30.0);

        // Navigation cards for the sections this role can open
        let cards: Vec<(Section, &str, &str)> = [
            (Section::Patients, "Call Patients", "Send patients to a cabinet"),
            (Section::WaitingRoom, "Waiting Room", "Public call display"),
            (Section::Inventory, "Inventory", "Stock and expiry dates"),
        ]
        .into_iter()
        .filter(|(section, _, _)| app.session.has_access(*section))
        .collect();

        if !cards.is_empty() {
            let available = ui.available_width();
            let num_cards = cards.len() as f32;
            let spacing = 30.0;
            let total_spacing = spacing * (num_cards - 1.0);
            let card_width = ((available - total_spacing) / num_cards).clamp(150.0, 250.0);
            let card_size = egui::vec2(card_width, card_width * 0.75);
            let total_width = card_width * num_cards + total_spacing;
            let start_offset = ((available - total_width) / 2.0).max(0.0);

            ui.horizontal(|ui| {
                ui.add_space(start_offset);
                for (i, (section, title, description)) in cards.iter().enumerate() {
                    if i > 0 {
                        ui.add_space(spacing);
                    }
                    if dashboard_card(ui, title, description, section_card_icon(*section), card_size).clicked() {
                        next_section = Some(*section);
                    }
                }
            });
        }

        ui.add_space(30.0);
    });

    section_frame(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new("Recent Activity").strong());
        ui.add_space(10.0);

        ScrollArea::vertical().max_height(150.0).show(ui, |ui| {
            if app.log_messages.is_empty() {
                ui.label(RichText::new("No recent activity").weak());
            } else {
                for entry in app.log_messages.iter().rev().take(10) {
                    let color = match entry.level {
                        LogLevel::Info => Color32::GRAY,
                        LogLevel::Success => Color32::from_rgb(100, 200, 100),
                        LogLevel::Warning => Color32::from_rgb(230, 180, 50),
                        LogLevel::Error => Color32::from_rgb(230, 100, 100),
                    };

                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(entry.timestamp.format("%H:%M:%S").to_string())
                                .small()
                                .color(Color32::DARK_GRAY),
                        );
                        ui.label(RichText::new(&entry.message).color(color));
                    });
                }
            }
        });
    });

    next_section
}

fn section_card_icon(section: Section) -> &'static str {
    use egui_phosphor::regular as icon;
    match section {
        Section::WaitingRoom => icon::MONITOR,
        Section::Inventory => icon::PACKAGE,
        _ => icon::MEGAPHONE,
    }
}
