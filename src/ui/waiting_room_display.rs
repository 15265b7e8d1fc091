//! Public waiting-room call display.

use eframe::egui::{self, Align, Layout, RichText, Ui};

use crate::waiting_room::WaitingRoomSnapshot;

use super::components::{colors, section_frame};

/// Show the current call in large type with the recent calls below.
pub fn show(ui: &mut Ui, snapshot: &WaitingRoomSnapshot) {
    ui.vertical_centered(|ui| {
        ui.add_space(20.0);
        ui.label(RichText::new("Waiting Room").size(28.0).strong());
        ui.add_space(20.0);

        section_frame(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.set_min_height(240.0);
            ui.vertical_centered(|ui| match &snapshot.current {
                Some(call) => {
                    ui.add_space(20.0);
                    ui.label(RichText::new(egui_phosphor::regular::MEGAPHONE).size(40.0).color(colors::ACCENT));
                    ui.add_space(10.0);
                    ui.label(RichText::new(call.patient.full_name()).size(48.0).strong());
                    ui.add_space(10.0);
                    ui.label(
                        RichText::new(format!("Cabinet {}", call.cabinet_number))
                            .size(40.0)
                            .color(colors::SUCCESS),
                    );
                    ui.label(RichText::new(call.doctor.display_name()).size(20.0).weak());
                    if let Some(remaining) = snapshot.remaining {
                        ui.add_space(10.0);
                        ui.label(RichText::new(format!("{}s", remaining.as_secs())).small().weak());
                    }
                }
                None => {
                    ui.add_space(80.0);
                    ui.label(RichText::new("Please wait to be called").size(32.0).weak());
                }
            });
        });

        ui.add_space(20.0);
    });

    section_frame(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new("Recent calls").strong());
        ui.add_space(10.0);

        if snapshot.history.is_empty() {
            ui.label(RichText::new("No calls yet").weak());
            return;
        }

        egui::Grid::new("call_history")
            .num_columns(4)
            .striped(true)
            .spacing([30.0, 8.0])
            .show(ui, |ui| {
                for call in &snapshot.history {
                    let is_current = snapshot.current.as_ref().is_some_and(|c| c.id == call.id);
                    let name = RichText::new(call.patient.full_name());
                    ui.label(if is_current { name.strong().color(colors::ACCENT) } else { name });
                    ui.label(format!("Cabinet {}", call.cabinet_number));
                    ui.label(call.doctor.display_name());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(RichText::new(call.timestamp.format("%H:%M:%S").to_string()).weak());
                    });
                    ui.end_row();
                }
            });
    });
}
