//! Patient list with the "call next patient" action.

use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_phosphor::regular::{BELL, MEGAPHONE};

use super::app::App;
use super::components::{colors, panel_header, section_frame, status_badge};
use crate::models::PatientType;

/// Show the patient call panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Call Patients");

    section_frame(ui, |ui| {
        ui.label(RichText::new("Calling doctor").strong());
        ui.add_space(10.0);

        let selected = app
            .selected_doctor()
            .map(|d| format!("{} ({})", d.display_name(), d.specialization))
            .unwrap_or_else(|| "Select a doctor".to_string());

        let mut picked = None;
        ui.horizontal(|ui| {
            ui.label("Doctor:");
            egui::ComboBox::from_id_salt("call_doctor")
                .selected_text(selected)
                .width(280.0)
                .show_ui(ui, |ui| {
                    for doctor in &app.doctors {
                        let is_selected = doctor.id == app.call_form.doctor_id;
                        if ui.selectable_label(is_selected, doctor.display_name()).clicked() {
                            picked = Some(doctor.id.clone());
                        }
                    }
                });

            ui.add_space(20.0);
            ui.label("Cabinet:");
            ui.add(
                egui::TextEdit::singleline(&mut app.call_form.cabinet_number)
                    .desired_width(80.0)
                    .hint_text("e.g. 3"),
            );

            ui.add_space(20.0);
            if ui.button(format!("{BELL}  Test chime")).clicked() {
                app.waiting_room.play_notification_sound();
            }
        });

        if let Some(doctor_id) = picked {
            app.select_doctor(&doctor_id);
        }

        if let Some(error) = &app.call_form.error {
            ui.add_space(5.0);
            ui.colored_label(colors::ERROR, error);
        }
    });

    ui.add_space(20.0);

    let mut to_call = None;
    section_frame(ui, |ui| {
        ui.label(RichText::new("Patients").strong());
        ui.add_space(10.0);

        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(160.0))
            .column(Column::auto().at_least(100.0))
            .column(Column::auto().at_least(100.0))
            .column(Column::auto().at_least(120.0))
            .column(Column::remainder())
            .header(22.0, |mut header| {
                for title in ["Name", "Type", "City", "Status", ""] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for patient in &app.patients {
                    body.row(26.0, |mut row| {
                        row.col(|ui| {
                            ui.label(patient.full_name());
                        });
                        row.col(|ui| {
                            let color = match patient.patient_type {
                                PatientType::UrgencePatient => colors::ERROR,
                                PatientType::NewPatient => colors::ACCENT,
                                PatientType::OldPatient => colors::NEUTRAL,
                            };
                            status_badge(ui, patient.patient_type.label(), color);
                        });
                        row.col(|ui| {
                            ui.label(&patient.city);
                        });
                        row.col(|ui| match app.called_at.get(&patient.id) {
                            Some(at) => {
                                ui.label(format!("Called {}", at.format("%H:%M")));
                            }
                            None => {
                                ui.label(RichText::new("Waiting").color(colors::WARNING));
                            }
                        });
                        row.col(|ui| {
                            if ui.button(format!("{MEGAPHONE}  Call")).clicked() {
                                to_call = Some(patient.id.clone());
                            }
                        });
                    });
                }
            });
    });

    if let Some(patient_id) = to_call {
        app.call_patient(&patient_id);
    }
}
