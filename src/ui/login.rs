//! Login screen.

use eframe::egui::{self, Key, RichText};

use super::app::App;
use super::components::{colors, section_frame};

/// Show the login screen centered in the window.
pub fn show(app: &mut App, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.2);

            ui.label(RichText::new("Dental Clinic").size(32.0).strong());
            ui.add_space(5.0);
            ui.label(RichText::new("Front desk").size(14.0).weak());
            ui.add_space(30.0);

            ui.allocate_ui(egui::vec2(320.0, 220.0), |ui| {
                section_frame(ui, |ui| {
                    egui::Grid::new("login_grid")
                        .num_columns(2)
                        .spacing([20.0, 8.0])
                        .show(ui, |ui| {
                            ui.label("Username:");
                            ui.text_edit_singleline(&mut app.login_form.username);
                            ui.end_row();

                            ui.label("Password:");
                            let password = ui.add(egui::TextEdit::singleline(&mut app.login_form.password).password(true));
                            ui.end_row();

                            if password.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                                app.login();
                            }
                        });

                    ui.add_space(10.0);

                    if let Some(error) = &app.login_form.error {
                        ui.colored_label(colors::ERROR, error);
                        ui.add_space(5.0);
                    }

                    if ui.button("Log in").clicked() {
                        app.login();
                    }

                    ui.add_space(10.0);
                    ui.label(RichText::new("Demo accounts: dr.benali, admin, reception").small().weak());
                });
            });
        });
    });
}
