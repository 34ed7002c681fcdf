use crate::SketchApp;
use crate::tool;

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(190.0)
        .show(ctx, |ui| {
            ui.heading("Sketchpad");
            ui.separator();

            ui.label("Marker");
            ui.horizontal(|ui| {
                let thin = app.state().tool().is_marker_with(tool::THIN);
                if ui.selectable_label(thin, "Thin").clicked() {
                    app.state_mut().select_marker(tool::THIN);
                }
                let thick = app.state().tool().is_marker_with(tool::THICK);
                if ui.selectable_label(thick, "Thick").clicked() {
                    app.state_mut().select_marker(tool::THICK);
                }
            });

            ui.separator();
            ui.label("Stickers");
            let glyphs: Vec<String> = app.state().palette().glyphs().to_vec();
            ui.horizontal_wrapped(|ui| {
                for glyph in &glyphs {
                    let selected = app.state().tool().is_sticker_with(glyph);
                    if ui.selectable_label(selected, glyph).clicked() {
                        app.state_mut().select_sticker(glyph);
                    }
                }
            });
            ui.horizontal(|ui| {
                let edit = egui::TextEdit::singleline(app.sticker_draft_mut())
                    .hint_text("custom sticker")
                    .desired_width(110.0);
                let response = ui.add(edit);
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Add").clicked() || submitted {
                    app.submit_custom_sticker();
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                let can_undo = app.state().document().can_undo();
                let can_redo = app.state().document().can_redo();
                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.state_mut().undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.state_mut().redo();
                }
                if ui.button("Clear").clicked() {
                    app.state_mut().clear();
                }
            });
            ui.label(format!(
                "{} on canvas, {} redoable",
                app.state().document().elements().len(),
                app.state().document().undone().len()
            ));

            ui.separator();
            if ui.button("Export PNG").clicked() {
                app.export_png();
            }
            if let Some(status) = app.export_status() {
                ui.label(status.to_owned());
            }
        });
}
