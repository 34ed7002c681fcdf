use crate::SketchApp;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());

        // The canvas keeps its native size, centered in whatever space
        // the panel has.
        let canvas_size = app.state().document().canvas_size();
        let canvas_rect = egui::Rect::from_center_size(response.rect.center(), canvas_size);

        app.set_canvas_rect(canvas_rect);
        app.handle_input(ctx);

        app.renderer().render(&painter, canvas_rect, app.state());
    });
}
