// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use eframe::egui;
use rfd::FileDialog;

use placement_viz::error::{RenderError, RenderResult};
use placement_viz::export;
use placement_viz::render::palette::{Paint, BLACK, GRID_LINE};
use placement_viz::render::scene::{Point, Primitive, Stroke};
use placement_viz::render::svg::{axis_extent, format_tick, ticks, TITLE};
use placement_viz::render::{build_scene, save_figure, RenderConfig, Scene};
use placement_viz::Placement;

/// Opens the viewer window and blocks until it is closed.
pub fn run(placement: Placement, config: RenderConfig) -> RenderResult<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 900.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(PlacementViewer::new(placement, config)))),
    )
    .map_err(|e| RenderError::Display(e.to_string()))
}

fn color(paint: &Paint) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(
        paint.color.r,
        paint.color.g,
        paint.color.b,
        paint.alpha_u8(),
    )
}

fn stroke(stroke: &Stroke) -> egui::Stroke {
    egui::Stroke::new(stroke.width, color(&Paint::new(stroke.color, stroke.alpha)))
}

pub struct PlacementViewer {
    placement: Placement,
    config: RenderConfig,
    scene: Scene,
    show_labels: bool,
    zoom: f32,
    pan_x: f32,
    pan_y: f32,
    fit_to_view_requested: bool,
    error_message: Option<String>,
    success_message: Option<String>,
}

impl PlacementViewer {
    pub fn new(placement: Placement, config: RenderConfig) -> Self {
        let scene = build_scene(&placement, config.show_nets);
        Self {
            placement,
            config,
            scene,
            show_labels: true,
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            fit_to_view_requested: true,
            error_message: None,
            success_message: None,
        }
    }

    fn rebuild_scene(&mut self) {
        self.scene = build_scene(&self.placement, self.config.show_nets);
    }

    fn extent(&self) -> (f32, f32) {
        (
            axis_extent(self.scene.grid.width) as f32,
            axis_extent(self.scene.grid.height) as f32,
        )
    }

    fn fit_to_view(&mut self, available_size: egui::Vec2) {
        let (width, height) = self.extent();

        // Use 90% of available space for content, 10% for margin
        let scale_x = available_size.x * 0.9 / width;
        let scale_y = available_size.y * 0.9 / height;
        self.zoom = scale_x.min(scale_y).max(0.01);

        // Grid y grows upward, screen y downward
        self.pan_x = -width * 0.5 * self.zoom;
        self.pan_y = height * 0.5 * self.zoom;
    }

    fn to_screen(&self, center: egui::Pos2, point: Point) -> egui::Pos2 {
        egui::pos2(
            center.x + self.pan_x + point.x as f32 * self.zoom,
            center.y + self.pan_y - point.y as f32 * self.zoom,
        )
    }

    fn handle_save_image(&mut self) {
        if let Some(path) = FileDialog::new()
            .add_filter("PNG image", &["png"])
            .add_filter("SVG image", &["svg"])
            .set_file_name("placement.png")
            .save_file()
        {
            match save_figure(&self.scene, &path, self.config.dpi) {
                Ok(()) => {
                    self.success_message = Some(format!("Plot saved to {}", path.display()));
                }
                Err(e) => {
                    self.error_message = Some(e.to_string());
                }
            }
        }
    }

    fn handle_export_report(&mut self) {
        if let Some(path) = FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .set_file_name("hpwl.csv")
            .save_file()
        {
            match export::export_hpwl_csv(&self.placement, &path) {
                Ok(()) => {
                    self.success_message =
                        Some(format!("HPWL report saved to {}", path.display()));
                }
                Err(e) => {
                    self.error_message = Some(format!("Failed to export HPWL report: {e}"));
                }
            }
        }
    }

    fn render_menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Save Image...").clicked() {
                    self.handle_save_image();
                    ui.close_menu();
                }

                if ui.button("Export HPWL Report...").clicked() {
                    self.handle_export_report();
                    ui.close_menu();
                }

                ui.separator();

                if ui.button("Exit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                if ui
                    .checkbox(&mut self.config.show_nets, "Show Nets")
                    .changed()
                {
                    self.rebuild_scene();
                }
                ui.checkbox(&mut self.show_labels, "Show Cell Labels");
                ui.separator();
                if ui.button("Fit to View (F)").clicked() {
                    self.fit_to_view_requested = true;
                    ui.close_menu();
                }
            });
        });
    }

    fn render_summary_panel(&self, ui: &mut egui::Ui) {
        ui.heading("Placement");
        ui.monospace(format!(
            "Grid: {} x {}",
            self.placement.grid.width, self.placement.grid.height
        ));
        ui.monospace(format!(
            "Cells: {} ({} fixed)",
            self.placement.cells.len(),
            self.placement.fixed_cell_count()
        ));
        ui.monospace(format!("Nets: {}", self.placement.nets.len()));

        if !self.config.show_nets {
            return;
        }

        ui.monospace(format!("Total HPWL: {:.2}", self.scene.total_hpwl()));
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for net in &self.scene.nets {
                    ui.collapsing(&net.name, |ui| {
                        ui.monospace(format!(
                            "Pins: {} ({} resolved)",
                            net.pin_count,
                            net.pins.len()
                        ));
                        match net.bbox {
                            Some(bbox) => {
                                ui.monospace(format!(
                                    "Box: ({:.2}, {:.2}) - ({:.2}, {:.2})",
                                    bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y
                                ));
                                ui.monospace(format!("HPWL: {:.2}", bbox.hpwl()));
                            }
                            None => {
                                ui.monospace("HPWL: -");
                            }
                        }
                    });
                }
            });
    }

    fn render_visualization(&mut self, ui: &mut egui::Ui) {
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, egui::Sense::drag());

        if self.fit_to_view_requested || ui.input(|i| i.key_pressed(egui::Key::F)) {
            self.fit_to_view(available_size);
            self.fit_to_view_requested = false;
        }

        if response.dragged() {
            let delta = response.drag_delta();
            self.pan_x += delta.x;
            self.pan_y += delta.y;
        }

        if let Some(hover_pos) = response.hover_pos() {
            let scroll_delta = ui.input(|i| i.raw_scroll_delta.y);
            if scroll_delta != 0.0 {
                let zoom_factor = if scroll_delta > 0.0 { 1.1 } else { 0.9 };
                let center = response.rect.center();

                // Keep the grid point under the mouse fixed while zooming
                let world_x = (hover_pos.x - center.x - self.pan_x) / self.zoom;
                let world_y = -(hover_pos.y - center.y - self.pan_y) / self.zoom;

                self.zoom = (self.zoom * zoom_factor).clamp(0.01, 1000.0);

                self.pan_x = hover_pos.x - center.x - world_x * self.zoom;
                self.pan_y = hover_pos.y - center.y + world_y * self.zoom;
            }
        }

        let center = response.rect.center();
        painter.rect_filled(response.rect, 0.0, egui::Color32::WHITE);

        self.paint_axes(&painter, center);

        for primitive in &self.scene.primitives {
            match primitive {
                Primitive::Rect {
                    origin,
                    width,
                    height,
                    fill,
                    stroke: edge,
                } => {
                    let min = self.to_screen(center, Point::new(origin.x, origin.y + height));
                    let max = self.to_screen(center, Point::new(origin.x + width, origin.y));
                    let rect = egui::Rect::from_min_max(min, max);
                    if let Some(fill) = fill {
                        painter.rect_filled(rect, 0.0, color(fill));
                    }
                    if edge.dashed {
                        let outline = [
                            rect.left_top(),
                            rect.right_top(),
                            rect.right_bottom(),
                            rect.left_bottom(),
                            rect.left_top(),
                        ];
                        painter.extend(egui::Shape::dashed_line(&outline, stroke(edge), 6.0, 3.0));
                    } else {
                        painter.rect_stroke(rect, 0.0, stroke(edge), egui::StrokeKind::Middle);
                    }
                }
                Primitive::Circle {
                    center: pin,
                    radius,
                    fill,
                } => {
                    let pos = self.to_screen(center, *pin);
                    painter.circle_filled(pos, (*radius as f32 * self.zoom).max(1.5), color(fill));
                }
                Primitive::Label {
                    anchor, text, size, ..
                } => {
                    if self.show_labels {
                        painter.text(
                            self.to_screen(center, *anchor),
                            egui::Align2::CENTER_CENTER,
                            text,
                            egui::FontId::proportional(size * 1.4),
                            egui::Color32::BLACK,
                        );
                    }
                }
            }
        }
    }

    fn paint_axes(&self, painter: &egui::Painter, center: egui::Pos2) {
        let (width, height) = self.extent();
        let (width, height) = (width as f64, height as f64);
        let grid_color = color(&Paint::new(GRID_LINE, 0.6));
        let axis_color = color(&Paint::new(BLACK, 1.0));
        let font = egui::FontId::proportional(11.0);

        for x in ticks(width) {
            let bottom = self.to_screen(center, Point::new(x, 0.0));
            let top = self.to_screen(center, Point::new(x, height));
            painter.line_segment([bottom, top], egui::Stroke::new(1.0, grid_color));
            painter.text(
                bottom + egui::vec2(0.0, 4.0),
                egui::Align2::CENTER_TOP,
                format_tick(x),
                font.clone(),
                axis_color,
            );
        }
        for y in ticks(height) {
            let left = self.to_screen(center, Point::new(0.0, y));
            let right = self.to_screen(center, Point::new(width, y));
            painter.line_segment([left, right], egui::Stroke::new(1.0, grid_color));
            painter.text(
                left - egui::vec2(4.0, 0.0),
                egui::Align2::RIGHT_CENTER,
                format_tick(y),
                font.clone(),
                axis_color,
            );
        }

        let frame = egui::Rect::from_min_max(
            self.to_screen(center, Point::new(0.0, height)),
            self.to_screen(center, Point::new(width, 0.0)),
        );
        painter.rect_stroke(
            frame,
            0.0,
            egui::Stroke::new(1.0, axis_color),
            egui::StrokeKind::Middle,
        );
        painter.text(
            frame.center_bottom() + egui::vec2(0.0, 20.0),
            egui::Align2::CENTER_TOP,
            "X",
            font.clone(),
            axis_color,
        );
        painter.text(
            frame.left_center() - egui::vec2(36.0, 0.0),
            egui::Align2::RIGHT_CENTER,
            "Y",
            font,
            axis_color,
        );
    }
}

impl eframe::App for PlacementViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(error) = &self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.colored_label(egui::Color32::from_rgb(244, 67, 54), error);
                    ui.separator();
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        if let Some(success) = &self.success_message.clone() {
            egui::Window::new("Success")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.colored_label(egui::Color32::from_rgb(76, 175, 80), success);
                    ui.separator();
                    if ui.button("OK").clicked() {
                        self.success_message = None;
                    }
                });
        }

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.render_menu_bar(ui);
        });

        egui::SidePanel::left("summary_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                self.render_summary_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(TITLE);
            self.render_visualization(ui);
        });
    }
}
