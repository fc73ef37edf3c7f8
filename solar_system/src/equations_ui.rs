//! Equations sidebar and on-screen readouts
//!
//! Displays the equations behind each tick and labels every planet with its
//! current distance from the star, using egui.

use egui::{Align2, Color32, Context, FontId, RichText};
use solar_system::readout::format_distance_km;
use solar_system::Body;

use crate::display::DisplayConfig;

/// An equation with its name and formula
pub struct Equation {
    pub name: &'static str,
    pub formula: &'static str,
    pub description: &'static str,
}

/// Draw the equations sidebar
pub fn draw_equations_sidebar(
    ctx: &Context,
    title: &str,
    equations: &[Equation],
    variables: &[(&str, &str)],
) {
    egui::SidePanel::right("equations_panel")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading(RichText::new(title).color(Color32::LIGHT_BLUE));
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.collapsing(RichText::new("Equations").strong(), |ui| {
                    for eq in equations {
                        ui.group(|ui| {
                            ui.label(RichText::new(eq.name).strong().color(Color32::YELLOW));
                            ui.label(RichText::new(eq.formula).monospace().color(Color32::WHITE));
                            ui.label(RichText::new(eq.description).small().italics());
                        });
                        ui.add_space(4.0);
                    }
                });

                ui.add_space(8.0);

                ui.collapsing(RichText::new("Variables").strong(), |ui| {
                    egui::Grid::new("variables_grid")
                        .num_columns(2)
                        .spacing([10.0, 4.0])
                        .show(ui, |ui| {
                            for (symbol, meaning) in variables {
                                ui.label(RichText::new(*symbol).monospace().color(Color32::LIGHT_GREEN));
                                ui.label(*meaning);
                                ui.end_row();
                            }
                        });
                });
            });
        });
}

/// Label each planet with its name and distance to the star
///
/// `width` and `height` are the window size in physical pixels.
pub fn draw_distance_readouts(
    ctx: &Context,
    bodies: &[Body],
    display: &DisplayConfig,
    width: f32,
    height: f32,
) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new("distance_readouts"),
    ));
    let pixels_per_point = ctx.pixels_per_point();
    let font = FontId::proportional(10.0);
    let background = Color32::from_rgb(31, 31, 31);

    for body in bodies.iter().filter(|b| b.is_movable()) {
        let screen = display.to_screen(body.position(), width, height) / pixels_per_point;
        let anchor = egui::pos2(screen.x, screen.y);

        for (text, offset) in [
            (body.name().to_string(), -10.0),
            (format_distance_km(body.distance_to_primary()), 0.0),
        ] {
            let galley = painter.layout_no_wrap(text, font.clone(), Color32::WHITE);
            let rect = Align2::LEFT_TOP.anchor_size(anchor + egui::vec2(0.0, offset), galley.size());
            painter.rect_filled(rect, 0.0, background);
            painter.galley(rect.min, galley, Color32::WHITE);
        }
    }
}

// ============================================================================
// Solar System Equations
// ============================================================================

pub const ORBIT_EQUATIONS: &[Equation] = &[
    Equation {
        name: "Newton's Law of Gravitation",
        formula: "F = G·m₁·m₂ / r²",
        description: "Pull of every other body, summed per tick",
    },
    Equation {
        name: "Force Components",
        formula: "α = atan2(Δy, Δx)\nFx = F·cos α,  Fy = F·sin α",
        description: "Direction toward the attracting body",
    },
    Equation {
        name: "Velocity Update",
        formula: "v ← v + (F / m)·Δt",
        description: "Applied first, once per tick",
    },
    Equation {
        name: "Position Update",
        formula: "x ← x + v·Δt",
        description: "Uses the velocity just updated",
    },
    Equation {
        name: "Trail Length",
        formula: "n = 100 · R / R⊕",
        description: "Oldest points are dropped first",
    },
];

pub const ORBIT_VARIABLES: &[(&str, &str)] = &[
    ("G", "Gravitational constant (6.674×10⁻¹¹)"),
    ("m, M", "Body masses (kg)"),
    ("r", "Distance between centres (m)"),
    ("F", "Gravitational force (N)"),
    ("v", "Velocity (m/s)"),
    ("Δt", "Timestep, one day (86 400 s)"),
    ("R", "Body radius (km)"),
    ("R⊕", "Earth radius, 6 371 km"),
];
