//! egui painting of the render tree. Returns the actions clicked this frame.

use eframe::egui;

use crate::controller::reducer::ViewTab;
use crate::ui::view::{Node, SectionId, Stat, UiAction};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(252, 76, 2);

pub fn show(ui: &mut egui::Ui, nodes: &[Node]) -> Vec<UiAction> {
    let mut actions = Vec::new();
    for node in nodes {
        paint(ui, node, &mut actions);
    }
    actions
}

fn paint(ui: &mut egui::Ui, node: &Node, actions: &mut Vec<UiAction>) {
    match node {
        Node::Title(text) => {
            ui.label(egui::RichText::new(text).size(30.0).strong().color(ACCENT));
        }
        Node::Subtitle(text) => {
            ui.label(egui::RichText::new(text).italics().weak());
            ui.add_space(8.0);
        }
        Node::Notice { message, dismiss } => notice(ui, message, *dismiss, actions),
        Node::Section { id, children } => section(ui, *id, children, actions),
        Node::Heading(text) => {
            ui.add_space(4.0);
            ui.label(egui::RichText::new(text).strong().size(18.0));
        }
        Node::Text(text) => {
            ui.label(text);
        }
        Node::Muted(text) => {
            ui.label(egui::RichText::new(text).weak());
        }
        Node::LabeledValue { label, value } => {
            ui.horizontal_wrapped(|ui| {
                ui.label(label);
                ui.label(egui::RichText::new(value).strong());
            });
        }
        Node::Button {
            label,
            action,
            enabled,
        } => {
            let button = egui::Button::new(egui::RichText::new(label).strong())
                .min_size(egui::vec2(160.0, 32.0));
            if ui.add_enabled(*enabled, button).clicked() {
                actions.push(*action);
            }
        }
        Node::Link { label, url } => {
            ui.hyperlink_to(label, url);
        }
        Node::Spinner(text) => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(egui::RichText::new(text).weak());
            });
        }
        Node::Tabs { selected } => {
            ui.horizontal(|ui| {
                for tab in ViewTab::ALL {
                    if ui.selectable_label(*selected == tab, tab.label()).clicked() {
                        actions.push(UiAction::SelectTab(tab));
                    }
                }
            });
            ui.separator();
        }
        Node::Stats(stats) => stat_row(ui, stats),
        Node::VolumeRow {
            label,
            runs,
            distance,
            time,
        } => {
            egui::Grid::new(("volume_row", label))
                .num_columns(4)
                .min_col_width(110.0)
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(label).strong());
                    ui.label(runs);
                    ui.label(distance);
                    ui.label(time);
                    ui.end_row();
                });
        }
        Node::DayCard {
            day,
            date,
            workout,
            reason,
        } => {
            egui::Frame::NONE
                .fill(ui.visuals().faint_bg_color)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(day).strong());
                        ui.label(egui::RichText::new(date).weak());
                    });
                    ui.label(egui::RichText::new(workout).color(ACCENT));
                    if !reason.is_empty() {
                        ui.label(egui::RichText::new(reason).small().weak());
                    }
                });
            ui.add_space(4.0);
        }
        Node::ErrorBox { title, message } => {
            egui::Frame::NONE
                .fill(egui::Color32::from_rgb(111, 53, 53))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(title).strong().color(egui::Color32::WHITE));
                    if let Some(message) = message {
                        ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                    }
                });
        }
    }
}

fn section(ui: &mut egui::Ui, id: SectionId, children: &[Node], actions: &mut Vec<UiAction>) {
    ui.push_id(format!("{id:?}"), |ui| {
        egui::Frame::NONE
            .fill(ui.visuals().extreme_bg_color)
            .stroke(egui::Stroke::new(
                1.0,
                ui.visuals().widgets.noninteractive.bg_stroke.color,
            ))
            .corner_radius(12.0)
            .inner_margin(egui::Margin::symmetric(14, 12))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.style_mut().spacing.item_spacing = egui::vec2(8.0, 8.0);
                for child in children {
                    paint(ui, child, actions);
                }
            });
    });
    ui.add_space(10.0);
}

fn notice(ui: &mut egui::Ui, message: &str, dismiss: UiAction, actions: &mut Vec<UiAction>) {
    egui::Frame::NONE
        .fill(egui::Color32::from_rgb(111, 53, 53))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Dismiss").clicked() {
                        actions.push(dismiss);
                    }
                });
            });
        });
    ui.add_space(8.0);
}

fn stat_row(ui: &mut egui::Ui, stats: &[Stat]) {
    ui.columns(stats.len().max(1), |columns| {
        for (column, stat) in columns.iter_mut().zip(stats) {
            column.vertical_centered(|ui| {
                ui.label(egui::RichText::new(&stat.value).size(24.0).strong());
                ui.label(egui::RichText::new(&stat.label).weak());
            });
        }
    });
}
