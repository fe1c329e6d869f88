use std::time::Duration;

use client_core::FailurePolicy;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::Controller;
use crate::location::AppLocation;
use crate::ui::{panels, view};

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub api_url: String,
    pub location: AppLocation,
    pub failure_policy: FailurePolicy,
}

pub struct StrydeApp {
    controller: Controller,
    ui_rx: Receiver<UiEvent>,
    api_url: String,
    mounted: bool,
}

impl StrydeApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            controller: Controller::new(cmd_tx, startup.location, startup.failure_policy),
            ui_rx,
            api_url: startup.api_url,
            mounted: false,
        }
    }

    fn show_footer(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.small("Backend:");
                ui.small(egui::RichText::new(&self.api_url).weak());
                ui.small("Location:");
                ui.small(egui::RichText::new(self.controller.location().as_str()).weak());
            });
        });
    }
}

impl eframe::App for StrydeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.mounted {
            self.mounted = true;
            self.controller.mount();
        }
        self.controller.drain_backend_events(&self.ui_rx);

        if let Some(url) = self.controller.take_redirect() {
            ctx.open_url(egui::OpenUrl::same_tab(url));
        }

        self.show_footer(ctx);
        let nodes = view::render(self.controller.session());
        let actions = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| panels::show(ui, &nodes))
                    .inner
            })
            .inner;
        for action in actions {
            self.controller.handle(action.into_event());
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

impl Drop for StrydeApp {
    fn drop(&mut self) {
        self.controller.shutdown();
    }
}
