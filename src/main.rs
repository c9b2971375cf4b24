//! Oficina Sapiens - Ponto de entrada
//!
//! Console administrativo do programa de olimpíadas do Colégio Univap.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![allow(dead_code)]

mod app;
mod data;
mod db;
mod models;
mod services;
mod ui;
mod utils;

use app::SapiensApp;
use eframe::egui;
use models::config::AppSettings;

fn main() -> eframe::Result<()> {
    // Inicia o logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    tracing::info!("Iniciando Oficina Sapiens v{}", env!("CARGO_PKG_VERSION"));

    let settings = AppSettings::load();

    // Configuração da janela
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "Oficina Sapiens - Colégio Univap v{}",
                env!("CARGO_PKG_VERSION")
            ))
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([960.0, 640.0])
            .with_app_id("sapiens"),
        ..Default::default()
    };

    // Inicia a aplicação
    eframe::run_native(
        "Oficina Sapiens",
        options,
        Box::new(|cc| Ok(Box::new(SapiensApp::new(cc)))),
    )
}
