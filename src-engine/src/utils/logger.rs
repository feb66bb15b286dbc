// FICHIER : src-engine/src/utils/logger.rs

use crate::utils::config::AppConfig;
use std::sync::Once;
use tracing_appender::rolling;
use tracing_subscriber::{
    filter::filter_fn, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

// Évite la double initialisation (fréquent en tests)
static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        let config = AppConfig::get();

        // =========================================================================
        // LAYER 1 : FICHIER JSON (optionnel)
        // =========================================================================
        let log_dir = config
            .logging
            .log_dir
            .clone()
            .filter(|_| config.logging.json_file);

        let file_layer = log_dir.as_ref().and_then(|dir| {
            if let Err(e) = std::fs::create_dir_all(dir) {
                eprintln!("⚠️ [Logger] Dossier de logs inaccessible {:?} : {}", dir, e);
                return None;
            }
            let file_appender = rolling::daily(dir, "lore.log");
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file_appender)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
        });

        // =========================================================================
        // LAYER 2 : CONSOLE
        // =========================================================================
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.core.log_level))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        // Les macros user_* affichent déjà sur stdout : pas de doublon en console
        let anti_double_filter = filter_fn(|metadata| {
            !metadata.fields().iter().any(|f| f.name() == "event")
        });

        let console_layer = fmt::layer()
            .compact()
            .with_target(false)
            .with_filter(env_filter)
            .with_filter(anti_double_filter);

        // =========================================================================
        // ASSEMBLAGE ET INITIALISATION
        // =========================================================================
        let registry = tracing_subscriber::registry()
            .with(file_layer)
            .with(console_layer);

        if registry.try_init().is_err() {
            tracing::warn!("[Logger] Ré-initialisation ignorée (subscriber global déjà actif).");
            return;
        }

        match log_dir {
            Some(dir) => tracing::info!("Logger initialisé. Logs JSON dans : {:?}", dir),
            None => tracing::info!("Logger initialisé (console uniquement)."),
        }
    });
}
