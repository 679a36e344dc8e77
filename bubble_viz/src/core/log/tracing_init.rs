// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

use super::TracingConfig;

/// Type alias for a boxed layer.
pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Simply initialize the tracing system with the provided [`TracingConfig`].
///
/// # Errors
///
/// Returns an error if any of the layers can't be created, or if a global default
/// subscriber has already been installed.
pub fn init_tracing(tracing_config: TracingConfig) -> miette::Result<()> {
    let layers = try_create_layers(&tracing_config)?;
    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|err| miette::miette!("Could not install tracing subscriber: {err}"))
}

/// Returns the layers. This does not initialize the tracing system. Don't forget to do
/// this manually, by calling `init` on the returned layers.
///
/// For example, once you have the layers, you can run the following:
/// `try_create_layers(..).map(|layers|
/// tracing_subscriber::registry().with(layers).init());`
///
/// # Errors
///
/// Returns an error if the file layer can't be created.
pub fn try_create_layers(
    tracing_config: &TracingConfig,
) -> miette::Result<Vec<Box<DynLayer<tracing_subscriber::Registry>>>> {
    let level_filter = tracing_config.get_level_filter();
    let writer_config = tracing_config.get_writer_config();

    let mut return_it: Vec<Box<DynLayer<tracing_subscriber::Registry>>> = vec![];

    // Set the level filter from the tracing configuration. This is needed if you add
    // more layers which don't have a level filter.
    return_it.push(Box::new(level_filter));

    if let Some(layer) = writer_config.try_create_display_layer(level_filter)? {
        return_it.push(layer);
    }

    if let Some(layer) = writer_config.try_create_file_layer(level_filter)? {
        return_it.push(layer);
    }

    Ok(return_it)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use tracing_core::LevelFilter;

    use super::*;
    use crate::{DisplayPreference, WriterConfig};

    fn temp_log_file(name: &str) -> String {
        std::env::temp_dir()
            .join(name)
            .to_string_lossy()
            .to_string()
    }

    #[test]
    fn test_no_writer_only_has_level_filter() {
        let config = TracingConfig {
            writer_config: WriterConfig::None,
            level_filter: LevelFilter::INFO,
        };
        let layers = try_create_layers(&config).unwrap();
        assert_eq!(layers.len(), 1);
    }

    #[test]
    fn test_display_layer() {
        let config = TracingConfig::new_display(DisplayPreference::Stderr);
        let layers = try_create_layers(&config).unwrap();
        assert_eq!(layers.len(), 2);
    }

    #[test]
    #[serial]
    fn test_both_layers() {
        let file_path = temp_log_file("r3bl_bubble_viz_both_layers.log");
        let config = TracingConfig::new_file_and_display(
            Some(file_path.clone()),
            DisplayPreference::Stdout,
        );
        let layers = try_create_layers(&config).unwrap();
        assert_eq!(layers.len(), 3);
        assert!(std::path::Path::new(&file_path).exists());
        std::fs::remove_file(file_path).ok();
    }

    #[test]
    #[serial]
    fn test_file_layer_with_level() {
        let file_path = temp_log_file("r3bl_bubble_viz_file_layer.log");
        let config =
            TracingConfig::new_file(Some(file_path.clone())).with_level_filter(LevelFilter::WARN);
        assert_eq!(config.get_level_filter(), LevelFilter::WARN);
        let layers = try_create_layers(&config).unwrap();
        assert_eq!(layers.len(), 2);
        std::fs::remove_file(file_path).ok();
    }
}
