//! Walks through the whole localization flow on a small fake UI tree:
//! dictionaries for two languages, uid attachment, a language toggle and the
//! change event. Run with `RUST_LOG=debug` to watch the engine work.

use futures::executor::block_on;
use std::sync::Arc;
use uiloc::{EngineConfig, LanguageDictionary, LocalizationItem};
use uiloc_widgets::{
    AppBarButton, IconButton, TextBlock, TitleBar, attach_uid, localization_engine,
};

fn dictionary(language: &str, entries: &[(&str, &str, &str)]) -> LanguageDictionary {
    let mut dictionary = LanguageDictionary::new(language);
    for (uid, property, value) in entries {
        dictionary.add_item(LocalizationItem::new(*uid, *property, *value));
    }
    dictionary
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let engine = localization_engine(EngineConfig::default());
    engine.on_language_changed(|event| {
        println!("-> language changed: '{}' to '{}'", event.previous, event.current);
    });

    engine.add_language_dictionary(dictionary(
        "en",
        &[
            ("Greeting", "Text", "Hello"),
            ("Save", "Label", "Save"),
            ("Save", "ToolTip", "Save the current file"),
            ("Refresh", "", "Refresh"),
            ("MainWindow", "", "Demo application"),
        ],
    ));
    engine.add_language_dictionary(dictionary(
        "fr",
        &[
            ("Greeting", "Text", "Bonjour"),
            ("Save", "Label", "Enregistrer"),
            ("Save", "ToolTip", "Enregistrer le fichier actuel"),
            ("Refresh", "", "Actualiser"),
            ("MainWindow", "", "Application de démonstration"),
        ],
    ));

    let hook = engine.attach_hook();
    let greeting = TextBlock::new();
    let save = AppBarButton::new();
    let refresh = IconButton::new("\u{e72c}");
    let title_bar = TitleBar::new();
    attach_uid(&greeting, "Greeting", &hook)?;
    attach_uid(&save, "Save", &hook)?;
    attach_uid(&refresh, "Refresh", &hook)?;
    attach_uid(&title_bar, "MainWindow", &hook)?;

    for language in engine.available_languages()? {
        block_on(engine.set_language(&language))?;
        print_tree(&greeting, &save, &refresh, &title_bar);
    }

    // dropping an element retires it from localization on the next switch
    drop(greeting);
    block_on(engine.set_language("en"))?;
    println!("tracked elements after prune: {}", engine.registry().len());

    Ok(())
}

fn print_tree(
    greeting: &Arc<TextBlock>,
    save: &Arc<AppBarButton>,
    refresh: &Arc<IconButton>,
    title_bar: &Arc<TitleBar>,
) {
    println!("  [{}]", title_bar.title());
    println!("  greeting: '{}'", greeting.text());
    println!("  save:     '{}' ({})", save.label(), save.tooltip());
    println!("  refresh:  '{}'", refresh.caption().text());
}
