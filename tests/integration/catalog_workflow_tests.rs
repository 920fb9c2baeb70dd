/*!
 * End-to-end tests: catalogs on disk through to runtime lookups
 */

use std::sync::Arc;
use std::thread;

use anyhow::Result;
use tscat::app_controller::Controller;
use tscat::localizer::Localizer;
use crate::common;

/// Test that a normalized catalog serves the same lookups as the original
#[test]
fn test_workflow_withNormalizedCatalog_shouldServeSameTranslations() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_sample_catalog(temp_dir.path(), "source_fr.ts")?;
    let config = common::config_for_dir(temp_dir.path());
    let controller = Controller::with_config(config.clone())?;

    controller.normalize(&source, Some(temp_dir.path().join("fr.ts")), false)?;
    let reports = controller.validate(&temp_dir.path().join("fr.ts"))?;
    assert!(matches!(&reports[0].1, Ok(report) if report.is_valid()));

    let localizer = Localizer::new(&config);
    localizer.switch_language("fr")?;

    assert_eq!(localizer.tr("GMainWindow", "&File"), "&Fichier");
    assert_eq!(localizer.tr_n("GMainWindow", "Open", Some("verb"), None), "Ouvrir");
    assert_eq!(localizer.tr_n("GameList", "%n game(s)", None, Some(12)), "12 jeux");
    assert_eq!(localizer.tr("GameList", "Removed"), "Removed");

    Ok(())
}

/// Test that lookups from several threads see a consistent language while switching
#[test]
fn test_workflow_withConcurrentLookups_shouldNeverMixLanguages() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "fr.ts", &common::simple_catalog("fr", "Annuler"))?;
    common::create_test_file(temp_dir.path(), "de.ts", &common::simple_catalog("de", "Abbrechen"))?;
    let localizer = Arc::new(Localizer::new(&common::config_for_dir(temp_dir.path())));
    localizer.switch_language("fr")?;

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let localizer = Arc::clone(&localizer);
            thread::spawn(move || {
                for _ in 0..200 {
                    let text = localizer.tr("Dialog", "Cancel");
                    assert!(text == "Annuler" || text == "Abbrechen", "unexpected {}", text);
                }
            })
        })
        .collect();

    for language in ["de", "fr", "de", "fr"] {
        localizer.switch_language(language)?;
    }
    for reader in readers {
        reader.join().expect("reader thread panicked");
    }

    assert_eq!(localizer.stats().misses, 0);
    assert_eq!(localizer.cached_translators(), 2);

    Ok(())
}
