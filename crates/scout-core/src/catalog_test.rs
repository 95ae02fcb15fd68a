use std::io::Write;
use std::path::Path;

use super::*;

fn machine_yaml(id: &str, name: &str, category: &str) -> String {
    format!(
        "  - id: {id}\n    brand: Agranel\n    name: {name}\n    description: d\n    characteristic: c\n    category: {category}\n"
    )
}

#[test]
fn embedded_catalog_loads_all_five_machines() {
    let catalog = Catalog::embedded().expect("embedded catalog is valid");
    assert_eq!(catalog.len(), 5);
    let ice = catalog.get("icesupply-hielo").expect("ice machine present");
    assert_eq!(ice.category, MarketCategory::IceMarket);
    assert_eq!(ice.brand, "Ice Supply");
}

#[test]
fn embedded_catalog_covers_every_category() {
    let catalog = Catalog::embedded().unwrap();
    for category in MarketCategory::ALL {
        assert!(
            catalog.machines().iter().any(|m| m.category == category),
            "no machine for {category}"
        );
    }
}

#[test]
fn get_unknown_id_is_none() {
    let catalog = Catalog::embedded().unwrap();
    assert!(catalog.get("does-not-exist").is_none());
}

#[test]
fn unknown_category_fails_to_parse() {
    let yaml = format!("machines:\n{}", machine_yaml("x", "X", "coffee_market"));
    let err = Catalog::from_yaml(&yaml).unwrap_err();
    assert!(matches!(err, ConfigError::CatalogFileParse(_)), "got {err:?}");
}

#[test]
fn duplicate_ids_are_rejected() {
    let yaml = format!(
        "machines:\n{}{}",
        machine_yaml("dup", "One", "water_only"),
        machine_yaml("dup", "Two", "pet_market")
    );
    let err = Catalog::from_yaml(&yaml).unwrap_err();
    assert!(
        matches!(err, ConfigError::Validation(ref msg) if msg.contains("duplicate")),
        "got {err:?}"
    );
}

#[test]
fn empty_name_is_rejected() {
    let yaml = format!("machines:\n{}", machine_yaml("x", "\"  \"", "water_only"));
    let err = Catalog::from_yaml(&yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)), "got {err:?}");
}

#[test]
fn empty_catalog_is_rejected() {
    let err = Catalog::from_yaml("machines: []\n").unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn load_catalog_without_path_uses_embedded() {
    let catalog = load_catalog(None).expect("embedded");
    assert_eq!(catalog.len(), 5);
}

#[test]
fn load_catalog_reads_file() {
    let dir = std::env::temp_dir().join(format!("scout-catalog-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("machines.yaml");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        "machines:\n{}",
        machine_yaml("solo", "Solo Agua", "water_only")
    )
    .unwrap();

    let catalog = load_catalog(Some(&path)).expect("file catalog");
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.machines()[0].category, MarketCategory::WaterOnly);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn load_catalog_missing_file_is_io_error() {
    let err = load_catalog(Some(Path::new("/nonexistent/machines.yaml"))).unwrap_err();
    assert!(matches!(err, ConfigError::CatalogFileIo { .. }));
}

#[test]
fn category_round_trips_through_str() {
    for category in MarketCategory::ALL {
        let parsed: MarketCategory = category.as_str().parse().unwrap();
        assert_eq!(parsed, category);
    }
    assert!("unknown_category".parse::<MarketCategory>().is_err());
}

#[test]
fn only_ice_categories_are_competition_sensitive() {
    assert!(MarketCategory::IceMarket.is_competition_sensitive());
    assert!(MarketCategory::WaterIceMix.is_competition_sensitive());
    assert!(!MarketCategory::WaterOnly.is_competition_sensitive());
    assert!(!MarketCategory::CleaningMarket.is_competition_sensitive());
    assert!(!MarketCategory::PetMarket.is_competition_sensitive());
}
