use std::collections::HashSet;
use uiforge_rag::query::{QueryCriteria, QueryEngine, RelationshipFinder};
use uiforge_rag::{A11y, Category, Component, ComponentStore, Error, Quality, Seo, StoreManager};

fn catalog() -> Vec<Component> {
    vec![
        Component::new("btn-1", "Calm Button", Category::Atom, "button", "solid", "<button/>")
            .with_mood(["calm"])
            .with_industry(["fintech"])
            .with_tags(["cta"]),
        Component::new("btn-2", "Bold Button", Category::Atom, "button", "solid", "<button/>")
            .with_mood(["bold"])
            .with_industry(["general"]),
        Component::new("icon-btn", "Icon Button", Category::Atom, "icon-button", "ghost", "<button/>")
            .with_mood(["playful"])
            .with_visual_styles(["glass"]),
        Component::new("pricing", "Pricing Table", Category::Organism, "pricing", "tiers", "<section/>")
            .with_mood(["calm"])
            .with_industry(["saas"]),
        Component::new("card", "Card", Category::Molecule, "card", "elevated", "<article/>")
            .with_industry(["fintech"]),
    ]
}

fn seeded() -> ComponentStore {
    let store = ComponentStore::open_in_memory().unwrap();
    store.seed(&catalog()).unwrap();
    store
}

#[test]
fn seed_count_matches_input() {
    let store = seeded();
    assert_eq!(store.count().unwrap(), catalog().len());
    assert!(store.is_seeded().unwrap());
}

#[test]
fn upsert_replaces_without_changing_count() {
    let store = seeded();
    let before = store.count().unwrap();

    let replacement = Component::new("btn-1", "Quiet Button", Category::Atom, "button", "text", "<button/>")
        .with_mood(["minimal"]);
    store.upsert(&replacement).unwrap();

    assert_eq!(store.count().unwrap(), before);
    let got = store.get_by_id("btn-1").unwrap();
    assert_eq!(got.variant, "text");
    assert_eq!(got.mood, vec!["minimal"]);
    assert!(got.industry.is_empty());
    assert!(got.tags.is_empty());
}

#[test]
fn delete_then_lookup_is_not_found() {
    let store = seeded();
    let before = store.count().unwrap();

    assert!(store.delete("card").unwrap());
    assert_eq!(store.count().unwrap(), before - 1);
    assert!(matches!(store.get_by_id("card"), Err(Error::NotFound(id)) if id == "card"));
}

#[test]
fn type_query_only_returns_button_types() {
    let store = seeded();
    let ranked = QueryEngine::new(&store)
        .search(&QueryCriteria::new().kind("button"))
        .unwrap();

    assert!(ranked.iter().all(|r| r.component.kind.contains("button")));
    let exact = ranked.iter().position(|r| r.component.id == "btn-1").unwrap();
    let partial = ranked.iter().position(|r| r.component.id == "icon-btn").unwrap();
    assert!(exact < partial);
}

#[test]
fn calm_button_ranks_above_bold_button() {
    let store = seeded();
    let ranked = QueryEngine::new(&store)
        .rank(&QueryCriteria::new().kind("button").mood("calm"))
        .unwrap();

    let score = |id: &str| ranked.iter().find(|r| r.id == id).map(|r| r.score).unwrap();
    assert_eq!(ranked[0].id, "btn-1");
    assert_eq!(score("btn-1"), 16);
    assert_eq!(score("btn-2"), 10);
}

#[test]
fn general_industry_is_a_weak_match() {
    let store = seeded();
    let ranked = QueryEngine::new(&store)
        .rank(&QueryCriteria::new().industry("fintech"))
        .unwrap();

    let ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["btn-1", "card", "btn-2"]);
    assert_eq!(ranked[2].score, 2);
}

#[test]
fn related_shares_mood_or_industry_and_excludes_self() {
    let store = seeded();
    let related = RelationshipFinder::new(&store).related("btn-1").unwrap();
    let ids: HashSet<&str> = related.iter().map(|c| c.id.as_str()).collect();

    assert!(!ids.contains("btn-1"));
    assert_eq!(ids, HashSet::from(["pricing", "card"]));
}

#[test]
fn hydrate_many_ids_returns_existing_subset() {
    let store = seeded();
    let mut ids: Vec<String> = (0..2000).map(|i| format!("synthetic-{i}")).collect();
    ids.push("pricing".into());
    ids.push("btn-2".into());

    let hydrated = store.hydrate(&ids).unwrap();
    let got: Vec<&str> = hydrated.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(got, vec!["pricing", "btn-2"]);
}

#[test]
fn structured_metadata_round_trips() {
    let store = ComponentStore::open_in_memory().unwrap();
    let mut component = Component::new("dialog", "Dialog", Category::Organism, "modal", "centered", "<dialog/>")
        .with_tags(["overlay", "focus-trap"])
        .with_visual_styles(["glass", "soft-shadow"])
        .with_tailwind("panel", "rounded-2xl p-8")
        .with_tailwind("backdrop", "bg-black/40");
    component.a11y = A11y {
        roles: vec!["dialog".into()],
        aria_attributes: vec!["aria-modal".into(), "aria-labelledby".into()],
        keyboard_nav: "Escape closes; focus is trapped".into(),
        contrast_ratio: 12.5,
        focus_visible: true,
        reduced_motion: false,
    };
    component.seo = Some(Seo {
        semantic_element: "dialog".into(),
        heading_level: Some(2),
        landmark: None,
    });
    component.quality = Quality {
        anti_generic: vec!["asymmetric close button".into()],
        craft_details: vec!["spring easing".into()],
        inspiration: None,
    };
    store.upsert(&component).unwrap();

    let mut got = store.get_by_id("dialog").unwrap();
    assert_eq!(got.a11y, component.a11y);
    assert_eq!(got.seo, component.seo);
    assert_eq!(got.quality, component.quality);
    assert_eq!(got.tailwind_classes, component.tailwind_classes);

    // Term collections compare as sets
    got.tags.sort();
    component.tags.sort();
    assert_eq!(got.tags, component.tags);
}

#[test]
fn store_manager_reuses_and_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = StoreManager::for_project(dir.path());

    manager.open().unwrap().seed(&catalog()).unwrap();
    assert!(manager.open().unwrap().is_seeded().unwrap());
    manager.close().unwrap();

    assert!(dir.path().join(".uiforge").join("rag.sqlite").exists());
    assert_eq!(manager.open().unwrap().count().unwrap(), catalog().len());
}

#[test]
fn non_finite_contrast_ratio_does_not_reset_a11y() {
    let store = ComponentStore::open_in_memory().unwrap();
    let mut toggle = Component::new("toggle", "Toggle", Category::Atom, "switch", "pill", "<button/>");
    toggle.a11y = A11y {
        roles: vec!["switch".into()],
        aria_attributes: vec!["aria-checked".into()],
        keyboard_nav: "Space toggles".into(),
        contrast_ratio: f64::NAN,
        focus_visible: true,
        reduced_motion: true,
    };
    store.upsert(&toggle).unwrap();

    let got = store.get_by_id("toggle").unwrap();
    assert_eq!(got.a11y.contrast_ratio, 0.0);
    assert_eq!(got.a11y.roles, vec!["switch"]);
    assert_eq!(got.a11y.keyboard_nav, "Space toggles");
    assert!(got.a11y.reduced_motion);
}
