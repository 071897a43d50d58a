use chrono::{Duration, Utc};
use pagecraft_blocks::{props, BlockInstance};
use pagecraft_common::Config;
use pagecraft_store::{InMemoryPageStore, PageDraft, PageStatus, PageStore, PreviewSigner, StoreError};
use serde_json::json;

fn blocks() -> Vec<BlockInstance> {
    vec![
        BlockInstance::new("b1", "hero", props(json!({ "title": "Spring sale" }))),
        BlockInstance::new("b2", "spacer", props(json!({ "height": 32 }))),
    ]
}

#[test]
fn test_draft_to_published_flow() {
    let store = InMemoryPageStore::new();

    let mut draft = PageDraft::new("Spring Sale", "").with_blocks(blocks());
    draft.theme_id = Some("sunset".to_string());
    draft.theme_overrides.insert("colors.primary".to_string(), "#ff0000".to_string());
    let page = store.save_page(draft).unwrap();

    assert_eq!(page.slug, "spring-sale");
    assert_eq!(page.blocks, blocks());
    assert_eq!(page.theme_overrides["colors.primary"], "#ff0000");
    assert!(store.get_page_by_slug("spring-sale", false).unwrap().is_none());

    let published = store.update_status(&page.id, PageStatus::Published).unwrap();
    assert!(published.is_live());

    let public = store.get_page_by_slug("spring-sale", false).unwrap().unwrap();
    assert_eq!(public.id, page.id);
    assert_eq!(public.blocks.len(), 2);

    store.update_status(&page.id, PageStatus::Unpublished).unwrap();
    assert!(store.get_page_by_slug("spring-sale", false).unwrap().is_none());
}

#[test]
fn test_list_orders_by_last_update() {
    let store = InMemoryPageStore::new();
    let first = store.save_page(PageDraft::new("First", "first")).unwrap();
    let second = store.save_page(PageDraft::new("Second", "second")).unwrap();

    std::thread::sleep(std::time::Duration::from_millis(5));
    let mut draft = first.to_draft();
    draft.title = "First, edited".to_string();
    store.save_page(draft).unwrap();

    let ids: Vec<_> = store.list_pages().unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[test]
fn test_store_defaults_come_from_config() {
    let config = Config::parse(r#"{ "defaultLocale": "fr", "defaultStoreTarget": "eu-shop" }"#).unwrap();
    let store = InMemoryPageStore::with_config(&config);

    let page = store.save_page(PageDraft::new("Accueil", "accueil")).unwrap();
    assert_eq!(page.locale, "fr");
    assert_eq!(page.store_target, "eu-shop");
}

#[test]
fn test_renaming_to_own_slug_is_allowed() {
    let store = InMemoryPageStore::new();
    let page = store.save_page(PageDraft::new("Home", "home")).unwrap();
    store.save_page(PageDraft::new("Blog", "blog")).unwrap();

    assert!(store.save_page(page.to_draft()).is_ok());

    let mut clash = page.to_draft();
    clash.slug = "blog".to_string();
    assert_eq!(
        store.save_page(clash).unwrap_err(),
        StoreError::SlugTaken("blog".to_string())
    );
}

#[test]
fn test_preview_token_scenario() {
    let store = InMemoryPageStore::new();
    let page = store.save_page(PageDraft::new("Secret launch", "")).unwrap();
    let signer = PreviewSigner::from_config("shop-secret", &Config::default()).unwrap();

    let token = signer.issue(&page.id);
    let granted = signer.verify(&token).unwrap();
    assert_eq!(granted, page.id);
    assert!(store.get_page(&granted).unwrap().is_some());

    let after_expiry = Utc::now() + signer.ttl() + Duration::seconds(1);
    assert_eq!(signer.verify_at(&token, after_expiry), None);
}
