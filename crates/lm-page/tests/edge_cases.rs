//! Edge case tests for lm-page
//!
//! Partial pages, odd query strings and handler failures.

use lm_page::variants::VARIANT_EVENT;
use lm_page::{Config, DataLayer, LockOwner, OverlayKind, Page, TrackedEvent};
use std::time::Duration;

fn load_html(html: &str, url: &str) -> (Page, DataLayer) {
    let doc = lm_html::parse_with_url(html, url);
    let layer = DataLayer::new();
    let mut page = Page::with_defaults(doc, layer.clone());
    page.ready();
    (page, layer)
}

#[test]
fn test_empty_page_boots() {
    let (mut page, layer) = load_html("<p>hello</p>", "https://lianmai.example/?ab_h1=B&ab_trust=metrics&ab_form_fields=5");

    assert!(page.is_ready());
    assert!(page.listeners().is_empty());
    assert!(layer.is_empty());

    let p = page.select("p").unwrap();
    assert!(page.click(p).is_ok());
    page.advance(Duration::from_secs(10));
}

#[test]
fn test_pricing_recorded_without_price_elements() {
    let (page, layer) = load_html("<p>no pricing</p>", "https://lianmai.example/?ab_pricing=anything");
    assert_eq!(page.assignments().len(), 1);
    assert_eq!(layer.find(VARIANT_EVENT)[0].get_str("ab_pricing"), Some("anything"));
}

#[test]
fn test_empty_pricing_value_ignored() {
    let (_, layer) = load_html(
        r#"<section id="pricing"><span class="price">¥1</span></section>"#,
        "https://lianmai.example/?ab_pricing=",
    );
    assert!(layer.is_empty());
}

#[test]
fn test_trust_requires_both_regions() {
    let (page, layer) = load_html(
        r#"<div class="hero-trust-logos">logos</div>"#,
        "https://lianmai.example/?ab_trust=metrics",
    );
    let logos = page.select(".hero-trust-logos").unwrap();
    assert!(!page.document().tree.has_class(logos, "hidden"));
    assert!(layer.is_empty());
}

#[test]
fn test_hero_heading_missing() {
    let (page, layer) = load_html("<h1>plain</h1>", "https://lianmai.example/?ab_h1=B");
    assert_eq!(page.document().tree.text_content(page.select("h1").unwrap()), "plain");
    assert!(layer.is_empty());
}

#[test]
fn test_first_query_value_wins() {
    let (page, layer) = load_html(
        r#"<div class="hero-content"><h1>old</h1></div>"#,
        "https://lianmai.example/?ab_h1=A&ab_h1=B",
    );
    assert_eq!(page.document().tree.text_content(page.select("h1").unwrap()), "old");
    assert!(layer.is_empty());
}

#[test]
fn test_percent_encoded_keys() {
    let (page, layer) = load_html(
        r#"<div class="hero-content"><h1>old</h1></div>"#,
        "https://lianmai.example/?%61b_h1=B",
    );
    assert_ne!(page.document().tree.text_content(page.select("h1").unwrap()), "old");
    assert_eq!(layer.len(), 1);
}

#[test]
fn test_unparsable_url_skips_variants() {
    let (page, layer) = load_html(
        r#"<div class="hero-content"><h1>old</h1></div>"#,
        "not a url ?ab_h1=B",
    );
    assert!(page.is_ready());
    assert_eq!(page.document().tree.text_content(page.select("h1").unwrap()), "old");
    assert!(layer.is_empty());
}

#[test]
fn test_ready_is_idempotent() {
    let (mut page, layer) = load_html(
        r#"<div class="hero-content"><h1>old</h1></div>"#,
        "https://lianmai.example/?ab_h1=B",
    );
    page.ready();
    page.ready();
    assert_eq!(layer.find(VARIANT_EVENT).len(), 1);
}

#[test]
fn test_modal_open_twice_one_event() {
    let (mut page, layer) = load_html(
        r#"<button data-modal-open="template-modal">open</button>
           <div id="template-modal" aria-hidden="true"><button data-modal-close>x</button></div>"#,
        "https://lianmai.example/",
    );
    let opener = page.select("[data-modal-open]").unwrap();
    page.click(opener);
    page.click(opener);
    assert_eq!(layer.find("template_modal_view").len(), 1);

    page.click_selector("[data-modal-close]").unwrap();
    page.click_selector("[data-modal-close]").unwrap();
    assert!(!page.scroll_lock().is_locked());
}

#[test]
fn test_modal_without_closers() {
    let (mut page, _) = load_html(
        r#"<button data-modal-open="template-modal">open</button>
           <div id="template-modal" aria-hidden="true"><p tabindex="0">body</p></div>"#,
        "https://lianmai.example/",
    );
    page.click_selector("[data-modal-open]").unwrap();
    let inner = page.select("#template-modal p").unwrap();

    page.key_down(inner, "Enter");
    assert!(page.is_overlay_open(OverlayKind::TemplateModal));
    page.key_down(inner, "Escape");
    assert!(!page.is_overlay_open(OverlayKind::TemplateModal));
}

#[test]
fn test_escape_outside_modal_keeps_it_open() {
    let (mut page, _) = load_html(
        r#"<button data-modal-open="template-modal">open</button>
           <div id="template-modal" aria-hidden="true"><button data-modal-close>x</button></div>"#,
        "https://lianmai.example/",
    );
    let opener = page.select("[data-modal-open]").unwrap();
    page.click(opener);
    page.key_down(opener, "Escape");
    assert!(page.is_overlay_open(OverlayKind::TemplateModal));
}

#[test]
fn test_nav_and_drawer_share_scroll_lock() {
    let (mut page, _) = load_html(
        r#"<button class="nav-toggle">menu</button><nav class="site-nav"></nav>
           <button data-drawer-open="compliance-drawer">open</button>
           <aside id="compliance-drawer" aria-hidden="true"><button data-drawer-close>x</button></aside>"#,
        "https://lianmai.example/",
    );
    let body = page.document().body().unwrap();

    page.click_selector(".nav-toggle").unwrap();
    page.click_selector("[data-drawer-open]").unwrap();
    assert_eq!(
        page.scroll_lock().holders(),
        &[LockOwner::MobileNav, LockOwner::Overlay(OverlayKind::ComplianceDrawer)]
    );

    page.click_selector("[data-drawer-close]").unwrap();
    assert!(page.document().tree.has_class(body, "no-scroll"));

    page.click_selector(".nav-toggle").unwrap();
    assert!(!page.document().tree.has_class(body, "no-scroll"));
}

#[test]
fn test_nav_needs_both_elements() {
    let (mut page, _) = load_html(r#"<button class="nav-toggle">menu</button>"#, "https://lianmai.example/");
    assert!(page.select(".mobile-nav-overlay").is_none());
    page.click_selector(".nav-toggle").unwrap();
    assert!(!page.is_nav_open());
}

#[test]
fn test_non_object_payload_tracked_empty() {
    let (mut page, layer) = load_html(
        r#"<a data-track="cta_click" data-payload="[1, 2]">go</a>"#,
        "https://lianmai.example/",
    );
    let outcome = page.click_selector("a").unwrap();
    assert!(outcome.is_ok());
    assert_eq!(layer.events(), vec![TrackedEvent::new("cta_click", Default::default())]);
}

#[test]
fn test_track_attribute_removed_before_click() {
    let (mut page, layer) = load_html(r#"<a data-track="cta_click">go</a>"#, "https://lianmai.example/");
    let link = page.select("a").unwrap();
    page.document_mut().tree.remove_attribute(link, "data-track");

    page.click(link);
    assert!(layer.is_empty());
}

#[test]
fn test_payload_event_key_overrides_name() {
    let (mut page, layer) = load_html(
        r#"<a data-track="cta_click" data-payload='{"event":"renamed","slot":2}'>go</a>"#,
        "https://lianmai.example/",
    );
    page.click_selector("a").unwrap();

    let record = layer.events()[0].to_record();
    assert_eq!(record["event"], "renamed");
    assert_eq!(record["slot"], 2);
}

#[test]
fn test_click_bubbles_to_tracked_ancestor() {
    let (mut page, layer) = load_html(
        r#"<div data-track="card_click"><span class="label">inner</span></div>"#,
        "https://lianmai.example/",
    );
    page.click_selector(".label").unwrap();
    assert_eq!(layer.names(), vec!["card_click"]);
}

#[test]
fn test_faq_without_summary() {
    let (mut page, layer) = load_html(
        r#"<section id="faq"><details><p>answer</p></details></section>"#,
        "https://lianmai.example/",
    );
    let details = page.select("details").unwrap();
    page.document_mut().tree.set_attribute(details, "open", "");
    page.dispatch(lm_dom::EventType::Toggle, details);

    let events = layer.events();
    assert_eq!(events.len(), 1);
    assert!(events[0].payload.is_empty());
}

#[test]
fn test_details_outside_faq_not_tracked() {
    let (mut page, layer) = load_html(
        r#"<details><summary>q</summary></details>"#,
        "https://lianmai.example/",
    );
    page.click_selector("summary").unwrap();
    assert!(layer.is_empty());
}

#[test]
fn test_form_without_error_slot() {
    let (mut page, layer) = load_html(
        r#"<form id="hero-form"><input id="contact-info" name="contact"><button>send</button></form>"#,
        "https://lianmai.example/",
    );
    page.click_selector("button").unwrap();
    assert_eq!(layer.names(), vec!["form_submit_fail"]);

    let contact = page.select("#contact-info").unwrap();
    page.set_value(contact, "handle_01");
    page.click_selector("button").unwrap();
    assert_eq!(layer.names(), vec!["form_submit_fail", "form_submit_success"]);
}

#[test]
fn test_checkbox_fields_in_submission() {
    let (mut page, layer) = load_html(
        r#"<form id="hero-form">
             <input id="contact-info" name="contact" value="a@b.co">
             <input type="checkbox" name="consent">
             <input type="checkbox" name="newsletter" value="yes" checked>
           </form>"#,
        "https://lianmai.example/",
    );
    let consent = page.select("[name='consent']").unwrap();
    page.set_checked(consent, true);
    let form = page.select("#hero-form").unwrap();
    page.submit(form);

    let event = &layer.find("form_submit_success")[0];
    assert_eq!(event.get_str("consent"), Some("on"));
    assert_eq!(event.get_str("newsletter"), Some("yes"));
    assert!(!lm_dom::forms::is_checked(&page.document().tree, consent));
}

#[test]
fn test_toast_first_timer_still_hides() {
    let (mut page, _) = load_html(
        r#"<form id="hero-form"><input id="contact-info" name="contact"></form><div id="form-toast"></div>"#,
        "https://lianmai.example/",
    );
    let form = page.select("#hero-form").unwrap();
    let contact = page.select("#contact-info").unwrap();
    let toast = page.select("#form-toast").unwrap();

    page.set_value(contact, "a@b.co");
    page.submit(form);
    page.advance(Duration::from_secs(3));
    page.set_value(contact, "a@b.co");
    page.submit(form);

    // The first timer still fires at 4s
    page.advance(Duration::from_secs(1));
    assert!(!page.document().tree.has_class(toast, "show"));
}

#[test]
fn test_config_overrides() {
    let config: Config = serde_json::from_str(
        r#"{"hero_heading_b": "Heading B", "toast_duration_ms": 1000, "scroll_lock_class": "locked"}"#,
    )
    .unwrap();
    assert_eq!(config.whitepaper_label, Config::default().whitepaper_label);

    let doc = lm_html::parse_with_url(
        r#"<div class="hero-content"><h1>old</h1></div>
           <button data-drawer-open="compliance-drawer">open</button>
           <aside id="compliance-drawer" aria-hidden="true"></aside>
           <form id="hero-form"><input id="contact-info" name="contact"></form><div id="form-toast"></div>"#,
        "https://lianmai.example/?ab_h1=B",
    );
    let mut page = Page::new(doc, DataLayer::new(), config);
    page.ready();

    assert_eq!(page.document().tree.text_content(page.select("h1").unwrap()), "Heading B");

    page.click_selector("[data-drawer-open]").unwrap();
    let body = page.document().body().unwrap();
    assert!(page.document().tree.has_class(body, "locked"));

    let contact = page.select("#contact-info").unwrap();
    let form = page.select("#hero-form").unwrap();
    let toast = page.select("#form-toast").unwrap();
    page.set_value(contact, "a@b.co");
    page.submit(form);
    page.advance(Duration::from_millis(1000));
    assert!(!page.document().tree.has_class(toast, "show"));
}

#[test]
fn test_price_cache_keeps_inline_spacing() {
    let (mut page, layer) = load_html(
        r#"<section id="pricing"><span class="price"><b>¥9,800</b> <small>/ 月</small></span></section>"#,
        "https://lianmai.example/?ab_pricing=visible",
    );
    let price = page.select("#pricing .price").unwrap();
    assert_eq!(page.document().tree.dataset_get(price, "originalPrice"), Some("¥9,800 / 月"));
    assert_eq!(page.document().tree.text_content(price), "¥9,800 / 月");
    assert_eq!(layer.len(), 1);

    let mut tracker = lm_page::Tracker::new(DataLayer::new());
    let config = Config::default();
    let doc = page.document_mut();
    lm_page::apply_variants(doc, &lm_page::QueryParams::parse("ab_pricing=hidden"), &config, &mut tracker);
    lm_page::apply_variants(doc, &lm_page::QueryParams::parse("ab_pricing=visible"), &config, &mut tracker);
    assert_eq!(doc.tree.text_content(price), "¥9,800 / 月");
}

#[test]
fn test_faq_question_keeps_inline_spacing() {
    let (mut page, layer) = load_html(
        r#"<section id="faq"><details><summary><strong>多久</strong> <em>上线？</em></summary><p>T+24</p></details></section>"#,
        "https://lianmai.example/",
    );
    page.click_selector("summary").unwrap();
    assert_eq!(layer.events()[0].get_str("question"), Some("多久 上线？"));
}
