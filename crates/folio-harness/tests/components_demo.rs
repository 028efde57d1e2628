#![forbid(unsafe_code)]

//! Integration tests: the component showcase page.

use folio_harness::demo::PAGE_TITLE;
use folio_harness::{ComponentsDemo, assert_outline};
use pretty_assertions::assert_eq;

fn cards(demo: &ComponentsDemo) -> Vec<folio_dom::NodeId> {
    let grid = demo.harness().by_class("grid--cards").unwrap();
    demo.doc().children(grid)
}

#[test]
fn page_has_three_cards() {
    let demo = ComponentsDemo::new().unwrap();
    assert_eq!(cards(&demo).len(), 3);
    let title = demo.harness().by_class("page-title").unwrap();
    assert_eq!(demo.doc().text_content(title).as_deref(), Some(PAGE_TITLE));
}

#[test]
fn buttons_card_outline() {
    let demo = ComponentsDemo::new().unwrap();
    let buttons = cards(&demo)[0];
    assert_outline!(
        demo.doc(),
        buttons,
        r#"
        div.ui-card
          div.ui-card__header
            div.ui-card__title "Buttons"
            div.ui-card__desc "Primary, secondary, ghost. Disabled + focus states."
          div.ui-card__body
            div.demo-row
              button.btn.btn--primary "Primary"
              button.btn.btn--secondary "Secondary"
              button.btn.btn--ghost "Ghost"
              button.btn.btn--primary [disabled] "Disabled"
        "#
    );
}

#[test]
fn nested_card_carries_sub_class() {
    let demo = ComponentsDemo::new().unwrap();
    let nested = demo.harness().by_class("ui-card--sub").unwrap();
    assert_outline!(
        demo.doc(),
        nested,
        r#"
        div.ui-card.ui-card--sub
          div.ui-card__header
            div.ui-card__title "Nested card"
            div.ui-card__desc "Useful for grouped content."
          div.ui-card__body
            div.demo-note "No extra layout glue required."
        "#
    );
}

#[test]
fn disabled_button_is_inert() {
    let demo = ComponentsDemo::new().unwrap();
    let disabled = demo.harness().by_text("Disabled").unwrap();
    assert!(!demo.doc().is_focusable(disabled));

    let outcome = demo.harness().click(disabled);
    assert_eq!(outcome.handled, 0);
    assert_eq!(demo.harness().focused(), None);
}

#[test]
fn page_tab_order_skips_disabled() {
    let demo = ComponentsDemo::new().unwrap();
    let h = demo.harness();
    let mut order = Vec::new();
    for _ in 0..5 {
        h.tab();
        order.push(h.focused_text().unwrap_or_default());
    }
    assert_eq!(
        order,
        ["Primary", "Secondary", "Ghost", "Open modal", "Primary"]
    );
}

#[test]
fn modal_mounts_inside_its_card() {
    let mut demo = ComponentsDemo::new().unwrap();
    assert_eq!(demo.modal_state().overlay(), None);

    demo.open_via_trigger().unwrap();
    let overlay = demo.modal_state().overlay().unwrap();
    assert_eq!(demo.doc().parent(overlay), Some(demo.modal_host()));
    assert!(demo.doc().contains(cards(&demo)[2], overlay));
    assert_eq!(demo.modal_state().return_focus(), Some(demo.trigger()));
}
