// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection groups: radio-style items whose markers settle after the menu closes.
//!
//! This example shows how to:
//! - build a menu subtree with `understory_element_tree`,
//! - attach a `Menu` and route keyboard and pointer input through it,
//! - drive the deferred marker update with host timestamps.
//!
//! Run:
//! - `cargo run -p understory_demos --example menu_selection_group`

use kurbo::Insets;
use understory_element_tree::{ElementId, ElementTree};
use understory_menu::{Corner, Key, Menu, css_classes, numbers, strings};

fn item(tree: &mut ElementTree, parent: ElementId, label: &str) -> ElementId {
    let id = tree.insert(Some(parent), "li").unwrap();
    tree.add_class(id, css_classes::LIST_ITEM_CLASS);
    tree.set_attribute(id, "data-label", label);
    id
}

fn label(menu: &Menu, id: ElementId) -> &str {
    menu.tree().attribute(id, "data-label").unwrap_or("?")
}

fn print_group(menu: &Menu, items: &[ElementId]) {
    for &id in items {
        let selected = menu
            .tree()
            .has_class(id, css_classes::MENU_SELECTED_LIST_ITEM);
        let aria = menu
            .tree()
            .attribute(id, strings::ARIA_SELECTED_ATTR)
            .unwrap_or("-");
        println!(
            "  {:<8} selected={:<5} {}={}",
            label(menu, id),
            selected,
            strings::ARIA_SELECTED_ATTR,
            aria
        );
    }
}

fn main() {
    // div.menu > ul.list > [Copy, <separator>, Paste, ul.group > [Small, Large*]]
    let mut tree = ElementTree::new();
    let root = tree.insert(None, "div").unwrap();
    tree.add_class(root, css_classes::ROOT);
    let list = tree.insert(Some(root), "ul").unwrap();
    tree.add_class(list, css_classes::LIST_CLASS);
    let _copy = item(&mut tree, list, "Copy");
    let _separator = tree.insert(Some(list), "li").unwrap();
    let _paste = item(&mut tree, list, "Paste");
    let group = tree.insert(Some(list), "ul").unwrap();
    tree.add_class(group, css_classes::LIST_CLASS);
    tree.add_class(group, css_classes::MENU_SELECTION_GROUP);
    let small = item(&mut tree, group, "Small");
    let large = item(&mut tree, group, "Large");
    tree.add_class(large, css_classes::MENU_SELECTED_LIST_ITEM);
    tree.set_attribute(large, strings::ARIA_SELECTED_ATTR, "true");

    let mut menu = Menu::attach(tree, root);
    menu.set_anchor_corner(Corner::BOTTOM_START);
    menu.set_anchor_margin(Insets::new(0.0, 4.0, 0.0, 0.0));

    println!("== Items ==");
    for (index, &id) in menu.items().iter().enumerate() {
        println!("  [{index}] {}", label(&menu, id));
    }

    println!("\n== Enter on Small at t=1000 ==");
    menu.show();
    println!("  focused: {:?}", menu.tree().focused().map(|id| label(&menu, id)));
    let selected = menu.key_down(Key::Enter, small, 1_000);
    println!("  reported index: {selected:?}, open: {}", menu.is_open());
    for event in menu.take_selected() {
        println!("  {} index={}", event.name(), event.index);
    }

    let deadline = menu.foundation().next_deadline();
    println!("  pending marker update due at {deadline:?}");
    println!("  before the deadline:");
    print_group(&menu, &[small, large]);

    let applied = menu.advance(1_000 + numbers::TRANSITION_CLOSE_DURATION);
    println!("  after advance ({applied} applied):");
    print_group(&menu, &[small, large]);

    println!("\n== Click Large, then destroy before the transition ends ==");
    menu.show();
    let selected = menu.click(large, 2_000);
    println!("  reported index: {selected:?}");
    menu.destroy();
    let applied = menu.advance(u64::MAX);
    println!("  after destroy ({applied} applied):");
    print_group(&menu, &[small, large]);
}
