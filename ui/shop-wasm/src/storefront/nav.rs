use std::cell::RefCell;
use std::rc::Rc;

use gc_storefront::nav::{FLYOUT_ITEM_STYLES, FLYOUT_LIST_STYLES};
use gc_storefront::{NavMenu, NavVisibility};
use tracing::debug;

use crate::{dom, events};

pub fn bind() {
    let (Some(toggle), Some(menu)) = (dom::by_id("menuToggle"), dom::query(".nav-desktop")) else {
        return;
    };
    let state = Rc::new(RefCell::new(NavMenu::new()));
    events::on(&toggle, "click", move |_| {
        let visibility = state.borrow_mut().toggle();
        dom::set_styles(&menu, visibility.menu_styles());
        if visibility == NavVisibility::Open {
            if let Some(list) = dom::query_within(&menu, "ul") {
                dom::set_styles(&list, FLYOUT_LIST_STYLES);
            }
            for item in dom::query_all_within(&menu, "li") {
                dom::set_styles(&item, FLYOUT_ITEM_STYLES);
            }
        }
        debug!(?visibility, "nav toggled");
    });
}
