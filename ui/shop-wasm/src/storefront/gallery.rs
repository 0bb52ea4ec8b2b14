use std::cell::RefCell;
use std::rc::Rc;

use gc_storefront::Gallery;
use tracing::error;

use crate::{dom, events};

pub fn bind() {
    let thumbnails = dom::query_all(".thumbnail");
    let Some(main_image) = dom::query(".main-image img") else {
        return;
    };
    if thumbnails.is_empty() {
        return;
    }

    let sources = thumbnails
        .iter()
        .map(|thumb| {
            dom::query_within(thumb, "img")
                .and_then(|img| img.get_attribute("src"))
                .unwrap_or_default()
        })
        .collect();
    let active = thumbnails.iter().position(|thumb| dom::has_class(thumb, "active"));
    let gallery = Rc::new(RefCell::new(Gallery::new(sources, active)));
    let thumbnails = Rc::new(thumbnails);

    for (index, thumb) in thumbnails.iter().enumerate() {
        let gallery = gallery.clone();
        let all = thumbnails.clone();
        let main_image = main_image.clone();
        events::on(thumb, "click", move |_| {
            let mut gallery = gallery.borrow_mut();
            let Some(src) = gallery.select(index) else {
                return;
            };
            if let Err(err) = main_image.set_attribute("src", src) {
                error!(err = %dom::js_error_text(&err), "could not swap main image");
                return;
            }
            for (i, t) in all.iter().enumerate() {
                dom::toggle_class(t, "active", gallery.is_active(i));
            }
        });
    }
}
