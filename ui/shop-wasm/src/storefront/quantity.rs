use std::cell::RefCell;
use std::rc::Rc;

use gc_storefront::QuantityStepper;
use web_sys::HtmlInputElement;

use crate::{dom, events};

pub fn bind() {
    let (Some(input), Some(plus), Some(minus)) = (
        dom::query_typed::<HtmlInputElement>(".quantity-input input"),
        dom::query(".quantity-btn.plus"),
        dom::query(".quantity-btn.minus"),
    ) else {
        return;
    };
    let stepper = Rc::new(RefCell::new(QuantityStepper::from_input(&input.value())));

    // Each handler first re-reads the field so typed values are respected.
    let step = |change: fn(&mut QuantityStepper) -> u32| {
        let stepper = stepper.clone();
        let input = input.clone();
        move |_: web_sys::Event| {
            let mut stepper = stepper.borrow_mut();
            stepper.set_from_input(&input.value());
            let value = change(&mut stepper);
            input.set_value(&value.to_string());
        }
    };
    events::on(&plus, "click", step(QuantityStepper::increment));
    events::on(&minus, "click", step(QuantityStepper::decrement));
    events::on(&input, "change", step(|stepper: &mut QuantityStepper| stepper.value()));
}
