// Static page chrome: the mobile menu toggle, the footer year stamp,
// and the pointer tilt effect on the hero card. Plain DOM event wiring,
// no per-frame state.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use crate::js_err;

/// Full rotation range of the tilt card, edge to edge, in degrees.
const TILT_MAX_DEG: f64 = 14.0;

const MENU_OPEN_CLASS: &str = "show";

pub fn init_menu(document: &Document) -> Result<(), JsValue> {
    let button = document
        .get_element_by_id("menuBtn")
        .ok_or_else(|| js_err("missing #menuBtn element"))?;
    let menu = document
        .get_element_by_id("mobileMenu")
        .ok_or_else(|| js_err("missing #mobileMenu element"))?;

    {
        let button_for_toggle = button.clone();
        let menu_for_toggle = menu.clone();
        let toggle = Closure::wrap(Box::new(move || {
            let open = menu_for_toggle
                .class_list()
                .toggle(MENU_OPEN_CLASS)
                .unwrap_or(false);
            set_menu_state(&button_for_toggle, &menu_for_toggle, open);
        }) as Box<dyn FnMut()>);
        button.add_event_listener_with_callback("click", toggle.as_ref().unchecked_ref())?;
        toggle.forget();
    }

    // Any link inside the menu closes it again.
    let links = menu.query_selector_all("a")?;
    for idx in 0..links.length() {
        let link: Element = match links.item(idx) {
            Some(node) => node.dyn_into()?,
            None => continue,
        };
        let button = button.clone();
        let menu = menu.clone();
        let close = Closure::wrap(Box::new(move || {
            let _ = menu.class_list().remove_1(MENU_OPEN_CLASS);
            set_menu_state(&button, &menu, false);
        }) as Box<dyn FnMut()>);
        link.add_event_listener_with_callback("click", close.as_ref().unchecked_ref())?;
        close.forget();
    }

    Ok(())
}

// Mirror the open state into the attributes assistive tech reads.
fn set_menu_state(button: &Element, menu: &Element, open: bool) {
    let _ = button.set_attribute("aria-expanded", if open { "true" } else { "false" });
    let _ = menu.set_attribute("aria-hidden", if open { "false" } else { "true" });
}

pub fn init_footer_year(document: &Document) -> Result<(), JsValue> {
    let footer = document
        .get_element_by_id("year")
        .ok_or_else(|| js_err("missing #year element"))?;
    let year = js_sys::Date::new_0().get_full_year();
    footer.set_text_content(Some(&year.to_string()));
    Ok(())
}

/// Rotation (rot_x, rot_y) in degrees for a pointer at fractional
/// position (px, py) inside the card, (0, 0) being the top-left corner.
pub fn tilt_angles(px: f64, py: f64) -> (f64, f64) {
    let rot_x = (0.5 - py) * TILT_MAX_DEG;
    let rot_y = (px - 0.5) * TILT_MAX_DEG;
    (rot_x, rot_y)
}

fn tilt_transform(rot_x: f64, rot_y: f64) -> String {
    format!("rotateX({}deg) rotateY({}deg)", rot_x, rot_y)
}

pub fn init_tilt_card(document: &Document) -> Result<(), JsValue> {
    let card: HtmlElement = document
        .get_element_by_id("tiltCard")
        .ok_or_else(|| js_err("missing #tiltCard element"))?
        .dyn_into()?;

    {
        let card_for_move = card.clone();
        let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
            let rect = card_for_move.get_bounding_client_rect();
            let px = (event.client_x() as f64 - rect.left()) / rect.width();
            let py = (event.client_y() as f64 - rect.top()) / rect.height();
            let (rot_x, rot_y) = tilt_angles(px, py);
            let _ = card_for_move
                .style()
                .set_property("transform", &tilt_transform(rot_x, rot_y));
        }) as Box<dyn FnMut(_)>);
        card.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        on_move.forget();
    }

    {
        let card_for_leave = card.clone();
        let on_leave = Closure::wrap(Box::new(move || {
            let _ = card_for_leave
                .style()
                .set_property("transform", &tilt_transform(0.0, 0.0));
        }) as Box<dyn FnMut()>);
        card.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;
        on_leave.forget();
    }

    Ok(())
}
