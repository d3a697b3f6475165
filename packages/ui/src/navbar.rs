use dioxus::prelude::*;

use crate::icons::FaHorse;
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Top navigation bar. Platform packages pass their router links as children.
#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        nav {
            class: "navbar",
            span {
                class: "navbar-brand",
                Icon { icon: FaHorse, width: 18, height: 18 }
                " Horse Registry"
            }
            div {
                class: "navbar-links",
                {children}
            }
        }
    }
}
