use dioxus::prelude::*;

use ui::Navbar;

use crate::Route;

#[component]
pub fn AppLayout() -> Element {
    rsx! {
        Navbar {
            Link { to: Route::Horses {}, "Horses" }
            Link { to: Route::Owners {}, "Owners" }
        }

        main {
            class: "content",
            Outlet::<Route> {}
        }
    }
}
